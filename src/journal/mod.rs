pub mod capture;
pub mod export;
pub mod store;
pub mod types;
