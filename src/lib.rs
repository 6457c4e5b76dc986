//! Diet and mood journal with an insights engine.
//!
//! Users log entries pairing what they ate with a mood score (1-5), an energy
//! level (1-10), symptom tags, and notes. Food can be typed in or recognised from
//! a photo by a vision model. The insights engine summarises recent history:
//!
//! | Insight | Window | Output |
//! |---------|--------|--------|
//! | Statistics | 30 days | average mood, average energy, entry count |
//! | Patterns | 14 days | coffee, sugar crash, and mood booster heuristics |
//! | Trend | 7 days | daily mood/energy means, `null` on empty days |
//!
//! # Modules
//!
//! - [`config`]: configuration from TOML and environment variables
//! - [`db`]: SQLite initialization, schema, migrations, and health checks
//! - [`journal`]: entry types, the capture flow, the entry store, and export
//! - [`insights`]: the pure statistics, pattern, and trend computations
//! - [`analysis`]: the food-photo vision backend and reply parsing
//! - [`api`] and [`server`]: the HTTP surface

pub mod analysis;
pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod insights;
pub mod journal;
pub mod server;
