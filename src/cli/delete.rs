use anyhow::Result;

use dietmood::config::DietMoodConfig;
use dietmood::error::JournalError;
use dietmood::journal::store;

pub fn delete(config: &DietMoodConfig, id: i64) -> Result<()> {
    let mut conn = dietmood::db::open_database(config.resolved_db_path())?;

    match store::delete_entry(&mut conn, id) {
        Ok(()) => println!("Deleted entry #{id}"),
        Err(JournalError::NotFound(_)) => anyhow::bail!("no entry with id {id}"),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}
