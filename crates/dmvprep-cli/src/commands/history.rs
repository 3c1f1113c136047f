//! The `dmvprep history` command.

use std::path::PathBuf;

use anyhow::Result;

use dmvprep_core::history::HistoryStore;

pub fn execute(clear: bool, data_dir: Option<PathBuf>) -> Result<()> {
    let history = HistoryStore::new(super::open_store(data_dir)?);

    if clear {
        history.clear()?;
        println!("Question history cleared.");
    } else {
        println!("Seen questions recorded: {}", history.seen_count());
    }

    Ok(())
}
