//! The `dmvprep prompt` command — print the exact generation prompt.

use std::path::PathBuf;

use anyhow::Result;

use dmvprep_core::history::HistoryStore;
use dmvprep_core::prompt::build_prompt;

pub fn execute(
    difficulty: String,
    style: String,
    focus: String,
    count: u32,
    data_dir: Option<PathBuf>,
) -> Result<()> {
    let config = super::parse_config(&difficulty, &style, &focus, count)?;
    let history = HistoryStore::new(super::open_store(data_dir)?);

    let seen = history.seen_hashes();
    println!("{}", build_prompt(&config, &seen));

    Ok(())
}
