//! CLI subcommand implementations.

use std::path::PathBuf;

use anyhow::Result;

use dmvprep_core::history::FileStore;
use dmvprep_core::model::{Difficulty, Focus, QuizConfig, Style};

pub mod history;
pub mod play;
pub mod prompt;

/// Build a `QuizConfig` from raw flag values.
pub(crate) fn parse_config(
    difficulty: &str,
    style: &str,
    focus: &str,
    count: u32,
) -> Result<QuizConfig> {
    anyhow::ensure!(count >= 1, "count must be at least 1");
    Ok(QuizConfig {
        difficulty: difficulty
            .parse::<Difficulty>()
            .map_err(|e| anyhow::anyhow!(e))?,
        style: style.parse::<Style>().map_err(|e| anyhow::anyhow!(e))?,
        focus: focus.parse::<Focus>().map_err(|e| anyhow::anyhow!(e))?,
        question_count: count,
    })
}

/// Open the file store at the chosen data directory.
pub(crate) fn open_store(data_dir: Option<PathBuf>) -> Result<FileStore> {
    let dir = match data_dir {
        Some(dir) => dir,
        None => FileStore::default_dir()
            .ok_or_else(|| anyhow::anyhow!("cannot locate a data directory; pass --data-dir"))?,
    };
    Ok(FileStore::new(dir))
}
