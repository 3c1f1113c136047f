//! Seen-question history over a key-value store.
//!
//! Hashes of previously presented question texts are fed back into the
//! generation prompt to discourage repeats. Dedup is advisory: the remote
//! generator may ignore the list, so the store favors availability over
//! strict correctness and every persistence failure is logged and
//! swallowed.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::model::Question;
use crate::traits::KvStore;

/// Store key holding the JSON-encoded hash array.
pub const HISTORY_KEY: &str = "dmv_prep_seen_hashes";

/// Hashes retained after truncation; the most recently inserted win.
pub const HISTORY_CAP: usize = 500;

/// Fast non-cryptographic string hash, rendered in signed base-36.
///
/// Accumulates `h = h * 31 + unit` over UTF-16 code units with wrapping
/// 32-bit arithmetic. Collisions are tolerated: a collision only makes a
/// fresh question look already-seen, which at worst suppresses it from one
/// prompt.
pub fn hash(text: &str) -> String {
    let mut h: i32 = 0;
    for unit in text.encode_utf16() {
        h = h.wrapping_shl(5).wrapping_sub(h).wrapping_add(i32::from(unit));
    }
    base36(h)
}

fn base36(value: i32) -> String {
    let mut n = i64::from(value);
    if n == 0 {
        return "0".to_string();
    }
    let negative = n < 0;
    n = n.abs();

    let mut digits = Vec::new();
    while n > 0 {
        let d = (n % 36) as u32;
        let ch = char::from_digit(d, 36).unwrap_or('0');
        digits.push(ch);
        n /= 36;
    }
    if negative {
        digits.push('-');
    }
    digits.iter().rev().collect()
}

/// Bounded, duplicate-free history of question hashes.
pub struct HistoryStore<S> {
    store: S,
}

impl<S: KvStore> HistoryStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Record the questions just shown.
    ///
    /// Unions their hashes into the persisted list (first insertion order
    /// preserved), truncates to the most recently inserted [`HISTORY_CAP`]
    /// entries, and writes back. Never fails: losing dedup history is
    /// non-fatal, so errors are logged and dropped.
    pub fn record_seen(&self, questions: &[Question]) {
        let mut history = self.seen_hashes();
        let mut known: HashSet<String> = history.iter().cloned().collect();

        for q in questions {
            let h = hash(&q.question);
            if known.insert(h.clone()) {
                history.push(h);
            }
        }

        if history.len() > HISTORY_CAP {
            history.drain(..history.len() - HISTORY_CAP);
        }

        match serde_json::to_string(&history) {
            Ok(encoded) => {
                if let Err(e) = self.store.set(HISTORY_KEY, &encoded) {
                    tracing::warn!("failed to save question history: {e}");
                }
            }
            Err(e) => tracing::warn!("failed to encode question history: {e}"),
        }
    }

    /// Previously recorded hashes, oldest first. Empty when the value is
    /// absent or unparsable; never raises.
    pub fn seen_hashes(&self) -> Vec<String> {
        self.store
            .get(HISTORY_KEY)
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }

    pub fn seen_count(&self) -> usize {
        self.seen_hashes().len()
    }

    /// Drop all recorded hashes.
    pub fn clear(&self) -> anyhow::Result<()> {
        self.store.set(HISTORY_KEY, "[]")
    }
}

/// File-backed store: one file per key under a data directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Default data directory (`~/.local/share/dmvprep`).
    pub fn default_dir() -> Option<PathBuf> {
        std::env::var_os("HOME").map(|home| {
            PathBuf::from(home)
                .join(".local")
                .join("share")
                .join("dmvprep")
        })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        // Write-then-rename so a concurrent reader never sees a torn value.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.values
            .lock()
            .map_err(|_| anyhow::anyhow!("store poisoned"))?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
