//! Ranking persistence
//!
//! Features:
//! - Whole-file JSON rewrite on every save (read-modify-write)
//! - Temp file + rename, so a failed write never truncates the old ranking
//! - Missing file is an empty ranking; a corrupt one is logged and replaced

use std::fs::File;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::ranking::{Ranking, RankingEntry};

/// Backing storage for the high score ranking
pub trait RankingStore {
    /// Current ranking. Never fails: absent or unreadable data is an empty board.
    fn load(&self) -> Ranking;

    /// Record a finished session. Returns the rank achieved, if any.
    fn save(&mut self, name: &str, score: u64) -> Result<Option<usize>>;
}

/// Ranking kept in a JSON file on disk
#[derive(Debug, Clone)]
pub struct FileRankingStore {
    path: PathBuf,
}

impl FileRankingStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw file contents, `Ok(None)` when the file does not exist
    fn read_text(&self) -> Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("reading {}", self.path.display())),
        }
    }

    fn parse(&self, text: &str) -> Result<Ranking> {
        let entries: Vec<RankingEntry> = serde_json::from_str(text)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        // Hand-edited files may be unsorted or too long
        Ok(Ranking::from_entries(entries))
    }

    /// Strict read: `Ok(None)` when the file does not exist
    pub fn read(&self) -> Result<Option<Ranking>> {
        self.read_text()?.map(|text| self.parse(&text)).transpose()
    }
}

impl RankingStore for FileRankingStore {
    fn load(&self) -> Ranking {
        match self.read() {
            Ok(Some(ranking)) => {
                log::debug!("Loaded {} ranking entries", ranking.len());
                ranking
            }
            Ok(None) => {
                log::debug!("No ranking at {}, starting fresh", self.path.display());
                Ranking::new()
            }
            Err(e) => {
                log::warn!("{:#}; treating ranking as empty", e);
                Ranking::new()
            }
        }
    }

    /// Only corrupt content is replaced. A file that exists but cannot be
    /// read is left alone and the error is returned.
    fn save(&mut self, name: &str, score: u64) -> Result<Option<usize>> {
        let mut ranking = match self.read_text()? {
            Some(text) => self.parse(&text).unwrap_or_else(|e| {
                log::warn!("{:#}; overwriting with a new ranking", e);
                Ranking::new()
            }),
            None => Ranking::new(),
        };
        let rank = ranking.insert(name, score);
        write_json(&self.path, &ranking)?;
        log::info!(
            "Ranking saved ({} entries, {} scored {} -> rank {:?})",
            ranking.len(),
            name,
            score,
            rank
        );
        Ok(rank)
    }
}

/// Ranking held in memory, for tests and headless runs
#[derive(Debug, Clone, Default)]
pub struct MemoryRankingStore {
    ranking: Ranking,
    /// Number of completed `save` calls
    pub saves: usize,
}

impl MemoryRankingStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RankingStore for MemoryRankingStore {
    fn load(&self) -> Ranking {
        self.ranking.clone()
    }

    fn save(&mut self, name: &str, score: u64) -> Result<Option<usize>> {
        self.saves += 1;
        Ok(self.ranking.insert(name, score))
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Serialize `value` to `path`, replacing the whole file
fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }

    let tmp = tmp_path(path);
    let written = (|| -> Result<()> {
        let file =
            File::create(&tmp).with_context(|| format!("creating {}", tmp.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, value)
            .with_context(|| format!("serializing {}", tmp.display()))?;
        writer
            .flush()
            .with_context(|| format!("flushing {}", tmp.display()))?;
        Ok(())
    })();

    if let Err(e) = written {
        let _ = std::fs::remove_file(&tmp);
        return Err(e);
    }

    std::fs::rename(&tmp, path).map_err(|e| {
        let _ = std::fs::remove_file(&tmp);
        anyhow::Error::new(e).context(format!("replacing {}", path.display()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::MAX_RANKING_ENTRIES;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileRankingStore::new(dir.path().join("ranking.json"));
        assert!(store.read().unwrap().is_none());
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileRankingStore::new(dir.path().join("ranking.json"));

        assert_eq!(store.save("ana", 40).unwrap(), Some(1));
        assert_eq!(store.save("bia", 90).unwrap(), Some(1));
        assert_eq!(store.save("caio", 60).unwrap(), Some(2));

        let ranking = store.load();
        let names: Vec<&str> = ranking.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["bia", "caio", "ana"]);
        assert_eq!(
            ranking.entries()[1],
            RankingEntry {
                name: "caio".into(),
                score: 60
            }
        );
        assert!(!tmp_path(store.path()).exists());
    }

    #[test]
    fn test_twelve_saves_keep_top_ten() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileRankingStore::new(dir.path().join("ranking.json"));
        for i in 0..12u64 {
            store.save(&format!("p{i}"), 100 - i * 5).unwrap();
        }

        let ranking = store.read().unwrap().unwrap();
        assert_eq!(ranking.len(), MAX_RANKING_ENTRIES);
        let scores: Vec<u64> = ranking.entries().iter().map(|e| e.score).collect();
        assert!(scores.windows(2).all(|w| w[0] > w[1]));
        assert_eq!(scores.first(), Some(&100));
        assert_eq!(scores.last(), Some(&55));
    }

    #[test]
    fn test_file_is_human_readable_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ranking.json");
        let mut store = FileRankingStore::new(&path);
        store.save("ana", 7).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value, serde_json::json!([{"name": "ana", "score": 7}]));
    }

    #[test]
    fn test_corrupt_file_recovers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ranking.json");
        std::fs::write(&path, "[{\"name\": ").unwrap();

        let mut store = FileRankingStore::new(&path);
        assert!(store.read().is_err());
        assert!(store.load().is_empty());

        // The next save overwrites the damaged file
        assert_eq!(store.save("ana", 12).unwrap(), Some(1));
        assert_eq!(store.read().unwrap().unwrap().len(), 1);
    }

    #[test]
    fn test_unsorted_file_is_normalized() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ranking.json");
        std::fs::write(
            &path,
            r#"[{"name":"low","score":1},{"name":"high","score":9}]"#,
        )
        .unwrap();
        let ranking = FileRankingStore::new(&path).load();
        assert_eq!(ranking.top_score(), Some(9));
    }

    #[test]
    fn test_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileRankingStore::new(dir.path().join("nested/deeper/ranking.json"));
        store.save("ana", 1).unwrap();
        assert_eq!(store.load().len(), 1);
    }

    #[test]
    fn test_rename_failure_cleans_up_tmp() {
        let dir = tempfile::tempdir().unwrap();
        // A non-empty directory where the file should be makes the rename fail
        let path = dir.path().join("ranking.json");
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("keep"), "x").unwrap();

        let mut ranking = Ranking::new();
        ranking.insert("ana", 3);
        assert!(write_json(&path, &ranking).is_err());
        assert!(!tmp_path(&path).exists());
        assert!(path.join("keep").exists());
    }

    #[test]
    fn test_unreadable_ranking_is_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        // Reading a directory fails with an I/O error, not a parse error
        let path = dir.path().join("ranking.json");
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("keep"), "x").unwrap();

        let mut store = FileRankingStore::new(&path);
        let err = store.save("ana", 3).unwrap_err();
        assert!(format!("{:#}", err).contains("reading"));
        // Nothing was written
        assert!(!tmp_path(&path).exists());
        assert!(path.is_dir());
        assert!(path.join("keep").exists());

        // The lenient load still reports an empty board
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_memory_store_counts_saves() {
        let mut store = MemoryRankingStore::new();
        store.save("a", 5).unwrap();
        store.save("b", 9).unwrap();
        assert_eq!(store.saves, 2);
        assert_eq!(store.load().top_score(), Some(9));
    }
}
