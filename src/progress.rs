//! Persisted per-topic progress counters and the global aggregate.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Answered/correct counters for one topic. `correct` never exceeds
/// `answered`; persisted records violating this are clamped on load.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub answered: u32,
    pub correct: u32,
}

/// All persisted counters, keyed by topic id.
pub type ProgressMap = BTreeMap<String, ProgressRecord>;

/// Overall score derived from all topic records.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GlobalProgress {
    pub correct: u64,
    pub total: u64,
    pub percent: u8,
}

/// Fold all records into a global correct/total count and a rounded
/// percentage (0 when nothing has been answered yet).
pub fn aggregate(records: &ProgressMap) -> GlobalProgress {
    let correct: u64 = records.values().map(|r| u64::from(r.correct)).sum();
    let total: u64 = records.values().map(|r| u64::from(r.answered)).sum();
    let percent = if total == 0 {
        0
    } else {
        (100.0 * correct as f64 / total as f64).round() as u8
    };

    GlobalProgress {
        correct,
        total,
        percent,
    }
}

/// File-backed key-value store for [`ProgressRecord`]s.
///
/// The file holds a single JSON object `{ topicId: {answered, correct} }`.
/// Absent or corrupt data loads as an empty map; only [`clear`] removes
/// the file.
///
/// [`clear`]: ProgressStore::clear
pub struct ProgressStore {
    path: PathBuf,
}

impl ProgressStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Load all records. Missing or unparseable data yields an empty map.
    pub fn load(&self) -> ProgressMap {
        let Ok(json) = fs::read_to_string(&self.path) else {
            return ProgressMap::new();
        };

        let mut records: ProgressMap = serde_json::from_str(&json).unwrap_or_default();
        for record in records.values_mut() {
            record.correct = record.correct.min(record.answered);
        }
        records
    }

    /// Write all records, replacing the previous contents.
    pub fn save(&self, records: &ProgressMap) -> io::Result<()> {
        let json = serde_json::to_string(records).map_err(io::Error::other)?;
        fs::write(&self.path, json)
    }

    /// Count one graded answer for `topic_id` and return the updated map.
    pub fn record(&self, topic_id: &str, correct: bool) -> io::Result<ProgressMap> {
        let mut records = self.load();
        let entry = records.entry(topic_id.to_string()).or_default();
        entry.answered += 1;
        if correct {
            entry.correct += 1;
        }
        self.save(&records)?;
        Ok(records)
    }

    /// Remove the persisted file. Not finding it is fine.
    pub fn clear(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> ProgressStore {
        ProgressStore::new(dir.path().join("progress.json"))
    }

    #[test]
    fn test_load_of_absent_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(store_in(&dir).load().is_empty());
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let mut records = ProgressMap::new();
        records.insert(
            "skalen".to_string(),
            ProgressRecord {
                answered: 7,
                correct: 4,
            },
        );
        records.insert(
            "wasser".to_string(),
            ProgressRecord {
                answered: 0,
                correct: 0,
            },
        );

        store.save(&records).unwrap();
        assert_eq!(store.load(), records);
    }

    #[test]
    fn test_corrupt_file_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(dir.path().join("progress.json"), "{not valid json").unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_load_clamps_correct_to_answered() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(
            dir.path().join("progress.json"),
            r#"{"skalen":{"answered":2,"correct":9}}"#,
        )
        .unwrap();

        let records = store.load();
        assert_eq!(records["skalen"].correct, 2);
    }

    #[test]
    fn test_record_counts_answers() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.record("skalen", true).unwrap();
        store.record("skalen", false).unwrap();
        let records = store.record("skalen", true).unwrap();

        assert_eq!(
            records["skalen"],
            ProgressRecord {
                answered: 3,
                correct: 2,
            }
        );
        // Read-your-writes: a fresh load observes the same counters.
        assert_eq!(store.load(), records);
    }

    #[test]
    fn test_clear_empties_the_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.record("wasser", true).unwrap();
        store.clear().unwrap();
        assert!(store.load().is_empty());
        assert_eq!(aggregate(&store.load()), GlobalProgress::default());

        // Clearing an already-empty store is a no-op.
        store.clear().unwrap();
    }

    #[test]
    fn test_aggregate_percentages() {
        let mut records = ProgressMap::new();
        records.insert(
            "a".to_string(),
            ProgressRecord {
                answered: 5,
                correct: 3,
            },
        );
        records.insert(
            "b".to_string(),
            ProgressRecord {
                answered: 3,
                correct: 3,
            },
        );

        let overall = aggregate(&records);
        assert_eq!(overall.correct, 6);
        assert_eq!(overall.total, 8);
        assert_eq!(overall.percent, 75);
    }

    #[test]
    fn test_aggregate_of_empty_is_zero() {
        assert_eq!(aggregate(&ProgressMap::new()), GlobalProgress::default());
    }
}
