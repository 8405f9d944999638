use alloc::string::{String, ToString};
use alloc::vec::Vec;
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::*;

/// String key/value persistence, such as the browser's local storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: String) -> Result<()>;
}

/// Process-local store, used for headless runs and tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that rejects every write, leaving the previous content untouched.
    pub fn failing_writes() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        if self.fail_writes {
            return Err(StoreError::Write("writes disabled".to_string()));
        }
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// One finished game on the leaderboard.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestScore {
    pub score: u32,
    pub moves: PairCount,
    /// Seconds taken.
    pub time: u32,
    pub difficulty: Difficulty,
    /// ISO-8601 timestamp of the win.
    pub date: String,
}

/// Leaderboard of the best games across all difficulties, kept sorted by descending score.
#[derive(Clone, Debug)]
pub struct BestScoreStore<K> {
    backend: K,
}

impl<K: KeyValueStore> BestScoreStore<K> {
    pub const KEY: &'static str = "memoryGameBestScores";
    pub const CAPACITY: usize = 10;

    pub fn new(backend: K) -> Self {
        Self { backend }
    }

    /// Adds `score` to the leaderboard, keeping only the best [`Self::CAPACITY`] entries.
    pub fn save_best_score(&mut self, score: BestScore) -> Result<()> {
        let mut scores = self.best_scores();
        scores.push(score);
        scores.sort_by(|a, b| b.score.cmp(&a.score));
        scores.truncate(Self::CAPACITY);

        let value =
            serde_json::to_string(&scores).map_err(|err| StoreError::Serialize(err.to_string()))?;
        self.backend.set(Self::KEY, value)
    }

    /// The stored leaderboard, empty when nothing usable is stored.
    pub fn best_scores(&self) -> Vec<BestScore> {
        let stored = match self.backend.get(Self::KEY) {
            Ok(Some(stored)) => stored,
            Ok(None) => return Vec::new(),
            Err(err) => {
                log::warn!("Could not load best scores: {}", err);
                return Vec::new();
            }
        };

        serde_json::from_str(&stored).unwrap_or_else(|err| {
            log::warn!("Discarding unreadable best scores: {}", err);
            Vec::new()
        })
    }

    pub fn best_score_for(&self, difficulty: Difficulty) -> Option<BestScore> {
        self.best_scores()
            .into_iter()
            .find(|score| score.difficulty == difficulty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    type Store = BestScoreStore<MemoryStore>;

    fn record(score: u32, difficulty: Difficulty) -> BestScore {
        BestScore {
            score,
            moves: 10,
            time: 42,
            difficulty,
            date: "2026-10-16T12:00:00.000Z".to_string(),
        }
    }

    #[test]
    fn empty_store_has_no_scores() {
        let store = Store::new(MemoryStore::new());

        assert!(store.best_scores().is_empty());
        assert_eq!(store.best_score_for(Difficulty::Easy), None);
    }

    #[test]
    fn saved_score_is_best_for_its_difficulty() {
        let mut store = Store::new(MemoryStore::new());

        store.save_best_score(record(900, Difficulty::Easy)).unwrap();
        store.save_best_score(record(1050, Difficulty::Easy)).unwrap();
        store.save_best_score(record(2000, Difficulty::Hard)).unwrap();

        assert_eq!(store.best_score_for(Difficulty::Easy).unwrap().score, 1050);
        assert_eq!(store.best_score_for(Difficulty::Hard).unwrap().score, 2000);
        assert_eq!(store.best_score_for(Difficulty::Medium), None);
    }

    #[test]
    fn leaderboard_is_capped_and_sorted() {
        let mut store = Store::new(MemoryStore::new());

        for i in 0..25u32 {
            let difficulty = Difficulty::ALL[(i % 3) as usize];
            store.save_best_score(record((i * 37) % 101, difficulty)).unwrap();

            let scores = store.best_scores();
            assert!(scores.len() <= Store::CAPACITY);
            assert!(scores.windows(2).all(|w| w[0].score >= w[1].score));
        }
        assert_eq!(store.best_scores().len(), Store::CAPACITY);
    }

    #[test]
    fn low_score_falls_off_a_full_leaderboard() {
        let mut store = Store::new(MemoryStore::new());
        for score in 100..110 {
            store.save_best_score(record(score, Difficulty::Easy)).unwrap();
        }

        store.save_best_score(record(5, Difficulty::Medium)).unwrap();

        assert_eq!(store.best_score_for(Difficulty::Medium), None);
        assert_eq!(store.best_scores().last().unwrap().score, 100);
    }

    #[test]
    fn corrupt_data_reads_as_empty() {
        let backend = MemoryStore::new().with_entry(Store::KEY, "{not json");
        let store = Store::new(backend);

        assert!(store.best_scores().is_empty());
    }

    #[test]
    fn reads_records_in_the_stored_shape() {
        let stored = format!(
            "[{}]",
            r#"{"score":1050,"moves":8,"time":50,"difficulty":"easy","date":"2026-01-02T03:04:05.678Z"}"#
        );
        let store = Store::new(MemoryStore::new().with_entry("memoryGameBestScores", &stored));

        let best = store.best_score_for(Difficulty::Easy).unwrap();
        assert_eq!(best.score, 1050);
        assert_eq!(best.moves, 8);
        assert_eq!(best.time, 50);
        assert_eq!(best.date, "2026-01-02T03:04:05.678Z");
    }

    #[test]
    fn failed_write_keeps_previous_value() {
        let stored = r#"[{"score":10,"moves":8,"time":50,"difficulty":"easy","date":"x"}]"#;
        let mut backend = MemoryStore::failing_writes();
        backend.entries.insert(Store::KEY.to_string(), stored.to_string());
        let mut store = Store::new(backend);

        let err = store.save_best_score(record(500, Difficulty::Easy)).unwrap_err();

        assert!(matches!(err, StoreError::Write(_)));
        assert_eq!(store.best_score_for(Difficulty::Easy).unwrap().score, 10);
    }
}
