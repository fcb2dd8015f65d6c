//! Best level reached, kept in a key-value store

use crate::consts::HIGH_SCORE_KEY;
use crate::persistence::KeyValueStore;

/// High score accessors over any [`KeyValueStore`]
pub struct HighScore;

impl HighScore {
    /// Current high score (0 when never set)
    pub fn get<S: KeyValueStore + ?Sized>(store: &S) -> u32 {
        store.get_int(HIGH_SCORE_KEY, 0).clamp(0, u32::MAX as i64) as u32
    }

    /// Raise the high score to `level` if it beats the stored value.
    ///
    /// Returns the new high score when it changed.
    pub fn record<S: KeyValueStore + ?Sized>(store: &mut S, level: u32) -> Option<u32> {
        if level > Self::get(store) {
            store.put_int(HIGH_SCORE_KEY, level as i64);
            log::info!("New high score: {}", level);
            Some(level)
        } else {
            None
        }
    }

    /// Reset the high score to 0
    pub fn clear<S: KeyValueStore + ?Sized>(store: &mut S) {
        store.put_int(HIGH_SCORE_KEY, 0);
        log::info!("High score cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_record_only_raises() {
        let mut store = MemoryStore::new();
        assert_eq!(HighScore::get(&store), 0);

        assert_eq!(HighScore::record(&mut store, 3), Some(3));
        assert_eq!(HighScore::record(&mut store, 2), None);
        assert_eq!(HighScore::record(&mut store, 3), None);
        assert_eq!(HighScore::get(&store), 3);
    }

    #[test]
    fn test_clear() {
        let mut store = MemoryStore::new();
        HighScore::record(&mut store, 8);
        HighScore::clear(&mut store);
        assert_eq!(HighScore::get(&store), 0);
        assert_eq!(HighScore::record(&mut store, 1), Some(1));
    }

    #[test]
    fn test_negative_stored_value_reads_as_zero() {
        let mut store = MemoryStore::new();
        store.put_int(HIGH_SCORE_KEY, -5);
        assert_eq!(HighScore::get(&store), 0);
    }
}
