//! Fixed-size transposition table keyed by Zobrist hash.
//!
//! Direct-mapped: one entry per slot at `hash % slots`, no chaining. An
//! entry is replaced only by a value of equal or higher quality (search depth
//! behind it), and entries that go untouched for more than `MAX_AGE` turns
//! are evicted by `age`.

use crate::game_state::chess_types::GameState;
use crate::search::zobrist::ZHash;

pub const CACHE_SLOTS: usize = 1 << 19;

/// Turns an entry may go untouched before `age` evicts it.
pub const MAX_AGE: u8 = 1;

/// A stored value and the search depth behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachedValue {
    pub value: i32,
    pub quality: u8,
}

#[derive(Debug, Clone, Copy)]
struct CacheEntry {
    hash: ZHash,
    value: i32,
    quality: u8,
    age: u8,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub probes: u64,
    pub hits: u64,
    /// Probes that found the slot taken by a different position.
    pub collisions: u64,
    pub stores: u64,
    /// Updates refused because the slot held a higher-quality value.
    pub rejected: u64,
    pub evictions: u64,
}

#[derive(Debug, Clone)]
pub struct TranspositionTable {
    entries: Vec<Option<CacheEntry>>,
    stats: CacheStats,
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::new()
    }
}

impl TranspositionTable {
    pub fn new() -> Self {
        Self::with_slots(CACHE_SLOTS)
    }

    /// # Panics
    /// If `slots` is zero.
    pub fn with_slots(slots: usize) -> Self {
        assert!(slots > 0, "transposition table needs at least one slot");
        Self {
            entries: vec![None; slots],
            stats: CacheStats::default(),
        }
    }

    #[inline]
    pub fn clear(&mut self) {
        self.entries.fill(None);
        self.stats = CacheStats::default();
    }

    /// Number of slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.occupied() == 0
    }

    pub fn occupied(&self) -> usize {
        self.entries.iter().filter(|slot| slot.is_some()).count()
    }

    #[inline]
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    #[inline]
    fn idx(&self, hash: ZHash) -> usize {
        (hash.value() % self.entries.len() as u64) as usize
    }

    #[inline]
    pub fn check(&mut self, state: &GameState) -> Option<CachedValue> {
        self.check_hash(state.zhash())
    }

    /// Look up `hash`; a hit marks the entry as recently used.
    pub fn check_hash(&mut self, hash: ZHash) -> Option<CachedValue> {
        self.stats.probes += 1;
        let idx = self.idx(hash);
        match &mut self.entries[idx] {
            Some(entry) if entry.hash == hash => {
                self.stats.hits += 1;
                entry.age = 0;
                Some(CachedValue {
                    value: entry.value,
                    quality: entry.quality,
                })
            }
            Some(_) => {
                self.stats.collisions += 1;
                None
            }
            None => None,
        }
    }

    #[inline]
    pub fn update(&mut self, state: &GameState, value: i32, quality: u8) -> bool {
        self.update_hash(state.zhash(), value, quality)
    }

    /// Store `value` unless the slot holds something of higher quality.
    /// Returns whether the value was stored.
    pub fn update_hash(&mut self, hash: ZHash, value: i32, quality: u8) -> bool {
        let idx = self.idx(hash);
        let slot = &mut self.entries[idx];
        if slot.is_some_and(|existing| quality < existing.quality) {
            self.stats.rejected += 1;
            return false;
        }
        *slot = Some(CacheEntry {
            hash,
            value,
            quality,
            age: 0,
        });
        self.stats.stores += 1;
        true
    }

    /// Called once per completed top-level search. Returns how many entries
    /// were evicted.
    pub fn age(&mut self) -> usize {
        let mut evicted = 0;
        for slot in &mut self.entries {
            let expired = match slot {
                Some(entry) => {
                    entry.age = entry.age.saturating_add(1);
                    entry.age > MAX_AGE
                }
                None => false,
            };
            if expired {
                *slot = None;
                evicted += 1;
            }
        }
        self.stats.evictions += evicted as u64;
        tracing::trace!(evicted, occupied = self.occupied(), "aged transposition table");
        evicted
    }
}

#[cfg(test)]
mod tests {
    use super::{CachedValue, TranspositionTable, MAX_AGE};
    use crate::game_state::chess_types::GameState;
    use crate::search::zobrist::ZHash;

    #[test]
    fn lower_quality_never_replaces_higher() {
        let mut tt = TranspositionTable::with_slots(64);
        let hash = ZHash::from_raw(555);
        assert!(tt.update_hash(hash, 10, 5));
        assert!(!tt.update_hash(hash, 20, 3));
        assert_eq!(tt.check_hash(hash), Some(CachedValue { value: 10, quality: 5 }));
        assert!(tt.update_hash(hash, 30, 7));
        assert_eq!(tt.check_hash(hash), Some(CachedValue { value: 30, quality: 7 }));
        assert!(tt.update_hash(hash, 40, 7));
        assert_eq!(tt.stats().rejected, 1);
    }

    #[test]
    fn empty_slot_accepts_any_quality() {
        let mut tt = TranspositionTable::with_slots(64);
        assert!(tt.update_hash(ZHash::from_raw(1), -7, 0));
        assert_eq!(
            tt.check_hash(ZHash::from_raw(1)),
            Some(CachedValue { value: -7, quality: 0 })
        );
    }

    #[test]
    fn colliding_positions_share_a_slot() {
        let mut tt = TranspositionTable::with_slots(64);
        let first = ZHash::from_raw(3);
        let second = ZHash::from_raw(3 + 64);
        assert!(tt.update_hash(first, 1, 4));
        assert_eq!(tt.check_hash(second), None);
        assert_eq!(tt.stats().collisions, 1);
        assert!(!tt.update_hash(second, 2, 1));
        assert!(tt.update_hash(second, 2, 4));
        assert_eq!(tt.check_hash(first), None);
    }

    #[test]
    fn untouched_entries_age_out() {
        let mut tt = TranspositionTable::with_slots(64);
        let kept = ZHash::from_raw(10);
        let dropped = ZHash::from_raw(11);
        tt.update_hash(kept, 1, 1);
        tt.update_hash(dropped, 2, 1);

        for _ in 0..=MAX_AGE {
            assert!(tt.check_hash(kept).is_some());
            tt.age();
        }
        assert!(tt.check_hash(kept).is_some());
        assert_eq!(tt.check_hash(dropped), None);
        assert_eq!(tt.stats().evictions, 1);
    }

    #[test]
    fn sentinel_hash_is_an_ordinary_key() {
        let mut tt = TranspositionTable::with_slots(64);
        assert_eq!(tt.check_hash(ZHash::UNDEFINED), None);
        assert!(tt.update_hash(ZHash::UNDEFINED, 99, 2));
        assert_eq!(
            tt.check_hash(ZHash::UNDEFINED),
            Some(CachedValue { value: 99, quality: 2 })
        );
    }

    #[test]
    fn positions_are_keyed_by_their_hash() {
        let mut tt = TranspositionTable::new();
        let state = GameState::new_game();
        tt.update(&state, 12, 3);
        assert_eq!(tt.check(&state), Some(CachedValue { value: 12, quality: 3 }));
        assert_eq!(tt.check_hash(state.zhash()), tt.check(&state));
    }
}
