// src/core/storage/zset.rs

//! A sorted set keeping two coordinated indexes: a hash index from member to
//! score for O(1)-expected lookups, and an ordered index over `(score,
//! member)` pairs for range queries. Both indexes refer to the same owned
//! member bytes via `Bytes::clone()`, which bumps a refcount rather than
//! copying.

use bytes::Bytes;
use std::collections::{BTreeSet, HashMap};

/// An entry in the ordered index. Ordering is by score first, then by the
/// unsigned byte value of the member — this is the sole ordering rule for
/// the set and must stay consistent with the hash index.
#[derive(Debug, Clone)]
struct ZSetEntry {
    score: f64,
    member: Bytes,
}

impl PartialEq for ZSetEntry {
    fn eq(&self, other: &Self) -> bool {
        self.score.to_bits() == other.score.to_bits() && self.member == other.member
    }
}
impl Eq for ZSetEntry {}

impl PartialOrd for ZSetEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for ZSetEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.score
            .partial_cmp(&other.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| self.member.cmp(&other.member))
    }
}

/// A sentinel member used as the upper bound of a score range probe. It is
/// chosen longer and lexicographically greater than any member this store
/// will realistically see; see `count`.
fn max_member_sentinel() -> Bytes {
    Bytes::from_static(&[0xFFu8; 256])
}

#[derive(Debug, Clone, Default)]
pub struct SortedSet {
    by_member: HashMap<Bytes, f64>,
    by_score: BTreeSet<ZSetEntry>,
}

impl SortedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(&self) -> usize {
        self.by_member.len()
    }

    pub fn contains(&self, member: &Bytes) -> bool {
        self.by_member.contains_key(member)
    }

    /// True only if `member` is present and its stored score equals `score`
    /// bit-for-bit. `NaN` never equals anything, matching IEEE-754 semantics.
    pub fn contains_member_score(&self, member: &Bytes, score: f64) -> bool {
        matches!(self.by_member.get(member), Some(s) if *s == score)
    }

    /// Returns the stored score, or `0.0` if the member is absent. Callers
    /// that need to distinguish "absent" from "stored zero" must pair this
    /// with `contains`.
    pub fn get_score(&self, member: &Bytes) -> f64 {
        self.by_member.get(member).copied().unwrap_or(0.0)
    }

    /// Upserts `member` with `score`. Returns `(created, changed)`: `created`
    /// is true if the member was not previously present; `changed` is true
    /// if the call altered the stored score (which is always true when
    /// `created` is true).
    pub fn add(&mut self, score: f64, member: Bytes) -> (bool, bool) {
        match self.by_member.get(&member).copied() {
            Some(old_score) => {
                if old_score.to_bits() == score.to_bits() {
                    return (false, false);
                }
                self.by_score.remove(&ZSetEntry {
                    score: old_score,
                    member: member.clone(),
                });
                self.by_score.insert(ZSetEntry {
                    score,
                    member: member.clone(),
                });
                self.by_member.insert(member, score);
                (false, true)
            }
            None => {
                self.by_score.insert(ZSetEntry {
                    score,
                    member: member.clone(),
                });
                self.by_member.insert(member, score);
                (true, true)
            }
        }
    }

    /// Computes `(current or 0) + delta`, stores it, and returns the new score.
    pub fn increment_score(&mut self, member: &Bytes, delta: f64) -> f64 {
        let new_score = self.get_score(member) + delta;
        self.add(new_score, member.clone());
        new_score
    }

    /// Number of members with `min <= score <= max`, via two ordered-index
    /// boundary probes rather than a linear scan.
    pub fn count(&self, min: f64, max: f64) -> usize {
        let lower = ZSetEntry {
            score: min,
            member: Bytes::new(),
        };
        let upper = ZSetEntry {
            score: max,
            member: max_member_sentinel(),
        };
        self.by_score.range(lower..=upper).count()
    }

    /// Returns `(member, score)` pairs for the half-open positional range
    /// `[start, end)` in ascending `(score, member)` order. Callers are
    /// expected to have already clamped `start`/`end` to `[0, size()]`.
    pub fn element_range(&self, start: usize, end: usize) -> Vec<(Bytes, f64)> {
        if start >= end {
            return Vec::new();
        }
        self.by_score
            .iter()
            .skip(start)
            .take(end - start)
            .map(|e| (e.member.clone(), e.score))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn b(s: &str) -> Bytes {
        Bytes::from(s.to_string())
    }

    #[test]
    fn add_new_member_is_created_and_changed() {
        let mut z = SortedSet::new();
        let (created, changed) = z.add(1.0, b("a"));
        assert!(created && changed);
        assert_eq!(z.size(), 1);
    }

    #[test]
    fn add_same_score_is_unchanged() {
        let mut z = SortedSet::new();
        z.add(1.0, b("a"));
        let (created, changed) = z.add(1.0, b("a"));
        assert!(!created && !changed);
        assert_eq!(z.size(), 1);
    }

    #[test]
    fn add_new_score_updates_without_duplicating_member() {
        let mut z = SortedSet::new();
        z.add(1.0, b("a"));
        let (created, changed) = z.add(2.0, b("a"));
        assert!(!created && changed);
        assert_eq!(z.size(), 1);
        assert_eq!(z.get_score(&b("a")), 2.0);
    }

    #[test]
    fn get_score_defaults_to_zero_for_absent_member() {
        let z = SortedSet::new();
        assert_eq!(z.get_score(&b("missing")), 0.0);
        assert!(!z.contains(&b("missing")));
    }

    #[test]
    fn contains_member_score_requires_exact_match() {
        let mut z = SortedSet::new();
        z.add(1.5, b("a"));
        assert!(z.contains_member_score(&b("a"), 1.5));
        assert!(!z.contains_member_score(&b("a"), 1.6));
    }

    #[test]
    fn element_range_is_sorted_by_score_then_member() {
        let mut z = SortedSet::new();
        z.add(2.0, b("b"));
        z.add(1.0, b("a"));
        z.add(1.0, b("z"));
        let all = z.element_range(0, z.size());
        assert_eq!(all, vec![(b("a"), 1.0), (b("z"), 1.0), (b("b"), 2.0)]);
    }

    #[test]
    fn count_is_inclusive_of_both_bounds() {
        let mut z = SortedSet::new();
        z.add(1.0, b("a"));
        z.add(2.0, b("b"));
        z.add(3.0, b("c"));
        assert_eq!(z.count(1.0, 2.0), 2);
        assert_eq!(z.count(1.0, 3.0), 3);
        assert_eq!(z.count(4.0, 5.0), 0);
    }

    #[test]
    fn increment_score_creates_member_from_zero() {
        let mut z = SortedSet::new();
        let new_score = z.increment_score(&b("a"), 5.0);
        assert_eq!(new_score, 5.0);
        assert!(z.contains(&b("a")));
    }
}
