//! Apriori-style candidate generation.
//!
//! Joins frequent patterns of size `k-1` into candidates of size `k`,
//! then discards any candidate with a `(k-1)`-subset that wasn't itself
//! frequent — the anti-monotonicity closure check.

use rustc_hash::FxHashSet;

use crate::types::{PatternKey, TypeVec};

/// Generates size-`k` candidates from the accepted size-`(k-1)` patterns.
pub fn generate_candidates(prev_level: &[PatternKey], k: usize) -> Vec<PatternKey> {
    if prev_level.len() < 2 {
        return Vec::new();
    }

    let prev_set: FxHashSet<PatternKey> = prev_level.iter().cloned().collect();
    let mut candidates: FxHashSet<PatternKey> = FxHashSet::default();

    for i in 0..prev_level.len() {
        for j in (i + 1)..prev_level.len() {
            let p1 = &prev_level[i];
            let p2 = &prev_level[j];
            let prefix_len = p1.len() - 1;
            if p1.types()[..prefix_len] != p2.types()[..prefix_len] {
                continue;
            }

            let mut union: TypeVec = p1.types().iter().chain(p2.types().iter()).copied().collect();
            union.sort_unstable();
            union.dedup();
            if union.len() != k {
                continue;
            }

            let candidate = PatternKey::new(union);
            let closure_holds = candidate
                .subsets_of_size(k - 1)
                .all(|subset| prev_set.contains(&subset));
            if closure_holds {
                candidates.insert(candidate);
            }
        }
    }

    candidates.into_iter().collect()
}
