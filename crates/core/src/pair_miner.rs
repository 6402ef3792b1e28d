//! Size-2 colocation pattern discovery.
//!
//! Pairs are mined directly from the precomputed [`NeighborGraph`] rather
//! than through the generic clique enumerator: a pair's instances and
//! participation ratios fall straight out of the neighbor lists, with no
//! intersection step needed.

use rustc_hash::FxHashSet;
use smallvec::smallvec;

use crate::clique::CliqueInstance;
use crate::neighbor_graph::NeighborGraph;
use crate::point_set::PointSet;
use crate::types::{FeatureTypeId, PatternKey};

/// A mined size-2 pattern, prior to translation into the public [`crate::types::Pattern`].
pub struct PairCandidate {
    pub key: PatternKey,
    pub participation_index: f64,
    pub instances: Vec<CliqueInstance>,
}

/// Mines every type pair, returning one [`PairCandidate`] per pair
/// regardless of whether it clears the prevalence threshold — callers
/// filter by `participation_index`.
pub fn discover_pairs(point_set: &PointSet, graph: &NeighborGraph) -> Vec<PairCandidate> {
    let type_ids: Vec<FeatureTypeId> = point_set.type_ids().collect();
    let mut results = Vec::new();

    for i in 0..type_ids.len() {
        for j in (i + 1)..type_ids.len() {
            let t1 = type_ids[i];
            let t2 = type_ids[j];

            let mut participants_t1: FxHashSet<u32> = FxHashSet::default();
            let mut participants_t2: FxHashSet<u32> = FxHashSet::default();
            let mut instances = Vec::new();

            let population_t1 = point_set.population(t1);
            for local1 in 0..population_t1 as u32 {
                let neighbors = graph.neighbors_of(t1, local1, t2);
                if neighbors.is_empty() {
                    continue;
                }
                participants_t1.insert(local1);
                for &local2 in neighbors {
                    participants_t2.insert(local2);
                    instances.push(smallvec![local1, local2]);
                }
            }

            let pop_t1 = point_set.population(t1) as f64;
            let pop_t2 = point_set.population(t2) as f64;
            let ratio1 = if pop_t1 > 0.0 { participants_t1.len() as f64 / pop_t1 } else { 0.0 };
            let ratio2 = if pop_t2 > 0.0 { participants_t2.len() as f64 / pop_t2 } else { 0.0 };
            let participation_index = ratio1.min(ratio2);

            results.push(PairCandidate {
                key: PatternKey::new(smallvec![t1, t2]),
                participation_index,
                instances,
            });
        }
    }

    results
}
