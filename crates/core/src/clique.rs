//! Generic clique-style instance enumeration.
//!
//! Shared by the fine-grained [`crate::neighbor_graph::NeighborGraph`] and
//! the coarse grid built by [`crate::coarse_pruner`]: both answer "what are
//! the neighbors of this instance of this type in that type", so both can
//! drive the same incremental extend-by-intersection search.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::error::{MiningError, Result};

/// One witnessing tuple, positionally aligned to the type sequence passed
/// to [`enumerate_cliques`].
pub type CliqueInstance = SmallVec<[u32; 4]>;

/// Neighbor lookups needed to grow clique instances one type at a time.
pub trait CliqueGraph {
    /// Number of instances of `type_idx`.
    fn population(&self, type_idx: usize) -> u32;

    /// Neighbors of type `target_type_idx` for instance `instance` of type
    /// `member_type_idx`.
    fn neighbors(&self, member_type_idx: usize, instance: u32, target_type_idx: usize) -> &[u32];
}

/// Enumerates every instance of the pattern formed by `type_idxs`, in the
/// given order.
///
/// Starts from every instance of the first type, then at each step keeps
/// only the extensions that neighbor every member added so far — the same
/// strategy at any resolution, fine or coarse.
pub fn enumerate_cliques<G: CliqueGraph>(
    graph: &G,
    type_idxs: &[usize],
    max_instances: usize,
) -> Result<Vec<CliqueInstance>> {
    if type_idxs.is_empty() {
        return Ok(Vec::new());
    }

    let first_type = type_idxs[0];
    let mut current: Vec<CliqueInstance> = (0..graph.population(first_type))
        .map(|id| CliqueInstance::from_slice(&[id]))
        .collect();

    for &target_type in &type_idxs[1..] {
        if current.is_empty() {
            return Ok(Vec::new());
        }

        let mut next: Vec<CliqueInstance> = Vec::new();
        for instance in &current {
            let Some(candidates) = common_neighbors(graph, type_idxs, instance, target_type) else {
                continue;
            };
            for candidate in candidates {
                let mut extended = instance.clone();
                extended.push(candidate);
                next.push(extended);
            }
        }

        if next.len() > max_instances {
            return Err(MiningError::resource_exhausted(type_idxs, max_instances));
        }
        current = next;
    }

    Ok(current)
}

/// Instances of `target_type` that neighbor every member of `instance`, or
/// `None` if any member has no neighbors of that type.
fn common_neighbors<G: CliqueGraph>(
    graph: &G,
    type_idxs: &[usize],
    instance: &CliqueInstance,
    target_type: usize,
) -> Option<FxHashSet<u32>> {
    let mut candidates: Option<FxHashSet<u32>> = None;

    for (member_idx, &member_instance) in instance.iter().enumerate() {
        let member_type = type_idxs[member_idx];
        let member_neighbors = graph.neighbors(member_type, member_instance, target_type);
        candidates = Some(match candidates {
            None => member_neighbors.iter().copied().collect(),
            Some(existing) => {
                let member_set: FxHashSet<u32> = member_neighbors.iter().copied().collect();
                existing.intersection(&member_set).copied().collect()
            }
        });
        if candidates.as_ref().is_some_and(FxHashSet::is_empty) {
            return None;
        }
    }

    candidates.filter(|c| !c.is_empty())
}
