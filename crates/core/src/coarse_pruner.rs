//! Multi-resolution pruning: a coarse grid built once over the whole run,
//! queried before committing to expensive fine-level instance enumeration.
//!
//! Mirrors the fine-level neighbor graph at a lower resolution: instances
//! of each type are bucketed into `grid_size`-sided cells, and two cells
//! are coarse-neighbors if any pair of their fine instances are.

use rustc_hash::FxHashSet;

use crate::clique::{CliqueGraph, enumerate_cliques};
use crate::config::MiningConfig;
use crate::neighbor_graph::NeighborGraph;
use crate::point_set::PointSet;
use crate::types::{FeatureTypeId, PatternKey};

/// Coarse grid plus coarse-level adjacency, built once after the fine
/// [`NeighborGraph`] and reused across every Apriori level.
pub struct CoarseGraph {
    num_types: usize,
    /// `fine_to_coarse[type][local_idx]` = coarse cell index within that type.
    fine_to_coarse: Vec<Vec<u32>>,
    /// `coarse_members[type][cell]` = fine local indices grouped into that cell.
    coarse_members: Vec<Vec<Vec<u32>>>,
    /// `coarse_neighbors[source * num_types + target][cell]` = sorted target cells.
    coarse_neighbors: Vec<Vec<Vec<u32>>>,
}

impl CoarseGraph {
    fn slot(num_types: usize, source: FeatureTypeId, target: FeatureTypeId) -> usize {
        source.index() * num_types + target.index()
    }

    pub fn build(point_set: &PointSet, graph: &NeighborGraph, config: &MiningConfig) -> Self {
        let grid_size = config.grid_size();
        let type_ids: Vec<FeatureTypeId> = point_set.type_ids().collect();
        let num_types = type_ids.len();

        let mut fine_to_coarse: Vec<Vec<u32>> = Vec::with_capacity(num_types);
        let mut coarse_members: Vec<Vec<Vec<u32>>> = Vec::with_capacity(num_types);

        for &type_id in &type_ids {
            let group = point_set.group(type_id);
            let mut cell_index: rustc_hash::FxHashMap<(i64, i64), u32> = rustc_hash::FxHashMap::default();
            let mut mapping = Vec::with_capacity(group.len());
            let mut members: Vec<Vec<u32>> = Vec::new();

            for local_idx in 0..group.len() {
                let cell = (
                    (group.xs[local_idx] / grid_size).floor() as i64,
                    (group.ys[local_idx] / grid_size).floor() as i64,
                );
                let coarse_idx = *cell_index.entry(cell).or_insert_with(|| {
                    members.push(Vec::new());
                    (members.len() - 1) as u32
                });
                members[coarse_idx as usize].push(local_idx as u32);
                mapping.push(coarse_idx);
            }

            fine_to_coarse.push(mapping);
            coarse_members.push(members);
        }

        // Only distinct-type pairs are ever queried, mirroring the fine-level
        // graph; same-type coarse adjacency is never populated.
        let mut coarse_neighbors: Vec<Vec<Vec<u32>>> = vec![Vec::new(); num_types * num_types];
        for i in 0..type_ids.len() {
            for j in (i + 1)..type_ids.len() {
                for &(source, target) in &[(type_ids[i], type_ids[j]), (type_ids[j], type_ids[i])] {
                    let source_cell_count = coarse_members[source.index()].len();
                    let mut sets: Vec<FxHashSet<u32>> = vec![FxHashSet::default(); source_cell_count];
                    let source_population = point_set.population(source);

                    for local_idx in 0..source_population as u32 {
                        let source_cell = fine_to_coarse[source.index()][local_idx as usize];
                        for &fine_neighbor in graph.neighbors_of(source, local_idx, target) {
                            let target_cell = fine_to_coarse[target.index()][fine_neighbor as usize];
                            sets[source_cell as usize].insert(target_cell);
                        }
                    }

                    let lists: Vec<Vec<u32>> = sets
                        .into_iter()
                        .map(|s| {
                            let mut v: Vec<u32> = s.into_iter().collect();
                            v.sort_unstable();
                            v
                        })
                        .collect();
                    coarse_neighbors[Self::slot(num_types, source, target)] = lists;
                }
            }
        }

        Self {
            num_types,
            fine_to_coarse,
            coarse_members,
            coarse_neighbors,
        }
    }

    /// Participation index of `type_ids` at coarse resolution: the minimum,
    /// over each type, of the fraction of its *fine* instances that fall
    /// inside some coarse pattern instance.
    pub fn coarse_participation_index(
        &self,
        point_set: &PointSet,
        type_ids: &[FeatureTypeId],
        coarse_instances: &[crate::clique::CliqueInstance],
    ) -> f64 {
        if coarse_instances.is_empty() {
            return 0.0;
        }

        let mut pi = f64::INFINITY;
        for (column, &type_id) in type_ids.iter().enumerate() {
            let mut participants: FxHashSet<u32> = FxHashSet::default();
            for instance in coarse_instances {
                let cell = instance[column];
                for &fine_idx in &self.coarse_members[type_id.index()][cell as usize] {
                    participants.insert(fine_idx);
                }
            }
            let population = point_set.population(type_id) as f64;
            let ratio = if population > 0.0 { participants.len() as f64 / population } else { 0.0 };
            pi = pi.min(ratio);
        }
        pi
    }
}

impl CliqueGraph for CoarseGraph {
    fn population(&self, type_idx: usize) -> u32 {
        self.coarse_members[type_idx].len() as u32
    }

    fn neighbors(&self, member_type_idx: usize, instance: u32, target_type_idx: usize) -> &[u32] {
        &self.coarse_neighbors[member_type_idx * self.num_types + target_type_idx][instance as usize]
    }
}

/// Keeps only the candidates whose coarse-level participation index still
/// clears `min_prevalence` — a cheap filter before fine-level enumeration.
pub fn prune_candidates(
    candidates: &[PatternKey],
    point_set: &PointSet,
    coarse_graph: &CoarseGraph,
    config: &MiningConfig,
) -> Vec<PatternKey> {
    candidates
        .iter()
        .filter(|candidate| {
            let type_idxs: Vec<usize> = candidate.types().iter().map(|t| t.index()).collect();
            let coarse_instances =
                match enumerate_cliques(coarse_graph, &type_idxs, config.max_instances_per_pattern()) {
                    Ok(instances) => instances,
                    Err(_) => return true, // defer the decision to fine-level enumeration
                };
            let pi = coarse_graph.coarse_participation_index(point_set, candidate.types(), &coarse_instances);
            pi >= config.min_prevalence()
        })
        .cloned()
        .collect()
}
