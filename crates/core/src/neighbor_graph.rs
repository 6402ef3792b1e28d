//! Precomputed neighbor relationships between typed instances.
//!
//! For every unordered pair of distinct feature types `{s, t}`, a single
//! range query per `s`-instance against `t`'s index yields the `s → t`
//! adjacency; the `t → s` adjacency is derived from it directly, so both
//! directions of an edge are always retrievable and no same-type edge is
//! ever recorded. Built once up front so later levels never touch
//! [`crate::type_index::TypeIndex`] again.

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, trace};

use crate::config::MiningConfig;
use crate::error::Result;
use crate::point_set::PointSet;
use crate::type_index::TypeIndex;
use crate::types::FeatureTypeId;

fn default_thread_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Adjacency lists keyed by `(source_type, target_type)`, each a
/// `Vec<Vec<u32>>` indexed by source local index, holding sorted, deduped
/// target local indices within radius.
pub struct NeighborGraph {
    num_types: usize,
    adjacency: Vec<Option<Vec<Vec<u32>>>>,
}

impl NeighborGraph {
    fn slot(num_types: usize, source: FeatureTypeId, target: FeatureTypeId) -> usize {
        source.index() * num_types + target.index()
    }

    /// Builds the full neighbor graph over every unordered pair of distinct
    /// types, in parallel, using a dedicated thread pool sized like the
    /// rest of the pipeline.
    ///
    /// Same-type pairs are never queried: the mining relation only ever
    /// connects instances of differing types.
    pub fn build(point_set: &PointSet, index: &TypeIndex, config: &MiningConfig) -> Result<Self> {
        let num_types = point_set.type_table().len();
        let type_ids: Vec<FeatureTypeId> = point_set.type_ids().collect();

        let mut pairs: Vec<(FeatureTypeId, FeatureTypeId)> = Vec::new();
        for i in 0..type_ids.len() {
            for j in (i + 1)..type_ids.len() {
                pairs.push((type_ids[i], type_ids[j]));
            }
        }

        let thread_count = default_thread_count();
        let pool: ThreadPool = ThreadPoolBuilder::new()
            .num_threads(thread_count)
            .build()
            .expect("failed to build neighbor-graph thread pool");

        debug!(num_types, pairs = pairs.len(), threads = thread_count, "building neighbor graph");

        let results: Vec<((FeatureTypeId, FeatureTypeId), Vec<Vec<u32>>, Vec<Vec<u32>>)> = pool.install(|| {
            pairs
                .into_par_iter()
                .map(|(source, target)| {
                    config.check_cancelled()?;
                    let source_group = point_set.group(source);
                    let target_population = point_set.group(target).len();

                    let mut source_to_target: Vec<Vec<u32>> = Vec::with_capacity(source_group.len());
                    let mut target_to_source: Vec<Vec<u32>> = vec![Vec::new(); target_population];

                    for local_idx in 0..source_group.len() {
                        let x = source_group.xs[local_idx];
                        let y = source_group.ys[local_idx];
                        let mut neighbors = index.query_within(target, x, y, config.radius());
                        neighbors.sort_unstable();
                        neighbors.dedup();
                        for &neighbor in &neighbors {
                            target_to_source[neighbor as usize].push(local_idx as u32);
                        }
                        source_to_target.push(neighbors);
                    }
                    for list in &mut target_to_source {
                        list.sort_unstable();
                        list.dedup();
                    }

                    trace!(?source, ?target, "symmetric neighbor lists computed");
                    Ok(((source, target), source_to_target, target_to_source))
                })
                .collect::<Result<Vec<_>>>()
        })?;

        let mut adjacency: Vec<Option<Vec<Vec<u32>>>> = (0..num_types * num_types).map(|_| None).collect();
        for ((source, target), source_to_target, target_to_source) in results {
            adjacency[Self::slot(num_types, source, target)] = Some(source_to_target);
            adjacency[Self::slot(num_types, target, source)] = Some(target_to_source);
        }

        Ok(Self { num_types, adjacency })
    }

    /// Sorted, deduped local indices of `target`-typed instances within
    /// radius of the given `source` instance.
    pub fn neighbors_of(
        &self,
        source: FeatureTypeId,
        source_local_idx: u32,
        target: FeatureTypeId,
    ) -> &[u32] {
        self.adjacency[Self::slot(self.num_types, source, target)]
            .as_ref()
            .map(|lists| lists[source_local_idx as usize].as_slice())
            .unwrap_or(&[])
    }

    /// True if any instance of `a` has a `b`-neighbor, i.e. the pair's
    /// neighbor relation is non-empty.
    pub fn has_any_neighbor(&self, a: FeatureTypeId, b: FeatureTypeId) -> bool {
        self.adjacency[Self::slot(self.num_types, a, b)]
            .as_ref()
            .is_some_and(|lists| lists.iter().any(|l| !l.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point_set::RawPoint;

    fn sample() -> (PointSet, TypeIndex, MiningConfig) {
        let points = vec![
            RawPoint::new(0, "A", 0.0, 0.0),
            RawPoint::new(1, "B", 0.5, 0.5),
            RawPoint::new(2, "B", 20.0, 20.0),
        ];
        let point_set = PointSet::build(&points).unwrap();
        let index = TypeIndex::build(&point_set);
        let config = MiningConfig::builder().radius(1.0).min_prevalence(0.5).build().unwrap();
        (point_set, index, config)
    }

    #[test]
    fn finds_cross_type_neighbors_within_radius() {
        let (point_set, index, config) = sample();
        let graph = NeighborGraph::build(&point_set, &index, &config).unwrap();
        let a = point_set.type_table().id_of("A").unwrap();
        let b = point_set.type_table().id_of("B").unwrap();
        assert_eq!(graph.neighbors_of(a, 0, b), &[0]);
        assert!(graph.has_any_neighbor(a, b));
    }

    #[test]
    fn neighbor_edges_are_retrievable_from_both_directions() {
        let (point_set, index, config) = sample();
        let graph = NeighborGraph::build(&point_set, &index, &config).unwrap();
        let a = point_set.type_table().id_of("A").unwrap();
        let b = point_set.type_table().id_of("B").unwrap();
        assert_eq!(graph.neighbors_of(a, 0, b), &[0]);
        assert_eq!(graph.neighbors_of(b, 0, a), &[0]);
    }

    #[test]
    fn same_type_pairs_are_never_computed() {
        let (point_set, index, config) = sample();
        let graph = NeighborGraph::build(&point_set, &index, &config).unwrap();
        let b = point_set.type_table().id_of("B").unwrap();
        assert!(graph.neighbors_of(b, 0, b).is_empty());
        assert!(!graph.has_any_neighbor(b, b));
    }
}
