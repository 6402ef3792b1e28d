//! Fine-level clique instance enumeration for patterns of size 3 and up.

use crate::clique::{CliqueGraph, CliqueInstance, enumerate_cliques};
use crate::config::MiningConfig;
use crate::error::Result;
use crate::neighbor_graph::NeighborGraph;
use crate::point_set::PointSet;
use crate::types::{FeatureTypeId, PatternKey};

struct FineView<'a> {
    point_set: &'a PointSet,
    graph: &'a NeighborGraph,
}

impl CliqueGraph for FineView<'_> {
    fn population(&self, type_idx: usize) -> u32 {
        self.point_set.population(FeatureTypeId(type_idx as u32)) as u32
    }

    fn neighbors(&self, member_type_idx: usize, instance: u32, target_type_idx: usize) -> &[u32] {
        self.graph.neighbors_of(
            FeatureTypeId(member_type_idx as u32),
            instance,
            FeatureTypeId(target_type_idx as u32),
        )
    }
}

/// Finds every fine-level instance of `candidate`, capped at
/// `config.max_instances_per_pattern()`.
pub fn find_pattern_instances(
    point_set: &PointSet,
    graph: &NeighborGraph,
    candidate: &PatternKey,
    config: &MiningConfig,
) -> Result<Vec<CliqueInstance>> {
    let view = FineView { point_set, graph };
    let type_idxs: Vec<usize> = candidate.types().iter().map(|t| t.index()).collect();
    enumerate_cliques(&view, &type_idxs, config.max_instances_per_pattern())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point_set::RawPoint;
    use crate::type_index::TypeIndex;
    use smallvec::smallvec;

    #[test]
    fn finds_a_three_way_colocation() {
        let points = vec![
            RawPoint::new(0, "A", 0.0, 0.0),
            RawPoint::new(1, "B", 0.1, 0.1),
            RawPoint::new(2, "C", 0.2, 0.2),
        ];
        let point_set = PointSet::build(&points).unwrap();
        let index = TypeIndex::build(&point_set);
        let config = MiningConfig::builder().radius(1.0).min_prevalence(0.1).build().unwrap();
        let graph = NeighborGraph::build(&point_set, &index, &config).unwrap();

        let a = point_set.type_table().id_of("A").unwrap();
        let b = point_set.type_table().id_of("B").unwrap();
        let c = point_set.type_table().id_of("C").unwrap();
        let candidate = PatternKey::new(smallvec![a, b, c]);

        let instances = find_pattern_instances(&point_set, &graph, &candidate, &config).unwrap();
        assert_eq!(instances.len(), 1);
        assert_eq!(instances[0].as_slice(), &[0, 0, 0]);
    }
}
