//! Participation ratio and participation index computation.

use rustc_hash::FxHashSet;

use crate::clique::CliqueInstance;
use crate::point_set::PointSet;
use crate::types::FeatureTypeId;

/// Per-type participation ratios for one candidate pattern, plus the
/// pattern's participation index (the minimum ratio).
///
/// Kept around for diagnostics even though only `participation_index`
/// feeds the admission decision.
#[derive(Debug, Clone)]
pub struct ParticipationRatios {
    pub ratios: Vec<(FeatureTypeId, f64)>,
    pub participation_index: f64,
}

/// Computes participation ratios for `pattern_types` from its witnessing
/// `instances`, column-aligned to `pattern_types`.
pub fn evaluate(
    point_set: &PointSet,
    pattern_types: &[FeatureTypeId],
    instances: &[CliqueInstance],
) -> ParticipationRatios {
    if instances.is_empty() {
        return ParticipationRatios {
            ratios: pattern_types.iter().map(|&t| (t, 0.0)).collect(),
            participation_index: 0.0,
        };
    }

    let mut ratios = Vec::with_capacity(pattern_types.len());
    let mut participation_index = f64::INFINITY;

    for (column, &type_id) in pattern_types.iter().enumerate() {
        let mut participants: FxHashSet<u32> = FxHashSet::default();
        for instance in instances {
            participants.insert(instance[column]);
        }
        let population = point_set.population(type_id) as f64;
        let ratio = if population > 0.0 { participants.len() as f64 / population } else { 0.0 };
        ratios.push((type_id, ratio));
        participation_index = participation_index.min(ratio);
    }

    ParticipationRatios { ratios, participation_index }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point_set::RawPoint;
    use smallvec::smallvec;

    #[test]
    fn participation_index_is_the_minimum_ratio() {
        let points = vec![
            RawPoint::new(0, "A", 0.0, 0.0),
            RawPoint::new(1, "A", 1.0, 1.0),
            RawPoint::new(2, "B", 0.0, 0.0),
        ];
        let point_set = PointSet::build(&points).unwrap();
        let a = point_set.type_table().id_of("A").unwrap();
        let b = point_set.type_table().id_of("B").unwrap();

        // Only one of A's two instances participates; B's only instance does.
        let instances = vec![smallvec![0u32, 0u32]];
        let result = evaluate(&point_set, &[a, b], &instances);
        assert_eq!(result.participation_index, 0.5);
    }

    #[test]
    fn empty_instances_yield_zero_participation() {
        let points = vec![RawPoint::new(0, "A", 0.0, 0.0), RawPoint::new(1, "B", 0.0, 0.0)];
        let point_set = PointSet::build(&points).unwrap();
        let a = point_set.type_table().id_of("A").unwrap();
        let b = point_set.type_table().id_of("B").unwrap();
        let result = evaluate(&point_set, &[a, b], &[]);
        assert_eq!(result.participation_index, 0.0);
    }
}
