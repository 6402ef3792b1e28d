//! Per-feature-type spatial index.
//!
//! Each feature type gets its own bulk-loaded `rstar` R-tree over its
//! instances, built once from a [`PointSet`] and never mutated afterwards —
//! the mining engine only ever queries a fixed snapshot of the data.

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use crate::point_set::PointSet;
use crate::types::FeatureTypeId;

/// A single indexed instance: its local index within the owning type's
/// group, plus the coordinates `rstar` needs for envelope/distance queries.
#[derive(Clone, Copy, Debug, PartialEq)]
struct IndexedPoint {
    local_idx: u32,
    x: f64,
    y: f64,
}

impl RTreeObject for IndexedPoint {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.x, self.y])
    }
}

impl PointDistance for IndexedPoint {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        (self.x - point[0]).powi(2) + (self.y - point[1]).powi(2)
    }
}

/// One bulk-loaded R-tree per feature type present in the point set.
pub struct TypeIndex {
    trees: Vec<RTree<IndexedPoint>>,
}

impl TypeIndex {
    /// Builds an index over every type group in `point_set`.
    pub fn build(point_set: &PointSet) -> Self {
        let mut trees = Vec::new();
        for type_id in point_set.type_ids() {
            let group = point_set.group(type_id);
            let points: Vec<IndexedPoint> = (0..group.len() as u32)
                .map(|local_idx| IndexedPoint {
                    local_idx,
                    x: group.xs[local_idx as usize],
                    y: group.ys[local_idx as usize],
                })
                .collect();
            trees.push(RTree::bulk_load(points));
        }
        Self { trees }
    }

    /// Local indices of every instance of `type_id` within `radius` of
    /// `(x, y)`, inclusive, unsorted.
    pub fn query_within(&self, type_id: FeatureTypeId, x: f64, y: f64, radius: f64) -> Vec<u32> {
        let radius_sq = radius * radius;
        self.trees[type_id.index()]
            .locate_within_distance([x, y], radius_sq)
            .map(|p| p.local_idx)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point_set::RawPoint;

    fn build_set() -> PointSet {
        let points = vec![
            RawPoint::new(0, "A", 0.0, 0.0),
            RawPoint::new(1, "A", 10.0, 10.0),
            RawPoint::new(2, "B", 0.5, 0.5),
        ];
        PointSet::build(&points).unwrap()
    }

    #[test]
    fn finds_points_within_radius() {
        let point_set = build_set();
        let index = TypeIndex::build(&point_set);
        let b = point_set.type_table().id_of("B").unwrap();
        let hits = index.query_within(b, 0.0, 0.0, 1.0);
        assert_eq!(hits, vec![0]);
    }

    #[test]
    fn excludes_points_outside_radius() {
        let point_set = build_set();
        let index = TypeIndex::build(&point_set);
        let a = point_set.type_table().id_of("A").unwrap();
        let hits = index.query_within(a, 0.0, 0.0, 1.0);
        assert_eq!(hits, vec![0]);
    }
}
