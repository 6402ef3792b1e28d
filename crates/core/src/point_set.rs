//! Ingestion and validation of the immutable input point set.
//!
//! Mirrors the dataset-loader contract: callers hand in `(id, type, x, y)`
//! rows with dense, zero-based, unique ids; [`PointSet::build`] re-groups
//! them by type into contiguous blocks (the layout [`crate::type_index::TypeIndex`]
//! builds its per-type trees over).

use rustc_hash::FxHashSet;

use crate::error::{MiningError, Result};
use crate::types::{FeatureTypeId, TypeTable};

/// A single input row, as produced by a [`crate::loaders::PointSource`].
#[derive(Clone, Debug, PartialEq)]
pub struct RawPoint {
    pub id: u64,
    pub feature_type: String,
    pub x: f64,
    pub y: f64,
}

impl RawPoint {
    pub fn new(id: u64, feature_type: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id,
            feature_type: feature_type.into(),
            x,
            y,
        }
    }
}

/// One feature type's instances, stored contiguously: `ids[i]`, `xs[i]`,
/// `ys[i]` together describe the instance at local index `i`.
#[derive(Debug, Default, Clone)]
pub struct TypeGroup {
    pub ids: Vec<u64>,
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
}

impl TypeGroup {
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// The immutable, validated input to a mining run: every instance, grouped
/// by its interned feature type.
#[derive(Debug, Default)]
pub struct PointSet {
    type_table: TypeTable,
    groups: Vec<TypeGroup>,
}

impl PointSet {
    /// Validates and groups raw rows into a [`PointSet`].
    ///
    /// Fails fast (`InvalidInput`/`DuplicateInstance`, per the error design)
    /// before any spatial index is built.
    pub fn build(points: &[RawPoint]) -> Result<Self> {
        if points.is_empty() {
            return Err(MiningError::EmptyPointSet);
        }

        let mut seen_ids = FxHashSet::default();
        seen_ids.reserve(points.len());
        let mut type_table = TypeTable::new();
        let mut groups: Vec<TypeGroup> = Vec::new();

        for point in points {
            if !point.x.is_finite() || !point.y.is_finite() {
                return Err(MiningError::NonFiniteCoordinate {
                    id: point.id,
                    x: point.x,
                    y: point.y,
                });
            }
            if !seen_ids.insert(point.id) {
                return Err(MiningError::DuplicateInstance { id: point.id });
            }

            let type_id = type_table.intern(&point.feature_type);
            if type_id.index() >= groups.len() {
                groups.resize_with(type_id.index() + 1, TypeGroup::default);
            }
            let group = &mut groups[type_id.index()];
            group.ids.push(point.id);
            group.xs.push(point.x);
            group.ys.push(point.y);
        }

        Ok(Self { type_table, groups })
    }

    pub fn type_table(&self) -> &TypeTable {
        &self.type_table
    }

    pub fn group(&self, type_id: FeatureTypeId) -> &TypeGroup {
        &self.groups[type_id.index()]
    }

    pub fn population(&self, type_id: FeatureTypeId) -> usize {
        self.group(type_id).len()
    }

    pub fn type_ids(&self) -> impl Iterator<Item = FeatureTypeId> + '_ {
        self.type_table.ids()
    }

    /// Maps a (type, local index) pair back to the original caller-supplied id.
    pub fn original_id(&self, type_id: FeatureTypeId, local_idx: u32) -> u64 {
        self.group(type_id).ids[local_idx as usize]
    }

    pub fn total_instances(&self) -> usize {
        self.groups.iter().map(TypeGroup::len).sum()
    }
}
