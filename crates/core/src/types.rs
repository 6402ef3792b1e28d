//! Core value types shared across the mining pipeline.
//!
//! Feature-type labels arrive from callers as free-form strings; everything
//! past ingestion indexes on the dense [`FeatureTypeId`] interned from them
//! (see the design note on dynamic feature-type labels in `SPEC_FULL.md`).

use std::fmt;

use lasso::{Key, Rodeo, Spur};
use smallvec::SmallVec;

/// Dense, zero-based handle for an interned feature-type label.
///
/// Stable for the lifetime of a single mining run; never persisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FeatureTypeId(pub u32);

impl FeatureTypeId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Interns feature-type strings to dense [`FeatureTypeId`]s and back.
///
/// `Spur`'s own interning order already assigns dense, zero-based,
/// first-seen ids, so `FeatureTypeId` is just `Spur::into_usize()` recast
/// as a `u32`.
#[derive(Default)]
pub struct TypeTable {
    interner: Rodeo,
}

impl TypeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns `name`, assigning a new id in first-seen order if needed.
    pub fn intern(&mut self, name: &str) -> FeatureTypeId {
        FeatureTypeId(self.interner.get_or_intern(name).into_usize() as u32)
    }

    pub fn id_of(&self, name: &str) -> Option<FeatureTypeId> {
        self.interner.get(name).map(|spur| FeatureTypeId(spur.into_usize() as u32))
    }

    pub fn name_of(&self, id: FeatureTypeId) -> &str {
        let spur = Spur::try_from_usize(id.index()).expect("FeatureTypeId must be a valid interned index");
        self.interner.resolve(&spur)
    }

    pub fn len(&self) -> usize {
        self.interner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interner.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = FeatureTypeId> + '_ {
        (0..self.interner.len() as u32).map(FeatureTypeId)
    }
}

impl fmt::Debug for TypeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeTable").field("len", &self.interner.len()).finish()
    }
}

/// Reference to a single typed instance: its type and its position within
/// that type's contiguous block (see [`crate::point_set::PointSet`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InstanceRef {
    pub type_id: FeatureTypeId,
    pub local_idx: u32,
}

/// Small-vector alias sized for the common case of short patterns.
pub type TypeVec = SmallVec<[FeatureTypeId; 4]>;

/// Canonical, sorted identity of a pattern: an ordered tuple of distinct
/// feature types. Two patterns with the same member types are the same
/// `PatternKey` regardless of discovery order.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PatternKey(TypeVec);

impl PatternKey {
    /// Builds the canonical key from an arbitrary (already deduplicated)
    /// slice of types, sorting them.
    pub fn new(mut types: TypeVec) -> Self {
        types.sort_unstable();
        Self(types)
    }

    pub fn types(&self) -> &[FeatureTypeId] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Every (len-1)-sized subset of this key, in canonical order.
    pub fn subsets_of_size(&self, size: usize) -> impl Iterator<Item = PatternKey> + '_ {
        itertools::Itertools::combinations(self.0.iter().copied(), size)
            .map(|combo| PatternKey::new(combo.into_iter().collect()))
    }
}

impl fmt::Display for PatternKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, t) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", t.0)?;
        }
        write!(f, ")")
    }
}

/// A single witnessing tuple for a pattern: one local instance index per
/// pattern type, positionally aligned to the owning [`PatternKey`].
pub type PatternInstance = SmallVec<[u32; 4]>;

/// A fully admitted, user-facing colocation pattern.
#[derive(Clone, Debug, PartialEq)]
pub struct Pattern {
    pub(crate) types: Vec<String>,
    pub(crate) participation_index: f64,
    pub(crate) instances: Vec<Vec<u64>>,
}

impl Pattern {
    pub fn types(&self) -> &[String] {
        &self.types
    }

    pub fn participation_index(&self) -> f64 {
        self.participation_index
    }

    pub fn instances(&self) -> &[Vec<u64>] {
        &self.instances
    }

    pub fn size(&self) -> usize {
        self.types.len()
    }
}
