//! Spatial colocation pattern mining.
//!
//! Given tagged 2D points, [`mine`] discovers sets of feature types whose
//! instances co-occur within a radius more often than a participation
//! threshold, using a per-type spatial index, a precomputed neighbor
//! graph, Apriori-style candidate generation, and clique-style instance
//! enumeration — with an optional coarse-grid pre-filter before each
//! level's expensive fine-level enumeration.

mod candidate_generator;
mod cancellation;
mod clique;
mod coarse_pruner;
mod config;
mod engine;
mod error;
mod evaluator;
mod instance_enumerator;
mod neighbor_graph;
mod pair_miner;
mod pattern_store;
mod point_set;
mod type_index;
mod types;

pub mod loaders;

pub use cancellation::CancellationToken;
pub use config::{MiningConfig, MiningConfigBuilder};
pub use engine::mine;
pub use error::{LoadError, LoadResult, MiningError, Result};
pub use loaders::{CsvPointSource, PointSource};
#[cfg(feature = "loaders")]
pub use loaders::GeoJsonPointSource;
pub use point_set::{PointSet, RawPoint, TypeGroup};
pub use types::{FeatureTypeId, Pattern, PatternKey};
