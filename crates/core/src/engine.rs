//! Top-level mining pipeline: builds the spatial index and neighbor graph
//! once, then walks Apriori levels until a level yields nothing new.

use tracing::{debug, info, instrument};

use crate::candidate_generator::generate_candidates;
use crate::coarse_pruner::CoarseGraph;
use crate::config::MiningConfig;
use crate::error::{MiningError, Result};
use crate::evaluator::evaluate;
use crate::instance_enumerator::find_pattern_instances;
use crate::neighbor_graph::NeighborGraph;
use crate::pair_miner::discover_pairs;
use crate::pattern_store::PatternStore;
use crate::point_set::{PointSet, RawPoint};
use crate::type_index::TypeIndex;
use crate::types::{Pattern, PatternKey};

/// Mines colocation patterns from `points` under `config`.
///
/// Builds a per-type spatial index and a precomputed neighbor graph once,
/// mines size-2 patterns directly from it, then grows candidates level by
/// level (optionally coarse-pruned) until a level admits nothing.
#[instrument(skip(points, config), fields(points = points.len()))]
pub fn mine(points: &[RawPoint], config: &MiningConfig) -> Result<Vec<Pattern>> {
    let point_set = PointSet::build(points)?;
    config.check_cancelled()?;

    let index = {
        let _span = tracing::info_span!("type_index", types = point_set.type_table().len()).entered();
        TypeIndex::build(&point_set)
    };
    config.check_cancelled()?;

    let graph = {
        let _span = tracing::info_span!("neighbor_graph").entered();
        NeighborGraph::build(&point_set, &index, config)?
    };
    config.check_cancelled()?;

    let coarse_graph = if config.coarse_pruning() {
        let _span = tracing::info_span!("coarse_graph").entered();
        Some(CoarseGraph::build(&point_set, &graph, config))
    } else {
        None
    };

    let mut store = PatternStore::new();
    let mut frequent_at_level: Vec<PatternKey> = Vec::new();

    {
        let _span = tracing::info_span!("mining_level", k = 2).entered();
        for pair in discover_pairs(&point_set, &graph) {
            if pair.participation_index >= config.min_prevalence() && !pair.instances.is_empty() {
                frequent_at_level.push(pair.key.clone());
                store.insert(to_pattern(&point_set, &pair.key, pair.participation_index, &pair.instances));
            }
        }
        info!(found = frequent_at_level.len(), "size-2 patterns discovered");
    }

    let mut k = 3;
    loop {
        config.check_cancelled()?;
        let _span = tracing::info_span!("mining_level", k).entered();

        let candidates = generate_candidates(&frequent_at_level, k);
        debug!(candidates = candidates.len(), "candidates generated");
        if candidates.is_empty() {
            break;
        }

        let candidates = match &coarse_graph {
            Some(coarse_graph) => {
                let pruned = crate::coarse_pruner::prune_candidates(&candidates, &point_set, coarse_graph, config);
                debug!(remaining = pruned.len(), "candidates after coarse pruning");
                pruned
            }
            None => candidates,
        };
        if candidates.is_empty() {
            break;
        }

        let mut next_level = Vec::new();
        for candidate in &candidates {
            config.check_cancelled()?;
            let instances = find_pattern_instances(&point_set, &graph, candidate, config)?;
            if instances.is_empty() {
                continue;
            }
            let ratios = evaluate(&point_set, candidate.types(), &instances);
            if ratios.participation_index >= config.min_prevalence() {
                next_level.push(candidate.clone());
                store.insert(to_pattern(&point_set, candidate, ratios.participation_index, &instances));
            }
        }

        info!(k, found = next_level.len(), "level mined");
        if next_level.is_empty() {
            break;
        }
        frequent_at_level = next_level;
        k += 1;
    }

    Ok(store.into_sorted())
}

fn to_pattern(
    point_set: &PointSet,
    key: &PatternKey,
    participation_index: f64,
    instances: &[crate::clique::CliqueInstance],
) -> Pattern {
    let types: Vec<String> = key
        .types()
        .iter()
        .map(|&type_id| point_set.type_table().name_of(type_id).to_string())
        .collect();

    let instances = instances
        .iter()
        .map(|instance| {
            key.types()
                .iter()
                .zip(instance.iter())
                .map(|(&type_id, &local_idx)| point_set.original_id(type_id, local_idx))
                .collect()
        })
        .collect();

    Pattern { types, participation_index, instances }
}
