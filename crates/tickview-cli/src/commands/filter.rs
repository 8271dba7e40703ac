use std::sync::Arc;

use serde_json::Value;
use tickview_core::{
    project_report, CriteriaSet, FilterEngine, OutcomeStatus, RawParams, SeriesStore,
};
use tracing::debug;

use crate::cli::FilterArgs;

use super::CommandResult;

pub fn run(args: &FilterArgs, store: Arc<SeriesStore>) -> CommandResult {
    let engine = FilterEngine::new(store);
    let normalized = CriteriaSet::normalize(&raw_params(args), engine.store());
    let criteria = &normalized.criteria;
    let report = engine.apply_all(criteria);
    debug!(rows = report.total_rows(), status = report.status().as_str(), "filter complete");

    let not_found = report
        .outcomes()
        .iter()
        .filter(|outcome| outcome.status() == OutcomeStatus::NotFound)
        .map(|outcome| outcome.ticker().to_owned())
        .collect();

    CommandResult::ok(Value::Object(project_report(&report)))
        .with_status(report.status())
        .with_tickers(criteria.tickers().iter().map(ToString::to_string).collect())
        .with_warnings(normalized.warnings)
        .with_not_found(not_found)
}

fn raw_params(args: &FilterArgs) -> RawParams {
    RawParams {
        tickers: args
            .tickers
            .iter()
            .flat_map(|value| value.split(','))
            .map(str::trim)
            .filter(|ticker| !ticker.is_empty())
            .map(str::to_owned)
            .collect(),
        start_date: args.start_date.clone(),
        end_date: args.end_date.clone(),
        min_volume: args.min_volume.clone(),
        max_volume: args.max_volume.clone(),
        min_price: args.min_price.clone(),
        max_price: args.max_price.clone(),
        volume_increase_threshold: args.volume_increase_threshold.clone(),
    }
}
