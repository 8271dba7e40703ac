use tickview_core::{GlobalRanges, OutcomeStatus, SeriesStore};

use crate::error::CliError;

use super::CommandResult;

pub fn run(store: &SeriesStore) -> Result<CommandResult, CliError> {
    let ranges = GlobalRanges::compute(store);
    let status = if ranges.is_empty() {
        OutcomeStatus::Empty
    } else {
        OutcomeStatus::Rows
    };

    let mut result = CommandResult::ok(serde_json::to_value(ranges)?)
        .with_status(status)
        .with_tickers(store.symbols().iter().map(ToString::to_string).collect());
    if ranges.is_empty() {
        result = result.with_warnings(vec![String::from("no rows loaded; ranges are blank")]);
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_store_warns() {
        let result = run(&SeriesStore::default()).expect("ranges");

        assert_eq!(result.status, OutcomeStatus::Empty);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.data["min_date"], "");
    }
}
