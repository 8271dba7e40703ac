//! Behavior-driven tests for the filter engine
//!
//! These tests verify WHAT a caller gets back for a given series and set of
//! criteria, including the edge cases that must never fail a request.

use tickview_core::{project_report, volume_changes};
use tickview_tests::*;

fn shuffled_series() -> Series {
    Series::new(
        symbol("AAPL"),
        vec![
            bar("2024-01-04", 181.91, 71_983_600),
            bar("2024-01-02", 185.64, 82_488_700),
            bar("2024-01-05", 181.18, 62_303_300),
            bar("2024-01-03", 184.25, 58_414_500),
        ],
    )
}

fn dates(outcome: &FilterOutcome) -> Vec<String> {
    outcome
        .rows()
        .iter()
        .map(|row| row.bar.date.to_string())
        .collect()
}

// =============================================================================
// Unset criteria
// =============================================================================

#[test]
fn when_no_bounds_are_set_caller_gets_the_full_series_in_date_order() {
    // Given: A series stored out of date order
    let engine = engine([shuffled_series()]);

    // When: It is filtered with every bound unset
    let criteria = CriteriaSet::builder([symbol("AAPL")]).build();
    let outcome = engine.apply(&symbol("AAPL"), &criteria);

    // Then: Every row comes back, ascending by date, with content unchanged
    assert!(criteria.is_unfiltered());
    assert_eq!(
        dates(&outcome),
        ["2024-01-02", "2024-01-03", "2024-01-04", "2024-01-05"]
    );
    assert_eq!(outcome.rows()[0].bar, bar("2024-01-02", 185.64, 82_488_700));

    // And: The stored series keeps its original order
    let stored = engine.store().get(&symbol("AAPL")).expect("stored");
    assert_eq!(stored.rows[0].date, date("2024-01-04"));
}

#[test]
fn when_both_price_bounds_are_non_positive_they_are_ignored() {
    // Given: A price range of [-5, -1]
    let engine = engine([shuffled_series()]);
    let raw = RawParams::from_pairs([("ticker", "AAPL"), ("min_price", "-5"), ("max_price", "-1")]);

    // When: The raw parameters are normalized and applied
    let normalized = CriteriaSet::normalize(&raw, engine.store());
    let outcome = engine.apply(&symbol("AAPL"), &normalized.criteria);

    // Then: The range is treated as unset and the full series is returned
    assert!(normalized.criteria.price_range().is_unbounded());
    assert!(normalized.warnings.is_empty(), "non-positive is unset, not malformed");
    assert_eq!(outcome.rows().len(), 4);
}

// =============================================================================
// Range filters
// =============================================================================

#[test]
fn every_retained_row_satisfies_the_volume_range() {
    // Given: A volume range inside the observed volumes
    let engine = engine([shuffled_series()]);
    let criteria = CriteriaSet::builder([symbol("AAPL")])
        .volume_range(Some(60_000_000.0), Some(80_000_000.0))
        .build();

    // When: The series is filtered
    let outcome = engine.apply(&symbol("AAPL"), &criteria);

    // Then: Only rows inside the inclusive bounds survive
    assert_eq!(dates(&outcome), ["2024-01-04", "2024-01-05"]);
    assert!(outcome
        .rows()
        .iter()
        .all(|row| (60_000_000..=80_000_000).contains(&row.bar.volume)));
}

#[test]
fn price_filter_reads_the_close_not_the_high() {
    // Given: A day whose high is above the bound but close is below it
    let day = DailyBar::new(date("2024-01-02"), 99.0, 120.0, 98.0, 99.5, 1_000).expect("bar");
    let engine = engine([Series::new(symbol("TSLA"), vec![day])]);
    let criteria = CriteriaSet::builder([symbol("TSLA")])
        .price_range(Some(100.0), None)
        .build();

    // When: The series is filtered
    let outcome = engine.apply(&symbol("TSLA"), &criteria);

    // Then: The day is dropped
    assert_eq!(outcome, FilterOutcome::Empty(symbol("TSLA")));
}

#[test]
fn inverted_date_range_is_empty_not_an_error() {
    // Given: start_date after end_date
    let engine = engine([shuffled_series()]);
    let raw = RawParams::from_pairs([
        ("ticker", "AAPL"),
        ("start_date", "2024-01-10"),
        ("end_date", "2024-01-05"),
    ]);

    // When: The request is normalized and applied
    let normalized = CriteriaSet::normalize(&raw, engine.store());
    let report = engine.apply_all(&normalized.criteria);

    // Then: The result is empty, and empty is not "not found"
    assert_eq!(report.status(), OutcomeStatus::Empty);
    assert_eq!(report.total_rows(), 0);
}

// =============================================================================
// Volume-increase threshold
// =============================================================================

#[test]
fn threshold_keeps_only_days_with_a_large_enough_increase() {
    // Given: Volumes 100, 150, 90 and a 40% threshold
    let series = Series::new(
        symbol("NVDA"),
        vec![
            bar("2024-01-02", 10.0, 100),
            bar("2024-01-03", 10.0, 150),
            bar("2024-01-04", 10.0, 90),
        ],
    );
    let engine = engine([series]);
    let criteria = CriteriaSet::builder([symbol("NVDA")])
        .volume_increase_threshold(Some(40.0))
        .build();

    // When: The series is filtered
    let outcome = engine.apply(&symbol("NVDA"), &criteria);

    // Then: Only the +50% day survives, carrying its change
    assert_eq!(dates(&outcome), ["2024-01-03"]);
    assert_eq!(outcome.rows()[0].volume_change_pct, Some(50.0));
}

#[test]
fn first_row_of_any_subset_never_has_a_change() {
    // Given: Any subset of rows
    let rows: Vec<DailyBar> = shuffled_series().rows;

    // When: Changes are computed
    let changes = volume_changes(&rows);

    // Then: The first change is undefined
    assert_eq!(changes[0], None);
    assert_eq!(changes.len(), rows.len());
}

#[test]
fn previous_day_is_the_previous_surviving_day() {
    // Given: A volume floor that removes the 2024-01-03 row
    let engine = engine([shuffled_series()]);
    let criteria = CriteriaSet::builder([symbol("AAPL")])
        .volume_range(Some(60_000_000.0), None)
        .volume_increase_threshold(Some(0.1))
        .build();

    // When: The threshold runs after the volume filter
    let outcome = engine.apply(&symbol("AAPL"), &criteria);

    // Then: 2024-01-04 is compared with 2024-01-02, a decrease, so it is dropped
    assert_eq!(outcome.status(), OutcomeStatus::Empty);
}

#[test]
fn applying_the_same_criteria_twice_is_idempotent() {
    // Given: A criteria set with several active stages
    let engine = engine([shuffled_series()]);
    let raw = RawParams::from_pairs([
        ("ticker", "aapl"),
        ("start_date", "2024-01-03"),
        ("min_price", "150"),
        ("volume_increase_threshold", "5"),
    ]);
    let first = CriteriaSet::normalize(&raw, engine.store()).criteria;

    // When: It is re-normalized from its own parameters and both are applied
    let second = CriteriaSet::normalize(&first.to_params(), engine.store()).criteria;

    // Then: The criteria and the outputs match
    assert_eq!(first, second);
    assert_eq!(engine.apply_all(&first), engine.apply_all(&second));
}

// =============================================================================
// Unknown versus empty
// =============================================================================

#[test]
fn unknown_ticker_is_distinguishable_from_an_empty_result() {
    // Given: A store without FOO
    let engine = engine([shuffled_series()]);

    // When: FOO is requested
    let raw = RawParams::from_pairs([("ticker", "FOO")]);
    let normalized = CriteriaSet::normalize(&raw, engine.store());
    let report = engine.apply_all(&normalized.criteria);

    // Then: The payload is an empty mapping but the status says not found
    assert_eq!(normalized.criteria.unknown_tickers(), ["FOO"]);
    assert!(project_report(&report).is_empty());
    assert_eq!(report.status(), OutcomeStatus::NotFound);
    assert_eq!(
        report.outcomes(),
        [FilterOutcome::NotFound(String::from("FOO"))]
    );
}

#[test]
fn mixed_known_and_unknown_tickers_still_return_rows() {
    // Given: One known and one unknown ticker
    let engine = engine([shuffled_series()]);
    let raw = RawParams::from_pairs([("ticker", "AAPL,FOO")]);

    // When: The request is applied
    let normalized = CriteriaSet::normalize(&raw, engine.store());
    let report = engine.apply_all(&normalized.criteria);

    // Then: AAPL rows come back and FOO is reported separately
    assert_eq!(report.status(), OutcomeStatus::Rows);
    let projection = project_report(&report);
    assert_eq!(projection.keys().collect::<Vec<_>>(), ["AAPL"]);
    assert_eq!(report.outcomes()[1].status(), OutcomeStatus::NotFound);
}
