//! View adapter: filter results to chart-ready series.
//!
//! Produces plain data (axis labels, x/y arrays) for a charting front end.
//! No markup is generated here.

use std::str::FromStr;

use serde::Serialize;
use tickview_core::{
    FilterDefaults, FilterReport, FilteredSeries, GlobalRanges, OutcomeStatus, Symbol,
};

const PRICE_COLOR: &str = "#1f77b4";

/// How price is drawn for a ticker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    #[default]
    Line,
    Candlestick,
}

impl FromStr for ChartKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "line" => Ok(Self::Line),
            "candlestick" | "candle" => Ok(Self::Candlestick),
            other => Err(format!("unknown chart kind '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineSeries {
    pub name: String,
    pub x: Vec<String>,
    pub y: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<&'static str>,
    pub fill: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineChart {
    pub title: String,
    pub x_title: &'static str,
    pub y_title: &'static str,
    pub series: Vec<LineSeries>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandlestickChart {
    pub title: String,
    pub name: String,
    pub x: Vec<String>,
    pub open: Vec<f64>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub close: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarGroup {
    pub name: String,
    pub x: Vec<String>,
    pub y: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedBarChart {
    pub title: String,
    pub x_title: &'static str,
    pub y_title: &'static str,
    pub groups: Vec<BarGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Chart {
    Line(LineChart),
    Candlestick(CandlestickChart),
    GroupedBars(GroupedBarChart),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardCharts {
    pub price: Vec<Chart>,
    pub volume: Chart,
}

/// Everything a dashboard page needs for one request.
///
/// `charts` is `None` only when every requested ticker was unknown, which a
/// renderer must show differently from an empty chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub tickers: Vec<String>,
    pub selected: Vec<String>,
    pub not_found: Vec<String>,
    pub status: OutcomeStatus,
    pub chart: ChartKind,
    pub charts: Option<DashboardCharts>,
    pub ranges: GlobalRanges,
    pub current_filters: FilterDefaults,
    pub warnings: Vec<String>,
}

/// Inputs for [`dashboard_view`] that do not come from the report.
#[derive(Debug, Clone)]
pub struct DashboardContext<'a> {
    pub known: &'a [Symbol],
    pub selected: &'a [Symbol],
    pub chart: ChartKind,
    pub ranges: GlobalRanges,
    pub current_filters: FilterDefaults,
    pub warnings: Vec<String>,
}

pub fn dashboard_view(report: &FilterReport, context: DashboardContext<'_>) -> DashboardView {
    let status = report.status();
    let not_found = report
        .outcomes()
        .iter()
        .filter(|outcome| outcome.status() == OutcomeStatus::NotFound)
        .map(|outcome| outcome.ticker().to_owned())
        .collect();

    let charts = (status != OutcomeStatus::NotFound).then(|| {
        let series: Vec<&FilteredSeries> = report.series().collect();
        match context.selected {
            [single] => single_ticker_charts(single, series.first().copied(), context.chart),
            _ => multi_ticker_charts(&series, context.chart),
        }
    });

    DashboardView {
        tickers: context.known.iter().map(Symbol::to_string).collect(),
        selected: context.selected.iter().map(Symbol::to_string).collect(),
        not_found,
        status,
        chart: context.chart,
        charts,
        ranges: context.ranges,
        current_filters: context.current_filters,
        warnings: context.warnings,
    }
}

fn single_ticker_charts(
    symbol: &Symbol,
    series: Option<&FilteredSeries>,
    kind: ChartKind,
) -> DashboardCharts {
    let price = match (kind, series) {
        (ChartKind::Candlestick, Some(series)) => vec![Chart::Candlestick(candlestick(series))],
        _ => vec![Chart::Line(LineChart {
            title: format!("{symbol} Stock Price Over Time"),
            x_title: "Date",
            y_title: "Price ($)",
            series: series.map(price_line).into_iter().collect(),
        })],
    };

    let volume = Chart::Line(LineChart {
        title: format!("{symbol} Trading Volume Over Time"),
        x_title: "Date",
        y_title: "Volume (shares)",
        series: series
            .map(|series| LineSeries {
                name: format!("{} Volume", series.symbol),
                x: dates(series),
                y: volumes(series),
                color: Some(PRICE_COLOR),
                fill: true,
            })
            .into_iter()
            .collect(),
    });

    DashboardCharts { price, volume }
}

fn multi_ticker_charts(series: &[&FilteredSeries], kind: ChartKind) -> DashboardCharts {
    let price = match kind {
        ChartKind::Candlestick => series
            .iter()
            .map(|series| Chart::Candlestick(candlestick(series)))
            .collect(),
        ChartKind::Line => vec![Chart::Line(LineChart {
            title: String::from("Stock Prices Over Time"),
            x_title: "Date",
            y_title: "Price ($)",
            series: series
                .iter()
                .map(|series| LineSeries {
                    color: None,
                    ..price_line(series)
                })
                .collect(),
        })],
    };

    let volume = Chart::GroupedBars(GroupedBarChart {
        title: String::from("Trading Volume"),
        x_title: "Date",
        y_title: "Volume (shares)",
        groups: series
            .iter()
            .map(|series| BarGroup {
                name: series.symbol.to_string(),
                x: dates(series),
                y: volumes(series),
            })
            .collect(),
    });

    DashboardCharts { price, volume }
}

fn price_line(series: &FilteredSeries) -> LineSeries {
    LineSeries {
        name: format!("{} Price", series.symbol),
        x: dates(series),
        y: series.rows.iter().map(|row| row.bar.close).collect(),
        color: Some(PRICE_COLOR),
        fill: false,
    }
}

fn candlestick(series: &FilteredSeries) -> CandlestickChart {
    CandlestickChart {
        title: format!("{} Price", series.symbol),
        name: series.symbol.to_string(),
        x: dates(series),
        open: series.rows.iter().map(|row| row.bar.open).collect(),
        high: series.rows.iter().map(|row| row.bar.high).collect(),
        low: series.rows.iter().map(|row| row.bar.low).collect(),
        close: series.rows.iter().map(|row| row.bar.close).collect(),
    }
}

fn dates(series: &FilteredSeries) -> Vec<String> {
    series.rows.iter().map(|row| row.bar.date.to_string()).collect()
}

fn volumes(series: &FilteredSeries) -> Vec<f64> {
    series.rows.iter().map(|row| row.bar.volume as f64).collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tickview_core::{
        CriteriaSet, DailyBar, FilterEngine, RawParams, Series, SeriesStore, TradingDate,
    };

    use super::*;

    fn symbol(value: &str) -> Symbol {
        Symbol::parse(value).expect("symbol")
    }

    fn engine() -> FilterEngine {
        let series = ["AAPL", "MSFT"].map(|ticker| {
            let rows = (1..=3)
                .map(|day| {
                    let date = TradingDate::parse(&format!("2024-01-0{day}")).expect("date");
                    DailyBar::new(date, 10.0, 11.0, 9.0, 10.0 + day as f64, 100 * day as u64)
                        .expect("bar")
                })
                .collect();
            Series::new(symbol(ticker), rows)
        });
        FilterEngine::new(Arc::new(SeriesStore::new(series).expect("store")))
    }

    fn view(selected: &[Symbol], criteria: &CriteriaSet, chart: ChartKind) -> DashboardView {
        let engine = engine();
        let report = engine.apply_all(criteria);
        let ranges = GlobalRanges::compute(engine.store());
        dashboard_view(
            &report,
            DashboardContext {
                known: engine.store().symbols(),
                selected,
                chart,
                ranges,
                current_filters: FilterDefaults::resolve(&ranges, &RawParams::default()),
                warnings: Vec::new(),
            },
        )
    }

    #[test]
    fn parses_chart_kind_leniently() {
        assert_eq!("Candlestick".parse::<ChartKind>(), Ok(ChartKind::Candlestick));
        assert!("pie".parse::<ChartKind>().is_err());
    }

    #[test]
    fn single_ticker_gets_price_and_filled_volume_lines() {
        let selected = [symbol("AAPL")];
        let criteria = CriteriaSet::builder(selected.clone()).build();

        let view = view(&selected, &criteria, ChartKind::Line);

        let charts = view.charts.expect("charts");
        let Chart::Line(price) = &charts.price[0] else {
            panic!("expected a price line");
        };
        assert_eq!(price.title, "AAPL Stock Price Over Time");
        assert_eq!(price.series[0].y, [11.0, 12.0, 13.0]);
        let Chart::Line(volume) = &charts.volume else {
            panic!("expected a volume line");
        };
        assert!(volume.series[0].fill);
        assert_eq!(volume.series[0].y, [100.0, 200.0, 300.0]);
    }

    #[test]
    fn candlestick_is_a_per_ticker_choice() {
        let selected = [symbol("AAPL"), symbol("MSFT")];
        let criteria = CriteriaSet::builder(selected.clone()).build();

        let view = view(&selected, &criteria, ChartKind::Candlestick);

        let charts = view.charts.expect("charts");
        assert_eq!(charts.price.len(), 2);
        assert!(matches!(charts.price[1], Chart::Candlestick(ref c) if c.name == "MSFT"));
        let Chart::GroupedBars(volume) = &charts.volume else {
            panic!("expected grouped volume bars");
        };
        assert_eq!(volume.groups.len(), 2);
    }

    #[test]
    fn empty_result_still_renders_empty_charts() {
        let selected = [symbol("AAPL")];
        let criteria = CriteriaSet::builder(selected.clone())
            .price_range(Some(500.0), None)
            .build();

        let view = view(&selected, &criteria, ChartKind::Line);

        assert_eq!(view.status, OutcomeStatus::Empty);
        let charts = view.charts.expect("empty charts");
        assert!(matches!(&charts.price[0], Chart::Line(line) if line.series.is_empty()));
    }

    #[test]
    fn unknown_ticker_yields_no_charts() {
        let criteria = CriteriaSet::builder([symbol("FOO")]).build();

        let view = view(&[symbol("FOO")], &criteria, ChartKind::Line);

        assert_eq!(view.status, OutcomeStatus::NotFound);
        assert_eq!(view.not_found, ["FOO"]);
        assert!(view.charts.is_none());
    }
}
