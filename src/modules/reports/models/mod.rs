mod report_series;

pub use report_series::{
    AmountSummary, MetricSeries, MonthlyBuckets, MonthlyTrendReport, PerformanceItem,
    PerformanceReport, SeriesPoint, TargetVsRevenueReport, TrendSeries, MONTH_LABELS,
};
