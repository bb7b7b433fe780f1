pub mod monthly_trend;
pub mod performance_statistic;
pub mod report_service;
pub mod target_vs_revenue;

pub use report_service::{
    MonthlyTrendQuery, PerformanceQuery, ReportService, TargetVsRevenueQuery,
};
