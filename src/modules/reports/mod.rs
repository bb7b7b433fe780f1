// Reporting module: three aggregation reports computed from order and
// sales-target data, served through a cache-aside layer.

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{MonthlyTrendReport, PerformanceReport, TargetVsRevenueReport};
pub use repositories::{MySqlReportStore, ReportStore};
pub use services::ReportService;
