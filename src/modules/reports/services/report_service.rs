use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDate, TimeZone, Utc};
use tracing::debug;

use crate::core::cache::Cache;
use crate::core::Result;
use crate::modules::reports::models::{
    MonthlyTrendReport, PerformanceReport, TargetVsRevenueReport,
};
use crate::modules::reports::repositories::{
    OrderReportFilter, ReportStore, TargetReportFilter,
};
use crate::modules::reports::services::{
    monthly_trend, performance_statistic, target_vs_revenue,
};

/// Validated inputs for the monthly order trend report.
#[derive(Debug, Clone)]
pub struct MonthlyTrendQuery {
    pub customer_id: Option<i64>,
    pub sales_id: Option<i64>,
    /// Resolved display names for the applied filters.
    pub customer: Option<String>,
    pub sales: Option<String>,
    pub start_year: i32,
    pub end_year: i32,
}

/// Validated inputs for the target vs revenue report.
#[derive(Debug, Clone)]
pub struct TargetVsRevenueQuery {
    pub sales_id: Option<i64>,
    pub sales: Option<String>,
    pub year: i32,
}

/// Validated inputs for the performance statistic report.
#[derive(Debug, Clone)]
pub struct PerformanceQuery {
    pub month: u32,
    pub year: i32,
    pub is_underperform: Option<bool>,
}

/// Service generating the three sales reports through a cache-aside layer.
///
/// Each report is a pure function of the rows the store returns; a cached
/// payload is returned verbatim until its TTL lapses. Concurrent misses may
/// each compute and write, last write wins.
pub struct ReportService {
    store: Arc<dyn ReportStore>,
    cache: Arc<dyn Cache>,
    ttl: Duration,
}

impl ReportService {
    pub fn new(store: Arc<dyn ReportStore>, cache: Arc<dyn Cache>, ttl: Duration) -> Self {
        Self { store, cache, ttl }
    }

    /// Monthly revenue per order-month across a three year window.
    pub async fn monthly_trend(&self, query: &MonthlyTrendQuery) -> Result<MonthlyTrendReport> {
        let mut params = BTreeMap::new();
        if let Some(customer_id) = query.customer_id {
            params.insert("customer_id", customer_id.to_string());
        }
        if let Some(sales_id) = query.sales_id {
            params.insert("sales_id", sales_id.to_string());
        }
        let key = cache_key("reports.orders.monthly-trend", &params)?;

        if let Some(hit) = self.cache.get(&key).await {
            debug!(%key, "report cache hit");
            return Ok(serde_json::from_value(hit)?);
        }

        let orders = self
            .store
            .orders_with_lines(&OrderReportFilter {
                start: start_of_year(query.start_year),
                end: end_of_year(query.end_year),
                customer_id: query.customer_id,
                sales_id: query.sales_id,
            })
            .await?;

        let report = MonthlyTrendReport {
            customer: query.customer.clone(),
            sales: query.sales.clone(),
            items: monthly_trend::build(query.start_year, query.end_year, &orders),
        };

        self.cache
            .put(&key, serde_json::to_value(&report)?, self.ttl)
            .await;

        Ok(report)
    }

    /// Target, revenue and income per month for one calendar year.
    pub async fn target_vs_revenue(
        &self,
        query: &TargetVsRevenueQuery,
    ) -> Result<TargetVsRevenueReport> {
        let mut params = BTreeMap::new();
        if let Some(sales_id) = query.sales_id {
            params.insert("sales_id", sales_id.to_string());
        }
        let key = cache_key("reports.sales.target-vs-revenue", &params)?;

        if let Some(hit) = self.cache.get(&key).await {
            debug!(%key, "report cache hit");
            return Ok(serde_json::from_value(hit)?);
        }

        let targets = self
            .store
            .targets(&TargetReportFilter {
                start: first_day(query.year, 1),
                end: last_day(query.year, 12),
                sales_id: query.sales_id,
                sales_ids: None,
            })
            .await?;

        let orders = self
            .store
            .orders_with_lines(&OrderReportFilter {
                start: start_of_year(query.year),
                end: end_of_year(query.year),
                customer_id: None,
                sales_id: query.sales_id,
            })
            .await?;

        let report = TargetVsRevenueReport {
            sales: query.sales.clone(),
            year: query.year,
            items: target_vs_revenue::build(query.year, &targets, &orders),
        };

        self.cache
            .put(&key, serde_json::to_value(&report)?, self.ttl)
            .await;

        Ok(report)
    }

    /// Revenue against target per sales agent for one month.
    pub async fn performance_statistic(
        &self,
        query: &PerformanceQuery,
    ) -> Result<PerformanceReport> {
        let mut params = BTreeMap::new();
        params.insert("month", query.month.to_string());
        params.insert("year", query.year.to_string());
        if let Some(is_underperform) = query.is_underperform {
            params.insert("is_underperform", is_underperform.to_string());
        }
        let key = cache_key("reports.sales.performance-statistic", &params)?;

        if let Some(hit) = self.cache.get(&key).await {
            debug!(%key, "report cache hit");
            return Ok(serde_json::from_value(hit)?);
        }

        let start = first_day(query.year, query.month);
        let end = last_day(query.year, query.month);

        let orders = self
            .store
            .orders_with_lines(&OrderReportFilter {
                start: at_midnight(start),
                end: at_end_of_day(end),
                customer_id: None,
                sales_id: None,
            })
            .await?;

        // Targets only matter for agents that sold something this month.
        let mut sales_ids: Vec<i64> = orders.iter().map(|order| order.sales_id).collect();
        sales_ids.sort_unstable();
        sales_ids.dedup();

        let targets = self
            .store
            .targets(&TargetReportFilter {
                start,
                end,
                sales_id: None,
                sales_ids: Some(sales_ids),
            })
            .await?;

        let report = PerformanceReport {
            is_underperform: query.is_underperform,
            month: start.format("%B %Y").to_string(),
            items: performance_statistic::build(&orders, &targets, query.is_underperform),
        };

        self.cache
            .put(&key, serde_json::to_value(&report)?, self.ttl)
            .await;

        Ok(report)
    }
}

/// Deterministic cache key: report identifier plus the sorted parameter map.
fn cache_key(report: &str, params: &BTreeMap<&str, String>) -> Result<String> {
    Ok(format!("{report}|{}", serde_json::to_string(params)?))
}

/// First day of a month. Month comes validated (1-12), year is a plain
/// calendar year, so construction cannot fail.
pub fn first_day(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).expect("valid calendar month")
}

/// Last day of a month.
pub fn last_day(year: i32, month: u32) -> NaiveDate {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    first_day(next_year, next_month)
        .pred_opt()
        .expect("valid calendar month")
}

pub fn at_midnight(date: NaiveDate) -> chrono::DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0).expect("valid time"))
}

pub fn at_end_of_day(date: NaiveDate) -> chrono::DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_hms_opt(23, 59, 59).expect("valid time"))
}

pub fn start_of_year(year: i32) -> chrono::DateTime<Utc> {
    at_midnight(first_day(year, 1))
}

pub fn end_of_year(year: i32) -> chrono::DateTime<Utc> {
    at_end_of_day(last_day(year, 12))
}
