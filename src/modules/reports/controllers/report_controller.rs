use actix_web::{web, HttpResponse};
use chrono::{Datelike, Utc};
use serde::Deserialize;

use crate::core::validation::{self, ValidationErrors};
use crate::core::{ApiResponse, AppError};
use crate::modules::customers::repositories::CustomerRepository;
use crate::modules::reports::services::{
    MonthlyTrendQuery, PerformanceQuery, ReportService, TargetVsRevenueQuery,
};
use crate::modules::sales::repositories::SalesRepository;

/// Query parameters for the monthly trend report
#[derive(Debug, Deserialize)]
pub struct MonthlyTrendParams {
    pub customer_id: Option<String>,
    pub sales_id: Option<String>,
}

/// Query parameters for the target vs revenue report
#[derive(Debug, Deserialize)]
pub struct TargetVsRevenueParams {
    pub sales_id: Option<String>,
}

/// Query parameters for the performance statistic report
#[derive(Debug, Deserialize)]
pub struct PerformanceParams {
    pub month: Option<String>,
    pub is_underperform: Option<String>,
}

/// Resolve an optional sales filter to its display name, recording a
/// validation failure when the id does not exist.
async fn resolve_sales(
    errors: &mut ValidationErrors,
    sales: &dyn SalesRepository,
    id: Option<i64>,
) -> Result<Option<String>, AppError> {
    let Some(id) = id else {
        return Ok(None);
    };

    match sales.find_display(id).await? {
        Some(display) => Ok(Some(display.name)),
        None => {
            validation::invalid_selection(errors, "sales_id");
            Ok(None)
        }
    }
}

async fn resolve_customer(
    errors: &mut ValidationErrors,
    customers: &dyn CustomerRepository,
    id: Option<i64>,
) -> Result<Option<String>, AppError> {
    let Some(id) = id else {
        return Ok(None);
    };

    match customers.show(id).await? {
        Some(customer) => Ok(Some(customer.name)),
        None => {
            validation::invalid_selection(errors, "customer_id");
            Ok(None)
        }
    }
}

/// Monthly order revenue per month, one series per year of the window
/// [current year - 2, current year].
/// GET /reports/orders/monthly-trend
pub async fn monthly_trend(
    service: web::Data<ReportService>,
    customers: web::Data<dyn CustomerRepository>,
    sales: web::Data<dyn SalesRepository>,
    params: web::Query<MonthlyTrendParams>,
) -> Result<HttpResponse, AppError> {
    let mut errors = ValidationErrors::new();
    let customer_id =
        validation::optional_int(&mut errors, "customer_id", params.customer_id.as_deref());
    let sales_id = validation::optional_int(&mut errors, "sales_id", params.sales_id.as_deref());

    let customer = resolve_customer(&mut errors, customers.get_ref(), customer_id).await?;
    let sales = resolve_sales(&mut errors, sales.get_ref(), sales_id).await?;
    errors.into_result()?;

    let current_year = Utc::now().year();
    let report = service
        .monthly_trend(&MonthlyTrendQuery {
            customer_id,
            sales_id,
            customer,
            sales,
            start_year: current_year - 2,
            end_year: current_year,
        })
        .await?;

    Ok(ApiResponse::ok(report))
}

/// Monthly target, revenue and income for the current year.
/// GET /reports/sales/target-vs-actual-revenue
pub async fn target_vs_revenue(
    service: web::Data<ReportService>,
    sales: web::Data<dyn SalesRepository>,
    params: web::Query<TargetVsRevenueParams>,
) -> Result<HttpResponse, AppError> {
    let mut errors = ValidationErrors::new();
    let sales_id = validation::optional_int(&mut errors, "sales_id", params.sales_id.as_deref());

    let sales = resolve_sales(&mut errors, sales.get_ref(), sales_id).await?;
    errors.into_result()?;

    let report = service
        .target_vs_revenue(&TargetVsRevenueQuery {
            sales_id,
            sales,
            year: Utc::now().year(),
        })
        .await?;

    Ok(ApiResponse::ok(report))
}

/// Revenue against target per sales agent for one month, defaulting to the
/// current month.
/// GET /reports/sales/performance-statistic
pub async fn performance_statistic(
    service: web::Data<ReportService>,
    params: web::Query<PerformanceParams>,
) -> Result<HttpResponse, AppError> {
    let mut errors = ValidationErrors::new();
    let month =
        validation::optional_int_between(&mut errors, "month", params.month.as_deref(), 1, 12);
    let is_underperform = validation::optional_bool(
        &mut errors,
        "is_underperform",
        params.is_underperform.as_deref(),
    );
    errors.into_result()?;

    let now = Utc::now();
    let report = service
        .performance_statistic(&PerformanceQuery {
            month: month.map(|value| value as u32).unwrap_or_else(|| now.month()),
            year: now.year(),
            is_underperform,
        })
        .await?;

    Ok(ApiResponse::ok(report))
}

/// Configure report routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/reports")
            .service(
                web::scope("/orders").route("/monthly-trend", web::get().to(monthly_trend)),
            )
            .service(
                web::scope("/sales")
                    .route(
                        "/target-vs-actual-revenue",
                        web::get().to(target_vs_revenue),
                    )
                    .route(
                        "/performance-statistic",
                        web::get().to(performance_statistic),
                    ),
            ),
    );
}
