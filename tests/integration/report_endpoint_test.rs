// Endpoint-level tests for the report routes: parameter validation maps to
// 422 envelopes before any data access happens, and valid requests produce
// the documented payload shapes.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use actix_web::{test, web, App};
use async_trait::async_trait;
use chrono::{Datelike, TimeZone, Utc};
use rust_decimal_macros::dec;

use salesdesk::core::cache::MemoryCache;
use salesdesk::core::pagination::{Page, PageRequest};
use salesdesk::core::Result;
use salesdesk::modules::customers::models::{Customer, CustomerChanges, NewCustomer};
use salesdesk::modules::customers::repositories::CustomerRepository;
use salesdesk::modules::reports;
use salesdesk::modules::reports::repositories::{
    OrderLineRecord, OrderRecord, OrderReportFilter, ReportStore, TargetRecord,
    TargetReportFilter,
};
use salesdesk::modules::reports::services::ReportService;
use salesdesk::modules::sales::models::SalesDisplay;
use salesdesk::modules::sales::repositories::SalesRepository;

struct CountingStore {
    orders: Vec<OrderRecord>,
    reads: AtomicUsize,
}

#[async_trait]
impl ReportStore for CountingStore {
    async fn orders_with_lines(&self, _filter: &OrderReportFilter) -> Result<Vec<OrderRecord>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.orders.clone())
    }

    async fn targets(&self, _filter: &TargetReportFilter) -> Result<Vec<TargetRecord>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(Vec::new())
    }
}

struct FakeSalesRepository {
    known: HashMap<i64, String>,
}

#[async_trait]
impl SalesRepository for FakeSalesRepository {
    async fn find_display(&self, id: i64) -> Result<Option<SalesDisplay>> {
        Ok(self
            .known
            .get(&id)
            .map(|name| SalesDisplay { id, name: name.clone() }))
    }
}

struct FakeCustomerRepository {
    known: HashMap<i64, String>,
}

impl FakeCustomerRepository {
    fn customer(&self, id: i64, name: &str) -> Customer {
        Customer {
            id,
            name: name.to_string(),
            address: "Jl. Merdeka No. 1".to_string(),
            phone: "081234567890".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }
}

#[async_trait]
impl CustomerRepository for FakeCustomerRepository {
    async fn index(&self, _search: Option<&str>, page: PageRequest) -> Result<Page<Customer>> {
        Ok(Page::from_rows(Vec::new(), page))
    }

    async fn show(&self, id: i64) -> Result<Option<Customer>> {
        Ok(self.known.get(&id).map(|name| self.customer(id, name)))
    }

    async fn store(&self, data: NewCustomer) -> Result<Customer> {
        Ok(self.customer(1, &data.name))
    }

    async fn update(&self, _id: i64, _data: CustomerChanges) -> Result<Option<Customer>> {
        Ok(None)
    }

    async fn delete(&self, _id: i64) -> Result<bool> {
        Ok(false)
    }
}

struct Fixture {
    store: Arc<CountingStore>,
    customers: Arc<dyn CustomerRepository>,
    sales: Arc<dyn SalesRepository>,
    service: web::Data<ReportService>,
}

fn fixture() -> Fixture {
    let now = Utc::now();
    let orders = vec![OrderRecord {
        id: 1,
        customer_id: 1,
        sales_id: 1,
        sales_name: "Jane Agent".to_string(),
        created_at: Utc
            .with_ymd_and_hms(now.year(), now.month(), 1, 9, 0, 0)
            .unwrap(),
        lines: vec![OrderLineRecord {
            quantity: 2,
            selling_price: dec!(75.00),
            production_price: dec!(50.00),
        }],
    }];

    let store = Arc::new(CountingStore {
        orders,
        reads: AtomicUsize::new(0),
    });

    let service = web::Data::new(ReportService::new(
        store.clone(),
        Arc::new(MemoryCache::new()),
        Duration::from_secs(60),
    ));

    let customers: Arc<dyn CustomerRepository> = Arc::new(FakeCustomerRepository {
        known: HashMap::from([(1, "Budi".to_string())]),
    });
    let sales: Arc<dyn SalesRepository> = Arc::new(FakeSalesRepository {
        known: HashMap::from([(1, "Jane Agent".to_string())]),
    });

    Fixture {
        store,
        customers,
        sales,
        service,
    }
}

macro_rules! init_app {
    ($fixture:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::from($fixture.customers.clone()))
                .app_data(web::Data::from($fixture.sales.clone()))
                .app_data($fixture.service.clone())
                .service(web::scope("/api/v1").configure(reports::controllers::configure)),
        )
        .await
    };
}

#[actix_web::test]
async fn month_out_of_range_is_rejected_before_any_data_access() {
    let fixture = fixture();
    let app = init_app!(fixture);

    let req = test::TestRequest::get()
        .uri("/api/v1/reports/sales/performance-statistic?month=13")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 422);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(
        body["errors"]["month"][0],
        "The month field must be between 1 and 12."
    );
    assert_eq!(
        fixture.store.reads.load(Ordering::SeqCst),
        0,
        "validation failures must not reach the store"
    );
}

#[actix_web::test]
async fn multiple_validation_failures_are_reported_together() {
    let fixture = fixture();
    let app = init_app!(fixture);

    let req = test::TestRequest::get()
        .uri("/api/v1/reports/sales/performance-statistic?month=13&is_underperform=invalid")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 422);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(
        body["errors"]["month"][0],
        "The month field must be between 1 and 12."
    );
    assert_eq!(
        body["errors"]["is_underperform"][0],
        "The selected is underperform is invalid."
    );
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("(and 1 more error)"));
}

#[actix_web::test]
async fn unknown_sales_filter_is_invalid() {
    let fixture = fixture();
    let app = init_app!(fixture);

    let req = test::TestRequest::get()
        .uri("/api/v1/reports/sales/target-vs-actual-revenue?sales_id=999999")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 422);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "The selected sales id is invalid.");
    assert_eq!(body["errors"]["sales_id"][0], "The selected sales id is invalid.");
}

#[actix_web::test]
async fn unknown_customer_filter_is_invalid() {
    let fixture = fixture();
    let app = init_app!(fixture);

    let req = test::TestRequest::get()
        .uri("/api/v1/reports/orders/monthly-trend?customer_id=999999")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 422);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(
        body["errors"]["customer_id"][0],
        "The selected customer id is invalid."
    );
}

#[actix_web::test]
async fn monthly_trend_resolves_names_and_returns_three_years() {
    let fixture = fixture();
    let app = init_app!(fixture);

    let req = test::TestRequest::get()
        .uri("/api/v1/reports/orders/monthly-trend?customer_id=1&sales_id=1")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["customer"], "Budi");
    assert_eq!(body["data"]["sales"], "Jane Agent");

    let items = body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 3);
    for year in items {
        let data = year["data"].as_array().unwrap();
        assert_eq!(data.len(), 12);
        assert_eq!(data[0]["x"], "Jan");
        assert_eq!(data[11]["x"], "Dec");
    }
}

#[actix_web::test]
async fn target_vs_revenue_returns_the_three_fixed_series() {
    let fixture = fixture();
    let app = init_app!(fixture);

    let req = test::TestRequest::get()
        .uri("/api/v1/reports/sales/target-vs-actual-revenue")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["year"], Utc::now().year());
    assert_eq!(body["data"]["sales"], serde_json::Value::Null);

    let names: Vec<&str> = body["data"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Target", "Revenue", "Income"]);
}

#[actix_web::test]
async fn performance_statistic_defaults_to_the_current_month() {
    let fixture = fixture();
    let app = init_app!(fixture);

    let req = test::TestRequest::get()
        .uri("/api/v1/reports/sales/performance-statistic")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["is_underperform"], serde_json::Value::Null);
    assert_eq!(
        body["data"]["month"],
        Utc::now().format("%B %Y").to_string()
    );

    let items = body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["sales"], "Jane Agent");
    assert_eq!(items[0]["revenue"]["amount"], "150.00");
    // No target this month: percentage is defined as zero.
    assert_eq!(items[0]["percentage"], "0.00");
}
