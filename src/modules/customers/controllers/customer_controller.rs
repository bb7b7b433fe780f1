use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::core::pagination::PageRequest;
use crate::core::validation::{self, ValidationErrors};
use crate::core::{ApiResponse, AppError};
use crate::modules::customers::models::{CustomerChanges, NewCustomer};
use crate::modules::customers::repositories::CustomerRepository;
use crate::modules::customers::services::PhoneValidator;

/// Query parameters for listing customers
#[derive(Debug, Deserialize)]
pub struct IndexQuery {
    pub search: Option<String>,
    #[serde(rename = "perPage")]
    pub per_page: Option<String>,
    pub page: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StoreBody {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBody {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
}

fn validate_search(errors: &mut ValidationErrors, search: Option<&String>) -> Option<String> {
    let term = search?.trim().to_string();
    if term.is_empty() {
        return None;
    }

    if term.chars().count() < 3 {
        errors.add("search", "The search field must be at least 3 characters.");
        return None;
    }
    if term.chars().count() > 20 {
        errors.add(
            "search",
            "The search field must not be greater than 20 characters.",
        );
        return None;
    }

    Some(term)
}

fn parse_page_request(errors: &mut ValidationErrors, query: &IndexQuery) -> PageRequest {
    let per_page = validation::optional_int_min(errors, "perPage", query.per_page.as_deref(), 1);
    let page = validation::optional_int_min(errors, "page", query.page.as_deref(), 1);

    PageRequest::new(per_page, page)
}

async fn validate_phone(
    errors: &mut ValidationErrors,
    validator: &PhoneValidator,
    phone: &str,
) {
    if !validator.validate(phone).await {
        errors.add("phone", "The phone is not a valid phone number.");
    }
}

/// List customers
/// GET /customers
pub async fn index(
    repo: web::Data<dyn CustomerRepository>,
    query: web::Query<IndexQuery>,
) -> Result<HttpResponse, AppError> {
    let mut errors = ValidationErrors::new();
    let search = validate_search(&mut errors, query.search.as_ref());
    let page = parse_page_request(&mut errors, &query);
    errors.into_result()?;

    let customers = repo.index(search.as_deref(), page).await?;

    Ok(ApiResponse::ok(customers))
}

/// Create a new customer
/// POST /customers
pub async fn store(
    repo: web::Data<dyn CustomerRepository>,
    validator: web::Data<PhoneValidator>,
    body: web::Json<StoreBody>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();

    let mut errors = ValidationErrors::new();
    let name = body.name.filter(|v| !v.trim().is_empty());
    let address = body.address.filter(|v| !v.trim().is_empty());
    let phone = body.phone.filter(|v| !v.trim().is_empty());

    if name.is_none() {
        validation::required(&mut errors, "name");
    }
    if address.is_none() {
        validation::required(&mut errors, "address");
    }
    match &phone {
        None => validation::required(&mut errors, "phone"),
        Some(phone) => validate_phone(&mut errors, &validator, phone).await,
    }
    errors.into_result()?;

    let customer = repo
        .store(NewCustomer {
            name: name.unwrap_or_default(),
            address: address.unwrap_or_default(),
            phone: phone.unwrap_or_default(),
        })
        .await?;

    Ok(ApiResponse::created(customer, "Customer created successfully"))
}

/// Get customer by ID
/// GET /customers/{id}
pub async fn show(
    repo: web::Data<dyn CustomerRepository>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let customer = repo
        .show(path.into_inner())
        .await?
        .ok_or_else(|| AppError::not_found("Customer not found"))?;

    Ok(ApiResponse::ok(customer))
}

/// Update customer by ID
/// PUT /customers/{id}
pub async fn update(
    repo: web::Data<dyn CustomerRepository>,
    validator: web::Data<PhoneValidator>,
    path: web::Path<i64>,
    body: web::Json<UpdateBody>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();

    let mut errors = ValidationErrors::new();
    if let Some(phone) = body.phone.as_deref().filter(|v| !v.trim().is_empty()) {
        validate_phone(&mut errors, &validator, phone).await;
    }
    errors.into_result()?;

    let changes = CustomerChanges {
        name: body.name,
        address: body.address,
        phone: body.phone,
    };

    let customer = repo
        .update(path.into_inner(), changes)
        .await?
        .ok_or_else(|| AppError::not_found("Customer not found"))?;

    Ok(ApiResponse::ok_with_message(
        customer,
        "Customer updated successfully",
    ))
}

/// Delete customer by ID
/// DELETE /customers/{id}
pub async fn destroy(
    repo: web::Data<dyn CustomerRepository>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let deleted = repo.delete(path.into_inner()).await?;
    if !deleted {
        return Err(AppError::not_found("Customer not found"));
    }

    Ok(crate::core::response::no_content())
}

/// Configure customer routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/customers")
            .route("", web::get().to(index))
            .route("", web::post().to(store))
            .route("/{id}", web::get().to(show))
            .route("/{id}", web::put().to(update))
            .route("/{id}", web::delete().to(destroy)),
    );
}
