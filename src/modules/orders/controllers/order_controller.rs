use std::collections::HashSet;

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::core::pagination::PageRequest;
use crate::core::validation::{self, ValidationErrors};
use crate::core::{ApiResponse, AppError};
use crate::modules::customers::repositories::CustomerRepository;
use crate::modules::orders::models::{NewOrder, NewOrderItem, OrderChanges};
use crate::modules::orders::repositories::{OrderIndexFilter, OrderRepository};
use crate::modules::sales::repositories::SalesRepository;

/// Query parameters for listing orders
#[derive(Debug, Deserialize)]
pub struct IndexQuery {
    pub reference_no: Option<String>,
    pub sales_id: Option<String>,
    pub customer_id: Option<String>,
    #[serde(rename = "perPage")]
    pub per_page: Option<String>,
    pub page: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ItemBody {
    pub product_id: Option<i64>,
    pub quantity: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct StoreBody {
    pub reference_no: Option<String>,
    pub sales_id: Option<i64>,
    pub customer_id: Option<i64>,
    pub items: Option<Vec<ItemBody>>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBody {
    pub reference_no: Option<String>,
    pub sales_id: Option<i64>,
    pub customer_id: Option<i64>,
    pub items: Option<Vec<ItemBody>>,
}

async fn check_customer_exists(
    errors: &mut ValidationErrors,
    customers: &dyn CustomerRepository,
    id: i64,
) -> Result<(), AppError> {
    if customers.show(id).await?.is_none() {
        validation::invalid_selection(errors, "customer_id");
    }
    Ok(())
}

async fn check_sales_exists(
    errors: &mut ValidationErrors,
    sales: &dyn SalesRepository,
    id: i64,
) -> Result<(), AppError> {
    if sales.find_display(id).await?.is_none() {
        validation::invalid_selection(errors, "sales_id");
    }
    Ok(())
}

/// Validate order items: quantities at least 1, every product known.
async fn validate_items(
    errors: &mut ValidationErrors,
    orders: &dyn OrderRepository,
    items: &[ItemBody],
) -> Result<Vec<NewOrderItem>, AppError> {
    let mut validated = Vec::with_capacity(items.len());

    let requested: Vec<i64> = items.iter().filter_map(|item| item.product_id).collect();
    let known: HashSet<i64> = orders
        .find_products(&requested)
        .await?
        .into_iter()
        .map(|product| product.id)
        .collect();

    for (index, item) in items.iter().enumerate() {
        match item.product_id {
            None => errors.add(
                format!("items.{index}.product_id"),
                format!("The items.{index}.product_id field is required."),
            ),
            Some(product_id) if !known.contains(&product_id) => errors.add(
                format!("items.{index}.product_id"),
                format!("The selected items.{index}.product_id is invalid."),
            ),
            Some(_) => {}
        }

        match item.quantity {
            None => errors.add(
                format!("items.{index}.quantity"),
                format!("The items.{index}.quantity field is required."),
            ),
            Some(quantity) if quantity < 1 => errors.add(
                format!("items.{index}.quantity"),
                format!("The items.{index}.quantity field must be at least 1."),
            ),
            Some(quantity) => {
                if let Some(product_id) = item.product_id {
                    validated.push(NewOrderItem {
                        product_id,
                        quantity: quantity as i32,
                    });
                }
            }
        }
    }

    Ok(validated)
}

/// List orders
/// GET /orders
pub async fn index(
    orders: web::Data<dyn OrderRepository>,
    query: web::Query<IndexQuery>,
) -> Result<HttpResponse, AppError> {
    let mut errors = ValidationErrors::new();
    let sales_id = validation::optional_int(&mut errors, "sales_id", query.sales_id.as_deref());
    let customer_id =
        validation::optional_int(&mut errors, "customer_id", query.customer_id.as_deref());
    let per_page =
        validation::optional_int_min(&mut errors, "perPage", query.per_page.as_deref(), 1);
    let page = validation::optional_int_min(&mut errors, "page", query.page.as_deref(), 1);
    errors.into_result()?;

    let filter = OrderIndexFilter {
        reference_no: query
            .reference_no
            .clone()
            .filter(|value| !value.trim().is_empty()),
        sales_id,
        customer_id,
    };

    let result = orders.index(&filter, PageRequest::new(per_page, page)).await?;

    Ok(ApiResponse::ok(result))
}

/// Create a new order
/// POST /orders
pub async fn store(
    orders: web::Data<dyn OrderRepository>,
    customers: web::Data<dyn CustomerRepository>,
    sales: web::Data<dyn SalesRepository>,
    body: web::Json<StoreBody>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let mut errors = ValidationErrors::new();

    let reference_no = body.reference_no.filter(|v| !v.trim().is_empty());
    match &reference_no {
        None => validation::required(&mut errors, "reference_no"),
        Some(value) if value.chars().count() > 255 => errors.add(
            "reference_no",
            "The reference no field must not be greater than 255 characters.",
        ),
        Some(_) => {}
    }

    match body.customer_id {
        None => validation::required(&mut errors, "customer_id"),
        Some(id) => check_customer_exists(&mut errors, customers.get_ref(), id).await?,
    }
    match body.sales_id {
        None => validation::required(&mut errors, "sales_id"),
        Some(id) => check_sales_exists(&mut errors, sales.get_ref(), id).await?,
    }

    let items = match &body.items {
        None => {
            validation::required(&mut errors, "items");
            Vec::new()
        }
        Some(items) => validate_items(&mut errors, orders.get_ref(), items).await?,
    };

    errors.into_result()?;

    let order = orders
        .store(NewOrder {
            reference_no: reference_no.unwrap_or_default(),
            customer_id: body.customer_id.unwrap_or_default(),
            sales_id: body.sales_id.unwrap_or_default(),
            items,
        })
        .await?;

    Ok(ApiResponse::created(order, "Order created successfully"))
}

/// Get order by ID
/// GET /orders/{id}
pub async fn show(
    orders: web::Data<dyn OrderRepository>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let order = orders
        .show(path.into_inner())
        .await?
        .ok_or_else(|| AppError::not_found("Order not found"))?;

    Ok(ApiResponse::ok(order))
}

/// Update order by ID
/// PUT /orders/{id}
pub async fn update(
    orders: web::Data<dyn OrderRepository>,
    customers: web::Data<dyn CustomerRepository>,
    sales: web::Data<dyn SalesRepository>,
    path: web::Path<i64>,
    body: web::Json<UpdateBody>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let mut errors = ValidationErrors::new();

    if let Some(id) = body.customer_id {
        check_customer_exists(&mut errors, customers.get_ref(), id).await?;
    }
    if let Some(id) = body.sales_id {
        check_sales_exists(&mut errors, sales.get_ref(), id).await?;
    }

    let items = match &body.items {
        None => None,
        Some(items) => {
            Some(validate_items(&mut errors, orders.get_ref(), items).await?)
        }
    };

    errors.into_result()?;

    let changes = OrderChanges {
        reference_no: body.reference_no.filter(|v| !v.trim().is_empty()),
        customer_id: body.customer_id,
        sales_id: body.sales_id,
        items,
    };

    let order = orders
        .update(path.into_inner(), changes)
        .await?
        .ok_or_else(|| AppError::not_found("Order not found"))?;

    Ok(ApiResponse::ok_with_message(order, "Order updated successfully"))
}

/// Delete order by ID
/// DELETE /orders/{id}
pub async fn destroy(
    orders: web::Data<dyn OrderRepository>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let deleted = orders.delete(path.into_inner()).await?;
    if !deleted {
        return Err(AppError::not_found("Order not found"));
    }

    Ok(crate::core::response::no_content())
}

/// Configure order routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/orders")
            .route("", web::get().to(index))
            .route("", web::post().to(store))
            .route("/{id}", web::get().to(show))
            .route("/{id}", web::put().to(update))
            .route("/{id}", web::delete().to(destroy)),
    );
}
