// Orders module

pub mod controllers;
pub mod models;
pub mod repositories;

pub use models::{Order, OrderDetail, OrderItem, Product};
pub use repositories::{MySqlOrderRepository, OrderRepository};
