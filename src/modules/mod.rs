pub mod customers;
pub mod orders;
pub mod reports;
pub mod sales;
