mod sales;
mod sales_target;

pub use sales::{Sales, SalesArea, SalesDisplay};
pub use sales_target::SalesTarget;
