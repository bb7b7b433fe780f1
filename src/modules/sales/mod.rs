// Sales agents, their areas and their monthly targets. Agents are managed
// elsewhere; this module only reads them for order assignment, report
// filters and display-name resolution.

pub mod models;
pub mod repositories;

pub use models::{Sales, SalesArea, SalesDisplay, SalesTarget};
pub use repositories::{MySqlSalesRepository, SalesRepository};
