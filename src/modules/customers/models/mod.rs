mod customer;

pub use customer::{Customer, CustomerChanges, NewCustomer};
