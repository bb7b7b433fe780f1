mod order;
mod product;

pub use order::{
    NewOrder, NewOrderItem, Order, OrderChanges, OrderDetail, OrderDetailItem, OrderItem,
    OrderParty,
};
pub use product::Product;
