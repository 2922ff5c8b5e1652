// Domain model - the data shapes that flow over the event bus
//
// Products and basket lines are owned by the catalog controller, order
// fragments by the order controller. Views only ever see cloned snapshots.

mod order;
mod product;

pub use order::{ContactInfo, FormErrors, Order, OrderDetails, OrderItem, OrderTotal, PaymentMethod};
pub use product::{BasketLine, Product};
