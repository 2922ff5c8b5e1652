// Order controller - owns the checkout session fragments
//
// `OrderDetails` and `ContactInfo` arrive independently (order:init from the
// basket's checkout gesture, order:submit from the form). Once both are
// present the candidate order is assembled from them plus the latest basket
// snapshot, and held. Nothing is dispatched at that point: downstream
// reactions (clearing the basket, a confirmation dialog) would hang off a
// new terminal event here, which is the extension point.
//
// Contact submitted before details is tolerated: the contact is stored but
// no order forms until details arrive. Session state is left stale after
// assembly; the next order:init overwrites the details and the candidate is
// recomputed from whatever fragments are present.

use crate::bus::EventBus;
use crate::events::{AppEvent, EventKind};
use crate::model::{BasketLine, ContactInfo, Order, OrderDetails};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Default)]
struct OrderState {
    details: Option<OrderDetails>,
    contact: Option<ContactInfo>,
    /// Latest basket snapshot, for the assembled order's items and total.
    lines: Vec<BasketLine>,
    candidate: Option<Order>,
}

impl OrderState {
    fn try_assemble(&mut self) {
        if let (Some(details), Some(contact)) = (&self.details, &self.contact) {
            let order = Order::assemble(details, contact, &self.lines);
            tracing::info!(
                items = order.items.len(),
                total = %order.total,
                "order assembled; holding"
            );
            self.candidate = Some(order);
        }
    }
}

#[derive(Default)]
pub struct OrderController {
    state: Rc<RefCell<OrderState>>,
}

impl OrderController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wire this controller's handlers onto the bus.
    pub fn attach(&self, bus: &Rc<EventBus>) {
        {
            let state = Rc::clone(&self.state);
            bus.subscribe(
                EventKind::OrderInitiated,
                Rc::new(move |event| {
                    let AppEvent::OrderInitiated(details) = event else {
                        return;
                    };
                    let mut state = state.borrow_mut();
                    state.details = Some(details.clone());
                    state.try_assemble();
                }),
            );
        }
        {
            let state = Rc::clone(&self.state);
            bus.subscribe(
                EventKind::OrderSubmitted,
                Rc::new(move |event| {
                    let AppEvent::OrderSubmitted(contact) = event else {
                        return;
                    };
                    let mut state = state.borrow_mut();
                    state.contact = Some(contact.clone());
                    state.try_assemble();
                }),
            );
        }
        {
            let state = Rc::clone(&self.state);
            bus.subscribe(
                EventKind::BasketChanged,
                Rc::new(move |event| {
                    let AppEvent::BasketChanged(lines) = event else {
                        return;
                    };
                    state.borrow_mut().lines = lines.clone();
                }),
            );
        }
    }

    /// Details recorded for the active checkout session, if any.
    pub fn details(&self) -> Option<OrderDetails> {
        self.state.borrow().details.clone()
    }

    /// The assembled order, if both fragments have been recorded.
    pub fn candidate(&self) -> Option<Order> {
        self.state.borrow().candidate.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{OrderTotal, PaymentMethod, Product};

    fn rig() -> (Rc<EventBus>, OrderController) {
        let bus = Rc::new(EventBus::new());
        let orders = OrderController::new();
        orders.attach(&bus);
        (bus, orders)
    }

    fn line(id: &str, price: &str, count: u32) -> BasketLine {
        BasketLine {
            product: Product {
                id: id.to_string(),
                title: id.to_uppercase(),
                price: Some(price.parse().unwrap()),
                ..Product::default()
            },
            item_count: count,
        }
    }

    #[test]
    fn init_then_submit_holds_the_union_of_both_payloads() {
        let (bus, orders) = rig();

        bus.dispatch(AppEvent::BasketChanged(vec![line("p1", "10", 2)]));
        bus.dispatch(AppEvent::OrderInitiated(OrderDetails {
            payment: PaymentMethod::Cash,
            address: "Main St".to_string(),
        }));
        assert!(orders.candidate().is_none());

        bus.dispatch(AppEvent::OrderSubmitted(ContactInfo {
            email: "a@b.com".to_string(),
            phone: "123".to_string(),
        }));

        let order = orders.candidate().expect("both fragments present");
        assert_eq!(order.payment, PaymentMethod::Cash);
        assert_eq!(order.address, "Main St");
        assert_eq!(order.email, "a@b.com");
        assert_eq!(order.phone, "123");
        assert_eq!(order.total, OrderTotal::Amount("20".parse().unwrap()));
        assert_eq!(order.items.len(), 1);
    }

    #[test]
    fn contact_before_details_is_stored_but_forms_no_order() {
        let (bus, orders) = rig();

        bus.dispatch(AppEvent::OrderSubmitted(ContactInfo {
            email: "early@b.com".to_string(),
            phone: "7".to_string(),
        }));
        assert!(orders.candidate().is_none());

        // Details arriving later completes the pair with the stored contact.
        bus.dispatch(AppEvent::OrderInitiated(OrderDetails::default()));
        assert_eq!(orders.candidate().unwrap().email, "early@b.com");
    }

    #[test]
    fn candidate_total_is_unavailable_with_an_unpriced_line() {
        let (bus, orders) = rig();

        let unpriced = BasketLine::new(Product {
            id: "free".to_string(),
            ..Product::default()
        });
        bus.dispatch(AppEvent::BasketChanged(vec![line("p1", "10", 1), unpriced]));
        bus.dispatch(AppEvent::OrderInitiated(OrderDetails::default()));
        bus.dispatch(AppEvent::OrderSubmitted(ContactInfo::default()));

        assert_eq!(orders.candidate().unwrap().total, OrderTotal::Unavailable);
    }

    #[test]
    fn next_init_overwrites_details_and_reassembles() {
        let (bus, orders) = rig();

        bus.dispatch(AppEvent::OrderInitiated(OrderDetails {
            payment: PaymentMethod::Card,
            address: "Old Rd".to_string(),
        }));
        bus.dispatch(AppEvent::OrderSubmitted(ContactInfo::default()));
        assert_eq!(orders.candidate().unwrap().address, "Old Rd");

        bus.dispatch(AppEvent::OrderInitiated(OrderDetails {
            payment: PaymentMethod::Cash,
            address: "New Rd".to_string(),
        }));
        // Stale contact from the previous session is reused by design.
        let order = orders.candidate().unwrap();
        assert_eq!(order.address, "New Rd");
        assert_eq!(order.payment, PaymentMethod::Cash);
    }
}
