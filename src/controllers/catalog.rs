// Catalog controller - owns the product list and the authoritative basket
//
// The basket invariant: at most one line per product identity, with
// `item_count` tracking repeat adds. Removal deletes the line entirely
// (the card button is a toggle, not a quantity editor). Every mutation
// republishes the full snapshot as `BasketChanged`.

use crate::bus::EventBus;
use crate::events::{AppEvent, EventKind};
use crate::model::{BasketLine, Product};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Default)]
struct CatalogState {
    products: Vec<Product>,
    basket: Vec<BasketLine>,
}

pub struct CatalogController {
    state: Rc<RefCell<CatalogState>>,
}

impl CatalogController {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            state: Rc::new(RefCell::new(CatalogState {
                products,
                basket: Vec::new(),
            })),
        }
    }

    /// Wire this controller's handlers onto the bus.
    pub fn attach(&self, bus: &Rc<EventBus>) {
        // product:add - increment an existing line or append a new one,
        // then publish the snapshot.
        {
            let state = Rc::clone(&self.state);
            let bus_handle = Rc::clone(bus);
            bus.subscribe(
                EventKind::ProductAdded,
                Rc::new(move |event| {
                    let AppEvent::ProductAdded(product) = event else {
                        return;
                    };
                    let snapshot = {
                        let mut state = state.borrow_mut();
                        match state
                            .basket
                            .iter_mut()
                            .find(|line| line.product.id == product.id)
                        {
                            Some(line) => line.item_count += 1,
                            None => state.basket.push(BasketLine::new(product.clone())),
                        }
                        state.basket.clone()
                        // borrow released here; the nested dispatch below
                        // re-enters this controller's BasketChanged handler
                    };
                    tracing::debug!(product = %product.id, "basket add");
                    bus_handle.dispatch(AppEvent::BasketChanged(snapshot));
                }),
            );
        }

        // product:remove - delete the line entirely. Removing a product
        // that is not in the basket is a silent no-op, but still publishes
        // the (unchanged) snapshot.
        {
            let state = Rc::clone(&self.state);
            let bus_handle = Rc::clone(bus);
            bus.subscribe(
                EventKind::ProductRemoved,
                Rc::new(move |event| {
                    let AppEvent::ProductRemoved(product) = event else {
                        return;
                    };
                    let snapshot = {
                        let mut state = state.borrow_mut();
                        state.basket.retain(|line| line.product.id != product.id);
                        state.basket.clone()
                    };
                    tracing::debug!(product = %product.id, "basket remove");
                    bus_handle.dispatch(AppEvent::BasketChanged(snapshot));
                }),
            );
        }

        // basket:update received - accept an externally reconciled snapshot
        // by overwriting internal state. Never re-publish from here: this
        // controller is also the producer of BasketChanged, and echoing the
        // event back out would loop forever.
        {
            let state = Rc::clone(&self.state);
            bus.subscribe(
                EventKind::BasketChanged,
                Rc::new(move |event| {
                    let AppEvent::BasketChanged(lines) = event else {
                        return;
                    };
                    state.borrow_mut().basket = lines.clone();
                }),
            );
        }

        // order:init and product:view - observe only, no state transition.
        bus.subscribe(
            EventKind::OrderInitiated,
            Rc::new(|event| {
                if let AppEvent::OrderInitiated(details) = event {
                    tracing::debug!(payment = details.payment.label(), "checkout opened");
                }
            }),
        );
        bus.subscribe(
            EventKind::ProductViewed,
            Rc::new(|event| {
                if let AppEvent::ProductViewed(product) = event {
                    tracing::debug!(product = %product.id, "card previewed");
                }
            }),
        );
    }

    /// Snapshot of the immutable product list.
    pub fn products(&self) -> Vec<Product> {
        self.state.borrow().products.clone()
    }

    /// Read-only snapshot of the current basket.
    pub fn basket(&self) -> Vec<BasketLine> {
        self.state.borrow().basket.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str) -> Product {
        Product {
            id: id.to_string(),
            title: id.to_uppercase(),
            price: Some("10".parse().unwrap()),
            ..Product::default()
        }
    }

    /// Bus with an attached catalog and a recorder of BasketChanged payloads.
    fn rig(products: Vec<Product>) -> (Rc<EventBus>, CatalogController, Rc<RefCell<Vec<Vec<BasketLine>>>>) {
        let bus = Rc::new(EventBus::new());
        let catalog = CatalogController::new(products);
        catalog.attach(&bus);

        let published = Rc::new(RefCell::new(Vec::new()));
        {
            let published = Rc::clone(&published);
            bus.subscribe(
                EventKind::BasketChanged,
                Rc::new(move |event| {
                    if let AppEvent::BasketChanged(lines) = event {
                        published.borrow_mut().push(lines.clone());
                    }
                }),
            );
        }
        (bus, catalog, published)
    }

    #[test]
    fn repeat_adds_accumulate_on_a_single_line() {
        let (bus, catalog, _) = rig(vec![product("p1")]);

        for _ in 0..3 {
            bus.dispatch(AppEvent::ProductAdded(product("p1")));
        }

        let basket = catalog.basket();
        assert_eq!(basket.len(), 1);
        assert_eq!(basket[0].product.id, "p1");
        assert_eq!(basket[0].item_count, 3);
    }

    #[test]
    fn add_twice_then_remove_publishes_expected_snapshots() {
        let (bus, _, published) = rig(vec![product("p1")]);

        bus.dispatch(AppEvent::ProductAdded(product("p1")));
        bus.dispatch(AppEvent::ProductAdded(product("p1")));
        {
            let published = published.borrow();
            let last = published.last().unwrap();
            assert_eq!(last.len(), 1);
            assert_eq!(last[0].product.id, "p1");
            assert_eq!(last[0].item_count, 2);
        }

        bus.dispatch(AppEvent::ProductRemoved(product("p1")));
        assert!(published.borrow().last().unwrap().is_empty());
    }

    #[test]
    fn removing_an_absent_product_leaves_the_basket_unchanged() {
        let (bus, catalog, _) = rig(vec![product("p1"), product("p2")]);

        bus.dispatch(AppEvent::ProductAdded(product("p1")));
        bus.dispatch(AppEvent::ProductAdded(product("p2")));
        let before = catalog.basket();

        bus.dispatch(AppEvent::ProductRemoved(product("ghost")));
        assert_eq!(catalog.basket(), before);
    }

    #[test]
    fn removal_deletes_the_line_and_preserves_order_of_the_rest() {
        let (bus, catalog, _) = rig(vec![product("p1"), product("p2"), product("p3")]);

        for id in ["p1", "p2", "p3"] {
            bus.dispatch(AppEvent::ProductAdded(product(id)));
        }
        bus.dispatch(AppEvent::ProductRemoved(product("p2")));

        let ids: Vec<_> = catalog
            .basket()
            .iter()
            .map(|line| line.product.id.clone())
            .collect();
        assert_eq!(ids, vec!["p1", "p3"]);
    }

    #[test]
    fn external_snapshot_overwrites_without_republishing() {
        let (bus, catalog, published) = rig(vec![product("p1")]);

        let restored = vec![BasketLine {
            product: product("p9"),
            item_count: 4,
        }];
        bus.dispatch(AppEvent::BasketChanged(restored.clone()));

        assert_eq!(catalog.basket(), restored);
        // Only the external dispatch itself was observed; the controller
        // did not echo a second BasketChanged.
        assert_eq!(published.borrow().len(), 1);
    }
}
