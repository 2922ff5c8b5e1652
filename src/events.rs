// Typed event catalog - the bus's fixed vocabulary
//
// Every cross-component signal in the application is one of these variants,
// and every variant carries exactly one payload shape. Views publish the
// intent events (added/removed/viewed, initiated/submitted); controllers
// publish the derived `BasketChanged` snapshot. Using an enum keeps the
// catalog closed: there is no way to dispatch an event with the wrong
// payload attached.

use crate::model::{BasketLine, ContactInfo, OrderDetails, Product};

/// Main event type that flows over the bus.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// A card asked for the product to be put in the basket.
    ProductAdded(Product),
    /// A card or basket row asked for the product to be dropped entirely.
    ProductRemoved(Product),
    /// A card was opened for preview.
    ProductViewed(Product),
    /// The authoritative basket changed; payload is the full snapshot.
    BasketChanged(Vec<BasketLine>),
    /// Checkout started; payload is the session's initial details.
    OrderInitiated(OrderDetails),
    /// The checkout form was submitted. Carries contact fields only; the
    /// address and payment fields are collected by the form but not included
    /// here (known gap in the submit payload, kept as-is).
    OrderSubmitted(ContactInfo),
    /// The shared modal was dismissed. No payload.
    ModalClosed,
}

/// Discriminant used as the subscription key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    ProductAdded,
    ProductRemoved,
    ProductViewed,
    BasketChanged,
    OrderInitiated,
    OrderSubmitted,
    ModalClosed,
}

impl AppEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            AppEvent::ProductAdded(_) => EventKind::ProductAdded,
            AppEvent::ProductRemoved(_) => EventKind::ProductRemoved,
            AppEvent::ProductViewed(_) => EventKind::ProductViewed,
            AppEvent::BasketChanged(_) => EventKind::BasketChanged,
            AppEvent::OrderInitiated(_) => EventKind::OrderInitiated,
            AppEvent::OrderSubmitted(_) => EventKind::OrderSubmitted,
            AppEvent::ModalClosed => EventKind::ModalClosed,
        }
    }
}

impl EventKind {
    /// Stable name used in log lines.
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::ProductAdded => "product:add",
            EventKind::ProductRemoved => "product:remove",
            EventKind::ProductViewed => "product:view",
            EventKind::BasketChanged => "basket:update",
            EventKind::OrderInitiated => "order:init",
            EventKind::OrderSubmitted => "order:submit",
            EventKind::ModalClosed => "modal:close",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Product;

    #[test]
    fn kind_matches_variant() {
        let product = Product::default();
        assert_eq!(
            AppEvent::ProductAdded(product).kind(),
            EventKind::ProductAdded
        );
        assert_eq!(
            AppEvent::BasketChanged(Vec::new()).kind(),
            EventKind::BasketChanged
        );
        assert_eq!(AppEvent::ModalClosed.kind(), EventKind::ModalClosed);
        assert_eq!(EventKind::ProductAdded.name(), "product:add");
    }
}
