// Storefront shell - wiring and key routing
//
// The bootstrap role of the host page: register anchors, mount views,
// attach controllers, and wire the view-side bus subscriptions. After
// construction no component holds a reference to any other except the bus
// (and the shell's own modal handle); everything below flows as
// gesture -> event -> controller -> derived event -> view update.
//
// Key routing is layered, modal first, then the focused view, then shell
// navigation. Outcomes returned by a view are executed only after the
// view's borrow is released: a published event may re-enter the same view
// through its subscription, and a held RefCell borrow there would panic.

use crate::bus::EventBus;
use crate::controllers::{CatalogController, OrderController};
use crate::events::{AppEvent, EventKind};
use crate::model::Product;
use crate::tui::page::Page;
use crate::tui::theme::Theme;
use crate::tui::view::{InputSink, Outcome, ViewHost};
use crate::tui::views::{
    BasketPatch, BasketView, CardPatch, CardState, CardView, ModalView, OrderFormPatch,
    OrderFormView,
};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::text::Text;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Which panel receives key input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Card(usize),
    Basket,
    OrderForm,
}

fn card_anchor(index: usize) -> String {
    format!("card-{index}")
}

pub struct Storefront {
    bus: Rc<EventBus>,
    page: Page,
    pub catalog: CatalogController,
    pub orders: OrderController,
    cards: Vec<Rc<RefCell<ViewHost<CardView>>>>,
    basket: Rc<RefCell<ViewHost<BasketView>>>,
    order_form: Rc<RefCell<ViewHost<OrderFormView>>>,
    modal: Rc<RefCell<ViewHost<ModalView>>>,
    /// Fed by its own BasketChanged subscription; read by the header.
    item_count: Rc<Cell<u32>>,
    pub focus: Focus,
    /// Last focused card, restored when focus cycles back to the gallery.
    gallery_index: usize,
    pub should_quit: bool,
    pub theme: Theme,
}

impl Storefront {
    pub fn new(products: Vec<Product>, theme: Theme) -> Result<Self> {
        let bus = Rc::new(EventBus::new());
        let page = Page::new();

        for index in 0..products.len() {
            page.register(&card_anchor(index));
        }
        page.register("basket");
        page.register("order");
        page.register("modal");

        let catalog = CatalogController::new(products);
        catalog.attach(&bus);
        let orders = OrderController::new();
        orders.attach(&bus);

        let mut cards = Vec::new();
        for (index, product) in catalog.products().into_iter().enumerate() {
            let host = ViewHost::mount_with(
                &page,
                &card_anchor(index),
                CardView,
                CardState {
                    product: product.clone(),
                    in_basket: false,
                },
            )?;
            let host = Rc::new(RefCell::new(host));
            {
                let host = Rc::clone(&host);
                let product_id = product.id.clone();
                bus.subscribe(
                    EventKind::BasketChanged,
                    Rc::new(move |event| {
                        let AppEvent::BasketChanged(lines) = event else {
                            return;
                        };
                        let in_basket = lines.iter().any(|line| line.product.id == product_id);
                        host.borrow_mut().update(CardPatch {
                            in_basket: Some(in_basket),
                            ..CardPatch::default()
                        });
                    }),
                );
            }
            cards.push(host);
        }

        let basket = Rc::new(RefCell::new(ViewHost::mount(&page, "basket", BasketView)?));
        {
            let basket = Rc::clone(&basket);
            bus.subscribe(
                EventKind::BasketChanged,
                Rc::new(move |event| {
                    let AppEvent::BasketChanged(lines) = event else {
                        return;
                    };
                    basket.borrow_mut().update(BasketPatch {
                        lines: Some(lines.clone()),
                        ..BasketPatch::default()
                    });
                }),
            );
        }

        let order_form = Rc::new(RefCell::new(ViewHost::mount(
            &page,
            "order",
            OrderFormView,
        )?));
        {
            let order_form = Rc::clone(&order_form);
            bus.subscribe(
                EventKind::OrderInitiated,
                Rc::new(move |event| {
                    let AppEvent::OrderInitiated(details) = event else {
                        return;
                    };
                    order_form.borrow_mut().update(OrderFormPatch {
                        details: Some(details.clone()),
                        ..OrderFormPatch::default()
                    });
                }),
            );
        }

        let modal = Rc::new(RefCell::new(ViewHost::mount(&page, "modal", ModalView)?));
        {
            let modal = Rc::clone(&modal);
            bus.subscribe(
                EventKind::ModalClosed,
                Rc::new(move |event| {
                    if matches!(event, AppEvent::ModalClosed) {
                        modal.borrow_mut().close();
                    }
                }),
            );
        }

        let item_count = Rc::new(Cell::new(0u32));
        {
            let item_count = Rc::clone(&item_count);
            bus.subscribe(
                EventKind::BasketChanged,
                Rc::new(move |event| {
                    let AppEvent::BasketChanged(lines) = event else {
                        return;
                    };
                    item_count.set(lines.iter().map(|line| line.item_count).sum());
                }),
            );
        }

        let focus = if cards.is_empty() {
            Focus::Basket
        } else {
            Focus::Card(0)
        };

        Ok(Self {
            bus,
            page,
            catalog,
            orders,
            cards,
            basket,
            order_form,
            modal,
            item_count,
            focus,
            gallery_index: 0,
            should_quit: false,
            theme,
        })
    }

    /// Layered key dispatch: modal, then the focused view, then the shell.
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        // Layer 1: an open modal captures all input.
        if self.modal.borrow().is_open() {
            let outcomes = self.modal.borrow_mut().handle_key(key.code);
            if let Some(outcomes) = outcomes {
                self.execute(outcomes);
            }
            return;
        }

        // Layer 2: the focused view.
        let sink: Rc<RefCell<dyn InputSink>> = match self.focus {
            Focus::Card(index) => self.cards[index].clone(),
            Focus::Basket => self.basket.clone(),
            Focus::OrderForm => self.order_form.clone(),
        };
        let consumed = sink.borrow_mut().handle_key(key.code);
        if let Some(outcomes) = consumed {
            self.execute(outcomes);
            return;
        }

        // Layer 3: shell navigation and globals.
        match key.code {
            KeyCode::Tab => self.focus_next(),
            KeyCode::BackTab => self.focus_prev(),
            KeyCode::Left => {
                if let Focus::Card(index) = self.focus {
                    self.focus = Focus::Card(index.saturating_sub(1));
                }
            }
            KeyCode::Right => {
                if let Focus::Card(index) = self.focus {
                    if index + 1 < self.cards.len() {
                        self.focus = Focus::Card(index + 1);
                    }
                }
            }
            KeyCode::Esc => {
                if !matches!(self.focus, Focus::Card(_)) {
                    self.focus = self.gallery_focus();
                }
            }
            KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    /// Run view outcomes with no view borrow held.
    fn execute(&mut self, outcomes: Vec<Outcome>) {
        for outcome in outcomes {
            match outcome {
                Outcome::Publish(event) => {
                    let checkout = matches!(event, AppEvent::OrderInitiated(_));
                    self.bus.dispatch(event);
                    if checkout {
                        self.focus = Focus::OrderForm;
                    }
                }
                Outcome::Open(content) => self.modal.borrow_mut().open(content),
            }
        }
    }

    fn focus_next(&mut self) {
        self.focus = match self.focus {
            Focus::Card(index) => {
                self.gallery_index = index;
                Focus::Basket
            }
            Focus::Basket => Focus::OrderForm,
            Focus::OrderForm => self.gallery_focus(),
        };
    }

    fn focus_prev(&mut self) {
        self.focus = match self.focus {
            Focus::Card(index) => {
                self.gallery_index = index;
                Focus::OrderForm
            }
            Focus::Basket => self.gallery_focus(),
            Focus::OrderForm => Focus::Basket,
        };
    }

    fn gallery_focus(&self) -> Focus {
        if self.cards.is_empty() {
            Focus::Basket
        } else {
            Focus::Card(self.gallery_index.min(self.cards.len() - 1))
        }
    }

    // ----- draw-pass accessors -----

    pub fn content(&self, anchor: &str) -> Text<'static> {
        self.page.content(anchor)
    }

    pub fn card_content(&self, index: usize) -> Text<'static> {
        self.page.content(&card_anchor(index))
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    pub fn is_modal_open(&self) -> bool {
        self.modal.borrow().is_open()
    }

    pub fn item_count(&self) -> u32 {
        self.item_count.get()
    }

    /// Key hints for the status bar: the active sink's gestures plus the
    /// shell keys that still apply.
    pub fn status_line(&self) -> String {
        let mut parts: Vec<String> = Vec::new();

        let hints = if self.is_modal_open() {
            self.modal.borrow().hints()
        } else {
            match self.focus {
                Focus::Card(index) => self.cards[index].borrow().hints(),
                Focus::Basket => self.basket.borrow().hints(),
                Focus::OrderForm => self.order_form.borrow().hints(),
            }
        };
        for (key, hint) in hints {
            parts.push(format!("{key} {hint}"));
        }

        if !self.is_modal_open() {
            parts.push("tab panel".to_string());
            // The form consumes plain characters, so "q quit" would lie there.
            if !matches!(self.focus, Focus::OrderForm) {
                parts.push("q quit".to_string());
            }
        }
        parts.join("  ")
    }
}
