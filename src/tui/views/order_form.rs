// Order form view - the checkout form
//
// Four fields: address, payment method, email, phone. Up/Down move the
// field cursor, Left/Right toggle the payment method while it is focused,
// and plain characters edit the focused text field through the lifecycle
// base's edit hook. Submit publishes `OrderSubmitted` carrying the contact
// fields only - the address and payment values are collected here but not
// included in the payload. That gap is deliberate and preserved as-is.

use crate::events::AppEvent;
use crate::model::{ContactInfo, FormErrors, OrderDetails};
use crate::tui::view::{Edit, Gesture, View, ViewState};
use crossterm::event::KeyCode;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};

/// Which form field holds the cursor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormField {
    #[default]
    Address,
    Payment,
    Email,
    Phone,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            FormField::Address => FormField::Payment,
            FormField::Payment => FormField::Email,
            FormField::Email => FormField::Phone,
            FormField::Phone => FormField::Address,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FormField::Address => FormField::Phone,
            FormField::Payment => FormField::Address,
            FormField::Email => FormField::Payment,
            FormField::Phone => FormField::Email,
        }
    }

    fn label(self) -> &'static str {
        match self {
            FormField::Address => "address",
            FormField::Payment => "payment",
            FormField::Email => "email",
            FormField::Phone => "phone",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderFormState {
    pub details: OrderDetails,
    pub contact: ContactInfo,
    pub field: FormField,
}

#[derive(Debug, Clone, Default)]
pub struct OrderFormPatch {
    pub details: Option<OrderDetails>,
    pub contact: Option<ContactInfo>,
    pub field: Option<FormField>,
}

impl ViewState for OrderFormState {
    type Patch = OrderFormPatch;

    fn merge(&mut self, patch: OrderFormPatch) {
        if let Some(details) = patch.details {
            self.details = details;
        }
        if let Some(contact) = patch.contact {
            self.contact = contact;
        }
        if let Some(field) = patch.field {
            self.field = field;
        }
    }
}

/// Fields still waiting for input. Display only; nothing in the event flow
/// reads this.
fn pending_fields(state: &OrderFormState) -> FormErrors {
    let mut errors = FormErrors::new();
    if state.details.address.is_empty() {
        errors.insert("address", "required".to_string());
    }
    if state.contact.email.is_empty() {
        errors.insert("email", "required".to_string());
    }
    if state.contact.phone.is_empty() {
        errors.insert("phone", "required".to_string());
    }
    errors
}

pub struct OrderFormView;

impl View for OrderFormView {
    type State = OrderFormState;

    fn render(&self, state: &OrderFormState) -> Text<'static> {
        let row = |field: FormField, value: String| -> Line<'static> {
            let pointer = if state.field == field { "▸ " } else { "  " };
            let text = format!("{}{:<8} {}", pointer, field.label(), value);
            if state.field == field {
                Line::from(Span::styled(text, Style::default().add_modifier(Modifier::BOLD)))
            } else {
                Line::from(text)
            }
        };

        let payment = match state.details.payment {
            crate::model::PaymentMethod::Card => "[card]  cash ".to_string(),
            crate::model::PaymentMethod::Cash => " card  [cash]".to_string(),
        };

        let mut lines = vec![
            row(FormField::Address, state.details.address.clone()),
            row(FormField::Payment, payment),
            row(FormField::Email, state.contact.email.clone()),
            row(FormField::Phone, state.contact.phone.clone()),
        ];

        let pending = pending_fields(state);
        if !pending.is_empty() {
            lines.push(Line::raw(""));
            let names: Vec<&str> = pending.keys().copied().collect();
            lines.push(Line::from(Span::styled(
                format!("pending: {}", names.join(", ")),
                Style::default().add_modifier(Modifier::DIM),
            )));
        }
        Text::from(lines)
    }

    fn bind(&self, state: &OrderFormState) -> Vec<Gesture<OrderFormPatch>> {
        let mut gestures = vec![
            Gesture::update(
                KeyCode::Up,
                "field",
                OrderFormPatch {
                    field: Some(state.field.prev()),
                    ..OrderFormPatch::default()
                },
            ),
            Gesture::update(
                KeyCode::Down,
                "field",
                OrderFormPatch {
                    field: Some(state.field.next()),
                    ..OrderFormPatch::default()
                },
            ),
        ];

        if state.field == FormField::Payment {
            let toggled = OrderDetails {
                payment: state.details.payment.toggled(),
                address: state.details.address.clone(),
            };
            let patch = OrderFormPatch {
                details: Some(toggled),
                ..OrderFormPatch::default()
            };
            gestures.push(Gesture::update(KeyCode::Left, "method", patch.clone()));
            gestures.push(Gesture::update(KeyCode::Right, "method", patch));
        }

        // Submit carries the contact fields only.
        gestures.push(Gesture::publish(
            KeyCode::Enter,
            "submit",
            AppEvent::OrderSubmitted(state.contact.clone()),
        ));
        gestures
    }

    fn edit(&self, state: &OrderFormState, edit: Edit) -> Option<OrderFormPatch> {
        fn apply(value: &str, edit: Edit) -> String {
            let mut value = value.to_string();
            match edit {
                Edit::Insert(c) => value.push(c),
                Edit::DeleteBack => {
                    value.pop();
                }
            }
            value
        }

        match state.field {
            FormField::Payment => None,
            FormField::Address => Some(OrderFormPatch {
                details: Some(OrderDetails {
                    payment: state.details.payment,
                    address: apply(&state.details.address, edit),
                }),
                ..OrderFormPatch::default()
            }),
            FormField::Email => Some(OrderFormPatch {
                contact: Some(ContactInfo {
                    email: apply(&state.contact.email, edit),
                    phone: state.contact.phone.clone(),
                }),
                ..OrderFormPatch::default()
            }),
            FormField::Phone => Some(OrderFormPatch {
                contact: Some(ContactInfo {
                    email: state.contact.email.clone(),
                    phone: apply(&state.contact.phone, edit),
                }),
                ..OrderFormPatch::default()
            }),
        }
    }
}
