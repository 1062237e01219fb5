//! Checkout Form State
//!
//! Browser-independent logic behind the checkout page, kept apart from the
//! components so it can be unit tested natively.

use serde_json::{json, Value};
use thiserror::Error;

/// Amount pre-filled in the form
pub const DEFAULT_AMOUNT: &str = "1";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FormError {
    #[error("Enter an amount greater than zero")]
    InvalidAmount,

    #[error("Enter your email address")]
    MissingEmail,
}

/// Current form input
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckoutForm {
    pub amount: String,
    pub email: String,
}

impl Default for CheckoutForm {
    fn default() -> Self {
        Self {
            amount: DEFAULT_AMOUNT.into(),
            email: String::new(),
        }
    }
}

impl CheckoutForm {
    /// Pay button is enabled once an email is entered
    pub fn can_submit(&self) -> bool {
        !self.email.trim().is_empty()
    }

    /// Build the initiate request body.
    ///
    /// The amount goes out as the string the payer typed; the server parses
    /// it as a decimal so no float rounding happens in the browser.
    pub fn to_request(&self, redirect_url: &str) -> Result<Value, FormError> {
        if !self.can_submit() {
            return Err(FormError::MissingEmail);
        }

        let amount = self.amount.trim();
        match amount.parse::<f64>() {
            Ok(value) if value.is_finite() && value > 0.0 => {}
            _ => return Err(FormError::InvalidAmount),
        }

        Ok(json!({
            "valueInUSD": amount,
            "meta": {},
            "payerEmail": self.email.trim(),
            "redirect_url": redirect_url,
        }))
    }
}

/// Which half of the page to render
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CheckoutView {
    Form,

    /// The provider redirected back after payment
    Result { issue_id: Option<String> },
}

impl CheckoutView {
    /// Any `status` query parameter means the payer came back from the
    /// provider's payment page.
    pub fn from_query(status: Option<String>, issue_id: Option<String>) -> Self {
        if status.is_some() {
            CheckoutView::Result { issue_id }
        } else {
            CheckoutView::Form
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_disabled_until_email() {
        let mut form = CheckoutForm::default();
        assert!(!form.can_submit());

        form.email = "   ".into();
        assert!(!form.can_submit());

        form.email = "a@b.com".into();
        assert!(form.can_submit());
    }

    #[test]
    fn test_request_body() {
        let form = CheckoutForm {
            amount: " 12.50 ".into(),
            email: "a@b.com".into(),
        };

        assert_eq!(
            form.to_request("http://localhost:5173").unwrap(),
            json!({
                "valueInUSD": "12.50",
                "meta": {},
                "payerEmail": "a@b.com",
                "redirect_url": "http://localhost:5173",
            })
        );
    }

    #[test]
    fn test_invalid_amounts_rejected() {
        for amount in ["", "0", "-3", "abc", "NaN", "inf"] {
            let form = CheckoutForm {
                amount: amount.into(),
                email: "a@b.com".into(),
            };
            assert_eq!(form.to_request("http://x"), Err(FormError::InvalidAmount), "{amount}");
        }
    }

    #[test]
    fn test_missing_email_rejected() {
        let form = CheckoutForm::default();
        assert_eq!(form.to_request("http://x"), Err(FormError::MissingEmail));
    }

    #[test]
    fn test_view_from_query() {
        assert_eq!(CheckoutView::from_query(None, Some("abc123".into())), CheckoutView::Form);
        assert_eq!(
            CheckoutView::from_query(Some("paid".into()), Some("abc123".into())),
            CheckoutView::Result {
                issue_id: Some("abc123".into())
            }
        );
        assert_eq!(
            CheckoutView::from_query(Some(String::new()), None),
            CheckoutView::Result { issue_id: None }
        );
    }
}
