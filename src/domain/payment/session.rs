//! Checkout session request types and line item mapping.

use serde::{Deserialize, Serialize};

use super::errors::PaymentSessionError;

/// One cart entry as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionItem {
    pub name: String,
    /// Unit price in major currency units (e.g. 19.99 USD).
    pub price: f64,
    pub quantity: u32,
}

/// Request to open a hosted checkout for an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSessionRequest {
    /// ISO currency code, lowercase as Stripe expects (e.g. "usd").
    pub currency: String,
    pub order_id: String,
    pub items: Vec<SessionItem>,
}

/// A priced line item in the processor's minor-unit representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineItem {
    pub name: String,
    pub currency: String,
    pub unit_amount: i64,
    pub quantity: u32,
}

/// Preconfigured redirect targets for hosted checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectUrls {
    pub success_url: String,
    pub cancel_url: String,
}

/// Everything the processor needs to open a payment-mode checkout session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutSessionParams {
    /// Attached as payment intent metadata so it comes back on the charge.
    pub order_id: String,
    pub line_items: Vec<LineItem>,
    pub success_url: String,
    pub cancel_url: String,
}

/// Processor-assigned URLs for a created session, passed through verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResult {
    pub url: Option<String>,
    pub success_url: Option<String>,
    pub cancel_url: Option<String>,
}

/// Converts a major-unit price to the processor's integer minor units.
///
/// Rounds half away from zero, so `19.99` becomes `1999` despite the
/// binary representation of `19.99 * 100` being slightly below it.
pub fn to_minor_units(price: f64) -> i64 {
    (price * 100.0).round() as i64
}

impl PaymentSessionRequest {
    /// Checks the input constraints that do not need the processor.
    pub fn validate(&self) -> Result<(), PaymentSessionError> {
        if self.currency.trim().is_empty() {
            return Err(PaymentSessionError::invalid_request("currency is required"));
        }
        if self.items.is_empty() {
            return Err(PaymentSessionError::invalid_request(
                "at least one item is required",
            ));
        }

        for (index, item) in self.items.iter().enumerate() {
            if !item.price.is_finite() || item.price <= 0.0 {
                return Err(PaymentSessionError::invalid_request(format!(
                    "items[{index}].price must be a positive amount"
                )));
            }
            if to_minor_units(item.price) <= 0 {
                return Err(PaymentSessionError::invalid_request(format!(
                    "items[{index}].price is below the smallest currency unit"
                )));
            }
            if item.quantity == 0 {
                return Err(PaymentSessionError::invalid_request(format!(
                    "items[{index}].quantity must be at least 1"
                )));
            }
        }

        Ok(())
    }

    /// Derives one line item per cart entry, in order.
    pub fn line_items(&self) -> Vec<LineItem> {
        self.items
            .iter()
            .map(|item| LineItem {
                name: item.name.clone(),
                currency: self.currency.clone(),
                unit_amount: to_minor_units(item.price),
                quantity: item.quantity,
            })
            .collect()
    }

    /// Validates the request and builds the processor parameters.
    pub fn into_checkout_params(
        self,
        redirect: &RedirectUrls,
    ) -> Result<CheckoutSessionParams, PaymentSessionError> {
        self.validate()?;
        let line_items = self.line_items();

        Ok(CheckoutSessionParams {
            order_id: self.order_id,
            line_items,
            success_url: redirect.success_url.clone(),
            cancel_url: redirect.cancel_url.clone(),
        })
    }
}
