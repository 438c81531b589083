//! Mock payment provider for testing.
//!
//! Provides a configurable mock implementation of `PaymentProvider` for unit
//! and integration tests. Supports:
//! - Pre-configured responses
//! - Error injection
//! - Call tracking

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::payment::{CheckoutResult, CheckoutSessionParams};
use crate::ports::{PaymentError, PaymentProvider};

/// Mock payment provider for testing.
///
/// # Panics
///
/// Methods panic if the internal lock is poisoned. Test use only.
///
/// # Example
///
/// ```ignore
/// let mock = MockPaymentProvider::new();
/// mock.set_error(PaymentError::invalid_request("Invalid currency"));
///
/// let result = mock.create_checkout_session(params).await;
/// assert_eq!(mock.calls().len(), 1);
/// ```
#[derive(Default, Clone)]
pub struct MockPaymentProvider {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    /// Result to return instead of the echoed default.
    next_result: Option<CheckoutResult>,

    /// Error to return on next call.
    next_error: Option<PaymentError>,

    /// Every params value received, in order.
    calls: Vec<CheckoutSessionParams>,
}

impl MockPaymentProvider {
    /// Create a new mock provider with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the result for subsequent calls.
    pub fn set_result(&self, result: CheckoutResult) {
        self.inner.lock().unwrap().next_result = Some(result);
    }

    /// Make the next call fail with this error.
    pub fn set_error(&self, error: PaymentError) {
        self.inner.lock().unwrap().next_error = Some(error);
    }

    /// Params of every call made so far.
    pub fn calls(&self) -> Vec<CheckoutSessionParams> {
        self.inner.lock().unwrap().calls.clone()
    }

    /// Number of calls made so far.
    pub fn call_count(&self) -> usize {
        self.inner.lock().unwrap().calls.len()
    }
}

#[async_trait]
impl PaymentProvider for MockPaymentProvider {
    async fn create_checkout_session(
        &self,
        params: CheckoutSessionParams,
    ) -> Result<CheckoutResult, PaymentError> {
        let mut state = self.inner.lock().unwrap();
        state.calls.push(params.clone());

        if let Some(error) = state.next_error.take() {
            return Err(error);
        }

        Ok(state.next_result.clone().unwrap_or_else(|| CheckoutResult {
            url: Some(format!(
                "https://checkout.stripe.com/c/pay/cs_mock_{}",
                state.calls.len()
            )),
            success_url: Some(params.success_url),
            cancel_url: Some(params.cancel_url),
        }))
    }
}
