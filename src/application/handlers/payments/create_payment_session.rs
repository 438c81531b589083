//! CreatePaymentSessionHandler - Command handler for opening a hosted checkout.

use std::sync::Arc;

use crate::domain::payment::{
    CheckoutResult, PaymentSessionError, PaymentSessionRequest, RedirectUrls,
};
use crate::ports::PaymentProvider;

/// Command to open a checkout session for an order.
#[derive(Debug, Clone)]
pub struct CreatePaymentSessionCommand {
    pub request: PaymentSessionRequest,
}

/// Handler for creating checkout sessions.
///
/// Validates the cart, maps it to minor-unit line items and makes exactly one
/// processor call. Nothing is persisted locally.
pub struct CreatePaymentSessionHandler {
    payment_provider: Arc<dyn PaymentProvider>,
    redirect_urls: RedirectUrls,
}

impl CreatePaymentSessionHandler {
    pub fn new(payment_provider: Arc<dyn PaymentProvider>, redirect_urls: RedirectUrls) -> Self {
        Self {
            payment_provider,
            redirect_urls,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreatePaymentSessionCommand,
    ) -> Result<CheckoutResult, PaymentSessionError> {
        let params = cmd.request.into_checkout_params(&self.redirect_urls)?;
        let order_id = params.order_id.clone();
        let line_items = params.line_items.len();

        let result = self
            .payment_provider
            .create_checkout_session(params)
            .await
            .map_err(|e| {
                tracing::error!(%order_id, error = %e, "Checkout session creation failed");
                PaymentSessionError::from(e)
            })?;

        tracing::info!(%order_id, line_items, "Checkout session created");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::stripe::MockPaymentProvider;
    use crate::domain::payment::SessionItem;
    use crate::ports::PaymentError;

    fn redirect_urls() -> RedirectUrls {
        RedirectUrls {
            success_url: "https://shop.test/payments/success".to_string(),
            cancel_url: "https://shop.test/payments/cancel".to_string(),
        }
    }

    fn item(name: &str, price: f64, quantity: u32) -> SessionItem {
        SessionItem {
            name: name.to_string(),
            price,
            quantity,
        }
    }

    fn command(items: Vec<SessionItem>) -> CreatePaymentSessionCommand {
        CreatePaymentSessionCommand {
            request: PaymentSessionRequest {
                currency: "usd".to_string(),
                order_id: "order-123".to_string(),
                items,
            },
        }
    }

    fn handler(mock: &MockPaymentProvider) -> CreatePaymentSessionHandler {
        CreatePaymentSessionHandler::new(Arc::new(mock.clone()), redirect_urls())
    }

    #[tokio::test]
    async fn makes_one_call_with_one_line_item_per_entry() {
        let mock = MockPaymentProvider::new();
        let cmd = command(vec![item("A", 19.99, 2), item("B", 5.0, 1), item("C", 0.1, 7)]);

        handler(&mock).handle(cmd).await.unwrap();

        let calls = mock.calls();
        assert_eq!(calls.len(), 1);
        let amounts: Vec<(i64, u32)> = calls[0]
            .line_items
            .iter()
            .map(|li| (li.unit_amount, li.quantity))
            .collect();
        assert_eq!(amounts, vec![(1999, 2), (500, 1), (10, 7)]);
        assert!(calls[0].line_items.iter().all(|li| li.currency == "usd"));
    }

    #[tokio::test]
    async fn attaches_order_id_and_configured_redirects() {
        let mock = MockPaymentProvider::new();

        handler(&mock)
            .handle(command(vec![item("A", 19.99, 2)]))
            .await
            .unwrap();

        let call = &mock.calls()[0];
        assert_eq!(call.order_id, "order-123");
        assert_eq!(call.success_url, "https://shop.test/payments/success");
        assert_eq!(call.cancel_url, "https://shop.test/payments/cancel");
    }

    #[tokio::test]
    async fn returns_processor_urls_unchanged() {
        let mock = MockPaymentProvider::new();
        let expected = CheckoutResult {
            url: Some("https://checkout.stripe.com/c/pay/cs_test_1".to_string()),
            success_url: Some("https://s".to_string()),
            cancel_url: Some("https://c".to_string()),
        };
        mock.set_result(expected.clone());

        let result = handler(&mock)
            .handle(command(vec![item("A", 1.0, 1)]))
            .await
            .unwrap();

        assert_eq!(result, expected);
    }

    #[tokio::test]
    async fn invalid_request_never_reaches_processor() {
        let mock = MockPaymentProvider::new();

        let result = handler(&mock).handle(command(vec![])).await;

        assert!(matches!(result, Err(PaymentSessionError::InvalidRequest(_))));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn processor_rejection_propagates() {
        let mock = MockPaymentProvider::new();
        mock.set_error(PaymentError::invalid_request("Invalid currency: zzz"));

        let result = handler(&mock).handle(command(vec![item("A", 1.0, 1)])).await;

        assert!(matches!(result, Err(PaymentSessionError::Rejected(_))));
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn network_failure_is_unavailable() {
        let mock = MockPaymentProvider::new();
        mock.set_error(PaymentError::network("connection refused"));

        let result = handler(&mock).handle(command(vec![item("A", 1.0, 1)])).await;

        assert!(matches!(result, Err(PaymentSessionError::Unavailable(_))));
    }
}
