use std::sync::Arc;

use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use payments_ms::adapters::http::{payments_router, PaymentsAppState};
use payments_ms::adapters::messaging::{NatsMessagePublisher, RedisMessagePublisher};
use payments_ms::adapters::stripe::{StripeConfig, StripePaymentAdapter};
use payments_ms::config::{AppConfig, MessagingTransport};
use payments_ms::domain::payment::{RedirectUrls, StripeWebhookVerifier};
use payments_ms::ports::MessagePublisher;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;

    init_tracing(&config);

    if config.payment.is_test_mode() {
        tracing::info!("Stripe test mode");
    }

    // Outbound adapters
    let payment_provider = StripePaymentAdapter::new(StripeConfig::from_payment_config(
        &config.payment,
    ));

    tracing::info!("Connecting to message channel...");
    let message_publisher: Arc<dyn MessagePublisher> = match config.messaging.transport() {
        Some(MessagingTransport::Redis) => {
            Arc::new(RedisMessagePublisher::connect(&config.messaging).await?)
        }
        // validate() only admits known schemes
        Some(MessagingTransport::Nats) | None => {
            Arc::new(NatsMessagePublisher::connect(&config.messaging).await?)
        }
    };

    let webhook_verifier = StripeWebhookVerifier::new(
        config.payment.stripe_endpoint_secret.clone(),
    )
    .with_tolerance_secs(config.payment.stripe_webhook_tolerance_secs);

    let state = PaymentsAppState {
        payment_provider: Arc::new(payment_provider),
        message_publisher,
        webhook_verifier,
        redirect_urls: RedirectUrls {
            success_url: config.payment.stripe_success_url.clone(),
            cancel_url: config.payment.stripe_cancel_url.clone(),
        },
    };

    let app = payments_router()
        .with_state(state)
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(TraceLayer::new_for_http());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "Payments service listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Payments service stopped");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt()
            .pretty()
            .with_env_filter(filter)
            .init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
