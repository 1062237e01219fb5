//! Application State

use std::sync::Arc;

use checkout_payments::{MemoryDeliveryLog, PaymentProvider, WebhookHandler};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Upstream payment provider (Chimoney, or a stub in tests)
    pub provider: Arc<dyn PaymentProvider>,

    /// Webhook dispatcher with its redelivery log
    pub webhooks: Arc<WebhookHandler<MemoryDeliveryLog>>,
}

impl AppState {
    pub fn new(provider: Arc<dyn PaymentProvider>, deliveries: MemoryDeliveryLog) -> Self {
        Self {
            provider,
            webhooks: Arc::new(WebhookHandler::new(Arc::new(deliveries))),
        }
    }
}
