use async_trait::async_trait;
use crate::core::catalog::CatalogError;
use crate::core::events::DomainEvent;
use crate::gateway::events::EventPublisher;

// LogPublisher emits domain events to the structured log stream so that a
// log shipper can pick them up downstream.
pub struct LogPublisher {}

impl LogPublisher {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for LogPublisher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPublisher for LogPublisher {
    async fn publish(&self, event: &DomainEvent) -> Result<(), CatalogError> {
        tracing::info!(
            event_id = event.event_id.as_str(),
            name = event.name.as_str(),
            group = event.group.as_str(),
            key = event.key.as_str(),
            data = event.json_data.as_str(),
            "domain event published"
        );
        Ok(())
    }
}
