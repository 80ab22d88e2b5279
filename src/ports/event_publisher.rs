//! EventPublisher port - Interface for publishing domain events.
//!
//! This port defines how the engine announces journey milestones without
//! knowing about the underlying transport mechanism.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Port for publishing domain events.
///
/// Publishing is a side-channel: the engine never depends on whether a
/// subscriber exists, and a failed publish never undoes a committed turn.
///
/// # Example
///
/// ```ignore
/// let envelope = EventEnvelope::from_event(&completed)?;
/// publisher.publish(envelope).await?;
/// ```
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish a single event.
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError>;

    /// Publish multiple events.
    ///
    /// Adapters without atomic delivery publish sequentially, stopping at
    /// the first failure.
    async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError>;
}
