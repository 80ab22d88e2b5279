//! Journey domain events.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{domain_event, EventId, JourneyId, Timestamp};

/// Published once a journey reaches `completed`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JourneyCompleted {
    pub event_id: EventId,
    pub journey_id: JourneyId,
    pub riasec_code: String,
    pub overall_confidence: f64,
    pub turn_count: u32,
    pub completed_at: Timestamp,
}

domain_event!(
    JourneyCompleted,
    event_type = "journey.completed.v1",
    schema_version = 1,
    aggregate_id = journey_id,
    aggregate_type = "Journey",
    occurred_at = completed_at,
    event_id = event_id
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{DomainEvent, EventEnvelope};

    #[test]
    fn completed_event_envelope_carries_routing_fields() {
        let journey_id = JourneyId::new();
        let event = JourneyCompleted {
            event_id: EventId::new(),
            journey_id,
            riasec_code: "IRA".to_string(),
            overall_confidence: 86.1,
            turn_count: 15,
            completed_at: Timestamp::now(),
        };

        assert_eq!(event.event_type(), "journey.completed.v1");

        let envelope = EventEnvelope::from_event(&event).unwrap();
        assert_eq!(envelope.aggregate_type, "Journey");
        assert_eq!(envelope.aggregate_id, journey_id.to_string());
        assert_eq!(envelope.schema_version, 1);
    }
}
