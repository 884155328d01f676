//! OPS transition simulator - pure decision logic without I/O
//!
//! Stands in for a real OPS integration: decides whether a simulated
//! remote call succeeds and which status transition the ticket takes.
//! All randomness comes through the caller-supplied generator so tests
//! can drive the outcome deterministically.

use rand::Rng;
use uuid::Uuid;

use super::ServiceError;
use crate::models::ticket::TicketStatus;

/// Fixed success bias of a simulated send. Placeholder values pending a
/// real OPS integration; do not tune.
pub const SEND_SUCCESS_RATE: f32 = 0.8;
/// Fixed success bias of a simulated status query.
pub const QUERY_SUCCESS_RATE: f32 = 0.9;

#[derive(Debug, Clone, PartialEq)]
pub struct SendOutcome {
    pub success: bool,
    /// Synthetic external reference, present on success
    pub ops_id: Option<String>,
    /// Status the caller should persist, present on success
    pub new_status: Option<TicketStatus>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryOutcome {
    pub success: bool,
    /// Resulting status (unchanged on failure or terminal states)
    pub status: TicketStatus,
    /// Whether the resulting status differs from the input status
    pub updated: bool,
    pub details: &'static str,
    pub message: String,
}

/// Whether a ticket in this state can be queried against OPS.
/// Tickets not yet sent and terminally failed ones cannot.
pub fn queryable(status: TicketStatus) -> bool {
    matches!(
        status,
        TicketStatus::Sent
            | TicketStatus::InProgress
            | TicketStatus::Closed
            | TicketStatus::Delayed
    )
}

/// Simulate sending a ticket to OPS (80% success rate).
pub fn attempt_send(ticket_id: &str, rng: &mut impl Rng) -> SendOutcome {
    if rng.gen_range(0.0..1.0f32) <= SEND_SUCCESS_RATE {
        SendOutcome {
            success: true,
            ops_id: Some(format!("OPS-{}", &Uuid::new_v4().to_string()[..8])),
            new_status: Some(TicketStatus::Sent),
            message: format!("Ticket {} successfully sent to OPS", ticket_id),
        }
    } else {
        SendOutcome {
            success: false,
            ops_id: None,
            new_status: None,
            message: format!(
                "Failed to send ticket {} to OPS: connection timeout",
                ticket_id
            ),
        }
    }
}

/// Simulate querying a ticket's status in OPS (90% success rate, then a
/// weighted transition). Rejects non-queryable states before any draw.
pub fn attempt_status_query(
    ticket_id: &str,
    current: TicketStatus,
    rng: &mut impl Rng,
) -> Result<QueryOutcome, ServiceError> {
    if !queryable(current) {
        return Err(ServiceError::InvalidState(format!(
            "Cannot query status for ticket in '{}' state",
            current
        )));
    }

    if rng.gen_range(0.0..1.0f32) > QUERY_SUCCESS_RATE {
        return Ok(QueryOutcome {
            success: false,
            status: current,
            updated: false,
            details: status_details(current),
            message: format!(
                "Failed to query status for ticket {}: OPS system unavailable",
                ticket_id
            ),
        });
    }

    // Terminal states take no transition draw
    let next = match current {
        TicketStatus::Closed | TicketStatus::Failed => current,
        _ => transition_for(current, rng.gen_range(0.0..1.0f32)),
    };

    Ok(QueryOutcome {
        success: true,
        status: next,
        updated: next != current,
        details: status_details(next),
        message: format!("Status for ticket {}: {}", ticket_id, next),
    })
}

/// Weighted transition table. Buckets are cumulative half-open thresholds
/// over a single uniform roll in [0, 1).
pub fn transition_for(current: TicketStatus, roll: f32) -> TicketStatus {
    match current {
        // Sent -> In Progress (70%), Delayed (20%), Failed (10%)
        TicketStatus::Sent => {
            if roll < 0.7 {
                TicketStatus::InProgress
            } else if roll < 0.9 {
                TicketStatus::Delayed
            } else {
                TicketStatus::Failed
            }
        }
        // In Progress -> still In Progress (60%), Closed (40%)
        TicketStatus::InProgress => {
            if roll < 0.6 {
                TicketStatus::InProgress
            } else {
                TicketStatus::Closed
            }
        }
        // Delayed -> still Delayed (50%), In Progress (40%), Failed (10%)
        TicketStatus::Delayed => {
            if roll < 0.5 {
                TicketStatus::Delayed
            } else if roll < 0.9 {
                TicketStatus::InProgress
            } else {
                TicketStatus::Failed
            }
        }
        // All other statuses remain the same
        other => other,
    }
}

/// Human-readable detail for a status, included in query responses.
pub fn status_details(status: TicketStatus) -> &'static str {
    match status {
        TicketStatus::New => "Ticket is new and awaiting processing",
        TicketStatus::Pending => "Ticket is pending submission to OPS",
        TicketStatus::Sent => "Ticket has been sent to OPS and is awaiting processing",
        TicketStatus::InProgress => "Ticket is being processed by OPS",
        TicketStatus::Closed => "Ticket has been processed and closed",
        TicketStatus::Delayed => "Ticket processing has been delayed",
        TicketStatus::Failed => "Ticket processing failed",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rand::rngs::mock::StepRng;

    // StepRng with all-zero output makes every uniform draw 0.0 (forced
    // success); all-ones output draws just under 1.0 (forced failure).
    fn always_succeed() -> StepRng {
        StepRng::new(0, 0)
    }

    fn always_fail() -> StepRng {
        StepRng::new(u64::MAX, 0)
    }

    #[test]
    fn test_query_rejects_unsent_states() {
        for status in [TicketStatus::New, TicketStatus::Pending] {
            let result = attempt_status_query("TKT-1", status, &mut always_succeed());
            assert!(
                matches!(result, Err(ServiceError::InvalidState(_))),
                "expected InvalidState for {}",
                status
            );
        }
    }

    #[test]
    fn test_query_rejects_failed_state() {
        let result = attempt_status_query("TKT-1", TicketStatus::Failed, &mut always_succeed());
        assert!(matches!(result, Err(ServiceError::InvalidState(_))));
    }

    #[test]
    fn test_invalid_state_message_names_the_state() {
        let err = attempt_status_query("TKT-1", TicketStatus::New, &mut always_succeed())
            .unwrap_err();
        match err {
            ServiceError::InvalidState(msg) => {
                assert_eq!(msg, "Cannot query status for ticket in 'new' state")
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_closed_is_terminal() {
        let outcome =
            attempt_status_query("TKT-1", TicketStatus::Closed, &mut always_succeed()).unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.status, TicketStatus::Closed);
        assert!(!outcome.updated);
    }

    #[test]
    fn test_send_success_yields_ops_reference() {
        let outcome = attempt_send("TKT-1", &mut always_succeed());
        assert!(outcome.success);
        assert_eq!(outcome.new_status, Some(TicketStatus::Sent));
        let ops_id = outcome.ops_id.expect("missing OPS reference");
        assert!(ops_id.starts_with("OPS-"));
        assert_eq!(ops_id.len(), "OPS-".len() + 8);
        assert!(outcome.message.contains("TKT-1"));
    }

    #[test]
    fn test_send_failure_keeps_status() {
        let outcome = attempt_send("TKT-1", &mut always_fail());
        assert!(!outcome.success);
        assert_eq!(outcome.ops_id, None);
        assert_eq!(outcome.new_status, None);
        assert!(outcome.message.contains("TKT-1"));
        assert!(outcome.message.contains("connection timeout"));
    }

    #[test]
    fn test_query_failure_keeps_status() {
        let outcome =
            attempt_status_query("TKT-1", TicketStatus::Sent, &mut always_fail()).unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.status, TicketStatus::Sent);
        assert!(!outcome.updated);
        assert!(outcome.message.contains("OPS system unavailable"));
    }

    #[test]
    fn test_sent_transition_buckets() {
        assert_eq!(
            transition_for(TicketStatus::Sent, 0.0),
            TicketStatus::InProgress
        );
        assert_eq!(
            transition_for(TicketStatus::Sent, 0.69),
            TicketStatus::InProgress
        );
        // 0.7 is the first roll outside the in_progress bucket
        assert_eq!(transition_for(TicketStatus::Sent, 0.7), TicketStatus::Delayed);
        // 0.75 lands in [0.7, 0.9), not the failed bucket
        assert_eq!(transition_for(TicketStatus::Sent, 0.75), TicketStatus::Delayed);
        assert_eq!(transition_for(TicketStatus::Sent, 0.9), TicketStatus::Failed);
        assert_eq!(transition_for(TicketStatus::Sent, 0.99), TicketStatus::Failed);
    }

    #[test]
    fn test_in_progress_self_loop() {
        assert_eq!(
            transition_for(TicketStatus::InProgress, 0.5),
            TicketStatus::InProgress
        );
        assert_eq!(
            transition_for(TicketStatus::InProgress, 0.6),
            TicketStatus::Closed
        );
    }

    #[test]
    fn test_delayed_transition_buckets() {
        assert_eq!(
            transition_for(TicketStatus::Delayed, 0.49),
            TicketStatus::Delayed
        );
        assert_eq!(
            transition_for(TicketStatus::Delayed, 0.5),
            TicketStatus::InProgress
        );
        assert_eq!(
            transition_for(TicketStatus::Delayed, 0.95),
            TicketStatus::Failed
        );
    }

    #[test]
    fn test_sent_distribution_converges() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut in_progress = 0u32;
        let mut delayed = 0u32;
        let mut failed = 0u32;
        let n = 10_000;

        for _ in 0..n {
            match transition_for(TicketStatus::Sent, rng.gen_range(0.0..1.0f32)) {
                TicketStatus::InProgress => in_progress += 1,
                TicketStatus::Delayed => delayed += 1,
                TicketStatus::Failed => failed += 1,
                other => panic!("unreachable transition from sent: {}", other),
            }
        }

        let share = |count: u32| count as f32 / n as f32;
        assert!((share(in_progress) - 0.7).abs() < 0.03);
        assert!((share(delayed) - 0.2).abs() < 0.03);
        assert!((share(failed) - 0.1).abs() < 0.03);
    }

    #[test]
    fn test_status_details_covers_every_status() {
        for status in TicketStatus::ALL {
            assert!(!status_details(status).is_empty());
        }
    }
}
