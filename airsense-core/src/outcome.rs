//! Transmission outcomes
//!
//! Every cycle that gets a valid reading ends in exactly one
//! [`TransmissionOutcome`]. Outcomes are plain values: the Reporter hands
//! them to the status sink and the log and then drops them.

use alloc::string::String;
use core::fmt;

use crate::traits::HttpResponse;

/// What happened to one cycle's payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransmissionOutcome {
    /// The server answered (any HTTP status)
    Success {
        /// HTTP status code
        status_code: i32,
        /// Response body
        body: String,
    },
    /// The transport failed before a status was received
    TransportFailure {
        /// Transport error code (`<= 0`)
        status_code: i32,
    },
    /// No network association at send time; nothing was sent
    LinkUnavailable,
}

impl TransmissionOutcome {
    /// Classify a transport response: a positive status is a success
    pub fn classify(response: HttpResponse) -> Self {
        if response.status_code > 0 {
            Self::Success {
                status_code: response.status_code,
                body: response.body,
            }
        } else {
            Self::TransportFailure {
                status_code: response.status_code,
            }
        }
    }

    /// Whether the payload reached a server
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Status code, if a request was attempted
    pub fn status_code(&self) -> Option<i32> {
        match self {
            Self::Success { status_code, .. } | Self::TransportFailure { status_code } => {
                Some(*status_code)
            }
            Self::LinkUnavailable => None,
        }
    }
}

/// Short form used on the status display
impl fmt::Display for TransmissionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success { status_code, .. } => write!(f, "Sent OK ({})", status_code),
            Self::TransportFailure { status_code } => write!(f, "Send Failed ({})", status_code),
            Self::LinkUnavailable => f.write_str("Link Down"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn positive_status_is_success() {
        let outcome = TransmissionOutcome::classify(HttpResponse::new(200, "ok"));
        assert_eq!(
            outcome,
            TransmissionOutcome::Success {
                status_code: 200,
                body: "ok".into()
            }
        );
        assert!(outcome.is_success());
    }

    #[test]
    fn server_errors_still_count_as_delivered() {
        let outcome = TransmissionOutcome::classify(HttpResponse::new(500, "boom"));
        assert!(outcome.is_success());
        assert_eq!(outcome.status_code(), Some(500));
    }

    #[test]
    fn non_positive_status_is_transport_failure() {
        let outcome = TransmissionOutcome::classify(HttpResponse::failure(-1));
        assert_eq!(outcome, TransmissionOutcome::TransportFailure { status_code: -1 });

        let outcome = TransmissionOutcome::classify(HttpResponse::new(0, "ignored"));
        assert_eq!(outcome, TransmissionOutcome::TransportFailure { status_code: 0 });
    }

    #[test]
    fn display_lines() {
        assert_eq!(
            TransmissionOutcome::classify(HttpResponse::new(201, "")).to_string(),
            "Sent OK (201)"
        );
        assert_eq!(
            TransmissionOutcome::TransportFailure { status_code: -11 }.to_string(),
            "Send Failed (-11)"
        );
        assert_eq!(TransmissionOutcome::LinkUnavailable.to_string(), "Link Down");
        assert_eq!(TransmissionOutcome::LinkUnavailable.status_code(), None);
    }
}
