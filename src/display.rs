//! # Display Sink
//!
//! Trait abstraction for the on-screen / host-log view of the current call.
//! The control layer reports the resolved (or still unknown) source and
//! destination of the active call, and clears the display when the call
//! ends.

#[cfg(test)]
use mockall::automock;

/// Which side of the gateway a reported call arrived from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Received over the air from the local modem
    Rf,

    /// Received from the network relay
    Network,
}

impl Direction {
    /// Single-letter tag used in call displays and logs
    pub fn as_tag(&self) -> &'static str {
        match self {
            Direction::Rf => "R",
            Direction::Network => "N",
        }
    }
}

/// Display/log sink collaborator
///
/// Unresolved identities are rendered as a fixed-width run of `?` before
/// they reach this interface, so implementations always receive ten-column
/// fields.
#[cfg_attr(test, automock)]
pub trait CallDisplay: Send {
    /// Show the current call
    fn report_call(&mut self, source: &str, dest: &str, direction: Direction);

    /// Clear the current call from the display
    fn clear_call(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_tags() {
        assert_eq!(Direction::Rf.as_tag(), "R");
        assert_eq!(Direction::Network.as_tag(), "N");
    }
}
