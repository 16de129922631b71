//! # Routing Resolver
//!
//! Incremental resolution of the (source, destination) pair for the active
//! RF call. The destination of a group call is known the moment the call
//! mode is seen; everything else trickles in from payload reassembly. Once
//! a field resolves it stays fixed for the rest of the call.

use crate::ysf::protocol::{CallMode, Callsign, UNKNOWN_CALLSIGN};

/// Source/destination identity of the current RF call
///
/// Holds owned copies of the callsigns; cleared exactly at RF call cleanup.
#[derive(Debug, Clone, Default)]
pub struct CallRouting {
    source: Option<Callsign>,
    dest: Option<Callsign>,
}

impl CallRouting {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop both identities at the end of a call
    pub fn clear(&mut self) {
        self.source = None;
        self.dest = None;
    }

    /// Fold one frame's worth of identity information into the pair
    ///
    /// A group call mode resolves the destination to the synthetic all-call
    /// immediately, regardless of payload validity. Individual-call
    /// destinations and all sources come only from successfully reassembled
    /// payload. First resolution wins; later frames never overwrite.
    ///
    /// # Returns
    ///
    /// * `bool` - Whether either field newly resolved
    pub fn resolve(
        &mut self,
        call_mode: CallMode,
        payload_valid: bool,
        payload_source: Option<Callsign>,
        payload_dest: Option<Callsign>,
    ) -> bool {
        let mut changed = false;

        if self.dest.is_none() {
            match call_mode {
                CallMode::Group => {
                    self.dest = Some(Callsign::all_call());
                    changed = true;
                }
                CallMode::Individual => {
                    if payload_valid && payload_dest.is_some() {
                        self.dest = payload_dest;
                        changed = true;
                    }
                }
            }
        }

        if self.source.is_none() && payload_valid && payload_source.is_some() {
            self.source = payload_source;
            changed = true;
        }

        changed
    }

    pub fn source(&self) -> Option<&Callsign> {
        self.source.as_ref()
    }

    pub fn dest(&self) -> Option<&Callsign> {
        self.dest.as_ref()
    }

    /// Source rendered for display, with the fixed-width unknown placeholder
    pub fn source_display(&self) -> String {
        match &self.source {
            Some(cs) => cs.to_string(),
            None => UNKNOWN_CALLSIGN.to_string(),
        }
    }

    /// Destination rendered for display, with the fixed-width unknown placeholder
    pub fn dest_display(&self) -> String {
        match &self.dest {
            Some(cs) => cs.to_string(),
            None => UNKNOWN_CALLSIGN.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_routing_is_unresolved() {
        let routing = CallRouting::new();
        assert_eq!(routing.source(), None);
        assert_eq!(routing.dest(), None);
        assert_eq!(routing.source_display(), UNKNOWN_CALLSIGN);
        assert_eq!(routing.dest_display(), UNKNOWN_CALLSIGN);
    }

    #[test]
    fn test_group_call_resolves_dest_immediately() {
        let mut routing = CallRouting::new();

        // Invalid payload, no identities available
        let changed = routing.resolve(CallMode::Group, false, None, None);

        assert!(changed);
        assert_eq!(routing.dest(), Some(&Callsign::all_call()));
        assert_eq!(routing.source(), None);
        assert_eq!(routing.dest_display(), "ALL       ");
    }

    #[test]
    fn test_individual_call_needs_valid_payload() {
        let mut routing = CallRouting::new();
        let dest = Some(Callsign::new("G4KLX"));

        // Payload invalid: identity is not trusted
        assert!(!routing.resolve(CallMode::Individual, false, None, dest));
        assert_eq!(routing.dest(), None);

        // Payload valid: destination resolves
        assert!(routing.resolve(CallMode::Individual, true, None, dest));
        assert_eq!(routing.dest(), Some(&Callsign::new("G4KLX")));
    }

    #[test]
    fn test_source_needs_valid_payload() {
        let mut routing = CallRouting::new();
        let source = Some(Callsign::new("M0ABC"));

        assert!(!routing.resolve(CallMode::Individual, false, source, None));
        assert_eq!(routing.source(), None);

        assert!(routing.resolve(CallMode::Individual, true, source, None));
        assert_eq!(routing.source(), Some(&Callsign::new("M0ABC")));
    }

    #[test]
    fn test_first_resolution_wins() {
        let mut routing = CallRouting::new();

        routing.resolve(
            CallMode::Individual,
            true,
            Some(Callsign::new("M0ABC")),
            Some(Callsign::new("G4KLX")),
        );

        // A later frame claims different identities; nothing changes
        let changed = routing.resolve(
            CallMode::Individual,
            true,
            Some(Callsign::new("2E0XYZ")),
            Some(Callsign::new("GB3ZZ")),
        );

        assert!(!changed);
        assert_eq!(routing.source(), Some(&Callsign::new("M0ABC")));
        assert_eq!(routing.dest(), Some(&Callsign::new("G4KLX")));
    }

    #[test]
    fn test_group_does_not_overwrite_resolved_dest() {
        let mut routing = CallRouting::new();

        routing.resolve(
            CallMode::Individual,
            true,
            None,
            Some(Callsign::new("G4KLX")),
        );

        assert!(!routing.resolve(CallMode::Group, true, None, None));
        assert_eq!(routing.dest(), Some(&Callsign::new("G4KLX")));
    }

    #[test]
    fn test_partial_resolution_reports_change_per_field() {
        let mut routing = CallRouting::new();

        // Group dest first
        assert!(routing.resolve(CallMode::Group, false, None, None));

        // No news
        assert!(!routing.resolve(CallMode::Group, false, None, None));

        // Source arrives later
        assert!(routing.resolve(CallMode::Group, true, Some(Callsign::new("M0ABC")), None));
        assert_eq!(routing.source_display(), "M0ABC     ");
    }

    #[test]
    fn test_clear_drops_both_identities() {
        let mut routing = CallRouting::new();
        routing.resolve(
            CallMode::Group,
            true,
            Some(Callsign::new("M0ABC")),
            None,
        );

        routing.clear();
        assert_eq!(routing.source(), None);
        assert_eq!(routing.dest(), None);
    }
}
