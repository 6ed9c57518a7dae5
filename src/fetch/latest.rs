use parking_lot::Mutex;

/// Monotonic sequence counter for one logical fetch target.
///
/// `issue` hands out a [`Ticket`] per request; `complete` runs the publish
/// closure only if the ticket is still the newest one issued. The check and
/// the publish happen under the same lock, so a newer request can never be
/// overwritten by an older completion that lost the race.
#[derive(Debug, Default)]
pub struct Latest {
    last_issued: Mutex<u64>,
}

/// Proof of when a request was issued relative to its peers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

impl Latest {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last_issued: Mutex::new(0),
        }
    }

    /// Issue the next sequence number, superseding all earlier tickets.
    pub fn issue(&self) -> Ticket {
        let mut last = self.last_issued.lock();
        *last += 1;
        Ticket(*last)
    }

    /// Whether no newer ticket has been issued since `ticket`.
    #[must_use]
    pub fn is_current(&self, ticket: Ticket) -> bool {
        *self.last_issued.lock() == ticket.0
    }

    /// Run `publish` if `ticket` is still the newest issued.
    ///
    /// Returns `Some` with the closure's value when it ran, `None` when the
    /// completion was stale and discarded.
    pub fn complete<R>(&self, ticket: Ticket, publish: impl FnOnce() -> R) -> Option<R> {
        let last = self.last_issued.lock();
        (*last == ticket.0).then(publish)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tickets_increase() {
        let latest = Latest::new();
        let first = latest.issue();
        let second = latest.issue();
        assert_ne!(first, second);
        assert!(!latest.is_current(first));
        assert!(latest.is_current(second));
    }

    #[test]
    fn test_stale_completion_discarded() {
        let latest = Latest::new();
        let stale = latest.issue();
        let fresh = latest.issue();

        assert_eq!(latest.complete(stale, || "stale"), None);
        assert_eq!(latest.complete(fresh, || "fresh"), Some("fresh"));
    }

    #[test]
    fn test_completion_order_does_not_matter() {
        let latest = Latest::new();
        let first = latest.issue();
        let second = latest.issue();

        // The newest ticket may publish even before older ones report back
        assert!(latest.complete(second, || ()).is_some());
        assert!(latest.complete(first, || ()).is_none());
    }
}
