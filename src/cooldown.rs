//! Invocation cooldown policy.
//!
//! One timestamp per actor, stored through the host's metadata facility.
//! A rejected invocation never refreshes the stamp, so spamming does not
//! extend the wait.

use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

use crate::actor::{ActorId, MetadataStore};

/// Metadata key holding the last accepted invocation, epoch milliseconds.
const LAST_INVOCATION_KEY: &str = "commandeer:last-invocation";

/// Outcome of one cooldown check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CooldownVerdict {
    /// Allowed. The stamp was updated to `now`.
    Ready,
    /// Still cooling down. The stamp was left untouched.
    Wait(Duration),
}

impl CooldownVerdict {
    /// Remaining whole seconds, rounded up. Zero for `Ready`.
    pub fn remaining_secs(&self) -> i64 {
        match self {
            Self::Ready => 0,
            Self::Wait(remaining) => {
                let millis = remaining.num_milliseconds();
                millis / 1000 + i64::from(millis % 1000 > 0)
            }
        }
    }
}

/// Last-invocation gate over the metadata store.
pub struct CooldownTracker {
    store: Arc<dyn MetadataStore>,
    cooldown: Duration,
}

impl CooldownTracker {
    /// A tracker enforcing the given cooldown between accepted invocations.
    pub fn new(store: Arc<dyn MetadataStore>, cooldown: Duration) -> Self {
        Self { store, cooldown }
    }

    /// Check the actor at `now`, stamping `now` only when allowed.
    ///
    /// A missing or unreadable stamp counts as ready. The explicit `now`
    /// keeps the policy deterministic under test; the dispatcher passes
    /// `Utc::now()`.
    pub fn check(&self, actor: ActorId, now: DateTime<Utc>) -> CooldownVerdict {
        let last = self
            .store
            .get(actor, LAST_INVOCATION_KEY)
            .and_then(|raw| raw.parse::<i64>().ok())
            .and_then(DateTime::from_timestamp_millis);

        if let Some(last) = last {
            let ready_at = last + self.cooldown;
            if now < ready_at {
                return CooldownVerdict::Wait(ready_at - now);
            }
        }

        self.store.set(
            actor,
            LAST_INVOCATION_KEY,
            now.timestamp_millis().to_string(),
        );
        CooldownVerdict::Ready
    }

    /// Forget the actor's stamp (disconnect cleanup).
    pub fn forget(&self, actor: ActorId) {
        self.store.remove(actor, LAST_INVOCATION_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::InMemoryMetadataStore;

    fn tracker(seconds: i64) -> CooldownTracker {
        CooldownTracker::new(
            Arc::new(InMemoryMetadataStore::new()),
            Duration::seconds(seconds),
        )
    }

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn test_cooldown_timeline() {
        let tracker = tracker(10);
        let actor = ActorId::random();

        // t=0 passes and stamps.
        assert_eq!(tracker.check(actor, at(0)), CooldownVerdict::Ready);

        // t=5 rejected with ~5 seconds remaining, stamp untouched.
        match tracker.check(actor, at(5)) {
            CooldownVerdict::Wait(remaining) => assert_eq!(remaining.num_seconds(), 5),
            other => panic!("expected wait, got {other:?}"),
        }

        // t=11 passes again and re-stamps.
        assert_eq!(tracker.check(actor, at(11)), CooldownVerdict::Ready);
        assert!(matches!(
            tracker.check(actor, at(12)),
            CooldownVerdict::Wait(_)
        ));
    }

    #[test]
    fn test_rejection_does_not_extend_wait() {
        let tracker = tracker(10);
        let actor = ActorId::random();

        tracker.check(actor, at(0));
        tracker.check(actor, at(5));
        tracker.check(actor, at(9));
        // Had the rejections re-stamped, t=10 would still be waiting.
        assert_eq!(tracker.check(actor, at(10)), CooldownVerdict::Ready);
    }

    #[test]
    fn test_actors_are_independent() {
        let tracker = tracker(10);
        let a = ActorId::random();
        let b = ActorId::random();

        assert_eq!(tracker.check(a, at(0)), CooldownVerdict::Ready);
        assert_eq!(tracker.check(b, at(1)), CooldownVerdict::Ready);
    }

    #[test]
    fn test_forget_resets() {
        let tracker = tracker(10);
        let actor = ActorId::random();

        tracker.check(actor, at(0));
        tracker.forget(actor);
        assert_eq!(tracker.check(actor, at(1)), CooldownVerdict::Ready);
    }

    #[test]
    fn test_remaining_secs_rounds_up() {
        assert_eq!(
            CooldownVerdict::Wait(Duration::milliseconds(4_200)).remaining_secs(),
            5
        );
        assert_eq!(
            CooldownVerdict::Wait(Duration::seconds(5)).remaining_secs(),
            5
        );
        assert_eq!(CooldownVerdict::Ready.remaining_secs(), 0);
    }
}
