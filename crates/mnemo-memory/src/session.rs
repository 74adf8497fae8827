// SPDX-FileCopyrightText: 2026 Mnemo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Idle-gap session tracking.
//!
//! A session is an unbroken burst of interaction: consecutive calls within
//! the configured gap share one 8-character id, and the first call after a
//! longer silence (or the first call ever) mints a new one. State lives
//! only in this process; a restart always begins a fresh session.

use std::sync::Mutex;

use chrono::{DateTime, TimeDelta, Utc};
use tracing::info;

/// Length of the session identifier, a truncated v4 UUID.
const SESSION_ID_LEN: usize = 8;

#[derive(Debug, Default)]
struct SessionState {
    current_id: Option<String>,
    last_interaction: Option<DateTime<Utc>>,
}

/// Process-wide session tracker.
///
/// The read-decide-write on the idle gap and the generation of a new id
/// happen under one lock acquisition, so two concurrent requests racing
/// across a session boundary agree on a single new id.
#[derive(Debug)]
pub struct SessionTracker {
    gap: TimeDelta,
    state: Mutex<SessionState>,
}

impl SessionTracker {
    /// Creates a tracker that starts a new session after `gap_secs` of idle time.
    pub fn new(gap_secs: u64) -> Self {
        Self {
            gap: TimeDelta::seconds(gap_secs as i64),
            state: Mutex::new(SessionState::default()),
        }
    }

    /// Returns the session id for the current interaction, updating the
    /// last-interaction time as a side effect.
    pub fn current_session(&self) -> String {
        self.session_at(Utc::now())
    }

    /// True once at least one interaction has been observed in this process.
    pub fn has_started(&self) -> bool {
        self.state
            .lock()
            .expect("session lock poisoned")
            .last_interaction
            .is_some()
    }

    /// Clock-parameterized transition, exposed for tests.
    pub(crate) fn session_at(&self, now: DateTime<Utc>) -> String {
        let mut state = self.state.lock().expect("session lock poisoned");

        let expired = match state.last_interaction {
            None => true,
            Some(last) => now - last > self.gap,
        };
        if expired {
            let id: String = uuid::Uuid::new_v4()
                .simple()
                .to_string()
                .chars()
                .take(SESSION_ID_LEN)
                .collect();
            info!(session_id = %id, "new session started");
            state.current_id = Some(id);
        }

        state.last_interaction = Some(now);
        state
            .current_id
            .clone()
            .expect("current_id set on first call")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    #[test]
    fn first_call_starts_a_session() {
        let tracker = SessionTracker::new(3600);
        assert!(!tracker.has_started());
        let id = tracker.current_session();
        assert_eq!(id.len(), 8);
        assert!(tracker.has_started());
    }

    #[test]
    fn calls_within_gap_share_one_id() {
        let tracker = SessionTracker::new(3600);
        let t0 = Utc::now();
        let first = tracker.session_at(t0);
        for minutes in [1, 30, 59] {
            let id = tracker.session_at(t0 + TimeDelta::minutes(minutes));
            assert_eq!(id, first);
        }
    }

    #[test]
    fn gap_over_threshold_starts_new_session() {
        let tracker = SessionTracker::new(3600);
        let t0 = Utc::now();
        let first = tracker.session_at(t0);
        let second = tracker.session_at(t0 + TimeDelta::seconds(3601));
        assert_ne!(first, second);
    }

    #[test]
    fn exact_threshold_does_not_rotate() {
        // The rule is strictly greater than the gap.
        let tracker = SessionTracker::new(3600);
        let t0 = Utc::now();
        let first = tracker.session_at(t0);
        let second = tracker.session_at(t0 + TimeDelta::seconds(3600));
        assert_eq!(first, second);
    }

    #[test]
    fn gap_measured_from_last_interaction_not_session_start() {
        let tracker = SessionTracker::new(3600);
        let t0 = Utc::now();
        let first = tracker.session_at(t0);
        // Keep-alive every 50 minutes: session survives well past one hour
        // of total age.
        let mut t = t0;
        for _ in 0..4 {
            t += TimeDelta::minutes(50);
            assert_eq!(tracker.session_at(t), first);
        }
    }

    #[test]
    fn concurrent_first_calls_agree_on_one_id() {
        use std::sync::Arc;

        let tracker = Arc::new(SessionTracker::new(3600));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let tracker = Arc::clone(&tracker);
                std::thread::spawn(move || tracker.current_session())
            })
            .collect();
        let ids: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(ids.iter().all(|id| id == &ids[0]));
    }
}
