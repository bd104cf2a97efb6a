// In crates/analysis/src/throttle.rs

/// Minimum spacing between two accepted analysis requests in one session.
pub const COOLDOWN_MS: i64 = 30_000;

/// Outcome of asking the throttle for permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrottleDecision {
    Allowed,
    /// Not a failure; the caller should tell the user when to come back.
    Denied { retry_after_secs: u64 },
}

impl ThrottleDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, ThrottleDecision::Allowed)
    }
}

/// Client-side pacing for the analysis pipeline. One instance per session.
///
/// Advisory only: it does not replace server-side rate limiting.
#[derive(Debug, Clone, Default)]
pub struct ThrottleState {
    last_invocation_ms: Option<i64>,
}

impl ThrottleState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_invocation_ms(&self) -> Option<i64> {
        self.last_invocation_ms
    }

    /// Asks to start an invocation at `now_ms` (milliseconds since the epoch).
    ///
    /// An allowed call is stamped immediately, before the guarded work runs, so that
    /// overlapping calls made while it is in flight are denied. Denials leave the
    /// state untouched.
    pub fn try_acquire(&mut self, now_ms: i64) -> ThrottleDecision {
        if let Some(last) = self.last_invocation_ms {
            let elapsed = now_ms.saturating_sub(last);
            if elapsed < COOLDOWN_MS {
                let remaining = COOLDOWN_MS.saturating_sub(elapsed);
                // ceil(remaining / 1000)
                let retry_after_secs = (remaining + 999) / 1000;
                return ThrottleDecision::Denied {
                    retry_after_secs: retry_after_secs as u64,
                };
            }
        }
        self.last_invocation_ms = Some(now_ms);
        ThrottleDecision::Allowed
    }
}
