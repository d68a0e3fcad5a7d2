use time::{Duration, OffsetDateTime};

use crate::model::Account;

pub const DEFAULT_THRESHOLD: u32 = 5;
pub const DEFAULT_LOCK_DURATION: Duration = Duration::minutes(30);
pub const MIN_LOCK_DURATION: Duration = Duration::seconds(1);

/// Failed-attempt lockout bookkeeping.
///
/// An account is `Unlocked(n)` while `lock_until` is unset or in the past, and `Locked`
/// while `lock_until` is in the future. Expiry is evaluated lazily at the next attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LockoutPolicy {
    pub threshold: u32,
    pub duration: Duration,
}

impl Default for LockoutPolicy {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            duration: DEFAULT_LOCK_DURATION,
        }
    }
}

impl LockoutPolicy {
    /// A threshold below 1 or a lock shorter than [`MIN_LOCK_DURATION`] is raised to the
    /// minimum; a lock must always end strictly after the failure that set it.
    pub fn new(threshold: u32, duration: Duration) -> Self {
        Self {
            threshold: threshold.max(1),
            duration: duration.max(MIN_LOCK_DURATION),
        }
    }

    pub fn locked_until(&self, account: &Account, now: OffsetDateTime) -> Option<OffsetDateTime> {
        account.lock_until.filter(|until| *until > now)
    }

    pub fn is_locked(&self, account: &Account, now: OffsetDateTime) -> bool {
        self.locked_until(account, now).is_some()
    }

    /// Records one failed attempt. Returns the new lock expiry when this attempt locked the
    /// account. A currently locked account is left untouched.
    pub fn register_failure(
        &self,
        account: &mut Account,
        now: OffsetDateTime,
    ) -> Option<OffsetDateTime> {
        if self.is_locked(account, now) {
            return None;
        }
        account.failed_attempts = account.failed_attempts.saturating_add(1);
        account.updated_at = now;
        if account.failed_attempts >= self.threshold {
            let until = now + self.duration;
            account.lock_until = Some(until);
            return Some(until);
        }
        None
    }

    pub fn register_success(&self, account: &mut Account, now: OffsetDateTime) {
        account.failed_attempts = 0;
        account.lock_until = None;
        account.last_login_at = Some(now);
        account.updated_at = now;
    }
}

#[cfg(test)]
#[path = "tests/lockout_tests.rs"]
mod tests;
