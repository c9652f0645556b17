//! Fixed-interval retry for store connections.

use std::thread;
use std::time::Duration;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default pause between connection attempts.
pub const DEFAULT_RETRY_INTERVAL: Duration = Duration::from_secs(2);

/// How often and how long to retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Pause between attempts
    pub interval: Duration,

    /// Give up after this many attempts; `None` retries forever
    pub max_attempts: Option<usize>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            interval: DEFAULT_RETRY_INTERVAL,
            max_attempts: None,
        }
    }
}

impl RetryPolicy {
    /// A policy that gives up after `max_attempts` attempts.
    pub fn bounded(interval: Duration, max_attempts: usize) -> Self {
        RetryPolicy {
            interval,
            max_attempts: Some(max_attempts.max(1)),
        }
    }
}

/// Call `connect` until it succeeds or the policy runs out of attempts.
///
/// Every failed attempt is logged. When attempts run out, the last error is
/// returned.
pub fn connect_with_retry<T, F>(mut connect: F, policy: RetryPolicy) -> Result<T>
where
    F: FnMut() -> Result<T>,
{
    let mut attempt = 1;
    loop {
        match connect() {
            Ok(connection) => {
                if attempt > 1 {
                    info!("connected after {attempt} attempts");
                }
                return Ok(connection);
            }
            Err(error) => {
                if policy.max_attempts.is_some_and(|max| attempt >= max) {
                    warn!("connection attempt {attempt} failed, giving up: {error}");
                    return Err(error);
                }
                warn!(
                    "connection attempt {attempt} failed, retrying in {:?}: {error}",
                    policy.interval
                );
            }
        }
        thread::sleep(policy.interval);
        attempt += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SentigeoError;

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.interval, Duration::from_secs(2));
        assert_eq!(policy.max_attempts, None);
    }

    #[test]
    fn test_stops_after_max_attempts() {
        let mut calls = 0;
        let result: Result<()> = connect_with_retry(
            || {
                calls += 1;
                Err(SentigeoError::storage("connection refused"))
            },
            RetryPolicy::bounded(Duration::ZERO, 3),
        );

        assert!(matches!(result, Err(SentigeoError::Storage(_))));
        assert_eq!(calls, 3);
    }

    #[test]
    fn test_succeeds_after_failures() {
        let mut calls = 0;
        let result = connect_with_retry(
            || {
                calls += 1;
                if calls < 4 {
                    Err(SentigeoError::storage("not yet"))
                } else {
                    Ok("connected")
                }
            },
            RetryPolicy {
                interval: Duration::from_millis(1),
                max_attempts: None,
            },
        );

        assert_eq!(result.unwrap(), "connected");
        assert_eq!(calls, 4);
    }
}
