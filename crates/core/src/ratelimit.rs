// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Token-bucket rate limiters: `start_limit` and
//! `auto_stop_ratelimit`. Refills on the monotonic clock; current tokens and
//! the last-refill timestamp are the only state that must survive a
//! serialize/deserialize round-trip.

use crate::clock::Clock;
use serde::{Deserialize, Serialize};

/// Token-bucket configuration plus live state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimiter {
    /// Maximum tokens the bucket holds.
    pub burst: u32,
    /// Window over which `burst` tokens refill, in milliseconds.
    pub interval_ms: u64,
    /// Tokens currently available.
    tokens: u32,
    /// Monotonic-clock timestamp of the last refill.
    last_refill_ms: u64,
}

impl RateLimiter {
    pub fn new(burst: u32, interval_ms: u64) -> Self {
        Self { burst, interval_ms, tokens: burst, last_refill_ms: 0 }
    }

    /// A rate limiter with `burst == 0`: `try_consume` always succeeds and
    /// the limiter never trips. An absent limit should not itself misbehave.
    pub fn disabled() -> Self {
        Self { burst: 0, interval_ms: 0, tokens: 0, last_refill_ms: 0 }
    }

    pub fn is_disabled(&self) -> bool {
        self.burst == 0
    }

    fn refill(&mut self, now_ms: u64) {
        if self.interval_ms == 0 {
            return;
        }
        let elapsed = now_ms.saturating_sub(self.last_refill_ms);
        if elapsed >= self.interval_ms {
            self.tokens = self.burst;
            self.last_refill_ms = now_ms;
        }
    }

    /// Consume one token. Returns `true` if a token was available (the
    /// transition is permitted), `false` if the bucket is exhausted (the
    /// rate limit has tripped).
    pub fn try_consume(&mut self, clock: &impl Clock) -> bool {
        if self.is_disabled() {
            return true;
        }
        let now_ms = clock.monotonic_ms();
        self.refill(now_ms);
        if self.tokens > 0 {
            self.tokens -= 1;
            true
        } else {
            false
        }
    }

    pub fn tokens(&self) -> u32 {
        self.tokens
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::disabled()
    }
}

#[cfg(test)]
#[path = "ratelimit_tests.rs"]
mod tests;
