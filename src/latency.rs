// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::FinanceError;

const SLICE: Duration = Duration::from_millis(25);

/// Shared flag checked by in-flight simulated calls.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Simulated network latency. `Latency::none()` skips every wait.
#[derive(Debug, Clone, Default)]
pub struct Latency {
    enabled: bool,
    token: CancelToken,
}

impl Latency {
    pub fn new(enabled: bool) -> Self {
        Latency {
            enabled,
            token: CancelToken::new(),
        }
    }

    pub fn none() -> Self {
        Latency::new(false)
    }

    pub fn with_token(mut self, token: CancelToken) -> Self {
        self.token = token;
        self
    }

    pub fn token(&self) -> &CancelToken {
        &self.token
    }

    /// Sleep for `total`, returning early with `Cancelled` once the token trips.
    pub fn wait(&self, total: Duration) -> Result<(), FinanceError> {
        if self.token.is_cancelled() {
            return Err(FinanceError::Cancelled);
        }
        if !self.enabled {
            return Ok(());
        }
        let deadline = Instant::now() + total;
        loop {
            let now = Instant::now();
            if now >= deadline {
                return Ok(());
            }
            thread::sleep(SLICE.min(deadline - now));
            if self.token.is_cancelled() {
                return Err(FinanceError::Cancelled);
            }
        }
    }
}
