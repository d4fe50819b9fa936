// Copyright (c) Contributors to the TPK project.
// SPDX-License-Identifier: Apache-2.0

//! Cooperative cancellation for long-running resolutions.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[cfg(test)]
#[path = "./cancel_test.rs"]
mod cancel_test;

/// Cancellation flag polled by containers at fixed checkpoints.
///
/// Clones share the underlying flag, so a token handed to a resolution can
/// be tripped from another thread (for example a signal handler). A
/// cancelled resolution returns an empty successful result, never an error.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a token in the not-cancelled state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Signal cancellation. Idempotent; there is no way to un-cancel.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation has been signalled.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}
