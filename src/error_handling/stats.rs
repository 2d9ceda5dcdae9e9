//! Processing statistics tracking.
//!
//! This module provides thread-safe statistics tracking for errors and
//! informational metrics across a batch of resolutions.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::{ErrorType, InfoType};
use crate::fetch::RedirectOutcome;

/// Thread-safe processing statistics tracker.
///
/// Tracks errors and informational metrics using atomic counters, allowing
/// concurrent access from multiple tasks. All types are initialized to zero
/// on creation.
///
/// # Thread Safety
///
/// This struct is thread-safe and can be shared across multiple tasks using `Arc`.
pub struct ProcessingStats {
    errors: HashMap<ErrorType, AtomicUsize>,
    info: HashMap<InfoType, AtomicUsize>,
}

impl Default for ProcessingStats {
    fn default() -> Self {
        Self::new()
    }
}

fn zeroed<K: IntoEnumIterator + Eq + Hash>() -> HashMap<K, AtomicUsize> {
    K::iter().map(|key| (key, AtomicUsize::new(0))).collect()
}

fn bump<K: Eq + Hash + Debug>(counters: &HashMap<K, AtomicUsize>, key: K) {
    match counters.get(&key) {
        Some(counter) => {
            counter.fetch_add(1, Ordering::Relaxed);
        }
        None => log::error!("No counter registered for {key:?}"),
    }
}

fn read<K: Eq + Hash>(counters: &HashMap<K, AtomicUsize>, key: K) -> usize {
    counters
        .get(&key)
        .map_or(0, |counter| counter.load(Ordering::SeqCst))
}

impl ProcessingStats {
    /// Creates a tracker with every counter at zero.
    pub fn new() -> Self {
        Self {
            errors: zeroed(),
            info: zeroed(),
        }
    }

    /// Counts one failure of the given category.
    pub fn increment_error(&self, error: ErrorType) {
        bump(&self.errors, error);
    }

    /// Counts one informational event.
    pub fn increment_info(&self, info_type: InfoType) {
        bump(&self.info, info_type);
    }

    /// Current count for an error category.
    pub fn get_error_count(&self, error: ErrorType) -> usize {
        read(&self.errors, error)
    }

    /// Current count for an info event.
    pub fn get_info_count(&self, info_type: InfoType) -> usize {
        read(&self.info, info_type)
    }

    /// Sum over all error categories.
    pub fn total_errors(&self) -> usize {
        self.errors.values().map(|c| c.load(Ordering::SeqCst)).sum()
    }

    /// Sum over all info events.
    pub fn total_info(&self) -> usize {
        self.info.values().map(|c| c.load(Ordering::SeqCst)).sum()
    }

    /// Records the counters implied by one resolution outcome.
    ///
    /// An outcome can contribute several info counters (a redirected page
    /// that ends on a cookie wall counts twice) but at most one error.
    pub fn record_outcome(&self, outcome: &RedirectOutcome) {
        if let Some(error_type) = outcome.error_type {
            self.increment_error(error_type);
        }
        if outcome.hop_count > 0 {
            self.increment_info(InfoType::Redirected);
        }
        if outcome.note.is_some() {
            self.increment_info(InfoType::MaxRedirectsReached);
        }
        if outcome.cookie_wall_suspected {
            self.increment_info(InfoType::CookieWallSuspected);
        }
    }

    /// Logs every non-zero counter at `info` level.
    pub fn log_summary(&self) {
        let total_errors = self.total_errors();
        if total_errors > 0 {
            log::info!("Error counts ({} total):", total_errors);
            for error_type in ErrorType::iter() {
                let count = self.get_error_count(error_type);
                if count > 0 {
                    log::info!("   {}: {}", error_type.as_str(), count);
                }
            }
        }

        let total_info = self.total_info();
        if total_info > 0 {
            log::info!("Info counts ({} total):", total_info);
            for info_type in InfoType::iter() {
                let count = self.get_info_count(info_type);
                if count > 0 {
                    log::info!("   {}: {}", info_type.as_str(), count);
                }
            }
        }
    }
}
