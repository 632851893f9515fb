//! Crawl frontier
//!
//! A FIFO queue of pending URLs plus the run's fetch accounting. Every
//! decision that depends on the crawl limit is made under one lock, so
//! concurrent workers can never push the fetched count past the limit.
//!
//! A URL moves through three counters: queued, in flight (dequeued, fetch not
//! finished) and fetched. `fetched + in_flight` never exceeds the limit, and a
//! new URL is only queued while `fetched + in_flight + queued < limit`.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct FrontierState {
    queue: VecDeque<String>,
    fetched: usize,
    in_flight: usize,
}

/// Bounded breadth-first frontier
#[derive(Debug)]
pub struct Frontier {
    state: Mutex<FrontierState>,
    limit: usize,
}

impl Frontier {
    pub fn new(limit: usize) -> Self {
        Self {
            state: Mutex::new(FrontierState::default()),
            limit,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Queues `url` if the limit leaves room for it
    ///
    /// Returns false, leaving the queue untouched, once
    /// `fetched + in_flight + queued` has reached the limit.
    pub fn try_push(&self, url: String) -> bool {
        let mut state = self.lock();
        if state.fetched + state.in_flight + state.queue.len() >= self.limit {
            return false;
        }
        state.queue.push_back(url);
        true
    }

    /// Dequeues the oldest URL and marks it in flight
    ///
    /// Returns `None` when the queue is empty or the limit is already covered
    /// by fetched and in-flight URLs.
    pub fn next(&self) -> Option<String> {
        let mut state = self.lock();
        if state.fetched + state.in_flight >= self.limit {
            return None;
        }
        let url = state.queue.pop_front()?;
        state.in_flight += 1;
        Some(url)
    }

    /// Records a successful fetch for an in-flight URL; returns the new count
    pub fn record_fetch(&self) -> usize {
        let mut state = self.lock();
        state.in_flight = state.in_flight.saturating_sub(1);
        state.fetched += 1;
        state.fetched
    }

    /// Releases an in-flight URL that was skipped or failed
    pub fn release(&self) {
        let mut state = self.lock();
        state.in_flight = state.in_flight.saturating_sub(1);
    }

    pub fn fetched(&self) -> usize {
        self.lock().fetched
    }

    pub fn queued(&self) -> usize {
        self.lock().queue.len()
    }

    pub fn in_flight(&self) -> usize {
        self.lock().in_flight
    }

    /// Returns true once the fetched count has reached the limit
    pub fn limit_reached(&self) -> bool {
        self.lock().fetched >= self.limit
    }

    fn lock(&self) -> MutexGuard<'_, FrontierState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
