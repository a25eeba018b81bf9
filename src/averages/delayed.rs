//! Delayed Statistic
//!
//! Decorator that holds each input in a bounded FIFO for `delay` updates before
//! forwarding it to the wrapped estimator. Reads are not delayed: `get` returns
//! whatever the wrapped estimator has seen so far, which is every input except
//! the `delay` most recent ones.

use std::collections::VecDeque;

use super::{Statistic, StatError};

/// Fixed-lag wrapper around any `Statistic`
#[derive(Debug, Clone)]
pub struct DelayedStat<S> {
    /// Wrapped estimator, only sees inputs once they leave the buffer
    underlying: S,
    /// Number of updates an input waits before being forwarded
    delay: usize,
    /// Pending inputs, oldest at the front, never longer than `delay`
    buffer: VecDeque<f64>,
}

impl<S: Statistic> DelayedStat<S> {
    pub fn new(underlying: S, delay: usize) -> Self {
        Self {
            underlying,
            delay,
            buffer: VecDeque::with_capacity(delay),
        }
    }

    pub fn delay(&self) -> usize {
        self.delay
    }

    /// Number of inputs waiting in the buffer
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// True once the next update will forward a value to the wrapped estimator
    pub fn is_primed(&self) -> bool {
        self.buffer.len() == self.delay
    }

    pub fn underlying(&self) -> &S {
        &self.underlying
    }

    /// Unwrap, dropping any inputs still in the buffer
    pub fn into_inner(self) -> S {
        self.underlying
    }
}

impl<S: Statistic> Statistic for DelayedStat<S> {
    fn update(&mut self, x: f64) {
        if self.delay == 0 {
            self.underlying.update(x);
            return;
        }
        if self.buffer.len() == self.delay {
            if let Some(oldest) = self.buffer.pop_front() {
                self.underlying.update(oldest);
            }
        }
        self.buffer.push_back(x);
    }

    fn get(&self) -> Result<f64, StatError> {
        self.underlying.get()
    }

    fn reset(&mut self) {
        self.buffer.clear();
        self.underlying.reset();
    }
}
