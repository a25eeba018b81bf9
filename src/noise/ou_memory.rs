//! OU Process with Delayed Memory Feedback
//!
//! Extends the plain OU recursion with a pull toward a delayed moving average
//! of the process's own trajectory:
//!
//!   state <- state * (1 - theta) + theta * sign * avg_{t - delay} + sigma * N(0, 1)
//!
//! Each dimension owns a `DelayedStat<Ewma>` seeded at 0.0. On every step the
//! delayed average is read first, then the pre-update state is pushed into the
//! delay buffer, so a state value only influences the drift `delay` steps later.
//! With `sign = 1` the process lingers around where it recently was; with
//! `sign = -1` it is pushed away from it.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

use super::params::{MemoryParams, OUParams, ParamsError};
use super::NoiseProcess;
use crate::averages::{DelayedStat, Ewma, Statistic};

/// OU noise whose drift feeds back a delayed average of past states
#[derive(Debug, Clone)]
pub struct OUProcessWithMemory<R = StdRng> {
    decay_theta: f64,
    sigma: f64,
    memory: MemoryParams,
    initial_value: Vec<f64>,
    state: Vec<f64>,
    /// One delayed average per dimension, allocated once
    averages: Vec<DelayedStat<Ewma>>,
    rng: R,
}

impl OUProcessWithMemory<StdRng> {
    /// Create a process seeded with `seed`
    ///
    /// # Panics
    /// Panics if `memory.halflife` is not finite and strictly positive.
    pub fn new(
        decay_theta: f64,
        sigma: f64,
        initial_value: &[f64],
        memory: MemoryParams,
        seed: u64,
    ) -> Self {
        Self::with_rng(
            decay_theta,
            sigma,
            initial_value,
            memory,
            StdRng::seed_from_u64(seed),
        )
    }

    /// Validate both parameter sets and build a seeded process from them
    pub fn from_params(params: &OUParams, memory: &MemoryParams) -> Result<Self, ParamsError> {
        params.validate()?;
        memory.validate()?;
        Ok(Self::new(
            params.decay_theta,
            params.sigma,
            &params.initial_value,
            memory.clone(),
            params.seed,
        ))
    }
}

impl<R: Rng> OUProcessWithMemory<R> {
    /// Create a process driven by a caller-supplied generator
    ///
    /// # Panics
    /// Panics if `memory.halflife` is not finite and strictly positive.
    pub fn with_rng(
        decay_theta: f64,
        sigma: f64,
        initial_value: &[f64],
        memory: MemoryParams,
        rng: R,
    ) -> Self {
        tracing::debug!(
            "OU process with memory: theta={} sigma={} dim={} halflife={} delay={} sign={}",
            decay_theta,
            sigma,
            initial_value.len(),
            memory.halflife,
            memory.delay,
            memory.sign
        );
        let averages = (0..initial_value.len())
            .map(|_| DelayedStat::new(Ewma::with_initial(memory.halflife, 0.0), memory.delay))
            .collect();
        Self {
            decay_theta,
            sigma,
            memory,
            initial_value: initial_value.to_vec(),
            state: initial_value.to_vec(),
            averages,
            rng,
        }
    }

    /// Restore the initial state and wipe every delayed average
    ///
    /// The generator is not rewound.
    pub fn reset(&mut self) {
        self.state.copy_from_slice(&self.initial_value);
        for avg in self.averages.iter_mut() {
            avg.reset();
        }
        tracing::debug!("OU process with memory reset, dim={}", self.state.len());
    }

    /// Advance one step and return a copy of the new state
    pub fn sample(&mut self) -> Vec<f64> {
        let retain = 1.0 - self.decay_theta;
        let feedback = self.decay_theta * self.memory.sign;

        for (s, avg) in self.state.iter_mut().zip(self.averages.iter_mut()) {
            let z: f64 = self.rng.sample(StandardNormal);

            // Seeded at 0.0, so the read cannot fail
            let past = avg.get().unwrap_or(0.0);
            avg.update(*s);

            *s = *s * retain + feedback * past + self.sigma * z;
        }
        tracing::trace!("OU memory sample: {:?}", self.state);
        self.state.clone()
    }

    /// Delayed averages as they will be read by the next `sample`
    pub fn memory_state(&self) -> Vec<f64> {
        self.averages
            .iter()
            .map(|avg| avg.get().unwrap_or(0.0))
            .collect()
    }

    pub fn state(&self) -> &[f64] {
        &self.state
    }

    pub fn dim(&self) -> usize {
        self.state.len()
    }

    pub fn decay_theta(&self) -> f64 {
        self.decay_theta
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    pub fn memory(&self) -> &MemoryParams {
        &self.memory
    }

    pub fn initial_value(&self) -> &[f64] {
        &self.initial_value
    }
}

impl<R: Rng> NoiseProcess for OUProcessWithMemory<R> {
    fn reset(&mut self) {
        OUProcessWithMemory::reset(self)
    }

    fn sample(&mut self) -> Vec<f64> {
        OUProcessWithMemory::sample(self)
    }

    fn state(&self) -> &[f64] {
        OUProcessWithMemory::state(self)
    }
}
