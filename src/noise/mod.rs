//! Noise Layer - Temporally Correlated Exploration Noise
//!
//! Discrete-time Ornstein-Uhlenbeck generators:
//! - `OUProcess`: mean reversion toward zero
//! - `OUProcessWithMemory`: mean reversion toward a delayed average of its own past
//!
//! Consumers call `reset` before a rollout and `sample` once per tick.

pub mod params;
pub mod ou_process;
pub mod ou_memory;

pub use params::{MemoryParams, OUParams, ParamsError, DEFAULT_SEED};
pub use ou_process::OUProcess;
pub use ou_memory::OUProcessWithMemory;

/// A stateful noise generator stepped once per simulation tick
pub trait NoiseProcess {
    /// Restore the initial state
    fn reset(&mut self);

    /// Advance one step and return a copy of the new state
    fn sample(&mut self) -> Vec<f64>;

    /// Current state without advancing
    fn state(&self) -> &[f64];

    /// Dimensionality, fixed at construction
    fn dim(&self) -> usize {
        self.state().len()
    }
}

impl<P: NoiseProcess + ?Sized> NoiseProcess for Box<P> {
    fn reset(&mut self) {
        (**self).reset()
    }

    fn sample(&mut self) -> Vec<f64> {
        (**self).sample()
    }

    fn state(&self) -> &[f64] {
        (**self).state()
    }
}
