//! Pure controller logic: query derivation and state reduction.

pub mod query;
pub mod reducer;

pub use query::{QueryTarget, resolve};
pub use reducer::{Action, Effect, Transition, initial_effects, reduce};
