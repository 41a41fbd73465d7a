//! Event emission patterns shared by the marketplace contracts

use soroban_sdk::{Env, IntoVal, Symbol, Val};

/// Uniform event publication helper
pub struct Events;

impl Events {
    /// Publish a contract event under a single symbol topic.
    ///
    /// # Arguments
    /// * `e` - The environment
    /// * `topic` - Event name symbol
    /// * `data` - Event payload (any value convertible to `Val`)
    pub fn emit<D>(e: &Env, topic: Symbol, data: D)
    where
        D: IntoVal<Env, Val>,
    {
        e.events().publish((topic,), data);
    }
}
