//! Reactive articles state
//!
//! [`ArticlesState`] is the pure transition logic; [`ArticlesStore`] owns
//! one on a dedicated task and is the only way to mutate it.

pub mod machine;
pub mod store;

pub use machine::{ArticlesSnapshot, ArticlesState, Completion, FetchTicket, Phase};
pub use store::ArticlesStore;
