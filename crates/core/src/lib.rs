//! Core duel rules. Keep this crate free of IO and platform concerns.

pub mod cards;
pub mod catalog;
pub mod deck;
pub mod duel;
pub mod effects;
pub mod events;
pub mod rng;
pub mod state;

pub use cards::*;
pub use catalog::*;
pub use deck::*;
pub use duel::*;
pub use effects::*;
pub use events::*;
pub use rng::*;
pub use state::*;
