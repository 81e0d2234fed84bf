//! Dice, win-probability tables and game state.

mod die;
mod state;
mod table;

pub use die::Die;
pub use state::{GameOutcome, GameState};
pub use table::{compute_table, Probability, ProbabilityMatrix};
