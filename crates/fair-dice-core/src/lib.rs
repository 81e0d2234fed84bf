//! Fair Dice Core Library
//!
//! This crate provides the commit-reveal protocol, cryptographic primitives,
//! and dice logic for a two-party game where neither side can bias a roll:
//! - `crypto`: secure randomness capability and HMAC-SHA256 commitments
//! - `protocol`: the fair number state machine and its transcript messages
//! - `games`: dice, win-probability tables and die selection

pub mod crypto;
pub mod error;
pub mod games;
pub mod protocol;

pub use crypto::{Commitment, CryptoProvider, OsCryptoProvider, SecretKey, SeededCryptoProvider};
pub use error::{FairDiceError, Result};
pub use games::{compute_table, Die, GameOutcome, GameState, Probability, ProbabilityMatrix};
pub use protocol::{Player, ProtocolRun, Reveal, RoundTranscript, RunId, RunState, Verifier};
