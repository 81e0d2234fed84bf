//! Error types for fair dice operations.

use crate::protocol::Player;
use thiserror::Error;

/// Result type alias for fair dice operations
pub type Result<T> = std::result::Result<T, FairDiceError>;

/// Errors from the fair number protocol, dice and tables
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FairDiceError {
    /// Protocol range must be at least 1
    #[error("invalid range {0}: must be at least 1")]
    InvalidRange(u64),

    /// Counterparty contribution outside `[0, range)`
    #[error("invalid contribution {value}: must be in 0..{range}")]
    InvalidContribution { value: u64, range: u64 },

    /// Protocol step requested out of order
    #[error("protocol step `{operation}` not allowed in state {state}")]
    ProtocolSequenceError {
        operation: &'static str,
        state: &'static str,
    },

    /// Revealed key and value do not reproduce the published commitment
    #[error("fairness check failed")]
    CommitmentMismatch,

    /// The secure entropy source could not be read
    #[error("secure entropy unavailable: {0}")]
    EntropyUnavailable(String),

    /// HMAC rejected the key
    #[error("invalid HMAC key length")]
    InvalidKeyLength,

    /// A die needs at least one face
    #[error("die must have at least one face")]
    EmptyDie,

    /// A table needs at least one die
    #[error("die set is empty")]
    EmptyDieSet,

    /// Face index outside `[0, face_count)`
    #[error("index {index} out of range for {len} faces")]
    IndexOutOfRange { index: usize, len: usize },

    /// Die already taken or not part of the set
    #[error("die {0} is not available")]
    DieUnavailable(usize),

    /// Player already holds a die from this game
    #[error("{0} already chose a die")]
    DieAlreadyChosen(Player),

    /// Transcript message could not be decoded
    #[error("malformed transcript: {0}")]
    MalformedTranscript(String),
}
