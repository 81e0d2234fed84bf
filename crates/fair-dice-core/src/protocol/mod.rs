//! Fair number protocol: state machine, verification and transcript messages.

mod fair_number;
mod messages;
mod types;

pub use fair_number::{combine, ProtocolRun, Reveal, Verifier};
pub use messages::{CommitMessage, RevealMessage, RoundTranscript};
pub use types::{Player, RunId, RunState};
