//! Protocol messages.

use super::fair_number::{Reveal, Verifier};
use super::types::RunId;
use crate::crypto::{Commitment, SecretKey};
use crate::error::{FairDiceError, Result};
use serde::{Deserialize, Serialize};

/// Published before the counterparty picks its number
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitMessage {
    pub run_id: RunId,
    pub range: u64,
    pub commitment: Commitment,
}

/// Published after the run is finalized
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealMessage {
    pub run_id: RunId,
    pub key: SecretKey,
    pub value: u64,
    pub contribution: u64,
    pub result: u64,
}

impl RevealMessage {
    pub fn reveal(&self) -> Reveal {
        Reveal {
            key: self.key.clone(),
            value: self.value,
        }
    }
}

/// Everything needed to re-check one run after the fact
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundTranscript {
    pub commit: CommitMessage,
    pub reveal: RevealMessage,
}

impl RoundTranscript {
    /// Replay the counterparty's checks and return the verified result
    pub fn verify(&self) -> Result<u64> {
        if self.commit.run_id != self.reveal.run_id {
            return Err(FairDiceError::MalformedTranscript(format!(
                "reveal for run {} paired with commitment for run {}",
                self.reveal.run_id, self.commit.run_id
            )));
        }

        let mut verifier = Verifier::from_message(&self.commit)?;
        verifier.contribute(self.reveal.contribution)?;
        let result = verifier.verify_and_combine(&self.reveal.reveal())?;

        if result != self.reveal.result {
            return Err(FairDiceError::CommitmentMismatch);
        }
        Ok(result)
    }
}
