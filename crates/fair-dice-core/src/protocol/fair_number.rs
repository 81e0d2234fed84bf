//! Commit-reveal fair number generation.
//!
//! A run walks `Init -> Committed -> ContributionReceived -> Revealed ->
//! Finalized`. The generator commits to a secret value before the
//! counterparty picks its own number, and the result is
//! `(secret + contribution) mod range`, so neither side alone decides it.
//! Every run draws a fresh key and value; nothing carries over between runs.

use super::messages::{CommitMessage, RevealMessage, RoundTranscript};
use super::types::{RunId, RunState};
use crate::crypto::{Commitment, CryptoProvider, SecretKey};
use crate::error::{FairDiceError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Combine both contributions: `(secret_value + contribution) mod range`
pub fn combine(secret_value: u64, contribution: u64, range: u64) -> Result<u64> {
    if range == 0 {
        return Err(FairDiceError::InvalidRange(range));
    }
    let sum = u128::from(secret_value) + u128::from(contribution);
    Ok((sum % u128::from(range)) as u64)
}

fn check_contribution(value: u64, range: u64) -> Result<()> {
    if value >= range {
        return Err(FairDiceError::InvalidContribution { value, range });
    }
    Ok(())
}

/// Key and value held back until the reveal
#[derive(Zeroize, ZeroizeOnDrop)]
struct Secret {
    key: SecretKey,
    value: u64,
}

/// Disclosed key and value of a run
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reveal {
    pub key: SecretKey,
    pub value: u64,
}

impl Reveal {
    /// Recompute the commitment from the disclosed fields
    pub fn commitment(&self) -> Result<Commitment> {
        Commitment::new(&self.key, self.value)
    }

    /// Check the disclosed fields against a published commitment
    pub fn verify(&self, commitment: &Commitment) -> Result<()> {
        commitment.verify(&self.key, self.value)
    }
}

/// One fair number request, owned by the generating side
pub struct ProtocolRun {
    id: RunId,
    range: u64,
    state: RunState,
    secret: Option<Secret>,
    commitment: Option<Commitment>,
    contribution: Option<u64>,
    revealed: Option<Reveal>,
    result: Option<u64>,
}

impl ProtocolRun {
    /// Create a run for a result in `[0, range)`
    pub fn new(range: u64) -> Result<Self> {
        if range == 0 {
            return Err(FairDiceError::InvalidRange(range));
        }
        Ok(Self {
            id: RunId::new(),
            range,
            state: RunState::Init,
            secret: None,
            commitment: None,
            contribution: None,
            revealed: None,
            result: None,
        })
    }

    /// Create a run and commit in one step
    pub fn start<P: CryptoProvider + ?Sized>(range: u64, provider: &mut P) -> Result<Self> {
        let mut run = Self::new(range)?;
        run.commit(provider)?;
        Ok(run)
    }

    pub fn id(&self) -> RunId {
        self.id
    }

    pub fn range(&self) -> u64 {
        self.range
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Published commitment, once committed
    pub fn commitment(&self) -> Option<Commitment> {
        self.commitment
    }

    pub fn contribution(&self) -> Option<u64> {
        self.contribution
    }

    /// Final result, once finalized
    pub fn result(&self) -> Option<u64> {
        self.result
    }

    /// Draw the key and value and publish the commitment.
    ///
    /// A range of 1 still runs the full protocol so the round keeps a
    /// verifiable transcript.
    pub fn commit<P: CryptoProvider + ?Sized>(&mut self, provider: &mut P) -> Result<Commitment> {
        self.expect_state(RunState::Init, "commit")?;

        let key = SecretKey::generate(provider)?;
        let value = provider.secure_random_int(self.range)?;
        let commitment = Commitment::new(&key, value)?;

        self.secret = Some(Secret { key, value });
        self.commitment = Some(commitment);
        self.state = RunState::Committed;
        Ok(commitment)
    }

    /// Record the counterparty's number in `[0, range)`
    pub fn supply_contribution(&mut self, value: u64) -> Result<()> {
        self.expect_state(RunState::Committed, "supply_contribution")?;
        check_contribution(value, self.range)?;

        self.contribution = Some(value);
        self.state = RunState::ContributionReceived;
        Ok(())
    }

    /// Disclose the key and value.
    ///
    /// Only allowed after the contribution is in: an earlier reveal would let
    /// the counterparty pick its number with the secret in hand. The reveal is
    /// checked against the published commitment before it is handed out; a
    /// mismatch ends the run.
    pub fn reveal(&mut self) -> Result<Reveal> {
        self.expect_state(RunState::ContributionReceived, "reveal")?;

        let commitment = self.commitment.ok_or_else(|| self.sequence_error("reveal"))?;
        let secret = self.secret.take().ok_or_else(|| self.sequence_error("reveal"))?;
        let reveal = Reveal {
            key: secret.key.clone(),
            value: secret.value,
        };
        drop(secret);

        reveal.verify(&commitment)?;

        self.revealed = Some(reveal.clone());
        self.state = RunState::Revealed;
        Ok(reveal)
    }

    /// Combine the revealed value with the contribution
    pub fn finalize(&mut self) -> Result<u64> {
        self.expect_state(RunState::Revealed, "finalize")?;

        let value = self
            .revealed
            .as_ref()
            .map(|reveal| reveal.value)
            .ok_or_else(|| self.sequence_error("finalize"))?;
        let contribution = self
            .contribution
            .ok_or_else(|| self.sequence_error("finalize"))?;
        let result = combine(value, contribution, self.range)?;

        self.result = Some(result);
        self.state = RunState::Finalized;
        Ok(result)
    }

    /// Message announcing the commitment
    pub fn commit_message(&self) -> Result<CommitMessage> {
        let commitment = self
            .commitment
            .ok_or_else(|| self.sequence_error("commit_message"))?;
        Ok(CommitMessage {
            run_id: self.id,
            range: self.range,
            commitment,
        })
    }

    /// Full record of a finalized run
    pub fn transcript(&self) -> Result<RoundTranscript> {
        self.expect_state(RunState::Finalized, "transcript")?;

        let commit = self.commit_message()?;
        let (reveal, contribution, result) = match (&self.revealed, self.contribution, self.result)
        {
            (Some(reveal), Some(contribution), Some(result)) => (reveal, contribution, result),
            _ => return Err(self.sequence_error("transcript")),
        };
        Ok(RoundTranscript {
            commit,
            reveal: RevealMessage {
                run_id: self.id,
                key: reveal.key.clone(),
                value: reveal.value,
                contribution,
                result,
            },
        })
    }

    fn expect_state(&self, expected: RunState, operation: &'static str) -> Result<()> {
        if self.state != expected {
            return Err(self.sequence_error(operation));
        }
        Ok(())
    }

    fn sequence_error(&self, operation: &'static str) -> FairDiceError {
        FairDiceError::ProtocolSequenceError {
            operation,
            state: self.state.as_str(),
        }
    }
}

impl fmt::Debug for ProtocolRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProtocolRun")
            .field("id", &self.id)
            .field("range", &self.range)
            .field("state", &self.state)
            .field("commitment", &self.commitment)
            .field("contribution", &self.contribution)
            .field("result", &self.result)
            .finish_non_exhaustive()
    }
}

/// The counterparty's view of a run.
///
/// Holds only what the counterparty legitimately knows: the range, the
/// published commitment and its own contribution.
#[derive(Clone, Debug)]
pub struct Verifier {
    range: u64,
    commitment: Commitment,
    contribution: Option<u64>,
}

impl Verifier {
    pub fn new(range: u64, commitment: Commitment) -> Result<Self> {
        if range == 0 {
            return Err(FairDiceError::InvalidRange(range));
        }
        Ok(Self {
            range,
            commitment,
            contribution: None,
        })
    }

    pub fn from_message(message: &CommitMessage) -> Result<Self> {
        Self::new(message.range, message.commitment)
    }

    pub fn range(&self) -> u64 {
        self.range
    }

    pub fn commitment(&self) -> &Commitment {
        &self.commitment
    }

    pub fn contribution(&self) -> Option<u64> {
        self.contribution
    }

    /// Pick our number, once
    pub fn contribute(&mut self, value: u64) -> Result<()> {
        if self.contribution.is_some() {
            return Err(FairDiceError::ProtocolSequenceError {
                operation: "contribute",
                state: RunState::ContributionReceived.as_str(),
            });
        }
        check_contribution(value, self.range)?;
        self.contribution = Some(value);
        Ok(())
    }

    /// Check the reveal against the commitment and compute the result.
    ///
    /// A revealed value outside `[0, range)` is rejected like a bad tag: it
    /// cannot have come from an honest draw.
    pub fn verify_and_combine(&self, reveal: &Reveal) -> Result<u64> {
        let contribution = self
            .contribution
            .ok_or(FairDiceError::ProtocolSequenceError {
                operation: "verify_and_combine",
                state: RunState::Committed.as_str(),
            })?;
        if reveal.value >= self.range {
            return Err(FairDiceError::CommitmentMismatch);
        }
        reveal.verify(&self.commitment)?;
        combine(reveal.value, contribution, self.range)
    }
}
