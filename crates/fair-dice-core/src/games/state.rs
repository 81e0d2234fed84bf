//! Die pool and selection for one game.

use super::die::Die;
use super::table::ProbabilityMatrix;
use crate::crypto::CryptoProvider;
use crate::error::{FairDiceError, Result};
use crate::protocol::Player;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a game
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    HumanWins,
    HouseWins,
    Tie,
}

impl GameOutcome {
    /// Higher score wins
    pub fn judge(human_score: i64, house_score: i64) -> Self {
        if human_score > house_score {
            GameOutcome::HumanWins
        } else if house_score > human_score {
            GameOutcome::HouseWins
        } else {
            GameOutcome::Tie
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameOutcome::HumanWins => "You win",
            GameOutcome::HouseWins => "House wins",
            GameOutcome::Tie => "Tie",
        }
    }
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Dice on the table and who holds which
#[derive(Clone, Debug)]
pub struct GameState {
    dice: Vec<Die>,
    available: Vec<usize>,
    human_die: Option<usize>,
    house_die: Option<usize>,
}

impl GameState {
    pub fn new(dice: Vec<Die>) -> Result<Self> {
        if dice.is_empty() {
            return Err(FairDiceError::EmptyDieSet);
        }
        let available = (0..dice.len()).collect();
        Ok(Self {
            dice,
            available,
            human_die: None,
            house_die: None,
        })
    }

    /// All dice, in their original order
    pub fn dice(&self) -> &[Die] {
        &self.dice
    }

    pub fn die(&self, index: usize) -> Option<&Die> {
        self.dice.get(index)
    }

    /// Indices of dice nobody has picked yet
    pub fn available(&self) -> &[usize] {
        &self.available
    }

    pub fn chosen(&self, player: Player) -> Option<usize> {
        match player {
            Player::Human => self.human_die,
            Player::House => self.house_die,
        }
    }

    pub fn chosen_die(&self, player: Player) -> Option<&Die> {
        self.chosen(player).and_then(|index| self.dice.get(index))
    }

    /// Take die `index` from the pool for `player`
    pub fn select(&mut self, player: Player, index: usize) -> Result<&Die> {
        if self.chosen(player).is_some() {
            return Err(FairDiceError::DieAlreadyChosen(player));
        }
        let position = self
            .available
            .iter()
            .position(|&i| i == index)
            .ok_or(FairDiceError::DieUnavailable(index))?;
        self.available.remove(position);

        match player {
            Player::Human => self.human_die = Some(index),
            Player::House => self.house_die = Some(index),
        }
        Ok(&self.dice[index])
    }

    /// Put every die back in the pool
    pub fn reset(&mut self) {
        self.available = (0..self.dice.len()).collect();
        self.human_die = None;
        self.house_die = None;
    }

    /// Available die with the best chance against die `opponent`.
    /// Ties go to the lowest index.
    pub fn best_counter(&self, opponent: usize, table: &ProbabilityMatrix) -> Option<usize> {
        let mut best: Option<(usize, _)> = None;
        for &candidate in &self.available {
            let Some(p) = table.get(candidate, opponent) else {
                continue;
            };
            if best.map_or(true, |(_, best_p)| p > best_p) {
                best = Some((candidate, p));
            }
        }
        best.map(|(index, _)| index)
    }

    /// The house's pick: best counter to the human's die if the human has
    /// already chosen, otherwise a uniform draw from the pool
    pub fn house_choice<P: CryptoProvider + ?Sized>(
        &self,
        provider: &mut P,
        table: &ProbabilityMatrix,
    ) -> Result<usize> {
        if let Some(index) = self
            .human_die
            .and_then(|human| self.best_counter(human, table))
        {
            return Ok(index);
        }
        if self.available.is_empty() {
            return Err(FairDiceError::EmptyDieSet);
        }
        let pick = provider.secure_random_int(self.available.len() as u64)?;
        Ok(self.available[pick as usize])
    }
}
