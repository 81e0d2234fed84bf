//! Pairwise win-probability table.

use super::die::Die;
use crate::error::{FairDiceError, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Exact probability `wins / total`
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(try_from = "RawProbability")]
pub struct Probability {
    wins: u64,
    total: u64,
}

#[derive(Deserialize)]
struct RawProbability {
    wins: u64,
    total: u64,
}

impl TryFrom<RawProbability> for Probability {
    type Error = String;

    fn try_from(raw: RawProbability) -> std::result::Result<Self, Self::Error> {
        if raw.total == 0 || raw.wins > raw.total {
            return Err(format!("invalid probability {}/{}", raw.wins, raw.total));
        }
        Ok(Self::new(raw.wins, raw.total))
    }
}

impl Probability {
    /// Diagonal entry: a die facing itself
    pub const HALF: Probability = Probability { wins: 1, total: 2 };

    /// `total` of zero is treated as one
    pub fn new(wins: u64, total: u64) -> Self {
        Self {
            wins,
            total: total.max(1),
        }
    }

    pub fn wins(&self) -> u64 {
        self.wins
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn as_f64(&self) -> f64 {
        self.wins as f64 / self.total as f64
    }

    fn cross(&self, other: &Probability) -> (u128, u128) {
        (
            u128::from(self.wins) * u128::from(other.total),
            u128::from(other.wins) * u128::from(self.total),
        )
    }
}

impl PartialEq for Probability {
    fn eq(&self, other: &Self) -> bool {
        let (a, b) = self.cross(other);
        a == b
    }
}

impl Eq for Probability {}

impl PartialOrd for Probability {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Probability {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a, b) = self.cross(other);
        a.cmp(&b)
    }
}

impl fmt::Display for Probability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.as_f64())
    }
}

/// N x N table where `get(i, j)` is the chance die `i` beats die `j`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbabilityMatrix {
    cells: Vec<Vec<Probability>>,
}

impl ProbabilityMatrix {
    /// Compute every ordered pair; the diagonal is fixed at one half
    pub fn compute(dice: &[Die]) -> Result<Self> {
        if dice.is_empty() {
            return Err(FairDiceError::EmptyDieSet);
        }

        let cells = dice
            .iter()
            .enumerate()
            .map(|(i, row)| {
                dice.iter()
                    .enumerate()
                    .map(|(j, col)| {
                        if i == j {
                            Probability::HALF
                        } else {
                            row.win_probability(col)
                        }
                    })
                    .collect()
            })
            .collect();

        Ok(Self { cells })
    }

    /// Number of dice
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Probability> {
        self.cells.get(row)?.get(col).copied()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Probability]> {
        self.cells.iter().map(Vec::as_slice)
    }
}

/// Build the table for a set of dice
pub fn compute_table(dice: &[Die]) -> Result<ProbabilityMatrix> {
    ProbabilityMatrix::compute(dice)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dice(sets: &[&[i64]]) -> Vec<Die> {
        sets.iter().map(|f| Die::new(f.to_vec()).unwrap()).collect()
    }

    #[test]
    fn test_probability_deserialize_rejects_bad_fraction() {
        let p: Probability = serde_json::from_str(r#"{"wins":5,"total":9}"#).unwrap();
        assert_eq!(p, Probability::new(5, 9));

        assert!(serde_json::from_str::<Probability>(r#"{"wins":3,"total":0}"#).is_err());
        assert!(serde_json::from_str::<Probability>(r#"{"wins":4,"total":3}"#).is_err());
    }

    #[test]
    fn test_non_transitive_cycle() {
        let set = dice(&[&[2, 2, 4, 4, 9, 9], &[1, 1, 6, 6, 8, 8], &[3, 3, 5, 5, 7, 7]]);
        let m = compute_table(&set).unwrap();

        assert_eq!(m.size(), 3);
        assert!(m.get(0, 1).unwrap() > Probability::HALF);
        assert!(m.get(1, 2).unwrap() > Probability::HALF);
        assert!(m.get(2, 0).unwrap() > Probability::HALF);
        assert_eq!(m.get(0, 1).unwrap(), Probability::new(5, 9));
        assert_eq!(m.get(1, 0).unwrap(), Probability::new(4, 9));
        for i in 0..3 {
            assert_eq!(m.get(i, i).unwrap(), Probability::HALF);
        }
    }

    #[test]
    fn test_diagonal_is_fixed_not_computed() {
        // Self-comparison would give 0 for a single face
        let set = dice(&[&[5], &[3]]);
        let m = compute_table(&set).unwrap();
        assert_eq!(m.get(0, 0).unwrap(), Probability::HALF);
        assert_eq!(m.get(0, 1).unwrap(), Probability::new(1, 1));
        assert_eq!(m.get(1, 0).unwrap(), Probability::new(0, 1));
    }

    #[test]
    fn test_ties_leave_gap() {
        let set = dice(&[&[1, 2], &[2, 1]]);
        let m = compute_table(&set).unwrap();
        // (2,1) wins, (1,2) loses, two ties
        assert_eq!(m.get(0, 1).unwrap(), Probability::new(1, 4));
        assert_eq!(m.get(1, 0).unwrap(), Probability::new(1, 4));
    }

    #[test]
    fn test_empty_set_rejected() {
        assert_eq!(compute_table(&[]), Err(FairDiceError::EmptyDieSet));
    }

    #[test]
    fn test_out_of_bounds_lookup() {
        let m = compute_table(&dice(&[&[1]])).unwrap();
        assert_eq!(m.get(0, 1), None);
        assert_eq!(m.get(1, 0), None);
    }

    #[test]
    fn test_probability_ordering_and_display() {
        assert_eq!(Probability::new(2, 4), Probability::HALF);
        assert!(Probability::new(5, 9) > Probability::new(1, 2));
        assert!(Probability::new(0, 1) < Probability::new(1, 100));
        assert_eq!(Probability::new(5, 9).to_string(), "0.56");
        assert_eq!(Probability::HALF.to_string(), "0.50");
    }
}
