//! Custom-faced die.

use super::table::Probability;
use crate::error::{FairDiceError, Result};
use std::fmt;

/// Ordered, immutable list of face values.
///
/// Duplicate and non-sequential faces are allowed.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Die {
    faces: Vec<i64>,
}

impl Die {
    pub fn new(faces: Vec<i64>) -> Result<Self> {
        if faces.is_empty() {
            return Err(FairDiceError::EmptyDie);
        }
        Ok(Self { faces })
    }

    pub fn faces(&self) -> &[i64] {
        &self.faces
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Face at `index`; the caller reduces the index into `[0, face_count)`
    pub fn face_at(&self, index: usize) -> Result<i64> {
        self.faces
            .get(index)
            .copied()
            .ok_or(FairDiceError::IndexOutOfRange {
                index,
                len: self.faces.len(),
            })
    }

    /// Whether our face at `self_index` beats `other`'s face at `other_index`.
    /// Ties are not wins.
    pub fn beats(&self, other: &Die, self_index: usize, other_index: usize) -> Result<bool> {
        Ok(self.face_at(self_index)? > other.face_at(other_index)?)
    }

    /// Number of face pairs `(a, b)` with `a > b`
    pub fn winning_pairs(&self, other: &Die) -> u64 {
        self.faces
            .iter()
            .map(|a| other.faces.iter().filter(|b| a > *b).count() as u64)
            .sum()
    }

    /// Probability a uniform roll of this die beats a uniform roll of `other`
    pub fn win_probability(&self, other: &Die) -> Probability {
        let total = (self.faces.len() * other.faces.len()) as u64;
        Probability::new(self.winning_pairs(other), total)
    }
}

impl TryFrom<Vec<i64>> for Die {
    type Error = FairDiceError;

    fn try_from(faces: Vec<i64>) -> Result<Self> {
        Self::new(faces)
    }
}

impl fmt::Display for Die {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, face) in self.faces.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", face)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn die(faces: &[i64]) -> Die {
        Die::new(faces.to_vec()).unwrap()
    }

    #[test]
    fn test_empty_die_rejected() {
        assert_eq!(Die::new(vec![]), Err(FairDiceError::EmptyDie));
        assert_eq!(Die::try_from(Vec::new()), Err(FairDiceError::EmptyDie));
    }

    #[test]
    fn test_face_at() {
        let d = die(&[5, 1, 5, -3]);
        assert_eq!(d.face_count(), 4);
        assert_eq!(d.face_at(0).unwrap(), 5);
        assert_eq!(d.face_at(3).unwrap(), -3);
        assert_eq!(
            d.face_at(4),
            Err(FairDiceError::IndexOutOfRange { index: 4, len: 4 })
        );
    }

    #[test]
    fn test_beats_ties_are_not_wins() {
        let a = die(&[1, 4, 6]);
        let b = die(&[4, 4, 4]);
        assert!(!a.beats(&b, 0, 0).unwrap());
        assert!(!a.beats(&b, 1, 2).unwrap());
        assert!(a.beats(&b, 2, 1).unwrap());
        assert!(a.beats(&b, 3, 0).is_err());
        assert!(a.beats(&b, 0, 3).is_err());
    }

    #[test]
    fn test_single_face_dice() {
        let five = die(&[5]);
        let three = die(&[3]);
        let other_five = die(&[5]);

        assert!(five.beats(&three, 0, 0).unwrap());
        assert!(!three.beats(&five, 0, 0).unwrap());
        assert!(!five.beats(&other_five, 0, 0).unwrap());

        assert_eq!(five.win_probability(&three), Probability::new(1, 1));
        assert_eq!(three.win_probability(&five), Probability::new(0, 1));
        assert_eq!(five.win_probability(&other_five), Probability::new(0, 1));
    }

    #[test]
    fn test_winning_pairs_unequal_sizes() {
        let a = die(&[2, 7]);
        let b = die(&[1, 3, 7]);
        // 2 > 1; 7 > 1, 3
        assert_eq!(a.winning_pairs(&b), 3);
        assert_eq!(a.win_probability(&b), Probability::new(3, 6));
    }

    #[test]
    fn test_display() {
        assert_eq!(die(&[1, 2, 3]).to_string(), "[1,2,3]");
        assert_eq!(die(&[-1]).to_string(), "[-1]");
    }
}
