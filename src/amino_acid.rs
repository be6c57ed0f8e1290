use crate::base::Base;
use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Fold direction of a single instruction. The net fold of an enzyme's
/// inner instructions determines which base it binds to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fold {
    Straight,
    Left,
    Right,
}

impl Fold {
    #[inline(always)]
    pub fn left_folds(self) -> i32 {
        match self {
            Fold::Straight => 0,
            Fold::Left => 1,
            Fold::Right => -1,
        }
    }
}

/// The 15 enzyme instructions ("amino acids").
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AminoAcid {
    Cut, // cut strand after the current unit
    Del, // delete the current unit
    Swi, // switch enzyme to the other strand
    Mvr, // move one unit to the right
    Mvl, // move one unit to the left
    Cop, // turn on copy mode
    Off, // turn off copy mode
    Ina, // insert A to the right of the current unit
    Inc, // insert C to the right of the current unit
    Ing, // insert G to the right of the current unit
    Int, // insert T to the right of the current unit
    Rpy, // search for the nearest pyrimidine to the right
    Rpu, // search for the nearest purine to the right
    Lpy, // search for the nearest pyrimidine to the left
    Lpu, // search for the nearest purine to the left
}

pub const AMINO_ACIDS: [AminoAcid; 15] = [
    AminoAcid::Cut,
    AminoAcid::Del,
    AminoAcid::Swi,
    AminoAcid::Mvr,
    AminoAcid::Mvl,
    AminoAcid::Cop,
    AminoAcid::Off,
    AminoAcid::Ina,
    AminoAcid::Inc,
    AminoAcid::Ing,
    AminoAcid::Int,
    AminoAcid::Rpy,
    AminoAcid::Rpu,
    AminoAcid::Lpy,
    AminoAcid::Lpu,
];

impl AminoAcid {
    /// Decodes a two-base duplet. `None` for the reserved "AA" duplet,
    /// which terminates an enzyme during gene decoding.
    pub fn from_duplet(first: Base, second: Base) -> Option<Self> {
        crate::DUPLETS.get(&(first, second)).copied()
    }

    pub fn fold(self) -> Fold {
        match self {
            AminoAcid::Cut => Fold::Straight,
            AminoAcid::Del => Fold::Straight,
            AminoAcid::Swi => Fold::Right,
            AminoAcid::Mvr => Fold::Straight,
            AminoAcid::Mvl => Fold::Straight,
            AminoAcid::Cop => Fold::Right,
            AminoAcid::Off => Fold::Left,
            AminoAcid::Ina => Fold::Straight,
            AminoAcid::Inc => Fold::Right,
            AminoAcid::Ing => Fold::Right,
            AminoAcid::Int => Fold::Left,
            AminoAcid::Rpy => Fold::Right,
            AminoAcid::Rpu => Fold::Left,
            AminoAcid::Lpy => Fold::Left,
            AminoAcid::Lpu => Fold::Left,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AminoAcid::Cut => "cut",
            AminoAcid::Del => "del",
            AminoAcid::Swi => "swi",
            AminoAcid::Mvr => "mvr",
            AminoAcid::Mvl => "mvl",
            AminoAcid::Cop => "cop",
            AminoAcid::Off => "off",
            AminoAcid::Ina => "ina",
            AminoAcid::Inc => "inc",
            AminoAcid::Ing => "ing",
            AminoAcid::Int => "int",
            AminoAcid::Rpy => "rpy",
            AminoAcid::Rpu => "rpu",
            AminoAcid::Lpy => "lpy",
            AminoAcid::Lpu => "lpu",
        }
    }
}

impl fmt::Display for AminoAcid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for AminoAcid {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AMINO_ACIDS
            .into_iter()
            .find(|amino_acid| amino_acid.name() == s)
            .ok_or_else(|| anyhow!("Unknown amino acid '{s}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::BASES;

    #[test]
    fn test_duplet_table() {
        let mut decoded = vec![];
        for first in BASES {
            for second in BASES {
                match AminoAcid::from_duplet(first, second) {
                    Some(amino_acid) => decoded.push(amino_acid),
                    None => assert_eq!((first, second), (Base::A, Base::A)),
                }
            }
        }
        // 15 distinct instructions, one per non-terminator duplet
        decoded.sort_by_key(|amino_acid| amino_acid.name());
        decoded.dedup();
        assert_eq!(decoded.len(), 15);
    }

    #[test]
    fn test_duplet_samples() {
        assert_eq!(AminoAcid::from_duplet(Base::A, Base::C), Some(AminoAcid::Cut));
        assert_eq!(AminoAcid::from_duplet(Base::T, Base::A), Some(AminoAcid::Rpy));
        assert_eq!(AminoAcid::from_duplet(Base::G, Base::T), Some(AminoAcid::Int));
        assert_eq!(AminoAcid::from_duplet(Base::A, Base::A), None);
    }

    #[test]
    fn test_folds() {
        assert_eq!(AminoAcid::Cut.fold(), Fold::Straight);
        assert_eq!(AminoAcid::Swi.fold(), Fold::Right);
        assert_eq!(AminoAcid::Off.fold(), Fold::Left);
        assert_eq!(AminoAcid::Rpu.fold(), Fold::Left);
        assert_eq!(Fold::Straight.left_folds(), 0);
        assert_eq!(Fold::Left.left_folds(), 1);
        assert_eq!(Fold::Right.left_folds(), -1);
    }

    #[test]
    fn test_name_round_trip() {
        for amino_acid in AMINO_ACIDS {
            assert_eq!(amino_acid.to_string().parse::<AminoAcid>().unwrap(), amino_acid);
        }
        assert!("xyz".parse::<AminoAcid>().is_err());
    }
}
