use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four typogenetic bases.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Base {
    A,
    C,
    G,
    T,
}

pub const BASES: [Base; 4] = [Base::A, Base::C, Base::G, Base::T];

impl Base {
    pub fn from_letter(letter: u8) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            b'A' => Some(Base::A),
            b'C' => Some(Base::C),
            b'G' => Some(Base::G),
            b'T' => Some(Base::T),
            _ => None,
        }
    }

    #[inline(always)]
    pub fn to_letter(self) -> char {
        match self {
            Base::A => 'A',
            Base::C => 'C',
            Base::G => 'G',
            Base::T => 'T',
        }
    }

    #[inline(always)]
    pub fn complement(self) -> Self {
        match self {
            Base::A => Base::T,
            Base::C => Base::G,
            Base::G => Base::C,
            Base::T => Base::A,
        }
    }

    #[inline(always)]
    pub fn is_purine(self) -> bool {
        matches!(self, Base::A | Base::G)
    }

    #[inline(always)]
    pub fn is_pyrimidine(self) -> bool {
        matches!(self, Base::C | Base::T)
    }

    pub fn random(rng: &mut impl Rng) -> Self {
        BASES[rng.gen_range(0..BASES.len())]
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_letter())
    }
}
