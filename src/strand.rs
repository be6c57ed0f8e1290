use crate::base::Base;
use anyhow::{Result, anyhow};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One position on a strand: the base on the strand's own side and,
/// where the strand is double-stranded, the paired base across from it.
/// A unit with no facing base is a gap on this side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub facing: Option<Base>,
    pub opposite: Option<Base>,
}

impl Unit {
    pub fn new(facing: Base) -> Self {
        Self {
            facing: Some(facing),
            opposite: None,
        }
    }

    #[inline(always)]
    pub fn is_gap(&self) -> bool {
        self.facing.is_none()
    }

    #[inline(always)]
    fn swapped(self) -> Self {
        Self {
            facing: self.opposite,
            opposite: self.facing,
        }
    }
}

/// An ordered sequence of units. Index order is the 5'→3' reading order
/// of the facing strand.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Strand {
    units: Vec<Unit>,
}

impl Strand {
    pub fn from_sequence(sequence: &str) -> Result<Self> {
        let units = sequence
            .bytes()
            .map(|letter| {
                Base::from_letter(letter)
                    .map(Unit::new)
                    .ok_or_else(|| anyhow!("Invalid base letter '{}'", letter as char))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { units })
    }

    pub fn from_bases(bases: impl IntoIterator<Item = Base>) -> Self {
        Self {
            units: bases.into_iter().map(Unit::new).collect(),
        }
    }

    pub fn random(rng: &mut impl Rng, length: usize) -> Self {
        Self::from_bases((0..length).map(|_| Base::random(rng)))
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    #[inline(always)]
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    #[inline(always)]
    pub fn get(&self, index: usize) -> Option<&Unit> {
        self.units.get(index)
    }

    /// The facing bases in order, gaps skipped.
    pub fn facing_bases(&self) -> Vec<Base> {
        self.units.iter().filter_map(|unit| unit.facing).collect()
    }

    pub fn facing_base_count(&self) -> usize {
        self.units.iter().filter(|unit| unit.facing.is_some()).count()
    }

    /// Cuts the strand immediately after `index`. Everything to the right
    /// becomes a new detached strand; `None` if nothing follows.
    pub fn cut_after(&mut self, index: usize) -> Option<Strand> {
        if index + 1 >= self.units.len() {
            return None;
        }
        let tail = self.units.split_off(index + 1);
        Some(Self { units: tail })
    }

    /// Removes the unit at `index`, both sides of it.
    pub fn remove_unit(&mut self, index: usize) {
        self.units.remove(index);
    }

    /// Inserts a new single-stranded unit immediately to the right of
    /// `index`. The new unit starts unpaired.
    pub fn insert_after(&mut self, index: usize, base: Base) {
        self.units.insert(index + 1, Unit::new(base));
    }

    /// Fills in the opposite base with the complement of the facing base,
    /// where the unit is live and not yet paired.
    pub fn pair_unit(&mut self, index: usize) {
        if let Some(unit) = self.units.get_mut(index) {
            if unit.opposite.is_none() {
                if let Some(facing) = unit.facing {
                    unit.opposite = Some(facing.complement());
                }
            }
        }
    }

    /// The same strand read from the complementary side: unit order
    /// reversed, facing/opposite roles swapped.
    pub fn switched(&self) -> Self {
        Self {
            units: self.units.iter().rev().map(|unit| unit.swapped()).collect(),
        }
    }

    /// Splits a (possibly partially double-stranded) strand into the
    /// single strands it encodes: each maximal gap-free run of facing
    /// bases in order, then each run of opposite bases in reverse unit
    /// order, so the complementary strand is read in its own 5'→3'
    /// direction.
    pub fn unzip(&self) -> Vec<Strand> {
        let mut ret = Self::split_runs(self.units.iter().map(|unit| unit.facing));
        ret.extend(Self::split_runs(
            self.units.iter().rev().map(|unit| unit.opposite),
        ));
        ret
    }

    fn split_runs(bases: impl Iterator<Item = Option<Base>>) -> Vec<Strand> {
        let mut ret = vec![];
        let mut run = vec![];
        for base in bases {
            match base {
                Some(base) => run.push(base),
                None => {
                    if !run.is_empty() {
                        ret.push(Self::from_bases(std::mem::take(&mut run)));
                    }
                }
            }
        }
        if !run.is_empty() {
            ret.push(Self::from_bases(run));
        }
        ret
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.units.iter().any(|unit| unit.opposite.is_some()) {
            for unit in &self.units {
                write!(f, "{}", unit.opposite.map_or(' ', Base::to_letter))?;
            }
            writeln!(f)?;
        }
        for unit in &self.units {
            write!(f, "{}", unit.facing.map_or(' ', Base::to_letter))?;
        }
        Ok(())
    }
}
