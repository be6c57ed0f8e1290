use crate::{enzyme::Enzyme, strand::Strand};
use anyhow::Result;
use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};
use serde::Serialize;
use std::collections::BTreeMap;

const MIN_SEED_STRAND_LENGTH: usize = 50;
const MAX_SEED_STRAND_LENGTH: usize = 101;

/// A multiset of species, counted by canonical text form. Ordered keys
/// keep seeded simulations reproducible.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Population {
    counts: BTreeMap<String, usize>,
    total: usize,
}

impl Population {
    pub fn insert(&mut self, species: String) {
        *self.counts.entry(species).or_insert(0) += 1;
        self.total += 1;
    }

    #[inline(always)]
    pub fn total(&self) -> usize {
        self.total
    }

    #[inline(always)]
    pub fn species_count(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn count(&self, species: &str) -> usize {
        self.counts.get(species).copied().unwrap_or(0)
    }

    /// Removes and returns one uniformly chosen individual.
    pub fn sample(&mut self, rng: &mut impl Rng) -> Option<String> {
        if self.total == 0 {
            return None;
        }
        let mut remaining = rng.gen_range(0..self.total);
        let mut chosen = None;
        for (species, count) in &self.counts {
            if remaining < *count {
                chosen = Some(species.to_owned());
                break;
            }
            remaining -= count;
        }
        let species = chosen?;
        match self.counts.get_mut(&species) {
            Some(count) if *count > 1 => *count -= 1,
            _ => {
                self.counts.remove(&species);
            }
        }
        self.total -= 1;
        Some(species)
    }

    pub fn most_common(&self, n: usize) -> Vec<(String, usize)> {
        let mut ret: Vec<(String, usize)> = self
            .counts
            .iter()
            .map(|(species, count)| (species.to_owned(), *count))
            .collect();
        ret.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ret.truncate(n);
        ret
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct GenerationReport {
    pub generation: u64,
    pub strand_total: usize,
    pub strand_species: usize,
    pub enzyme_total: usize,
    pub enzyme_species: usize,
    pub most_common_strands: Vec<(String, usize)>,
}

/// Drives repeated rounds of enzyme/strand interaction over populations
/// of strand and enzyme species.
#[derive(Debug)]
pub struct Simulation {
    strands: Population,
    enzymes: Population,
    rng: StdRng,
    generation: u64,
}

impl Simulation {
    /// Seeds the populations with one random strand and the enzymes its
    /// genes encode. A fixed seed makes the whole run reproducible.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut ret = Self {
            strands: Population::default(),
            enzymes: Population::default(),
            rng,
            generation: 0,
        };
        let length = ret
            .rng
            .gen_range(MIN_SEED_STRAND_LENGTH..=MAX_SEED_STRAND_LENGTH);
        let strand = Strand::random(&mut ret.rng, length);
        ret.add_strand(&strand);
        ret
    }

    #[inline(always)]
    pub fn strands(&self) -> &Population {
        &self.strands
    }

    #[inline(always)]
    pub fn enzymes(&self) -> &Population {
        &self.enzymes
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Runs one generation: pick a random enzyme and strand, bind at a
    /// random candidate site and let the enzyme operate; the products
    /// and their decoded enzymes join the populations. With no enzymes
    /// available, a sampled strand is re-read for new enzymes instead.
    pub fn step(&mut self) -> Result<()> {
        self.generation += 1;

        if self.enzymes.is_empty() {
            if let Some(code) = self.strands.sample(&mut self.rng) {
                let strand = Strand::from_sequence(&code)?;
                self.add_enzymes(&strand);
                self.strands.insert(code);
            }
            return Ok(());
        }

        let Some(enzyme_species) = self.enzymes.sample(&mut self.rng) else {
            return Ok(());
        };
        let enzyme: Enzyme = enzyme_species.parse()?;

        let Some(code) = self.strands.sample(&mut self.rng) else {
            self.enzymes.insert(enzyme.to_string());
            return Ok(());
        };
        let strand = Strand::from_sequence(&code)?;

        let sites = enzyme.binding_sites(&strand);
        let Some(&site) = sites.choose(&mut self.rng) else {
            // No binding site: both go back untouched
            self.strands.insert(code);
            self.enzymes.insert(enzyme.to_string());
            return Ok(());
        };

        for product in enzyme.operate(strand, site)? {
            self.add_strand(&product);
        }
        Ok(())
    }

    pub fn run(&mut self, generations: u64) -> Result<()> {
        for _ in 0..generations {
            self.step()?;
        }
        Ok(())
    }

    pub fn report(&self, most_common: usize) -> GenerationReport {
        GenerationReport {
            generation: self.generation,
            strand_total: self.strands.total(),
            strand_species: self.strands.species_count(),
            enzyme_total: self.enzymes.total(),
            enzyme_species: self.enzymes.species_count(),
            most_common_strands: self.strands.most_common(most_common),
        }
    }

    fn add_strand(&mut self, strand: &Strand) {
        self.strands.insert(strand.to_string());
        self.add_enzymes(strand);
    }

    fn add_enzymes(&mut self, strand: &Strand) {
        for enzyme in Enzyme::make_from_genes(&strand.facing_bases()) {
            self.enzymes.insert(enzyme.to_string());
        }
    }
}
