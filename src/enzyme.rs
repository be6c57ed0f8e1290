use crate::{
    amino_acid::AminoAcid,
    base::Base,
    strand::Strand,
};
use anyhow::{Result, anyhow};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

// Enzyme shape, as net left folds, mapped to the base it seeks
const BINDING_PREFERENCES: [Base; 4] = [Base::A, Base::C, Base::G, Base::T];

/// An ordered, immutable sequence of instructions decoded from a gene
/// sequence. An empty enzyme is valid but inert.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enzyme {
    amino_acids: Vec<AminoAcid>,
}

impl Enzyme {
    pub fn new(amino_acids: Vec<AminoAcid>) -> Self {
        Self { amino_acids }
    }

    #[inline(always)]
    pub fn amino_acids(&self) -> &[AminoAcid] {
        &self.amino_acids
    }

    pub fn len(&self) -> usize {
        self.amino_acids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amino_acids.is_empty()
    }

    /// Decodes a gene sequence into enzymes. Consecutive non-overlapping
    /// duplets are translated from index 0; a trailing unpaired base is
    /// dropped. The "AA" duplet closes the current enzyme and starts a
    /// new one, so every terminator and the sequence end each yield an
    /// enzyme, empty ones included.
    pub fn make_from_genes(genes: &[Base]) -> Vec<Enzyme> {
        let mut ret = vec![];
        let mut current = vec![];
        for (first, second) in genes.iter().copied().tuples() {
            match AminoAcid::from_duplet(first, second) {
                Some(amino_acid) => current.push(amino_acid),
                None => ret.push(Enzyme::new(std::mem::take(&mut current))),
            }
        }
        ret.push(Enzyme::new(current));
        ret
    }

    pub fn from_gene_sequence(sequence: &str) -> Result<Vec<Enzyme>> {
        let genes = sequence
            .bytes()
            .map(|letter| {
                Base::from_letter(letter)
                    .ok_or_else(|| anyhow!("Invalid base letter '{}'", letter as char))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::make_from_genes(&genes))
    }

    /// The base this enzyme seeks when choosing a binding site: the net
    /// left-fold count of its inner instructions, first and last
    /// excluded, modulo 4.
    pub fn binding_preference(&self) -> Base {
        let mut net_left_folds = 0;
        if self.amino_acids.len() > 2 {
            let inner = &self.amino_acids[1..self.amino_acids.len() - 1];
            for amino_acid in inner {
                net_left_folds += amino_acid.fold().left_folds();
            }
            net_left_folds = net_left_folds.rem_euclid(4);
        }
        BINDING_PREFERENCES[net_left_folds as usize]
    }

    /// Unit indices where this enzyme could attach: every position whose
    /// facing base matches the binding preference. Choosing among them
    /// is up to the caller.
    pub fn binding_sites(&self, strand: &Strand) -> Vec<usize> {
        let preference = self.binding_preference();
        strand
            .units()
            .iter()
            .enumerate()
            .filter(|(_, unit)| unit.facing == Some(preference))
            .map(|(index, _)| index)
            .collect()
    }

    /// Runs the instruction sequence against the strand, attached at
    /// `start_index`, and returns the resulting single strands: the unzip
    /// of every fragment detached by a cut, in cut order, then the unzip
    /// of whatever remains once the enzyme halts.
    ///
    /// The unit at `start_index` must have a facing base.
    pub fn operate(&self, strand: Strand, start_index: usize) -> Result<Vec<Strand>> {
        match strand.get(start_index) {
            Some(unit) if !unit.is_gap() => {}
            _ => {
                return Err(anyhow!(
                    "Enzyme cannot attach at unit {start_index} of strand '{strand}'"
                ));
            }
        }

        let mut execution = Execution {
            strand,
            unit_index: start_index as isize,
            copy_mode: false,
            products: vec![],
        };
        for &amino_acid in &self.amino_acids {
            if !execution.is_attached() {
                break;
            }
            execution.step(amino_acid);
        }

        let Execution {
            strand,
            mut products,
            ..
        } = execution;
        products.extend(strand.unzip());
        Ok(products)
    }
}

impl fmt::Display for Enzyme {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.amino_acids.iter().join(" - "))
    }
}

impl FromStr for Enzyme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(Enzyme::default());
        }
        let amino_acids = s
            .split(" - ")
            .map(str::parse)
            .collect::<Result<Vec<_>>>()?;
        Ok(Enzyme::new(amino_acids))
    }
}

/// Call-local execution state: the live strand, the attachment index
/// (may step off either end), the copy-mode flag and the fragments
/// produced so far. The enzyme itself stays untouched.
struct Execution {
    strand: Strand,
    unit_index: isize,
    copy_mode: bool,
    products: Vec<Strand>,
}

impl Execution {
    fn is_attached(&self) -> bool {
        self.current_facing().is_some()
    }

    fn current_facing(&self) -> Option<Base> {
        if self.unit_index < 0 {
            return None;
        }
        self.strand
            .get(self.unit_index as usize)
            .and_then(|unit| unit.facing)
    }

    fn step(&mut self, amino_acid: AminoAcid) {
        match amino_acid {
            AminoAcid::Cut => self.cut(),
            AminoAcid::Del => self.strand.remove_unit(self.unit_index as usize),
            AminoAcid::Swi => self.switch(),
            AminoAcid::Mvr => self.move_by(1),
            AminoAcid::Mvl => self.move_by(-1),
            AminoAcid::Cop => {
                self.copy_mode = true;
                self.maybe_copy();
            }
            AminoAcid::Off => self.copy_mode = false,
            AminoAcid::Ina => self.insert(Base::A),
            AminoAcid::Inc => self.insert(Base::C),
            AminoAcid::Ing => self.insert(Base::G),
            AminoAcid::Int => self.insert(Base::T),
            AminoAcid::Rpy => self.search(1, Base::is_pyrimidine),
            AminoAcid::Rpu => self.search(1, Base::is_purine),
            AminoAcid::Lpy => self.search(-1, Base::is_pyrimidine),
            AminoAcid::Lpu => self.search(-1, Base::is_purine),
        }
    }

    /// Detached fragments are finalized at the moment of the cut.
    fn cut(&mut self) {
        if let Some(tail) = self.strand.cut_after(self.unit_index as usize) {
            self.products.extend(tail.unzip());
        }
    }

    /// Crosses to the paired strand and re-reads it 5'→3' from the other
    /// direction. Landing on a gap detaches the enzyme.
    fn switch(&mut self) {
        self.strand = self.strand.switched();
        self.unit_index = self.strand.len() as isize - self.unit_index - 1;
    }

    fn move_by(&mut self, direction: isize) {
        self.unit_index += direction;
        self.maybe_copy();
    }

    fn insert(&mut self, base: Base) {
        self.strand.insert_after(self.unit_index as usize, base);
        self.move_by(1);
    }

    /// Moves at least once, then keeps moving until the visited unit's
    /// facing base matches the target class or the attachment is lost.
    fn search(&mut self, direction: isize, target: fn(Base) -> bool) {
        loop {
            self.move_by(direction);
            match self.current_facing() {
                Some(base) if target(base) => break,
                Some(_) => {}
                None => break,
            }
        }
    }

    fn maybe_copy(&mut self) {
        if self.copy_mode && self.unit_index >= 0 {
            self.strand.pair_unit(self.unit_index as usize);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn operate_codes(strand: &str, enzyme: &Enzyme, start_index: usize) -> Vec<String> {
        let strand = Strand::from_sequence(strand).unwrap();
        let mut codes: Vec<String> = enzyme
            .operate(strand, start_index)
            .unwrap()
            .iter()
            .map(|product| product.to_string())
            .collect();
        codes.sort();
        codes
    }

    #[test]
    fn test_delete_move_insert() {
        let enzyme: Enzyme = "del - mvr - int".parse().unwrap();
        assert_eq!(operate_codes("ACA", &enzyme, 0), vec!["CAT"]);
    }

    #[test]
    fn test_delete_falls_off_strand() {
        let enzyme: Enzyme = "del - mvr - int".parse().unwrap();
        assert_eq!(operate_codes("ACA", &enzyme, 2), vec!["AC"]);
    }

    #[test]
    fn test_search_copy_cut() {
        let enzyme: Enzyme = "rpy - cop - rpu - cut".parse().unwrap();
        assert_eq!(
            operate_codes("CAAAGAGAATCCTCTTTGAT", &enzyme, 2),
            vec!["AT", "CAAAGAGAATCCTCTTTG", "CAAAGAGGA"]
        );
    }

    #[test]
    fn test_make_from_genes() {
        let enzymes = Enzyme::from_gene_sequence("TAGATCCAGTCCACATCGA").unwrap();
        assert_eq!(enzymes.len(), 1);
        assert_eq!(
            enzymes[0].to_string(),
            "rpy - ina - rpu - mvr - int - mvl - cut - swi - cop"
        );
        assert_eq!(enzymes[0].binding_preference(), Base::C);
    }

    #[test]
    fn test_make_from_genes_terminator() {
        // AC cut | AA terminator | AG del
        let enzymes = Enzyme::from_gene_sequence("ACAAAG").unwrap();
        assert_eq!(enzymes.len(), 2);
        assert_eq!(enzymes[0].amino_acids(), &[AminoAcid::Cut]);
        assert_eq!(enzymes[1].amino_acids(), &[AminoAcid::Del]);

        // A lone terminator yields two empty enzymes
        let enzymes = Enzyme::from_gene_sequence("AA").unwrap();
        assert_eq!(enzymes.len(), 2);
        assert!(enzymes.iter().all(|enzyme| enzyme.is_empty()));
    }

    #[test]
    fn test_make_from_genes_drops_odd_base() {
        let even = Enzyme::from_gene_sequence("AC").unwrap();
        let odd = Enzyme::from_gene_sequence("ACA").unwrap();
        assert_eq!(even, odd);
    }

    #[test]
    fn test_make_from_genes_deterministic() {
        let first = Enzyme::from_gene_sequence("TAGATCCAGTCCACATCGA").unwrap();
        let second = Enzyme::from_gene_sequence("TAGATCCAGTCCACATCGA").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_binding_preference_short_enzymes() {
        assert_eq!(Enzyme::default().binding_preference(), Base::A);
        let enzyme: Enzyme = "swi - cop".parse().unwrap();
        assert_eq!(enzyme.binding_preference(), Base::A);
    }

    #[test]
    fn test_binding_sites() {
        let enzyme: Enzyme = "swi - cop - swi".parse().unwrap();
        // Inner fold: cop folds right → 3 → T
        assert_eq!(enzyme.binding_preference(), Base::T);
        let strand = Strand::from_sequence("TACT").unwrap();
        assert_eq!(enzyme.binding_sites(&strand), vec![0, 3]);
    }

    #[test]
    fn test_empty_enzyme_is_inert() {
        let strand = Strand::from_sequence("ACGT").unwrap();
        let products = Enzyme::default().operate(strand, 1).unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].to_string(), "ACGT");
    }

    #[test]
    fn test_operate_invalid_attachment() {
        let strand = Strand::from_sequence("ACGT").unwrap();
        assert!(Enzyme::default().operate(strand, 4).is_err());

        // A gap unit is no attachment point either
        let gaps = Strand::from_sequence("ACGT").unwrap().switched();
        assert!(Enzyme::default().operate(gaps, 0).is_err());
    }

    #[test]
    fn test_cut_on_last_unit_produces_no_fragment() {
        let enzyme: Enzyme = "cut".parse().unwrap();
        assert_eq!(operate_codes("ACG", &enzyme, 2), vec!["ACG"]);
    }

    #[test]
    fn test_cut_emits_fragment_mid_execution() {
        let enzyme: Enzyme = "mvr - cut".parse().unwrap();
        let strand = Strand::from_sequence("ACGT").unwrap();
        let products = enzyme.operate(strand, 0).unwrap();
        let codes: Vec<String> = products.iter().map(|p| p.to_string()).collect();
        // The cut-off tail comes first, the remaining strand last
        assert_eq!(codes, vec!["GT", "AC"]);
    }

    #[test]
    fn test_switch_reattaches_on_paired_strand() {
        // Copy the current unit, then cross over: the enzyme ends up on
        // the one-base complementary strand.
        let enzyme: Enzyme = "cop - swi".parse().unwrap();
        assert_eq!(operate_codes("CG", &enzyme, 1), vec!["C", "CG"]);
    }

    #[test]
    fn test_search_moves_before_testing() {
        // rpy from a pyrimidine must not stand still
        let enzyme: Enzyme = "rpy - cut".parse().unwrap();
        assert_eq!(operate_codes("CCA", &enzyme, 0), vec!["A", "CC"]);
    }

    #[test]
    fn test_facing_bases_conserved_without_del() {
        let strand = Strand::from_sequence("CAAAGAGAATCCTCTTTGAT").unwrap();
        let before = strand.facing_base_count();
        let enzyme: Enzyme = "mvr - cut - rpy - cut".parse().unwrap();
        let products = enzyme.operate(strand, 0).unwrap();
        let after: usize = products.iter().map(|p| p.facing_base_count()).sum();
        assert_eq!(after, before);
    }
}
