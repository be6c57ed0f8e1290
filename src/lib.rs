use amino_acid::AminoAcid;
use base::Base;
use lazy_static::lazy_static;
use std::collections::HashMap;

pub mod amino_acid;
pub mod base;
pub mod enzyme;
pub mod population;
pub mod strand;

lazy_static! {
    // Fixed duplet-to-instruction translation table. "AA" is deliberately
    // absent: it terminates an enzyme during gene decoding.
    pub static ref DUPLETS: HashMap<(Base, Base), AminoAcid> = [
        ((Base::A, Base::C), AminoAcid::Cut),
        ((Base::A, Base::G), AminoAcid::Del),
        ((Base::A, Base::T), AminoAcid::Swi),
        ((Base::C, Base::A), AminoAcid::Mvr),
        ((Base::C, Base::C), AminoAcid::Mvl),
        ((Base::C, Base::G), AminoAcid::Cop),
        ((Base::C, Base::T), AminoAcid::Off),
        ((Base::G, Base::A), AminoAcid::Ina),
        ((Base::G, Base::C), AminoAcid::Inc),
        ((Base::G, Base::G), AminoAcid::Ing),
        ((Base::G, Base::T), AminoAcid::Int),
        ((Base::T, Base::A), AminoAcid::Rpy),
        ((Base::T, Base::C), AminoAcid::Rpu),
        ((Base::T, Base::G), AminoAcid::Lpy),
        ((Base::T, Base::T), AminoAcid::Lpu),
    ]
    .into_iter()
    .collect();
}
