//! Monoisotopic masses of the 20 standard amino acids
//!
//! These are masses of the *free* amino acid molecules in Daltons (Da), not the
//! residue masses. Water lost during peptide bond formation is subtracted when the
//! dipeptide matrix is built.

/// Monoisotopic mass of water (H2O) in Daltons.
pub const MASS_H2O: f64 = 18.010565;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polarity {
    Nonpolar,
    Polar,
    Basic,
    Acidic,
}

impl Polarity {
    pub fn label(&self) -> &'static str {
        match self {
            Polarity::Nonpolar => "Nonpolar",
            Polarity::Polar => "Polar",
            Polarity::Basic => "Basic",
            Polarity::Acidic => "Acidic",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AminoAcid {
    pub name: &'static str,
    pub three_letter: &'static str,
    pub one_letter: char,
    pub formula: &'static str,
    pub monoisotopic_mass: f64,
    pub polarity: Polarity,
}

const fn amino(
    name: &'static str,
    three_letter: &'static str,
    one_letter: char,
    formula: &'static str,
    monoisotopic_mass: f64,
    polarity: Polarity,
) -> AminoAcid {
    AminoAcid { name, three_letter, one_letter, formula, monoisotopic_mass, polarity }
}

/// The standard table. Order fixes the row/column order of the mass matrix.
pub static AMINO_ACIDS: [AminoAcid; 20] = [
    amino("Glycine", "Gly", 'G', "C2H5NO2", 75.032028, Polarity::Nonpolar),
    amino("Alanine", "Ala", 'A', "C3H7NO2", 89.047678, Polarity::Nonpolar),
    amino("Serine", "Ser", 'S', "C3H7NO3", 105.042593, Polarity::Polar),
    amino("Proline", "Pro", 'P', "C5H9NO2", 115.063329, Polarity::Nonpolar),
    amino("Valine", "Val", 'V', "C5H11NO2", 117.078979, Polarity::Nonpolar),
    amino("Threonine", "Thr", 'T', "C4H9NO3", 119.058243, Polarity::Polar),
    amino("Cysteine", "Cys", 'C', "C3H7NO2S", 121.019749, Polarity::Polar),
    amino("Isoleucine", "Ile", 'I', "C6H13NO2", 131.094629, Polarity::Nonpolar),
    amino("Leucine", "Leu", 'L', "C6H13NO2", 131.094629, Polarity::Nonpolar),
    amino("Asparagine", "Asn", 'N', "C4H8N2O3", 132.053493, Polarity::Polar),
    amino("Aspartic Acid", "Asp", 'D', "C4H7NO4", 133.037508, Polarity::Acidic),
    amino("Glutamine", "Gln", 'Q', "C5H10N2O3", 146.069142, Polarity::Polar),
    amino("Lysine", "Lys", 'K', "C6H14N2O2", 146.105528, Polarity::Basic),
    amino("Glutamic Acid", "Glu", 'E', "C5H9NO4", 147.053158, Polarity::Acidic),
    amino("Methionine", "Met", 'M', "C5H11NO2S", 149.051049, Polarity::Nonpolar),
    amino("Histidine", "His", 'H', "C6H9N3O2", 155.069477, Polarity::Basic),
    amino("Phenylalanine", "Phe", 'F', "C9H11NO2", 165.078979, Polarity::Nonpolar),
    amino("Arginine", "Arg", 'R', "C6H14N4O2", 174.111676, Polarity::Basic),
    amino("Tyrosine", "Tyr", 'Y', "C9H11NO3", 181.073893, Polarity::Polar),
    amino("Tryptophan", "Trp", 'W', "C11H12N2O2", 204.089878, Polarity::Nonpolar),
];

/// Three-letter codes in table order
pub fn amino_acid_order() -> Vec<&'static str> {
    AMINO_ACIDS.iter().map(|aa| aa.three_letter).collect()
}

/// Look up an amino acid by its one- or three-letter code (case-insensitive)
pub fn find_amino_acid(code: &str) -> Option<&'static AminoAcid> {
    let code = code.trim();
    AMINO_ACIDS.iter().find(|aa| {
        aa.three_letter.eq_ignore_ascii_case(code)
            || (code.chars().count() == 1
                && code.chars().next().is_some_and(|c| c.eq_ignore_ascii_case(&aa.one_letter)))
    })
}
