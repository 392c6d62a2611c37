//! Dipeptide mass matrix
//!
//! Every ordered pair of amino acids (N-terminal row, C-terminal column) gets a
//! record holding both the linear and the cyclic (diketopiperazine) mass.

use std::sync::OnceLock;
use log::debug;

use crate::peptide::amino_acids::{AminoAcid, AMINO_ACIDS, MASS_H2O};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PeptideType {
    #[default]
    Linear,
    Cyclic,
}

impl PeptideType {
    pub fn toggle(self) -> PeptideType {
        match self {
            PeptideType::Linear => PeptideType::Cyclic,
            PeptideType::Cyclic => PeptideType::Linear,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PeptideType::Linear => "Linear Dipeptides",
            PeptideType::Cyclic => "Cyclic (DKP)",
        }
    }

    pub fn calculation_basis(&self) -> &'static str {
        match self {
            PeptideType::Linear => {
                "Linear Mass = Mass(AA1) + Mass(AA2) - Mass(H2O). Standard peptide bond formation."
            }
            PeptideType::Cyclic => {
                "Cyclic Mass = Mass(AA1) + Mass(AA2) - 2 x Mass(H2O). Diketopiperazine ring formation."
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DipeptideRecord {
    pub aa1: AminoAcid,
    pub aa2: AminoAcid,
    pub linear_mass: f64,
    pub cyclic_mass: f64,
    pub id: String,
}

impl DipeptideRecord {
    pub fn new(aa1: AminoAcid, aa2: AminoAcid) -> Self {
        let sum = aa1.monoisotopic_mass + aa2.monoisotopic_mass;
        DipeptideRecord {
            aa1,
            aa2,
            linear_mass: sum - MASS_H2O,
            cyclic_mass: sum - 2.0 * MASS_H2O,
            id: format!("{}-{}", aa1.three_letter, aa2.three_letter),
        }
    }

    /// Mass for the given bond topology
    pub fn mass(&self, peptide_type: PeptideType) -> f64 {
        match peptide_type {
            PeptideType::Linear => self.linear_mass,
            PeptideType::Cyclic => self.cyclic_mass,
        }
    }

    /// Short name, e.g. `Ala-Gly` or `cyclo(Ala-Gly)`
    pub fn display_name(&self, peptide_type: PeptideType) -> String {
        match peptide_type {
            PeptideType::Linear => self.id.clone(),
            PeptideType::Cyclic => format!("cyclo({})", self.id),
        }
    }

    pub fn full_name(&self, peptide_type: PeptideType) -> String {
        match peptide_type {
            PeptideType::Linear => {
                format!("{}-{} (Linear Dipeptide)", self.aa1.name, self.aa2.name)
            }
            PeptideType::Cyclic => format!(
                "Cyclo({}-{}) (Cyclic Dipeptide / Diketopiperazine)",
                self.aa1.name, self.aa2.name
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MassMatrix {
    amino_acids: Vec<AminoAcid>,
    rows: Vec<Vec<DipeptideRecord>>,
}

impl MassMatrix {
    /// Build the N x N grid for an ordered table; `rows[r][c]` pairs `table[r]` with `table[c]`.
    pub fn generate(table: &[AminoAcid]) -> MassMatrix {
        let rows: Vec<Vec<DipeptideRecord>> = table
            .iter()
            .map(|&aa1| table.iter().map(|&aa2| DipeptideRecord::new(aa1, aa2)).collect())
            .collect();

        debug!("Generated {}x{} dipeptide mass matrix", table.len(), table.len());

        MassMatrix { amino_acids: table.to_vec(), rows }
    }

    /// Matrix for the standard table, computed on first use.
    pub fn standard() -> &'static MassMatrix {
        static STANDARD: OnceLock<MassMatrix> = OnceLock::new();
        STANDARD.get_or_init(|| MassMatrix::generate(&AMINO_ACIDS))
    }

    pub fn size(&self) -> usize {
        self.amino_acids.len()
    }

    pub fn amino_acids(&self) -> &[AminoAcid] {
        &self.amino_acids
    }

    pub fn rows(&self) -> &[Vec<DipeptideRecord>] {
        &self.rows
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&DipeptideRecord> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// All records in row-major order
    pub fn iter(&self) -> impl Iterator<Item = &DipeptideRecord> {
        self.rows.iter().flatten()
    }

    pub fn find(&self, id: &str) -> Option<&DipeptideRecord> {
        self.iter().find(|record| record.id == id)
    }
}
