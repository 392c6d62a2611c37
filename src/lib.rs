//! Dipeptide Mass Explorer - monoisotopic mass matrix for dipeptides
//!
//! This library builds the 20x20 matrix of linear and cyclic (diketopiperazine)
//! dipeptide masses from the standard amino acids, matches cells against free-text
//! and numeric searches, and streams descriptive analyses of a selected dipeptide
//! from an external text-generation service.

pub mod analysis;
pub mod app;
pub mod config;
pub mod logging;
pub mod peptide;
pub mod terminal;
pub mod ui;

// Re-export main types for convenience
pub use app::App;
pub use peptide::{DipeptideRecord, MassMatrix, PeptideType};
