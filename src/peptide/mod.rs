pub mod amino_acids;
pub mod matching;
pub mod matrix;

pub use amino_acids::*;
pub use matching::*;
pub use matrix::*;
