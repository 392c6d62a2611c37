use crate::peptide::{DipeptideRecord, PeptideType};

pub const SYSTEM_INSTRUCTION: &str = "You are a biochemistry expert specializing in proteomics and mass spectrometry.
Your goal is to provide concise, scientifically accurate information about specific dipeptides.
Focus on:
1. Solubility and physical properties.
2. Biological significance (if any known).
3. Unique chemical characteristics (e.g., steric hindrance, aromatic interactions).
Keep the response formatted in Markdown. Be concise.";

pub const MISSING_CREDENTIAL_MESSAGE: &str = "Error: API Key is missing from environment variables.";

pub const RETRIEVAL_ERROR_MESSAGE: &str = "\n\n**Error retrieving analysis. Please try again later.**";

/// User prompt for one dipeptide under the active bond topology
pub fn build_prompt(record: &DipeptideRecord, peptide_type: PeptideType) -> String {
    format!(
        "Provide a detailed scientific analysis of the dipeptide: {}.\n\
         Include its specific molecular weight context ({:.4} Da).\n\
         If it is a cyclic dipeptide (diketopiperazine), mention its formation or stability.",
        record.full_name(peptide_type),
        record.mass(peptide_type)
    )
}
