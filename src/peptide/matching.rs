use crate::peptide::matrix::{DipeptideRecord, MassMatrix, PeptideType};

/// Absolute tolerance in Daltons for numeric queries
pub const MATCH_TOLERANCE_DA: f64 = 0.05;

/// Decide whether a matrix cell matches a free-text query.
///
/// Names and codes are matched first. Numeric queries are compared only against
/// the mass of the active peptide type, either within `MATCH_TOLERANCE_DA` or as a
/// prefix of the mass printed to four decimals ("203" matches 203.1270, "270" does not).
pub fn is_match(record: &DipeptideRecord, query: &str, peptide_type: PeptideType) -> bool {
    let term = query.trim().to_lowercase();
    if term.is_empty() {
        return false;
    }

    if matches_text(record, &term) {
        return true;
    }

    let Some(search_mass) = parse_leading_float(&term) else {
        return false;
    };

    let active_mass = record.mass(peptide_type);
    if (active_mass - search_mass).abs() <= MATCH_TOLERANCE_DA {
        return true;
    }

    format!("{active_mass:.4}").starts_with(&term)
}

fn matches_text(record: &DipeptideRecord, term: &str) -> bool {
    let one_letter = |c: char| {
        let mut chars = term.chars();
        chars.next().is_some_and(|t| t == c.to_ascii_lowercase()) && chars.next().is_none()
    };

    record.aa1.name.to_lowercase().contains(term)
        || record.aa2.name.to_lowercase().contains(term)
        || record.aa1.three_letter.to_lowercase().contains(term)
        || record.aa2.three_letter.to_lowercase().contains(term)
        || one_letter(record.aa1.one_letter)
        || one_letter(record.aa2.one_letter)
}

/// Parse the longest numeric prefix of `text`, ignoring whatever follows it.
///
/// Accepts an optional sign, digits with an optional fraction and an optional
/// exponent. Returns `None` when no digits lead the string.
pub fn parse_leading_float(text: &str) -> Option<f64> {
    let bytes = text.trim_start().as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }

    if digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    // The prefix is pure ASCII, so slicing at `end` is a char boundary.
    std::str::from_utf8(&bytes[..end]).ok()?.parse::<f64>().ok()
}

/// Number of cells in the matrix matching `query`
pub fn count_matches(matrix: &MassMatrix, query: &str, peptide_type: PeptideType) -> usize {
    matrix.iter().filter(|record| is_match(record, query, peptide_type)).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::peptide::amino_acids::find_amino_acid;

    fn record(id: &str) -> &'static DipeptideRecord {
        MassMatrix::standard().find(id).unwrap()
    }

    #[test]
    fn test_empty_query_matches_nothing() {
        let matrix = MassMatrix::standard();
        assert_eq!(count_matches(matrix, "", PeptideType::Linear), 0);
        assert_eq!(count_matches(matrix, "   ", PeptideType::Cyclic), 0);
    }

    #[test]
    fn test_three_letter_query() {
        let matrix = MassMatrix::standard();
        for r in matrix.iter() {
            let has_ala = r.aa1.three_letter == "Ala" || r.aa2.three_letter == "Ala";
            if has_ala {
                assert!(is_match(r, "Ala", PeptideType::Linear), "{} should match", r.id);
            }
        }
        assert!(!is_match(record("Gly-Val"), "Ala", PeptideType::Linear));
    }

    #[test]
    fn test_name_substring_is_case_insensitive() {
        assert!(is_match(record("Trp-Gly"), "TRYPTO", PeptideType::Linear));
        assert!(is_match(record("Gly-Glu"), "glutamic", PeptideType::Cyclic));
        assert!(!is_match(record("Gly-Gly"), "glutamic", PeptideType::Cyclic));
    }

    #[test]
    fn test_one_letter_code_requires_exact_match() {
        assert!(is_match(record("Trp-Gly"), "w", PeptideType::Linear));
        assert!(is_match(record("Gly-Trp"), " W ", PeptideType::Linear));
        assert!(!is_match(record("Gly-Gly"), "w", PeptideType::Linear));
    }

    #[test]
    fn test_tolerance_match() {
        let matrix = MassMatrix::standard();
        for r in matrix.iter() {
            let in_window = (188.05..=188.15).contains(&r.linear_mass);
            if in_window {
                assert!(is_match(r, "188.1", PeptideType::Linear), "{} should match", r.id);
            }
        }
        // Gly-Leu is 188.116092 Da
        assert!(is_match(record("Gly-Leu"), "188.1", PeptideType::Linear));
        assert!(is_match(record("Ala-Val"), "188.12", PeptideType::Linear));
        assert!(!is_match(record("Gly-Gly"), "188.1", PeptideType::Linear));
    }

    #[test]
    fn test_prefix_match_does_not_match_tail() {
        // Ala-Met: 89.047678 + 149.051049 - 18.010565 = 220.088162
        let r = record("Ala-Met");
        assert_eq!(format!("{:.4}", r.linear_mass), "220.0882");
        assert!(is_match(r, "220", PeptideType::Linear));
        assert!(is_match(r, "220.08", PeptideType::Linear));
        assert!(!is_match(r, "0882", PeptideType::Linear));
        assert!(!is_match(r, "088", PeptideType::Linear));
    }

    #[test]
    fn test_prefix_regression_203() {
        let aa = find_amino_acid("Gly").unwrap();
        let mut r = DipeptideRecord::new(*aa, *aa);
        r.linear_mass = 203.127;
        assert!(is_match(&r, "203", PeptideType::Linear));
        assert!(!is_match(&r, "270", PeptideType::Linear));
    }

    #[test]
    fn test_numeric_match_uses_active_mass_only() {
        let r = record("Gly-Leu");
        let cyclic = format!("{:.2}", r.cyclic_mass);
        assert!(is_match(r, &cyclic, PeptideType::Cyclic));
        assert!(!is_match(r, &cyclic, PeptideType::Linear));
    }

    #[test]
    fn test_non_numeric_non_textual_query() {
        assert_eq!(count_matches(MassMatrix::standard(), "xyz", PeptideType::Linear), 0);
    }

    #[test]
    fn test_parse_leading_float() {
        assert_eq!(parse_leading_float("188.1"), Some(188.1));
        assert_eq!(parse_leading_float("188x"), Some(188.0));
        assert_eq!(parse_leading_float(".5"), Some(0.5));
        assert_eq!(parse_leading_float("5."), Some(5.0));
        assert_eq!(parse_leading_float("-2.5e1da"), Some(-25.0));
        assert_eq!(parse_leading_float("1e"), Some(1.0));
        assert_eq!(parse_leading_float("abc"), None);
        assert_eq!(parse_leading_float("-"), None);
        assert_eq!(parse_leading_float("."), None);
        assert_eq!(parse_leading_float(""), None);
    }
}
