// crates/addrfmt-core/src/text.rs

/// Convert a string into a folded key suitable for comparison.
///
/// This performs:
/// 1\) Transliterate Unicode → ASCII (e.g. `Curaçao` -> `Curacao`)
/// 2\) Normalize to lowercase
///
/// The implementation uses the `deunicode` crate to perform a best-effort
/// transliteration from Unicode to ASCII.
///
/// # Examples
///
/// ```rust
/// use addrfmt_core::text::fold_key;
///
/// assert_eq!(fold_key("Curaçao"), "curacao");
/// assert_eq!(fold_key("Baden-Württemberg"), "baden-wurttemberg");
/// ```
pub fn fold_key(s: &str) -> String {
    deunicode::deunicode(s).to_lowercase()
}

/// Compares two strings for equality after Unicode folding and normalization.
///
/// ```rust
/// use addrfmt_core::text::equals_folded;
///
/// assert!(equals_folded("São Paulo", "sao paulo"));
/// assert!(!equals_folded("Berlin", "Paris"));
/// ```
pub fn equals_folded(a: &str, b: &str) -> bool {
    fold_key(a) == fold_key(b)
}

/// Case-insensitive equality without accent folding.
pub fn equals_ignore_case(a: &str, b: &str) -> bool {
    a == b || a.to_uppercase() == b.to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignore_case_keeps_accents_significant() {
        assert!(equals_ignore_case("ÎLE-DE-FRANCE", "Île-de-France"));
        assert!(!equals_ignore_case("Ile-de-France", "Île-de-France"));
        assert!(equals_folded("Ile-de-France", "Île-de-France"));
    }
}
