// crates/carefinder-core/src/text.rs

/// Convert a string into a folded key suitable for comparison.
///
/// This performs:
/// 1\) Transliterate Unicode → ASCII via `deunicode`
/// 2\) Normalize to lowercase
/// 3\) Collapse runs of whitespace into a single space
///
/// ```rust
/// use carefinder_core::text::fold_key;
///
/// assert_eq!(fold_key("  Dera   Ismail Khan "), "dera ismail khan");
/// assert_eq!(fold_key("Peşawar"), "pesawar");
/// ```
pub fn fold_key(s: &str) -> String {
    deunicode::deunicode(s)
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Compares two strings for equality after folding with [`fold_key`].
pub fn equals_folded(a: &str, b: &str) -> bool {
    fold_key(a) == fold_key(b)
}

/// Name-based matching for anything with a canonical display name.
pub trait NameMatch {
    fn name_str(&self) -> &str;

    /// Accent-insensitive and case-insensitive equality.
    #[inline]
    fn is_named(&self, q: &str) -> bool {
        equals_folded(self.name_str(), q)
    }

    /// Accent-insensitive and case-insensitive substring match.
    #[inline]
    fn name_contains(&self, q: &str) -> bool {
        fold_key(self.name_str()).contains(&fold_key(q))
    }
}

impl NameMatch for &str {
    fn name_str(&self) -> &str {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_key_strips_case_accents_and_spacing() {
        assert_eq!(fold_key("MINGORA"), "mingora");
        assert_eq!(fold_key("Abbottābād"), "abbottabad");
        assert_eq!(fold_key("\tSwat \n"), "swat");
    }

    #[test]
    fn test_name_match_helpers() {
        assert!("Nowshera".is_named("nowshera"));
        assert!("Dera Ismail Khan (D.I. Khan)".name_contains("d.i. khan"));
        assert!(!"Haripur".name_contains("mardan"));
    }
}
