//! Name normalization for keyword matching

use unicode_normalization::UnicodeNormalization;

/// Canonicalize text for accent- and case-insensitive comparison.
///
/// The text is decomposed (NFKD) so accented letters split into a base
/// letter plus combining marks, everything outside ASCII is dropped, and the
/// rest is lowercased. `"Café"` and `"CAFE"` both become `"cafe"`.
pub fn normalize(text: &str) -> String {
    text.nfkd()
        .filter(char::is_ascii)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// True if the normalized `name` contains any of the already-normalized
/// keywords. Empty keywords never match.
pub fn contains_any(name: &str, keywords: &[String]) -> bool {
    keywords
        .iter()
        .any(|kw| !kw.is_empty() && name.contains(kw.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_accents_and_case() {
        assert_eq!(normalize("Café"), normalize("cafe"));
        assert_eq!(normalize("CAFÉ"), "cafe");
        assert_eq!(normalize("Fatura_Şubat.pdf"), "fatura_subat.pdf");
        assert_eq!(normalize("Façade Élan"), "facade elan");
    }

    #[test]
    fn test_compatibility_forms() {
        // Ligatures and full-width letters decompose to plain ASCII
        assert_eq!(normalize("ﬁle"), "file");
        assert_eq!(normalize("ＡＢＣ"), "abc");
    }

    #[test]
    fn test_non_ascii_only_becomes_empty() {
        assert_eq!(normalize("文件"), "");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_idempotent() {
        for s in ["Café", "İstanbul", "Ñandú 2024.txt", "plain", "文件 Über"] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn test_contains_any() {
        let keywords = vec![normalize("Invoice"), normalize("Fatura")];
        assert!(contains_any(&normalize("INVOICE_March.pdf"), &keywords));
        assert!(contains_any(&normalize("fatura-şubat.pdf"), &keywords));
        assert!(!contains_any(&normalize("report.pdf"), &keywords));
        assert!(!contains_any("anything", &[String::new()]));
    }
}
