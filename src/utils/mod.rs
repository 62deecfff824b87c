//! Small shared helpers: slug generation and terminal formatting.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Any run of characters outside [a-z0-9] collapses to a single hyphen
    static ref NON_ALNUM: Regex = Regex::new(r"[^a-z0-9]+").unwrap();

    /// Hyphens left at either end after collapsing
    static ref EDGE_HYPHENS: Regex = Regex::new(r"^-+|-+$").unwrap();
}

/// Derive a URL-safe slug from a human-readable name.
///
/// Lowercases with Turkish-aware folding (both `İ` and `I` end up as plain
/// `i`), transliterates the fixed set `ğ ü ş ı ö ç` to ASCII, replaces every
/// run of non-alphanumeric characters with one hyphen, and trims hyphens from
/// the ends. Deterministic and idempotent: feeding a slug back in returns it
/// unchanged.
pub fn generate_slug(name: &str) -> String {
    let mut lowered = String::with_capacity(name.len());
    for c in name.chars() {
        match c {
            // Unicode lowercasing of 'İ' yields "i" + a combining dot, which
            // the hyphen pass would otherwise split into "i-".
            'İ' | 'I' => lowered.push('i'),
            _ => lowered.extend(c.to_lowercase()),
        }
    }

    let folded: String = lowered
        .chars()
        .map(|c| match c {
            'ğ' => 'g',
            'ü' => 'u',
            'ş' => 's',
            'ı' => 'i',
            'ö' => 'o',
            'ç' => 'c',
            _ => c,
        })
        .collect();

    let hyphenated = NON_ALNUM.replace_all(&folded, "-");
    EDGE_HYPHENS.replace_all(&hyphenated, "").into_owned()
}

/// Truncate a string to max length with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

/// Ensure a directory exists, creating it (and parents) if missing
pub fn ensure_dir(path: &std::path::Path) -> std::io::Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_turkish_characters() {
        assert_eq!(generate_slug("Kadın Ürünleri"), "kadin-urunleri");
        assert_eq!(generate_slug("Çocuk Gömlekleri"), "cocuk-gomlekleri");
        assert_eq!(generate_slug("İndirimli Ürünler"), "indirimli-urunler");
    }

    #[test]
    fn test_slug_collapses_punctuation_runs() {
        assert_eq!(generate_slug("  Çöp—Kutusu!! "), "cop-kutusu");
        assert_eq!(generate_slug("a   b -- c"), "a-b-c");
    }

    #[test]
    fn test_slug_trims_edge_hyphens() {
        assert_eq!(generate_slug("---hello---"), "hello");
        assert_eq!(generate_slug("!!!"), "");
    }

    #[test]
    fn test_slug_idempotent() {
        for input in ["Kadın Ürünleri", "  Çöp—Kutusu!! ", "Already-A-Slug", "çğş"] {
            let once = generate_slug(input);
            assert_eq!(generate_slug(&once), once);
        }
    }

    #[test]
    fn test_slug_dotless_capital_i() {
        // Turkish keyboards produce plain ASCII 'I' for dotless capital i
        assert_eq!(generate_slug("ISPARTA"), "isparta");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a-very-long-name", 10), "a-very-...");
    }
}
