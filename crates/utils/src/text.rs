//! Romanian text helpers: diacritic folding, search keys and slugs.

use std::sync::LazyLock;

use regex::Regex;

static NON_ALNUM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("valid slug regex"));

/// Fold a Romanian diacritic to its base Latin letter, preserving case.
/// Both the comma-below (Ș, Ț) and the legacy cedilla (Ş, Ţ) forms are handled.
pub fn fold_diacritic(c: char) -> char {
    match c {
        'ă' | 'â' => 'a',
        'Ă' | 'Â' => 'A',
        'î' => 'i',
        'Î' => 'I',
        'ș' | 'ş' => 's',
        'Ș' | 'Ş' => 'S',
        'ț' | 'ţ' => 't',
        'Ț' | 'Ţ' => 'T',
        other => other,
    }
}

/// Fold every diacritic in `s`.
pub fn fold_diacritics(s: &str) -> String {
    s.chars().map(fold_diacritic).collect()
}

/// Lowercased, folded and trimmed form used for case/diacritic-insensitive matching.
pub fn search_key(s: &str) -> String {
    fold_diacritics(s.trim()).to_lowercase()
}

/// URL slug: folded, lowercased, non-alphanumeric runs collapsed to `-`.
pub fn slugify(s: &str) -> String {
    let key = search_key(s);
    NON_ALNUM
        .replace_all(&key, "-")
        .trim_matches('-')
        .to_string()
}
