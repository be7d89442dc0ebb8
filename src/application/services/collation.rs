//! Locale-aware string comparison for display names.
//!
//! Names compare on three levels: base letters ignoring case and common
//! Latin accents, then accents (unaccented first), then case (lowercase
//! first). Whitespace is significant and sorts before letters.

use std::cmp::Ordering;

/// Compares two display names the way a user expects them sorted.
#[must_use]
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(primary_key(b))
        .then_with(|| secondary(a, b))
        .then_with(|| tertiary(a, b))
}

fn primary_key(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars().flat_map(char::to_lowercase).map(strip_accent)
}

fn secondary(a: &str, b: &str) -> Ordering {
    let accented = |s: &str| -> Vec<bool> {
        s.chars()
            .flat_map(char::to_lowercase)
            .map(|c| strip_accent(c) != c)
            .collect()
    };

    accented(a).cmp(&accented(b))
}

fn tertiary(a: &str, b: &str) -> Ordering {
    for (ca, cb) in a.chars().zip(b.chars()) {
        if ca == cb {
            continue;
        }
        match (ca.is_lowercase(), cb.is_lowercase()) {
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            _ => {}
        }
    }
    Ordering::Equal
}

const fn strip_accent(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => 'a',
        'ç' | 'ć' | 'č' => 'c',
        'ď' => 'd',
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ė' | 'ę' | 'ě' => 'e',
        'ğ' => 'g',
        'ì' | 'í' | 'î' | 'ï' | 'ī' | 'į' | 'ı' => 'i',
        'ł' => 'l',
        'ñ' | 'ń' | 'ň' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ő' => 'o',
        'ř' => 'r',
        'ś' | 'š' | 'ş' => 's',
        'ť' | 'ţ' => 't',
        'ù' | 'ú' | 'û' | 'ü' | 'ū' | 'ů' | 'ű' | 'ų' => 'u',
        'ý' | 'ÿ' => 'y',
        'ź' | 'ż' | 'ž' => 'z',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("ann", "Bob", Ordering::Less ; "case does not dominate")]
    #[test_case("Zoe", "adam", Ordering::Greater ; "uppercase later letter")]
    #[test_case("émile", "fred", Ordering::Less ; "accent folds to base letter")]
    #[test_case("emile", "émile", Ordering::Less ; "unaccented first")]
    #[test_case("bob", "Bob", Ordering::Less ; "lowercase first on tie")]
    #[test_case("  ann", "ann", Ordering::Less ; "leading whitespace first")]
    #[test_case("al", "alice", Ordering::Less ; "prefix first")]
    fn test_locale_compare(a: &str, b: &str, expected: Ordering) {
        assert_eq!(locale_compare(a, b), expected);
    }

    #[test]
    fn test_sort_is_stable_for_equal_names() {
        let mut names = vec![("Sam", 1), ("amy", 2), ("Sam", 3), ("AMY", 4)];
        names.sort_by(|a, b| locale_compare(a.0, b.0));

        assert_eq!(names, vec![("amy", 2), ("AMY", 4), ("Sam", 1), ("Sam", 3)]);
    }
}
