//! Fuzzy match scoring. Constants are deliberate tiers: an exact
//! keyword hit always outranks a prefix hit, which outranks a
//! substring hit, which outranks any edit-distance approximation.

const EXACT: i32 = 100;
const PREFIX: i32 = 80;
const SUBSTRING: i32 = 60;
const ABBREVIATION: i32 = 40;
const FUZZY_WEIGHT: f32 = 40.0;
const FUZZY_FLOOR: f32 = 0.6;

/// Score one `(keyword, query word)` pair. Zero when the pair is not
/// similar enough to count.
pub fn pair_score(keyword: &str, word: &str) -> i32 {
    if keyword == word {
        return EXACT;
    }
    if keyword.starts_with(word) {
        return PREFIX;
    }
    if keyword.contains(word) {
        return SUBSTRING;
    }
    // Dropped-letter abbreviations like "btn" for "button" fall below
    // the edit-distance floor, so in-order subsequences get their own
    // tier.
    if word.chars().count() >= 2 && is_subsequence(word, keyword) {
        return ABBREVIATION;
    }
    let sim = similarity(keyword, word);
    if sim > FUZZY_FLOOR {
        (sim * FUZZY_WEIGHT).floor() as i32
    } else {
        0
    }
}

fn is_subsequence(needle: &str, haystack: &str) -> bool {
    let mut chars = needle.chars().peekable();
    for c in haystack.chars() {
        if chars.peek() == Some(&c) {
            chars.next();
        }
    }
    chars.peek().is_none()
}

/// Levenshtein similarity in `[0, 1]`: `1 - distance / max_len`.
pub fn similarity(a: &str, b: &str) -> f32 {
    let len_a = a.chars().count();
    let len_b = b.chars().count();
    let max_len = len_a.max(len_b);
    if max_len == 0 {
        return 1.0;
    }
    1.0 - levenshtein(a, b) as f32 / max_len as f32
}

/// Classic two-row Levenshtein over chars.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut cur = vec![0usize; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        cur[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            cur[j + 1] = (prev[j + 1] + 1).min(cur[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut cur);
    }
    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levenshtein_basics() {
        assert_eq!(levenshtein("", ""), 0);
        assert_eq!(levenshtein("button", "button"), 0);
        assert_eq!(levenshtein("button", "buton"), 1);
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("", "abc"), 3);
    }

    #[test]
    fn pair_score_tiers() {
        assert_eq!(pair_score("button", "button"), 100);
        assert_eq!(pair_score("button", "but"), 80);
        assert_eq!(pair_score("icon-button", "button"), 60);
        // Dropped-letter abbreviation.
        assert_eq!(pair_score("button", "btn"), 40);
        // "buttom" vs "button": distance 1 of 6, similarity ~0.833,
        // floor(0.833 * 40) = 33.
        assert_eq!(pair_score("button", "buttom"), 33);
        // Dissimilar words score zero.
        assert_eq!(pair_score("table", "modal"), 0);
    }

    #[test]
    fn fuzzy_floor_excludes_weak_matches() {
        // "card" vs "nope" share nothing; similarity well under 0.6.
        assert!(similarity("card", "nope") < 0.6);
        assert_eq!(pair_score("card", "nope"), 0);
    }
}
