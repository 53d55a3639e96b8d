//! String similarity used for both title and artist comparison.

use std::collections::HashMap;

/// Case-insensitive Sørensen–Dice similarity over character bigrams.
///
/// Whitespace is ignored. Returns a value between 0.0 (nothing in common) and
/// 1.0 (identical). Any comparison involving an empty or whitespace-only
/// string is 0.0.
pub fn similarity(a: &str, b: &str) -> f64 {
    if is_blank(a) || is_blank(b) {
        return 0.0;
    }

    dice_coefficient(&a.to_lowercase(), &b.to_lowercase())
}

/// Sørensen–Dice over the multiset of character bigrams, whitespace removed.
fn dice_coefficient(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().filter(|c| !c.is_whitespace()).collect();
    let b: Vec<char> = b.chars().filter(|c| !c.is_whitespace()).collect();

    if a == b {
        return 1.0;
    }
    if a.len() < 2 || b.len() < 2 {
        return 0.0;
    }

    let mut bigrams: HashMap<(char, char), usize> = HashMap::new();
    for pair in a.windows(2) {
        *bigrams.entry((pair[0], pair[1])).or_default() += 1;
    }

    let mut shared = 0;
    for pair in b.windows(2) {
        if let Some(count) = bigrams.get_mut(&(pair[0], pair[1])) {
            if *count > 0 {
                *count -= 1;
                shared += 1;
            }
        }
    }

    (2 * shared) as f64 / (a.len() + b.len() - 2) as f64
}

fn is_blank(s: &str) -> bool {
    s.chars().all(char::is_whitespace)
}

/// Keep the first `ratio` share of `s`, counted in characters.
pub fn leading_fraction(s: &str, ratio: f64) -> &str {
    let keep = (s.chars().count() as f64 * ratio).floor() as usize;
    match s.char_indices().nth(keep) {
        Some((byte_idx, _)) => &s[..byte_idx],
        None => s,
    }
}

/// Similarity as a percentage rounded to two decimals, for display.
pub fn similarity_percent(a: &str, b: &str) -> f64 {
    (similarity(a, b) * 10000.0).round() / 100.0
}
