//! Fuzzy headline matching.

use std::collections::BTreeSet;

/// Lowercases and keeps only `a-z`, `0-9` and spaces.
#[must_use]
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == ' ')
        .collect()
}

/// Token-set similarity in `0..=100`.
///
/// Whitespace tokens are deduplicated into sorted sets. Inputs without tokens
/// score 0; a shared token set that fully contains the other side scores 100.
/// Otherwise the best of three Indel ratios wins: intersection+rest of `a`
/// against intersection+rest of `b`, and the intersection against each of them.
#[must_use]
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let intersection: Vec<&str> = tokens_a.intersection(&tokens_b).copied().collect();
    let diff_ab: Vec<&str> = tokens_a.difference(&tokens_b).copied().collect();
    let diff_ba: Vec<&str> = tokens_b.difference(&tokens_a).copied().collect();

    if !intersection.is_empty() && (diff_ab.is_empty() || diff_ba.is_empty()) {
        return 100.0;
    }

    let diff_ab = diff_ab.join(" ");
    let diff_ba = diff_ba.join(" ");
    let ab_len = diff_ab.chars().count();
    let ba_len = diff_ba.chars().count();
    let sect_len = intersection.join(" ").chars().count();

    // The separator between intersection and difference only exists when both are present.
    let separator = usize::from(sect_len != 0);
    let sect_ab_len = sect_len + separator + ab_len;
    let sect_ba_len = sect_len + separator + ba_len;

    let diff_ratio = normalized_similarity(indel_distance(&diff_ab, &diff_ba), sect_ab_len + sect_ba_len);
    if sect_len == 0 {
        return diff_ratio;
    }

    // Only the differences (plus separator) are edited away when comparing to the bare intersection.
    let sect_ab_ratio = normalized_similarity(separator + ab_len, sect_len + sect_ab_len);
    let sect_ba_ratio = normalized_similarity(separator + ba_len, sect_len + sect_ba_len);

    diff_ratio.max(sect_ab_ratio).max(sect_ba_ratio)
}

#[allow(clippy::cast_precision_loss)]
fn normalized_similarity(distance: usize, total_len: usize) -> f64 {
    if total_len == 0 {
        return 100.0;
    }
    100.0 * (1.0 - distance as f64 / total_len as f64)
}

/// Insertions plus deletions turning `a` into `b`.
fn indel_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    a.len() + b.len() - 2 * longest_common_subsequence(&a, &b)
}

fn longest_common_subsequence(a: &[char], b: &[char]) -> usize {
    let mut row = vec![0_usize; b.len() + 1];
    for ca in a {
        let mut diagonal = 0;
        for (j, cb) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if ca == cb { diagonal + 1 } else { above.max(row[j]) };
            diagonal = above;
        }
    }
    row[b.len()]
}
