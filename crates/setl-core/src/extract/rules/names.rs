//! Name comparison and splitting for payee/agency matching.
//!
//! OCR regularly mangles a character or two in a payee name, so exact
//! comparison is useless; edit distance over folded names tolerates
//! digit/letter confusion without matching unrelated entities.

/// Levenshtein edit distance over characters, single-row variant.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut row: Vec<usize> = (0..=b.len()).collect();

    for (i, ca) in a.iter().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            let next = (diagonal + cost).min(row[j] + 1).min(row[j + 1] + 1);
            diagonal = row[j + 1];
            row[j + 1] = next;
        }
    }

    row[b.len()]
}

/// Fold a name for comparison: uppercase, alphanumerics and single
/// spaces only.
fn fold_name(name: &str) -> String {
    let mut folded = String::with_capacity(name.len());
    let mut last_was_space = true;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            folded.push(c.to_ascii_uppercase());
            last_was_space = false;
        } else if !last_was_space {
            folded.push(' ');
            last_was_space = true;
        }
    }
    folded.trim_end().to_string()
}

/// Similarity of two names in [0.0, 1.0] after folding.
pub fn name_similarity(a: &str, b: &str) -> f32 {
    let a = fold_name(a);
    let b = fold_name(b);

    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }

    1.0 - (levenshtein(&a, &b) as f32 / max_len as f32)
}

/// Split a person name into (first, last). Middle tokens are dropped;
/// a single token is a first name only.
pub fn split_person_name(raw: &str) -> (Option<String>, Option<String>) {
    let tokens: Vec<&str> = raw
        .split_whitespace()
        .filter(|t| t.chars().any(|c| c.is_alphabetic()))
        .collect();

    match tokens.as_slice() {
        [] => (None, None),
        [only] => (Some((*only).to_string()), None),
        [first, .., last] => (Some((*first).to_string()), Some((*last).to_string())),
    }
}
