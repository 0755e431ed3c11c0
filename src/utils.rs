// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Utility functions for summarizing loaded data

use ndarray::ArrayView1;

/// Simple pluralization for the nouns used in summaries.
#[must_use]
pub fn pluralize(word: &str) -> String {
    match word {
        "person" => "persons".to_string(),
        "detection" | "frame" | "view" | "image" => format!("{word}s"),
        _ => {
            if word.ends_with(['s', 'x']) || word.ends_with("ch") || word.ends_with("sh") {
                format!("{word}es")
            } else if word.ends_with('y') && !word.ends_with("ey") && !word.ends_with("ay") {
                format!("{}ies", &word[..word.len() - 1])
            } else {
                format!("{word}s")
            }
        }
    }
}

/// Format a count with its noun, e.g. `"1 view"` or `"3 detections"`.
#[must_use]
pub fn format_count(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{count} {word}")
    } else {
        format!("{count} {}", pluralize(word))
    }
}

/// Index and value of the largest count, first one on ties.
///
/// Returns `None` for an empty slice.
#[must_use]
pub fn argmax(counts: ArrayView1<'_, usize>) -> Option<(usize, usize)> {
    counts
        .iter()
        .copied()
        .enumerate()
        .fold(None, |best, (i, c)| match best {
            Some((_, b)) if b >= c => best,
            _ => Some((i, c)),
        })
}
