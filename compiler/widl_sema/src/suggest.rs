//! "Did you mean?" suggestions for misspelled extended attributes.
//!
//! Candidates within an edit-distance threshold scaled to the input
//! length are considered; the closest wins, ties going to the earlier
//! candidate.

/// Levenshtein edit distance, two-row formulation.
pub(crate) fn edit_distance(a: &str, b: &str) -> usize {
    let b_len = b.chars().count();
    if a.is_empty() {
        return b_len;
    }
    if b_len == 0 {
        return a.chars().count();
    }

    let mut prev_row: Vec<usize> = (0..=b_len).collect();
    let mut curr_row: Vec<usize> = vec![0; b_len + 1];

    for (i, a_char) in a.chars().enumerate() {
        curr_row[0] = i + 1;
        for (j, b_char) in b.chars().enumerate() {
            let cost = usize::from(a_char != b_char);
            curr_row[j + 1] = (prev_row[j + 1] + 1)
                .min(curr_row[j] + 1)
                .min(prev_row[j] + cost);
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b_len]
}

fn threshold(name_len: usize) -> usize {
    match name_len {
        0 => 0,
        1..=2 => 1,
        3..=5 => 2,
        6..=10 => 3,
        n => (n / 2).min(5),
    }
}

/// Closest candidate within the threshold for `name`. Case differences
/// count as a single edit at most.
pub(crate) fn suggest_similar<'a>(
    name: &str,
    candidates: impl Iterator<Item = &'a str>,
) -> Option<&'a str> {
    if name.is_empty() {
        return None;
    }
    let limit = threshold(name.len());
    let lowered = name.to_ascii_lowercase();

    let mut best: Option<(&str, usize)> = None;
    for candidate in candidates {
        if name.len().abs_diff(candidate.len()) > limit {
            continue;
        }
        let distance = if candidate.eq_ignore_ascii_case(name) {
            1
        } else {
            edit_distance(&lowered, &candidate.to_ascii_lowercase())
        };
        if distance <= limit && best.map_or(true, |(_, d)| distance < d) {
            best = Some((candidate, distance));
        }
    }
    best.map(|(s, _)| s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edit_distance_basics() {
        assert_eq!(edit_distance("", "abc"), 3);
        assert_eq!(edit_distance("abc", ""), 3);
        assert_eq!(edit_distance("kitten", "sitting"), 3);
        assert_eq!(edit_distance("Throws", "Throws"), 0);
    }

    #[test]
    fn suggests_closest_name() {
        let names = ["Throws", "GetterThrows", "SetterThrows", "Clamp"];
        assert_eq!(suggest_similar("Throw", names.iter().copied()), Some("Throws"));
        assert_eq!(suggest_similar("clamp", names.iter().copied()), Some("Clamp"));
    }

    #[test]
    fn no_suggestion_for_unrelated_name() {
        let names = ["Throws", "Clamp"];
        assert_eq!(suggest_similar("Frobnicate", names.iter().copied()), None);
        assert_eq!(suggest_similar("", names.iter().copied()), None);
    }
}
