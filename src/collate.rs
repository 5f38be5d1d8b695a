//! Numeric-aware string ordering, so that `"10"` sorts after `"2"`.

use std::cmp::Ordering;

enum Run<'a> {
    Digits(&'a str),
    Text(&'a str),
}

fn runs(input: &str) -> Vec<Run<'_>> {
    let mut out = Vec::new();
    let mut start = 0usize;
    let mut in_digits: Option<bool> = None;

    for (index, ch) in input.char_indices() {
        let is_digit = ch.is_ascii_digit();
        match in_digits {
            Some(current) if current != is_digit => {
                out.push(make_run(&input[start..index], current));
                start = index;
                in_digits = Some(is_digit);
            }
            None => in_digits = Some(is_digit),
            _ => {}
        }
    }

    if let Some(current) = in_digits {
        out.push(make_run(&input[start..], current));
    }

    out
}

fn make_run(slice: &str, digits: bool) -> Run<'_> {
    if digits {
        Run::Digits(slice)
    } else {
        Run::Text(slice)
    }
}

fn cmp_digits(left: &str, right: &str) -> Ordering {
    let left = left.trim_start_matches('0');
    let right = right.trim_start_matches('0');
    left.len().cmp(&right.len()).then_with(|| left.cmp(right))
}

fn cmp_text(left: &str, right: &str) -> Ordering {
    left.chars()
        .flat_map(char::to_lowercase)
        .cmp(right.chars().flat_map(char::to_lowercase))
}

/// Compares digit runs by value and text runs case-insensitively.
///
/// Ties fall back to byte order so the result is a total order that agrees
/// with `==`.
pub fn natural_cmp(left: &str, right: &str) -> Ordering {
    let left_runs = runs(left);
    let right_runs = runs(right);

    for (a, b) in left_runs.iter().zip(right_runs.iter()) {
        let ordering = match (a, b) {
            (Run::Digits(a), Run::Digits(b)) => cmp_digits(a, b),
            (Run::Text(a), Run::Text(b)) => cmp_text(a, b),
            (Run::Digits(_), Run::Text(_)) => Ordering::Less,
            (Run::Text(_), Run::Digits(_)) => Ordering::Greater,
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    left_runs
        .len()
        .cmp(&right_runs.len())
        .then_with(|| left.cmp(right))
}
