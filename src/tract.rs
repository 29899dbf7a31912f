use std::cmp::Ordering;

/// Compares two tract identifiers in human-expected order.
///
/// Identifiers parseable as numbers sort first, by magnitude. Text
/// identifiers follow, split into a case-insensitive prefix and a trailing
/// numeric suffix so "Oram 2" lands before "Oram 10". The result is a total
/// order: distinct strings with equal keys fall back to plain string order.
pub fn compare_tracts(a: &str, b: &str) -> Ordering {
    key_ordering(&tract_key(a), &tract_key(b)).then_with(|| a.cmp(b))
}

/// Sorts tract identifiers in place using [`compare_tracts`].
pub fn sort_tracts(tracts: &mut [String]) {
    tracts.sort_by(|a, b| compare_tracts(a, b));
}

#[derive(Debug, Clone, PartialEq)]
enum TractKey {
    Number(f64),
    Text { prefix: String, suffix: u64 },
}

fn tract_key(tract: &str) -> TractKey {
    if let Ok(n) = tract.trim().parse::<f64>() {
        if !n.is_nan() {
            return TractKey::Number(n);
        }
    }
    match split_trailing_number(tract) {
        Some((prefix, suffix)) => TractKey::Text {
            prefix: prefix.to_lowercase(),
            suffix,
        },
        None => TractKey::Text {
            prefix: tract.to_lowercase(),
            suffix: 0,
        },
    }
}

fn key_ordering(a: &TractKey, b: &TractKey) -> Ordering {
    match (a, b) {
        (TractKey::Number(x), TractKey::Number(y)) => x.total_cmp(y),
        (TractKey::Number(_), TractKey::Text { .. }) => Ordering::Less,
        (TractKey::Text { .. }, TractKey::Number(_)) => Ordering::Greater,
        (
            TractKey::Text {
                prefix: pa,
                suffix: sa,
            },
            TractKey::Text {
                prefix: pb,
                suffix: sb,
            },
        ) => pa.cmp(pb).then(sa.cmp(sb)),
    }
}

/// Splits "Oram 10" into ("Oram ", 10). Returns None when the text has no
/// trailing digits or the digit run overflows u64.
fn split_trailing_number(text: &str) -> Option<(&str, u64)> {
    let mut split = text.len();
    for (i, c) in text.char_indices().rev() {
        if c.is_ascii_digit() {
            split = i;
        } else {
            break;
        }
    }
    if split == text.len() {
        return None;
    }
    let suffix = text[split..].parse::<u64>().ok()?;
    Some((&text[..split], suffix))
}
