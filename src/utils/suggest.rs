use crate::constants::limits::SUGGESTION_LIMIT;

fn normalize(value: &str) -> String {
    value
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr = vec![0; b_chars.len() + 1];
    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != *cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b_chars.len()]
}

fn score(input: &str, candidate: &str) -> Option<usize> {
    let a = normalize(input);
    let b = normalize(candidate);
    if a.is_empty() || b.is_empty() {
        return None;
    }
    if a == b {
        return Some(0);
    }
    if a.contains(&b) || b.contains(&a) {
        return Some(1);
    }
    let allowed = match a.len() {
        0..=4 => 1,
        5..=8 => 2,
        n => ((n as f32) * 0.35).floor().max(3.0) as usize,
    };
    let distance = levenshtein(&a, &b);
    (distance <= allowed).then_some(distance)
}

/// Closest entries of `candidates` to `input`, best first.
pub fn suggest(input: &str, candidates: &[&'static str], limit: usize) -> Vec<&'static str> {
    let mut scored: Vec<(&'static str, usize)> = candidates
        .iter()
        .filter_map(|candidate| score(input, candidate).map(|s| (*candidate, s)))
        .collect();
    scored.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.len().cmp(&b.0.len())));
    scored
        .into_iter()
        .map(|(candidate, _)| candidate)
        .take(limit.max(1))
        .collect()
}

/// A "Did you mean" / "Use one of" hint for an unsupported enumerated value.
pub fn choice_hint(input: &str, candidates: &[&'static str]) -> String {
    let close = suggest(input, candidates, SUGGESTION_LIMIT);
    let list = format!("Use one of: {}.", candidates.join(", "));
    if close.is_empty() {
        list
    } else {
        format!("Did you mean: {}? {}", close.join(", "), list)
    }
}
