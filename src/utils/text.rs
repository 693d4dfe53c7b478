pub fn truncate_utf8_prefix(value: &str, max_bytes: usize) -> String {
    if value.len() <= max_bytes {
        return value.to_string();
    }
    let mut end = max_bytes;
    while end > 0 && !value.is_char_boundary(end) {
        end -= 1;
    }
    value[..end].to_string()
}

/// Prefixes `tag` with `#` unless it already carries one.
pub fn hashed_tag(tag: &str) -> String {
    let tag = tag.trim();
    if tag.starts_with('#') {
        tag.to_string()
    } else {
        format!("#{}", tag)
    }
}

#[cfg(test)]
mod tests {
    use super::{hashed_tag, truncate_utf8_prefix};

    #[test]
    fn truncate_keeps_short_values() {
        assert_eq!(truncate_utf8_prefix("xcall", 16), "xcall");
    }

    #[test]
    fn truncate_does_not_split_utf8() {
        assert_eq!(truncate_utf8_prefix("aé", 2), "a");
        assert_eq!(truncate_utf8_prefix("aéb", 3), "aé");
    }

    #[test]
    fn hashed_tag_adds_single_hash() {
        assert_eq!(hashed_tag("work"), "#work");
        assert_eq!(hashed_tag("#work"), "#work");
        assert_eq!(hashed_tag(" todo/home "), "#todo/home");
    }
}
