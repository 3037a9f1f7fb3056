//! Casing helpers bridging caller-side snake_case names and the remote
//! protocol's CamelCase parameter and attribute names.

/// `size_small` -> `SizeSmall`. Chunk tails are lowered so the fully
/// upper-cased spelling of a symbol normalises to the same form.
pub(crate) fn camel_case(symbol: &str) -> String {
    symbol
        .split('_')
        .filter(|chunk| !chunk.is_empty())
        .map(|chunk| {
            let mut chars = chunk.chars();
            match chars.next() {
                Some(first) => {
                    first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase()
                }
                None => String::new(),
            }
        })
        .collect()
}

/// Inverse of [`camel_case`], with acronym runs collapsed: `DisplayUrl` ->
/// `display_url`, `ID` -> `id`, `WebTotal` -> `web_total`.
pub(crate) fn snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() {
            let boundary = match i.checked_sub(1).map(|j| chars[j]) {
                None => false,
                Some(prev) => {
                    prev.is_ascii_lowercase()
                        || prev.is_ascii_digit()
                        || (prev.is_ascii_uppercase()
                            && chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase()))
                }
            };
            if boundary {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_cases_underscored_symbols() {
        assert_eq!(camel_case("strict"), "Strict");
        assert_eq!(camel_case("size_small"), "SizeSmall");
        assert_eq!(camel_case("science_and_technology"), "ScienceAndTechnology");
        assert_eq!(camel_case("duration_short"), "DurationShort");
        assert_eq!(camel_case("SIZE_SMALL"), "SizeSmall");
    }

    #[test]
    fn snake_cases_remote_attribute_names() {
        assert_eq!(snake_case("DisplayUrl"), "display_url");
        assert_eq!(snake_case("ID"), "id");
        assert_eq!(snake_case("WebTotal"), "web_total");
        assert_eq!(snake_case("AlterationOverrideQuery"), "alteration_override_query");
        assert_eq!(snake_case("RunTime"), "run_time");
        assert_eq!(snake_case("Date"), "date");
    }

    #[test]
    fn snake_handles_acronym_followed_by_word() {
        assert_eq!(snake_case("IDValue"), "id_value");
    }
}
