//! Spoken place names to lookup-friendly city names

/// Common abbreviations, matched against the lower-cased spoken text
const PLACE_ALIASES: &[(&str, &str)] = &[
    ("hk", "Hong Kong"),
    ("usa", "Washington, D.C."),
    ("us", "Washington, D.C."),
    ("uk", "London"),
    ("nyc", "New York City"),
    ("la", "Los Angeles"),
    ("sf", "San Francisco"),
];

/// Resolve a spoken place through the alias table, title-casing anything else
#[must_use]
pub fn resolve_place(spoken: &str) -> String {
    let key = spoken.trim().to_lowercase();

    PLACE_ALIASES
        .iter()
        .find(|(alias, _)| *alias == key)
        .map_or_else(|| title_case(&key), |(_, city)| (*city).to_string())
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases() {
        assert_eq!(resolve_place("hk"), "Hong Kong");
        assert_eq!(resolve_place("us"), "Washington, D.C.");
        assert_eq!(resolve_place("usa"), "Washington, D.C.");
        assert_eq!(resolve_place(" UK "), "London");
        assert_eq!(resolve_place("nyc"), "New York City");
        assert_eq!(resolve_place("la"), "Los Angeles");
        assert_eq!(resolve_place("sf"), "San Francisco");
    }

    #[test]
    fn test_title_case_fallback() {
        assert_eq!(resolve_place("tokyo"), "Tokyo");
        assert_eq!(resolve_place("rio de  janeiro"), "Rio De Janeiro");
        assert_eq!(resolve_place(""), "");
    }
}
