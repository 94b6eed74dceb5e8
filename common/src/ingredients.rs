/// Parse a comma-separated ingredient list.
///
/// Tokens are trimmed and empty tokens dropped. The result is a set: a repeated
/// ingredient keeps its first position only. An all-empty input yields an
/// empty list.
pub fn parse_ingredients(text: &str) -> Vec<String> {
    let mut ingredients: Vec<String> = Vec::new();
    for token in text.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if !ingredients.iter().any(|existing| existing == token) {
            ingredients.push(token.to_string());
        }
    }
    ingredients
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_input_is_split_as_is() {
        assert_eq!(parse_ingredients("gin, lime, soda"), ["gin", "lime", "soda"]);
    }

    #[test]
    fn empties_and_padding_are_dropped() {
        assert_eq!(parse_ingredients("gin,, lime ,"), ["gin", "lime"]);
        assert_eq!(parse_ingredients("gin,lime"), parse_ingredients(" gin ,, lime ,"));
    }

    #[test]
    fn parsing_is_idempotent() {
        let once = parse_ingredients(" mint ,rum,, lime");
        let twice = parse_ingredients(&once.join(","));
        assert_eq!(once, twice);
    }

    #[test]
    fn duplicates_collapse() {
        assert_eq!(parse_ingredients("rum, lime, rum"), ["rum", "lime"]);
    }

    #[test]
    fn blank_input_yields_nothing() {
        assert!(parse_ingredients("").is_empty());
        assert!(parse_ingredients(" , ,").is_empty());
    }
}
