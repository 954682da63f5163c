use regex::Regex;

/// Best-effort textual repair for two known generator failure modes: bare
/// object keys and trailing separators. Each rewrite is applied once, in this
/// order, non-recursively; the output is not guaranteed to parse.
pub fn repair_json(input: &str) -> String {
    let quoted = quote_bare_keys(input);
    strip_trailing_commas(&quoted)
}

/// True when `prefix` ends inside a double-quoted string literal.
fn is_inside_string(prefix: &str) -> bool {
    let mut in_string = false;
    let mut escaped = false;
    for c in prefix.chars() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '"' => in_string = !in_string,
            _ => {}
        }
    }
    in_string
}

/// Wrap identifier-like keys (preceded by `{` or `,`, followed by `:`) in
/// double quotes. Tokens inside string literals are left alone, so a value
/// like "note: see map" survives; already-quoted keys never match because
/// the quote breaks the identifier pattern.
fn quote_bare_keys(input: &str) -> String {
    let re = Regex::new(r"([{,]\s*)([A-Za-z_][A-Za-z0-9_]*)(\s*:)").unwrap();

    let mut out = String::with_capacity(input.len() + 16);
    let mut last = 0;
    for caps in re.captures_iter(input) {
        let whole = caps.get(0).unwrap();
        let key = caps.get(2).unwrap();
        if is_inside_string(&input[..key.start()]) {
            continue;
        }
        out.push_str(&input[last..whole.start()]);
        out.push_str(&caps[1]);
        out.push('"');
        out.push_str(key.as_str());
        out.push('"');
        out.push_str(&caps[3]);
        last = whole.end();
    }
    out.push_str(&input[last..]);
    out
}

/// Delete a comma that directly precedes (ignoring whitespace) a closing
/// `}` or `]`, outside string literals.
fn strip_trailing_commas(input: &str) -> String {
    let re = Regex::new(r",\s*([}\]])").unwrap();

    let mut out = String::with_capacity(input.len());
    let mut last = 0;
    for caps in re.captures_iter(input) {
        let whole = caps.get(0).unwrap();
        if is_inside_string(&input[..whole.start()]) {
            continue;
        }
        out.push_str(&input[last..whole.start()]);
        out.push_str(&caps[1]);
        last = whole.end();
    }
    out.push_str(&input[last..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repairs_bare_keys_and_trailing_commas() {
        let repaired = repair_json("{days: [{day: 1,}]}");
        assert_eq!(repaired, "{\"days\": [{\"day\": 1}]}");
        let value: serde_json::Value = serde_json::from_str(&repaired).unwrap();
        assert_eq!(value["days"][0]["day"], 1);
    }

    #[test]
    fn idempotent_on_valid_json() {
        let valid = r#"{"days": [{"day": 1, "title": "Arrival", "activities": []}]}"#;
        assert_eq!(repair_json(valid), valid);
    }

    #[test]
    fn idempotent_on_valid_json_with_hostile_string_values() {
        // String values shaped like the failure patterns must not be touched.
        let valid = r#"{"description": "note: see map", "summary": "ends with , }"}"#;
        assert_eq!(repair_json(valid), valid);
        let value: serde_json::Value = serde_json::from_str(&repair_json(valid)).unwrap();
        assert_eq!(value["description"], "note: see map");
    }

    #[test]
    fn quotes_keys_outside_strings_only() {
        // The original's blind rewrite would quote "see" inside the value;
        // the quote-context-aware version leaves string bodies intact.
        let input = r#"{description: "stop 1, see: the map", day: 2}"#;
        let repaired = repair_json(input);
        let value: serde_json::Value = serde_json::from_str(&repaired).unwrap();
        assert_eq!(value["description"], "stop 1, see: the map");
        assert_eq!(value["day"], 2);
    }

    #[test]
    fn keeps_commas_inside_strings() {
        let input = r#"{notes: "pack light, }", day: 1,}"#;
        let repaired = repair_json(input);
        let value: serde_json::Value = serde_json::from_str(&repaired).unwrap();
        assert_eq!(value["notes"], "pack light, }");
    }

    #[test]
    fn handles_escaped_quotes_in_values() {
        let input = r#"{quote: "he said \"go\"", day: 3}"#;
        let repaired = repair_json(input);
        let value: serde_json::Value = serde_json::from_str(&repaired).unwrap();
        assert_eq!(value["quote"], "he said \"go\"");
    }

    #[test]
    fn strips_trailing_commas_in_nested_structures() {
        let repaired = repair_json("[1, 2, ]");
        assert_eq!(repaired, "[1, 2]");
        let repaired = repair_json("{\"a\": {\"b\": 1,},}");
        assert_eq!(repaired, "{\"a\": {\"b\": 1}}");
    }

    #[test]
    fn underscore_keys_are_quoted() {
        let repaired = repair_json("{map_link: \"\", cost_estimate: \"20\"}");
        let value: serde_json::Value = serde_json::from_str(&repaired).unwrap();
        assert!(value.get("map_link").is_some());
        assert_eq!(value["cost_estimate"], "20");
    }

    #[test]
    fn repair_does_not_promise_valid_output() {
        // Truncated input stays truncated; the caller decides what failure
        // to surface.
        let repaired = repair_json("{\"a\": [1, 2");
        assert!(serde_json::from_str::<serde_json::Value>(&repaired).is_err());
    }
}
