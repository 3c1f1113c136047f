//! API key resolution from the process environment.

/// Environment variables consulted, in order.
const KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Resolve the generation credential, if any usable value is present.
///
/// Read once per generation call; there are no CLI flags or config files
/// for the credential.
pub fn resolve_api_key() -> Option<String> {
    KEY_VARS
        .iter()
        .find_map(|name| std::env::var(name).ok().and_then(|raw| clean_key(&raw)))
}

/// Clean a raw environment value into a usable key.
///
/// Build shims sometimes inject the literal strings "undefined" or "null",
/// or wrap the key in quotes; both forms are treated as absent / stripped.
pub fn clean_key(raw: &str) -> Option<String> {
    let mut key = raw.trim();
    for quote in ['"', '\''] {
        key = key.strip_prefix(quote).unwrap_or(key);
        key = key.strip_suffix(quote).unwrap_or(key);
    }
    let key = key.trim();
    if key.is_empty() || key == "undefined" || key == "null" {
        None
    } else {
        Some(key.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_key_passes_through() {
        assert_eq!(clean_key("sk-test"), Some("sk-test".to_string()));
    }

    #[test]
    fn surrounding_quotes_and_whitespace_are_stripped() {
        assert_eq!(clean_key("  \"sk-test\"\n"), Some("sk-test".to_string()));
        assert_eq!(clean_key("'sk-test'"), Some("sk-test".to_string()));
        assert_eq!(clean_key("\" sk-test \""), Some("sk-test".to_string()));
    }

    #[test]
    fn shim_literals_are_absent() {
        assert_eq!(clean_key("undefined"), None);
        assert_eq!(clean_key("null"), None);
        assert_eq!(clean_key("\"undefined\""), None);
    }

    #[test]
    fn empty_values_are_absent() {
        assert_eq!(clean_key(""), None);
        assert_eq!(clean_key("   "), None);
        assert_eq!(clean_key("\"\""), None);
    }
}
