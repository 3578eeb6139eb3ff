use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NON_ALNUM: Regex = Regex::new(r"[^a-z0-9\s]").expect("valid regex");
}

/// Clean a raw description: lowercase, drop everything outside `[a-z0-9]` and
/// whitespace, trim the ends. An empty result is valid (descriptionless item).
pub fn clean(text: &str) -> String {
    let lowered = text.to_lowercase();
    NON_ALNUM.replace_all(&lowered, "").trim().to_string()
}

/// Split a cleaned description into tokens, discarding empty ones.
pub fn tokenize(cleaned: &str) -> Vec<&str> {
    cleaned.split_whitespace().collect()
}
