//! `${name}` placeholder substitution for migration scripts.

use crate::env::Environment;
use regex::{Captures, Regex};
use std::sync::OnceLock;

static PLACEHOLDER_RE: OnceLock<Regex> = OnceLock::new();

fn placeholder_re() -> &'static Regex {
    PLACEHOLDER_RE.get_or_init(|| Regex::new(r"\$\{([A-Za-z0-9_]+)\}").expect("valid regex"))
}

/// Replace every `${name}` in `template` with its value from `env`.
///
/// Returns the sorted, de-duplicated list of names that had no value when
/// any placeholder is unresolved.
pub fn substitute(template: &str, env: &Environment) -> Result<String, Vec<String>> {
    let mut missing: Vec<String> = Vec::new();

    let rendered = placeholder_re().replace_all(template, |caps: &Captures<'_>| {
        let name = &caps[1];
        match env.get(name) {
            Some(value) => value.to_string(),
            None => {
                missing.push(name.to_string());
                String::new()
            }
        }
    });

    if missing.is_empty() {
        Ok(rendered.into_owned())
    } else {
        missing.sort();
        missing.dedup();
        Err(missing)
    }
}
