use std::sync::OnceLock;

use regex::{Captures, Regex};

/// Expand `{{ env.VAR }}` placeholders in a raw TOML string
///
/// An optional fallback can be given as `{{ env.VAR | default("value") }}`;
/// it is used when the variable is unset. A placeholder without a fallback
/// whose variable is unset is an error. TOML comment lines are passed
/// through unchanged.
pub fn expand_env(raw: &str) -> Result<String, String> {
    fn placeholder() -> &'static Regex {
        static RE: OnceLock<Regex> = OnceLock::new();
        RE.get_or_init(|| {
            Regex::new(r#"\{\{\s*env\.([A-Za-z_][A-Za-z0-9_]*)\s*(?:\|\s*default\("([^"]*)"\)\s*)?\}\}"#)
                .expect("placeholder pattern is valid")
        })
    }

    let mut unresolved: Option<String> = None;

    let expanded = raw
        .lines()
        .map(|line| {
            if line.trim_start().starts_with('#') {
                return line.to_owned();
            }

            placeholder()
                .replace_all(line, |captures: &Captures<'_>| {
                    let name = &captures[1];
                    std::env::var(name).unwrap_or_else(|_| match captures.get(2) {
                        Some(fallback) => fallback.as_str().to_owned(),
                        None => {
                            if unresolved.is_none() {
                                unresolved = Some(name.to_owned());
                            }
                            String::new()
                        }
                    })
                })
                .into_owned()
        })
        .collect::<Vec<_>>()
        .join("\n");

    if let Some(name) = unresolved {
        return Err(format!("environment variable not found: `{name}`"));
    }

    // `lines()` drops a trailing newline
    if raw.ends_with('\n') {
        return Ok(expanded + "\n");
    }

    Ok(expanded)
}
