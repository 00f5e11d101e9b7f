use std::sync::OnceLock;

use regex::{Captures, Regex};

/// Expand `${VAR}` and `${VAR:-fallback}` placeholders in raw config text
///
/// Runs before TOML parsing so secrets can live in the environment while the
/// config structs hold plain values. Comment lines are copied verbatim.
pub fn expand_env(input: &str) -> Result<String, String> {
    fn placeholder() -> &'static Regex {
        static RE: OnceLock<Regex> = OnceLock::new();
        RE.get_or_init(|| Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}").expect("must be valid regex"))
    }

    let mut output = String::with_capacity(input.len());

    for (i, line) in input.lines().enumerate() {
        if i > 0 {
            output.push('\n');
        }

        if line.trim_start().starts_with('#') {
            output.push_str(line);
            continue;
        }

        let mut last_end = 0;
        for captures in placeholder().captures_iter(line) {
            let whole = captures.get(0).expect("group 0 always matches");
            output.push_str(&line[last_end..whole.start()]);
            output.push_str(&resolve(&captures)?);
            last_end = whole.end();
        }
        output.push_str(&line[last_end..]);
    }

    if input.ends_with('\n') {
        output.push('\n');
    }

    Ok(output)
}

fn resolve(captures: &Captures<'_>) -> Result<String, String> {
    let name = &captures[1];

    match (std::env::var(name), captures.get(2)) {
        (Ok(value), _) => Ok(value),
        (Err(_), Some(fallback)) => Ok(fallback.as_str().to_owned()),
        (Err(_), None) => Err(format!("environment variable not found: `{name}`")),
    }
}
