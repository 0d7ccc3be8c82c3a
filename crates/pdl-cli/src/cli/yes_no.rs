//! Strict yes/no parsing for boolean options.

/// Accepts `y`, `yes`, `n` and `no` in any letter case.
pub fn parse_yes_no(s: &str) -> Result<bool, String> {
    match s.to_ascii_lowercase().as_str() {
        "y" | "yes" => Ok(true),
        "n" | "no" => Ok(false),
        _ => Err(format!(
            "'{}' is invalid; only 'y', 'yes', 'n' or 'no' are accepted",
            s
        )),
    }
}
