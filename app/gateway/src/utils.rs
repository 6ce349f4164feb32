//! Gateway utility functions.

/// Expand `${VAR}` patterns in a string with environment variable values.
///
/// Unknown variables expand to the empty string; an unclosed pattern is
/// left as-is.
pub fn expand_env_vars(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) => {
                if let Ok(val) = std::env::var(&after[..end]) {
                    out.push_str(&val);
                }
                rest = &after[end + 1..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}
