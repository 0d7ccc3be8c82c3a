//! Strip characters that are illegal in file names on common file systems.

/// Characters removed (or replaced) by [`sanitize`].
pub const ILLEGAL_CHARS: [char; 9] = ['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Replaces every occurrence of `\ / : * ? " < > |` in `name` with `placeholder`.
///
/// This is deliberately rudimentary: leading/trailing spaces, reserved device
/// names (e.g. `CON`) and length limits are left alone, so the result is not
/// guaranteed to be a valid name everywhere.
pub fn sanitize(name: &str, placeholder: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if ILLEGAL_CHARS.contains(&c) {
            out.push_str(placeholder);
        } else {
            out.push(c);
        }
    }
    out
}
