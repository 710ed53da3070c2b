/// Scheme prepended to addresses given without one.
pub const DEFAULT_SCHEME: &str = "http://";

const KNOWN_SCHEMES: [&str; 2] = ["http://", "https://"];

/// Whether `s` already starts with a scheme the prober understands.
#[inline]
fn has_known_scheme(s: &str) -> bool {
    KNOWN_SCHEMES.iter().any(|scheme| {
        s.len() >= scheme.len()
            && s.is_char_boundary(scheme.len())
            && s[..scheme.len()].eq_ignore_ascii_case(scheme)
    })
}

/// Canonicalize a user target string into a probeable URL.
///
/// Supported forms:
/// - "example.com"             -> "http://example.com"
/// - "localhost:9999"          -> "http://localhost:9999"
/// - "https://example.com/x"   -> unchanged
/// - "HTTP://example.com"      -> unchanged
///
/// Nothing is resolved or validated here: a malformed address is passed
/// through and reported as unreachable when probed.
pub fn normalize(input: &str) -> String {
    let s = input.trim();
    if has_known_scheme(s) {
        s.to_string()
    } else {
        format!("{DEFAULT_SCHEME}{s}")
    }
}
