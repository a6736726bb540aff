//! Filesystem-safe file stems for domain names.

/// Longest stem we produce; leaves room for the `.txt` suffix under NAME_MAX.
const MAX_STEM: usize = 250;

/// Turns a domain (possibly with a port or path) into a safe Linux file stem.
///
/// - Keeps ASCII letters, digits, `.`, `-` and `_`; anything else becomes `_`
/// - Collapses runs of `_`
/// - Trims leading/trailing dots and underscores
/// - Caps the length at 250 bytes
pub fn sanitize_filename_for_linux(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        let keep = c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_');
        let c = if keep { c } else { '_' };
        if c == '_' && out.ends_with('_') {
            continue;
        }
        out.push(c);
    }

    let trimmed = out.trim_matches(|c| c == '.' || c == '_');
    // Only ASCII remains, so any byte index is a char boundary.
    trimmed[..trimmed.len().min(MAX_STEM)].to_string()
}
