//! Amount normalisation for relation comparability.
//!
//! The labeled and parsed tables come from different producers, so the same
//! quantity can arrive as `100`, `100.0`, or `100.00`. Values that parse as
//! numbers are canonicalised once at the read boundary so set comparison
//! sees one spelling per quantity; anything non-numeric passes through
//! unchanged.

/// Normalise an amount cell into a canonical numeric spelling.
///
/// Input: raw cell text like "100", "100.0", "0.50", "1/2", ""
/// Output: "100", "100", "0.5", "1/2", ""
///
/// Integers are tried first so large values keep exact precision; other
/// numerics fall back to the `f64` display form (`100.0` → `100`,
/// `1e3` → `1000`). Whitespace around a number is dropped; non-numeric
/// text keeps its original spelling, whitespace included.
pub fn normalize_amount(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    if let Ok(n) = trimmed.parse::<i64>() {
        return n.to_string();
    }
    match trimmed.parse::<f64>() {
        Ok(f) if f.is_finite() => format!("{f}"),
        _ => raw.to_string(),
    }
}
