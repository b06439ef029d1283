use tfe_defs::VariableValue;

const STRUCTURED_MARKERS: [char; 6] = ['[', ']', '{', '}', '=', ','];

/// Renders a variable value as the string the remote service stores.
pub fn normalize(value: &VariableValue) -> String {
    match value {
        VariableValue::String(s) => s.clone(),
        VariableValue::Bool(b) => b.to_string(),
        VariableValue::Integer(i) => i.to_string(),
        VariableValue::Float(f) => format!("{:.6}", f),
        VariableValue::Other(v) => v.to_string(),
    }
}

/// Guesses whether a value is an HCL expression rather than a plain string.
///
/// Any of `[ ] { } = ,` counts, so a plain sentence with a comma is reported
/// as structured. Callers that care set the `hcl` flag explicitly.
pub fn looks_structured(value: &str) -> bool {
    value.contains(&STRUCTURED_MARKERS[..])
}

/// Explicit flag wins, otherwise fall back to the heuristic.
pub fn resolve_hcl(explicit: Option<bool>, normalized_value: &str) -> bool {
    explicit.unwrap_or_else(|| looks_structured(normalized_value))
}
