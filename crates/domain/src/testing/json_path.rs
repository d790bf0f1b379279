//! A small JSONPath subset.
//!
//! Supports `$`, `$.field`, `$.field.nested`, `$.array[0]` and `$.array[*]`
//! (the latter yields the whole array).

use serde_json::Value;

/// Query a JSON value.
///
/// Returns `Ok(None)` when the path is well formed but does not resolve.
///
/// # Errors
///
/// Returns an error message when the path is malformed.
pub fn query<'a>(json: &'a Value, path: &str) -> Result<Option<&'a Value>, String> {
    let path = path.trim();
    let Some(path) = path.strip_prefix('$') else {
        return Err("JSON path must start with '$'".to_string());
    };
    if path.is_empty() {
        return Ok(Some(json));
    }

    let path = path.strip_prefix('.').unwrap_or(path);
    let mut current = json;

    for segment in split_segments(path) {
        if let Some((name, index)) = parse_array_access(segment) {
            if !name.is_empty() {
                match current.get(name) {
                    Some(v) => current = v,
                    None => return Ok(None),
                }
            }
            if index == "*" {
                return Ok(current.is_array().then_some(current));
            }
            let idx: usize = index
                .parse()
                .map_err(|_| format!("Invalid array index: {index}"))?;
            match current.get(idx) {
                Some(v) => current = v,
                None => return Ok(None),
            }
        } else {
            match current.get(segment) {
                Some(v) => current = v,
                None => return Ok(None),
            }
        }
    }

    Ok(Some(current))
}

/// Renders a resolved value for display: strings without quotes, everything
/// else as compact JSON.
#[must_use]
pub fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Split a path into segments, respecting array brackets.
fn split_segments(path: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut in_bracket = false;

    for (i, ch) in path.char_indices() {
        match ch {
            '.' if !in_bracket => {
                if i > start {
                    segments.push(&path[start..i]);
                }
                start = i + 1;
            }
            '[' => in_bracket = true,
            ']' => in_bracket = false,
            _ => {}
        }
    }

    if start < path.len() {
        segments.push(&path[start..]);
    }

    segments
}

/// Parse array access like "field[0]" into ("field", "0").
fn parse_array_access(segment: &str) -> Option<(&str, &str)> {
    let bracket_start = segment.find('[')?;
    if segment.ends_with(']') {
        Some((
            &segment[..bracket_start],
            &segment[bracket_start + 1..segment.len() - 1],
        ))
    } else {
        None
    }
}
