use crate::source::Scalar;

/// Parses a string as a float, returning `default` for blank or unparseable text.
pub fn parse_float(text: &str, default: f64) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return default;
    }
    trimmed.parse::<f64>().unwrap_or(default)
}

/// Coerces a source cell to a float, returning `default` for anything that
/// cannot be read as a number. Never fails.
pub fn to_float(value: &Scalar, default: f64) -> f64 {
    match value {
        Scalar::Empty => default,
        Scalar::Number(n) => {
            if n.is_nan() {
                default
            } else {
                *n
            }
        }
        Scalar::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Scalar::Text(s) => parse_float(s, default),
    }
}

/// Canonicalizes a tract identifier to a stable string key.
///
/// Missing values become `""`. Values parseable as a float with no fractional
/// part render as the integer ("1.0" becomes "1"), so the same tract keys
/// match between the ownership data and the allocation table. Everything else
/// is the trimmed text unchanged.
pub fn normalize_tract(value: &Scalar) -> String {
    let text = match value {
        Scalar::Empty => return String::new(),
        Scalar::Number(n) => {
            if n.is_nan() {
                return String::new();
            }
            format_number(*n)
        }
        Scalar::Bool(b) => b.to_string(),
        Scalar::Text(s) => s.trim().to_string(),
    };
    match text.parse::<f64>() {
        Ok(n) => format_number(n),
        Err(_) => text,
    }
}

/// Renders a cell as a display label. Integral numerics lose their trailing
/// ".0" and the literal text "nan" becomes empty, matching how lease and
/// requirement columns arrive from spreadsheet exports.
pub fn clean_label(value: &Scalar) -> String {
    match value {
        Scalar::Empty => String::new(),
        Scalar::Number(n) => {
            if n.is_nan() {
                String::new()
            } else {
                format_number(*n)
            }
        }
        Scalar::Bool(b) => b.to_string(),
        Scalar::Text(s) => {
            let trimmed = s.trim();
            if trimmed.eq_ignore_ascii_case("nan") {
                String::new()
            } else {
                trimmed.to_string()
            }
        }
    }
}

/// True for the "no owner" placeholder markers that appear in source data.
pub fn is_placeholder_owner(owner: &str) -> bool {
    matches!(
        owner.trim().to_lowercase().as_str(),
        "none." | "none" | "nan" | ""
    )
}

fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() <= i64::MAX as f64 {
        (n as i64).to_string()
    } else {
        n.to_string()
    }
}
