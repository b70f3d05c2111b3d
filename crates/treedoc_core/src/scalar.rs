use std::fmt::{self, Display, Formatter};

/// A typed scalar value held by a SIMPLE node.
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl Scalar {
    /// Infer a scalar from trimmed raw text. The precedence is fixed and
    /// total:
    ///
    /// 1. Exact, case-sensitive `true` / `false` / `null` keywords.
    /// 2. Anything accepted by `i64` parsing: decimal digits with an optional
    ///    leading sign; leading zeros are accepted; no hex, octal, or digit
    ///    separators.
    /// 3. Anything accepted by `f64` parsing whose bytes all come from
    ///    `[0-9 + - . e E]`. The byte filter keeps `inf`/`NaN` spellings and
    ///    locale decimal separators out; exponents and a leading `+`, `-`, or
    ///    `.` are admitted.
    /// 4. Everything else, including empty text, is a string, verbatim.
    pub fn infer(text: &str) -> Scalar {
        match text {
            "true" => return Scalar::Bool(true),
            "false" => return Scalar::Bool(false),
            "null" => return Scalar::Null,
            _ => {}
        }
        if let Ok(int) = text.parse::<i64>() {
            return Scalar::Int(int);
        }
        let numeric_bytes = !text.is_empty()
            && text
                .bytes()
                .all(|b| matches!(b, b'0'..=b'9' | b'+' | b'-' | b'.' | b'e' | b'E'));
        if numeric_bytes {
            if let Ok(float) = text.parse::<f64>() {
                return Scalar::Float(float);
            }
        }
        Scalar::String(text.to_string())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Scalar::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Scalar::Float(value) => Some(*value),
            Scalar::Int(value) => Some(*value as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Scalar::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }
}

/// The canonical text rendering, used when a scalar becomes a cross-reference
/// id. Strings render verbatim, without quoting.
impl Display for Scalar {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => f.write_str("null"),
            Scalar::Bool(value) => write!(f, "{value}"),
            Scalar::Int(value) => write!(f, "{value}"),
            Scalar::Float(value) => write!(f, "{value}"),
            Scalar::String(value) => f.write_str(value),
        }
    }
}
