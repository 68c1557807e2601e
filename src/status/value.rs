//! Status variable values.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::scope::ScopeFlag;

/// Payload reported by a statistics provider.
///
/// Providers report heterogeneous statistics (counts, gauges, text, nested
/// summaries) through this single type.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VarValue {
    /// No payload. Used for reserved placeholders.
    #[default]
    Empty,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
    Structured(serde_json::Value),
}

impl VarValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, VarValue::Empty)
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            VarValue::Int(v) => Some(*v),
            VarValue::UInt(v) => i64::try_from(*v).ok(),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            VarValue::UInt(v) => Some(*v),
            VarValue::Int(v) => u64::try_from(*v).ok(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            VarValue::Float(v) => Some(*v),
            VarValue::Int(v) => Some(*v as f64),
            VarValue::UInt(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            VarValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for VarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VarValue::Empty => Ok(()),
            // SHOW STATUS renders booleans as ON/OFF
            VarValue::Bool(true) => f.write_str("ON"),
            VarValue::Bool(false) => f.write_str("OFF"),
            VarValue::Int(v) => write!(f, "{}", v),
            VarValue::UInt(v) => write!(f, "{}", v),
            VarValue::Float(v) => write!(f, "{}", v),
            VarValue::Text(s) => f.write_str(s),
            VarValue::Structured(v) => write!(f, "{}", v),
        }
    }
}

impl From<bool> for VarValue {
    fn from(v: bool) -> Self {
        VarValue::Bool(v)
    }
}

impl From<i32> for VarValue {
    fn from(v: i32) -> Self {
        VarValue::Int(i64::from(v))
    }
}

impl From<i64> for VarValue {
    fn from(v: i64) -> Self {
        VarValue::Int(v)
    }
}

impl From<u32> for VarValue {
    fn from(v: u32) -> Self {
        VarValue::UInt(u64::from(v))
    }
}

impl From<u64> for VarValue {
    fn from(v: u64) -> Self {
        VarValue::UInt(v)
    }
}

impl From<usize> for VarValue {
    fn from(v: usize) -> Self {
        VarValue::UInt(v as u64)
    }
}

impl From<f64> for VarValue {
    fn from(v: f64) -> Self {
        VarValue::Float(v)
    }
}

impl From<&str> for VarValue {
    fn from(v: &str) -> Self {
        VarValue::Text(v.to_string())
    }
}

impl From<String> for VarValue {
    fn from(v: String) -> Self {
        VarValue::Text(v)
    }
}

impl From<serde_json::Value> for VarValue {
    fn from(v: serde_json::Value) -> Self {
        VarValue::Structured(v)
    }
}

/// A status variable as seen after aggregation: its payload plus the scope
/// its provider assigned.
///
/// Values are never mutated after a collection pass; the next pass replaces
/// them wholesale.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StatusValue {
    pub scope: ScopeFlag,
    pub value: VarValue,
}

impl StatusValue {
    pub fn new(value: impl Into<VarValue>, scope: ScopeFlag) -> Self {
        Self {
            scope,
            value: value.into(),
        }
    }

    /// Empty value with no scope bits, reserved for default-sourced names.
    pub fn placeholder() -> Self {
        Self {
            scope: ScopeFlag::NONE,
            value: VarValue::Empty,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.scope.is_none() && self.value.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_is_empty_and_unscoped() {
        let p = StatusValue::placeholder();
        assert!(p.is_placeholder());
        assert_eq!(p.scope, ScopeFlag::NONE);
        assert_eq!(p.value, VarValue::Empty);
        assert!(!StatusValue::new(0u64, ScopeFlag::NONE).is_placeholder());
    }

    #[test]
    fn test_display_matches_show_status() {
        assert_eq!(VarValue::Empty.to_string(), "");
        assert_eq!(VarValue::from(true).to_string(), "ON");
        assert_eq!(VarValue::from(false).to_string(), "OFF");
        assert_eq!(VarValue::from(-3).to_string(), "-3");
        assert_eq!(VarValue::from(42u64).to_string(), "42");
        assert_eq!(VarValue::from(1.5).to_string(), "1.5");
        assert_eq!(VarValue::from("utf8mb4").to_string(), "utf8mb4");
    }

    #[test]
    fn test_numeric_accessors_convert_within_range() {
        assert_eq!(VarValue::Int(7).as_u64(), Some(7));
        assert_eq!(VarValue::Int(-7).as_u64(), None);
        assert_eq!(VarValue::UInt(u64::MAX).as_i64(), None);
        assert_eq!(VarValue::UInt(3).as_f64(), Some(3.0));
        assert_eq!(VarValue::Text("x".into()).as_f64(), None);
        assert_eq!(VarValue::Text("x".into()).as_str(), Some("x"));
    }

    #[test]
    fn test_untagged_json_shape() {
        let v = StatusValue::new(42u64, ScopeFlag::GLOBAL);
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json, serde_json::json!({ "scope": 1, "value": 42 }));

        let p = serde_json::to_value(StatusValue::placeholder()).unwrap();
        assert_eq!(p, serde_json::json!({ "scope": 0, "value": null }));
    }
}
