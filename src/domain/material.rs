//! Material Requirement
//!
//! One row of an item's upgrade checklist.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::entity::{DomainError, DomainResult};

/// A required material with target and current counts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialRequirement {
    pub name: String,
    /// Target count
    #[serde(default, deserialize_with = "lenient_count")]
    pub required: u32,
    /// Current count, may exceed `required`
    #[serde(default, deserialize_with = "lenient_count")]
    pub obtained: u32,
    /// Icon reference (data URI or URL)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl MaterialRequirement {
    /// Fresh requirement with nothing obtained yet
    pub fn new(name: impl Into<String>, required: u32) -> Self {
        Self {
            name: name.into(),
            required,
            obtained: 0,
            image: None,
        }
    }

    pub fn with_image(mut self, image: Option<String>) -> Self {
        self.image = image.filter(|image| !image.is_empty());
        self
    }

    /// Blank row added from the checklist editor
    pub fn blank() -> Self {
        Self::new(String::new(), 0)
    }

    pub fn is_satisfied(&self) -> bool {
        self.obtained >= self.required
    }

    pub fn set_count(&mut self, field: CountField, value: u32) {
        match field {
            CountField::Required => self.required = value,
            CountField::Obtained => self.obtained = value,
        }
    }
}

/// Which counter of a requirement is being edited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountField {
    Required,
    Obtained,
}

impl std::str::FromStr for CountField {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s {
            "required" => Ok(CountField::Required),
            "obtained" => Ok(CountField::Obtained),
            other => Err(DomainError::validation(format!("unknown count field '{}'", other))),
        }
    }
}

/// One edited row from the checklist editor, counts already coerced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterialEdit {
    pub name: String,
    pub required: u32,
    pub obtained: u32,
}

impl MaterialEdit {
    /// Build from raw text inputs
    pub fn from_raw(name: &str, required: &str, obtained: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            required: coerce_count(required),
            obtained: coerce_count(obtained),
        }
    }
}

/// Coerce user text to a non-negative count.
///
/// Reads the leading integer (`"12 pcs"` is 12); anything without one,
/// or a negative number, becomes 0. Values past `u32::MAX` saturate.
pub fn coerce_count(raw: &str) -> u32 {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits: &str = {
        let end = digits
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(digits.len());
        &digits[..end]
    };

    if digits.is_empty() || negative {
        return 0;
    }
    digits.parse::<u32>().unwrap_or(u32::MAX)
}

fn coerce_json_count(value: &Value) -> u32 {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.clamp(0, u32::MAX as i64) as u32
            } else if let Some(u) = n.as_u64() {
                u.min(u32::MAX as u64) as u32
            } else {
                n.as_f64()
                    .filter(|f| f.is_finite() && *f > 0.0)
                    .map(|f| f.trunc().min(u32::MAX as f64) as u32)
                    .unwrap_or(0)
            }
        }
        Value::String(s) => coerce_count(s),
        _ => 0,
    }
}

/// Stored counts may come from older saves as strings, negatives or null
fn lenient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_json_count(&value))
}
