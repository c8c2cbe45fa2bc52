//! Reading decode and validation from raw JSON records
//!
//! Feeds carry domain-specific field names (`temperature`/`continent` for
//! sensor feeds, `ppg`/`team` for stats feeds). A `RecordSchema` maps those
//! names onto the shape-agnostic `Reading` the dispatcher consumes.

use serde::Serialize;
use serde_json::Value;

/// Field names to pull out of each raw record.
#[derive(Debug, Clone)]
pub struct RecordSchema {
    pub timestamp_field: String,
    pub value_field: String,
    pub group_field: String,
}

impl RecordSchema {
    pub fn new(timestamp_field: &str, value_field: &str, group_field: &str) -> Self {
        Self {
            timestamp_field: timestamp_field.to_string(),
            value_field: value_field.to_string(),
            group_field: group_field.to_string(),
        }
    }
}

impl Default for RecordSchema {
    fn default() -> Self {
        Self::new("timestamp", "value", "group_key")
    }
}

/// One validated reading, immutable once decoded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reading {
    /// ISO-8601 timestamp as carried by the record.
    pub timestamp: String,
    pub value: f64,
    pub group_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required field absent or JSON null.
    MissingField(String),
    /// Field present but not the expected JSON type.
    WrongType(String),
    /// The record is not a JSON object at all.
    NotAnObject,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::MissingField(field) => {
                write!(f, "missing required field '{}'", field)
            }
            ValidationError::WrongType(field) => {
                write!(f, "field '{}' has the wrong type", field)
            }
            ValidationError::NotAnObject => write!(f, "record is not a JSON object"),
        }
    }
}

impl std::error::Error for ValidationError {}

impl Reading {
    /// Validate a raw record into a `Reading` or a specific rejection reason.
    ///
    /// Never returns a partially populated reading: either every required
    /// field checks out or the record is rejected whole.
    pub fn from_json(raw: &Value, schema: &RecordSchema) -> Result<Self, ValidationError> {
        let obj = raw.as_object().ok_or(ValidationError::NotAnObject)?;

        let timestamp = match obj.get(&schema.timestamp_field) {
            None | Some(Value::Null) => {
                return Err(ValidationError::MissingField(schema.timestamp_field.clone()))
            }
            Some(Value::String(s)) => s.clone(),
            Some(_) => return Err(ValidationError::WrongType(schema.timestamp_field.clone())),
        };

        let value = match obj.get(&schema.value_field) {
            None | Some(Value::Null) => {
                return Err(ValidationError::MissingField(schema.value_field.clone()))
            }
            Some(v) => v
                .as_f64()
                .ok_or_else(|| ValidationError::WrongType(schema.value_field.clone()))?,
        };

        // Grouping key is optional; a non-string value is treated as absent
        let group_key = obj
            .get(&schema.group_field)
            .and_then(|v| v.as_str())
            .map(str::to_string);

        Ok(Self {
            timestamp,
            value,
            group_key,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_sensor_record() {
        let raw = json!({
            "timestamp": "2025-01-11T18:15:00Z",
            "temperature": 225.0,
            "city": "Tokyo",
            "continent": "Asia"
        });
        let schema = RecordSchema::new("timestamp", "temperature", "continent");

        let reading = Reading::from_json(&raw, &schema).unwrap();
        assert_eq!(reading.timestamp, "2025-01-11T18:15:00Z");
        assert_eq!(reading.value, 225.0);
        assert_eq!(reading.group_key.as_deref(), Some("Asia"));
    }

    #[test]
    fn test_parse_stats_record_without_group() {
        let raw = json!({
            "timestamp": "2025-09-14T23:30:00Z",
            "ppg": 22.8
        });
        let schema = RecordSchema::new("timestamp", "ppg", "team");

        let reading = Reading::from_json(&raw, &schema).unwrap();
        assert_eq!(reading.value, 22.8);
        assert_eq!(reading.group_key, None);
    }

    #[test]
    fn test_missing_value_rejected() {
        let raw = json!({ "timestamp": "2025-01-11T18:15:00Z" });

        let err = Reading::from_json(&raw, &RecordSchema::default()).unwrap_err();
        assert_eq!(err, ValidationError::MissingField("value".to_string()));
    }

    #[test]
    fn test_null_timestamp_rejected() {
        let raw = json!({ "timestamp": null, "value": 1.0 });

        let err = Reading::from_json(&raw, &RecordSchema::default()).unwrap_err();
        assert_eq!(err, ValidationError::MissingField("timestamp".to_string()));
    }

    #[test]
    fn test_non_numeric_value_rejected() {
        let raw = json!({ "timestamp": "2025-01-11T18:15:00Z", "value": "hot" });

        let err = Reading::from_json(&raw, &RecordSchema::default()).unwrap_err();
        assert_eq!(err, ValidationError::WrongType("value".to_string()));
    }

    #[test]
    fn test_non_object_rejected() {
        let raw = json!([1, 2, 3]);

        let err = Reading::from_json(&raw, &RecordSchema::default()).unwrap_err();
        assert_eq!(err, ValidationError::NotAnObject);
    }

    #[test]
    fn test_integer_value_accepted() {
        let raw = json!({ "timestamp": "2025-01-11T18:15:00Z", "value": 225 });

        let reading = Reading::from_json(&raw, &RecordSchema::default()).unwrap();
        assert_eq!(reading.value, 225.0);
    }
}
