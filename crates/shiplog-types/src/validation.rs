//! Configuration validation utilities.
//!
//! This module provides a small framework for validating the TOML tables
//! that configure storage backends. Each backend exposes a [`ConfigSchema`]
//! describing the fields it accepts, and the service validates the backend's
//! configuration against it before construction.

use thiserror::Error;

/// Errors that can occur during configuration validation.
#[derive(Debug, Error)]
pub enum ValidationError {
	/// Error that occurs when a required field is missing.
	#[error("Missing required field: {0}")]
	MissingField(String),
	/// Error that occurs when a field has an invalid value.
	#[error("Invalid value for field '{field}': {message}")]
	InvalidValue { field: String, message: String },
	/// Error that occurs when field type is incorrect.
	#[error("Type mismatch for field '{field}': expected {expected}, got {actual}")]
	TypeMismatch {
		field: String,
		expected: String,
		actual: String,
	},
}

/// Represents the type of a configuration field.
#[derive(Debug, Clone)]
pub enum FieldType {
	/// A string value.
	String,
	/// An integer value with optional minimum and maximum bounds.
	Integer {
		/// Minimum allowed value (inclusive).
		min: Option<i64>,
		/// Maximum allowed value (inclusive).
		max: Option<i64>,
	},
	/// A boolean value (true/false).
	Boolean,
}

impl FieldType {
	fn name(&self) -> &'static str {
		match self {
			FieldType::String => "string",
			FieldType::Integer { .. } => "integer",
			FieldType::Boolean => "boolean",
		}
	}
}

/// Represents a field in a configuration schema.
#[derive(Debug, Clone)]
pub struct Field {
	pub name: String,
	pub field_type: FieldType,
}

impl Field {
	/// Creates a new field with the given name and type.
	pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
		Self {
			name: name.into(),
			field_type,
		}
	}
}

/// Defines a validation schema for a TOML configuration table.
///
/// A schema consists of required fields that must be present and optional
/// fields that may be present. Fields not named by the schema are ignored.
#[derive(Debug, Clone, Default)]
pub struct Schema {
	required: Vec<Field>,
	optional: Vec<Field>,
}

impl Schema {
	/// Creates a new schema with the given required and optional fields.
	pub fn new(required: Vec<Field>, optional: Vec<Field>) -> Self {
		Self { required, optional }
	}

	/// Validates a TOML value against this schema.
	pub fn validate(&self, config: &toml::Value) -> Result<(), ValidationError> {
		for field in &self.required {
			let value = config
				.get(&field.name)
				.ok_or_else(|| ValidationError::MissingField(field.name.clone()))?;
			Self::validate_field(field, value)?;
		}

		for field in &self.optional {
			if let Some(value) = config.get(&field.name) {
				Self::validate_field(field, value)?;
			}
		}

		Ok(())
	}

	fn validate_field(field: &Field, value: &toml::Value) -> Result<(), ValidationError> {
		let mismatch = || ValidationError::TypeMismatch {
			field: field.name.clone(),
			expected: field.field_type.name().to_string(),
			actual: value_type(value).to_string(),
		};

		match &field.field_type {
			FieldType::String => {
				value.as_str().ok_or_else(mismatch)?;
			}
			FieldType::Integer { min, max } => {
				let n = value.as_integer().ok_or_else(mismatch)?;
				if min.is_some_and(|min| n < min) || max.is_some_and(|max| n > max) {
					return Err(ValidationError::InvalidValue {
						field: field.name.clone(),
						message: format!("{} is out of range", n),
					});
				}
			}
			FieldType::Boolean => {
				value.as_bool().ok_or_else(mismatch)?;
			}
		}

		Ok(())
	}
}

fn value_type(value: &toml::Value) -> &'static str {
	match value {
		toml::Value::String(_) => "string",
		toml::Value::Integer(_) => "integer",
		toml::Value::Float(_) => "float",
		toml::Value::Boolean(_) => "boolean",
		toml::Value::Datetime(_) => "datetime",
		toml::Value::Array(_) => "array",
		toml::Value::Table(_) => "table",
	}
}

/// Trait implemented by storage backends to expose their config schema.
pub trait ConfigSchema: Send + Sync {
	/// Validates the given configuration against this schema.
	fn validate(&self, config: &toml::Value) -> Result<(), ValidationError>;
}

#[cfg(test)]
mod tests {
	use super::*;

	fn schema() -> Schema {
		Schema::new(
			vec![Field::new("path", FieldType::String)],
			vec![Field::new(
				"busy_timeout_ms",
				FieldType::Integer {
					min: Some(0),
					max: None,
				},
			)],
		)
	}

	#[test]
	fn accepts_valid_config() {
		let config: toml::Value = toml::from_str("path = \"orders.db\"").unwrap();
		assert!(schema().validate(&config).is_ok());
	}

	#[test]
	fn rejects_missing_required_field() {
		let config: toml::Value = toml::from_str("busy_timeout_ms = 100").unwrap();
		let err = schema().validate(&config).unwrap_err();
		assert!(matches!(err, ValidationError::MissingField(field) if field == "path"));
	}

	#[test]
	fn rejects_wrong_type() {
		let config: toml::Value = toml::from_str("path = 42").unwrap();
		assert!(matches!(
			schema().validate(&config),
			Err(ValidationError::TypeMismatch { .. })
		));
	}

	#[test]
	fn rejects_out_of_range_integer() {
		let config: toml::Value =
			toml::from_str("path = \"orders.db\"\nbusy_timeout_ms = -5").unwrap();
		assert!(matches!(
			schema().validate(&config),
			Err(ValidationError::InvalidValue { .. })
		));
	}
}
