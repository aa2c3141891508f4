//! Field validation
//!
//! Pure, stateless checks over a request's parameter bag. Every handler funnels
//! its input through these accessors so that all requests share one error
//! vocabulary:
//!
//! | Condition | Status |
//! |---|---|
//! | required field absent | `MissingRequestField` |
//! | wrong JSON type | `InvalidRequestFieldType` |
//! | number outside `[min, max]` (inclusive) | `RequestFieldOutOfRange` |
//! | empty string/object where a value is required | `RequestFieldEmpty` |
//!
//! Optional-field variants run the same checks only when the field is present
//! and return `Ok(None)` when it is not. Validation never consults domain
//! state; the same bag and contract always produce the same outcome.

use serde_json::Value;

use stagecast_protocol::{RequestData, RequestStatus};

use crate::error::RequestError;

/// Expected JSON type of a request field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Number,
    Boolean,
    Object,
    Array,
}

impl FieldType {
    fn matches(self, value: &Value) -> bool {
        match self {
            FieldType::String => value.is_string(),
            FieldType::Number => value.is_number(),
            FieldType::Boolean => value.is_boolean(),
            FieldType::Object => value.is_object(),
            FieldType::Array => value.is_array(),
        }
    }

    fn name(self) -> &'static str {
        match self {
            FieldType::String => "a string",
            FieldType::Number => "a number",
            FieldType::Boolean => "a boolean",
            FieldType::Object => "an object",
            FieldType::Array => "an array",
        }
    }
}

/// Per-field validation descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldContract {
    pub name: String,
    pub required: bool,
    pub expected: FieldType,
    /// Inclusive numeric bounds, checked only for `FieldType::Number`.
    pub min: Option<f64>,
    pub max: Option<f64>,
    /// Reject empty strings and empty objects.
    pub non_empty: bool,
}

impl FieldContract {
    pub fn required(name: impl Into<String>, expected: FieldType) -> Self {
        FieldContract {
            name: name.into(),
            required: true,
            expected,
            min: None,
            max: None,
            non_empty: false,
        }
    }

    pub fn optional(name: impl Into<String>, expected: FieldType) -> Self {
        FieldContract {
            required: false,
            ..FieldContract::required(name, expected)
        }
    }

    pub fn bounds(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    pub fn non_empty(mut self) -> Self {
        self.non_empty = true;
        self
    }
}

/// Checks one field of `data` against `contract`.
///
/// Returns the field's value when present and valid, `Ok(None)` when an
/// optional field is absent, and a classified [`RequestError`] otherwise.
pub fn validate<'a>(
    data: &'a RequestData,
    contract: &FieldContract,
) -> Result<Option<&'a Value>, RequestError> {
    let value = match data.get(&contract.name) {
        Some(value) => value,
        None if contract.required => {
            return Err(RequestError::with_comment(
                RequestStatus::MissingRequestField,
                format!("Your request is missing the `{}` field.", contract.name),
            ));
        }
        None => return Ok(None),
    };

    if !contract.expected.matches(value) {
        return Err(RequestError::with_comment(
            RequestStatus::InvalidRequestFieldType,
            format!(
                "The field `{}` must be {}.",
                contract.name,
                contract.expected.name()
            ),
        ));
    }

    if contract.expected == FieldType::Number {
        // serde_json numbers are always f64-representable
        let number = value.as_f64().unwrap_or_default();
        if let Some(min) = contract.min {
            if number < min {
                return Err(out_of_range(contract, number));
            }
        }
        if let Some(max) = contract.max {
            if number > max {
                return Err(out_of_range(contract, number));
            }
        }
    }

    if contract.non_empty {
        let empty = match value {
            Value::String(s) => s.is_empty(),
            Value::Object(o) => o.is_empty(),
            _ => false,
        };
        if empty {
            return Err(RequestError::with_comment(
                RequestStatus::RequestFieldEmpty,
                format!("The field `{}` must not be empty.", contract.name),
            ));
        }
    }

    Ok(Some(value))
}

fn out_of_range(contract: &FieldContract, number: f64) -> RequestError {
    RequestError::with_comment(
        RequestStatus::RequestFieldOutOfRange,
        format!(
            "The field `{}` is out of range: {} is not within [{}, {}].",
            contract.name,
            number,
            contract.min.unwrap_or(f64::NEG_INFINITY),
            contract.max.unwrap_or(f64::INFINITY),
        ),
    )
}

/// Typed accessors over one request's parameter bag.
///
/// Borrowed views only; `Params` holds no state beyond the reference and is
/// safe to use concurrently from any number of dispatches.
#[derive(Debug, Clone, Copy)]
pub struct Params<'a> {
    data: &'a RequestData,
}

impl<'a> Params<'a> {
    pub fn new(data: &'a RequestData) -> Self {
        Params { data }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.data.contains_key(name)
    }

    /// Required non-empty string.
    pub fn string(&self, name: &str) -> Result<&'a str, RequestError> {
        let contract = FieldContract::required(name, FieldType::String).non_empty();
        let value = validate(self.data, &contract)?;
        Ok(expect_str(value))
    }

    /// Optional string; empty is rejected when present.
    pub fn optional_string(&self, name: &str) -> Result<Option<&'a str>, RequestError> {
        let contract = FieldContract::optional(name, FieldType::String).non_empty();
        Ok(validate(self.data, &contract)?.map(|v| expect_str(Some(v))))
    }

    /// Required boolean.
    pub fn boolean(&self, name: &str) -> Result<bool, RequestError> {
        let contract = FieldContract::required(name, FieldType::Boolean);
        let value = validate(self.data, &contract)?;
        Ok(value.and_then(Value::as_bool).unwrap_or_default())
    }

    /// Optional boolean.
    pub fn optional_boolean(&self, name: &str) -> Result<Option<bool>, RequestError> {
        let contract = FieldContract::optional(name, FieldType::Boolean);
        Ok(validate(self.data, &contract)?.and_then(Value::as_bool))
    }

    /// Required number within inclusive bounds.
    pub fn number(&self, name: &str, min: f64, max: f64) -> Result<f64, RequestError> {
        let contract = FieldContract::required(name, FieldType::Number).bounds(min, max);
        let value = validate(self.data, &contract)?;
        Ok(value.and_then(Value::as_f64).unwrap_or_default())
    }

    /// Optional number within inclusive bounds.
    pub fn optional_number(
        &self,
        name: &str,
        min: f64,
        max: f64,
    ) -> Result<Option<f64>, RequestError> {
        let contract = FieldContract::optional(name, FieldType::Number).bounds(min, max);
        Ok(validate(self.data, &contract)?.and_then(Value::as_f64))
    }

    /// Required integer within inclusive bounds.
    ///
    /// A numeric field carrying a fractional value is a type error, not a
    /// range error.
    pub fn integer(&self, name: &str, min: i64, max: i64) -> Result<i64, RequestError> {
        let contract = FieldContract::required(name, FieldType::Number);
        let value = validate(self.data, &contract)?;
        let number = value.and_then(Value::as_i64).ok_or_else(|| {
            RequestError::with_comment(
                RequestStatus::InvalidRequestFieldType,
                format!("The field `{name}` must be an integer."),
            )
        })?;
        if number < min || number > max {
            return Err(RequestError::with_comment(
                RequestStatus::RequestFieldOutOfRange,
                format!("The field `{name}` is out of range: {number} is not within [{min}, {max}]."),
            ));
        }
        Ok(number)
    }

    /// Required object; `allow_empty` controls the non-empty constraint.
    pub fn object(&self, name: &str, allow_empty: bool) -> Result<&'a RequestData, RequestError> {
        let mut contract = FieldContract::required(name, FieldType::Object);
        if !allow_empty {
            contract = contract.non_empty();
        }
        let value = validate(self.data, &contract)?;
        Ok(expect_object(value))
    }

    /// Optional object; `allow_empty` controls the non-empty constraint.
    pub fn optional_object(
        &self,
        name: &str,
        allow_empty: bool,
    ) -> Result<Option<&'a RequestData>, RequestError> {
        let mut contract = FieldContract::optional(name, FieldType::Object);
        if !allow_empty {
            contract = contract.non_empty();
        }
        Ok(validate(self.data, &contract)?.map(|v| expect_object(Some(v))))
    }

    /// Optional array.
    pub fn optional_array(&self, name: &str) -> Result<Option<&'a Vec<Value>>, RequestError> {
        let contract = FieldContract::optional(name, FieldType::Array);
        Ok(validate(self.data, &contract)?.and_then(Value::as_array))
    }
}

// The contract guarantees the JSON type before these run.
fn expect_str<'a>(value: Option<&'a Value>) -> &'a str {
    value.and_then(Value::as_str).unwrap_or_default()
}

fn expect_object<'a>(value: Option<&'a Value>) -> &'a RequestData {
    static EMPTY: std::sync::OnceLock<RequestData> = std::sync::OnceLock::new();
    value
        .and_then(Value::as_object)
        .unwrap_or_else(|| EMPTY.get_or_init(RequestData::new))
}
