//! JSON <-> Native Settings Conversions
//!
//! This module provides bidirectional conversion between the wire JSON value
//! model and the host's generic key/value settings representation. These
//! conversions sit between every settings-carrying request and the host:
//!
//! - Incoming `inputSettings` payloads become [`NativeSettings`]
//! - Host settings objects become JSON response payloads
//!
//! # Type Mapping
//!
//! | JSON | Native |
//! |------|--------|
//! | null | None |
//! | boolean | Bool |
//! | integer | Int (i64) |
//! | float | Double (f64) |
//! | string | String |
//! | array | Array |
//! | object | Object (ordered) |
//! | — | Binary (serializes to null) |
//!
//! Conversion is total in both directions: no JSON value shape fails at this
//! layer, and native variants with no JSON counterpart serialize to `null`.
//! The integer/float distinction is preserved, and booleans are never
//! conflated with 0/1.
//!
//! # Defaults
//!
//! Host settings objects carry per-key registered defaults alongside user
//! values. [`settings_to_json`] with `include_defaults = false` emits only
//! user-set values that differ from the registered default, mirroring the
//! `GetInputSettings` / `GetInputDefaultSettings` asymmetry: defaults must not
//! leak as if they were explicitly set.

use serde_json::{Number, Value};

use stagecast_protocol::RequestData;

/// One value in the host's settings representation.
#[derive(Debug, Clone, PartialEq)]
pub enum NativeValue {
    None,
    Bool(bool),
    Int(i64),
    Double(f64),
    String(String),
    Array(Vec<NativeValue>),
    Object(NativeSettings),
    /// Opaque host-side payload; has no JSON representation.
    Binary(Vec<u8>),
}

#[derive(Debug, Clone, PartialEq)]
struct Entry {
    name: String,
    /// Explicitly set value, if any.
    value: Option<NativeValue>,
    /// Registered default for this key, if any.
    default: Option<NativeValue>,
}

/// Ordered name/value settings object with per-key registered defaults.
///
/// Insertion order is preserved; entries are few, so lookups are linear.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NativeSettings {
    items: Vec<Entry>,
}

impl NativeSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the user value for `name`, creating the entry if needed.
    pub fn set(&mut self, name: impl Into<String>, value: NativeValue) {
        let name = name.into();
        match self.entry_mut(&name) {
            Some(entry) => entry.value = Some(value),
            None => self.items.push(Entry {
                name,
                value: Some(value),
                default: None,
            }),
        }
    }

    /// Registers the default value for `name`, creating the entry if needed.
    pub fn set_default(&mut self, name: impl Into<String>, value: NativeValue) {
        let name = name.into();
        match self.entry_mut(&name) {
            Some(entry) => entry.default = Some(value),
            None => self.items.push(Entry {
                name,
                value: None,
                default: Some(value),
            }),
        }
    }

    /// Effective value for `name`: the user value, falling back to the
    /// registered default.
    pub fn get(&self, name: &str) -> Option<&NativeValue> {
        self.entry(name)
            .and_then(|entry| entry.value.as_ref().or(entry.default.as_ref()))
    }

    /// The explicitly set user value for `name`, ignoring defaults.
    pub fn user_value(&self, name: &str) -> Option<&NativeValue> {
        self.entry(name).and_then(|entry| entry.value.as_ref())
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Entry names, in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|entry| entry.name.as_str())
    }

    /// Applies `other`'s user values on top of this object, leaving keys not
    /// present in `other` untouched.
    pub fn apply(&mut self, other: &NativeSettings) {
        for entry in &other.items {
            if let Some(value) = &entry.value {
                self.set(entry.name.clone(), value.clone());
            }
        }
    }

    /// Clears all user values, leaving registered defaults in place, then
    /// applies `other`. Used for non-overlay settings updates.
    pub fn reset_to(&mut self, other: &NativeSettings) {
        for entry in &mut self.items {
            entry.value = None;
        }
        self.items.retain(|entry| entry.default.is_some());
        self.apply(other);
    }

    fn entry(&self, name: &str) -> Option<&Entry> {
        self.items.iter().find(|entry| entry.name == name)
    }

    fn entry_mut(&mut self, name: &str) -> Option<&mut Entry> {
        self.items.iter_mut().find(|entry| entry.name == name)
    }
}

/// Converts a JSON value to a native value. Total; never fails.
pub fn json_to_native(value: &Value) -> NativeValue {
    match value {
        Value::Null => NativeValue::None,
        Value::Bool(b) => NativeValue::Bool(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => NativeValue::Int(i),
            // u64 beyond i64::MAX or a float
            None => NativeValue::Double(n.as_f64().unwrap_or(0.0)),
        },
        Value::String(s) => NativeValue::String(s.clone()),
        Value::Array(items) => NativeValue::Array(items.iter().map(json_to_native).collect()),
        Value::Object(map) => NativeValue::Object(json_object_to_settings(map)),
    }
}

/// Converts a JSON object to a settings object with user values only.
pub fn json_object_to_settings(map: &RequestData) -> NativeSettings {
    let mut settings = NativeSettings::new();
    for (name, value) in map {
        settings.set(name.clone(), json_to_native(value));
    }
    settings
}

/// Converts a native value to JSON. Total; variants with no JSON counterpart
/// (binary, none) become `null`, as does a non-finite double.
pub fn native_to_json(value: &NativeValue) -> Value {
    match value {
        NativeValue::None => Value::Null,
        NativeValue::Bool(b) => Value::Bool(*b),
        NativeValue::Int(i) => Value::Number((*i).into()),
        NativeValue::Double(d) => Number::from_f64(*d).map_or(Value::Null, Value::Number),
        NativeValue::String(s) => Value::String(s.clone()),
        NativeValue::Array(items) => Value::Array(items.iter().map(native_to_json).collect()),
        NativeValue::Object(settings) => settings_to_json(settings, true),
        NativeValue::Binary(_) => Value::Null,
    }
}

/// Serializes a settings object to a JSON object.
///
/// With `include_defaults`, every entry's effective value is emitted. Without
/// it, only user values that differ from the entry's registered default are
/// emitted, so untouched defaults never masquerade as explicit settings.
pub fn settings_to_json(settings: &NativeSettings, include_defaults: bool) -> Value {
    let mut map = RequestData::new();
    for entry in &settings.items {
        if include_defaults {
            if let Some(value) = entry.value.as_ref().or(entry.default.as_ref()) {
                map.insert(entry.name.clone(), native_to_json(value));
            }
        } else if let Some(value) = &entry.value {
            if entry.default.as_ref() != Some(value) {
                map.insert(entry.name.clone(), native_to_json(value));
            }
        }
    }
    Value::Object(map)
}
