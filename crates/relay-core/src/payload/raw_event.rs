//! Raw gateway payloads
//!
//! A `RawEvent` is one deserialized gateway message: the event type name
//! plus an opaque JSON object. It is immutable once received and may be
//! re-presented to the handlers verbatim when a deferred event is replayed.
//!
//! Field access is typed and fallible. Snowflake fields arrive either as
//! decimal strings (64-bit safety for JavaScript consumers) or as numbers;
//! both forms are accepted everywhere an ID is read.

use serde_json::{Map, Value};

use crate::error::PayloadError;
use crate::value_objects::Snowflake;

/// One inbound gateway message, immutable once constructed
#[derive(Debug, Clone, PartialEq)]
pub struct RawEvent {
    event_type: String,
    data: Map<String, Value>,
}

impl RawEvent {
    /// Wrap a deserialized payload document
    ///
    /// # Errors
    /// Returns [`PayloadError::NotAnObject`] if `data` is not a JSON object.
    pub fn new(event_type: impl Into<String>, data: Value) -> Result<Self, PayloadError> {
        match data {
            Value::Object(map) => Ok(Self {
                event_type: event_type.into(),
                data: map,
            }),
            _ => Err(PayloadError::NotAnObject),
        }
    }

    /// The wire name of this event (e.g. `TYPING_START`)
    #[inline]
    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    /// Borrow the payload document for field access
    #[inline]
    pub fn data(&self) -> RawObject<'_> {
        RawObject { fields: &self.data }
    }

    /// Read a required snowflake field from the top-level document
    pub fn snowflake(&self, key: &'static str) -> Result<Snowflake, PayloadError> {
        self.data().snowflake(key)
    }

    /// Read an optional snowflake field from the top-level document
    pub fn optional_snowflake(&self, key: &'static str) -> Result<Option<Snowflake>, PayloadError> {
        self.data().optional_snowflake(key)
    }

    /// Read a required integer field from the top-level document
    pub fn int(&self, key: &'static str) -> Result<i64, PayloadError> {
        self.data().int(key)
    }

    /// Read a required nested document from the top-level document
    pub fn object(&self, key: &'static str) -> Result<RawObject<'_>, PayloadError> {
        self.data().object(key)
    }

    /// Read an optional nested document from the top-level document
    pub fn optional_object(&self, key: &'static str) -> Result<Option<RawObject<'_>>, PayloadError> {
        self.data().optional_object(key)
    }
}

/// Borrowed view over a JSON object with typed, fallible field access
#[derive(Debug, Clone, Copy)]
pub struct RawObject<'a> {
    fields: &'a Map<String, Value>,
}

impl<'a> RawObject<'a> {
    /// Raw field lookup; JSON `null` reads as absent
    fn get(&self, key: &str) -> Option<&'a Value> {
        match self.fields.get(key) {
            None | Some(Value::Null) => None,
            Some(value) => Some(value),
        }
    }

    /// Whether the field is present and non-null
    #[inline]
    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Read a required snowflake field (string or integer encoding)
    pub fn snowflake(&self, key: &'static str) -> Result<Snowflake, PayloadError> {
        self.optional_snowflake(key)?
            .ok_or(PayloadError::MissingField(key))
    }

    /// Read an optional snowflake field (absent or null yields `None`)
    pub fn optional_snowflake(&self, key: &'static str) -> Result<Option<Snowflake>, PayloadError> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => Snowflake::parse(s)
                .map(Some)
                .map_err(|_| PayloadError::invalid(key, "snowflake")),
            Some(Value::Number(n)) => n
                .as_u64()
                .map(Snowflake::new)
                .map(Some)
                .ok_or_else(|| PayloadError::invalid(key, "snowflake")),
            Some(_) => Err(PayloadError::invalid(key, "snowflake")),
        }
    }

    /// Read a required signed integer field
    pub fn int(&self, key: &'static str) -> Result<i64, PayloadError> {
        match self.get(key) {
            None => Err(PayloadError::MissingField(key)),
            Some(Value::Number(n)) => n
                .as_i64()
                .ok_or_else(|| PayloadError::invalid(key, "integer")),
            Some(_) => Err(PayloadError::invalid(key, "integer")),
        }
    }

    /// Read a required string field
    pub fn string(&self, key: &'static str) -> Result<&'a str, PayloadError> {
        self.optional_string(key)?
            .ok_or(PayloadError::MissingField(key))
    }

    /// Read an optional string field
    pub fn optional_string(&self, key: &'static str) -> Result<Option<&'a str>, PayloadError> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(_) => Err(PayloadError::invalid(key, "string")),
        }
    }

    /// Read a required boolean field, absent reads as `false`
    pub fn bool_or_false(&self, key: &'static str) -> Result<bool, PayloadError> {
        match self.get(key) {
            None => Ok(false),
            Some(Value::Bool(b)) => Ok(*b),
            Some(_) => Err(PayloadError::invalid(key, "boolean")),
        }
    }

    /// Read a required nested document
    pub fn object(&self, key: &'static str) -> Result<RawObject<'a>, PayloadError> {
        self.optional_object(key)?
            .ok_or(PayloadError::MissingField(key))
    }

    /// Read an optional nested document
    pub fn optional_object(&self, key: &'static str) -> Result<Option<RawObject<'a>>, PayloadError> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::Object(map)) => Ok(Some(RawObject { fields: map })),
            Some(_) => Err(PayloadError::invalid(key, "object")),
        }
    }

    /// Read a list of snowflakes, absent reads as empty
    pub fn snowflake_list(&self, key: &'static str) -> Result<Vec<Snowflake>, PayloadError> {
        match self.get(key) {
            None => Ok(Vec::new()),
            Some(Value::Array(items)) => {
                let mut ids = Vec::with_capacity(items.len());
                for item in items {
                    let id = match item {
                        Value::String(s) => Snowflake::parse(s)
                            .map_err(|_| PayloadError::invalid(key, "snowflake list"))?,
                        Value::Number(n) => n
                            .as_u64()
                            .map(Snowflake::new)
                            .ok_or_else(|| PayloadError::invalid(key, "snowflake list"))?,
                        _ => return Err(PayloadError::invalid(key, "snowflake list")),
                    };
                    ids.push(id);
                }
                Ok(ids)
            }
            Some(_) => Err(PayloadError::invalid(key, "snowflake list")),
        }
    }
}
