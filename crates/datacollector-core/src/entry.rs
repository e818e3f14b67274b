//! Log entries and their attributes

use std::fmt;

use chrono::{DateTime, Utc};
use datacollector_core_types::TransactionId;
use serde::Serialize;

use crate::level::Level;

/// Value carried by an attribute
///
/// Serializes untagged, so JSON output shows the plain value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttrValue {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    TextList(Vec<String>),
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Text(s) => f.write_str(s),
            AttrValue::Int(i) => write!(f, "{}", i),
            AttrValue::Float(x) => write!(f, "{}", x),
            AttrValue::Bool(b) => write!(f, "{}", b),
            AttrValue::TextList(items) => write!(f, "[{}]", items.join(" ")),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Text(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Int(value)
    }
}

impl From<i32> for AttrValue {
    fn from(value: i32) -> Self {
        AttrValue::Int(i64::from(value))
    }
}

impl From<u32> for AttrValue {
    fn from(value: u32) -> Self {
        AttrValue::Int(i64::from(value))
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        AttrValue::Float(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}

impl From<Vec<String>> for AttrValue {
    fn from(value: Vec<String>) -> Self {
        AttrValue::TextList(value)
    }
}

impl From<Vec<&str>> for AttrValue {
    fn from(value: Vec<&str>) -> Self {
        AttrValue::TextList(value.into_iter().map(str::to_string).collect())
    }
}

/// A single key/value pair attached to an entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attr {
    pub key: String,
    pub value: AttrValue,
}

impl Attr {
    pub fn new(key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Attr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{} {}}}", self.key, self.value)
    }
}

/// Shorthand for [`Attr::new`]
///
/// ```
/// use datacollector_core::attr;
///
/// let a = attr("user_id", 42);
/// assert_eq!(a.to_string(), "{user_id 42}");
/// ```
pub fn attr(key: impl Into<String>, value: impl Into<AttrValue>) -> Attr {
    Attr::new(key, value)
}

/// One recorded log event
///
/// Fields are private; an entry is built once and then only read.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    timestamp: DateTime<Utc>,
    level: Level,
    app_name: String,
    message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    attributes: Vec<Attr>,
    #[serde(skip_serializing_if = "Option::is_none")]
    transaction_id: Option<TransactionId>,
}

impl Entry {
    /// Build an entry stamped with the current time
    pub fn new(
        level: Level,
        app_name: impl Into<String>,
        message: impl Into<String>,
        attributes: Vec<Attr>,
        transaction_id: Option<TransactionId>,
    ) -> Self {
        Self::at(Utc::now(), level, app_name, message, attributes, transaction_id)
    }

    /// Build an entry with an explicit timestamp
    pub fn at(
        timestamp: DateTime<Utc>,
        level: Level,
        app_name: impl Into<String>,
        message: impl Into<String>,
        attributes: Vec<Attr>,
        transaction_id: Option<TransactionId>,
    ) -> Self {
        Self {
            timestamp,
            level,
            app_name: app_name.into(),
            message: message.into(),
            attributes,
            transaction_id,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn attributes(&self) -> &[Attr] {
        &self.attributes
    }

    pub fn transaction_id(&self) -> Option<&TransactionId> {
        self.transaction_id.as_ref()
    }
}
