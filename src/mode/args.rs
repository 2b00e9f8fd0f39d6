//! Dynamically shaped mode arguments.
//!
//! Callers that hold heterogeneous values (script bindings, JSON sent over a
//! command line) describe a mode with a list of [`ModeArg`]s and let
//! [`Mode::from_args`](super::Mode::from_args) decide whether they meant a
//! list mode or a boolean mode.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::ModeError;

/// A single dynamically typed argument or value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModeArg {
    Bool(bool),
    Integer(i64),
    Number(f64),
    Text(String),
    Labels(LabelTable),
}

/// An ordered collection of labels with an optional description attached.
///
/// Deserializes from either a plain array (`["Normal", "Acc"]`) or a table
/// (`{"values": ["Normal", "Acc"], "description": "Melee"}`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawLabelTable")]
pub struct LabelTable {
    pub values: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawLabelTable {
    Plain(Vec<String>),
    Described {
        values: Vec<String>,
        #[serde(default)]
        description: Option<String>,
    },
}

impl From<RawLabelTable> for LabelTable {
    fn from(raw: RawLabelTable) -> Self {
        match raw {
            RawLabelTable::Plain(values) => Self {
                values,
                description: None,
            },
            RawLabelTable::Described {
                values,
                description,
            } => Self {
                values,
                description,
            },
        }
    }
}

impl LabelTable {
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
            description: None,
        }
    }

    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl ModeArg {
    /// Short name of the argument's shape, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            ModeArg::Bool(_) => "boolean",
            ModeArg::Integer(_) | ModeArg::Number(_) => "number",
            ModeArg::Text(_) => "text",
            ModeArg::Labels(_) => "label table",
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ModeArg::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Parse a JSON array of arguments, e.g. `[true, "Kiting"]` or
    /// `[{"values": ["Normal", "Acc"]}]`. A bare JSON value is treated as a
    /// single argument.
    pub fn parse_json(input: &str) -> Result<Vec<ModeArg>, ModeError> {
        let value: serde_json::Value =
            serde_json::from_str(input).map_err(|e| ModeError::InvalidArgs(e.to_string()))?;

        match value {
            // A top-level array of plain strings is ambiguous; read it as
            // positional text arguments, which classifies the same way.
            serde_json::Value::Array(items) => items
                .into_iter()
                .map(|item| {
                    serde_json::from_value(item).map_err(|e| ModeError::InvalidArgs(e.to_string()))
                })
                .collect(),
            other => serde_json::from_value(other)
                .map(|arg| vec![arg])
                .map_err(|e| ModeError::InvalidArgs(e.to_string())),
        }
    }
}

impl fmt::Display for ModeArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModeArg::Bool(b) => write!(f, "{}", b),
            ModeArg::Integer(n) => write!(f, "{}", n),
            ModeArg::Number(n) => write!(f, "{}", n),
            ModeArg::Text(s) => write!(f, "{:?}", s),
            ModeArg::Labels(table) => write!(f, "[{}]", table.values.join(", ")),
        }
    }
}

impl From<bool> for ModeArg {
    fn from(value: bool) -> Self {
        ModeArg::Bool(value)
    }
}

impl From<&str> for ModeArg {
    fn from(value: &str) -> Self {
        ModeArg::Text(value.to_string())
    }
}

impl From<String> for ModeArg {
    fn from(value: String) -> Self {
        ModeArg::Text(value)
    }
}

impl From<&String> for ModeArg {
    fn from(value: &String) -> Self {
        ModeArg::Text(value.clone())
    }
}

impl From<f64> for ModeArg {
    fn from(value: f64) -> Self {
        ModeArg::Number(value)
    }
}

impl From<i64> for ModeArg {
    fn from(value: i64) -> Self {
        ModeArg::Integer(value)
    }
}

impl From<Vec<String>> for ModeArg {
    fn from(values: Vec<String>) -> Self {
        ModeArg::Labels(LabelTable::new(values))
    }
}

impl From<LabelTable> for ModeArg {
    fn from(table: LabelTable) -> Self {
        ModeArg::Labels(table)
    }
}
