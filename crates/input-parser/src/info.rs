//! Serializable description of registered options.
//!
//! This is the data a help renderer or a completion generator needs; the
//! parser's own `usage()` is one such renderer.

use serde::{Deserialize, Serialize};

use crate::option::Opt;
use crate::value::{Value, ValueKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OptionKind {
    Flag,
    Single,
    Compound,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OptionInfo {
    pub names: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default)]
    pub required: bool,
    pub kind: OptionKind,
    /// Placeholder shown after the name in usage, e.g. `value`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub argument_name: String,
    pub value_kind: ValueKind,
    /// The default in raw input form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
}

impl From<&Opt> for OptionInfo {
    fn from(option: &Opt) -> Self {
        let kind = match option {
            Opt::Flag(_) => OptionKind::Flag,
            Opt::Single(_) => OptionKind::Single,
            Opt::Compound(_) => OptionKind::Compound,
        };
        Self {
            names: option.names().to_vec(),
            description: option.description().to_string(),
            required: option.is_required(),
            kind,
            argument_name: option.argument_name().trim().to_string(),
            value_kind: option.value_kind(),
            default_value: option.raw_default_value(),
        }
    }
}
