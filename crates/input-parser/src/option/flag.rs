use super::{Base, OptionNames};
use crate::error::ParseResult;
use crate::value::{Value, ValueKind, ValueType};

/// An option that stands alone on the command line, e.g. `-v`.
///
/// Its raw input is a `bool`. Presence on the command line yields `true`, or
/// the negation of the default when one is configured, so a flag can switch
/// something either on or off.
#[derive(Debug)]
pub struct FlagOption {
    base: Base<bool>,
}

impl FlagOption {
    pub fn new(names: impl OptionNames) -> Self {
        Self {
            base: Base::new(names.into_names()),
        }
    }

    common_option_methods!();

    /// Sets the default and makes the flag optional.
    pub fn add_default_value(mut self, default_value: bool) -> Self {
        self.base.set_default(default_value);
        self
    }

    /// Adds a constraint over the raw `bool`, checked before any transformation.
    pub fn add_raw_constraint(
        mut self,
        constraint: impl Fn(bool) -> bool + 'static,
        error_message: impl Into<String>,
    ) -> Self {
        self.base
            .push_raw_constraint(move |raw: &bool| constraint(*raw), error_message.into());
        self
    }

    /// Stores `transformation(raw)` instead of the raw `bool`.
    pub fn to<T: ValueType>(mut self, transformation: impl Fn(bool) -> T + 'static) -> Self {
        self.base
            .set_transformation(move |raw: &bool| Ok(transformation(*raw)));
        self
    }

    /// `true` -> 1, `false` -> 0.
    pub fn to_int(self) -> Self {
        self.to(i32::from)
    }

    pub fn to_double(self) -> Self {
        self.to(|raw| if raw { 1.0_f64 } else { 0.0 })
    }

    pub fn to_float(self) -> Self {
        self.to(|raw| if raw { 1.0_f32 } else { 0.0 })
    }

    pub fn default_value(&self) -> ParseResult<&bool> {
        self.base.default_value()
    }

    pub fn argument_name(&self) -> &'static str {
        ""
    }

    pub fn set_value(&mut self, raw: bool) -> ParseResult<()> {
        self.base.set_value(raw)
    }

    /// Records that the flag appeared on the command line.
    pub fn set_present(&mut self) -> ParseResult<()> {
        let raw = self.base.default_value.map_or(true, |default| !default);
        self.set_value(raw)
    }
}
