use super::{Base, OptionNames};
use crate::error::{BoxError, ParseResult};
use crate::value::{Value, ValueKind, ValueType};

/// An option followed by exactly one argument, e.g. `-o out.txt`.
#[derive(Debug)]
pub struct SingleOption {
    base: Base<String>,
}

impl SingleOption {
    pub fn new(names: impl OptionNames) -> Self {
        Self {
            base: Base::new(names.into_names()),
        }
    }

    common_option_methods!();

    /// Sets the default (in raw string form) and makes the option optional.
    ///
    /// The default goes through the transformation when it is read.
    pub fn add_default_value(mut self, default_value: impl Into<String>) -> Self {
        self.base.set_default(default_value.into());
        self
    }

    /// Adds a constraint over the raw argument, checked before any transformation.
    pub fn add_raw_constraint(
        mut self,
        constraint: impl Fn(&str) -> bool + 'static,
        error_message: impl Into<String>,
    ) -> Self {
        self.base.push_raw_constraint(
            move |raw: &String| constraint(raw.as_str()),
            error_message.into(),
        );
        self
    }

    /// Stores `transformation(raw)` instead of the raw string.
    pub fn to<T: ValueType>(self, transformation: impl Fn(&str) -> T + 'static) -> Self {
        self.try_to(move |raw| Ok::<_, BoxError>(transformation(raw)))
    }

    /// Like [`to`](Self::to), for conversions that can fail.
    pub fn try_to<T, E>(
        mut self,
        transformation: impl Fn(&str) -> Result<T, E> + 'static,
    ) -> Self
    where
        T: ValueType,
        E: Into<BoxError> + 'static,
    {
        self.base.set_transformation(move |raw: &String| {
            transformation(raw.as_str()).map_err(Into::into)
        });
        self
    }

    pub fn to_int(self) -> Self {
        self.try_to(str::parse::<i32>)
    }

    pub fn to_double(self) -> Self {
        self.try_to(str::parse::<f64>)
    }

    pub fn to_float(self) -> Self {
        self.try_to(str::parse::<f32>)
    }

    pub fn default_value(&self) -> ParseResult<&String> {
        self.base.default_value()
    }

    pub fn argument_name(&self) -> &'static str {
        " value"
    }

    pub fn set_value(&mut self, raw: String) -> ParseResult<()> {
        self.base.set_value(raw)
    }
}
