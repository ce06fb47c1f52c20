//! The option model: flag, single-value and compound options.
//!
//! All three variants share [`Base`], which owns the names, required-ness,
//! the raw default, the optional transformation and both constraint lists.
//! The raw input type is `bool` for flags, `String` for single options and
//! `Vec<String>` for compound options.
//!
//! Constraint placement:
//! - `add_raw_constraint` sees the input as read from argv, before any
//!   transformation;
//! - `add_constraint::<T>` with `T` being the raw input type runs before the
//!   transformation when one changes the type, otherwise after it;
//! - `add_constraint::<T>` with any other `T` sees the value that is about to
//!   be stored, after the transformation.
//!
//! Defaults are kept in raw form and go through the transformation when read.

use std::fmt;

use crate::constraint::Constraint;
use crate::error::{BoxError, ParseError, ParseResult};
use crate::value::{Value, ValueKind, ValueType};

/// Shared builder methods, expanded into each variant's `impl` block.
macro_rules! common_option_methods {
    () => {
        /// Sets a short explanation of what the option does.
        pub fn add_description(mut self, description: impl Into<String>) -> Self {
            self.base.description = description.into();
            self
        }

        /// Overrides required-ness, e.g. to require an option that has a default.
        pub fn be_required(mut self, required: bool) -> Self {
            self.base.required = required;
            self
        }

        /// Adds a constraint over `T`, either the raw input type or the stored type.
        ///
        /// A raw-typed constraint on a transformed option runs before the
        /// transformation. Any other constraint runs after it, and fails with a
        /// type mismatch if the stored value is not a `T`.
        pub fn add_constraint<T: ValueType>(
            mut self,
            constraint: impl Fn(&T) -> bool + 'static,
            error_message: impl Into<String>,
        ) -> Self {
            self.base.push_constraint(constraint, error_message.into());
            self
        }

        pub fn names(&self) -> &[String] {
            &self.base.names
        }

        pub fn primary_name(&self) -> &str {
            self.base.primary_name()
        }

        pub fn description(&self) -> &str {
            &self.base.description
        }

        pub fn is_required(&self) -> bool {
            self.base.required
        }

        pub fn has_value(&self) -> bool {
            self.base.value.is_some()
        }

        pub fn has_default_value(&self) -> bool {
            self.base.default_value.is_some()
        }

        /// The type of value the option stores once set.
        pub fn value_kind(&self) -> ValueKind {
            self.base.output
        }

        /// The explicit value if one was set, otherwise the transformed default.
        pub fn get_value(&self) -> ParseResult<Value> {
            self.base.get_value()
        }
    };
}

mod compound;
mod flag;
mod single;

pub use compound::CompoundOption;
pub use flag::FlagOption;
pub use single::SingleOption;

type Transformation<R> = Box<dyn Fn(&R) -> Result<Value, BoxError>>;

struct StoredConstraint {
    kind: ValueKind,
    constraint: Constraint<Value>,
}

const GENERIC_CONSTRAINT_MESSAGE: &str = "Constraint not satisfied.";

pub(crate) struct Base<R> {
    names: Vec<String>,
    description: String,
    required: bool,
    value: Option<Value>,
    default_value: Option<R>,
    transformation: Option<Transformation<R>>,
    output: ValueKind,
    raw_constraints: Vec<Constraint<R>>,
    constraints: Vec<StoredConstraint>,
}

impl<R: ValueType + Clone> Base<R> {
    fn new(names: Vec<String>) -> Self {
        Self {
            names,
            description: String::new(),
            required: true,
            value: None,
            default_value: None,
            transformation: None,
            output: R::KIND,
            raw_constraints: Vec::new(),
            constraints: Vec::new(),
        }
    }

    fn primary_name(&self) -> &str {
        self.names.first().map(String::as_str).unwrap_or_default()
    }

    /// A default implies the option is optional.
    fn set_default(&mut self, default_value: R) {
        self.default_value = Some(default_value);
        self.required = false;
    }

    fn default_value(&self) -> ParseResult<&R> {
        self.default_value
            .as_ref()
            .ok_or_else(|| ParseError::NoDefaultValue {
                option: self.primary_name().to_string(),
            })
    }

    fn set_transformation<T: ValueType>(
        &mut self,
        transformation: impl Fn(&R) -> Result<T, BoxError> + 'static,
    ) {
        self.transformation = Some(Box::new(move |raw: &R| {
            transformation(raw).map(T::into_value)
        }));
        self.output = T::KIND;
    }

    fn push_raw_constraint(&mut self, constraint: impl Fn(&R) -> bool + 'static, message: String) {
        self.raw_constraints.push(Constraint::new(constraint, message));
    }

    fn push_constraint<T: ValueType>(
        &mut self,
        constraint: impl Fn(&T) -> bool + 'static,
        message: String,
    ) {
        self.constraints.push(StoredConstraint {
            kind: T::KIND,
            constraint: Constraint::new(
                move |value: &Value| T::peek(value).is_some_and(&constraint),
                message,
            ),
        });
    }

    fn convert(&self, raw: &R) -> ParseResult<Value> {
        match &self.transformation {
            Some(transformation) => transformation(raw)
                .map_err(|err| ParseError::transformation(self.primary_name(), err)),
            None => Ok(raw.clone().into_value()),
        }
    }

    fn get_value(&self) -> ParseResult<Value> {
        match &self.value {
            Some(value) => Ok(value.clone()),
            None => self.convert(self.default_value()?),
        }
    }

    fn runs_before_transformation(&self, stored: &StoredConstraint) -> bool {
        stored.kind == R::KIND && self.output != R::KIND
    }

    fn set_value(&mut self, raw: R) -> ParseResult<()> {
        for constraint in &self.raw_constraints {
            self.check(constraint.call(&raw), constraint.error_message())?;
        }
        let (before, after): (Vec<_>, Vec<_>) = self
            .constraints
            .iter()
            .partition(|stored| self.runs_before_transformation(stored));
        if !before.is_empty() {
            let raw_value = raw.clone().into_value();
            for stored in before {
                let satisfied = stored.constraint.call(&raw_value);
                self.check(satisfied, stored.constraint.error_message())?;
            }
        }
        let value = self.convert(&raw)?;
        for stored in after {
            if stored.kind != value.kind() {
                return Err(ParseError::TypeMismatch {
                    option: self.primary_name().to_string(),
                    expected: stored.kind,
                    found: value.kind(),
                });
            }
            self.check(stored.constraint.call(&value), stored.constraint.error_message())?;
        }
        tracing::trace!(option = self.primary_name(), %value, "stored option value");
        self.value = Some(value);
        Ok(())
    }

    fn check(&self, satisfied: bool, message: &str) -> ParseResult<()> {
        if satisfied {
            return Ok(());
        }
        let message = if message.is_empty() {
            GENERIC_CONSTRAINT_MESSAGE
        } else {
            message
        };
        Err(ParseError::Constraint {
            option: self.primary_name().to_string(),
            message: message.to_string(),
        })
    }
}

impl<R: fmt::Debug> fmt::Debug for Base<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Base")
            .field("names", &self.names)
            .field("description", &self.description)
            .field("required", &self.required)
            .field("value", &self.value)
            .field("default_value", &self.default_value)
            .field("output", &self.output)
            .field("transformation", &self.transformation.is_some())
            .field("raw_constraints", &self.raw_constraints.len())
            .field("constraints", &self.constraints.len())
            .finish()
    }
}

/// Anything that can name an option: one name, or several aliases.
///
/// The first name is the primary one, used in error messages and usage.
pub trait OptionNames {
    fn into_names(self) -> Vec<String>;
}

impl OptionNames for &str {
    fn into_names(self) -> Vec<String> {
        vec![self.to_string()]
    }
}

impl OptionNames for String {
    fn into_names(self) -> Vec<String> {
        vec![self]
    }
}

impl OptionNames for &[&str] {
    fn into_names(self) -> Vec<String> {
        self.iter().map(|s| s.to_string()).collect()
    }
}

impl<const N: usize> OptionNames for [&str; N] {
    fn into_names(self) -> Vec<String> {
        self.into_iter().map(str::to_string).collect()
    }
}

impl OptionNames for Vec<String> {
    fn into_names(self) -> Vec<String> {
        self
    }
}

/// Any registered option. The set of kinds is closed.
#[derive(Debug)]
pub enum Opt {
    Flag(FlagOption),
    Single(SingleOption),
    Compound(CompoundOption),
}

impl From<FlagOption> for Opt {
    fn from(option: FlagOption) -> Self {
        Self::Flag(option)
    }
}

impl From<SingleOption> for Opt {
    fn from(option: SingleOption) -> Self {
        Self::Single(option)
    }
}

impl From<CompoundOption> for Opt {
    fn from(option: CompoundOption) -> Self {
        Self::Compound(option)
    }
}

macro_rules! forward {
    ($self:ident, $opt:ident => $e:expr) => {
        match $self {
            Opt::Flag($opt) => $e,
            Opt::Single($opt) => $e,
            Opt::Compound($opt) => $e,
        }
    };
}

impl Opt {
    pub fn is_flag(&self) -> bool {
        matches!(self, Self::Flag(_))
    }

    pub fn is_single(&self) -> bool {
        matches!(self, Self::Single(_))
    }

    pub fn is_compound(&self) -> bool {
        matches!(self, Self::Compound(_))
    }

    pub fn names(&self) -> &[String] {
        forward!(self, o => o.names())
    }

    pub fn primary_name(&self) -> &str {
        forward!(self, o => o.primary_name())
    }

    pub fn description(&self) -> &str {
        forward!(self, o => o.description())
    }

    pub fn is_required(&self) -> bool {
        forward!(self, o => o.is_required())
    }

    pub fn has_value(&self) -> bool {
        forward!(self, o => o.has_value())
    }

    pub fn has_default_value(&self) -> bool {
        forward!(self, o => o.has_default_value())
    }

    pub fn argument_name(&self) -> &'static str {
        forward!(self, o => o.argument_name())
    }

    pub fn value_kind(&self) -> ValueKind {
        forward!(self, o => o.value_kind())
    }

    pub fn get_value(&self) -> ParseResult<Value> {
        forward!(self, o => o.get_value())
    }

    /// The raw default value, as given to `add_default_value`.
    pub fn raw_default_value(&self) -> Option<Value> {
        match self {
            Self::Flag(o) => o.default_value().ok().map(|v| Value::Bool(*v)),
            Self::Single(o) => o.default_value().ok().map(|v| Value::Str(v.clone())),
            Self::Compound(o) => o.default_value().ok().map(|v| Value::Strings(v.clone())),
        }
    }

    /// Reads the value as `T`, failing if the stored type differs.
    pub fn value<T: ValueType>(&self) -> ParseResult<T> {
        T::from_value(self.get_value()?).map_err(|found| ParseError::TypeMismatch {
            option: self.primary_name().to_string(),
            expected: T::KIND,
            found: found.kind(),
        })
    }
}
