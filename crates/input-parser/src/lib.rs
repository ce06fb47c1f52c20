//! Declarative command line option parsing.
//!
//! Options are described with a fluent builder, registered with a [`Parser`]
//! and filled from the argument vector in a single pass:
//! - [`FlagOption`] takes no argument (`-v`);
//! - [`SingleOption`] takes exactly one (`-o out.txt`);
//! - [`CompoundOption`] takes every following token up to the next known
//!   option name (`-i a.txt b.txt`).
//!
//! Values can be converted (`to_int`, `to`, `elements_to`, ...) and validated
//! with constraints. Errors are returned as [`ParseError`]; the library never
//! prints or exits. Requesting help yields [`ParseOutcome::Help`].

mod constraint;
mod error;
mod info;
mod option;
mod parser;
mod value;

pub use crate::constraint::Constraint;
pub use crate::error::{BoxError, ParseError, ParseResult};
pub use crate::info::{OptionInfo, OptionKind};
pub use crate::option::{CompoundOption, FlagOption, Opt, OptionNames, SingleOption};
pub use crate::parser::{ParseOutcome, Parser};
pub use crate::value::{Value, ValueKind, ValueType};
