use std::collections::HashSet;

use indexmap::IndexMap;

use crate::error::{ParseError, ParseResult};
use crate::info::OptionInfo;
use crate::option::{FlagOption, Opt};
use crate::value::{Value, ValueType};

const DEFAULT_PROGRAM_NAME: &str = "./exec_name";

/// Result of a successful [`Parser::parse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// Every token was consumed and all required options have a value.
    Parsed,
    /// The help option was given. Carries the rendered usage text.
    Help(String),
}

/// Registers options and fills them from an argument vector.
///
/// ```
/// use input_parser::{CompoundOption, FlagOption, ParseOutcome, Parser, SingleOption};
///
/// let mut parser = Parser::new();
/// parser
///     .add_option(|| FlagOption::new(["-f", "--flag"]))?
///     .add_option(|| SingleOption::new(["-s", "--single"]))?
///     .add_option(|| CompoundOption::new(["-c", "--compound"]))?;
///
/// let argv = ["prog", "--flag", "--single", "value", "--compound", "v1", "v2"];
/// assert_eq!(parser.parse(argv)?, ParseOutcome::Parsed);
/// assert!(parser.get_value::<bool>("-f")?);
/// assert_eq!(parser.get_value::<String>("-s")?, "value");
/// assert_eq!(parser.get_value::<Vec<String>>("-c")?, ["v1", "v2"]);
/// # Ok::<(), input_parser::ParseError>(())
/// ```
#[derive(Debug)]
pub struct Parser {
    options: Vec<Opt>,
    /// Every alias, in registration order, mapped to its index in `options`.
    names: IndexMap<String, usize>,
    help: Option<usize>,
    program_name: String,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    pub fn new() -> Self {
        Self {
            options: Vec::new(),
            names: IndexMap::new(),
            help: None,
            program_name: DEFAULT_PROGRAM_NAME.to_string(),
        }
    }

    /// Builds an option with `create_option` and registers all of its names.
    ///
    /// Fails without registering anything if the option has no names or if
    /// any of its names is already taken.
    pub fn add_option<F, O>(&mut self, create_option: F) -> ParseResult<&mut Self>
    where
        F: FnOnce() -> O,
        O: Into<Opt>,
    {
        self.register(create_option().into())?;
        Ok(self)
    }

    /// Registers `-h`/`--help`. When given, `parse` returns [`ParseOutcome::Help`].
    pub fn add_help_option(&mut self) -> ParseResult<&mut Self> {
        let index = self.register(
            FlagOption::new(["-h", "--help"])
                .add_description("Shows how to use the program.")
                .add_default_value(false)
                .into(),
        )?;
        self.help = Some(index);
        Ok(self)
    }

    fn register(&mut self, option: Opt) -> ParseResult<usize> {
        if option.names().is_empty() {
            return Err(ParseError::EmptyNames);
        }
        let mut seen = HashSet::new();
        for name in option.names() {
            if self.names.contains_key(name.as_str()) || !seen.insert(name.as_str()) {
                return Err(ParseError::DuplicateOption { name: name.clone() });
            }
        }

        let index = self.options.len();
        for name in option.names() {
            self.names.insert(name.clone(), index);
        }
        tracing::debug!(names = ?option.names(), "registered option");
        self.options.push(option);
        Ok(index)
    }

    /// Parses `argv`; the first element is the program name.
    ///
    /// Parsing is all-or-nothing from the caller's point of view: the first
    /// error is returned as is.
    pub fn parse<I, T>(&mut self, argv: I) -> ParseResult<ParseOutcome>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let argv: Vec<String> = argv.into_iter().map(Into::into).collect();
        let (program_name, args) = argv.split_first().ok_or(ParseError::MissingProgramName)?;
        self.program_name.clone_from(program_name);

        let mut index = 0;
        while index < args.len() {
            index += self.parse_token(args, index)?;
        }

        if self.help_requested() {
            tracing::debug!("help requested");
            return Ok(ParseOutcome::Help(self.usage()));
        }
        self.check_missing_options()?;
        Ok(ParseOutcome::Parsed)
    }

    /// Hands `args[index]` and its payload to the owning option.
    /// Returns how many tokens were consumed.
    fn parse_token(&mut self, args: &[String], index: usize) -> ParseResult<usize> {
        let token = &args[index];
        let Some(&slot) = self.names.get(token.as_str()) else {
            return Err(ParseError::InvalidArgument {
                token: token.clone(),
            });
        };

        let names = &self.names;
        let is_option = |arg: &str| names.contains_key(arg);
        match &mut self.options[slot] {
            Opt::Flag(flag) => {
                tracing::debug!(%token, "flag");
                flag.set_present()?;
                Ok(1)
            }
            Opt::Single(single) => {
                let next = args.get(index + 1);
                let Some(value) = next.filter(|next| !is_option(next.as_str())) else {
                    return Err(ParseError::MissingValue {
                        option: token.clone(),
                    });
                };
                tracing::debug!(%token, %value, "single option");
                single.set_value(value.clone())?;
                Ok(2)
            }
            Opt::Compound(compound) => {
                let values: Vec<String> = args[index + 1..]
                    .iter()
                    .take_while(|next| !is_option(next.as_str()))
                    .cloned()
                    .collect();
                if values.is_empty() {
                    return Err(ParseError::MissingValues {
                        option: token.clone(),
                    });
                }
                tracing::debug!(%token, count = values.len(), "compound option");
                let consumed = 1 + values.len();
                compound.set_value(values)?;
                Ok(consumed)
            }
        }
    }

    fn help_requested(&self) -> bool {
        self.help
            .is_some_and(|index| matches!(self.options[index].get_value(), Ok(Value::Bool(true))))
    }

    fn check_missing_options(&self) -> ParseResult<()> {
        for option in &self.options {
            if option.is_required() && !option.has_value() && !option.has_default_value() {
                return Err(ParseError::MissingOption(option.primary_name().to_string()));
            }
        }
        Ok(())
    }

    /// Reads the value of the option registered under `name` as a `T`.
    pub fn get_value<T: ValueType>(&self, name: &str) -> ParseResult<T> {
        self.option(name)
            .ok_or_else(|| ParseError::UnknownOption(name.to_string()))?
            .value()
    }

    pub fn option(&self, name: &str) -> Option<&Opt> {
        self.names.get(name).map(|&index| &self.options[index])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    /// Distinct options in registration order.
    pub fn options(&self) -> impl Iterator<Item = &Opt> {
        self.options.iter()
    }

    /// Program name taken from `argv[0]` of the last parse.
    pub fn program_name(&self) -> &str {
        &self.program_name
    }

    pub fn describe(&self) -> Vec<OptionInfo> {
        self.options.iter().map(OptionInfo::from).collect()
    }

    /// Renders the synopsis line followed by one line per described option.
    ///
    /// Required options are shown as `<name>`, optional ones as `[name]`.
    pub fn usage(&self) -> String {
        let mut usage = format!("Usage: {}", self.program_name);
        let mut description = String::new();
        for option in &self.options {
            let (open, close) = if option.is_required() {
                ('<', '>')
            } else {
                ('[', ']')
            };
            usage.push_str(&format!(
                " {open}{}{}{close}",
                option.primary_name(),
                option.argument_name()
            ));
            if !option.description().is_empty() {
                description.push_str(&format!(
                    "{} -> {}\n",
                    option.names().join(", "),
                    option.description()
                ));
            }
        }
        format!("{usage}\n\n{description}\n")
    }
}
