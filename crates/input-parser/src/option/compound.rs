use super::{Base, OptionNames};
use crate::error::{BoxError, ParseError, ParseResult};
use crate::value::{Value, ValueKind, ValueType};

/// An option followed by one or more arguments, e.g. `-i a.txt b.txt`.
///
/// The parser hands it every token up to the next registered option name.
#[derive(Debug)]
pub struct CompoundOption {
    base: Base<Vec<String>>,
}

impl CompoundOption {
    pub fn new(names: impl OptionNames) -> Self {
        Self {
            base: Base::new(names.into_names()),
        }
    }

    common_option_methods!();

    /// Sets the default (in raw form) and makes the option optional.
    pub fn add_default_value<I>(mut self, default_value: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.base
            .set_default(default_value.into_iter().map(Into::into).collect());
        self
    }

    /// Adds a constraint over the raw arguments, checked before any transformation.
    pub fn add_raw_constraint(
        mut self,
        constraint: impl Fn(&[String]) -> bool + 'static,
        error_message: impl Into<String>,
    ) -> Self {
        self.base.push_raw_constraint(
            move |raw: &Vec<String>| constraint(raw.as_slice()),
            error_message.into(),
        );
        self
    }

    /// Transforms the whole argument list at once.
    pub fn to<T: ValueType>(self, transformation: impl Fn(&[String]) -> T + 'static) -> Self {
        self.try_to(move |raw| Ok::<_, BoxError>(transformation(raw)))
    }

    pub fn try_to<T, E>(
        mut self,
        transformation: impl Fn(&[String]) -> Result<T, E> + 'static,
    ) -> Self
    where
        T: ValueType,
        E: Into<BoxError> + 'static,
    {
        self.base.set_transformation(move |raw: &Vec<String>| {
            transformation(raw.as_slice()).map_err(Into::into)
        });
        self
    }

    /// Transforms each argument on its own.
    pub fn elements_to<T>(self, transformation: impl Fn(&str) -> T + 'static) -> Self
    where
        T: 'static,
        Vec<T>: ValueType,
    {
        self.try_elements_to(move |raw| Ok::<_, BoxError>(transformation(raw)))
    }

    /// Like [`elements_to`](Self::elements_to); the first failing element aborts.
    pub fn try_elements_to<T, E>(
        self,
        transformation: impl Fn(&str) -> Result<T, E> + 'static,
    ) -> Self
    where
        T: 'static,
        Vec<T>: ValueType,
        E: Into<BoxError> + 'static,
    {
        self.try_to(move |raw| {
            raw.iter()
                .map(|element| transformation(element.as_str()))
                .collect::<Result<Vec<T>, E>>()
        })
    }

    pub fn to_int(self) -> Self {
        self.try_elements_to(str::parse::<i32>)
    }

    pub fn to_double(self) -> Self {
        self.try_elements_to(str::parse::<f64>)
    }

    pub fn to_float(self) -> Self {
        self.try_elements_to(str::parse::<f32>)
    }

    pub fn default_value(&self) -> ParseResult<&Vec<String>> {
        self.base.default_value()
    }

    pub fn argument_name(&self) -> &'static str {
        " value1 value2 ..."
    }

    /// Stores `raw`, which must hold at least one argument.
    pub fn set_value(&mut self, raw: Vec<String>) -> ParseResult<()> {
        if raw.is_empty() {
            return Err(ParseError::MissingValues {
                option: self.primary_name().to_string(),
            });
        }
        self.base.set_value(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn stores_argument_list() {
        let mut option = CompoundOption::new(["-c", "--compound"]);
        option.set_value(strings(&["v1", "v2"])).unwrap();
        assert_eq!(
            option.get_value().unwrap(),
            Value::Strings(strings(&["v1", "v2"]))
        );
        assert_eq!(option.value_kind(), ValueKind::Strings);
    }

    #[test]
    fn empty_argument_list_is_rejected() {
        let mut option = CompoundOption::new(["-c", "--compound"]).add_default_value(["d"]);
        let err = option.set_value(Vec::new()).unwrap_err();
        assert!(matches!(err, ParseError::MissingValues { ref option } if option == "-c"));
        assert_eq!(
            err.to_string(),
            "After the -c option should be at least an extra argument!"
        );
        assert!(!option.has_value());
    }

    #[test]
    fn numeric_conversions_apply_per_element() {
        let mut option = CompoundOption::new("-n").to_int();
        option.set_value(strings(&["1", "-2", "30"])).unwrap();
        assert_eq!(option.get_value().unwrap(), Value::Ints(vec![1, -2, 30]));

        let err = option.set_value(strings(&["1", "two"])).unwrap_err();
        assert!(matches!(err, ParseError::Transformation { .. }));

        let option = CompoundOption::new("-w")
            .add_default_value(["0.5", "1.5"])
            .to_double();
        assert_eq!(option.get_value().unwrap(), Value::Doubles(vec![0.5, 1.5]));

        let mut option = CompoundOption::new("-f").to_float();
        option.set_value(strings(&["2.5"])).unwrap();
        assert_eq!(option.value_kind(), ValueKind::Floats);
        assert_eq!(option.get_value().unwrap(), Value::Floats(vec![2.5]));
    }

    #[test]
    fn whole_list_transformation() {
        let mut option = CompoundOption::new("--words").to(|raw| raw.join("-"));
        option.set_value(strings(&["a", "b", "c"])).unwrap();
        assert_eq!(option.get_value().unwrap(), Value::Str("a-b-c".to_string()));
        assert_eq!(option.value_kind(), ValueKind::Str);
    }

    #[test]
    fn elements_to_custom_type() {
        let mut option = CompoundOption::new("--upper").elements_to(str::to_uppercase);
        option.set_value(strings(&["a", "b"])).unwrap();
        assert_eq!(option.get_value().unwrap(), Value::Strings(strings(&["A", "B"])));
    }

    #[test]
    fn raw_and_stored_constraints() {
        let mut option = CompoundOption::new("-n")
            .add_raw_constraint(|raw| raw.len() <= 3, "at most three numbers")
            .to_int()
            .add_constraint(|nums: &Vec<i32>| nums.iter().all(|n| *n >= 0), "no negatives");

        let err = option.set_value(strings(&["1", "2", "3", "4"])).unwrap_err();
        assert_eq!(err.to_string(), "at most three numbers");
        let err = option.set_value(strings(&["1", "-2"])).unwrap_err();
        assert_eq!(err.to_string(), "no negatives");
        option.set_value(strings(&["1", "2"])).unwrap();
        assert_eq!(option.get_value().unwrap(), Value::Ints(vec![1, 2]));
    }
}
