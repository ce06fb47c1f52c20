use std::fmt;

/// A predicate an option value must satisfy, and the message reported when it does not.
///
/// The predicate runs as-is: a panic inside it is not caught.
pub struct Constraint<T: ?Sized> {
    call: Box<dyn Fn(&T) -> bool>,
    error_message: String,
}

impl<T: ?Sized> Constraint<T> {
    pub fn new(call: impl Fn(&T) -> bool + 'static, error_message: impl Into<String>) -> Self {
        Self {
            call: Box::new(call),
            error_message: error_message.into(),
        }
    }

    pub fn call(&self, value: &T) -> bool {
        (self.call)(value)
    }

    /// The configured message. May be empty; callers substitute a generic one.
    pub fn error_message(&self) -> &str {
        &self.error_message
    }
}

impl<T: ?Sized> fmt::Debug for Constraint<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constraint")
            .field("error_message", &self.error_message)
            .finish_non_exhaustive()
    }
}
