use thiserror::Error;

/// Errors raised while scanning, parsing, evaluating or compiling an expression.
///
/// All errors are local: they are returned to the immediate caller and never abort the process.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LokitError {
    /// A character which is neither an operator, a bracket, a name nor a space
    #[error("Unexpected character '{found}' at position {position}")]
    MalformedToken { found: char, position: usize },

    /// An alphanumeric run which is neither a constant nor a valid variable name
    #[error("The name '{0}' is invalid")]
    InvalidName(String),

    /// Unbalanced or mismatched grouping brackets
    #[error("Mismatched parentheses")]
    MismatchedParentheses,

    /// Operators and operands do not reduce to a single value
    #[error("Not a valid expression")]
    InvalidExpression,

    /// A token reached a stage which can not interpret it
    #[error("Invalid token in the expression")]
    InvalidToken,

    /// A variable without value, only raised in strict mode
    #[error("There is no value for the variable '{0}'")]
    UndefinedVariable(String),

    /// The truth table would exceed the configured number of variables
    #[error("Too many variables: {count} (at most {max} are supported)")]
    TooManyVariables { count: usize, max: usize },

    /// The expression tree would nest operators deeper than supported
    #[error("The expression is nested too deeply (at most {max} levels are supported)")]
    TooDeep { max: usize },
}

impl LokitError {
    /// Errors which an interactive caller can silence while the user is still typing
    pub fn is_undefined_variable(&self) -> bool {
        matches!(self, LokitError::UndefinedVariable(_))
    }
}
