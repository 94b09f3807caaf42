//! Generic reduction of RPN token streams.
//!
//! Evaluating an expression, building its tree and compiling it into a circuit all walk the
//! same postfix stream with an operand stack. They only differ by the values stored on the stack
//! and by what an operator does with its operands. The [Reducer] trait captures this difference
//! and [reduce] implements the shared stack discipline.

use crate::*;

/// Operations applied on the operand stack while reducing an RPN stream.
///
/// Each callback builds a new stack value, or fails to interrupt the reduction.
pub trait Reducer {
    /// Values stored on the operand stack
    type Value;

    /// Push a value for a named variable
    fn variable(&mut self, name: &str) -> Result<Self::Value, LokitError>;

    /// Push a value for a fixed Boolean
    fn constant(&mut self, value: bool) -> Result<Self::Value, LokitError>;

    /// Combine the operand of the unary NOT operator
    fn negate(&mut self, operand: Self::Value) -> Result<Self::Value, LokitError>;

    /// Combine the two operands of a binary operator, `left` is the deepest on the stack
    fn combine(
        &mut self,
        op: Operator,
        left: Self::Value,
        right: Self::Value,
    ) -> Result<Self::Value, LokitError>;

    /// Check the single value remaining at the end of the reduction
    fn finish(&mut self, value: Self::Value) -> Result<Self::Value, LokitError> {
        Ok(value)
    }
}

/// Reduce an RPN stream to a single value.
///
/// Fails with [LokitError::InvalidExpression] if an operator misses operands or if
/// the stack does not end with exactly one value, and with [LokitError::InvalidToken]
/// if a bracket is found in the stream.
pub fn reduce<'a, R, I>(tokens: I, reducer: &mut R) -> Result<R::Value, LokitError>
where
    R: Reducer,
    I: IntoIterator<Item = &'a Token>,
{
    let mut stack: Vec<R::Value> = Vec::new();

    for token in tokens {
        let value = match token {
            Token::Variable(name) => reducer.variable(name)?,
            Token::Constant(b) => reducer.constant(*b)?,
            Token::Operator(Operator::Not) => {
                let a = stack.pop().ok_or(LokitError::InvalidExpression)?;
                reducer.negate(a)?
            }
            Token::Operator(op) => {
                let b = stack.pop().ok_or(LokitError::InvalidExpression)?;
                let a = stack.pop().ok_or(LokitError::InvalidExpression)?;
                reducer.combine(*op, a, b)?
            }
            Token::Parenthesis(_) => return Err(LokitError::InvalidToken),
        };
        stack.push(value);
    }

    match (stack.pop(), stack.is_empty()) {
        (Some(value), true) => reducer.finish(value),
        _ => Err(LokitError::InvalidExpression),
    }
}

#[cfg(test)]
mod tests {
    use crate::reduce::*;

    /// Count the operands and operators, to check the stack discipline
    struct Counter;

    impl Reducer for Counter {
        type Value = usize;

        fn variable(&mut self, _name: &str) -> Result<usize, LokitError> {
            Ok(1)
        }
        fn constant(&mut self, _value: bool) -> Result<usize, LokitError> {
            Ok(1)
        }
        fn negate(&mut self, operand: usize) -> Result<usize, LokitError> {
            Ok(operand + 1)
        }
        fn combine(&mut self, _op: Operator, left: usize, right: usize) -> Result<usize, LokitError> {
            Ok(left + right + 1)
        }
    }

    #[test]
    fn stack_discipline() -> Result<(), LokitError> {
        let rpn = Rpn::parse("¬(A ∧ B) ∨ 1")?;
        assert_eq!(reduce(&rpn, &mut Counter)?, rpn.len());
        Ok(())
    }

    #[test]
    fn arity_errors() -> Result<(), LokitError> {
        for s in ["A ∧ ∧ B", "A B", "¬", "", "A ∨"] {
            let rpn = Rpn::parse(s)?;
            assert_eq!(reduce(&rpn, &mut Counter), Err(LokitError::InvalidExpression), "{}", s);
        }
        Ok(())
    }

    #[test]
    fn stray_parenthesis() {
        let tokens = vec![
            Token::Variable("A".into()),
            Token::Parenthesis(Parenthesis::Close(Bracket::Round)),
        ];
        assert_eq!(reduce(&tokens, &mut Counter), Err(LokitError::InvalidToken));
    }
}
