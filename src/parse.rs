//! Operator-precedence parsing of token sequences into postfix order.

use crate::*;
use std::fmt;
use std::slice::Iter;
use std::str::FromStr;
use tracing::trace;

/// A token sequence in reverse-Polish (postfix) order.
///
/// Brackets never survive the conversion: a well-formed RPN sequence only contains
/// operands (variables and constants) and operators.
///
/// ```
/// use lokit::Rpn;
/// # use lokit::LokitError;
/// # fn main() -> Result<(), LokitError> {
/// let rpn: Rpn = "A ∨ B ∧ ¬C".parse()?;
/// assert_eq!(rpn.to_string(), "A B C ~ & |");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, PartialEq, Eq, Default, Debug)]
pub struct Rpn {
    tokens: Vec<Token>,
}

impl Rpn {
    /// Convert a token sequence using the shunting-yard algorithm.
    ///
    /// Operands go straight to the output. An operator first moves to the output the stacked
    /// operators which bind tighter, or as tight when it groups from the left.
    /// A closing bracket unstacks operators up to the matching opening bracket.
    pub fn from_tokens(tokens: impl IntoIterator<Item = Token>) -> Result<Self, LokitError> {
        let mut output = Vec::new();
        let mut stack: Vec<Token> = Vec::new();

        for token in tokens {
            match token {
                Token::Variable(_) | Token::Constant(_) => output.push(token),
                Token::Operator(op) => {
                    while let Some(Token::Operator(top)) = stack.last() {
                        let pops = top.precedence() > op.precedence()
                            || (top.precedence() == op.precedence() && !op.is_right_associative());
                        if !pops {
                            break;
                        }
                        output.extend(stack.pop());
                    }
                    stack.push(token);
                }
                Token::Parenthesis(Parenthesis::Open(_)) => stack.push(token),
                Token::Parenthesis(Parenthesis::Close(bracket)) => loop {
                    match stack.pop() {
                        None => return Err(LokitError::MismatchedParentheses),
                        Some(Token::Parenthesis(Parenthesis::Open(b))) if b == bracket => break,
                        Some(Token::Parenthesis(_)) => {
                            return Err(LokitError::MismatchedParentheses)
                        }
                        Some(t) => output.push(t),
                    }
                },
            }
        }

        while let Some(token) = stack.pop() {
            if let Token::Parenthesis(_) = token {
                return Err(LokitError::MismatchedParentheses);
            }
            output.push(token);
        }

        Ok(Self { tokens: output })
    }

    /// Tokenize and convert an expression
    pub fn parse(expression: &str) -> Result<Self, LokitError> {
        let rpn = Self::from_tokens(tokenize(expression)?)?;
        trace!(expression, rpn = %rpn, "parsed");
        Ok(rpn)
    }

    /// The sorted set of variables used in this expression
    pub fn variables(&self) -> VariableSet {
        self.tokens
            .iter()
            .filter_map(|t| match t {
                Token::Variable(name) => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Test if the expression uses a given operator
    pub fn uses(&self, op: Operator) -> bool {
        self.tokens.contains(&Token::Operator(op))
    }

    pub fn iter(&self) -> Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl FromStr for Rpn {
    type Err = LokitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<'a> IntoIterator for &'a Rpn {
    type Item = &'a Token;
    type IntoIter = Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

impl fmt::Display for Rpn {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut first = true;
        for t in &self.tokens {
            match first {
                true => first = false,
                false => write!(f, " ")?,
            }
            write!(f, "{}", t)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::*;

    fn postfix(s: &str) -> Result<String, LokitError> {
        Ok(Rpn::parse(s)?.to_string())
    }

    #[test]
    fn precedence_and_grouping() -> Result<(), LokitError> {
        assert_eq!(postfix("A & B | C")?, "A B & C |");
        assert_eq!(postfix("A | B & C")?, "A B C & |");
        assert_eq!(postfix("(A | B) & C")?, "A B | C &");
        assert_eq!(postfix("[A | B] & {C ^ D}")?, "A B | C D ^ &");
        assert_eq!(postfix("A ⊼ B ∨ C")?, "A B !& C |");
        assert_eq!(postfix("A ⊕ B ∨ C")?, "A B ^ C |");
        assert_eq!(postfix("A ∨ B → C ↔ D")?, "A B | C -> D <->");
        Ok(())
    }

    #[test]
    fn associativity() -> Result<(), LokitError> {
        assert_eq!(postfix("A & B & C")?, "A B & C &");
        assert_eq!(postfix("A !| B !| C")?, "A B !| C !|");
        assert_eq!(postfix("A -> B -> C")?, "A B C -> ->");
        assert_eq!(postfix("~~A")?, "A ~ ~");
        assert_eq!(postfix("~A & B")?, "A ~ B &");
        assert_eq!(postfix("~(A & B)")?, "A B & ~");
        Ok(())
    }

    #[test]
    fn mismatched_parentheses() {
        for s in ["(A ∧ B", "A ∧ B)", "((A)", "(A]", "{A ∨ B)", ")("] {
            assert_eq!(Rpn::parse(s), Err(LokitError::MismatchedParentheses), "{}", s);
        }
    }

    #[test]
    fn extract_variables() -> Result<(), LokitError> {
        let rpn = Rpn::parse("C & (A | c) & A & 1")?;
        let vars = rpn.variables();
        let names: Vec<&str> = vars.iter().collect();
        assert_eq!(names, vec!["A", "C", "c"]);
        assert!(rpn.uses(Operator::And));
        assert!(!rpn.uses(Operator::Xor));
        Ok(())
    }
}
