//! Scan expression strings into flat token sequences.

use crate::LokitError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::iter::Peekable;
use std::str::Chars;
use tracing::trace;

static RE_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z_][a-zA-Z01-9_]*$").unwrap());

/// Unicode glyphs of the operators
static GLYPHS: [(char, Operator); 8] = [
    ('∧', Operator::And),
    ('∨', Operator::Or),
    ('¬', Operator::Not),
    ('⊕', Operator::Xor),
    ('⊼', Operator::Nand),
    ('⊽', Operator::Nor),
    ('→', Operator::Implies),
    ('↔', Operator::Iff),
];

fn glyph(c: char) -> Option<Operator> {
    GLYPHS.iter().find(|(g, _)| *g == c).map(|(_, op)| *op)
}

/// Logical operators recognized in expressions.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Operator {
    /// Unary negation
    Not,
    /// Both operands are true
    And,
    /// At least one operand is true
    Or,
    /// Exactly one operand is true
    Xor,
    /// Negated AND
    Nand,
    /// Negated OR
    Nor,
    /// Material implication: false only when the antecedent is true and the consequent false
    Implies,
    /// Biconditional: both operands have the same value
    Iff,
}

/// Shape of a grouping bracket: opening and closing brackets must have the same shape
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Bracket {
    Round,
    Square,
    Curly,
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Parenthesis {
    Open(Bracket),
    Close(Bracket),
}

/// A lexical unit of an expression.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Token {
    Variable(String),
    Constant(bool),
    Operator(Operator),
    Parenthesis(Parenthesis),
}

impl Operator {
    /// Binding strength: operators with higher precedence bind tighter
    pub fn precedence(self) -> u8 {
        match self {
            Operator::Not => 4,
            Operator::And | Operator::Nand => 3,
            Operator::Or | Operator::Nor | Operator::Xor => 2,
            Operator::Implies => 1,
            Operator::Iff => 0,
        }
    }

    /// NOT is a prefix operator and implication chains to the right, all other operators
    /// group from the left.
    pub fn is_right_associative(self) -> bool {
        matches!(self, Operator::Not | Operator::Implies)
    }

    pub fn is_unary(self) -> bool {
        self == Operator::Not
    }

    /// Operators for which `a op (b op c)` equals `(a op b) op c`
    pub fn is_associative(self) -> bool {
        matches!(
            self,
            Operator::And | Operator::Or | Operator::Xor | Operator::Iff
        )
    }

    /// Apply a binary operator on two boolean values.
    ///
    /// The NOT operator ignores its second operand.
    pub fn apply(self, a: bool, b: bool) -> bool {
        match self {
            Operator::Not => !a,
            Operator::And => a && b,
            Operator::Or => a || b,
            Operator::Xor => a != b,
            Operator::Nand => !(a && b),
            Operator::Nor => !(a || b),
            Operator::Implies => !a || b,
            Operator::Iff => a == b,
        }
    }

    /// Canonical ASCII spelling, as produced by [normalize]
    pub fn ascii(self) -> &'static str {
        match self {
            Operator::Not => "~",
            Operator::And => "&",
            Operator::Or => "|",
            Operator::Xor => "^",
            Operator::Nand => "!&",
            Operator::Nor => "!|",
            Operator::Implies => "->",
            Operator::Iff => "<->",
        }
    }
}

impl Bracket {
    fn open(self) -> char {
        match self {
            Bracket::Round => '(',
            Bracket::Square => '[',
            Bracket::Curly => '{',
        }
    }

    fn close(self) -> char {
        match self {
            Bracket::Round => ')',
            Bracket::Square => ']',
            Bracket::Curly => '}',
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.ascii())
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::Variable(name) => write!(f, "{}", name),
            Token::Constant(false) => write!(f, "0"),
            Token::Constant(true) => write!(f, "1"),
            Token::Operator(op) => write!(f, "{}", op),
            Token::Parenthesis(Parenthesis::Open(b)) => write!(f, "{}", b.open()),
            Token::Parenthesis(Parenthesis::Close(b)) => write!(f, "{}", b.close()),
        }
    }
}

/// Replace the Unicode operator glyphs by their ASCII spelling.
///
/// ```
/// assert_eq!(lokit::normalize("¬(A ∧ B) ⊼ C"), "~(A & B) !& C");
/// ```
pub fn normalize(expression: &str) -> String {
    let mut result = String::with_capacity(expression.len());
    for c in expression.chars() {
        match glyph(c) {
            Some(op) => result.push_str(op.ascii()),
            None => result.push(c),
        }
    }
    result
}

/// Convert an expression into a sequence of tokens.
///
/// Names are runs of alphanumeric characters (and underscores), the runs `0` and `1` are constants.
/// No spacing is needed between operators and operands.
/// Error positions are character offsets in the given expression.
///
/// ```
/// use lokit::{tokenize, Operator, Token};
/// # use lokit::LokitError;
/// # fn main() -> Result<(), LokitError> {
/// let tokens = tokenize("A⊼B")?;
/// assert_eq!(tokens, tokenize("A !& B")?);
/// assert_eq!(tokens[1], Token::Operator(Operator::Nand));
/// # Ok(())
/// # }
/// ```
pub fn tokenize(expression: &str) -> Result<Vec<Token>, LokitError> {
    let mut scanner = Scanner {
        chars: expression.chars().peekable(),
        position: 0,
        pending: String::new(),
        tokens: Vec::new(),
    };
    scanner.scan()?;
    trace!(expression, count = scanner.tokens.len(), "tokenized");
    Ok(scanner.tokens)
}

struct Scanner<'a> {
    chars: Peekable<Chars<'a>>,
    position: usize,
    pending: String,
    tokens: Vec<Token>,
}

impl Scanner<'_> {
    fn scan(&mut self) -> Result<(), LokitError> {
        while let Some(c) = self.next_char() {
            let at = self.position - 1;
            let malformed = || LokitError::MalformedToken {
                found: c,
                position: at,
            };
            if c.is_alphanumeric() || c == '_' {
                self.pending.push(c);
                continue;
            }

            self.flush()?;
            if let Some(op) = glyph(c) {
                self.tokens.push(Token::Operator(op));
                continue;
            }
            let token = match c {
                _ if c.is_whitespace() => continue,
                '(' => Token::Parenthesis(Parenthesis::Open(Bracket::Round)),
                '[' => Token::Parenthesis(Parenthesis::Open(Bracket::Square)),
                '{' => Token::Parenthesis(Parenthesis::Open(Bracket::Curly)),
                ')' => Token::Parenthesis(Parenthesis::Close(Bracket::Round)),
                ']' => Token::Parenthesis(Parenthesis::Close(Bracket::Square)),
                '}' => Token::Parenthesis(Parenthesis::Close(Bracket::Curly)),
                '&' => Token::Operator(Operator::And),
                '|' => Token::Operator(Operator::Or),
                '^' => Token::Operator(Operator::Xor),
                '~' => Token::Operator(Operator::Not),
                '!' => match self.chars.peek() {
                    Some('&') => self.consume(Operator::Nand),
                    Some('|') => self.consume(Operator::Nor),
                    _ => Token::Operator(Operator::Not),
                },
                '-' => match self.chars.peek() {
                    Some('>') => self.consume(Operator::Implies),
                    _ => return Err(malformed()),
                },
                '<' => match (self.next_char(), self.next_char()) {
                    (Some('-'), Some('>')) => Token::Operator(Operator::Iff),
                    _ => return Err(malformed()),
                },
                _ => return Err(malformed()),
            };
            self.tokens.push(token);
        }
        self.flush()
    }

    fn next_char(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        self.position += 1;
        Some(c)
    }

    /// Consume the second character of a two-character operator
    fn consume(&mut self, op: Operator) -> Token {
        self.next_char();
        Token::Operator(op)
    }

    /// Emit the pending alphanumeric run, if any
    fn flush(&mut self) -> Result<(), LokitError> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let run = std::mem::take(&mut self.pending);
        let token = match run.as_str() {
            "0" => Token::Constant(false),
            "1" => Token::Constant(true),
            _ if RE_NAME.is_match(&run) => Token::Variable(run),
            _ => return Err(LokitError::InvalidName(run)),
        };
        self.tokens.push(token);
        Ok(())
    }
}
