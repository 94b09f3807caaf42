//! Formatting API for expressions

use crate::{Operator, Pattern, VariableSet};
use delegate::delegate;

use std::fmt;

/// Glyphs used to write operators and fixed values
#[derive(Debug)]
pub struct FormatterConfig<'a> {
    s_and: &'a str,
    s_or: &'a str,
    s_not: &'a str,
    s_xor: &'a str,
    s_nand: &'a str,
    s_nor: &'a str,
    s_implies: &'a str,
    s_iff: &'a str,
}

pub static UNICODE_FMT_CFG: FormatterConfig = FormatterConfig {
    s_and: "∧",
    s_or: "∨",
    s_not: "¬",
    s_xor: "⊕",
    s_nand: "⊼",
    s_nor: "⊽",
    s_implies: "→",
    s_iff: "↔",
};

pub static ASCII_FMT_CFG: FormatterConfig = FormatterConfig {
    s_and: "&",
    s_or: "|",
    s_not: "~",
    s_xor: "^",
    s_nand: "!&",
    s_nor: "!|",
    s_implies: "->",
    s_iff: "<->",
};

/// Anything which can be written through the hooks of an [ExprFormatter]
pub trait Formula {
    fn fmt_with(&self, f: &mut dyn ExprFormatter) -> fmt::Result;
}

pub struct InfixFormatted<'a, T: Formula + ?Sized> {
    formula: &'a T,
    cfg: &'a FormatterConfig<'a>,
}

/// Define hooks to display separate parts of expressions.
///
/// This trait provide entry points used by [Formula::fmt_with] to control the presentation of the expression.
/// The expression visits the inner tree and calls the hooks defined in this trait for each node and leaf.
///
/// A default formatter is implemented on top of [fmt::Formatter], additional formatters are used through
/// wrappers overriding the Display trait.
pub trait ExprFormatter {
    /// Pass-through function calling an internal [fmt::Formatter].
    ///
    /// This function enables the use of the ```write!``` macro in other functions.
    fn write_fmt(&mut self, args: fmt::Arguments) -> fmt::Result;

    /// Write a fixed Boolean node
    fn write_bool(&mut self, b: bool) -> fmt::Result;

    /// Write a single named variable
    fn write_variable(&mut self, name: &str) -> fmt::Result;

    /// Start writing a negation.
    ///
    /// A bare negation applies to an atom or to another negation and needs no grouping.
    fn start_negation(&mut self, bare: bool) -> fmt::Result;

    /// Stop writing a negation
    fn end_negation(&mut self, bare: bool) -> fmt::Result;

    /// Start writing a binary operation, grouped operations are enclosed in parenthesis
    fn start_operation(&mut self, op: Operator, grouped: bool) -> fmt::Result;

    /// Stop writing a binary operation
    fn end_operation(&mut self, op: Operator, grouped: bool) -> fmt::Result;

    /// Separate the two operands of the ongoing operation
    fn sep_operation(&mut self, op: Operator) -> fmt::Result;

    /// Write a variable which can be negated
    fn write_literal(&mut self, name: &str, value: bool) -> fmt::Result {
        if !value {
            self.start_negation(true)?;
        }
        self.write_variable(name)?;
        if !value {
            self.end_negation(true)?;
        }
        Ok(())
    }

    /// Write a full pattern
    ///
    /// In absence of specialized operation, this functions emulate a set of operations joining the variables in the pattern:
    /// a conjunction of literals when `value` is true, a disjunction of the opposite literals otherwise.
    fn write_pattern(
        &mut self,
        p: &Pattern,
        variables: &VariableSet,
        value: bool,
        grouped: bool,
    ) -> fmt::Result {
        if p.is_free_pattern() {
            return self.write_bool(value);
        }

        let op = match value {
            true => Operator::And,
            false => Operator::Or,
        };

        self.start_operation(op, grouped)?;
        let mut first = true;
        for (var, val) in p.iter_fixed_values() {
            match first {
                true => first = false,
                false => self.sep_operation(op)?,
            }
            match variables.name(var) {
                Some(name) => self.write_literal(name, val == value)?,
                None => self.write_literal(&var.to_string(), val == value)?,
            }
        }
        self.end_operation(op, grouped)
    }
}

impl FormatterConfig<'_> {
    pub fn operator(&self, op: Operator) -> &str {
        match op {
            Operator::Not => self.s_not,
            Operator::And => self.s_and,
            Operator::Or => self.s_or,
            Operator::Xor => self.s_xor,
            Operator::Nand => self.s_nand,
            Operator::Nor => self.s_nor,
            Operator::Implies => self.s_implies,
            Operator::Iff => self.s_iff,
        }
    }

    pub fn infix<'a, T: Formula + ?Sized>(&'a self, formula: &'a T) -> InfixFormatted<'a, T> {
        InfixFormatted { formula, cfg: self }
    }
}

pub struct InfixFormatter<'a, 'b>(&'a mut fmt::Formatter<'b>, &'a FormatterConfig<'a>);
pub struct PrefixFormatter<'a, 'b>(InfixFormatter<'a, 'b>);

impl<'a, 'b> InfixFormatter<'a, 'b> {
    pub fn new(f: &'a mut fmt::Formatter<'b>) -> Self {
        Self(f, &UNICODE_FMT_CFG)
    }
    pub fn with(f: &'a mut fmt::Formatter<'b>, cfg: &'a FormatterConfig) -> Self {
        Self(f, cfg)
    }
}

impl<'a, 'b> PrefixFormatter<'a, 'b> {
    pub fn new(f: &'a mut fmt::Formatter<'b>) -> Self {
        Self(InfixFormatter::new(f))
    }
    pub fn with(f: &'a mut fmt::Formatter<'b>, cfg: &'a FormatterConfig) -> Self {
        Self(InfixFormatter::with(f, cfg))
    }
}

impl ExprFormatter for InfixFormatter<'_, '_> {
    fn write_fmt(&mut self, args: fmt::Arguments) -> fmt::Result {
        fmt::Formatter::write_fmt(self.0, args)
    }

    fn write_bool(&mut self, b: bool) -> fmt::Result {
        match b {
            false => write!(self, "0"),
            true => write!(self, "1"),
        }
    }

    fn write_variable(&mut self, name: &str) -> fmt::Result {
        write!(self, "{}", name)
    }

    fn start_negation(&mut self, bare: bool) -> fmt::Result {
        write!(self, "{}", self.1.s_not)?;
        match bare {
            true => Ok(()),
            false => write!(self, "("),
        }
    }

    fn end_negation(&mut self, bare: bool) -> fmt::Result {
        match bare {
            true => Ok(()),
            false => write!(self, ")"),
        }
    }

    fn start_operation(&mut self, _op: Operator, grouped: bool) -> fmt::Result {
        match grouped {
            true => write!(self, "("),
            false => Ok(()),
        }
    }

    fn end_operation(&mut self, _op: Operator, grouped: bool) -> fmt::Result {
        match grouped {
            true => write!(self, ")"),
            false => Ok(()),
        }
    }

    fn sep_operation(&mut self, op: Operator) -> fmt::Result {
        write!(self, " {} ", self.1.operator(op))
    }
}

pub struct PrefixFormatted<'a, T: Formula + ?Sized>(pub &'a T);

impl<T: Formula + ?Sized> fmt::Display for PrefixFormatted<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut ef = PrefixFormatter::new(f);
        self.0.fmt_with(&mut ef)
    }
}

impl<T: Formula + ?Sized> fmt::Display for InfixFormatted<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut ef = InfixFormatter::with(f, self.cfg);
        self.formula.fmt_with(&mut ef)
    }
}

impl ExprFormatter for PrefixFormatter<'_, '_> {
    delegate! {
        to self.0 {
            fn write_fmt(&mut self, args: fmt::Arguments) -> fmt::Result;
            fn write_bool(&mut self, b: bool) -> fmt::Result;
            fn write_variable(&mut self, name: &str) -> fmt::Result;
        }
    }

    fn start_negation(&mut self, _bare: bool) -> fmt::Result {
        write!(self, "({} ", self.0 .1.s_not)
    }

    fn end_negation(&mut self, _bare: bool) -> fmt::Result {
        write!(self, ")")
    }

    fn start_operation(&mut self, op: Operator, _grouped: bool) -> fmt::Result {
        write!(self, "({} ", self.0 .1.operator(op))
    }

    fn end_operation(&mut self, _op: Operator, _grouped: bool) -> fmt::Result {
        write!(self, ")")
    }

    fn sep_operation(&mut self, _op: Operator) -> fmt::Result {
        write!(self, " ")
    }
}
