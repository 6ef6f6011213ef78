//! Lisp Reader Example
//!
//! Reads S-expressions: integers, symbols, strings, quoted forms and nested
//! lists. The grammar is recursive through a `Ref`, and malformed input is
//! reported at the deepest point any rule reached.
//!
//! Run with: cargo run --example lisp -- "(define (sq x) (* x x))"

use combinol::prelude::*;
use std::fmt;

/// S-expression value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sexp {
    /// Integer literal
    Int(i64),
    /// Symbol (identifier or operator)
    Symbol(String),
    /// String literal
    Str(String),
    /// Quoted form: 'x
    Quote(Box<Sexp>),
    /// Parenthesized list
    List(Vec<Sexp>),
}

impl fmt::Display for Sexp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sexp::Int(n) => write!(f, "{}", n),
            Sexp::Symbol(s) => write!(f, "{}", s),
            Sexp::Str(s) => write!(f, "{:?}", s),
            Sexp::Quote(inner) => write!(f, "'{}", inner),
            Sexp::List(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, ")")
            }
        }
    }
}

/// A token followed by any amount of whitespace
fn lexeme<T: 'static>(parser: Parser<T>) -> Parser<T> {
    parser.skip(optional_whitespace())
}

/// Build the reader: a whole program is a sequence of expressions
pub fn reader() -> Result<Parser<Vec<Sexp>>, GrammarError> {
    let expr: Ref<Sexp> = Ref::new();

    // Overflow is reported past the digits, not where the number starts
    let int = regex("-?[0-9]+")?
        .described_as("an integer")
        .chain(|digits| match digits.parse::<i64>() {
            Ok(n) => succeed(Sexp::Int(n)),
            Err(_) => fail("an integer that fits in 64 bits"),
        });

    let symbol = regex(r"[a-zA-Z_+\-*/=<>!?][a-zA-Z0-9_+\-*/=<>!?]*")?
        .map(Sexp::Symbol)
        .described_as("a symbol");

    let string = none_of("\"")
        .many()
        .wrap(literal("\""), literal("\""))
        .map(|chars| Sexp::Str(chars.into_iter().collect()));

    let list = expr
        .parser()
        .many()
        .wrap(lexeme(literal("(")), literal(")"))
        .map(Sexp::List);

    let quote = literal("'")
        .then(expr.parser())
        .map(|inner| Sexp::Quote(Box::new(inner)));

    // Integers before symbols so "-5" reads as a number
    expr.set(lexeme(alternative(vec![int, symbol, string, list, quote])))?;

    Ok(optional_whitespace().then(expr.parser().many()))
}

#[allow(dead_code)]
fn main() {
    let input = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "(define (square x) (* x x)) '(1 -2 \"three\")".to_string());

    let reader = match reader() {
        Ok(reader) => reader,
        Err(e) => {
            eprintln!("grammar error: {}", e);
            std::process::exit(2);
        }
    };

    match reader.parse(&input) {
        Ok(forms) => {
            for form in forms {
                println!("{}", form);
            }
        }
        Err(failure) => {
            eprintln!("{}", failure.format(&input));
            std::process::exit(1);
        }
    }
}
