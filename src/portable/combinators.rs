//! Combinators over several parsers
//!
//! Sequencing threads the offset through each child and the failure context
//! through [`Furthest::merge`]; alternation restarts every child at the same
//! offset and keeps the deepest failure among all branches.

use super::{
    parser::Parser,
    reply::{Furthest, Outcome, Reply},
};
use std::sync::Arc;

/// Run each parser in order and collect their values
///
/// A final success still carries the deepest failure seen along the way,
/// so an enclosing alternative can report it if it backtracks later.
pub fn sequence<T: 'static>(parsers: Vec<Parser<T>>) -> Parser<Vec<T>> {
    Parser::from_fn(move |input, start| {
        let mut values = Vec::with_capacity(parsers.len());
        let mut context = Furthest::none();
        let mut index = start;

        for parser in &parsers {
            let reply = parser.run(input, index).merge(context);
            context = reply.furthest;
            match reply.outcome {
                Outcome::Success { index: next, value } => {
                    index = next;
                    values.push(value);
                }
                Outcome::Failure => return Reply::failed(context),
            }
        }

        Reply {
            outcome: Outcome::Success {
                index,
                value: values,
            },
            furthest: context,
        }
    })
}

/// Try each parser from the same offset; the first success wins
///
/// When every branch fails the reply carries the deepest failure among
/// all of them. Put longer or more specific branches first.
pub fn alternative<T: 'static>(parsers: Vec<Parser<T>>) -> Parser<T> {
    let empty: Arc<str> = Arc::from("zero alternatives");
    Parser::from_fn(move |input, index| {
        if parsers.is_empty() {
            return Reply::failure(index, Arc::clone(&empty));
        }

        let mut context = Furthest::none();
        for parser in &parsers {
            let reply = parser.run(input, index).merge(context);
            if reply.is_success() {
                return reply;
            }
            context = reply.furthest;
        }
        Reply::failed(context)
    })
}

/// Run two parsers in order, pairing their values
pub fn seq2<A: 'static, B: 'static>(first: Parser<A>, second: Parser<B>) -> Parser<(A, B)> {
    Parser::from_fn(move |input, index| {
        let a = first.run(input, index);
        match a.outcome {
            Outcome::Success { index, value: va } => {
                let b = second.run(input, index).merge(a.furthest);
                b.map(|vb| (va, vb))
            }
            Outcome::Failure => Reply::failed(a.furthest),
        }
    })
}

/// Run three parsers in order
pub fn seq3<A: 'static, B: 'static, C: 'static>(
    first: Parser<A>,
    second: Parser<B>,
    third: Parser<C>,
) -> Parser<(A, B, C)> {
    seq2(seq2(first, second), third).map(|((a, b), c)| (a, b, c))
}

/// Run four parsers in order
pub fn seq4<A: 'static, B: 'static, C: 'static, D: 'static>(
    first: Parser<A>,
    second: Parser<B>,
    third: Parser<C>,
    fourth: Parser<D>,
) -> Parser<(A, B, C, D)> {
    seq2(seq3(first, second, third), fourth).map(|((a, b, c), d)| (a, b, c, d))
}

/// One or more `item`s separated by `sep`
pub fn sep_by1<T: 'static, S: 'static>(item: Parser<T>, sep: Parser<S>) -> Parser<Vec<T>> {
    seq2(item.clone(), sep.then(item).many()).map(|(first, rest)| {
        let mut items = Vec::with_capacity(rest.len() + 1);
        items.push(first);
        items.extend(rest);
        items
    })
}

/// Zero or more `item`s separated by `sep`; never fails
pub fn sep_by<T: 'static, S: 'static>(item: Parser<T>, sep: Parser<S>) -> Parser<Vec<T>> {
    sep_by1(item, sep).optional().map(Option::unwrap_or_default)
}

/// Succeed without consuming when `parser` would match here
pub fn lookahead<T: 'static>(parser: Parser<T>) -> Parser<()> {
    Parser::from_fn(move |input, index| {
        let reply = parser.run(input, index);
        match reply.outcome {
            Outcome::Success { .. } => Reply::success(index, ()).merge(reply.furthest),
            Outcome::Failure => Reply::failed(reply.furthest),
        }
    })
}

/// Succeed without consuming when `parser` does not match here
///
/// A match fails with `not '<matched text>'`. The failure of `parser`
/// itself is not recorded, since it is the desired outcome.
pub fn not_followed_by<T: 'static>(parser: Parser<T>) -> Parser<()> {
    Parser::from_fn(move |input, index| {
        let reply = parser.run(input, index);
        match reply.outcome {
            Outcome::Success { index: end, .. } => {
                let matched = &input[index..end];
                Reply::failure(index, Arc::from(format!("not '{}'", matched)))
            }
            Outcome::Failure => Reply::success(index, ()),
        }
    })
}
