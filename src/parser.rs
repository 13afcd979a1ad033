//! Infix boolean expression parser.
//!
//! Two stages, both written with `chumsky` combinators:
//! 1) lexing the source text into a spanned [`Token`] stream;
//! 2) parsing the token slice into an [`Expr`].
//!
//! # Grammar
//!
//! From the tightest to the loosest binding:
//!
//! ```text
//! factor     := ('~' | '!')* (IDENT | '(' expression ')')
//! term       := factor ('^' factor)*
//! expression := term (('&' | '|') '~'? term)*
//! ```
//!
//! `&~` and `|~` are single NAND / NOR operators. Everything is
//! left-associative, so `A&B&~C` reads as `NAND(AND(A, B), C)`. Only `~` forms
//! the NAND/NOR sugar; `A&!B` is always `AND(A, NOT(B))`.
//!
//! Parenthesis nesting is capped at [`MAX_NESTING`] and the depth of the
//! resulting tree at [`MAX_DEPTH`]; deeper inputs fail with
//! [`SyntaxErrorKind::TooDeep`].
//!
//! # Examples
//!
//! ```
//! use robdd_equiv::ast::Expr;
//! use robdd_equiv::parser::parse;
//!
//! let e = parse("A &~ (B ^ C)").unwrap();
//! assert_eq!(e, Expr::nand(Expr::var("A"), Expr::xor(Expr::var("B"), Expr::var("C"))));
//! ```

use std::collections::BTreeSet;
use std::fmt::{self, Display, Formatter};

use chumsky::{input::ValueInput, prelude::*};
use log::debug;

use crate::ast::{BinaryOp, Expr};
use crate::error::{Error, Result, SyntaxErrorKind};

pub type Span = SimpleSpan;
pub type Spanned<T> = (T, Span);

/// Deepest accepted parenthesis nesting.
pub const MAX_NESTING: usize = 64;

/// Deepest accepted expression tree, counted in connectives from the root.
pub const MAX_DEPTH: usize = 1024;

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum Token {
    Ident(String),
    /// `~`
    Tilde,
    /// `!`
    Bang,
    /// `&`
    And,
    /// `|`
    Or,
    /// `^`
    Caret,
    LParen,
    RParen,
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Token::Ident(name) => write!(f, "{}", name),
            Token::Tilde => write!(f, "~"),
            Token::Bang => write!(f, "!"),
            Token::And => write!(f, "&"),
            Token::Or => write!(f, "|"),
            Token::Caret => write!(f, "^"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
        }
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic()
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric()
}

// ---------------- Lexer ----------------

fn lexer<'src>() -> impl Parser<'src, &'src str, Vec<Spanned<Token>>, extra::Err<Rich<'src, char>>> {
    let ident = any()
        .filter(|c: &char| is_ident_start(*c))
        .then(any().filter(|c: &char| is_ident_continue(*c)).repeated())
        .to_slice()
        .map(|s: &str| Token::Ident(s.to_string()));

    let punct = choice((
        just('~').to(Token::Tilde),
        just('!').to(Token::Bang),
        just('&').to(Token::And),
        just('|').to(Token::Or),
        just('^').to(Token::Caret),
        just('(').to(Token::LParen),
        just(')').to(Token::RParen),
    ));

    ident
        .or(punct)
        .map_with(|tok, e| (tok, e.span()))
        .padded()
        .repeated()
        .collect()
        .then_ignore(end())
}

/// Split `text` into tokens with their byte spans, skipping whitespace.
pub fn tokenize(text: &str) -> Result<Vec<Spanned<Token>>> {
    lexer().parse(text).into_result().map_err(|errors| {
        let Some(err) = errors.into_iter().next() else {
            return Error::syntax(text.len(), SyntaxErrorKind::UnexpectedEnd { expected: OPERAND });
        };
        let position = err.span().start;
        match err.found() {
            Some(&c) => Error::syntax(position, SyntaxErrorKind::InvalidCharacter(c)),
            None => Error::syntax(position, SyntaxErrorKind::UnexpectedEnd { expected: OPERAND }),
        }
    })
}

// ---------------- Parser over tokens ----------------

/// Parser configuration.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ParseOptions {
    /// Read `&~` / `|~` as NAND / NOR (default: `true`).
    pub nand_nor_sugar: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { nand_nor_sugar: true }
    }
}

impl ParseOptions {
    pub fn with_nand_nor_sugar(mut self, enabled: bool) -> Self {
        self.nand_nor_sugar = enabled;
        self
    }
}

const OPERAND: &str = "a variable, `(`, `~` or `!`";

/// A parsed subtree with its depth, or the token index where [`MAX_DEPTH`] was crossed.
///
/// Once the limit is crossed nothing deeper is built, so an over-deep input
/// never materializes as an over-deep [`Expr`].
#[derive(Debug, Clone)]
enum Tree {
    Built { expr: Expr, depth: usize },
    TooDeep { at: usize },
}

impl Tree {
    fn leaf(expr: Expr) -> Self {
        Tree::Built { expr, depth: 0 }
    }

    fn not(self, at: usize) -> Self {
        match self {
            Tree::Built { expr, depth } if depth < MAX_DEPTH => Tree::Built {
                expr: Expr::not(expr),
                depth: depth + 1,
            },
            Tree::Built { .. } => Tree::TooDeep { at },
            too_deep => too_deep,
        }
    }

    fn binary(op: BinaryOp, lhs: Self, rhs: Self, at: usize) -> Self {
        match (lhs, rhs) {
            (Tree::TooDeep { at }, _) | (_, Tree::TooDeep { at }) => Tree::TooDeep { at },
            (Tree::Built { expr: a, depth: da }, Tree::Built { expr: b, depth: db }) => {
                let depth = da.max(db) + 1;
                if depth > MAX_DEPTH {
                    Tree::TooDeep { at }
                } else {
                    Tree::Built {
                        expr: Expr::binary(op, a, b),
                        depth,
                    }
                }
            }
        }
    }
}

fn expression<'tokens, I>(options: ParseOptions) -> impl Parser<'tokens, I, Tree, extra::Err<Rich<'tokens, Token, Span>>> + Clone
where
    I: ValueInput<'tokens, Token = Token, Span = Span>,
{
    let sugar = options.nand_nor_sugar;

    recursive(move |expression| {
        let ident = select! { Token::Ident(name) => Tree::leaf(Expr::var(name)) };

        let atom = ident.or(expression.delimited_by(just(Token::LParen), just(Token::RParen)));

        // Prefix negation, any number of times.
        let factor = choice((just(Token::Tilde), just(Token::Bang)))
            .map_with(|_, e| { let span: Span = e.span(); span.start })
            .repeated()
            .foldr(atom, |at, tree: Tree| tree.not(at));

        let term = factor.clone().foldl(
            just(Token::Caret)
                .map_with(|_, e| { let span: Span = e.span(); span.start })
                .then(factor)
                .repeated(),
            |lhs, (at, rhs)| Tree::binary(BinaryOp::Xor, lhs, rhs, at),
        );

        // With the sugar disabled, a `~` after `&`/`|` is left to the operand.
        let tilde = just(Token::Tilde).filter(move |_| sugar).or_not();
        let connective = select! { Token::And => BinaryOp::And, Token::Or => BinaryOp::Or }
            .map_with(|op, e| { let span: Span = e.span(); (op, span.start) })
            .then(tilde)
            .map(|((op, at), tilde)| match (op, tilde) {
                (BinaryOp::And, Some(_)) => (BinaryOp::Nand, at),
                (BinaryOp::Or, Some(_)) => (BinaryOp::Nor, at),
                (op, _) => (op, at),
            });

        term.clone()
            .foldl(connective.then(term).repeated(), |lhs, ((op, at), rhs)| {
                Tree::binary(op, lhs, rhs, at)
            })
    })
}

/// Byte offset of the token at `index`, or the end of the source past the last one.
fn byte_position(tokens: &[Spanned<Token>], index: usize, end: usize) -> usize {
    tokens.get(index).map_or(end, |(_, span)| span.start)
}

/// Reject parenthesis nesting beyond [`MAX_NESTING`] before the recursive grammar sees it.
fn check_nesting(tokens: &[Spanned<Token>]) -> Result<()> {
    let mut depth = 0usize;
    for (token, span) in tokens {
        match token {
            Token::LParen => {
                depth += 1;
                if depth > MAX_NESTING {
                    return Err(Error::syntax(span.start, SyntaxErrorKind::TooDeep { limit: MAX_NESTING }));
                }
            }
            Token::RParen => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    Ok(())
}

/// Turn the first parser error into a [`SyntaxErrorKind`], judged by where it happened.
///
/// After an operand (an identifier or `)`), only a connective, a closing
/// parenthesis or the end of input may follow; anywhere else an operand is
/// expected.
fn classify_error(tokens: &[Spanned<Token>], end: usize, errors: Vec<Rich<'_, Token, Span>>) -> Error {
    let index = errors.first().map_or(tokens.len(), |err| err.span().start);

    let after_operand = index
        .checked_sub(1)
        .and_then(|i| tokens.get(i))
        .is_some_and(|(token, _)| matches!(token, Token::Ident(_) | Token::RParen));

    let mut open = Vec::new();
    for (token, span) in tokens.iter().take(index) {
        match token {
            Token::LParen => open.push(span.start),
            Token::RParen => {
                open.pop();
            }
            _ => {}
        }
    }

    let kind = match (tokens.get(index), open.last()) {
        (None, Some(&paren)) if after_operand => return Error::syntax(paren, SyntaxErrorKind::UnmatchedParen),
        (None, _) => SyntaxErrorKind::UnexpectedEnd { expected: OPERAND },
        (Some((token, _)), Some(_)) if after_operand => SyntaxErrorKind::UnexpectedToken {
            found: token.to_string(),
            expected: "`)`",
        },
        (Some((token, _)), None) if after_operand => SyntaxErrorKind::TrailingInput {
            found: token.to_string(),
        },
        (Some((token, _)), _) => SyntaxErrorKind::UnexpectedToken {
            found: token.to_string(),
            expected: OPERAND,
        },
    };
    Error::syntax(byte_position(tokens, index, end), kind)
}

/// Parse an infix boolean expression with the default options.
pub fn parse(text: &str) -> Result<Expr> {
    parse_with(text, ParseOptions::default())
}

/// Parse an infix boolean expression.
pub fn parse_with(text: &str, options: ParseOptions) -> Result<Expr> {
    debug!("parse(text = {:?}, options = {:?})", text, options);
    let tokens = tokenize(text)?;
    check_nesting(&tokens)?;

    let plain: Vec<Token> = tokens.iter().map(|(token, _)| token.clone()).collect();
    let tree = expression(options)
        .then_ignore(end())
        .parse(plain.as_slice())
        .into_result()
        .map_err(|errors| classify_error(&tokens, text.len(), errors))?;

    match tree {
        Tree::Built { expr, .. } => Ok(expr),
        Tree::TooDeep { at } => Err(Error::syntax(
            byte_position(&tokens, at, text.len()),
            SyntaxErrorKind::TooDeep { limit: MAX_DEPTH },
        )),
    }
}

/// Sorted, deduplicated identifiers occurring in `text`.
///
/// This fixes the global variable order used to build diagrams. Characters
/// that cannot start an identifier are skipped, so this never fails.
pub fn extract_variables(text: &str) -> Vec<String> {
    let mut vars = BTreeSet::new();
    let mut chars = text.char_indices().peekable();
    while let Some((start, c)) = chars.next() {
        if !is_ident_continue(c) {
            continue;
        }
        let mut end = start + c.len_utf8();
        while let Some(&(i, next)) = chars.peek() {
            if !is_ident_continue(next) {
                break;
            }
            end = i + next.len_utf8();
            chars.next();
        }
        // A run starting with a digit is skipped up to its first letter.
        if let Some(offset) = text[start..end].find(is_ident_start) {
            vars.insert(&text[start + offset..end]);
        }
    }
    vars.into_iter().map(str::to_string).collect()
}
