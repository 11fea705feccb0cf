//! Pattern parsers using chumsky

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;

use crate::error::ParseError;
use crate::parser::ast::*;
use crate::parser::lexer::Token;

/// Parse a pattern in the plain syntax: `#slot` placeholders, everything else literal
pub fn parse_plain(input: &str) -> Result<Pattern, Vec<ParseError>> {
    let len = input.len();
    let token_iter = crate::parser::lexer::lex(input).map(|(tok, span)| (tok, span.into()));
    let token_stream = Stream::from_iter(token_iter).map((len..len).into(), |(t, s): (_, _)| (t, s));

    plain_parser()
        .parse(token_stream)
        .into_result()
        .map(Pattern::new)
        .map_err(|errs| errs.into_iter().map(|e| e.into()).collect())
}

/// Parse a pattern in the alternation syntax: `#slot`, `{#slot|fallback}` and escapes
pub fn parse_alternation(input: &str) -> Result<Pattern, Vec<ParseError>> {
    let len = input.len();
    let token_iter = crate::parser::lexer::lex(input).map(|(tok, span)| (tok, span.into()));
    let token_stream = Stream::from_iter(token_iter).map((len..len).into(), |(t, s): (_, _)| (t, s));

    alternation_parser()
        .parse(token_stream)
        .into_result()
        .map(Pattern::new)
        .map_err(|errs| errs.into_iter().map(|e| e.into()).collect())
}

fn plain_parser<'a, I>(
) -> impl Parser<'a, I, Vec<Segment>, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    // Only slots are special; any other token is kept as its source text
    let segment = select! {
        Token::Slot(s) => Segment::placeholder(s),
        Token::Hash => Segment::literal("#"),
        Token::BraceOpen => Segment::literal("{"),
        Token::BraceClose => Segment::literal("}"),
        Token::Pipe => Segment::literal("|"),
        Token::Escaped(c) => Segment::Literal(Token::Escaped(c).source_text()),
        Token::Backslash => Segment::literal("\\"),
        Token::Text(s) => Segment::Literal(s),
    };

    segment.repeated().collect::<Vec<_>>().then_ignore(end())
}

fn alternation_parser<'a, I>(
) -> impl Parser<'a, I, Vec<Segment>, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    let slot = select! {
        Token::Slot(s) => s,
    };

    // Text that is literal in every position
    let literal_text = select! {
        Token::Text(s) => s,
        Token::Escaped(c) => c.to_string(),
        Token::Hash => "#".to_string(),
        Token::Backslash => "\\".to_string(),
    };

    let fallback = literal_text
        .clone()
        .repeated()
        .collect::<Vec<_>>()
        .map(|parts| parts.concat());

    // {#slot} or {#slot|fallback}
    let group = slot
        .clone()
        .then(just(Token::Pipe).ignore_then(fallback).or_not())
        .delimited_by(just(Token::BraceOpen), just(Token::BraceClose))
        .map(|(slot, fallback)| Segment::Placeholder { slot, fallback });

    let segment = choice((
        group,
        slot.map(|slot| Segment::Placeholder {
            slot,
            fallback: None,
        }),
        literal_text.map(Segment::Literal),
    ));

    segment.repeated().collect::<Vec<_>>().then_ignore(end())
}
