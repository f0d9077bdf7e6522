use nom::{
    branch::alt,
    combinator::{cut, map, opt, value},
    error::{ContextError, ErrorKind, ParseError},
    multi::many0,
    sequence::{pair, preceded},
    Parser,
};
use nom_supreme::{error::ErrorTree, tag::complete::tag, ParserExt};

use crate::resolve::TraceValue;

use super::utils::{
    io::{PResult, Span},
    lexem,
    numbers::{parse_float, parse_id, parse_number},
    strings::{
        eater, parse_class_name,
        string_parser::{parse_char, parse_string},
        wst,
    },
};

/// Arrays nested deeper than this are rejected.
pub const MAX_NESTING: usize = 64;

/*
 * @desc Parse a traced value as printed by the debugger
 *
 * @grammar
 * Value := null | true | false | Double | Int | Char | String | Object | Array
 * Object := ClassName @ Id
 * Array := \[ (Value (, Value)*)? \]
 */
pub fn parse_value(input: Span) -> PResult<TraceValue> {
    parse_nested(input, 0)
}

fn parse_nested<'input>(input: Span<'input>, depth: usize) -> PResult<'input, TraceValue> {
    alt((
        map(eater::ws(parse_object), |(class, id)| TraceValue::Object {
            class,
            id,
        }),
        value(TraceValue::Null, wst(lexem::NULL)),
        value(TraceValue::Bool(true), wst(lexem::TRUE)),
        value(TraceValue::Bool(false), wst(lexem::FALSE)),
        map(eater::ws(parse_float), TraceValue::Double),
        map(eater::ws(parse_number), TraceValue::Int),
        map(eater::ws(parse_char), TraceValue::Char),
        map(eater::ws(parse_string), TraceValue::Str),
        map(
            move |input: Span<'input>| parse_array(input, depth),
            TraceValue::Array,
        ),
    ))
    .context("expected a traced value")
    .parse(input)
}

fn parse_object(input: Span) -> PResult<(String, u64)> {
    pair(parse_class_name, preceded(tag(lexem::AT), parse_id))(input)
}

fn parse_array<'input>(input: Span<'input>, depth: usize) -> PResult<'input, Vec<TraceValue>> {
    let (rest, _) = wst(lexem::SQ_BRA_O)(input)?;
    if depth >= MAX_NESTING {
        return Err(nom::Err::Failure(ErrorTree::add_context(
            input,
            "arrays are nested too deep",
            ErrorTree::from_error_kind(input, ErrorKind::TooLarge),
        )));
    }

    let element = move |input: Span<'input>| parse_nested(input, depth + 1);
    let (rest, items) = map(
        opt(pair(
            element,
            many0(preceded(wst(lexem::COMA), cut(element))),
        )),
        |items| match items {
            Some((first, others)) => {
                let mut items = Vec::with_capacity(others.len() + 1);
                items.push(first);
                items.extend(others);
                items
            }
            None => Vec::new(),
        },
    )(rest)?;
    let (rest, _) = cut(wst(lexem::SQ_BRA_C))(rest)?;
    Ok((rest, items))
}
