use super::io::{PResult, Span};
use nom::{
    branch::alt,
    character::complete::{char, digit0, digit1, one_of},
    combinator::{map_res, opt, recognize, value},
    sequence::{pair, tuple},
    IResult,
};
use nom_supreme::{error::ErrorTree, tag::complete::tag};
use num_traits::Num;

fn exponent(input: Span) -> IResult<Span, Span> {
    recognize(tuple((one_of("eE"), opt(one_of("+-")), digit1)))(input)
}

fn float(input: Span) -> IResult<Span, Span> {
    recognize(pair(
        opt(char('-')),
        alt((
            // .42 and .42e1
            recognize(tuple((char('.'), digit1, opt(exponent)))),
            // 42. and 42.42e1
            recognize(tuple((digit1, char('.'), digit0, opt(exponent)))),
            // 42e1
            recognize(pair(digit1, exponent)),
        )),
    ))(input)
}

fn _parse_float(input: Span) -> IResult<Span, f64> {
    map_res(float, |value: Span| f64::from_str_radix(value.fragment(), 10))(input)
}

fn parse_decimal_float(input: Span) -> PResult<f64> {
    match _parse_float(input) {
        Ok((remainder, value)) => Ok((remainder, value)),
        Err(nom::Err::Incomplete(e)) => Err(nom::Err::Incomplete(e)),
        Err(nom::Err::Error(e)) => Err(nom::Err::Error(ErrorTree::Base {
            location: e.input,
            kind: nom_supreme::error::BaseErrorKind::Kind(e.code),
        })),
        Err(nom::Err::Failure(e)) => Err(nom::Err::Failure(ErrorTree::Base {
            location: e.input,
            kind: nom_supreme::error::BaseErrorKind::Kind(e.code),
        })),
    }
}

/// Doubles as the JVM prints them, non-finite values included.
pub fn parse_float(input: Span) -> PResult<f64> {
    alt((
        value(f64::NAN, tag("NaN")),
        value(f64::INFINITY, tag("Infinity")),
        value(f64::NEG_INFINITY, tag("-Infinity")),
        parse_decimal_float,
    ))(input)
}

pub fn parse_number(input: Span) -> PResult<i64> {
    map_res(recognize(pair(opt(char('-')), digit1)), |value: Span| {
        value.fragment().parse::<i64>()
    })(input)
}

pub fn parse_id(input: Span) -> PResult<u64> {
    map_res(digit1, |value: Span| value.fragment().parse::<u64>())(input)
}
