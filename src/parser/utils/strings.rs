use nom::{
    bytes::complete::take_while,
    character::complete::{multispace0, satisfy},
    combinator::{map, recognize, value},
    sequence::{delimited, pair},
    Parser,
};
use nom_supreme::{tag::complete::tag, ParserExt};

use super::io::{PError, PResult, Span};

pub mod eater {
    use super::*;

    pub fn ws<'input, F, O>(inner: F) -> impl FnMut(Span<'input>) -> PResult<O>
    where
        F: Parser<Span<'input>, O, PError<'input>>,
    {
        delimited(multispace0, inner, multispace0)
    }
}

pub fn wst<'input>(lexem: &'static str) -> impl FnMut(Span<'input>) -> PResult<()> {
    move |input: Span| value((), eater::ws(tag(lexem)))(input)
}

/*
 * @desc Parse a qualified class name as printed next to an object id
 *
 * @grammar
 * [a-zA-Z_$][a-zA-Z_$0-9.]*
 */
pub fn parse_class_name(input: Span) -> PResult<String> {
    map(
        recognize(pair(
            satisfy(|c: char| c.is_ascii_alphabetic() || c == '_' || c == '$'),
            take_while(|c: char| c.is_ascii_alphanumeric() || matches!(c, '_' | '$' | '.')),
        )),
        |name: Span| name.fragment().to_string(),
    )
    .context("expected a class name")
    .parse(input)
}

/*
 * @desc Parse Escaped String and Character
 *
 * @grammar
 * String := ".*"
 * Character := '.'
 * Escape := \n \r \t \b \f \0 \\ \' \" \uXXXX
 */
pub mod string_parser {
    use crate::parser::utils::io::{PResult, Span};
    use nom::{
        branch::alt,
        bytes::complete::{is_not, take_while_m_n},
        character::complete::{char, none_of},
        combinator::{map, map_opt, map_res, value, verify},
        multi::fold_many0,
        sequence::{delimited, preceded},
        Parser,
    };

    fn unicode(input: Span) -> PResult<char> {
        let hex = preceded(
            char('u'),
            take_while_m_n(4, 4, |c: char| c.is_ascii_hexdigit()),
        );
        let code = map_res(hex, |hex: Span| u32::from_str_radix(hex.fragment(), 16));
        map_opt(code, std::char::from_u32).parse(input)
    }

    fn escaped_char(input: Span) -> PResult<char> {
        preceded(
            char('\\'),
            alt((
                unicode,
                value('\n', char('n')),
                value('\r', char('r')),
                value('\t', char('t')),
                value('\u{08}', char('b')),
                value('\u{0C}', char('f')),
                value('\0', char('0')),
                value('\\', char('\\')),
                value('\'', char('\'')),
                value('"', char('"')),
            )),
        )
        .parse(input)
    }

    enum Chunk<'input> {
        Literal(Span<'input>),
        Escaped(char),
    }

    fn chunk(input: Span) -> PResult<Chunk> {
        alt((
            map(
                verify(is_not("\"\\"), |s: &Span| !s.is_empty()),
                Chunk::Literal,
            ),
            map(escaped_char, Chunk::Escaped),
        ))
        .parse(input)
    }

    pub fn parse_string(input: Span) -> PResult<String> {
        let content = fold_many0(chunk, String::new, |mut string, chunk| {
            match chunk {
                Chunk::Literal(s) => string.push_str(s.fragment()),
                Chunk::Escaped(c) => string.push(c),
            }
            string
        });
        delimited(char('"'), content, char('"'))(input)
    }

    pub fn parse_char(input: Span) -> PResult<char> {
        delimited(char('\''), alt((escaped_char, none_of("'\\"))), char('\''))(input)
    }
}
