use nom::Finish;

use crate::{resolve::TraceValue, TraceError};

pub mod utils;
pub mod value;

use utils::{error::generate_error_report, io::Span};

/// Parses a whole trace dump; trailing input is an error.
pub fn parse_dump(source: &str) -> Result<TraceValue, TraceError> {
    match value::parse_value(Span::new(source)).finish() {
        Ok((remaining, value)) => {
            if !remaining.fragment().is_empty() {
                let error_report = format!(
                    "Parsing completed, but input remains at line {}, column {}: {:?}",
                    remaining.location_line(),
                    remaining.get_utf8_column(),
                    remaining.fragment()
                );
                Err(TraceError::ParsingError(error_report))
            } else {
                Ok(value)
            }
        }
        Err(e) => Err(TraceError::ParsingError(generate_error_report(source, &e))),
    }
}
