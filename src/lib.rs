use resolve::{Resolve, ResolveError, ResolvedTrace, TraceResolver};
use thiserror::Error;

pub mod parser;
pub mod resolve;

pub type TraceResult<T> = Result<T, TraceError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TraceError {
    #[error("Parsing Error :\n{0}")]
    ParsingError(String),

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

impl TraceError {
    pub fn as_resolve(&self) -> Option<&ResolveError> {
        match self {
            TraceError::Resolve(err) => Some(err),
            TraceError::ParsingError(_) => None,
        }
    }
}

/// Parses a textual trace dump and resolves it against the traced chain.
pub fn resolve_dump(source: &str, resolver: &TraceResolver) -> TraceResult<ResolvedTrace> {
    let raw = parser::parse_dump(source)?;
    let trace = resolver.resolve(&raw)?;
    Ok(trace)
}
