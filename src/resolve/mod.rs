pub mod error;
pub mod trace;
pub mod value;

pub use error::{ResolveError, ResolveErrorKind};
pub use trace::{CallKind, CallTrace, ResolvedCall, ResolvedTrace, TraceElement, TraceResolver};
pub use value::{TraceValue, ValueType};

pub trait Resolve {
    type Output;

    fn resolve(&self, raw: &TraceValue) -> Result<Self::Output, ResolveError>;
}
