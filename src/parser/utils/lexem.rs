pub const NULL: &str = "null";
pub const TRUE: &str = "true";
pub const FALSE: &str = "false";

// PONCTUATION
pub const COMA: &str = ",";
pub const SQ_BRA_O: &str = "[";
pub const SQ_BRA_C: &str = "]";
pub const AT: &str = "@";
