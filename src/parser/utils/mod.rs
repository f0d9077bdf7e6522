pub mod error;
pub mod io;
pub mod lexem;
pub mod numbers;
pub mod strings;
