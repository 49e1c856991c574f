pub mod expr;
pub mod parser;

pub use parser::Parser;
