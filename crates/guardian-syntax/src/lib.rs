pub mod error;
pub mod expr;
pub mod factory;
pub mod stmt;
pub mod token;

pub use error::*;
pub use expr::*;
pub use stmt::*;
pub use token::*;
