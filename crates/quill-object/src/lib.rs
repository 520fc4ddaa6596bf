//! The runtime value model and lexical environment for the Quill language.

mod env;
mod value;

pub use env::Environment;
pub use value::{FunctionValue, HashKey, Value};
