pub mod ast;
pub mod bindings;
pub mod builder;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod placeholder;
pub mod render;
pub mod syntax;
pub mod template;
pub mod token;

pub use ast::Node;
pub use bindings::Bindings;
pub use error::SigilError;
pub use parser::parse;
pub use render::{render, render_pretty};
pub use template::JsonTemplate;
