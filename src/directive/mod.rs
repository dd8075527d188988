//! Directive templates
//!
//! - `grammar` - tokenizer for `%(key)flag width.precision type` tokens
//! - `compiler` - rewrites templates into console-style positional templates

pub mod compiler;
pub mod grammar;

pub use compiler::{compile, native_spec, CompiledTemplate};
pub use grammar::{directives, tokenize, Directive, DirectiveKind, Segment, Tokenizer};
