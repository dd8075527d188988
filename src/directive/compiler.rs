//! Template compilation
//!
//! Rewrites a directive template into a positional, console-style template
//! (`%s`, `%5.2f`, `%o`, ...) plus the directives feeding its placeholders.

use super::grammar::{Directive, DirectiveKind, Segment, Tokenizer};

/// Native template plus the directives feeding its placeholders, in order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompiledTemplate {
    pub template: String,
    pub directives: Vec<Directive>,
}

/// Compile a directive template
///
/// Directives with an unknown type produce no placeholder and are left out
/// of the directive list, so the output simply omits them.
pub fn compile(template: &str) -> CompiledTemplate {
    let mut compiled = CompiledTemplate {
        template: String::with_capacity(template.len()),
        directives: Vec::new(),
    };

    for segment in Tokenizer::new(template) {
        match segment {
            Segment::Text(text) => compiled.template.push_str(text),
            Segment::Directive(directive) => {
                if let Some(spec) = native_spec(&directive) {
                    compiled.template.push_str(&spec);
                    compiled.directives.push(directive);
                }
            }
        }
    }

    compiled
}

/// Console placeholder for one directive, `None` for unknown types
pub fn native_spec(directive: &Directive) -> Option<String> {
    if directive.is_asctime() {
        return Some("%s".to_string());
    }
    match directive.kind {
        DirectiveKind::String => Some("%s".to_string()),
        DirectiveKind::Int => Some(numeric_spec(directive, 'd')),
        DirectiveKind::Float => Some(numeric_spec(directive, 'f')),
        DirectiveKind::Object => Some("%o".to_string()),
        DirectiveKind::Inspect => Some("%O".to_string()),
        DirectiveKind::Unknown(_) => None,
    }
}

fn numeric_spec(directive: &Directive, conversion: char) -> String {
    let mut spec = String::from("%");
    if let Some(width) = directive.width {
        spec.push_str(&width.to_string());
    }
    if let Some(precision) = directive.precision {
        spec.push('.');
        spec.push_str(&precision.to_string());
    }
    spec.push(conversion);
    spec
}
