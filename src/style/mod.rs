//! Dynamic field styling
//!
//! - `rules` - per-field, per-value style rules with `common` defaults
//! - `color` - palette allocation and per-value memoization
//! - `capability` - whether the sink renders styles at all

pub mod capability;
pub mod color;
pub mod rules;

pub use capability::StylingCapability;
pub use color::{ColorAllocator, ColorStore};
pub use rules::{StyleProps, StyleRuleSet};

use crate::constants::COLOR_PLACEHOLDER;

/// Resolves the style string for a field value
///
/// Owns the color memo, so one resolver belongs to one formatter.
#[derive(Debug)]
pub struct StyleResolver {
    rules: StyleRuleSet,
    capability: StylingCapability,
    colors: ColorStore,
}

impl StyleResolver {
    pub fn new(rules: StyleRuleSet, capability: StylingCapability) -> Self {
        Self {
            rules,
            capability,
            colors: ColorStore::new(),
        }
    }

    pub fn capability(&self) -> StylingCapability {
        self.capability
    }

    pub fn rules(&self) -> &StyleRuleSet {
        &self.rules
    }

    /// Style string for `key` = `value`, `None` when unstyled
    ///
    /// Properties are serialized as concatenated `prop:value;` pairs.
    /// `%(color)` inside a value is replaced with the color memoized for
    /// `(key, value)`. Always `None` when styling is unsupported.
    pub fn resolve_style(&mut self, key: &str, value: &str) -> Option<String> {
        if !self.capability.is_supported() {
            return None;
        }
        let rule = self.rules.rule(key, value)?;
        let complete = self.rules.merged(rule);

        let mut styling = String::new();
        for (prop, style_value) in &complete {
            styling.push_str(prop);
            styling.push(':');
            if style_value.contains(COLOR_PLACEHOLDER) {
                let color = self.colors.color_for(key, value);
                styling.push_str(&style_value.replacen(COLOR_PLACEHOLDER, &color, 1));
            } else {
                styling.push_str(style_value);
            }
            styling.push(';');
        }

        if styling.is_empty() {
            None
        } else {
            Some(styling)
        }
    }
}
