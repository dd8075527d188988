//! Style rule sets
//!
//! Rules map a field key to per-value style properties, with `*` matching
//! any value and an optional `common` block merged underneath every hit:
//!
//! ```toml
//! [styles.common]
//! padding = "0 2px"
//!
//! [styles.levelname.ERROR]
//! color = "#cb2027"
//!
//! [styles.name."*"]
//! color = "%(color)"
//! ```

use crate::constants::WILDCARD;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// CSS-like property → value, in declaration order
pub type StyleProps = IndexMap<String, String>;

/// Style rules keyed by field, then by field value (or `*`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleRuleSet {
    /// Defaults applied under every matching rule
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub common: Option<StyleProps>,
    #[serde(flatten)]
    pub fields: IndexMap<String, IndexMap<String, StyleProps>>,
}

impl StyleRuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the rule for `key` = `value` (`*` for any value)
    pub fn with_rule<I, P, V>(mut self, key: &str, value: &str, props: I) -> Self
    where
        I: IntoIterator<Item = (P, V)>,
        P: Into<String>,
        V: Into<String>,
    {
        self.fields
            .entry(key.to_string())
            .or_default()
            .insert(value.to_string(), collect_props(props));
        self
    }

    /// Set the common defaults
    pub fn with_common<I, P, V>(mut self, props: I) -> Self
    where
        I: IntoIterator<Item = (P, V)>,
        P: Into<String>,
        V: Into<String>,
    {
        self.common = Some(collect_props(props));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Rule for an exact value, else the wildcard rule for the key
    pub fn rule(&self, key: &str, value: &str) -> Option<&StyleProps> {
        let by_value = self.fields.get(key)?;
        by_value.get(value).or_else(|| by_value.get(WILDCARD))
    }

    /// `common` first, then the rule; the rule wins on the same property
    pub fn merged(&self, rule: &StyleProps) -> StyleProps {
        let mut complete = self.common.clone().unwrap_or_default();
        for (prop, value) in rule {
            complete.insert(prop.clone(), value.clone());
        }
        complete
    }
}

fn collect_props<I, P, V>(props: I) -> StyleProps
where
    I: IntoIterator<Item = (P, V)>,
    P: Into<String>,
    V: Into<String>,
{
    props
        .into_iter()
        .map(|(p, v)| (p.into(), v.into()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> StyleRuleSet {
        StyleRuleSet::new()
            .with_common([("padding", "0 2px"), ("color", "white")])
            .with_rule("levelname", "ERROR", [("color", "red"), ("font-weight", "bold")])
            .with_rule("levelname", "*", [("color", "gray")])
    }

    #[test]
    fn test_rule_exact_value() {
        let rules = rules();
        let rule = rules.rule("levelname", "ERROR").unwrap();
        assert_eq!(rule.get("color").map(String::as_str), Some("red"));
    }

    #[test]
    fn test_rule_wildcard_fallback() {
        let rules = rules();
        let rule = rules.rule("levelname", "INFO").unwrap();
        assert_eq!(rule.get("color").map(String::as_str), Some("gray"));
    }

    #[test]
    fn test_rule_unknown_key() {
        assert!(rules().rule("name", "app").is_none());
    }

    #[test]
    fn test_rule_no_wildcard() {
        let rules = StyleRuleSet::new().with_rule("name", "db", [("color", "blue")]);
        assert!(rules.rule("name", "web").is_none());
    }

    #[test]
    fn test_merged_order_and_override() {
        let rules = rules();
        let merged = rules.merged(rules.rule("levelname", "ERROR").unwrap());
        let pairs: Vec<_> = merged.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        assert_eq!(
            pairs,
            [("padding", "0 2px"), ("color", "red"), ("font-weight", "bold")]
        );
    }

    #[test]
    fn test_deserialize_toml() {
        let rules: StyleRuleSet = toml::from_str(
            r##"
[common]
padding = "1px"

[levelname.ERROR]
color = "#cb2027"

[name."*"]
color = "%(color)"
"##,
        )
        .unwrap();

        assert_eq!(rules.common.as_ref().map(|c| c.len()), Some(1));
        assert!(rules.rule("levelname", "ERROR").is_some());
        assert!(rules.rule("name", "anything").is_some());
        assert!(!rules.fields.contains_key("common"));
    }

    #[test]
    fn test_deserialize_json() {
        let rules: StyleRuleSet = serde_json::from_str(
            r#"{"levelname": {"*": {"color": "%(color)"}}}"#,
        )
        .unwrap();
        assert!(rules.common.is_none());
        assert!(rules.rule("levelname", "DEBUG").is_some());
    }
}
