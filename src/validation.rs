//! Pre-flight payload validation
//!
//! A [`RuleSet`] maps field paths to presence rules. Paths use dot notation
//! (`recipient.country_code`) and may contain `*` segments that fan out over
//! every element of a sequence (`items.*.files`). Validation is a pure
//! function of the rules and the payload: it never touches the network and
//! keeps no state between calls.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

/// A single presence rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Present, not null, not a blank string, not an empty container
    Required,
    /// When present and not null, must be a JSON sequence
    Array,
}

impl Rule {
    /// Evaluate the rule against a resolved value (`None` when absent)
    fn passes(&self, value: Option<&Value>) -> bool {
        match self {
            Rule::Required => match value {
                None | Some(Value::Null) => false,
                Some(Value::String(s)) => !s.trim().is_empty(),
                Some(Value::Array(a)) => !a.is_empty(),
                Some(Value::Object(m)) => !m.is_empty(),
                Some(_) => true,
            },
            Rule::Array => match value {
                None | Some(Value::Null) => true,
                Some(v) => v.is_array(),
            },
        }
    }

    fn message(&self, path: &str) -> String {
        match self {
            Rule::Required => format!("The {} field is required.", path),
            Rule::Array => format!("The {} must be an array.", path),
        }
    }
}

/// Ordered mapping of field path to rules
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<(String, Vec<Rule>)>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach rules to a field path
    pub fn rule(mut self, path: impl Into<String>, rules: &[Rule]) -> Self {
        self.rules.push((path.into(), rules.to_vec()));
        self
    }

    /// Shorthand for `rule(path, &[Rule::Required])`
    pub fn required(self, path: impl Into<String>) -> Self {
        self.rule(path, &[Rule::Required])
    }

    /// Shorthand for a required, sequence-typed field
    pub fn required_array(self, path: impl Into<String>) -> Self {
        self.rule(path, &[Rule::Required, Rule::Array])
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Rule])> {
        self.rules.iter().map(|(p, r)| (p.as_str(), r.as_slice()))
    }
}

/// Per-field rule failures, in the order the rules were declared
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations {
    fields: Vec<(String, Vec<String>)>,
}

impl Violations {
    /// Record a failure message for a field
    pub fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        let path = path.into();
        let message = message.into();
        match self.fields.iter_mut().find(|(p, _)| *p == path) {
            Some((_, messages)) => messages.push(message),
            None => self.fields.push((path, vec![message])),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of failing fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    pub fn get(&self, path: &str) -> Option<&[String]> {
        self.fields
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, m)| m.as_slice())
    }

    /// Failing field paths
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(p, _)| p.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields.iter().map(|(p, m)| (p.as_str(), m.as_slice()))
    }

    /// One-line description: the first message, plus a count of the rest
    pub fn summary(&self) -> String {
        let mut messages = self.fields.iter().flat_map(|(_, m)| m.iter());
        let first = match messages.next() {
            Some(m) => m.clone(),
            None => return "The given data was invalid.".to_string(),
        };
        match messages.count() {
            0 => first,
            1 => format!("{} (and 1 more error)", first),
            n => format!("{} (and {} more errors)", first, n),
        }
    }
}

impl Serialize for Violations {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (path, messages) in &self.fields {
            map.serialize_entry(path, messages)?;
        }
        map.end()
    }
}

/// Evaluate `rules` against `data`, returning every failure
pub fn validate(rules: &RuleSet, data: &Value) -> Violations {
    let mut violations = Violations::default();

    for (pattern, field_rules) in rules.iter() {
        let segments: Vec<&str> = pattern.split('.').collect();
        let mut resolved = Vec::new();
        expand(&segments, Some(data), String::new(), &mut resolved);

        for (path, value) in resolved {
            for rule in field_rules {
                if !rule.passes(value) {
                    violations.push(path.clone(), rule.message(&path));
                }
            }
        }
    }

    violations
}

/// Resolve a path pattern into concrete paths paired with their values.
/// A wildcard over an absent or scalar value resolves to nothing.
fn expand<'a>(
    segments: &[&str],
    current: Option<&'a Value>,
    prefix: String,
    out: &mut Vec<(String, Option<&'a Value>)>,
) {
    let Some((segment, rest)) = segments.split_first() else {
        out.push((prefix, current));
        return;
    };

    if *segment == "*" {
        match current {
            Some(Value::Array(items)) => {
                for (i, item) in items.iter().enumerate() {
                    expand(rest, Some(item), join(&prefix, &i.to_string()), out);
                }
            }
            Some(Value::Object(map)) => {
                for (key, item) in map {
                    expand(rest, Some(item), join(&prefix, key), out);
                }
            }
            _ => {}
        }
        return;
    }

    let next = current.and_then(|value| child(value, segment));
    expand(rest, next, join(&prefix, segment), out);
}

fn child<'a>(value: &'a Value, segment: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

fn join(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{}.{}", prefix, segment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_required_rejects_blank_values() {
        let rules = RuleSet::new()
            .required("missing")
            .required("null")
            .required("blank")
            .required("empty_list")
            .required("zero")
            .required("flag");
        let data = json!({
            "null": null,
            "blank": "   ",
            "empty_list": [],
            "zero": 0,
            "flag": false,
        });

        let violations = validate(&rules, &data);
        let fields: Vec<&str> = violations.fields().collect();
        assert_eq!(fields, vec!["missing", "null", "blank", "empty_list"]);
    }

    #[test]
    fn test_nested_paths() {
        let rules = RuleSet::new()
            .required("recipient.name")
            .required("recipient.zip");
        let data = json!({ "recipient": { "name": "Jane" } });

        let violations = validate(&rules, &data);
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations.get("recipient.zip").unwrap(),
            &["The recipient.zip field is required.".to_string()]
        );
    }

    #[test]
    fn test_wildcard_expands_over_items() {
        let rules = RuleSet::new()
            .required("items.*.name")
            .required_array("items.*.files");
        let data = json!({
            "items": [
                { "name": "Mug", "files": [{ "url": "a.png" }] },
                { "files": "a.png" },
            ]
        });

        let violations = validate(&rules, &data);
        assert!(!violations.contains("items.0.name"));
        assert!(violations.contains("items.1.name"));
        assert_eq!(
            violations.get("items.1.files").unwrap(),
            &["The items.1.files must be an array.".to_string()]
        );
    }

    #[test]
    fn test_wildcard_over_missing_sequence_yields_nothing() {
        let rules = RuleSet::new().required("items.*.name");
        let violations = validate(&rules, &json!({}));
        assert!(violations.is_empty());
    }

    #[test]
    fn test_array_rule_skips_absent_values() {
        let rules = RuleSet::new().rule("items", &[Rule::Array]);
        assert!(validate(&rules, &json!({})).is_empty());
        assert!(validate(&rules, &json!({ "items": null })).is_empty());
        assert!(validate(&rules, &json!({ "items": [1] })).is_empty());
        assert!(!validate(&rules, &json!({ "items": { "a": 1 } })).is_empty());
    }

    #[test]
    fn test_missing_required_array_reports_required_only() {
        let rules = RuleSet::new().required_array("items");
        let violations = validate(&rules, &json!({}));
        assert_eq!(
            violations.get("items").unwrap(),
            &["The items field is required.".to_string()]
        );
    }

    #[test]
    fn test_numeric_segment_indexes_sequences() {
        let rules = RuleSet::new().required("items.1.name");
        let data = json!({ "items": [{ "name": "a" }, { "name": "b" }] });
        assert!(validate(&rules, &data).is_empty());
    }

    #[test]
    fn test_summary_counts_remaining_messages() {
        let rules = RuleSet::new().required("a").required("b").required("c");
        let violations = validate(&rules, &json!({}));
        assert_eq!(violations.summary(), "The a field is required. (and 2 more errors)");
    }

    #[test]
    fn test_violations_serialize_as_map() {
        let mut violations = Violations::default();
        violations.push("zip", "The zip field is required.");
        violations.push("city", "The city field is required.");

        let value = serde_json::to_value(&violations).unwrap();
        assert_eq!(
            value,
            json!({
                "zip": ["The zip field is required."],
                "city": ["The city field is required."],
            })
        );
    }
}
