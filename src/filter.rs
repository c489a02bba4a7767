//! Filter specifications and their evaluation against a single instance.

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, trace};

use crate::comparison::{contains, type_name, values_equal};
use crate::errors::{FilterError, Result};
use crate::path::{assign, parse_path, resolve, Path};

/// Wire form of a filter, as it appears in JSON:
///
/// ```json
/// { "type": "replace", "field": "a.[0].name", "value": "wor(ld)", "replace": "there" }
/// ```
///
/// `type` is kept as a string so an unknown kind surfaces as
/// [`FilterError::UnsupportedFilterKind`] when the filter is compiled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    #[serde(rename = "type")]
    pub kind: String,
    pub field: String,
    #[serde(default)]
    pub value: Value,
    #[serde(default, rename = "replace", skip_serializing_if = "Option::is_none")]
    pub replacement: Option<String>,
}

impl FilterSpec {
    pub fn new(kind: impl Into<String>, field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            kind: kind.into(),
            field: field.into(),
            value: value.into(),
            replacement: None,
        }
    }

    pub fn replace(
        field: impl Into<String>,
        pattern: impl Into<String>,
        replacement: impl Into<String>,
    ) -> Self {
        let pattern: String = pattern.into();
        Self {
            replacement: Some(replacement.into()),
            ..Self::new("replace", field, pattern)
        }
    }

    /// Accepts either one spec object or an array of them.
    pub fn list_from_value(value: &Value) -> Result<Vec<FilterSpec>> {
        let specs = match value {
            Value::Array(_) => Vec::<FilterSpec>::deserialize(value)?,
            _ => vec![FilterSpec::deserialize(value)?],
        };
        Ok(specs)
    }
}

#[derive(Debug, Clone)]
pub enum FilterKind {
    /// Resolved value equals `value`.
    Match { value: Value },
    /// `value` is a substring, element, or key of the resolved value.
    Contains { value: Value },
    /// Pattern matches at the start of the resolved string.
    RegexMatch { regex: Regex },
    /// Pattern matches anywhere in the resolved string.
    RegexSearch { regex: Regex },
    /// Every found occurrence is replaced by `replacement`.
    Replace { regex: Regex, replacement: String },
}

impl FilterKind {
    pub fn name(&self) -> &'static str {
        match self {
            FilterKind::Match { .. } => "match",
            FilterKind::Contains { .. } => "in",
            FilterKind::RegexMatch { .. } => "re-match",
            FilterKind::RegexSearch { .. } => "re-search",
            FilterKind::Replace { .. } => "replace",
        }
    }
}

/// Outcome of one filter against one instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EvalResult {
    pub matched: bool,
    pub rewritten: bool,
}

impl EvalResult {
    fn matched(matched: bool) -> Self {
        Self {
            matched,
            rewritten: false,
        }
    }
}

/// A filter with its path parsed and any pattern compiled.
#[derive(Debug, Clone)]
pub struct Filter {
    pub field: Path,
    pub kind: FilterKind,
}

impl Filter {
    pub fn compile(spec: &FilterSpec) -> Result<Self> {
        let kind = match spec.kind.as_str() {
            "match" | "exact-match" => FilterKind::Match {
                value: spec.value.clone(),
            },
            "in" | "substring-contains" => FilterKind::Contains {
                value: spec.value.clone(),
            },
            "re-match" | "regex-match" => FilterKind::RegexMatch {
                regex: compile_pattern(spec, "re-match", true)?,
            },
            "re-search" | "regex-search" => FilterKind::RegexSearch {
                regex: compile_pattern(spec, "re-search", false)?,
            },
            "replace" => FilterKind::Replace {
                regex: compile_pattern(spec, "replace", false)?,
                replacement: spec.replacement.clone().ok_or_else(|| {
                    FilterError::MissingReplacement {
                        field: spec.field.clone(),
                    }
                })?,
            },
            other => return Err(FilterError::UnsupportedFilterKind(other.to_string())),
        };
        let field = parse_path(&spec.field)?;
        debug!(kind = kind.name(), field = %field, "compiled filter");
        Ok(Self { field, kind })
    }

    pub fn is_replace(&self) -> bool {
        matches!(self.kind, FilterKind::Replace { .. })
    }

    /// Evaluate against `instance`, rewriting it in place for `replace`.
    ///
    /// A field missing from the instance is a non-match, never an error.
    pub fn evaluate(&self, instance: &mut Value) -> Result<EvalResult> {
        let current = match resolve(instance, &self.field) {
            Ok(v) => v,
            Err(_) => {
                trace!(field = %self.field, "field absent, filter skipped");
                return Ok(EvalResult::default());
            }
        };
        match &self.kind {
            FilterKind::Match { value } => Ok(EvalResult::matched(values_equal(current, value))),
            FilterKind::Contains { value } => contains(current, value)
                .map(EvalResult::matched)
                .ok_or_else(|| self.mismatch(current)),
            FilterKind::RegexMatch { regex } | FilterKind::RegexSearch { regex } => {
                let text = self.expect_str(current)?;
                Ok(EvalResult::matched(regex.is_match(text)))
            }
            FilterKind::Replace { regex, replacement } => {
                let text = self.expect_str(current)?;
                let found = found_texts(regex, text);
                if found.is_empty() {
                    return Ok(EvalResult::default());
                }
                let rewritten = found
                    .iter()
                    .fold(text.to_string(), |acc, f| acc.replace(f, replacement));
                assign(instance, &self.field, Value::String(rewritten))?;
                Ok(EvalResult {
                    matched: true,
                    rewritten: true,
                })
            }
        }
    }

    fn expect_str<'v>(&self, v: &'v Value) -> Result<&'v str> {
        v.as_str().ok_or_else(|| self.mismatch(v))
    }

    fn mismatch(&self, found: &Value) -> FilterError {
        FilterError::TypeMismatch {
            kind: self.kind.name(),
            path: self.field.to_string(),
            found: type_name(found),
        }
    }
}

impl TryFrom<&FilterSpec> for Filter {
    type Error = FilterError;

    fn try_from(spec: &FilterSpec) -> Result<Self> {
        Filter::compile(spec)
    }
}

fn compile_pattern(spec: &FilterSpec, kind: &'static str, anchored: bool) -> Result<Regex> {
    let pattern = spec.value.as_str().ok_or_else(|| FilterError::TypeMismatch {
        kind,
        path: spec.field.clone(),
        found: type_name(&spec.value),
    })?;
    let source = if anchored {
        format!(r"\A(?:{pattern})")
    } else {
        pattern.to_string()
    };
    Regex::new(&source).map_err(|source| FilterError::InvalidRegex {
        pattern: pattern.to_string(),
        source,
    })
}

/// Texts to replace, one per non-overlapping match: the whole match when
/// the pattern has no groups, otherwise only the first group.
///
/// With several groups the remaining ones are ignored, so `(a)(b)` on
/// `"ab"` replaces just the `a`. Callers rely on this exact behaviour.
fn found_texts<'t>(regex: &Regex, haystack: &'t str) -> Vec<&'t str> {
    let group = if regex.captures_len() > 1 { 1 } else { 0 };
    regex
        .captures_iter(haystack)
        .map(|caps| caps.get(group).map_or("", |m| m.as_str()))
        .collect()
}
