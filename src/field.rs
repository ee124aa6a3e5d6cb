use std::fmt;
use std::sync::Arc;

use serde_json::Value;

/// A value transform applied before or after validation.
///
/// Transforms are called synchronously with a single owned value and must not
/// depend on pipeline state. They are shared behind an `Arc` so that cloning a
/// [`FieldSpec`] is cheap and a schema can be used from many threads.
pub type Transform = Arc<dyn Fn(Value) -> Value + Send + Sync>;

/// Immutable description of one output field.
///
/// A `FieldSpec` names the output key, where its value comes from in the
/// request input, the default used when the input is missing, the validation
/// rule string handed to the [`Validator`](crate::Validator), and optional
/// transforms applied before and after validation.
///
/// Every `with_*` method is copy-on-write: it leaves the receiver untouched and
/// returns a new spec with exactly one attribute replaced. Calling the same
/// method twice keeps the last value.
///
/// # Examples
///
/// ```
/// use request_guard::FieldSpec;
/// use serde_json::{json, Value};
///
/// let title = FieldSpec::new("title")
///     .with_rule("required|string|max:100")
///     .with_pre_transform(|v| match v {
///         Value::String(s) => Value::String(s.trim().to_string()),
///         other => other,
///     });
///
/// assert_eq!(title.process_pre(json!("  Hello  ")), json!("Hello"));
///
/// // The original spec is unaffected by later `with_*` calls.
/// let optional = title.with_rule("nullable|string");
/// assert_eq!(title.rule(), Some("required|string|max:100"));
/// assert_eq!(optional.rule(), Some("nullable|string"));
/// ```
#[derive(Clone)]
pub struct FieldSpec {
    name: String,
    source_path: Option<String>,
    default: Value,
    rule: Option<String>,
    pre: Option<Transform>,
    post: Option<Transform>,
}

impl FieldSpec {
    /// Creates a field with no source path, a `null` default, no rule and no
    /// transforms.
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        assert!(!name.is_empty(), "field name must not be empty");
        Self {
            name,
            source_path: None,
            default: Value::Null,
            rule: None,
            pre: None,
            post: None,
        }
    }

    /// Returns a copy with the given default value.
    #[must_use]
    pub fn with_default(&self, default: impl Into<Value>) -> Self {
        Self {
            default: default.into(),
            ..self.clone()
        }
    }

    /// Returns a copy with the given validation rule string.
    ///
    /// The rule is opaque to this crate; an empty string is treated the same
    /// as no rule when building the rule map.
    #[must_use]
    pub fn with_rule(&self, rule: impl Into<String>) -> Self {
        Self {
            rule: Some(rule.into()),
            ..self.clone()
        }
    }

    /// Returns a copy that reads its value from a dotted input path.
    ///
    /// # Panics
    ///
    /// Panics if `path` is empty or contains an empty segment (`"a..b"`,
    /// `".a"`, `"a."`).
    #[must_use]
    pub fn with_source_path(&self, path: impl Into<String>) -> Self {
        let path = path.into();
        assert!(
            !path.is_empty() && path.split('.').all(|segment| !segment.is_empty()),
            "source path must be a non-empty dot path, got {path:?}"
        );
        Self {
            source_path: Some(path),
            ..self.clone()
        }
    }

    /// Returns a copy with the given pre-validation transform.
    #[must_use]
    pub fn with_pre_transform<F>(&self, transform: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        Self {
            pre: Some(Arc::new(transform)),
            ..self.clone()
        }
    }

    /// Returns a copy with the given post-validation transform.
    #[must_use]
    pub fn with_post_transform<F>(&self, transform: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        Self {
            post: Some(Arc::new(transform)),
            ..self.clone()
        }
    }

    /// Output key of this field.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Input path this field is read from: the explicit source path, or the
    /// field name when none was set.
    pub fn source_path(&self) -> &str {
        self.source_path.as_deref().unwrap_or(&self.name)
    }

    /// Default value; `null` means the field has no default.
    pub fn default_value(&self) -> &Value {
        &self.default
    }

    /// Validation rule, if any.
    pub fn rule(&self) -> Option<&str> {
        self.rule.as_deref()
    }

    /// Applies the pre-transform, or returns `value` unchanged.
    ///
    /// A panicking transform is not caught.
    pub fn process_pre(&self, value: Value) -> Value {
        match &self.pre {
            Some(transform) => transform(value),
            None => value,
        }
    }

    /// Applies the post-transform, or returns `value` unchanged.
    ///
    /// A panicking transform is not caught.
    pub fn process_post(&self, value: Value) -> Value {
        match &self.post {
            Some(transform) => transform(value),
            None => value,
        }
    }
}

impl fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpec")
            .field("name", &self.name)
            .field("source_path", &self.source_path)
            .field("default", &self.default)
            .field("rule", &self.rule)
            .field("pre", &self.pre.is_some())
            .field("post", &self.post.is_some())
            .finish()
    }
}
