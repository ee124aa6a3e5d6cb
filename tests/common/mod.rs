//! Shared helpers for integration tests.
//!
//! `MiniValidator` understands a handful of pipe-separated rules
//! (`required`, `string`, `max:N`, `min:N`, `email`, `in:a,b`) so tests can
//! drive the pipeline with realistic rule strings.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use http::{Method, Uri};
use request_guard::web::RequestAdapter;
use request_guard::{ErrorMapping, MessageMap, Record, RuleMap, Validator};
use serde_json::Value;

pub struct MiniValidator;

impl Validator for MiniValidator {
    fn validate(&self, data: &Record, rules: &RuleMap, messages: &MessageMap) -> ErrorMapping {
        let mut errors = ErrorMapping::new();

        for (field, rule_string) in rules {
            let value = data.get(field).unwrap_or(&Value::Null);
            for rule in rule_string.split('|') {
                let (name, arg) = rule.split_once(':').unwrap_or((rule, ""));
                if !passes(name, arg, value) {
                    let message = messages
                        .get(&format!("{field}.{name}"))
                        .cloned()
                        .unwrap_or_else(|| format!("The {field} field failed the {name} rule."));
                    errors.entry(field.clone()).or_default().push(message);
                }
            }
        }

        errors
    }
}

fn passes(rule: &str, arg: &str, value: &Value) -> bool {
    let text = value.as_str();
    match rule {
        "required" => !matches!(value, Value::Null) && text != Some(""),
        "string" => value.is_null() || text.is_some(),
        "max" => text.map_or(true, |s| s.chars().count() <= arg.parse().unwrap_or(usize::MAX)),
        "min" => text.map_or(true, |s| s.chars().count() >= arg.parse().unwrap_or(0)),
        "email" => text.map_or(false, |s| s.contains('@')),
        "in" => text.map_or(false, |s| arg.split(',').any(|allowed| allowed == s)),
        _ => true,
    }
}

/// A validator that records how often it was called.
#[derive(Clone, Default)]
pub struct CountingValidator {
    pub calls: Arc<AtomicUsize>,
}

impl CountingValidator {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Validator for CountingValidator {
    fn validate(&self, data: &Record, rules: &RuleMap, messages: &MessageMap) -> ErrorMapping {
        self.calls.fetch_add(1, Ordering::SeqCst);
        MiniValidator.validate(data, rules, messages)
    }
}

pub fn record(value: Value) -> Record {
    match value {
        Value::Object(map) => map,
        other => panic!("expected an object, got {other}"),
    }
}

pub fn post(uri: &'static str, body: Value) -> RequestAdapter {
    let mut request = RequestAdapter::new(Method::POST, Uri::from_static(uri));
    request.set_body(Some(record(body)));
    request
}

pub fn get(uri: &'static str) -> RequestAdapter {
    RequestAdapter::new(Method::GET, Uri::from_static(uri))
}

pub fn trim(value: Value) -> Value {
    match value {
        Value::String(s) => Value::String(s.trim().to_string()),
        other => other,
    }
}

pub fn uppercase(value: Value) -> Value {
    match value {
        Value::String(s) => Value::String(s.to_uppercase()),
        other => other,
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}
