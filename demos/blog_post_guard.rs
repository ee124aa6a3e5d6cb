//! Blog post guard demonstration.
//!
//! This example walks one guard pair through the outcomes a handler sees:
//! 1. A valid create request produces a verified record
//! 2. A listing with a non-canonical query is redirected
//! 3. A request from a principal without permission is rejected
//! 4. An invalid body comes back with per-field errors
//!
//! Run with: `cargo run --example blog_post_guard`

use http::{Method, Uri};
use request_guard::web::RequestAdapter;
use request_guard::{
    AccessGate, Authenticated, Authorized, ErrorMapping, FieldSpec, GuardError, MessageMap,
    Pipeline, Principal, Record, RequestGuard, RuleMap, Schema, Verified,
};
use serde_json::{json, Value};

/// Guard for `POST /posts`.
struct CreatePost {
    principal: Option<Principal>,
}

impl RequestGuard for CreatePost {
    fn fields(&self) -> Schema {
        Schema::new()
            .field(
                FieldSpec::new("title")
                    .with_rule("required")
                    .with_pre_transform(|v| match v {
                        Value::String(s) => Value::String(s.trim().to_string()),
                        other => other,
                    }),
            )
            .field(
                FieldSpec::new("status")
                    .with_default("draft")
                    .with_post_transform(|v| match v {
                        Value::String(s) => Value::String(s.to_uppercase()),
                        other => other,
                    }),
            )
            .field(FieldSpec::new("author_email").with_source_path("meta.author.email"))
    }

    fn authorize(&self) -> bool {
        AccessGate::new(self.principal.as_ref())
            .require(Authenticated)
            .require(Authorized::for_action("posts.create"))
            .allows()
    }

    fn messages(&self) -> MessageMap {
        let mut messages = MessageMap::new();
        messages.insert("title".into(), "Every post needs a title.".into());
        messages
    }
}

/// Guard for `GET /posts`.
struct ListPosts;

impl RequestGuard for ListPosts {
    fn fields(&self) -> Schema {
        Schema::new()
            .field(FieldSpec::new("status").with_default("published"))
            .field(FieldSpec::new("page").with_default(1))
    }
}

/// Understands only `required`; real applications plug in a rule engine.
fn required_only(data: &Record, rules: &RuleMap, messages: &MessageMap) -> ErrorMapping {
    let mut errors = ErrorMapping::new();
    for (field, rule) in rules {
        let blank = data.get(field).map_or(true, |v| v.is_null() || v == "");
        if rule == "required" && blank {
            let message = messages
                .get(field)
                .cloned()
                .unwrap_or_else(|| format!("The {field} field is required."));
            errors.insert(field.clone(), vec![message]);
        }
    }
    errors
}

fn store(post: Verified<Record>) {
    println!("✓ Stored post: {}", Value::Object(post.into_inner()));
}

fn post_request(principal: Option<Principal>, body: Value) -> RequestAdapter {
    let mut request = RequestAdapter::new(Method::POST, Uri::from_static("/posts"));
    if let Value::Object(body) = body {
        request.set_body(Some(body));
    }
    request.set_principal(principal);
    request
}

fn report(result: Result<Verified<Record>, GuardError>) {
    match result {
        Ok(post) => store(post),
        Err(GuardError::UncleanQuery(err)) => {
            println!("↪ {} redirect to {}", err.status(), err.redirect_uri());
        }
        Err(err) => {
            let body = serde_json::to_string(&err).unwrap_or_default();
            println!("✗ {} {}", err.status(), body);
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== Blog Post Guard Example ===\n");

    let pipeline = Pipeline::new(required_only);
    let author = Principal::new("user-1", "Alice").with_permission("posts.create");

    // Scenario 1: valid create
    println!("--- Scenario 1: Valid Post ---");
    let request = post_request(
        Some(author.clone()),
        json!({"title": "  Hello, world!  ", "meta": {"author": {"email": "alice@example.com"}}}),
    );
    let guard = CreatePost {
        principal: request.principal().cloned(),
    };
    report(pipeline.handle(&guard, &request));

    // Scenario 2: non-canonical listing
    println!("\n--- Scenario 2: Non-Canonical Listing ---");
    let request = RequestAdapter::new(
        Method::GET,
        Uri::from_static("/posts?status=published&page=3&utm_source=newsletter"),
    );
    report(pipeline.handle(&ListPosts, &request));

    // Scenario 3: missing permission
    println!("\n--- Scenario 3: Missing Permission ---");
    let reader = Principal::new("user-2", "Bob").with_permission("posts.read");
    let request = post_request(Some(reader), json!({"title": "Sneaky"}));
    let guard = CreatePost {
        principal: request.principal().cloned(),
    };
    report(pipeline.handle(&guard, &request));

    // Scenario 4: invalid body
    println!("\n--- Scenario 4: Blank Title ---");
    let request = post_request(Some(author), json!({"title": "   "}));
    let guard = CreatePost {
        principal: request.principal().cloned(),
    };
    report(pipeline.handle(&guard, &request));

    println!("\n=== Example Complete ===");
}
