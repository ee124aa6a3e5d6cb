//! Integration property tests for request-guard.
//!
//! These tests check pipeline-level invariants over generated schemas and
//! requests.

mod common;

use common::record;
use http::{Method, Uri};
use proptest::prelude::*;
use request_guard::web::RequestAdapter;
use request_guard::{
    AcceptAllValidator, AccessGate, Authenticated, Authorized, FieldSpec, GuardError, Pipeline,
    Principal, RequestGuard, Schema,
};
use serde_json::{json, Value};

struct Listing {
    schema: Schema,
}

impl RequestGuard for Listing {
    fn fields(&self) -> Schema {
        self.schema.clone()
    }
}

struct Denied {
    schema: Schema,
}

impl RequestGuard for Denied {
    fn fields(&self) -> Schema {
        self.schema.clone()
    }

    fn authorize(&self) -> bool {
        false
    }
}

// Strategy: field names mapped to string defaults starting with 'd'
fn arb_fields() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::btree_map("[a-z]{1,6}", "d[a-z]{0,4}", 1..5)
        .prop_map(|fields| fields.into_iter().collect())
}

fn schema_of(fields: &[(String, String)]) -> Schema {
    fields
        .iter()
        .map(|(name, default)| FieldSpec::new(name.as_str()).with_default(default.as_str()))
        .collect()
}

// Strategy: arbitrary query parameters, declared or not
fn arb_query() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec(("[a-z]{1,6}", "[a-z ]{0,6}"), 0..6)
}

fn get_with(query: &[(String, String)]) -> RequestAdapter {
    let mut request = RequestAdapter::new(Method::GET, Uri::from_static("/items"));
    for (key, value) in query {
        request.add_query_param(key.as_str(), value.as_str());
    }
    request
}

proptest! {
    /// Property: a query holding only declared, non-default values is clean
    #[test]
    fn proptest_canonical_query_is_never_redirected(
        fields in arb_fields(),
        values in prop::collection::vec("v[a-z]{0,4}", 5)
    ) {
        let query: Vec<(String, String)> = fields
            .iter()
            .zip(values)
            .map(|((name, _), value)| (name.clone(), value))
            .collect();
        let guard = Listing { schema: schema_of(&fields) };

        let result = Pipeline::new(AcceptAllValidator).handle(&guard, &get_with(&query));

        prop_assert!(result.is_ok(), "unexpected {:?}", result);
    }

    /// Property: following the redirect of an unclean query always lands on a
    /// clean one
    #[test]
    fn proptest_redirect_target_is_clean(fields in arb_fields(), query in arb_query()) {
        let guard = Listing { schema: schema_of(&fields) };
        let pipeline = Pipeline::new(AcceptAllValidator);

        if let Err(GuardError::UncleanQuery(err)) = pipeline.handle(&guard, &get_with(&query)) {
            let uri: Uri = err.redirect_uri().parse().expect("redirect URI parses");
            let followed = RequestAdapter::new(Method::GET, uri);

            let result = pipeline.handle(&guard, &followed);
            prop_assert!(result.is_ok(), "redirect loop via {}: {:?}", err.redirect_uri(), result);
        }
    }

    /// Property: successful output has exactly one entry per declared field
    #[test]
    fn proptest_output_keys_match_schema(
        fields in arb_fields(),
        body in prop::collection::btree_map("[a-z]{1,6}", "[a-z]{0,6}", 0..6)
    ) {
        let guard = Listing { schema: schema_of(&fields) };
        let mut request = RequestAdapter::new(Method::POST, Uri::from_static("/items"));
        request.set_body(Some(body.into_iter().map(|(k, v)| (k, Value::String(v))).collect()));

        let output = Pipeline::new(AcceptAllValidator)
            .handle(&guard, &request)
            .expect("accept-all never fails on POST")
            .into_inner();

        let keys: Vec<&String> = output.keys().collect();
        let names: Vec<&String> = fields.iter().map(|(name, _)| name).collect();
        prop_assert_eq!(keys, names);
    }

    /// Property: a denying guard always fails with an authorization error
    #[test]
    fn proptest_denied_guard_always_reports_authorization(
        fields in arb_fields(),
        title in "[a-z ]{0,12}"
    ) {
        let guard = Denied { schema: schema_of(&fields) };
        let mut request = RequestAdapter::new(Method::PUT, Uri::from_static("/items/1"));
        request.set_body(Some(record(json!({"title": title}))));

        let result = Pipeline::new(AcceptAllValidator).handle(&guard, &request);

        prop_assert!(matches!(result, Err(GuardError::Authorization(_))));
    }

    /// Property: an access gate allows exactly authenticated principals
    /// holding the required permission
    #[test]
    fn proptest_access_gate_matches_permissions(
        authenticated in any::<bool>(),
        permissions in prop::collection::vec(
            prop_oneof![Just("posts.create"), Just("posts.publish"), Just("posts.delete")],
            0..3
        )
    ) {
        let principal = permissions
            .iter()
            .fold(Principal::new("user-1", "Alice"), |p, action| p.with_permission(*action));
        let principal = authenticated.then_some(&principal);

        let allowed = AccessGate::new(principal)
            .require(Authenticated)
            .require(Authorized::for_action("posts.publish"))
            .allows();

        prop_assert_eq!(allowed, authenticated && permissions.contains(&"posts.publish"));
    }
}
