//! The guard pipeline: extraction, checks, field mapping and validation.

use crate::config::{CheckOrder, GuardConfig};
use crate::error::{AuthorizationError, GuardError, ValidationError};
use crate::guard::RequestGuard;
use crate::logging::{Stage, StageLog};
use crate::path::resolve;
use crate::query::check_clean;
use crate::schema::Schema;
use crate::validator::Validator;
use crate::value::Record;
use crate::verified::Verified;
use crate::web::{extract, GuardRequest};

/// Runs [`RequestGuard`]s against requests.
///
/// A pipeline owns the validator and the configuration; guards are passed
/// per call so they can capture per-request context. `handle` keeps no state
/// between calls, so one pipeline can serve many threads as long as the
/// validator is `Sync`.
///
/// # Examples
///
/// ```
/// use request_guard::web::RequestAdapter;
/// use request_guard::{AcceptAllValidator, FieldSpec, Pipeline, RequestGuard, Schema};
/// use http::{Method, Uri};
/// use serde_json::json;
///
/// struct CreatePost;
///
/// impl RequestGuard for CreatePost {
///     fn fields(&self) -> Schema {
///         Schema::new()
///             .field(FieldSpec::new("title").with_rule("required|string"))
///             .field(FieldSpec::new("status").with_default("draft"))
///     }
/// }
///
/// let mut request = RequestAdapter::new(Method::POST, Uri::from_static("/posts"));
/// request.set_body(Some(serde_json::from_value(json!({"title": "Hello"})).unwrap()));
///
/// let pipeline = Pipeline::new(AcceptAllValidator);
/// let record = pipeline.handle(&CreatePost, &request).unwrap().into_inner();
///
/// assert_eq!(record["title"], json!("Hello"));
/// assert_eq!(record["status"], json!("draft"));
/// ```
#[derive(Debug, Clone)]
pub struct Pipeline<V> {
    validator: V,
    config: GuardConfig,
}

impl<V: Validator> Pipeline<V> {
    /// Creates a pipeline with the default configuration.
    pub fn new(validator: V) -> Self {
        Self::with_config(validator, GuardConfig::default())
    }

    /// Creates a pipeline with an explicit configuration.
    pub fn with_config(validator: V, config: GuardConfig) -> Self {
        Self { validator, config }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    /// Returns the validator.
    pub fn validator(&self) -> &V {
        &self.validator
    }

    /// Runs `guard` against `request`.
    ///
    /// Stages run strictly in order, each only if the previous succeeded:
    ///
    /// 1. **Extract**: build the input map (see [`extract`]).
    /// 2. **CleanCheck** (read-only methods only): compare the query with its
    ///    canonical form.
    /// 3. **Authorize**: call [`RequestGuard::authorize`].
    /// 4. **Prepare**: resolve and pre-process every field.
    /// 5. **Validate**: call the validator with the prepared record, the rule
    ///    map and the guard's messages.
    /// 6. **Postprocess**: post-process every field.
    ///
    /// Steps 2 and 3 swap under [`CheckOrder::AuthorizeFirst`].
    ///
    /// # Errors
    ///
    /// - [`GuardError::UncleanQuery`] if a read-only request's query is not
    ///   canonical.
    /// - [`GuardError::Authorization`] if the guard denies the request. No field
    ///   is resolved or transformed in that case.
    /// - [`GuardError::Validation`] with the validator's mapping verbatim. No
    ///   post-transform runs in that case.
    ///
    /// Panics from transforms or from `authorize` propagate unchanged.
    pub fn handle<G, R>(&self, guard: &G, request: &R) -> Result<Verified<Record>, GuardError>
    where
        G: RequestGuard + ?Sized,
        R: GuardRequest + ?Sized,
    {
        let log = StageLog::new(guard.name(), request.method());
        let schema = guard.fields();

        log.enter(Stage::Extract);
        let input = extract(request, &self.config);

        let read_only = self.config.is_read_only(request.method());
        match self.config.check_order {
            CheckOrder::CleanCheckFirst => {
                if read_only {
                    self.clean_check(&log, request, &input, &schema)?;
                }
                self.authorize(&log, guard)?;
            }
            CheckOrder::AuthorizeFirst => {
                self.authorize(&log, guard)?;
                if read_only {
                    self.clean_check(&log, request, &input, &schema)?;
                }
            }
        }

        log.enter(Stage::Prepare);
        let prepared = prepare(&schema, &input);

        log.enter(Stage::Validate);
        let errors = self
            .validator
            .validate(&prepared, &schema.rules(), &guard.messages());
        if !errors.is_empty() {
            log.halted(
                Stage::Validate,
                format_args!("{} field(s) failed validation", errors.len()),
            );
            return Err(ValidationError::new(errors).into());
        }

        log.enter(Stage::Postprocess);
        let output = postprocess(&schema, prepared);

        log.completed(output.len());
        Ok(Verified::new_unchecked(output))
    }

    fn clean_check<R>(
        &self,
        log: &StageLog<'_>,
        request: &R,
        input: &Record,
        schema: &Schema,
    ) -> Result<(), GuardError>
    where
        R: GuardRequest + ?Sized,
    {
        log.enter(Stage::CleanCheck);
        check_clean(request, input, schema).map_err(|err| {
            log.halted(
                Stage::CleanCheck,
                format_args!(
                    "redirecting to canonical query with {} field(s)",
                    err.minimized().len()
                ),
            );
            err.into()
        })
    }

    fn authorize<G>(&self, log: &StageLog<'_>, guard: &G) -> Result<(), GuardError>
    where
        G: RequestGuard + ?Sized,
    {
        log.enter(Stage::Authorize);
        if guard.authorize() {
            return Ok(());
        }

        log.halted(Stage::Authorize, format_args!("guard denied the request"));
        Err(AuthorizationError::new(self.config.unauthorized_message.clone()).into())
    }
}

/// Maps the input onto the schema.
///
/// For every field in schema order, resolves its source path (or name) against
/// `input`, falling back to the field default, applies the pre-transform and
/// stores the result under the field name. The result always has exactly one
/// entry per field.
pub fn prepare(schema: &Schema, input: &Record) -> Record {
    schema
        .iter()
        .map(|field| {
            let value = resolve(input, field.source_path(), field.default_value());
            (field.name().to_string(), field.process_pre(value))
        })
        .collect()
}

/// Applies every field's post-transform to a validated record.
///
/// Only fields present in `record` are transformed and returned, in schema
/// order. Keys without a field are dropped.
pub fn postprocess(schema: &Schema, mut record: Record) -> Record {
    schema
        .iter()
        .filter_map(|field| {
            record
                .remove(field.name())
                .map(|value| (field.name().to_string(), field.process_post(value)))
        })
        .collect()
}
