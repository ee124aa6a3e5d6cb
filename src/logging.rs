use std::fmt;

use http::Method;

/// A state of the [`Pipeline::handle`](crate::Pipeline::handle) state machine.
///
/// States run strictly in declaration order (the two checks swap under
/// [`CheckOrder::AuthorizeFirst`](crate::CheckOrder::AuthorizeFirst)); a
/// failing state ends the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Build the raw input map from the request.
    Extract,
    /// Compare a read-only request's query with its canonical form.
    CleanCheck,
    /// Ask the guard whether the request is permitted.
    Authorize,
    /// Resolve and pre-process every field.
    Prepare,
    /// Hand the prepared record to the validator.
    Validate,
    /// Post-process every validated field.
    Postprocess,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Extract => write!(f, "extract"),
            Stage::CleanCheck => write!(f, "clean_check"),
            Stage::Authorize => write!(f, "authorize"),
            Stage::Prepare => write!(f, "prepare"),
            Stage::Validate => write!(f, "validate"),
            Stage::Postprocess => write!(f, "postprocess"),
        }
    }
}

/// Diagnostic events for one `handle` run.
///
/// Every event carries the guard name and HTTP method as structured fields.
/// Field values never appear in events.
#[derive(Debug)]
pub(crate) struct StageLog<'a> {
    guard: &'a str,
    method: &'a Method,
}

impl<'a> StageLog<'a> {
    pub(crate) fn new(guard: &'a str, method: &'a Method) -> Self {
        Self { guard, method }
    }

    /// Records entry into a stage.
    pub(crate) fn enter(&self, stage: Stage) {
        tracing::trace!(guard = self.guard, method = %self.method, %stage, "entering stage");
    }

    /// Records that a stage ended the run.
    pub(crate) fn halted(&self, stage: Stage, args: fmt::Arguments<'_>) {
        tracing::debug!(guard = self.guard, method = %self.method, %stage, "request halted: {}", args);
    }

    /// Records a completed run.
    pub(crate) fn completed(&self, fields: usize) {
        tracing::debug!(guard = self.guard, method = %self.method, fields, "request accepted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::CapturedLogs;

    #[test]
    fn stage_names_are_snake_case() {
        assert_eq!(Stage::CleanCheck.to_string(), "clean_check");
        assert_eq!(Stage::Postprocess.to_string(), "postprocess");
    }

    #[test]
    fn stage_log_events_carry_guard_method_and_stage() {
        let logs = CapturedLogs::default();
        let method = Method::GET;
        let log = StageLog::new("ListPosts", &method);

        logs.capture(|| {
            log.enter(Stage::Extract);
            log.halted(Stage::CleanCheck, format_args!("{} field(s)", 2));
            log.completed(3);
        });

        let output = logs.contents();
        assert!(output.contains("entering stage"));
        assert!(output.contains("stage=extract"));
        assert!(output.contains("request halted: 2 field(s)"));
        assert!(output.contains("stage=clean_check"));
        assert!(output.contains("request accepted"));
        assert!(output.contains("fields=3"));
        assert!(output.contains("ListPosts"));
        assert!(output.contains("method=GET"));
    }
}
