use crate::schema::Schema;
use crate::validator::MessageMap;

/// A declarative request guard.
///
/// A guard describes one endpoint's input: the field [`Schema`], whether the
/// request may proceed, and the custom validation messages. It is run by a
/// [`Pipeline`](crate::Pipeline).
///
/// Only [`fields`](Self::fields) is mandatory. `authorize` permits everything
/// and `messages` is empty unless overridden. Guards that authorize capture
/// whatever context they need (typically a [`Principal`](crate::Principal))
/// when constructed; `authorize` takes no arguments.
///
/// All three methods should be pure: `handle` may call them on every request
/// and from several threads.
///
/// # Examples
///
/// ```
/// use request_guard::{
///     AccessGate, Authorized, FieldSpec, MessageMap, Principal, RequestGuard, Schema,
/// };
///
/// struct PublishPost {
///     principal: Option<Principal>,
/// }
///
/// impl RequestGuard for PublishPost {
///     fn fields(&self) -> Schema {
///         Schema::new().field(FieldSpec::new("published_at").with_rule("required|date"))
///     }
///
///     fn authorize(&self) -> bool {
///         AccessGate::new(self.principal.as_ref())
///             .require(Authorized::for_action("posts.publish"))
///             .allows()
///     }
///
///     fn messages(&self) -> MessageMap {
///         let mut messages = MessageMap::new();
///         messages.insert("published_at.date".into(), "Pick a publication date".into());
///         messages
///     }
/// }
///
/// let anonymous = PublishPost { principal: None };
/// assert!(!anonymous.authorize());
/// ```
pub trait RequestGuard {
    /// The field schema for this endpoint.
    fn fields(&self) -> Schema;

    /// Whether the request may proceed. Defaults to always permitting.
    fn authorize(&self) -> bool {
        true
    }

    /// Custom validation messages passed to the validator. Defaults to none.
    fn messages(&self) -> MessageMap {
        MessageMap::new()
    }

    /// Name used in diagnostics. Defaults to the type name.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}
