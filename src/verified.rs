/// A value that has passed through a guard pipeline.
///
/// [`Pipeline::handle`](crate::Pipeline::handle) returns its output record
/// wrapped in `Verified<T>`: the record was extracted from an authorized
/// request, validated without errors and post-processed. There is no public
/// constructor, so a `Verified<Record>` in a function signature proves the
/// data went through a guard.
///
/// Access is explicit:
///
/// - [`AsRef::as_ref`]: borrow the value
/// - [`into_inner`](Self::into_inner): consume and extract the value
///
/// `Verified<T>` does not implement `Deref` or `Default`.
///
/// External callers cannot create `Verified<T>` directly:
///
/// ```compile_fail
/// use request_guard::Verified;
///
/// let verified = Verified::new_unchecked(request_guard::Record::new());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verified<T> {
    inner: T,
}

impl<T> Verified<T> {
    /// Wraps a value without checking anything.
    ///
    /// `pub(crate)` so only the pipeline, after validation succeeded, can
    /// construct one.
    pub(crate) fn new_unchecked(value: T) -> Self {
        Self { inner: value }
    }

    /// Consumes the `Verified<T>` and returns the inner value.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T> AsRef<T> for Verified<T> {
    fn as_ref(&self) -> &T {
        &self.inner
    }
}
