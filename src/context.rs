use http::StatusCode;

/// Per-request state owned by the surrounding request-handling chain.
///
/// The normalizer never creates or destroys a context; it only reads the
/// fields below and, when it decides to redirect, writes the status and
/// triggers the host's redirect side effect.
pub trait RequestContext {
	/// Full request-target as received, possibly including a `?query` suffix.
	fn original_path(&self) -> &str;

	/// Raw query portion, possibly empty. Only its length is ever used, to
	/// locate the path/query boundary.
	fn query_string(&self) -> &str;

	/// Status already set by an earlier or later stage, if any.
	fn status(&self) -> Option<StatusCode>;

	/// Whether a response body has already been produced.
	fn has_body(&self) -> bool;

	/// The response `Location` header, if set.
	fn location(&self) -> Option<&str>;

	fn set_status(&mut self, status: StatusCode);

	fn redirect(&mut self, location: &str);
}
