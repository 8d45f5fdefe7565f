use crate::config::NormalizerConfig;
use crate::context::RequestContext;
use http::StatusCode;
use tracing::debug;

/// Redirects requests whose path contains uppercase characters to the
/// lowercase equivalent, leaving the query string untouched.
pub struct PathCaseNormalizer {
	config: NormalizerConfig,
}

impl PathCaseNormalizer {
	pub fn new(config: NormalizerConfig) -> Self {
		Self { config }
	}

	pub fn config(&self) -> NormalizerConfig {
		self.config
	}

	/// Runs the case check around `next`, the rest of the chain.
	///
	/// With `defer` enabled (the default) `next` runs first and is awaited
	/// to completion, so the check also sees redirects made by later
	/// stages. With `defer` disabled the check runs on the
	/// pre-continuation state and `next` runs afterwards. Either way the
	/// continuation runs exactly once, and an error from it is passed
	/// through untouched (skipping the deferred check).
	pub async fn process<C, E>(
		&self,
		ctx: &mut C,
		next: impl AsyncFnOnce(&mut C) -> Result<(), E>,
	) -> Result<(), E>
	where
		C: RequestContext,
	{
		if self.config.is_deferred() {
			next(ctx).await?;
			self.check(ctx);
			Ok(())
		} else {
			self.check(ctx);
			next(ctx).await
		}
	}

	fn check<C: RequestContext>(&self, ctx: &mut C) {
		let already_redirected = ctx.status() == Some(StatusCode::MOVED_PERMANENTLY);

		let candidate = if self.config.is_chained() && already_redirected {
			// A later stage redirected before us; re-check its target
			ctx.location()
				.map(|location| strip_query(location, ctx.query_string()).to_owned())
		} else if !already_redirected {
			Some(strip_query(ctx.original_path(), ctx.query_string()).to_owned())
		} else {
			return;
		};

		let Some(path) = candidate else { return };

		// Never clobber a committed 200 response
		if ctx.has_body() && ctx.status() == Some(StatusCode::OK) {
			return;
		}

		let lowercased = path.to_lowercase();
		if lowercased == path {
			return;
		}

		let target = if ctx.query_string().is_empty() {
			lowercased
		} else {
			format!("{lowercased}?{}", ctx.query_string())
		};

		debug!(%path, %target, "redirecting to lowercase path");
		ctx.set_status(StatusCode::MOVED_PERMANENTLY);
		ctx.redirect(&target);
	}
}

/// Cuts a trailing `?query` off `target` by length.
///
/// The query is assumed to be a true suffix of `target`. When that
/// invariant is violated (query longer than the target, or the cut would
/// land inside a UTF-8 sequence) the target is returned untouched instead
/// of slicing out of bounds.
fn strip_query<'a>(target: &'a str, query: &str) -> &'a str {
	if query.is_empty() {
		return target;
	}
	let Some(boundary) = target.len().checked_sub(query.len() + 1) else {
		return target;
	};
	if !target.is_char_boundary(boundary) {
		return target;
	}
	&target[..boundary]
}
