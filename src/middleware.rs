use crate::context::RequestContext;
use crate::normalizer::PathCaseNormalizer;
use axum::body::Body;
use axum::response::IntoResponse;
use axum::{extract::State, http::Request, middleware::Next, response::Response};
use http::header::LOCATION;
use http::{HeaderValue, StatusCode};
use std::convert::Infallible;
use std::sync::Arc;
use tracing::warn;

/// [`RequestContext`] over an axum request/response pair in flight.
pub struct HttpContext {
    original_path: String,
    query_string: String,
    status: Option<StatusCode>,
    response: Option<Response>,
}

impl HttpContext {
    pub fn for_request(req: &Request<Body>) -> Self {
        let original_path = req
            .uri()
            .path_and_query()
            .map(|pq| pq.as_str().to_owned())
            .unwrap_or_else(|| req.uri().path().to_owned());
        let query_string = req.uri().query().unwrap_or_default().to_owned();

        Self {
            original_path,
            query_string,
            status: None,
            response: None,
        }
    }

    pub fn set_response(&mut self, response: Response) {
        self.response = Some(response);
    }

    pub fn take_response(self) -> Option<Response> {
        self.response
    }
}

impl RequestContext for HttpContext {
    fn original_path(&self) -> &str {
        &self.original_path
    }

    fn query_string(&self) -> &str {
        &self.query_string
    }

    fn status(&self) -> Option<StatusCode> {
        self.response
            .as_ref()
            .map(|response| response.status())
            .or(self.status)
    }

    fn has_body(&self) -> bool {
        self.response.is_some()
    }

    fn location(&self) -> Option<&str> {
        self.response
            .as_ref()
            .and_then(|response| response.headers().get(LOCATION))
            .and_then(|value| value.to_str().ok())
    }

    fn set_status(&mut self, status: StatusCode) {
        match &mut self.response {
            Some(response) => *response.status_mut() = status,
            None => self.status = Some(status),
        }
    }

    fn redirect(&mut self, location: &str) {
        let Ok(value) = HeaderValue::from_str(location) else {
            warn!(location, "redirect target is not a valid header value, leaving response untouched");
            return;
        };
        let pending = self.status.unwrap_or(StatusCode::MOVED_PERMANENTLY);
        let response = self.response.get_or_insert_with(|| {
            let mut fresh = Response::new(Body::empty());
            *fresh.status_mut() = pending;
            fresh
        });
        response.headers_mut().insert(LOCATION, value);
    }
}

/// Middleware that redirects uppercase request paths to their lowercase
/// equivalent.
///
/// With a deferred config (the default) the rest of the router runs first
/// and the normalizer may rewrite its response, including a redirect a
/// later handler already produced. With an eager config the decision is
/// made on the request alone and a redirect short-circuits the rest of
/// the chain.
pub async fn redirect_uppercase_paths(
    State(normalizer): State<Arc<PathCaseNormalizer>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let mut ctx = HttpContext::for_request(&req);

    if normalizer.config().is_deferred() {
        let ran = normalizer
            .process(&mut ctx, async move |ctx: &mut HttpContext| {
                ctx.set_response(next.run(req).await);
                Ok::<(), Infallible>(())
            })
            .await;
        if let Err(err) = ran {
            match err {}
        }
        match ctx.take_response() {
            Some(response) => response,
            // The continuation always produces a response
            None => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        }
    } else {
        let ran = normalizer
            .process(&mut ctx, async |_: &mut HttpContext| Ok::<(), Infallible>(()))
            .await;
        if let Err(err) = ran {
            match err {}
        }
        match ctx.take_response() {
            Some(redirect) => redirect,
            None => next.run(req).await,
        }
    }
}
