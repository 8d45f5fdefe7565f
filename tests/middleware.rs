use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Router, middleware, routing::get};
use pathfold::config::NormalizerConfig;
use pathfold::middleware::redirect_uppercase_paths;
use pathfold::normalizer::PathCaseNormalizer;
use pretty_assertions::assert_eq;
use std::sync::Arc;
use tower::ServiceExt;

fn app(config: NormalizerConfig) -> Router {
    let normalizer = Arc::new(PathCaseNormalizer::new(config));
    Router::new()
        .route("/foo", get(|| async { "foo" }))
        .route("/legacy", get(legacy_redirect))
        .layer(middleware::from_fn_with_state(
            normalizer,
            redirect_uppercase_paths,
        ))
}

// Stands in for a later stage that already decided to redirect
async fn legacy_redirect() -> Response {
    (
        StatusCode::MOVED_PERMANENTLY,
        [(header::LOCATION, "/MovedHere")],
        "Redirecting…",
    )
        .into_response()
}

async fn send(app: Router, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("Failed to build request"),
    )
    .await
    .expect("Failed to send request")
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("Missing Location header")
        .to_str()
        .expect("Location header is not valid UTF-8")
}

#[tokio::test]
async fn uppercase_path_redirects() {
    let response = send(app(NormalizerConfig::new()), "/fOo").await;

    assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(location(&response), "/foo");
}

#[tokio::test]
async fn lowercase_path_reaches_the_handler() {
    let response = send(app(NormalizerConfig::new()), "/foo").await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn unmatched_uppercase_path_still_redirects() {
    // The router would 404, so there is no committed response to protect
    let response = send(app(NormalizerConfig::new()), "/BaR").await;

    assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(location(&response), "/bar");
}

#[tokio::test]
async fn unmatched_lowercase_path_stays_a_404() {
    let response = send(app(NormalizerConfig::new()), "/bar").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn query_string_casing_survives_the_redirect() {
    let response = send(app(NormalizerConfig::new()), "/fOo?hello=wOrld").await;

    assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(location(&response), "/foo?hello=wOrld");
}

#[tokio::test]
async fn chained_rewrites_a_downstream_redirect() {
    let response = send(app(NormalizerConfig::new()), "/legacy").await;

    assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(location(&response), "/movedhere");
}

#[tokio::test]
async fn unchained_leaves_a_downstream_redirect_alone() {
    let response = send(app(NormalizerConfig::new().chained(false)), "/legacy").await;

    assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(location(&response), "/MovedHere");
}

#[tokio::test]
async fn eager_mode_short_circuits_with_a_redirect() {
    let response = send(app(NormalizerConfig::new().defer(false)), "/fOo").await;

    assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(location(&response), "/foo");
}

#[tokio::test]
async fn eager_mode_passes_lowercase_paths_through() {
    let response = send(app(NormalizerConfig::new().defer(false)), "/foo").await;

    assert_eq!(response.status(), StatusCode::OK);
}
