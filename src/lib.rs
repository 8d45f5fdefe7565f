//! Lowercase request-path normalization.
//!
//! Case-insensitive front-ends still want one canonical lowercase URL per
//! resource, so this crate 301-redirects any request path containing
//! uppercase characters to its lowercase equivalent. The decision lives in
//! [`PathCaseNormalizer`], independent of any framework; [`middleware`]
//! plugs it into an axum router.

pub mod config;
pub mod context;
pub mod error;
pub mod middleware;
pub mod normalizer;

pub use config::NormalizerConfig;
pub use context::RequestContext;
pub use normalizer::PathCaseNormalizer;
