use axum::{Router, middleware, routing::get};
use pathfold::config::NormalizerConfig;
use pathfold::error::PathfoldResult;
use pathfold::middleware::redirect_uppercase_paths;
use pathfold::normalizer::PathCaseNormalizer;
use std::sync::Arc;
use std::{fs, io};
use tower::ServiceBuilder;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const CONFIG_PATH: &str = "pathfold.toml";

#[tokio::main]
async fn main() -> PathfoldResult<()> {
    ctrlc::set_handler(move || {
        error!("Caught CTRL-C... Exiting right away");
        std::process::exit(1);
    })
    .expect("Error setting Ctrl-C handler");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("{}=debug,tower_http=debug", env!("CARGO_CRATE_NAME")).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let normalizer = Arc::new(PathCaseNormalizer::new(load_config()?));

    // build our application with some routes
    let app = Router::new()
        .route("/", get(index))
        .route("/hello/world", get(hello))
        .layer(
            ServiceBuilder::new()
                // Uppercase paths mostly arrive from QR codes and retyped links
                .layer(middleware::from_fn_with_state(
                    normalizer,
                    redirect_uppercase_paths,
                ))
                .layer(tower_http::trace::TraceLayer::new_for_http()),
        );

    // run it with hyper
    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
    tracing::debug!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}

fn load_config() -> PathfoldResult<NormalizerConfig> {
    match fs::read_to_string(CONFIG_PATH) {
        Ok(raw) => Ok(toml::from_str(&raw)?),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!("no {CONFIG_PATH} found, using defaults");
            Ok(NormalizerConfig::default())
        }
        Err(e) => Err(e.into()),
    }
}

async fn index() -> &'static str {
    "pathfold demo\n"
}

async fn hello() -> &'static str {
    "hello\n"
}
