use std::{
    fs::OpenOptions,
    net::SocketAddr,
    path::PathBuf,
    process::ExitCode,
    sync::Arc,
    time::Duration,
};

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware,
};
use axum_server::Handle;
use clap::{Parser, ValueEnum};
use tower_http::trace::TraceLayer;

#[cfg(debug_assertions)]
use tower_livereload::LiveReloadLayer;

use tracing_subscriber::{EnvFilter, Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use ledgerlite::{
    AppState, DEFAULT_LATENCY, ErrorPolicy, FixtureSource, OptimisticPolicy, PaginationConfig,
    SuccessPolicy, build_router, graceful_shutdown, logging_middleware,
};

/// What happens to the optimistic placeholder once a new transaction is saved.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum OnSuccess {
    /// Swap the placeholder for the saved transaction.
    Replace,
    /// Reload the whole list on the next page view.
    Invalidate,
    /// Leave the placeholder as is.
    Keep,
}

/// What happens to the optimistic placeholder when saving a new transaction fails.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum OnError {
    /// Remove the placeholder.
    Rollback,
    /// Leave the placeholder as is.
    Keep,
}

/// The web server for ledgerlite.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the JSON document the transactions are seeded from.
    #[arg(long, default_value = "static/data/transactions.json")]
    fixture_path: PathBuf,

    /// The port to serve the app from.
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Milliseconds added to every call to the transaction API.
    #[arg(long, default_value_t = DEFAULT_LATENCY.as_millis() as u64)]
    latency_ms: u64,

    /// The number of transactions per table page.
    #[arg(long, default_value_t = 10)]
    page_size: u64,

    /// The maximum number of page links in the pagination bar.
    #[arg(long, default_value_t = 5)]
    max_pages: u64,

    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    #[arg(long, default_value = "Etc/UTC")]
    timezone: String,

    /// What to do with the placeholder once a new transaction is saved.
    #[arg(long, value_enum, default_value_t = OnSuccess::Replace)]
    on_success: OnSuccess,

    /// What to do with the placeholder when saving a new transaction fails.
    #[arg(long, value_enum, default_value_t = OnError::Rollback)]
    on_error: OnError,

    /// Log every request and response, bodies included.
    #[arg(long)]
    log_bodies: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(error) = setup_logging() {
        eprintln!("Could not set up logging: {error}");
        return ExitCode::FAILURE;
    }

    let optimistic_policy = OptimisticPolicy {
        on_success: match args.on_success {
            OnSuccess::Replace => SuccessPolicy::ReplacePlaceholder,
            OnSuccess::Invalidate => SuccessPolicy::Invalidate,
            OnSuccess::Keep => SuccessPolicy::KeepPlaceholder,
        },
        on_error: match args.on_error {
            OnError::Rollback => ErrorPolicy::Rollback,
            OnError::Keep => ErrorPolicy::KeepPlaceholder,
        },
    };

    let pagination_config = PaginationConfig {
        page_size: args.page_size,
        max_pages: args.max_pages,
        ..Default::default()
    };

    let state = match AppState::new(
        FixtureSource::Path(args.fixture_path),
        Duration::from_millis(args.latency_ms),
        optimistic_policy,
        &args.timezone,
        pagination_config,
    ) {
        Ok(state) => state,
        Err(error) => {
            tracing::error!("Could not create the app state: {error}");
            return ExitCode::FAILURE;
        }
    };

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = build_router(state);

    let router = if args.log_bodies {
        router.layer(middleware::from_fn(logging_middleware))
    } else {
        router
    };

    let router = add_tracing_layer(router);

    #[cfg(debug_assertions)]
    let router = router.layer(LiveReloadLayer::new());

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));
    tracing::info!("HTTP server listening on {}", addr);

    if let Err(error) = axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
    {
        tracing::error!("Server stopped with an error: {error}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn setup_logging() -> std::io::Result<()> {
    let stdout_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")));

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open("debug.log")?;

    let debug_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(Arc::new(log_file))
        .with_filter(filter::LevelFilter::DEBUG);

    tracing_subscriber::registry()
        .with(stdout_log)
        .with(debug_log)
        .init();

    Ok(())
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // By default, `TraceLayer` will log 5xx responses but we're doing our specific
        // logging of errors so disable that
        .on_failure(());

    router.layer(tracing_layer)
}
