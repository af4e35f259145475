use std::{process, sync::Arc};

use postdesk::{
    application::{admin::posts::AdminPostService, error::AppError, repos::PostStore},
    config,
    infra::{
        db::PostgresRepositories,
        error::InfraError,
        http::{self, AdminState},
        memory::InMemoryPostStore,
        telemetry,
    },
};
use tracing::{Dispatch, Level, dispatcher, error, info, warn};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    let chain = error_chain(error);

    if dispatcher::has_been_set() {
        error!(error = %error, chain = ?chain, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, chain = ?chain, "application error");
    });
}

fn error_chain(error: &dyn std::error::Error) -> Vec<String> {
    let mut chain = Vec::new();
    let mut current = error.source();
    while let Some(inner) = current {
        chain.push(inner.to_string());
        current = inner.source();
    }
    chain
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Serve(Box::<config::ServeArgs>::default()));

    telemetry::init(&settings.logging).map_err(AppError::from)?;

    match command {
        config::Command::Serve(_) => run_serve(settings).await,
        config::Command::Migrate(_) => run_migrate(settings).await,
    }
}

async fn run_serve(settings: config::Settings) -> Result<(), AppError> {
    let database = init_database(&settings).await?;

    let store: Arc<dyn PostStore> = match database.clone() {
        Some(db) => db as Arc<dyn PostStore>,
        None => {
            warn!(
                target = "postdesk::startup",
                "database.url is not set; posts are kept in memory and lost on exit"
            );
            Arc::new(InMemoryPostStore::new())
        }
    };

    let posts = AdminPostService::new(store)
        .with_simulated_latency(settings.admin.simulated_latency);
    let mut admin_state = AdminState::new(Arc::new(posts), settings.admin.site_title.as_str());
    if let Some(db) = database {
        admin_state = admin_state.with_database(db);
    }

    serve_http(&settings, admin_state).await
}

async fn run_migrate(settings: config::Settings) -> Result<(), AppError> {
    if init_database(&settings).await?.is_none() {
        return Err(InfraError::MissingDatabaseUrl.into());
    }
    info!(target = "postdesk::migrate", "Migrations applied");
    Ok(())
}

/// Connect and migrate when a database is configured.
async fn init_database(
    settings: &config::Settings,
) -> Result<Option<Arc<PostgresRepositories>>, AppError> {
    let Some(database_url) = settings.database.url.as_deref() else {
        return Ok(None);
    };

    let pool = PostgresRepositories::connect(database_url, settings.database.max_connections.get())
        .await
        .map_err(InfraError::from)?;

    PostgresRepositories::run_migrations(&pool)
        .await
        .map_err(InfraError::from)?;

    Ok(Some(Arc::new(PostgresRepositories::new(pool))))
}

async fn serve_http(settings: &config::Settings, admin_state: AdminState) -> Result<(), AppError> {
    let router = http::build_admin_router(admin_state);

    let listener = tokio::net::TcpListener::bind(settings.server.addr)
        .await
        .map_err(InfraError::from)?;

    info!(
        target = "postdesk::startup",
        addr = %settings.server.addr,
        "Listening"
    );

    let grace = settings.server.graceful_shutdown;
    let server = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal());

    // Bound the drain once the signal has fired.
    tokio::select! {
        result = server => {
            result.map_err(|err| AppError::unexpected(format!("server error: {err}")))
        }
        _ = async {
            shutdown_signal().await;
            tokio::time::sleep(grace).await;
        } => {
            warn!(
                target = "postdesk::shutdown",
                grace_seconds = grace.as_secs(),
                "Graceful shutdown timed out"
            );
            Ok(())
        }
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(
            target = "postdesk::shutdown",
            error = %err,
            "Failed to listen for shutdown signal"
        );
        std::future::pending::<()>().await;
    }
    info!(target = "postdesk::shutdown", "Shutdown signal received");
}
