use std::sync::Arc;
use lambda_http::{service_fn, Error, Request};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use herald_lambda::router::handle_lambda;
use herald_shared::services::dispatch_service::NotificationDispatcher;
use herald_shared::utilities::config;

#[tokio::main]
async fn main() -> Result<(), Error> {
    config::init();

    // Structured logging; `log` records from the shared crate are bridged in
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .try_init()?;

    std::panic::set_hook(Box::new(|info| {
        log::error!("Application panicked: {}", info);
    }));

    let app_config = config::load()?;
    info!(
        supabase = app_config.supabase.is_some(),
        firebase = app_config.firebase.is_some(),
        "Configuration loaded"
    );

    let dispatcher = Arc::new(NotificationDispatcher::from_config(app_config)?);

    lambda_http::run(service_fn(move |event: Request| {
        let dispatcher = dispatcher.clone();
        async move { handle_lambda(event, &dispatcher).await }
    }))
    .await?;

    Ok(())
}
