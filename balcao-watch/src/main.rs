use balcao_client::{HelperWithFallback, OrderSource, OrdersApi, PrintHelperClient};
use balcao_watch::config::{self, Config};
use balcao_watch::{Dispatcher, OrderFetcher, PollingSession, SeenSet, TracingNotifier};
use shared::StaffRole;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("balcao_watch=info,balcao_client=info")),
        )
        .init();

    let config = Config::from_env();
    tracing::info!(api = %config.api_base_url, helper = %config.print_helper_url, "Starting balcão watch agent");

    let backend = Arc::new(OrdersApi::new(&config.api_base_url));
    let helper = PrintHelperClient::new(&config.print_helper_url);

    // One-shot reachability report for the operator
    match helper.health().await {
        Ok(health) => tracing::info!(status = %health.status, "Print helper reachable"),
        Err(e) if e.is_unreachable() => {
            tracing::warn!("Print helper unreachable, prints will fall back to the backend")
        }
        Err(e) => tracing::warn!(error = %e, "Print helper health check failed"),
    }

    let settings = config::load_printer_settings(&config.printer_settings_path());
    let gateway = Arc::new(HelperWithFallback::new(helper, backend.clone(), settings));
    let fetcher = OrderFetcher::new(backend as Arc<dyn OrderSource>);
    let seen = SeenSet::load(config.seen_path());
    let dispatcher = Dispatcher::new(Arc::new(TracingNotifier), gateway, settings);

    let session = PollingSession::new(
        fetcher,
        dispatcher,
        seen,
        config.poll_interval,
        config.page_size,
        config.priming_page_size,
    );
    session.start(StaffRole::Employee).await?;

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown signal received");
    session.stop();

    Ok(())
}
