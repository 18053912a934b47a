use clap::Parser;
use miette::{IntoDiagnostic, Result};
use mockpay::application::engine::PaymentGateway;
use mockpay::config::SimulationConfig;
use mockpay::interfaces::http;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Address to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 3001)]
    port: u16,

    /// Probability that a transaction creation succeeds, in [0, 1]
    #[arg(long, default_value_t = 0.999)]
    success_rate: f64,

    /// Base latency added to every simulated gateway call, in milliseconds
    #[arg(long, default_value_t = 100)]
    base_delay_ms: u64,

    /// Exclusive upper bound of the random latency jitter, in milliseconds
    #[arg(long, default_value_t = 20)]
    jitter_ms: u64,

    /// Seconds until a created transaction is automatically paid
    #[arg(long, default_value_t = 30)]
    auto_pay_delay_secs: u64,

    /// Prefix of the generated pay and checkout URLs
    #[arg(long, default_value = "mock://tripay.com")]
    url_base: String,
}

impl Cli {
    fn simulation_config(&self) -> SimulationConfig {
        SimulationConfig {
            success_rate: self.success_rate,
            base_delay: Duration::from_millis(self.base_delay_ms),
            max_jitter: Duration::from_millis(self.jitter_ms),
            auto_pay_delay: Duration::from_secs(self.auto_pay_delay_secs),
            url_base: self.url_base.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("mockpay=info,tower_http=info")),
        )
        .init();

    let gateway = Arc::new(PaymentGateway::in_memory(cli.simulation_config()).into_diagnostic()?);
    let config = gateway.config();
    info!(
        success_rate = config.success_rate,
        base_delay_ms = cli.base_delay_ms,
        auto_pay_delay_secs = cli.auto_pay_delay_secs,
        "simulation configured"
    );

    let listener = tokio::net::TcpListener::bind((cli.host.as_str(), cli.port))
        .await
        .into_diagnostic()?;
    let addr = listener.local_addr().into_diagnostic()?;
    info!("mock payment gateway listening on {}", addr);
    info!("point clients at http://{}/api", addr);

    http::serve(listener, gateway.clone(), shutdown_signal())
        .await
        .into_diagnostic()?;

    // the router has been dropped, so this is the last handle
    if let Ok(gateway) = Arc::try_unwrap(gateway) {
        gateway.shutdown().await;
    }
    info!("mock payment gateway stopped");

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown requested"),
        Err(e) => {
            warn!(error = %e, "cannot listen for ctrl-c, running until killed");
            std::future::pending::<()>().await;
        }
    }
}
