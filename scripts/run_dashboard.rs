use clap::{Parser, Subcommand};
use friday_adaptor_terminal::{TerminalConfig, TerminalDashboard};
use friday_adaptor_web::{default_routes, DashboardServer, DashboardServerConfig};
use friday_core::utils::logger::init_logging;
use friday_core::{load_env, load_env_from_path, proxy_client_timeout};
use friday_provider_openai::render_settings;
use std::ffi::OsString;
use std::path::Path;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "run-dashboard", about = "Grok x F.R.I.D.A.Y. dashboard")]
struct Cli {
    #[arg(long, global = true, env = "FRIDAY_LOG_LEVEL", default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the persona proxy endpoints and the browser dashboard
    Serve,

    /// Query the personas from this terminal
    Terminal {
        /// Proxy server to call (defaults to FRIDAY_HOST:FRIDAY_PORT)
        #[arg(long, env = "FRIDAY_PROXY_URL")]
        proxy_url: Option<String>,

        /// Answer with simulated personas; no network calls
        #[arg(long)]
        offline: bool,

        /// Start the proxy server in this process first
        #[arg(long, conflicts_with = "offline")]
        with_server: bool,
    },
}

async fn start_server(config: DashboardServerConfig) -> friday_core::Result<DashboardServer> {
    let routes = default_routes();
    let upstreams: Vec<_> = routes.iter().map(|r| &r.upstream).collect();
    render_settings(&upstreams);

    let mut server = DashboardServer::new(config, routes);
    server.start().await?;
    Ok(server)
}

/// Load `.env` (or `env_file`) before parsing so it feeds clap's `env` fallbacks
fn load_cli<I, T>(env_file: Option<&Path>, args: I) -> friday_core::Result<Cli>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match env_file {
        Some(path) => load_env_from_path(path)?,
        None => load_env()?,
    }
    Ok(Cli::try_parse_from(args).unwrap_or_else(|e| e.exit()))
}

#[tokio::main]
async fn main() -> friday_core::Result<()> {
    let cli = load_cli(None, std::env::args_os())?;
    std::env::set_var("FRIDAY_LOG_LEVEL", &cli.log_level);
    init_logging();

    let server_config = DashboardServerConfig::from_env();

    match cli.command {
        Command::Serve => {
            let mut server = start_server(server_config).await?;
            if let Some(url) = server.base_url() {
                info!("Dashboard ready at {}", url);
            }
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Failed to listen for ctrl-c: {}", e);
            }
            server.stop().await?;
        }
        Command::Terminal {
            proxy_url,
            offline,
            with_server,
        } => {
            let default_url = format!("http://{}", server_config.bind_addr());
            let request_timeout = proxy_client_timeout(server_config.upstream_timeout);
            let mut server = None;
            let proxy_base_url = if with_server {
                let started = start_server(server_config).await?;
                let url = started.base_url();
                server = Some(started);
                url
            } else {
                proxy_url
            }
            .unwrap_or(default_url);

            let config = TerminalConfig {
                proxy_base_url,
                request_timeout,
                offline,
            };
            TerminalDashboard::new(&config)?.run_stdio().await?;

            if let Some(mut server) = server {
                server.stop().await?;
            }
        }
    }

    Ok(())
}
