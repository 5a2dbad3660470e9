use escrutador::{AppConfig, AppState, EscrutadorServer, Manuscript};
use rmcp::{transport::stdio, ServiceExt};
use std::env;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, config_error) = AppConfig::load_or_default(Some("config.toml"));
    init_tracing(&config)?;

    if let Some(e) = config_error {
        tracing::warn!(error = %e, "Ignoring config.toml, using default configuration");
    }

    let args: Vec<String> = env::args().collect();

    tracing::info!("Loaded configuration: {:?}", config.server.name);

    let http_port = config.server.http_port;
    let default_bind = config.server.bind_addr.clone();
    let app_state = AppState::from_config(config)?;

    match args.get(1).map(String::as_str) {
        Some("--http") => {
            let port = args
                .get(2)
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(http_port);

            let bind_addr = args.get(3).map(|s| s.as_str()).unwrap_or(&default_bind);

            escrutador::server::http::serve(app_state, bind_addr, port).await?;
        }
        Some("--file") => {
            let path = args
                .get(2)
                .ok_or_else(|| anyhow::anyhow!("usage: escrutador --file <path>"))?;

            let manuscript = Manuscript::from_path(path).await?;
            let response = app_state.analyze(&manuscript).await?;

            if let Some(preview) = &response.preview {
                println!("Preview");
                println!("{}", preview);
                println!();
            }
            print!("{}", response.report.render_text());
        }
        _ => {
            tracing::info!("Starting MCP Server on stdio");
            let server = EscrutadorServer::new(app_state);
            let service = server.serve(stdio()).await?;
            service.waiting().await?;
            tracing::info!("MCP Server shutting down");
        }
    }

    Ok(())
}

fn init_tracing(config: &AppConfig) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new(format!("escrutador={}", config.logging.level)),
    };

    let registry = tracing_subscriber::registry().with(filter);

    if config.logging.format == "json" {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()?;
    }

    Ok(())
}
