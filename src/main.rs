use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use pipewatch::graph::Thresholds;
use pipewatch::{build_graph, render, server, ManagementClient, Settings};

#[derive(Parser, Debug)]
#[command(name = "pipewatch")]
#[command(about = "Topology visualizer for data-pipeline worker groups")]
struct Args {
    /// Path to a TOML config file (keys: base_url, token, username,
    /// password, listen)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Management API base URL (overrides config)
    #[arg(long)]
    base_url: Option<String>,

    /// Bearer token for the management API (overrides config)
    #[arg(long)]
    token: Option<String>,

    /// Write output to this file instead of stdout
    #[arg(short, long, conflicts_with = "serve")]
    output: Option<PathBuf>,

    /// Output format: dot, or any format the renderer supports (svg, png, ...)
    #[arg(short, long, default_value = "dot", conflicts_with = "serve")]
    format: String,

    /// Serve an HTML page with the rendered topology instead of writing once
    #[arg(long)]
    serve: bool,

    /// Listen address for --serve (overrides config)
    #[arg(long)]
    listen: Option<String>,

    /// Error/drop rate warning threshold, percent
    #[arg(long, default_value = "5.0")]
    health_warn: f64,

    /// Error/drop rate critical threshold, percent
    #[arg(long, default_value = "10.0")]
    health_crit: f64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let mut settings = Settings::load(args.config.as_deref())?;
    if let Some(base_url) = args.base_url {
        settings.base_url = base_url;
    }
    if let Some(token) = args.token {
        settings.token = Some(token);
    }
    if let Some(listen) = args.listen {
        settings.listen = listen;
    }

    let thresholds = Thresholds {
        warning_pct: args.health_warn,
        critical_pct: args.health_crit,
    };

    let mut builder = ManagementClient::builder().base_url(settings.base_url.as_str());
    if let Some(token) = &settings.token {
        builder = builder.token(token.as_str());
    }
    if let (Some(username), Some(password)) = (&settings.username, &settings.password) {
        builder = builder.credentials(username.as_str(), password.as_str());
    }
    let mut client = builder.build();
    client.authenticate().await?;

    if args.serve {
        return server::serve(&settings.listen, Arc::new(client), thresholds).await;
    }

    let graph = build_graph(&client, &thresholds).await?;

    let bytes = match args.format.as_str() {
        "dot" => graph.to_dot().into_bytes(),
        format => render::render(&graph.to_dot(), format).await?,
    };

    match args.output {
        Some(path) => std::fs::write(&path, &bytes)?,
        None => std::io::stdout().write_all(&bytes)?,
    }

    Ok(())
}
