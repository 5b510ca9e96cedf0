use anyhow::Result;
use clap::Parser;
use signtext::classifier::StubClassifier;
use signtext::notify::{NatsNotifier, UpdateSink};
use signtext::{create_router, AppState, Config, RealtimeEngine, SignClassifier};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "signtext", about = "Realtime sign language to text service")]
struct Args {
    /// Path to a config file (coded defaults + SIGNTEXT_* env otherwise)
    #[arg(short, long)]
    config: Option<String>,

    /// Override the NATS server URL
    #[arg(long)]
    nats_url: Option<String>,

    /// Override the HTTP port
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let mut cfg = Config::load(args.config.as_deref())?;
    if let Some(url) = args.nats_url {
        cfg.nats.url = url;
    }
    if let Some(port) = args.port {
        cfg.service.http.port = port;
    }

    info!("{} v{}", cfg.service.name, env!("CARGO_PKG_VERSION"));

    let classifier: Arc<dyn SignClassifier> = Arc::new(StubClassifier);

    // Updates are best-effort: a missing NATS server degrades to a
    // notifier-less service rather than refusing to start
    let notifier: Option<Arc<dyn UpdateSink>> = if cfg.nats.enabled {
        match NatsNotifier::connect(&cfg.nats.url).await {
            Ok(notifier) => Some(Arc::new(notifier)),
            Err(e) => {
                warn!(
                    "NATS unavailable ({}); running without update notifications",
                    e
                );
                None
            }
        }
    } else {
        info!("Update notifications disabled by config");
        None
    };

    let engine = Arc::new(RealtimeEngine::new(
        cfg.realtime.clone(),
        Arc::clone(&classifier),
        notifier,
    ));

    // Periodic cleanup of inactive sessions, independent of request traffic
    let sweep_engine = Arc::clone(&engine);
    let sweep_interval = Duration::from_secs(cfg.realtime.sweep_interval_secs);
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(sweep_interval);
        ticker.tick().await; // first tick fires immediately
        loop {
            ticker.tick().await;
            let removed = sweep_engine.sweep_expired().await;
            if removed > 0 {
                info!("Session sweep removed {} inactive sessions", removed);
            }
        }
    });

    let state = AppState::new(engine, classifier);
    let router = create_router(state);

    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    info!("HTTP server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
