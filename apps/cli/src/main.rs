mod args;
mod config;
mod dirs;

use std::io;
use std::net::SocketAddr;

use app_api::AppContext;
use http_api::HttpState;
use waitdash_app::{AppPaths, AppState, ensure_app_data_dir};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = args::parse_args().map_err(|err| {
        eprintln!("{err}");
        args::print_help();
        io::Error::new(io::ErrorKind::InvalidInput, "invalid arguments")
    })?;

    let data_dir = dirs::resolve_data_dir().map_err(io::Error::other)?;
    if data_dir.matched_existing {
        println!("Using existing data dir: {}", data_dir.dir.display());
    } else {
        println!("Using data dir: {}", data_dir.dir.display());
    }

    let config = config::load_or_create(&data_dir.dir).map_err(io::Error::other)?;
    if config.created {
        println!(
            "Created config at {} (default port {}).",
            config.file.display(),
            config.config.port
        );
    }

    let port = args.port.unwrap_or(config.config.port);

    let mut paths = AppPaths::new(data_dir.dir.clone());
    // Precedence for the event-log location: flag, then config, then the
    // default directory under the data dir.
    if let Some(logs_dir) = args.logs_dir.or(config.config.logs_dir) {
        paths.event_logs_dir = logs_dir;
    }
    ensure_app_data_dir(&paths).map_err(|err| io::Error::other(err.to_string()))?;

    let app_state = AppState::new(paths.db_path, paths.event_logs_dir);
    if let Err(err) = app_state.setup_db() {
        return Err(io::Error::other(format!("failed to initialize database: {}", err)).into());
    }

    let replay_state = app_state.clone();
    tokio::task::spawn_blocking(move || match replay_state.refresh_data() {
        Ok(stats) => {
            if stats.sessions_tracked > 0 || !stats.issues.is_empty() {
                log::info!(
                    "startup replay: {} session(s) from {} file(s), {} issue(s)",
                    stats.sessions_tracked,
                    stats.files_scanned,
                    stats.issues.len()
                );
            }
        }
        Err(err) => log::error!("failed to replay event logs on startup: {}", err),
    });

    let context = AppContext {
        app_state,
        app_data_dir: data_dir.dir,
    };

    let state = HttpState::new(context);
    let csrf_token = state.csrf_token().to_string();
    let router = http_api::router(state);

    let (listener, actual_port, used_fallback) = bind_port(port).await?;
    let url = format!("http://127.0.0.1:{actual_port}");

    if used_fallback {
        eprintln!("Configured port {port} was unavailable; using {actual_port} for this run.");
    }

    println!("WaitDash is running at {url}");
    println!("API token: {csrf_token}");
    println!("Press Ctrl+C to stop.");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn bind_port(port: u16) -> Result<(tokio::net::TcpListener, u16, bool), io::Error> {
    if port == 0 {
        let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let actual_port = listener.local_addr()?.port();
        return Ok((listener, actual_port, false));
    }

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => Ok((listener, port, false)),
        Err(_) => {
            let listener =
                tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
            let actual_port = listener.local_addr()?.port();
            Ok((listener, actual_port, true))
        }
    }
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
