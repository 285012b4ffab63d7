//! Study Timer - A state-managed HTTP server driving a Pomodoro study timer
//! 
//! This is the main entry point for the study-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use study_timer::{
    config::Config,
    state::{AppState, SessionState},
    api::create_router,
    tasks::{expiry_notifier_task, session_ticker_task},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("study_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting study-timer server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, format={}, sessions={}, tick={}ms",
          config.host, config.port, config.format, config.sessions, config.tick_millis);

    // Create application state
    let session = SessionState::new(config.format, config.sessions)?;
    let state = Arc::new(AppState::new(config.port, config.host.clone(), session));

    // Start the scheduler and the expiry notifier
    let ticker_state = Arc::clone(&state);
    let tick_period = config.tick_period();
    tokio::spawn(async move {
        session_ticker_task(ticker_state, tick_period).await;
    });

    let notify_command = config.notify_command();
    if let Some(command) = &notify_command {
        info!("Notification command: {} (timeout {:?})", command, command.timeout);
    }
    let notifier_state = Arc::clone(&state);
    tokio::spawn(async move {
        expiry_notifier_task(notifier_state, notify_command).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;
    
    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start      - Start the countdown");
    info!("  POST /pause      - Pause the countdown");
    info!("  POST /reset      - Reset to a full pomodoro");
    info!("  POST /tick       - Advance the countdown by one second");
    info!("  POST /format     - Change format {{\"format\": \"50+10\"}}");
    info!("  POST /sessions   - Change session target {{\"total\": 3}}");
    info!("  POST /session    - Select session {{\"kind\": \"short_break\"}}");
    info!("  GET  /status     - Current session and server info");
    info!("  GET  /labels     - Localized labels (?lang=en|ko|uz)");
    info!("  GET  /formats    - Known formats and durations");
    info!("  GET  /health     - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);
    
    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
