use std::sync::Arc;

use tracing::info;

use unimail::{AppState, Config, SmtpMailer, WebServer};

#[tokio::main]
async fn main() {
    // Load configuration
    let mut config = match Config::load("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config.toml: {e}");
            eprintln!("Using default configuration.");
            Config::default()
        }
    };
    config.apply_env_overrides();

    // Initialize logging
    if let Err(e) = unimail::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        unimail::logging::init_console_only(&config.logging.level);
    }

    // SMTP credentials and sender are required; refuse to start without them.
    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {e}");
        std::process::exit(1);
    }

    info!("Unify Mail - welcome email delivery service");

    let mailer = match SmtpMailer::from_config(&config.smtp) {
        Ok(mailer) => mailer,
        Err(e) => {
            eprintln!("Failed to initialize SMTP transport: {e}");
            std::process::exit(1);
        }
    };

    let state = Arc::new(AppState::new(
        Arc::new(mailer),
        config.smtp.from.clone(),
        config.server.is_production(),
    ));

    let server = match WebServer::new(&config.server, state) {
        Ok(server) => server,
        Err(e) => {
            eprintln!("Failed to configure web server: {e}");
            std::process::exit(1);
        }
    };

    info!(
        "Server configured on {}:{}",
        config.server.host, config.server.port
    );

    if let Err(e) = server.run().await {
        eprintln!("Web server error: {e}");
        std::process::exit(1);
    }
}
