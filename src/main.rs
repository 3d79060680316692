//! Tolkflow - interpreter booking lifecycle engine
//!
//! Entry point: load config, set up logging, connect PostgreSQL, wire the
//! transports and serve the HTTP gateway.

use std::sync::Arc;

use tolkflow::config::AppConfig;
use tolkflow::notify::{HttpMailer, HttpPushTransport, HttpSmsTransport};
use tolkflow::service::BookingService;
use tolkflow::store::{schema, Database};

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

/// Get port override from command line (--port argument)
fn get_port_override() -> Option<u16> {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--port" && i + 1 < args.len() {
            return args[i + 1].parse().ok();
        }
    }
    None
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = get_env();
    let config = AppConfig::load(&env);
    let _log_guard = tolkflow::logging::init_logging(&config);

    tracing::info!(
        "Starting Tolkflow engine in {} mode (git {})",
        env,
        env!("GIT_HASH")
    );

    let db = Arc::new(Database::connect(&config.postgres_url).await?);
    schema::init_schema(db.pool()).await?;

    let notify = &config.notify;
    let push = Arc::new(HttpPushTransport::new(
        notify.push_endpoint.clone(),
        notify.push_app_id.clone(),
        notify.push_rest_key.clone(),
    ));
    let sms = Arc::new(HttpSmsTransport::new(
        notify.sms_endpoint.clone(),
        notify.sms_api_key.clone(),
        notify.sms_sender.clone(),
    ));
    let mailer = Arc::new(HttpMailer::new(
        notify.mail_endpoint.clone(),
        notify.mail_from_address.clone(),
        notify.mail_from_name.clone(),
    ));

    let service = Arc::new(BookingService::new(db, push, sms, mailer));

    let port = get_port_override().unwrap_or(config.gateway.port);
    tolkflow::gateway::serve(service, &config.gateway.host, port).await
}
