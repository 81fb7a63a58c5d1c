#![deny(clippy::implicit_return)]
#![allow(clippy::needless_return)]

mod application;
mod configuration;
mod domain;
mod infrastructure;

use std::env;
use std::path;
use std::process;
use std::time::Duration;

use anyhow::Error;
use domain::models::Action;
use domain::models::Event;
use domain::models::Session;
use domain::services::StreamSimulator;
use infrastructure::gateway::GatewayManager;
use tokio::sync::mpsc;
use tokio::task;
use yansi::Paint;

use crate::application::cli;
use crate::application::ui;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::services::actions::ActionsService;

fn handle_error(err: Error) {
    eprintln!(
        "{}",
        Paint::red(format!(
            "Oh no! dentalchat has failed with the following app version and error.\n\nVersion: {}\nError: {}",
            env!("CARGO_PKG_VERSION"),
            err
        ))
    );

    let backtrace = err.backtrace();
    if backtrace.to_string() == "disabled backtrace" {
        let args = env::args().collect::<Vec<String>>().join(" ");
        eprintln!("\nRunning the following can help explain further what the issue is:");
        eprintln!("\nRUST_BACKTRACE=1 {args}");
    } else {
        eprintln!("\n{}", backtrace);
    }

    process::exit(1);
}

fn session_from_config() -> Session {
    let session_id = Config::get(ConfigKey::SessionID);
    if session_id.is_empty() {
        return Session::default();
    }

    return Session::new(&session_id);
}

fn simulator_from_config() -> StreamSimulator {
    let delay_ms = Config::get(ConfigKey::StreamDelay)
        .parse::<u64>()
        .unwrap_or_else(|_| return StreamSimulator::default().delay().as_millis() as u64);

    return StreamSimulator::new(Duration::from_millis(delay_ms));
}

#[tokio::main]
async fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));

    let debug_log_dir = env::var("DENTALCHAT_LOG_DIR").unwrap_or_else(|_| {
        return dirs::cache_dir()
            .unwrap_or_else(|| return path::PathBuf::from("."))
            .join("dentalchat")
            .to_string_lossy()
            .to_string();
    });

    let file_appender = tracing_appender::rolling::never(debug_log_dir, "debug.log");
    let (writer, _guard) = tracing_appender::non_blocking(file_appender);
    if env::var("RUST_LOG")
        .unwrap_or_else(|_| return "".to_string())
        .contains("dentalchat")
    {
        tracing_subscriber::fmt()
            .json()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(writer)
            .init();
    }

    let ready_res = cli::parse().await;
    if let Err(ready_err) = ready_res {
        handle_error(ready_err);
        return;
    }
    if !ready_res.unwrap() {
        process::exit(0);
    }

    let session = session_from_config();
    let simulator = simulator_from_config();
    let gateway = GatewayManager::get();
    tracing::debug!(
        session_id = session.id.as_str(),
        stream_delay_ms = simulator.delay().as_millis() as u64,
        "Starting chat"
    );

    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let (event_tx, event_rx) = mpsc::unbounded_channel::<Event>();

    let mut background_futures = task::JoinSet::new();
    let worker_gateway = gateway.clone();
    let worker_session = session.clone();
    background_futures.spawn(async move {
        return ActionsService::start(
            worker_gateway,
            simulator,
            worker_session,
            event_tx,
            &mut action_rx,
        )
        .await;
    });

    let ui_future = ui::start(session, gateway, action_tx, event_rx);

    let res = tokio::select!(
        res = background_futures.join_next() => res.unwrap().unwrap(),
        res = ui_future => res,
    );

    if let Err(err) = res {
        handle_error(err);
    }

    process::exit(0);
}
