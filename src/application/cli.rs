use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use yansi::Paint;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Gateway;
use crate::domain::services::actions::help_text;
use crate::infrastructure::gateway::GatewayManager;

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    std::process::exit(0);
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if let Some(parent) = config_file_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    let mut file = fs::File::create(config_file_path.clone()).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!("Created default config file at {config_file_path_str}");
    return Ok(());
}

async fn print_current_analysis() -> Result<()> {
    let analysis = GatewayManager::get().current_analysis().await?;
    println!("{}", serde_json::to_string_pretty(&analysis)?);

    return Ok(());
}

async fn clear_backend_session(session_id: &str) -> Result<()> {
    GatewayManager::get().clear_session(session_id).await;
    println!("Asked the backend to clear session {session_id}");

    return Ok(());
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_debug() -> Command {
    let mut cmd = Command::new("debug");
    cmd = cmd.about("Debug helpers for dentalchat")
        .hide(true)
        .subcommand(
            Command::new("log-path").about("Output path to debug log file generated when running dentalchat with environment variable RUST_LOG=dentalchat")
        )
        .subcommand(
            Command::new("enum-config").about("List all config keys as strings.")
        );

    return cmd;
}

fn arg_api_url() -> Arg {
    return Arg::new(ConfigKey::ApiURL.to_string())
        .short('a')
        .long(ConfigKey::ApiURL.to_string())
        .env("DENTALCHAT_API_URL")
        .num_args(1)
        .help(format!(
            "Base URL of the dental analysis backend. [default: {}]",
            Config::default(ConfigKey::ApiURL)
        ));
}

fn arg_stream_delay() -> Arg {
    return Arg::new(ConfigKey::StreamDelay.to_string())
        .long(ConfigKey::StreamDelay.to_string())
        .env("DENTALCHAT_STREAM_DELAY")
        .num_args(1)
        .help(format!(
            "Milliseconds to pause before revealing each word of a reply. [default: {}]",
            Config::default(ConfigKey::StreamDelay)
        ));
}

fn arg_session_id() -> Arg {
    return Arg::new(ConfigKey::SessionID.to_string())
        .long(ConfigKey::SessionID.to_string())
        .env("DENTALCHAT_SESSION_ID")
        .num_args(1)
        .help("Backend conversation id to reuse. A new one is generated when omitted.");
}

fn subcommand_chat() -> Command {
    return Command::new("chat")
        .about("Start a new chat session.")
        .arg(arg_api_url())
        .arg(arg_stream_delay())
        .arg(arg_session_id());
}

fn subcommand_analysis() -> Command {
    return Command::new("analysis")
        .about("Print the analysis the backend currently holds as JSON.")
        .arg(arg_api_url());
}

fn subcommand_clear_session() -> Command {
    return Command::new("clear-session")
        .about("Ask the backend to forget the conversation context of a session.")
        .arg(arg_api_url())
        .arg(
            clap::Arg::new(ConfigKey::SessionID.to_string())
                .short('i')
                .long("id")
                .help("Session ID")
                .num_args(1)
                .required(true),
        );
}

pub fn build() -> Command {
    let commands_text = help_text()
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            if line.starts_with("COMMANDS:") {
                return Paint::new(format!("CHAT {line}"))
                    .underline()
                    .bold()
                    .to_string();
            }
            return line.to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");

    let about = format!(
        "{}\n\nVersion: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
    );

    return Command::new("dentalchat")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(commands_text)
        .arg_required_else_help(false)
        .subcommand(subcommand_chat())
        .subcommand(subcommand_analysis())
        .subcommand(subcommand_clear_session())
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(subcommand_debug())
        .arg(arg_api_url())
        .arg(arg_stream_delay())
        .arg(arg_session_id())
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("DENTALCHAT_CONFIG_FILE")
                .num_args(1)
                .help(format!("Path to configuration file [default: {}]", Config::default(ConfigKey::ConfigFile)))
                .global(true)
        );
}

pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("debug", debug_matches)) => {
            match debug_matches.subcommand() {
                Some(("log-path", _)) => {
                    let log_path = dirs::cache_dir()
                        .unwrap_or_else(|| return path::PathBuf::from("."))
                        .join("dentalchat/debug.log");
                    println!("{}", log_path.to_string_lossy());
                }
                Some(("enum-config", _)) => {
                    let res = ConfigKey::VARIANTS.join("\n");
                    println!("{}", res);
                }
                _ => {
                    subcommand_debug().print_long_help()?;
                }
            }

            return Ok(false);
        }
        Some(("chat", subcmd_matches)) => {
            Config::load(vec![&matches, subcmd_matches]).await?;
        }
        Some(("analysis", subcmd_matches)) => {
            Config::load(vec![&matches, subcmd_matches]).await?;
            print_current_analysis().await?;
            return Ok(false);
        }
        Some(("clear-session", subcmd_matches)) => {
            Config::load(vec![&matches, subcmd_matches]).await?;
            clear_backend_session(&Config::get(ConfigKey::SessionID)).await?;
            return Ok(false);
        }
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(false);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(false);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(false);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(false);
            }
        },
        _ => {
            Config::load(vec![&matches]).await?;
        }
    }

    return Ok(true);
}
