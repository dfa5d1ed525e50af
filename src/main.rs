use anyhow::{anyhow, Result};
use button_monitor::app;
use button_monitor::config::{Config, Overrides};
use button_monitor::monitor::CountdownHandler;
use button_monitor::resolver::EndpointUrl;
use button_monitor::{logging, utils};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "button-monitor")]
#[command(about = "Watch the button's countdown in your terminal", long_about = None)]
#[command(version)]
struct Cli {
    /// Page to scan for the live feed URL
    #[arg(long, value_name = "URL")]
    source_url: Option<String>,

    /// Connect to this WebSocket URL directly instead of resolving one
    #[arg(long, value_name = "WS_URL")]
    endpoint: Option<EndpointUrl>,

    /// Host the feed URL must point at
    #[arg(long, value_name = "HOST")]
    endpoint_host: Option<String>,

    /// Print connection diagnostics to stderr
    #[arg(short, long)]
    debug: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Exit as soon as monitoring ends instead of waiting for a key press
    #[arg(long)]
    no_wait: bool,

    /// Config file (default: <config dir>/button-monitor/config.toml)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    config.apply_env();
    config.apply_overrides(Overrides {
        source_url: cli.source_url,
        endpoint_host: cli.endpoint_host,
        debug: cli.debug,
        no_color: cli.no_color,
        no_wait: cli.no_wait,
    });

    logging::init(config.debug);
    if !config.color {
        colored::control::set_override(false);
    }
    utils::install_terminal_panic_hook();

    let waiting = config.wait_for_key && utils::stdin_is_terminal();
    let monitor = app::spawn(config, cli.endpoint, CountdownHandler::stdout())?;

    // Any key ends the program, whether or not the feed is still streaming.
    let result = if waiting {
        utils::wait_for_key()
    } else {
        match monitor.join() {
            Ok(result) => result.map(|(outcome, _)| {
                tracing::debug!(?outcome, "run ended");
            }),
            Err(_) => Err(anyhow!("monitor thread panicked")),
        }
    };

    utils::cleanup_terminal();
    result
}
