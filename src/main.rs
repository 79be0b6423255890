use anyhow::{Context, Result};
use clap::Parser;

use salesboard::cli::{Cli, Commands};
use salesboard::config::{get_config, init_config_from, update_config};
use salesboard::runtime::modes::{self, Mode};
use salesboard::system::init_logging;

#[actix_web::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    init_config_from(cli.config.as_deref()).context("Failed to load configuration")?;

    // 命令行参数覆盖配置文件
    let serve_overrides = match &cli.command {
        Some(Commands::Serve { host, port }) => (host.clone(), *port),
        _ => (None, None),
    };
    let data_dir = cli.data_dir.clone();
    update_config(|config| {
        if let Some(dir) = data_dir {
            config.data.data_dir = dir;
        }
        if let Some(host) = serve_overrides.0 {
            config.server.host = host;
        }
        if let Some(port) = serve_overrides.1 {
            config.server.port = port;
        }
    });

    let config = get_config();
    let guard = init_logging(&config.logging).context("Failed to initialize logging")?;

    let result = match modes::detect_mode(cli.command.as_ref()) {
        Mode::Server => modes::run_server().await,
        Mode::Cli => {
            let Some(command) = cli.command else {
                return Ok(());
            };
            if let Err(e) = modes::run_cli(command).await {
                eprintln!("{}", e.format_colored());
                drop(guard);
                std::process::exit(1);
            }
            Ok(())
        }
    };
    drop(guard);
    result
}
