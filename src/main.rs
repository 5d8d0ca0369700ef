use clap::{Parser, Subcommand};
use mesa::core::config::{self, CliOverrides};
use mesa::{server, tui};
use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, LevelFilter, SharedLogger, TermLogger,
    TerminalMode, WriteLogger,
};
use std::fs::File;

#[derive(Parser)]
#[command(name = "mesa", about = "Restaurant discovery and reservations in the terminal")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the places API proxy
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Browse restaurants through a running proxy
    Browse {
        /// Base URL of the proxy
        #[arg(long)]
        proxy_url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    // The browser owns the terminal, so it only logs to mesa.log
    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    if matches!(args.command, Command::Serve { .. }) {
        loggers.push(TermLogger::new(
            LevelFilter::Info,
            log_config.clone(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ));
    }
    if let Ok(log_file) = File::create("mesa.log") {
        loggers.push(WriteLogger::new(LevelFilter::Debug, log_config, log_file));
    }
    let _ = CombinedLogger::init(loggers);

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: {e}, using defaults");
            log::warn!("Config load failed: {}, using defaults", e);
            config::MesaConfig::default()
        }
    };

    let cli = match &args.command {
        Command::Serve { port } => CliOverrides {
            port: *port,
            ..Default::default()
        },
        Command::Browse { proxy_url } => CliOverrides {
            proxy_url: proxy_url.clone(),
            ..Default::default()
        },
    };
    let resolved = config::resolve(&file_config, &cli);

    match args.command {
        Command::Serve { .. } => {
            log::info!("Mesa proxy starting on port {}", resolved.port);
            server::serve(&resolved).await
        }
        Command::Browse { .. } => {
            log::info!("Mesa browser starting against {}", resolved.proxy_url);
            tui::run(resolved)
        }
    }
}
