use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod attribute;
mod control;
mod error;
mod output;
mod utils;

use error::Result;

use attribute::AttributeCommands;
use control::ControlCommands;

#[derive(Parser)]
#[command(name = "ldapber")]
#[command(about = "LDAP Attribute and Control BER toolkit", long_about = None)]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Attribute operations
    Attribute {
        #[command(subcommand)]
        command: AttributeCommands,
    },
    /// Control operations
    Control {
        #[command(subcommand)]
        command: ControlCommands,
    },
}

fn init_tracing(debug: bool) {
    // --debug wins over RUST_LOG
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    match cli.command {
        Commands::Attribute { command } => match command {
            AttributeCommands::Encode { config } => {
                attribute::encode::execute(config)?;
            }
            AttributeCommands::Decode { config } => {
                attribute::decode::execute(config)?;
            }
        },
        Commands::Control { command } => match command {
            ControlCommands::Encode { config } => {
                control::encode::execute(config)?;
            }
            ControlCommands::Decode { config } => {
                control::decode::execute(config)?;
            }
        },
    }

    Ok(())
}
