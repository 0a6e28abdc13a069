pub(crate) mod decode;
pub(crate) mod encode;

use clap::Subcommand;

#[derive(Subcommand)]
pub(crate) enum ControlCommands {
    /// Encode a control to BER
    Encode {
        #[command(flatten)]
        config: encode::Config,
    },
    /// Decode a BER-encoded control
    Decode {
        #[command(flatten)]
        config: decode::Config,
    },
}
