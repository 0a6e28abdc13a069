pub(crate) mod decode;
pub(crate) mod encode;

use clap::Subcommand;

#[derive(Subcommand)]
pub(crate) enum AttributeCommands {
    /// Encode an attribute to BER
    Encode {
        #[command(flatten)]
        config: encode::Config,
    },
    /// Decode a BER-encoded attribute
    Decode {
        #[command(flatten)]
        config: decode::Config,
    },
}
