use clap::Args;
use ldap::Control;
use ldapber::encoder::Encoder;
use tracing::debug;

use crate::error::Result;
use crate::utils::write_output;

#[derive(Args)]
pub(crate) struct Config {
    /// Control type OID
    #[arg(long)]
    oid: String,

    /// Mark the control as critical
    #[arg(short, long)]
    critical: bool,

    /// Control value. Omit to leave the value out of the encoding
    #[arg(short = 'v', long)]
    value: Option<String>,

    /// Treat the value as hex instead of text
    #[arg(long, requires = "value")]
    hex_value: bool,

    /// Output as hexadecimal dump instead of binary
    #[arg(long)]
    hex: bool,
}

pub(crate) fn execute(config: Config) -> Result<()> {
    let mut control = Control::new(config.oid, config.critical);
    if let Some(value) = config.value {
        let value = if config.hex_value {
            hex::decode(value)?
        } else {
            value.into_bytes()
        };
        control = control.with_value(value);
    }
    debug!("encoding control {control}");

    let bytes: Vec<u8> = control.encode()?;
    write_output(&bytes, config.hex)
}
