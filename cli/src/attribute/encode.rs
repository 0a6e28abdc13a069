use clap::Args;
use ldap::Attribute;
use ldapber::encoder::Encoder;
use tracing::debug;

use crate::error::Result;
use crate::utils::write_output;

#[derive(Args)]
pub(crate) struct Config {
    /// Attribute description, e.g. `cn` or `userCertificate;binary`
    #[arg(short = 't', long = "type")]
    attr_type: String,

    /// Attribute value, repeat for multiple values. Values of `;binary`
    /// types are given as base64
    #[arg(short = 'v', long = "value")]
    values: Vec<String>,

    /// Output as hexadecimal dump instead of binary
    #[arg(long)]
    hex: bool,
}

pub(crate) fn execute(config: Config) -> Result<()> {
    let attr = Attribute::with_values(config.attr_type, config.values)?;
    debug!(encoding = ?attr.encoding(), "encoding attribute {attr}");

    let bytes: Vec<u8> = attr.encode()?;
    write_output(&bytes, config.hex)
}
