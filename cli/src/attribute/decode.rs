use clap::Args;
use ldap::{Attribute, ValueEncoding};
use ldapber::decoder::Decoder;

use crate::error::Result;
use crate::output::OutputFormat;
use crate::utils::read_ber_input;

#[derive(Args)]
pub(crate) struct Config {
    /// Path to the BER file. If not specified, reads from stdin
    file: Option<String>,

    /// Treat the input as hex text instead of binary
    #[arg(long)]
    hex_input: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    output: OutputFormat,
}

pub(crate) fn execute(config: Config) -> Result<()> {
    let bytes = read_ber_input(config.file.as_deref(), config.hex_input)?;
    let attr: Attribute = bytes.decode()?;

    match config.output {
        OutputFormat::Text => {
            print!("{}", format_attribute(&attr));
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&attr.json())?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(&attr.json())?;
            print!("{}", yaml);
        }
    }

    Ok(())
}

fn format_attribute(attr: &Attribute) -> String {
    let encoding = match attr.encoding() {
        ValueEncoding::Binary => "binary (base64)",
        ValueEncoding::Text => "text",
    };
    let mut output = format!("Attribute: {}\n", attr.attr_type());
    output.push_str(&format!("  Encoding: {}\n", encoding));
    output.push_str(&format!("  Values ({}):\n", attr.len()));
    for value in attr.decoded_values() {
        output.push_str(&format!("    {}\n", value));
    }
    output
}
