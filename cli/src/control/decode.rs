use clap::Args;
use ldap::Control;
use ldapber::decoder::Decoder;

use crate::error::Result;
use crate::output::OutputFormat;
use crate::utils::{format_hex_dump, read_ber_input};

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
    let control: Control = bytes.decode()?;

    match config.output {
        OutputFormat::Text => {
            print!("{}", format_control(&control));
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&control.json())?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(&control.json())?;
            print!("{}", yaml);
        }
    }

    Ok(())
}

fn format_control(control: &Control) -> String {
    let mut output = format!("Control: {}\n", control.control_type());
    output.push_str(&format!("  Criticality: {}\n", control.is_critical()));
    match control.value() {
        None => output.push_str("  Value: absent\n"),
        Some(value) => {
            output.push_str(&format!("  Value ({} bytes):\n", value.len()));
            for line in format_hex_dump(value).lines() {
                output.push_str(&format!("    {}\n", line));
            }
        }
    }
    output
}
