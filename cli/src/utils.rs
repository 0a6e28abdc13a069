use std::fs;
use std::io::{self, Read, Write};

use crate::error::Result;

/// Read input from a file or stdin
///
/// If `file` is `Some`, reads from the specified file path.
/// If `file` is `None`, reads from stdin.
pub(crate) fn read_input(file: Option<&str>) -> Result<Vec<u8>> {
    match file {
        Some(path) => Ok(fs::read(path)?),
        None => {
            let mut buffer = Vec::new();
            io::stdin().read_to_end(&mut buffer)?;
            Ok(buffer)
        }
    }
}

/// Read BER bytes, either raw or as hex text when `hex_input` is set.
///
/// Hex text may contain whitespace and line breaks, e.g. the output of
/// `xxd -p`.
pub(crate) fn read_ber_input(file: Option<&str>, hex_input: bool) -> Result<Vec<u8>> {
    let input = read_input(file)?;
    if !hex_input {
        return Ok(input);
    }
    let text = String::from_utf8(input)?;
    let compact: String = text.split_whitespace().collect();
    Ok(hex::decode(compact)?)
}

/// Write encoded bytes to stdout, raw or as a hex dump.
pub(crate) fn write_output(bytes: &[u8], hex: bool) -> Result<()> {
    if hex {
        print!("{}", format_hex_dump(bytes));
    } else {
        io::stdout().write_all(bytes)?;
    }
    Ok(())
}

/// Format binary data as hexadecimal dump
///
/// Returns a string formatted in hexdump style (similar to `xxd` command):
/// - 16 bytes per line
/// - Offset in hexadecimal
/// - Hex bytes with space separator
/// - ASCII representation on the right
pub(crate) fn format_hex_dump(data: &[u8]) -> String {
    const BYTES_PER_LINE: usize = 16;
    let mut output = String::new();

    for (offset, chunk) in data.chunks(BYTES_PER_LINE).enumerate() {
        output.push_str(&format!("{:08x}  ", offset * BYTES_PER_LINE));

        for (i, byte) in chunk.iter().enumerate() {
            output.push_str(&format!("{:02x} ", byte));
            if i == 7 {
                output.push(' ');
            }
        }

        // Padding for incomplete lines
        for i in chunk.len()..BYTES_PER_LINE {
            output.push_str("   ");
            if i == 7 {
                output.push(' ');
            }
        }

        output.push_str(" |");
        for byte in chunk {
            if byte.is_ascii_graphic() || *byte == b' ' {
                output.push(*byte as char);
            } else {
                output.push('.');
            }
        }
        output.push_str("|\n");
    }

    output
}

#[cfg(test)]
mod tests {
    use super::format_hex_dump;

    #[test]
    fn test_format_hex_dump_short_line() {
        let dump = format_hex_dump(&[0x30, 0x00, b'c', b'n']);
        assert_eq!(
            dump,
            format!("00000000  30 00 63 6e {}|0.cn|\n", " ".repeat(12 * 3 + 2))
        );
    }

    #[test]
    fn test_format_hex_dump_multiple_lines() {
        let dump = format_hex_dump(&[0xaa; 17]);
        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("00000000  aa aa aa aa aa aa aa aa  aa"));
        assert!(lines[1].starts_with("00000010  aa "));
    }
}
