use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tagwire::wire::{WireError, WireReader, WireType};

use crate::input::read_payload;

/// Bytes shown for a length-delimited payload that is not printed as a message.
const PREVIEW_LEN: usize = 32;

#[derive(Args)]
pub struct InspectArgs {
    /// Payload file (`-` for stdin)
    input: PathBuf,

    /// How deep to try reading length-delimited payloads as nested messages
    #[arg(long, default_value_t = 16)]
    max_depth: usize,
}

impl InspectArgs {
    pub fn run(self) -> Result<()> {
        let payload = read_payload(&self.input)?;
        let mut lines = Vec::new();
        let result = dump_fields(&payload, 0, 0, self.max_depth, &mut lines);
        for line in &lines {
            println!("{line}");
        }
        result?;
        Ok(())
    }
}

/// One line per field: offset, tag, wire type and a value preview.
/// Length-delimited payloads that parse cleanly are expanded in place.
fn dump_fields(
    payload: &[u8],
    base: usize,
    depth: usize,
    max_depth: usize,
    out: &mut Vec<String>,
) -> Result<(), WireError> {
    let mut r = WireReader::from_slice(payload);
    let indent = "  ".repeat(depth);
    while let Some(header) = r.read_field_header()? {
        let offset = base + r.field_offset();
        let prefix = format!("{offset:>6}  {indent}{:<5} {:<16}", header.tag, header.wire_type.name());
        match header.wire_type {
            WireType::Varint => {
                let raw = r.read_varint()?;
                out.push(format!("{prefix} {raw} (zigzag {})", tagwire::wire::decode_zigzag(raw)));
            }
            WireType::Fixed32 => {
                let raw = r.read_fixed32()?;
                out.push(format!("{prefix} 0x{raw:08x} ({:?})", f32::from_bits(raw)));
            }
            WireType::Fixed64 => {
                let raw = r.read_fixed64()?;
                out.push(format!("{prefix} 0x{raw:016x} ({:?})", f64::from_bits(raw)));
            }
            WireType::LengthDelimited => {
                let bytes = r.read_bytes()?;
                let start = base + r.position() - bytes.len();
                out.push(format!("{prefix} {} bytes", bytes.len()));
                let mut nested = Vec::new();
                let expanded = depth < max_depth
                    && !bytes.is_empty()
                    && dump_fields(&bytes, start, depth + 1, max_depth, &mut nested).is_ok();
                if expanded {
                    out.extend(nested);
                } else if !bytes.is_empty() {
                    out.push(format!("{:>6}  {indent}  {}", "", preview(&bytes)));
                }
            }
            WireType::StartGroup | WireType::EndGroup => {
                r.skip_field()?;
                out.push(format!("{prefix} (skipped)"));
            }
        }
    }
    Ok(())
}

fn preview(bytes: &[u8]) -> String {
    if let Ok(text) = std::str::from_utf8(bytes)
        && !text.chars().any(char::is_control)
    {
        return format!("{text:?}");
    }
    let shown = &bytes[..bytes.len().min(PREVIEW_LEN)];
    let hex: String = shown.iter().map(|b| format!("{b:02x}")).collect();
    if shown.len() < bytes.len() {
        format!("0x{hex}...")
    } else {
        format!("0x{hex}")
    }
}
