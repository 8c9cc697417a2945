use std::fmt::{Display, Error, Formatter, Result, Write as _};

use crate::{message::Message, value::Value};

/// Format a message in a readable style:
/// scalar fields are rendered in one line, messages and containers are
/// pretty-printed. Nested values follow the same rule.
pub fn format_message(message: &Message) -> std::result::Result<String, Error> {
    let mut out = String::new();
    writeln!(out, "{}:", message.type_name())?;
    format_fields(message, 4, &mut out)?;
    Ok(out)
}

fn format_fields(message: &Message, indent: usize, out: &mut String) -> Result {
    for (tag, value) in message.fields() {
        format_labeled_value(&tag.to_string(), value, indent, out)?;
    }
    Ok(())
}

fn format_labeled_value(label: &str, value: &Value, indent: usize, out: &mut String) -> Result {
    let pad = " ".repeat(indent);
    match value {
        Value::Message(msg) => {
            writeln!(out, "{pad}{label}: {}", msg.type_name())?;
            format_fields(msg, indent + 4, out)
        }
        Value::Array(items) | Value::List(items) | Value::Set(items) => {
            writeln!(
                out,
                "{pad}{label}: {} [{}]",
                value.variant_name().to_lowercase(),
                items.len()
            )?;
            for (i, item) in items.iter().enumerate() {
                format_labeled_value(&format!("[{i}]"), item, indent + 4, out)?;
            }
            Ok(())
        }
        scalar => writeln!(out, "{pad}{label}: {}", ScalarDisplay(scalar)),
    }
}

struct ScalarDisplay<'a>(&'a Value);

impl Display for ScalarDisplay<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self.0 {
            Value::Bool(v) => write!(f, "{v}"),
            Value::I8(v) => write!(f, "{v}"),
            Value::I16(v) => write!(f, "{v}"),
            Value::I32(v) => write!(f, "{v}"),
            Value::I64(v) => write!(f, "{v}"),
            Value::U8(v) => write!(f, "{v}"),
            Value::U16(v) => write!(f, "{v}"),
            Value::U32(v) => write!(f, "{v}"),
            Value::U64(v) => write!(f, "{v}"),
            Value::Char(v) => match char::from_u32(u32::from(*v)) {
                Some(c) => write!(f, "{c:?}"),
                None => write!(f, "\\u{{{v:04x}}}"),
            },
            Value::F32(v) => write!(f, "{v:?}"),
            Value::F64(v) => write!(f, "{v:?}"),
            Value::String(v) => write!(f, "{:?}", v.as_ref()),
            Value::Bytes(v) => {
                f.write_str("0x")?;
                for b in v {
                    write!(f, "{b:02x}")?;
                }
                Ok(())
            }
            Value::DateTime(v) => write!(f, "datetime({} ticks, {:?})", v.ticks, v.kind),
            Value::TimeSpan(v) => write!(f, "timespan({} ticks)", v.ticks),
            Value::Decimal(v) => write!(f, "{v}"),
            Value::Uuid(v) => write!(f, "{v}"),
            other => unreachable!("{other:?} is not a scalar value"),
        }
    }
}

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = format_message(self)?;
        f.write_str(&text)
    }
}
