//! Composite scalars carried as small nested messages.
//!
//! - time span / date time: `{1: zigzag value, 2: scale, 3: kind}`
//! - decimal: `{1: lo u64, 2: hi u32, 3: sign | scale << 1}`
//! - uuid: `{1: fixed64 lo, 2: fixed64 hi}`, nil written as an empty frame

use tagwire_core::{DateTime, DateTimeKind, Decimal, TimeSpan, Uuid};

use crate::{error::WireError, reader::WireReader, wire_type::WireType, writer::WireWriter};

const SCALE_DAYS: u64 = 0;
const SCALE_HOURS: u64 = 1;
const SCALE_MINUTES: u64 = 2;
const SCALE_SECONDS: u64 = 3;
const SCALE_MILLISECONDS: u64 = 4;
const SCALE_TICKS: u64 = 5;
const SCALE_MINMAX: u64 = 15;

struct ScaledTicks {
    value: i64,
    scale: u64,
    kind: u64,
}

fn read_scaled(r: &mut WireReader) -> Result<(i64, DateTimeKind), WireError> {
    let token = r.start_sub_item()?;
    let start = r.position();
    let mut raw = ScaledTicks {
        value: 0,
        scale: SCALE_DAYS,
        kind: 0,
    };
    while let Some(header) = r.read_field_header()? {
        match header.tag {
            1 => raw.value = r.read_zigzag()?,
            2 => raw.scale = r.read_varint()?,
            3 => raw.kind = r.read_varint()?,
            _ => r.skip_field()?,
        }
    }
    r.end_sub_item(token)?;

    let ticks_per_unit = match raw.scale {
        SCALE_DAYS => TimeSpan::TICKS_PER_DAY,
        SCALE_HOURS => TimeSpan::TICKS_PER_HOUR,
        SCALE_MINUTES => TimeSpan::TICKS_PER_MINUTE,
        SCALE_SECONDS => TimeSpan::TICKS_PER_SECOND,
        SCALE_MILLISECONDS => TimeSpan::TICKS_PER_MILLISECOND,
        SCALE_TICKS => 1,
        SCALE_MINMAX => {
            let ticks = match raw.value {
                1 => i64::MAX,
                -1 => i64::MIN,
                _ => {
                    return Err(WireError::Overflow {
                        kind: "timespan",
                        offset: start,
                    });
                }
            };
            return Ok((ticks, kind_from_raw(raw.kind, start)?));
        }
        other => {
            return Err(WireError::InvalidScale {
                what: "time",
                value: other,
                offset: start,
            });
        }
    };
    let ticks = raw
        .value
        .checked_mul(ticks_per_unit)
        .ok_or(WireError::Overflow {
            kind: "timespan",
            offset: start,
        })?;
    Ok((ticks, kind_from_raw(raw.kind, start)?))
}

fn kind_from_raw(raw: u64, offset: usize) -> Result<DateTimeKind, WireError> {
    DateTimeKind::from_raw(raw).ok_or(WireError::InvalidScale {
        what: "date time kind",
        value: raw,
        offset,
    })
}

pub(crate) fn read_time_span(r: &mut WireReader) -> Result<TimeSpan, WireError> {
    read_scaled(r).map(|(ticks, _)| TimeSpan::from_ticks(ticks))
}

pub(crate) fn read_date_time(r: &mut WireReader) -> Result<DateTime, WireError> {
    read_scaled(r).map(|(ticks, kind)| DateTime::from_unix_ticks(ticks, kind))
}

/// Coarsest unit that represents `ticks` exactly.
fn scale_for(ticks: i64) -> (i64, u64) {
    match ticks {
        i64::MAX => (1, SCALE_MINMAX),
        i64::MIN => (-1, SCALE_MINMAX),
        t if t % TimeSpan::TICKS_PER_DAY == 0 => (t / TimeSpan::TICKS_PER_DAY, SCALE_DAYS),
        t if t % TimeSpan::TICKS_PER_HOUR == 0 => (t / TimeSpan::TICKS_PER_HOUR, SCALE_HOURS),
        t if t % TimeSpan::TICKS_PER_MINUTE == 0 => {
            (t / TimeSpan::TICKS_PER_MINUTE, SCALE_MINUTES)
        }
        t if t % TimeSpan::TICKS_PER_SECOND == 0 => {
            (t / TimeSpan::TICKS_PER_SECOND, SCALE_SECONDS)
        }
        t if t % TimeSpan::TICKS_PER_MILLISECOND == 0 => {
            (t / TimeSpan::TICKS_PER_MILLISECOND, SCALE_MILLISECONDS)
        }
        t => (t, SCALE_TICKS),
    }
}

fn write_scaled(w: &mut WireWriter, ticks: i64, kind: DateTimeKind) -> Result<(), WireError> {
    let (value, scale) = scale_for(ticks);
    let token = w.start_sub_item();
    if value != 0 {
        w.write_field_header(1, WireType::Varint);
        w.write_raw_varint(crate::varint::encode_zigzag(value));
    }
    if scale != SCALE_DAYS {
        w.write_field_header(2, WireType::Varint);
        w.write_raw_varint(scale);
    }
    if kind != DateTimeKind::Unspecified {
        w.write_field_header(3, WireType::Varint);
        w.write_raw_varint(kind.raw());
    }
    w.end_sub_item(token)
}

pub(crate) fn write_time_span(w: &mut WireWriter, value: &TimeSpan) -> Result<(), WireError> {
    write_scaled(w, value.ticks, DateTimeKind::Unspecified)
}

pub(crate) fn write_date_time(w: &mut WireWriter, value: &DateTime) -> Result<(), WireError> {
    write_scaled(w, value.ticks, value.kind)
}

pub(crate) fn read_decimal(r: &mut WireReader) -> Result<Decimal, WireError> {
    let token = r.start_sub_item()?;
    let start = r.position();
    let (mut lo, mut hi, mut sign_scale) = (0u64, 0u64, 0u64);
    while let Some(header) = r.read_field_header()? {
        match header.tag {
            1 => lo = r.read_varint()?,
            2 => hi = r.read_varint()?,
            3 => sign_scale = r.read_varint()?,
            _ => r.skip_field()?,
        }
    }
    r.end_sub_item(token)?;

    let hi = u32::try_from(hi).map_err(|_| WireError::Overflow {
        kind: "decimal",
        offset: start,
    })?;
    let scale = (sign_scale & 0x01FE) >> 1;
    if scale > u64::from(Decimal::MAX_SCALE) {
        return Err(WireError::InvalidScale {
            what: "decimal",
            value: scale,
            offset: start,
        });
    }
    Ok(Decimal {
        lo,
        hi,
        negative: sign_scale & 1 == 1,
        scale: scale as u8,
    })
}

pub(crate) fn write_decimal(w: &mut WireWriter, value: &Decimal) -> Result<(), WireError> {
    let sign_scale = (u64::from(value.scale) << 1) | u64::from(value.negative);
    let token = w.start_sub_item();
    if value.lo != 0 {
        w.write_field_header(1, WireType::Varint);
        w.write_raw_varint(value.lo);
    }
    if value.hi != 0 {
        w.write_field_header(2, WireType::Varint);
        w.write_raw_varint(u64::from(value.hi));
    }
    if sign_scale != 0 {
        w.write_field_header(3, WireType::Varint);
        w.write_raw_varint(sign_scale);
    }
    w.end_sub_item(token)
}

pub(crate) fn read_uuid(r: &mut WireReader) -> Result<Uuid, WireError> {
    let token = r.start_sub_item()?;
    let (mut lo, mut hi) = (0u64, 0u64);
    while let Some(header) = r.read_field_header()? {
        match header.tag {
            1 => lo = r.read_fixed64()?,
            2 => hi = r.read_fixed64()?,
            _ => r.skip_field()?,
        }
    }
    r.end_sub_item(token)?;
    Ok(Uuid::from_halves(lo, hi))
}

pub(crate) fn write_uuid(w: &mut WireWriter, value: &Uuid) -> Result<(), WireError> {
    let token = w.start_sub_item();
    if !value.is_nil() {
        let (lo, hi) = value.to_halves();
        w.write_field_header(1, WireType::Fixed64);
        w.write_raw_fixed64(lo);
        w.write_field_header(2, WireType::Fixed64);
        w.write_raw_fixed64(hi);
    }
    w.end_sub_item(token)
}
