//! Scalar kinds understood by the codec and the composite scalar payloads
//! (date/time, time span, decimal, UUID).

use std::fmt::{Display, Formatter, Result};

use crate::value::Value;

/// Primitive (non-message) element kinds a field can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Bool,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    /// 16-bit character, carried as an unsigned 16-bit integer on the wire.
    Char,
    F32,
    F64,
    String,
    Bytes,
    DateTime,
    TimeSpan,
    Decimal,
    Uuid,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 18] = [
        PrimitiveKind::Bool,
        PrimitiveKind::I8,
        PrimitiveKind::I16,
        PrimitiveKind::I32,
        PrimitiveKind::I64,
        PrimitiveKind::U8,
        PrimitiveKind::U16,
        PrimitiveKind::U32,
        PrimitiveKind::U64,
        PrimitiveKind::Char,
        PrimitiveKind::F32,
        PrimitiveKind::F64,
        PrimitiveKind::String,
        PrimitiveKind::Bytes,
        PrimitiveKind::DateTime,
        PrimitiveKind::TimeSpan,
        PrimitiveKind::Decimal,
        PrimitiveKind::Uuid,
    ];

    pub fn type_name(&self) -> &'static str {
        match self {
            PrimitiveKind::Bool => "bool",
            PrimitiveKind::I8 => "i8",
            PrimitiveKind::I16 => "i16",
            PrimitiveKind::I32 => "i32",
            PrimitiveKind::I64 => "i64",
            PrimitiveKind::U8 => "u8",
            PrimitiveKind::U16 => "u16",
            PrimitiveKind::U32 => "u32",
            PrimitiveKind::U64 => "u64",
            PrimitiveKind::Char => "char",
            PrimitiveKind::F32 => "f32",
            PrimitiveKind::F64 => "f64",
            PrimitiveKind::String => "string",
            PrimitiveKind::Bytes => "bytes",
            PrimitiveKind::DateTime => "datetime",
            PrimitiveKind::TimeSpan => "timespan",
            PrimitiveKind::Decimal => "decimal",
            PrimitiveKind::Uuid => "uuid",
        }
    }

    pub fn from_type_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.type_name() == name)
    }

    /// Signed integer kinds accept the zigzag data format.
    pub fn is_signed_integer(&self) -> bool {
        matches!(
            self,
            PrimitiveKind::I8 | PrimitiveKind::I16 | PrimitiveKind::I32 | PrimitiveKind::I64
        )
    }

    pub fn is_integer(&self) -> bool {
        self.is_signed_integer()
            || matches!(
                self,
                PrimitiveKind::U8 | PrimitiveKind::U16 | PrimitiveKind::U32 | PrimitiveKind::U64
            )
    }

    /// Kinds whose repeated occurrences may also arrive as one packed
    /// length-delimited run.
    pub fn is_packable(&self) -> bool {
        self.is_integer()
            || matches!(
                self,
                PrimitiveKind::Bool | PrimitiveKind::Char | PrimitiveKind::F32 | PrimitiveKind::F64
            )
    }

    pub fn supports_format(&self, format: DataFormat) -> bool {
        match format {
            DataFormat::Default => true,
            DataFormat::ZigZag => self.is_signed_integer(),
            DataFormat::Fixed => self.is_integer(),
        }
    }

    /// The value a freshly constructed field of this kind holds.
    pub fn default_value(&self) -> Value {
        match self {
            PrimitiveKind::Bool => Value::Bool(false),
            PrimitiveKind::I8 => Value::I8(0),
            PrimitiveKind::I16 => Value::I16(0),
            PrimitiveKind::I32 => Value::I32(0),
            PrimitiveKind::I64 => Value::I64(0),
            PrimitiveKind::U8 => Value::U8(0),
            PrimitiveKind::U16 => Value::U16(0),
            PrimitiveKind::U32 => Value::U32(0),
            PrimitiveKind::U64 => Value::U64(0),
            PrimitiveKind::Char => Value::Char(0),
            PrimitiveKind::F32 => Value::F32(0.0),
            PrimitiveKind::F64 => Value::F64(0.0),
            PrimitiveKind::String => Value::string(""),
            PrimitiveKind::Bytes => Value::Bytes(Vec::new()),
            PrimitiveKind::DateTime => Value::DateTime(DateTime::default()),
            PrimitiveKind::TimeSpan => Value::TimeSpan(TimeSpan::default()),
            PrimitiveKind::Decimal => Value::Decimal(Decimal::default()),
            PrimitiveKind::Uuid => Value::Uuid(Uuid::default()),
        }
    }
}

impl Display for PrimitiveKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_str(self.type_name())
    }
}

/// Integer encoding selected per member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DataFormat {
    /// Plain varint; negative signed values are sign-extended to 64 bits.
    #[default]
    Default,
    /// Zigzag varint (signed kinds only).
    ZigZag,
    /// Fixed32 for kinds up to 32 bits, fixed64 for 64-bit kinds.
    Fixed,
}

impl DataFormat {
    pub fn name(&self) -> &'static str {
        match self {
            DataFormat::Default => "default",
            DataFormat::ZigZag => "zigzag",
            DataFormat::Fixed => "fixed",
        }
    }
}

/// Kind marker carried alongside a [`DateTime`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DateTimeKind {
    #[default]
    Unspecified,
    Utc,
    Local,
}

impl DateTimeKind {
    pub fn from_raw(raw: u64) -> Option<Self> {
        match raw {
            0 => Some(DateTimeKind::Unspecified),
            1 => Some(DateTimeKind::Utc),
            2 => Some(DateTimeKind::Local),
            _ => None,
        }
    }

    pub fn raw(&self) -> u64 {
        match self {
            DateTimeKind::Unspecified => 0,
            DateTimeKind::Utc => 1,
            DateTimeKind::Local => 2,
        }
    }
}

/// Duration measured in 100 ns ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TimeSpan {
    pub ticks: i64,
}

impl TimeSpan {
    pub const TICKS_PER_MILLISECOND: i64 = 10_000;
    pub const TICKS_PER_SECOND: i64 = 1_000 * Self::TICKS_PER_MILLISECOND;
    pub const TICKS_PER_MINUTE: i64 = 60 * Self::TICKS_PER_SECOND;
    pub const TICKS_PER_HOUR: i64 = 60 * Self::TICKS_PER_MINUTE;
    pub const TICKS_PER_DAY: i64 = 24 * Self::TICKS_PER_HOUR;

    pub const MIN: TimeSpan = TimeSpan { ticks: i64::MIN };
    pub const MAX: TimeSpan = TimeSpan { ticks: i64::MAX };

    pub fn from_ticks(ticks: i64) -> Self {
        Self { ticks }
    }

    pub fn from_millis(ms: i64) -> Self {
        Self::from_ticks(ms * Self::TICKS_PER_MILLISECOND)
    }

    pub fn from_secs(secs: i64) -> Self {
        Self::from_ticks(secs * Self::TICKS_PER_SECOND)
    }
}

/// Point in time as 100 ns ticks relative to the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DateTime {
    pub ticks: i64,
    pub kind: DateTimeKind,
}

impl DateTime {
    pub fn from_unix_ticks(ticks: i64, kind: DateTimeKind) -> Self {
        Self { ticks, kind }
    }

    pub fn from_unix_secs(secs: i64, kind: DateTimeKind) -> Self {
        Self::from_unix_ticks(secs * TimeSpan::TICKS_PER_SECOND, kind)
    }

    pub fn since_epoch(&self) -> TimeSpan {
        TimeSpan::from_ticks(self.ticks)
    }
}

/// 96-bit scaled decimal in the `lo`/`hi`/sign/scale layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Decimal {
    pub lo: u64,
    pub hi: u32,
    pub negative: bool,
    pub scale: u8,
}

impl Decimal {
    pub const MAX_SCALE: u8 = 28;

    /// Build from a signed mantissa and a base-10 scale.
    ///
    /// Returns `None` when the mantissa does not fit in 96 bits or the scale
    /// exceeds [`Decimal::MAX_SCALE`].
    pub fn from_i128(mantissa: i128, scale: u8) -> Option<Self> {
        let magnitude = mantissa.unsigned_abs();
        if magnitude >> 96 != 0 || scale > Self::MAX_SCALE {
            return None;
        }
        Some(Self {
            lo: magnitude as u64,
            hi: (magnitude >> 64) as u32,
            negative: mantissa < 0,
            scale,
        })
    }

    pub fn mantissa(&self) -> i128 {
        let magnitude = ((self.hi as i128) << 64) | self.lo as i128;
        if self.negative { -magnitude } else { magnitude }
    }

    pub fn is_zero(&self) -> bool {
        self.lo == 0 && self.hi == 0
    }
}

impl Display for Decimal {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let digits = self.mantissa().unsigned_abs().to_string();
        let scale = self.scale as usize;
        let sign = if self.negative && !self.is_zero() { "-" } else { "" };
        if scale == 0 {
            return write!(f, "{sign}{digits}");
        }
        let padded = format!("{digits:0>width$}", width = scale + 1);
        let (int_part, frac_part) = padded.split_at(padded.len() - scale);
        write!(f, "{sign}{int_part}.{frac_part}")
    }
}

/// 128-bit identifier stored as raw bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Uuid(pub [u8; 16]);

impl Uuid {
    pub const NIL: Uuid = Uuid([0; 16]);

    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    pub fn is_nil(&self) -> bool {
        self.0 == [0; 16]
    }

    /// Low and high halves as little-endian words, in wire order.
    pub fn to_halves(&self) -> (u64, u64) {
        let mut lo = [0u8; 8];
        let mut hi = [0u8; 8];
        lo.copy_from_slice(&self.0[..8]);
        hi.copy_from_slice(&self.0[8..]);
        (u64::from_le_bytes(lo), u64::from_le_bytes(hi))
    }

    pub fn from_halves(lo: u64, hi: u64) -> Self {
        let mut bytes = [0u8; 16];
        bytes[..8].copy_from_slice(&lo.to_le_bytes());
        bytes[8..].copy_from_slice(&hi.to_le_bytes());
        Self(bytes)
    }
}

impl Display for Uuid {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        for (i, b) in self.0.iter().enumerate() {
            if matches!(i, 4 | 6 | 8 | 10) {
                f.write_str("-")?;
            }
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}
