use bytes::BufMut;

pub(crate) const MAX_VARINT_LEN: usize = 10;

pub fn encode_zigzag(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

pub fn decode_zigzag(value: u64) -> i64 {
    ((value >> 1) as i64) ^ -((value & 1) as i64)
}

/// Number of bytes `value` occupies as a varint.
pub fn encoded_len(value: u64) -> usize {
    let bits = 64 - (value | 1).leading_zeros() as usize;
    bits.div_ceil(7)
}

pub(crate) fn put_varint(buf: &mut impl BufMut, mut value: u64) {
    while value >= 0x80 {
        buf.put_u8((value as u8) | 0x80);
        value >>= 7;
    }
    buf.put_u8(value as u8);
}

/// Decode a varint from the front of `src`.
///
/// Returns `(value, consumed)`; `None` when `src` ends mid-varint, and
/// `Some((_, 0))` is never produced. A varint longer than
/// [`MAX_VARINT_LEN`] yields `Err(())`.
pub(crate) fn take_varint(src: &[u8]) -> Result<Option<(u64, usize)>, ()> {
    let mut value = 0u64;
    for (i, &byte) in src.iter().enumerate() {
        if i == MAX_VARINT_LEN {
            return Err(());
        }
        value |= u64::from(byte & 0x7f) << (7 * i as u32);
        if byte & 0x80 == 0 {
            if i == MAX_VARINT_LEN - 1 && byte > 1 {
                return Err(());
            }
            return Ok(Some((value, i + 1)));
        }
    }
    if src.len() >= MAX_VARINT_LEN {
        return Err(());
    }
    Ok(None)
}
