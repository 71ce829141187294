//! Value and row encoding.
//!
//! These functions work on any [`BufMut`] / [`Buf`], so the same code
//! encodes into a contiguous staging buffer and decodes from a chunk
//! sequence.
//!
//! # Value Layout
//!
//! ```text
//! column_id:u16  type_tag:u8  flags:u8  payload
//! ```
//!
//! `flags` is reserved and always zero.

use bytes::{Buf, BufMut, Bytes};

use colwire_common::constants::{
    BOOLEAN_PAYLOAD_SIZE, FIXED_PAYLOAD_SIZE, LENGTH_PREFIX_SIZE, ROWSET_HEADER_SIZE,
    ROW_HEADER_SIZE, VALUE_HEADER_SIZE,
};
use colwire_common::error::{CodecError, CodecResult};
use colwire_common::types::{UnversionedRow, UnversionedValue, Value, ValueType};
use colwire_common::WireConfig;

/// Returns the encoded size of a value in bytes.
pub fn encoded_value_size(value: &UnversionedValue) -> usize {
    VALUE_HEADER_SIZE
        + match &value.value {
            Value::Null => 0,
            Value::Int64(_) | Value::Uint64(_) | Value::Double(_) => FIXED_PAYLOAD_SIZE,
            Value::Boolean(_) => BOOLEAN_PAYLOAD_SIZE,
            Value::String(s) => LENGTH_PREFIX_SIZE + s.len(),
            Value::Bytes(b) | Value::Any(b) => LENGTH_PREFIX_SIZE + b.len(),
        }
}

/// Returns the encoded size of a row in bytes.
pub fn encoded_row_size(row: &UnversionedRow) -> usize {
    ROW_HEADER_SIZE + row.iter().map(encoded_value_size).sum::<usize>()
}

/// Writes a rowset header.
pub fn encode_row_count(buf: &mut impl BufMut, row_count: usize) {
    buf.put_u64_le(row_count as u64);
}

/// Writes a row: value count followed by the values.
pub fn encode_row(
    buf: &mut impl BufMut,
    row: &UnversionedRow,
    config: &WireConfig,
) -> CodecResult<()> {
    if row.len() > config.max_values_per_row {
        return Err(CodecError::TooManyValues {
            count: row.len(),
            max: config.max_values_per_row,
        });
    }

    buf.put_u32_le(row.len() as u32);
    for value in row {
        encode_value(buf, value, config)?;
    }
    Ok(())
}

/// Writes a single value.
pub fn encode_value(
    buf: &mut impl BufMut,
    value: &UnversionedValue,
    config: &WireConfig,
) -> CodecResult<()> {
    if let Some(payload) = value.value.as_payload() {
        if payload.len() > config.max_string_length {
            return Err(CodecError::ValueTooLong {
                column_id: value.column_id,
                length: payload.len(),
                max: config.max_string_length,
            });
        }
    }

    buf.put_u16_le(value.column_id);
    buf.put_u8(value.value_type().tag());
    buf.put_u8(0);

    match &value.value {
        Value::Null => {}
        Value::Int64(v) => buf.put_i64_le(*v),
        Value::Uint64(v) => buf.put_u64_le(*v),
        Value::Double(v) => buf.put_f64_le(*v),
        Value::Boolean(v) => buf.put_u8(u8::from(*v)),
        Value::String(s) => put_payload(buf, s.as_bytes()),
        Value::Bytes(b) | Value::Any(b) => put_payload(buf, b),
    }
    Ok(())
}

fn put_payload(buf: &mut impl BufMut, data: &[u8]) {
    buf.put_u32_le(data.len() as u32);
    buf.put_slice(data);
}

/// Fails with a truncation error unless `needed` bytes remain.
#[inline]
fn ensure(buf: &impl Buf, needed: usize) -> CodecResult<()> {
    if buf.remaining() < needed {
        return Err(CodecError::truncated(needed, buf.remaining()));
    }
    Ok(())
}

/// Reads a rowset header.
///
/// The declared count is checked against the bytes left in the stream, since
/// every row needs at least its header.
pub fn decode_row_count(buf: &mut impl Buf) -> CodecResult<usize> {
    ensure(buf, ROWSET_HEADER_SIZE)?;
    let row_count = buf.get_u64_le();

    let max = buf.remaining() / ROW_HEADER_SIZE;
    match usize::try_from(row_count) {
        Ok(count) if count <= max => Ok(count),
        _ => Err(CodecError::truncated(
            usize::try_from(row_count)
                .unwrap_or(usize::MAX)
                .saturating_mul(ROW_HEADER_SIZE),
            buf.remaining(),
        )),
    }
}

/// Reads a row.
///
/// Only the wire structure is checked here; schema checks are left to the
/// caller.
pub fn decode_row(buf: &mut impl Buf, config: &WireConfig) -> CodecResult<UnversionedRow> {
    ensure(buf, ROW_HEADER_SIZE)?;
    let value_count = buf.get_u32_le() as usize;
    if value_count > config.max_values_per_row {
        return Err(CodecError::LimitExceeded {
            what: "value count",
            value: value_count,
            max: config.max_values_per_row,
        });
    }

    // Every value needs at least its header.
    ensure(buf, value_count.saturating_mul(VALUE_HEADER_SIZE))?;

    let mut row = UnversionedRow::with_capacity(value_count);
    for _ in 0..value_count {
        row.push(decode_value(buf, config)?);
    }
    Ok(row)
}

/// Reads a single value.
pub fn decode_value(buf: &mut impl Buf, config: &WireConfig) -> CodecResult<UnversionedValue> {
    ensure(buf, VALUE_HEADER_SIZE)?;
    let column_id = buf.get_u16_le();
    let tag = buf.get_u8();
    let flags = buf.get_u8();

    let value_type = ValueType::from_tag(tag).ok_or(CodecError::UnknownTypeTag { tag })?;
    if flags != 0 {
        return Err(CodecError::ReservedFlags { flags });
    }

    let value = match value_type {
        ValueType::Null => Value::Null,
        ValueType::Int64 => {
            ensure(buf, FIXED_PAYLOAD_SIZE)?;
            Value::Int64(buf.get_i64_le())
        }
        ValueType::Uint64 => {
            ensure(buf, FIXED_PAYLOAD_SIZE)?;
            Value::Uint64(buf.get_u64_le())
        }
        ValueType::Double => {
            ensure(buf, FIXED_PAYLOAD_SIZE)?;
            Value::Double(buf.get_f64_le())
        }
        ValueType::Boolean => {
            ensure(buf, BOOLEAN_PAYLOAD_SIZE)?;
            match buf.get_u8() {
                0 => Value::Boolean(false),
                1 => Value::Boolean(true),
                other => {
                    return Err(CodecError::malformed(
                        column_id,
                        format!("invalid boolean byte {other:#04x}"),
                    ))
                }
            }
        }
        ValueType::String => {
            let data = get_payload(buf, config)?;
            let s = std::str::from_utf8(&data)
                .map_err(|e| CodecError::malformed(column_id, e.to_string()))?;
            Value::String(s.to_string())
        }
        ValueType::Bytes => Value::Bytes(get_payload(buf, config)?),
        ValueType::Any => Value::Any(get_payload(buf, config)?),
    };

    Ok(UnversionedValue { column_id, value })
}

fn get_payload(buf: &mut impl Buf, config: &WireConfig) -> CodecResult<Bytes> {
    ensure(buf, LENGTH_PREFIX_SIZE)?;
    let len = buf.get_u32_le() as usize;
    if len > config.max_string_length {
        return Err(CodecError::LimitExceeded {
            what: "payload length",
            value: len,
            max: config.max_string_length,
        });
    }
    ensure(buf, len)?;
    Ok(buf.copy_to_bytes(len))
}
