//! Schema-driven binary decoding of event payloads.
//!
//! A payload is an 8-byte discriminator header followed by fields laid out in
//! schema order: strings are length-prefixed (little-endian u32 count, then
//! that many UTF-8 bytes), addresses are fixed 32-byte keys. Every read is
//! bounds-checked against the payload; any failure discards the whole record.

use crate::error::{DecodeError, DecodeResult};
use pumpwatch_core::{CreateEvent, Pubkey};

/// Bytes of header to skip before the first field.
pub const EVENT_HEADER_LEN: usize = 8;

const ADDRESS_LEN: usize = 32;
const LENGTH_PREFIX_LEN: usize = 4;

/// Wire type of a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Length-prefixed UTF-8 string.
    Str,
    /// Fixed 32-byte address.
    Address,
}

/// A decoded schema field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Str(String),
    Address(Pubkey),
}

/// Field layout of a create event, in payload order.
pub const CREATE_EVENT_SCHEMA: &[(&str, FieldType)] = &[
    ("name", FieldType::Str),
    ("symbol", FieldType::Str),
    ("uri", FieldType::Str),
    ("mint", FieldType::Address),
    ("bonding_curve", FieldType::Address),
    ("associated_bonding_curve", FieldType::Address),
    ("associated_user", FieldType::Address),
    ("user", FieldType::Address),
    ("source", FieldType::Address),
];

/// Bounds-checked cursor over a payload.
struct ByteReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> ByteReader<'a> {
    fn new(data: &'a [u8], offset: usize) -> Self {
        Self { data, offset }
    }

    fn take(&mut self, field: &'static str, needed: usize) -> DecodeResult<&'a [u8]> {
        let remaining = self.data.len() - self.offset;
        if needed > remaining {
            return Err(DecodeError::Truncated {
                field,
                needed,
                remaining,
            });
        }
        let slice = &self.data[self.offset..self.offset + needed];
        self.offset += needed;
        Ok(slice)
    }

    fn read_string(&mut self, field: &'static str) -> DecodeResult<String> {
        let prefix = self.take(field, LENGTH_PREFIX_LEN)?;
        let mut raw = [0u8; LENGTH_PREFIX_LEN];
        raw.copy_from_slice(prefix);
        let len = u32::from_le_bytes(raw) as usize;

        let bytes = self.take(field, len)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| DecodeError::InvalidUtf8 { field })
    }

    fn read_address(&mut self, field: &'static str) -> DecodeResult<Pubkey> {
        let bytes = self.take(field, ADDRESS_LEN)?;
        let mut raw = [0u8; ADDRESS_LEN];
        raw.copy_from_slice(bytes);
        Ok(Pubkey::new_from_array(raw))
    }
}

/// Decode `data` against `schema`, returning the fields in schema order.
///
/// The cursor starts past the discriminator header; callers dispatch on the
/// discriminator first via [`crate::classify_discriminator`].
pub fn decode_fields(
    schema: &[(&'static str, FieldType)],
    data: &[u8],
) -> DecodeResult<Vec<FieldValue>> {
    if data.len() < EVENT_HEADER_LEN {
        return Err(DecodeError::Empty);
    }

    let mut reader = ByteReader::new(data, EVENT_HEADER_LEN);
    schema
        .iter()
        .map(|&(field, kind)| match kind {
            FieldType::Str => reader.read_string(field).map(FieldValue::Str),
            FieldType::Address => reader.read_address(field).map(FieldValue::Address),
        })
        .collect()
}

/// Decode a create-event payload into a typed [`CreateEvent`].
pub fn decode_create_event(data: &[u8]) -> DecodeResult<CreateEvent> {
    if data.len() < EVENT_HEADER_LEN {
        return Err(DecodeError::Empty);
    }

    let mut reader = ByteReader::new(data, EVENT_HEADER_LEN);
    Ok(CreateEvent {
        name: reader.read_string("name")?,
        symbol: reader.read_string("symbol")?,
        uri: reader.read_string("uri")?,
        mint: reader.read_address("mint")?,
        bonding_curve: reader.read_address("bonding_curve")?,
        associated_bonding_curve: reader.read_address("associated_bonding_curve")?,
        associated_user: reader.read_address("associated_user")?,
        user: reader.read_address("user")?,
        source: reader.read_address("source")?,
    })
}
