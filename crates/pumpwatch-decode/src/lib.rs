//! Instruction payload decoding and event classification.
//!
//! Pure functions, no I/O:
//! - schema-driven binary decoding of create-event payloads
//! - discriminator dispatch over the known instruction set
//! - watched-address classification over an instruction's referenced accounts

pub mod classifier;
pub mod decoder;
pub mod discriminator;
pub mod error;

pub use classifier::{matches, screen_instruction};
pub use decoder::{
    decode_create_event, decode_fields, FieldType, FieldValue, CREATE_EVENT_SCHEMA,
    EVENT_HEADER_LEN,
};
pub use discriminator::{classify_discriminator, InstructionKind, DISCRIMINATOR_LEN};
pub use error::{DecodeError, DecodeResult};
