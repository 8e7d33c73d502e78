//! Scripted payload and notification builders shared by integration tests.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use pumpwatch_core::{CreateEvent, Pubkey};

pub fn key(byte: u8) -> Pubkey {
    Pubkey::new_from_array([byte; 32])
}

pub fn sample_event(user: Pubkey) -> CreateEvent {
    CreateEvent {
        name: "Meme Coin".to_string(),
        symbol: "MEME".to_string(),
        uri: "https://arweave.net/abc123".to_string(),
        mint: key(1),
        bonding_curve: key(2),
        associated_bonding_curve: key(3),
        associated_user: key(4),
        user,
        source: key(6),
    }
}

fn push_string(buf: &mut Vec<u8>, value: &str) {
    buf.extend_from_slice(&(value.len() as u32).to_le_bytes());
    buf.extend_from_slice(value.as_bytes());
}

/// Encode a create event the way it appears on the wire: discriminator
/// header, length-prefixed strings, then fixed 32-byte addresses.
pub fn encode_create_event(event: &CreateEvent) -> Vec<u8> {
    let mut buf = pumpwatch_decode::discriminator::CREATE.to_vec();
    push_string(&mut buf, &event.name);
    push_string(&mut buf, &event.symbol);
    push_string(&mut buf, &event.uri);
    for field in [
        &event.mint,
        &event.bonding_curve,
        &event.associated_bonding_curve,
        &event.associated_user,
        &event.user,
        &event.source,
    ] {
        buf.extend_from_slice(field.as_ref());
    }
    buf
}

/// Build a `logsNotification` whose logs announce a create and carry the
/// given payload.
pub fn create_notification(payload: &[u8]) -> String {
    serde_json::json!({
        "jsonrpc": "2.0",
        "method": "logsNotification",
        "params": {
            "result": {
                "context": { "slot": 1 },
                "value": {
                    "signature": "test-signature",
                    "err": null,
                    "logs": [
                        "Program log: Instruction: Create",
                        format!("Program data: {}", BASE64.encode(payload))
                    ]
                }
            },
            "subscription": 4242
        }
    })
    .to_string()
}

/// A `logsNotification` with no create announcement and no payload.
pub fn unrelated_notification() -> String {
    serde_json::json!({
        "jsonrpc": "2.0",
        "method": "logsNotification",
        "params": {
            "result": {
                "context": { "slot": 2 },
                "value": {
                    "signature": "other-signature",
                    "err": null,
                    "logs": ["Program log: Instruction: Buy"]
                }
            },
            "subscription": 4242
        }
    })
    .to_string()
}

/// Encode bonding-curve account bytes: 8-byte header, five LE u64 fields,
/// one `complete` byte.
pub fn encode_curve_account(
    virtual_token_reserves: u64,
    virtual_sol_reserves: u64,
    complete: bool,
) -> Vec<u8> {
    let mut data = vec![0u8; 8];
    data.extend_from_slice(&virtual_token_reserves.to_le_bytes());
    data.extend_from_slice(&virtual_sol_reserves.to_le_bytes());
    data.extend_from_slice(&800_000_000_000u64.to_le_bytes());
    data.extend_from_slice(&0u64.to_le_bytes());
    data.extend_from_slice(&1_000_000_000_000u64.to_le_bytes());
    data.push(u8::from(complete));
    data
}
