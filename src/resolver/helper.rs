use alloy::primitives::U256;
use anyhow::{anyhow, Context, Result};

/// Decode the signals stored in the rainbow table into a display name.
///
/// Each signal word carries up to 32 bytes of the UTF-8 name, big endian and
/// zero padded; words are concatenated in order.
pub fn decode_name_signals(signals: &[U256]) -> Result<String> {
    let mut bytes = Vec::with_capacity(signals.len() * 32);
    for signal in signals {
        let word: [u8; 32] = signal.to_be_bytes();
        bytes.extend(word.iter().copied().filter(|&b| b != 0));
    }

    if bytes.is_empty() {
        return Err(anyhow!("Empty name signal"));
    }

    String::from_utf8(bytes).context("Name signal is not valid UTF-8")
}

/// Inverse of [`decode_name_signals`], used to build fixtures
pub fn encode_name_signals(name: &str) -> Vec<U256> {
    name.as_bytes()
        .chunks(32)
        .map(|chunk| {
            let mut word = [0u8; 32];
            word[32 - chunk.len()..].copy_from_slice(chunk);
            U256::from_be_bytes(word)
        })
        .collect()
}
