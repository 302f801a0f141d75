use alloy::primitives::U256;

use crate::error::FeedError;

// ============================================================================
// Helper Functions
// ============================================================================

/// Parse an indexer quantity: `0x`-prefixed hex, or plain decimal
pub fn parse_u64(value: &str) -> Result<u64, FeedError> {
    let trimmed = value.trim();
    let parsed = match trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        Some("") => Ok(0),
        Some(hex) => u64::from_str_radix(hex, 16),
        None => trimmed.parse::<u64>(),
    };
    parsed.map_err(|e| FeedError::Decode(format!("invalid quantity {value:?}: {e}")))
}

/// Same as [`parse_u64`] for 256-bit amounts
pub fn parse_u256(value: &str) -> Result<U256, FeedError> {
    let trimmed = value.trim();
    let parsed = match trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        Some("") => Ok(U256::ZERO),
        Some(hex) => U256::from_str_radix(hex, 16),
        None => U256::from_str_radix(trimmed, 10),
    };
    parsed.map_err(|e| FeedError::Decode(format!("invalid amount {value:?}: {e}")))
}
