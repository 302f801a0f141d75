/// Represents the type of search query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchQuery {
    /// Account address (0x + 40 hex chars)
    Address(String),
    /// Invalid or unrecognized query
    Invalid(String),
}

impl SearchQuery {
    /// Parse a search string into a typed query
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();

        if trimmed.is_empty() {
            return Self::Invalid("Empty query".to_string());
        }

        let Some(hex_part) = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
        else {
            return Self::Invalid(format!("Expected a 0x-prefixed address: {trimmed}"));
        };

        if !hex_part.chars().all(|c| c.is_ascii_hexdigit()) {
            return Self::Invalid(format!("Invalid hex characters in: {trimmed}"));
        }

        match hex_part.len() {
            40 => Self::Address(format!("0x{}", hex_part.to_lowercase())),
            n => Self::Invalid(format!(
                "Unrecognized format: {trimmed} ({n} hex chars, expected 40)"
            )),
        }
    }

    /// Returns a human-readable description of the query type
    pub fn description(&self) -> String {
        match self {
            Self::Address(addr) => format!("Address: {addr}"),
            Self::Invalid(reason) => format!("Invalid: {reason}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_address() {
        let addr = "0x742d35Cc6634C0532925a3b844Bc9e7595f8fE31";
        assert_eq!(
            SearchQuery::parse(addr),
            SearchQuery::Address("0x742d35cc6634c0532925a3b844bc9e7595f8fe31".into())
        );
    }

    #[test]
    fn test_parse_address_upper_prefix() {
        let addr = "0X742D35CC6634C0532925A3B844BC9E7595F8FE31";
        assert!(matches!(SearchQuery::parse(addr), SearchQuery::Address(a) if a.starts_with("0x742d")));
    }

    #[test]
    fn test_parse_rejects_tx_hash() {
        let hash = "0x5c504ed432cb51138bcf09aa5e8a410dd4a1e204ef84bfed1be16dfba1b22060";
        assert!(matches!(SearchQuery::parse(hash), SearchQuery::Invalid(_)));
    }

    #[test]
    fn test_parse_rejects_domain_and_number() {
        assert!(matches!(SearchQuery::parse("alice.ftm"), SearchQuery::Invalid(_)));
        assert!(matches!(SearchQuery::parse("12345678"), SearchQuery::Invalid(_)));
        assert!(matches!(SearchQuery::parse("   "), SearchQuery::Invalid(_)));
    }

    #[test]
    fn test_parse_rejects_bad_hex() {
        let addr = "0x742d35Cc6634C0532925a3b844Bc9e7595f8fEZZ";
        if let SearchQuery::Invalid(reason) = SearchQuery::parse(addr) {
            assert!(reason.contains("Invalid hex"));
        } else {
            panic!("Expected Invalid variant");
        }
    }
}
