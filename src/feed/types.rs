use alloy::primitives::U256;
use std::fmt;

// ============================================================================
// Data Types
// ============================================================================

/// Which of the account's feeds is being paged through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedKind {
    Transactions,
    Erc20,
    Erc721,
    Erc1155,
}

impl FeedKind {
    pub const ALL: [FeedKind; 4] = [
        FeedKind::Transactions,
        FeedKind::Erc20,
        FeedKind::Erc721,
        FeedKind::Erc1155,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            FeedKind::Transactions => "Transactions",
            FeedKind::Erc20 => "ERC-20 Token Txns",
            FeedKind::Erc721 => "ERC-721 Token Txns",
            FeedKind::Erc1155 => "ERC-1155 Token Txns",
        }
    }

    /// Plain transactions page like a server-side table, token feeds scroll
    pub fn merge_mode(&self) -> MergeMode {
        match self {
            FeedKind::Transactions => MergeMode::Replace,
            _ => MergeMode::Append,
        }
    }

    pub fn next(&self) -> Self {
        match self {
            FeedKind::Transactions => FeedKind::Erc20,
            FeedKind::Erc20 => FeedKind::Erc721,
            FeedKind::Erc721 => FeedKind::Erc1155,
            FeedKind::Erc1155 => FeedKind::Transactions,
        }
    }
}

/// How a fetched page is merged into the feed state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeMode {
    /// Infinite scroll: edges go after everything already loaded
    Append,
    /// Paginated table: the page replaces what is shown
    Replace,
}

/// Continuation position in a feed
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Cursor {
    /// First page; sent to the indexer as `null`
    Start,
    At(String),
}

impl Cursor {
    /// Value for the `$cursor` query variable
    pub fn as_param(&self) -> Option<&str> {
        match self {
            Cursor::Start => None,
            Cursor::At(c) => Some(c.as_str()),
        }
    }

    /// Absolute position cursor, hex encoded the way the indexer expects
    pub fn from_offset(offset: u64) -> Self {
        Cursor::At(format!("{offset:#x}"))
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cursor::Start => f.write_str("start"),
            Cursor::At(c) => f.write_str(c),
        }
    }
}

/// Remaining-data state of the remote feed. Replaced wholesale on each fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageInfo {
    pub has_next: bool,
    pub has_previous: bool,
    pub first: Option<String>,
    pub last: Option<String>,
}

impl PageInfo {
    /// Cursor of the page after this one, `None` when the feed is exhausted
    pub fn next_cursor(&self) -> Option<Cursor> {
        if !self.has_next {
            return None;
        }
        self.last.clone().map(Cursor::At)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockRef {
    /// Token feeds only carry a timestamp
    pub number: Option<u64>,
    pub timestamp: u64,
}

/// Token contract referenced by a token feed edge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRef {
    pub address: String,
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub decimals: Option<u8>,
}

/// Token transfer nested inside a plain transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenTransaction {
    pub trx_index: u64,
    pub token_address: String,
    pub token_name: Option<String>,
    pub token_symbol: Option<String>,
    pub token_type: Option<String>,
    pub token_id: Option<String>,
    pub token_decimals: Option<u8>,
    pub kind: Option<String>,
    pub sender: String,
    pub recipient: String,
    pub amount: U256,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedTransaction {
    pub hash: String,
    pub from: String,
    /// `None` for contract creation
    pub to: Option<String>,
    pub value: U256,
    pub gas_used: Option<u64>,
    pub block: BlockRef,
    pub token_transactions: Vec<TokenTransaction>,
    // Token feeds
    pub token: Option<TokenRef>,
    pub token_id: Option<String>,
    pub method: Option<String>,
}

/// An edge as it comes off the wire, before address resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEdge {
    pub cursor: String,
    pub transaction: FeedTransaction,
}

/// A resolved edge. Only these enter the feed state, so an edge is never
/// resolved twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionEdge {
    pub cursor: String,
    pub transaction: FeedTransaction,
    pub from_name: Option<String>,
    pub to_name: Option<String>,
}

impl TransactionEdge {
    /// Domain name when one is registered, raw address otherwise
    pub fn from_display(&self) -> &str {
        self.from_name
            .as_deref()
            .unwrap_or(&self.transaction.from)
    }

    pub fn to_display(&self) -> Option<&str> {
        self.to_name
            .as_deref()
            .or(self.transaction.to.as_deref())
    }

    /// The address on the other side of this edge from `account`
    pub fn counterparty(&self, account: &str) -> Option<&str> {
        if self.transaction.from.eq_ignore_ascii_case(account) {
            self.transaction.to.as_deref()
        } else {
            Some(self.transaction.from.as_str())
        }
    }
}

/// Account-level figures the indexer returns next to every list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountSummary {
    /// Native balance in wei
    pub balance: U256,
    pub tx_count: u64,
}

/// One page as returned by a [`super::FeedSource`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawPage {
    pub edges: Vec<RawEdge>,
    pub page_info: PageInfo,
    pub total_count: u64,
    pub account: Option<AccountSummary>,
}

/// A page fetch, stamped with the generation of the state that issued it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub account: String,
    pub kind: FeedKind,
    pub cursor: Cursor,
    pub count: u32,
    pub generation: u64,
    pub merge: MergeMode,
}

/// A fully resolved page, ready to be applied to the feed state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResult {
    pub edges: Vec<TransactionEdge>,
    pub page_info: PageInfo,
    pub total_count: u64,
    pub account: Option<AccountSummary>,
    pub requested: Cursor,
    pub generation: u64,
    pub merge: MergeMode,
}
