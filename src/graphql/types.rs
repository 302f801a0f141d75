use serde::Deserialize;

use super::helper::*;
use crate::error::FeedError;
use crate::feed::{
    AccountSummary, BlockRef, FeedTransaction, PageInfo, RawEdge, RawPage, TokenRef,
    TokenTransaction,
};

// ============================================================================
// Wire Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct AccountData {
    pub account: Option<AccountNode>,
}

/// Every feed query aliases its list field as `list`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountNode {
    pub address: String,
    pub balance: Option<String>,
    pub tx_count: Option<Quantity>,
    pub list: Option<Connection>,
}

impl AccountNode {
    /// Balance and transaction count, when the indexer returned both
    pub fn summary(&self) -> Result<Option<AccountSummary>, FeedError> {
        let (Some(balance), Some(tx_count)) = (&self.balance, &self.tx_count) else {
            return Ok(None);
        };
        Ok(Some(AccountSummary {
            balance: parse_u256(balance)?,
            tx_count: tx_count.to_u64()?,
        }))
    }
}

/// Integers arrive as hex strings, occasionally as JSON numbers
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Quantity {
    Number(u64),
    Text(String),
}

impl Quantity {
    pub fn to_u64(&self) -> Result<u64, FeedError> {
        match self {
            Quantity::Number(n) => Ok(*n),
            Quantity::Text(s) => parse_u64(s),
        }
    }

    fn to_u8(&self) -> Result<u8, FeedError> {
        let value = self.to_u64()?;
        u8::try_from(value).map_err(|_| FeedError::Decode(format!("decimals out of range: {value}")))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub page_info: WirePageInfo,
    pub total_count: Quantity,
    #[serde(default)]
    pub edges: Vec<WireEdge>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WirePageInfo {
    pub first: Option<String>,
    pub last: Option<String>,
    #[serde(default)]
    pub has_next: bool,
    #[serde(default)]
    pub has_previous: bool,
}

/// Plain feeds carry `transaction`, token feeds carry `trx`
#[derive(Debug, Deserialize)]
pub struct WireEdge {
    pub cursor: String,
    pub transaction: Option<WireTransaction>,
    pub trx: Option<WireTokenTrx>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireTransaction {
    pub hash: String,
    pub from: String,
    pub to: Option<String>,
    pub value: String,
    pub gas_used: Option<String>,
    pub block: Option<WireBlock>,
    #[serde(default)]
    pub token_transactions: Vec<WireTokenTransaction>,
}

#[derive(Debug, Deserialize)]
pub struct WireBlock {
    pub number: String,
    pub timestamp: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireTokenTransaction {
    pub trx_index: Option<Quantity>,
    pub token_address: String,
    pub token_name: Option<String>,
    pub token_symbol: Option<String>,
    pub token_type: Option<String>,
    pub token_id: Option<String>,
    pub token_decimals: Option<Quantity>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub sender: String,
    pub recipient: String,
    pub amount: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireTokenTrx {
    pub trx_hash: String,
    pub sender: String,
    pub recipient: String,
    pub amount: String,
    pub time_stamp: String,
    pub token_id: Option<String>,
    pub trx_type: Option<String>,
    pub token: Option<WireToken>,
}

#[derive(Debug, Deserialize)]
pub struct WireToken {
    pub address: String,
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub decimals: Option<Quantity>,
}

// ============================================================================
// Conversions
// ============================================================================

impl TryFrom<Connection> for RawPage {
    type Error = FeedError;

    fn try_from(conn: Connection) -> Result<Self, Self::Error> {
        let edges = conn
            .edges
            .into_iter()
            .map(RawEdge::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(RawPage {
            edges,
            page_info: PageInfo {
                has_next: conn.page_info.has_next,
                has_previous: conn.page_info.has_previous,
                first: conn.page_info.first,
                last: conn.page_info.last,
            },
            total_count: conn.total_count.to_u64()?,
            account: None,
        })
    }
}

impl TryFrom<WireEdge> for RawEdge {
    type Error = FeedError;

    fn try_from(edge: WireEdge) -> Result<Self, Self::Error> {
        let transaction = match (edge.transaction, edge.trx) {
            (Some(tx), _) => FeedTransaction::try_from(tx)?,
            (None, Some(trx)) => FeedTransaction::try_from(trx)?,
            (None, None) => {
                return Err(FeedError::Decode(format!(
                    "edge {} has no transaction",
                    edge.cursor
                )))
            }
        };

        Ok(RawEdge {
            cursor: edge.cursor,
            transaction,
        })
    }
}

impl TryFrom<WireTransaction> for FeedTransaction {
    type Error = FeedError;

    fn try_from(tx: WireTransaction) -> Result<Self, Self::Error> {
        let block = match tx.block {
            Some(b) => BlockRef {
                number: Some(parse_u64(&b.number)?),
                timestamp: parse_u64(&b.timestamp)?,
            },
            None => BlockRef::default(),
        };

        let token_transactions = tx
            .token_transactions
            .into_iter()
            .map(TokenTransaction::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(FeedTransaction {
            hash: tx.hash,
            from: tx.from,
            to: tx.to,
            value: parse_u256(&tx.value)?,
            gas_used: tx.gas_used.as_deref().map(parse_u64).transpose()?,
            block,
            token_transactions,
            token: None,
            token_id: None,
            method: None,
        })
    }
}

impl TryFrom<WireTokenTrx> for FeedTransaction {
    type Error = FeedError;

    fn try_from(trx: WireTokenTrx) -> Result<Self, Self::Error> {
        let token = trx
            .token
            .map(|t| -> Result<TokenRef, FeedError> {
                Ok(TokenRef {
                    address: t.address,
                    name: t.name,
                    symbol: t.symbol,
                    decimals: t.decimals.as_ref().map(Quantity::to_u8).transpose()?,
                })
            })
            .transpose()?;

        Ok(FeedTransaction {
            hash: trx.trx_hash,
            from: trx.sender,
            to: Some(trx.recipient),
            value: parse_u256(&trx.amount)?,
            gas_used: None,
            block: BlockRef {
                number: None,
                timestamp: parse_u64(&trx.time_stamp)?,
            },
            token_transactions: vec![],
            token,
            token_id: trx.token_id,
            method: trx.trx_type,
        })
    }
}

impl TryFrom<WireTokenTransaction> for TokenTransaction {
    type Error = FeedError;

    fn try_from(t: WireTokenTransaction) -> Result<Self, Self::Error> {
        Ok(TokenTransaction {
            trx_index: t.trx_index.as_ref().map(Quantity::to_u64).transpose()?.unwrap_or(0),
            token_address: t.token_address,
            token_name: t.token_name,
            token_symbol: t.token_symbol,
            token_type: t.token_type,
            token_id: t.token_id,
            token_decimals: t.token_decimals.as_ref().map(Quantity::to_u8).transpose()?,
            kind: t.kind,
            sender: t.sender,
            recipient: t.recipient,
            amount: parse_u256(&t.amount)?,
        })
    }
}
