mod helper;
mod types;

pub use helper::{parse_u256, parse_u64};
pub use types::*;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, error};

use crate::error::{FeedError, FeedResult};
use crate::feed::{FeedKind, FeedSource, RawPage};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const PAGE_INFO_FIELDS: &str = "pageInfo { first last hasNext hasPrevious } totalCount";

const TRANSACTION_FIELDS: &str = "transaction { hash from to value gasUsed \
     block { number timestamp } \
     tokenTransactions { trxIndex tokenAddress tokenName tokenSymbol tokenType tokenId tokenDecimals type sender recipient amount } }";

/// GraphQL list field behind each feed kind
pub fn list_field(kind: FeedKind) -> &'static str {
    match kind {
        FeedKind::Transactions => "txList",
        FeedKind::Erc20 => "erc20TxList",
        FeedKind::Erc721 => "erc721TxList",
        FeedKind::Erc1155 => "erc1155TxList",
    }
}

/// Account query for one feed kind; the list is aliased to `list`
pub fn feed_query(kind: FeedKind) -> String {
    let edge_fields = match kind {
        FeedKind::Transactions => TRANSACTION_FIELDS.to_string(),
        FeedKind::Erc20 => {
            "trx { trxHash sender recipient amount timeStamp trxType token { address name symbol decimals } }"
                .to_string()
        }
        FeedKind::Erc721 | FeedKind::Erc1155 => {
            "trx { trxHash sender recipient amount timeStamp tokenId trxType token { address name symbol decimals } }"
                .to_string()
        }
    };

    format!(
        "query AccountFeed($address: Address!, $cursor: Cursor, $count: Int!) {{ \
         account(address: $address) {{ address balance txCount \
         list: {field}(cursor: $cursor, count: $count) {{ {PAGE_INFO_FIELDS} edges {{ cursor {edge_fields} }} }} }} }}",
        field = list_field(kind),
    )
}

/// HTTP client for the chain indexer's GraphQL endpoint
#[derive(Debug, Clone)]
pub struct GraphQlClient {
    http: Client,
    endpoint: Url,
}

impl GraphQlClient {
    pub fn new(endpoint: &str) -> Result<Self> {
        let endpoint = Url::parse(endpoint).context("Invalid GraphQL URL")?;
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    /// POST one query and unwrap the `data` member
    pub async fn query<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> FeedResult<T> {
        let body = json!({ "query": query, "variables": variables });

        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await
            .inspect_err(|e| error!(error = %e, "GraphQL request failed"))?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            error!(status = %status, body = %text, "GraphQL endpoint returned error");
            return Err(FeedError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed: GraphQlResponse<T> = serde_json::from_str(&text)
            .map_err(|e| FeedError::Decode(format!("invalid GraphQL response: {e}")))?;

        if !parsed.errors.is_empty() {
            return Err(FeedError::GraphQl(
                parsed.errors.into_iter().map(|e| e.message).collect(),
            ));
        }

        parsed
            .data
            .ok_or_else(|| FeedError::Decode("GraphQL response has no data".to_string()))
    }
}

#[async_trait]
impl FeedSource for GraphQlClient {
    async fn fetch_page(
        &self,
        kind: FeedKind,
        account: &str,
        cursor: Option<&str>,
        count: u32,
    ) -> FeedResult<RawPage> {
        debug!(account, ?kind, ?cursor, count, "GraphQL feed query");

        let variables = json!({
            "address": account,
            "cursor": cursor,
            "count": count,
        });
        let data: AccountData = self.query(&feed_query(kind), variables).await?;

        let node = data
            .account
            .ok_or_else(|| FeedError::AccountNotFound(account.to_string()))?;

        let account = node.summary()?;
        let mut page = match node.list {
            Some(connection) => RawPage::try_from(connection)?,
            None => RawPage::default(),
        };
        page.account = account;
        Ok(page)
    }
}
