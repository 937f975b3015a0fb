// src/explorer.rs
use crate::models::Transaction;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ExplorerError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("explorer returned HTTP {0}")]
    Status(StatusCode),
    #[error("invalid JSON body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("response has no \"result\" field")]
    MissingResult,
    #[error("\"result\" is not a list: {0}")]
    MalformedResult(String),
}

/// Anything that can list recent transactions for an address.
#[async_trait]
pub trait TransactionSource: Send + Sync {
    async fn transactions(&self, address: &str) -> Result<Vec<Transaction>, ExplorerError>;
}

/// Blockscout/Etherscan-style `module=account&action=txlist` client.
#[derive(Debug, Clone)]
pub struct ExplorerClient {
    client: Client,
    base_url: String,
}

impl ExplorerClient {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ExplorerError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn txlist_url(&self, address: &str) -> String {
        format!(
            "{}/api?module=account&action=txlist&address={}",
            self.base_url, address
        )
    }
}

#[async_trait]
impl TransactionSource for ExplorerClient {
    async fn transactions(&self, address: &str) -> Result<Vec<Transaction>, ExplorerError> {
        let url = self.txlist_url(address);
        debug!("📡 GET {}", url);

        let resp = self.client.get(&url).send().await?;
        if resp.status() != StatusCode::OK {
            return Err(ExplorerError::Status(resp.status()));
        }
        let text = resp.text().await?;
        parse_txlist(&text)
    }
}

/// Decode a `txlist` body. Entries that do not look like transactions are
/// dropped individually so one odd row cannot hide the rest.
pub fn parse_txlist(body: &str) -> Result<Vec<Transaction>, ExplorerError> {
    let mut parsed: Value = serde_json::from_str(body)?;
    let result = match parsed.get_mut("result") {
        Some(result) => result.take(),
        None => return Err(ExplorerError::MissingResult),
    };

    let entries = match result {
        Value::Array(entries) => entries,
        other => return Err(ExplorerError::MalformedResult(other.to_string())),
    };

    let mut txs = Vec::with_capacity(entries.len());
    for entry in entries {
        match serde_json::from_value::<Transaction>(entry) {
            Ok(tx) => txs.push(tx),
            Err(e) => debug!("Skipping undecodable txlist entry: {}", e),
        }
    }
    Ok(txs)
}
