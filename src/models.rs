// src/models.rs
use serde::Deserialize;
use std::fmt;

/// An address someone asked us to watch, keyed by its lowercase form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchedAddress {
    pub address: String, // always lowercase
    pub name: String,
}

/// One entry of the explorer `txlist` result. Only the fields we classify on.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Transaction {
    pub hash: String,
    #[serde(default)]
    pub to: Option<String>, // null for contract creation
    pub from: String,
    #[serde(default)]
    pub input: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxKind {
    Received,
    Sent,
    BuyNft,
    SellNft,
    Other,
}

impl TxKind {
    pub fn label(self) -> &'static str {
        match self {
            TxKind::Received => "📥 Received",
            TxKind::Sent => "📤 Sent",
            TxKind::BuyNft => "🎨 Buy NFT",
            TxKind::SellNft => "🛒 Sell NFT",
            TxKind::Other => "🔄 Transaction",
        }
    }
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
