// src/classify.rs
use crate::models::{Transaction, TxKind};

/// `transfer(address,uint256)`
pub const TRANSFER_SELECTOR: &str = "0xa9059cbb";
/// `transferFrom(address,address,uint256)`
pub const TRANSFER_FROM_SELECTOR: &str = "0x23b872dd";

/// Classify a transaction relative to the watched (lowercase) address.
///
/// First match wins: direction checks always run before selector checks, so a
/// `transfer` call sent to the watched address itself is `Received`.
pub fn classify(tx: &Transaction, watched: &str) -> TxKind {
    let to = tx.to.as_deref().unwrap_or_default();
    if !to.is_empty() && to.eq_ignore_ascii_case(watched) {
        return TxKind::Received;
    }
    if tx.from.eq_ignore_ascii_case(watched) {
        return TxKind::Sent;
    }

    let input = tx.input.to_ascii_lowercase();
    if input.starts_with(TRANSFER_SELECTOR) {
        TxKind::BuyNft
    } else if input.starts_with(TRANSFER_FROM_SELECTOR) {
        TxKind::SellNft
    } else {
        TxKind::Other
    }
}
