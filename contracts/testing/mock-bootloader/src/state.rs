use aa_account_utils::transaction::Transaction;
use cosmwasm_schema::cw_serde;
use cosmwasm_std::Addr;
use cw_storage_plus::Item;

use crate::msg::TransactionOutcome;

#[cw_serde]
pub struct PendingTransaction {
    pub account: Addr,
    pub transaction: Transaction,
}

/// Transaction waiting for the account's validation reply
pub const PENDING: Item<PendingTransaction> = Item::new("pending");
pub const LAST_OUTCOME: Item<TransactionOutcome> = Item::new("last_outcome");
