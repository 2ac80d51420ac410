use aa_account_utils::{msg::Config, transaction::Transaction};
use cw_storage_plus::Item;

pub const CONFIG: Item<Config> = Item::new("config");
/// Transaction waiting for the nonce registry to acknowledge its nonce.
pub const PENDING_TRANSACTION: Item<Transaction> = Item::new("pending_transaction");
