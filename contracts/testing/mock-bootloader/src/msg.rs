use aa_account_utils::transaction::Transaction;
use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Addr;

#[cw_serde]
pub struct InstantiateMsg {}

#[cw_serde]
pub enum ExecuteMsg {
    /// Runs validate, then pay and execute if the account authorized the transaction
    ProcessTransaction {
        account: String,
        transaction: Transaction,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(Option<TransactionOutcome>)]
    LastOutcome {},
}

#[cw_serde]
pub enum TransactionOutcome {
    /// Signature did not match the owner. The nonce stays consumed.
    Rejected { account: Addr, nonce: u64 },
    Completed { account: Addr, nonce: u64 },
}
