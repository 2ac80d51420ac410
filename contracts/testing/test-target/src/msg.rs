use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Coin};

#[cw_serde]
pub struct InstantiateMsg {}

#[cw_serde]
pub enum ExecuteMsg {
    /// Succeeds without touching state
    Noop {},
    /// Stores the note together with the caller and the funds it sent
    Record { note: String },
    /// Always fails
    Fail {},
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(Option<CallRecord>)]
    LastRecord {},
}

#[cw_serde]
pub struct CallRecord {
    pub caller: Addr,
    pub note: String,
    pub funds: Vec<Coin>,
}
