//! Messages of the nonce registry, the system contract that tracks the minimum
//! valid nonce of every account.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{to_json_binary, Addr, CosmosMsg, StdResult, WasmMsg};

#[cw_serde]
pub struct InstantiateMsg {}

#[cw_serde]
pub enum ExecuteMsg {
    /// Increments the caller's minimum nonce if it currently equals `expected_nonce`,
    /// fails otherwise.
    IncrementMinNonceIfEquals { expected_nonce: u64 },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(u64)]
    GetMinNonce { address: String },
}

pub fn increment_min_nonce_if_equals_msg(
    registry: &Addr,
    expected_nonce: u64,
) -> StdResult<CosmosMsg> {
    Ok(CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: registry.to_string(),
        msg: to_json_binary(&ExecuteMsg::IncrementMinNonceIfEquals { expected_nonce })?,
        funds: vec![],
    }))
}
