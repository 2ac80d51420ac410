use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Binary;

#[cw_serde]
pub struct InstantiateMsg {}

#[cw_serde]
pub enum ExecuteMsg {
    /// Instantiates `code_id` with the caller as admin, forwarding the attached funds
    Deploy {
        code_id: u64,
        msg: Binary,
        label: String,
    },
    /// Always fails, standing in for a rejected deployment
    Reject {},
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(u64)]
    DeploymentCount {},
}
