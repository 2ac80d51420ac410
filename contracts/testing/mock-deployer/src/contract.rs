#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdError, StdResult,
    WasmMsg,
};
use cw2::set_contract_version;
use thiserror::Error;

use crate::msg::{ExecuteMsg, InstantiateMsg, QueryMsg};
use crate::state::DEPLOYMENT_COUNT;

const CONTRACT_NAME: &str = env!("CARGO_PKG_NAME");
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),
    #[error("Deployment rejected")]
    DeploymentRejected {},
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    _msg: InstantiateMsg,
) -> StdResult<Response> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    DEPLOYMENT_COUNT.save(deps.storage, &0)?;
    Ok(Response::new().add_attribute("method", "instantiate"))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Deploy {
            code_id,
            msg,
            label,
        } => {
            let count = DEPLOYMENT_COUNT.update(deps.storage, |count| -> StdResult<_> {
                Ok(count + 1)
            })?;

            Ok(Response::new()
                .add_message(WasmMsg::Instantiate {
                    admin: Some(info.sender.to_string()),
                    code_id,
                    msg,
                    funds: info.funds,
                    label: label.clone(),
                })
                .add_attribute("method", "deploy")
                .add_attribute("deployer", info.sender)
                .add_attribute("label", label)
                .add_attribute("deployment_count", count.to_string()))
        }
        ExecuteMsg::Reject {} => Err(ContractError::DeploymentRejected {}),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::DeploymentCount {} => to_json_binary(&DEPLOYMENT_COUNT.load(deps.storage)?),
    }
}
