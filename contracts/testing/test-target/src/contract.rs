#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdError, StdResult,
};
use cw2::set_contract_version;
use thiserror::Error;

use crate::msg::{CallRecord, ExecuteMsg, InstantiateMsg, QueryMsg};
use crate::state::LAST_RECORD;

const CONTRACT_NAME: &str = env!("CARGO_PKG_NAME");
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),
    #[error("Target call failed on purpose")]
    Failed {},
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    _msg: InstantiateMsg,
) -> StdResult<Response> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
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
        ExecuteMsg::Noop {} => Ok(Response::new().add_attribute("method", "noop")),
        ExecuteMsg::Record { note } => {
            LAST_RECORD.save(
                deps.storage,
                &CallRecord {
                    caller: info.sender.clone(),
                    note: note.clone(),
                    funds: info.funds,
                },
            )?;
            Ok(Response::new()
                .add_attribute("method", "record")
                .add_attribute("caller", info.sender)
                .add_attribute("note", note))
        }
        ExecuteMsg::Fail {} => Err(ContractError::Failed {}),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::LastRecord {} => to_json_binary(&LAST_RECORD.may_load(deps.storage)?),
    }
}
