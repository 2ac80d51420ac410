#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult};
use cw2::set_contract_version;

use aa_account_utils::nonce::{ExecuteMsg, InstantiateMsg, QueryMsg};

use crate::{error::ContractError, state::MIN_NONCES};

// version info for migration info
const CONTRACT_NAME: &str = env!("CARGO_PKG_NAME");
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

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
        ExecuteMsg::IncrementMinNonceIfEquals { expected_nonce } => {
            execute::increment_min_nonce_if_equals(deps, info, expected_nonce)
        }
    }
}

mod execute {
    use cosmwasm_std::{DepsMut, MessageInfo, Response};

    use crate::{error::ContractError, state::MIN_NONCES};

    /// Nonces are scoped to the caller, so an account can only ever consume its own.
    pub fn increment_min_nonce_if_equals(
        deps: DepsMut,
        info: MessageInfo,
        expected_nonce: u64,
    ) -> Result<Response, ContractError> {
        let current = MIN_NONCES
            .may_load(deps.storage, info.sender.clone())?
            .unwrap_or_default();

        if current != expected_nonce {
            return Err(ContractError::IncorrectNonce {
                expected: current,
                actual: expected_nonce,
            });
        }

        let next = current
            .checked_add(1)
            .ok_or(ContractError::NonceOverflow {})?;
        MIN_NONCES.save(deps.storage, info.sender.clone(), &next)?;

        Ok(Response::new()
            .add_attribute("method", "increment_min_nonce_if_equals")
            .add_attribute("account", info.sender)
            .add_attribute("consumed_nonce", current.to_string())
            .add_attribute("min_nonce", next.to_string()))
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::GetMinNonce { address } => {
            let address = deps.api.addr_validate(&address)?;
            let min_nonce = MIN_NONCES
                .may_load(deps.storage, address)?
                .unwrap_or_default();
            to_json_binary(&min_nonce)
        }
    }
}
