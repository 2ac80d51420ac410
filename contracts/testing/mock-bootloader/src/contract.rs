#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Reply, Response, StdError,
    StdResult, SubMsg,
};
use cw2::set_contract_version;
use thiserror::Error;

use aa_account_utils::msg::{
    execute_transaction_msg, pay_for_transaction_msg, validate_transaction_msg,
    ValidationVerdict,
};

use crate::msg::{ExecuteMsg, InstantiateMsg, QueryMsg, TransactionOutcome};
use crate::state::{PendingTransaction, LAST_OUTCOME, PENDING};

const CONTRACT_NAME: &str = env!("CARGO_PKG_NAME");
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

const VALIDATE_REPLY_ID: u64 = 1;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),
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
    _info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::ProcessTransaction {
            account,
            transaction,
        } => {
            let account = deps.api.addr_validate(&account)?;
            let validate = validate_transaction_msg(&account, transaction.clone())?;
            let nonce = transaction.nonce;

            PENDING.save(
                deps.storage,
                &PendingTransaction {
                    account: account.clone(),
                    transaction,
                },
            )?;

            Ok(Response::new()
                .add_submessage(SubMsg::reply_on_success(validate, VALIDATE_REPLY_ID))
                .add_attribute("method", "process_transaction")
                .add_attribute("account", account)
                .add_attribute("nonce", nonce.to_string()))
        }
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    match msg.id {
        VALIDATE_REPLY_ID => {
            let PendingTransaction {
                account,
                transaction,
            } = PENDING.load(deps.storage)?;
            PENDING.remove(deps.storage);

            let verdict = ValidationVerdict::try_from(msg.result)?;
            let nonce = transaction.nonce;

            if !verdict.is_success() {
                // The account consumed the nonce; nothing else happens.
                LAST_OUTCOME.save(
                    deps.storage,
                    &TransactionOutcome::Rejected {
                        account: account.clone(),
                        nonce,
                    },
                )?;
                return Ok(Response::new()
                    .add_attribute("method", "validation_reply")
                    .add_attribute("status", "rejected")
                    .add_attribute("nonce", nonce.to_string()));
            }

            LAST_OUTCOME.save(
                deps.storage,
                &TransactionOutcome::Completed {
                    account: account.clone(),
                    nonce,
                },
            )?;

            // Payment strictly before execution. Any failure reverts the whole lifecycle.
            Ok(Response::new()
                .add_message(pay_for_transaction_msg(&account, transaction.clone())?)
                .add_message(execute_transaction_msg(&account, transaction)?)
                .add_attribute("method", "validation_reply")
                .add_attribute("status", "authorized")
                .add_attribute("nonce", nonce.to_string()))
        }
        _ => Err(ContractError::Std(StdError::generic_err("unknown reply id"))),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::LastOutcome {} => to_json_binary(&LAST_OUTCOME.may_load(deps.storage)?),
    }
}
