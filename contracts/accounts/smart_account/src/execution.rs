use aa_account_utils::{error::ContractError, msg::Config, transaction::Transaction};
use cosmwasm_std::{coins, Api, BankMsg, SubMsg, Uint128, WasmMsg};

use crate::contract::{EXECUTION_REPLY_ID, PAYMENT_REPLY_ID};

/// Transfer of the fee reserve to the fee collector. Nothing to send for a zero fee.
pub fn fee_payment_msg(config: &Config, fee: Uint128) -> Option<SubMsg> {
    if fee.is_zero() {
        return None;
    }

    Some(SubMsg::reply_on_error(
        BankMsg::Send {
            to_address: config.fee_collector.to_string(),
            amount: coins(fee.u128(), &config.fee_denom),
        },
        PAYMENT_REPLY_ID,
    ))
}

/// Messages carrying out the transaction call.
///
/// Calls to the deployer go out as plain messages without a gas limit, so the
/// deployer's own error reaches the caller. Any other target receives exactly
/// `value` and `data` and a failure comes back as `ExecutionFailed`.
pub fn execution_msgs(
    api: &dyn Api,
    config: &Config,
    transaction: Transaction,
) -> Result<Vec<SubMsg>, ContractError> {
    let target = api.addr_validate(&transaction.to)?;
    let funds = if transaction.value.is_zero() {
        vec![]
    } else {
        coins(transaction.value.u128(), &config.fee_denom)
    };

    if target == config.deployer {
        return Ok(vec![SubMsg::new(WasmMsg::Execute {
            contract_addr: target.to_string(),
            msg: transaction.data,
            funds,
        })]);
    }

    if transaction.data.is_empty() {
        // Call without payload to an address: a bare value transfer
        if funds.is_empty() {
            return Ok(vec![]);
        }
        return Ok(vec![SubMsg::reply_on_error(
            BankMsg::Send {
                to_address: target.to_string(),
                amount: funds,
            },
            EXECUTION_REPLY_ID,
        )]);
    }

    Ok(vec![SubMsg::reply_on_error(
        WasmMsg::Execute {
            contract_addr: target.to_string(),
            msg: transaction.data,
            funds,
        },
        EXECUTION_REPLY_ID,
    )])
}
