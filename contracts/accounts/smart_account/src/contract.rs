#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    ensure, to_json_binary, Attribute, Binary, Deps, DepsMut, Env, MessageInfo, Reply, Response,
    StdError, StdResult,
};
use cw2::set_contract_version;

use aa_account_utils::{
    error::ContractError,
    msg::{Config, ExecuteMsg, InstantiateMsg, QueryMsg},
    nonce,
};

use crate::{
    execution::execution_msgs,
    state::CONFIG,
    validation::{authorize, take_pending},
};

// version info for migration info
const CONTRACT_NAME: &str = env!("CARGO_PKG_NAME");
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

// Reply ids
pub const VALIDATE_REPLY_ID: u64 = 1;
pub const VALIDATE_AND_EXECUTE_REPLY_ID: u64 = 2;
pub const PAYMENT_REPLY_ID: u64 = 3;
pub const EXECUTION_REPLY_ID: u64 = 4;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> StdResult<Response> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    cw_ownable::initialize_owner(deps.storage, deps.api, Some(msg.owner.as_str()))?;

    let config = Config {
        sequencer: deps.api.addr_validate(&msg.sequencer)?,
        nonce_registry: deps.api.addr_validate(&msg.nonce_registry)?,
        deployer: deps.api.addr_validate(&msg.deployer)?,
        fee_collector: deps.api.addr_validate(&msg.fee_collector)?,
        fee_denom: msg.fee_denom,
    };
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("owner", msg.owner)
        .add_attribute("sequencer", config.sequencer))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::ValidateTransaction {
            tx_hash,
            transaction,
            ..
        } => execute::validate_transaction(deps, info, tx_hash, transaction),
        ExecuteMsg::PayForTransaction { transaction, .. } => {
            execute::pay_for_transaction(deps, transaction)
        }
        ExecuteMsg::ExecuteTransaction { transaction, .. } => {
            execute::execute_transaction(deps, info, transaction)
        }
        ExecuteMsg::ExecuteTransactionFromOutside { transaction } => {
            execute::execute_transaction_from_outside(deps, transaction)
        }
        // Reserved for paymaster support
        ExecuteMsg::PrepareForPaymaster { .. } => {
            Ok(Response::new().add_attribute("method", "prepare_for_paymaster"))
        }
        ExecuteMsg::UpdateOwnership(action) => execute::update_ownership(deps, env, info, action),
    }
}

mod execute {
    use aa_account_utils::{error::ContractError, transaction::Transaction};
    use cosmwasm_std::{Binary, DepsMut, Env, MessageInfo, Response};

    use crate::{
        execution::{execution_msgs, fee_payment_msg},
        helpers::{require_sequencer, require_sequencer_or_owner},
        state::CONFIG,
        validation::consume_nonce,
    };

    use super::{VALIDATE_AND_EXECUTE_REPLY_ID, VALIDATE_REPLY_ID};

    pub fn validate_transaction(
        deps: DepsMut,
        info: MessageInfo,
        tx_hash: Binary,
        transaction: Transaction,
    ) -> Result<Response, ContractError> {
        let config = CONFIG.load(deps.storage)?;
        require_sequencer(&info.sender, &config)?;

        let nonce = transaction.nonce;
        let consume = consume_nonce(deps.storage, &config, transaction, VALIDATE_REPLY_ID)?;

        Ok(Response::new()
            .add_submessage(consume)
            .add_attribute("method", "validate_transaction")
            .add_attribute("tx_hash", tx_hash.to_base64())
            .add_attribute("nonce", nonce.to_string()))
    }

    pub fn pay_for_transaction(
        deps: DepsMut,
        transaction: Transaction,
    ) -> Result<Response, ContractError> {
        let config = CONFIG.load(deps.storage)?;
        let fee = transaction.fee()?;

        let response = Response::new()
            .add_attribute("method", "pay_for_transaction")
            .add_attribute("nonce", transaction.nonce.to_string())
            .add_attribute("fee", fee);

        Ok(match fee_payment_msg(&config, fee) {
            Some(payment) => response.add_submessage(payment),
            None => response,
        })
    }

    pub fn execute_transaction(
        deps: DepsMut,
        info: MessageInfo,
        transaction: Transaction,
    ) -> Result<Response, ContractError> {
        let config = CONFIG.load(deps.storage)?;
        let owner = cw_ownable::get_ownership(deps.storage)?.owner;
        require_sequencer_or_owner(&info.sender, &config, owner.as_ref())?;

        let nonce = transaction.nonce;
        let target = transaction.to.clone();
        let msgs = execution_msgs(deps.api, &config, transaction)?;

        Ok(Response::new()
            .add_submessages(msgs)
            .add_attribute("method", "execute_transaction")
            .add_attribute("nonce", nonce.to_string())
            .add_attribute("to", target))
    }

    /// Anyone may submit, the owner's signature is the only gate.
    pub fn execute_transaction_from_outside(
        deps: DepsMut,
        transaction: Transaction,
    ) -> Result<Response, ContractError> {
        let config = CONFIG.load(deps.storage)?;

        let nonce = transaction.nonce;
        let consume = consume_nonce(
            deps.storage,
            &config,
            transaction,
            VALIDATE_AND_EXECUTE_REPLY_ID,
        )?;

        Ok(Response::new()
            .add_submessage(consume)
            .add_attribute("method", "execute_transaction_from_outside")
            .add_attribute("nonce", nonce.to_string()))
    }

    pub fn update_ownership(
        deps: DepsMut,
        env: Env,
        info: MessageInfo,
        action: cw_ownable::Action,
    ) -> Result<Response, ContractError> {
        let result = cw_ownable::update_ownership(deps, &env.block, &info.sender, action.clone())?;
        Ok(Response::default()
            .add_attribute("method", "update_ownership")
            .add_attribute("action", format!("{:?}", action))
            .add_attribute("result", format!("{:?}", result)))
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(deps: DepsMut, env: Env, msg: Reply) -> Result<Response, ContractError> {
    match msg.id {
        VALIDATE_REPLY_ID => {
            let config = CONFIG.load(deps.storage)?;
            let transaction = take_pending(deps.storage)?;
            let verdict = authorize(deps.as_ref(), &env, &config, &transaction)?;

            let authorized = verdict.is_success();
            let data = to_json_binary(&verdict)?;
            let verdict_attr: Attribute = verdict.try_into()?;

            Ok(Response::new()
                .set_data(data)
                .add_attribute("method", "validate_transaction_reply")
                .add_attribute("nonce", transaction.nonce.to_string())
                .add_attribute("authorized", authorized.to_string())
                .add_attributes(vec![verdict_attr]))
        }
        VALIDATE_AND_EXECUTE_REPLY_ID => {
            let config = CONFIG.load(deps.storage)?;
            let transaction = take_pending(deps.storage)?;
            let verdict = authorize(deps.as_ref(), &env, &config, &transaction)?;
            ensure!(verdict.is_success(), ContractError::InvalidSignature {});

            let nonce = transaction.nonce;
            let msgs = execution_msgs(deps.api, &config, transaction)?;

            Ok(Response::new()
                .add_submessages(msgs)
                .add_attribute("method", "execute_transaction_from_outside_reply")
                .add_attribute("nonce", nonce.to_string()))
        }
        // Only registered to reply on error
        PAYMENT_REPLY_ID => Err(ContractError::FailedToPay {}),
        EXECUTION_REPLY_ID => Err(ContractError::ExecutionFailed {}),
        _ => Err(ContractError::Std(StdError::generic_err("unknown reply id"))),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Ownership {} => to_json_binary(&cw_ownable::get_ownership(deps.storage)?),
        QueryMsg::GetConfig {} => to_json_binary(&CONFIG.load(deps.storage)?),
        QueryMsg::TransactionHash { transaction } => {
            let hash = transaction.encode_hash(&env.block.chain_id, &env.contract.address);
            to_json_binary(&Binary::from(hash))
        }
        QueryMsg::MinNonce {} => {
            let config = CONFIG.load(deps.storage)?;
            let min_nonce: u64 = deps.querier.query_wasm_smart(
                config.nonce_registry,
                &nonce::QueryMsg::GetMinNonce {
                    address: env.contract.address.to_string(),
                },
            )?;
            to_json_binary(&min_nonce)
        }
    }
}
