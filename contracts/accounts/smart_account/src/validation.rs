use aa_account_utils::{
    error::ContractError,
    msg::{Config, ValidationVerdict},
    nonce::increment_min_nonce_if_equals_msg,
    signature::recover_signer,
    transaction::Transaction,
};
use cosmwasm_std::{Deps, Env, Storage, SubMsg};

use crate::state::PENDING_TRANSACTION;

/// First validation step: consume the nonce in the registry.
///
/// The registry rejects a nonce that is not its current one and that failure
/// reverts the whole call. On success the reply continues with [`authorize`].
pub fn consume_nonce(
    storage: &mut dyn Storage,
    config: &Config,
    transaction: Transaction,
    reply_id: u64,
) -> Result<SubMsg, ContractError> {
    let msg = increment_min_nonce_if_equals_msg(&config.nonce_registry, transaction.nonce)?;
    PENDING_TRANSACTION.save(storage, &transaction)?;

    Ok(SubMsg::reply_on_success(msg, reply_id))
}

pub fn take_pending(storage: &mut dyn Storage) -> Result<Transaction, ContractError> {
    let transaction = PENDING_TRANSACTION.load(storage)?;
    PENDING_TRANSACTION.remove(storage);
    Ok(transaction)
}

/// Remaining validation steps, run once the nonce is consumed.
///
/// An under-funded transaction is a hard error. A signature that does not
/// recover to the owner is not: it yields the rejected verdict.
pub fn authorize(
    deps: Deps,
    env: &Env,
    config: &Config,
    transaction: &Transaction,
) -> Result<ValidationVerdict, ContractError> {
    let required = transaction.total_required_balance()?;
    let available = deps
        .querier
        .query_balance(&env.contract.address, &config.fee_denom)?
        .amount;
    if required > available {
        return Err(ContractError::InsufficientBalance {
            required,
            available,
        });
    }

    let hash = transaction.encode_hash(&env.block.chain_id, &env.contract.address);
    let signer = recover_signer(deps.api, &hash, &transaction.signature)?;
    let owner = cw_ownable::get_ownership(deps.storage)?.owner;

    match (signer, owner) {
        (Some(signer), Some(owner)) if signer == owner => Ok(ValidationVerdict::success()),
        (signer, _) => {
            deps.api.debug(&format!(
                "transaction with nonce {} not signed by the owner, recovered {:?}",
                transaction.nonce, signer
            ));
            Ok(ValidationVerdict::rejected())
        }
    }
}

#[cfg(test)]
mod tests {
    use aa_account_utils::{
        msg::{ExecuteMsg, InstantiateMsg},
        nonce::ExecuteMsg as NonceExecuteMsg,
        testing::TestSigner,
    };
    use cosmwasm_std::{
        coins, from_json,
        testing::{message_info, mock_dependencies_with_balance, mock_env, MockApi},
        to_json_binary, Binary, CosmosMsg, Reply, ReplyOn, SubMsgResponse, SubMsgResult,
        Uint128, WasmMsg,
    };

    use super::*;
    use crate::contract::{execute, instantiate, reply, VALIDATE_REPLY_ID};

    const DENOM: &str = "ucosm";

    fn nonce_ack(id: u64) -> Reply {
        #[allow(deprecated)]
        Reply {
            id,
            result: SubMsgResult::Ok(SubMsgResponse {
                events: vec![],
                data: None,
                msg_responses: vec![],
            }),
            payload: Binary::default(),
            gas_used: 0,
        }
    }

    fn instantiate_msg(api: &MockApi, owner: &TestSigner) -> InstantiateMsg {
        InstantiateMsg {
            owner: owner.address(api).to_string(),
            sequencer: api.addr_make("sequencer").to_string(),
            nonce_registry: api.addr_make("registry").to_string(),
            deployer: api.addr_make("deployer").to_string(),
            fee_collector: api.addr_make("collector").to_string(),
            fee_denom: DENOM.to_string(),
        }
    }

    fn transaction(value: u128) -> Transaction {
        Transaction {
            nonce: 0,
            to: MockApi::default().addr_make("target").to_string(),
            value: Uint128::new(value),
            data: Binary::default(),
            gas_limit: 100,
            gas_price: Uint128::new(10),
            signature: Binary::default(),
        }
    }

    #[test]
    fn nonce_is_consumed_before_anything_else() {
        let mut deps = mock_dependencies_with_balance(&coins(1_000, DENOM));
        let owner = TestSigner::from_seed(7);
        let msg = instantiate_msg(&deps.api, &owner);
        let sequencer = deps.api.addr_make("sequencer");
        let registry = deps.api.addr_make("registry");
        instantiate(deps.as_mut(), mock_env(), message_info(&sequencer, &[]), msg).unwrap();

        let env = mock_env();
        let tx = owner.sign(transaction(0), &env.block.chain_id, &env.contract.address);
        let res = execute(
            deps.as_mut(),
            env,
            message_info(&sequencer, &[]),
            ExecuteMsg::ValidateTransaction {
                tx_hash: Binary::default(),
                suggested_signed_hash: Binary::default(),
                transaction: tx,
            },
        )
        .unwrap();

        assert_eq!(res.messages.len(), 1);
        assert_eq!(res.messages[0].id, VALIDATE_REPLY_ID);
        assert_eq!(res.messages[0].reply_on, ReplyOn::Success);
        assert_eq!(
            res.messages[0].msg,
            CosmosMsg::Wasm(WasmMsg::Execute {
                contract_addr: registry.to_string(),
                msg: to_json_binary(&NonceExecuteMsg::IncrementMinNonceIfEquals {
                    expected_nonce: 0
                })
                .unwrap(),
                funds: vec![],
            })
        );
        assert!(PENDING_TRANSACTION.exists(&deps.storage));
    }

    #[test]
    fn balance_is_checked_after_the_nonce_acknowledgement() {
        let mut deps = mock_dependencies_with_balance(&coins(1_000, DENOM));
        let owner = TestSigner::from_seed(7);
        let msg = instantiate_msg(&deps.api, &owner);
        let sequencer = deps.api.addr_make("sequencer");
        instantiate(deps.as_mut(), mock_env(), message_info(&sequencer, &[]), msg).unwrap();

        // Needs 1_000 of fees plus 1 of value
        let env = mock_env();
        let tx = owner.sign(transaction(1), &env.block.chain_id, &env.contract.address);
        execute(
            deps.as_mut(),
            env,
            message_info(&sequencer, &[]),
            ExecuteMsg::ValidateTransaction {
                tx_hash: Binary::default(),
                suggested_signed_hash: Binary::default(),
                transaction: tx,
            },
        )
        .unwrap();

        let err = reply(deps.as_mut(), mock_env(), nonce_ack(VALIDATE_REPLY_ID)).unwrap_err();
        assert_eq!(
            err,
            ContractError::InsufficientBalance {
                required: Uint128::new(1_001),
                available: Uint128::new(1_000),
            }
        );
    }

    #[test]
    fn verdict_is_returned_as_data() {
        let mut deps = mock_dependencies_with_balance(&coins(1_000, DENOM));
        let owner = TestSigner::from_seed(7);
        let msg = instantiate_msg(&deps.api, &owner);
        let sequencer = deps.api.addr_make("sequencer");
        instantiate(deps.as_mut(), mock_env(), message_info(&sequencer, &[]), msg).unwrap();

        let env = mock_env();
        let tx = owner.sign(transaction(0), &env.block.chain_id, &env.contract.address);
        execute(
            deps.as_mut(),
            env,
            message_info(&sequencer, &[]),
            ExecuteMsg::ValidateTransaction {
                tx_hash: Binary::default(),
                suggested_signed_hash: Binary::default(),
                transaction: tx,
            },
        )
        .unwrap();

        let res = reply(deps.as_mut(), mock_env(), nonce_ack(VALIDATE_REPLY_ID)).unwrap();
        let verdict: ValidationVerdict = from_json(res.data.unwrap()).unwrap();
        assert!(verdict.is_success());
        assert!(!PENDING_TRANSACTION.exists(&deps.storage));
    }

    #[test]
    fn foreign_signer_is_rejected_without_error() {
        let mut deps = mock_dependencies_with_balance(&coins(1_000, DENOM));
        let owner = TestSigner::from_seed(7);
        let msg = instantiate_msg(&deps.api, &owner);
        let sequencer = deps.api.addr_make("sequencer");
        instantiate(deps.as_mut(), mock_env(), message_info(&sequencer, &[]), msg).unwrap();

        let env = mock_env();
        let config = crate::state::CONFIG.load(&deps.storage).unwrap();
        let tx = TestSigner::from_seed(9).sign(
            transaction(0),
            &env.block.chain_id,
            &env.contract.address,
        );

        let verdict = authorize(deps.as_ref(), &env, &config, &tx).unwrap();
        assert_eq!(verdict, ValidationVerdict::rejected());

        // Same transaction signed for another chain
        let tx = owner.sign(transaction(0), "other-chain", &env.contract.address);
        let verdict = authorize(deps.as_ref(), &env, &config, &tx).unwrap();
        assert_eq!(verdict, ValidationVerdict::rejected());
    }
}
