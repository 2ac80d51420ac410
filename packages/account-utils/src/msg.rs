use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{
    from_json, to_json_binary, to_json_string, Addr, Attribute, Binary, CosmosMsg, StdError,
    StdResult, SubMsgResult, WasmMsg,
};
use cw_ownable::{cw_ownable_execute, cw_ownable_query};

use crate::transaction::Transaction;

/// Magic value returned by a successful validation.
pub const ACCOUNT_VALIDATION_SUCCESS_MAGIC: [u8; 4] = [0x20, 0x2b, 0xcc, 0xe7];
pub const VALIDATION_VERDICT_KEY: &str = "validation_verdict";
pub const WASM_EVENT_TYPE: &str = "wasm";

#[cw_serde]
pub struct InstantiateMsg {
    pub owner: String,
    // Only address allowed to drive validation
    pub sequencer: String,
    pub nonce_registry: String,
    // Privileged infrastructure, called through the forwarding path
    pub deployer: String,
    pub fee_collector: String,
    pub fee_denom: String,
}

#[cw_serde]
pub struct Config {
    pub sequencer: Addr,
    pub nonce_registry: Addr,
    pub deployer: Addr,
    pub fee_collector: Addr,
    pub fee_denom: String,
}

#[cw_ownable_execute]
#[cw_serde]
pub enum ExecuteMsg {
    // Consume the nonce, check funds and verify the owner signature (sequencer only)
    ValidateTransaction {
        tx_hash: Binary,
        suggested_signed_hash: Binary,
        transaction: Transaction,
    },
    // Pay the fee reserve to the fee collector (anyone)
    PayForTransaction {
        tx_hash: Binary,
        suggested_signed_hash: Binary,
        transaction: Transaction,
    },
    // Carry out the transaction call (sequencer or owner)
    ExecuteTransaction {
        tx_hash: Binary,
        suggested_signed_hash: Binary,
        transaction: Transaction,
    },
    // Validate and execute in one call, requires a valid owner signature (anyone)
    ExecuteTransactionFromOutside {
        transaction: Transaction,
    },
    // Paymaster hook, no-op
    PrepareForPaymaster {
        tx_hash: Binary,
        possible_signed_hash: Binary,
        transaction: Transaction,
    },
}

#[cw_ownable_query]
#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(Config)]
    GetConfig {},
    // Canonical hash the owner has to sign
    #[returns(Binary)]
    TransactionHash { transaction: Transaction },
    // Minimum nonce of this account, read from the registry
    #[returns(u64)]
    MinNonce {},
}

/// Outcome of a validation. Not an error: a rejected verdict still consumes the nonce.
#[cw_serde]
pub struct ValidationVerdict {
    pub magic: Binary,
}

impl ValidationVerdict {
    pub fn success() -> Self {
        ValidationVerdict {
            magic: Binary::from(ACCOUNT_VALIDATION_SUCCESS_MAGIC),
        }
    }

    pub fn rejected() -> Self {
        ValidationVerdict {
            magic: Binary::from([0u8; 4]),
        }
    }

    pub fn is_success(&self) -> bool {
        self.magic.as_slice() == ACCOUNT_VALIDATION_SUCCESS_MAGIC
    }
}

impl TryInto<Attribute> for ValidationVerdict {
    type Error = StdError;

    fn try_into(self) -> Result<Attribute, Self::Error> {
        let attr = Attribute {
            key: VALIDATION_VERDICT_KEY.to_string(),
            value: to_json_string(&self)?,
        };
        Ok(attr)
    }
}

impl TryFrom<SubMsgResult> for ValidationVerdict {
    type Error = StdError;

    fn try_from(value: SubMsgResult) -> Result<Self, Self::Error> {
        let sub_result = value.into_result().map_err(StdError::generic_err)?;

        for event in sub_result.events {
            if event.ty == WASM_EVENT_TYPE {
                for attr in event.attributes {
                    if attr.key == VALIDATION_VERDICT_KEY {
                        let verdict: ValidationVerdict = from_json(attr.value)?;
                        return Ok(verdict);
                    }
                }
            }
        }
        Err(StdError::generic_err("validation verdict not found"))
    }
}

pub fn validate_transaction_msg(account: &Addr, transaction: Transaction) -> StdResult<CosmosMsg> {
    account_msg(
        account,
        &ExecuteMsg::ValidateTransaction {
            tx_hash: Binary::default(),
            suggested_signed_hash: Binary::default(),
            transaction,
        },
    )
}

pub fn pay_for_transaction_msg(account: &Addr, transaction: Transaction) -> StdResult<CosmosMsg> {
    account_msg(
        account,
        &ExecuteMsg::PayForTransaction {
            tx_hash: Binary::default(),
            suggested_signed_hash: Binary::default(),
            transaction,
        },
    )
}

pub fn execute_transaction_msg(account: &Addr, transaction: Transaction) -> StdResult<CosmosMsg> {
    account_msg(
        account,
        &ExecuteMsg::ExecuteTransaction {
            tx_hash: Binary::default(),
            suggested_signed_hash: Binary::default(),
            transaction,
        },
    )
}

fn account_msg(account: &Addr, msg: &ExecuteMsg) -> StdResult<CosmosMsg> {
    Ok(CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: account.to_string(),
        msg: to_json_binary(msg)?,
        funds: vec![],
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::{Event, SubMsgResponse};

    #[test]
    fn verdict_magic() {
        assert!(ValidationVerdict::success().is_success());
        assert!(!ValidationVerdict::rejected().is_success());
        assert_eq!(ValidationVerdict::rejected().magic.as_slice(), &[0u8; 4]);
    }

    #[test]
    fn verdict_into_attribute() {
        let attr: Attribute = ValidationVerdict::success().try_into().unwrap();

        assert_eq!(attr.key, VALIDATION_VERDICT_KEY);
        assert_eq!(attr.value, r#"{"magic":"ICvM5w=="}"#);
    }

    #[test]
    fn verdict_try_from_submsg_result() {
        let event = Event::new(WASM_EVENT_TYPE)
            .add_attribute("method", "validate_transaction")
            .add_attribute(VALIDATION_VERDICT_KEY, r#"{"magic":"AAAAAA=="}"#);

        #[allow(deprecated)]
        let submsg_result = SubMsgResult::Ok(SubMsgResponse {
            events: vec![Event::new("execute"), event],
            data: None,
            msg_responses: vec![],
        });

        let verdict: ValidationVerdict = submsg_result.try_into().unwrap();
        assert_eq!(verdict, ValidationVerdict::rejected());
    }

    #[test]
    fn verdict_missing_from_submsg_result() {
        #[allow(deprecated)]
        let submsg_result = SubMsgResult::Ok(SubMsgResponse {
            events: vec![Event::new(WASM_EVENT_TYPE).add_attribute("method", "noop")],
            data: None,
            msg_responses: vec![],
        });

        let res: StdResult<ValidationVerdict> = submsg_result.try_into();
        assert!(res.is_err());
    }
}
