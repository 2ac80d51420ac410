use cosmwasm_std::{StdError, Uint128};
use cw_ownable::OwnershipError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error(transparent)]
    OwnershipError(#[from] OwnershipError),

    #[error("Unauthorized: {0}")]
    Unauthorized(#[from] UnauthorizedReason),

    #[error("Insufficient balance: required {required}, available {available}")]
    InsufficientBalance {
        required: Uint128,
        available: Uint128,
    },

    #[error("Failed to pay the fee for the transaction")]
    FailedToPay {},

    #[error("Failed to execute the transaction")]
    ExecutionFailed {},

    #[error("Invalid signature")]
    InvalidSignature {},
}

#[derive(Error, Debug, PartialEq)]
pub enum UnauthorizedReason {
    #[error("Not from the sequencer")]
    NotFromSequencer,

    #[error("Not from the sequencer or the owner")]
    NotFromSequencerOrOwner,
}
