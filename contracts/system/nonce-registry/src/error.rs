use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Incorrect nonce: expected {expected}, got {actual}")]
    IncorrectNonce { expected: u64, actual: u64 },

    #[error("Nonce overflow")]
    NonceOverflow {},
}
