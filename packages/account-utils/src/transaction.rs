use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Binary, StdResult, Uint128};
use sha2::{Digest, Sha256};

/// Domain tag prepended to every transaction hash.
pub const TRANSACTION_HASH_DOMAIN: &[u8] = b"aa-account/transaction/v1";

/// A transaction proposed to a smart account.
///
/// Built by the protocol layer for a single submission and discarded once the
/// validate / pay / execute lifecycle completes.
#[cw_serde]
pub struct Transaction {
    /// Must equal the account's current minimum nonce in the registry.
    pub nonce: u64,
    /// Target address of the call.
    pub to: String,
    /// Amount of the account's fee denom forwarded to the target.
    pub value: Uint128,
    /// JSON encoded execute message for the target. Empty for plain transfers.
    pub data: Binary,
    pub gas_limit: u64,
    /// Price per unit of gas, in the account's fee denom.
    pub gas_price: Uint128,
    /// 65 bytes: `r || s || v`.
    pub signature: Binary,
}

impl Transaction {
    /// Fee reserved for the transaction, paid to the fee collector.
    pub fn fee(&self) -> StdResult<Uint128> {
        Ok(self.gas_price.checked_mul(Uint128::from(self.gas_limit))?)
    }

    /// Balance the account needs to hold for the transaction to be accepted.
    pub fn total_required_balance(&self) -> StdResult<Uint128> {
        Ok(self.fee()?.checked_add(self.value)?)
    }

    /// Canonical hash of every authorization-relevant field, bound to the chain and
    /// to the account that is expected to process the transaction.
    pub fn encode_hash(&self, chain_id: &str, account: &Addr) -> [u8; 32] {
        let mut hasher = Sha256::new();
        update_prefixed(&mut hasher, TRANSACTION_HASH_DOMAIN);
        update_prefixed(&mut hasher, chain_id.as_bytes());
        update_prefixed(&mut hasher, account.as_bytes());
        hasher.update(self.nonce.to_be_bytes());
        update_prefixed(&mut hasher, self.to.as_bytes());
        hasher.update(self.value.u128().to_be_bytes());
        hasher.update(self.gas_limit.to_be_bytes());
        hasher.update(self.gas_price.u128().to_be_bytes());
        update_prefixed(&mut hasher, self.data.as_slice());
        hasher.finalize().into()
    }
}

// Variable length fields carry a big-endian u64 length prefix.
fn update_prefixed(hasher: &mut Sha256, bytes: &[u8]) {
    hasher.update((bytes.len() as u64).to_be_bytes());
    hasher.update(bytes);
}
