use cosmwasm_std::Addr;
use cw_storage_plus::Map;

/// Minimum nonce the next transaction of an account has to carry. Absent means zero.
pub const MIN_NONCES: Map<Addr, u64> = Map::new("min_nonces");
