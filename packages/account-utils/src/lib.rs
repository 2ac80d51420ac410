pub mod error;
pub mod msg;
pub mod nonce;
pub mod signature;
pub mod transaction;

#[cfg(feature = "testing")]
pub mod testing;
