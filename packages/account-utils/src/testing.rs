use cosmwasm_std::{Addr, Api, Binary};
use k256::{
    ecdsa::{RecoveryId, SigningKey},
    elliptic_curve::sec1::ToEncodedPoint,
    PublicKey,
};

use crate::{signature::signer_address, transaction::Transaction};

/// Deterministic secp256k1 key used to sign transactions in tests.
pub struct TestSigner {
    key: SigningKey,
}

impl TestSigner {
    /// Seeds from 1 to 255 all yield valid keys.
    pub fn from_seed(seed: u8) -> Self {
        let key = SigningKey::from_slice(&[seed; 32]).expect("seed is a valid scalar");
        Self { key }
    }

    pub fn compressed_pubkey(&self) -> Vec<u8> {
        PublicKey::from(self.key.verifying_key())
            .to_encoded_point(true)
            .as_bytes()
            .to_vec()
    }

    /// On-chain address of the key, as the account derives it from a recovered key.
    pub fn address(&self, api: &dyn Api) -> Addr {
        signer_address(api, &self.compressed_pubkey()).expect("valid public key")
    }

    /// Signs a prehashed message. Output is low-s, `r || s || v` with `v` in {27, 28}.
    pub fn sign_hash(&self, hash: &[u8; 32]) -> Binary {
        let (sig, recid) = self
            .key
            .sign_prehash_recoverable(hash)
            .expect("signing failed");
        let (sig, recid) = match sig.normalize_s() {
            Some(low) => (low, RecoveryId::new(!recid.is_y_odd(), recid.is_x_reduced())),
            None => (sig, recid),
        };

        let mut bytes = sig.to_bytes().to_vec();
        bytes.push(recid.to_byte() + 27);
        Binary::from(bytes)
    }

    /// Returns `transaction` carrying this signer's signature for `account` on `chain_id`.
    pub fn sign(&self, transaction: Transaction, chain_id: &str, account: &Addr) -> Transaction {
        let hash = transaction.encode_hash(chain_id, account);
        Transaction {
            signature: self.sign_hash(&hash),
            ..transaction
        }
    }
}
