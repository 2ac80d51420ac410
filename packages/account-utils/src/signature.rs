use cosmwasm_std::{Addr, Api, CanonicalAddr, StdError, StdResult};
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

pub const SIGNATURE_LENGTH: usize = 65;

/// n / 2 for the secp256k1 group order. Signatures with a larger `s` are rejected.
const SECP256K1_HALF_ORDER: [u8; 32] = [
    0x7F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0x5D, 0x57, 0x6E, 0x73, 0x57, 0xA4, 0x50, 0x1D, 0xDF, 0xE9, 0x2F, 0x46, 0x68, 0x1B, 0x20, 0xA0,
];

/// Recovers the address that signed `hash`.
///
/// Returns `Ok(None)` for anything that does not recover to a key: wrong length,
/// unknown recovery byte, high-s, or a point the host refuses. Only address
/// encoding failures are errors.
pub fn recover_signer(api: &dyn Api, hash: &[u8; 32], signature: &[u8]) -> StdResult<Option<Addr>> {
    if signature.len() != SIGNATURE_LENGTH {
        return Ok(None);
    }

    let (rs, v) = signature.split_at(64);
    let Some(recovery_param) = parse_recovery_param(v[0]) else {
        return Ok(None);
    };
    if rs[32..] > SECP256K1_HALF_ORDER[..] {
        return Ok(None);
    }

    match api.secp256k1_recover_pubkey(hash, rs, recovery_param) {
        Ok(pubkey) => signer_address(api, &pubkey).map(Some),
        Err(_) => Ok(None),
    }
}

/// Cosmos SDK account address of a secp256k1 public key:
/// `ripemd160(sha256(compressed_pubkey))`, humanized by the host.
pub fn signer_address(api: &dyn Api, pubkey: &[u8]) -> StdResult<Addr> {
    let compressed = compress_pubkey(pubkey)?;
    let sha = Sha256::digest(compressed);
    let hash = Ripemd160::digest(sha);
    api.addr_humanize(&CanonicalAddr::from(hash.as_slice()))
}

/// Accepts SEC1 compressed (33 bytes) or uncompressed (65 bytes) keys.
pub fn compress_pubkey(pubkey: &[u8]) -> StdResult<[u8; 33]> {
    let mut compressed = [0u8; 33];
    match pubkey.len() {
        33 if pubkey[0] == 0x02 || pubkey[0] == 0x03 => compressed.copy_from_slice(pubkey),
        65 if pubkey[0] == 0x04 => {
            // Prefix carries the parity of y.
            compressed[0] = if pubkey[64] & 1 == 0 { 0x02 } else { 0x03 };
            compressed[1..].copy_from_slice(&pubkey[1..33]);
        }
        _ => return Err(StdError::generic_err("invalid secp256k1 public key")),
    }
    Ok(compressed)
}

fn parse_recovery_param(v: u8) -> Option<u8> {
    match v {
        0 | 27 => Some(0),
        1 | 28 => Some(1),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::testing::MockApi;
    use k256::{
        ecdsa::{RecoveryId, SigningKey},
        elliptic_curve::sec1::ToEncodedPoint,
        PublicKey,
    };

    fn key(seed: u8) -> SigningKey {
        SigningKey::from_slice(&[seed; 32]).unwrap()
    }

    fn sign(key: &SigningKey, hash: &[u8; 32]) -> Vec<u8> {
        let (sig, recid) = key.sign_prehash_recoverable(hash).unwrap();
        let (sig, recid) = match sig.normalize_s() {
            Some(low) => (low, RecoveryId::new(!recid.is_y_odd(), recid.is_x_reduced())),
            None => (sig, recid),
        };
        let mut bytes = sig.to_bytes().to_vec();
        bytes.push(recid.to_byte() + 27);
        bytes
    }

    fn address_of(api: &MockApi, key: &SigningKey) -> Addr {
        let point = PublicKey::from(key.verifying_key()).to_encoded_point(true);
        signer_address(api, point.as_bytes()).unwrap()
    }

    #[test]
    fn recovers_the_signing_address() {
        let api = MockApi::default();
        let signer = key(7);
        let hash = [9u8; 32];

        let recovered = recover_signer(&api, &hash, &sign(&signer, &hash)).unwrap();
        assert_eq!(recovered, Some(address_of(&api, &signer)));
    }

    #[test]
    fn other_key_recovers_a_different_address() {
        let api = MockApi::default();
        let hash = [9u8; 32];

        let recovered = recover_signer(&api, &hash, &sign(&key(8), &hash)).unwrap();
        assert_ne!(recovered, Some(address_of(&api, &key(7))));
    }

    #[test]
    fn accepts_raw_recovery_ids() {
        let api = MockApi::default();
        let signer = key(7);
        let hash = [1u8; 32];
        let mut signature = sign(&signer, &hash);
        signature[64] -= 27;

        let recovered = recover_signer(&api, &hash, &signature).unwrap();
        assert_eq!(recovered, Some(address_of(&api, &signer)));
    }

    #[test]
    fn malformed_signatures_recover_nothing() {
        let api = MockApi::default();
        let hash = [1u8; 32];
        let valid = sign(&key(7), &hash);

        assert_eq!(recover_signer(&api, &hash, &[]).unwrap(), None);
        assert_eq!(recover_signer(&api, &hash, &valid[..64]).unwrap(), None);

        let mut bad_v = valid.clone();
        bad_v[64] = 29;
        assert_eq!(recover_signer(&api, &hash, &bad_v).unwrap(), None);

        let mut high_s = valid;
        high_s[32..64].copy_from_slice(&[0xFF; 32]);
        assert_eq!(recover_signer(&api, &hash, &high_s).unwrap(), None);
    }

    #[test]
    fn compressed_and_uncompressed_keys_share_an_address() {
        let api = MockApi::default();
        let public = PublicKey::from(key(3).verifying_key());
        let compressed = public.to_encoded_point(true);
        let uncompressed = public.to_encoded_point(false);

        assert_eq!(
            signer_address(&api, compressed.as_bytes()).unwrap(),
            signer_address(&api, uncompressed.as_bytes()).unwrap()
        );
        assert!(compress_pubkey(&[0u8; 20]).is_err());
    }
}
