//! Address Codec
//!
//! SS58 address encoding/decoding as used by Substrate based chains (Ğ1 included),
//! plus the legacy base58 public key representation of Ğ1v1 (Cesium) wallets.

use blake2::{digest::consts::U32, Blake2b, Blake2b512, Digest};

use crate::error::Error;

/// Generic Substrate prefix, used whenever neither chain nor settings define one
pub const DEFAULT_SS58_PREFIX: u16 = 42;

/// Highest prefix representable with the two byte SS58 format
pub const MAX_SS58_PREFIX: u16 = 16_383;

const SS58_CONTEXT: &[u8] = b"SS58PRE";
/// Prefixes set aside by the SS58 registry, never used for encoding
pub const RESERVED_PREFIXES: [u16; 2] = [46, 47];
const ALLOWED_DECODED_LENGTHS: [usize; 8] = [3, 4, 6, 10, 35, 36, 37, 38];
const ALLOWED_KEY_LENGTHS: [usize; 6] = [1, 2, 4, 8, 32, 33];

/// Decode an address into its public key bytes
///
/// `0x` prefixed input is treated as raw hex (ethereum style accounts), anything else
/// must be a checksummed SS58 string.
pub fn decode_address(address: &str) -> Result<Vec<u8>, Error> {
    if address.is_empty() {
        return Err(Error::Decode("Empty address".to_string()));
    }

    if let Some(hex_body) = address.strip_prefix("0x") {
        let bytes = hex::decode(hex_body)
            .map_err(|e| Error::Decode(format!("Invalid hex address '{}': {}", address, e)))?;
        if bytes.is_empty() {
            return Err(Error::Decode("Empty hex address".to_string()));
        }
        return Ok(bytes);
    }

    let decoded = bs58::decode(address)
        .into_vec()
        .map_err(|e| Error::Decode(format!("Invalid base58 address '{}': {}", address, e)))?;

    if !ALLOWED_DECODED_LENGTHS.contains(&decoded.len()) {
        return Err(Error::Decode(format!(
            "Invalid decoded address length {} for '{}'",
            decoded.len(),
            address
        )));
    }

    let checked = check_checksum(&decoded);
    if !checked.is_valid {
        return Err(Error::Decode(format!("Invalid address checksum for '{}'", address)));
    }

    Ok(decoded[checked.prefix_len..checked.payload_end].to_vec())
}

/// Read the network prefix an SS58 address was encoded with
pub fn address_prefix(address: &str) -> Result<u16, Error> {
    // validates the checksum as a side effect
    decode_address(address)?;

    if address.starts_with("0x") {
        return Err(Error::Decode(format!("'{}' is not an SS58 address", address)));
    }

    let decoded = bs58::decode(address)
        .into_vec()
        .map_err(|e| Error::Decode(e.to_string()))?;
    Ok(check_checksum(&decoded).prefix)
}

/// Encode public key bytes as an SS58 address for the given network prefix
pub fn encode_address(key: &[u8], prefix: u16) -> Result<String, Error> {
    if prefix > MAX_SS58_PREFIX || RESERVED_PREFIXES.contains(&prefix) {
        return Err(Error::Decode(format!("Invalid SS58 prefix {}", prefix)));
    }

    if !ALLOWED_KEY_LENGTHS.contains(&key.len()) {
        return Err(Error::Decode(format!(
            "Cannot encode a {} byte key as an SS58 address",
            key.len()
        )));
    }

    // compressed ecdsa keys are represented by their hash
    let key = if key.len() == 33 {
        Blake2b::<U32>::digest(key).to_vec()
    } else {
        key.to_vec()
    };

    let mut input = encode_prefix(prefix);
    input.extend_from_slice(&key);

    let checksum_len = if key.len() == 32 { 2 } else { 1 };
    let hash = ss58_hash(&input);
    input.extend_from_slice(&hash[..checksum_len]);

    Ok(bs58::encode(input).into_string())
}

/// Plain base58 rendering of a public key (Ğ1v1 / Cesium public key format)
pub fn base58_encode(bytes: &[u8]) -> String {
    bs58::encode(bytes).into_string()
}

fn encode_prefix(prefix: u16) -> Vec<u8> {
    if prefix < 64 {
        vec![prefix as u8]
    } else {
        vec![
            (((prefix & 0b0000_0000_1111_1100) >> 2) as u8) | 0b0100_0000,
            ((prefix >> 8) as u8) | (((prefix & 0b0000_0000_0000_0011) as u8) << 6),
        ]
    }
}

fn ss58_hash(data: &[u8]) -> Vec<u8> {
    Blake2b512::new()
        .chain_update(SS58_CONTEXT)
        .chain_update(data)
        .finalize()
        .to_vec()
}

struct ChecksumResult {
    is_valid: bool,
    prefix_len: usize,
    payload_end: usize,
    prefix: u16,
}

/// `decoded` must be one of the allowed decoded lengths (at least 3 bytes)
fn check_checksum(decoded: &[u8]) -> ChecksumResult {
    let prefix_len = if decoded[0] & 0b0100_0000 != 0 { 2 } else { 1 };
    let prefix = if prefix_len == 1 {
        decoded[0] as u16
    } else {
        (((decoded[0] & 0b0011_1111) as u16) << 2)
            | ((decoded[1] >> 6) as u16)
            | (((decoded[1] & 0b0011_1111) as u16) << 8)
    };

    let is_public_key = decoded.len() == 34 + prefix_len || decoded.len() == 35 + prefix_len;
    let payload_end = decoded.len() - if is_public_key { 2 } else { 1 };
    let hash = ss58_hash(&decoded[..payload_end]);

    let checksum_ok = if is_public_key {
        decoded[decoded.len() - 2] == hash[0] && decoded[decoded.len() - 1] == hash[1]
    } else {
        decoded[decoded.len() - 1] == hash[0]
    };

    ChecksumResult {
        is_valid: decoded[0] & 0b1000_0000 == 0
            && !RESERVED_PREFIXES.contains(&(decoded[0] as u16))
            && checksum_ok,
        prefix_len,
        payload_end,
        prefix,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALICE_PUBKEY: &str = "d43593c715fdd31c61141abd04a99fd6822c8558854ccde39a5684e7a56da27d";
    const ALICE_GENERIC: &str = "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY";
    const ALICE_POLKADOT: &str = "15oF4uVJwmo4TdGW7VfQxNLavjCXviqxT9S1MgbjMNHr6Sp5";
    const BOB_GENERIC: &str = "5FHneW46xGXgs5mUiveU4sbTyGBzmstUspZC92UhjJM694ty";

    fn alice() -> Vec<u8> {
        hex::decode(ALICE_PUBKEY).unwrap()
    }

    #[test]
    fn test_decode_generic_address() {
        assert_eq!(decode_address(ALICE_GENERIC).unwrap(), alice());
        assert_eq!(
            hex::encode(decode_address(BOB_GENERIC).unwrap()),
            "8eaf04151687736326c9fea17e25fc5287613693c912909cb226aa4794f26a48"
        );
    }

    #[test]
    fn test_encode_known_prefixes() {
        assert_eq!(encode_address(&alice(), 42).unwrap(), ALICE_GENERIC);
        assert_eq!(encode_address(&alice(), 0).unwrap(), ALICE_POLKADOT);
    }

    #[test]
    fn test_same_key_across_prefixes() {
        assert_eq!(
            decode_address(ALICE_POLKADOT).unwrap(),
            decode_address(ALICE_GENERIC).unwrap()
        );
        assert_eq!(address_prefix(ALICE_POLKADOT).unwrap(), 0);
        assert_eq!(address_prefix(ALICE_GENERIC).unwrap(), 42);
    }

    #[test]
    fn test_two_byte_prefix() {
        let encoded = encode_address(&alice(), 4450).unwrap();
        assert_eq!(decode_address(&encoded).unwrap(), alice());
        assert_eq!(address_prefix(&encoded).unwrap(), 4450);
    }

    #[test]
    fn test_hex_addresses_decode_raw() {
        let eth = "0x9a2d6b4c4e7f3e1a5c1b2d3e4f5a6b7c8d9e0f1a";
        assert_eq!(decode_address(eth).unwrap().len(), 20);
        assert!(address_prefix(eth).is_err());
    }

    #[test]
    fn test_malformed_addresses_rejected() {
        assert!(decode_address("").is_err());
        assert!(decode_address("not an address").is_err());
        assert!(decode_address("0xzz").is_err());
        assert!(decode_address("0x").is_err());
        // flipped last character breaks the checksum
        assert!(decode_address("5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQZ").is_err());
    }

    #[test]
    fn test_encode_rejects_bad_input() {
        assert!(encode_address(&alice(), 46).is_err());
        assert!(encode_address(&alice(), MAX_SS58_PREFIX + 1).is_err());
        assert!(encode_address(&[0u8; 20], 42).is_err());
    }

    #[test]
    fn test_base58_encode_is_plain_base58() {
        let legacy = base58_encode(&alice());
        assert_eq!(bs58::decode(&legacy).into_vec().unwrap(), alice());
        assert_ne!(legacy, ALICE_GENERIC);
    }
}
