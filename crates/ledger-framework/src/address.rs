//! # Address Deriver
//!
//! Every record lives at an address computed from `(namespace, scope, id)` under a
//! program id. The derivation is a pure function: the same inputs always give the
//! same `(address, bump)` pair, so any caller can recompute where a record lives
//! without asking the ledger.
//!
//! ## Reserved addresses
//!
//! An address that happens to be a valid ed25519 point could also be somebody's
//! public key. Those digests are reserved: [`find_program_address`] walks the bump
//! byte from 255 down and keeps the first digest that is *off* the curve. The bump
//! is returned so callers can recompute the address with
//! [`create_program_address`] in a single hash.

use crate::error::LedgerError;
use ed25519_dalek::{SigningKey, VerifyingKey};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

pub const ADDRESS_LEN: usize = 32;

/// Maximum length of a single derivation seed.
pub const MAX_SEED_LEN: usize = 32;

const PDA_MARKER: &[u8] = b"ProgramDerivedAddress";

// =============================================================================
// Address
// =============================================================================

/// A 32-byte storage address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    pub const fn new_from_array(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    pub fn to_bytes(&self) -> [u8; ADDRESS_LEN] {
        self.0
    }

    /// Returns true if these bytes decompress to an ed25519 point.
    pub fn is_on_curve(&self) -> bool {
        VerifyingKey::from_bytes(&self.0).is_ok()
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", hex::encode(&self.0[..8]))
    }
}

impl FromStr for Address {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s).map_err(|e| LedgerError::InvalidAddress(e.to_string()))?;
        let bytes: [u8; ADDRESS_LEN] = bytes.try_into().map_err(|v: Vec<u8>| {
            LedgerError::InvalidAddress(format!("expected {ADDRESS_LEN} bytes, got {}", v.len()))
        })?;
        Ok(Self(bytes))
    }
}

/// Serializes a 32-byte value as its hex string, through `Display` and `FromStr`.
macro_rules! hex_serde {
    ($ty:ty) => {
        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_string())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let encoded = String::deserialize(deserializer)?;
                encoded.parse().map_err(de::Error::custom)
            }
        }
    };
}

hex_serde!(Address);

// =============================================================================
// Identity
// =============================================================================

/// The identity of an actor: an ed25519 public key.
///
/// Constructing an `Identity` from raw bytes validates that they form a curve
/// point, so a decoded owner field is always a well-formed identity.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identity([u8; ADDRESS_LEN]);

impl Identity {
    pub fn from_bytes(bytes: [u8; ADDRESS_LEN]) -> Result<Self, LedgerError> {
        VerifyingKey::from_bytes(&bytes)
            .map(|_| Self(bytes))
            .map_err(|e| LedgerError::InvalidIdentity(e.to_string()))
    }

    pub fn from_verifying_key(key: &VerifyingKey) -> Self {
        Self(key.to_bytes())
    }

    pub fn to_bytes(&self) -> [u8; ADDRESS_LEN] {
        self.0
    }

    /// The identity viewed as a derivation scope.
    pub fn as_address(&self) -> Address {
        Address(self.0)
    }
}

impl AsRef<[u8]> for Identity {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identity({})", hex::encode(&self.0[..8]))
    }
}

impl FromStr for Identity {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let address: Address = s
            .parse()
            .map_err(|e: LedgerError| LedgerError::InvalidIdentity(e.to_string()))?;
        Self::from_bytes(address.to_bytes())
    }
}

hex_serde!(Identity);

/// A signing keypair. Only its public half ever reaches the ledger.
pub struct Keypair(SigningKey);

impl Keypair {
    pub fn generate() -> Self {
        Self(SigningKey::generate(&mut OsRng))
    }

    pub fn identity(&self) -> Identity {
        Identity::from_verifying_key(&self.0.verifying_key())
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Keypair").field(&self.identity()).finish()
    }
}

// =============================================================================
// Record ids and namespaces
// =============================================================================

/// A record identifier, unique within its scope.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId([u8; 32]);

impl RecordId {
    pub const fn new_from_array(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// A fresh id with 32 bytes of entropy.
    pub fn random() -> Self {
        let mut bytes = [0u8; 32];
        OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    pub fn to_bytes(&self) -> [u8; 32] {
        self.0
    }
}

/// Sequential ids occupy the low 8 bytes, little-endian.
impl From<u64> for RecordId {
    fn from(n: u64) -> Self {
        let mut bytes = [0u8; 32];
        bytes[..8].copy_from_slice(&n.to_le_bytes());
        Self(bytes)
    }
}

impl AsRef<[u8]> for RecordId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl fmt::Debug for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordId({})", hex::encode(&self.0[..8]))
    }
}

impl FromStr for RecordId {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let address: Address = s.parse()?;
        Ok(Self(address.to_bytes()))
    }
}

hex_serde!(RecordId);

/// Tag that separates the address spaces of different record kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Namespace(&'static str);

impl Namespace {
    pub const fn new(tag: &'static str) -> Self {
        Self(tag)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl AsRef<[u8]> for Namespace {
    fn as_ref(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

// =============================================================================
// Derivation
// =============================================================================

/// A derived address and the bump that moved it off the curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Derived {
    pub address: Address,
    pub bump: u8,
}

/// Hashes `seeds`, `bump` and `program_id` into an address.
///
/// Each seed is length-prefixed, so `["ab", "c"]` and `["a", "bc"]` never collide.
/// Returns `None` when the digest lands on the curve (reserved) or a seed is too long.
pub fn create_program_address(seeds: &[&[u8]], bump: u8, program_id: &Address) -> Option<Address> {
    let mut hasher = Sha256::new();
    for seed in seeds {
        if seed.len() > MAX_SEED_LEN {
            return None;
        }
        hasher.update([seed.len() as u8]);
        hasher.update(seed);
    }
    hasher.update([bump]);
    hasher.update(program_id.as_ref());
    hasher.update(PDA_MARKER);

    let address = Address(hasher.finalize().into());
    if address.is_on_curve() {
        None
    } else {
        Some(address)
    }
}

/// Finds the first off-curve address for `seeds`, searching bumps from 255 down.
pub fn find_program_address(seeds: &[&[u8]], program_id: &Address) -> Result<Derived, LedgerError> {
    if let Some(seed) = seeds.iter().find(|s| s.len() > MAX_SEED_LEN) {
        return Err(LedgerError::InvariantViolation(format!(
            "seed of {} bytes exceeds {MAX_SEED_LEN}",
            seed.len()
        )));
    }
    (0..=u8::MAX)
        .rev()
        .find_map(|bump| {
            create_program_address(seeds, bump, program_id).map(|address| Derived { address, bump })
        })
        .ok_or_else(|| LedgerError::InvariantViolation("no viable bump seed".into()))
}

/// Derives the address of the record `id` in `namespace`, scoped by `scope`.
pub fn derive_address(
    program_id: &Address,
    namespace: Namespace,
    scope: &Address,
    id: &RecordId,
) -> Result<Derived, LedgerError> {
    find_program_address(&[namespace.as_ref(), scope.as_ref(), id.as_ref()], program_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const POSTS: Namespace = Namespace::new("post");
    const COMMENTS: Namespace = Namespace::new("comment");

    fn program() -> Address {
        Address::new_from_array([7u8; 32])
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let owner = Keypair::generate().identity().as_address();
        let id = RecordId::random();
        let first = derive_address(&program(), POSTS, &owner, &id).unwrap();
        for _ in 0..10 {
            assert_eq!(derive_address(&program(), POSTS, &owner, &id).unwrap(), first);
        }
    }

    #[test]
    fn test_bump_recomputes_address() {
        let owner = Keypair::generate().identity().as_address();
        let id = RecordId::from(1);
        let derived = derive_address(&program(), POSTS, &owner, &id).unwrap();
        let again = create_program_address(
            &[POSTS.as_ref(), owner.as_ref(), id.as_ref()],
            derived.bump,
            &program(),
        );
        assert_eq!(again, Some(derived.address));
        assert!(!derived.address.is_on_curve());
    }

    #[test]
    fn test_namespaces_do_not_collide() {
        let scope = Keypair::generate().identity().as_address();
        let id = RecordId::from(42);
        let post = derive_address(&program(), POSTS, &scope, &id).unwrap();
        let comment = derive_address(&program(), COMMENTS, &scope, &id).unwrap();
        assert_ne!(post.address, comment.address);
    }

    #[test]
    fn test_program_id_separates_domains() {
        let scope = Keypair::generate().identity().as_address();
        let id = RecordId::from(1);
        let a = derive_address(&program(), POSTS, &scope, &id).unwrap();
        let b = derive_address(&Address::new_from_array([8u8; 32]), POSTS, &scope, &id).unwrap();
        assert_ne!(a.address, b.address);
    }

    #[test]
    fn test_sequential_and_random_ids_derive_distinct_addresses() {
        let scope = Keypair::generate().identity().as_address();
        let mut seen = HashSet::new();
        for n in 1..=64u64 {
            let derived = derive_address(&program(), POSTS, &scope, &RecordId::from(n)).unwrap();
            assert!(seen.insert(derived.address));
        }
        for _ in 0..64 {
            let derived = derive_address(&program(), POSTS, &scope, &RecordId::random()).unwrap();
            assert!(seen.insert(derived.address));
        }
    }

    #[test]
    fn test_seed_concatenation_is_unambiguous() {
        let a = create_program_address(&[&b"ab"[..], &b"c"[..]], 255, &program());
        let b = create_program_address(&[&b"a"[..], &b"bc"[..]], 255, &program());
        if let (Some(a), Some(b)) = (a, b) {
            assert_ne!(a, b);
        }
        let a = find_program_address(&[&b"ab"[..], &b"c"[..]], &program()).unwrap();
        let b = find_program_address(&[&b"a"[..], &b"bc"[..]], &program()).unwrap();
        assert_ne!(a.address, b.address);
    }

    #[test]
    fn test_oversized_seed_is_rejected() {
        let long = [0u8; MAX_SEED_LEN + 1];
        assert!(matches!(
            find_program_address(&[&long[..]], &program()),
            Err(LedgerError::InvariantViolation(_))
        ));
        assert_eq!(create_program_address(&[&long[..]], 0, &program()), None);
    }

    #[test]
    fn test_identity_rejects_off_curve_bytes() {
        let owner = Keypair::generate().identity();
        let derived =
            derive_address(&program(), POSTS, &owner.as_address(), &RecordId::from(3)).unwrap();
        assert!(Identity::from_bytes(owner.to_bytes()).is_ok());
        assert!(matches!(
            Identity::from_bytes(derived.address.to_bytes()),
            Err(LedgerError::InvalidIdentity(_))
        ));
    }

    #[test]
    fn test_address_hex_parsing() {
        let address = Address::new_from_array([0xab; 32]);
        let parsed: Address = address.to_string().parse().unwrap();
        assert_eq!(parsed, address);
        assert!(matches!("abcd".parse::<Address>(), Err(LedgerError::InvalidAddress(_))));
        assert!(matches!("zz".parse::<Address>(), Err(LedgerError::InvalidAddress(_))));
    }
}
