//! Password hashing and auth token generation.
//!
//! Hashes are stored as `sha256$<iterations>$<salt hex>$<digest hex>`.

use rand::RngCore;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

const ALGORITHM: &str = "sha256";
const SALT_BYTES: usize = 16;
const TOKEN_BYTES: usize = 20;

/// Iterations applied to new hashes. Existing hashes keep their own count.
pub const DEFAULT_ITERATIONS: u32 = 20_000;

fn digest(password: &str, salt: &[u8], iterations: u32) -> [u8; 32] {
    let mut hash: [u8; 32] = Sha256::new()
        .chain_update(salt)
        .chain_update(password.as_bytes())
        .finalize()
        .into();
    for _ in 1..iterations {
        hash = Sha256::new()
            .chain_update(salt)
            .chain_update(hash)
            .finalize()
            .into();
    }
    hash
}

pub fn hash_password(password: &str) -> String {
    hash_password_with(password, DEFAULT_ITERATIONS)
}

pub fn hash_password_with(password: &str, iterations: u32) -> String {
    let mut salt = [0u8; SALT_BYTES];
    rand::thread_rng().fill_bytes(&mut salt);
    let iterations = iterations.max(1);
    format!(
        "{ALGORITHM}${iterations}${}${}",
        hex::encode(salt),
        hex::encode(digest(password, &salt, iterations))
    )
}

/// Check `password` against a stored hash. Malformed hashes never match.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let mut parts = stored.split('$');
    let (Some(ALGORITHM), Some(iterations), Some(salt), Some(expected), None) = (
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
    ) else {
        return false;
    };

    let (Ok(iterations), Ok(salt), Ok(expected)) =
        (iterations.parse::<u32>(), hex::decode(salt), hex::decode(expected))
    else {
        return false;
    };
    if iterations == 0 {
        return false;
    }

    let actual = digest(password, &salt, iterations);
    actual.len() == expected.len() && bool::from(actual.as_slice().ct_eq(expected.as_slice()))
}

/// A new random API token, hex encoded.
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}
