//! Password obfuscation for the profile file
//!
//! The stored password is XORed with an MD5-derived key of `user@host` and
//! base64 encoded. It keeps the secret out of plain sight, nothing more.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use md5::{Digest, Md5};

fn keystream(seed: &str) -> Vec<u8> {
    Md5::digest(seed.as_bytes()).to_vec()
}

fn xor(data: &[u8], key: &[u8]) -> Vec<u8> {
    data.iter()
        .zip(key.iter().cycle())
        .map(|(b, k)| b ^ k)
        .collect()
}

/// Encode a plain password for storage
pub fn obfuscate(plain: &str, seed: &str) -> String {
    BASE64.encode(xor(plain.as_bytes(), &keystream(seed)))
}

/// Decode a stored password. Returns None if the value is not ours.
pub fn reveal(encoded: &str, seed: &str) -> Option<String> {
    let bytes = BASE64.decode(encoded).ok()?;
    String::from_utf8(xor(&bytes, &keystream(seed))).ok()
}
