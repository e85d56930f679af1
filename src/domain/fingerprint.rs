//! Client fingerprint
//!
//! A stable identifier derived from spoofable request metadata. It
//! identifies, it does not authenticate.

use sha2::{Digest, Sha256};

const DELIMITER: &str = "|";

/// SHA-256 over `address|user_agent|accept_language`, lowercase hex.
pub fn compute_fingerprint(address: &str, user_agent: &str, accept_language: &str) -> String {
    let input = [address, user_agent, accept_language].join(DELIMITER);
    hex::encode(Sha256::digest(input.as_bytes()))
}
