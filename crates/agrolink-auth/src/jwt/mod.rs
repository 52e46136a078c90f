//! JWT issuing and verification.
//!
//! Two independent namespaces: user tokens (access + refresh, separate
//! secrets) and admin tokens (single 8-hour token, its own secret). A
//! token from one namespace never verifies in the other.

pub mod claims;
pub mod issuer;
pub mod verifier;

pub use claims::{AdminClaims, UserClaims, UserTokenKind};
pub use issuer::{AdminTokenIssuer, UserTokenIssuer, UserTokenPair};
pub use verifier::{AdminTokenVerifier, UserTokenVerifier};

use sha2::{Digest, Sha256};

/// SHA-256 hex fingerprint of a token, stored on session rows instead of
/// the token itself.
pub fn token_fingerprint(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_is_stable_hex() {
        let fp = token_fingerprint("abc");
        assert_eq!(fp.len(), 64);
        assert_eq!(fp, token_fingerprint("abc"));
        assert_ne!(fp, token_fingerprint("abd"));
    }
}
