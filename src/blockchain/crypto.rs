use sha2::{Digest, Sha256};

/// Computes the SHA-256 digest of `bytes` as a lowercase hex string
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Returns true if `hash` starts with at least `count` '0' characters
pub fn has_leading_zeros(hash: &str, count: usize) -> bool {
    hash.len() >= count && hash.bytes().take(count).all(|b| b == b'0')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_hex_known_vector() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_sha256_hex_is_lowercase() {
        let hash = sha256_hex(b"hello");
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_has_leading_zeros() {
        assert!(has_leading_zeros("0000abcd", 4));
        assert!(!has_leading_zeros("000abcd0", 4));
        assert!(has_leading_zeros("0000", 4));
        assert!(!has_leading_zeros("000", 4));
    }
}
