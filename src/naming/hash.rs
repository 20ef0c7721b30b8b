// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Name hashing and subdomain label handling.
//!
//! Implements the ENS namehash algorithm (keccak-256 folded over the labels
//! of a dot-separated name, rightmost first) plus the label validation and
//! generation rules used when assigning subdomains of `brightlend.eth`.

use alloy::primitives::{keccak256, B256};

/// Compute the namehash of a dot-separated domain name.
///
/// Folds from the last label to the first, starting from the all-zero node:
/// `node = keccak256(node || keccak256(label))`. The empty name yields the
/// zero node.
pub fn namehash(name: &str) -> B256 {
    let mut node = B256::ZERO;

    if name.is_empty() {
        return node;
    }

    for label in name.rsplit('.') {
        let label_hash = keccak256(label.as_bytes());
        let mut packed = [0u8; 64];
        packed[..32].copy_from_slice(node.as_slice());
        packed[32..].copy_from_slice(label_hash.as_slice());
        node = keccak256(packed);
    }

    node
}

/// Compute the labelhash of a single label (keccak-256 of its UTF-8 bytes).
///
/// Used as the edge identifier when creating a subnode under a parent node.
pub fn labelhash(label: &str) -> B256 {
    keccak256(label.as_bytes())
}

/// Check whether a candidate subdomain label is acceptable.
///
/// Labels are 3-32 characters of lowercase letters, digits and hyphens, and
/// may not start or end with a hyphen.
pub fn is_valid_label(candidate: &str) -> bool {
    let bytes = candidate.as_bytes();
    if bytes.len() < 3 || bytes.len() > 32 {
        return false;
    }

    let is_edge = |b: u8| b.is_ascii_lowercase() || b.is_ascii_digit();

    is_edge(bytes[0])
        && is_edge(bytes[bytes.len() - 1])
        && bytes
            .iter()
            .all(|&b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

/// Derive a deterministic label from a wallet address.
///
/// Takes the first 8 hex digits after the `0x` prefix, lowercased, and
/// prefixes `user`. Example: `0x1234abCD...` becomes `user1234abcd`.
/// The output always satisfies [`is_valid_label`].
pub fn generate_label(wallet_address: &str) -> String {
    let hex = wallet_address.strip_prefix("0x").unwrap_or(wallet_address);
    let short: String = hex.chars().take(8).collect::<String>().to_lowercase();
    format!("user{short}")
}

/// Join a label and a parent domain into a full domain name.
pub fn full_domain(label: &str, parent_domain: &str) -> String {
    format!("{label}.{parent_domain}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::b256;

    #[test]
    fn namehash_of_empty_name_is_zero_node() {
        assert_eq!(namehash(""), B256::ZERO);
    }

    #[test]
    fn namehash_matches_protocol_vectors() {
        // Reference vectors from the ENS specification.
        assert_eq!(
            namehash("eth"),
            b256!("0x93cdeb708b7545dc668eb9280176169d1c33cfd8ed6f04690a0bcc88a93fc4ae")
        );
        assert_eq!(
            namehash("foo.eth"),
            b256!("0xde9b09fd7c5f901e23a3f19fecc54828e9c848539801e86591bd9801b019f84f")
        );
    }

    #[test]
    fn namehash_is_deterministic() {
        let first = namehash("userdeadbeef.brightlend.eth");
        let second = namehash("userdeadbeef.brightlend.eth");
        assert_eq!(first, second);
    }

    #[test]
    fn namehash_of_subdomain_extends_parent_node() {
        // node(label.parent) == keccak256(node(parent) || labelhash(label))
        let parent = namehash("brightlend.eth");
        let label = "user1234abcd";

        let mut packed = [0u8; 64];
        packed[..32].copy_from_slice(parent.as_slice());
        packed[32..].copy_from_slice(labelhash(label).as_slice());

        assert_eq!(
            namehash(&full_domain(label, "brightlend.eth")),
            keccak256(packed)
        );
    }

    #[test]
    fn labelhash_matches_keccak_of_label() {
        assert_eq!(
            labelhash("eth"),
            b256!("0x4f5b812789fc606be1b3b16908db13fc7a9adf7ca72641f84d75b47069d3d7f0")
        );
    }

    #[test]
    fn label_validation_accepts_well_formed_labels() {
        assert!(is_valid_label("abc"));
        assert!(is_valid_label("user1234abcd"));
        assert!(is_valid_label("a-b"));
        assert!(is_valid_label("0x0"));
        assert!(is_valid_label("my-lending-name-32-characters-ok"));
    }

    #[test]
    fn label_validation_rejects_malformed_labels() {
        assert!(!is_valid_label(""));
        assert!(!is_valid_label("ab")); // too short
        assert!(!is_valid_label("a".repeat(33).as_str())); // too long
        assert!(!is_valid_label("ABC")); // uppercase
        assert!(!is_valid_label("-abc")); // leading hyphen
        assert!(!is_valid_label("abc-")); // trailing hyphen
        assert!(!is_valid_label("a_bc")); // disallowed character
        assert!(!is_valid_label("a.bc")); // disallowed character
        assert!(!is_valid_label("añejo")); // non-ascii
    }

    #[test]
    fn generated_labels_are_always_valid() {
        let addresses = [
            "0xABCDEF0123456789000000000000000000000001",
            "0x742d35Cc6634C0532925a3b844Bc9e7595f4aB12",
            "0x0000000000000000000000000000000000000000",
        ];
        for address in addresses {
            let label = generate_label(address);
            assert!(is_valid_label(&label), "label {label} should be valid");
        }
    }

    #[test]
    fn generated_label_takes_eight_hex_digits_after_prefix() {
        assert_eq!(
            generate_label("0xABCDEF0123456789000000000000000000000001"),
            "userabcdef01"
        );
    }

    #[test]
    fn full_domain_round_trips() {
        let joined = full_domain("user1234abcd", "brightlend.eth");
        let (label, parent) = joined.split_once('.').expect("joined name has a dot");
        assert_eq!(label, "user1234abcd");
        assert_eq!(parent, "brightlend.eth");
    }
}
