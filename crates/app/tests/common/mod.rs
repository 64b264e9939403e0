//! Shared helpers for end-to-end draw tests
#![allow(dead_code)]

use std::collections::HashSet;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::{Pkcs1v15Encrypt, RsaPrivateKey};
use tempfile::TempDir;

pub const PARTICIPANTS: [&str; 4] = ["alice", "bob", "carol", "dave"];

/// Key fixtures live with the library crate
pub fn key_fixtures() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../common/tests/fixtures/participants")
}

/// Scratch directory holding `in/` with every participant key
pub fn workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in");
    fs::create_dir(&input).unwrap();
    for name in PARTICIPANTS {
        fs::copy(key_fixtures().join(name), input.join(name)).unwrap();
    }
    dir
}

pub fn decrypt(name: &str, ciphertext: &[u8]) -> String {
    let pem = fs::read_to_string(key_fixtures().join(name)).unwrap();
    let key = RsaPrivateKey::from_pkcs1_pem(&pem).unwrap();
    String::from_utf8(key.decrypt(Pkcs1v15Encrypt, ciphertext).unwrap()).unwrap()
}

/// Every entry of a zip archive as (name, bytes, unix mode)
pub fn read_archive(path: &Path) -> Vec<(String, Vec<u8>, Option<u32>)> {
    let file = fs::File::open(path).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    let mut entries = Vec::new();
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).unwrap();
        let mut bytes = Vec::new();
        entry.read_to_end(&mut bytes).unwrap();
        entries.push((entry.name().to_string(), bytes, entry.unix_mode()));
    }
    entries
}

/// Check that `pairs` is a valid, possibly partial, assignment over `PARTICIPANTS`
pub fn assert_valid_pairs(pairs: &[(String, String)]) {
    let known: HashSet<&str> = PARTICIPANTS.iter().copied().collect();
    let mut givers = HashSet::new();
    let mut recipients = HashSet::new();

    for (giver, recipient) in pairs {
        assert!(known.contains(giver.as_str()), "unknown giver {giver}");
        assert!(known.contains(recipient.as_str()), "unknown recipient {recipient}");
        assert_ne!(giver, recipient, "{giver} draws themselves");
        assert!(givers.insert(giver.clone()), "{giver} gives twice");
        assert!(recipients.insert(recipient.clone()), "{recipient} receives twice");
    }
}
