//! Shared test utilities for draw and encryption integration tests
#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use ::common::participant::Participant;
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::{Pkcs1v15Encrypt, RsaPrivateKey};
use tempfile::TempDir;

/// The four PEM (PKCS#1) key pairs under `tests/fixtures/participants`
pub const PARTICIPANTS: [&str; 4] = ["alice", "bob", "carol", "dave"];

pub fn fixtures() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

pub fn people(names: &[&str]) -> Vec<Participant> {
    names.iter().copied().map(Participant::from).collect()
}

/// Copy the participant keys into a scratch directory.
///
/// `ssh-keygen` refuses private keys readable by others, and checkouts do not
/// preserve the fixtures' 0600 mode, so the copies are tightened here.
pub fn participant_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    for name in PARTICIPANTS {
        let target = dir.path().join(name);
        fs::copy(fixtures().join("participants").join(name), &target).unwrap();
        fs::set_permissions(&target, fs::Permissions::from_mode(0o600)).unwrap();
    }
    dir
}

pub fn private_key(name: &str) -> RsaPrivateKey {
    let pem = fs::read_to_string(fixtures().join("participants").join(name)).unwrap();
    RsaPrivateKey::from_pkcs1_pem(&pem).unwrap()
}

pub fn decrypt(name: &str, ciphertext: &[u8]) -> String {
    let plaintext = private_key(name)
        .decrypt(Pkcs1v15Encrypt, ciphertext)
        .unwrap();
    String::from_utf8(plaintext).unwrap()
}

/// Whether `ssh-keygen` and `openssl` can be run on this machine
pub fn tools_available() -> bool {
    let runs = |program: &str, arg: &str| {
        Command::new(program)
            .arg(arg)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .is_ok()
    };
    runs("openssl", "version") && runs("ssh-keygen", "-?")
}

pub fn is_empty_dir(dir: &Path) -> bool {
    fs::read_dir(dir).unwrap().next().is_none()
}
