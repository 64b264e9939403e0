//! Full draw pipeline through the library entry point

mod common;

use std::fs;

use ::common::bundle::{DECRYPT_NAME, DECRYPT_SCRIPT, README, README_NAME};
use ::common::prelude::{Randomizer, Strategy};
use santa::{Config, DrawError, DrawOutcome, DrawSettings, EncryptorKind};

fn settings(dir: &std::path::Path) -> DrawSettings {
    let mut settings = DrawSettings::from_config(&Config::default());
    settings.input_dir = dir.join("in");
    settings.output = dir.join("out/results.zip");
    settings.encryptor = EncryptorKind::Native;
    settings
}

#[test]
fn test_demo_mode_lists_pairs_and_writes_nothing() {
    let dir = common::workspace();
    let mut settings = settings(dir.path());
    settings.demo = true;

    for seed in 0..20 {
        let outcome = santa::run(&settings, &mut Randomizer::from_seed(seed)).unwrap();
        let DrawOutcome::Demo { pairs } = outcome else {
            panic!("demo mode wrote an archive");
        };
        // greedy strands exactly one giver when the count is not a multiple of three
        assert_eq!(pairs.len(), 3);
        common::assert_valid_pairs(&pairs);
    }

    assert!(!dir.path().join("out").exists());
}

#[test]
fn test_sealed_archive_contents() {
    let dir = common::workspace();
    let mut settings = settings(dir.path());
    settings.strategy = Strategy::Cyclic;

    let outcome = santa::run(&settings, &mut Randomizer::from_seed(7)).unwrap();
    assert_eq!(
        outcome,
        DrawOutcome::Written {
            path: settings.output.clone(),
            sealed: 4
        }
    );

    let entries = common::read_archive(&settings.output);
    assert_eq!(entries.len(), 2 + common::PARTICIPANTS.len());

    let (name, bytes, mode) = &entries[0];
    assert_eq!(name, README_NAME);
    assert_eq!(bytes.as_slice(), README.as_bytes());
    assert_eq!(mode.map(|m| m & 0o777), Some(0o644));

    let (name, bytes, mode) = &entries[1];
    assert_eq!(name, DECRYPT_NAME);
    assert_eq!(bytes.as_slice(), DECRYPT_SCRIPT.as_bytes());
    assert_eq!(mode.map(|m| m & 0o777), Some(0o755));

    let mut recipients = Vec::new();
    for (giver, ciphertext, _) in &entries[2..] {
        assert!(common::PARTICIPANTS.contains(&giver.as_str()));
        assert!(!ciphertext.is_empty());
        let recipient = common::decrypt(giver, ciphertext);
        assert_ne!(ciphertext.as_slice(), recipient.as_bytes());
        recipients.push((giver.clone(), recipient));
    }
    common::assert_valid_pairs(&recipients);
}

#[test]
fn test_greedy_archive_skips_stranded_giver() {
    let dir = common::workspace();
    let settings = settings(dir.path());

    let outcome = santa::run(&settings, &mut Randomizer::from_seed(3)).unwrap();
    assert!(matches!(outcome, DrawOutcome::Written { sealed: 3, .. }));
    assert_eq!(common::read_archive(&settings.output).len(), 2 + 3);
}

#[test]
fn test_missing_input_dir_fails() {
    let dir = tempfile::TempDir::new().unwrap();
    let settings = settings(dir.path());

    let result = santa::run(&settings, &mut Randomizer::from_seed(0));
    assert!(matches!(result, Err(DrawError::Participants(_))));
}

#[test]
fn test_bad_key_leaves_no_archive() {
    let dir = common::workspace();
    fs::write(dir.path().join("in/carol"), "not a key").unwrap();
    let mut settings = settings(dir.path());
    settings.strategy = Strategy::Cyclic;

    let result = santa::run(&settings, &mut Randomizer::from_seed(11));
    assert!(matches!(result, Err(DrawError::Bundle(_))));
    assert!(!settings.output.exists());
}
