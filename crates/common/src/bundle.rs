//! Result bundle
//!
//! A finished draw is a flat list of named byte blobs: the static README and
//! decrypt helper, then one ciphertext per giver named after the giver. The
//! list is only written out once every ciphertext exists, so a failed draw
//! never leaves a partial archive behind.

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::crypto::{EncryptError, KeyEncryptor, KeyRef};
use crate::pairing::PairAssignment;

pub const README_NAME: &str = "README.md";
pub const DECRYPT_NAME: &str = "decrypt";

pub const README: &str = "# How to Read the Result\n\
\n\
In the directory containing this README:\n\
\n\
```bash\n\
chmod +x decrypt\n\
cat <YOUR NAME> | ./decrypt\n\
```\n\
\n\
By default the private key located in ~/.ssh/id_rsa is used.\n";

pub const DECRYPT_SCRIPT: &str = "#!/bin/bash\n\
\n\
cat | openssl pkeyutl -decrypt -inkey ~/.ssh/id_rsa\n";

const SCRIPT_MODE: u32 = 0o755;
const FILE_MODE: u32 = 0o644;

#[derive(Debug, thiserror::Error)]
pub enum BundleError {
    #[error("cannot encrypt recipient for {giver}: {source}")]
    Encrypt {
        giver: String,
        #[source]
        source: EncryptError,
    },
    #[error("participant '{giver}' collides with the archive's {giver} entry; rename their key file")]
    ReservedName { giver: String },
    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A named blob in the bundle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleEntry {
    pub name: String,
    pub bytes: Vec<u8>,
    pub executable: bool,
}

impl BundleEntry {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
            executable: false,
        }
    }

    pub fn executable(mut self) -> Self {
        self.executable = true;
        self
    }
}

/// Everything that ends up in the results archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bundle {
    entries: Vec<BundleEntry>,
}

impl Default for Bundle {
    fn default() -> Self {
        Self::new()
    }
}

impl Bundle {
    /// A bundle holding only the README and decrypt helper
    pub fn new() -> Self {
        Self {
            entries: vec![
                BundleEntry::new(README_NAME, README),
                BundleEntry::new(DECRYPT_NAME, DECRYPT_SCRIPT).executable(),
            ],
        }
    }

    pub fn push(&mut self, entry: BundleEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[BundleEntry] {
        &self.entries
    }

    pub fn get(&self, name: &str) -> Option<&BundleEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// Write the bundle as a zip archive at `path`.
    ///
    /// The archive is assembled in a temporary file beside `path` and renamed
    /// over it at the end, so readers never see a half-written archive. Missing
    /// parent directories are created.
    pub fn write_to(&self, path: &Path) -> Result<(), BundleError> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)?;

        let staging = NamedTempFile::new_in(parent)?;
        let mut zip = ZipWriter::new(staging);
        for entry in &self.entries {
            let mode = if entry.executable {
                SCRIPT_MODE
            } else {
                FILE_MODE
            };
            let options = SimpleFileOptions::default().unix_permissions(mode);
            zip.start_file(entry.name.as_str(), options)?;
            zip.write_all(&entry.bytes)?;
        }
        let mut staging = zip.finish()?;
        staging.flush()?;
        staging.persist(path).map_err(|e| e.error)?;

        tracing::info!(
            path = %path.display(),
            entries = self.entries.len(),
            "wrote results archive"
        );
        Ok(())
    }
}

/// Encrypt each recipient's name for their giver and collect the bundle.
///
/// The key for giver `g` is looked up at `{key_dir}/{g}`. The first failure
/// aborts the whole draw; nothing is returned for the pairs that did succeed.
/// Givers named like a static entry are rejected before any key is touched.
pub fn seal<E>(
    assignment: &PairAssignment,
    key_dir: &Path,
    encryptor: &E,
) -> Result<Bundle, BundleError>
where
    E: KeyEncryptor + ?Sized,
{
    let mut bundle = Bundle::new();

    if let Some(pair) = assignment
        .iter()
        .find(|pair| bundle.get(pair.giver.as_str()).is_some())
    {
        return Err(BundleError::ReservedName {
            giver: pair.giver.to_string(),
        });
    }

    for pair in assignment {
        let key = KeyRef::for_participant(key_dir, &pair.giver);
        let ciphertext = encryptor
            .encrypt_for(&key, pair.recipient.as_str().as_bytes())
            .map_err(|source| BundleError::Encrypt {
                giver: pair.giver.to_string(),
                source,
            })?;

        tracing::debug!(giver = %pair.giver, bytes = ciphertext.len(), "sealed recipient");
        bundle.push(BundleEntry::new(pair.giver.as_str(), ciphertext));
    }

    Ok(bundle)
}
