use std::fmt;
use std::path::{Path, PathBuf};

use crate::participant::Participant;

/// Errors raised while deriving keys or encrypting
#[derive(Debug, thiserror::Error)]
pub enum EncryptError {
    #[error("failed to derive public key from {}: {source}", .key.display())]
    KeyDerivation {
        key: PathBuf,
        #[source]
        source: anyhow::Error,
    },
    #[error("encryption failed: {0}")]
    Encryption(#[source] anyhow::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl EncryptError {
    pub(crate) fn derivation(key: &KeyRef, source: anyhow::Error) -> Self {
        EncryptError::KeyDerivation {
            key: key.path().to_path_buf(),
            source,
        }
    }
}

/// Locates a participant's key file.
///
/// The file is never interpreted here; only a [`KeyEncryptor`] knows how to
/// read it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyRef {
    path: PathBuf,
}

impl KeyRef {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Key of `participant` inside the input directory: `{dir}/{participant}`
    pub fn for_participant(dir: &Path, participant: &Participant) -> Self {
        Self::new(dir.join(participant.as_str()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// An RSA public key in PKCS8 (SPKI) PEM form, `-----BEGIN PUBLIC KEY-----`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKeyPem(String);

impl PublicKeyPem {
    pub fn new(pem: impl Into<String>) -> Self {
        Self(pem.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PublicKeyPem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Capability to encrypt a short message so only one key holder can read it
pub trait KeyEncryptor {
    /// Derive the PKCS8 public key PEM for the key file at `key`.
    fn derive_public_key(&self, key: &KeyRef) -> Result<PublicKeyPem, EncryptError>;

    /// Encrypt `plaintext` with RSA PKCS#1 v1.5 under `public_key`.
    fn encrypt(&self, public_key: &PublicKeyPem, plaintext: &[u8])
        -> Result<Vec<u8>, EncryptError>;

    /// Derive the public key for `key` and encrypt `plaintext` under it.
    fn encrypt_for(&self, key: &KeyRef, plaintext: &[u8]) -> Result<Vec<u8>, EncryptError> {
        let public_key = self.derive_public_key(key)?;
        self.encrypt(&public_key, plaintext)
    }
}

impl<E: KeyEncryptor + ?Sized> KeyEncryptor for Box<E> {
    fn derive_public_key(&self, key: &KeyRef) -> Result<PublicKeyPem, EncryptError> {
        (**self).derive_public_key(key)
    }

    fn encrypt(
        &self,
        public_key: &PublicKeyPem,
        plaintext: &[u8],
    ) -> Result<Vec<u8>, EncryptError> {
        (**self).encrypt(public_key, plaintext)
    }
}
