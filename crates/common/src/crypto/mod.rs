//! Per-participant encryption
//!
//! Every giver receives the name of their recipient encrypted under the
//! giver's own RSA public key, so only the holder of the matching private
//! key can read it.
//!
//! # Capability
//!
//! [`KeyEncryptor`] is the single boundary to key handling:
//!
//! 1. **Derive**: turn a participant's key file into a PKCS8 (SPKI) public key PEM
//! 2. **Encrypt**: RSA with PKCS#1 v1.5 padding under that public key
//!
//! The output is the raw ciphertext with no framing, which is what
//! `openssl pkeyutl -decrypt` expects on the reading side.
//!
//! # Implementations
//!
//! - [`ExternalTools`]: shells out to `ssh-keygen` and `openssl`, staging the
//!   public key in a randomly named temporary file that is removed on every
//!   exit path
//! - [`NativeRsa`]: parses the key file and encrypts in process with the
//!   `rsa` and `ssh-key` crates
//!
//! Any failure is final: callers abort the whole draw rather than retry.

mod encryptor;
mod external;
mod native;

pub use encryptor::{EncryptError, KeyEncryptor, KeyRef, PublicKeyPem};
pub use external::ExternalTools;
pub use native::NativeRsa;
