use std::fs;

use anyhow::{anyhow, bail};
use rand::rngs::OsRng;
use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePublicKey, LineEnding};
use rsa::{Pkcs1v15Encrypt, RsaPrivateKey, RsaPublicKey};

use super::encryptor::{EncryptError, KeyEncryptor, KeyRef, PublicKeyPem};

/// Encrypts in process, without external tools.
///
/// Accepted key files:
/// - PEM `RSA PRIVATE KEY` (PKCS#1) and `PRIVATE KEY` (PKCS#8)
/// - PEM `PUBLIC KEY` (SPKI) and `RSA PUBLIC KEY` (PKCS#1)
/// - OpenSSH `OPENSSH PRIVATE KEY`; the public half is stored in the clear,
///   so passphrase protected keys work too
/// - a single OpenSSH `ssh-rsa AAAA...` public key line
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeRsa;

impl NativeRsa {
    pub fn new() -> Self {
        Self
    }
}

impl KeyEncryptor for NativeRsa {
    fn derive_public_key(&self, key: &KeyRef) -> Result<PublicKeyPem, EncryptError> {
        let contents = fs::read_to_string(key.path())
            .map_err(|e| EncryptError::derivation(key, anyhow!("cannot read key file: {e}")))?;
        let public_key =
            parse_public_key(&contents).map_err(|e| EncryptError::derivation(key, e))?;
        let pem = public_key
            .to_public_key_pem(LineEnding::LF)
            .map_err(|e| EncryptError::derivation(key, anyhow!("cannot encode public key: {e}")))?;

        tracing::debug!(key = %key.path().display(), "derived public key natively");
        Ok(PublicKeyPem::new(pem))
    }

    fn encrypt(
        &self,
        public_key: &PublicKeyPem,
        plaintext: &[u8],
    ) -> Result<Vec<u8>, EncryptError> {
        let public_key = RsaPublicKey::from_public_key_pem(public_key.as_str())
            .map_err(|e| EncryptError::Encryption(anyhow!("invalid public key PEM: {e}")))?;
        public_key
            .encrypt(&mut OsRng, Pkcs1v15Encrypt, plaintext)
            .map_err(|e| EncryptError::Encryption(anyhow!("{e}")))
    }
}

/// Extract an RSA public key from any of the supported key file formats
fn parse_public_key(contents: &str) -> anyhow::Result<RsaPublicKey> {
    let contents = contents.trim();

    if contents.starts_with("ssh-") {
        let key = ssh_key::PublicKey::from_openssh(contents)
            .map_err(|e| anyhow!("invalid OpenSSH public key: {e}"))?;
        return rsa_from_ssh(key.key_data());
    }

    let block = pem::parse(contents).map_err(|e| anyhow!("unrecognised key file: {e}"))?;
    let der = block.contents();
    match block.tag() {
        "RSA PRIVATE KEY" => RsaPrivateKey::from_pkcs1_der(der)
            .map(|key| key.to_public_key())
            .map_err(|e| anyhow!("invalid PKCS#1 private key: {e}")),
        "PRIVATE KEY" => RsaPrivateKey::from_pkcs8_der(der)
            .map(|key| key.to_public_key())
            .map_err(|e| anyhow!("invalid PKCS#8 private key: {e}")),
        "RSA PUBLIC KEY" => RsaPublicKey::from_pkcs1_der(der)
            .map_err(|e| anyhow!("invalid PKCS#1 public key: {e}")),
        "PUBLIC KEY" => RsaPublicKey::from_public_key_der(der)
            .map_err(|e| anyhow!("invalid SPKI public key: {e}")),
        "OPENSSH PRIVATE KEY" => {
            let key = ssh_key::PrivateKey::from_openssh(contents)
                .map_err(|e| anyhow!("invalid OpenSSH private key: {e}"))?;
            rsa_from_ssh(key.public_key().key_data())
        }
        "ENCRYPTED PRIVATE KEY" => bail!("encrypted PKCS#8 keys are not supported"),
        other => bail!("unsupported key type '{other}'"),
    }
}

fn rsa_from_ssh(data: &ssh_key::public::KeyData) -> anyhow::Result<RsaPublicKey> {
    let rsa = data
        .rsa()
        .ok_or_else(|| anyhow!("expected an RSA key, found {}", data.algorithm()))?;
    RsaPublicKey::try_from(rsa).map_err(|e| anyhow!("invalid RSA key: {e}"))
}
