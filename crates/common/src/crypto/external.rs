use std::ffi::OsStr;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use anyhow::anyhow;
use tempfile::NamedTempFile;

use super::encryptor::{EncryptError, KeyEncryptor, KeyRef, PublicKeyPem};

const TEMP_KEY_PREFIX: &str = "santa-key-";
const TEMP_KEY_SUFFIX: &str = ".pem";

/// Encrypts with the system's `ssh-keygen` and `openssl` binaries.
///
/// Derivation runs `ssh-keygen -f <key> -e -m PKCS8`, which reads an
/// unencrypted private key (PEM or OpenSSH format) and prints its public half.
/// Encryption stages that PEM in a temporary file and pipes the plaintext
/// through `openssl pkeyutl -encrypt`. Both tools must be on `PATH` unless
/// explicit binaries are configured.
#[derive(Debug, Clone)]
pub struct ExternalTools {
    ssh_keygen: PathBuf,
    openssl: PathBuf,
    temp_dir: Option<PathBuf>,
}

impl Default for ExternalTools {
    fn default() -> Self {
        Self {
            ssh_keygen: PathBuf::from("ssh-keygen"),
            openssl: PathBuf::from("openssl"),
            temp_dir: None,
        }
    }
}

impl ExternalTools {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ssh_keygen(mut self, binary: impl Into<PathBuf>) -> Self {
        self.ssh_keygen = binary.into();
        self
    }

    pub fn with_openssl(mut self, binary: impl Into<PathBuf>) -> Self {
        self.openssl = binary.into();
        self
    }

    /// Stage temporary public keys in `dir` instead of the system temp dir
    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = Some(dir.into());
        self
    }

    /// Write `pem` to a fresh, randomly named file.
    ///
    /// The file is deleted when the returned handle drops, whichever way the
    /// caller exits.
    fn stage_public_key(&self, pem: &PublicKeyPem) -> Result<NamedTempFile, EncryptError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(TEMP_KEY_PREFIX).suffix(TEMP_KEY_SUFFIX);
        let mut file = match &self.temp_dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        file.write_all(pem.as_str().as_bytes())?;
        file.flush()?;
        Ok(file)
    }
}

impl KeyEncryptor for ExternalTools {
    fn derive_public_key(&self, key: &KeyRef) -> Result<PublicKeyPem, EncryptError> {
        let output = Command::new(&self.ssh_keygen)
            .arg("-f")
            .arg(key.path())
            .args(["-e", "-m", "PKCS8"])
            .stdin(Stdio::null())
            .output()
            .map_err(|e| {
                EncryptError::derivation(key, anyhow!("failed to run {}: {e}", tool(&self.ssh_keygen)))
            })?;
        check_status(&self.ssh_keygen, &output).map_err(|e| EncryptError::derivation(key, e))?;

        let pem = String::from_utf8(output.stdout)
            .map_err(|_| EncryptError::derivation(key, anyhow!("public key is not valid UTF-8")))?;
        if !pem.contains("-----BEGIN PUBLIC KEY-----") {
            return Err(EncryptError::derivation(
                key,
                anyhow!("{} did not print a PKCS8 public key", tool(&self.ssh_keygen)),
            ));
        }

        tracing::debug!(key = %key.path().display(), "derived public key with ssh-keygen");
        Ok(PublicKeyPem::new(pem))
    }

    fn encrypt(
        &self,
        public_key: &PublicKeyPem,
        plaintext: &[u8],
    ) -> Result<Vec<u8>, EncryptError> {
        let staged = self.stage_public_key(public_key)?;

        let mut child = Command::new(&self.openssl)
            .args(["pkeyutl", "-encrypt", "-pubin", "-inkey"])
            .arg(staged.path())
            .args(["-pkeyopt", "rsa_padding_mode:pkcs1"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                EncryptError::Encryption(anyhow!("failed to run {}: {e}", tool(&self.openssl)))
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            // a failed write shows up as a non-zero exit below
            if let Err(e) = stdin.write_all(plaintext) {
                tracing::debug!("writing plaintext to openssl failed: {e}");
            }
        }
        let output = child.wait_with_output()?;
        check_status(&self.openssl, &output).map_err(EncryptError::Encryption)?;

        if output.stdout.is_empty() {
            return Err(EncryptError::Encryption(anyhow!(
                "{} produced no ciphertext",
                tool(&self.openssl)
            )));
        }

        tracing::debug!(
            staged = %staged.path().display(),
            bytes = output.stdout.len(),
            "encrypted with openssl"
        );
        Ok(output.stdout)
    }
}

fn tool(binary: &Path) -> String {
    binary
        .file_name()
        .unwrap_or_else(|| OsStr::new("tool"))
        .to_string_lossy()
        .into_owned()
}

fn check_status(binary: &Path, output: &Output) -> anyhow::Result<()> {
    if output.status.success() {
        return Ok(());
    }
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stderr = stderr.trim();
    if stderr.is_empty() {
        Err(anyhow!("{} exited with {}", tool(binary), output.status))
    } else {
        Err(anyhow!("{} exited with {}: {stderr}", tool(binary), output.status))
    }
}
