/**
 * Packaging of a finished draw: per-giver ciphertexts
 *  plus the static README and decrypt helper,
 *  written out as a single zip archive.
 */
pub mod bundle;
/**
 * Cryptographic boundary.
 *  - `KeyEncryptor` capability (derive public key, encrypt)
 *  - external `ssh-keygen` / `openssl` implementation
 *  - native RSA implementation
 */
pub mod crypto;
/**
 * Giver -> recipient assignment over a shuffled
 *  participant order.
 */
pub mod pairing;
/**
 * Participants as they are discovered on disk.
 */
pub mod participant;
/**
 * Injectable random source used to shuffle
 *  participants before pairing.
 */
pub mod shuffle;
/**
 * Helper for setting build version information
 *  at compile time.
 */
pub mod version;

pub mod prelude {
    pub use crate::bundle::{seal, Bundle, BundleEntry, BundleError};
    pub use crate::crypto::{
        EncryptError, ExternalTools, KeyEncryptor, KeyRef, NativeRsa, PublicKeyPem,
    };
    pub use crate::pairing::{draw, PairAssignment, PairingError, Strategy};
    pub use crate::participant::{read_participants, Participant, ParticipantError};
    pub use crate::shuffle::Randomizer;
    pub use crate::version::{build_info, BuildInfo};
}
