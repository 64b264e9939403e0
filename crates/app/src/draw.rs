use std::fmt;
use std::path::PathBuf;

use common::prelude::{
    draw, read_participants, seal, BundleError, PairAssignment, PairingError, ParticipantError,
    Randomizer, Strategy,
};

use crate::config::{Config, EncryptorKind, ToolsConfig};

/// Everything one draw needs, after flags and config have been merged
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawSettings {
    pub input_dir: PathBuf,
    pub output: PathBuf,
    pub demo: bool,
    pub strategy: Strategy,
    pub encryptor: EncryptorKind,
    pub tools: ToolsConfig,
}

impl DrawSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            input_dir: config.input_dir.clone(),
            output: config.output.clone(),
            demo: false,
            strategy: config.strategy,
            encryptor: config.encryptor,
            tools: config.tools.clone(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DrawError {
    #[error(transparent)]
    Participants(#[from] ParticipantError),
    #[error(transparent)]
    Pairing(#[from] PairingError),
    #[error(transparent)]
    Bundle(#[from] BundleError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOutcome {
    /// Pairs in assignment order, shown in clear
    Demo { pairs: Vec<(String, String)> },
    /// Sealed archive written to disk
    Written { path: PathBuf, sealed: usize },
}

impl fmt::Display for DrawOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawOutcome::Demo { pairs } => {
                let lines: Vec<String> = pairs
                    .iter()
                    .map(|(giver, recipient)| format!("{giver} -> {recipient}"))
                    .collect();
                write!(f, "{}", lines.join("\n"))
            }
            DrawOutcome::Written { path, sealed } => {
                write!(f, "sealed {} results into {}", sealed, path.display())
            }
        }
    }
}

/// Read participants, assign pairs and either show or seal them.
///
/// Demo mode never touches keys, external tools or the output path.
pub fn run(settings: &DrawSettings, randomizer: &mut Randomizer) -> Result<DrawOutcome, DrawError> {
    let participants = read_participants(&settings.input_dir)?;
    tracing::info!(
        count = participants.len(),
        dir = %settings.input_dir.display(),
        "read participants"
    );

    let assignment = draw(&participants, settings.strategy, randomizer)?;

    if settings.demo {
        return Ok(DrawOutcome::Demo {
            pairs: pairs_of(&assignment),
        });
    }

    let encryptor = settings.encryptor.build(&settings.tools);
    tracing::debug!(encryptor = %settings.encryptor, "sealing results");
    let bundle = seal(&assignment, &settings.input_dir, encryptor.as_ref())?;
    bundle.write_to(&settings.output)?;

    Ok(DrawOutcome::Written {
        path: settings.output.clone(),
        sealed: assignment.len(),
    })
}

fn pairs_of(assignment: &PairAssignment) -> Vec<(String, String)> {
    assignment
        .iter()
        .map(|pair| (pair.giver.to_string(), pair.recipient.to_string()))
        .collect()
}
