use std::path::PathBuf;

use clap::Args;

use common::prelude::{Randomizer, Strategy};
use santa::{DrawError, DrawOutcome, DrawSettings, EncryptorKind};

use crate::cli::op::{Op, OpContext};

#[derive(Args, Debug, Clone, Default)]
pub struct Draw {
    /// Print the pairs in clear instead of sealing them; nothing is written
    #[arg(long, visible_alias = "dry-run")]
    pub demo: bool,

    /// Directory whose entries name the participants and hold their private keys
    #[arg(long = "in", value_name = "DIR")]
    pub input: Option<PathBuf>,

    /// Path of the results archive
    #[arg(long, value_name = "PATH")]
    pub out: Option<PathBuf>,

    /// Pairing strategy: greedy or cyclic
    #[arg(long)]
    pub strategy: Option<Strategy>,

    /// Encryptor: external (ssh-keygen + openssl) or native
    #[arg(long)]
    pub encryptor: Option<EncryptorKind>,
}

impl Draw {
    /// Flags win over the config file, which wins over built-in defaults
    fn settings(&self, ctx: &OpContext) -> DrawSettings {
        let mut settings = DrawSettings::from_config(&ctx.config);
        settings.demo = self.demo;
        if let Some(input) = &self.input {
            settings.input_dir = input.clone();
        }
        if let Some(out) = &self.out {
            settings.output = out.clone();
        }
        if let Some(strategy) = self.strategy {
            settings.strategy = strategy;
        }
        if let Some(encryptor) = self.encryptor {
            settings.encryptor = encryptor;
        }
        settings
    }
}

impl Op for Draw {
    type Error = DrawError;
    type Output = DrawOutcome;

    fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error> {
        let settings = self.settings(ctx);
        tracing::debug!(config = ?ctx.config_path, ?settings, "resolved draw settings");
        santa::run(&settings, &mut Randomizer::from_clock())
    }
}
