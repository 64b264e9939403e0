// CLI modules
mod cli;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use cli::{args::Args, op::Op, Draw, Version};
use santa::Config;

command_enum! {
    (Draw, Draw),
    (Version, Version),
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match Config::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // --log-level > config file > info
    let level = match args.log_level {
        Some(level) => level,
        None => match config.log_level() {
            Ok(level) => level,
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        },
    };
    let _guards = santa::logging::init(level, config.log_dir.as_deref());

    let ctx = cli::op::OpContext::new(config, args.config);

    match args.command.execute(&ctx) {
        Ok(output) => {
            let text = output.to_string();
            if !text.is_empty() {
                println!("{}", text);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
