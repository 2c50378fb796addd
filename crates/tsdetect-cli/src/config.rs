//! Separates configuration flags from the remaining command-line tokens.
//!
//! Configuration flags go to `ortho_config`, which layers them over the
//! configuration file and `TSDETECT_*` environment variables. Everything
//! from the first other token onwards is parsed by `clap`.

use std::ffi::{OsStr, OsString};

use ortho_config::OrthoConfig;
use tsdetect_config::Config;

use crate::AppError;

/// Flags recognised by the configuration loader.
///
/// Must list every flag `tsdetect_config::Config` accepts.
pub(crate) const CONFIG_CLI_FLAGS: &[&str] = &[
    "--config-path",
    "--manifest-path",
    "--project-root",
    "--log-filter",
    "--log-format",
];

pub(crate) trait ConfigLoader {
    /// Loads configuration from the given configuration arguments.
    ///
    /// `args` holds the program name followed by configuration flags only.
    fn load(&self, args: &[OsString]) -> Result<Config, AppError>;
}

/// Loader backed by the layered `ortho_config` sources.
pub(crate) struct OrthoConfigLoader;

impl ConfigLoader for OrthoConfigLoader {
    fn load(&self, args: &[OsString]) -> Result<Config, AppError> {
        Config::load_from_iter(args.iter().cloned()).map_err(AppError::LoadConfiguration)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlagAction {
    Include { needs_value: bool },
    Stop,
}

fn classify(argument: &OsStr) -> FlagAction {
    let text = argument.to_string_lossy();
    let Some(flag) = text.split('=').next() else {
        return FlagAction::Stop;
    };
    if !CONFIG_CLI_FLAGS.contains(&flag) {
        return FlagAction::Stop;
    }
    FlagAction::Include {
        needs_value: !text.contains('='),
    }
}

/// Arguments split at the boundary between configuration and command flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ConfigArgumentSplit {
    /// Program name followed by the configuration flags and their values.
    pub(crate) config_arguments: Vec<OsString>,
    /// Program name followed by everything else.
    pub(crate) command_arguments: Vec<OsString>,
}

/// Splits `args` at the first token that is not a configuration flag or the
/// value of one.
pub(crate) fn split_config_arguments(args: &[OsString]) -> ConfigArgumentSplit {
    let mut tokens = args.iter();
    let program: Vec<OsString> = tokens.next().cloned().into_iter().collect();
    let mut config_arguments = program.clone();
    let mut command_arguments = program;

    let mut pending_value = false;
    while let Some(argument) = tokens.next() {
        if pending_value {
            config_arguments.push(argument.clone());
            pending_value = false;
            continue;
        }
        match classify(argument) {
            FlagAction::Include { needs_value } => {
                config_arguments.push(argument.clone());
                pending_value = needs_value;
            }
            FlagAction::Stop => {
                command_arguments.push(argument.clone());
                command_arguments.extend(tokens.by_ref().cloned());
                break;
            }
        }
    }

    ConfigArgumentSplit {
        config_arguments,
        command_arguments,
    }
}
