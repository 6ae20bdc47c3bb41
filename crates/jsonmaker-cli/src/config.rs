use std::path::PathBuf;

use crate::cli::ShellArgs;

/// Settings for an interactive session.
#[derive(Clone, Debug)]
pub struct ShellConfig {
    /// Prompt shown before each input line.
    pub prompt: String,
    /// Print the welcome banner on start.
    pub banner: bool,
    /// Print the JSON preview after every successful change.
    pub preview: bool,
    /// Maximum number of remembered input lines.
    pub history_size: usize,
    /// File loaded at startup and used by `save`/`load` without a path.
    pub file: Option<PathBuf>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: "json> ".into(),
            banner: true,
            preview: true,
            history_size: 1000,
            file: None,
        }
    }
}

impl ShellConfig {
    /// Overlay command-line flags on the defaults.
    pub fn from_args(args: ShellArgs) -> Self {
        let defaults = Self::default();
        Self {
            prompt: args.prompt.unwrap_or(defaults.prompt),
            banner: !args.no_banner,
            preview: !args.no_preview,
            history_size: args.history_size.unwrap_or(defaults.history_size),
            file: args.file,
        }
    }
}
