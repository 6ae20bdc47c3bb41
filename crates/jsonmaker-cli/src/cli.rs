use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use jsonmaker_store::ValueType;

#[derive(Parser)]
#[command(
    name = "jsonmaker",
    about = "JSON Maker — build flat JSON documents from typed key/value pairs",
    version,
)]
pub struct Cli {
    /// Defaults to `shell` when omitted
    #[command(subcommand)]
    pub command: Option<Command>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start an interactive editing session
    Shell(ShellArgs),
    /// Add or overwrite a key in a JSON file
    Add(AddArgs),
    /// Remove a key from a JSON file
    Remove(RemoveArgs),
    /// Print a JSON file as a formatted preview
    Show(ShowArgs),
}

#[derive(Args, Default)]
pub struct ShellArgs {
    /// File to load at startup; also the default target for `save`
    pub file: Option<PathBuf>,
    #[arg(long)]
    pub prompt: Option<String>,
    #[arg(long)]
    pub no_banner: bool,
    /// Do not print the preview after each change
    #[arg(long)]
    pub no_preview: bool,
    #[arg(long)]
    pub history_size: Option<usize>,
}

#[derive(Args)]
pub struct AddArgs {
    #[arg(short, long)]
    pub file: PathBuf,
    #[arg(short, long)]
    pub key: String,
    #[arg(long, allow_hyphen_values = true)]
    pub value: String,
    #[arg(short = 't', long = "type", default_value = "string")]
    pub value_type: ValueType,
}

#[derive(Args)]
pub struct RemoveArgs {
    #[arg(short, long)]
    pub file: PathBuf,
    #[arg(short, long)]
    pub key: String,
}

#[derive(Args)]
pub struct ShowArgs {
    pub file: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_no_subcommand() {
        let cli = Cli::try_parse_from(["jsonmaker"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn parse_shell_with_file() {
        let cli = Cli::try_parse_from(["jsonmaker", "shell", "doc.json", "--no-banner"]).unwrap();
        let Some(Command::Shell(args)) = cli.command else {
            panic!("wrong command");
        };
        assert_eq!(args.file, Some(PathBuf::from("doc.json")));
        assert!(args.no_banner);
        assert!(!args.no_preview);
    }

    #[test]
    fn parse_add_defaults_to_string() {
        let cli = Cli::try_parse_from([
            "jsonmaker", "add", "-f", "d.json", "-k", "name", "--value", "Ada",
        ])
        .unwrap();
        let Some(Command::Add(args)) = cli.command else {
            panic!("wrong command");
        };
        assert_eq!(args.key, "name");
        assert_eq!(args.value, "Ada");
        assert_eq!(args.value_type, ValueType::Text);
    }

    #[test]
    fn parse_add_number_with_negative_value() {
        let cli = Cli::try_parse_from([
            "jsonmaker", "add", "--file", "d.json", "--key", "delta", "--value", "-2.5",
            "--type", "number",
        ])
        .unwrap();
        let Some(Command::Add(args)) = cli.command else {
            panic!("wrong command");
        };
        assert_eq!(args.value, "-2.5");
        assert_eq!(args.value_type, ValueType::Number);
    }

    #[test]
    fn parse_add_rejects_unknown_type() {
        let result = Cli::try_parse_from([
            "jsonmaker", "add", "-f", "d.json", "-k", "k", "--value", "v", "-t", "date",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_remove() {
        let cli =
            Cli::try_parse_from(["jsonmaker", "remove", "-f", "d.json", "-k", "old"]).unwrap();
        let Some(Command::Remove(args)) = cli.command else {
            panic!("wrong command");
        };
        assert_eq!(args.key, "old");
    }

    #[test]
    fn parse_show() {
        let cli = Cli::try_parse_from(["jsonmaker", "show", "d.json"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Show(_))));
    }

    #[test]
    fn parse_global_flags() {
        let cli =
            Cli::try_parse_from(["jsonmaker", "--verbose", "--no-color", "show", "d.json"])
                .unwrap();
        assert!(cli.verbose);
        assert!(cli.no_color);
    }
}
