//! Interactive session state and command handling.
//!
//! A [`Session`] owns the [`Document`] being edited plus the form state
//! around it: the selected value type and the current file. Each input line
//! parses into a [`ShellCommand`] and runs against the session; failures are
//! reported to the user and never end the session.

use std::io::{self, Write};
use std::path::PathBuf;

use colored::Colorize;
use jsonmaker_store::{Document, StoreError, UnknownValueType, ValueType};
use tracing::debug;

use crate::config::ShellConfig;

const ADD_USAGE: &str = "add [-t string|number|boolean] <key> = <value>";

pub const HELP: &str = "\
Commands:
  add [-t TYPE] KEY = VALUE  add or overwrite a key (TYPE: string, number, boolean)
  type [TYPE]                show or change the default type for `add`
  remove KEY                 remove a key
  show                       print the JSON preview
  list                       list keys with their stored types
  save [PATH]                save to PATH, or to the current file
  load [PATH]                replace the document with PATH, or the current file
  clear                      start over with an empty document
  help                       show this help
  quit                       leave the session";

/// A parsed input line.
#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Add {
        ty: Option<ValueType>,
        key: String,
        value: String,
    },
    Type(Option<ValueType>),
    Remove(String),
    Show,
    List,
    Save(Option<PathBuf>),
    Load(Option<PathBuf>),
    Clear,
    Help,
    Quit,
}

/// Errors from parsing an input line.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command {0:?} (type `help` for a list)")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error(transparent)]
    Type(#[from] UnknownValueType),
}

impl ShellCommand {
    /// Parse one non-empty input line.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_ascii_lowercase().as_str() {
            "add" | "set" => parse_add(rest),
            "type" => {
                if rest.is_empty() {
                    Ok(Self::Type(None))
                } else {
                    Ok(Self::Type(Some(rest.parse()?)))
                }
            }
            "remove" | "rm" | "delete" => {
                if rest.is_empty() {
                    Err(CommandError::Usage("remove <key>"))
                } else {
                    Ok(Self::Remove(rest.to_string()))
                }
            }
            "show" | "preview" => Ok(Self::Show),
            "list" | "ls" => Ok(Self::List),
            "save" => Ok(Self::Save(optional_path(rest))),
            "load" | "open" => Ok(Self::Load(optional_path(rest))),
            "clear" => Ok(Self::Clear),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            _ => Err(CommandError::Unknown(word.to_string())),
        }
    }
}

/// Splits `[-t TYPE] KEY = VALUE`. Everything before the first `=` that is
/// not the type option belongs to the key, so keys may contain spaces and
/// type words.
fn parse_add(rest: &str) -> Result<ShellCommand, CommandError> {
    let (ty, rest) = match rest.split_once(char::is_whitespace) {
        Some((flag, tail)) if flag == "-t" || flag == "--type" => {
            let (label, tail) = tail
                .trim_start()
                .split_once(char::is_whitespace)
                .ok_or(CommandError::Usage(ADD_USAGE))?;
            (Some(label.parse::<ValueType>()?), tail)
        }
        _ => (None, rest),
    };
    let (key, value) = rest.split_once('=').ok_or(CommandError::Usage(ADD_USAGE))?;
    Ok(ShellCommand::Add {
        ty,
        key: key.trim().to_string(),
        value: value.to_string(),
    })
}

fn optional_path(rest: &str) -> Option<PathBuf> {
    (!rest.is_empty()).then(|| PathBuf::from(rest))
}

/// Whether the session should keep reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Editing state for one interactive session.
pub struct Session {
    document: Document,
    current_file: Option<PathBuf>,
    selected_type: ValueType,
    config: ShellConfig,
}

impl Session {
    pub fn new(config: ShellConfig) -> Self {
        Self {
            document: Document::new(),
            current_file: config.file.clone(),
            selected_type: ValueType::default(),
            config,
        }
    }

    #[cfg(test)]
    pub fn document(&self) -> &Document {
        &self.document
    }

    #[cfg(test)]
    pub fn current_file(&self) -> Option<&PathBuf> {
        self.current_file.as_ref()
    }

    #[cfg(test)]
    pub fn selected_type(&self) -> ValueType {
        self.selected_type
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    /// Load the configured startup file, if it exists.
    pub fn open_startup_file(&mut self, out: &mut dyn Write) -> io::Result<()> {
        let Some(path) = self.current_file.clone() else {
            return Ok(());
        };
        if path.exists() {
            self.run(ShellCommand::Load(Some(path)), out)?;
        } else {
            writeln!(out, "New file {}", path.display().to_string().bold())?;
        }
        Ok(())
    }

    /// Parse and run one input line.
    pub fn execute(&mut self, line: &str, out: &mut dyn Write) -> io::Result<Flow> {
        match ShellCommand::parse(line) {
            Ok(cmd) => self.run(cmd, out),
            Err(e) => {
                writeln!(out, "{} {e}", "✗".red().bold())?;
                Ok(Flow::Continue)
            }
        }
    }

    /// Run one command.
    pub fn run(&mut self, cmd: ShellCommand, out: &mut dyn Write) -> io::Result<Flow> {
        debug!(?cmd, "running shell command");
        match cmd {
            ShellCommand::Add { ty, key, value } => {
                let ty = ty.unwrap_or(self.selected_type);
                match self.document.insert(&key, &value, ty) {
                    Ok(_) => self.print_preview_if_enabled(out)?,
                    Err(e) => notify_error(out, &e)?,
                }
            }
            ShellCommand::Type(None) => {
                writeln!(out, "Type: {}", self.selected_type.as_str().cyan())?;
            }
            ShellCommand::Type(Some(ty)) => {
                self.selected_type = ty;
                writeln!(out, "Type set to {}", ty.as_str().cyan())?;
            }
            ShellCommand::Remove(key) => match self.document.remove(&key) {
                Some(_) => self.print_preview_if_enabled(out)?,
                None => writeln!(out, "{} no such key: {}", "✗".red().bold(), key.yellow())?,
            },
            ShellCommand::Show => self.print_preview(out)?,
            ShellCommand::List => self.print_listing(out)?,
            ShellCommand::Save(path) => {
                let Some(path) = path.or_else(|| self.current_file.clone()) else {
                    writeln!(out, "No file chosen; nothing saved.")?;
                    return Ok(Flow::Continue);
                };
                match self.document.save(&path) {
                    Ok(()) => {
                        let shown = path.display().to_string();
                        writeln!(out, "{} JSON saved to {}", "✓".green().bold(), shown.bold())?;
                        self.current_file = Some(path);
                    }
                    Err(e) => notify_error(out, &e)?,
                }
            }
            ShellCommand::Load(path) => {
                let Some(path) = path.or_else(|| self.current_file.clone()) else {
                    writeln!(out, "No file chosen; nothing loaded.")?;
                    return Ok(Flow::Continue);
                };
                match self.document.load(&path) {
                    Ok(()) => {
                        self.current_file = Some(path);
                        self.print_preview_if_enabled(out)?;
                    }
                    Err(e) => {
                        writeln!(out, "{} Failed to load JSON:", "✗".red().bold())?;
                        writeln!(out, "  {e}")?;
                    }
                }
            }
            ShellCommand::Clear => {
                self.document.clear();
                self.print_preview_if_enabled(out)?;
            }
            ShellCommand::Help => writeln!(out, "{HELP}")?,
            ShellCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn print_preview_if_enabled(&self, out: &mut dyn Write) -> io::Result<()> {
        if self.config.preview {
            self.print_preview(out)?;
        }
        Ok(())
    }

    fn print_preview(&self, out: &mut dyn Write) -> io::Result<()> {
        match self.document.render() {
            Ok(json) => writeln!(out, "{}", json.bright_cyan()),
            Err(e) => writeln!(out, "{} {} {e}", "✗".red().bold(), "Error:".red()),
        }
    }

    fn print_listing(&self, out: &mut dyn Write) -> io::Result<()> {
        if self.document.is_empty() {
            return writeln!(out, "(empty)");
        }
        let width = self.document.keys().map(str::len).max().unwrap_or(0);
        for (key, value) in self.document.iter() {
            let ty = format!("{:<7}", value.type_name());
            writeln!(out, "{key:<width$}  {}  {value}", ty.dimmed())?;
        }
        Ok(())
    }
}

fn notify_error(out: &mut dyn Write, err: &StoreError) -> io::Result<()> {
    let label = if err.is_validation() { "Invalid input:" } else { "Error:" };
    writeln!(out, "{} {} {err}", "✗".red().bold(), label.red())
}
