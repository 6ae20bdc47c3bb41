use std::io::{self, Write};

use colored::Colorize;

use crate::config::ShellConfig;
use crate::editor::{LineEditor, ReadResult, RustylineEditor};
use crate::session::{Flow, Session};

/// Read-edit-preview loop over a [`Session`].
pub struct Repl<E: LineEditor = RustylineEditor> {
    editor: E,
    session: Session,
}

impl Repl<RustylineEditor> {
    /// Creates a REPL backed by rustyline.
    pub fn new(config: ShellConfig) -> anyhow::Result<Self> {
        let editor = RustylineEditor::new(config.history_size)?;
        Ok(Self::with_editor(editor, config))
    }
}

impl<E: LineEditor> Repl<E> {
    pub fn with_editor(editor: E, config: ShellConfig) -> Self {
        Self {
            editor,
            session: Session::new(config),
        }
    }

    #[cfg(test)]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Run until `quit` or end of input, writing to stdout.
    pub fn run(&mut self) -> anyhow::Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.run_with_output(&mut out)
    }

    pub fn run_with_output(&mut self, out: &mut dyn Write) -> anyhow::Result<()> {
        if self.session.config().banner {
            print_banner(out)?;
        }
        self.session.open_startup_file(out)?;

        loop {
            let prompt = self.session.config().prompt.clone();
            match self.editor.read_line(&prompt)? {
                ReadResult::Line(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    self.editor.add_history(line);
                    if self.session.execute(line, out)? == Flow::Quit {
                        break;
                    }
                }
                ReadResult::Interrupted => continue,
                ReadResult::Eof => break,
            }
            out.flush()?;
        }
        Ok(())
    }
}

fn print_banner(out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "{} {}", "JSON Maker".bold(), env!("CARGO_PKG_VERSION").dimmed())?;
    writeln!(out, "Type `help` for commands, `quit` to leave.")?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonmaker_store::{Document, ScalarValue};
    use std::collections::VecDeque;

    struct ScriptedEditor {
        inputs: VecDeque<ReadResult>,
        history: Vec<String>,
    }

    impl ScriptedEditor {
        fn new(lines: &[&str]) -> Self {
            Self {
                inputs: lines.iter().map(|l| ReadResult::Line(l.to_string())).collect(),
                history: Vec::new(),
            }
        }
    }

    impl LineEditor for ScriptedEditor {
        fn read_line(&mut self, _prompt: &str) -> anyhow::Result<ReadResult> {
            Ok(self.inputs.pop_front().unwrap_or(ReadResult::Eof))
        }

        fn add_history(&mut self, line: &str) {
            self.history.push(line.to_string());
        }
    }

    fn quiet_config() -> ShellConfig {
        colored::control::set_override(false);
        ShellConfig { banner: false, ..ShellConfig::default() }
    }

    #[test]
    fn scripted_session_builds_document() {
        let editor = ScriptedEditor::new(&[
            "add -t string name = Ada",
            "",
            "add -t number born = 1815",
            "add -t boolean analyst = yes",
            "add -t number born = 1816",
            "quit",
            "add ignored = never read",
        ]);
        let mut repl = Repl::with_editor(editor, quiet_config());
        let mut out = Vec::new();
        repl.run_with_output(&mut out).unwrap();

        let doc = repl.session().document();
        assert_eq!(doc.len(), 3);
        assert_eq!(doc.get("born"), Some(&ScalarValue::Integer(1816)));
        assert!(!doc.contains_key("ignored"));
        assert_eq!(repl.editor.history.len(), 5);
    }

    #[test]
    fn interrupt_and_eof() {
        let mut editor = ScriptedEditor::new(&["add k = v"]);
        editor.inputs.push_front(ReadResult::Interrupted);
        let mut repl = Repl::with_editor(editor, quiet_config());
        let mut out = Vec::new();
        repl.run_with_output(&mut out).unwrap();
        assert_eq!(repl.session().document().len(), 1);
    }

    #[test]
    fn errors_do_not_end_the_session() {
        let editor = ScriptedEditor::new(&[
            "bogus",
            "add -t number n = x",
            "load /definitely/not/here.json",
            "add n = ok",
        ]);
        let mut repl = Repl::with_editor(editor, quiet_config());
        let mut out = Vec::new();
        repl.run_with_output(&mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("unknown command"));
        assert!(text.contains("Failed to load JSON"));
        assert_eq!(repl.session().document().get("n"), Some(&ScalarValue::Text("ok".into())));
    }

    #[test]
    fn session_saves_to_startup_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("new.json");
        let editor = ScriptedEditor::new(&["add -t number x = 1", "save"]);
        let config = ShellConfig { file: Some(path.clone()), ..quiet_config() };
        let mut repl = Repl::with_editor(editor, config);
        let mut out = Vec::new();
        repl.run_with_output(&mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("New file"));
        let saved = Document::open(&path).unwrap();
        assert_eq!(saved.get("x"), Some(&ScalarValue::Integer(1)));
    }

    #[test]
    fn banner_printed_when_enabled() {
        colored::control::set_override(false);
        let editor = ScriptedEditor::new(&[]);
        let mut repl = Repl::with_editor(editor, ShellConfig::default());
        let mut out = Vec::new();
        repl.run_with_output(&mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().starts_with("JSON Maker"));
    }
}
