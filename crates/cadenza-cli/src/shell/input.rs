//! Where the shell's input lines come from.

use std::io;
use std::path::PathBuf;

use rustyline::error::ReadlineError;
use rustyline::{Config, DefaultEditor};

/// One read from a [`LineSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Text(String),
    /// Ctrl-C at the prompt.
    Interrupted,
    /// Ctrl-D, or the input ran out.
    Eof,
}

/// A prompt-driven source of input lines.
pub trait LineSource {
    fn read_line(&mut self, prompt: &str) -> io::Result<Line>;
}

impl<T: LineSource + ?Sized> LineSource for &mut T {
    fn read_line(&mut self, prompt: &str) -> io::Result<Line> {
        (**self).read_line(prompt)
    }
}

/// Interactive terminal input with line editing and a persistent history.
pub struct Terminal {
    editor: DefaultEditor,
    history: Option<PathBuf>,
}

impl Terminal {
    /// Open the terminal editor, loading `history` when it exists.
    pub fn new(history: Option<PathBuf>) -> rustyline::Result<Self> {
        let config = Config::builder().auto_add_history(true).build();
        let mut editor = DefaultEditor::with_config(config)?;
        if let Some(path) = &history {
            if let Err(e) = editor.load_history(path) {
                log::debug!("No shell history loaded from {}: {}", path.display(), e);
            }
        }
        Ok(Self { editor, history })
    }

    /// Write the session's history back to disk.
    pub fn save_history(&mut self) {
        let Some(path) = &self.history else {
            return;
        };
        if let Some(dir) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(dir) {
                log::warn!("Could not create {}: {}", dir.display(), e);
                return;
            }
        }
        if let Err(e) = self.editor.save_history(path) {
            log::warn!("Could not save shell history to {}: {}", path.display(), e);
        }
    }
}

impl std::fmt::Debug for Terminal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Terminal")
            .field("history", &self.history)
            .finish_non_exhaustive()
    }
}

impl LineSource for Terminal {
    fn read_line(&mut self, prompt: &str) -> io::Result<Line> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(Line::Text(line)),
            Err(ReadlineError::Interrupted) => Ok(Line::Interrupted),
            Err(ReadlineError::Eof) => Ok(Line::Eof),
            Err(ReadlineError::Io(e)) => Err(e),
            Err(e) => Err(io::Error::other(e.to_string())),
        }
    }
}
