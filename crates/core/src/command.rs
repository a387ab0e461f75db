//! Typed external-command descriptor.
//!
//! Every external invocation is built as a [`ProcessCall`]: a program name
//! plus an ordered argument vector, never a whitespace-joined string. The
//! same value renders the dry-run line and feeds the spawned process, so
//! the two cannot drift apart.

use std::fmt;

/// A fully resolved external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessCall {
    program: String,
    args: Vec<String>,
}

impl ProcessCall {
    /// Start a call for the given program.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append a single argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments in order.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// The program to spawn.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// The arguments, in spawn order.
    pub fn argv(&self) -> &[String] {
        &self.args
    }

    /// The human-readable command line: program and arguments joined by
    /// single spaces. Dry-run mode prints exactly this.
    pub fn command_line(&self) -> String {
        if self.args.is_empty() {
            return self.program.clone();
        }
        format!("{} {}", self.program, self.args.join(" "))
    }
}

impl fmt::Display for ProcessCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command_line())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
