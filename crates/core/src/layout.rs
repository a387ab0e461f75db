//! Filesystem layout of the research tree the driver operates on.
//!
//! All paths are derived once from a single root directory and carried in
//! a [`Layout`] value that is passed down explicitly; nothing downstream
//! reads process-global state. The shapes are the contract expected by
//! the external `do.py` tooling: `examples/do.py`,
//! `examples/models/<model>`, `examples/analysis/<name>`,
//! `paper/<figure>.py`, and `paper/times/` for timing records.

use std::io;
use std::path::{Path, PathBuf};

/// Interpreter used for every external script unless overridden.
pub const DEFAULT_PYTHON: &str = "python";

/// Resolved paths and interpreter for one driver run.
#[derive(Debug, Clone)]
pub struct Layout {
    python: String,
    do_script: PathBuf,
    models_dir: PathBuf,
    analysis_dir: PathBuf,
    paper_dir: PathBuf,
    times_dir: PathBuf,
}

impl Layout {
    /// Derive the full layout from the research-tree root.
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        let scripts_dir = root.join("examples");
        let paper_dir = root.join("paper");
        Self {
            python: DEFAULT_PYTHON.to_string(),
            do_script: scripts_dir.join("do.py"),
            models_dir: scripts_dir.join("models"),
            analysis_dir: scripts_dir.join("analysis"),
            times_dir: paper_dir.join("times"),
            paper_dir,
        }
    }

    /// Use a different interpreter (e.g. `python2` on older trees).
    pub fn with_python(mut self, python: impl Into<String>) -> Self {
        self.python = python.into();
        self
    }

    /// Interpreter launched for every invocation.
    pub fn python(&self) -> &str {
        &self.python
    }

    /// The `do.py` entry point of the external tooling.
    pub fn do_script(&self) -> &Path {
        &self.do_script
    }

    /// Model definition handed to `do.py`. No extension; `do.py` resolves it.
    pub fn model_path(&self, model: &str) -> PathBuf {
        self.models_dir.join(model)
    }

    /// Analysis module handed to `do.py`. No extension, as above.
    pub fn analysis_path(&self, analysis: &str) -> PathBuf {
        self.analysis_dir.join(analysis)
    }

    /// Standalone figure script under `paper/`.
    pub fn figure_script(&self, name: &str) -> PathBuf {
        self.paper_dir.join(format!("{name}.py"))
    }

    /// Directory holding the training-time records.
    pub fn times_dir(&self) -> &Path {
        &self.times_dir
    }

    /// Timing record path for a (model, optional seed) pair.
    pub fn time_file(&self, model: &str, seed: Option<u32>) -> PathBuf {
        let name = match seed {
            Some(seed) => format!("{model}_s{seed}.txt"),
            None => format!("{model}.txt"),
        };
        self.times_dir.join(name)
    }

    /// Create the output directories this run writes into.
    pub fn ensure_dirs(&self) -> io::Result<()> {
        std::fs::create_dir_all(&self.times_dir)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
