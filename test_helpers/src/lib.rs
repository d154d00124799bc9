//! Shared helpers for eclipse-stack tests.
//!
//! Tests that produce artifacts worth looking at by eye (synthetic eclipse
//! frames, limb overlays, composites) write them under
//! `<workspace>/test_output/`, which survives the run for inspection.
//!
//! ```rust
//! use test_helpers::{find_project_root, output_path};
//!
//! let root = find_project_root().unwrap();
//! assert!(root.join("Cargo.toml").exists());
//!
//! let overlay = output_path("overlays/limb.png");
//! assert!(overlay.parent().unwrap().is_dir());
//! ```

use once_cell::sync::Lazy;
use std::env;
use std::path::{Path, PathBuf};

#[derive(thiserror::Error, Debug)]
pub enum TestHelperError {
    #[error("Failed to find project root: {0}")]
    ProjectRootNotFound(String),

    #[error("Failed to prepare output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Walk up from the current directory to the Cargo.toml declaring `[workspace]`.
///
/// Integration tests run with the member crate as working directory, so the
/// walk normally stops one level up.
pub fn find_project_root() -> Result<PathBuf, TestHelperError> {
    let mut current_dir = env::current_dir().map_err(|e| {
        TestHelperError::ProjectRootNotFound(format!("Failed to get current directory: {e}"))
    })?;

    loop {
        let cargo_toml = current_dir.join("Cargo.toml");
        if cargo_toml.exists() {
            let content = std::fs::read_to_string(&cargo_toml).map_err(|e| {
                TestHelperError::ProjectRootNotFound(format!("Failed to read Cargo.toml: {e}"))
            })?;
            if content.contains("[workspace]") {
                return Ok(current_dir);
            }
        }

        if !current_dir.pop() {
            return Err(TestHelperError::ProjectRootNotFound(
                "No Cargo.toml with [workspace] above the current directory".to_string(),
            ));
        }
    }
}

static PROJECT_ROOT: Lazy<PathBuf> =
    Lazy::new(|| find_project_root().expect("Failed to find project root directory"));

/// Create `dir` and any missing parents.
pub fn ensure_dir(dir: &Path) -> Result<(), TestHelperError> {
    std::fs::create_dir_all(dir).map_err(|source| TestHelperError::OutputDir {
        path: dir.to_path_buf(),
        source,
    })
}

/// `<workspace>/test_output`, created on first use.
pub fn get_output_dir() -> PathBuf {
    let output_dir = PROJECT_ROOT.join("test_output");
    ensure_dir(&output_dir).expect("Failed to create output directory");
    output_dir
}

/// Path of an artifact under the output directory.
///
/// Parent directories of `path` are created so callers can save straight
/// away, e.g. `output_path("composites/totality.png")`.
pub fn output_path<P: AsRef<Path>>(path: P) -> PathBuf {
    let full = get_output_dir().join(path);
    if let Some(parent) = full.parent() {
        ensure_dir(parent).expect("Failed to create artifact directory");
    }
    full
}
