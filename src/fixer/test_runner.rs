//! Test-runner collaborator for the verification pass
//!
//! The fixer only needs a boolean pass/fail; how tests run is entirely the
//! collaborator's business.

use crate::error::{DeadwoodError, Result};
use std::path::Path;
use std::process::{Command, Stdio};

/// Opaque verification collaborator invoked after mutations
pub trait TestRunner: Send {
    /// Run the project's test suite; `Ok(false)` and `Err` both mean the
    /// changes must be rolled back
    fn run(&self, project_root: &Path) -> Result<bool>;
}

/// Default runner shelling out to the project's package-manager test script
pub struct CommandTestRunner {
    program: String,
    args: Vec<String>,
}

impl CommandTestRunner {
    /// `npm test` in the project root
    pub fn npm_test() -> Self {
        Self {
            program: "npm".to_string(),
            args: vec!["test".to_string()],
        }
    }
}

impl TestRunner for CommandTestRunner {
    fn run(&self, project_root: &Path) -> Result<bool> {
        let status = Command::new(&self.program)
            .args(&self.args)
            .current_dir(project_root)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| DeadwoodError::Verification {
                message: format!("failed to launch {}: {}", self.program, e),
            })?;

        Ok(status.success())
    }
}
