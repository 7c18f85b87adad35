use std::path::PathBuf;

use crate::error::Result;

const USERNAME_VAR: &str = "JENKINS_USERNAME";
const PASSWORD_VAR: &str = "JENKINS_PASSWORD";
const OUTPUT_FOLDER_VAR: &str = "OUTPUT_FOLDER";
const DEFAULT_OUTPUT_FOLDER: &str = "out";

/// Jenkins credentials resolved from the environment.
///
/// Both values are optional; when the username is absent the connection is
/// attempted anonymously and the server decides what that is allowed to do.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Credentials {
    pub fn from_env() -> Self {
        Self {
            username: std::env::var(USERNAME_VAR).ok(),
            password: std::env::var(PASSWORD_VAR).ok(),
        }
    }
}

/// Process-wide settings, resolved once at startup and threaded through.
#[derive(Debug, Clone)]
pub struct Settings {
    pub credentials: Credentials,
    /// Base directory for report and backup files.
    pub output_folder: PathBuf,
}

impl Settings {
    pub fn from_env() -> Self {
        let output_folder = std::env::var(OUTPUT_FOLDER_VAR)
            .unwrap_or_else(|_| DEFAULT_OUTPUT_FOLDER.to_string());
        Self {
            credentials: Credentials::from_env(),
            output_folder: PathBuf::from(output_folder),
        }
    }

    /// Create the output folder if it does not exist yet.
    pub fn ensure_output_folder(&self) -> Result<()> {
        if !self.output_folder.exists() {
            std::fs::create_dir_all(&self.output_folder)?;
        }
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            credentials: Credentials::default(),
            output_folder: PathBuf::from(DEFAULT_OUTPUT_FOLDER),
        }
    }
}
