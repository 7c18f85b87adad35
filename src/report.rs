use log::info;
use serde::Serialize;
use std::path::Path;

use crate::error::Result;

const OUTPUT_FILE: &str = "output.yaml";

/// Accumulated result of one bulk job action, serialized as a YAML mapping
/// `{count, jobs}`.
///
/// `count` is the size of the filtered candidate set, not the number of items
/// actually listed or mutated. Built once per invocation and emitted at most
/// once.
#[derive(Debug, Serialize)]
pub struct ActionReport<T: Serialize> {
    pub count: usize,
    pub jobs: Vec<T>,
}

impl<T: Serialize> ActionReport<T> {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            jobs: Vec::new(),
        }
    }

    pub fn push(&mut self, item: T) {
        self.jobs.push(item);
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Print the report to stdout, or write it to `<output_folder>/output.yaml`
    /// when `file_output` is set.
    pub fn emit(&self, file_output: bool, output_folder: &Path) -> Result<()> {
        let yaml = self.to_yaml()?;
        if file_output {
            let path = output_folder.join(OUTPUT_FILE);
            std::fs::write(&path, yaml)?;
            info!("Report written to: {}", path.display());
        } else {
            println!("{yaml}");
        }
        Ok(())
    }
}
