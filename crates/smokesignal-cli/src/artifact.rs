//! Artifact store reading zksolc build output from disk

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use smokesignal_core::{ArtifactStore, ContractArtifact, Error, Result};

/// Artifact store that reads from the compiler output directory
///
/// Artifacts are laid out as `<artifacts_dir>/<source path>/<Contract>.json`,
/// so lookups walk the directory tree for a matching file name.
#[derive(Debug, Clone)]
pub struct FileSystemArtifactStore {
    /// Directory containing compiled artifacts (typically "artifacts-zk")
    artifacts_dir: PathBuf,
}

impl FileSystemArtifactStore {
    pub fn new(artifacts_dir: impl Into<PathBuf>) -> Self {
        Self {
            artifacts_dir: artifacts_dir.into(),
        }
    }

    /// Find the artifact file for a contract, searching subdirectories
    fn find_artifact(&self, contract_name: &str) -> Option<PathBuf> {
        let file_name = format!("{}.json", contract_name);
        Self::find_in_dir(&self.artifacts_dir, &file_name)
    }

    fn find_in_dir(dir: &Path, file_name: &str) -> Option<PathBuf> {
        let candidate = dir.join(file_name);
        if candidate.is_file() {
            return Some(candidate);
        }

        let mut subdirs: Vec<PathBuf> = std::fs::read_dir(dir)
            .ok()?
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .filter(|path| {
                // Skip build-info and other special directories
                path.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| !n.starts_with('.') && n != "build-info")
            })
            .collect();
        subdirs.sort();

        subdirs
            .iter()
            .find_map(|subdir| Self::find_in_dir(subdir, file_name))
    }

    fn read_artifact(&self, contract_name: &str) -> Result<ContractArtifact> {
        let path = self
            .find_artifact(contract_name)
            .ok_or_else(|| Error::ArtifactNotFound(contract_name.to_string()))?;

        tracing::debug!(path = %path.display(), "Reading artifact");

        let content = std::fs::read_to_string(&path).map_err(|e| {
            Error::InvalidArtifact(format!("Could not read {}: {}", path.display(), e))
        })?;

        ContractArtifact::from_json(contract_name, &content)
    }

    /// Load an artifact and the bytecode of everything it can deploy
    fn load_with_dependencies(
        &self,
        contract_name: &str,
        visited: &mut BTreeSet<String>,
    ) -> Result<ContractArtifact> {
        let mut artifact = self.read_artifact(contract_name)?;

        let mut dependencies = Vec::new();
        for name in artifact.dependency_names() {
            if !visited.insert(name.clone()) {
                continue;
            }
            let dependency = self.load_with_dependencies(&name, visited).map_err(|e| {
                Error::InvalidArtifact(format!(
                    "Factory dependency {} of {}: {}",
                    name, contract_name, e
                ))
            })?;
            dependencies.extend(dependency.dependencies);
            dependencies.push(dependency.bytecode);
        }

        artifact.dependencies = dependencies;
        Ok(artifact)
    }
}

impl ArtifactStore for FileSystemArtifactStore {
    fn load_artifact(&self, contract_name: &str) -> Result<ContractArtifact> {
        let mut visited = BTreeSet::from([contract_name.to_string()]);
        self.load_with_dependencies(contract_name, &mut visited)
    }
}
