//! Plain text file storage implementation.
//!
//! Configurations live as `<configs_dir>/<name>.txt`, reports as
//! `<reports_dir>/<stem>.json`. Directories are created on first write.

use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};
use super::{ConfigRecord, ConfigStore, Result, StorageError};

/// Extension of saved configuration files.
pub const CONFIG_EXTENSION: &str = "txt";

/// File-based configuration storage backend.
#[derive(Debug, Clone)]
pub struct FileStorage {
    configs_dir: PathBuf,
    reports_dir: PathBuf,
}

impl FileStorage {
    /// Create storage rooted at the given directories. Nothing is touched on disk yet.
    pub fn new(configs_dir: impl Into<PathBuf>, reports_dir: impl Into<PathBuf>) -> Self {
        Self {
            configs_dir: configs_dir.into(),
            reports_dir: reports_dir.into(),
        }
    }

    /// Directory holding saved configurations.
    pub fn configs_dir(&self) -> &Path {
        &self.configs_dir
    }

    /// Directory holding generated reports.
    pub fn reports_dir(&self) -> &Path {
        &self.reports_dir
    }
}

/// Normalize a user-supplied name into a path under `dir`.
///
/// The directory prefix is added unless the name already starts with it, and
/// `.txt` is appended unless already present. Absolute names and names with
/// `..` components are rejected. `.` components are ignored when comparing
/// against `dir`.
pub fn normalize(dir: &Path, name: &str) -> Result<PathBuf> {
    let name = name.trim();
    let invalid = || StorageError::InvalidName(name.to_string());
    if name.is_empty() || name.ends_with('/') || name.ends_with('\\') {
        return Err(invalid());
    }

    let mut parts = Vec::new();
    for component in Path::new(name).components() {
        match component {
            Component::Normal(part) => parts.push(Component::Normal(part)),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(invalid());
            }
        }
    }

    let prefix: Vec<Component<'_>> = dir
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    let rest = if !prefix.is_empty() && parts.len() > prefix.len() && parts.starts_with(&prefix) {
        &parts[prefix.len()..]
    } else {
        &parts[..]
    };
    if rest.is_empty() {
        return Err(invalid());
    }

    let mut path = dir.to_path_buf();
    path.extend(rest.iter().map(|c| c.as_os_str()));

    if path.extension().and_then(|e| e.to_str()) != Some(CONFIG_EXTENSION) {
        let mut file_name = path.file_name().map(|f| f.to_os_string()).unwrap_or_default();
        file_name.push(".");
        file_name.push(CONFIG_EXTENSION);
        path.set_file_name(file_name);
    }
    Ok(path)
}

#[async_trait::async_trait]
impl ConfigStore for FileStorage {
    fn resolve(&self, name: &str) -> Result<PathBuf> {
        normalize(&self.configs_dir, name)
    }

    async fn save(&mut self, name: &str, record: &ConfigRecord) -> Result<PathBuf> {
        let path = self.resolve(name)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&path, record.to_string().as_bytes()).await?;

        info!(path = %path.display(), "Saved configuration");
        Ok(path)
    }

    async fn load(&self, name: &str) -> Result<ConfigRecord> {
        let path = self.resolve(name)?;
        let text = match fs::read_to_string(&path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StorageError::NotFound(path));
            }
            Err(e) => return Err(e.into()),
        };

        debug!(path = %path.display(), bytes = text.len(), "Read configuration");
        ConfigRecord::parse(&text)
    }

    async fn list(&self) -> Result<Vec<String>> {
        let mut rd = match fs::read_dir(&self.configs_dir).await {
            Ok(rd) => rd,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        while let Some(entry) = rd.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some(CONFIG_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    async fn save_report(&mut self, stem: &str, report: &serde_json::Value) -> Result<PathBuf> {
        if stem.trim().is_empty() {
            return Err(StorageError::InvalidName(stem.to_string()));
        }
        fs::create_dir_all(&self.reports_dir).await?;
        let path = self.reports_dir.join(format!("{stem}.json"));
        let json = serde_json::to_string_pretty(report)?;
        fs::write(&path, json.as_bytes()).await?;

        info!(path = %path.display(), "Wrote report");
        Ok(path)
    }
}
