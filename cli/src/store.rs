// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! YAML-file pattern storage for the CLI.
//!
//! The whole file is loaded into an [`InMemoryPatternRepository`] on open and
//! rewritten on every update. A failed write leaves both the file and the
//! loaded patterns unchanged. JSON files load too, since JSON is valid YAML.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use reflex_cortex::{
    InMemoryPatternRepository, Pattern, PatternFilter, PatternId, PatternRepository, RepositoryError,
};
use tokio::sync::Mutex;

fn yaml_error(err: serde_yaml::Error) -> RepositoryError {
    RepositoryError::Serialization {
        message: err.to_string(),
    }
}

fn io_error(path: &Path, err: std::io::Error) -> RepositoryError {
    RepositoryError::database(format!("{}: {}", path.display(), err))
}

/// Parse a pattern file. The flag reports whether any entry lacked an `id`
/// and was given a generated one.
fn parse_patterns(content: &str) -> Result<(Vec<Pattern>, bool), RepositoryError> {
    if content.trim().is_empty() {
        return Ok((Vec::new(), false));
    }

    let entries: Vec<serde_yaml::Value> = serde_yaml::from_str(content).map_err(yaml_error)?;
    let mut generated_ids = false;
    let mut patterns = Vec::with_capacity(entries.len());
    for entry in entries {
        if entry.get("id").map_or(true, serde_yaml::Value::is_null) {
            generated_ids = true;
        }
        patterns.push(serde_yaml::from_value(entry).map_err(yaml_error)?);
    }
    Ok((patterns, generated_ids))
}

pub struct YamlPatternRepository {
    path: PathBuf,
    inner: InMemoryPatternRepository,
    /// Serializes file rewrites so updates land on disk in order.
    write_lock: Mutex<()>,
}

impl YamlPatternRepository {
    /// Load patterns from `path`. A missing file opens as an empty store.
    ///
    /// Entries without an `id` get a generated one, and the file is rewritten
    /// so the same ids come back on the next load.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, RepositoryError> {
        let path = path.into();
        let inner = InMemoryPatternRepository::new();

        let generated_ids = match tokio::fs::read_to_string(&path).await {
            Ok(content) => {
                let (patterns, generated_ids) = parse_patterns(&content)?;
                for pattern in patterns {
                    inner.insert(pattern)?;
                }
                generated_ids
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("Pattern file {:?} does not exist yet, starting empty", path);
                false
            }
            Err(e) => return Err(io_error(&path, e)),
        };

        tracing::debug!(patterns = inner.len(), "Loaded pattern file {:?}", path);
        let repo = Self {
            path,
            inner,
            write_lock: Mutex::new(()),
        };

        if generated_ids {
            tracing::info!("Assigned ids to patterns in {:?}", repo.path);
            repo.save().await?;
        }
        Ok(repo)
    }

    /// Write every pattern back to the file.
    pub async fn save(&self) -> Result<(), RepositoryError> {
        let _guard = self.write_lock.lock().await;
        self.write_file(&self.inner.snapshot()?).await
    }

    /// Goes through a sibling temp file so a failed write never truncates the
    /// original.
    async fn write_file(&self, patterns: &[Pattern]) -> Result<(), RepositoryError> {
        let yaml = serde_yaml::to_string(patterns).map_err(yaml_error)?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        tokio::fs::write(&tmp, yaml)
            .await
            .map_err(|e| io_error(&tmp, e))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| io_error(&self.path, e))?;
        Ok(())
    }
}

#[async_trait]
impl PatternRepository for YamlPatternRepository {
    async fn list_patterns(&self, filter: &PatternFilter) -> Result<Vec<Pattern>, RepositoryError> {
        self.inner.list_patterns(filter).await
    }

    async fn get_pattern(&self, id: &PatternId) -> Result<Pattern, RepositoryError> {
        self.inner.get_pattern(id).await
    }

    /// The file is written first; memory only changes once the write succeeded.
    async fn update_pattern(&self, pattern: &Pattern) -> Result<(), RepositoryError> {
        let _guard = self.write_lock.lock().await;

        let mut patterns = self.inner.snapshot()?;
        let existing = patterns
            .iter_mut()
            .find(|p| p.id == pattern.id)
            .ok_or_else(|| RepositoryError::not_found(&pattern.id))?;
        *existing = pattern.clone();

        self.write_file(&patterns).await?;
        self.inner.update_pattern(pattern).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
- id: "1"
  trigger: docker ps
  response: list running containers
  strength: 70
  tags: [docker]
- id: "2"
  trigger: git status
  response: show working tree status
"#;

    #[tokio::test]
    async fn test_open_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let repo = YamlPatternRepository::open(dir.path().join("none.yaml")).await.unwrap();

        assert!(repo.list_patterns(&PatternFilter::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_rewrites_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("patterns.yaml");
        std::fs::write(&path, SAMPLE).unwrap();

        let repo = YamlPatternRepository::open(&path).await.unwrap();
        let mut pattern = repo.get_pattern(&PatternId::from("1")).await.unwrap();
        assert_eq!(pattern.strength, 70.0);
        assert!(pattern.has_tag("docker"));

        pattern.strength = 75.0;
        repo.update_pattern(&pattern).await.unwrap();

        let reopened = YamlPatternRepository::open(&path).await.unwrap();
        let stored = reopened.get_pattern(&PatternId::from("1")).await.unwrap();
        assert_eq!(stored.strength, 75.0);
        assert_eq!(reopened.list_patterns(&PatternFilter::default()).await.unwrap().len(), 2);
        assert!(!dir.path().join("patterns.yaml.tmp").exists());
    }

    #[tokio::test]
    async fn test_json_file_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("patterns.json");
        std::fs::write(&path, r#"[{"id": "j", "trigger": "npm test"}]"#).unwrap();

        let repo = YamlPatternRepository::open(&path).await.unwrap();
        assert_eq!(repo.get_pattern(&PatternId::from("j")).await.unwrap().trigger, "npm test");
    }

    #[tokio::test]
    async fn test_malformed_file_is_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.yaml");
        std::fs::write(&path, "- trigger: [unclosed").unwrap();

        let err = YamlPatternRepository::open(&path).await.err().unwrap();
        assert!(matches!(err, RepositoryError::Serialization { .. }));
    }

    #[tokio::test]
    async fn test_failed_write_keeps_previous_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("patterns.yaml");
        std::fs::write(&path, SAMPLE).unwrap();
        let repo = YamlPatternRepository::open(&path).await.unwrap();

        // A directory in the temp file's place makes the write fail.
        std::fs::create_dir(dir.path().join("patterns.yaml.tmp")).unwrap();

        let mut pattern = repo.get_pattern(&PatternId::from("1")).await.unwrap();
        pattern.strength = 10.0;
        let err = repo.update_pattern(&pattern).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Database { .. }));

        let stored = repo.get_pattern(&PatternId::from("1")).await.unwrap();
        assert_eq!(stored.strength, 70.0);
        let on_disk = YamlPatternRepository::open(&path).await.unwrap();
        assert_eq!(on_disk.get_pattern(&PatternId::from("1")).await.unwrap().strength, 70.0);
    }

    #[tokio::test]
    async fn test_update_unknown_id_leaves_file_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("patterns.yaml");
        std::fs::write(&path, SAMPLE).unwrap();
        let repo = YamlPatternRepository::open(&path).await.unwrap();

        let err = repo.update_pattern(&Pattern::new("x", "").with_id("ghost")).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound { .. }));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), SAMPLE);
    }

    #[tokio::test]
    async fn test_generated_ids_survive_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("patterns.yaml");
        std::fs::write(&path, "- trigger: cargo build\n- trigger: cargo test\n  id: fixed\n").unwrap();

        let ids = |patterns: Vec<Pattern>| patterns.into_iter().map(|p| p.id).collect::<Vec<_>>();
        let first = YamlPatternRepository::open(&path).await.unwrap();
        let first_ids = ids(first.list_patterns(&PatternFilter::default()).await.unwrap());
        let second = YamlPatternRepository::open(&path).await.unwrap();
        let second_ids = ids(second.list_patterns(&PatternFilter::default()).await.unwrap());

        assert_eq!(first_ids.len(), 2);
        assert_eq!(first_ids, second_ids);
        assert_eq!(first_ids[1].as_str(), "fixed");
        assert!(second.get_pattern(&first_ids[0]).await.is_ok());
    }

    #[tokio::test]
    async fn test_file_with_ids_is_not_rewritten_on_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("patterns.yaml");
        std::fs::write(&path, SAMPLE).unwrap();

        YamlPatternRepository::open(&path).await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), SAMPLE);
    }
}
