//! Record stores for synchronized entities
//!
//! Records are partitioned by platform and entity type and keyed by
//! [`CanonicalEntity::identity_key`], so syncing the same source record twice
//! updates it in place instead of duplicating it.

use crate::config::{StoreConfig, StoreKind};
use crate::domain::{CanonicalEntity, EntityType, HireLinkError, Result};
use async_trait::async_trait;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Counts produced by an upsert
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UpsertOutcome {
    /// Records not seen before
    pub inserted: usize,
    /// Records whose payload changed
    pub updated: usize,
    /// Records identical to the stored copy
    pub unchanged: usize,
}

impl UpsertOutcome {
    /// Total records considered
    pub fn total(&self) -> usize {
        self.inserted + self.updated + self.unchanged
    }
}

/// Storage backend for canonical entities
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert or update records
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot persist the records.
    async fn upsert(&self, records: &[CanonicalEntity]) -> Result<UpsertOutcome>;

    /// Classify records as [`RecordStore::upsert`] would, without writing
    ///
    /// # Errors
    ///
    /// Returns an error if stored records cannot be read.
    async fn preview(&self, records: &[CanonicalEntity]) -> Result<UpsertOutcome>;

    /// All stored records of one platform and entity type, ordered by identity key
    ///
    /// # Errors
    ///
    /// Returns an error if stored records cannot be read.
    async fn list(&self, platform: &str, entity_type: EntityType) -> Result<Vec<CanonicalEntity>>;
}

type PartitionKey = (String, EntityType);
type Partition = BTreeMap<String, CanonicalEntity>;

enum Change {
    Inserted,
    Updated,
    Unchanged,
}

fn classify(partition: &Partition, record: &CanonicalEntity) -> Change {
    match partition.get(&record.identity_key()) {
        None => Change::Inserted,
        Some(existing) if existing.checksum == record.checksum => Change::Unchanged,
        Some(_) => Change::Updated,
    }
}

fn tally(outcome: &mut UpsertOutcome, change: Change) {
    match change {
        Change::Inserted => outcome.inserted += 1,
        Change::Updated => outcome.updated += 1,
        Change::Unchanged => outcome.unchanged += 1,
    }
}

/// Group records by partition, keeping input order within each group
///
/// `name` maps a record's platform to the partition name, so stores that
/// fold several spellings onto one location also fold them onto one group.
fn partitions<'a>(
    records: &'a [CanonicalEntity],
    name: impl Fn(&str) -> String,
) -> BTreeMap<PartitionKey, Vec<&'a CanonicalEntity>> {
    let mut groups: BTreeMap<PartitionKey, Vec<&CanonicalEntity>> = BTreeMap::new();
    for record in records {
        groups
            .entry((name(&record.platform), record.entity_type))
            .or_default()
            .push(record);
    }
    groups
}

fn merge(partition: &mut Partition, records: &[&CanonicalEntity], outcome: &mut UpsertOutcome) {
    for record in records {
        tally(outcome, classify(partition, record));
        partition.insert(record.identity_key(), (*record).clone());
    }
}

fn simulate(partition: &Partition, records: &[&CanonicalEntity], outcome: &mut UpsertOutcome) {
    let mut scratch = Partition::new();
    for record in records {
        let key = record.identity_key();
        let change = match scratch.get(&key) {
            Some(earlier) if earlier.checksum == record.checksum => Change::Unchanged,
            Some(_) => Change::Updated,
            None => classify(partition, record),
        };
        tally(outcome, change);
        scratch.insert(key, (*record).clone());
    }
}

/// In-memory store, discarded with the process
#[derive(Default)]
pub struct MemoryStore {
    partitions: RwLock<HashMap<PartitionKey, Partition>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn upsert(&self, records: &[CanonicalEntity]) -> Result<UpsertOutcome> {
        let mut outcome = UpsertOutcome::default();
        let mut guard = self.partitions.write().await;

        for (key, group) in partitions(records, str::to_string) {
            merge(guard.entry(key).or_default(), &group, &mut outcome);
        }

        Ok(outcome)
    }

    async fn preview(&self, records: &[CanonicalEntity]) -> Result<UpsertOutcome> {
        let mut outcome = UpsertOutcome::default();
        let guard = self.partitions.read().await;
        let empty = Partition::new();

        for (key, group) in partitions(records, str::to_string) {
            simulate(guard.get(&key).unwrap_or(&empty), &group, &mut outcome);
        }

        Ok(outcome)
    }

    async fn list(&self, platform: &str, entity_type: EntityType) -> Result<Vec<CanonicalEntity>> {
        let guard = self.partitions.read().await;
        Ok(guard
            .get(&(platform.to_string(), entity_type))
            .map(|p| p.values().cloned().collect())
            .unwrap_or_default())
    }
}

/// Store that keeps one JSON array per partition at `<root>/<platform>/<entity_type>.json`
///
/// Partitions are read from disk on first use and rewritten in full after
/// each upsert, so dedup holds across process runs. The cache is keyed by
/// the sanitized platform name, the same name that picks the directory, and
/// only takes a partition's new contents once the file rename succeeded.
pub struct JsonFileStore {
    root: PathBuf,
    cache: RwLock<HashMap<PartitionKey, Partition>>,
}

impl JsonFileStore {
    /// Open a store rooted at `root`, creating the directory if needed
    ///
    /// # Errors
    ///
    /// Returns a store error if the directory cannot be created.
    pub async fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&root).await.map_err(|e| {
            HireLinkError::Store(format!(
                "Failed to create store directory {}: {}",
                root.display(),
                e
            ))
        })?;

        tracing::debug!(path = %root.display(), "Opened JSON record store");

        Ok(Self {
            root,
            cache: RwLock::new(HashMap::new()),
        })
    }

    /// Root directory of the store
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn partition_path(&self, platform: &str, entity_type: EntityType) -> PathBuf {
        self.root
            .join(sanitize(platform))
            .join(format!("{}.json", entity_type.as_str()))
    }

    async fn read_partition(&self, platform: &str, entity_type: EntityType) -> Result<Partition> {
        let path = self.partition_path(platform, entity_type);

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Partition::new()),
            Err(e) => {
                return Err(HireLinkError::Store(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        let records: Vec<CanonicalEntity> = serde_json::from_slice(&bytes).map_err(|e| {
            HireLinkError::Store(format!("Corrupt store file {}: {}", path.display(), e))
        })?;

        Ok(records
            .into_iter()
            .map(|r| (r.identity_key(), r))
            .collect())
    }

    async fn write_partition(
        &self,
        platform: &str,
        entity_type: EntityType,
        partition: &Partition,
    ) -> Result<()> {
        let path = self.partition_path(platform, entity_type);
        let store_err = |e: std::io::Error| {
            HireLinkError::Store(format!("Failed to write {}: {}", path.display(), e))
        };

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(store_err)?;
        }

        let records: Vec<&CanonicalEntity> = partition.values().collect();
        let body = serde_json::to_vec_pretty(&records)?;

        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, body).await.map_err(store_err)?;
        tokio::fs::rename(&tmp, &path).await.map_err(store_err)?;

        Ok(())
    }
}

#[async_trait]
impl RecordStore for JsonFileStore {
    async fn upsert(&self, records: &[CanonicalEntity]) -> Result<UpsertOutcome> {
        let mut outcome = UpsertOutcome::default();
        let mut cache = self.cache.write().await;

        for (key, group) in partitions(records, sanitize) {
            let (platform, entity_type) = &key;
            let mut staged = match cache.get(&key) {
                Some(partition) => partition.clone(),
                None => self.read_partition(platform, *entity_type).await?,
            };

            merge(&mut staged, &group, &mut outcome);
            self.write_partition(platform, *entity_type, &staged).await?;
            cache.insert(key, staged);
        }

        Ok(outcome)
    }

    async fn preview(&self, records: &[CanonicalEntity]) -> Result<UpsertOutcome> {
        let mut outcome = UpsertOutcome::default();
        let cache = self.cache.read().await;

        for (key, group) in partitions(records, sanitize) {
            match cache.get(&key) {
                Some(partition) => simulate(partition, &group, &mut outcome),
                None => {
                    let partition = self.read_partition(&key.0, key.1).await?;
                    simulate(&partition, &group, &mut outcome);
                }
            }
        }

        Ok(outcome)
    }

    async fn list(&self, platform: &str, entity_type: EntityType) -> Result<Vec<CanonicalEntity>> {
        let name = sanitize(platform);
        if let Some(partition) = self.cache.read().await.get(&(name.clone(), entity_type)) {
            return Ok(partition.values().cloned().collect());
        }

        let partition = self.read_partition(&name, entity_type).await?;
        Ok(partition.into_values().collect())
    }
}

/// Directory-safe form of a platform name
fn sanitize(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.is_empty() {
        "_".to_string()
    } else {
        cleaned
    }
}

/// Create the record store selected by configuration
///
/// # Errors
///
/// Returns an error if the JSON store directory cannot be created.
pub async fn create_store(config: &StoreConfig) -> Result<Arc<dyn RecordStore>> {
    match config.kind {
        StoreKind::Memory => {
            tracing::info!("Using in-memory record store");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreKind::Json => {
            tracing::info!(path = %config.path, "Using JSON file record store");
            Ok(Arc::new(JsonFileStore::open(&config.path).await?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn job(id: &str, title: &str) -> CanonicalEntity {
        CanonicalEntity::new(
            "greenhouse",
            EntityType::Jobs,
            Some(id.to_string()),
            json!({"id": id, "title": title}),
        )
    }

    #[tokio::test]
    async fn test_memory_store_dedups_by_source_id() {
        let store = MemoryStore::new();

        let first = store.upsert(&[job("1", "Engineer"), job("2", "Designer")]).await.unwrap();
        assert_eq!(first, UpsertOutcome { inserted: 2, updated: 0, unchanged: 0 });

        let second = store
            .upsert(&[job("1", "Engineer"), job("2", "Senior Designer")])
            .await
            .unwrap();
        assert_eq!(second, UpsertOutcome { inserted: 0, updated: 1, unchanged: 1 });

        let stored = store.list("greenhouse", EntityType::Jobs).await.unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[1].data["title"], "Senior Designer");
    }

    #[tokio::test]
    async fn test_records_without_id_keyed_by_checksum() {
        let store = MemoryStore::new();
        let anon = CanonicalEntity::new("bamboohr", EntityType::Jobs, None, json!({"title": "X"}));

        let outcome = store.upsert(&[anon.clone(), anon]).await.unwrap();
        assert_eq!(outcome, UpsertOutcome { inserted: 1, updated: 0, unchanged: 1 });
        assert_eq!(store.list("bamboohr", EntityType::Jobs).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_partitions_are_separate() {
        let store = MemoryStore::new();
        let candidate = CanonicalEntity::new(
            "greenhouse",
            EntityType::Candidates,
            Some("1".to_string()),
            json!({"id": "1"}),
        );

        let outcome = store.upsert(&[job("1", "Engineer"), candidate]).await.unwrap();
        assert_eq!(outcome.inserted, 2);
    }

    #[tokio::test]
    async fn test_preview_does_not_write() {
        let store = MemoryStore::new();
        store.upsert(&[job("1", "Engineer")]).await.unwrap();

        let outcome = store
            .preview(&[job("1", "Engineer"), job("2", "Designer"), job("2", "Designer")])
            .await
            .unwrap();

        assert_eq!(outcome, UpsertOutcome { inserted: 1, updated: 0, unchanged: 2 });
        assert_eq!(store.list("greenhouse", EntityType::Jobs).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_json_store_persists_across_instances() {
        let dir = TempDir::new().unwrap();

        {
            let store = JsonFileStore::open(dir.path()).await.unwrap();
            store.upsert(&[job("1", "Engineer")]).await.unwrap();
        }

        assert!(dir.path().join("greenhouse").join("jobs.json").exists());

        let reopened = JsonFileStore::open(dir.path()).await.unwrap();
        let outcome = reopened.upsert(&[job("1", "Engineer")]).await.unwrap();
        assert_eq!(outcome.unchanged, 1);

        let stored = reopened.list("greenhouse", EntityType::Jobs).await.unwrap();
        assert_eq!(stored, vec![job("1", "Engineer")]);
    }

    #[tokio::test]
    async fn test_json_store_rejects_corrupt_file() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("greenhouse")).unwrap();
        std::fs::write(dir.path().join("greenhouse").join("jobs.json"), "not json").unwrap();

        let store = JsonFileStore::open(dir.path()).await.unwrap();
        let err = store.list("greenhouse", EntityType::Jobs).await.unwrap_err();
        assert!(matches!(err, HireLinkError::Store(_)));
    }

    #[tokio::test]
    async fn test_json_store_failed_write_leaves_cache_unchanged() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::open(dir.path()).await.unwrap();

        // A directory where the temp file should go makes the write fail
        let blocker = dir.path().join("greenhouse").join("jobs.json.tmp");
        std::fs::create_dir_all(&blocker).unwrap();

        let err = store.upsert(&[job("1", "Engineer")]).await.unwrap_err();
        assert!(matches!(err, HireLinkError::Store(_)));
        assert!(store.list("greenhouse", EntityType::Jobs).await.unwrap().is_empty());
        assert!(!dir.path().join("greenhouse").join("jobs.json").exists());

        std::fs::remove_dir(&blocker).unwrap();
        let outcome = store.upsert(&[job("1", "Engineer")]).await.unwrap();
        assert_eq!(outcome, UpsertOutcome { inserted: 1, updated: 0, unchanged: 0 });
    }

    #[tokio::test]
    async fn test_json_store_folds_platform_spellings() {
        let dir = TempDir::new().unwrap();
        let spelled = |platform: &str, id: &str| {
            CanonicalEntity::new(
                platform,
                EntityType::Jobs,
                Some(id.to_string()),
                json!({"id": id}),
            )
        };

        let store = JsonFileStore::open(dir.path()).await.unwrap();
        store.upsert(&[spelled("Lever", "1")]).await.unwrap();
        let outcome = store.upsert(&[spelled("lever", "2")]).await.unwrap();
        assert_eq!(outcome.inserted, 1);

        assert_eq!(store.list("lever", EntityType::Jobs).await.unwrap().len(), 2);
        assert_eq!(store.list("LEVER", EntityType::Jobs).await.unwrap().len(), 2);

        let reopened = JsonFileStore::open(dir.path()).await.unwrap();
        assert_eq!(reopened.list("Lever", EntityType::Jobs).await.unwrap().len(), 2);
    }

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize("sap-successfactors"), "sap-successfactors");
        assert_eq!(sanitize("../Evil Co"), "___evil_co");
        assert_eq!(sanitize(""), "_");
    }
}
