//! Plans as JSON files in a directory.

use super::{BoxFuture, Storage, StorageError, StorageResult};
use crate::canvas::FloorPlan;
use std::fs;
use std::path::{Path, PathBuf};

/// One `<name>.json` file per plan under a base directory.
pub struct FileStorage {
    base_path: PathBuf,
}

fn io_error(action: &str, path: &Path, e: std::io::Error) -> StorageError {
    StorageError::Io(format!("Failed to {action} {}: {e}", path.display()))
}

/// Map a plan name onto a file stem. Path separators and other punctuation
/// become `_` so a name can never leave the base directory.
fn file_stem(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_alphanumeric() || matches!(c, '-' | '_') { c } else { '_' })
        .collect()
}

impl FileStorage {
    /// Open a plan directory, creating it when missing.
    pub fn new(base_path: PathBuf) -> StorageResult<Self> {
        fs::create_dir_all(&base_path).map_err(|e| io_error("create", &base_path, e))?;
        log::debug!("Plan directory {}", base_path.display());
        Ok(Self { base_path })
    }

    /// The per-user plan directory, e.g. `~/.local/share/seatplan/plans/` on Linux.
    pub fn default_location() -> StorageResult<Self> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| StorageError::Io("Could not determine a data directory".to_string()))?;
        Self::new(base.join("seatplan").join("plans"))
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn plan_path(&self, name: &str) -> PathBuf {
        self.base_path.join(format!("{}.json", file_stem(name)))
    }
}

impl Storage for FileStorage {
    fn save(&self, id: &str, plan: &FloorPlan) -> BoxFuture<'_, StorageResult<()>> {
        let path = self.plan_path(id);
        let json = plan.to_json();
        Box::pin(async move {
            let json = json.map_err(|e| StorageError::Serialization(e.to_string()))?;
            fs::write(&path, json).map_err(|e| io_error("write", &path, e))
        })
    }

    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<FloorPlan>> {
        let path = self.plan_path(id);
        let id = id.to_string();
        Box::pin(async move {
            let json = match fs::read_to_string(&path) {
                Ok(json) => json,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(StorageError::NotFound(id)),
                Err(e) => return Err(io_error("read", &path, e)),
            };
            FloorPlan::from_json(&json)
                .map_err(|e| StorageError::Serialization(format!("{}: {e}", path.display())))
        })
    }

    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let path = self.plan_path(id);
        Box::pin(async move { Ok(path.is_file()) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;
    use pollster::block_on;
    use tempfile::tempdir;

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        let mut plan = FloorPlan::with_name("Ballroom");
        plan.add_seat(Point::new(50.0, 75.0)).unwrap();

        assert!(!block_on(storage.exists("ballroom")).unwrap());
        block_on(storage.save("ballroom", &plan)).unwrap();
        assert!(block_on(storage.exists("ballroom")).unwrap());
        assert_eq!(block_on(storage.load("ballroom")).unwrap(), plan);
    }

    #[test]
    fn test_creates_nested_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let storage = FileStorage::new(nested.clone()).unwrap();
        assert!(nested.is_dir());
        assert_eq!(storage.base_path(), nested.as_path());
    }

    #[test]
    fn test_missing_plan() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        let result = block_on(storage.load("nonexistent"));
        assert!(matches!(result, Err(StorageError::NotFound(name)) if name == "nonexistent"));
    }

    #[test]
    fn test_corrupt_file() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        fs::write(dir.path().join("broken.json"), "{ not json").unwrap();
        let result = block_on(storage.load("broken"));
        assert!(matches!(result, Err(StorageError::Serialization(_))));
    }

    #[test]
    fn test_exhausted_seat_ids_fail_to_load() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        let mut plan = FloorPlan::new();
        plan.add_seat(Point::ZERO).unwrap();
        let mut json: serde_json::Value = serde_json::from_str(&plan.to_json().unwrap()).unwrap();
        json["seats"][0]["id"] = serde_json::json!(u64::MAX);
        fs::write(dir.path().join("full.json"), json.to_string()).unwrap();

        let result = block_on(storage.load("full"));
        assert!(matches!(result, Err(StorageError::Serialization(_))));
    }

    #[test]
    fn test_names_stay_inside_directory() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        let plan = FloorPlan::new();
        block_on(storage.save("../hall/b:upper*", &plan)).unwrap();
        assert!(dir.path().join("___hall_b_upper_.json").exists());
        let loaded = block_on(storage.load("../hall/b:upper*")).unwrap();
        assert_eq!(loaded.id, plan.id);
    }
}
