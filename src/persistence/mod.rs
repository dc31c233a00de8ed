use std::{
    fs,
    path::{
        Path,
        PathBuf,
    },
};

use serde::{
    de::DeserializeOwned,
    Serialize,
};

use crate::core::StudyError;

const APP_NAME: &str = "studyroom";

pub fn get_app_data_dir() -> PathBuf {
    if let Some(data_dir) = dirs::data_local_dir() {
        let app_dir = data_dir.join(APP_NAME);
        let _ = fs::create_dir_all(&app_dir);
        app_dir
    } else {
        PathBuf::from(".")
    }
}

pub fn get_data_file_path(filename: &str) -> PathBuf {
    get_app_data_dir().join(filename)
}

pub fn save_json_to<T: Serialize>(data: &T, file_path: &Path) -> Result<(), StudyError> {
    let json = serde_json::to_string_pretty(data)?;
    fs::write(file_path, json)?;
    log::info!("Data saved to: {}", file_path.display());
    Ok(())
}

pub fn load_json_from<T: DeserializeOwned + Default>(file_path: &Path) -> Result<T, StudyError> {
    if !file_path.exists() {
        return Ok(T::default());
    }

    let json = fs::read_to_string(file_path)?;
    let data: T = serde_json::from_str(&json)?;
    log::info!("Data loaded from: {}", file_path.display());
    Ok(data)
}

pub fn save_json<T: Serialize>(data: &T, filename: &str) -> Result<(), StudyError> {
    save_json_to(data, &get_data_file_path(filename))
}

pub fn load_json_or_default<T: DeserializeOwned + Default>(filename: &str) -> T {
    match load_json_from::<T>(&get_data_file_path(filename)) {
        Ok(data) => data,
        Err(e) => {
            log::warn!("Failed to load {}: {}. Using defaults.", filename, e);
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn scratch_file(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("studyroom-test-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir.join(name)
    }

    #[test]
    fn test_missing_file_yields_default() {
        let path = scratch_file("missing.json");
        let _ = fs::remove_file(&path);
        let data: BTreeMap<String, u32> = load_json_from(&path).unwrap();
        assert!(data.is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let path = scratch_file("saved.json");
        let mut data = BTreeMap::new();
        data.insert("timeout".to_string(), 30u32);
        save_json_to(&data, &path).unwrap();

        let loaded: BTreeMap<String, u32> = load_json_from(&path).unwrap();
        assert_eq!(loaded, data);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let path = scratch_file("corrupt.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            load_json_from::<BTreeMap<String, u32>>(&path),
            Err(StudyError::Json(_))
        ));
        fs::remove_file(&path).unwrap();
    }
}
