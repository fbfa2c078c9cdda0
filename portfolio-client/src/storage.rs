//! Хранилища ключ-значение для сессии.
//!
//! Интерфейс повторяет браузерный `localStorage`: строковые ключи и значения,
//! синхронные `get_item`/`set_item`/`remove_item`.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// Долговременное хранилище строковых значений по фиксированным ключам.
pub trait KeyValueStore: Send + Sync {
    /// Возвращает значение по ключу, `None` если ключ отсутствует.
    fn get_item(&self, key: &str) -> io::Result<Option<String>>;
    /// Записывает значение, перезаписывая предыдущее.
    fn set_item(&self, key: &str, value: &str) -> io::Result<()>;
    /// Удаляет ключ. Отсутствующий ключ не считается ошибкой.
    fn remove_item(&self, key: &str) -> io::Result<()>;
}

#[derive(Debug, Default)]
/// Хранилище в памяти процесса. Используется в тестах и для одноразовых сессий.
pub struct MemoryStore {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Создаёт пустое хранилище.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> io::Result<Option<String>> {
        let items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> io::Result<()> {
        let mut items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> io::Result<()> {
        let mut items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        items.remove(key);
        Ok(())
    }
}

#[derive(Debug, Clone)]
/// Файловое хранилище: каждый ключ лежит отдельным файлом в каталоге.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Создаёт хранилище поверх каталога. Каталог создаётся при первой записи.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Каталог хранилища.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> io::Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value)
    }

    fn remove_item(&self, key: &str) -> io::Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_dir() -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system clock must be after unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!("portfolio-store-{nanos}"))
    }

    #[test]
    fn memory_store_set_get_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.get_item("k").expect("get"), None);

        store.set_item("k", "v").expect("set");
        assert_eq!(store.get_item("k").expect("get").as_deref(), Some("v"));

        store.remove_item("k").expect("remove");
        assert_eq!(store.get_item("k").expect("get"), None);
    }

    #[test]
    fn file_store_creates_dir_on_write() {
        let dir = temp_dir();
        let store = FileStore::new(&dir);
        assert_eq!(store.get_item("admin_token").expect("get"), None);

        store.set_item("admin_token", "abc").expect("set");
        assert!(dir.join("admin_token").exists());
        assert_eq!(
            store.get_item("admin_token").expect("get").as_deref(),
            Some("abc")
        );

        store.remove_item("admin_token").expect("remove");
        store
            .remove_item("admin_token")
            .expect("removing a missing key is not an error");
        assert_eq!(store.get_item("admin_token").expect("get"), None);

        fs::remove_dir_all(dir).ok();
    }
}
