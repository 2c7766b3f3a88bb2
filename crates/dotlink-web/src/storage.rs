use dotlink_engine::LevelStore;

/// localStorage key holding the level to resume at.
pub const LEVEL_KEY: &str = "currentLevel";

/// Level persistence backed by the browser's `localStorage`. Storage that is
/// unavailable (private mode, no window) behaves as an empty store.
#[derive(Debug, Clone)]
pub struct LocalStorageStore {
    key: String,
}

impl LocalStorageStore {
    pub fn new() -> Self {
        Self::with_key(LEVEL_KEY)
    }

    pub fn with_key(key: &str) -> Self {
        Self { key: key.to_string() }
    }
}

impl Default for LocalStorageStore {
    fn default() -> Self {
        Self::new()
    }
}

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

impl LevelStore for LocalStorageStore {
    fn get(&self) -> Option<u32> {
        let raw = local_storage()?.get_item(&self.key).ok()??;
        match raw.trim().parse() {
            Ok(level) => Some(level),
            Err(_) => {
                log::warn!("ignoring stored level {:?}", raw);
                None
            }
        }
    }

    fn set(&mut self, level: u32) {
        let Some(storage) = local_storage() else {
            log::warn!("localStorage unavailable, level {} not saved", level);
            return;
        };
        if storage.set_item(&self.key, &level.to_string()).is_err() {
            log::warn!("could not save level {}", level);
        }
    }

    fn clear(&mut self) {
        if let Some(storage) = local_storage() {
            if storage.remove_item(&self.key).is_err() {
                log::warn!("could not clear saved level");
            }
        }
    }
}
