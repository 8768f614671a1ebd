use contracts::domain::a030_gallery::CartStore;
use contracts::shared::GalleryError;

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

/// Cart persistence in the browser's localStorage
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageCartStore;

impl CartStore for LocalStorageCartStore {
    fn load(&self, key: &str) -> Option<String> {
        local_storage()?.get_item(key).ok()?
    }

    fn save(&self, key: &str, value: &str) -> Result<(), GalleryError> {
        let storage = local_storage()
            .ok_or_else(|| GalleryError::Transport("localStorage no disponible".to_string()))?;
        storage
            .set_item(key, value)
            .map_err(|e| GalleryError::Transport(format!("Failed to write localStorage: {:?}", e)))
    }
}
