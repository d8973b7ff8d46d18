use std::{path::PathBuf, sync::Arc};

use parking_lot::Mutex;

use crate::{
    composer::ZoneComposer,
    error::{LayoutError, Result},
    font_storage::FontStorage,
};

/// High-level entry point: shared font storage plus layout jobs.
///
/// The storage sits behind a `Mutex` so one `FontSystem` can be shared by
/// several threads. Each call to [`FontSystem::composer`] opens an independent
/// job that owns its font handle and its metrics snapshot; jobs never share
/// font-size state.
pub struct FontSystem {
    /// The underlying font storage.
    pub font_storage: Mutex<FontStorage>,
}

impl Default for FontSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FontSystem {
    /// Creates a new font system with default storage.
    pub fn new() -> Self {
        Self {
            font_storage: Mutex::new(FontStorage::new()),
        }
    }
}

/// font storage initialization
impl FontSystem {
    /// Loads the system fonts into the storage.
    pub fn load_system_fonts(&self) {
        self.font_storage.lock().load_system_fonts();
    }

    /// Loads a font from binary data.
    pub fn load_font_binary(&self, data: impl Into<Vec<u8>>) {
        self.font_storage.lock().load_font_binary(data);
    }

    /// Loads a font from a file path.
    pub fn load_font_file(&self, path: PathBuf) -> Result<()> {
        self.font_storage.lock().load_font_file(path)
    }

    /// Loads all fonts from a directory.
    pub fn load_fonts_dir(&self, dir: PathBuf) {
        self.font_storage.lock().load_fonts_dir(dir)
    }

    /// Sets the family name for the "monospace" generic family.
    pub fn set_monospace_family(&self, family: impl Into<String>) {
        self.font_storage.lock().set_monospace_family(family);
    }

    /// Checks if the storage is empty.
    pub fn is_empty(&self) -> bool {
        self.font_storage.lock().is_empty()
    }
}

/// layout jobs
impl FontSystem {
    /// Retrieves a loaded font by ID.
    pub fn font(&self, id: fontdb::ID) -> Option<Arc<fontdue::Font>> {
        self.font_storage.lock().font(id)
    }

    /// Opens a layout job for a canvas `image_width` pixels wide, measured with
    /// the font `font_id`.
    ///
    /// Fails with [`LayoutError::FontUnavailable`] when `font_id` is unknown or
    /// its face cannot be parsed.
    pub fn composer(
        &self,
        font_id: fontdb::ID,
        image_width: i32,
    ) -> Result<ZoneComposer<Arc<fontdue::Font>>> {
        let Some(font) = self.font(font_id) else {
            log::warn!("Composer requested for unknown font (id: {:?}).", font_id);
            return Err(LayoutError::FontUnavailable {
                reason: format!("no usable face with id {font_id:?}"),
            });
        };
        ZoneComposer::new(font, image_width)
    }

    /// Opens a layout job using the generic monospace family, failing with
    /// [`LayoutError::FontUnavailable`] when none is loaded.
    pub fn monospace_composer(&self, image_width: i32) -> Result<ZoneComposer<Arc<fontdue::Font>>> {
        let Some((_, font)) = self.font_storage.lock().monospace_font() else {
            log::warn!("No monospace font loaded.");
            return Err(LayoutError::FontUnavailable {
                reason: "no face matches the monospace family".into(),
            });
        };
        ZoneComposer::new(font, image_width)
    }
}
