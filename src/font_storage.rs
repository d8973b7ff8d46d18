use std::{collections::HashMap, path::PathBuf, sync::Arc};

use crate::error::Result;

/// Manages font loading and retrieval using `fontdb` and `fontdue`.
///
/// `fontdb` keeps track of the faces that are available; a face is parsed by
/// `fontdue` the first time it is requested and cached afterwards. The
/// resulting fonts act as glyph metrics providers for layout jobs.
pub struct FontStorage {
    /// Every face known to the storage.
    font_db: fontdb::Database,
    /// Faces parsed so far, a subset of `font_db`.
    loaded_font: HashMap<fontdb::ID, Arc<fontdue::Font>, fxhash::FxBuildHasher>,
}

impl Default for FontStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl FontStorage {
    /// Creates a new empty font storage.
    pub fn new() -> Self {
        Self {
            font_db: fontdb::Database::new(),
            loaded_font: HashMap::with_hasher(fxhash::FxBuildHasher::default()),
        }
    }
}

/// Loading fonts into fontdb and setting up fontdb.
impl FontStorage {
    /// Loads a font from binary data.
    pub fn load_font_binary(&mut self, data: impl Into<Vec<u8>>) {
        self.font_db.load_font_data(data.into());
    }

    /// Loads a font from a file path.
    pub fn load_font_file(&mut self, path: PathBuf) -> Result<()> {
        self.font_db.load_font_file(path)?;
        Ok(())
    }

    /// Loads all fonts from a directory.
    pub fn load_fonts_dir(&mut self, dir: PathBuf) {
        self.font_db.load_fonts_dir(dir)
    }

    /// Loads the system fonts.
    pub fn load_system_fonts(&mut self) {
        self.font_db.load_system_fonts();
    }

    /// Checks if the storage is empty.
    pub fn is_empty(&self) -> bool {
        self.font_db.is_empty()
    }

    /// Returns the number of loaded faces.
    pub fn len(&self) -> usize {
        self.font_db.len()
    }

    /// Sets the family name for the "monospace" generic family.
    pub fn set_monospace_family(&mut self, family: impl Into<String>) {
        self.font_db.set_monospace_family(family);
    }
}

/// Font lookup
impl FontStorage {
    /// Queries for a font matching the description.
    ///
    /// Returns the ID and the loaded font if found.
    pub fn query(&mut self, query: &fontdb::Query) -> Option<(fontdb::ID, Arc<fontdue::Font>)> {
        let id = self.font_db.query(query)?;
        self.font(id).map(|font| (id, font))
    }

    /// Resolves the generic monospace family, the family zone layout is
    /// measured for.
    pub fn monospace_font(&mut self) -> Option<(fontdb::ID, Arc<fontdue::Font>)> {
        self.query(&fontdb::Query {
            families: &[fontdb::Family::Monospace],
            ..fontdb::Query::default()
        })
    }

    /// Returns the parsed font for `id`, parsing and caching it on first use.
    ///
    /// `None` if the id is unknown or the face is not a font `fontdue` accepts.
    pub fn font(&mut self, id: fontdb::ID) -> Option<Arc<fontdue::Font>> {
        if let Some(font) = self.loaded_font.get(&id) {
            return Some(Arc::clone(font));
        }

        let parsed = self.font_db.with_face_data(id, |data, collection_index| {
            let settings = fontdue::FontSettings {
                collection_index,
                ..fontdue::FontSettings::default()
            };
            fontdue::Font::from_bytes(data, settings)
        })?;
        let font = match parsed {
            Ok(font) => Arc::new(font),
            Err(e) => {
                log::error!("Face {:?} is not usable for layout: {}", id, e);
                return None;
            }
        };

        self.loaded_font.insert(id, Arc::clone(&font));
        Some(font)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::LayoutError;

    #[test]
    fn test_empty_storage_has_no_monospace_font() {
        let mut storage = FontStorage::new();
        assert!(storage.is_empty());
        assert_eq!(storage.len(), 0);
        assert!(storage.monospace_font().is_none());
    }

    #[test]
    fn test_garbage_binary_is_not_a_face() {
        let mut storage = FontStorage::new();
        storage.load_font_binary(vec![0u8; 64]);
        assert!(storage.is_empty());
    }

    #[test]
    fn test_missing_font_file_is_io_error() {
        let mut storage = FontStorage::new();
        let err = storage
            .load_font_file(PathBuf::from("/nonexistent/kumihan/font.ttf"))
            .unwrap_err();
        assert!(matches!(err, LayoutError::Io(_)));
    }

    #[test]
    fn test_unknown_id_is_not_cached() {
        let mut storage = FontStorage::new();
        assert!(storage.font(fontdb::ID::dummy()).is_none());
        assert!(storage.loaded_font.is_empty());
    }
}
