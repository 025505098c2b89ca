use std::path::Path;
use std::sync::Arc;

use crate::config::ShortsConfig;

/// Font bytes selected for text rendering.
#[derive(Clone)]
pub struct FontFace {
    /// Raw font file bytes (TTF/OTF/TTC).
    pub bytes: Arc<Vec<u8>>,
    /// Face index inside a collection file.
    pub index: u32,
    /// Where the face came from, for diagnostics.
    pub origin: String,
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("bytes_len", &self.bytes.len())
            .field("index", &self.index)
            .field("origin", &self.origin)
            .finish()
    }
}

/// Resolved font for the whole pipeline. Empty when no font could be found at all, in which case
/// cards render without glyphs instead of failing.
#[derive(Clone, Debug, Default)]
pub struct FontLibrary {
    face: Option<FontFace>,
}

const PREFERRED_FAMILIES: &[&str] = &["Arial", "Liberation Sans", "DejaVu Sans", "Helvetica"];

impl FontLibrary {
    /// Resolve the configured font, falling back to a system sans-serif face.
    pub fn load(cfg: &ShortsConfig) -> Self {
        if let Some(path) = cfg.font_path.as_deref() {
            match read_font_file(path) {
                Some(face) => return Self { face: Some(face) },
                None => tracing::warn!(
                    path = %path.display(),
                    "preferred font unavailable, falling back to a system font"
                ),
            }
        }
        let face = system_fallback();
        if face.is_none() {
            tracing::warn!("no usable system font found; text cards will render without glyphs");
        }
        Self { face }
    }

    /// Library without any font (cards render background and layout only).
    pub fn empty() -> Self {
        Self { face: None }
    }

    /// Library holding exactly `face`.
    pub fn from_face(face: FontFace) -> Self {
        Self { face: Some(face) }
    }

    /// Resolved face, if any.
    pub fn face(&self) -> Option<&FontFace> {
        self.face.as_ref()
    }
}

fn read_font_file(path: &Path) -> Option<FontFace> {
    let bytes = std::fs::read(path).ok()?;
    // Cheap sanity check so an arbitrary file does not reach the shaper.
    let mut db = usvg::fontdb::Database::new();
    db.load_font_data(bytes.clone());
    db.faces().next()?;
    Some(FontFace {
        bytes: Arc::new(bytes),
        index: 0,
        origin: path.display().to_string(),
    })
}

fn system_fallback() -> Option<FontFace> {
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();

    let mut families: Vec<usvg::fontdb::Family<'_>> = PREFERRED_FAMILIES
        .iter()
        .copied()
        .map(usvg::fontdb::Family::Name)
        .collect();
    families.push(usvg::fontdb::Family::SansSerif);
    let query = usvg::fontdb::Query {
        families: &families,
        ..usvg::fontdb::Query::default()
    };

    let id = db
        .query(&query)
        .or_else(|| db.faces().next().map(|f| f.id))?;
    let origin = db
        .face(id)
        .map(|f| {
            f.families
                .first()
                .map(|(name, _)| name.clone())
                .unwrap_or_default()
        })
        .unwrap_or_default();
    db.with_face_data(id, |data, index| FontFace {
        bytes: Arc::new(data.to_vec()),
        index,
        origin: format!("system:{origin}"),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/text/fonts.rs"]
mod tests;
