//! Artwork record

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;

/// Numeric identity of an artwork. No other field is guaranteed stable.
pub type ArtworkId = u64;

/// An artwork from the collection API.
///
/// Only the fields shown in the table are kept; everything else in the
/// payload is ignored during decoding.
///
/// # Example
///
/// ```
/// use artic_lib::model::Artwork;
///
/// let artwork: Artwork = serde_json::from_str(
///     r#"{"id": 27992, "title": "A Sunday on La Grande Jatte", "artist_display": "Georges Seurat"}"#,
/// ).unwrap();
///
/// assert_eq!(artwork.id, 27992);
/// assert_eq!(artwork.artist(), "Georges Seurat");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artwork {
    /// Unique identifier.
    pub id: ArtworkId,
    /// Display title. Null or absent titles decode as an empty string.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    /// Artist line as shown on the museum label.
    #[serde(default)]
    pub artist_display: Option<String>,
}

impl Artwork {
    /// Creates an artwork with only an id and a title.
    pub fn new(id: ArtworkId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            artist_display: None,
        }
    }

    /// Sets the artist line.
    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist_display = Some(artist.into());
        self
    }

    /// Returns the artist line, or an empty string when unknown.
    pub fn artist(&self) -> &str {
        self.artist_display.as_deref().unwrap_or_default()
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
