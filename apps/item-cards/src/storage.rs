//! Dated JSON artifact holding the exported card list between the export
//! and render steps.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::models::card::ItemCardRecord;

const ARTIFACT_PREFIX: &str = "item_cards_";
const JSON_INDENT: &[u8] = b"    ";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid card file {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("JSON encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// `item_cards_YYYY-MM-DD.json`
pub fn artifact_file_name(date: NaiveDate) -> String {
    format!("{ARTIFACT_PREFIX}{}.json", date.format("%Y-%m-%d"))
}

/// Path of the rendered document for an artifact: same stem, `.html` extension.
pub fn rendered_path(artifact: &Path) -> PathBuf {
    artifact.with_extension("html")
}

/// Encodes cards as a pretty-printed JSON array with four-space indentation.
pub fn encode_cards(cards: &[ItemCardRecord]) -> Result<Vec<u8>, StorageError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(JSON_INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    cards.serialize(&mut serializer)?;
    Ok(buf)
}

/// Writes the artifact for `date` into `dir` and returns its path.
pub async fn save_cards(
    dir: &Path,
    date: NaiveDate,
    cards: &[ItemCardRecord],
) -> Result<PathBuf, StorageError> {
    let path = dir.join(artifact_file_name(date));
    let bytes = encode_cards(cards)?;

    tokio::fs::write(&path, bytes)
        .await
        .map_err(|source| StorageError::Io {
            path: path.display().to_string(),
            source,
        })?;

    info!("{} item cards saved in {}", cards.len(), path.display());
    Ok(path)
}

/// Reads an artifact. Unknown fields (such as a stale cached size) are ignored.
pub async fn load_cards(path: &Path) -> Result<Vec<ItemCardRecord>, StorageError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| StorageError::Io {
            path: path.display().to_string(),
            source,
        })?;

    serde_json::from_slice(&bytes).map_err(|source| StorageError::Decode {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_card(number: &str) -> ItemCardRecord {
        ItemCardRecord {
            number: number.to_string(),
            name: "Driftglobe".to_string(),
            attunement: None,
            item_type: Some("Wondrous item".to_string()),
            rarity: Some("Uncommon".to_string()),
            description: Some("This small sphere...\n\nLight.".to_string()),
        }
    }

    #[test]
    fn test_artifact_file_name() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(artifact_file_name(date), "item_cards_2026-03-07.json");
    }

    #[test]
    fn test_rendered_path_replaces_extension() {
        assert_eq!(
            rendered_path(Path::new("out/item_cards_2026-03-07.json")),
            PathBuf::from("out/item_cards_2026-03-07.html")
        );
        assert_eq!(rendered_path(Path::new("cards")), PathBuf::from("cards.html"));
    }

    #[test]
    fn test_encode_uses_four_space_indent() {
        let text = String::from_utf8(encode_cards(&[make_card("000001")]).unwrap()).unwrap();
        assert!(text.starts_with("[\n    {\n        \"number\": \"000001\""));
        assert!(text.contains("\"attunement\": null"));
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let cards = vec![make_card("000001"), make_card("000002")];

        let path = save_cards(dir.path(), date, &cards).await.unwrap();
        assert_eq!(path.file_name().unwrap(), "item_cards_2026-10-18.json");

        let loaded = load_cards(&path).await.unwrap();
        assert_eq!(loaded, cards);
    }

    #[tokio::test]
    async fn test_load_ignores_cached_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cards.json");
        tokio::fs::write(
            &path,
            r#"[{"number":"000009","name":"Torch","attunement":null,"type":null,"rarity":null,"description":"Burns.","cardSize":2}]"#,
        )
        .await
        .unwrap();

        let loaded = load_cards(&path).await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].description.as_deref(), Some("Burns."));
    }

    #[tokio::test]
    async fn test_load_reports_decode_and_io_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        tokio::fs::write(&path, r#"[{"number":"1","name":"X","description":7}]"#)
            .await
            .unwrap();
        assert!(matches!(
            load_cards(&path).await,
            Err(StorageError::Decode { .. })
        ));
        assert!(matches!(
            load_cards(&dir.path().join("missing.json")).await,
            Err(StorageError::Io { .. })
        ));
    }
}
