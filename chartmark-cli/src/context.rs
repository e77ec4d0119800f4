use chartmark::ChartmarkError;
use chartmark::config::ConfigLoader;
use chartmark::prelude::*;
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct ChartmarkCliContext {
    pub config: ChartmarkConfig,
    pub highlighter: Highlighter,
}

impl ChartmarkCliContext {
    /// Layer defaults, default config files, an explicit file and
    /// `CHARTMARK_` environment variables.
    pub fn new(config_path: Option<PathBuf>) -> chartmark::Result<Self> {
        let mut loader = ConfigLoader::new();
        loader.load_default_files();
        if let Some(path) = &config_path {
            loader.load_file(path)?;
        }
        let config = loader.load_env().extract()?;
        debug!(strategy = %config.segmentation.strategy, "loaded configuration");

        Ok(Self::from_config(config))
    }

    pub fn from_config(config: ChartmarkConfig) -> Self {
        let highlighter = Highlighter::new(config.segmentation.clone());
        Self { config, highlighter }
    }
}

/// Read a chart text and its entity document concurrently.
pub async fn load_document(text_path: &Path, entities_path: &Path) -> chartmark::Result<(String, EntityDocument)> {
    let (text, json) = tokio::try_join!(read_input(text_path), read_input(entities_path))?;
    let document = EntityDocument::from_json(&json)?;
    debug!(
        chars = text.chars().count(),
        entities = document.entities.len(),
        "loaded document"
    );
    Ok((text, document))
}

/// Read an entity document on its own.
pub async fn load_entities(entities_path: &Path) -> chartmark::Result<EntityDocument> {
    let json = read_input(entities_path).await?;
    EntityDocument::from_json(&json)
}

async fn read_input(path: &Path) -> chartmark::Result<String> {
    tokio::fs::read_to_string(path).await.map_err(|e| {
        ChartmarkError::Io(std::io::Error::new(
            e.kind(),
            format!("{}: {}", path.display(), e),
        ))
    })
}
