use anyhow::{Context, Result};

use model::Model;

/// Nothing is interactive until the dataset arrives.
pub enum LoadState {
    Loading,
    Loaded(Model),
    Failed(String),
}

impl LoadState {
    pub fn describe(&self) -> String {
        match self {
            LoadState::Loading => "Loading...".to_string(),
            LoadState::Loaded(model) => format!("Loaded {} routes", model.routes.len()),
            LoadState::Failed(err) => format!("Failed to load: {err}"),
        }
    }
}

/// Fetches and imports the routes. Any failure turns into `LoadState::Failed`; there are no
/// retries.
pub async fn load(source: &str) -> LoadState {
    info!("Loading routes from {source}");
    match fetch(source).await.and_then(|bytes| Model::import_geojson_bytes(&bytes)) {
        Ok(model) => LoadState::Loaded(model),
        Err(err) => {
            error!("Couldn't load {source}: {err:#}");
            LoadState::Failed(format!("{err:#}"))
        }
    }
}

async fn fetch(source: &str) -> Result<Vec<u8>> {
    if source.starts_with("http://") || source.starts_with("https://") {
        let response = reqwest::get(source)
            .await
            .with_context(|| format!("requesting {source}"))?
            .error_for_status()?;
        let bytes = response.bytes().await?;
        debug!("Downloaded {} bytes", bytes.len());
        Ok(bytes.to_vec())
    } else {
        Ok(fs_err::read(source)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file() {
        let state = load("does/not/exist.geojson").await;
        assert!(matches!(state, LoadState::Failed(_)));
        assert!(state.describe().starts_with("Failed to load: "));
    }

    #[tokio::test]
    async fn not_geojson() {
        let path = std::env::temp_dir().join("viewer_not_geojson.json");
        fs_err::write(&path, "[1, 2, 3]").unwrap();
        let state = load(path.to_str().unwrap()).await;
        assert!(matches!(state, LoadState::Failed(_)));
    }
}
