use crate::error::{CliError, Result};
use directories::ProjectDirs;
use futures_util::StreamExt;
use std::fs;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

const RCSB_DOWNLOAD_URL: &str = "https://files.rcsb.org/download";

#[derive(Debug, Clone, Copy)]
pub enum FetchProgress {
    DownloadStarted { total_size: Option<u64> },
    Downloading { downloaded: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Downloaded(PathBuf),
    AlreadyPresent(PathBuf),
}

/// Downloads PDB files into a local directory.
#[derive(Debug)]
pub struct StructureFetcher {
    base_url: String,
    output_dir: PathBuf,
    client: reqwest::Client,
}

impl StructureFetcher {
    pub fn new(output_dir: PathBuf) -> Self {
        Self {
            base_url: RCSB_DOWNLOAD_URL.to_string(),
            output_dir,
            client: reqwest::Client::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// The per-user directory used when no `--output` is given.
    pub fn default_output_dir() -> Result<PathBuf> {
        ProjectDirs::from("org", "ramapp", "rama")
            .map(|dirs| dirs.data_dir().join("structures"))
            .ok_or_else(|| {
                CliError::Config("Could not determine default data directory path.".to_string())
            })
    }

    pub fn url_for(&self, pdb_id: &str) -> String {
        format!("{}/{}.pdb", self.base_url, pdb_id)
    }

    pub fn destination_for(&self, pdb_id: &str) -> PathBuf {
        self.output_dir.join(format!("{}.pdb", pdb_id))
    }

    pub async fn fetch(
        &self,
        pdb_id: &str,
        force: bool,
        mut progress_callback: impl FnMut(FetchProgress),
    ) -> Result<FetchOutcome> {
        let destination = self.destination_for(pdb_id);
        if destination.exists() && !force {
            debug!(path = %destination.display(), "Structure already present, skipping.");
            return Ok(FetchOutcome::AlreadyPresent(destination));
        }
        fs::create_dir_all(&self.output_dir)?;

        let url = self.url_for(pdb_id);
        info!("Sending request to {}", url);
        let response = self.client.get(&url).send().await?.error_for_status()?;

        let total_size = response.content_length();
        progress_callback(FetchProgress::DownloadStarted { total_size });

        let partial = destination.with_extension("pdb.part");
        let mut file = tokio::fs::File::create(&partial).await?;
        let mut downloaded: u64 = 0;
        let mut stream = response.bytes_stream();

        while let Some(item) = stream.next().await {
            let chunk = item?;
            file.write_all(&chunk).await?;
            downloaded += chunk.len() as u64;
            progress_callback(FetchProgress::Downloading { downloaded });
        }

        file.flush().await?;
        drop(file);
        tokio::fs::rename(&partial, &destination).await?;

        info!(bytes = downloaded, path = %destination.display(), "Structure saved.");
        Ok(FetchOutcome::Downloaded(destination))
    }
}

/// Validates a PDB identifier and strips surrounding whitespace.
pub fn normalize_id(raw: &str) -> Result<String> {
    let id = raw.trim();
    if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(CliError::Argument(format!(
            "Invalid PDB identifier '{}'. Expected letters, digits or '_' (e.g., 1CRN).",
            raw
        )));
    }
    Ok(id.to_string())
}

/// Reads identifiers from a text file, one per line. Blank lines and `#` comments are skipped.
pub fn read_id_list(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    content
        .lines()
        .map(|line| line.split('#').next().unwrap_or("").trim())
        .filter(|line| !line.is_empty())
        .map(normalize_id)
        .collect()
}
