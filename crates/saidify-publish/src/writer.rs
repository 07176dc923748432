//! Publisher: writes a populated document back to its source and to its
//! content-addressed location.

use crate::errors::PublishError;
use saidify_canonical::{verify_raw, Canonicalizer, Said};
use saidify_core::PopulateOptions;
use serde::Serialize;
use serde_json::Value;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default directory content-addressed copies are written under.
pub const DEFAULT_PUBLISH_ROOT: &str = "publish";

/// File name of the raw artifact inside `<publish-root>/<SAID>/`.
pub const ARTIFACT_FILE_NAME: &str = "index.json";

/// Options for publishing.
#[derive(Debug, Clone, Default)]
pub struct WriteOptions {
    /// Whether to fsync each file after writing (default: false).
    pub sync: bool,
}

/// What a successful publish wrote.
#[derive(Debug, Clone, Serialize)]
pub struct Publication {
    /// Root SAID of the document; also the artifact's directory name.
    pub said: Said,
    /// Source file rewritten with indented JSON.
    pub source: PathBuf,
    /// Content-addressed artifact holding the canonical bytes.
    pub artifact: PathBuf,
    /// Size of the canonical bytes.
    pub bytes: usize,
}

/// Persists finalized documents.
///
/// A document is published twice:
/// - its source path is overwritten with 2-space indented JSON for people;
/// - the canonical bytes are written unmodified to
///   `<publish-root>/<root-SAID>/index.json`, so the URL path of a static
///   host serving `publish-root` is the content identifier.
///
/// # Example
///
/// ```rust,no_run
/// use saidify_core::{populate, PopulateOptions};
/// use saidify_publish::{load_document, Publisher};
///
/// let options = PopulateOptions::default();
/// let document = populate(load_document("schema.json")?, &options)?;
/// let publication = Publisher::from_options("publish", &options).publish("schema.json", &document)?;
/// println!("{}", publication.artifact.display());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Publisher {
    publish_root: PathBuf,
    label: String,
    canonicalizer: Canonicalizer,
    options: WriteOptions,
}

impl Publisher {
    /// Creates a publisher writing under `publish_root`, reading the root
    /// SAID at `label`.
    pub fn new(
        publish_root: impl Into<PathBuf>,
        label: impl Into<String>,
        canonicalizer: Canonicalizer,
    ) -> Self {
        Self {
            publish_root: publish_root.into(),
            label: label.into(),
            canonicalizer,
            options: WriteOptions::default(),
        }
    }

    /// Creates a publisher matching the options the document was populated with.
    pub fn from_options(publish_root: impl Into<PathBuf>, options: &PopulateOptions) -> Self {
        Self::new(publish_root, options.label.clone(), options.canonicalizer())
    }

    /// Replaces the write options.
    pub fn with_options(mut self, options: WriteOptions) -> Self {
        self.options = options;
        self
    }

    /// Directory artifacts are published under.
    pub fn publish_root(&self) -> &Path {
        &self.publish_root
    }

    /// Location of the artifact for `said`.
    pub fn artifact_path(&self, said: &Said) -> PathBuf {
        self.publish_root.join(said.as_str()).join(ARTIFACT_FILE_NAME)
    }

    /// Publishes `document`, whose root SAID must already be embedded.
    ///
    /// The canonical bytes are checked to digest to the embedded root SAID
    /// before anything is written.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::Said`] if the root SAID is missing or stale,
    /// [`PublishError::Write`] if the source or artifact cannot be written and
    /// [`PublishError::CreateDir`] if the artifact directory cannot be created.
    /// Files already written are left in place.
    pub fn publish<P: AsRef<Path>>(
        &self,
        source: P,
        document: &Value,
    ) -> Result<Publication, PublishError> {
        let source = source.as_ref();
        let raw = self.canonicalizer.canonicalize(document)?;
        let said = verify_raw(&raw, &self.label, &self.canonicalizer)?;
        debug!(%said, bytes = raw.len(), "root SAID verified");

        let pretty = serde_json::to_vec_pretty(document)?;
        self.write_file(source, &pretty)?;

        let artifact = self.artifact_path(&said);
        let dir = self.publish_root.join(said.as_str());
        fs::create_dir_all(&dir).map_err(|source| PublishError::CreateDir {
            path: dir.clone(),
            source,
        })?;
        self.write_file(&artifact, &raw)?;

        info!(
            %said,
            source = %source.display(),
            artifact = %artifact.display(),
            "published document"
        );
        Ok(Publication {
            said,
            source: source.to_path_buf(),
            artifact,
            bytes: raw.len(),
        })
    }

    fn write_file(&self, path: &Path, bytes: &[u8]) -> Result<(), PublishError> {
        let wrap = |source: std::io::Error| PublishError::Write {
            path: path.to_path_buf(),
            source,
        };
        let mut file = File::create(path).map_err(wrap)?;
        file.write_all(bytes).map_err(wrap)?;
        file.flush().map_err(wrap)?;
        if self.options.sync {
            file.sync_all().map_err(wrap)?;
        }
        Ok(())
    }
}
