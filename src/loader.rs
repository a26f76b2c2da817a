//! Loading model files from disk.
//!
//! Plain `.xmi`/`.xml`/`.uml` files are read as they are. ArgoUML archives
//! (`.zargo`, `.zuml`, `.zip`, behind the `archive` feature) carry exactly
//! one model document and at most one `.profile` entry naming the profile
//! files to load from the profile directories.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::error::XmiError;
use crate::model::ModelGraph;
use crate::options::ParseOptions;
use crate::parse::XmiParser;
use crate::xml::Document;

/// ArgoUML user settings, relative to the home directory.
const ARGOUML_PROPERTIES: &str = ".argouml/argo.user.properties";
const PROFILE_DIRECTORIES_KEY: &str = "argo.profiles.directories=";

const DOCUMENT_EXTENSIONS: &[&str] = &["xmi", "xml", "uml"];
const ARCHIVE_EXTENSIONS: &[&str] = &["zargo", "zuml", "zip"];

/// A primary document and the profile documents it refers to.
#[derive(Debug)]
pub struct LoadedDocuments {
    pub primary: Document,
    /// Keyed by profile file name.
    pub profiles: IndexMap<String, Document>,
}

impl LoadedDocuments {
    pub fn parse(&self, options: ParseOptions) -> Result<ModelGraph, XmiError> {
        XmiParser::new(options).parse(&self.primary, &self.profiles)
    }
}

/// Reads model files, searching a list of directories for profiles.
#[derive(Debug, Clone, Default)]
pub struct Loader {
    profile_dirs: Vec<PathBuf>,
}

impl Loader {
    /// A loader without profile directories.
    pub fn new() -> Self {
        Self::default()
    }

    /// A loader searching the profile directories configured for ArgoUML
    /// in the user's home directory, if any.
    pub fn from_env() -> Self {
        let mut loader = Self::new();
        if let Some(home) = std::env::var_os("HOME") {
            let properties = Path::new(&home).join(ARGOUML_PROPERTIES);
            match std::fs::read_to_string(&properties) {
                Ok(text) => loader.profile_dirs = profile_directories(&text),
                Err(err) if err.kind() == ErrorKind::NotFound => {}
                Err(err) => {
                    tracing::warn!(path = %properties.display(), error = %err, "cannot read ArgoUML settings");
                }
            }
        }
        if !loader.profile_dirs.is_empty() {
            tracing::info!(dirs = ?loader.profile_dirs, "profile directories");
        }
        loader
    }

    pub fn with_profile_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.profile_dirs.push(dir.into());
        self
    }

    pub fn profile_dirs(&self) -> &[PathBuf] {
        &self.profile_dirs
    }

    /// Read `path` and the profiles it refers to.
    pub fn load(&self, path: &Path) -> Result<LoadedDocuments, XmiError> {
        let extension = extension(path);
        if DOCUMENT_EXTENSIONS.contains(&extension.as_str()) {
            tracing::debug!(path = %path.display(), "reading model document");
            let bytes = std::fs::read(path)?;
            return Ok(LoadedDocuments {
                primary: Document::parse_bytes(&bytes)?,
                profiles: IndexMap::new(),
            });
        }
        if ARCHIVE_EXTENSIONS.contains(&extension.as_str()) {
            return self.load_archive(path);
        }
        Err(XmiError::Unsupported(format!(
            "{}: expected one of .xmi, .xml, .uml, .zargo, .zuml, .zip",
            path.display()
        )))
    }

    #[cfg(feature = "archive")]
    fn load_archive(&self, path: &Path) -> Result<LoadedDocuments, XmiError> {
        tracing::debug!(path = %path.display(), "reading model archive");
        let bytes = std::fs::read(path)?;
        archive::read(self, &bytes)
    }

    #[cfg(not(feature = "archive"))]
    fn load_archive(&self, path: &Path) -> Result<LoadedDocuments, XmiError> {
        Err(XmiError::Unsupported(format!(
            "{}: archive support requires the `archive` feature",
            path.display()
        )))
    }

    /// First profile directory holding `file_name`.
    fn find_profile(&self, file_name: &str) -> Result<PathBuf, XmiError> {
        self.profile_dirs
            .iter()
            .map(|dir| dir.join(file_name))
            .find(|candidate| candidate.is_file())
            .ok_or_else(|| {
                XmiError::Io(std::io::Error::new(
                    ErrorKind::NotFound,
                    format!("profile {file_name} not found"),
                ))
            })
    }
}

/// Load and parse `path` with the ArgoUML profile directories.
pub fn load_path(path: impl AsRef<Path>, options: ParseOptions) -> Result<ModelGraph, XmiError> {
    Loader::from_env().load(path.as_ref())?.parse(options)
}

/// Directories listed on the `argo.profiles.directories=` line. Entries are
/// `*`-terminated, so the text after the last `*` is not a directory.
pub fn profile_directories(properties: &str) -> Vec<PathBuf> {
    let Some(value) = properties
        .lines()
        .find_map(|line| line.strip_prefix(PROFILE_DIRECTORIES_KEY))
    else {
        return Vec::new();
    };
    let mut parts: Vec<&str> = value.split('*').collect();
    parts.pop();
    parts.into_iter().map(PathBuf::from).collect()
}

/// File names listed as `<filename>` elements of a `.profile` entry.
pub fn profile_file_names(profile: &Document) -> Vec<String> {
    let Some(root) = profile.root() else {
        return Vec::new();
    };
    std::iter::once(root)
        .chain(root.descendants())
        .filter(|node| node.tag() == "filename")
        .filter_map(|node| node.text())
        .map(str::to_string)
        .collect()
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default()
}

// ============================================================================
// ARCHIVES (requires archive feature)
// ============================================================================

#[cfg(feature = "archive")]
mod archive {
    use super::*;
    use std::io::{Cursor, Read};
    use zip::ZipArchive;

    pub(super) fn read(loader: &Loader, input: &[u8]) -> Result<LoadedDocuments, XmiError> {
        let mut archive = ZipArchive::new(Cursor::new(input))
            .map_err(|e| XmiError::archive(format!("Failed to open archive: {e}")))?;

        let names: Vec<String> = (0..archive.len())
            .filter_map(|i| archive.by_index(i).ok().map(|f| f.name().to_string()))
            .collect();
        let with_extension = |wanted: &[&str]| -> Vec<&String> {
            names
                .iter()
                .filter(|name| wanted.contains(&extension(Path::new(name.as_str())).as_str()))
                .collect()
        };

        let documents = with_extension(&["xmi", "xml"]);
        let [document] = documents[..] else {
            return Err(XmiError::archive(format!(
                "expected one model document, found {}",
                documents.len()
            )));
        };
        let profile_entries = with_extension(&["profile"]);
        if profile_entries.len() > 1 {
            return Err(XmiError::archive(format!(
                "expected at most one .profile entry, found {}",
                profile_entries.len()
            )));
        }

        let mut profiles = IndexMap::new();
        if let Some(entry) = profile_entries.first() {
            let listing = Document::parse_bytes(&read_entry(&mut archive, entry)?)?;
            for file_name in profile_file_names(&listing) {
                let path = loader.find_profile(&file_name)?;
                tracing::debug!(profile = %file_name, path = %path.display(), "reading profile");
                let bytes = std::fs::read(&path)?;
                profiles.insert(file_name, Document::parse_bytes(&bytes)?);
            }
        }

        let primary = Document::parse_bytes(&read_entry(&mut archive, document)?)?;
        Ok(LoadedDocuments { primary, profiles })
    }

    fn read_entry(
        archive: &mut ZipArchive<Cursor<&[u8]>>,
        name: &str,
    ) -> Result<Vec<u8>, XmiError> {
        let mut file = archive
            .by_name(name)
            .map_err(|e| XmiError::archive(format!("Failed to read {name}: {e}")))?;
        let mut content = Vec::new();
        file.read_to_end(&mut content)
            .map_err(|e| XmiError::archive(format!("Failed to read {name}: {e}")))?;
        Ok(content)
    }
}
