//! Typed repository objects built from stored attributes.
//!
//! The set of repository kinds is closed: [`Repo::new`] matches exhaustively on
//! [`RepoType`], so adding a kind means adding a variant here.

use std::path::{Path, PathBuf};

use crate::{
    error::{ConfigError, Result},
    repository::{
        Attributes, RepoType, KEY_DIRECTORY, KEY_DOWNLOAD_URL, KEY_PASSWORD, KEY_UPLOAD_URL,
        KEY_USERNAME,
    },
};

pub const PYPI_DOWNLOAD_URL: &str = "https://pypi.org/simple/";
pub const PYPI_UPLOAD_URL: &str = "https://upload.pypi.org/legacy/";

/// Common view over every repository kind.
pub trait PackageRepo {
    /// Kind of the repository.
    fn repo_type(&self) -> RepoType;

    /// Attributes the repository was constructed from, verbatim.
    fn attributes(&self) -> &Attributes;

    /// Where packages are read from: a directory or an index URL.
    fn location(&self) -> String;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRepo {
    attributes: Attributes,
    directory: PathBuf,
}

impl FileRepo {
    pub fn new(attributes: Attributes) -> Result<Self> {
        let directory = PathBuf::from(require(&attributes, RepoType::File, KEY_DIRECTORY)?);
        Ok(Self {
            attributes,
            directory,
        })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

impl PackageRepo for FileRepo {
    fn repo_type(&self) -> RepoType {
        RepoType::File
    }

    fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    fn location(&self) -> String {
        self.directory.display().to_string()
    }
}

/// A local directory served to pip through `--find-links`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipLocalRepo {
    attributes: Attributes,
    directory: PathBuf,
}

impl PipLocalRepo {
    pub fn new(attributes: Attributes) -> Result<Self> {
        let directory = PathBuf::from(require(&attributes, RepoType::PipLocal, KEY_DIRECTORY)?);
        Ok(Self {
            attributes,
            directory,
        })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

impl PackageRepo for PipLocalRepo {
    fn repo_type(&self) -> RepoType {
        RepoType::PipLocal
    }

    fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    fn location(&self) -> String {
        self.directory.display().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRepo {
    attributes: Attributes,
    download_url: String,
}

impl HttpRepo {
    pub fn new(attributes: Attributes) -> Result<Self> {
        let download_url = require(&attributes, RepoType::Http, KEY_DOWNLOAD_URL)?.to_string();
        Ok(Self {
            attributes,
            download_url,
        })
    }

    pub fn download_url(&self) -> &str {
        &self.download_url
    }

    pub fn upload_url(&self) -> Option<&str> {
        optional(&self.attributes, KEY_UPLOAD_URL)
    }

    pub fn username(&self) -> Option<&str> {
        optional(&self.attributes, KEY_USERNAME)
    }

    pub fn password(&self) -> Option<&str> {
        optional(&self.attributes, KEY_PASSWORD)
    }
}

impl PackageRepo for HttpRepo {
    fn repo_type(&self) -> RepoType {
        RepoType::Http
    }

    fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    fn location(&self) -> String {
        self.download_url.clone()
    }
}

/// PyPI or a PyPI-compatible index. Both URLs default to the public PyPI endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PyPIRepo {
    attributes: Attributes,
}

impl PyPIRepo {
    pub fn new(attributes: Attributes) -> Result<Self> {
        Ok(Self { attributes })
    }

    pub fn download_url(&self) -> &str {
        optional(&self.attributes, KEY_DOWNLOAD_URL).unwrap_or(PYPI_DOWNLOAD_URL)
    }

    pub fn upload_url(&self) -> &str {
        optional(&self.attributes, KEY_UPLOAD_URL).unwrap_or(PYPI_UPLOAD_URL)
    }

    pub fn username(&self) -> Option<&str> {
        optional(&self.attributes, KEY_USERNAME)
    }

    pub fn password(&self) -> Option<&str> {
        optional(&self.attributes, KEY_PASSWORD)
    }
}

impl PackageRepo for PyPIRepo {
    fn repo_type(&self) -> RepoType {
        RepoType::PyPI
    }

    fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    fn location(&self) -> String {
        self.download_url().to_string()
    }
}

/// A resolved repository definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Repo {
    File(FileRepo),
    PipLocal(PipLocalRepo),
    Http(HttpRepo),
    PyPI(PyPIRepo),
}

impl Repo {
    /// Builds the repository object registered for `repo_type`, handing it the full
    /// attribute mapping. Validation of the attributes is up to each constructor.
    pub fn new(repo_type: RepoType, attributes: Attributes) -> Result<Self> {
        match repo_type {
            RepoType::File => FileRepo::new(attributes).map(Repo::File),
            RepoType::PipLocal => PipLocalRepo::new(attributes).map(Repo::PipLocal),
            RepoType::Http => HttpRepo::new(attributes).map(Repo::Http),
            RepoType::PyPI => PyPIRepo::new(attributes).map(Repo::PyPI),
        }
    }

    fn inner(&self) -> &dyn PackageRepo {
        match self {
            Repo::File(repo) => repo,
            Repo::PipLocal(repo) => repo,
            Repo::Http(repo) => repo,
            Repo::PyPI(repo) => repo,
        }
    }
}

impl PackageRepo for Repo {
    fn repo_type(&self) -> RepoType {
        self.inner().repo_type()
    }

    fn attributes(&self) -> &Attributes {
        self.inner().attributes()
    }

    fn location(&self) -> String {
        self.inner().location()
    }
}

fn require<'a>(
    attributes: &'a Attributes,
    repo_type: RepoType,
    attribute: &'static str,
) -> Result<&'a str> {
    optional(attributes, attribute).ok_or(ConfigError::MissingAttribute {
        repo_type,
        attribute,
    })
}

fn optional<'a>(attributes: &'a Attributes, key: &str) -> Option<&'a str> {
    attributes
        .get(key)
        .map(String::as_str)
        .filter(|value| !value.is_empty())
}
