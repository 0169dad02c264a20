use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::Serialize;

use crate::error::ConfigError;

/// Attribute mapping of a repository section. Values are stored verbatim.
pub type Attributes = BTreeMap<String, String>;

/// Prefix that marks a store section as a repository definition.
pub const REPO_SECTION_PREFIX: &str = "repo:";

pub const KEY_TYPE: &str = "type";
pub const KEY_DIRECTORY: &str = "directory";
pub const KEY_USERNAME: &str = "username";
pub const KEY_PASSWORD: &str = "password";
pub const KEY_DOWNLOAD_URL: &str = "download_url";
pub const KEY_UPLOAD_URL: &str = "upload_url";

/// Attribute keys understood by the repository constructors, with a short description.
pub const REPO_ATTRIBUTES: [(&str, &str); 6] = [
    (KEY_TYPE, "Repository type: file, http, piplocal or pypi"),
    (KEY_DIRECTORY, "Package directory for file and piplocal repositories"),
    (KEY_DOWNLOAD_URL, "Index URL packages are fetched from"),
    (KEY_UPLOAD_URL, "URL packages are uploaded to"),
    (KEY_USERNAME, "Upload user name"),
    (KEY_PASSWORD, "Upload password"),
];

pub fn is_known_attribute(key: &str) -> bool {
    REPO_ATTRIBUTES.iter().any(|(known, _)| *known == key)
}

/// Store section name holding the definition of `repo_name`.
pub fn section_name(repo_name: &str) -> String {
    format!("{REPO_SECTION_PREFIX}{repo_name}")
}

/// Repository name encoded in a store section, if the section is a repository definition.
pub fn repo_name_from_section(section: &str) -> Option<&str> {
    section.strip_prefix(REPO_SECTION_PREFIX)
}

/// Declared kind of a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RepoType {
    /// Plain directory of distribution files.
    File,
    /// Directory laid out for `pip install --find-links`.
    PipLocal,
    /// Generic HTTP package index.
    Http,
    /// PyPI or a PyPI-compatible index.
    PyPI,
}

impl RepoType {
    pub const ALL: [RepoType; 4] = [
        RepoType::File,
        RepoType::PipLocal,
        RepoType::Http,
        RepoType::PyPI,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RepoType::File => "file",
            RepoType::PipLocal => "piplocal",
            RepoType::Http => "http",
            RepoType::PyPI => "pypi",
        }
    }

    /// Attributes the constructor for this type refuses to work without.
    pub fn required_attributes(&self) -> &'static [&'static str] {
        match self {
            RepoType::File | RepoType::PipLocal => &[KEY_DIRECTORY],
            RepoType::Http => &[KEY_DOWNLOAD_URL],
            RepoType::PyPI => &[],
        }
    }
}

impl FromStr for RepoType {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        RepoType::ALL
            .into_iter()
            .find(|repo_type| repo_type.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownRepoType(s.to_string()))
    }
}

impl fmt::Display for RepoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
