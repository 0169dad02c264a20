use std::path::Path;

use tracing::{debug, info};

use crate::{
    config::default_store_path,
    error::{ConfigError, Result},
    repos::Repo,
    repository::{
        is_known_attribute, repo_name_from_section, section_name, Attributes, RepoType, KEY_TYPE,
    },
    store::ConfigStore,
};

/// Named repository definitions kept in a [`ConfigStore`].
///
/// Every repository lives in its own `repo:<name>` section. Mutations are written
/// to disk before they return.
pub struct RepoManager {
    store: ConfigStore,
}

impl RepoManager {
    /// Opens the repository store at `path`. A missing file is an empty store.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::from_store(ConfigStore::open(path)?))
    }

    /// Opens the store at the default location.
    pub fn open_default() -> Result<Self> {
        Self::open(default_store_path()?)
    }

    pub fn from_store(store: ConfigStore) -> Self {
        Self { store }
    }

    pub fn path(&self) -> &Path {
        self.store.path()
    }

    pub fn contains(&self, repo_name: &str) -> bool {
        self.store.has_section(&section_name(repo_name))
    }

    /// Defines an empty repository. Defining an existing repository keeps its
    /// attributes untouched.
    pub fn define(&mut self, repo_name: &str) -> Result<()> {
        if self.store.add_section(&section_name(repo_name))? {
            info!("Defined repository '{}'", repo_name);
        } else {
            debug!("Repository '{}' is already defined", repo_name);
        }
        Ok(())
    }

    /// Removes a repository definition. Returns `false` if it was not defined.
    pub fn forget(&mut self, repo_name: &str) -> Result<bool> {
        let removed = self.store.remove_section(&section_name(repo_name))?;
        if removed {
            info!("Forgot repository '{}'", repo_name);
        } else {
            debug!("Repository '{}' was not defined", repo_name);
        }
        Ok(removed)
    }

    /// Writes one attribute of a defined repository. The key is not validated.
    pub fn set(&mut self, repo_name: &str, key: &str, value: &str) -> Result<()> {
        let section = self.existing_section(repo_name)?;
        if !is_known_attribute(key) {
            debug!("Setting unrecognised attribute '{}' on '{}'", key, repo_name);
        }
        self.store.set(&section, key, value)
    }

    /// All attributes of a defined repository; empty when none have been set.
    pub fn get_attributes(&self, repo_name: &str) -> Result<Attributes> {
        let section = self.existing_section(repo_name)?;
        self.store.items(&section)
    }

    /// Names of all defined repositories, in store order.
    pub fn repo_names(&self) -> Vec<String> {
        self.store
            .sections()
            .iter()
            .filter_map(|section| repo_name_from_section(section))
            .map(String::from)
            .collect()
    }

    /// Resolves a repository definition into a typed [`Repo`].
    ///
    /// # Errors
    ///
    /// * [`ConfigError::UnknownRepo`] if the repository is not defined.
    /// * [`ConfigError::UndefinedRepoType`] if it has no `type` attribute.
    /// * [`ConfigError::UnknownRepoType`] if the `type` is not a known kind.
    /// * Whatever the type's constructor reports for invalid attributes.
    pub fn get_repo(&self, repo_name: &str) -> Result<Repo> {
        let section = self.existing_section(repo_name)?;
        if !self.store.has_option(&section, KEY_TYPE) {
            return Err(ConfigError::UndefinedRepoType(repo_name.to_string()));
        }

        let attributes = self.store.items(&section)?;
        let repo_type = attributes
            .get(KEY_TYPE)
            .map(String::as_str)
            .unwrap_or_default()
            .parse::<RepoType>()?;

        Repo::new(repo_type, attributes)
    }

    fn existing_section(&self, repo_name: &str) -> Result<String> {
        let section = section_name(repo_name);
        if self.store.has_section(&section) {
            Ok(section)
        } else {
            Err(ConfigError::UnknownRepo(repo_name.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::{tempdir, TempDir};

    use super::*;
    use crate::repos::PackageRepo;

    fn manager() -> (TempDir, RepoManager) {
        let dir = tempdir().unwrap();
        let manager = RepoManager::open(dir.path().join("repos.toml")).unwrap();
        (dir, manager)
    }

    #[test]
    fn test_get_repo_unknown() {
        let (_dir, manager) = manager();
        assert!(matches!(
            manager.get_repo("never-defined"),
            Err(ConfigError::UnknownRepo(name)) if name == "never-defined"
        ));
    }

    #[test]
    fn test_get_repo_without_type() {
        let (_dir, mut manager) = manager();
        manager.define("r1").unwrap();

        assert!(matches!(
            manager.get_repo("r1"),
            Err(ConfigError::UndefinedRepoType(name)) if name == "r1"
        ));
    }

    #[test]
    fn test_get_repo_file() {
        let (_dir, mut manager) = manager();
        manager.define("r1").unwrap();
        manager.set("r1", "type", "file").unwrap();
        manager.set("r1", "directory", "/tmp/x").unwrap();

        let repo = manager.get_repo("r1").unwrap();
        assert_eq!(repo.repo_type(), RepoType::File);

        let expected: Attributes = [("type", "file"), ("directory", "/tmp/x")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        assert_eq!(repo.attributes(), &expected);
    }

    #[test]
    fn test_get_repo_unknown_type() {
        let (_dir, mut manager) = manager();
        manager.define("r1").unwrap();
        manager.set("r1", "type", "bogus").unwrap();

        assert!(matches!(
            manager.get_repo("r1"),
            Err(ConfigError::UnknownRepoType(t)) if t == "bogus"
        ));
    }

    #[test]
    fn test_get_repo_empty_type_is_unknown_type() {
        let (_dir, mut manager) = manager();
        manager.define("r1").unwrap();
        manager.set("r1", "type", "").unwrap();

        assert!(matches!(
            manager.get_repo("r1"),
            Err(ConfigError::UnknownRepoType(t)) if t.is_empty()
        ));
    }

    #[test]
    fn test_get_repo_reports_constructor_errors() {
        let (_dir, mut manager) = manager();
        manager.define("r1").unwrap();
        manager.set("r1", "type", "piplocal").unwrap();

        assert!(matches!(
            manager.get_repo("r1"),
            Err(ConfigError::MissingAttribute {
                repo_type: RepoType::PipLocal,
                attribute: "directory"
            })
        ));
    }

    #[test]
    fn test_forget() {
        let (_dir, mut manager) = manager();
        manager.define("r1").unwrap();
        manager.set("r1", "type", "pypi").unwrap();

        assert!(manager.forget("r1").unwrap());
        assert!(!manager.repo_names().contains(&"r1".to_string()));
        assert!(matches!(
            manager.get_repo("r1"),
            Err(ConfigError::UnknownRepo(_))
        ));
    }

    #[test]
    fn test_forget_absent_is_not_an_error() {
        let (_dir, mut manager) = manager();
        assert!(!manager.forget("ghost").unwrap());
    }

    #[test]
    fn test_define_twice_keeps_attributes() {
        let (_dir, mut manager) = manager();
        manager.define("r1").unwrap();
        manager.set("r1", "type", "http").unwrap();
        manager.define("r1").unwrap();

        assert_eq!(manager.repo_names(), ["r1"]);
        assert_eq!(
            manager.get_attributes("r1").unwrap().get("type").map(String::as_str),
            Some("http")
        );
    }

    #[test]
    fn test_set_and_get_attributes_on_undefined_repo() {
        let (dir, mut manager) = manager();

        assert!(matches!(
            manager.set("ghost", "type", "file"),
            Err(ConfigError::UnknownRepo(_))
        ));
        assert!(matches!(
            manager.get_attributes("ghost"),
            Err(ConfigError::UnknownRepo(_))
        ));
        assert!(!dir.path().join("repos.toml").exists());
    }

    #[test]
    fn test_get_attributes_empty_section() {
        let (_dir, mut manager) = manager();
        manager.define("r1").unwrap();
        assert!(manager.get_attributes("r1").unwrap().is_empty());
    }

    #[test]
    fn test_values_round_trip_through_fresh_manager() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("repos.toml");
        let values = [
            ("directory", "/srv/with space/ünïcode"),
            ("password", "p@ss \"quoted\" = [x]"),
            ("download_url", "https://example.com/simple?x=1#frag"),
            ("note", "multi\nline\ttext"),
            ("empty", ""),
        ];

        {
            let mut manager = RepoManager::open(&path).unwrap();
            manager.define("r1").unwrap();
            for (key, value) in values {
                manager.set("r1", key, value).unwrap();
            }
        }

        let manager = RepoManager::open(&path).unwrap();
        let attributes = manager.get_attributes("r1").unwrap();
        for (key, value) in values {
            assert_eq!(attributes.get(key).map(String::as_str), Some(value));
        }
    }

    #[test]
    fn test_forget_persists_across_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("repos.toml");

        {
            let mut manager = RepoManager::open(&path).unwrap();
            for name in ["keep", "drop"] {
                manager.define(name).unwrap();
                manager.set(name, "type", "pypi").unwrap();
            }
            assert!(manager.forget("drop").unwrap());
        }

        let manager = RepoManager::open(&path).unwrap();
        assert_eq!(manager.repo_names(), ["keep"]);
        assert!(matches!(
            manager.get_repo("drop"),
            Err(ConfigError::UnknownRepo(name)) if name == "drop"
        ));
        assert!(manager.get_repo("keep").is_ok());
    }

    #[test]
    fn test_repo_names_tracks_define_and_forget() {
        let (_dir, mut manager) = manager();
        for name in ["a", "b", "c", "with:colon", "with.dot"] {
            manager.define(name).unwrap();
        }
        manager.set("b", "type", "file").unwrap();
        manager.forget("a").unwrap();
        manager.forget("c").unwrap();

        assert_eq!(manager.repo_names(), ["b", "with:colon", "with.dot"]);
        assert!(manager.contains("with.dot"));
        assert!(!manager.contains("a"));
    }

    #[test]
    fn test_foreign_sections_are_ignored_and_preserved() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("repos.toml");
        std::fs::write(&path, "[settings]\nverbose = \"yes\"\n").unwrap();

        let mut manager = RepoManager::open(&path).unwrap();
        assert!(manager.repo_names().is_empty());
        assert!(matches!(
            manager.get_repo("settings"),
            Err(ConfigError::UnknownRepo(_))
        ));

        manager.define("local").unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("[settings]"));
        assert!(content.contains("[\"repo:local\"]"));
    }
}
