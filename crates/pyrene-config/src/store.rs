//! Sectioned key-value store persisted as a TOML document.
//!
//! Every top-level table is a section and every plain value inside it is an option.
//! Mutations rewrite the whole file; anything the store does not touch (comments,
//! ordering, unrelated keys) is preserved as written.

use std::path::{Path, PathBuf};

use pyrene_utils::fs::{read_optional, write_atomic};
use toml_edit::{value, DocumentMut, Item, Table, Value};
use tracing::{debug, trace};

use crate::{
    error::{ConfigError, Result},
    repository::Attributes,
};

pub struct ConfigStore {
    path: PathBuf,
    doc: DocumentMut,
}

impl ConfigStore {
    /// Loads the store at `path`. A missing file yields an empty store; nothing is
    /// written until the first mutation.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let doc = match read_optional(&path)? {
            Some(content) => content.parse::<DocumentMut>()?,
            None => {
                debug!("No store at {}, starting empty", path.display());
                DocumentMut::new()
            }
        };

        Ok(Self { path, doc })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Section names in document order.
    pub fn sections(&self) -> Vec<String> {
        self.doc
            .iter()
            .filter(|(_, item)| item.is_table())
            .map(|(name, _)| name.to_string())
            .collect()
    }

    pub fn has_section(&self, section: &str) -> bool {
        self.doc.get(section).is_some_and(Item::is_table)
    }

    pub fn has_option(&self, section: &str, key: &str) -> bool {
        self.section(section)
            .is_ok_and(|table| table.get(key).is_some_and(|item| !item.is_none()))
    }

    pub fn options(&self, section: &str) -> Result<Vec<String>> {
        Ok(self
            .section(section)?
            .iter()
            .map(|(key, _)| key.to_string())
            .collect())
    }

    pub fn get(&self, section: &str, key: &str) -> Result<Option<String>> {
        self.section(section)?
            .get(key)
            .map(|item| item_to_string(key, item))
            .transpose()
    }

    /// All options of `section` with their values.
    pub fn items(&self, section: &str) -> Result<Attributes> {
        self.section(section)?
            .iter()
            .map(|(key, item)| item_to_string(key, item).map(|value| (key.to_string(), value)))
            .collect()
    }

    /// Adds an empty section and persists the store. Returns `false` if the section
    /// already existed, in which case its contents are left alone.
    pub fn add_section(&mut self, section: &str) -> Result<bool> {
        self.commit(|doc| {
            if let Some(item) = doc.get(section) {
                return if item.is_table() {
                    Ok(false)
                } else {
                    Err(ConfigError::UnexpectedTomlItem(section.to_string()))
                };
            }
            doc.insert(section, Item::Table(Table::new()));
            Ok(true)
        })
    }

    /// Removes a section and persists the store. Returns `false`, without writing,
    /// if there was no such section.
    pub fn remove_section(&mut self, section: &str) -> Result<bool> {
        if !self.has_section(section) {
            return Ok(false);
        }

        self.commit(|doc| Ok(doc.remove(section).is_some()))
    }

    /// Sets one option and persists the store.
    pub fn set(&mut self, section: &str, key: &str, val: &str) -> Result<()> {
        self.commit(|doc| {
            let table = doc
                .get_mut(section)
                .and_then(Item::as_table_mut)
                .ok_or_else(|| ConfigError::NoSection(section.to_string()))?;
            table[key] = value(val);
            Ok(())
        })
    }

    fn section(&self, section: &str) -> Result<&Table> {
        self.doc
            .get(section)
            .and_then(Item::as_table)
            .ok_or_else(|| ConfigError::NoSection(section.to_string()))
    }

    /// Applies `mutate` to a copy of the document and swaps it in only once the copy
    /// has been written, so a failed write leaves memory and disk in agreement.
    fn commit<F, R>(&mut self, mutate: F) -> Result<R>
    where
        F: FnOnce(&mut DocumentMut) -> Result<R>,
    {
        let mut doc = self.doc.clone();
        let result = mutate(&mut doc)?;

        write_atomic(&self.path, doc.to_string().as_bytes())?;
        trace!("Store written to {}", self.path.display());

        self.doc = doc;
        Ok(result)
    }
}

fn item_to_string(key: &str, item: &Item) -> Result<String> {
    match item {
        Item::Value(Value::String(s)) => Ok(s.value().clone()),
        Item::Value(Value::Integer(i)) => Ok(i.display_repr().into_owned()),
        Item::Value(Value::Float(f)) => Ok(f.display_repr().into_owned()),
        Item::Value(Value::Boolean(b)) => Ok(b.display_repr().into_owned()),
        Item::Value(Value::Datetime(d)) => Ok(d.display_repr().into_owned()),
        _ => Err(ConfigError::UnexpectedTomlItem(key.to_string())),
    }
}
