//! Per-user mapping of category name to its expense entries.
//!
//! Categories keep insertion order, including through serialization, where
//! they are written as a JSON object keyed by category name.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::entry::ExpenseEntry;

/// Categories every new account starts with.
pub const DEFAULT_CATEGORIES: [&str; 3] = ["food", "transport", "gadget"];

/// A named category and its entries in chronological order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// Unique category name.
    pub name: String,
    /// Entries, oldest first.
    pub entries: Vec<ExpenseEntry>,
}

/// Ordered category map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Records {
    categories: Vec<Category>,
}

impl Default for Records {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl Records {
    /// Creates a ledger with no categories at all.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            categories: Vec::new(),
        }
    }

    /// Creates a ledger holding the default categories, each empty.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut records = Self::empty();
        for name in DEFAULT_CATEGORIES {
            records.insert_empty(name);
        }
        records
    }

    /// Returns true if a category with this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.categories.iter().any(|c| c.name == name)
    }

    /// Returns the entries of a category.
    #[must_use]
    pub fn entries(&self, name: &str) -> Option<&[ExpenseEntry]> {
        self.categories
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.entries.as_slice())
    }

    pub(crate) fn entries_mut(&mut self, name: &str) -> Option<&mut Vec<ExpenseEntry>> {
        self.categories
            .iter_mut()
            .find(|c| c.name == name)
            .map(|c| &mut c.entries)
    }

    /// Appends an empty category. Returns false if the name is taken.
    pub(crate) fn insert_empty(&mut self, name: &str) -> bool {
        if self.contains(name) {
            return false;
        }
        self.categories.push(Category {
            name: name.to_string(),
            entries: Vec::new(),
        });
        true
    }

    /// Sets a category's entries, appending the category if it is new.
    fn replace(&mut self, name: String, entries: Vec<ExpenseEntry>) {
        match self.entries_mut(&name) {
            Some(existing) => *existing = entries,
            None => self.categories.push(Category { name, entries }),
        }
    }

    /// Iterates categories in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    /// Category names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.name.as_str())
    }

    /// Number of categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Returns true if there are no categories.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl<'a> IntoIterator for &'a Records {
    type Item = &'a Category;
    type IntoIter = std::slice::Iter<'a, Category>;

    fn into_iter(self) -> Self::IntoIter {
        self.categories.iter()
    }
}

impl Serialize for Records {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.categories.len()))?;
        for category in &self.categories {
            map.serialize_entry(&category.name, &category.entries)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Records {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RecordsVisitor;

        impl<'de> Visitor<'de> for RecordsVisitor {
            type Value = Records;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of category names to expense entries")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Records, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut records = Records::empty();
                // A repeated key keeps its first position and its last value.
                while let Some((name, entries)) =
                    access.next_entry::<String, Vec<ExpenseEntry>>()?
                {
                    records.replace(name, entries);
                }
                Ok(records)
            }
        }

        deserializer.deserialize_map(RecordsVisitor)
    }
}
