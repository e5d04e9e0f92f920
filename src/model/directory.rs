use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use super::Activity;

/// Every activity keyed by name, in the order the server listed them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityDirectory {
    entries: Vec<(String, Activity)>,
}

impl ActivityDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an activity. Replacing keeps the original position.
    pub fn insert(&mut self, name: impl Into<String>, activity: Activity) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = activity,
            None => self.entries.push((name, activity)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Activity> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, activity)| activity)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Activity)> {
        self.entries.iter().map(|(n, a)| (n.as_str(), a))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Activity)> for ActivityDirectory {
    fn from_iter<T: IntoIterator<Item = (String, Activity)>>(iter: T) -> Self {
        let mut directory = Self::new();
        for (name, activity) in iter {
            directory.insert(name, activity);
        }
        directory
    }
}

impl<'de> Deserialize<'de> for ActivityDirectory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DirectoryVisitor;

        impl<'de> Visitor<'de> for DirectoryVisitor {
            type Value = ActivityDirectory;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of activity names to activities")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut directory = ActivityDirectory::new();
                while let Some((name, activity)) = map.next_entry::<String, Activity>()? {
                    directory.insert(name, activity);
                }
                Ok(directory)
            }
        }

        deserializer.deserialize_map(DirectoryVisitor)
    }
}
