use crate::domain::model::{Doctor, Patient};
use std::collections::HashMap;

pub trait Keyed {
    fn key(&self) -> &str;
}

impl Keyed for Patient {
    fn key(&self) -> &str {
        self.patient_id()
    }
}

impl Keyed for Doctor {
    fn key(&self) -> &str {
        self.doctor_id()
    }
}

/// Keyed collection that iterates in insertion order. Entries are never removed.
#[derive(Debug, Clone)]
pub struct Registry<T: Keyed> {
    items: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T: Keyed> Default for Registry<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T: Keyed> Registry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.index.get(key).map(|&i| &self.items[i])
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut T> {
        match self.index.get(key) {
            Some(&i) => self.items.get_mut(i),
            None => None,
        }
    }

    /// Inserts a new item. Returns false, leaving the registry unchanged, if
    /// the key is already taken.
    pub fn insert(&mut self, item: T) -> bool {
        if self.contains(item.key()) {
            return false;
        }
        self.index.insert(item.key().to_string(), self.items.len());
        self.items.push(item);
        true
    }

    /// Inserts or replaces in place; a replaced item keeps its position.
    pub fn upsert(&mut self, item: T) {
        match self.index.get(item.key()) {
            Some(&i) => self.items[i] = item,
            None => {
                self.index.insert(item.key().to_string(), self.items.len());
                self.items.push(item);
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
