use crate::domain::{ContactRecord, OrderRecord, PhoneKey, PhoneRule};
use std::collections::BTreeMap;

pub trait PhoneField {
    fn raw_phone(&self) -> &str;
}

impl PhoneField for ContactRecord {
    fn raw_phone(&self) -> &str {
        &self.phone
    }
}

impl PhoneField for OrderRecord {
    fn raw_phone(&self) -> &str {
        &self.phone
    }
}

#[derive(Debug, Clone)]
pub struct PhoneIndex<T> {
    groups: BTreeMap<PhoneKey, Vec<T>>,
    first_seen: Vec<PhoneKey>,
    rows: usize,
}

impl<T> Default for PhoneIndex<T> {
    fn default() -> Self {
        Self {
            groups: BTreeMap::new(),
            first_seen: Vec::new(),
            rows: 0,
        }
    }
}

impl<T> PhoneIndex<T> {
    pub fn get(&self, key: &PhoneKey) -> Option<&[T]> {
        self.groups.get(key).map(Vec::as_slice)
    }

    pub fn contains(&self, key: &PhoneKey) -> bool {
        self.groups.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &PhoneKey> {
        self.groups.keys().filter(|key| !key.is_empty())
    }

    pub fn first_seen(&self) -> &[PhoneKey] {
        &self.first_seen
    }

    pub fn len(&self) -> usize {
        self.first_seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.first_seen.is_empty()
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn unmatchable(&self) -> usize {
        self.groups.get(&PhoneKey::empty()).map_or(0, Vec::len)
    }

    pub(crate) fn take(&mut self, key: &PhoneKey) -> Vec<T> {
        self.groups.remove(key).unwrap_or_default()
    }
}

pub fn build_index<T, I>(rows: I, rule: &PhoneRule) -> PhoneIndex<T>
where
    T: PhoneField,
    I: IntoIterator<Item = T>,
{
    let mut index = PhoneIndex::default();
    for row in rows {
        let key = rule.normalize(row.raw_phone());
        index.rows += 1;
        let group = index.groups.entry(key.clone()).or_default();
        if group.is_empty() && !key.is_empty() {
            index.first_seen.push(key);
        }
        group.push(row);
    }
    index
}
