use crate::aggregate::{aggregate, AggregatePolicy};
use crate::domain::{ContactRecord, CustomerProfile, OrderRecord, PhoneKey, PhoneRule};
use crate::error::CoreError;
use crate::index::build_index;
use crate::matcher::{matched_keys, MatchOrder};
use crate::row::{convert_contacts, convert_orders, OrderColumns, RawRow, SdrColumns};
use crate::time::utc;
use chrono::FixedOffset;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogOptions {
    pub policy: AggregatePolicy,
    pub match_order: MatchOrder,
    pub sdr_columns: SdrColumns,
    pub order_columns: OrderColumns,
    pub utc_offset: FixedOffset,
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self {
            policy: AggregatePolicy::default(),
            match_order: MatchOrder::default(),
            sdr_columns: SdrColumns::default(),
            order_columns: OrderColumns::default(),
            utc_offset: utc(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildStats {
    pub sdr_rows: usize,
    pub order_rows: usize,
    pub sdr_unmatchable: usize,
    pub order_unmatchable: usize,
    pub sdr_keys: usize,
    pub order_keys: usize,
    pub matched: usize,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    profiles: Vec<CustomerProfile>,
    positions: HashMap<PhoneKey, usize>,
    phone_rule: PhoneRule,
    built_at: i64,
    stats: BuildStats,
}

impl Catalog {
    pub fn build(
        contacts: Vec<ContactRecord>,
        orders: Vec<OrderRecord>,
        now_utc: i64,
        options: &CatalogOptions,
    ) -> Result<Self, CoreError> {
        let phone_rule = &options.policy.phone;
        let mut sdr = build_index(contacts, phone_rule);
        let mut zomato = build_index(orders, phone_rule);
        let keys = matched_keys(&sdr, &zomato, options.match_order);

        let stats = BuildStats {
            sdr_rows: sdr.rows(),
            order_rows: zomato.rows(),
            sdr_unmatchable: sdr.unmatchable(),
            order_unmatchable: zomato.unmatchable(),
            sdr_keys: sdr.len(),
            order_keys: zomato.len(),
            matched: keys.len(),
            warnings: Vec::new(),
        };

        let mut profiles = Vec::with_capacity(keys.len());
        let mut positions = HashMap::with_capacity(keys.len());
        for key in keys {
            let contacts = sdr.take(&key);
            let orders = zomato.take(&key);
            positions.insert(key.clone(), profiles.len());
            profiles.push(aggregate(key, contacts, orders, now_utc, &options.policy)?);
        }

        Ok(Self {
            profiles,
            positions,
            phone_rule: phone_rule.clone(),
            built_at: now_utc,
            stats,
        })
    }

    pub fn from_rows(
        sdr_rows: &[RawRow],
        order_rows: &[RawRow],
        now_utc: i64,
        options: &CatalogOptions,
    ) -> Result<Self, CoreError> {
        let contacts = convert_contacts(sdr_rows, &options.sdr_columns);
        let orders = convert_orders(order_rows, &options.order_columns, options.utc_offset);

        let mut catalog = Self::build(contacts.records, orders.records, now_utc, options)?;
        catalog.stats.warnings = contacts
            .warnings
            .into_iter()
            .chain(orders.warnings)
            .collect();
        Ok(catalog)
    }

    pub fn count(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn get(&self, index: i64) -> Result<&CustomerProfile, CoreError> {
        usize::try_from(index)
            .ok()
            .and_then(|position| self.profiles.get(position))
            .ok_or(CoreError::IndexOutOfRange {
                index,
                count: self.count(),
            })
    }

    pub fn page(&self, page: i64) -> Result<&CustomerProfile, CoreError> {
        match page.checked_sub(1) {
            Some(index) if index >= 0 => self.get(index).map_err(|_| self.page_error(page)),
            _ => Err(self.page_error(page)),
        }
    }

    pub fn position(&self, key: &PhoneKey) -> Option<usize> {
        self.positions.get(key).copied()
    }

    pub fn position_of_phone(&self, raw: &str) -> Option<usize> {
        let key = self.phone_rule.normalize(raw);
        if key.is_empty() {
            return None;
        }
        self.position(&key)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CustomerProfile> {
        self.profiles.iter()
    }

    pub fn profiles(&self) -> &[CustomerProfile] {
        &self.profiles
    }

    pub fn phone_rule(&self) -> &PhoneRule {
        &self.phone_rule
    }

    pub fn built_at(&self) -> i64 {
        self.built_at
    }

    pub fn stats(&self) -> &BuildStats {
        &self.stats
    }

    fn page_error(&self, page: i64) -> CoreError {
        CoreError::PageOutOfRange {
            page,
            count: self.count(),
        }
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a CustomerProfile;
    type IntoIter = std::slice::Iter<'a, CustomerProfile>;

    fn into_iter(self) -> Self::IntoIter {
        self.profiles.iter()
    }
}

#[derive(Debug)]
pub struct SharedCatalog {
    current: RwLock<Arc<Catalog>>,
}

impl SharedCatalog {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            current: RwLock::new(Arc::new(catalog)),
        }
    }

    pub fn snapshot(&self) -> Arc<Catalog> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    pub fn publish(&self, catalog: Catalog) -> Arc<Catalog> {
        let next = Arc::new(catalog);
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, next)
    }
}
