//! Selected consignment set and its running totals
//!
//! A weight total that overflows `Decimal` is reported as zero, the same as
//! every other overflowing amount in [`crate::service::settlement`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use lorry_hire_types::EntityId;

use crate::model::{Consignment, ConsignmentRecord};

/// Package and weight totals over the selected consignments
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub total_packages: u64,
    /// Kilograms
    pub total_weight: Decimal,
}

/// Sum packages and net weight from scratch
pub fn compute_totals(consignments: &[Consignment]) -> Totals {
    let total_packages = consignments
        .iter()
        .fold(0u64, |acc, cn| acc.saturating_add(cn.packages));
    let total_weight = consignments
        .iter()
        .try_fold(Decimal::ZERO, |acc, cn| acc.checked_add(cn.net_weight))
        .unwrap_or(Decimal::ZERO);

    Totals {
        total_packages,
        total_weight,
    }
}

/// Ordered set of consignments on one challan, unique by id
///
/// Totals are recomputed after every mutation, never patched incrementally.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectedConsignments {
    items: Vec<Consignment>,
    totals: Totals,
}

impl SelectedConsignments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from backend rows, dropping duplicate ids
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = ConsignmentRecord>,
    {
        let mut set = Self::new();
        for record in records {
            set.insert(record.normalize());
        }
        set.refresh();
        set
    }

    /// Add a consignment; returns false if its id is already selected
    pub fn add(&mut self, record: impl Into<ConsignmentRecord>) -> bool {
        self.add_consignment(record.into().normalize())
    }

    pub fn add_consignment(&mut self, consignment: Consignment) -> bool {
        let added = self.insert(consignment);
        if added {
            self.refresh();
        }
        added
    }

    /// Remove by id; returns false if it was not selected
    pub fn remove(&mut self, id: EntityId) -> bool {
        let before = self.items.len();
        self.items.retain(|cn| cn.id != id);
        let removed = self.items.len() != before;
        if removed {
            self.refresh();
        }
        removed
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.refresh();
    }

    pub fn totals(&self) -> Totals {
        self.totals
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.items.iter().any(|cn| cn.id == id)
    }

    pub fn ids(&self) -> Vec<EntityId> {
        self.items.iter().map(|cn| cn.id).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Consignment> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Consignment] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn insert(&mut self, consignment: Consignment) -> bool {
        if self.contains(consignment.id) {
            return false;
        }
        self.items.push(consignment);
        true
    }

    fn refresh(&mut self) {
        self.totals = compute_totals(&self.items);
    }
}

impl<'a> IntoIterator for &'a SelectedConsignments {
    type Item = &'a Consignment;
    type IntoIter = std::slice::Iter<'a, Consignment>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
