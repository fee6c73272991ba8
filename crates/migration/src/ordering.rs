//! The one place migrations and records get sorted by version.

use crate::model::{Migration, MigrationRecord};
use crate::version::Version;

pub trait Versioned {
    fn version(&self) -> Version;
}

impl Versioned for Migration {
    fn version(&self) -> Version {
        self.version
    }
}

impl Versioned for MigrationRecord {
    fn version(&self) -> Version {
        self.version
    }
}

/// Stable ascending sort; entries with equal versions keep their input order.
pub fn ascending<T: Versioned>(items: &[T]) -> Vec<&T> {
    let mut sorted: Vec<&T> = items.iter().collect();
    sorted.sort_by_key(|item| item.version());
    sorted
}

pub fn descending<T: Versioned>(items: &[T]) -> Vec<&T> {
    let mut sorted: Vec<&T> = items.iter().collect();
    sorted.sort_by(|a, b| b.version().cmp(&a.version()));
    sorted
}

pub fn highest<T: Versioned>(items: &[T]) -> Option<Version> {
    descending(items).first().map(|item| item.version())
}
