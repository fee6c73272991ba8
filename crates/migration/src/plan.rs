use crate::model::{Migration, MigrationRecord};
use crate::ordering::{ascending, highest};

/// Migrations still to run, in ascending version order.
///
/// Only versions above the highest recorded one are returned. A version
/// below that tip which was never applied stays unapplied.
pub fn plan<'a>(
    migrations: &'a [Migration],
    records: &[MigrationRecord],
) -> Vec<&'a Migration> {
    let sorted = ascending(migrations);

    match highest(records) {
        None => sorted,
        Some(last) => sorted.into_iter().filter(|m| m.version > last).collect(),
    }
}
