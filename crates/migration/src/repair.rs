use crate::error::MigrationError;
use crate::model::{Migration, MigrationRecord};
use crate::ordering::ascending;
use crate::validate::check_structure;

/// Migrations whose recorded checksum no longer matches their script,
/// ascending by version.
///
/// Every other validation check still applies, so a removed or duplicate
/// migration fails here exactly as it does in `validate`.
pub fn drifted<'a>(
    migrations: &'a [Migration],
    records: &[MigrationRecord],
) -> Result<Vec<&'a Migration>, MigrationError> {
    let by_version = check_structure(migrations, records)?;

    let drifted = ascending(records)
        .into_iter()
        .filter_map(|record| {
            let migration = by_version.get(&record.version).copied()?;
            (migration.checksum() != record.checksum).then_some(migration)
        })
        .collect();

    Ok(drifted)
}
