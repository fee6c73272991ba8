use crate::error::MigrationError;
use crate::model::{Migration, MigrationRecord};
use crate::ordering::ascending;
use crate::version::Version;
use std::collections::HashMap;

/// Checks the migration set on its own and against the applied records.
///
/// Checks run in a fixed order and the first failure is returned:
/// negative versions, duplicate versions, recorded versions missing from the
/// set, then checksum drift.
pub fn validate(
    migrations: &[Migration],
    records: &[MigrationRecord],
) -> Result<(), MigrationError> {
    let by_version = check_structure(migrations, records)?;

    for record in ascending(records) {
        let Some(migration) = by_version.get(&record.version) else {
            continue;
        };

        let current = migration.checksum();
        if current != record.checksum {
            return Err(MigrationError::InvalidChecksum {
                version: record.version,
                recorded: record.checksum.clone(),
                current,
            });
        }
    }

    Ok(())
}

/// Every check except drift. Returns the set indexed by version.
pub(crate) fn check_structure<'a>(
    migrations: &'a [Migration],
    records: &[MigrationRecord],
) -> Result<HashMap<Version, &'a Migration>, MigrationError> {
    let sorted = ascending(migrations);

    if let Some(m) = sorted.iter().find(|m| m.version.is_negative()) {
        return Err(MigrationError::IllegalVersion { version: m.version });
    }

    for pair in sorted.windows(2) {
        if pair[0].version == pair[1].version {
            return Err(MigrationError::DuplicateVersion {
                version: pair[1].version,
            });
        }
    }

    let by_version: HashMap<Version, &Migration> =
        migrations.iter().map(|m| (m.version, m)).collect();

    if let Some(record) = ascending(records)
        .into_iter()
        .find(|r| !by_version.contains_key(&r.version))
    {
        return Err(MigrationError::RemovedMigration {
            version: record.version,
        });
    }

    Ok(by_version)
}
