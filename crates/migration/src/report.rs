use crate::error::MigrationError;
use crate::model::{Info, Migration, MigrationRecord, Status};
use crate::ordering::{ascending, highest};
use crate::validate::validate;
use crate::version::Version;
use std::collections::HashMap;

/// Status of every migration in the set, ascending by version.
///
/// Fails with the validation error when the inputs are inconsistent. Never
/// executes anything.
pub fn info(
    migrations: &[Migration],
    records: &[MigrationRecord],
) -> Result<Vec<Info>, MigrationError> {
    validate(migrations, records)?;

    let by_version: HashMap<Version, &MigrationRecord> =
        records.iter().map(|r| (r.version, r)).collect();
    let last = highest(records);

    let infos = ascending(migrations)
        .into_iter()
        .map(|migration| {
            let record = by_version.get(&migration.version).copied();
            Info {
                migration: migration.clone(),
                status: classify(migration, record, last),
                record: record.cloned(),
            }
        })
        .collect();

    Ok(infos)
}

fn classify(
    migration: &Migration,
    record: Option<&MigrationRecord>,
    last: Option<Version>,
) -> Status {
    match record {
        Some(r) if !r.success => Status::Error,
        Some(r) if r.checksum == migration.checksum() => Status::Applied,
        Some(_) => Status::Error,
        None => match last {
            Some(last) if last > migration.version => Status::Ignored,
            _ => Status::Pending,
        },
    }
}
