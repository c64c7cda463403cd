use tracing::info;

use crate::database::manager::DatabaseError;
use crate::database::repository::Repository;
use crate::database::store::{BulkWriteSummary, OrderEntry};
use crate::models::Document;

/// Apply a client-supplied ordering to one collection in a single bulk write.
///
/// Entries naming unknown ids are unmatched rather than rejected, and an empty
/// batch yields zero counts. The batch is not atomic as a whole.
pub async fn reorder<T: Document>(
    repo: &Repository<T>,
    entries: &[OrderEntry],
) -> Result<BulkWriteSummary, DatabaseError> {
    let summary = repo.bulk_set_order(entries).await?;
    info!(
        collection = %T::COLLECTION,
        requested = entries.len(),
        matched = summary.matched_count,
        modified = summary.modified_count,
        "Reordered documents"
    );
    Ok(summary)
}
