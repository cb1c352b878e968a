//! Raw tabular store contract.
//!
//! The row-oriented surface a spreadsheet-like backend exposes: ranged reads,
//! appends, and ranged overwrites, with string cells. The tabular adapter
//! translates the key-indexed `SlotStore`/`BookingStore` ports onto this, so
//! row-index derivation lives in exactly one place.

use async_trait::async_trait;

use crate::domain::foundation::StoreError;

/// One row of string cells.
pub type Row = Vec<String>;

/// Row-oriented storage contract.
///
/// Ranges use the backend's own notation (for a spreadsheet, `A2:D`). No
/// transactional guarantees are assumed beyond read-after-write consistency;
/// conditional-write semantics, where the backend offers them, are an adapter
/// concern.
#[async_trait]
pub trait TabularStore: Send + Sync {
    /// Reads all rows of a range within a table.
    async fn get_rows(&self, table: &str, range: &str) -> Result<Vec<Row>, StoreError>;

    /// Appends rows at the bottom of a table.
    async fn append_rows(&self, table: &str, rows: Vec<Row>) -> Result<(), StoreError>;

    /// Overwrites the cells of a range with the given values.
    async fn update_range(
        &self,
        table: &str,
        range: &str,
        values: Vec<Row>,
    ) -> Result<(), StoreError>;
}
