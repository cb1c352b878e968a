//! A spreadsheet-shaped fake for adapter tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::StoreError;
use crate::ports::{Row, TabularStore};

/// Holds each table as a plain list of data rows (the implicit header row
/// of the real backend is not stored, so data row N lives at index N-2).
/// Understands just enough A1 notation for the ranges the adapters write.
#[derive(Default)]
pub struct FakeTabular {
    tables: RwLock<HashMap<String, Vec<Row>>>,
}

impl FakeTabular {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Parses the leading cell of a range like `G5` or `C5:D5` into
/// (column index, data row index).
fn parse_cell(range: &str) -> Result<(usize, usize), StoreError> {
    let cell = range.split(':').next().unwrap_or("");
    let column = cell
        .chars()
        .next()
        .filter(char::is_ascii_uppercase)
        .map(|c| c as usize - 'A' as usize)
        .ok_or_else(|| StoreError::unavailable(format!("bad range '{range}'")))?;
    let row: usize = cell[1..]
        .parse()
        .map_err(|_| StoreError::unavailable(format!("bad range '{range}'")))?;
    if row < 2 {
        return Err(StoreError::unavailable(format!(
            "range '{range}' addresses the header row"
        )));
    }
    Ok((column, row - 2))
}

#[async_trait]
impl TabularStore for FakeTabular {
    async fn get_rows(&self, table: &str, _range: &str) -> Result<Vec<Row>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.get(table).cloned().unwrap_or_default())
    }

    async fn append_rows(&self, table: &str, rows: Vec<Row>) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        tables.entry(table.to_string()).or_default().extend(rows);
        Ok(())
    }

    async fn update_range(
        &self,
        table: &str,
        range: &str,
        values: Vec<Row>,
    ) -> Result<(), StoreError> {
        let (column, row_index) = parse_cell(range)?;
        let mut tables = self.tables.write().await;
        let rows = tables
            .get_mut(table)
            .ok_or_else(|| StoreError::row_not_found(format!("{table}!{range}")))?;
        for (offset, value_row) in values.into_iter().enumerate() {
            let row = rows
                .get_mut(row_index + offset)
                .ok_or_else(|| StoreError::row_not_found(format!("{table}!{range}")))?;
            for (cell_offset, value) in value_row.into_iter().enumerate() {
                let index = column + cell_offset;
                if row.len() <= index {
                    row.resize(index + 1, String::new());
                }
                row[index] = value;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn update_range_rewrites_the_addressed_cells() {
        let fake = FakeTabular::new();
        fake.append_rows(
            "T",
            vec![
                vec!["a".into(), "b".into()],
                vec!["c".into(), "d".into()],
            ],
        )
        .await
        .unwrap();

        fake.update_range("T", "B3", vec![vec!["x".into()]]).await.unwrap();

        let rows = fake.get_rows("T", "A2:B").await.unwrap();
        assert_eq!(rows[1], vec!["c".to_string(), "x".to_string()]);
        assert_eq!(rows[0], vec!["a".to_string(), "b".to_string()]);
    }

    #[tokio::test]
    async fn update_past_the_last_row_fails() {
        let fake = FakeTabular::new();
        fake.append_rows("T", vec![vec!["a".into()]]).await.unwrap();

        let err = fake
            .update_range("T", "A9", vec![vec!["x".into()]])
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::RowNotFound { .. }));
    }
}
