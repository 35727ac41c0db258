//! # Detail Batch Insert
//!
//! Shared write path for `orders_detail` and `sales_detail`.
//!
//! SQLite caps bound parameters per statement (32766), and each row binds
//! five. Rows are written in chunks of [`MAX_ROWS_PER_INSERT`] inside one
//! transaction, so a batch still lands whole or not at all.

use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use joshub_core::DetailRow;

/// Rows per `INSERT` statement (5 binds each).
pub const MAX_ROWS_PER_INSERT: usize = 1_000;

/// Inserts `rows` into `table`, writing `parent_id` to `parent_column`.
///
/// Insertion order is kept across chunks. An empty slice is a no-op.
pub(crate) async fn insert_detail_rows(
    pool: &SqlitePool,
    table: &str,
    parent_column: &str,
    rows: &[DetailRow],
) -> DbResult<u64> {
    if rows.is_empty() {
        return Ok(0);
    }

    let mut tx = pool.begin().await?;
    let mut inserted = 0;

    for chunk in rows.chunks(MAX_ROWS_PER_INSERT) {
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
            "INSERT INTO {} ({}, product_code, quantity, price_cents, total_cents) ",
            table, parent_column
        ));
        builder.push_values(chunk, |mut b, row| {
            b.push_bind(row.parent_id)
                .push_bind(row.product_code.clone())
                .push_bind(row.quantity)
                .push_bind(row.price_cents)
                .push_bind(row.total_cents);
        });

        inserted += builder.build().execute(&mut *tx).await?.rows_affected();
    }

    tx.commit().await?;

    debug!(table, count = inserted, "Detail rows committed");
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Database;
    use crate::repository::order::NewOrder;
    use crate::repository::test_support::{seed_parties, test_db};

    async fn order_id(db: &Database) -> i64 {
        let (customer, employee) = seed_parties(db).await;
        db.orders()
            .insert_header(&NewOrder {
                customer_id: customer,
                employee_id: employee,
                address: "Calle 10 # 5-20".to_string(),
                total_cents: 0,
            })
            .await
            .unwrap()
            .id
    }

    fn rows(order_id: i64, count: usize) -> Vec<DetailRow> {
        (0..count)
            .map(|i| DetailRow {
                parent_id: order_id,
                product_code: if i % 2 == 0 { "A" } else { "B" }.to_string(),
                quantity: i as i64 + 1,
                price_cents: 10,
                total_cents: (i as i64 + 1) * 10,
            })
            .collect()
    }

    #[tokio::test]
    async fn test_batch_larger_than_one_statement() {
        let db = test_db().await;
        let id = order_id(&db).await;
        let batch = rows(id, MAX_ROWS_PER_INSERT * 7 + 1);

        let inserted = db.orders().insert_details(&batch).await.unwrap();
        assert_eq!(inserted, batch.len() as u64);

        let stored = db.orders().get_details(id).await.unwrap();
        assert_eq!(stored.len(), batch.len());
        let quantities: Vec<i64> = stored.iter().map(|d| d.quantity).collect();
        let expected: Vec<i64> = (1..=batch.len() as i64).collect();
        assert_eq!(quantities, expected);
    }

    #[tokio::test]
    async fn test_failure_in_later_chunk_discards_earlier_chunks() {
        let db = test_db().await;
        let id = order_id(&db).await;

        let mut batch = rows(id, MAX_ROWS_PER_INSERT * 2);
        if let Some(last) = batch.last_mut() {
            last.product_code = "NOPE".to_string();
        }

        let err = db.orders().insert_details(&batch).await.unwrap_err();
        assert!(err.is_foreign_key_violation());
        assert_eq!(db.orders().count_details().await.unwrap(), 0);
    }
}
