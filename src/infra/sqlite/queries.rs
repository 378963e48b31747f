use std::path::Path;

use anyhow::{Context, Result};
use indexmap::IndexMap;
use rusqlite::params;

use crate::infra::sqlite::schema::open_connection;

pub fn upsert_column_visibility(
    db_path: &Path,
    table_key: &str,
    visibility: &IndexMap<String, bool>,
) -> Result<()> {
    let mut conn = open_connection(db_path)?;
    let tx = conn
        .transaction()
        .context("failed to start column visibility transaction")?;

    tx.execute(
        "DELETE FROM column_visibility WHERE table_key = ?1",
        [table_key],
    )
    .context("failed to clear existing column visibility")?;

    let mut insert_stmt = tx
        .prepare(
            "INSERT INTO column_visibility(table_key, column_key, position, visible)
             VALUES (?1, ?2, ?3, ?4)",
        )
        .context("failed to prepare column visibility insert")?;

    for (position, (column_key, visible)) in visibility.iter().enumerate() {
        let value = if *visible { 1 } else { 0 };
        insert_stmt
            .execute(params![table_key, column_key, position as i64, value])
            .with_context(|| format!("failed to insert column visibility for {column_key}"))?;
    }

    drop(insert_stmt);
    tx.commit()
        .context("failed to commit column visibility updates")?;
    Ok(())
}

pub fn load_column_visibility(db_path: &Path, table_key: &str) -> Result<IndexMap<String, bool>> {
    let conn = open_connection(db_path)?;
    let mut stmt = conn
        .prepare(
            "SELECT column_key, visible
             FROM column_visibility
             WHERE table_key = ?1
             ORDER BY position ASC",
        )
        .context("failed to prepare column visibility query")?;

    let visibility_iter = stmt
        .query_map([table_key], |row| {
            let column_key: String = row.get(0)?;
            let visible: i64 = row.get(1)?;
            Ok((column_key, visible != 0))
        })
        .context("failed to query column visibility")?;

    let mut visibility = IndexMap::new();
    for item in visibility_iter {
        let (column_key, visible) = item.context("failed to read column visibility row")?;
        visibility.insert(column_key, visible);
    }

    Ok(visibility)
}

pub fn delete_column_visibility(db_path: &Path, table_key: &str) -> Result<()> {
    let conn = open_connection(db_path)?;
    conn.execute(
        "DELETE FROM column_visibility WHERE table_key = ?1",
        [table_key],
    )
    .context("failed to delete column visibility")?;
    Ok(())
}
