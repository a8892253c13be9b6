//! Dense 1-based ordering for lists and todos.
//!
//! New rows are appended after the current maximum; a reorder rewrites the
//! listed rows to their positions in the supplied sequence. Both run on a
//! caller-owned transaction so they commit or roll back with the surrounding
//! writes.

use std::collections::HashSet;

use rusqlite::{params, Transaction};

use super::{Store, StoreError, Table};

/// A set of rows sharing one order sequence.
///
/// Todos are ordered within their parent list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Lists,
    Todos { list_id: i64 },
}

impl Collection {
    fn table(self) -> Table {
        match self {
            Collection::Lists => Table::Lists,
            Collection::Todos { .. } => Table::Todos,
        }
    }
}

/// First free order value in `collection`: current maximum plus one, or 1
/// when the collection is empty.
pub(crate) fn next_order(tx: &Transaction<'_>, collection: Collection) -> Result<i64, StoreError> {
    let max: Option<i64> = match collection {
        Collection::Lists => {
            tx.query_row("SELECT MAX(list_order) FROM lists", [], |row| row.get(0))?
        }
        Collection::Todos { list_id } => tx.query_row(
            "SELECT MAX(todo_order) FROM todos WHERE list_id = ?1",
            params![list_id],
            |row| row.get(0),
        )?,
    };
    Ok(max.unwrap_or(0).max(0) + 1)
}

/// Sets the order of `ids[i]` to `i + 1`.
///
/// Rows missing from `ids` keep their previous order. An id that matches no
/// row of the collection fails the whole call.
pub(crate) fn reorder_tx(
    tx: &Transaction<'_>,
    collection: Collection,
    ids: &[i64],
) -> Result<(), StoreError> {
    if ids.is_empty() {
        return Err(StoreError::InvalidInput(
            "order must be a non-empty array of ids".to_string(),
        ));
    }
    let mut seen = HashSet::with_capacity(ids.len());
    if let Some(dup) = ids.iter().find(|id| !seen.insert(**id)) {
        return Err(StoreError::InvalidInput(format!("id {dup} appears more than once in order")));
    }

    let mut stmt = match collection {
        Collection::Lists => tx.prepare("UPDATE lists SET list_order = ?1 WHERE list_id = ?2")?,
        Collection::Todos { .. } => tx.prepare(
            "UPDATE todos SET todo_order = ?1 WHERE todo_id = ?2 AND list_id = ?3",
        )?,
    };

    for (position, &id) in ids.iter().enumerate() {
        let order = position as i64 + 1;
        let changed = match collection {
            Collection::Lists => stmt.execute(params![order, id])?,
            Collection::Todos { list_id } => stmt.execute(params![order, id, list_id])?,
        };
        if changed == 0 {
            return Err(StoreError::NotFound {
                entity: collection.table().entity(),
                id,
            });
        }
    }
    Ok(())
}

impl Store {
    /// Rewrites the order of every listed row in one transaction.
    pub fn reorder(&mut self, collection: Collection, ids: &[i64]) -> Result<(), StoreError> {
        let tx = self.conn.transaction()?;
        reorder_tx(&tx, collection, ids)?;
        tx.commit()?;
        Ok(())
    }
}
