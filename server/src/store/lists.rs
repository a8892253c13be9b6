use rusqlite::types::Value;
use rusqlite::{params, OptionalExtension, Row};

use super::order::{next_order, Collection};
use super::{delete_by_id, update_by_id, Store, StoreError, Table};
use crate::model::{List, ListMapping, NewList};

/// Columns of `lists` a client may change directly. `list_order` is only
/// written through [`Store::reorder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListField {
    Title(String),
}

impl ListField {
    fn assignment(&self) -> (&'static str, Value) {
        match self {
            ListField::Title(title) => ("title", Value::Text(title.clone())),
        }
    }
}

fn list_from_row(row: &Row<'_>) -> rusqlite::Result<List> {
    Ok(List {
        list_id: row.get(0)?,
        title: row.get(1)?,
        list_order: row.get(2)?,
    })
}

impl Store {
    pub fn lists(&self) -> Result<Vec<List>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT list_id, title, list_order FROM lists ORDER BY list_order, list_id")?;
        let rows = stmt.query_map([], list_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn list(&self, list_id: i64) -> Result<List, StoreError> {
        self.conn
            .query_row(
                "SELECT list_id, title, list_order FROM lists WHERE list_id = ?1",
                params![list_id],
                list_from_row,
            )
            .optional()?
            .ok_or(StoreError::NotFound {
                entity: "List",
                id: list_id,
            })
    }

    /// Inserts `lists` in order, appending them after the current last list.
    ///
    /// Returns one mapping per input, in input order. Either every list is
    /// stored or none is.
    pub fn create_lists(&mut self, lists: &[NewList]) -> Result<Vec<ListMapping>, StoreError> {
        if lists.is_empty() {
            return Err(StoreError::InvalidInput("lists must be a non-empty array".to_string()));
        }

        let tx = self.conn.transaction()?;
        let mut mappings = Vec::with_capacity(lists.len());
        {
            let mut next = next_order(&tx, Collection::Lists)?;
            let mut insert = tx.prepare("INSERT INTO lists (title, list_order) VALUES (?1, ?2)")?;
            for list in lists {
                let real_id = insert.insert(params![list.title, next])?;
                mappings.push(ListMapping {
                    temp_id: list.temp_id.clone(),
                    real_id,
                    title: list.title.clone(),
                    list_order: next,
                });
                next += 1;
            }
        }
        tx.commit()?;
        Ok(mappings)
    }

    pub fn create_list(&mut self, title: &str) -> Result<List, StoreError> {
        let new = NewList {
            temp_id: None,
            title: title.to_string(),
        };
        let mapping = self
            .create_lists(std::slice::from_ref(&new))?
            .pop()
            .ok_or_else(|| StoreError::InvalidInput("no list was inserted".to_string()))?;
        Ok(mapping.into())
    }

    pub fn update_list(&mut self, list_id: i64, fields: &[ListField]) -> Result<(), StoreError> {
        if fields.is_empty() {
            return Err(StoreError::InvalidInput("no fields to update".to_string()));
        }
        let tx = self.conn.transaction()?;
        for field in fields {
            let (column, value) = field.assignment();
            update_by_id(&tx, Table::Lists, list_id, column, value)?;
        }
        tx.commit()?;
        Ok(())
    }

    /// Deletes the list; its todos go with it via the foreign-key cascade.
    pub fn delete_list(&self, list_id: i64) -> Result<(), StoreError> {
        delete_by_id(&self.conn, Table::Lists, list_id)
    }
}
