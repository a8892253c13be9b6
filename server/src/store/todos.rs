use rusqlite::types::Value;
use rusqlite::{params, OptionalExtension, Row};

use super::order::{next_order, Collection};
use super::{delete_by_id, update_by_id, Store, StoreError, Table};
use crate::model::{NewTodo, Todo, TodoMapping};

/// Columns of `todos` a client may change directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoField {
    Msg(String),
    IsComplete(bool),
}

impl TodoField {
    fn assignment(&self) -> (&'static str, Value) {
        match self {
            TodoField::Msg(msg) => ("msg", Value::Text(msg.clone())),
            TodoField::IsComplete(done) => ("isComplete", Value::Integer(i64::from(*done))),
        }
    }
}

const SELECT_TODO: &str = "SELECT todo_id, list_id, msg, todo_order, isComplete FROM todos";

fn todo_from_row(row: &Row<'_>) -> rusqlite::Result<Todo> {
    Ok(Todo {
        todo_id: row.get(0)?,
        list_id: row.get(1)?,
        msg: row.get(2)?,
        todo_order: row.get(3)?,
        is_complete: row.get(4)?,
    })
}

impl Store {
    /// All todos, grouped by list and in display order within each list.
    pub fn todos(&self) -> Result<Vec<Todo>, StoreError> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SELECT_TODO} ORDER BY list_id, todo_order, todo_id"))?;
        let rows = stmt.query_map([], todo_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn todo(&self, todo_id: i64) -> Result<Todo, StoreError> {
        self.conn
            .query_row(
                &format!("{SELECT_TODO} WHERE todo_id = ?1"),
                params![todo_id],
                todo_from_row,
            )
            .optional()?
            .ok_or(StoreError::NotFound {
                entity: "Todo",
                id: todo_id,
            })
    }

    /// Appends `todos` to the end of list `list_id`.
    ///
    /// A missing parent list surfaces as [`StoreError::ForeignKey`] and rolls
    /// back the whole batch.
    pub fn create_todos(
        &mut self,
        list_id: i64,
        todos: &[NewTodo],
    ) -> Result<Vec<TodoMapping>, StoreError> {
        if todos.is_empty() {
            return Err(StoreError::InvalidInput("todos must be a non-empty array".to_string()));
        }

        let tx = self.conn.transaction()?;
        let mut mappings = Vec::with_capacity(todos.len());
        {
            let mut next = next_order(&tx, Collection::Todos { list_id })?;
            let mut insert = tx.prepare(
                "INSERT INTO todos (list_id, msg, todo_order, isComplete) VALUES (?1, ?2, ?3, 0)",
            )?;
            for todo in todos {
                let real_id = insert.insert(params![list_id, todo.msg, next])?;
                mappings.push(TodoMapping {
                    temp_id: todo.temp_id.clone(),
                    real_id,
                    parent_id: list_id,
                    msg: todo.msg.clone(),
                    todo_order: next,
                });
                next += 1;
            }
        }
        tx.commit()?;
        Ok(mappings)
    }

    pub fn create_todo(&mut self, list_id: i64, msg: &str) -> Result<Todo, StoreError> {
        let new = NewTodo {
            temp_id: None,
            msg: msg.to_string(),
        };
        let mapping = self
            .create_todos(list_id, std::slice::from_ref(&new))?
            .pop()
            .ok_or_else(|| StoreError::InvalidInput("no todo was inserted".to_string()))?;
        Ok(mapping.into())
    }

    pub fn update_todo(&mut self, todo_id: i64, fields: &[TodoField]) -> Result<(), StoreError> {
        if fields.is_empty() {
            return Err(StoreError::InvalidInput("no fields to update".to_string()));
        }
        let tx = self.conn.transaction()?;
        for field in fields {
            let (column, value) = field.assignment();
            update_by_id(&tx, Table::Todos, todo_id, column, value)?;
        }
        tx.commit()?;
        Ok(())
    }

    pub fn delete_todo(&self, todo_id: i64) -> Result<(), StoreError> {
        delete_by_id(&self.conn, Table::Todos, todo_id)
    }
}
