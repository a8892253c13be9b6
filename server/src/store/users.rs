use rusqlite::{params, OptionalExtension, Row};

use super::{Store, StoreError};
use crate::model::User;

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
    })
}

impl Store {
    pub fn users(&self) -> Result<Vec<User>, StoreError> {
        let mut stmt = self.conn.prepare("SELECT id, name, email FROM users ORDER BY id")?;
        let rows = stmt.query_map([], user_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn user(&self, id: i64) -> Result<User, StoreError> {
        self.conn
            .query_row(
                "SELECT id, name, email FROM users WHERE id = ?1",
                params![id],
                user_from_row,
            )
            .optional()?
            .ok_or(StoreError::NotFound { entity: "User", id })
    }

    /// Returns the new user's id. A duplicate email is a
    /// [`StoreError::Constraint`].
    pub fn create_user(&self, name: &str, email: &str) -> Result<i64, StoreError> {
        self.conn.execute(
            "INSERT INTO users (name, email) VALUES (?1, ?2)",
            params![name, email],
        )?;
        Ok(self.conn.last_insert_rowid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_and_fetch_user() {
        let store = Store::open_in_memory().unwrap();
        let id = store.create_user("Ada", "ada@example.com").unwrap();

        let user = store.user(id).unwrap();
        assert_eq!(user.name, "Ada");
        assert_eq!(user.email, "ada@example.com");
        assert_eq!(store.users().unwrap(), vec![user]);
    }

    #[test]
    fn duplicate_email_is_a_constraint_violation() {
        let store = Store::open_in_memory().unwrap();
        store.create_user("Ada", "ada@example.com").unwrap();

        let err = store.create_user("Other", "ada@example.com").unwrap_err();
        assert!(matches!(err, StoreError::Constraint(_)));
        assert_eq!(store.users().unwrap().len(), 1);
    }

    #[test]
    fn missing_user_is_not_found() {
        let store = Store::open_in_memory().unwrap();
        assert!(matches!(
            store.user(1),
            Err(StoreError::NotFound { entity: "User", id: 1 })
        ));
    }
}
