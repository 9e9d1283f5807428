//! SQLite user and password-reset store.

use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

use super::database::connection::DbPool;
use super::database::model::{NewResetTokenRow, NewUserRow, ResetTokenRow, UserRow};
use super::database::schema::{password_reset_tokens, users};
use crate::domain::{NewUser, PasswordResetToken, User};
use crate::error::{Error, Result};
use crate::port::AccountStore;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// SQLite-backed [`AccountStore`].
#[derive(Clone)]
pub struct SqliteAccountStore {
    pool: DbPool,
}

impl SqliteAccountStore {
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn user_from_row(row: UserRow) -> Result<User> {
        Ok(User {
            id: row.id,
            email: row.email,
            password_hash: row.password_hash,
            name: row.name,
            created_at: parse_timestamp(&row.created_at)?,
        })
    }

    fn token_from_row(row: ResetTokenRow) -> Result<PasswordResetToken> {
        Ok(PasswordResetToken {
            id: row.id,
            user_id: row.user_id,
            token: row.token,
            expires_at: parse_timestamp(&row.expires_at)?,
            used: row.used,
        })
    }
}

pub(crate) fn format_timestamp(value: NaiveDateTime) -> String {
    value.format(TIMESTAMP_FORMAT).to_string()
}

fn parse_timestamp(value: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .map_err(|e| Error::Parse(format!("invalid stored timestamp {value:?}: {e}")))
}

impl AccountStore for SqliteAccountStore {
    fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let mut conn = self.pool.get()?;
        users::table
            .filter(users::email.eq(email))
            .filter(users::deleted_at.is_null())
            .select(UserRow::as_select())
            .first(&mut conn)
            .optional()?
            .map(Self::user_from_row)
            .transpose()
    }

    fn find_user(&self, id: i32) -> Result<Option<User>> {
        let mut conn = self.pool.get()?;
        users::table
            .find(id)
            .filter(users::deleted_at.is_null())
            .select(UserRow::as_select())
            .first(&mut conn)
            .optional()?
            .map(Self::user_from_row)
            .transpose()
    }

    fn create_user(&self, user: NewUser<'_>) -> Result<Option<User>> {
        let mut conn = self.pool.get()?;
        let now = format_timestamp(Utc::now().naive_utc());
        let row = NewUserRow {
            email: user.email,
            password_hash: user.password_hash,
            name: user.name,
            created_at: &now,
            updated_at: &now,
        };

        let inserted = conn.transaction::<_, DieselError, _>(|conn| {
            diesel::insert_into(users::table).values(&row).execute(conn)?;
            users::table
                .filter(users::email.eq(user.email))
                .select(UserRow::as_select())
                .first(conn)
        });

        match inserted {
            Ok(row) => Self::user_from_row(row).map(Some),
            Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save_reset_token(
        &self,
        user_id: i32,
        token: &str,
        expires_at: NaiveDateTime,
    ) -> Result<()> {
        let mut conn = self.pool.get()?;
        let expires_at = format_timestamp(expires_at);
        let created_at = format_timestamp(Utc::now().naive_utc());
        diesel::insert_into(password_reset_tokens::table)
            .values(NewResetTokenRow {
                user_id,
                token,
                expires_at: &expires_at,
                used: false,
                created_at: &created_at,
            })
            .execute(&mut conn)?;
        Ok(())
    }

    fn find_reset_token(&self, token: &str) -> Result<Option<PasswordResetToken>> {
        let mut conn = self.pool.get()?;
        password_reset_tokens::table
            .filter(password_reset_tokens::token.eq(token))
            .select(ResetTokenRow::as_select())
            .first(&mut conn)
            .optional()?
            .map(Self::token_from_row)
            .transpose()
    }

    fn complete_reset(&self, token: &PasswordResetToken, password_hash: &str) -> Result<bool> {
        let mut conn = self.pool.get()?;
        let now = format_timestamp(Utc::now().naive_utc());
        let completed = conn.transaction::<_, DieselError, _>(|conn| {
            let claimed = diesel::update(
                password_reset_tokens::table
                    .find(token.id)
                    .filter(password_reset_tokens::used.eq(false)),
            )
            .set(password_reset_tokens::used.eq(true))
            .execute(conn)?;
            if claimed == 0 {
                return Ok(false);
            }
            diesel::update(users::table.find(token.user_id))
                .set((
                    users::password_hash.eq(password_hash),
                    users::updated_at.eq(&now),
                ))
                .execute(conn)?;
            Ok(true)
        })?;
        Ok(completed)
    }
}
