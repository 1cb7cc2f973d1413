use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::account::errors::AuthError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::ports::AccountRepository;

pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AccountRow {
    id: Uuid,
    email: String,
    password_hash: String,
    stored_token: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<AccountRow> for Account {
    type Error = AuthError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        // A stored address that no longer parses is a data problem, not caller input
        let email = EmailAddress::new(row.email).map_err(|e| {
            tracing::error!(account_id = %row.id, error = %e, "Corrupt email in stored account");
            AuthError::Storage(format!("corrupt stored account {}: {}", row.id, e))
        })?;

        Ok(Account {
            id: AccountId(row.id),
            email,
            password_hash: row.password_hash,
            stored_token: row.stored_token,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AuthError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, email, password_hash, stored_token, created_at
            FROM accounts
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::Storage(e.to_string()))?;

        row.map(Account::try_from).transpose()
    }

    async fn find_by_stored_token(&self, token: &str) -> Result<Option<Account>, AuthError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, email, password_hash, stored_token, created_at
            FROM accounts
            WHERE stored_token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::Storage(e.to_string()))?;

        row.map(Account::try_from).transpose()
    }

    async fn save(&self, account: &Account) -> Result<(), AuthError> {
        sqlx::query(
            r#"
            INSERT INTO accounts (id, email, password_hash, stored_token, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE
            SET email = EXCLUDED.email,
                password_hash = EXCLUDED.password_hash,
                stored_token = EXCLUDED.stored_token
            "#,
        )
        .bind(account.id.0)
        .bind(account.email.as_str())
        .bind(&account.password_hash)
        .bind(account.stored_token.as_deref())
        .bind(account.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some("accounts_email_key")
                {
                    return AuthError::DuplicateEmail(account.email.to_string());
                }
            }
            tracing::error!(account_id = %account.id, error = %e, "Failed to persist account");
            AuthError::Storage(e.to_string())
        })?;

        Ok(())
    }
}
