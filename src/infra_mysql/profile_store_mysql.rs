use super::util::{is_decode_error, is_timeout};
use crate::domain_model::*;
use crate::domain_port::*;
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};

pub struct MySqlProfileStore {
    pool: MySqlPool,
}

impl MySqlProfileStore {
    pub fn new(pool: MySqlPool) -> Self {
        MySqlProfileStore { pool }
    }
}

fn to_store_error(context: &str, err: sqlx::Error) -> ProfileStoreError {
    if is_timeout(&err) {
        ProfileStoreError::Timeout
    } else if is_decode_error(&err) {
        ProfileStoreError::Malformed(format!("{context}: {err}"))
    } else {
        ProfileStoreError::Store(format!("{context}: {err}"))
    }
}

fn decode_identity(row: &MySqlRow) -> Result<IdentityRecord, sqlx::Error> {
    Ok(IdentityRecord {
        id: row.try_get("id")?,
        email: row.try_get("email")?,
        full_name: row.try_get("full_name")?,
        role: row.try_get("role")?,
    })
}

#[async_trait::async_trait]
impl ProfileStore for MySqlProfileStore {
    async fn get_identity(&self, user_id: &UserId) -> Result<Identity, ProfileStoreError> {
        let row = sqlx::query(
            r#"
SELECT id, email, full_name, role
FROM profiles
WHERE id = ?
"#,
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| to_store_error("query profile", e))?
        .ok_or(ProfileStoreError::NotFound)?;

        let record = decode_identity(&row).map_err(|e| to_store_error("decode profile", e))?;
        Identity::try_from(record)
    }
}
