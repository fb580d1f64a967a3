use super::util::{is_decode_error, is_timeout};
use crate::domain_model::*;
use crate::domain_port::*;
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};
use std::collections::HashMap;

pub struct MySqlMembershipStore {
    pool: MySqlPool,
}

impl MySqlMembershipStore {
    pub fn new(pool: MySqlPool) -> Self {
        MySqlMembershipStore { pool }
    }

    async fn list_permissions(
        &self,
        user_id: &UserId,
    ) -> Result<HashMap<String, Vec<String>>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
SELECT uc.company_id, crp.permission
FROM user_companies uc
JOIN company_role_permissions crp
  ON crp.company_id = uc.company_id AND crp.role = uc.role
WHERE uc.user_id = ?
"#,
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await?;

        let mut permissions: HashMap<String, Vec<String>> = HashMap::new();
        for row in rows {
            let company_id: String = row.try_get("company_id")?;
            let permission: String = row.try_get("permission")?;
            permissions.entry(company_id).or_default().push(permission);
        }
        Ok(permissions)
    }
}

fn to_store_error(context: &str, err: sqlx::Error) -> MembershipStoreError {
    if is_timeout(&err) {
        MembershipStoreError::Timeout
    } else if is_decode_error(&err) {
        MembershipStoreError::Malformed(format!("{context}: {err}"))
    } else {
        MembershipStoreError::Store(format!("{context}: {err}"))
    }
}

fn decode_membership(row: &MySqlRow) -> Result<MembershipRecord, sqlx::Error> {
    Ok(MembershipRecord {
        company_id: row.try_get("company_id")?,
        company_name: row.try_get("company_name")?,
        company_slug: row.try_get("company_slug")?,
        membership_role: row.try_get("membership_role")?,
        is_active: row.try_get("is_active")?,
        permissions: Vec::new(),
    })
}

#[async_trait::async_trait]
impl MembershipStore for MySqlMembershipStore {
    async fn list_memberships(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<CompanyMembership>, MembershipStoreError> {
        let rows = sqlx::query(
            r#"
SELECT c.id AS company_id,
       c.name AS company_name,
       c.slug AS company_slug,
       uc.role AS membership_role,
       uc.is_active
FROM user_companies uc
JOIN companies c ON c.id = uc.company_id
WHERE uc.user_id = ?
ORDER BY uc.created_at, c.id
"#,
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| to_store_error("query memberships", e))?;

        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let permissions = self.list_permissions(user_id).await.map_err(|e| {
            if is_timeout(&e) {
                MembershipStoreError::Timeout
            } else {
                MembershipStoreError::Permissions(e.to_string())
            }
        })?;

        let records = rows
            .iter()
            .map(|row| decode_membership(row).map_err(|e| to_store_error("decode membership", e)))
            .collect::<Result<Vec<_>, _>>()?;
        attach_permissions(records, &permissions)
    }
}

/// Every row of a company gets that company's permissions, not only the first.
fn attach_permissions(
    records: Vec<MembershipRecord>,
    permissions: &HashMap<String, Vec<String>>,
) -> Result<Vec<CompanyMembership>, MembershipStoreError> {
    records
        .into_iter()
        .map(|mut record| {
            record.permissions = permissions
                .get(&record.company_id)
                .cloned()
                .unwrap_or_default();
            CompanyMembership::try_from(record)
        })
        .collect()
}
