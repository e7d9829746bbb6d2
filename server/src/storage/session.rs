use sqlx::SqlitePool;
use types::{Error, Result, UserData};
use uuid::Uuid;

use crate::{CONFIG, signed_token::SignedTokenExt, storage::POOL};

#[derive(sqlx::FromRow)]
struct SessionRow {
    id: Uuid,
    user_data: String,
}

#[derive(Debug)]
pub struct Session {
    id: Uuid,
    user_data: UserData,
}

impl Session {
    pub fn new(user_data: UserData) -> Self {
        Self {
            id: Uuid::now_v7(),
            user_data,
        }
    }

    pub async fn create(user_data: UserData) -> Result<Self> {
        let session = Self::new(user_data);
        session.insert(&POOL).await?;
        Ok(session)
    }

    async fn find(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>> {
        let row: Option<SessionRow> = sqlx::query_as(
            r#"
            SELECT id, user_data
            FROM sessions
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(Some(Self {
            id: row.id,
            user_data: serde_json::from_str(&row.user_data)?,
        }))
    }

    /// Find the session behind a signed cookie value.
    ///
    /// A bad signature or an unknown id is an authentication failure.
    pub async fn find_token(token: &str) -> Result<Self> {
        let id = Uuid::from_token(token, &CONFIG.signing_secret).map_err(|e| {
            Error::unauthenticated(anyhow::anyhow!("invalid session token: {e}"))
        })?;

        Self::find(&POOL, id)
            .await?
            .ok_or_else(|| Error::unauthenticated(anyhow::anyhow!("session not found")))
    }

    pub fn user_data(&self) -> &UserData {
        &self.user_data
    }

    pub fn as_token(&self) -> Result<String> {
        self.id.as_token(&CONFIG.signing_secret)
    }

    async fn insert(&self, pool: &SqlitePool) -> Result<()> {
        let user_data = serde_json::to_string(&self.user_data)?;

        sqlx::query(
            r#"
            INSERT INTO sessions (id, user_data)
            VALUES (?, ?)
            "#,
        )
        .bind(self.id)
        .bind(user_data)
        .execute(pool)
        .await?;

        Ok(())
    }

    pub async fn delete(&self) -> Result<()> {
        Self::delete_id(&POOL, self.id).await
    }

    async fn delete_id(pool: &SqlitePool, id: Uuid) -> Result<()> {
        sqlx::query(
            r#"
            DELETE FROM sessions
            WHERE id = ?
            "#,
        )
        .bind(id)
        .execute(pool)
        .await?;

        Ok(())
    }

    pub async fn delete_token(token: &str) -> Result<()> {
        if let Ok(session) = Self::find_token(token).await {
            session.delete().await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_pool;

    fn user_data() -> UserData {
        UserData {
            user_id: "5b1f7f9e-0000-4000-8000-000000000000".into(),
            username: "trainer".into(),
            display_name: "Tess Trainer".into(),
            groups: vec!["dashgate_training@idm.example.com".into()],
            access_token: "opaque".to_string().into(),
        }
    }

    #[tokio::test]
    async fn stored_session_is_found_until_deleted() {
        let pool = test_pool().await;
        let session = Session::new(user_data());
        session.insert(&pool).await.unwrap();

        let found = Session::find(&pool, session.id).await.unwrap().unwrap();
        assert_eq!(found.user_data().username, "trainer");
        assert!(found.user_data().is_in_group("dashgate_training"));

        Session::delete_id(&pool, session.id).await.unwrap();
        assert!(Session::find(&pool, session.id).await.unwrap().is_none());
    }
}
