use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use warden_core::error::AppError;
use warden_core::result::AppResult;
use warden_entity::token::{NewRefreshToken, RefreshToken};

use super::MemoryStore;
use crate::repositories::RefreshTokenRepository;

#[async_trait]
impl RefreshTokenRepository for MemoryStore {
    async fn create(&self, data: &NewRefreshToken) -> AppResult<RefreshToken> {
        let mut tables = self.tables.lock().await;
        if !tables.users.contains_key(&data.user_id) {
            return Err(AppError::database("refresh token owner does not exist"));
        }
        if tables.refresh_tokens.values().any(|t| t.token == data.token) {
            return Err(AppError::database("duplicate refresh token value"));
        }

        let token = RefreshToken {
            id: Uuid::new_v4(),
            token: data.token.clone(),
            user_id: data.user_id,
            revoked: false,
            expires_at: data.expires_at,
            created_at: Utc::now(),
        };
        tables.refresh_tokens.insert(token.id, token.clone());
        Ok(token)
    }

    async fn find_by_token(&self, token: &str) -> AppResult<Option<RefreshToken>> {
        let tables = self.tables.lock().await;
        Ok(tables.refresh_tokens.values().find(|t| t.token == token).cloned())
    }

    async fn revoke_if_active(&self, id: Uuid) -> AppResult<bool> {
        let mut tables = self.tables.lock().await;
        match tables.refresh_tokens.get_mut(&id) {
            Some(token) if !token.revoked => {
                token.revoked = true;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn revoke_by_token(&self, token: &str) -> AppResult<()> {
        let mut tables = self.tables.lock().await;
        if let Some(row) = tables.refresh_tokens.values_mut().find(|t| t.token == token) {
            row.revoked = true;
        }
        Ok(())
    }

    async fn revoke_all_for_user(&self, user_id: Uuid) -> AppResult<u64> {
        let mut tables = self.tables.lock().await;
        let mut revoked = 0;
        for token in tables.refresh_tokens.values_mut() {
            if token.user_id == user_id && !token.revoked {
                token.revoked = true;
                revoked += 1;
            }
        }
        Ok(revoked)
    }
}
