// src/store/user_repo.rs

use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{common::error::AppError, models::auth::User};

#[derive(Clone)]
pub struct UserRepository {
    users: Arc<RwLock<Vec<User>>>,
}

impl UserRepository {
    pub fn new(seed: Vec<User>) -> Self {
        Self {
            users: Arc::new(RwLock::new(seed)),
        }
    }

    pub async fn list(&self) -> Vec<User> {
        self.users.read().await.clone()
    }

    // Busca um usuário pelo seu e-mail (comparação sem caixa, como o
    // campo de login do frontend).
    pub async fn find_by_email(&self, email: &str) -> Option<User> {
        self.users
            .read()
            .await
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned()
    }

    pub async fn find_by_id(&self, id: Uuid) -> Option<User> {
        self.users.read().await.iter().find(|u| u.id == id).cloned()
    }

    // Cria um novo usuário, recusando e-mail duplicado.
    pub async fn insert(&self, user: User) -> Result<User, AppError> {
        let mut guard = self.users.write().await;
        if guard
            .iter()
            .any(|u| u.email.eq_ignore_ascii_case(&user.email))
        {
            return Err(AppError::EmailAlreadyExists);
        }
        guard.push(user.clone());
        Ok(user)
    }

    pub async fn update<F>(&self, id: Uuid, apply: F) -> Result<User, AppError>
    where
        F: FnOnce(&mut User),
    {
        let mut guard = self.users.write().await;
        let slot = guard
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(AppError::UserNotFound)?;
        apply(slot);
        slot.updated_at = chrono::Utc::now();
        Ok(slot.clone())
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        let mut guard = self.users.write().await;
        let before = guard.len();
        guard.retain(|u| u.id != id);
        if guard.len() == before {
            return Err(AppError::UserNotFound);
        }
        Ok(())
    }
}
