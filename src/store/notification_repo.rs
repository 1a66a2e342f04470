// src/store/notification_repo.rs

use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{common::error::AppError, models::notification::Notification};

#[derive(Clone)]
pub struct NotificationRepository {
    notifications: Arc<RwLock<Vec<Notification>>>,
}

impl NotificationRepository {
    pub fn new(seed: Vec<Notification>) -> Self {
        Self {
            notifications: Arc::new(RwLock::new(seed)),
        }
    }

    pub async fn list(&self) -> Vec<Notification> {
        self.notifications.read().await.clone()
    }

    pub async fn insert(&self, notification: Notification) -> Notification {
        let mut guard = self.notifications.write().await;
        guard.push(notification.clone());
        notification
    }

    pub async fn mark_read(&self, id: Uuid) -> Result<Notification, AppError> {
        let mut guard = self.notifications.write().await;
        let slot = guard
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or(AppError::NotificationNotFound)?;
        slot.is_read = true;
        Ok(slot.clone())
    }

    // Idempotente: marcar tudo como lido quantas vezes for.
    pub async fn mark_all_read(&self) -> usize {
        let mut guard = self.notifications.write().await;
        let mut touched = 0;
        for n in guard.iter_mut().filter(|n| !n.is_read) {
            n.is_read = true;
            touched += 1;
        }
        touched
    }

    pub async fn unread_count(&self) -> i64 {
        self.notifications
            .read()
            .await
            .iter()
            .filter(|n| !n.is_read)
            .count() as i64
    }
}
