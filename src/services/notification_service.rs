// src/services/notification_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::notification::{Notification, NotificationDetail},
    store::NotificationRepository,
};

#[derive(Clone)]
pub struct NotificationService {
    notification_repo: NotificationRepository,
}

impl NotificationService {
    pub fn new(notification_repo: NotificationRepository) -> Self {
        Self { notification_repo }
    }

    // Mais recentes primeiro, com o destino já resolvido para o cliente
    // só precisar navegar.
    pub async fn list(&self, only_unread: bool) -> Vec<NotificationDetail> {
        let mut notifications = self.notification_repo.list().await;
        if only_unread {
            notifications.retain(|n| !n.is_read);
        }
        notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        notifications.into_iter().map(Self::to_detail).collect()
    }

    pub async fn mark_read(&self, id: Uuid) -> Result<NotificationDetail, AppError> {
        let notification = self.notification_repo.mark_read(id).await?;
        Ok(Self::to_detail(notification))
    }

    pub async fn mark_all_read(&self) -> usize {
        self.notification_repo.mark_all_read().await
    }

    fn to_detail(notification: Notification) -> NotificationDetail {
        let target = notification.target();
        NotificationDetail {
            notification,
            target,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::notification::{NotificationKind, NotificationPriority};
    use chrono::{Duration, Utc};

    fn notification(title: &str, is_read: bool, minutes_ago: i64) -> Notification {
        Notification {
            id: Uuid::new_v4(),
            kind: NotificationKind::Stock,
            priority: NotificationPriority::Low,
            title: title.into(),
            message: "m".into(),
            is_read,
            related_id: Some("car-42".into()),
            link: None,
            created_at: Utc::now() - Duration::minutes(minutes_ago),
        }
    }

    #[tokio::test]
    async fn list_filters_unread_and_sorts_newest_first() {
        let service = NotificationService::new(NotificationRepository::new(vec![
            notification("antiga", false, 60),
            notification("lida", true, 30),
            notification("recente", false, 5),
        ]));

        let all = service.list(false).await;
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].notification.title, "recente");
        assert_eq!(all[0].target, "/dashboard/inventory?highlight=car-42");

        let unread = service.list(true).await;
        assert_eq!(unread.len(), 2);
        assert!(unread.iter().all(|n| !n.notification.is_read));
    }

    #[tokio::test]
    async fn mark_all_read_is_idempotent() {
        let service = NotificationService::new(NotificationRepository::new(vec![
            notification("a", false, 10),
            notification("b", false, 20),
        ]));

        assert_eq!(service.mark_all_read().await, 2);
        assert_eq!(service.mark_all_read().await, 0);
        assert!(service.list(true).await.is_empty());
    }
}
