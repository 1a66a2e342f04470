// src/models/notification.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Payment,
    Sales,
    Stock,
    Document,
    System,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum NotificationPriority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,

    pub kind: NotificationKind,
    pub priority: NotificationPriority,

    pub title: String,
    pub message: String,

    pub is_read: bool,

    // Identificador da entidade a que o evento se refere (veículo, venda),
    // usado para montar o deep-link de volta à tela certa.
    pub related_id: Option<String>,

    // Link explícito, usado quando o evento não aponta para uma entidade.
    pub link: Option<String>,

    pub created_at: DateTime<Utc>,
}

impl Notification {
    // Deriva a página de destino da notificação. A precedência é fixa:
    // 1. deep-link por relatedId para os tipos que mapeiam em página;
    // 2. campo `link` explícito;
    // 3. página do tipo, sem destaque;
    // 4. painel inicial.
    pub fn target(&self) -> String {
        use NotificationKind::*;

        if let Some(id) = &self.related_id {
            match self.kind {
                Payment | Sales => return format!("/dashboard/sales?highlight={id}"),
                Stock | Document => return format!("/dashboard/inventory?highlight={id}"),
                System => {}
            }
        }

        if let Some(link) = &self.link {
            return link.clone();
        }

        match self.kind {
            Payment | Sales => "/dashboard/sales".to_string(),
            Stock | Document => "/dashboard/inventory".to_string(),
            System => "/dashboard".to_string(),
        }
    }
}

// Resposta de listagem: a notificação + o destino já resolvido.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationDetail {
    #[serde(flatten)]
    pub notification: Notification,

    #[schema(example = "/dashboard/inventory?highlight=car-42")]
    pub target: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notification(
        kind: NotificationKind,
        related_id: Option<&str>,
        link: Option<&str>,
    ) -> Notification {
        Notification {
            id: Uuid::new_v4(),
            kind,
            priority: NotificationPriority::Medium,
            title: "t".into(),
            message: "m".into(),
            is_read: false,
            related_id: related_id.map(String::from),
            link: link.map(String::from),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn stock_with_related_id_deep_links_into_inventory() {
        let n = notification(NotificationKind::Stock, Some("car-42"), None);
        assert_eq!(n.target(), "/dashboard/inventory?highlight=car-42");
    }

    #[test]
    fn payment_and_sales_deep_link_into_sales() {
        let p = notification(NotificationKind::Payment, Some("sale-7"), None);
        assert_eq!(p.target(), "/dashboard/sales?highlight=sale-7");

        let s = notification(NotificationKind::Sales, Some("sale-8"), None);
        assert_eq!(s.target(), "/dashboard/sales?highlight=sale-8");
    }

    #[test]
    fn explicit_link_wins_when_there_is_no_related_id() {
        let n = notification(NotificationKind::Document, None, Some("/dashboard/grn"));
        assert_eq!(n.target(), "/dashboard/grn");
    }

    #[test]
    fn related_id_takes_precedence_over_explicit_link() {
        let n = notification(NotificationKind::Document, Some("car-1"), Some("/outro"));
        assert_eq!(n.target(), "/dashboard/inventory?highlight=car-1");
    }

    #[test]
    fn kind_fallback_without_related_id_or_link() {
        assert_eq!(
            notification(NotificationKind::Sales, None, None).target(),
            "/dashboard/sales"
        );
        assert_eq!(
            notification(NotificationKind::Stock, None, None).target(),
            "/dashboard/inventory"
        );
    }

    #[test]
    fn bare_system_notification_lands_on_the_dashboard() {
        let n = notification(NotificationKind::System, None, None);
        assert_eq!(n.target(), "/dashboard");
    }

    #[test]
    fn system_ignores_related_id_but_honors_link() {
        // `system` não tem página própria: relatedId não gera destaque,
        // mas um link explícito ainda vale.
        let n = notification(NotificationKind::System, Some("x"), Some("/dashboard/users"));
        assert_eq!(n.target(), "/dashboard/users");

        let bare = notification(NotificationKind::System, Some("x"), None);
        assert_eq!(bare.target(), "/dashboard");
    }
}
