// src/services/user_service.rs

use bcrypt::hash;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{auth::User, rbac::Role},
    store::{SaleRepository, UserRepository},
};

// Resultado da exclusão: quem já registrou venda não sai do histórico.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserDeleteOutcome {
    Deactivated,
    Removed,
}

#[derive(Clone)]
pub struct UserService {
    user_repo: UserRepository,
    sale_repo: SaleRepository,
}

impl UserService {
    pub fn new(user_repo: UserRepository, sale_repo: SaleRepository) -> Self {
        Self {
            user_repo,
            sale_repo,
        }
    }

    pub async fn list(&self, search: Option<&str>) -> Vec<User> {
        let users = self.user_repo.list().await;
        match search {
            None => users,
            Some(term) => {
                let term = term.to_lowercase();
                users
                    .into_iter()
                    .filter(|u| {
                        u.name.to_lowercase().contains(&term)
                            || u.email.to_lowercase().contains(&term)
                    })
                    .collect()
            }
        }
    }

    pub async fn create(
        &self,
        name: String,
        email: String,
        password: String,
        role: Role,
        sales_target: Option<Decimal>,
        commission_rate: Option<Decimal>,
    ) -> Result<User, AppError> {
        // Hashing em thread separado, como no login.
        let hashed_password = tokio::task::spawn_blocking(move || {
            hash(&password, bcrypt::DEFAULT_COST)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        let now = Utc::now();
        self.user_repo
            .insert(User {
                id: Uuid::new_v4(),
                name,
                email,
                password_hash: hashed_password,
                role,
                is_active: true,
                sales_target,
                commission_rate,
                created_at: now,
                updated_at: now,
            })
            .await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: Uuid,
        name: Option<String>,
        role: Option<Role>,
        is_active: Option<bool>,
        sales_target: Option<Decimal>,
        commission_rate: Option<Decimal>,
        new_password: Option<String>,
    ) -> Result<User, AppError> {
        let new_hash = match new_password {
            Some(password) => Some(
                tokio::task::spawn_blocking(move || hash(&password, bcrypt::DEFAULT_COST))
                    .await
                    .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??,
            ),
            None => None,
        };

        let user = self
            .user_repo
            .update(id, |u| {
                if let Some(name) = name {
                    u.name = name;
                }
                if let Some(role) = role {
                    u.role = role;
                }
                if let Some(is_active) = is_active {
                    u.is_active = is_active;
                }
                if let Some(target) = sales_target {
                    u.sales_target = Some(target);
                }
                if let Some(rate) = commission_rate {
                    u.commission_rate = Some(rate);
                }
                if let Some(hash) = new_hash {
                    u.password_hash = hash;
                }
            })
            .await?;

        Ok(user)
    }

    // Usuário com venda registrada é desativado (soft delete) para o
    // histórico continuar apontando para alguém; sem referência nenhuma,
    // sai de vez.
    pub async fn delete(&self, id: Uuid) -> Result<UserDeleteOutcome, AppError> {
        if self.sale_repo.any_by_seller(id).await {
            self.user_repo.update(id, |u| u.is_active = false).await?;
            tracing::info!("Usuário {} desativado (referenciado por vendas)", id);
            return Ok(UserDeleteOutcome::Deactivated);
        }

        self.user_repo.remove(id).await?;
        Ok(UserDeleteOutcome::Removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sales::{PaymentMethod, Sale, SaleStatus};

    fn user(id: Uuid) -> User {
        let now = Utc::now();
        User {
            id,
            name: "Jonas".into(),
            email: "jonas@revenda.com.br".into(),
            password_hash: "$2b$04$fakefakefakefakefakefu".into(),
            role: Role::Staff,
            is_active: true,
            sales_target: None,
            commission_rate: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn sale_by(seller: Uuid) -> Sale {
        let now = Utc::now();
        Sale {
            id: Uuid::new_v4(),
            vehicle_id: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
            sold_by: Some(seller),
            selling_price: Decimal::from(100),
            down_payment: None,
            payment_method: PaymentMethod::Cash,
            status: SaleStatus::Completed,
            sale_date: now.date_naive(),
            cost_of_goods: Some(Decimal::from(80)),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn delete_deactivates_a_user_referenced_by_sales() {
        let id = Uuid::new_v4();
        let user_repo = UserRepository::new(vec![user(id)]);
        let service = UserService::new(
            user_repo.clone(),
            SaleRepository::new(vec![sale_by(id)]),
        );

        let outcome = service.delete(id).await.unwrap();
        assert_eq!(outcome, UserDeleteOutcome::Deactivated);

        let kept = user_repo.find_by_id(id).await.unwrap();
        assert!(!kept.is_active);
    }

    #[tokio::test]
    async fn delete_removes_an_unreferenced_user() {
        let id = Uuid::new_v4();
        let user_repo = UserRepository::new(vec![user(id)]);
        let service = UserService::new(user_repo.clone(), SaleRepository::new(vec![]));

        let outcome = service.delete(id).await.unwrap();
        assert_eq!(outcome, UserDeleteOutcome::Removed);
        assert!(user_repo.find_by_id(id).await.is_none());
    }
}
