// src/services/auth.rs

use bcrypt::verify;
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::{
    common::error::AppError,
    models::auth::{AuthResponse, Claims, SessionUser, User},
    store::UserRepository,
};

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    jwt_secret: String,
}

impl AuthService {
    pub fn new(user_repo: UserRepository, jwt_secret: String) -> Self {
        Self {
            user_repo,
            jwt_secret,
        }
    }

    pub async fn login_user(&self, email: &str, password: &str) -> Result<AuthResponse, AppError> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = user.password_hash.clone();

        // Executa a verificação em um thread separado (bcrypt é caro)
        let is_password_valid = tokio::task::spawn_blocking(move || {
            verify(&password_clone, &password_hash_clone)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        // Conta desativada é barrada AQUI, na autenticação, e com a mesma
        // resposta genérica: senha correta não reativa ninguém.
        if !user.is_active {
            return Err(AppError::InvalidCredentials);
        }

        let token = self.create_token(&user)?;
        Ok(AuthResponse {
            token,
            user: SessionUser::from(&user),
        })
    }

    // O token vale enquanto o usuário por trás dele valer: além da
    // assinatura, reconferimos `is_active` a cada requisição, então
    // desativar a conta derruba as sessões existentes também.
    pub async fn validate_token(&self, token: &str) -> Result<User, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;

        let user = self
            .user_repo
            .find_by_id(token_data.claims.sub)
            .await
            .ok_or(AppError::InvalidToken)?;

        if !user.is_active {
            return Err(AppError::InvalidToken);
        }

        Ok(user)
    }

    // As claims são exatamente o registro de sessão: identidade + papel.
    // O hash da senha jamais entra no token.
    fn create_token(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::days(7);

        let claims = Claims {
            sub: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::rbac::Role;
    use uuid::Uuid;

    const SECRET: &str = "segredo-de-teste";

    fn user(email: &str, password: &str, is_active: bool) -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            name: "Teste".into(),
            email: email.into(),
            // Custo mínimo: o teste só precisa de um hash verificável.
            password_hash: bcrypt::hash(password, 4).unwrap(),
            role: Role::Staff,
            is_active,
            sales_target: None,
            commission_rate: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn service(users: Vec<User>) -> AuthService {
        AuthService::new(UserRepository::new(users), SECRET.to_string())
    }

    #[tokio::test]
    async fn login_issues_a_token_with_the_session_claims() {
        let svc = service(vec![user("a@b.com", "senha1", true)]);
        let response = svc.login_user("a@b.com", "senha1").await.unwrap();

        let decoded = decode::<Claims>(
            &response.token,
            &DecodingKey::from_secret(SECRET.as_ref()),
            &Validation::default(),
        )
        .unwrap();

        assert_eq!(decoded.claims.email, "a@b.com");
        assert_eq!(decoded.claims.role, Role::Staff);
        assert_eq!(response.user.email, "a@b.com");
    }

    #[tokio::test]
    async fn login_rejects_a_wrong_password() {
        let svc = service(vec![user("a@b.com", "senha1", true)]);
        let err = svc.login_user("a@b.com", "errada").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));
    }

    #[tokio::test]
    async fn login_rejects_a_deactivated_account_with_correct_credentials() {
        let svc = service(vec![user("a@b.com", "senha1", false)]);
        let err = svc.login_user("a@b.com", "senha1").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));
    }

    #[tokio::test]
    async fn validate_token_rejects_sessions_of_deactivated_users() {
        let u = user("a@b.com", "senha1", true);
        let id = u.id;
        let repo = UserRepository::new(vec![u]);
        let svc = AuthService::new(repo.clone(), SECRET.to_string());

        let token = svc.login_user("a@b.com", "senha1").await.unwrap().token;
        assert!(svc.validate_token(&token).await.is_ok());

        // Desativar a conta derruba a sessão existente.
        repo.update(id, |u| u.is_active = false).await.unwrap();
        let err = svc.validate_token(&token).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidToken));
    }
}
