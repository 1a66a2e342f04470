// src/middleware/rbac.rs

use axum::{extract::FromRequestParts, http::request::Parts};
use std::marker::PhantomData;

use crate::{
    common::error::AppError,
    models::{
        auth::User,
        rbac::{Action, Module},
    },
};

/// 1. O Trait que define o que é uma Permissão
pub trait PermissionDef: Send + Sync + 'static {
    fn module() -> Module;
    fn action() -> Action;
}

/// 2. O Extractor (Guardião)
pub struct RequirePermission<T>(pub PhantomData<T>);

// 3. Implementação do FromRequestParts

impl<T, S> FromRequestParts<S> for RequirePermission<T>
where
    T: PermissionDef,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // A. Extrai o usuário (inserido pelo auth_guard)
        let user = parts.extensions.get::<User>().ok_or(AppError::InvalidToken)?;

        // B. Par (módulo, ação) exigido pela rota
        let module = T::module();
        let action = T::action();

        // C. Consulta a matriz estática. Negação é resposta 403, nunca
        // erro interno: papel sem a concessão simplesmente não passa.
        if !user.role.allows(module, action) {
            return Err(AppError::PermissionDenied(format!(
                "Você precisa da permissão '{}:{}' para realizar esta ação.",
                module.as_str(),
                action.as_str()
            )));
        }

        Ok(RequirePermission(PhantomData))
    }
}

// ---
// DEFINIÇÃO DAS PERMISSÕES (TIPOS)
// ---

macro_rules! permission {
    ($name:ident, $module:ident, $action:ident) => {
        pub struct $name;
        impl PermissionDef for $name {
            fn module() -> Module {
                Module::$module
            }
            fn action() -> Action {
                Action::$action
            }
        }
    };
}

permission!(PermDashboardView, Dashboard, View);

permission!(PermInventoryView, Inventory, View);
permission!(PermInventoryEdit, Inventory, Edit);
permission!(PermInventoryDelete, Inventory, Delete);

permission!(PermGrnView, Grn, View);
permission!(PermGrnCreate, Grn, Create);
permission!(PermGrnEdit, Grn, Edit);
permission!(PermGrnDelete, Grn, Delete);

permission!(PermSalesView, Sales, View);
permission!(PermSalesCreate, Sales, Create);
permission!(PermSalesEdit, Sales, Edit);
permission!(PermSalesDelete, Sales, Delete);

permission!(PermReportsView, Reports, View);
permission!(PermReportsCreate, Reports, Create);
permission!(PermReportsDelete, Reports, Delete);

permission!(PermUsersView, Users, View);
permission!(PermUsersCreate, Users, Create);
permission!(PermUsersEdit, Users, Edit);
permission!(PermUsersDelete, Users, Delete);
