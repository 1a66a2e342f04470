// src/models/rbac.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// Conjunto fechado de papéis. Não há cargos dinâmicos nesta aplicação:
// o papel vem gravado no usuário e a matriz de permissões é configuração
// estática, expressa em código.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Owner,
    Admin,
    Staff,
}

// Módulos da aplicação sobre os quais as permissões são avaliadas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Module {
    Dashboard,
    Inventory,
    Grn,
    Sales,
    Reports,
    Users,
}

impl Module {
    pub const ALL: [Module; 6] = [
        Module::Dashboard,
        Module::Inventory,
        Module::Grn,
        Module::Sales,
        Module::Reports,
        Module::Users,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Module::Dashboard => "dashboard",
            Module::Inventory => "inventory",
            Module::Grn => "grn",
            Module::Sales => "sales",
            Module::Reports => "reports",
            Module::Users => "users",
        }
    }
}

// Ações possíveis dentro de um módulo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    View,
    Create,
    Edit,
    Delete,
}

impl Action {
    pub const ALL: [Action; 4] = [Action::View, Action::Create, Action::Edit, Action::Delete];

    pub fn as_str(self) -> &'static str {
        match self {
            Action::View => "view",
            Action::Create => "create",
            Action::Edit => "edit",
            Action::Delete => "delete",
        }
    }
}

impl Role {
    // Matriz estática de permissões como função TOTAL sobre (módulo, ação).
    // Qualquer par não listado cai no braço final e resolve para `false`:
    // ausência de concessão é sempre negação, nunca erro.
    pub fn allows(self, module: Module, action: Action) -> bool {
        use Action::*;
        use Module::*;

        match (self, module, action) {
            // Proprietário: acesso completo.
            (Role::Owner, _, _) => true,

            // Administrador: tudo, exceto excluir usuários.
            (Role::Admin, Users, Delete) => false,
            (Role::Admin, _, _) => true,

            // Equipe de vendas: leitura operacional e lançamentos.
            (Role::Staff, Dashboard, View) => true,
            (Role::Staff, Inventory, View) => true,
            (Role::Staff, Grn, View | Create) => true,
            (Role::Staff, Sales, View | Create) => true,

            _ => false,
        }
    }
}

// Avalia se um papel pode executar `action` sobre `module`.
pub fn has_permission(role: Role, module: Module, action: Action) -> bool {
    role.allows(module, action)
}

// Linha da matriz de permissões de um papel, no formato que o frontend
// consome para esconder botões e rotas.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModulePermissions {
    pub module: Module,
    pub view: bool,
    pub create: bool,
    pub edit: bool,
    pub delete: bool,
}

impl Role {
    pub fn permission_table(self) -> Vec<ModulePermissions> {
        Module::ALL
            .into_iter()
            .map(|module| ModulePermissions {
                module,
                view: self.allows(module, Action::View),
                create: self.allows(module, Action::Create),
                edit: self.allows(module, Action::Edit),
                delete: self.allows(module, Action::Delete),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_has_full_access() {
        for module in Module::ALL {
            for action in Action::ALL {
                assert!(has_permission(Role::Owner, module, action));
            }
        }
    }

    #[test]
    fn admin_cannot_delete_users() {
        assert!(!has_permission(Role::Admin, Module::Users, Action::Delete));
        assert!(has_permission(Role::Admin, Module::Users, Action::Edit));
        assert!(has_permission(Role::Admin, Module::Inventory, Action::Delete));
    }

    #[test]
    fn staff_grants_are_exactly_the_listed_ones() {
        use Action::*;
        use Module::*;

        let granted = [
            (Dashboard, View),
            (Inventory, View),
            (Grn, View),
            (Grn, Create),
            (Sales, View),
            (Sales, Create),
        ];

        for module in Module::ALL {
            for action in Action::ALL {
                let expected = granted.contains(&(module, action));
                assert_eq!(
                    has_permission(Role::Staff, module, action),
                    expected,
                    "staff/{}/{}",
                    module.as_str(),
                    action.as_str()
                );
            }
        }
    }

    #[test]
    fn staff_has_nothing_on_reports_and_users() {
        for action in Action::ALL {
            assert!(!has_permission(Role::Staff, Module::Reports, action));
            assert!(!has_permission(Role::Staff, Module::Users, action));
        }
    }

    #[test]
    fn permission_table_mirrors_the_matrix() {
        let table = Role::Staff.permission_table();
        assert_eq!(table.len(), Module::ALL.len());

        let sales = table
            .iter()
            .find(|row| row.module == Module::Sales)
            .unwrap();
        assert!(sales.view && sales.create);
        assert!(!sales.edit && !sales.delete);
    }
}
