// src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;
mod store;

use crate::config::AppState;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() {
    // Inicializa o logger.
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não
    // deve iniciar.
    let app_state = AppState::new().expect("Falha ao inicializar o estado da aplicação.");

    // Define as rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/login", post(handlers::auth::login))
        .route("/logout", post(handlers::auth::logout));

    // Rotas de sessão (protegidas pelo middleware)
    let session_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .route("/permissions", get(handlers::auth::my_permissions))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let user_routes = Router::new()
        .route(
            "/",
            get(handlers::users::list_users).post(handlers::users::create_user),
        )
        .route(
            "/{id}",
            axum::routing::put(handlers::users::update_user)
                .delete(handlers::users::delete_user),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let inventory_routes = Router::new()
        .route("/vehicles", get(handlers::inventory::list_vehicles))
        .route(
            "/vehicles/{id}",
            get(handlers::inventory::get_vehicle)
                .put(handlers::inventory::update_vehicle)
                .delete(handlers::inventory::delete_vehicle),
        )
        .route(
            "/vehicles/{id}/maintenance",
            post(handlers::inventory::add_maintenance),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let grn_routes = Router::new()
        .route(
            "/",
            get(handlers::grn::list_receipts).post(handlers::grn::create_receipt),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let sales_routes = Router::new()
        .route(
            "/",
            get(handlers::sales::list_sales).post(handlers::sales::create_sale),
        )
        .route("/{id}", get(handlers::sales::get_sale))
        .route("/{id}/complete", post(handlers::sales::complete_sale))
        .route("/{id}/cancel", post(handlers::sales::cancel_sale))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let crm_routes = Router::new()
        .route(
            "/customers",
            get(handlers::crm::list_customers).post(handlers::crm::create_customer),
        )
        .route(
            "/customers/{id}",
            get(handlers::crm::get_customer)
                .put(handlers::crm::update_customer)
                .delete(handlers::crm::delete_customer),
        )
        .route(
            "/vendors",
            get(handlers::crm::list_vendors).post(handlers::crm::create_vendor),
        )
        .route(
            "/vendors/{id}",
            axum::routing::put(handlers::crm::update_vendor)
                .delete(handlers::crm::delete_vendor),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let finance_routes = Router::new()
        .route(
            "/expenses",
            get(handlers::finance::list_expenses).post(handlers::finance::create_expense),
        )
        .route(
            "/expenses/{id}",
            axum::routing::delete(handlers::finance::delete_expense),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let dashboard_routes = Router::new()
        .route("/summary", get(handlers::dashboard::get_summary))
        .route("/sales-chart", get(handlers::dashboard::get_sales_chart))
        .route("/top-brands", get(handlers::dashboard::get_top_brands))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let report_routes = Router::new()
        .route("/financial", get(handlers::reports::financial_report))
        .route(
            "/vehicle-profit",
            get(handlers::reports::vehicle_profit_report),
        )
        .route("/stock-aging", get(handlers::reports::stock_aging_report))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let notification_routes = Router::new()
        .route("/", get(handlers::notifications::list_notifications))
        .route("/{id}/read", post(handlers::notifications::mark_read))
        .route("/read-all", post(handlers::notifications::mark_all_read))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let export_routes = Router::new()
        .route("/vehicles", get(handlers::exports::export_vehicles))
        .route("/sales", get(handlers::exports::export_sales))
        .route("/customers", get(handlers::exports::export_customers))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api/auth", session_routes)
        .nest("/api/users", user_routes)
        .nest("/api/inventory", inventory_routes)
        .nest("/api/grn", grn_routes)
        .nest("/api/sales", sales_routes)
        .nest("/api/crm", crm_routes)
        .nest("/api/finance", finance_routes)
        .nest("/api/dashboard", dashboard_routes)
        .nest("/api/reports", report_routes)
        .nest("/api/notifications", notification_routes)
        .nest("/api/exports", export_routes)
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", docs::ApiDoc::openapi()),
        )
        .with_state(app_state);

    // Inicia o servidor
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("0.0.0.0:{port}");
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}
