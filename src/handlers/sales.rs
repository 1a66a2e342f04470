// src/handlers/sales.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{
    common::error::AppError,
    config::AppState,
    handlers::inventory::validate_not_negative,
    middleware::{
        auth::AuthenticatedUser,
        rbac::{PermSalesCreate, PermSalesEdit, PermSalesView, RequirePermission},
    },
    models::sales::{PaymentMethod, SaleDetail, SaleStatus},
    services::sales_service::SaleCustomer,
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct SaleListQuery {
    pub status: Option<SaleStatus>,
    // Busca por substring no nome do cliente e na placa.
    pub search: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewCustomerPayload {
    #[validate(length(min = 1, message = "O nome do cliente é obrigatório."))]
    pub full_name: String,

    pub phone: Option<String>,

    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: Option<String>,
}

// ---
// Payload: CreateSale
// O cliente vem de um dos dois jeitos: `customerId` de um cadastro
// existente OU `newCustomer` com os dados de um cliente novo.
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSalePayload {
    pub vehicle_id: Uuid,

    pub customer_id: Option<Uuid>,

    #[validate(nested)]
    pub new_customer: Option<NewCustomerPayload>,

    #[validate(custom(function = "validate_not_negative"))]
    pub selling_price: Decimal,

    #[validate(custom(function = "validate_not_negative"))]
    pub down_payment: Option<Decimal>,

    pub payment_method: PaymentMethod,

    // true = registra e conclui na mesma operação; false = fica pendente.
    #[serde(default)]
    pub complete_now: bool,
}

// Validação de consistência: exatamente UMA das duas formas de cliente.
impl CreateSalePayload {
    fn validate_consistency(&self) -> Result<(), ValidationError> {
        match (&self.customer_id, &self.new_customer) {
            (Some(_), Some(_)) => Err(ValidationError::new("CustomerAmbiguous")),
            (None, None) => Err(ValidationError::new("CustomerRequired")),
            _ => Ok(()),
        }
    }
}

// GET /api/sales
#[utoipa::path(
    get,
    path = "/api/sales",
    tag = "Sales",
    params(SaleListQuery),
    responses(
        (status = 200, description = "Vendas registradas", body = Vec<SaleDetail>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_sales(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermSalesView>,
    Query(query): Query<SaleListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let sales = app_state
        .sales_service
        .list(query.status, query.search.as_deref())
        .await;
    Ok((StatusCode::OK, Json(sales)))
}

// GET /api/sales/{id}
#[utoipa::path(
    get,
    path = "/api/sales/{id}",
    tag = "Sales",
    params(("id" = Uuid, Path, description = "ID da venda")),
    responses(
        (status = 200, description = "Detalhe da venda", body = SaleDetail),
        (status = 404, description = "Venda não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_sale(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermSalesView>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let sale = app_state.sales_service.get(id).await?;
    Ok((StatusCode::OK, Json(sale)))
}

// POST /api/sales
#[utoipa::path(
    post,
    path = "/api/sales",
    tag = "Sales",
    request_body = CreateSalePayload,
    responses(
        (status = 201, description = "Venda registrada", body = SaleDetail),
        (status = 404, description = "Veículo ou cliente não encontrado"),
        (status = 409, description = "Veículo indisponível para venda")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_sale(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequirePermission<PermSalesCreate>,
    Json(payload): Json<CreateSalePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    payload.validate_consistency().map_err(|e| {
        let mut errors = validator::ValidationErrors::new();
        errors.add("customerId", e);
        AppError::ValidationError(errors)
    })?;

    let customer = match (payload.customer_id, payload.new_customer) {
        (Some(id), None) => SaleCustomer::Existing(id),
        (None, Some(new)) => SaleCustomer::New {
            full_name: new.full_name,
            phone: new.phone,
            email: new.email,
        },
        // validate_consistency já barrou os outros dois casos.
        _ => unreachable!(),
    };

    let detail = app_state
        .sales_service
        .create(
            payload.vehicle_id,
            customer,
            payload.selling_price,
            payload.down_payment,
            payload.payment_method,
            payload.complete_now,
            Some(user.0.id),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(detail)))
}

// POST /api/sales/{id}/complete
#[utoipa::path(
    post,
    path = "/api/sales/{id}/complete",
    tag = "Sales",
    params(("id" = Uuid, Path, description = "ID da venda")),
    responses(
        (status = 200, description = "Venda concluída; veículo marcado como vendido", body = SaleDetail),
        (status = 404, description = "Venda não encontrada"),
        (status = 409, description = "Transição inválida")
    ),
    security(("api_jwt" = []))
)]
pub async fn complete_sale(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermSalesEdit>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let sale = app_state.sales_service.complete(id).await?;
    Ok((StatusCode::OK, Json(sale)))
}

// POST /api/sales/{id}/cancel
#[utoipa::path(
    post,
    path = "/api/sales/{id}/cancel",
    tag = "Sales",
    params(("id" = Uuid, Path, description = "ID da venda")),
    responses(
        (status = 200, description = "Venda cancelada; reserva liberada", body = SaleDetail),
        (status = 404, description = "Venda não encontrada"),
        (status = 409, description = "Transição inválida")
    ),
    security(("api_jwt" = []))
)]
pub async fn cancel_sale(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermSalesEdit>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let sale = app_state.sales_service.cancel(id).await?;
    Ok((StatusCode::OK, Json(sale)))
}
