// src/handlers/crm.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::rbac::{
        PermGrnCreate, PermGrnDelete, PermGrnEdit, PermGrnView, PermSalesCreate,
        PermSalesDelete, PermSalesEdit, PermSalesView, RequirePermission,
    },
    models::crm::{Customer, CustomerDetail, Vendor, VendorDetail, VendorKind},
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct CrmListQuery {
    pub search: Option<String>,
}

// ---
// Payloads: Cliente
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub full_name: String,

    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: Option<String>,

    pub phone: Option<String>,
    pub document_number: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomerPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub full_name: Option<String>,

    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: Option<String>,

    pub phone: Option<String>,
    pub document_number: Option<String>,
    pub address: Option<String>,
}

// ---
// Payloads: Fornecedor
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateVendorPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,

    pub kind: VendorKind,
    pub contact_person: Option<String>,

    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: Option<String>,

    pub phone: Option<String>,
    pub address: Option<String>,

    #[validate(range(min = 1, max = 5, message = "A avaliação vai de 1 a 5."))]
    pub rating: i16,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVendorPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: Option<String>,

    pub kind: Option<VendorKind>,
    pub contact_person: Option<String>,

    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: Option<String>,

    pub phone: Option<String>,
    pub address: Option<String>,

    #[validate(range(min = 1, max = 5, message = "A avaliação vai de 1 a 5."))]
    pub rating: Option<i16>,
}

// --- CLIENTES ---

// GET /api/crm/customers
#[utoipa::path(
    get,
    path = "/api/crm/customers",
    tag = "CRM",
    params(CrmListQuery),
    responses(
        (status = 200, description = "Clientes com totais derivados das vendas", body = Vec<CustomerDetail>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_customers(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermSalesView>,
    Query(query): Query<CrmListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let customers = app_state
        .crm_service
        .list_customers(query.search.as_deref())
        .await;
    Ok((StatusCode::OK, Json(customers)))
}

// GET /api/crm/customers/{id}
#[utoipa::path(
    get,
    path = "/api/crm/customers/{id}",
    tag = "CRM",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "Cliente com totais derivados", body = CustomerDetail),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_customer(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermSalesView>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let customer = app_state.crm_service.get_customer(id).await?;
    Ok((StatusCode::OK, Json(customer)))
}

// POST /api/crm/customers
#[utoipa::path(
    post,
    path = "/api/crm/customers",
    tag = "CRM",
    request_body = CreateCustomerPayload,
    responses(
        (status = 201, description = "Cliente criado", body = Customer)
    ),
    security(("api_jwt" = []))
)]
pub async fn create_customer(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermSalesCreate>,
    Json(payload): Json<CreateCustomerPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let customer = app_state
        .crm_service
        .create_customer(
            payload.full_name,
            payload.email,
            payload.phone,
            payload.document_number,
            payload.address,
        )
        .await;

    Ok((StatusCode::CREATED, Json(customer)))
}

// PUT /api/crm/customers/{id}
#[utoipa::path(
    put,
    path = "/api/crm/customers/{id}",
    tag = "CRM",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    request_body = UpdateCustomerPayload,
    responses(
        (status = 200, description = "Cliente atualizado", body = Customer),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_customer(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermSalesEdit>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCustomerPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let customer = app_state
        .crm_service
        .update_customer(
            id,
            payload.full_name,
            payload.email,
            payload.phone,
            payload.document_number,
            payload.address,
        )
        .await?;

    Ok((StatusCode::OK, Json(customer)))
}

// DELETE /api/crm/customers/{id}
#[utoipa::path(
    delete,
    path = "/api/crm/customers/{id}",
    tag = "CRM",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    responses(
        (status = 204, description = "Cliente removido"),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_customer(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermSalesDelete>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.crm_service.delete_customer(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// --- FORNECEDORES ---

// GET /api/crm/vendors
#[utoipa::path(
    get,
    path = "/api/crm/vendors",
    tag = "CRM",
    params(CrmListQuery),
    responses(
        (status = 200, description = "Fornecedores com totais derivados das notas", body = Vec<VendorDetail>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_vendors(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermGrnView>,
    Query(query): Query<CrmListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let vendors = app_state
        .crm_service
        .list_vendors(query.search.as_deref())
        .await;
    Ok((StatusCode::OK, Json(vendors)))
}

// POST /api/crm/vendors
#[utoipa::path(
    post,
    path = "/api/crm/vendors",
    tag = "CRM",
    request_body = CreateVendorPayload,
    responses(
        (status = 201, description = "Fornecedor criado", body = Vendor)
    ),
    security(("api_jwt" = []))
)]
pub async fn create_vendor(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermGrnCreate>,
    Json(payload): Json<CreateVendorPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let vendor = app_state
        .crm_service
        .create_vendor(
            payload.name,
            payload.kind,
            payload.contact_person,
            payload.email,
            payload.phone,
            payload.address,
            payload.rating,
        )
        .await;

    Ok((StatusCode::CREATED, Json(vendor)))
}

// PUT /api/crm/vendors/{id}
#[utoipa::path(
    put,
    path = "/api/crm/vendors/{id}",
    tag = "CRM",
    params(("id" = Uuid, Path, description = "ID do fornecedor")),
    request_body = UpdateVendorPayload,
    responses(
        (status = 200, description = "Fornecedor atualizado", body = Vendor),
        (status = 404, description = "Fornecedor não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_vendor(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermGrnEdit>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateVendorPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let vendor = app_state
        .crm_service
        .update_vendor(
            id,
            payload.name,
            payload.kind,
            payload.contact_person,
            payload.email,
            payload.phone,
            payload.address,
            payload.rating,
        )
        .await?;

    Ok((StatusCode::OK, Json(vendor)))
}

// DELETE /api/crm/vendors/{id}
#[utoipa::path(
    delete,
    path = "/api/crm/vendors/{id}",
    tag = "CRM",
    params(("id" = Uuid, Path, description = "ID do fornecedor")),
    responses(
        (status = 204, description = "Fornecedor removido"),
        (status = 404, description = "Fornecedor não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_vendor(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermGrnDelete>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.crm_service.delete_vendor(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
