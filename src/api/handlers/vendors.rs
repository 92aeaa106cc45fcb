//! Vendor endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use super::validated;
use crate::{
    api::dto::{PaginationParams, VendorCreate, VendorDto},
    models::Page,
    state::AppState,
    Result,
};

pub async fn get_vendors(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Page<VendorDto>>> {
    let params = validated(params)?;
    let page = state
        .vendors
        .get_paginated(params.limit, params.offset)
        .await?;
    Ok(Json(page.map(VendorDto::from)))
}

pub async fn add_one_vendor(
    State(state): State<AppState>,
    Json(body): Json<VendorCreate>,
) -> Result<(StatusCode, Json<VendorDto>)> {
    let body = validated(body)?;
    let vendor = state
        .vendors
        .add_one(&body.kvk_number, &body.trade_name, &body.statutory_name)
        .await?;
    // A fresh vendor owns no applications yet; skip the second lookup.
    let dto = VendorDto::from(crate::models::VendorAggregate {
        vendor,
        applications: Vec::new(),
    });
    Ok((StatusCode::CREATED, Json(dto)))
}

pub async fn get_vendor_by_id(
    State(state): State<AppState>,
    Path(vendor_id): Path<Uuid>,
) -> Result<Json<VendorDto>> {
    let vendor = state.vendors.get_one(vendor_id).await?;
    Ok(Json(vendor.into()))
}

pub async fn get_vendor_by_kvk_number(
    State(state): State<AppState>,
    Path(kvk_number): Path<String>,
) -> Result<Json<VendorDto>> {
    let vendor = state.vendors.get_one_by_kvk_number(&kvk_number).await?;
    Ok(Json(vendor.into()))
}

pub async fn delete_vendor_by_id(
    State(state): State<AppState>,
    Path(vendor_id): Path<Uuid>,
) -> Result<Json<VendorDto>> {
    let vendor = state.vendors.remove_one(vendor_id).await?;
    let dto = VendorDto::from(crate::models::VendorAggregate {
        vendor,
        applications: Vec::new(),
    });
    Ok(Json(dto))
}
