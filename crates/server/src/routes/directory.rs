//! Directory route handlers.
//!
//! Create endpoints take URL-encoded forms and redirect back to the index.

use axum::{
    Form, Json,
    extract::{Path, State, rejection::FormRejection},
    response::Redirect,
};
use serde::Deserialize;
use tracing::instrument;

use honest_shops_core::ShopId;

use crate::error::{AppError, Result};
use crate::models::FullShopView;
use crate::services::{AddressInput, ShopInput, ShopList};
use crate::state::AppState;

/// State creation form data.
#[derive(Debug, Deserialize)]
pub struct StateForm {
    pub name: Option<String>,
}

/// Create a state.
///
/// POST /create/state
#[instrument(skip(state))]
pub async fn create_state(
    State(state): State<AppState>,
    form: std::result::Result<Form<StateForm>, FormRejection>,
) -> Result<Redirect> {
    let Form(form) = form?;
    state.directory().create_state(form.name.as_deref()).await?;
    Ok(Redirect::to("/"))
}

/// Create an address.
///
/// POST /create/address
#[instrument(skip(state))]
pub async fn create_address(
    State(state): State<AppState>,
    form: std::result::Result<Form<AddressInput>, FormRejection>,
) -> Result<Redirect> {
    let Form(form) = form?;
    state.directory().create_address(&form).await?;
    Ok(Redirect::to("/"))
}

/// Create a shop.
///
/// POST /create/shop
#[instrument(skip(state))]
pub async fn create_shop(
    State(state): State<AppState>,
    form: std::result::Result<Form<ShopInput>, FormRejection>,
) -> Result<Redirect> {
    let Form(form) = form?;
    state.directory().create_shop(&form).await?;
    Ok(Redirect::to("/"))
}

/// Live directory.
///
/// GET /directory
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<FullShopView>>> {
    Ok(Json(state.directory().list_directory().await?))
}

/// One shop from the live directory.
///
/// GET /directory/{id}
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FullShopView>> {
    let id: ShopId = id
        .parse()
        .map_err(|_| AppError::BadRequest("shop id must be an integer".to_string()))?;

    state
        .directory()
        .get_shop_view(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Shop not found".to_string()))
}

/// Public shop list, from the configured catalog source.
///
/// GET /get-all-shops
pub async fn all_shops(State(state): State<AppState>) -> Result<Json<ShopList>> {
    Ok(Json(state.catalog().list_shops().await?))
}
