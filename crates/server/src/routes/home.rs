//! Directory index page.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use crate::error::Result;
use crate::models::{Address, FullAddressView, FullShopView, State as UsState};
use crate::state::AppState;

/// A shop row on the index page.
pub struct ShopRow {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub is_verified: bool,
}

impl From<&FullShopView> for ShopRow {
    fn from(shop: &FullShopView) -> Self {
        Self {
            id: shop.id.as_i64(),
            name: shop.name.clone(),
            address: address_line(&shop.address),
            is_verified: shop.is_verified,
        }
    }
}

/// An `<option>` in a select.
pub struct SelectOption {
    pub id: i64,
    pub label: String,
}

/// Index page template.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub shops: Vec<ShopRow>,
    pub states: Vec<SelectOption>,
    pub addresses: Vec<SelectOption>,
}

/// Render the directory with the three create forms.
///
/// GET /
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<IndexTemplate> {
    let directory = state.directory();
    let shops = directory.list_directory().await?;
    let states = directory.list_states().await?;
    let addresses = directory.list_addresses().await?;

    Ok(IndexTemplate {
        shops: shops.iter().map(ShopRow::from).collect(),
        states: states.iter().map(state_option).collect(),
        addresses: addresses.iter().map(address_option).collect(),
    })
}

fn state_option(state: &UsState) -> SelectOption {
    SelectOption {
        id: state.id.as_i64(),
        label: state.name.clone(),
    }
}

fn address_option(address: &Address) -> SelectOption {
    SelectOption {
        id: address.id.as_i64(),
        label: format!("{}, {}", address.address_1, address.city),
    }
}

/// Single-line postal address.
fn address_line(address: &FullAddressView) -> String {
    let street = [
        Some(address.address_1.as_str()),
        address.address_2.as_deref(),
        address.address_3.as_deref(),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(", ");

    format!(
        "{street}, {}, {} {}",
        address.city, address.state, address.postal_code
    )
}

#[cfg(test)]
mod tests {
    use honest_shops_core::AddressId;

    use super::*;

    #[test]
    fn test_address_line() {
        let address = FullAddressView {
            id: AddressId::new(1),
            address_1: "88 Pearl Street".to_string(),
            address_2: Some("Unit 2".to_string()),
            address_3: None,
            city: "Boulder".to_string(),
            state: "CO".to_string(),
            postal_code: 80302,
        };

        assert_eq!(
            address_line(&address),
            "88 Pearl Street, Unit 2, Boulder, CO 80302"
        );
    }
}
