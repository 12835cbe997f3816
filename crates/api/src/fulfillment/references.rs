//! Reference-data resolution against the catalog.
//!
//! Checks run in a fixed order and stop at the first failure, so a request
//! with several defects always reports the same one: customer, then the
//! billing address (existence, ownership, kind), then the shipping address,
//! then each product in request order. Either the whole bundle resolves or
//! nothing is returned.

use salenote_catalog::{Address, AddressKind, Catalog, CatalogError, Customer, Product};
use salenote_core::error::CoreError;
use salenote_core::request::ValidatedRequest;

/// Fully resolved reference data for one creation request.
///
/// `products` is aligned index-for-index with the request's items.
#[derive(Debug)]
pub struct ReferenceBundle {
    pub customer: Customer,
    pub billing_address: Address,
    pub shipping_address: Address,
    pub products: Vec<Product>,
}

/// Resolve and cross-check every reference in the request.
pub async fn resolve<C>(catalog: &C, request: &ValidatedRequest) -> Result<ReferenceBundle, CoreError>
where
    C: Catalog + ?Sized,
{
    let customer = communication(catalog.customer(&request.customer_id).await)?
        .ok_or_else(|| CoreError::ReferenceNotFound {
            kind: "Customer",
            id: request.customer_id.clone(),
        })?;

    let billing_address = resolve_address(
        catalog,
        &request.billing_address_id,
        &request.customer_id,
        AddressKind::Billing,
    )
    .await?;
    let shipping_address = resolve_address(
        catalog,
        &request.shipping_address_id,
        &request.customer_id,
        AddressKind::Shipping,
    )
    .await?;

    let mut products = Vec::with_capacity(request.items.len());
    for item in &request.items {
        let product = communication(catalog.product(&item.product_id).await)?.ok_or_else(|| {
            CoreError::ReferenceNotFound {
                kind: "Product",
                id: item.product_id.clone(),
            }
        })?;
        products.push(product);
    }

    Ok(ReferenceBundle {
        customer,
        billing_address,
        shipping_address,
        products,
    })
}

/// Look up one address and check ownership and kind, in that order.
async fn resolve_address<C>(
    catalog: &C,
    address_id: &str,
    customer_id: &str,
    expected_kind: AddressKind,
) -> Result<Address, CoreError>
where
    C: Catalog + ?Sized,
{
    let label = kind_label(expected_kind);

    let address = communication(catalog.address(address_id).await)?.ok_or_else(|| {
        CoreError::ReferenceNotFound {
            kind: label,
            id: address_id.to_string(),
        }
    })?;

    if address.customer_id != customer_id {
        return Err(CoreError::ReferenceConflict(format!(
            "{label} {address_id} belongs to a different customer"
        )));
    }
    if address.kind != expected_kind {
        return Err(CoreError::ReferenceConflict(format!(
            "Address {address_id} is not a {} address",
            match expected_kind {
                AddressKind::Billing => "billing",
                AddressKind::Shipping => "shipping",
            }
        )));
    }

    Ok(address)
}

fn kind_label(kind: AddressKind) -> &'static str {
    match kind {
        AddressKind::Billing => "Billing address",
        AddressKind::Shipping => "Shipping address",
    }
}

/// Collapse a catalog transport failure into the communication class.
fn communication<T>(result: Result<Option<T>, CatalogError>) -> Result<Option<T>, CoreError> {
    result.map_err(|e| CoreError::Communication(e.to_string()))
}
