//! Request payload validation

use shared::error::{AppError, AppResult};
use shared::models::OrderCreate;

use super::phone;

/// Validate an order creation payload and normalize its phone in place.
///
/// Required fields mirror the minimum a shippable order needs. Quantity
/// must be at least 1.
pub fn validate_order_create(data: &mut OrderCreate, country_code: &str) -> AppResult<()> {
    if data.customer_name.trim().is_empty() {
        return Err(AppError::required_field("customer_name"));
    }
    if data.customer_phone.trim().is_empty() {
        return Err(AppError::required_field("customer_phone"));
    }
    if data.address.trim().is_empty() {
        return Err(AppError::required_field("address"));
    }
    if data.postcode.trim().is_empty() {
        return Err(AppError::required_field("postcode"));
    }
    if data.bundle.trim().is_empty() {
        return Err(AppError::required_field("bundle"));
    }
    if data.marketer.trim().is_empty() {
        return Err(AppError::required_field("marketer"));
    }
    if data.quantity < 1 {
        return Err(AppError::validation("quantity must be at least 1"));
    }

    let normalized = phone::normalize(&data.customer_phone, country_code);
    if !phone::is_valid(&normalized) {
        return Err(AppError::invalid_phone(data.customer_phone.clone()));
    }
    data.customer_phone = normalized;

    Ok(())
}
