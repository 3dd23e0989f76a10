//! Engine-level error types.
//!
//! Expected outcomes stay out of the error channel: not-found lookups return
//! `Option`, and storage corruption is recovered inside the storage adapter.
//! What remains are the validation failures a caller must react to.

use thiserror::Error;

use shopkart_core::AddressError;

pub use crate::catalog::CatalogError;
pub use crate::stores::session::AuthError;

/// Reasons a checkout cannot proceed.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// There is nothing to order.
    #[error("cart is empty")]
    EmptyCart,

    /// The delivery address failed validation.
    #[error("invalid address: {0}")]
    InvalidAddress(#[from] AddressError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkout_error_display() {
        assert_eq!(CheckoutError::EmptyCart.to_string(), "cart is empty");

        let err = CheckoutError::InvalidAddress(AddressError::InvalidPincode);
        assert_eq!(
            err.to_string(),
            "invalid address: pincode must be a 6-digit number"
        );
    }
}
