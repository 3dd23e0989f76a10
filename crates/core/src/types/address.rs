//! Delivery address value object.

use serde::{Deserialize, Serialize};

/// Errors reported by [`Address::validate`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    /// The recipient name is blank.
    #[error("name cannot be empty")]
    EmptyName,
    /// The phone number is not a valid 10-digit mobile number.
    #[error("phone must be a 10-digit mobile number starting with 6-9")]
    InvalidPhone,
    /// The first address line is blank.
    #[error("address line cannot be empty")]
    EmptyAddressLine,
    /// The city is blank.
    #[error("city cannot be empty")]
    EmptyCity,
    /// The state is blank.
    #[error("state cannot be empty")]
    EmptyState,
    /// The pincode is not exactly 6 digits.
    #[error("pincode must be a 6-digit number")]
    InvalidPincode,
}

/// A delivery address captured at checkout.
///
/// Addresses are value objects: they are never persisted on their own, only
/// as part of an order snapshot. Validation is separate from construction so
/// a form can be filled field by field and checked once on submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Recipient name.
    pub name: String,
    /// 10-digit mobile number.
    pub phone: String,
    /// Street address.
    pub address_line1: String,
    /// Apartment, landmark, etc.
    #[serde(default)]
    pub address_line2: Option<String>,
    /// City.
    pub city: String,
    /// State.
    pub state: String,
    /// 6-digit postal code.
    pub pincode: String,
}

impl Address {
    /// Check the address against checkout rules.
    ///
    /// Fields are checked in form order and the first failure is returned,
    /// so a caller can surface one message at a time.
    ///
    /// # Errors
    ///
    /// Returns the first [`AddressError`] encountered:
    /// - blank name, address line, city, or state
    /// - phone not matching `[6-9]` followed by 9 digits
    /// - pincode not exactly 6 digits
    pub fn validate(&self) -> Result<(), AddressError> {
        if self.name.trim().is_empty() {
            return Err(AddressError::EmptyName);
        }
        if !is_valid_mobile(self.phone.trim()) {
            return Err(AddressError::InvalidPhone);
        }
        if self.address_line1.trim().is_empty() {
            return Err(AddressError::EmptyAddressLine);
        }
        if self.city.trim().is_empty() {
            return Err(AddressError::EmptyCity);
        }
        if self.state.trim().is_empty() {
            return Err(AddressError::EmptyState);
        }
        if !is_valid_pincode(self.pincode.trim()) {
            return Err(AddressError::InvalidPincode);
        }
        Ok(())
    }
}

/// Indian mobile number: 10 digits, first digit 6-9.
fn is_valid_mobile(phone: &str) -> bool {
    let mut chars = phone.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    ('6'..='9').contains(&first)
        && phone.len() == 10
        && chars.all(|c| c.is_ascii_digit())
}

/// Indian postal code: exactly 6 digits.
fn is_valid_pincode(pincode: &str) -> bool {
    pincode.len() == 6 && pincode.chars().all(|c| c.is_ascii_digit())
}
