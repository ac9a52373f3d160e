//! Customer — the person or business a job is performed for.

use serde::{Deserialize, Serialize};

use crate::error::FieldServiceError;
use crate::id::CustomerId;

/// Whether the customer is expected to be on site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HomeStatus {
    #[default]
    Unknown,
    Home,
    NotHome,
}

impl std::fmt::Display for HomeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unknown => f.write_str("unknown"),
            Self::Home => f.write_str("home"),
            Self::NotHome => f.write_str("not_home"),
        }
    }
}

impl std::str::FromStr for HomeStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unknown" => Ok(Self::Unknown),
            "home" => Ok(Self::Home),
            "not_home" => Ok(Self::NotHome),
            other => Err(format!("unknown home status {other:?}")),
        }
    }
}

/// A customer record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub home_status: HomeStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Customer {
    /// Create a builder for constructing a [`Customer`].
    #[must_use]
    pub fn builder() -> CustomerBuilder {
        CustomerBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`FieldServiceError::Validation`] when `name` is blank.
    pub fn validate(&self) -> Result<(), FieldServiceError> {
        if self.name.trim().is_empty() {
            return Err(FieldServiceError::missing("Customer", "name"));
        }
        Ok(())
    }
}

/// Step-by-step builder for [`Customer`]. A fresh id is assigned on build.
#[derive(Debug, Default)]
pub struct CustomerBuilder {
    name: Option<String>,
    address: Option<String>,
    home_status: HomeStatus,
    notes: Option<String>,
}

impl CustomerBuilder {
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    #[must_use]
    pub fn home_status(mut self, home_status: HomeStatus) -> Self {
        self.home_status = home_status;
        self
    }

    #[must_use]
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        let notes: String = notes.into();
        self.notes = (!notes.is_empty()).then_some(notes);
        self
    }

    /// Consume the builder, validate, and return a [`Customer`].
    ///
    /// # Errors
    ///
    /// Returns [`FieldServiceError::Validation`] if `name` is missing or blank.
    pub fn build(self) -> Result<Customer, FieldServiceError> {
        let customer = Customer {
            id: CustomerId::new(),
            name: self.name.unwrap_or_default(),
            address: self.address.unwrap_or_default(),
            home_status: self.home_status,
            notes: self.notes,
        };
        customer.validate()?;
        Ok(customer)
    }
}
