//! Inventory item — a stocked part at one site or van.

use serde::{Deserialize, Serialize};

use crate::error::FieldServiceError;
use crate::id::PartId;

/// A part held at a location. `quantity` is unsigned; every mutation clamps at zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: PartId,
    pub location: String,
    pub part_number: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cost: f64,
    #[serde(default)]
    pub sell: f64,
    #[serde(default)]
    pub quantity: u32,
}

impl InventoryItem {
    /// Create a builder for constructing an [`InventoryItem`].
    #[must_use]
    pub fn builder() -> InventoryItemBuilder {
        InventoryItemBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`FieldServiceError::Validation`] when `part_number` or
    /// `location` is blank.
    pub fn validate(&self) -> Result<(), FieldServiceError> {
        if self.part_number.trim().is_empty() {
            return Err(FieldServiceError::missing("InventoryItem", "partNumber"));
        }
        if self.location.trim().is_empty() {
            return Err(FieldServiceError::missing("InventoryItem", "location"));
        }
        Ok(())
    }

    /// Apply a signed delta to the quantity, clamping at zero.
    ///
    /// Returns `true` when the result had to be clamped.
    pub fn adjust(&mut self, delta: i64) -> bool {
        let target = i64::from(self.quantity).saturating_add(delta);
        self.quantity = u32::try_from(target.max(0)).unwrap_or(u32::MAX);
        target < 0
    }

    /// Remove `used` units, clamping at zero.
    ///
    /// Returns `true` when stock ran short.
    pub fn deduct(&mut self, used: u32) -> bool {
        self.adjust(-i64::from(used))
    }
}

/// Step-by-step builder for [`InventoryItem`]. A fresh id is assigned on build.
#[derive(Debug, Default)]
pub struct InventoryItemBuilder {
    location: Option<String>,
    part_number: Option<String>,
    description: Option<String>,
    cost: f64,
    sell: f64,
    quantity: u32,
}

impl InventoryItemBuilder {
    #[must_use]
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    #[must_use]
    pub fn part_number(mut self, part_number: impl Into<String>) -> Self {
        self.part_number = Some(part_number.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn cost(mut self, cost: f64) -> Self {
        self.cost = cost;
        self
    }

    #[must_use]
    pub fn sell(mut self, sell: f64) -> Self {
        self.sell = sell;
        self
    }

    #[must_use]
    pub fn quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Consume the builder, validate, and return an [`InventoryItem`].
    ///
    /// # Errors
    ///
    /// Returns [`FieldServiceError::Validation`] if `part_number` or
    /// `location` is missing or blank.
    pub fn build(self) -> Result<InventoryItem, FieldServiceError> {
        let item = InventoryItem {
            id: PartId::new(),
            location: self.location.unwrap_or_default(),
            part_number: self.part_number.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            cost: self.cost,
            sell: self.sell,
            quantity: self.quantity,
        };
        item.validate()?;
        Ok(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use proptest::prelude::*;

    fn item(quantity: u32) -> InventoryItem {
        InventoryItem::builder()
            .location("Shop")
            .part_number("CAP-45")
            .quantity(quantity)
            .build()
            .unwrap()
    }

    #[test]
    fn should_build_valid_item() {
        let item = InventoryItem::builder()
            .location("Van AB")
            .part_number("CAP-45")
            .description("45/5 capacitor")
            .cost(12.5)
            .sell(40.0)
            .quantity(6)
            .build()
            .unwrap();
        assert_eq!(item.quantity, 6);
        assert!((item.sell - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn should_reject_item_without_part_number() {
        let result = InventoryItem::builder().location("Shop").build();
        assert!(matches!(
            result,
            Err(FieldServiceError::Validation(ValidationError::MissingField {
                field: "partNumber",
                ..
            }))
        ));
    }

    #[test]
    fn should_reject_item_without_location() {
        let result = InventoryItem::builder().part_number("CAP-45").build();
        assert!(matches!(
            result,
            Err(FieldServiceError::Validation(ValidationError::MissingField {
                field: "location",
                ..
            }))
        ));
    }

    #[test]
    fn should_add_positive_delta() {
        let mut item = item(3);
        assert!(!item.adjust(2));
        assert_eq!(item.quantity, 5);
    }

    #[test]
    fn should_clamp_at_zero_when_delta_exceeds_stock() {
        let mut item = item(3);
        assert!(item.adjust(-5));
        assert_eq!(item.quantity, 0);
    }

    #[test]
    fn should_clamp_deduction_at_zero() {
        let mut item = item(3);
        assert!(item.deduct(5));
        assert_eq!(item.quantity, 0);
    }

    #[test]
    fn should_reject_negative_quantity_when_deserializing() {
        let json = r#"{"id":"p1","location":"Shop","partNumber":"X","quantity":-2}"#;
        assert!(serde_json::from_str::<InventoryItem>(json).is_err());
    }

    proptest! {
        #[test]
        fn should_never_go_below_zero_for_any_delta_sequence(
            start in 0u32..1_000,
            deltas in proptest::collection::vec(-500i64..500, 0..32),
        ) {
            let mut item = item(start);
            let mut expected = i64::from(start);
            for delta in deltas {
                item.adjust(delta);
                expected = (expected + delta).max(0);
                prop_assert_eq!(i64::from(item.quantity), expected);
            }
        }
    }
}
