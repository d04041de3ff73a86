//! Line items and the drafts used to add them.

use serde::{Deserialize, Serialize};

use crate::error::CartError;
use crate::ids::{ProductId, Sku};
use crate::money::Money;

/// Variant selection for a line item.
///
/// Two selections match only if color, size and material are pairwise equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Variants {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
}

impl Variants {
    /// Set the color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Set the size.
    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    /// Set the material.
    pub fn with_material(mut self, material: impl Into<String>) -> Self {
        self.material = Some(material.into());
        self
    }

    /// True when no axis is set.
    pub fn is_empty(&self) -> bool {
        self.color.is_none() && self.size.is_none() && self.material.is_none()
    }

    /// Short label such as "tierra / M".
    pub fn label(&self) -> String {
        [&self.color, &self.size, &self.material]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" / ")
    }
}

/// Compare two optional variant selections.
///
/// An absent selection behaves like one with every axis unset.
pub fn variants_match(a: Option<&Variants>, b: Option<&Variants>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => a == b,
        (Some(v), None) | (None, Some(v)) => v.is_empty(),
    }
}

/// One row of the cart: a product+variant combination and its quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    pub id: ProductId,
    pub name: String,
    /// Unit price in the smallest currency unit.
    pub price: i64,
    pub image: String,
    pub image_alt: String,
    pub category: String,
    pub sku: Sku,
    pub quantity: u32,
    /// Inventory snapshot taken when the item was added.
    pub stock: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variants: Option<Variants>,
    /// Display-only pre-discount price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<i64>,
}

impl CartLineItem {
    /// Whether this line is the `(id, variants)` identity given.
    pub fn matches(&self, id: &ProductId, variants: Option<&Variants>) -> bool {
        &self.id == id && variants_match(self.variants.as_ref(), variants)
    }

    /// `price * quantity`.
    pub fn line_total(&self) -> i64 {
        self.price.saturating_mul(i64::from(self.quantity))
    }

    /// Unit price as COP money.
    pub fn unit_price(&self) -> Money {
        Money::cop(self.price)
    }

    /// Savings per unit against the original price, if any.
    pub fn unit_savings(&self) -> Option<i64> {
        self.original_price
            .filter(|original| *original > self.price)
            .map(|original| original - self.price)
    }
}

/// Payload for adding an item: a line item whose quantity is optional.
///
/// A missing or zero quantity means one unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemDraft {
    pub id: ProductId,
    pub name: String,
    pub price: i64,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub image_alt: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub sku: Sku,
    pub stock: u32,
    #[serde(default)]
    pub quantity: Option<u32>,
    #[serde(default)]
    pub variants: Option<Variants>,
    #[serde(default)]
    pub original_price: Option<i64>,
}

impl LineItemDraft {
    /// Start a draft with the required fields.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: i64, stock: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            image: String::new(),
            image_alt: String::new(),
            category: String::new(),
            sku: Sku::default(),
            stock,
            quantity: None,
            variants: None,
            original_price: None,
        }
    }

    /// Set the requested quantity.
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// Set the variant selection.
    pub fn with_variants(mut self, variants: Variants) -> Self {
        self.variants = Some(variants);
        self
    }

    /// Set the SKU.
    pub fn with_sku(mut self, sku: impl Into<Sku>) -> Self {
        self.sku = sku.into();
        self
    }

    /// Set the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the image path and alt text.
    pub fn with_image(mut self, image: impl Into<String>, alt: impl Into<String>) -> Self {
        self.image = image.into();
        self.image_alt = alt.into();
        self
    }

    /// Set the pre-discount price.
    pub fn with_original_price(mut self, original_price: i64) -> Self {
        self.original_price = Some(original_price);
        self
    }

    /// Quantity to add, defaulting to one.
    pub fn requested_quantity(&self) -> u32 {
        match self.quantity {
            Some(0) | None => 1,
            Some(q) => q,
        }
    }

    /// Reject drafts the reducer must never see.
    pub fn validate(&self) -> Result<(), CartError> {
        if self.id.is_blank() {
            return Err(CartError::InvalidItem("missing id".to_string()));
        }
        if self.name.trim().is_empty() {
            return Err(CartError::InvalidItem(format!("item {} has no name", self.id)));
        }
        if self.price < 0 {
            return Err(CartError::InvalidItem(format!(
                "item {} has negative price {}",
                self.id, self.price
            )));
        }
        Ok(())
    }

    /// Build the line item this draft becomes, with the given quantity.
    pub fn into_line_item(self, quantity: u32) -> CartLineItem {
        CartLineItem {
            id: self.id,
            name: self.name,
            price: self.price,
            image: self.image,
            image_alt: self.image_alt,
            category: self.category,
            sku: self.sku,
            quantity,
            stock: self.stock,
            variants: self.variants,
            original_price: self.original_price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variants_match_rules() {
        let red = Variants::default().with_color("rojo");
        let red_m = Variants::default().with_color("rojo").with_size("M");

        assert!(variants_match(None, None));
        assert!(variants_match(Some(&red), Some(&red.clone())));
        assert!(!variants_match(Some(&red), Some(&red_m)));
        assert!(!variants_match(None, Some(&red)));
        assert!(!variants_match(Some(&red), None));
        assert!(variants_match(None, Some(&Variants::default())));
    }

    #[test]
    fn test_variants_label() {
        let v = Variants::default().with_color("tierra").with_size("M");
        assert_eq!(v.label(), "tierra / M");
        assert_eq!(Variants::default().label(), "");
    }

    #[test]
    fn test_requested_quantity_defaults_to_one() {
        let draft = LineItemDraft::new("1", "Gorra", 45000, 3);
        assert_eq!(draft.requested_quantity(), 1);
        assert_eq!(draft.clone().with_quantity(0).requested_quantity(), 1);
        assert_eq!(draft.with_quantity(2).requested_quantity(), 2);
    }

    #[test]
    fn test_validate_rejects_malformed_drafts() {
        assert!(LineItemDraft::new("", "Gorra", 1, 1).validate().is_err());
        assert!(LineItemDraft::new("1", " ", 1, 1).validate().is_err());
        assert!(LineItemDraft::new("1", "Gorra", -1, 1).validate().is_err());
        assert!(LineItemDraft::new("1", "Gorra", 0, 1).validate().is_ok());
    }

    #[test]
    fn test_line_item_json_layout() {
        let item = LineItemDraft::new("1", "Gorra", 45000, 3)
            .with_image("/img/gorro1.webp", "Gorra bordada")
            .with_original_price(60000)
            .into_line_item(2);
        let json = serde_json::to_value(&item).unwrap();

        assert_eq!(json["imageAlt"], "Gorra bordada");
        assert_eq!(json["originalPrice"], 60000);
        assert_eq!(json["quantity"], 2);
        assert!(json.get("variants").is_none());
        assert_eq!(item.line_total(), 90000);
        assert_eq!(item.unit_savings(), Some(15000));
    }
}
