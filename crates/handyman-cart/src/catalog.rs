//! The storefront's product catalog.
//!
//! Products are hardcoded sample data. A [`Product`] plus a variant selection
//! becomes a [`LineItemDraft`] ready to be added to the cart.

use serde::{Deserialize, Serialize};

use crate::cart::{LineItemDraft, Variants};
use crate::error::CartError;
use crate::format::discount_percent;
use crate::ids::{ProductId, Sku};
use crate::money::Money;

/// One selectable value of a variant dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantOption {
    /// Display label, e.g. "M (56-58 cm)".
    pub label: String,
    /// Value stored on the line item, e.g. "M".
    pub value: String,
    pub available: bool,
}

impl VariantOption {
    fn new(label: &str, value: &str, available: bool) -> Self {
        Self {
            label: label.to_string(),
            value: value.to_string(),
            available,
        }
    }
}

/// A product as listed in the storefront.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<i64>,
    pub image: String,
    pub image_alt: String,
    pub category: String,
    #[serde(default)]
    pub sku: Sku,
    /// Units available. Zero when out of stock.
    pub stock: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub colors: Vec<VariantOption>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sizes: Vec<VariantOption>,
}

impl Product {
    fn listing(
        id: &str,
        name: &str,
        price: i64,
        category: &str,
        image: &str,
        image_alt: &str,
        stock: u32,
    ) -> Self {
        Self {
            id: ProductId::new(id),
            name: name.to_string(),
            price,
            original_price: None,
            image: image.to_string(),
            image_alt: image_alt.to_string(),
            category: category.to_string(),
            sku: Sku::default(),
            stock,
            colors: Vec::new(),
            sizes: Vec::new(),
        }
    }

    fn on_sale(mut self, original_price: i64) -> Self {
        self.original_price = Some(original_price);
        self
    }

    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }

    /// The price as money in COP.
    pub fn unit_price(&self) -> Money {
        Money::cop(self.price)
    }

    /// Whole-number discount against the original price, if any.
    pub fn discount_percent(&self) -> Option<u32> {
        let original = Money::cop(self.original_price?);
        discount_percent(&original, &self.unit_price())
    }

    /// Build a cart draft for the selected variants.
    ///
    /// Each selected value must be one of the product's options and must be
    /// available. An empty selection is stored as no variants.
    pub fn to_draft(&self, selection: Variants, quantity: u32) -> Result<LineItemDraft, CartError> {
        check_option(&self.id, "color", &self.colors, selection.color.as_deref())?;
        check_option(&self.id, "size", &self.sizes, selection.size.as_deref())?;
        if let Some(material) = &selection.material {
            return Err(CartError::InvalidItem(format!(
                "product {} has no material option {}",
                self.id, material
            )));
        }

        let mut draft = LineItemDraft::new(self.id.clone(), self.name.clone(), self.price, self.stock)
            .with_quantity(quantity)
            .with_category(self.category.clone())
            .with_image(self.image.clone(), self.image_alt.clone())
            .with_sku(self.sku.clone());
        if let Some(original_price) = self.original_price {
            draft = draft.with_original_price(original_price);
        }
        if !selection.is_empty() {
            draft = draft.with_variants(selection);
        }
        Ok(draft)
    }
}

fn check_option(
    id: &ProductId,
    dimension: &str,
    options: &[VariantOption],
    selected: Option<&str>,
) -> Result<(), CartError> {
    let Some(selected) = selected else {
        return Ok(());
    };

    match options.iter().find(|option| option.value == selected) {
        Some(option) if option.available => Ok(()),
        Some(_) => Err(CartError::InvalidItem(format!(
            "{} {} of product {} is unavailable",
            dimension, selected, id
        ))),
        None => Err(CartError::InvalidItem(format!(
            "product {} has no {} option {}",
            id, dimension, selected
        ))),
    }
}

/// The sample products shown in the storefront.
pub fn sample_catalog() -> Vec<Product> {
    let mut gorra = Product::listing(
        "1",
        "Gorra Artesanal Bordada a Mano",
        45_000,
        "Gorras",
        "/LaNik-/img/gorras/gorro1.webp",
        "Gorra artesanal con bordado tradicional",
        8,
    )
    .on_sale(60_000);
    gorra.sku = Sku::new("GOR-001-ART");
    gorra.colors = vec![
        VariantOption::new("Tierra", "tierra", true),
        VariantOption::new("Ocre", "ocre", true),
        VariantOption::new("Marfil", "marfil", false),
    ];
    gorra.sizes = vec![
        VariantOption::new("S (54-56 cm)", "S", true),
        VariantOption::new("M (56-58 cm)", "M", true),
        VariantOption::new("L (58-60 cm)", "L", true),
        VariantOption::new("XL (60-62 cm)", "XL", false),
    ];

    vec![
        gorra,
        Product::listing(
            "2",
            "Muñeco de Trapo Tradicional",
            35_000,
            "Muñecos",
            "/LaNik-/img/muñecos/muneco1.webp",
            "Muñeco de trapo hecho a mano con materiales naturales",
            8,
        ),
        Product::listing(
            "3",
            "Pintura Acrílica sobre Lienzo",
            120_000,
            "Pinturas",
            "/LaNik-/img/pinturas/pintura1.webp",
            "Pintura artística acrílica con paisaje montañoso",
            2,
        ),
        Product::listing(
            "4",
            "Poncho de Lana Tejido",
            85_000,
            "Ponchos",
            "/LaNik-/img/ponchos/poncho1.webp",
            "Poncho de lana tejido con patrones geométricos",
            0,
        ),
        Product::listing(
            "5",
            "Sweater de Alpaca Premium",
            150_000,
            "Sweaters",
            "/LaNik-/img/sweaters/sueter1.webp",
            "Sweater de alpaca con diseño contemporáneo",
            12,
        )
        .on_sale(180_000),
        Product::listing(
            "6",
            "Gorra de Cuero Natural",
            55_000,
            "Gorras",
            "/LaNik-/img/gorras/gorro2.webp",
            "Gorra de cuero curtido naturalmente",
            6,
        ),
    ]
}

/// Look up a product by id.
pub fn find_product<'a>(catalog: &'a [Product], id: &str) -> Result<&'a Product, CartError> {
    catalog
        .iter()
        .find(|product| product.id == *id)
        .ok_or_else(|| CartError::ProductNotFound(id.to_string()))
}
