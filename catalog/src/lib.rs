//! # catalog
//!
//! Read-only storefront dataset: parishes, the sellers in each parish, and
//! their products. Lookups return `None` for anything unknown; callers treat
//! that as "not found" and move on.
//!
//! Personalization lists store bare [`ProductKey`]s, so [`resolve`] is how a
//! favorite or recent entry becomes something renderable again. Keys for
//! products that have since disappeared simply do not resolve.

mod data;


use serde::Serialize;
use shelf::ProductKey;

pub use data::{PARISHES, PRODUCTS, SELLERS};

/// Administrative areas the storefront is browsed by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Area {
    #[serde(rename = "Jakarta Utara")]
    JakartaUtara,
    #[serde(rename = "Jakarta Timur")]
    JakartaTimur,
    #[serde(rename = "Jakarta Pusat")]
    JakartaPusat,
    #[serde(rename = "Jakarta Barat")]
    JakartaBarat,
    #[serde(rename = "Jakarta Selatan")]
    JakartaSelatan,
}

pub const AREAS: [Area; 5] =
    [Area::JakartaUtara, Area::JakartaTimur, Area::JakartaPusat, Area::JakartaBarat, Area::JakartaSelatan];

impl Area {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::JakartaUtara => "Jakarta Utara",
            Self::JakartaTimur => "Jakarta Timur",
            Self::JakartaPusat => "Jakarta Pusat",
            Self::JakartaBarat => "Jakarta Barat",
            Self::JakartaSelatan => "Jakarta Selatan",
        }
    }
}

impl std::fmt::Display for Area {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Parish {
    pub slug: &'static str,
    pub name: &'static str,
    pub area: Area,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Seller {
    pub slug: &'static str,
    pub parish_slug: &'static str,
    pub name: &'static str,
    pub tagline: &'static str,
    /// Raw WhatsApp number as the seller gave it; not set for demo sellers.
    pub whatsapp: Option<&'static str>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Product {
    pub slug: &'static str,
    pub parish_slug: &'static str,
    pub seller_slug: &'static str,
    pub name: &'static str,
    pub desc: &'static str,
    pub category: &'static str,
    /// Whole rupiah.
    pub price: i64,
    pub sold_count: u32,
    pub is_trending: bool,
    pub is_new: bool,
    pub emoji: Option<&'static str>,
}

impl Product {
    /// Site path of the product page.
    #[must_use]
    pub fn path(&self) -> String {
        format!("/{}/{}/{}", self.parish_slug, self.seller_slug, self.slug)
    }
}

/// A product together with the parish and seller it is listed under.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CatalogItem {
    pub key: ProductKey,
    pub parish: &'static Parish,
    pub seller: &'static Seller,
    pub product: &'static Product,
}

#[must_use]
pub fn areas() -> &'static [Area] {
    &AREAS
}

#[must_use]
pub fn parish_by_slug(slug: &str) -> Option<&'static Parish> {
    PARISHES.iter().find(|p| p.slug == slug)
}

#[must_use]
pub fn seller(parish_slug: &str, seller_slug: &str) -> Option<&'static Seller> {
    SELLERS.iter().find(|s| s.parish_slug == parish_slug && s.slug == seller_slug)
}

#[must_use]
pub fn product(parish_slug: &str, seller_slug: &str, product_slug: &str) -> Option<&'static Product> {
    PRODUCTS
        .iter()
        .find(|p| p.parish_slug == parish_slug && p.seller_slug == seller_slug && p.slug == product_slug)
}

pub fn parishes_by_area(area: Area) -> impl Iterator<Item = &'static Parish> {
    PARISHES.iter().filter(move |p| p.area == area)
}

pub fn sellers_by_parish(parish_slug: &str) -> impl Iterator<Item = &'static Seller> + '_ {
    SELLERS.iter().filter(move |s| s.parish_slug == parish_slug)
}

pub fn products_by_area(area: Area) -> impl Iterator<Item = &'static Product> {
    PRODUCTS
        .iter()
        .filter(move |p| parish_by_slug(p.parish_slug).is_some_and(|parish| parish.area == area))
}

pub fn products_by_seller<'a>(parish_slug: &'a str, seller_slug: &'a str) -> impl Iterator<Item = &'static Product> + 'a {
    PRODUCTS
        .iter()
        .filter(move |p| p.parish_slug == parish_slug && p.seller_slug == seller_slug)
}

/// Personalization key for a catalog product.
#[must_use]
pub fn product_key(product: &Product) -> Option<ProductKey> {
    ProductKey::new(product.parish_slug, product.seller_slug, product.slug).ok()
}

/// Look up the parish, seller and product a key points at.
#[must_use]
pub fn resolve(key: &ProductKey) -> Option<CatalogItem> {
    let parish = parish_by_slug(key.parish())?;
    let seller = seller(parish.slug, key.seller())?;
    let product = product(parish.slug, seller.slug, key.product())?;
    Some(CatalogItem { key: key.clone(), parish, seller, product })
}

/// Resolve keys in order, skipping any that no longer exist.
pub fn resolve_all<'a, I>(keys: I) -> Vec<CatalogItem>
where
    I: IntoIterator<Item = &'a ProductKey>,
{
    keys.into_iter().filter_map(resolve).collect()
}
