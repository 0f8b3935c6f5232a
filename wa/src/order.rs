//! Order message composition.
//!
//! DESIGN
//! ======
//! There is no order backend: the buyer's details are written into a chat
//! message and sent to the seller through a `wa.me` link. The order code is
//! short and human-friendly so both sides can refer to it in the chat.

#[cfg(test)]
#[path = "order_test.rs"]
mod order_test;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::link::build_link;
use crate::money::format_rupiah;

pub const MIN_QUANTITY: u32 = 1;
pub const MAX_QUANTITY: u32 = 99;
pub const MIN_BUYER_NAME_CHARS: usize = 2;
pub const MIN_BUYER_WHATSAPP_CHARS: usize = 8;

/// Letters that cannot be confused with digits (no `I`, no `O`).
const ORDER_CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ";

const CLOSING_LINE: &str = "Boleh info stok & cara ordernya ya? Terima kasih \u{1f647}\u{200d}\u{2642}\u{fe0f}";

/// A purchasable variant of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderVariant {
    pub sku: String,
    pub label: String,
    pub price: i64,
    #[serde(default)]
    pub stock: Option<u32>,
}

/// Everything that goes into one order message.
#[derive(Debug, Clone, Default)]
pub struct OrderDraft {
    pub parish_name: String,
    pub seller_name: String,
    pub product_name: String,
    pub product_category: String,
    pub base_price: i64,
    /// Absolute link back to the product page.
    pub product_url: String,
    pub variant: Option<OrderVariant>,
    /// Clamped to `MIN_QUANTITY..=MAX_QUANTITY` when read.
    pub quantity: u32,
    pub buyer_name: String,
    pub buyer_whatsapp: String,
    pub note: String,
    pub order_code: String,
}

impl OrderDraft {
    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity.clamp(MIN_QUANTITY, MAX_QUANTITY)
    }

    #[must_use]
    pub fn unit_price(&self) -> i64 {
        self.variant.as_ref().map_or(self.base_price, |v| v.price)
    }

    #[must_use]
    pub fn total_price(&self) -> i64 {
        self.unit_price().saturating_mul(i64::from(self.quantity()))
    }

    /// The buyer has left enough contact details for the seller to reply.
    #[must_use]
    pub fn can_send(&self) -> bool {
        self.buyer_name.trim().chars().count() >= MIN_BUYER_NAME_CHARS
            && self.buyer_whatsapp.trim().chars().count() >= MIN_BUYER_WHATSAPP_CHARS
    }

    /// Message lines; blank buyer fields and a missing variant are omitted.
    #[must_use]
    pub fn message_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Halo Kak {} \u{1f64f}", self.seller_name),
            String::new(),
            format!("Saya mau pesan: {}", self.product_name),
            format!("Kategori: {}", self.product_category),
            format!("Paroki: {}", self.parish_name),
        ];
        if let Some(variant) = &self.variant {
            lines.push(format!("Varian: {} ({})", variant.label, variant.sku));
        }
        lines.push(format!("Qty: {}", self.quantity()));
        lines.push(format!("Harga: {} / item", format_rupiah(self.unit_price())));
        lines.push(format!("Total: {}", format_rupiah(self.total_price())));
        lines.push(String::new());

        for (label, value) in [("Nama", &self.buyer_name), ("WA", &self.buyer_whatsapp), ("Catatan", &self.note)] {
            let value = value.trim();
            if !value.is_empty() {
                lines.push(format!("{label}: {value}"));
            }
        }

        lines.push(String::new());
        lines.push(format!("Kode order: {}", self.order_code));
        lines.push(format!("Link produk: {}", self.product_url));
        lines.push(String::new());
        lines.push(CLOSING_LINE.to_string());
        lines
    }

    #[must_use]
    pub fn message(&self) -> String {
        self.message_lines().join("\n")
    }

    /// Chat link to the seller carrying this order, or empty when the seller
    /// number is unusable.
    #[must_use]
    pub fn whatsapp_link(&self, seller_number: &str) -> String {
        build_link(seller_number, &self.message())
    }
}

/// A fresh order code such as `KM-482`.
#[must_use]
pub fn generate_order_code() -> String {
    order_code_with(&mut rand::rng())
}

/// Order code drawn from `rng`.
#[must_use]
pub fn order_code_with<R: Rng>(rng: &mut R) -> String {
    let mut pick = || char::from(ORDER_CODE_ALPHABET[rng.random_range(0..ORDER_CODE_ALPHABET.len())]);
    let first = pick();
    let second = pick();
    let number: u16 = rng.random_range(100..1000);
    format!("{first}{second}-{number}")
}
