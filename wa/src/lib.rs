//! WhatsApp hand-off for the storefront.
//!
//! Every purchase ends in a `wa.me` chat link: the seller's number is
//! normalized to international digits and the order details ride along as a
//! pre-filled, percent-encoded message. Everything here is pure; unusable
//! input yields an empty string rather than an error.

pub mod link;
pub mod money;
pub mod number;
pub mod order;
pub mod share;

pub use link::{WA_BASE_URL, WaLinkBuilder, build_link, encode_uri_component, share_link};
pub use money::format_rupiah;
pub use number::{DEFAULT_COUNTRY_CODE, DEFAULT_MOBILE_TRUNK, NumberPlan, PlanError, normalize_number};
pub use order::{OrderDraft, OrderVariant, generate_order_code, order_code_with};
pub use share::{absolute_url, apply_template, cache_stamp, seller_greeting, share_text, with_cache_buster};
