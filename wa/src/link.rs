//! `wa.me` deep links.

#[cfg(test)]
#[path = "link_test.rs"]
mod link_test;

use crate::number::NumberPlan;

pub const WA_BASE_URL: &str = "https://wa.me";

/// Bytes left as-is by `encodeURIComponent`, besides ASCII alphanumerics.
const UNRESERVED_MARKS: &[u8] = b"-_.!~*'()";
const HEX_UPPER: &[u8; 16] = b"0123456789ABCDEF";

/// Builds chat links under one [`NumberPlan`].
#[derive(Debug, Clone, Default)]
pub struct WaLinkBuilder {
    plan: NumberPlan,
}

impl WaLinkBuilder {
    #[must_use]
    pub fn new(plan: NumberPlan) -> Self {
        Self { plan }
    }

    #[must_use]
    pub fn plan(&self) -> &NumberPlan {
        &self.plan
    }

    /// Link to a chat with `raw_number`, pre-filled with `message`.
    ///
    /// Returns an empty string when the number has no digits, which callers
    /// treat as "hide or disable the WhatsApp action". A blank message gives a
    /// bare chat link.
    #[must_use]
    pub fn build(&self, raw_number: &str, message: &str) -> String {
        let number = self.plan.normalize(raw_number);
        if number.is_empty() {
            return String::new();
        }
        let text = message.trim();
        if text.is_empty() {
            return format!("{WA_BASE_URL}/{number}");
        }
        format!("{WA_BASE_URL}/{number}?text={}", encode_uri_component(text))
    }
}

/// [`WaLinkBuilder::build`] with the default plan.
#[must_use]
pub fn build_link(raw_number: &str, message: &str) -> String {
    WaLinkBuilder::default().build(raw_number, message)
}

/// Link that lets the user pick the recipient, for sharing a caption.
#[must_use]
pub fn share_link(message: &str) -> String {
    let text = message.trim();
    if text.is_empty() {
        return format!("{WA_BASE_URL}/");
    }
    format!("{WA_BASE_URL}/?text={}", encode_uri_component(text))
}

/// Percent-encode `input` as a URI component: ASCII alphanumerics and
/// `-_.!~*'()` pass through, every other UTF-8 byte becomes `%XX`.
#[must_use]
pub fn encode_uri_component(input: &str) -> String {
    let mut out = String::with_capacity(input.len() * 3);
    for byte in input.bytes() {
        if byte.is_ascii_alphanumeric() || UNRESERVED_MARKS.contains(&byte) {
            out.push(char::from(byte));
        } else {
            out.push('%');
            out.push(char::from(HEX_UPPER[usize::from(byte >> 4)]));
            out.push(char::from(HEX_UPPER[usize::from(byte & 0x0F)]));
        }
    }
    out
}
