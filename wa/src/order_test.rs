use super::*;

use rand::SeedableRng;
use rand::rngs::StdRng;

fn nastar_draft() -> OrderDraft {
    OrderDraft {
        parish_name: "Paroki Rawamangun".into(),
        seller_name: "Dapur Oma Nanas".into(),
        product_name: "Nastar Nanas Butter".into(),
        product_category: "Kue Kering".into(),
        base_price: 65_000,
        product_url: "https://parokios.id/rawamangun/oma-nanas/nastar-nanas-butter".into(),
        quantity: 2,
        buyer_name: "Aga".into(),
        buyer_whatsapp: "0812 3456 7890".into(),
        order_code: "KM-482".into(),
        ..OrderDraft::default()
    }
}

// =============================================================
// Pricing and quantity
// =============================================================

#[test]
fn quantity_clamps_to_range() {
    let mut draft = nastar_draft();
    draft.quantity = 0;
    assert_eq!(draft.quantity(), 1);
    draft.quantity = 150;
    assert_eq!(draft.quantity(), 99);
}

#[test]
fn unit_price_prefers_variant() {
    let mut draft = nastar_draft();
    assert_eq!(draft.unit_price(), 65_000);
    draft.variant = Some(OrderVariant { sku: "NST-500".into(), label: "500 gr".into(), price: 120_000, stock: Some(4) });
    assert_eq!(draft.unit_price(), 120_000);
    assert_eq!(draft.total_price(), 240_000);
}

// =============================================================
// can_send
// =============================================================

#[test]
fn can_send_needs_name_and_number() {
    assert!(nastar_draft().can_send());

    let mut draft = nastar_draft();
    draft.buyer_name = " A ".into();
    assert!(!draft.can_send());

    let mut draft = nastar_draft();
    draft.buyer_whatsapp = "0812".into();
    assert!(!draft.can_send());
}

// =============================================================
// Message
// =============================================================

#[test]
fn message_lists_order_details() {
    let message = nastar_draft().message();
    let lines: Vec<&str> = message.lines().collect();
    assert_eq!(lines[0], "Halo Kak Dapur Oma Nanas \u{1f64f}");
    assert_eq!(lines[1], "");
    assert!(lines.contains(&"Saya mau pesan: Nastar Nanas Butter"));
    assert!(lines.contains(&"Paroki: Paroki Rawamangun"));
    assert!(lines.contains(&"Qty: 2"));
    assert!(lines.contains(&"Harga: Rp\u{a0}65.000 / item"));
    assert!(lines.contains(&"Total: Rp\u{a0}130.000"));
    assert!(lines.contains(&"Nama: Aga"));
    assert!(lines.contains(&"WA: 0812 3456 7890"));
    assert!(lines.contains(&"Kode order: KM-482"));
    assert_eq!(lines.last().copied(), Some(CLOSING_LINE));
}

#[test]
fn message_omits_blank_buyer_fields() {
    let mut draft = nastar_draft();
    draft.buyer_name = "   ".into();
    draft.note = String::new();
    let message = draft.message();
    assert!(!message.contains("Nama:"));
    assert!(!message.contains("Catatan:"));
    assert!(message.contains("WA: 0812 3456 7890"));
}

#[test]
fn message_trims_note() {
    let mut draft = nastar_draft();
    draft.note = "  kirim sore  ".into();
    assert!(draft.message().contains("\nCatatan: kirim sore\n"));
}

#[test]
fn message_includes_variant_when_chosen() {
    let mut draft = nastar_draft();
    assert!(!draft.message().contains("Varian:"));
    draft.variant = Some(OrderVariant { sku: "NST-250".into(), label: "250 gr".into(), price: 65_000, stock: None });
    assert!(draft.message().contains("Varian: 250 gr (NST-250)"));
}

#[test]
fn whatsapp_link_targets_seller() {
    let link = nastar_draft().whatsapp_link("0812-1111-2222");
    assert!(link.starts_with("https://wa.me/6281211112222?text=Halo%20Kak%20Dapur"));
    assert!(link.contains("%0A"));
}

#[test]
fn whatsapp_link_empty_without_seller_number() {
    assert_eq!(nastar_draft().whatsapp_link(""), "");
}

#[test]
fn variant_deserializes_without_stock() {
    let variant: OrderVariant = serde_json::from_str(r#"{"sku":"A","label":"Kecil","price":1000}"#).unwrap();
    assert_eq!(variant.stock, None);
}

// =============================================================
// Order codes
// =============================================================

#[test]
fn order_code_has_expected_shape() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let code = order_code_with(&mut rng);
        let (letters, number) = code.split_once('-').unwrap();
        assert_eq!(letters.len(), 2);
        assert!(letters.bytes().all(|b| ORDER_CODE_ALPHABET.contains(&b)));
        let number: u16 = number.parse().unwrap();
        assert!((100..1000).contains(&number));
    }
}

#[test]
fn order_code_is_seed_deterministic() {
    let a = order_code_with(&mut StdRng::seed_from_u64(42));
    let b = order_code_with(&mut StdRng::seed_from_u64(42));
    assert_eq!(a, b);
}

#[test]
fn generated_code_avoids_ambiguous_letters() {
    for _ in 0..100 {
        let code = generate_order_code();
        assert!(!code.contains('I') && !code.contains('O'), "{code}");
    }
}
