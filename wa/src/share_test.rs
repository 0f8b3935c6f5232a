use super::*;

#[test]
fn seller_greeting_mentions_seller_and_parish() {
    assert_eq!(
        seller_greeting("Sambal Bang Jali", "Paroki Pluit"),
        "Halo Sambal Bang Jali! Saya lihat produk di Parokios (Paroki Pluit). Bisa info stok & cara order?"
    );
}

#[test]
fn share_text_defaults_to_three_lines() {
    let text = share_text("Nastar", "Rp\u{a0}65.000", "https://parokios.id/a", None);
    assert_eq!(text, "\u{1f357} Nastar\nRp\u{a0}65.000\nhttps://parokios.id/a");
}

#[test]
fn share_text_prefers_custom_text() {
    assert_eq!(share_text("t", "p", "u", Some("  Promo!  ")), "Promo!");
    assert_eq!(share_text("t", "p", "u", Some("   ")), "\u{1f357} t\np\nu");
}

#[test]
fn apply_template_replaces_every_placeholder() {
    assert_eq!(apply_template(" Cek {{url}} ya, {{url}} \n", "https://x.id"), "Cek https://x.id ya, https://x.id");
}

#[test]
fn absolute_url_joins_paths() {
    assert_eq!(absolute_url("https://parokios.id", "/pluit"), "https://parokios.id/pluit");
    assert_eq!(absolute_url("https://parokios.id/", "pluit"), "https://parokios.id/pluit");
}

#[test]
fn absolute_url_keeps_absolute_and_originless_paths() {
    assert_eq!(absolute_url("https://parokios.id", "http://other.id/x"), "http://other.id/x");
    assert_eq!(absolute_url("", "/pluit"), "/pluit");
}

#[test]
fn cache_stamp_is_base36() {
    assert_eq!(cache_stamp(0), "0");
    assert_eq!(cache_stamp(35), "z");
    assert_eq!(cache_stamp(36), "10");
    assert_eq!(cache_stamp(1_700_000_000_000), "loyw3v28");
}

#[test]
fn cache_buster_appends_param() {
    assert_eq!(with_cache_buster("https://x.id/a", "abc"), "https://x.id/a?v=abc");
    assert_eq!(with_cache_buster("https://x.id/a?ref=wa", "abc"), "https://x.id/a?ref=wa&v=abc");
}

#[test]
fn cache_buster_replaces_existing_param_and_keeps_fragment() {
    assert_eq!(with_cache_buster("https://x.id/a?v=old&ref=wa#top", "new"), "https://x.id/a?ref=wa&v=new#top");
}
