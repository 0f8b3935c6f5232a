//! Demo dataset.

use crate::{Area, Parish, Product, Seller};

pub static PARISHES: &[Parish] = &[
    Parish { slug: "rawamangun", name: "Paroki Rawamangun", area: Area::JakartaTimur },
    Parish { slug: "kelapa-gading", name: "Paroki Kelapa Gading", area: Area::JakartaUtara },
    Parish { slug: "pluit", name: "Paroki Pluit", area: Area::JakartaUtara },
    Parish { slug: "kebon-jeruk", name: "Paroki Kebon Jeruk", area: Area::JakartaBarat },
];

pub static SELLERS: &[Seller] = &[
    Seller {
        slug: "oma-nanas",
        parish_slug: "rawamangun",
        name: "Dapur Oma Nanas",
        tagline: "Nastar buttery, trauma hilang.",
        whatsapp: None,
    },
    Seller {
        slug: "toples-kriuk",
        parish_slug: "kelapa-gading",
        name: "Kue Kering Mix Toples",
        tagline: "Kriuk-kriuknya sopan, rasanya brutal.",
        whatsapp: None,
    },
    Seller {
        slug: "bang-jali-sambal",
        parish_slug: "pluit",
        name: "Sambal Bang Jali",
        tagline: "Pedasnya ngajak tobat, tapi nagihnya bikin balik lagi.",
        whatsapp: None,
    },
    Seller {
        slug: "snack-box-hemat",
        parish_slug: "kebon-jeruk",
        name: "Snack Box Hemat",
        tagline: "Rapat jadi damai.",
        whatsapp: None,
    },
];

pub static PRODUCTS: &[Product] = &[
    Product {
        slug: "nastar-nanas-butter",
        parish_slug: "rawamangun",
        seller_slug: "oma-nanas",
        name: "Nastar Nanas Butter",
        desc: "Lumer, wangi butter, nanasnya lembut. Cocok buat tamu dadakan.",
        category: "Kue Kering",
        price: 65_000,
        sold_count: 124,
        is_trending: true,
        is_new: false,
        emoji: Some("\u{1f34d}"),
    },
    Product {
        slug: "kue-kering-mix-toples",
        parish_slug: "kelapa-gading",
        seller_slug: "toples-kriuk",
        name: "Kue Kering Mix Toples",
        desc: "Campur 3 rasa: keju, coklat, kacang. Kriuknya bikin pengen nambah.",
        category: "Kue Kering",
        price: 65_000,
        sold_count: 98,
        is_trending: false,
        is_new: false,
        emoji: Some("\u{1f36a}"),
    },
    Product {
        slug: "sambal-bawang-pedas",
        parish_slug: "pluit",
        seller_slug: "bang-jali-sambal",
        name: "Sambal Bawang Pedas",
        desc: "Pedasnya ngajak tobat, tapi enaknya bikin balik lagi.",
        category: "Sambal",
        price: 20_000,
        sold_count: 143,
        is_trending: true,
        is_new: false,
        emoji: Some("\u{1f336}\u{fe0f}"),
    },
    // Listed under rawamangun while its seller belongs to kebon-jeruk, so it
    // has no resolvable seller.
    Product {
        slug: "snack-box-hemat",
        parish_slug: "rawamangun",
        seller_slug: "snack-box-hemat",
        name: "Snack Box Hemat",
        desc: "Cocok buat kantor, arisan, atau \u{2018}ngemil sambil kerja\u{2019}.",
        category: "Snack Box",
        price: 25_000,
        sold_count: 67,
        is_trending: false,
        is_new: true,
        emoji: Some("\u{1f96a}"),
    },
];
