mod config;


use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use catalog::{Area, CatalogItem};
use clap::{Args, Parser, Subcommand};
use shelf::{FileStorage, KeyError, PersonalStore, ProductKey, StoreOptions};
use tracing_subscriber::EnvFilter;
use wa::{OrderDraft, WaLinkBuilder};

use crate::config::{ConfigError, ShelfConfig};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("invalid product key: {0}")]
    InvalidKey(#[from] KeyError),
    #[error("unknown product: {0}")]
    UnknownProduct(ProductKey),
    #[error("unknown area: {0}")]
    UnknownArea(String),
    #[error("unknown seller: {parish}/{seller}")]
    UnknownSeller { parish: String, seller: String },
    #[error("no usable WhatsApp number; pass --to with the seller's number")]
    NoDestination,
    #[error("buyer details incomplete: name needs 2+ characters and WhatsApp 8+")]
    IncompleteBuyer,
    #[error("invalid JSON output: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "parokios", about = "Parish storefront shelf and WhatsApp hand-off")]
struct Cli {
    /// Shelf file.
    #[arg(long, global = true, env = "PAROKIOS_STORE_PATH")]
    store: Option<PathBuf>,

    /// Recents bound.
    #[arg(long, global = true, env = "PAROKIOS_RECENTS_LIMIT")]
    recents_limit: Option<usize>,

    /// Country code for local numbers.
    #[arg(long, global = true, env = "PAROKIOS_COUNTRY_CODE")]
    country_code: Option<String>,

    /// Site origin for product links.
    #[arg(long, global = true, env = "PAROKIOS_ORIGIN")]
    origin: Option<String>,

    /// Print JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List catalog products.
    Catalog {
        #[arg(long)]
        area: Option<String>,
    },
    /// Show a product and record it as recently viewed.
    View { key: String },
    Fav(FavCommand),
    Recent(RecentCommand),
    Wa(WaCommand),
    /// Compose an order message and chat link for a product.
    Order(OrderArgs),
    /// Chat link for contacting a seller from their page.
    Greet {
        parish: String,
        seller: String,
        #[arg(long)]
        to: Option<String>,
    },
}

#[derive(Args, Debug)]
struct FavCommand {
    #[command(subcommand)]
    command: FavSubcommand,
}

#[derive(Subcommand, Debug)]
enum FavSubcommand {
    List,
    Toggle { key: String },
    Clear,
}

#[derive(Args, Debug)]
struct RecentCommand {
    #[command(subcommand)]
    command: RecentSubcommand,
}

#[derive(Subcommand, Debug)]
enum RecentSubcommand {
    List,
    Add {
        key: String,
        #[arg(long)]
        limit: Option<usize>,
    },
    Clear,
}

#[derive(Args, Debug)]
struct WaCommand {
    #[command(subcommand)]
    command: WaSubcommand,
}

#[derive(Subcommand, Debug)]
enum WaSubcommand {
    Normalize { raw: String },
    Link {
        number: String,
        #[arg(trailing_var_arg = true)]
        message: Vec<String>,
    },
}

#[derive(Args, Debug)]
struct OrderArgs {
    key: String,
    #[arg(long)]
    name: String,
    #[arg(long)]
    wa: String,
    #[arg(long, default_value_t = 1)]
    qty: u32,
    #[arg(long, default_value = "")]
    note: String,
    /// Seller WhatsApp number when the catalog has none.
    #[arg(long)]
    to: Option<String>,
}

struct CliContext {
    config: ShelfConfig,
    store: PersonalStore,
    links: WaLinkBuilder,
    json: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config =
        ShelfConfig::resolve(cli.store, cli.recents_limit, cli.country_code.as_deref(), cli.origin.as_deref())?;
    tracing::debug!(path = %config.store_path.display(), limit = config.recents_limit, "shelf config loaded");

    let options = StoreOptions { recents_limit: config.recents_limit, ..StoreOptions::default() };
    let store = PersonalStore::with_options(Arc::new(FileStorage::new(config.store_path.clone())), options);
    store.subscribe(|event| tracing::debug!(?event, "personal shelf changed")).detach();

    let ctx = CliContext { links: WaLinkBuilder::new(config.number_plan.clone()), config, store, json: cli.json };

    match cli.command {
        Command::Catalog { area } => run_catalog(&ctx, area.as_deref()),
        Command::View { key } => run_view(&ctx, &key),
        Command::Fav(fav) => run_fav(&ctx, fav),
        Command::Recent(recent) => run_recent(&ctx, recent),
        Command::Wa(wa) => run_wa(&ctx, wa),
        Command::Order(args) => run_order(&ctx, args),
        Command::Greet { parish, seller, to } => run_greet(&ctx, &parish, &seller, to.as_deref()),
    }
}

fn run_catalog(ctx: &CliContext, area: Option<&str>) -> Result<(), CliError> {
    let items: Vec<CatalogItem> = match area {
        Some(name) => {
            let area = parse_area(name)?;
            let keys: Vec<ProductKey> = catalog::products_by_area(area).filter_map(catalog::product_key).collect();
            catalog::resolve_all(&keys)
        }
        None => {
            let keys: Vec<ProductKey> = catalog::PRODUCTS.iter().filter_map(catalog::product_key).collect();
            catalog::resolve_all(&keys)
        }
    };
    print_items(ctx, &items)
}

fn run_view(ctx: &CliContext, raw: &str) -> Result<(), CliError> {
    let key = ProductKey::parse(raw)?;
    let item = catalog::resolve(&key).ok_or_else(|| CliError::UnknownProduct(key.clone()))?;
    ctx.store.add_recent(&key);

    let url = wa::absolute_url(&ctx.config.origin, &item.product.path());
    let caption = wa::share_text(item.product.name, &wa::format_rupiah(item.product.price), &url, None);
    if ctx.json {
        return print_json(&serde_json::json!({
            "item": item,
            "favorite": ctx.store.is_favorite(&key),
            "share_text": caption,
            "share_link": wa::share_link(&caption),
        }));
    }
    println!("{}", describe(&item));
    println!("  {}", item.product.desc);
    println!("  favorite: {}", ctx.store.is_favorite(&key));
    println!("  share: {}", wa::share_link(&caption));
    Ok(())
}

fn run_fav(ctx: &CliContext, fav: FavCommand) -> Result<(), CliError> {
    match fav.command {
        FavSubcommand::List => print_keys(ctx, &ctx.store.favorites()),
        FavSubcommand::Toggle { key } => {
            let key = ProductKey::parse(&key)?;
            warn_if_unknown(&key);
            let now = ctx.store.toggle_favorite(&key);
            println!("{key}: {}", if now { "favorited" } else { "unfavorited" });
            Ok(())
        }
        FavSubcommand::Clear => {
            ctx.store.clear_favorites();
            println!("favorites cleared");
            Ok(())
        }
    }
}

fn run_recent(ctx: &CliContext, recent: RecentCommand) -> Result<(), CliError> {
    match recent.command {
        RecentSubcommand::List => print_keys(ctx, &ctx.store.recents()),
        RecentSubcommand::Add { key, limit } => {
            let key = ProductKey::parse(&key)?;
            warn_if_unknown(&key);
            match limit {
                Some(limit) => ctx.store.add_recent_with_limit(&key, limit),
                None => ctx.store.add_recent(&key),
            }
            println!("{key}: recorded");
            Ok(())
        }
        RecentSubcommand::Clear => {
            ctx.store.clear_recents();
            println!("recents cleared");
            Ok(())
        }
    }
}

fn run_wa(ctx: &CliContext, wa: WaCommand) -> Result<(), CliError> {
    match wa.command {
        WaSubcommand::Normalize { raw } => {
            let number = ctx.links.plan().normalize(&raw);
            if number.is_empty() {
                return Err(CliError::NoDestination);
            }
            println!("{number}");
        }
        WaSubcommand::Link { number, message } => {
            let link = ctx.links.build(&number, &message.join(" "));
            if link.is_empty() {
                return Err(CliError::NoDestination);
            }
            println!("{link}");
        }
    }
    Ok(())
}

fn run_order(ctx: &CliContext, args: OrderArgs) -> Result<(), CliError> {
    let key = ProductKey::parse(&args.key)?;
    let item = catalog::resolve(&key).ok_or_else(|| CliError::UnknownProduct(key.clone()))?;

    let draft = OrderDraft {
        parish_name: item.parish.name.to_string(),
        seller_name: item.seller.name.to_string(),
        product_name: item.product.name.to_string(),
        product_category: item.product.category.to_string(),
        base_price: item.product.price,
        product_url: wa::absolute_url(&ctx.config.origin, &item.product.path()),
        variant: None,
        quantity: args.qty,
        buyer_name: args.name,
        buyer_whatsapp: args.wa,
        note: args.note,
        order_code: wa::generate_order_code(),
    };
    if !draft.can_send() {
        return Err(CliError::IncompleteBuyer);
    }

    let seller_number = args.to.as_deref().or(item.seller.whatsapp).unwrap_or_default();
    let message = draft.message();
    let link = ctx.links.build(seller_number, &message);
    if link.is_empty() {
        return Err(CliError::NoDestination);
    }

    if ctx.json {
        return print_json(&serde_json::json!({
            "order_code": draft.order_code,
            "total": draft.total_price(),
            "message": message,
            "link": link,
        }));
    }
    println!("{message}\n");
    println!("{link}");
    Ok(())
}

fn run_greet(ctx: &CliContext, parish: &str, seller: &str, to: Option<&str>) -> Result<(), CliError> {
    let unknown = || CliError::UnknownSeller { parish: parish.to_string(), seller: seller.to_string() };
    let parish = catalog::parish_by_slug(parish).ok_or_else(unknown)?;
    let seller = catalog::seller(parish.slug, seller).ok_or_else(unknown)?;

    let number = to.or(seller.whatsapp).unwrap_or_default();
    let link = ctx.links.build(number, &wa::seller_greeting(seller.name, parish.name));
    if link.is_empty() {
        return Err(CliError::NoDestination);
    }
    println!("{link}");
    Ok(())
}

fn parse_area(name: &str) -> Result<Area, CliError> {
    let wanted = name.trim().replace(['-', '_'], " ");
    catalog::areas()
        .iter()
        .copied()
        .find(|area| area.name().eq_ignore_ascii_case(&wanted))
        .ok_or_else(|| CliError::UnknownArea(name.to_string()))
}

fn warn_if_unknown(key: &ProductKey) {
    if catalog::resolve(key).is_none() {
        tracing::warn!(%key, "product is not in the catalog; it will be hidden from lists");
    }
}

fn print_keys(ctx: &CliContext, keys: &[ProductKey]) -> Result<(), CliError> {
    let items = catalog::resolve_all(keys);
    if items.len() < keys.len() {
        tracing::debug!(stored = keys.len(), shown = items.len(), "skipped keys missing from catalog");
    }
    print_items(ctx, &items)
}

fn print_items(ctx: &CliContext, items: &[CatalogItem]) -> Result<(), CliError> {
    if ctx.json {
        return print_json(&serde_json::to_value(items)?);
    }
    if items.is_empty() {
        println!("(empty)");
    }
    for item in items {
        println!("{}", describe(item));
    }
    Ok(())
}

fn describe(item: &CatalogItem) -> String {
    let emoji = item.product.emoji.unwrap_or("-");
    let mut badges = String::new();
    if item.product.is_trending {
        badges.push_str(" [trending]");
    }
    if item.product.is_new {
        badges.push_str(" [new]");
    }
    format!(
        "{emoji} {} ({}) {} | {} | {} sold{badges}",
        item.product.name,
        item.key,
        wa::format_rupiah(item.product.price),
        item.seller.name,
        item.product.sold_count,
    )
}

fn print_json(value: &serde_json::Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
