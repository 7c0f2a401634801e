use crate::{Commands, ListFilter};
use anyhow::Context as _;
use catalog_core::{
    models::{MediaUpload, NewProduct, Product, ProductEdit},
    ports::{MediaStore, RemoteCatalog},
};
use catalog_store::ProductRankingStore;
use std::{io::Write, path::Path};
use time::OffsetDateTime;
use tracing::{Level, event};

/// Perform a single command against a loaded store and print the outcome.
///
/// Every command but `list` ends by printing the full ranked catalog, so the
/// effect of the operation on the ordering is visible.
pub async fn run<R: RemoteCatalog + MediaStore>(
    store: &ProductRankingStore<R>,
    command: Commands,
    now: OffsetDateTime,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match command {
        Commands::List(ListFilter { favorites, deals }) => {
            let products = if favorites {
                store.favorites()
            } else if deals {
                store.deals(now)
            } else {
                store.products()
            };
            return print_products(out, &products, now);
        }
        Commands::Add {
            name,
            description,
            category,
            price,
            stock,
            rating,
            discount,
            featured,
            deal_end,
            images,
            video,
        } => {
            let mut media = images
                .iter()
                .map(|path| read(path).map(MediaUpload::image))
                .collect::<anyhow::Result<Vec<_>>>()?;
            if let Some(path) = video {
                media.push(MediaUpload::video(read(&path)?));
            }
            let product = NewProduct {
                name,
                description,
                category,
                price,
                stock,
                rating,
                discount,
                is_featured: featured,
                deal_end_time: deal_end,
                ..Default::default()
            };
            let product_id = store.add_product(product, media, now).await?;
            writeln!(out, "created {product_id}")?;
        }
        Commands::Favorite { id } => {
            let favorite = store.toggle_favorite(&id.into()).await?;
            writeln!(out, "favorite: {favorite}")?;
        }
        Commands::Pin { id } => {
            let pinned = store.toggle_pin(&id.into()).await?;
            writeln!(out, "pinned: {pinned}")?;
        }
        Commands::Stock { id, stock } => {
            store.update_stock(&id.into(), stock).await?;
        }
        Commands::Edit {
            id,
            name,
            description,
            category,
            price,
            discount,
            deal_end,
            end_deal,
        } => {
            let edit = ProductEdit {
                name,
                description,
                category,
                price,
                discount,
                deal_end_time: if end_deal { Some(None) } else { deal_end.map(Some) },
                image_urls: None,
            };
            if edit.is_empty() {
                event!(Level::WARN, "nothing to edit");
            }
            store.edit_product(&id.into(), edit).await?;
        }
        Commands::Delete { id } => {
            store.delete_product(&id.into()).await?;
        }
        Commands::RefreshDeals => {
            let removed = store.refresh_deals(now);
            writeln!(out, "removed {} expired products", removed.len())?;
        }
    }

    print_products(out, &store.products(), now)
}

fn read(path: &Path) -> anyhow::Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))
}

fn print_products(
    out: &mut impl Write,
    products: &[Product],
    now: OffsetDateTime,
) -> anyhow::Result<()> {
    for product in products {
        let mut flags = String::new();
        for (set, flag) in [
            (product.is_pinned, 'P'),
            (product.is_featured, 'F'),
            (product.is_favorite, '*'),
        ] {
            flags.push(if set { flag } else { '-' });
        }

        write!(
            out,
            "{flags} {id}  {name}  {price:.2}",
            id = product.id,
            name = product.name,
            price = product.discounted_price(),
        )?;
        if !product.is_available {
            write!(out, "  (sold out)")?;
        }
        if let Some(left) = product.time_left(now) {
            write!(
                out,
                "  deal ends in {}h{:02}m",
                left.whole_hours(),
                left.whole_minutes() % 60
            )?;
        }
        writeln!(out)?;
    }
    Ok(())
}
