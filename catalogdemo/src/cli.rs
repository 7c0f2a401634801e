//! Command-line interface definition and parsing.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

/// Command-line arguments for the catalog client.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file.
    #[arg(short, long, env = "APP_CONFIG")]
    pub config: Option<PathBuf>,

    /// The operation to perform.
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn import() -> Result<Self, clap::Error> {
        Self::try_parse()
    }
}

/// The operations exposed by the client, one per store operation.
#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Print the ranked catalog.
    List(ListFilter),
    /// Upload media and create a new product.
    Add {
        /// Display name
        #[arg(long)]
        name: String,
        /// Free-form description
        #[arg(long, default_value = "")]
        description: String,
        /// Category label
        #[arg(long, default_value = "")]
        category: String,
        /// Unit price
        #[arg(long)]
        price: f64,
        /// Units in stock
        #[arg(long, default_value_t = 0)]
        stock: u32,
        /// Average rating, between 0 and 5
        #[arg(long, default_value_t = 0.0)]
        rating: f64,
        /// Discount percentage, between 0 and 100
        #[arg(long, default_value_t = 0.0)]
        discount: f64,
        /// Mark the product as featured
        #[arg(long)]
        featured: bool,
        /// End of the deal, as an RFC3339 timestamp
        #[arg(long, value_parser = parse_timestamp)]
        deal_end: Option<OffsetDateTime>,
        /// JPEG images to upload, in display order
        #[arg(long = "image")]
        images: Vec<PathBuf>,
        /// MP4 video to upload
        #[arg(long)]
        video: Option<PathBuf>,
    },
    /// Flip the favorite flag of a product.
    Favorite {
        /// Product id
        id: String,
    },
    /// Flip the pin flag of a product.
    Pin {
        /// Product id
        id: String,
    },
    /// Set the stock of a product.
    Stock {
        /// Product id
        id: String,
        /// New stock count
        stock: u32,
    },
    /// Edit the descriptive fields of a product.
    Edit {
        /// Product id
        id: String,
        /// New display name
        #[arg(long)]
        name: Option<String>,
        /// New description
        #[arg(long)]
        description: Option<String>,
        /// New category
        #[arg(long)]
        category: Option<String>,
        /// New unit price
        #[arg(long)]
        price: Option<f64>,
        /// New discount percentage
        #[arg(long)]
        discount: Option<f64>,
        /// New end of the deal, as an RFC3339 timestamp
        #[arg(long, value_parser = parse_timestamp, conflicts_with = "end_deal")]
        deal_end: Option<OffsetDateTime>,
        /// Remove the deal
        #[arg(long)]
        end_deal: bool,
    },
    /// Delete a product.
    Delete {
        /// Product id
        id: String,
    },
    /// Drop every product whose deal has ended from the listing.
    RefreshDeals,
}

/// Which products `list` prints
#[derive(Args, Debug, Default, PartialEq)]
#[group(multiple = false)]
pub struct ListFilter {
    /// Only favorites
    #[arg(long)]
    pub favorites: bool,
    /// Only products with a running deal
    #[arg(long)]
    pub deals: bool,
}

fn parse_timestamp(value: &str) -> Result<OffsetDateTime, time::error::Parse> {
    OffsetDateTime::parse(value, &Rfc3339)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn parse(args: &[&str]) -> Result<Commands, clap::Error> {
        Cli::try_parse_from(std::iter::once("catalogdemo").chain(args.iter().copied()))
            .map(|cli| cli.command)
    }

    #[test]
    fn test_stock() {
        assert_eq!(
            parse(&["stock", "abc", "0"]).unwrap(),
            Commands::Stock {
                id: "abc".into(),
                stock: 0
            }
        );
        assert!(parse(&["stock", "abc", "-1"]).is_err());
    }

    #[test]
    fn test_list_filters_are_exclusive() {
        assert_eq!(
            parse(&["list", "--deals"]).unwrap(),
            Commands::List(ListFilter {
                favorites: false,
                deals: true
            })
        );
        assert!(parse(&["list", "--deals", "--favorites"]).is_err());
    }

    #[test]
    fn test_edit_deal() {
        let Commands::Edit { deal_end, .. } =
            parse(&["edit", "abc", "--deal-end", "2025-04-01T00:00:00Z"]).unwrap()
        else {
            panic!("expected edit");
        };
        assert_eq!(deal_end, Some(datetime!(2025-04-01 00:00 UTC)));

        assert!(parse(&["edit", "abc", "--deal-end", "tomorrow"]).is_err());
        assert!(parse(&["edit", "abc", "--deal-end", "2025-04-01T00:00:00Z", "--end-deal"]).is_err());
    }
}
