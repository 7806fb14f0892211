use clap::Parser;
use estate_scout::filter::FilterCriteria;
use estate_scout::models::format::{format_area, format_price};
use estate_scout::models::{Category, DUBAI_AREAS};
use estate_scout::{AppConfig, AppContext};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Browse luxury Dubai listings from the terminal
#[derive(Debug, Parser)]
#[command(name = "estate-scout", version)]
struct Cli {
    /// Free-text search over title, location, type and description
    #[arg(short, long, default_value = "")]
    query: String,

    /// Property type; repeat to allow several
    #[arg(long = "type", value_name = "TYPE")]
    categories: Vec<Category>,

    #[arg(long, value_name = "AED")]
    min_price: Option<String>,

    #[arg(long, value_name = "AED")]
    max_price: Option<String>,

    /// Studio, 1-4 or 5+
    #[arg(long)]
    bedrooms: Option<String>,

    /// 1-4 or 5+
    #[arg(long)]
    bathrooms: Option<String>,

    /// Region, matched against the listing location
    #[arg(long)]
    area: Option<String>,

    #[arg(long, value_name = "SQFT")]
    min_size: Option<String>,

    #[arg(long, value_name = "SQFT")]
    max_size: Option<String>,

    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the matching listings here as JSON
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl Cli {
    fn criteria(&self) -> FilterCriteria {
        let mut criteria = FilterCriteria::new();
        for category in &self.categories {
            criteria.categories.insert(*category);
        }
        if let Some(input) = &self.min_price {
            criteria.set_min_price(input);
        }
        if let Some(input) = &self.max_price {
            criteria.set_max_price(input);
        }
        if let Some(option) = &self.bedrooms {
            criteria.select_bedrooms(option);
        }
        if let Some(option) = &self.bathrooms {
            criteria.select_bathrooms(option);
        }
        if let Some(area) = &self.area {
            criteria.select_area(area);
        }
        if let Some(input) = &self.min_size {
            criteria.set_min_size(input);
        }
        if let Some(input) = &self.max_size {
            criteria.set_max_size(input);
        }
        criteria
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::resolve(cli.config.as_deref())?;

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("🏠 Estate Scout - Dubai Listings");
    info!("================================");

    if let Some(area) = &cli.area {
        if !DUBAI_AREAS.contains(&area.as_str()) {
            warn!("{} is not one of the listed regions", area);
        }
    }

    let mut app = AppContext::from_config(config)?.bootstrap().await?;

    app.view.set_query(cli.query.as_str());
    app.view.set_criteria(cli.criteria());
    app.view.apply_filters();

    let listings = app.view.visible();
    info!("✅ {} of {} properties match\n", listings.len(), app.view.store().len());

    for (i, listing) in listings.iter().enumerate() {
        let badge = if listing.featured { " ★ Featured" } else { "" };
        println!("{}. {}{}", i + 1, listing.title, badge);
        println!("   {} · {}", format_price(listing.price), listing.category);
        let bedrooms = if listing.is_studio() {
            "Studio".to_string()
        } else {
            format!("{} bd", listing.bedrooms)
        };
        println!(
            "   {}, {} ba, {}",
            bedrooms,
            listing.bathrooms,
            format_area(listing.size)
        );
        println!("   Location: {}", listing.location);
        println!("   Amenities: {}", listing.amenities.join(", "));
        if let Some(cover) = listing.cover_image() {
            println!("   Cover: {}", cover);
        }
        println!();
    }

    if let Some(path) = &cli.output {
        let json = serde_json::to_string_pretty(listings)?;
        tokio::fs::write(path, json).await?;
        info!("💾 Saved {} listings to {}", listings.len(), path.display());
    }

    app.shutdown();
    Ok(())
}
