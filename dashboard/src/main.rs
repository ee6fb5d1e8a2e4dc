//! Voyage Analytics Dashboard
//!
//! CLI companion to the prediction API: content-based hotel recommendations
//! from a local CSV catalog, flight price and gender predictions via HTTP.

mod client;
mod error;
mod hotels;

use clap::{Parser, Subcommand};
use comfy_table::Table;

use client::{ApiClient, FlightQuote};
use hotels::{HotelCatalog, HotelProfile};

#[derive(Parser)]
#[command(name = "voyage-dashboard", version, about = "Voyage Analytics travel dashboard")]
struct Cli {
    /// Base URL of the prediction API
    #[arg(
        long,
        global = true,
        default_value = "http://127.0.0.1:5000",
        env = "VOYAGE_API_URL"
    )]
    api_url: String,

    /// Hotel catalog CSV
    #[arg(
        long,
        global = true,
        default_value = "data/hotels.csv",
        env = "VOYAGE_HOTELS_CSV"
    )]
    hotels_csv: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Recommend hotels close to a per-day budget
    Recommend {
        /// City to search in
        #[arg(long)]
        city: String,

        /// Preferred price per day; defaults to the catalog median
        #[arg(long)]
        budget: Option<f64>,

        /// How many hotels to return
        #[arg(long, default_value_t = 5)]
        limit: usize,
    },

    /// List the cities the catalog covers
    Cities,

    /// Predict a flight price
    Flight {
        #[arg(long = "from", default_value = "Florianopolis (SC)")]
        from_city: String,

        #[arg(long = "to", default_value = "Rio de Janeiro (RJ)")]
        to_city: String,

        #[arg(long, default_value = "economic")]
        flight_type: String,

        #[arg(long, default_value = "CloudFy")]
        agency: String,

        /// Distance in km
        #[arg(long, default_value_t = 430.0)]
        distance: f64,

        /// Flight time in hours
        #[arg(long, default_value_t = 1.2)]
        time: f64,

        /// Day of month
        #[arg(long, default_value_t = 15)]
        day: u8,

        /// Day of week, 0 = Monday
        #[arg(long, default_value_t = 0)]
        day_of_week: u8,
    },

    /// Classify gender from age and company
    Gender {
        #[arg(long)]
        age: u32,

        #[arg(long)]
        company: String,
    },

    /// Show API liveness and model status
    Status,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Command::Recommend {
            city,
            budget,
            limit,
        } => {
            let catalog = HotelCatalog::from_csv_file(&cli.hotels_csv)?;
            let budget = budget.unwrap_or_else(|| catalog.price_stats().median);
            let profiles = catalog.recommend(&city, budget, limit);

            if profiles.is_empty() {
                println!("No hotels found in {}", city);
                return Ok(());
            }

            println!(
                "Top {} hotel recommendations in {} around {:.2} per day",
                profiles.len(),
                city,
                budget
            );
            println!("{}", recommendation_table(&profiles));
        }

        Command::Cities => {
            let catalog = HotelCatalog::from_csv_file(&cli.hotels_csv)?;
            for city in catalog.cities() {
                println!("{}", city);
            }
        }

        Command::Flight {
            from_city,
            to_city,
            flight_type,
            agency,
            distance,
            time,
            day,
            day_of_week,
        } => {
            let client = ApiClient::new(cli.api_url);
            let quote = FlightQuote {
                from_city,
                to_city,
                flight_type,
                agency,
                distance,
                time,
                day,
                day_of_week,
            };

            let price = client.predict_flight(&quote)?;
            println!("Predicted flight price: {:.2}", price);
        }

        Command::Gender { age, company } => {
            let client = ApiClient::new(cli.api_url);
            let gender = client.predict_gender(age, &company)?;
            println!("Predicted gender: {}", capitalize(&gender));
        }

        Command::Status => {
            let client = ApiClient::new(cli.api_url);
            println!("{}", client.liveness()?);

            for model in client.model_status()? {
                println!(
                    "{} [{}]: loaded={} features={} inferences={} avg_latency={:.2}ms",
                    model.name,
                    model.engine,
                    model.loaded,
                    model.feature_count,
                    model.inference_count,
                    model.avg_latency_ms
                );
                if let Some(artifact) = &model.artifact {
                    println!("  artifact: {}", artifact);
                }
            }
        }
    }

    Ok(())
}

fn recommendation_table(profiles: &[HotelProfile]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Hotel", "City", "Days", "Price", "Total"]);

    for profile in profiles {
        table.add_row(vec![
            profile.name.clone(),
            profile.place.clone(),
            format!("{:.2}", profile.days),
            format!("{:.2}", profile.price),
            format!("{:.2}", profile.total),
        ]);
    }

    table
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
