use crate::domain::model::TripRequest;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_range, Validate};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "tripsmith")]
#[command(about = "Generate a structured travel itinerary from trip parameters")]
pub struct CliConfig {
    #[arg(long = "from", help = "Starting location for the trip")]
    pub from_location: String,

    #[arg(long, default_value = "", help = "Specific places to cover")]
    pub places: String,

    #[arg(long, value_delimiter = ',', help = "Destination categories")]
    pub categories: Vec<String>,

    #[arg(long, default_value = "5")]
    pub days: u32,

    #[arg(long, default_value = "INR")]
    pub currency: String,

    #[arg(long, default_value = "")]
    pub budget: String,

    #[arg(
        long,
        value_delimiter = ',',
        help = "Trip intents, first one sets the trip type"
    )]
    pub intent: Vec<String>,

    #[arg(long, default_value = "")]
    pub group: String,

    #[arg(long, default_value = "")]
    pub stay: String,

    #[arg(long, default_value = "")]
    pub notes: String,

    #[arg(long, help = "Path to a TOML config file")]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn trip_request(&self) -> TripRequest {
        TripRequest {
            from_location: self.from_location.clone(),
            specific_places: self.places.clone(),
            categories: self.categories.clone(),
            days: self.days,
            currency: self.currency.clone(),
            budget: self.budget.clone(),
            intent: self.intent.clone(),
            group: self.group.clone(),
            stay: self.stay.clone(),
            notes: self.notes.clone(),
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("from", &self.from_location)?;
        validate_non_empty_string("currency", &self.currency)?;
        validate_range("days", self.days, 1, 30)?;
        Ok(())
    }
}
