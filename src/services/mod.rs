pub mod generator;
pub mod lookup;
pub mod providers;
pub mod recommendations;

pub use generator::RecommendationGenerator;
pub use lookup::MetadataLookup;
pub use recommendations::{FavoriteOutcome, RecommendationRequest, RecommendationService};
