mod health;
mod transcript;

pub use health::{health_check, HealthResponse};
pub use transcript::{get_transcript, route_not_found};
