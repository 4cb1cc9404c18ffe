use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Icon template used by the weather service's image host.
pub const ICON_URL_TEMPLATE: &str = "https://openweathermap.org/img/wn/{icon}@2x.png";

/// A single position fix in decimal degrees (WGS84).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub description: String,
    pub icon: String,
}

/// Current conditions at one point, as returned by the weather service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub place: String,
    pub temperature_c: f64,
    /// Ordered as the service returned them; the first one is the primary.
    pub conditions: Vec<Condition>,
    pub wind_speed_mps: f64,
    pub observed_at: Option<DateTime<Utc>>,
}

impl WeatherReport {
    pub fn primary_condition(&self) -> Option<&Condition> {
        self.conditions.first()
    }

    /// Image URL for the primary condition's icon, if there is one.
    pub fn icon_url(&self) -> Option<String> {
        self.primary_condition()
            .filter(|c| !c.icon.is_empty())
            .map(|c| icon_url(&c.icon))
    }
}

pub fn icon_url(icon: &str) -> String {
    ICON_URL_TEMPLATE.replace("{icon}", icon)
}
