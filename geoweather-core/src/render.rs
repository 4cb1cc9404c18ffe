use serde::Serialize;
use std::fmt;

use crate::state::ViewState;

pub const TITLE: &str = "Sään hakusovellus";
pub const ACTION: &str = "Hae paikka ja sää";
const PLACEHOLDER: &str = "-";

/// What the screen shows for one state. Built by [`render`].
///
/// Failed attempts have no visible surface of their own; they are only
/// logged by the controller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct View {
    pub title: &'static str,
    pub action: &'static str,
    pub spinner: bool,
    pub report: Option<ReportView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportView {
    pub place: String,
    pub temperature: String,
    pub description: String,
    pub wind: String,
    pub icon_url: Option<String>,
    pub observed_at: Option<String>,
    pub stale: bool,
}

pub fn render(state: &ViewState) -> View {
    let report = state.visible_weather().map(|w| ReportView {
        place: w.place.clone(),
        temperature: format!("{} °C", w.temperature_c),
        description: w
            .primary_condition()
            .map(|c| c.description.clone())
            .unwrap_or_else(|| PLACEHOLDER.to_string()),
        wind: format!("{} m/s", w.wind_speed_mps),
        icon_url: w.icon_url(),
        observed_at: w.observed_at.map(|t| t.format("%H:%M UTC").to_string()),
        stale: state.is_stale(),
    });

    View {
        title: TITLE,
        action: ACTION,
        spinner: state.is_loading(),
        report,
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "[ {} ]", self.action)?;

        if self.spinner {
            writeln!(f, "Ladataan...")?;
        }
        if let Some(r) = &self.report {
            writeln!(f)?;
            if r.stale {
                writeln!(f, "(vanhentunut tieto)")?;
            }
            writeln!(f, "Paikka: {}", r.place)?;
            writeln!(f, "Lämpötila: {}", r.temperature)?;
            writeln!(f, "Kuvaus: {}", r.description)?;
            writeln!(f, "Tuulennopeus: {}", r.wind)?;
            if let Some(url) = &r.icon_url {
                writeln!(f, "Kuvake: {url}")?;
            }
            if let Some(at) = &r.observed_at {
                writeln!(f, "Havaittu: {at}")?;
            }
        }
        Ok(())
    }
}
