//! Screen state as an immutable record.
//!
//! Each transition returns a new [`ViewState`]. Transitions tagged with a
//! [`RequestId`] other than the current one are ignored, so a completion that
//! belongs to a superseded request can never overwrite newer data.

use crate::{
    error::FailureKind,
    model::{Coordinate, WeatherReport},
};

/// Identifies one user-initiated request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct RequestId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    RequestingLocation,
    FetchingWeather,
    Ready,
    Failed(FailureKind),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewState {
    phase: Phase,
    location: Option<Coordinate>,
    weather: Option<WeatherReport>,
    request: RequestId,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn location(&self) -> Option<Coordinate> {
        self.location
    }

    /// Last stored report, regardless of whether it may be shown.
    pub fn weather(&self) -> Option<&WeatherReport> {
        self.weather.as_ref()
    }

    pub fn request(&self) -> RequestId {
        self.request
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::RequestingLocation | Phase::FetchingWeather)
    }

    /// The report, if it may be displayed: never while a request is in flight.
    pub fn visible_weather(&self) -> Option<&WeatherReport> {
        if self.is_loading() { None } else { self.weather.as_ref() }
    }

    /// True when the last weather lookup failed and the visible report is
    /// the one from before it. Attempts that never reached the weather
    /// service leave the report as current as it was.
    pub fn is_stale(&self) -> bool {
        matches!(self.phase, Phase::Failed(kind) if kind.is_weather_failure())
            && self.weather.is_some()
    }

    pub fn failure(&self) -> Option<FailureKind> {
        match self.phase {
            Phase::Failed(kind) => Some(kind),
            _ => None,
        }
    }

    /// Start a new request, superseding any in flight.
    pub fn begin(&self) -> (ViewState, RequestId) {
        let request = RequestId(self.request.0 + 1);
        let next = ViewState {
            phase: Phase::RequestingLocation,
            request,
            ..self.clone()
        };
        (next, request)
    }

    /// A position fix arrived; the weather lookup starts.
    pub fn located(&self, id: RequestId, at: Coordinate) -> ViewState {
        if !self.accepts(id, Phase::RequestingLocation) {
            return self.clone();
        }
        ViewState {
            phase: Phase::FetchingWeather,
            location: Some(at),
            ..self.clone()
        }
    }

    pub fn completed(&self, id: RequestId, report: WeatherReport) -> ViewState {
        if !self.accepts(id, Phase::FetchingWeather) {
            return self.clone();
        }
        ViewState {
            phase: Phase::Ready,
            weather: Some(report),
            ..self.clone()
        }
    }

    /// End the request without a new report. Location and weather are kept.
    pub fn failed(&self, id: RequestId, kind: FailureKind) -> ViewState {
        if id != self.request || !self.is_loading() {
            return self.clone();
        }
        ViewState {
            phase: Phase::Failed(kind),
            ..self.clone()
        }
    }

    fn accepts(&self, id: RequestId, expected: Phase) -> bool {
        id == self.request && self.phase == expected
    }
}
