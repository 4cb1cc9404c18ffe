use tracing::{error, info, warn};

use crate::{
    error::{FailureKind, LocationError},
    location::{LocationProvider, Permission},
    provider::WeatherService,
    state::ViewState,
};

type Observer = Box<dyn FnMut(&ViewState) + Send>;

/// Owns the screen state and runs the location-then-weather flow.
pub struct WeatherController<L, W> {
    location: L,
    weather: W,
    state: ViewState,
    observer: Option<Observer>,
}

impl<L, W> std::fmt::Debug for WeatherController<L, W>
where
    L: std::fmt::Debug,
    W: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherController")
            .field("location", &self.location)
            .field("weather", &self.weather)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<L: LocationProvider, W: WeatherService> WeatherController<L, W> {
    pub fn new(location: L, weather: W) -> Self {
        Self {
            location,
            weather,
            state: ViewState::new(),
            observer: None,
        }
    }

    /// Called with the new state after every transition.
    pub fn with_observer(mut self, observer: impl FnMut(&ViewState) + Send + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Ask for permission, take a high-accuracy fix, then fetch the weather
    /// there. Failures end the attempt and are only logged; the program goes on.
    pub async fn refresh(&mut self) -> &ViewState {
        let (next, id) = self.state.begin();
        self.set(next);

        match self.location.request_permission().await {
            Ok(Permission::Granted) => {}
            Ok(Permission::Denied) => {
                warn!("Permission denied for location");
                self.set(self.state.failed(id, FailureKind::PermissionDenied));
                return &self.state;
            }
            Err(e) => {
                error!("Location permission request failed: {e}");
                self.set(self.state.failed(id, FailureKind::from(&e)));
                return &self.state;
            }
        }

        let at = match self.location.current_position().await {
            Ok(at) => at,
            Err(e) => {
                log_location_error(&e);
                self.set(self.state.failed(id, FailureKind::from(&e)));
                return &self.state;
            }
        };
        info!(%at, "Position fix acquired");
        self.set(self.state.located(id, at));

        match self.weather.current(&at).await {
            Ok(report) => {
                info!(place = %report.place, "Weather updated");
                self.set(self.state.completed(id, report));
            }
            Err(e) => {
                error!("Weather lookup failed: {e}");
                self.set(self.state.failed(id, FailureKind::from(&e)));
            }
        }

        &self.state
    }

    fn set(&mut self, next: ViewState) {
        self.state = next;
        if let Some(observer) = self.observer.as_mut() {
            observer(&self.state);
        }
    }
}

fn log_location_error(e: &LocationError) {
    match e {
        LocationError::PermissionDenied => warn!("Permission denied for location"),
        other => error!("Could not get current position: {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::WeatherError,
        model::{Condition, Coordinate, WeatherReport},
        state::Phase,
    };
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    #[derive(Debug)]
    struct Scripted {
        permission: Permission,
        fix: Option<Coordinate>,
    }

    #[async_trait]
    impl LocationProvider for Scripted {
        async fn request_permission(&self) -> Result<Permission, LocationError> {
            Ok(self.permission)
        }

        async fn current_position(&self) -> Result<Coordinate, LocationError> {
            self.fix.ok_or_else(|| LocationError::Unavailable("no fix".into()))
        }
    }

    #[derive(Debug, Default)]
    struct Recording {
        seen: Mutex<Vec<Coordinate>>,
        fail: bool,
    }

    #[async_trait]
    impl WeatherService for Arc<Recording> {
        async fn current(&self, at: &Coordinate) -> Result<WeatherReport, WeatherError> {
            self.seen.lock().unwrap().push(*at);
            if self.fail {
                return Err(WeatherError::Malformed("boom".into()));
            }
            Ok(WeatherReport {
                place: "Helsinki".into(),
                temperature_c: 5.2,
                conditions: vec![Condition { description: "clear sky".into(), icon: "01d".into() }],
                wind_speed_mps: 3.1,
                observed_at: None,
            })
        }
    }

    fn granted() -> Scripted {
        Scripted { permission: Permission::Granted, fix: Some(Coordinate::new(60.17, 24.94)) }
    }

    #[tokio::test]
    async fn granted_flow_fetches_weather_at_fix() {
        let service = Arc::new(Recording::default());
        let mut controller = WeatherController::new(granted(), service.clone());

        let state = controller.refresh().await;

        assert_eq!(state.phase(), Phase::Ready);
        assert!(!state.is_loading());
        assert_eq!(*service.seen.lock().unwrap(), vec![Coordinate::new(60.17, 24.94)]);
    }

    #[tokio::test]
    async fn denied_flow_never_reaches_weather_service() {
        let service = Arc::new(Recording::default());
        let location = Scripted { permission: Permission::Denied, fix: None };
        let mut controller = WeatherController::new(location, service.clone());

        let state = controller.refresh().await;

        assert_eq!(state.phase(), Phase::Failed(FailureKind::PermissionDenied));
        assert!(state.weather().is_none());
        assert!(service.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_fix_clears_loading() {
        let service = Arc::new(Recording::default());
        let location = Scripted { permission: Permission::Granted, fix: None };
        let mut controller = WeatherController::new(location, service);

        let state = controller.refresh().await;

        assert_eq!(state.phase(), Phase::Failed(FailureKind::LocationUnavailable));
        assert!(!state.is_loading());
        assert!(state.location().is_none());
    }

    #[tokio::test]
    async fn weather_failure_keeps_location() {
        let service = Arc::new(Recording { fail: true, ..Default::default() });
        let mut controller = WeatherController::new(granted(), service);

        let state = controller.refresh().await;

        assert_eq!(state.phase(), Phase::Failed(FailureKind::MalformedResponse));
        assert_eq!(state.location(), Some(Coordinate::new(60.17, 24.94)));
        assert!(state.weather().is_none());
    }

    #[tokio::test]
    async fn observer_sees_every_phase() {
        let phases = Arc::new(Mutex::new(Vec::new()));
        let sink = phases.clone();
        let mut controller = WeatherController::new(granted(), Arc::new(Recording::default()))
            .with_observer(move |s| sink.lock().unwrap().push(s.phase()));

        controller.refresh().await;

        assert_eq!(
            *phases.lock().unwrap(),
            vec![Phase::RequestingLocation, Phase::FetchingWeather, Phase::Ready]
        );
    }
}
