use reqwest::StatusCode;

/// Failures while obtaining a position fix.
#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Location unavailable: {0}")]
    Unavailable(String),
    #[error("Location service request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Failures while looking up the weather for a coordinate.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Weather request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// The service answered, but with an error payload instead of a report.
    #[error("Weather service returned {status}: {message}")]
    Service { status: StatusCode, message: String },
    #[error("Malformed weather response: {0}")]
    Malformed(String),
}

/// Why the last attempt ended without a fresh report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    PermissionDenied,
    LocationUnavailable,
    Network,
    Service,
    MalformedResponse,
}

impl FailureKind {
    /// The attempt got as far as the weather service.
    pub fn is_weather_failure(self) -> bool {
        matches!(
            self,
            FailureKind::Network | FailureKind::Service | FailureKind::MalformedResponse
        )
    }
}

impl From<&LocationError> for FailureKind {
    fn from(err: &LocationError) -> Self {
        match err {
            LocationError::PermissionDenied => FailureKind::PermissionDenied,
            LocationError::Unavailable(_) | LocationError::Http(_) => {
                FailureKind::LocationUnavailable
            }
        }
    }
}

impl From<&WeatherError> for FailureKind {
    fn from(err: &WeatherError) -> Self {
        match err {
            WeatherError::Network(_) => FailureKind::Network,
            WeatherError::Service { .. } => FailureKind::Service,
            WeatherError::Malformed(_) => FailureKind::MalformedResponse,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_errors_map_to_failure_kinds() {
        assert_eq!(
            FailureKind::from(&LocationError::PermissionDenied),
            FailureKind::PermissionDenied
        );
        assert_eq!(
            FailureKind::from(&LocationError::Unavailable("no fix".into())),
            FailureKind::LocationUnavailable
        );
    }

    #[test]
    fn service_error_is_distinct_from_malformed() {
        let service = WeatherError::Service {
            status: StatusCode::UNAUTHORIZED,
            message: "Invalid API key".into(),
        };
        assert_eq!(FailureKind::from(&service), FailureKind::Service);
        assert!(service.to_string().contains("401"));

        let malformed = WeatherError::Malformed("missing field `main`".into());
        assert_eq!(FailureKind::from(&malformed), FailureKind::MalformedResponse);
        assert!(FailureKind::from(&malformed).is_weather_failure());
        assert!(!FailureKind::PermissionDenied.is_weather_failure());
    }
}
