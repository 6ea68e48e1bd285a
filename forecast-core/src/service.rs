//! The request pipeline: validate, fetch upstream, select days, assemble.

use chrono::{Local, NaiveDateTime, TimeDelta, Timelike};
use serde_json::Value;
use std::{fmt::Debug, sync::Arc};

use crate::{
    error::Rejection,
    model::{Coordinates, Event, ForecastResponse},
    provider::ForecastProvider,
    transform::select_forecast,
    validator::validate,
};

/// Source of the current local time.
pub trait Clock: Send + Sync + Debug {
    fn now(&self) -> NaiveDateTime;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

#[derive(Debug, Clone)]
pub struct ForecastService {
    provider: Arc<dyn ForecastProvider>,
    api_token: String,
    clock: Arc<dyn Clock>,
}

impl ForecastService {
    pub fn new(provider: Arc<dyn ForecastProvider>, api_token: impl Into<String>) -> Self {
        Self {
            provider,
            api_token: api_token.into(),
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Serve one forecast request from its raw JSON payload.
    pub async fn handle(&self, payload: &Value) -> Result<ForecastResponse, Rejection> {
        let started = self.clock.now();

        let request = validate(payload, &self.api_token)?;

        let upstream = self.provider.get_forecast(&request.location).await.inspect_err(|e| {
            tracing::error!(location = %request.location, error = %e, "upstream forecast failed");
        })?;

        let forecast = select_forecast(&upstream, request.date.as_deref(), started.date())?;

        let finished = self.clock.now();

        Ok(ForecastResponse {
            event: Event {
                event_start_datetime: format_timestamp(started),
                event_finished_datetime: format_timestamp(finished),
                event_duration: format_duration(finished - started),
            },
            requester_name: request.requester_name,
            location: upstream.location.name,
            coordinates: Coordinates {
                latitude: upstream.location.coordinates.latitude,
                longitude: upstream.location.coordinates.longitude,
            },
            forecast,
        })
    }
}

/// ISO-8601 local time; the microsecond part is left out when it is zero.
fn format_timestamp(at: NaiveDateTime) -> String {
    if at.nanosecond() < 1_000 {
        at.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        at.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }
}

/// Render as `H:MM:SS[.ffffff]`, prefixed with `N day(s), ` past 24 hours.
pub fn format_duration(elapsed: TimeDelta) -> String {
    let micros = elapsed.num_microseconds().unwrap_or(i64::MAX).max(0);

    let days = micros / 86_400_000_000;
    let rest = micros % 86_400_000_000;
    let hours = rest / 3_600_000_000;
    let minutes = rest / 60_000_000 % 60;
    let seconds = rest / 1_000_000 % 60;
    let fraction = rest % 1_000_000;

    let mut out = match days {
        0 => String::new(),
        1 => "1 day, ".to_string(),
        n => format!("{n} days, "),
    };
    out.push_str(&format!("{hours}:{minutes:02}:{seconds:02}"));
    if fraction != 0 {
        out.push_str(&format!(".{fraction:06}"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ProviderError, upstream::UpstreamForecast, upstream::fixtures};
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use serde_json::json;
    use std::sync::Mutex;

    const SECRET: &str = "s3cret";

    #[derive(Debug)]
    struct StubProvider {
        days: usize,
        calls: Mutex<Vec<String>>,
    }

    impl StubProvider {
        fn new(days: usize) -> Arc<Self> {
            Arc::new(Self {
                days,
                calls: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl ForecastProvider for StubProvider {
        async fn get_forecast(&self, location: &str) -> Result<UpstreamForecast, ProviderError> {
            self.calls.lock().unwrap().push(location.to_string());
            Ok(fixtures::forecast(self.days))
        }
    }

    #[derive(Debug)]
    struct FailingProvider;

    #[async_trait]
    impl ForecastProvider for FailingProvider {
        async fn get_forecast(&self, _location: &str) -> Result<UpstreamForecast, ProviderError> {
            Err(ProviderError::Status {
                status: 429,
                body: "quota".into(),
            })
        }
    }

    /// Returns the queued instants in order, repeating the last one.
    #[derive(Debug)]
    struct FixedClock(Mutex<Vec<NaiveDateTime>>);

    impl FixedClock {
        fn at(instants: &[NaiveDateTime]) -> Arc<Self> {
            let mut queue = instants.to_vec();
            queue.reverse();
            Arc::new(Self(Mutex::new(queue)))
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> NaiveDateTime {
            let mut queue = self.0.lock().unwrap();
            if queue.len() > 1 {
                queue.pop().unwrap()
            } else {
                queue[0]
            }
        }
    }

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 18)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn service(provider: Arc<dyn ForecastProvider>) -> ForecastService {
        let finished = noon() + TimeDelta::microseconds(250_500);
        ForecastService::new(provider, SECRET)
            .with_clock(FixedClock::at(&[noon(), finished]))
    }

    fn payload(date: Option<&str>) -> Value {
        let mut body = json!({ "token": SECRET, "location": "Kyiv", "requester_name": "Olena" });
        if let Some(date) = date {
            body["date"] = json!(date);
        }
        body
    }

    #[tokio::test]
    async fn assembles_full_response_without_date() {
        let provider = StubProvider::new(7);
        let svc = service(provider.clone());

        let res = svc.handle(&payload(None)).await.unwrap();

        assert_eq!(res.requester_name, "Olena");
        assert_eq!(res.location, "Kyiv");
        assert_eq!(
            res.coordinates,
            Coordinates {
                latitude: 50.45466,
                longitude: 30.5238,
            }
        );
        assert_eq!(res.forecast.len(), 7);
        assert_eq!(res.event.event_start_datetime, "2026-10-18T12:00:00");
        assert_eq!(res.event.event_finished_datetime, "2026-10-18T12:00:00.250500");
        assert_eq!(res.event.event_duration, "0:00:00.250500");
        assert_eq!(*provider.calls.lock().unwrap(), vec!["Kyiv".to_string()]);
    }

    #[tokio::test]
    async fn today_is_taken_from_the_clock() {
        let svc = service(StubProvider::new(7));

        let today = svc.handle(&payload(Some("2026-10-18"))).await.unwrap();
        assert_eq!(today.forecast.len(), 1);
        assert_eq!(today.forecast[0].date, "2026-10-18");

        let yesterday = service(StubProvider::new(7))
            .handle(&payload(Some("2026-10-17")))
            .await
            .unwrap();
        assert_eq!(yesterday.forecast, today.forecast);

        let far = service(StubProvider::new(7))
            .handle(&payload(Some("2026-11-17")))
            .await
            .unwrap();
        assert_eq!(far.forecast.len(), 7);
    }

    #[tokio::test]
    async fn rejected_requests_never_reach_upstream() {
        let provider = StubProvider::new(7);
        let svc = service(provider.clone());

        let mut body = payload(None);
        body["token"] = json!("wrong");
        let err = svc.handle(&body).await.unwrap_err();

        assert_eq!(err.status_code(), 403);
        assert!(provider.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn invalid_date_is_reported_after_upstream_call() {
        let svc = service(StubProvider::new(7));

        let err = svc.handle(&payload(Some("someday"))).await.unwrap_err();

        assert!(matches!(err, Rejection::InvalidDate(ref d) if d == "someday"));
        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn upstream_failure_is_bad_gateway() {
        let svc = service(Arc::new(FailingProvider));

        let err = svc.handle(&payload(None)).await.unwrap_err();

        assert!(matches!(
            err,
            Rejection::Upstream(ProviderError::Status { status: 429, .. })
        ));
        assert_eq!(err.status_code(), 502);
    }

    #[test]
    fn timestamp_formatting() {
        assert_eq!(format_timestamp(noon()), "2026-10-18T12:00:00");
        assert_eq!(
            format_timestamp(noon() + TimeDelta::microseconds(7)),
            "2026-10-18T12:00:00.000007"
        );
    }

    #[test]
    fn duration_formatting() {
        assert_eq!(format_duration(TimeDelta::zero()), "0:00:00");
        assert_eq!(format_duration(TimeDelta::microseconds(1_500)), "0:00:00.001500");
        assert_eq!(format_duration(TimeDelta::seconds(3_725)), "1:02:05");
        assert_eq!(format_duration(TimeDelta::hours(25)), "1 day, 1:00:00");
        assert_eq!(format_duration(TimeDelta::days(3)), "3 days, 0:00:00");
    }
}
