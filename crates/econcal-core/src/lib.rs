//! Core contracts for econcal.
//!
//! This crate contains:
//! - Canonical domain models and validation
//! - The pure calendar pipeline: DST arithmetic, Eastern-to-Japan
//!   conversion, release-time inference, indicator classification and
//!   normalization
//! - The proxy fallback chain and FRED release-calendar client
//! - Response envelope and structured errors

pub mod calendar;
pub mod classify;
pub mod domain;
pub mod envelope;
pub mod error;
pub mod fred;
pub mod http;
pub mod proxy;
pub mod rules;
pub mod schedule;
pub mod zone;

pub use calendar::{normalize, NormalizeOptions, CALENDAR_CURRENCY};
pub use classify::{classify, ClassifiedIndicator};
pub use domain::{
    CalendarDate, ClockTime, DateWindow, DisplayRecord, Importance, JapanMoment, RangePreset,
    RawRelease, ReleaseId, DEFAULT_DAYS_AFTER, DEFAULT_DAYS_BEFORE,
};
pub use envelope::{Envelope, EnvelopeError, EnvelopeMeta};
pub use error::{CoreError, ValidationError};
pub use fred::{CalendarFailure, CalendarFetch, CalendarSuccess, FredClient};
pub use http::{HttpClient, HttpError, HttpRequest, HttpResponse, NoopHttpClient, ReqwestHttpClient};
pub use proxy::{FetchFailure, FetchResult, FetchSuccess, ProxyChain, ProxyId};
pub use rules::Pattern;
pub use schedule::infer_release_time;
pub use zone::{eastern_to_japan, is_us_dst};
