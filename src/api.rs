//! Request handlers behind the horoscope HTTP contract.
//!
//! Each handler takes raw request strings, runs the core lookup and wraps
//! the outcome in an [`ApiResponse`] envelope:
//!
//! ```json
//! {"status": "success", "data": {...}}
//! {"status": "error", "message": "...", "code": "...", "suggestion": "..."}
//! ```
//!
//! The HTTP status travels alongside the envelope but is not serialized.

use rand::Rng;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{
    DateInput, Element, Fortune, LookupError, MatchKind, ParseError, ZodiacSign,
    generate_fortune, parse_date_string, prelude::*, resolve_by_name_or_alias,
    validate_components, zodiac_signs,
};

pub const HTTP_OK: u16 = 200;
pub const HTTP_BAD_REQUEST: u16 = 400;
pub const HTTP_NOT_FOUND: u16 = 404;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

/// Response envelope shared by every handler.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    status:      Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    data:        Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message:     Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code:        Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    suggestion:  Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    valid_signs: Option<Vec<String>>,
    #[serde(skip)]
    status_code: u16,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            status:      Status::Success,
            data:        Some(data),
            message:     None,
            code:        None,
            suggestion:  None,
            valid_signs: None,
            status_code: HTTP_OK,
        }
    }

    pub fn failure(error: &RequestError) -> Self {
        warn!(code = error.code(), %error, "request rejected");
        let valid_signs = matches!(error, RequestError::Sign(_)).then(|| {
            zodiac_signs()
                .iter()
                .map(|sign| sign.name().to_lowercase())
                .collect()
        });
        Self {
            status: Status::Error,
            data: None,
            message: Some(error.to_string()),
            code: Some(error.code()),
            suggestion: error.suggestion(),
            valid_signs,
            status_code: error.status_code(),
        }
    }

    pub fn from_result(result: Result<T, RequestError>) -> Self {
        match result {
            Ok(data) => Self::success(data),
            Err(error) => Self::failure(&error),
        }
    }

    pub const fn status(&self) -> Status {
        self.status
    }

    /// HTTP status to send with the envelope
    pub const fn status_code(&self) -> u16 {
        self.status_code
    }

    pub const fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn suggestion(&self) -> Option<&str> {
        self.suggestion.as_deref()
    }

    pub const fn is_success(&self) -> bool {
        matches!(self.status, Status::Success)
    }
}

/// Anything a handler can reject a request for.
#[derive(Debug, Clone, PartialEq, Eq, Display, From)]
pub enum RequestError {
    #[display(fmt = "{_0}")]
    Date(ParseError),
    #[display(fmt = "{_0}")]
    Sign(LookupError),
    #[from(ignore)]
    #[display(fmt = "Missing {_0} parameter")]
    MissingParameter(&'static str),
}

impl std::error::Error for RequestError {}

impl RequestError {
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Date(error) => error.code(),
            Self::Sign(error) => error.code(),
            Self::MissingParameter(_) => "MISSING_PARAMETER",
        }
    }

    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Date(_) | Self::MissingParameter(_) => HTTP_BAD_REQUEST,
            Self::Sign(_) => HTTP_NOT_FOUND,
        }
    }

    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::Date(error) => Some(error.suggestion()),
            Self::Sign(error) => error
                .suggestion()
                .map(|name| format!("Did you mean \"{name}\"?")),
            Self::MissingParameter("sign") => {
                Some("Use format: /api/signs/aries (where \"aries\" is the zodiac sign name)".to_owned())
            }
            Self::MissingParameter(_) => Some("Provide both month and day".to_owned()),
        }
    }
}

/// Sign details as sent to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignData {
    pub name:          &'static str,
    pub symbol:        &'static str,
    pub period:        String,
    pub dates:         String,
    pub element:       Element,
    pub ruling_planet: &'static str,
    pub traits:        &'static [&'static str],
    pub daily_reading: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_kind:    Option<MatchKind>,
}

impl From<&'static ZodiacSign> for SignData {
    fn from(sign: &'static ZodiacSign) -> Self {
        Self {
            name:          sign.name(),
            symbol:        sign.symbol(),
            period:        sign.range().to_string(),
            dates:         sign.range().describe(),
            element:       sign.element(),
            ruling_planet: sign.ruling_planet(),
            traits:        sign.traits(),
            daily_reading: sign.daily_reading(),
            match_kind:    None,
        }
    }
}

/// Name and symbol only, as carried by the fortune endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SignSummary {
    pub name:   &'static str,
    pub symbol: &'static str,
}

impl From<&'static ZodiacSign> for SignSummary {
    fn from(sign: &'static ZodiacSign) -> Self {
        Self {
            name:   sign.name(),
            symbol: sign.symbol(),
        }
    }
}

/// Payload of the fortune endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct FortuneData {
    pub sign:    SignSummary,
    pub fortune: Fortune,
}

/// Payload of the horoscope endpoints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HoroscopeData {
    pub birth_date: DateInput,
    pub sign:       SignData,
    pub fortune:    Fortune,
}

impl HoroscopeData {
    fn new(birth_date: DateInput, fortune: Fortune) -> Self {
        Self {
            birth_date,
            sign: SignData::from(fortune.sign()),
            fortune,
        }
    }
}

fn required<'a>(value: &'a str, name: &'static str) -> Result<&'a str, RequestError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(RequestError::MissingParameter(name));
    }
    Ok(value)
}

fn date_from_query(month: &str, day: &str) -> Result<DateInput, RequestError> {
    let month = required(month, "month")?;
    let day = required(day, "day")?;
    Ok(validate_components(month, day, None)?)
}

/// `GET /api/zodiac?month=&day=`
pub fn zodiac_by_date(month: &str, day: &str) -> ApiResponse<SignData> {
    info!(month, day, "zodiac lookup");
    ApiResponse::from_result(
        date_from_query(month, day).map(|date| SignData::from(date.zodiac_sign())),
    )
}

/// `GET /api/fortune?month=&day=`
pub fn fortune_by_date<R: Rng + ?Sized>(
    month: &str,
    day: &str,
    rng: &mut R,
) -> ApiResponse<FortuneData> {
    info!(month, day, "fortune request");
    ApiResponse::from_result(date_from_query(month, day).map(|date| {
        let sign = date.zodiac_sign();
        FortuneData {
            sign:    SignSummary::from(sign),
            fortune: generate_fortune(sign, rng),
        }
    }))
}

/// `GET /api/horoscope?month=&day=`
pub fn horoscope_by_date<R: Rng + ?Sized>(
    month: &str,
    day: &str,
    rng: &mut R,
) -> ApiResponse<HoroscopeData> {
    info!(month, day, "horoscope request");
    ApiResponse::from_result(date_from_query(month, day).map(|date| {
        let fortune = generate_fortune(date.zodiac_sign(), rng);
        HoroscopeData::new(date, fortune)
    }))
}

/// Horoscope for a free-form birth date such as `"December 25, 1990"`.
pub fn horoscope_by_date_string<R: Rng + ?Sized>(
    input: &str,
    rng: &mut R,
) -> ApiResponse<HoroscopeData> {
    info!(input, "horoscope request");
    let date = parse_date_string(input).and_then(crate::ParsedDate::into_full);
    ApiResponse::from_result(date.map_err(RequestError::from).map(|date| {
        let fortune = generate_fortune(date.zodiac_sign(), rng);
        HoroscopeData::new(date, fortune)
    }))
}

/// `GET /api/signs/:sign`
pub fn sign_by_name(name: &str) -> ApiResponse<SignData> {
    info!(name, "sign lookup");
    let result = required(name, "sign").and_then(|name| {
        let found = resolve_by_name_or_alias(name)?;
        if found.kind != MatchKind::Exact {
            debug!(name, sign = found.sign.name(), kind = %found.kind, "resolved loosely");
        }
        Ok(SignData {
            match_kind: Some(found.kind),
            ..SignData::from(found.sign)
        })
    });
    ApiResponse::from_result(result)
}
