//! Decoding and normalizing curl's write-out report.
//!
//! curl changed how `%{time_*}` values are reported in 7.61.0 without changing
//! the variable names: older versions print fractional seconds, newer builds
//! may print integral microseconds. Each cumulative field is therefore
//! classified by its JSON representation before it is converted, and anything
//! that is not a number is rejected.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::HttpstatError;

/// The seven cumulative timestamps curl reports, in request order.
///
/// Every value is measured from the start of the request. Serialized names
/// match curl's write-out variables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Cumulative<T> {
    #[serde(rename = "time_namelookup")]
    pub namelookup: T,
    #[serde(rename = "time_connect")]
    pub connect: T,
    #[serde(rename = "time_appconnect")]
    pub appconnect: T,
    #[serde(rename = "time_pretransfer")]
    pub pretransfer: T,
    #[serde(rename = "time_redirect")]
    pub redirect: T,
    #[serde(rename = "time_starttransfer")]
    pub starttransfer: T,
    #[serde(rename = "time_total")]
    pub total: T,
}

impl<T> Cumulative<T> {
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Cumulative<U> {
        Cumulative {
            namelookup: f(self.namelookup),
            connect: f(self.connect),
            appconnect: f(self.appconnect),
            pretransfer: f(self.pretransfer),
            redirect: f(self.redirect),
            starttransfer: f(self.starttransfer),
            total: f(self.total),
        }
    }
}

/// Non-timing fields of the report. Passed through without conversion.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TransferInfo {
    /// Bytes per second
    pub speed_download: Option<f64>,
    /// Bytes per second
    pub speed_upload: Option<f64>,
    pub remote_ip: Option<String>,
    pub remote_port: Option<String>,
    pub local_ip: Option<String>,
    pub local_port: Option<String>,
}

/// A cumulative timing value as curl encoded it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawTime {
    /// Fractional seconds (curl before 7.61.0)
    LegacySeconds(f64),
    /// Integral microseconds (curl 7.61.0 and later)
    Micros(i64),
}

impl RawTime {
    /// Classify the raw JSON value of cumulative field `field`.
    ///
    /// `None` means the field was absent from the report.
    pub fn classify(field: &'static str, value: Option<&Value>) -> Result<Self, HttpstatError> {
        let invalid = |found: &'static str| HttpstatError::InvalidMetricType { field, found };

        let Some(value) = value else {
            return Err(invalid("missing"));
        };
        let Value::Number(number) = value else {
            return Err(invalid(json_type(value)));
        };

        if let Some(micros) = number.as_i64() {
            Ok(RawTime::Micros(micros))
        } else if let Some(micros) = number.as_u64() {
            Ok(RawTime::Micros(i64::try_from(micros).unwrap_or(i64::MAX)))
        } else if let Some(seconds) = number.as_f64() {
            Ok(RawTime::LegacySeconds(seconds))
        } else {
            Err(invalid("number"))
        }
    }

    /// Whole milliseconds, truncated toward zero.
    pub fn to_millis(self) -> i64 {
        match self {
            RawTime::LegacySeconds(seconds) => (seconds * 1000.0).trunc() as i64,
            RawTime::Micros(micros) => micros / 1000,
        }
    }
}

/// curl's report with every cumulative field classified.
#[derive(Debug, Clone, PartialEq)]
pub struct TimingReport {
    pub times: Cumulative<RawTime>,
    pub transfer: TransferInfo,
}

/// A report with every cumulative field in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedTiming {
    #[serde(flatten)]
    pub times: Cumulative<i64>,
    #[serde(flatten)]
    pub transfer: TransferInfo,
}

impl TimingReport {
    /// Decode the JSON object curl printed for the write-out format.
    ///
    /// Fails closed: every cumulative field must be present and numeric.
    pub fn decode(object: &Map<String, Value>) -> Result<Self, HttpstatError> {
        let time = |field: &'static str| RawTime::classify(field, object.get(field));

        let times = Cumulative {
            namelookup: time("time_namelookup")?,
            connect: time("time_connect")?,
            appconnect: time("time_appconnect")?,
            pretransfer: time("time_pretransfer")?,
            redirect: time("time_redirect")?,
            starttransfer: time("time_starttransfer")?,
            total: time("time_total")?,
        };

        let transfer = TransferInfo {
            speed_download: object.get("speed_download").and_then(Value::as_f64),
            speed_upload: object.get("speed_upload").and_then(Value::as_f64),
            remote_ip: text_field(object, "remote_ip"),
            remote_port: text_field(object, "remote_port"),
            local_ip: text_field(object, "local_ip"),
            local_port: text_field(object, "local_port"),
        };

        Ok(Self { times, transfer })
    }

    pub fn normalize(&self) -> NormalizedTiming {
        NormalizedTiming {
            times: self.times.map(RawTime::to_millis),
            transfer: self.transfer.clone(),
        }
    }
}

fn text_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    match object.get(key)? {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
