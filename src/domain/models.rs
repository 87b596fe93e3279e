use mongodb::bson::Bson;
use serde::{de, Deserialize, Deserializer};

/// One JSON file parsed in full. Values keep whatever shape the file had.
pub type IngestedDocument = serde_json::Map<String, serde_json::Value>;

/// Reply of `getLastRequestStatistics`: resource usage of the most recent
/// operation on the connection.
///
/// Any field missing from the reply stays at its zero value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RequestStatistics {
    #[serde(rename = "ActivityId", alias = "ActivityID", alias = "activityid")]
    pub activity_id: String,

    #[serde(rename = "CommandName", alias = "commandname")]
    pub command_name: String,

    #[serde(
        rename = "EstimatedDelayFromRateLimitingInMilliseconds",
        alias = "estimateddelayfromratelimitinginmilliseconds",
        deserialize_with = "lenient_i64"
    )]
    pub estimated_delay_from_rate_limiting_ms: i64,

    #[serde(rename = "RequestCharge", alias = "requestcharge", deserialize_with = "lenient_f64")]
    pub request_charge: f64,

    #[serde(
        rename = "RequestDurationInMilliSeconds",
        alias = "RequestDurationInMilliseconds",
        alias = "requestdurationinmilliseconds",
        deserialize_with = "lenient_i64"
    )]
    pub request_duration_ms: i64,

    #[serde(rename = "RetriedDueToRateLimiting", alias = "retriedduetoratelimiting")]
    pub retried_due_to_rate_limiting: bool,

    #[serde(rename = "ok", alias = "OK", deserialize_with = "lenient_i32")]
    pub ok: i32,
}

impl RequestStatistics {
    pub fn succeeded(&self) -> bool {
        self.ok == 1
    }

    /// The one-line summary logged after an ingestion run.
    pub fn summary(&self) -> String {
        format!(
            "ActivityID: {}, RequestCharge: {:.2} {}ms",
            self.activity_id, self.request_charge, self.request_duration_ms
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct BuildInfo {
    pub version: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IngestReceipt {
    pub bytes_read: u64,
    pub inserted_id: String,
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub server_version: String,
    pub receipt: IngestReceipt,
    pub statistics: RequestStatistics,
}

enum Number {
    Int(i64),
    Float(f64),
}

// Servers report durations and `ok` as doubles as often as integers.
fn bson_number<'de, D>(deserializer: D) -> Result<Number, D::Error>
where
    D: Deserializer<'de>,
{
    match Bson::deserialize(deserializer)? {
        Bson::Int32(v) => Ok(Number::Int(i64::from(v))),
        Bson::Int64(v) => Ok(Number::Int(v)),
        Bson::Double(v) => Ok(Number::Float(v)),
        Bson::Null => Ok(Number::Int(0)),
        other => Err(de::Error::custom(format!(
            "expected a number, found {:?}",
            other.element_type()
        ))),
    }
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match bson_number(deserializer)? {
        Number::Int(v) => v as f64,
        Number::Float(v) => v,
    })
}

fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match bson_number(deserializer)? {
        Number::Int(v) => v,
        Number::Float(v) => v.round() as i64,
    })
}

fn lenient_i32<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    match bson_number(deserializer)? {
        Number::Int(v) => i32::try_from(v)
            .map_err(|_| de::Error::custom(format!("{} does not fit in a 32-bit status code", v))),
        Number::Float(v) => Ok(v.round() as i32),
    }
}
