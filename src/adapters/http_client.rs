//! HTTP sensor adapter (feature `http`).
//!
//! One blocking GET per call, no retries of its own.  Failures are sorted
//! into the transient/permanent split the retry wrapper expects:
//!
//! | failure                          | classified as                  |
//! |----------------------------------|--------------------------------|
//! | timeout                          | `TransientError::Timeout`       |
//! | connect / request / body I/O     | `TransientError::ConnectionFailed` |
//! | non-2xx status                   | `TransientError::BadStatus`     |
//! | body not JSON, field missing     | `PermanentError` (via decoding) |

use core::time::Duration;

use log::{debug, trace};

use crate::app::ports::SensorClient;
use crate::error::{FetchError, TransientError};
use crate::reading::{Endpoint, RawPayload};

pub struct HttpSensorClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpSensorClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("aqimon/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.query())
    }

    fn fetch(&self, endpoint: Endpoint) -> Result<RawPayload, FetchError> {
        let url = self.url(endpoint);
        trace!("GET {url}");

        let response = self.client.get(&url).send().map_err(classify)?;
        let status = response.status();
        if !status.is_success() {
            debug!("{endpoint}: HTTP {status}");
            return Err(TransientError::BadStatus(status.as_u16()).into());
        }

        let body = response.bytes().map_err(classify)?;
        Ok(RawPayload::from_json(&body)?)
    }
}

fn classify(e: reqwest::Error) -> FetchError {
    debug!("request failed: {e}");
    if e.is_timeout() {
        TransientError::Timeout.into()
    } else {
        TransientError::ConnectionFailed.into()
    }
}

impl SensorClient for HttpSensorClient {
    fn get_average(&mut self) -> Result<RawPayload, FetchError> {
        self.fetch(Endpoint::Average)
    }

    fn get_live(&mut self) -> Result<RawPayload, FetchError> {
        self.fetch(Endpoint::Live)
    }
}
