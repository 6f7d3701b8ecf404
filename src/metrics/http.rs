//! reqwest-backed HTTP probe

use super::traits::{HttpProbe, ProbeOutcome};

use reqwest::blocking::Client;
use std::time::Duration;

/// GET probe with a bounded timeout
pub struct ReqwestProbe {
    client: Client,
    url: String,
}

impl ReqwestProbe {
    /// Build a probe for `url`; every request is cut off after `timeout`
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("servmon/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

impl HttpProbe for ReqwestProbe {
    fn probe(&self) -> ProbeOutcome {
        match self.client.get(&self.url).send() {
            Ok(response) => {
                let status = response.status().as_u16();
                if status >= 400 {
                    ProbeOutcome::ErrorStatus(status)
                } else {
                    ProbeOutcome::Success(status)
                }
            }
            Err(e) => ProbeOutcome::Unreachable(e.to_string()),
        }
    }

    fn url(&self) -> &str {
        &self.url
    }
}
