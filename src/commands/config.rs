use anyhow::{Context, Result};
use log::debug;
use std::time::Duration;

use crate::http::{RequestClient, Timeout};

/// Client settings collected from the command line and environment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientOptions {
    pub base_url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub default_params: Vec<(String, String)>,
    /// Read timeout, and connect timeout unless `connect_timeout` is set
    pub timeout: Option<Duration>,
    pub connect_timeout: Option<Duration>,
}

impl ClientOptions {
    pub fn effective_timeout(&self) -> Option<Timeout> {
        match (self.timeout, self.connect_timeout) {
            (Some(read), Some(connect)) => Some(Timeout::Split { connect, read }),
            (Some(both), None) => Some(Timeout::Both(both)),
            (None, _) => None,
        }
    }

    pub fn build_client(&self) -> Result<RequestClient> {
        let mut builder = RequestClient::builder()
            .default_params(self.default_params.iter().cloned());

        if let Some(base_url) = &self.base_url {
            builder = builder.base_url(base_url);
        }
        if let Some(username) = &self.username {
            debug!("Authenticating as {}", mask(username));
            builder = builder.username(username);
        }
        if let Some(password) = &self.password {
            builder = builder.password(password);
        }
        if let Some(timeout) = self.effective_timeout() {
            debug!("Using timeout {:?}", timeout);
            builder = builder.timeout(timeout);
        }

        builder.build().context("Failed to create HTTP client")
    }
}

/// Keeps the first two characters of a credential for log output.
fn mask(value: &str) -> String {
    let visible: String = value.chars().take(2).collect();
    format!("{}*****", visible)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_timeout_single() {
        let options = ClientOptions {
            timeout: Some(Duration::from_secs(10)),
            ..Default::default()
        };
        assert_eq!(
            options.effective_timeout(),
            Some(Timeout::Both(Duration::from_secs(10)))
        );
    }

    #[test]
    fn test_effective_timeout_split() {
        let options = ClientOptions {
            timeout: Some(Duration::from_secs(30)),
            connect_timeout: Some(Duration::from_secs(3)),
            ..Default::default()
        };
        assert_eq!(
            options.effective_timeout(),
            Some(Timeout::Split {
                connect: Duration::from_secs(3),
                read: Duration::from_secs(30),
            })
        );
    }

    #[test]
    fn test_effective_timeout_none() {
        assert_eq!(ClientOptions::default().effective_timeout(), None);
    }

    #[test]
    fn test_build_client() {
        let options = ClientOptions {
            base_url: Some("https://mds.example.org".to_string()),
            username: Some("DEMO.ORG".to_string()),
            password: Some("secret".to_string()),
            default_params: vec![("testMode".to_string(), "1".to_string())],
            timeout: Some(Duration::from_secs(5)),
            connect_timeout: None,
        };

        let client = options.build_client().unwrap();
        assert_eq!(client.base_url(), Some("https://mds.example.org"));
        assert_eq!(
            client.default_params().get("testMode").map(String::as_str),
            Some("1")
        );
        assert_eq!(
            client.timeout(),
            Some(Timeout::Both(Duration::from_secs(5)))
        );
    }

    #[test]
    fn test_mask() {
        assert_eq!(mask("DEMO.ORG"), "DE*****");
        assert_eq!(mask("a"), "a*****");
        assert_eq!(mask(""), "*****");
    }
}
