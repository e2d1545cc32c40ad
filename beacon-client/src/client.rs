//! The notification client itself.

use crate::{
    encoder::FormBuilder,
    error::Error,
    types::Part,
    BASE_URL, DEBUG_URL, USER_AGENT,
};

use isahc::http::{Request, StatusCode};
use isahc::HttpClient;
use log::{debug, error};

use std::fmt;
use std::io::Read;

/// Resolved configuration handed to [`BeaconClient::new`].
///
/// How these values were discovered (rc file, environment, explicit
/// arguments) is the caller's business; the client only consumes the result.
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    /// Access token identifying the recipient. May be absent at construction
    /// time and supplied later through [`BeaconClient::set_token`].
    pub token: Option<String>,
    /// Notification endpoint, ending in a path prefix the token is appended
    /// to. Defaults to [`BASE_URL`].
    pub base_url: Option<String>,
    /// Pin the endpoint to [`DEBUG_URL`], overriding `base_url`.
    pub debug: bool,
}

/// Sends notifications to the single recipient a token identifies.
///
/// Each send performs one synchronous POST and blocks until a response or a
/// transport fault is observed. There is no retry state and no session
/// identity beyond the token itself, so instances are cheap and independent;
/// callers sharing one instance across threads must serialize reconfiguration
/// themselves.
pub struct BeaconClient {
    token: String,
    base_url: String,
    http: HttpClient,
}

impl BeaconClient {
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        let base_url = if config.debug {
            DEBUG_URL.to_string()
        } else {
            config.base_url.unwrap_or_else(|| BASE_URL.to_string())
        };

        Ok(BeaconClient {
            token: config.token.unwrap_or_default(),
            base_url,
            http: HttpClient::new()?,
        })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn set_token<T: Into<String>>(&mut self, token: T) {
        self.token = token.into();
    }

    pub fn is_token_set(&self) -> bool {
        !self.token.is_empty()
    }

    pub fn host(&self) -> &str {
        &self.base_url
    }

    /// Point subsequent sends at a different server. Takes effect on the
    /// next send, not retroactively.
    pub fn set_host<U: Into<String>>(&mut self, base_url: U) {
        self.base_url = base_url.into();
    }

    /// Send a text message.
    ///
    /// The body is the exact UTF-8 encoding of `text`, no delimiters added.
    /// Returns the response status, or `None` when the request never made it
    /// to the server.
    pub fn send_text(&self, text: &str) -> Result<Option<StatusCode>, Error> {
        if !self.is_token_set() {
            return Err(Error::TokenNotSet);
        }

        self.post("plain/text; encoding=utf-8".to_string(), text.as_bytes().to_vec())
    }

    /// Send a rendered PNG figure with an optional caption.
    ///
    /// The caption part precedes the figure part so the recipient reads the
    /// caption first.
    pub fn send_figure(&self, image: &[u8], caption: &str) -> Result<Option<StatusCode>, Error> {
        if !self.is_token_set() {
            return Err(Error::TokenNotSet);
        }

        let mut form = FormBuilder::new();
        form.part(Part::text("caption", caption));
        form.part(Part::binary(
            "figure",
            image.to_vec(),
            "figure.png",
            mime::IMAGE_PNG,
        ));
        let form = form.build()?;

        let content_type = format!("multipart/form-data; boundary={}", form.boundary());
        self.post(content_type, form.into_body())
    }

    /// POST a prepared body to `base_url + token`.
    ///
    /// Any HTTP response, 200 or not, is `Ok(Some(status))`; a non-200 status
    /// is logged together with the reason phrase and the response body, and
    /// the caller decides whether it is an error. A transport fault (DNS,
    /// refused connection, timeout, malformed response) is logged and mapped
    /// to `Ok(None)` so a failed notification never unwinds through a host
    /// process that merely wanted a side channel.
    fn post(&self, content_type: String, body: Vec<u8>) -> Result<Option<StatusCode>, Error> {
        let url = format!("{}{}", self.base_url, self.token);

        let request = Request::post(url.as_str())
            .header("Content-Type", content_type)
            .header("User-Agent", USER_AGENT)
            .body(body)?;

        let mut response = match self.http.send(request) {
            Ok(response) => response,
            Err(err) => {
                error!("request to {} failed: {}", url, err);
                return Ok(None);
            }
        };

        let status = response.status();
        if status != StatusCode::OK {
            let mut raw = Vec::new();
            if let Err(err) = response.body_mut().read_to_end(&mut raw) {
                debug!("could not drain response body: {}", err);
            }
            error!(
                "[{}] {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("unknown"),
                String::from_utf8_lossy(&raw).trim_end()
            );
        }

        Ok(Some(status))
    }
}

impl fmt::Debug for BeaconClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<BeaconClient token={} url={}>",
            self.token, self.base_url
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(config: ClientConfig) -> BeaconClient {
        BeaconClient::new(config).unwrap()
    }

    #[test]
    fn empty_token_fails_before_any_network_activity() {
        let client = client(ClientConfig::default());

        match client.send_text("hello") {
            Err(Error::TokenNotSet) => {}
            other => panic!("expected TokenNotSet, got {:?}", other),
        }
        match client.send_figure(&[0x89], "caption") {
            Err(Error::TokenNotSet) => {}
            other => panic!("expected TokenNotSet, got {:?}", other),
        }
    }

    #[test]
    fn debug_mode_overrides_any_configured_host() {
        let client = client(ClientConfig {
            base_url: Some("https://example.test/api/notify/".into()),
            debug: true,
            ..ClientConfig::default()
        });
        assert_eq!(client.host(), DEBUG_URL);
    }

    #[test]
    fn host_defaults_to_the_production_endpoint() {
        let client = client(ClientConfig::default());
        assert_eq!(client.host(), BASE_URL);
    }

    #[test]
    fn token_and_host_are_reassignable() {
        let mut client = client(ClientConfig::default());
        assert!(!client.is_token_set());

        client.set_token("abc123");
        assert!(client.is_token_set());
        assert_eq!(client.token(), "abc123");

        client.set_host("https://other.test/api/notify/");
        assert_eq!(client.host(), "https://other.test/api/notify/");
    }
}
