// Sending requests over the wire.

use log::debug;

use crate::config::*;

/// Anything able to carry an `HttpRequest` to an endpoint.
///
/// The client only talks to the network through this trait, which lets
/// tests stand in for the deployments.
pub trait Transport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, MigrationError>;
}

/// Blocking transport backed by `reqwest`.
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    pub fn new(config: &ClientConfig) -> Result<ReqwestTransport, MigrationError> {
        if config.accept_invalid_certs {
            log::warn!("TLS certificate verification is disabled");
        }
        let client = reqwest::blocking::Client::builder()
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| MigrationError::ClientSetup(e.to_string()))?;
        Ok(ReqwestTransport { client })
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, MigrationError> {
        let network_error = |e: reqwest::Error| MigrationError::Network {
            url: request.url.clone(),
            message: e.to_string(),
        };

        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
        };
        for (name, value) in request.headers.iter() {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().map_err(network_error)?;
        let status = response.status().as_u16();
        let body = response.text().map_err(network_error)?;
        debug!("send: {} {} -> {} {:?}", request.method, request.url, status, body);
        Ok(HttpResponse { status, body })
    }
}
