mod config;
mod transport;
use log::{debug, info};

use serde_json::Value as JSValue;

pub use crate::config::*;
pub use crate::transport::*;

pub mod builder;
pub mod manual;

use crate::builder::Builder;

const CONTENT_TYPE: (&str, &str) = ("Content-Type", "application/json");
const ACCEPT_ANY: (&str, &str) = ("Accept", "*/*");

/// Reads elections from a source deployment, recreates them on a destination
/// deployment, and stops them there.
///
/// Every call goes through the transport, in sequence, without retries.
pub struct ElectionMigrationClient<T: Transport> {
    config: ClientConfig,
    transport: T,
    builder: Builder,
}

impl ElectionMigrationClient<ReqwestTransport> {
    /// A client talking to real deployments over HTTPS.
    pub fn connect(config: ClientConfig) -> Result<Self, MigrationError> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(ElectionMigrationClient::new(config, transport))
    }
}

impl<T: Transport> ElectionMigrationClient<T> {
    pub fn new(config: ClientConfig, transport: T) -> Self {
        let builder = Builder::new(&config);
        ElectionMigrationClient {
            config,
            transport,
            builder,
        }
    }

    /// Replaces the builder used to assemble creation requests.
    pub fn with_builder(self, builder: Builder) -> Self {
        ElectionMigrationClient { builder, ..self }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Reads `payload.configuration` of an election on the source deployment.
    pub fn fetch_configuration(&self, election_id: &str) -> Result<ElectionConfig, MigrationError> {
        let url = self.config.source_url(election_id);
        let response = self.send(HttpRequest {
            method: HttpMethod::Get,
            url: url.clone(),
            headers: headers(&[CONTENT_TYPE]),
            body: None,
        })?;
        let js: JSValue =
            serde_json::from_str(&response.body).map_err(|e| MigrationError::MalformedJson {
                url,
                message: e.to_string(),
            })?;
        extract_configuration(&js)
    }

    pub fn build_creation_request(&self, election: &ElectionConfig) -> ElectionCreationRequest {
        self.builder.build(election)
    }

    /// Posts an already serialized creation request to the destination.
    pub fn submit_election(
        &self,
        election_id: &str,
        request_body: &str,
    ) -> Result<HttpResponse, MigrationError> {
        self.send(HttpRequest {
            method: HttpMethod::Post,
            url: self.config.destination_url(election_id),
            headers: headers(&[CONTENT_TYPE]),
            body: Some(request_body.to_string()),
        })
    }

    pub fn create_election(&self, election_id: &str) -> Result<CreationOutcome, MigrationError> {
        self.create_election_with(election_id, |_| {})
    }

    /// Copies an election from the source to the destination.
    ///
    /// `before_submit` sees the serialized request right before it is posted.
    /// Nothing is posted if the source election cannot be read in full.
    pub fn create_election_with<F>(
        &self,
        election_id: &str,
        before_submit: F,
    ) -> Result<CreationOutcome, MigrationError>
    where
        F: FnOnce(&str),
    {
        let election = self.fetch_configuration(election_id)?;
        debug!("create_election: source configuration {:?}", election);
        let request = self.build_creation_request(&election);
        let request_body = to_json(&request)?;
        before_submit(&request_body);
        let response = self.submit_election(election_id, &request_body)?;
        Ok(CreationOutcome {
            request_body,
            response,
        })
    }

    /// Asks the destination to stop accepting votes, which triggers the tally.
    pub fn close_election(&self, election_id: &str) -> Result<HttpResponse, MigrationError> {
        self.send(HttpRequest {
            method: HttpMethod::Post,
            url: self.config.stop_url(election_id),
            headers: headers(&[ACCEPT_ANY, CONTENT_TYPE]),
            body: None,
        })
    }

    fn send(&self, request: HttpRequest) -> Result<HttpResponse, MigrationError> {
        info!("{} {}", request.method, request.url);
        let response = self.transport.send(&request)?;
        info!("{} {} -> status {}", request.method, request.url, response.status);
        Ok(response)
    }
}

pub fn to_json(request: &ElectionCreationRequest) -> Result<String, MigrationError> {
    serde_json::to_string(request).map_err(|e| MigrationError::Serialization(e.to_string()))
}

fn headers(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}

fn extract_configuration(js: &JSValue) -> Result<ElectionConfig, MigrationError> {
    let field = |name: &str| -> Result<JSValue, MigrationError> {
        lookup(js, &["payload", "configuration", name]).cloned()
    };
    Ok(ElectionConfig {
        id: field("id")?,
        layout: field("layout")?,
        title: field("title")?,
        description: field("description")?,
        questions: field("questions")?,
    })
}

// Walks down the path, reporting the first missing key with its full dotted path.
fn lookup<'a>(js: &'a JSValue, path: &[&str]) -> Result<&'a JSValue, MigrationError> {
    let mut current = js;
    for (idx, key) in path.iter().enumerate() {
        current = current
            .get(*key)
            .ok_or_else(|| MigrationError::MissingField(path[..=idx].join(".")))?;
    }
    Ok(current)
}
