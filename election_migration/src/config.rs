// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

/// The part of an election read from the source deployment.
///
/// All the fields are opaque JSON values: they are copied verbatim into the
/// creation request, whatever their type on the source side.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ElectionConfig {
    pub id: JSValue,
    pub layout: JSValue,
    pub title: JSValue,
    pub description: JSValue,
    pub questions: JSValue,
}

// ******** Output data structures *********

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct Presentation {
    pub share_text: String,
    pub theme: String,
    pub urls: Vec<JSValue>,
    pub theme_css: String,
}

impl Default for Presentation {
    fn default() -> Self {
        Presentation {
            share_text: "".to_string(),
            theme: "default".to_string(),
            urls: Vec::new(),
            theme_css: "".to_string(),
        }
    }
}

/// The body sent to the destination deployment to create an election.
///
/// The order of the fields is the order of the keys in the serialized JSON.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ElectionCreationRequest {
    pub id: JSValue,
    pub layout: JSValue,
    pub director: String,
    pub authorities: Vec<String>,
    pub title: JSValue,
    pub description: JSValue,
    pub questions: JSValue,
    pub start_date: String,
    pub end_date: String,
    pub presentation: Presentation,
    pub real: bool,
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum HttpMethod {
    Get,
    Post,
}

impl Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
            HttpMethod::Post => write!(f, "POST"),
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// What came back from an endpoint. The status is reported, never interpreted.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// The result of a complete creation: what was sent and what the destination answered.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct CreationOutcome {
    pub request_body: String,
    pub response: HttpResponse,
}

/// Errors that prevent an operation from completing.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum MigrationError {
    /// The HTTP call could not complete (connection, TLS, reading the body).
    Network { url: String, message: String },
    /// The HTTP client could not be constructed.
    ClientSetup(String),
    /// The source answered with something that is not JSON.
    MalformedJson { url: String, message: String },
    /// A field expected in the source payload is absent. Holds the dotted path.
    MissingField(String),
    Serialization(String),
}

impl Error for MigrationError {}

impl Display for MigrationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MigrationError::Network { url, message } => {
                write!(f, "request to {} failed: {}", url, message)
            }
            MigrationError::ClientSetup(message) => {
                write!(f, "could not build the HTTP client: {}", message)
            }
            MigrationError::MalformedJson { url, message } => {
                write!(f, "response from {} is not valid JSON: {}", url, message)
            }
            MigrationError::MissingField(path) => {
                write!(f, "missing field {} in the source payload", path)
            }
            MigrationError::Serialization(message) => {
                write!(f, "could not serialize the election: {}", message)
            }
        }
    }
}

// ********* Configuration **********

pub const DEFAULT_DOMAIN: &str = "agora";
pub const DEFAULT_DIRECTOR: &str = "auth1";
pub const DEFAULT_AUTHORITIES: [&str; 1] = ["auth2"];

/// Both dates of a created election are set to this value.
pub const PLACEHOLDER_DATE: &str = "2016-01-05T11:11:11.111";

/// Where to read from, where to write to, and who runs the new elections.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ClientConfig {
    /// Base of the election API on the deployment holding the existing elections.
    pub source_base: String,
    /// Base of the election API on the deployment receiving the new elections.
    pub destination_base: String,
    pub director: String,
    /// Trustees of the new elections, in order.
    pub authorities: Vec<String>,
    /// Skip TLS certificate verification. Only meant for development deployments
    /// with self-signed certificates.
    pub accept_invalid_certs: bool,
}

impl ClientConfig {
    /// The standard layout of a deployment: the old elections are served under
    /// `elections-old`, the new ones under `elections`.
    pub fn for_domain(domain: &str) -> ClientConfig {
        ClientConfig {
            source_base: format!("https://{}/elections-old/api/election", domain),
            destination_base: format!("https://{}/elections/api/election", domain),
            director: DEFAULT_DIRECTOR.to_string(),
            authorities: DEFAULT_AUTHORITIES.iter().map(|s| s.to_string()).collect(),
            accept_invalid_certs: false,
        }
    }

    pub fn source_url(&self, election_id: &str) -> String {
        join_url(&self.source_base, election_id)
    }

    pub fn destination_url(&self, election_id: &str) -> String {
        join_url(&self.destination_base, election_id)
    }

    pub fn stop_url(&self, election_id: &str) -> String {
        format!("{}/stop", self.destination_url(election_id))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig::for_domain(DEFAULT_DOMAIN)
    }
}

fn join_url(base: &str, election_id: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), election_id)
}
