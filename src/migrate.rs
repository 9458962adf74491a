use log::{debug, info};

use election_migration::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::io::Write;

use crate::args::{Args, Command};
use crate::migrate::settings::*;

pub mod settings;

#[derive(Debug, Snafu)]
pub enum AppError {
    #[snafu(display("Error opening settings file {path}"))]
    ReadingSettings {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing settings file {path}"))]
    ParsingSettings {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Could not set up the HTTP client"))]
    Connecting { source: MigrationError },
    #[snafu(display("Could not create election {election_id}"))]
    Creating {
        source: MigrationError,
        election_id: String,
    },
    #[snafu(display("Could not stop election {election_id}"))]
    Stopping {
        source: MigrationError,
        election_id: String,
    },
    #[snafu(display("Error writing to the console"))]
    Output { source: std::io::Error },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type AppResult<T> = Result<T, AppError>;

pub fn run(args: &Args) -> AppResult<()> {
    let settings = match &args.config {
        Some(path) => read_settings(path)?,
        None => Settings::default(),
    };
    let config = client_config(&settings, args.domain.as_deref(), args.insecure);
    info!("config: {:?}", config);

    let client = ElectionMigrationClient::connect(config).context(ConnectingSnafu {})?;
    let mut out = std::io::stdout();
    match &args.command {
        Command::Create { election_id } => create_election(&client, election_id, &mut out),
        Command::Tally { election_id } => close_election(&client, election_id, &mut out),
    }
}

/// Copies one election and prints the body sent, then the answer of the destination.
pub fn create_election<T: Transport>(
    client: &ElectionMigrationClient<T>,
    election_id: &str,
    out: &mut dyn Write,
) -> AppResult<()> {
    check_election_id(election_id)?;
    let mut printed: std::io::Result<()> = Ok(());
    let outcome = client
        .create_election_with(election_id, |body| {
            printed = writeln!(out, "\ndata to be sent: {}\n", body);
        })
        .context(CreatingSnafu { election_id })?;
    printed.context(OutputSnafu {})?;
    debug!("create_election: status {}", outcome.response.status);
    writeln!(out, "{}", outcome.response.body).context(OutputSnafu {})
}

pub fn close_election<T: Transport>(
    client: &ElectionMigrationClient<T>,
    election_id: &str,
    out: &mut dyn Write,
) -> AppResult<()> {
    check_election_id(election_id)?;
    let response = client
        .close_election(election_id)
        .context(StoppingSnafu { election_id })?;
    writeln!(out, "{}", response.body).context(OutputSnafu {})
}

fn check_election_id(election_id: &str) -> AppResult<()> {
    if election_id.trim().is_empty() {
        whatever!("The election id must not be empty")
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    struct ScriptedTransport {
        bodies: RefCell<VecDeque<Result<String, MigrationError>>>,
        urls: RefCell<Vec<String>>,
    }

    impl Transport for ScriptedTransport {
        fn send(&self, request: &HttpRequest) -> Result<HttpResponse, MigrationError> {
            self.urls.borrow_mut().push(request.url.clone());
            let body = self
                .bodies
                .borrow_mut()
                .pop_front()
                .unwrap_or(Ok("".to_string()))?;
            Ok(HttpResponse { status: 200, body })
        }
    }

    fn client(bodies: Vec<Result<String, MigrationError>>) -> ElectionMigrationClient<ScriptedTransport> {
        let _ = env_logger::builder().is_test(true).try_init();
        ElectionMigrationClient::new(
            ClientConfig::default(),
            ScriptedTransport {
                bodies: RefCell::new(bodies.into()),
                urls: RefCell::new(Vec::new()),
            },
        )
    }

    const SOURCE_42: &str = r#"{"payload":{"configuration":{"id":"42","layout":"L","title":"T","description":"D","questions":[]}}}"#;

    #[test]
    fn create_prints_payload_then_answer() {
        let c = client(vec![Ok(SOURCE_42.to_string()), Ok("{\"status\":\"ok\"}".to_string())]);
        let mut out: Vec<u8> = Vec::new();
        create_election(&c, "42", &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let expected_body = r#"{"id":"42","layout":"L","director":"auth1","authorities":["auth2"],"title":"T","description":"D","questions":[],"start_date":"2016-01-05T11:11:11.111","end_date":"2016-01-05T11:11:11.111","presentation":{"share_text":"","theme":"default","urls":[],"theme_css":""},"real":true}"#;
        assert_eq!(
            text,
            format!("\ndata to be sent: {}\n\n{{\"status\":\"ok\"}}\n", expected_body)
        );
    }

    #[test]
    fn create_failure_names_the_election() {
        let c = client(vec![Ok(r#"{"payload":{}}"#.to_string())]);
        let mut out: Vec<u8> = Vec::new();
        let err = create_election(&c, "42", &mut out).unwrap_err();

        assert_eq!(err.to_string(), "Could not create election 42");
        match err {
            AppError::Creating { source, .. } => assert_eq!(
                source,
                MigrationError::MissingField("payload.configuration".to_string())
            ),
            x => panic!("unexpected error {:?}", x),
        }
        assert!(out.is_empty());
        assert_eq!(c.transport().urls.borrow().len(), 1);
    }

    #[test]
    fn tally_prints_answer() {
        let c = client(vec![Ok("stopping".to_string())]);
        let mut out: Vec<u8> = Vec::new();
        close_election(&c, "42", &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "stopping\n");
        assert_eq!(
            *c.transport().urls.borrow(),
            vec!["https://agora/elections/api/election/42/stop".to_string()]
        );
    }

    #[test]
    fn tally_network_failure() {
        let c = client(vec![Err(MigrationError::Network {
            url: "https://agora/elections/api/election/42/stop".to_string(),
            message: "connection refused".to_string(),
        })]);
        let mut out: Vec<u8> = Vec::new();
        let err = close_election(&c, "42", &mut out).unwrap_err();
        assert!(matches!(err, AppError::Stopping { .. }));
    }

    #[test]
    fn empty_election_id_is_rejected() {
        let c = client(vec![]);
        let mut out: Vec<u8> = Vec::new();
        assert!(create_election(&c, " ", &mut out).is_err());
        assert!(close_election(&c, "", &mut out).is_err());
        assert!(c.transport().urls.borrow().is_empty());
    }
}
