use clap::{Parser, Subcommand};

/// Copies elections between Agora deployments and triggers their tally.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON file with the endpoints, the director and the authorities to use.
    /// For more information about the file format, read the manual of the election_migration crate.
    #[clap(short, long, value_parser, global = true)]
    pub config: Option<String>,

    /// (domain name, optional) Reads from https://<domain>/elections-old and writes to
    /// https://<domain>/elections. Overrides the endpoints of the --config file.
    #[clap(long, value_parser, global = true)]
    pub domain: Option<String>,

    /// If passed as an argument, TLS certificates will not be verified. Only use this against
    /// deployments with self-signed certificates.
    #[clap(long, takes_value = false, global = true)]
    pub insecure: bool,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false, global = true)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Reads an election from the source deployment and creates it on the destination.
    Create {
        /// The id of the election, identical on both deployments.
        #[clap(value_parser)]
        election_id: String,
    },
    /// Stops an election on the destination, which starts its tally.
    #[clap(alias = "close")]
    Tally {
        #[clap(value_parser)]
        election_id: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_create() {
        let args = Args::try_parse_from(["agora-migrate", "create", "42"]).unwrap();
        assert_eq!(
            args.command,
            Command::Create {
                election_id: "42".to_string()
            }
        );
        assert!(!args.insecure);
        assert_eq!(args.config, None);
    }

    #[test]
    fn parse_tally_alias_and_global_flags() {
        let args = Args::try_parse_from([
            "agora-migrate",
            "close",
            "7",
            "--insecure",
            "--domain",
            "vote.example.org",
        ])
        .unwrap();
        assert_eq!(
            args.command,
            Command::Tally {
                election_id: "7".to_string()
            }
        );
        assert!(args.insecure);
        assert_eq!(args.domain.as_deref(), Some("vote.example.org"));
    }

    #[test]
    fn election_id_is_required() {
        assert!(Args::try_parse_from(["agora-migrate", "create"]).is_err());
        assert!(Args::try_parse_from(["agora-migrate"]).is_err());
    }
}
