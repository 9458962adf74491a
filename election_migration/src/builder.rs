pub use crate::config::*;

/// A builder for the creation requests sent to the destination.
///
/// The fields read from the source are copied as they are. Everything else
/// comes from the builder.
///
/// ```
/// use election_migration::builder::Builder;
/// use election_migration::{ClientConfig, ElectionConfig};
/// use serde_json::json;
///
/// let election = ElectionConfig {
///     id: json!(42),
///     layout: json!("simple"),
///     title: json!("Board"),
///     description: json!(""),
///     questions: json!([]),
/// };
///
/// let request = Builder::new(&ClientConfig::default()).build(&election);
/// assert_eq!(request.id, json!(42));
/// assert_eq!(request.director, "auth1");
/// assert!(request.real);
/// ```
#[derive(Debug, Clone)]
pub struct Builder {
    pub(crate) _director: String,
    pub(crate) _authorities: Vec<String>,
    pub(crate) _start_date: String,
    pub(crate) _end_date: String,
    pub(crate) _presentation: Presentation,
}

impl Builder {
    pub fn new(config: &ClientConfig) -> Builder {
        Builder {
            _director: config.director.clone(),
            _authorities: config.authorities.clone(),
            _start_date: PLACEHOLDER_DATE.to_string(),
            _end_date: PLACEHOLDER_DATE.to_string(),
            _presentation: Presentation::default(),
        }
    }

    /// Replaces the placeholder dates.
    pub fn dates(self, start_date: &str, end_date: &str) -> Builder {
        Builder {
            _start_date: start_date.to_string(),
            _end_date: end_date.to_string(),
            ..self
        }
    }

    pub fn presentation(self, presentation: Presentation) -> Builder {
        Builder {
            _presentation: presentation,
            ..self
        }
    }

    pub fn build(&self, election: &ElectionConfig) -> ElectionCreationRequest {
        ElectionCreationRequest {
            id: election.id.clone(),
            layout: election.layout.clone(),
            director: self._director.clone(),
            authorities: self._authorities.clone(),
            title: election.title.clone(),
            description: election.description.clone(),
            questions: election.questions.clone(),
            start_date: self._start_date.clone(),
            end_date: self._end_date.clone(),
            presentation: self._presentation.clone(),
            real: true,
        }
    }
}
