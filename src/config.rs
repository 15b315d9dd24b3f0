use std::env;

use crate::types::Priority;

/// Environment variable consulted by [`EventsConfig::from_env`] for the API key
pub const API_KEY_ENV: &str = "DATADOG_API_KEY";

/// Environment variable consulted by [`EventsConfig::from_env`] for the API domain
pub const DOMAIN_ENV: &str = "DATADOG_DOMAIN";

const DEFAULT_DOMAIN: &str = "datadoghq.com";

/// Instance configuration for [`DatadogEvents`](crate::DatadogEvents)
///
/// Set at construction, but every field stays public so it may be changed
/// afterwards by direct assignment; each send reads the configuration fresh.
///
/// # Example
///
/// ```rust
/// use datadog_events::{EventsConfig, Priority};
///
/// let config = EventsConfig::new("my-api-key")
///     .with_title_prefix("[staging] ")
///     .with_priority(Priority::Low)
///     .with_tag("service:billing");
/// ```
#[derive(Debug, Clone)]
pub struct EventsConfig {
    /// Datadog API key; empty means unset, and sends fail until one is assigned
    pub api_key: String,

    /// API domain, e.g. `datadoghq.com` or `datadoghq.eu`
    pub domain: String,

    /// Text prepended to every event title
    pub title_prefix: String,

    /// Text prepended to every event body
    pub body_prefix: String,

    /// Text appended to every event body
    pub body_postfix: String,

    /// Priority for events that do not override it
    pub priority: Priority,

    /// Hostname attached to events that do not override it
    pub host: Option<String>,

    /// Tags attached to every event, ahead of any per-event tags
    pub tags: Vec<String>,

    /// Aggregation key for events that do not override it
    pub aggregation_key: Option<String>,

    /// Source type for events that do not override it
    ///
    /// See: <https://docs.datadoghq.com/integrations/faq/list-of-api-source-attribute-value/>
    pub source_type: Option<String>,

    /// Format event bodies as Markdown
    pub markdown: bool,
}

impl EventsConfig {
    /// Create a configuration with the given API key over the documented defaults
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Create a configuration from the environment
    ///
    /// Reads `DATADOG_API_KEY` and `DATADOG_DOMAIN`, evaluated once here.
    /// A missing key leaves `api_key` empty; the send path reports it then.
    pub fn from_env() -> Self {
        Self {
            api_key: env::var(API_KEY_ENV).unwrap_or_default(),
            domain: env::var(DOMAIN_ENV).unwrap_or_else(|_| DEFAULT_DOMAIN.to_string()),
            ..Self::default()
        }
    }

    /// Set the API domain
    pub fn with_domain(mut self, domain: &str) -> Self {
        self.domain = domain.to_string();
        self
    }

    /// Prefix every event title
    pub fn with_title_prefix(mut self, prefix: &str) -> Self {
        self.title_prefix = prefix.to_string();
        self
    }

    /// Prefix every event body
    pub fn with_body_prefix(mut self, prefix: &str) -> Self {
        self.body_prefix = prefix.to_string();
        self
    }

    /// Append to every event body
    pub fn with_body_postfix(mut self, postfix: &str) -> Self {
        self.body_postfix = postfix.to_string();
        self
    }

    /// Set the default priority
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Set the default hostname
    pub fn with_host(mut self, host: &str) -> Self {
        self.host = Some(host.to_string());
        self
    }

    /// Add an instance tag
    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tags.push(tag.to_string());
        self
    }

    /// Add several instance tags
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Set the default aggregation key
    pub fn with_aggregation_key(mut self, key: &str) -> Self {
        self.aggregation_key = Some(key.to_string());
        self
    }

    /// Set the default source type
    pub fn with_source_type(mut self, source_type: &str) -> Self {
        self.source_type = Some(source_type.to_string());
        self
    }

    /// Enable or disable Markdown formatting
    pub fn with_markdown(mut self, markdown: bool) -> Self {
        self.markdown = markdown;
        self
    }
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            domain: DEFAULT_DOMAIN.to_string(),
            title_prefix: String::new(),
            body_prefix: String::new(),
            body_postfix: String::new(),
            priority: Priority::Normal,
            host: None,
            tags: Vec::new(),
            aggregation_key: None,
            source_type: None,
            markdown: true,
        }
    }
}
