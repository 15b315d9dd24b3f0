use reqwest::{Client, StatusCode};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

use crate::config::EventsConfig;
use crate::errors::{DatadogEventsError, Result};
use crate::types::{AlertType, EventBody, EventOptions, EventPayload};

/// Client for posting events to the Datadog Events API
///
/// # Example
///
/// ```rust,no_run
/// use datadog_events::{DatadogEvents, EventOptions, EventsConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = DatadogEvents::new(EventsConfig::new("my-api-key"))?;
///
///     client
///         .success("Deploy finished", "All hosts updated", EventOptions::new())
///         .await?;
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct DatadogEvents {
    client: ClientWithMiddleware,
    endpoint: Option<Url>,
    /// Instance configuration; may be reassigned between sends, each send
    /// reads it fresh
    pub config: EventsConfig,
}

/// Error body shape Datadog uses for rejected requests
#[derive(Debug, Default, Deserialize)]
struct ApiErrors {
    #[serde(default)]
    errors: Vec<String>,
}

impl DatadogEvents {
    /// Create a new events client
    ///
    /// The API key is not validated here; a send with an empty key fails with
    /// [`DatadogEventsError::MissingApiKey`], so a key assigned to
    /// [`config`](Self::config) after construction is honored.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: EventsConfig) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(DatadogEventsError::BuildHttpClient)?;

        let client = ClientBuilder::new(client).build();

        Ok(Self {
            client,
            endpoint: None,
            config,
        })
    }

    /// Create a client configured from the environment
    ///
    /// Reads `DATADOG_API_KEY` and `DATADOG_DOMAIN`, see
    /// [`EventsConfig::from_env`].
    pub fn from_env() -> Result<Self> {
        Self::new(EventsConfig::from_env())
    }

    /// Create a client with a custom reqwest middleware client
    ///
    /// This allows you to add custom middleware (retry, logging, etc.); this
    /// crate itself never retries.
    pub fn with_client(client: ClientWithMiddleware, config: EventsConfig) -> Self {
        Self {
            client,
            endpoint: None,
            config,
        }
    }

    /// Override the API base URL
    ///
    /// Replaces `https://app.{domain}` when routing through a proxy or a test
    /// server; the `/api/v1/events` path is still appended.
    pub fn with_endpoint(mut self, endpoint: Url) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    /// Send an event to Datadog
    ///
    /// A `None` alert type defaults to [`AlertType::Info`]. The body may be
    /// given as text, as a captured error, or as a JSON object; see
    /// [`EventBody`] for how non-text bodies are rendered.
    ///
    /// Per-event options override the instance configuration field by field,
    /// except tags, which concatenate (instance tags first). The API key and
    /// domain cannot be overridden per event.
    ///
    /// On success, resolves with the API response body as parsed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No API key is configured
    /// - The HTTP request fails
    /// - Datadog rejects the API key (HTTP 403) or the event
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # use datadog_events::{AlertType, DatadogEvents, EventBody, EventOptions, EventsConfig};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// # let client = DatadogEvents::new(EventsConfig::new("my-api-key"))?;
    /// // Send an event
    /// client
    ///     .send_event(
    ///         Some(AlertType::Success),
    ///         "Completed process",
    ///         "The process completed successfully",
    ///         EventOptions::new(),
    ///     )
    ///     .await?;
    ///
    /// // Send a captured error
    /// let err = std::io::Error::other("something bad happened");
    /// client
    ///     .send_event(
    ///         Some(AlertType::Error),
    ///         "There was an error",
    ///         EventBody::from_error(&err),
    ///         EventOptions::new(),
    ///     )
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(name = "DatadogEvents::send_event", skip_all, fields(title = %title))]
    pub async fn send_event(
        &self,
        alert_type: Option<AlertType>,
        title: &str,
        body: impl Into<EventBody>,
        options: EventOptions,
    ) -> Result<Value> {
        if self.config.api_key.is_empty() {
            return Err(DatadogEventsError::MissingApiKey);
        }

        let payload = self.build_payload(alert_type, title, body.into(), &options);

        let mut url = self.events_url()?;
        url.query_pairs_mut()
            .append_pair("api_key", &self.config.api_key);

        debug!(
            domain = %self.config.domain,
            alert_type = %payload.alert_type,
            "Posting event to Datadog"
        );

        let response = self
            .client
            .post(url)
            .json(&payload)
            .send()
            .await
            .map_err(DatadogEventsError::Request)?;

        let status = response.status();
        let status_err = response.error_for_status_ref().err();

        if let Some(source) = status_err {
            if status == StatusCode::FORBIDDEN {
                return Err(DatadogEventsError::InvalidApiKey);
            }

            let api_errors: ApiErrors = response.json().await.unwrap_or_default();
            if !api_errors.errors.is_empty() {
                return Err(DatadogEventsError::Api {
                    status: status.as_u16(),
                    message: api_errors.errors.join(", "),
                });
            }

            return Err(DatadogEventsError::Status(source));
        }

        debug!("Event accepted");
        response.json().await.map_err(DatadogEventsError::Decode)
    }

    /// Send an `error` event, see [`send_event`](Self::send_event)
    pub async fn error(
        &self,
        title: &str,
        body: impl Into<EventBody>,
        options: EventOptions,
    ) -> Result<Value> {
        self.send_event(Some(AlertType::Error), title, body, options)
            .await
    }

    /// Send a `warning` event, see [`send_event`](Self::send_event)
    pub async fn warning(
        &self,
        title: &str,
        body: impl Into<EventBody>,
        options: EventOptions,
    ) -> Result<Value> {
        self.send_event(Some(AlertType::Warning), title, body, options)
            .await
    }

    /// Send an `info` event, see [`send_event`](Self::send_event)
    pub async fn info(
        &self,
        title: &str,
        body: impl Into<EventBody>,
        options: EventOptions,
    ) -> Result<Value> {
        self.send_event(Some(AlertType::Info), title, body, options)
            .await
    }

    /// Send a `success` event, see [`send_event`](Self::send_event)
    pub async fn success(
        &self,
        title: &str,
        body: impl Into<EventBody>,
        options: EventOptions,
    ) -> Result<Value> {
        self.send_event(Some(AlertType::Success), title, body, options)
            .await
    }

    fn events_url(&self) -> Result<Url> {
        match &self.endpoint {
            Some(base) => base
                .join("/api/v1/events")
                .map_err(DatadogEventsError::Endpoint),
            None => Url::parse(&format!("https://app.{}/api/v1/events", self.config.domain))
                .map_err(DatadogEventsError::Endpoint),
        }
    }

    /// Build the wire payload from the instance configuration and per-event
    /// options
    ///
    /// Merge policy:
    ///
    /// | field            | policy                               |
    /// |------------------|--------------------------------------|
    /// | priority         | event overrides instance             |
    /// | host             | event overrides instance             |
    /// | aggregation_key  | event overrides instance             |
    /// | source_type      | event overrides instance             |
    /// | markdown         | event overrides instance             |
    /// | tags             | instance tags, then event tags       |
    /// | title/body fixes | instance only                        |
    /// | api_key, domain  | instance only                        |
    ///
    /// Non-text bodies force Markdown on regardless of the merged flag.
    fn build_payload(
        &self,
        alert_type: Option<AlertType>,
        title: &str,
        body: EventBody,
        options: &EventOptions,
    ) -> EventPayload {
        let config = &self.config;

        let (body_text, forced_markdown) = body.render();
        let markdown = forced_markdown || options.markdown.unwrap_or(config.markdown);

        let text = format!("{}{}{}", config.body_prefix, body_text, config.body_postfix);
        let text = if markdown {
            format!("%%%\n{text}\n%%%")
        } else {
            text
        };

        EventPayload {
            alert_type: alert_type.unwrap_or_default(),
            title: format!("{}{}", config.title_prefix, title),
            text,
            priority: options.priority.unwrap_or(config.priority),
            tags: config
                .tags
                .iter()
                .chain(options.tags.iter())
                .cloned()
                .collect(),
            date_happened: options
                .date
                .map(|date| (date.timestamp_millis() as f64 / 1000.0).round() as i64),
            host: options.host.clone().or_else(|| config.host.clone()),
            aggregation_key: options
                .aggregation_key
                .clone()
                .or_else(|| config.aggregation_key.clone()),
            source_type_name: options
                .source_type
                .clone()
                .or_else(|| config.source_type.clone()),
        }
    }
}
