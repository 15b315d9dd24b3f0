use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// Alert type (severity/category) of an event
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AlertType {
    Error,
    Warning,
    #[default]
    Info,
    Success,
}

impl Display for AlertType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AlertType::Error => write!(f, "error"),
            AlertType::Warning => write!(f, "warning"),
            AlertType::Info => write!(f, "info"),
            AlertType::Success => write!(f, "success"),
        }
    }
}

/// Event priority
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    Normal,
    Low,
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::Normal => write!(f, "normal"),
            Priority::Low => write!(f, "low"),
        }
    }
}

/// Body of an event
///
/// Plain text is sent as-is. Errors and JSON objects are rendered into a
/// fenced code block and force Markdown formatting on for that event, even
/// when the caller disabled it.
///
/// # Example
///
/// ```rust
/// use datadog_events::EventBody;
///
/// let text: EventBody = "all hosts updated".into();
/// let object: EventBody = serde_json::json!({ "hosts": 12 }).into();
/// let error = EventBody::from_error(&std::io::Error::other("disk full"));
/// ```
#[derive(Debug, Clone)]
pub enum EventBody {
    /// Plain text, may contain Markdown
    Text(String),
    /// An error rendered as its display form plus a trace
    Error {
        /// Display form of the error
        message: String,
        /// Trace lines shown under the message (source chain)
        trace: String,
    },
    /// A JSON object, pretty-printed into the event body
    Object(serde_json::Value),
}

impl EventBody {
    /// Capture an error as an event body
    ///
    /// The display form becomes the first line and the `source()` chain
    /// becomes the trace underneath it.
    pub fn from_error<E>(err: &E) -> Self
    where
        E: std::error::Error + ?Sized,
    {
        let message = err.to_string();
        let mut lines = Vec::new();
        let mut source = err.source();
        while let Some(cause) = source {
            lines.push(format!("caused by: {cause}"));
            source = cause.source();
        }

        EventBody::Error {
            message,
            trace: lines.join("\n"),
        }
    }

    /// Render the body text, returning whether Markdown is forced on
    pub(crate) fn render(self) -> (String, bool) {
        match self {
            EventBody::Text(text) => (text, false),
            EventBody::Error { message, trace } => {
                let inner = if trace.is_empty() {
                    message
                } else {
                    format!("{message}\n{trace}")
                };
                (format!("```\n{inner}\n```"), true)
            }
            EventBody::Object(value) => (format!("```\n{}\n```", pretty_json(&value)), true),
        }
    }
}

impl From<&str> for EventBody {
    fn from(text: &str) -> Self {
        EventBody::Text(text.to_string())
    }
}

impl From<String> for EventBody {
    fn from(text: String) -> Self {
        EventBody::Text(text)
    }
}

impl From<serde_json::Value> for EventBody {
    fn from(value: serde_json::Value) -> Self {
        EventBody::Object(value)
    }
}

// Four-space indent, matching how the events UI renders fenced JSON.
fn pretty_json(value: &serde_json::Value) -> String {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut ser)
        .expect("JSON value serializes to memory");
    String::from_utf8(buf).expect("serializer emits UTF-8")
}

/// Per-event options
///
/// Every field overrides the corresponding [`EventsConfig`](crate::EventsConfig)
/// field for that one event, except `tags`, which are appended to the instance
/// tags instead of replacing them.
///
/// # Example
///
/// ```rust
/// use datadog_events::{EventOptions, Priority};
///
/// let options = EventOptions::new()
///     .with_priority(Priority::Low)
///     .with_host("worker-3")
///     .with_tag("deploy");
/// ```
#[derive(Debug, Clone, Default)]
pub struct EventOptions {
    /// Date of the event, sent as `date_happened`
    pub date: Option<DateTime<Utc>>,

    /// Priority override for this event
    pub priority: Option<Priority>,

    /// Hostname override for this event
    pub host: Option<String>,

    /// Tags appended after the instance tags
    pub tags: Vec<String>,

    /// Aggregation key override for this event
    pub aggregation_key: Option<String>,

    /// Source type override for this event
    pub source_type: Option<String>,

    /// Markdown override for this event
    pub markdown: Option<bool>,
}

impl EventOptions {
    /// Create empty options (no overrides)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the event date
    ///
    /// When unset, the service stamps the event with its receive time.
    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }

    /// Override the priority for this event
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Override the hostname for this event
    pub fn with_host(mut self, host: &str) -> Self {
        self.host = Some(host.to_string());
        self
    }

    /// Append a tag for this event
    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tags.push(tag.to_string());
        self
    }

    /// Append several tags for this event
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Override the aggregation key for this event
    pub fn with_aggregation_key(mut self, key: &str) -> Self {
        self.aggregation_key = Some(key.to_string());
        self
    }

    /// Override the source type for this event
    pub fn with_source_type(mut self, source_type: &str) -> Self {
        self.source_type = Some(source_type.to_string());
        self
    }

    /// Enable or disable Markdown formatting for this event
    pub fn with_markdown(mut self, markdown: bool) -> Self {
        self.markdown = Some(markdown);
        self
    }
}

/// Wire payload for the events endpoint
///
/// Optional fields are omitted from the JSON entirely when unset, never sent
/// as `null`.
///
/// See: <https://docs.datadoghq.com/api/latest/events/>
#[derive(Debug, Clone, Serialize)]
pub struct EventPayload {
    pub alert_type: AlertType,
    pub title: String,
    pub text: String,
    pub priority: Priority,
    pub tags: Vec<String>,

    /// Unix seconds, rounded from the supplied date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_happened: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregation_key: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_type_name: Option<String>,
}
