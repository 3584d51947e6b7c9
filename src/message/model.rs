//! Message, notification, and platform config types.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::MessageError;

/// Maximum number of recipient tokens in a single message.
pub const MAX_TOKENS: usize = 1000;

/// Maximum number of `&&`/`||` combinators in a condition expression.
pub const MAX_CONDITION_OPERATORS: usize = 2;

/// Maximum Android time-to-live (28 days), in seconds.
pub const MAX_TIME_TO_LIVE_SECS: u64 = 2_419_200;

static CONDITION_OPERATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&&|\|\|").expect("condition operator pattern is valid"));

/// Predefined, user-visible key-value pairs of the notification payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Notification {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(rename = "android_channel_id", skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sound: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub click_action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_loc_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_loc_args: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_loc_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_loc_args: Option<String>,
}

impl Notification {
    /// Creates a notification with a title and body; everything else unset.
    #[must_use]
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            body: Some(body.into()),
            ..Self::default()
        }
    }
}

/// Android-specific delivery options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AndroidConfig {
    /// Messages sharing a collapse key replace each other on the device.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collapse_key: Option<String>,

    /// Time-to-live in seconds, at most [`MAX_TIME_TO_LIVE_SECS`].
    #[serde(rename = "ttl", skip_serializing_if = "Option::is_none")]
    pub time_to_live: Option<u64>,

    /// Android-specific notification overriding the message-level one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<Notification>,
}

impl AndroidConfig {
    /// Creates an empty Android config.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the time-to-live in seconds.
    #[must_use]
    pub const fn with_time_to_live(mut self, secs: u64) -> Self {
        self.time_to_live = Some(secs);
        self
    }

    /// Sets the collapse key.
    #[must_use]
    pub fn with_collapse_key(mut self, key: impl Into<String>) -> Self {
        self.collapse_key = Some(key.into());
        self
    }

    /// Sets the Android-specific notification.
    #[must_use]
    pub fn with_notification(mut self, notification: Notification) -> Self {
        self.notification = Some(notification);
        self
    }
}

/// Targets, options, and payload of a push message.
///
/// A message must resolve at least one targeting mode: explicit recipient
/// tokens or a condition expression over topics. A `topic` is carried on the
/// wire but does not by itself make a message deliverable. Build it with the
/// `with_*` methods and hand it to a sender by reference; the sender never
/// mutates it.
///
/// # Example
///
/// ```
/// use hcm_push::message::{AndroidConfig, Message, Notification};
///
/// let message = Message::new()
///     .with_condition("'weather' in topics && 'news' in topics")
///     .with_notification(Notification::new("Storm", "Heavy rain expected"))
///     .with_android(AndroidConfig::new().with_time_to_live(3600));
///
/// assert!(message.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Message {
    /// Recipient device tokens.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub token: Vec<String>,

    /// Opaque data payload delivered to the app.
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub data: Map<String, Value>,

    /// User-visible notification.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<Notification>,

    /// Android delivery options.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub android: Option<AndroidConfig>,

    /// Single topic to deliver to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,

    /// Boolean expression over topics, e.g. `'a' in topics && 'b' in topics`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,

    #[serde(skip)]
    extra: Map<String, Value>,
}

impl Message {
    /// Creates an empty message with no target.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the recipient tokens.
    #[must_use]
    pub fn with_tokens<I, T>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.token = tokens.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the target topic.
    #[must_use]
    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    /// Sets the target condition expression.
    #[must_use]
    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    /// Adds a single data entry, replacing any previous value for `key`.
    #[must_use]
    pub fn with_data_entry(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Replaces the data payload.
    #[must_use]
    pub fn with_data(mut self, data: Map<String, Value>) -> Self {
        self.data = data;
        self
    }

    /// Sets the notification.
    #[must_use]
    pub fn with_notification(mut self, notification: Notification) -> Self {
        self.notification = Some(notification);
        self
    }

    /// Sets the Android config.
    #[must_use]
    pub fn with_android(mut self, android: AndroidConfig) -> Self {
        self.android = Some(android);
        self
    }

    /// Attaches caller metadata that travels with the message but is never sent.
    pub fn set_extra(&mut self, extra: Map<String, Value>) {
        self.extra = extra;
    }

    /// Returns the caller metadata set with [`set_extra`](Self::set_extra).
    #[must_use]
    pub const fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    /// Checks the message against the service limits.
    ///
    /// # Errors
    ///
    /// Returns, in this order of precedence:
    /// - [`MessageError::InvalidTarget`] when neither tokens nor a usable condition are set
    /// - [`MessageError::TooManyTokens`] when more than [`MAX_TOKENS`] tokens are set
    /// - [`MessageError::InvalidTimeToLive`] when the Android TTL exceeds [`MAX_TIME_TO_LIVE_SECS`]
    pub fn validate(&self) -> Result<(), MessageError> {
        if !self.has_target() {
            return Err(MessageError::InvalidTarget);
        }

        if self.token.len() > MAX_TOKENS {
            return Err(MessageError::TooManyTokens {
                count: self.token.len(),
                limit: MAX_TOKENS,
            });
        }

        let ttl = self.android.as_ref().and_then(|a| a.time_to_live);
        if let Some(ttl) = ttl.filter(|&ttl| ttl > MAX_TIME_TO_LIVE_SECS) {
            return Err(MessageError::InvalidTimeToLive {
                ttl,
                limit: MAX_TIME_TO_LIVE_SECS,
            });
        }

        Ok(())
    }

    fn has_target(&self) -> bool {
        if !self.token.is_empty() {
            return true;
        }

        self.condition.as_deref().is_some_and(|c| {
            !c.is_empty() && condition_operator_count(c) <= MAX_CONDITION_OPERATORS
        })
    }
}

/// Validates an optional message; `None` is rejected as [`MessageError::Missing`].
///
/// # Errors
///
/// Returns [`MessageError::Missing`] for `None`, otherwise whatever
/// [`Message::validate`] returns.
pub fn validate(message: Option<&Message>) -> Result<(), MessageError> {
    message.ok_or(MessageError::Missing)?.validate()
}

/// Counts non-overlapping `&&` and `||` occurrences.
fn condition_operator_count(condition: &str) -> usize {
    CONDITION_OPERATOR.find_iter(condition).count()
}
