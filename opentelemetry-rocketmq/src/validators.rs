//! Precondition checks run before a message is sent or a consumer subscribes.
//!
//! Every check returns [`ErrorCode::IllegalFormat`](crate::error::ErrorCode)
//! on failure. None of them is retried.
use crate::error::{ClientError, ClientResult};

/// Maximum length of a topic name.
pub const TOPIC_MAX_LENGTH: usize = 255;

/// Maximum length of a consumer group name.
pub const CONSUMER_GROUP_MAX_LENGTH: usize = TOPIC_MAX_LENGTH;

/// Maximum size of a message body, 4 MiB.
pub const MESSAGE_BODY_MAX_SIZE: usize = 4 * 1024 * 1024;

const SCHEME_DELIMITER: &str = "://";
const INSTANCE_PREFIX: &str = "MQ_INST_";

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Topics and groups are limited to `[%|a-zA-Z0-9._-]`.
fn is_valid_resource_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'%' | b'|' | b'.' | b'_' | b'-'))
}

fn is_word(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{0085}' | '\u{2028}' | '\u{2029}')
}

fn is_single_line(value: &str) -> bool {
    !value.chars().any(is_line_terminator)
}

/// Strips a leading `scheme://`, where the scheme is one or more word characters.
fn strip_scheme(addr: &str) -> Option<&str> {
    let scheme_len = addr.find(|c: char| !is_word(c))?;
    if scheme_len == 0 {
        return None;
    }
    addr[scheme_len..].strip_prefix(SCHEME_DELIMITER)
}

/// `[scheme://]<anything on a single line>`
fn matches_endpoint(addr: &str) -> bool {
    is_single_line(strip_scheme(addr).unwrap_or(addr))
}

/// `[scheme://]MQ_INST_<word>_<word>.<anything on a single line>`
fn matches_namespaced_endpoint(addr: &str) -> bool {
    let matches_instance = |addr: &str| {
        let Some(rest) = addr.strip_prefix(INSTANCE_PREFIX) else {
            return false;
        };
        let Some(instance_len) = rest.find(|c: char| !is_word(c)) else {
            return false;
        };
        let (instance, host) = rest.split_at(instance_len);
        // `<word>_<word>`: an underscore with a word character on each side.
        let has_separator = instance
            .char_indices()
            .any(|(i, c)| c == '_' && i > 0 && i + 1 < instance.len());
        has_separator && host.starts_with('.') && is_single_line(&host[1..])
    };

    strip_scheme(addr).is_some_and(matches_instance) || matches_instance(addr)
}

/// Checks a topic name: not blank, only `[%|a-zA-Z0-9._-]`, at most
/// [`TOPIC_MAX_LENGTH`] characters.
///
/// # Examples
///
/// ```
/// use opentelemetry_rocketmq::validators::check_topic;
///
/// assert!(check_topic("finance.orders").is_ok());
/// assert!(check_topic("finance/orders").is_err());
/// ```
pub fn check_topic(topic: &str) -> ClientResult<()> {
    if is_blank(topic) {
        return Err(ClientError::illegal_format("Topic is blank."));
    }
    if !is_valid_resource_name(topic) {
        return Err(ClientError::illegal_format(format!(
            "Topic[{topic}] is illegal."
        )));
    }
    if topic.len() > TOPIC_MAX_LENGTH {
        return Err(ClientError::illegal_format(format!(
            "Topic's length exceeds the threshold, maxSize={TOPIC_MAX_LENGTH} bytes"
        )));
    }
    Ok(())
}

/// Checks a consumer group name, with the same rules as [`check_topic`].
pub fn check_group(group: &str) -> ClientResult<()> {
    if is_blank(group) {
        return Err(ClientError::illegal_format("Group is blank."));
    }
    if !is_valid_resource_name(group) {
        return Err(ClientError::illegal_format(format!(
            "Group[{group}] is illegal."
        )));
    }
    if group.len() > CONSUMER_GROUP_MAX_LENGTH {
        return Err(ClientError::illegal_format(format!(
            "Group length exceeds the threshold, maxSize={CONSUMER_GROUP_MAX_LENGTH} bytes"
        )));
    }
    Ok(())
}

/// Checks a message body is neither empty nor larger than
/// [`MESSAGE_BODY_MAX_SIZE`].
pub fn check_message_body(body: &[u8]) -> ClientResult<()> {
    if body.is_empty() {
        return Err(ClientError::illegal_format(
            "Message body's length is zero.",
        ));
    }
    if body.len() > MESSAGE_BODY_MAX_SIZE {
        return Err(ClientError::illegal_format(format!(
            "Message body's length exceeds the threshold, maxSize={MESSAGE_BODY_MAX_SIZE} bytes."
        )));
    }
    Ok(())
}

/// Checks a message about to be sent: its topic, then its body.
pub fn check_message(topic: &str, body: &[u8]) -> ClientResult<()> {
    check_topic(topic)?;
    check_message_body(body)
}

/// Checks a name server address.
///
/// Accepts `[scheme://]host...` and the namespaced
/// `[scheme://]MQ_INST_<id>_<id>.host...` form, on a single line.
pub fn check_name_server_addr(addr: &str) -> ClientResult<()> {
    if is_blank(addr) {
        return Err(ClientError::illegal_format("Name server address is blank."));
    }
    if !matches_endpoint(addr) && !matches_namespaced_endpoint(addr) {
        return Err(ClientError::illegal_format(
            "Name server address is illegal.",
        ));
    }
    Ok(())
}
