//! Response-document parsing

use quick_xml::events::Event;
use quick_xml::Reader;

/// Fields the notifier API may return for a created notice.
///
/// Presence is explicit: `id` and `url` are optional rather than probed
/// dynamically on a loose document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoticeResponse {
    pub id: Option<String>,
    pub url: Option<String>,
}

impl NoticeResponse {
    /// Leniently extract `id`/`url` from a response body.
    ///
    /// Accepts both wrapped (`<notice><id>..</id></notice>`) and bare
    /// (`<id>..</id>`) forms. Malformed or unrelated documents yield empty
    /// fields rather than an error; the transport treats that as "no id
    /// returned".
    pub fn parse(body: &str) -> Self {
        let mut reader = Reader::from_str(body);
        reader.config_mut().trim_text(true);

        let mut response = NoticeResponse::default();
        let mut current: Option<&'static str> = None;
        loop {
            match reader.read_event() {
                Ok(Event::Start(start)) => {
                    current = match start.local_name().as_ref() {
                        b"id" => Some("id"),
                        b"url" => Some("url"),
                        _ => None,
                    };
                }
                Ok(Event::Text(text)) => {
                    if let (Some(field), Ok(value)) = (current, text.unescape()) {
                        let value = value.into_owned();
                        match field {
                            "id" if response.id.is_none() => response.id = Some(value),
                            "url" if response.url.is_none() => response.url = Some(value),
                            _ => {}
                        }
                    }
                }
                Ok(Event::End(_)) => current = None,
                Ok(Event::Eof) | Err(_) => break,
                Ok(_) => {}
            }
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_id() {
        let response = NoticeResponse::parse("<id>42</id>");
        assert_eq!(response.id.as_deref(), Some("42"));
        assert_eq!(response.url, None);
    }

    #[test]
    fn test_parse_wrapped_notice() {
        let body = "<notice><id>42</id><url>https://airbrake.io/errors/42</url></notice>";
        let response = NoticeResponse::parse(body);
        assert_eq!(response.id.as_deref(), Some("42"));
        assert_eq!(response.url.as_deref(), Some("https://airbrake.io/errors/42"));
    }

    #[test]
    fn test_parse_malformed_body_yields_no_id() {
        assert_eq!(NoticeResponse::parse("<<<not-xml"), NoticeResponse::default());
        assert_eq!(NoticeResponse::parse(""), NoticeResponse::default());
        assert_eq!(
            NoticeResponse::parse("plain text error page"),
            NoticeResponse::default()
        );
    }

    #[test]
    fn test_parse_keeps_first_occurrence() {
        let response = NoticeResponse::parse("<notice><id>1</id><id>2</id></notice>");
        assert_eq!(response.id.as_deref(), Some("1"));
    }

    #[test]
    fn test_parse_unescapes_values() {
        let response = NoticeResponse::parse("<url>https://airbrake.io/?a=1&amp;b=2</url>");
        assert_eq!(response.url.as_deref(), Some("https://airbrake.io/?a=1&b=2"));
    }
}
