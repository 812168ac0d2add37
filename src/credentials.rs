use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use thiserror::Error;

/// Username/password pair recovered from a `Basic` Authorization header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Ways the Authorization header can fail to yield credentials.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The header is absent, or names a scheme other than `basic`. Another
    /// strategy registered on the host may still match the request.
    #[error("missing basic credentials")]
    MissingCredentials,
    /// The header is addressed to this strategy but does not follow the
    /// `Basic <base64(username:password)>` format.
    #[error("malformed authorization header: {0}")]
    Malformed(&'static str),
    /// The username decoded to the empty string and the strategy does not
    /// allow that.
    #[error("empty username")]
    EmptyUsername,
}

/// Extract credentials from the raw Authorization header value.
///
/// Pure and idempotent: the same header always yields the same credentials or
/// the same error. The payload splits at the first `:` only, so passwords may
/// themselves contain colons.
pub fn parse(header: Option<&str>, allow_empty_username: bool) -> Result<Credentials, ParseError> {
    let header = header.ok_or(ParseError::MissingCredentials)?;

    let (scheme, payload) = header
        .split_once(char::is_whitespace)
        .ok_or(ParseError::Malformed("expected '<scheme> <credentials>'"))?;

    if !scheme.eq_ignore_ascii_case("basic") {
        return Err(ParseError::MissingCredentials);
    }

    let decoded = BASE64
        .decode(payload.trim())
        .map_err(|_| ParseError::Malformed("credentials are not valid base64"))?;
    let decoded = String::from_utf8(decoded)
        .map_err(|_| ParseError::Malformed("credentials are not valid utf-8"))?;

    let (username, password) = decoded
        .split_once(':')
        .ok_or(ParseError::Malformed("expected 'username:password'"))?;

    if username.is_empty() && !allow_empty_username {
        return Err(ParseError::EmptyUsername);
    }

    Ok(Credentials {
        username: username.to_string(),
        password: password.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(username: &str, password: &str) -> String {
        format!("Basic {}", BASE64.encode(format!("{username}:{password}")))
    }

    #[test]
    fn round_trips_username_and_password() {
        let header = encode("john", "123:45");
        let credentials = parse(Some(&header), false).expect("credentials");
        assert_eq!(credentials.username, "john");
        // Only the first colon splits; the rest stays in the password.
        assert_eq!(credentials.password, "123:45");
    }

    #[test]
    fn scheme_is_case_insensitive() {
        let payload = BASE64.encode("john:secret");
        for scheme in ["basic", "Basic", "BASIC", "bAsIc"] {
            let header = format!("{scheme} {payload}");
            assert!(parse(Some(&header), false).is_ok());
        }
    }

    #[test]
    fn absent_header_is_missing_credentials() {
        assert_eq!(parse(None, false), Err(ParseError::MissingCredentials));
    }

    #[test]
    fn foreign_scheme_is_missing_credentials() {
        assert_eq!(
            parse(Some("Steve something"), false),
            Err(ParseError::MissingCredentials)
        );
        assert_eq!(
            parse(Some("Bearer abc.def"), false),
            Err(ParseError::MissingCredentials)
        );
    }

    #[test]
    fn header_without_whitespace_is_malformed() {
        assert!(matches!(
            parse(Some("basic"), false),
            Err(ParseError::Malformed(_))
        ));
    }

    #[test]
    fn invalid_base64_is_malformed() {
        assert!(matches!(
            parse(Some("basic 123"), false),
            Err(ParseError::Malformed(_))
        ));
        assert!(matches!(
            parse(Some("basic !!!"), false),
            Err(ParseError::Malformed(_))
        ));
    }

    #[test]
    fn payload_without_colon_is_malformed() {
        let header = format!("basic {}", BASE64.encode("johnsecret"));
        assert!(matches!(
            parse(Some(&header), false),
            Err(ParseError::Malformed(_))
        ));
    }

    #[test]
    fn non_utf8_payload_is_malformed() {
        let header = format!("basic {}", BASE64.encode([0xff, 0xfe, b':', b'x']));
        assert!(matches!(
            parse(Some(&header), false),
            Err(ParseError::Malformed(_))
        ));
    }

    #[test]
    fn empty_username_rejected_unless_allowed() {
        let header = encode("", "abcd");
        assert_eq!(parse(Some(&header), false), Err(ParseError::EmptyUsername));

        let credentials = parse(Some(&header), true).expect("credentials");
        assert_eq!(credentials.username, "");
        assert_eq!(credentials.password, "abcd");
    }

    #[test]
    fn parsing_is_idempotent() {
        let header = encode("john", "123:45");
        assert_eq!(parse(Some(&header), false), parse(Some(&header), false));
        assert_eq!(parse(Some("basic 123"), false), parse(Some("basic 123"), false));
        assert_eq!(parse(None, false), parse(None, false));
    }
}
