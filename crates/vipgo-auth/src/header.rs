//! `Authorization` header parsing
//!
//! Format: `VIP-MACHINE-TOKEN <token>`

use crate::error::AuthError;

/// The only recognized authorization mechanism. Matched case-sensitively.
pub const MACHINE_TOKEN_MECHANISM: &str = "VIP-MACHINE-TOKEN";

/// Mechanism and token split out of a raw header value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedAuthorization<'a> {
    pub mechanism: &'a str,
    pub token: &'a str,
}

impl ParsedAuthorization<'_> {
    /// Whether the mechanism is exactly [`MACHINE_TOKEN_MECHANISM`]
    pub fn is_machine_token(&self) -> bool {
        self.mechanism == MACHINE_TOKEN_MECHANISM
    }
}

/// Split a raw header value into mechanism and token.
///
/// Surrounding whitespace is ignored and the two segments may be separated
/// by any run of whitespace. Anything other than exactly two segments is
/// rejected.
pub fn parse_header(raw: &str) -> Result<ParsedAuthorization<'_>, AuthError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(AuthError::MissingAuthHeader);
    }

    let (mechanism, rest) = raw
        .split_once(char::is_whitespace)
        .ok_or(AuthError::InvalidAuthHeader)?;
    let token = rest.trim_start();

    if token.is_empty() || token.contains(char::is_whitespace) {
        return Err(AuthError::InvalidAuthHeader);
    }

    Ok(ParsedAuthorization { mechanism, token })
}

/// Build the header value a trusted caller sends for `token`
pub fn format_header(token: &str) -> String {
    format!("{MACHINE_TOKEN_MECHANISM} {token}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_auth_header() {
        let parsed = parse_header("VIP-MACHINE-TOKEN abc123").unwrap();
        assert_eq!(parsed.mechanism, "VIP-MACHINE-TOKEN");
        assert_eq!(parsed.token, "abc123");
        assert!(parsed.is_machine_token());
    }

    #[test]
    fn test_parse_collapses_whitespace() {
        let parsed = parse_header("  VIP-MACHINE-TOKEN \t abc123  ").unwrap();
        assert_eq!(parsed.mechanism, "VIP-MACHINE-TOKEN");
        assert_eq!(parsed.token, "abc123");
    }

    #[test]
    fn test_parse_other_mechanism() {
        // Parsing is structural only; the verifier rejects the mechanism.
        let parsed = parse_header("Basic abc123").unwrap();
        assert_eq!(parsed.mechanism, "Basic");
        assert!(!parsed.is_machine_token());

        let parsed = parse_header("vip-machine-token abc123").unwrap();
        assert!(!parsed.is_machine_token());
    }

    #[test]
    fn test_parse_invalid_auth_header() {
        assert_eq!(parse_header("").unwrap_err(), AuthError::MissingAuthHeader);
        assert_eq!(parse_header("   ").unwrap_err(), AuthError::MissingAuthHeader);

        // Missing token
        assert_eq!(
            parse_header("VIP-MACHINE-TOKEN").unwrap_err(),
            AuthError::InvalidAuthHeader
        );
        assert_eq!(
            parse_header("VIP-MACHINE-TOKEN   ").unwrap_err(),
            AuthError::InvalidAuthHeader
        );

        // Too many segments
        assert_eq!(
            parse_header("VIP-MACHINE-TOKEN abc 123").unwrap_err(),
            AuthError::InvalidAuthHeader
        );
    }

    #[test]
    fn test_format_header() {
        let header = format_header("abc123");
        assert_eq!(header, "VIP-MACHINE-TOKEN abc123");
        assert_eq!(parse_header(&header).unwrap().token, "abc123");
    }
}
