//! Display and file names for schema identifiers

use std::sync::OnceLock;

use regex::Regex;

/// `xYz...`: a capitalized run preceded by any character
fn capitalized_run() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(.)([A-Z][a-z]+)").expect("valid regex"))
}

/// `xY`: lower-case letter or digit followed by a capital
fn lower_upper_boundary() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([a-z0-9])([A-Z])").expect("valid regex"))
}

/// `get_full_user` / `getFullUser` -> `GetFullUser`
///
/// A lower-case letter following `_` is upper-cased, the first character is
/// forced to upper case and any other `_` after it is dropped.
pub fn class_name(name: &str) -> String {
    let mut joined = String::with_capacity(name.len());
    let mut chars = name.chars().peekable();
    while let Some(c) = chars.next() {
        match chars.peek() {
            Some(&next) if c == '_' && next.is_ascii_lowercase() => {
                joined.push(next.to_ascii_uppercase());
                chars.next();
            }
            _ => joined.push(c),
        }
    }

    let mut rest = joined.chars();
    match rest.next() {
        Some(first) => first
            .to_uppercase()
            .chain(rest.filter(|&c| c != '_'))
            .collect(),
        None => String::new(),
    }
}

/// `GetFullUser` -> `get_full_user`
pub fn file_name(name: &str) -> String {
    let split = capitalized_run().replace_all(name, "${1}_${2}");
    lower_upper_boundary()
        .replace_all(&split, "${1}_${2}")
        .to_lowercase()
}

/// `GetFullUser` -> `get_full_user.html`
pub fn html_file_name(name: &str) -> String {
    let mut name = file_name(name);
    name.push_str(".html");
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_name() {
        assert_eq!(class_name("get_full_user"), "GetFullUser");
        assert_eq!(class_name("getFullUser"), "GetFullUser");
        assert_eq!(class_name("resolved_peer"), "ResolvedPeer");
        assert_eq!(class_name("ResolvedPeer"), "ResolvedPeer");
        assert_eq!(class_name("get__x"), "GetX");
        assert_eq!(class_name("_abc"), "Abc");
        // only the underscore in first position survives
        assert_eq!(class_name("_1a"), "_1a");
        assert_eq!(class_name("_1_2"), "_12");
    }

    #[test]
    fn test_file_name() {
        assert_eq!(file_name("GetFullUser"), "get_full_user");
        assert_eq!(html_file_name("GetFullUser"), "get_full_user.html");
        assert_eq!(file_name("getFullUser"), "get_full_user");
        assert_eq!(file_name("resolve_username"), "resolve_username");
        assert_eq!(file_name("inputPeerEmpty"), "input_peer_empty");
    }

    #[test]
    fn test_file_name_consecutive_capitals() {
        assert_eq!(file_name("HTTPWait"), "http_wait");
        assert_eq!(file_name("inputMediaGeoPoint"), "input_media_geo_point");
        assert_eq!(file_name("updateNewMessageID"), "update_new_message_id");
        assert_eq!(file_name("JSONValue"), "json_value");
        assert_eq!(file_name("int128"), "int128");
    }
}
