// Response decoding: raw body bytes into one of the typed shapes in
// `models`. No semantic validation happens here.

use serde::de::DeserializeOwned;

use crate::error::Error;

/// Longest body excerpt carried in a decode error message.
const PREVIEW_CHARS: usize = 200;

/// Decode a JSON body into `T`.
pub fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, Error> {
    serde_json::from_slice(body).map_err(|e| {
        let body = String::from_utf8_lossy(body).into_owned();
        let preview: String = body.chars().take(PREVIEW_CHARS).collect();
        Error::Decode {
            message: format!("{e} (body preview: {preview:?})"),
            body,
        }
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::{ControllerInfo, Page, Site};

    #[test]
    fn decodes_info() {
        let info: ControllerInfo = decode(br#"{"applicationVersion":"9.0.114"}"#).unwrap();
        assert_eq!(info.application_version, "9.0.114");
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let page: Page<Site> = decode(
            br#"{"offset":0,"limit":25,"count":1,"totalCount":1,
                 "data":[{"id":"s1","name":"Main","internalReference":"default"}],
                 "extra":true}"#,
        )
        .unwrap();
        assert_eq!(page.data[0].name, "Main");
    }

    #[test]
    fn malformed_json_keeps_the_body() {
        let err = decode::<ControllerInfo>(b"<html>gateway timeout</html>").unwrap_err();
        match err {
            Error::Decode { message, body } => {
                assert_eq!(body, "<html>gateway timeout</html>");
                assert!(message.contains("body preview"), "{message}");
            }
            other => panic!("expected Decode error, got: {other:?}"),
        }
    }

    #[test]
    fn wrong_shape_is_a_decode_error() {
        let result = decode::<Page<Site>>(br#"{"data":{"id":"s1"}}"#);
        assert!(matches!(result, Err(Error::Decode { .. })));
    }
}
