//! Internal API response types.

use serde::Deserialize;

use crate::error::{GcsError, GcsResult};

/// Subset of the JSON API object resource we care about.
#[derive(Debug, Deserialize)]
pub(crate) struct ObjectResource {
    /// Object size. The JSON API encodes it as a decimal string.
    #[serde(default)]
    pub size: Option<SizeField>,
}

/// `size` as either a string (GCS) or a number (some emulators).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum SizeField {
    Text(String),
    Number(u64),
}

impl SizeField {
    pub(crate) fn value(&self) -> GcsResult<u64> {
        match self {
            Self::Number(n) => Ok(*n),
            Self::Text(s) => s
                .parse()
                .map_err(|_| GcsError::invalid_response(format!("object size '{s}' is not a number"))),
        }
    }
}

impl ObjectResource {
    pub(crate) fn size(&self) -> GcsResult<Option<u64>> {
        self.size.as_ref().map(SizeField::value).transpose()
    }
}

/// Metadata server token response.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    /// Lifetime in seconds.
    #[serde(default = "default_expires_in")]
    pub expires_in: u64,
}

const fn default_expires_in() -> u64 {
    3600
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_as_string() {
        let object: ObjectResource =
            serde_json::from_str(r#"{"name":"vae/ae.safetensors","size":"335304388"}"#).unwrap();
        assert_eq!(object.size().unwrap(), Some(335_304_388));
    }

    #[test]
    fn test_size_as_number() {
        let object: ObjectResource = serde_json::from_str(r#"{"size":42}"#).unwrap();
        assert_eq!(object.size().unwrap(), Some(42));
    }

    #[test]
    fn test_missing_size() {
        let object: ObjectResource = serde_json::from_str(r#"{"name":"x"}"#).unwrap();
        assert_eq!(object.size().unwrap(), None);
    }

    #[test]
    fn test_garbage_size_is_invalid_response() {
        let object: ObjectResource = serde_json::from_str(r#"{"size":"lots"}"#).unwrap();
        assert!(matches!(
            object.size(),
            Err(GcsError::InvalidResponse { .. })
        ));
    }

    #[test]
    fn test_token_response_default_expiry() {
        let token: TokenResponse =
            serde_json::from_str(r#"{"access_token":"ya29.x","token_type":"Bearer"}"#).unwrap();
        assert_eq!(token.access_token, "ya29.x");
        assert_eq!(token.expires_in, 3600);
    }
}
