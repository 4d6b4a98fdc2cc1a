use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

/// Image subtypes whose data-URI header is recognised and stripped before upload.
pub const SUPPORTED_DATA_URI_SUBTYPES: &[&str] = &["png", "jpeg", "jpg", "webp", "heic"];

/// Encoded image held in memory. `data` is the bare base64 payload for assets
/// built here; one received from elsewhere may still carry a data-URI header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAsset {
    pub data: String,
    pub mime_type: String,
}

impl ImageAsset {
    pub fn from_bytes(bytes: &[u8], mime_type: impl Into<String>) -> Self {
        Self {
            data: STANDARD.encode(bytes),
            mime_type: mime_type.into(),
        }
    }

    /// Base64 payload with any recognised data-URI header removed.
    pub fn payload(&self) -> &str {
        strip_data_uri_prefix(&self.data)
    }

    /// `data:<mime>;base64,<payload>` form of the asset.
    pub fn data_uri(&self) -> String {
        if self.data.starts_with("data:") {
            return self.data.clone();
        }
        with_data_uri_prefix(&self.mime_type, &self.data)
    }

    pub fn decode_bytes(&self) -> Result<Vec<u8>, base64::DecodeError> {
        let payload = self
            .data
            .split_once(";base64,")
            .map(|(_, payload)| payload)
            .unwrap_or(&self.data);
        STANDARD.decode(payload)
    }

    pub fn is_empty(&self) -> bool {
        self.payload().is_empty()
    }
}

/// Removes a `data:image/<subtype>;base64,` header for the supported subtypes.
/// Anything else is returned unchanged.
pub fn strip_data_uri_prefix(data: &str) -> &str {
    let Some(rest) = data.strip_prefix("data:image/") else {
        return data;
    };
    SUPPORTED_DATA_URI_SUBTYPES
        .iter()
        .find_map(|subtype| {
            rest.strip_prefix(subtype)
                .and_then(|tail| tail.strip_prefix(";base64,"))
        })
        .unwrap_or(data)
}

pub fn with_data_uri_prefix(mime_type: &str, payload: &str) -> String {
    format!("data:{mime_type};base64,{payload}")
}
