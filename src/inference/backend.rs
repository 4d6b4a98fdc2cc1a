use super::BackendError;

/// One generation call: a single inline image plus its instruction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerateRequest<'a> {
    pub model: &'a str,
    /// Base64 payload without a data-URI header.
    pub image_data: &'a str,
    pub mime_type: &'a str,
    pub prompt: &'a str,
    pub system_instruction: Option<&'a str>,
    pub temperature: f32,
}

/// Remote model endpoint. Returns `Ok(None)` when the model produced no text.
pub trait InferenceBackend: Send + Sync {
    fn generate(
        &self,
        api_key: &str,
        request: &GenerateRequest<'_>,
    ) -> Result<Option<String>, BackendError>;
}
