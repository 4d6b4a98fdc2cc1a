use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{BackendError, GenerateRequest, InferenceBackend};

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Gemini `generateContent` over blocking HTTP.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    agent: ureq::Agent,
    endpoint: String,
}

impl GeminiClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
            endpoint: endpoint.into(),
        }
    }

    pub fn url_for(&self, model: &str) -> String {
        format!(
            "{}/v1beta/models/{model}:generateContent",
            self.endpoint.trim_end_matches('/')
        )
    }
}

impl InferenceBackend for GeminiClient {
    fn generate(
        &self,
        api_key: &str,
        request: &GenerateRequest<'_>,
    ) -> Result<Option<String>, BackendError> {
        let url = self.url_for(request.model);
        debug!(%url, mime = request.mime_type, "posting generateContent");

        let response = self
            .agent
            .post(&url)
            .set("x-goog-api-key", api_key)
            .set("Content-Type", "application/json")
            .send_json(GenerateContentRequest::from(request));

        match response {
            Ok(response) => {
                let body = response
                    .into_string()
                    .map_err(|error| BackendError::Transport(error.to_string()))?;
                parse_response_text(&body)
            }
            Err(ureq::Error::Status(code, response)) => Err(BackendError::Status {
                code,
                body: response.into_string().unwrap_or_default(),
            }),
            Err(ureq::Error::Transport(transport)) => {
                Err(BackendError::Transport(transport.to_string()))
            }
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part<'a> {
    Inline {
        #[serde(rename = "inlineData")]
        inline_data: InlineData<'a>,
    },
    Text {
        text: &'a str,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData<'a> {
    mime_type: &'a str,
    data: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

impl<'a> From<&GenerateRequest<'a>> for GenerateContentRequest<'a> {
    fn from(request: &GenerateRequest<'a>) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![
                    Part::Inline {
                        inline_data: InlineData {
                            mime_type: request.mime_type,
                            data: request.image_data,
                        },
                    },
                    Part::Text {
                        text: request.prompt,
                    },
                ],
            }],
            system_instruction: request.system_instruction.map(|text| Content {
                parts: vec![Part::Text { text }],
            }),
            generation_config: GenerationConfig {
                temperature: request.temperature,
            },
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// Concatenated text parts of the first candidate, `None` if it carried no text.
pub(crate) fn parse_response_text(body: &str) -> Result<Option<String>, BackendError> {
    let response: GenerateContentResponse =
        serde_json::from_str(body).map_err(|error| BackendError::Decode(error.to_string()))?;
    let text = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<String>()
        })
        .filter(|text| !text.is_empty());
    Ok(text)
}
