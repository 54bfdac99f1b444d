use serde::{Deserialize, Serialize};

// ------------------------
// Types sent to the server
// ------------------------

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
struct Part {
    text: String,
}

// ------------------------------
// Types received from the server
// ------------------------------

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
pub struct GenerateContentResponse {
    pub candidates: Option<Vec<Candidate>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
pub struct CandidateContent {
    pub parts: Option<Vec<CandidatePart>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
pub struct CandidatePart {
    pub text: Option<String>,
}

// -----------
// Conversions
// -----------

#[inline]
pub fn create_request(prompt: &str) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            parts: vec![Part {
                text: prompt.to_owned(),
            }],
        }],
    }
}

/// Pulls the first candidate's first text part out of a response.
///
/// A present-but-empty text counts as no text, so the provider reports
/// it the same way as a missing part.
#[inline]
pub fn extract_text(resp: GenerateContentResponse) -> Option<String> {
    resp.candidates?
        .into_iter()
        .next()?
        .content?
        .parts?
        .into_iter()
        .next()?
        .text
        .filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_create_request() {
        let request = create_request("Hello");
        let serialized = serde_json::to_value(&request).unwrap();
        assert_eq!(
            serialized,
            json!({
                "contents": [{ "parts": [{ "text": "Hello" }] }]
            })
        );
    }

    #[test]
    fn test_extract_text() {
        let resp: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "text": "First part." },
                        { "text": "Second part." }
                    ],
                    "role": "model"
                },
                "finishReason": "STOP"
            }]
        }))
        .unwrap();
        assert_eq!(extract_text(resp).as_deref(), Some("First part."));
    }

    #[test]
    fn test_extract_text_malformed() {
        let payloads = [
            json!({}),
            json!({ "candidates": [] }),
            json!({ "candidates": [{}] }),
            json!({ "candidates": [{ "content": {} }] }),
            json!({ "candidates": [{ "content": { "parts": [] } }] }),
            json!({ "candidates": [{ "content": { "parts": [{}] } }] }),
            json!({
                "candidates": [{ "content": { "parts": [{ "text": "" }] } }]
            }),
        ];
        for payload in payloads {
            let resp: GenerateContentResponse =
                serde_json::from_value(payload.clone()).unwrap();
            assert_eq!(extract_text(resp), None, "payload: {payload}");
        }
    }
}
