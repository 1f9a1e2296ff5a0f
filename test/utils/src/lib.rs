use serde_json::json;

/// A successful `generateContent` payload with a single candidate.
pub fn candidates_fixture(text: &str) -> String {
    return json!({
        "candidates": [{
            "content": {
                "parts": [{ "text": text }],
                "role": "model"
            },
            "finishReason": "STOP",
            "index": 0
        }],
        "modelVersion": "gemini-2.5-flash"
    })
    .to_string();
}

/// The error envelope Google APIs return alongside non-success statuses.
pub fn provider_error_fixture(code: u16, message: &str) -> String {
    return json!({
        "error": {
            "code": code,
            "message": message,
            "status": "INTERNAL"
        }
    })
    .to_string();
}

pub fn selection_fixture() -> &'static str {
    return r#"
Photosynthesis is the process by which green plants and some other organisms use sunlight to
synthesize foods from carbon dioxide and water. Photosynthesis in plants generally involves the
green pigment chlorophyll and generates oxygen as a byproduct.
"#
    .trim();
}
