//! Extraction prompt and JSON schema sent with every extract request.

use serde_json::{json, Value};

/// Natural-language instruction that accompanies the schema.
pub const EXTRACTION_PROMPT: &str = "Extract all user information including username, bio, \
post type (question/answer), timestamp, upvotes, and any links from the forum posts on this \
page. Focus on identifying potential leads who are asking questions or providing answers \
related to the topic.";

/// JSON Schema describing `{ "interactions": [UserInteraction] }`.
///
/// Field names match [`leadgen_core::UserInteraction`]'s wire names.
#[must_use]
pub fn interaction_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "interactions": {
                "type": "array",
                "description": "List of all user interactions (questions and answers) on the page",
                "items": {
                    "type": "object",
                    "properties": {
                        "username": {
                            "type": "string",
                            "description": "The username of the user who posted the question or answer"
                        },
                        "bio": {
                            "type": "string",
                            "description": "The bio or description of the user"
                        },
                        "post_type": {
                            "type": "string",
                            "enum": ["question", "answer"],
                            "description": "The type of post, either 'question' or 'answer'"
                        },
                        "timestamp": {
                            "type": "string",
                            "description": "When the question or answer was posted"
                        },
                        "upvotes": {
                            "type": "integer",
                            "minimum": 0,
                            "default": 0,
                            "description": "Number of upvotes received"
                        },
                        "links": {
                            "type": "array",
                            "items": { "type": "string" },
                            "description": "Any links included in the post"
                        }
                    },
                    "required": ["username", "bio", "post_type", "timestamp"]
                }
            }
        },
        "required": ["interactions"]
    })
}
