//! Prompt construction and reply parsing for AI review summarisation.
//!
//! Each batch of reviews is sent as one prompt. The model is asked for a
//! JSON array with one `{id, summary, tags}` object per review.

use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// Reviews per prompt.
pub const BATCH_SIZE: i64 = 10;

/// Batches processed per invocation of the analysis job.
pub const MAX_BATCHES: usize = 5;

/// Maximum number of tags kept per review.
pub const MAX_TAGS: usize = 5;

/// The subset of a review sent to the model.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewInput<'a> {
    pub id: DbId,
    pub rating: f64,
    pub title: Option<&'a str>,
    pub body: &'a str,
}

/// One element of the model's reply.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReviewAnalysis {
    pub id: DbId,
    pub summary: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ReplyParseError {
    #[error("reply contains no JSON array")]
    NoArray,
    #[error("reply JSON is malformed: {0}")]
    Malformed(String),
}

/// Build the summarisation prompt for a batch.
pub fn build_prompt(reviews: &[ReviewInput<'_>]) -> String {
    let payload = serde_json::to_string(reviews).unwrap_or_else(|_| "[]".to_string());
    format!(
        "You are analysing apparel customer reviews. Reviews may be in any language.\n\
         For each review return an object with:\n\
         - \"id\": the review id, unchanged\n\
         - \"summary\": a one-sentence English summary\n\
         - \"tags\": up to {MAX_TAGS} short English topic tags in Title Case \
         (for example \"Fit\", \"Color\", \"Fabric\", \"Sizing\", \"Quality\")\n\
         Respond with a JSON array only, no prose.\n\n\
         Reviews:\n{payload}"
    )
}

/// Parse the model reply into per-review analyses.
///
/// Markdown code fences and text around the outermost array are ignored.
/// Entries with a blank summary are dropped; tags are trimmed,
/// de-duplicated and capped at [`MAX_TAGS`].
pub fn parse_reply(text: &str) -> Result<Vec<ReviewAnalysis>, ReplyParseError> {
    let start = text.find('[').ok_or(ReplyParseError::NoArray)?;
    let end = text.rfind(']').ok_or(ReplyParseError::NoArray)?;
    if end < start {
        return Err(ReplyParseError::NoArray);
    }

    let raw: Vec<ReviewAnalysis> = serde_json::from_str(&text[start..=end])
        .map_err(|e| ReplyParseError::Malformed(e.to_string()))?;

    Ok(raw
        .into_iter()
        .filter(|a| !a.summary.trim().is_empty())
        .map(|mut a| {
            a.summary = a.summary.trim().to_string();
            let mut tags: Vec<String> = Vec::new();
            for tag in a.tags.iter().map(|t| t.trim()).filter(|t| !t.is_empty()) {
                if !tags.iter().any(|t| t.eq_ignore_ascii_case(tag)) {
                    tags.push(tag.to_string());
                }
            }
            tags.truncate(MAX_TAGS);
            a.tags = tags;
            a
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_review_payload() {
        let reviews = [ReviewInput {
            id: 7,
            rating: 4.0,
            title: Some("Nice"),
            body: "Fits well",
        }];
        let prompt = build_prompt(&reviews);
        assert!(prompt.contains("\"id\":7"));
        assert!(prompt.contains("Fits well"));
        assert!(prompt.contains("JSON array only"));
    }

    #[test]
    fn fenced_reply_parsed() {
        let reply = "```json\n[{\"id\": 1, \"summary\": \" Runs small. \", \"tags\": [\"Fit\", \"Sizing\"]}]\n```";
        let parsed = parse_reply(reply).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].id, 1);
        assert_eq!(parsed[0].summary, "Runs small.");
        assert_eq!(parsed[0].tags, vec!["Fit", "Sizing"]);
    }

    #[test]
    fn object_reply_rejected() {
        assert_eq!(
            parse_reply("{\"id\": 1, \"summary\": \"x\"}"),
            Err(ReplyParseError::NoArray)
        );
    }

    #[test]
    fn malformed_array_rejected() {
        assert!(matches!(
            parse_reply("[{\"id\": \"not a number\"}]"),
            Err(ReplyParseError::Malformed(_))
        ));
    }

    #[test]
    fn blank_summaries_dropped_and_tags_cleaned() {
        let reply = r#"[
            {"id": 1, "summary": "   ", "tags": ["Fit"]},
            {"id": 2, "summary": "Great color", "tags": ["Color", "color", " ", "A", "B", "C", "D", "E"]}
        ]"#;
        let parsed = parse_reply(reply).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].id, 2);
        assert_eq!(parsed[0].tags, vec!["Color", "A", "B", "C", "D"]);
    }

    #[test]
    fn missing_tags_default_to_empty() {
        let parsed = parse_reply("[{\"id\": 3, \"summary\": \"ok\"}]").unwrap();
        assert!(parsed[0].tags.is_empty());
    }
}
