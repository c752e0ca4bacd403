use crate::error::UpstreamError;
use crate::services::openai::{CompletionMessage, OpenAiClient};

const PREVIEW_CHARS: usize = 50;

pub const SYSTEM_PROMPT: &str = "Είσαι ο Autoanosis Assistant, ένας εξειδικευμένος βοηθός υγείας στα ελληνικά.

Παρέχεις:
- Ακριβείς και επιστημονικά τεκμηριωμένες πληροφορίες υγείας
- Φιλικές και κατανοητές απαντήσεις
- Υποστήριξη σε θέματα υγείας, φαρμάκων, συμπτωμάτων

Σημαντικό:
- ΔΕΝ αντικαθιστάς ιατρική συμβουλή
- Συνιστάς πάντα επίσκεψη σε γιατρό για σοβαρά θέματα
- Απαντάς στα ελληνικά";

pub fn build_messages(user_msg: &str) -> Vec<CompletionMessage> {
    vec![
        CompletionMessage::system(SYSTEM_PROMPT),
        CompletionMessage::user(user_msg),
    ]
}

/// First few characters of `text`, for log lines.
pub fn preview(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}

pub async fn generate_reply(client: &OpenAiClient, user_msg: &str) -> Result<String, UpstreamError> {
    tracing::info!(model = client.model(), message = %preview(user_msg), "processing chat request");

    let reply = client.complete(&build_messages(user_msg)).await?;

    tracing::info!(reply = %preview(&reply), "generated response");
    Ok(reply)
}
