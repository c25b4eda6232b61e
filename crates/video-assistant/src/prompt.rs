//! Prompt construction for the two assistant surfaces.
//!
//! Both prompts instruct the model to answer with the same two-field JSON
//! object so the response parser is shared.

use video_core::types::{Comment, MediaItem};

const JSON_INSTRUCTION: &str = r#"Format the output as JSON:
{
  "response": "string",
  "tags": ["tag1", "tag2", "tag3"]
}"#;

/// Community-manager prompt over the visible comment thread.
pub fn comment_analysis(comments: &[Comment], query: &str) -> String {
    let comments_text = comments
        .iter()
        .map(|c| format!("{}: {} (Likes: {})", c.author_name, c.text, c.likes))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are an AI community manager for a video platform.\n\
         Here are the comments from a video:\n\
         {comments_text}\n\n\
         User Query/Task: {query}\n\n\
         Please provide a concise response answering the query based on the \
         comments provided.\n\
         Also, suggest 3 short, relevant follow-up query tags (max 3 words \
         each) for the user to click next.\n\n\
         {JSON_INSTRUCTION}"
    )
}

/// Video-assistant prompt over the watched video's metadata.
pub fn video_chat(video: &MediaItem, query: &str) -> String {
    format!(
        "You are a helpful video assistant.\n\
         Video Title: {title}\n\
         Video Description: {description}\n\
         Channel: {channel}\n\
         Category: {category}\n\n\
         User Question: {query}\n\n\
         Answer the user's question based on the metadata provided above. \
         Keep it helpful and concise.\n\
         Also, suggest 3 short, relevant follow-up questions or tags \
         regarding this video.\n\n\
         {JSON_INSTRUCTION}",
        title = video.title,
        description = video.description,
        channel = video.channel_name,
        category = video.category,
    )
}
