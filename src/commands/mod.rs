mod ask;
mod config;
mod dataset;

use crate::state::Context;

/// Discord's hard limit is 2000 chars; leave headroom.
const MAX_CHUNK: usize = 1990;

/// Fitbot - fitness questions answered from the exercise dataset
#[poise::command(
    slash_command,
    subcommands("ask::ask", "dataset::dataset", "config::config")
)]
pub async fn fitbot(_ctx: Context<'_>) -> Result<(), anyhow::Error> {
    Ok(())
}

/// Split text into Discord-safe chunks, preferring line then word boundaries.
pub(crate) fn chunk_message(text: &str) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut remaining = text;
    while !remaining.is_empty() {
        let mut chunk_len = remaining.len().min(MAX_CHUNK);
        while !remaining.is_char_boundary(chunk_len) {
            chunk_len -= 1;
        }
        let split_at = if chunk_len < remaining.len() {
            remaining[..chunk_len]
                .rfind('\n')
                .or_else(|| remaining[..chunk_len].rfind(' '))
                .map(|i| i + 1)
                .unwrap_or(chunk_len)
        } else {
            chunk_len
        };
        chunks.push(&remaining[..split_at]);
        remaining = &remaining[split_at..];
    }
    chunks
}

/// Send a message in chunks. Uses ctx.say() for all chunks so follow-ups go
/// through the interaction webhook.
pub(crate) async fn send_chunked(ctx: &Context<'_>, text: &str) -> Result<(), anyhow::Error> {
    for chunk in chunk_message(text) {
        ctx.say(chunk).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_message_single_chunk() {
        assert_eq!(chunk_message("hello"), vec!["hello"]);
        assert!(chunk_message("").is_empty());
    }

    #[test]
    fn test_splits_on_newline() {
        let line = "a".repeat(1500);
        let text = format!("{line}\n{line}\n");
        let chunks = chunk_message(&text);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0], format!("{line}\n"));
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn test_hard_split_respects_char_boundaries() {
        let text = "é".repeat(2000);
        let chunks = chunk_message(&text);
        assert!(chunks.iter().all(|c| c.len() <= MAX_CHUNK));
        assert_eq!(chunks.concat(), text);
    }
}
