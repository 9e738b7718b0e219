use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use hashbrown::HashMap;

use crate::error::BotError;

/// Something which can answer a chat message.
///
/// An empty reply means the message was not understood.
pub trait Responder: Send + Sync {
    fn respond(&self, message: &str) -> String;
}

impl<F> Responder for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn respond(&self, message: &str) -> String {
        (self)(message)
    }
}

/// Replies to messages which exactly match a known message.
///
/// Matching ignores case and runs of whitespace.
#[derive(Debug, Clone, Default)]
pub struct ExactMatchResponder {
    replies: HashMap<String, String>,
}

impl ExactMatchResponder {
    pub fn new(replies: HashMap<String, String>) -> Self {
        let replies = replies
            .into_iter()
            .map(|(message, reply)| (normalize(&message), reply))
            .collect();

        Self { replies }
    }

    /// Loads a JSON object of `message -> reply` pairs.
    #[instrument(name = "responses", skip_all)]
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, BotError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| BotError::ResponsesUnavailable {
            path: path.display().to_string(),
            source: e,
        })?;

        let replies: HashMap<String, String> = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| BotError::InvalidResponses {
                path: path.display().to_string(),
                source: e,
            })?;

        info!("{} canned replies loaded from {}", replies.len(), path.display());

        Ok(Self::new(replies))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.replies.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.replies.is_empty()
    }
}

impl Responder for ExactMatchResponder {
    fn respond(&self, message: &str) -> String {
        self.replies
            .get(&normalize(message))
            .cloned()
            .unwrap_or_default()
    }
}

fn normalize(message: &str) -> String {
    message
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use std::env::temp_dir;

    use super::*;

    #[test]
    fn test_exact_match_ignores_case_and_spacing() {
        let mut replies = HashMap::new();
        replies.insert("Ayam  Goreng".to_string(), "Ayam goreng ada!".to_string());
        let responder = ExactMatchResponder::new(replies);

        assert_eq!(responder.respond("ayam goreng"), "Ayam goreng ada!");
        assert_eq!(responder.respond("  AYAM\tgoreng "), "Ayam goreng ada!");
        assert_eq!(responder.respond("ayam bakar"), "");
    }

    #[test]
    fn test_closures_are_responders() {
        let responder = |message: &str| message.to_uppercase();

        assert_eq!(responder.respond("kfc"), "KFC");
    }

    #[test]
    fn test_loading_from_file() -> anyhow::Result<()> {
        let dir = temp_dir().join("kbot-chatbot-tests");
        std::fs::create_dir_all(&dir)?;

        let path = dir.join("replies.json");
        std::fs::write(&path, r#"{"halo": "Halo juga!", "menu": "unknown_menu"}"#)?;

        let responder = ExactMatchResponder::from_path(&path)?;
        assert_eq!(responder.len(), 2);
        assert_eq!(responder.respond("Halo"), "Halo juga!");

        let broken = dir.join("broken.json");
        std::fs::write(&broken, "[1, 2, 3]")?;
        assert!(matches!(
            ExactMatchResponder::from_path(&broken),
            Err(BotError::InvalidResponses { .. }),
        ));

        assert!(matches!(
            ExactMatchResponder::from_path(dir.join("missing.json")),
            Err(BotError::ResponsesUnavailable { .. }),
        ));

        Ok(())
    }
}
