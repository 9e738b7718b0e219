use once_cell::sync::Lazy;
use rand::seq::SliceRandom;
use regex::Regex;

use crate::responder::Responder;

/// The reply a responder gives when the user asks about a menu item
/// that doesn't exist.
pub const UNKNOWN_MENU: &str = "unknown_menu";

pub static UNKNOWN_RESPONSES: &[&str] = &[
    "Mohon maaf, saya tidak memahami pesan anda.",
    "Maaf, saya tidak mengerti apa yang Anda maksud.",
    "Saya tidak yakin apa yang Anda coba katakan. Bisakah Anda ulangi?",
    "Maaf, saya masih belajar. Bisakah Anda menggambarkan itu dengan cara lain?",
];

/// Templates for an unknown menu item, `{}` is replaced with the item.
pub static MENU_NOT_FOUND_RESPONSES: &[&str] = &[
    "Maaf, menu {} tidak ada di menu kami.",
    "Mohon maaf, kami tidak menyediakan menu {}.",
    "Menu {}? Maaf, itu tidak tersedia di menu kami.",
];

static MENU_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"menu (.+)",
        r"apa itu (.+)",
        r"apa sih (.+)",
        r"bagaimana dengan menu (.+)",
        r"apa yang anda tahu tentang (.+)",
        r"bisakah anda memberi tahu saya tentang (.+)",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("compile menu pattern"))
    .collect()
});

/// Wraps a responder with the fallbacks used when it can't answer.
pub struct Bot<R> {
    responder: R,
}

impl<R: Responder> Bot<R> {
    pub fn new(responder: R) -> Self {
        Self { responder }
    }

    #[inline]
    pub fn responder(&self) -> &R {
        &self.responder
    }

    /// Gets the reply for the given (already corrected) message.
    ///
    /// If the responder has no answer one of the generic unknown replies
    /// is picked at random. If it reports an unknown menu item the item is
    /// pulled out of the message and named in the reply.
    pub fn get_response(&self, message: &str) -> String {
        let response = self.responder.respond(message);

        if response == UNKNOWN_MENU {
            return unknown_menu_reply(message);
        }

        if response.is_empty() {
            return pick(UNKNOWN_RESPONSES).to_string();
        }

        response
    }
}

fn unknown_menu_reply(message: &str) -> String {
    for pattern in MENU_PATTERNS.iter() {
        let item = pattern
            .captures(message)
            .and_then(|captures| captures.get(1))
            .map(|m| m.as_str());

        if let Some(item) = item {
            let item = item.strip_suffix(" itu").unwrap_or(item);
            debug!("no menu named {:?}", item);

            return pick(MENU_NOT_FOUND_RESPONSES).replace("{}", item);
        }
    }

    pick(UNKNOWN_RESPONSES).to_string()
}

fn pick(options: &[&'static str]) -> &'static str {
    options
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or_default()
}

/// Formats a reply for display, `^` marks a line break.
pub fn render_reply(reply: &str) -> String {
    reply
        .split_whitespace()
        .map(|word| if word == "^" { "<br>" } else { word })
        .collect::<Vec<&str>>()
        .join(" ")
}
