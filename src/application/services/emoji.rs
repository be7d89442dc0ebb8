//! Inline emoji rendering for names and status text.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::{Captures, Regex};

/// Glyph shown in place of a custom server emoji.
pub const CUSTOM_EMOJI_GLYPH: &str = "◆";

const SHORTCODES: &[(&str, &str)] = &[
    ("smile", "😄"),
    ("grin", "😁"),
    ("joy", "😂"),
    ("slight_smile", "🙂"),
    ("wink", "😉"),
    ("blush", "😊"),
    ("heart_eyes", "😍"),
    ("thinking", "🤔"),
    ("sunglasses", "😎"),
    ("sob", "😭"),
    ("cry", "😢"),
    ("rage", "😡"),
    ("sleeping", "😴"),
    ("skull", "💀"),
    ("eyes", "👀"),
    ("wave", "👋"),
    ("thumbsup", "👍"),
    ("+1", "👍"),
    ("thumbsdown", "👎"),
    ("-1", "👎"),
    ("clap", "👏"),
    ("pray", "🙏"),
    ("muscle", "💪"),
    ("heart", "❤️"),
    ("broken_heart", "💔"),
    ("fire", "🔥"),
    ("sparkles", "✨"),
    ("star", "⭐"),
    ("zap", "⚡"),
    ("tada", "🎉"),
    ("rocket", "🚀"),
    ("coffee", "☕"),
    ("pizza", "🍕"),
    ("computer", "💻"),
    ("video_game", "🎮"),
    ("headphones", "🎧"),
    ("musical_note", "🎵"),
    ("books", "📚"),
    ("crab", "🦀"),
    ("cat", "🐱"),
    ("dog", "🐶"),
    ("moon", "🌙"),
    ("sunny", "☀️"),
    ("rainbow", "🌈"),
    ("check", "✅"),
    ("x", "❌"),
    ("warning", "⚠️"),
    ("zzz", "💤"),
];

fn shortcode_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r":([A-Za-z0-9_+\-]+):").expect("Invalid regex"))
}

fn custom_emoji_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9A-HJKMNP-TV-Z]{26}$").expect("Invalid regex"))
}

/// Looks up the unicode emoji for a shortcode.
#[must_use]
pub fn lookup_shortcode(name: &str) -> Option<&'static str> {
    SHORTCODES
        .iter()
        .find(|(code, _)| *code == name)
        .map(|(_, emoji)| *emoji)
}

/// Replaces `:shortcode:` sequences with emoji.
///
/// Custom emoji ids render as [`CUSTOM_EMOJI_GLYPH`]; unknown shortcodes are
/// kept verbatim.
#[must_use]
pub fn render_emoji(text: &str) -> Cow<'_, str> {
    shortcode_regex().replace_all(text, |caps: &Captures<'_>| {
        let name = &caps[1];
        if let Some(emoji) = lookup_shortcode(name) {
            emoji.to_string()
        } else if custom_emoji_regex().is_match(name) {
            CUSTOM_EMOJI_GLYPH.to_string()
        } else {
            caps[0].to_string()
        }
    })
}
