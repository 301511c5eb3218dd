//! Compiled-in greeting text

pub const RECIPIENT: &str = "Aafiya Jahan";
pub const RECIPIENT_SHORT: &str = "Aafiya";

pub const OPENING_TEASER: &str = "Something special was created just for you…";
pub const OPENING_PROMPT: &str = "Tap gently 💖";

pub const BUILD_UP_TITLE: &str = "Today is not just a normal day…";
pub const BUILD_UP_LINE: &str = "It’s the day the world received someone extraordinary.";

pub const NAME_REVEAL_TITLE: &str = "🎉 Happy Birthday";
pub const NAME_REVEAL_PROMPT: &str = "Tap to see your surprise...";

pub const GIFT_LINE: &str = "I have something for you…";
pub const GIFT_PROMPT: &str = "Tap the gift slowly…";

pub const MESSAGE_LINES: [&str; 4] = [
    "You are one of the most precious blessings in my life.",
    "Your smile changes everything.",
    "Your presence makes the world softer.",
    "I truly hope this year brings you happiness beyond imagination.",
];

pub const ENDING_LINES: [&str; 4] = [
    "You are rare.",
    "You are special.",
    "And today…",
    "the universe celebrates you.",
];
pub const ENDING_TITLE: &str = "Happy Birthday 💖";
pub const RESTART_LABEL: &str = "Restart Story";
