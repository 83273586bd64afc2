//! Chat message filtering and chatter name formatting.

use std::ops::RangeInclusive;

/// Unicode blocks whose characters cause a message to be dropped.
///
/// Latin-1 Supplement, Latin Extended-A/B, Dingbats and Latin
/// Extended-C are allowed.
const BLOCKED_RANGES: &[RangeInclusive<char>] = &[
    '\u{0250}'..='\u{02AF}', // IPA Extensions
    '\u{02B0}'..='\u{02FF}', // Spacing Modifier Letters
    '\u{0300}'..='\u{036F}', // Combining Diacritical Marks
    '\u{0370}'..='\u{03FF}', // Greek and Coptic
    '\u{0400}'..='\u{04FF}', // Cyrillic
    '\u{0500}'..='\u{052F}', // Cyrillic Supplement
    '\u{0530}'..='\u{1FFF}', // Armenian through Greek Extended
    '\u{2100}'..='\u{214F}', // Letterlike Symbols
    '\u{2500}'..='\u{257F}', // Box Drawing
    '\u{2580}'..='\u{259F}', // Block Elements
    '\u{25A0}'..='\u{25FF}', // Geometric Shapes
    '\u{2600}'..='\u{26FF}', // Miscellaneous Symbols
    '\u{2800}'..='\u{28FF}', // Braille
];

const DEFAULT_NAME_COLOR: &str = "blue";

/// `true` when the message contains a character from a blocked block.
pub fn is_filtered(message: &str) -> bool {
    message
        .chars()
        .any(|c| BLOCKED_RANGES.iter().any(|range| range.contains(&c)))
}

/// Name shown for a chatter.
///
/// Uses the display name, falling back to the login. Names with
/// characters outside `[A-Za-z0-9_]` get the login appended so
/// localized names stay identifiable.
pub fn display_name(display: &str, login: &str) -> String {
    let display = display.trim();
    let name = if display.is_empty() { login } else { display };
    let plain = name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if plain || login.is_empty() {
        name.to_string()
    } else {
        format!("{name} ({login})")
    }
}

/// Chatter's name color, or the default when unset.
pub fn name_color(color: &str) -> String {
    let color = color.trim();
    if color.is_empty() {
        DEFAULT_NAME_COLOR.to_string()
    } else {
        color.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latin_text_passes() {
        assert!(!is_filtered("GG WP Kappa"));
        assert!(!is_filtered("très bien, señor"));
        assert!(!is_filtered(""));
    }

    #[test]
    fn blocked_scripts_are_filtered() {
        assert!(is_filtered("привет"));
        assert!(is_filtered("γεια"));
        assert!(is_filtered("gg ⣿⣿⣿"));
        assert!(is_filtered("▓▓▓ spam"));
    }

    #[test]
    fn dingbats_and_emoji_pass() {
        assert!(!is_filtered("nice ✔"));
        assert!(!is_filtered("PogChamp 🎉"));
    }

    #[test]
    fn display_name_falls_back_to_login() {
        assert_eq!(display_name("", "someuser"), "someuser");
        assert_eq!(display_name("SomeUser", "someuser"), "SomeUser");
    }

    #[test]
    fn localized_display_name_gets_login_suffix() {
        assert_eq!(display_name("한국인", "koreanuser"), "한국인 (koreanuser)");
        assert_eq!(display_name("Some User", "someuser"), "Some User (someuser)");
    }

    #[test]
    fn color_defaults_to_blue() {
        assert_eq!(name_color(""), "blue");
        assert_eq!(name_color("#FF4500"), "#FF4500");
    }
}
