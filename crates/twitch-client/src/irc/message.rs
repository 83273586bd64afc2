//! IRCv3 line parsing for Twitch chat.

use std::collections::HashMap;

use chat_emotes::UserBadge;

/// A single parsed IRC line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IrcMessage {
    pub tags: HashMap<String, String>,
    /// `nick!user@host` or server name, without the leading `:`.
    pub prefix: Option<String>,
    pub command: String,
    pub params: Vec<String>,
}

impl IrcMessage {
    /// Parse one line. Returns `None` for blank lines or lines without a command.
    pub fn parse(line: &str) -> Option<Self> {
        let mut rest = line.trim_end_matches(['\r', '\n']);
        let mut msg = Self::default();

        if let Some(stripped) = rest.strip_prefix('@') {
            let (raw_tags, after) = stripped.split_once(' ')?;
            msg.tags = parse_tags(raw_tags);
            rest = after.trim_start();
        }

        if let Some(stripped) = rest.strip_prefix(':') {
            let (prefix, after) = stripped.split_once(' ')?;
            msg.prefix = Some(prefix.to_string());
            rest = after.trim_start();
        }

        let (command, mut rest) = match rest.split_once(' ') {
            Some((command, after)) => (command, after),
            None => (rest, ""),
        };
        if command.is_empty() {
            return None;
        }
        msg.command = command.to_ascii_uppercase();

        while !rest.is_empty() {
            if let Some(trailing) = rest.strip_prefix(':') {
                msg.params.push(trailing.to_string());
                break;
            }
            match rest.split_once(' ') {
                Some((param, after)) => {
                    if !param.is_empty() {
                        msg.params.push(param.to_string());
                    }
                    rest = after;
                }
                None => {
                    msg.params.push(rest.to_string());
                    break;
                }
            }
        }

        Some(msg)
    }

    /// Tag value, treating empty values as absent.
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Nick part of the prefix.
    pub fn nick(&self) -> Option<&str> {
        let prefix = self.prefix.as_deref()?;
        let nick = prefix.split_once('!').map_or(prefix, |(nick, _)| nick);
        Some(nick).filter(|n| !n.is_empty())
    }

    pub fn param(&self, index: usize) -> Option<&str> {
        self.params.get(index).map(String::as_str)
    }

    /// Badges from the `badges` tag, in tag order.
    pub fn badges(&self) -> Vec<UserBadge> {
        self.tag("badges").map(parse_badges).unwrap_or_default()
    }
}

/// Parse `subscriber/12,premium/1` into badges.
pub fn parse_badges(raw: &str) -> Vec<UserBadge> {
    raw.split(',')
        .filter_map(|item| {
            let (badge_type, version) = item.split_once('/')?;
            let badge_type = badge_type.trim();
            if badge_type.is_empty() {
                return None;
            }
            Some(UserBadge::new(badge_type, version.trim()))
        })
        .collect()
}

fn parse_tags(raw: &str) -> HashMap<String, String> {
    raw.split(';')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) => (key.to_string(), unescape_tag_value(value)),
            None => (pair.to_string(), String::new()),
        })
        .collect()
}

fn unescape_tag_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some(':') => out.push(';'),
            Some('s') => out.push(' '),
            Some('\\') => out.push('\\'),
            Some('r') => out.push('\r'),
            Some('n') => out.push('\n'),
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}
