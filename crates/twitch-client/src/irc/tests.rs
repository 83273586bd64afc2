use super::connection::LineAction;
use super::*;
use chat_emotes::UserBadge;

const PRIVMSG: &str = "@badge-info=subscriber/14;badges=subscriber/12,premium/1;bits=100;color=#1E90FF;display-name=Some\\sUser;emotes=25:0-4;id=b34ccfc7-4977-403a-8a94-33c6bac34fb8;room-id=1337;tmi-sent-ts=1507246572675;user-id=9001 :someuser!someuser@someuser.tmi.twitch.tv PRIVMSG #BaseTradeTV :Kappa cheer100";

fn config() -> IrcConfig {
    IrcConfig {
        url: "wss://example.invalid".into(),
        nick: "justinfan12345".into(),
        token: None,
        channels: vec!["BaseTradeTV".into(), "#other".into()],
    }
}

#[test]
fn parse_tags_prefix_and_trailing() {
    let msg = IrcMessage::parse(PRIVMSG).unwrap();
    assert_eq!(msg.command, "PRIVMSG");
    assert_eq!(msg.nick(), Some("someuser"));
    assert_eq!(msg.params, vec!["#BaseTradeTV", "Kappa cheer100"]);
    assert_eq!(msg.tag("display-name"), Some("Some User"));
    assert_eq!(msg.tag("emotes"), Some("25:0-4"));
    assert_eq!(
        msg.badges(),
        vec![UserBadge::new("subscriber", "12"), UserBadge::new("premium", "1")]
    );
}

#[test]
fn parse_unescapes_tag_values() {
    let msg = IrcMessage::parse("@system-msg=a\\:b\\\\c\\sd PING :x").unwrap();
    assert_eq!(msg.tag("system-msg"), Some("a;b\\c d"));
}

#[test]
fn parse_without_tags_or_prefix() {
    let msg = IrcMessage::parse("PING :tmi.twitch.tv\r\n").unwrap();
    assert_eq!(msg.command, "PING");
    assert_eq!(msg.prefix, None);
    assert_eq!(msg.params, vec!["tmi.twitch.tv"]);
}

#[test]
fn parse_blank_line_is_none() {
    assert!(IrcMessage::parse("").is_none());
    assert!(IrcMessage::parse("@a=b").is_none());
}

#[test]
fn privmsg_becomes_chat_message() {
    let msg = IrcMessage::parse(PRIVMSG).unwrap();
    let Some(ChatEvent::Message(chat)) = ChatEvent::from_irc(&msg, "justinfan1") else {
        panic!("expected a chat message");
    };
    assert_eq!(chat.channel, "basetradetv");
    assert_eq!(chat.login, "someuser");
    assert_eq!(chat.display_name, "Some User");
    assert_eq!(chat.color, "#1E90FF");
    assert_eq!(chat.bits, Some(100));
    assert_eq!(chat.room_id, "1337");
    assert_eq!(chat.text, "Kappa cheer100");
    assert!(!chat.is_action);
    assert_eq!(
        chat.sent_at.map(|t| t.timestamp_millis()),
        Some(1_507_246_572_675)
    );
}

#[test]
fn action_wrapper_is_stripped() {
    let msg = IrcMessage::parse(":u!u@u PRIVMSG #c :\u{1}ACTION waves\u{1}").unwrap();
    let Some(ChatEvent::Message(chat)) = ChatEvent::from_irc(&msg, "me") else {
        panic!("expected a chat message");
    };
    assert_eq!(chat.text, "waves");
    assert!(chat.is_action);
}

#[test]
fn join_and_part_detect_self() {
    let join = IrcMessage::parse(":justinfan1!justinfan1@justinfan1.tmi.twitch.tv JOIN #chan").unwrap();
    assert_eq!(
        ChatEvent::from_irc(&join, "JustinFan1"),
        Some(ChatEvent::Join {
            channel: "chan".into(),
            is_self: true
        })
    );
    let part = IrcMessage::parse(":other!other@other.tmi.twitch.tv PART #chan").unwrap();
    assert_eq!(
        ChatEvent::from_irc(&part, "justinfan1"),
        Some(ChatEvent::Part {
            channel: "chan".into(),
            is_self: false
        })
    );
}

#[test]
fn roomstate_carries_room_id() {
    let msg = IrcMessage::parse("@emote-only=0;room-id=71092938 :tmi.twitch.tv ROOMSTATE #chan").unwrap();
    assert_eq!(
        ChatEvent::from_irc(&msg, "me"),
        Some(ChatEvent::RoomState {
            channel: "chan".into(),
            room_id: "71092938".into()
        })
    );
}

#[test]
fn clearchat_with_and_without_target() {
    let all = IrcMessage::parse(":tmi.twitch.tv CLEARCHAT #chan").unwrap();
    assert_eq!(
        ChatEvent::from_irc(&all, "me"),
        Some(ChatEvent::ClearChat {
            channel: "chan".into()
        })
    );
    let one = IrcMessage::parse("@ban-duration=600 :tmi.twitch.tv CLEARCHAT #chan :SpamBot").unwrap();
    assert_eq!(
        ChatEvent::from_irc(&one, "me"),
        Some(ChatEvent::Timeout {
            channel: "chan".into(),
            username: "spambot".into()
        })
    );
}

#[test]
fn handshake_requests_caps_and_joins_channels() {
    let lines = IrcClient::handshake_lines(&config());
    assert_eq!(
        lines,
        vec![
            "CAP REQ :twitch.tv/tags twitch.tv/commands twitch.tv/membership".to_string(),
            "NICK justinfan12345".to_string(),
            "JOIN #basetradetv,#other".to_string(),
        ]
    );
}

#[test]
fn handshake_sends_pass_with_token() {
    let cfg = IrcConfig::with_login("Caster".into(), "oauth:abc".into(), vec!["c".into()]);
    let lines = IrcClient::handshake_lines(&cfg);
    assert!(lines.contains(&"PASS oauth:abc".to_string()));
    assert!(lines.contains(&"NICK caster".to_string()));
}

#[test]
fn ping_gets_pong() {
    assert_eq!(
        IrcClient::handle_line("PING :tmi.twitch.tv", &config()),
        LineAction::Reply("PONG :tmi.twitch.tv".into())
    );
}

#[test]
fn welcome_and_reconnect_are_control_lines() {
    let cfg = config();
    assert_eq!(
        IrcClient::handle_line(":tmi.twitch.tv 001 justinfan12345 :Welcome, GLHF!", &cfg),
        LineAction::Welcome
    );
    assert_eq!(
        IrcClient::handle_line(":tmi.twitch.tv RECONNECT", &cfg),
        LineAction::Reconnect
    );
    assert_eq!(
        IrcClient::handle_line(":tmi.twitch.tv 372 justinfan12345 :You are in a maze", &cfg),
        LineAction::Continue
    );
}

#[test]
fn backoff_grows_and_caps() {
    assert_eq!(IrcClient::backoff_duration(1).as_secs(), 2);
    assert_eq!(IrcClient::backoff_duration(3).as_secs(), 8);
    assert_eq!(IrcClient::backoff_duration(20).as_secs(), 60);
}
