use super::*;
use crate::model::EmoteScope;

fn versions(entries: &[(&str, &str)]) -> BadgeVersions {
    entries
        .iter()
        .map(|(id, url)| {
            (
                (*id).to_string(),
                BadgeVersion {
                    image_url_1x: (*url).to_string(),
                    ..BadgeVersion::default()
                },
            )
        })
        .collect()
}

#[test]
fn tokens_are_global_then_channel() {
    let mut catalog = EmoteCatalog::new();
    catalog.set_global_tokens(vec![
        ThirdPartyEmoteToken::new("OhMyDog", "g1", EmoteScope::Global),
        ThirdPartyEmoteToken::new("FeelsBadMan", "g2", EmoteScope::Global),
    ]);
    catalog.set_channel_tokens(
        "#BaseTradeTV",
        vec![ThirdPartyEmoteToken::new(":tduck:", "c1", EmoteScope::Channel)],
    );

    let ids: Vec<_> = catalog
        .third_party_tokens_for("basetradetv")
        .into_iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(ids, vec!["g1", "g2", "c1"]);

    assert_eq!(catalog.third_party_tokens_for("other").len(), 2);
}

#[test]
fn setting_channel_tokens_replaces_previous_list() {
    let mut catalog = EmoteCatalog::new();
    catalog.set_channel_tokens("chan", vec![ThirdPartyEmoteToken::new("a", "1", EmoteScope::Channel)]);
    catalog.set_channel_tokens("chan", vec![ThirdPartyEmoteToken::new("b", "2", EmoteScope::Channel)]);
    let tokens = catalog.third_party_tokens_for("chan");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].code, "b");
}

#[test]
fn remove_channel_drops_only_that_channel() {
    let mut catalog = EmoteCatalog::new();
    catalog.set_channel_tokens("a", vec![ThirdPartyEmoteToken::new("x", "1", EmoteScope::Channel)]);
    catalog.set_channel_tokens("b", vec![ThirdPartyEmoteToken::new("y", "2", EmoteScope::Channel)]);
    catalog.remove_channel("#a");
    assert_eq!(catalog.channel_token_count("a"), 0);
    assert_eq!(catalog.channel_token_count("b"), 1);
}

#[test]
fn channel_badges_override_global_per_type() {
    let mut catalog = EmoteCatalog::new();
    let mut global = BadgeSets::new();
    global.insert("subscriber".into(), versions(&[("0", "global-sub-0"), ("3", "global-sub-3")]));
    global.insert("moderator".into(), versions(&[("1", "mod-1")]));
    catalog.set_global_badges(global);

    let mut channel = BadgeSets::new();
    channel.insert("subscriber".into(), versions(&[("0", "chan-sub-0")]));
    catalog.set_channel_badges("chan", channel);

    let merged = catalog.platform_badges_for("chan");
    assert_eq!(merged["subscriber"]["0"].image_url_1x, "chan-sub-0");
    // The channel set replaces the whole type, like a shallow object merge.
    assert!(!merged["subscriber"].contains_key("3"));
    assert_eq!(merged["moderator"]["1"].image_url_1x, "mod-1");

    let elsewhere = catalog.platform_badges_for("other");
    assert_eq!(elsewhere["subscriber"]["0"].image_url_1x, "global-sub-0");
}

#[test]
fn resolve_badges_keeps_user_order_and_skips_unknown() {
    let mut catalog = EmoteCatalog::new();
    let mut global = BadgeSets::new();
    global.insert("moderator".into(), versions(&[("1", "mod-1")]));
    global.insert("premium".into(), versions(&[("1", "prime-1")]));
    catalog.set_global_badges(global);

    let images = catalog.resolve_badges(
        "chan",
        &[
            UserBadge::new("premium", "1"),
            UserBadge::new("subscriber", "12"),
            UserBadge::new("moderator", "1"),
            UserBadge::new("moderator", "9"),
        ],
    );
    let urls: Vec<_> = images.iter().map(|b| b.url.as_str()).collect();
    assert_eq!(urls, vec!["prime-1", "mod-1"]);
}

#[test]
fn empty_catalog_answers_with_empty_data() {
    let catalog = EmoteCatalog::new();
    assert!(catalog.third_party_tokens_for("chan").is_empty());
    assert!(catalog.platform_badges_for("chan").is_empty());
    assert!(catalog.resolve_badges("chan", &[UserBadge::new("vip", "1")]).is_empty());
}

#[test]
fn clear_resets_everything() {
    let mut catalog = EmoteCatalog::new();
    catalog.set_global_tokens(vec![ThirdPartyEmoteToken::new("a", "1", EmoteScope::Global)]);
    catalog.set_channel_tokens("c", vec![ThirdPartyEmoteToken::new("b", "2", EmoteScope::Channel)]);
    catalog.clear();
    assert_eq!(catalog.global_token_count(), 0);
    assert_eq!(catalog.channel_token_count("c"), 0);
}
