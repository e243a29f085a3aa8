use accord::prelude::*;
use serde_json::json;

fn materialize(cache: &Cache, payload: serde_json::Value) -> Result<Interaction> {
    let payload: InteractionPayload = serde_json::from_value(payload).expect("valid payload");

    InteractionMaterializer::new().materialize(cache, payload)
}

fn seed_guild(cache: &Cache) {
    let guild: Guild = serde_json::from_value(json!({
        "id": "1",
        "name": "testing grounds",
        "owner_id": "2",
    }))
    .unwrap();
    cache.insert_guild(guild);

    let channel: GuildChannel = serde_json::from_value(json!({
        "id": "5",
        "guild_id": "1",
        "type": 0,
        "name": "general",
    }))
    .unwrap();
    cache.insert_guild_channel(channel);
}

#[test]
fn materializes_direct_message_payload() {
    let cache = Cache::new();

    let interaction = materialize(
        &cache,
        json!({
            "id": 123,
            "token": "tok",
            "type": 2,
            "guild_id": 0,
            "channel": {"id": 55, "type": 1},
            "user": {"id": 99},
        }),
    )
    .unwrap();

    assert!(interaction.is_direct());
    assert_eq!(interaction.id(), InteractionId::new(123));
    assert_eq!(interaction.kind(), InteractionType::Command);
    assert_eq!(interaction.token(), "tok");
    assert_eq!(interaction.channel_id(), ChannelId::new(55));
    assert_eq!(interaction.user().id, UserId::new(99));
    assert_eq!(interaction.locale(), "en-US");
    assert!(interaction.guild().is_none());
    assert!(interaction.member().is_none());
    assert!(interaction.entitlements().is_empty());
    assert!(!interaction.is_acknowledged());

    // The channel and its recipient reference each other after resolution.
    let channel = interaction.channel().private().unwrap();
    assert_eq!(channel.recipient.as_ref().unwrap().id, UserId::new(99));
    assert_eq!(interaction.user().private_channel_id, Some(ChannelId::new(55)));
    assert_eq!(
        cache.user(UserId::new(99)).unwrap().private_channel_id,
        Some(ChannelId::new(55))
    );
}

#[test]
fn materializes_guild_payload() {
    let cache = Cache::new();
    seed_guild(&cache);

    let interaction = materialize(
        &cache,
        json!({
            "id": "200",
            "token": "tok",
            "type": 2,
            "guild_id": "1",
            "locale": "de",
            "channel": {"id": "5", "type": 0, "permissions": "2048"},
            "member": {
                "user": {"id": "3", "username": "ana"},
                "nick": "moderator",
                "roles": ["8"],
            },
        }),
    )
    .unwrap();

    assert!(!interaction.is_direct());
    assert_eq!(interaction.guild().unwrap().id, GuildId::new(1));
    assert_eq!(interaction.locale(), "de");

    let member = interaction.member().unwrap();
    assert_eq!(member.guild_id, GuildId::new(1));
    assert_eq!(member.nick.as_deref(), Some("moderator"));
    assert_eq!(member.roles, vec![RoleId::new(8)]);
    assert_eq!(interaction.user().id, UserId::new(3));
    assert_eq!(interaction.user_permissions(), Some(Permissions::SEND_MESSAGES));

    // The member was registered in the directory as a side effect.
    let guild = cache.guild(GuildId::new(1)).unwrap();
    assert_eq!(guild.members[&UserId::new(3)].nick.as_deref(), Some("moderator"));
}

#[test]
fn fabricates_uncached_threads() {
    let cache = Cache::new();
    seed_guild(&cache);

    let interaction = materialize(
        &cache,
        json!({
            "id": "201",
            "token": "tok",
            "type": 2,
            "guild_id": "1",
            "channel": {"id": "77", "type": 11, "name": "planning", "parent_id": "5"},
            "member": {"user": {"id": "3", "username": "ana"}},
        }),
    )
    .unwrap();

    assert!(interaction.channel().is_thread());
    let thread = interaction.channel().guild().unwrap();
    assert_eq!(thread.parent_id, Some(ChannelId::new(5)));
    assert_eq!(thread.name, "planning");

    // The fabricated thread is now resolvable like any other channel.
    assert!(cache.guild_channel(GuildId::new(1), ChannelId::new(77)).is_some());
}

#[test]
fn rejects_uncached_non_thread_channels() {
    let cache = Cache::new();
    seed_guild(&cache);

    let err = materialize(
        &cache,
        json!({
            "id": "202",
            "token": "tok",
            "type": 2,
            "guild_id": "1",
            "channel": {"id": "78", "type": 0},
            "member": {"user": {"id": "3", "username": "ana"}},
        }),
    )
    .unwrap_err();

    assert_eq!(err, Error::ChannelResolution {
        channel_id: ChannelId::new(78),
        kind: ChannelType::Text,
    });
}

#[test]
fn rejects_group_direct_messages() {
    let cache = Cache::new();

    let err = materialize(
        &cache,
        json!({
            "id": "203",
            "token": "tok",
            "type": 2,
            "channel": {"id": "55", "type": 3},
            "user": {"id": "99"},
        }),
    )
    .unwrap_err();

    assert_eq!(err, Error::UnsupportedChannelType(ChannelType::GroupDm));
}

#[test]
fn rejects_unknown_guilds() {
    let cache = Cache::new();

    let err = materialize(
        &cache,
        json!({
            "id": "204",
            "token": "tok",
            "type": 2,
            "guild_id": "42",
            "channel": {"id": "5", "type": 0},
            "member": {"user": {"id": "3", "username": "ana"}},
        }),
    )
    .unwrap_err();

    assert_eq!(err, Error::Directory(DirectoryError::GuildNotFound(GuildId::new(42))));
}

#[test]
fn rejects_guild_payload_without_member() {
    let cache = Cache::new();
    seed_guild(&cache);

    let err = materialize(
        &cache,
        json!({
            "id": "205",
            "token": "tok",
            "type": 2,
            "guild_id": "1",
            "channel": {"id": "5", "type": 0},
        }),
    )
    .unwrap_err();

    assert_eq!(err, Error::MissingField("member"));
}

#[test]
fn decodes_context_and_integration_owners() {
    let cache = Cache::new();

    let interaction = materialize(
        &cache,
        json!({
            "id": "206",
            "token": "tok",
            "type": 2,
            "context": "1",
            "authorizing_integration_owners": {"1": "99"},
            "channel": {"id": "55", "type": 1},
            "user": {"id": "99"},
        }),
    )
    .unwrap();

    assert_eq!(interaction.context(), Some(InteractionContextType::BotDm));
    assert_eq!(
        interaction.integration_owners().unwrap().0,
        vec![AuthorizingIntegrationOwner::UserInstall(UserId::new(99))]
    );
}

#[test]
fn absent_context_follows_the_policy() {
    let cache = Cache::new();
    let payload = json!({
        "id": "207",
        "token": "tok",
        "type": 2,
        "channel": {"id": "55", "type": 1},
        "user": {"id": "99"},
    });

    let interaction = materialize(&cache, payload.clone()).unwrap();
    assert_eq!(interaction.context(), None);

    let strict = InteractionMaterializer::with_context_policy(ContextPolicy::Required);
    let payload: InteractionPayload = serde_json::from_value(payload).unwrap();
    assert_eq!(strict.materialize(&cache, payload).unwrap_err(), Error::MissingContext);
}

#[test]
fn resolution_failures_surface_before_missing_context() {
    let cache = Cache::new();
    let payload: InteractionPayload = serde_json::from_value(json!({
        "id": "210",
        "token": "tok",
        "type": 2,
        "guild_id": "42",
        "channel": {"id": "5", "type": 0},
        "member": {"user": {"id": "3", "username": "ana"}},
    }))
    .unwrap();

    // The payload is broken twice over: unknown guild and no context. Entity
    // resolution runs first, so the guild error wins.
    let strict = InteractionMaterializer::with_context_policy(ContextPolicy::Required);
    assert_eq!(
        strict.materialize(&cache, payload).unwrap_err(),
        Error::Directory(DirectoryError::GuildNotFound(GuildId::new(42)))
    );
}

#[test]
fn links_recipient_into_pre_existing_channel() {
    let cache = Cache::new();
    let channel: PrivateChannel = serde_json::from_value(json!({
        "id": "55",
        "type": 1,
    }))
    .unwrap();
    assert!(channel.recipient.is_none());
    cache.insert_private_channel(channel);

    let interaction = materialize(
        &cache,
        json!({
            "id": "208",
            "token": "tok",
            "type": 2,
            "channel": {"id": "55", "type": 1},
            "user": {"id": "99", "username": "invoker"},
        }),
    )
    .unwrap();

    let channel = interaction.channel().private().unwrap();
    assert_eq!(channel.recipient.as_ref().unwrap().id, UserId::new(99));
    assert_eq!(
        cache.private_channel(ChannelId::new(55)).unwrap().recipient.unwrap().id,
        UserId::new(99)
    );
}

#[test]
fn registers_payload_entitlements() {
    let cache = Cache::new();

    let interaction = materialize(
        &cache,
        json!({
            "id": "209",
            "token": "tok",
            "type": 2,
            "channel": {"id": "55", "type": 1},
            "user": {"id": "99"},
            "entitlements": [{
                "id": "900",
                "sku_id": "901",
                "application_id": "902",
                "user_id": "99",
                "type": 8,
            }],
        }),
    )
    .unwrap();

    assert_eq!(interaction.entitlements().len(), 1);
    let entitlement = &interaction.entitlements()[0];
    assert_eq!(entitlement.kind, EntitlementKind::ApplicationSubscription);
    assert_eq!(entitlement.owner(), Some(EntitlementOwner::User(UserId::new(99))));
    assert!(cache.entitlement(EntitlementId::new(900)).is_some());
}
