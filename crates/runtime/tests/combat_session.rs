//! End-to-end session test: runtime worker, skill chain, AI opponent,
//! and event bus topics.

use std::sync::Arc;

use game_core::{
    ActionRequest, CharacterId, CharacterKind, CharacterRecord, CharacterState, FixedRoll,
    GameplayEvent, Loadout, WeaponType,
};
use runtime::{
    ClientCommand, Event, OracleManager, Runtime, RuntimeConfig, Topic, WeightedAiProvider,
};

const PLAYER: CharacterId = CharacterId(1);
const GOBLIN: CharacterId = CharacterId(2);

fn player() -> CharacterRecord {
    let mut record = CharacterRecord::new(PLAYER, CharacterKind::Player, "hero");
    record.loadout = Loadout::armed(WeaponType::GreatSword);
    record.primary.physical_attack = 120.0;
    record.skills.equip(1, "Cleave");
    record.skills.equip(2, "Whirlwind");
    record
}

fn goblin() -> CharacterRecord {
    let mut record = CharacterRecord::new(GOBLIN, CharacterKind::Ai, "goblin");
    record.health.base = 400;
    record.health.max = 400;
    record.health.current = 400;
    record.skills.equip(1, "Bite");
    record
}

fn drain<T>(rx: &mut tokio::sync::broadcast::Receiver<T>) -> Vec<T>
where
    T: Clone,
{
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

#[tokio::test]
async fn full_combat_session() {
    tracing_subscriber::fmt().with_test_writer().try_init().ok();

    let oracles = OracleManager::default_content().with_rng(Arc::new(FixedRoll(0.99)));
    let runtime = Runtime::builder()
        .config(RuntimeConfig {
            seed: Some(7),
            ..RuntimeConfig::default()
        })
        .oracles(oracles)
        .ai_provider(WeightedAiProvider::new())
        .build();
    let handle = runtime.handle();

    let mut combat_rx = handle.subscribe(Topic::Combat);
    let mut replication_rx = handle.subscribe(Topic::Replication);
    let mut cosmetic_rx = handle.subscribe(Topic::Cosmetic);

    handle.spawn(player()).await.unwrap();
    handle.spawn(goblin()).await.unwrap();

    // Player opens with the chaining skill and lands it.
    assert!(handle
        .submit(ClientCommand {
            character: PLAYER,
            request: ActionRequest::TriggerSkill { slot: 1 },
        })
        .await
        .unwrap());

    let response = handle.strike(PLAYER, GOBLIN, 0.0).await.unwrap().unwrap();
    assert!(response.damage > 0.0);

    let goblin_record = handle.query_character(GOBLIN).await.unwrap();
    assert_eq!(
        goblin_record.health.current,
        400 - response.damage.round() as i32
    );

    // Skill finishes on its duration timer; the chain window opens. The AI
    // gets its decision round on the same tick and answers with Bite.
    handle.tick(1.3).await.unwrap();

    let combat_events = drain(&mut combat_rx);
    assert!(combat_events.iter().any(|e| matches!(
        e,
        Event::Combat(GameplayEvent::SkillFinished { character: PLAYER, .. })
    )));
    assert!(combat_events.iter().any(|e| matches!(
        e,
        Event::Combat(GameplayEvent::ChainWindowOpened {
            character: PLAYER,
            superseding_slot: 2,
        })
    )));
    assert!(combat_events.iter().any(|e| matches!(
        e,
        Event::Combat(GameplayEvent::SkillActivated { character: GOBLIN, .. })
    )));

    // Chain into the follow-up within the window, from a non-idle context.
    assert!(handle
        .submit(ClientCommand {
            character: PLAYER,
            request: ActionRequest::NormalAttack { attack_index: 1 },
        })
        .await
        .unwrap());
    assert!(handle
        .submit(ClientCommand {
            character: PLAYER,
            request: ActionRequest::TriggerSkill { slot: 2 },
        })
        .await
        .unwrap());

    let player_record = handle.query_character(PLAYER).await.unwrap();
    assert_eq!(player_record.state(), CharacterState::UsingActiveSkill);
    assert_eq!(player_record.state_info.sub_state_index, 2);

    // Replication carried every commit; cosmetics carried the hit effect.
    let sync_events = drain(&mut replication_rx);
    assert!(!sync_events.is_empty());
    let cosmetics = drain(&mut cosmetic_rx);
    assert!(cosmetics
        .iter()
        .any(|e| matches!(e, Event::Cosmetic(runtime::CosmeticEvent::HitEffect { .. }))));

    runtime.shutdown().await.unwrap();
}

// Paused time: the ticker runs on tokio's virtual clock, so two virtual
// seconds elapse instantly.
#[tokio::test(start_paused = true)]
async fn auto_ticker_advances_the_simulation() {
    let runtime = Runtime::builder()
        .config(RuntimeConfig {
            seed: Some(3),
            tick_interval: Some(std::time::Duration::from_millis(10)),
            ..RuntimeConfig::default()
        })
        .build();
    let handle = runtime.handle();

    handle.spawn(player()).await.unwrap();
    assert!(handle
        .submit(ClientCommand {
            character: PLAYER,
            request: ActionRequest::Dodge {
                dodge_index: 1,
                yaw: 0.0,
            },
        })
        .await
        .unwrap());

    // The background ticker finishes the dodge without explicit ticks.
    tokio::time::sleep(std::time::Duration::from_secs(2)).await;
    let record = handle.query_character(PLAYER).await.unwrap();
    assert_eq!(record.state(), CharacterState::IdleWalkRun);

    runtime.shutdown().await.unwrap();
}
