//! Replication bridge contract tests: ordered sync, idempotent
//! convergence, and prediction correction.

use game_core::{
    ActionRequest, CharacterId, CharacterKind, CharacterRecord, CharacterState, ClientReaction,
    Loadout, WeaponType,
};
use runtime::{ClientReplica, OracleManager, RecordingDriver, ServerSession, SyncMessage};

const HERO: CharacterId = CharacterId(1);

fn hero() -> CharacterRecord {
    let mut record = CharacterRecord::new(HERO, CharacterKind::Player, "hero");
    record.loadout = Loadout::armed(WeaponType::GreatSword);
    record
}

fn session() -> ServerSession {
    ServerSession::new(OracleManager::default_content(), 42)
}

/// Feeds every pending sync message into the replica, in order.
fn deliver(session: &mut ServerSession, replica: &mut ClientReplica, driver: &mut RecordingDriver) {
    for message in session.drain_sync() {
        match message {
            SyncMessage::State(sync) if sync.character == replica.character() => {
                replica.apply_state_sync(&sync, driver);
            }
            SyncMessage::Stat(sync) if sync.character == replica.character() => {
                replica.apply_stat_sync(&sync);
            }
            _ => {}
        }
    }
}

#[test]
fn observed_sequence_matches_committed_sequence() {
    let mut session = session();
    session.spawn(hero());

    let mut replica = ClientReplica::new(HERO);
    let mut driver = RecordingDriver::default();
    deliver(&mut session, &mut replica, &mut driver);

    for request in [
        ActionRequest::NormalAttack { attack_index: 1 },
        ActionRequest::NormalAttack { attack_index: 2 },
        ActionRequest::StartBlocking,
        ActionRequest::StopBlocking,
    ] {
        session.submit(replica.predict_request(request));
    }

    let states: Vec<(CharacterState, u8)> = session
        .drain_sync()
        .iter()
        .filter_map(|m| match m {
            SyncMessage::State(sync) => Some((sync.state, sync.sub_state_index)),
            _ => None,
        })
        .collect();
    assert_eq!(
        states,
        vec![
            (CharacterState::Attacking, 1),
            (CharacterState::Attacking, 2),
            (CharacterState::Blocking, 0),
            (CharacterState::IdleWalkRun, 0),
        ]
    );
}

#[test]
fn replaying_the_sync_stream_is_idempotent() {
    let mut session = session();
    session.spawn(hero());
    session.submit(runtime::ClientCommand {
        character: HERO,
        request: ActionRequest::Dodge {
            dodge_index: 1,
            yaw: 45.0,
        },
    });

    let messages = session.drain_sync();
    let mut replica = ClientReplica::new(HERO);
    let mut driver = RecordingDriver::default();

    // First delivery dispatches; a full replay (reconnect) must not.
    for message in &messages {
        if let SyncMessage::State(sync) = message {
            replica.apply_state_sync(sync, &mut driver);
        }
    }
    let first_pass = driver.reactions.len();
    assert!(first_pass > 0);

    for message in &messages {
        if let SyncMessage::State(sync) = message {
            replica.apply_state_sync(sync, &mut driver);
        }
    }
    assert_eq!(driver.reactions.len(), first_pass);
}

#[test]
fn rejected_prediction_is_corrected() {
    let mut session = session();
    session.spawn(hero());

    let mut replica = ClientReplica::new(HERO);
    let mut driver = RecordingDriver::default();
    deliver(&mut session, &mut replica, &mut driver);

    // Dodge commits; the client then optimistically predicts an attack,
    // which the server rejects because the hero is mid-dodge.
    session.submit(replica.predict_request(ActionRequest::Dodge {
        dodge_index: 2,
        yaw: 0.0,
    }));
    deliver(&mut session, &mut replica, &mut driver);
    assert_eq!(replica.effective().state, CharacterState::Dodging);

    let command = replica.predict_request(ActionRequest::NormalAttack { attack_index: 1 });
    assert_eq!(replica.effective().state, CharacterState::Attacking);

    let committed = session.submit(command);
    assert!(!committed);
    deliver(&mut session, &mut replica, &mut driver);

    // The authoritative tuple wins; the provisional guess is gone.
    assert_eq!(replica.effective().state, CharacterState::Dodging);
    assert_eq!(replica.observed().state, CharacterState::Dodging);
}

#[test]
fn state_reactions_reconstruct_the_attack_section() {
    let mut session = session();
    session.spawn(hero());

    let mut replica = ClientReplica::new(HERO);
    let mut driver = RecordingDriver::default();
    deliver(&mut session, &mut replica, &mut driver);

    session.submit(runtime::ClientCommand {
        character: HERO,
        request: ActionRequest::NormalAttack { attack_index: 1 },
    });
    session.submit(runtime::ClientCommand {
        character: HERO,
        request: ActionRequest::NormalAttack { attack_index: 2 },
    });
    deliver(&mut session, &mut replica, &mut driver);

    let reactions: Vec<&ClientReaction> =
        driver.reactions.iter().map(|(_, r)| r).collect();
    assert!(matches!(
        reactions.as_slice(),
        [
            ClientReaction::StartNormalAttack { .. },
            ClientReaction::ChangeAttackSection { .. },
        ]
    ));
}

#[test]
fn stat_syncs_follow_damage() {
    // Fixed high roll: no crit, so the damage is the plain swing damage.
    let oracles = OracleManager::default_content()
        .with_rng(std::sync::Arc::new(game_core::FixedRoll(0.99)));
    let mut session = ServerSession::new(oracles, 42);
    session.spawn(hero());
    let mut target = CharacterRecord::new(CharacterId(2), CharacterKind::Ai, "dummy");
    target.primary.physical_resistance = 0.0;
    session.spawn(target);

    // Put the hero mid-swing so strike() has an action to resolve.
    session.submit(runtime::ClientCommand {
        character: HERO,
        request: ActionRequest::NormalAttack { attack_index: 1 },
    });
    session.drain_sync();

    let response = session.strike(HERO, CharacterId(2), 0.0).unwrap();
    assert!(response.damage > 0.0);

    let mut replica = ClientReplica::new(CharacterId(2));
    let mut driver = RecordingDriver::default();
    deliver(&mut session, &mut replica, &mut driver);

    let health = replica.health().expect("health sync must have arrived");
    assert_eq!(health.current, health.max - response.damage.round() as i32);
}
