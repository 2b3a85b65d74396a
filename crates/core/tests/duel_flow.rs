use avarena_core::{
    AvatarInstance, BoostFilter, CardDef, CardId, CardKind, Catalog, CounterKind, DamageRule, Deck,
    DuelError, DuelState, Element, Event, EventBus, ItemEffect, PassiveBoost, Phase, Seat, Skill,
    SpellEffect, Target, WinReason,
};

fn skill(name: &str, cost: &[Element], damage: i64, rules: Vec<DamageRule>) -> Skill {
    Skill {
        name: name.to_string(),
        cost: cost.to_vec(),
        base_damage: damage,
        rules,
    }
}

fn avatar(
    id: CardId,
    name: &str,
    element: Element,
    tribe: &str,
    health: i64,
    skills: Vec<Skill>,
) -> CardDef {
    CardDef {
        id,
        name: name.to_string(),
        element,
        kind: CardKind::Avatar {
            level: 1,
            tribe: tribe.to_string(),
            health,
            skills,
        },
        passives: Vec::new(),
    }
}

fn simple(id: CardId, name: &str, element: Element, kind: CardKind) -> CardDef {
    CardDef {
        id,
        name: name.to_string(),
        element,
        kind,
        passives: Vec::new(),
    }
}

fn catalog() -> Catalog {
    let mut packmother = avatar(
        3,
        "Packmother",
        Element::Ground,
        "kobar",
        8,
        vec![skill("Claw", &[], 7, Vec::new())],
    );
    packmother.passives.push(PassiveBoost {
        filter: BoostFilter::Tribe("kobar".to_string()),
        bonus: 3,
    });

    Catalog::from_cards(vec![
        avatar(
            1,
            "Scrapfang",
            Element::Fire,
            "kobar",
            8,
            vec![
                skill(
                    "Fang Rush",
                    &[],
                    2,
                    vec![DamageRule::BecomeIfOpponentCounter {
                        counter: CounterKind::Bleed,
                        value: 8,
                    }],
                ),
                skill("Heavy Blow", &[Element::Fire], 7, Vec::new()),
            ],
        ),
        avatar(
            2,
            "Mirecrawler",
            Element::Water,
            "bog",
            9,
            vec![skill("Nip", &[], 1, Vec::new())],
        ),
        packmother,
        avatar(
            4,
            "Drudge",
            Element::Neutral,
            "prowler",
            5,
            vec![skill("Jab", &[], 2, Vec::new())],
        ),
        simple(
            5,
            "Zap",
            Element::Neutral,
            CardKind::Spell {
                cost: vec![Element::Neutral],
                effect: SpellEffect::Damage(2),
            },
        ),
        simple(
            6,
            "Salve",
            Element::Water,
            CardKind::Spell {
                cost: Vec::new(),
                effect: SpellEffect::Heal(3),
            },
        ),
        simple(
            7,
            "Shiv",
            Element::Neutral,
            CardKind::Equipment { cost: Vec::new() },
        ),
        simple(
            8,
            "Ward",
            Element::Ground,
            CardKind::RitualArmor { cost: Vec::new() },
        ),
        simple(
            9,
            "Spark",
            Element::Fire,
            CardKind::Item {
                cost: Vec::new(),
                effect: ItemEffect::AddEnergy,
            },
        ),
        simple(
            10,
            "Banner",
            Element::Fire,
            CardKind::Field {
                cost: vec![Element::Fire],
            },
        ),
        simple(
            11,
            "Gust",
            Element::Air,
            CardKind::QuickSpell {
                cost: Vec::new(),
                effect: SpellEffect::Damage(2),
            },
        ),
    ])
    .unwrap()
}

fn deck() -> Vec<CardId> {
    let mut cards = vec![4; 36];
    cards.extend([1, 1, 2, 2]);
    cards
}

fn fresh_duel() -> (DuelState, EventBus) {
    let mut events = EventBus::default();
    let duel = DuelState::new(catalog(), deck(), deck(), 11, &mut events).unwrap();
    (duel, events)
}

/// Puts the home seat into main 1 without running the turn opening.
fn at_main1(duel: &mut DuelState) {
    duel.state.phase = Phase::Main1;
}

#[test]
fn setup_deals_life_and_hand() {
    let (duel, _) = fresh_duel();
    for seat in [Seat::Home, Seat::Away] {
        let player = duel.state.player(seat);
        assert_eq!(player.life.len(), 4);
        assert_eq!(player.hand.len(), 5);
        assert_eq!(player.deck.len(), 31);
    }
    assert_eq!(duel.state.phase, Phase::Refresh);
    assert_eq!(duel.state.turn, 1);
    assert!(duel.state.winner.is_none());
}

#[test]
fn undersized_deck_rejected() {
    let mut events = EventBus::default();
    let result = DuelState::new(catalog(), vec![4; 39], deck(), 11, &mut events);
    assert!(matches!(result, Err(DuelError::InvalidDeck(39))));
}

#[test]
fn first_advance_runs_refresh_and_forced_draw() {
    let (mut duel, mut events) = fresh_duel();
    duel.advance_phase(Seat::Home, &mut events).unwrap();
    assert_eq!(duel.state.phase, Phase::Main1);
    assert_eq!(duel.state.home.hand.len(), 6);
    assert_eq!(duel.state.home.deck.len(), 30);
}

#[test]
fn turn_increments_once_per_full_round() {
    let (mut duel, mut events) = fresh_duel();
    for _ in 0..4 {
        duel.advance_phase(Seat::Home, &mut events).unwrap();
    }
    assert_eq!(duel.state.current, Seat::Away);
    assert_eq!(duel.state.turn, 1);
    for _ in 0..3 {
        duel.advance_phase(Seat::Away, &mut events).unwrap();
    }
    assert_eq!(duel.state.current, Seat::Home);
    assert_eq!(duel.state.phase, Phase::Main1);
    assert_eq!(duel.state.turn, 2);
}

#[test]
fn recycle_draw_from_empty_deck() {
    // Scenario: deck empty, one life card left. The life card becomes the
    // deck and is drawn immediately.
    let (mut duel, mut events) = fresh_duel();
    duel.state.phase = Phase::Draw;
    duel.state.home.deck = Deck::from_list(Vec::new());
    duel.state.home.life = vec![4];
    let hand_before = duel.state.home.hand.len();

    duel.draw_card(Seat::Home, &mut events).unwrap();

    assert_eq!(duel.state.home.deck.len(), 0);
    assert_eq!(duel.state.home.hand.len(), hand_before + 1);
    assert!(duel.state.home.life.is_empty());
    let drained: Vec<Event> = events.drain().collect();
    assert!(drained
        .iter()
        .any(|event| matches!(event, Event::LifeCardRecycled { seat: Seat::Home, .. })));
}

#[test]
fn decked_out_draw_loses_the_match() {
    let (mut duel, mut events) = fresh_duel();
    duel.state.phase = Phase::Draw;
    duel.state.home.deck = Deck::from_list(Vec::new());
    duel.state.home.life.clear();
    let hand_before = duel.state.home.hand.len();

    let result = duel.draw_card(Seat::Home, &mut events);
    assert!(matches!(result, Err(DuelError::EmptyResourceLoss)));
    assert_eq!(duel.state.winner, Some(Seat::Away));
    assert_eq!(duel.state.home.hand.len(), hand_before);
    let drained: Vec<Event> = events.drain().collect();
    assert!(drained.iter().any(|event| matches!(
        event,
        Event::MatchEnded {
            winner: Seat::Away,
            reason: WinReason::DeckedOut,
        }
    )));

    // Once decided, everything else is rejected.
    let result = duel.advance_phase(Seat::Home, &mut events);
    assert!(matches!(result, Err(DuelError::MatchOver)));
}

#[test]
fn tapped_avatar_cannot_use_skills() {
    let (mut duel, mut events) = fresh_duel();
    at_main1(&mut duel);
    let mut attacker = AvatarInstance::new(1);
    attacker.tapped = true;
    duel.state.home.active = Some(attacker);
    duel.state.away.active = Some(AvatarInstance::new(2));

    let result = duel.use_avatar_skill(Seat::Home, 1, Target::OpponentAvatar, &mut events);
    assert!(matches!(result, Err(DuelError::AlreadyTapped)));
    let defender = duel.state.away.active.as_ref().unwrap();
    assert_eq!(defender.damage, 0);
    assert!(duel.state.home.active.as_ref().unwrap().tapped);
}

#[test]
fn played_avatar_fills_active_then_reserves() {
    let (mut duel, mut events) = fresh_duel();
    at_main1(&mut duel);
    duel.state.home.hand = vec![1, 2];

    duel.play_card(Seat::Home, 0, None, &mut events).unwrap();
    assert_eq!(duel.state.home.active.as_ref().unwrap().card, 1);
    assert!(!duel.state.home.active.as_ref().unwrap().tapped);

    duel.play_card(Seat::Home, 0, None, &mut events).unwrap();
    assert_eq!(duel.state.home.reserves.len(), 1);
    assert_eq!(duel.state.home.reserves[0].card, 2);
}

#[test]
fn set_energy_accepts_only_avatars() {
    let (mut duel, mut events) = fresh_duel();
    at_main1(&mut duel);
    duel.state.home.hand = vec![5, 1];

    let result = duel.set_energy_card(Seat::Home, 0, &mut events);
    assert!(matches!(result, Err(DuelError::InvalidTarget)));
    assert_eq!(duel.state.home.hand.len(), 2);

    duel.set_energy_card(Seat::Home, 1, &mut events).unwrap();
    assert_eq!(duel.state.home.energy, vec![1]);
    assert_eq!(duel.state.home.hand, vec![5]);
}

#[test]
fn skill_cost_is_paid_fifo_into_graveyard() {
    let (mut duel, mut events) = fresh_duel();
    at_main1(&mut duel);
    duel.state.home.active = Some(AvatarInstance::new(1));
    duel.state.home.energy = vec![5, 6, 9];
    duel.state.away.active = Some(AvatarInstance::new(2));

    let damage = duel
        .use_avatar_skill(Seat::Home, 2, Target::OpponentAvatar, &mut events)
        .unwrap();
    assert_eq!(damage, 7);
    assert_eq!(duel.state.home.energy, vec![6, 9]);
    assert_eq!(duel.state.home.graveyard, vec![5]);
    assert_eq!(duel.state.away.active.as_ref().unwrap().damage, 7);
    assert!(duel.state.home.active.as_ref().unwrap().tapped);
}

#[test]
fn insufficient_energy_rejects_without_mutation() {
    let (mut duel, mut events) = fresh_duel();
    at_main1(&mut duel);
    duel.state.home.active = Some(AvatarInstance::new(1));
    duel.state.home.energy.clear();
    duel.state.away.active = Some(AvatarInstance::new(2));

    let result = duel.use_avatar_skill(Seat::Home, 2, Target::OpponentAvatar, &mut events);
    assert!(matches!(
        result,
        Err(DuelError::InsufficientEnergy { need: 1, have: 0 })
    ));
    assert!(!duel.state.home.active.as_ref().unwrap().tapped);
    assert_eq!(duel.state.away.active.as_ref().unwrap().damage, 0);
    assert!(duel.state.home.graveyard.is_empty());
}

#[test]
fn unknown_skill_slot_is_unavailable() {
    let (mut duel, mut events) = fresh_duel();
    at_main1(&mut duel);
    duel.state.home.active = Some(AvatarInstance::new(2));
    duel.state.away.active = Some(AvatarInstance::new(1));

    let result = duel.use_avatar_skill(Seat::Home, 2, Target::OpponentAvatar, &mut events);
    assert!(matches!(result, Err(DuelError::SkillUnavailable)));
}

#[test]
fn switch_avatar_costs_one_energy() {
    let (mut duel, mut events) = fresh_duel();
    at_main1(&mut duel);
    duel.state.home.active = Some(AvatarInstance::new(1));
    duel.state.home.reserves = vec![AvatarInstance::new(2)];

    let result = duel.switch_avatar(Seat::Home, 0, &mut events);
    assert!(matches!(
        result,
        Err(DuelError::InsufficientEnergy { need: 1, have: 0 })
    ));

    duel.state.home.energy = vec![4];
    duel.switch_avatar(Seat::Home, 0, &mut events).unwrap();
    assert_eq!(duel.state.home.active.as_ref().unwrap().card, 2);
    assert_eq!(duel.state.home.reserves[0].card, 1);
    assert!(duel.state.home.energy.is_empty());
    assert_eq!(duel.state.home.graveyard, vec![4]);
}

#[test]
fn attachments_require_own_active_avatar() {
    let (mut duel, mut events) = fresh_duel();
    at_main1(&mut duel);
    duel.state.home.hand = vec![7, 8];

    let result = duel.play_card(Seat::Home, 0, Some(Target::OwnAvatar), &mut events);
    assert!(matches!(result, Err(DuelError::NoActiveAvatar)));

    duel.state.home.active = Some(AvatarInstance::new(1));
    let result = duel.play_card(Seat::Home, 0, None, &mut events);
    assert!(matches!(result, Err(DuelError::InvalidTarget)));

    duel.play_card(Seat::Home, 0, Some(Target::OwnAvatar), &mut events)
        .unwrap();
    duel.play_card(Seat::Home, 0, Some(Target::OwnAvatar), &mut events)
        .unwrap();
    let active = duel.state.home.active.as_ref().unwrap();
    assert_eq!(active.attached, vec![7, 8]);
    // Ritual armor grants its fixed shield on attach.
    assert_eq!(active.shield, 2);
}

#[test]
fn spells_need_a_resolved_target() {
    let (mut duel, mut events) = fresh_duel();
    at_main1(&mut duel);
    duel.state.home.hand = vec![5];
    duel.state.home.energy = vec![4];

    let result = duel.play_card(Seat::Home, 0, None, &mut events);
    assert!(matches!(result, Err(DuelError::InvalidTarget)));
    let result = duel.play_card(Seat::Home, 0, Some(Target::OpponentAvatar), &mut events);
    assert!(matches!(result, Err(DuelError::InvalidTarget)));
    assert_eq!(duel.state.home.hand, vec![5]);
    assert_eq!(duel.state.home.energy, vec![4]);
}

#[test]
fn spell_damage_and_heal_apply_to_damage_counters() {
    let (mut duel, mut events) = fresh_duel();
    at_main1(&mut duel);
    duel.state.home.hand = vec![5, 6];
    duel.state.home.energy = vec![4];
    duel.state.home.active = Some(AvatarInstance::new(1));
    duel.state.away.active = Some(AvatarInstance::new(2));

    duel.play_card(Seat::Home, 0, Some(Target::OpponentAvatar), &mut events)
        .unwrap();
    assert_eq!(duel.state.away.active.as_ref().unwrap().damage, 2);

    duel.state.home.active.as_mut().unwrap().damage = 2;
    duel.play_card(Seat::Home, 0, Some(Target::OwnAvatar), &mut events)
        .unwrap();
    // Heal floors at zero, never negative.
    assert_eq!(duel.state.home.active.as_ref().unwrap().damage, 0);
}

#[test]
fn quick_spell_keeps_the_battle_window() {
    let (mut duel, mut events) = fresh_duel();
    duel.state.phase = Phase::Battle;
    duel.state.home.hand = vec![5, 11];
    duel.state.home.energy = vec![4];
    duel.state.away.active = Some(AvatarInstance::new(2));

    let result = duel.play_card(Seat::Home, 0, Some(Target::OpponentAvatar), &mut events);
    assert!(matches!(result, Err(DuelError::IllegalPhase(Phase::Battle))));

    duel.play_card(Seat::Home, 1, Some(Target::OpponentAvatar), &mut events)
        .unwrap();
    assert_eq!(duel.state.away.active.as_ref().unwrap().damage, 2);
}

#[test]
fn energy_item_joins_the_pile() {
    let (mut duel, mut events) = fresh_duel();
    at_main1(&mut duel);
    duel.state.home.hand = vec![9];

    duel.play_card(Seat::Home, 0, None, &mut events).unwrap();
    assert_eq!(duel.state.home.energy, vec![9]);
    assert!(duel.state.home.graveyard.is_empty());
}

#[test]
fn defeat_moves_card_to_graveyard_and_pops_a_life_card() {
    let (mut duel, mut events) = fresh_duel();
    at_main1(&mut duel);
    duel.state.home.active = Some(AvatarInstance::new(3));
    let mut defender = AvatarInstance::new(4);
    defender.attached = vec![7];
    duel.state.away.active = Some(defender);
    let life_before = duel.state.away.life.len();
    let hand_before = duel.state.away.hand.len();

    duel.use_avatar_skill(Seat::Home, 1, Target::OpponentAvatar, &mut events)
        .unwrap();

    assert!(duel.state.away.active.is_none());
    assert!(duel.state.away.graveyard.contains(&4));
    assert!(duel.state.away.graveyard.contains(&7));
    assert_eq!(duel.state.away.life.len(), life_before - 1);
    assert_eq!(duel.state.away.hand.len(), hand_before + 1);
    assert!(duel.state.winner.is_none());
}

#[test]
fn defeat_with_empty_life_stack_ends_the_match() {
    let (mut duel, mut events) = fresh_duel();
    at_main1(&mut duel);
    duel.state.home.active = Some(AvatarInstance::new(3));
    duel.state.away.active = Some(AvatarInstance::new(4));
    duel.state.away.life.clear();

    duel.use_avatar_skill(Seat::Home, 1, Target::OpponentAvatar, &mut events)
        .unwrap();
    assert_eq!(duel.state.winner, Some(Seat::Home));
    let drained: Vec<Event> = events.drain().collect();
    assert!(drained.iter().any(|event| matches!(
        event,
        Event::MatchEnded {
            winner: Seat::Home,
            reason: WinReason::LifeDepleted,
        }
    )));
}

#[test]
fn shield_raises_effective_health() {
    let (mut duel, mut events) = fresh_duel();
    at_main1(&mut duel);
    duel.state.home.active = Some(AvatarInstance::new(1));
    let mut defender = AvatarInstance::new(4);
    defender.shield = 2;
    duel.state.away.active = Some(defender);
    duel.state.home.energy = vec![4];

    // 7 damage into health 5 + shield 2: exactly lethal.
    duel.use_avatar_skill(Seat::Home, 2, Target::OpponentAvatar, &mut events)
        .unwrap();
    assert!(duel.state.away.active.is_none());
}

#[test]
fn off_turn_actions_are_rejected() {
    let (mut duel, mut events) = fresh_duel();
    at_main1(&mut duel);
    duel.state.away.hand = vec![1];

    let result = duel.play_card(Seat::Away, 0, None, &mut events);
    assert!(matches!(result, Err(DuelError::NotYourTurn(Seat::Away))));
    assert_eq!(duel.state.away.hand, vec![1]);
}

#[test]
fn main_phase_actions_are_illegal_in_battle() {
    let (mut duel, mut events) = fresh_duel();
    duel.state.phase = Phase::Battle;
    duel.state.home.hand = vec![1];

    let result = duel.play_card(Seat::Home, 0, None, &mut events);
    assert!(matches!(result, Err(DuelError::IllegalPhase(Phase::Battle))));
    let result = duel.set_energy_card(Seat::Home, 0, &mut events);
    assert!(matches!(result, Err(DuelError::IllegalPhase(Phase::Battle))));
    let result = duel.draw_card(Seat::Home, &mut events);
    assert!(matches!(result, Err(DuelError::IllegalPhase(Phase::Battle))));
}

#[test]
fn life_cards_never_increase_during_play() {
    let (mut duel, mut events) = fresh_duel();
    let mut previous = (duel.state.home.life.len(), duel.state.away.life.len());
    for _ in 0..12 {
        if duel.state.winner.is_some() {
            break;
        }
        let seat = duel.state.current;
        duel.advance_phase(seat, &mut events).unwrap();
        let now = (duel.state.home.life.len(), duel.state.away.life.len());
        assert!(now.0 <= previous.0 && now.1 <= previous.1);
        previous = now;
    }
}
