use avarena_autoplay::{
    trace_to_json, AutoAction, GreedyPolicy, Policy, ScriptedPolicy, Simulator, StepRecord,
};
use avarena_core::{
    AvatarInstance, CardDef, CardId, CardKind, Catalog, DuelState, Element, EventBus, Phase, Seat,
    Skill, Target,
};

fn fighter(id: CardId, name: &str) -> CardDef {
    CardDef {
        id,
        name: name.to_string(),
        element: Element::Neutral,
        kind: CardKind::Avatar {
            level: 1,
            tribe: "prowler".to_string(),
            health: 8,
            skills: vec![Skill {
                name: "Strike".to_string(),
                cost: Vec::new(),
                base_damage: 3,
                rules: Vec::new(),
            }],
        },
        passives: Vec::new(),
    }
}

fn catalog() -> Catalog {
    Catalog::from_cards(vec![fighter(1, "Drudge"), fighter(2, "Scrapper")]).unwrap()
}

fn deck() -> Vec<CardId> {
    let mut cards = vec![1; 20];
    cards.extend(vec![2; 20]);
    cards
}

fn fresh_duel() -> (DuelState, EventBus) {
    let mut events = EventBus::default();
    let duel = DuelState::new(catalog(), deck(), deck(), 21, &mut events).unwrap();
    (duel, events)
}

#[test]
fn scripted_policy_fields_an_avatar_and_passes() {
    let (mut duel, mut events) = fresh_duel();
    let simulator = Simulator::new();
    let mut policy = ScriptedPolicy;
    let mut trace: Vec<StepRecord> = Vec::new();

    simulator
        .run_turn(&mut duel, &mut policy, &mut events, &mut trace)
        .unwrap();

    assert!(duel.state.home.active.is_some());
    assert_eq!(duel.state.current, Seat::Away);
    assert!(trace
        .iter()
        .any(|step| matches!(step.action, AutoAction::PlayCard { .. })));
    assert!(trace
        .iter()
        .any(|step| matches!(step.action, AutoAction::EndTurn)));

    let json = trace_to_json(&trace).unwrap();
    assert!(json.contains("EndTurn"));
}

#[test]
fn scripted_policy_passes_when_an_avatar_is_fielded() {
    let (mut duel, _) = fresh_duel();
    duel.state.phase = Phase::Main1;
    duel.state.home.active = Some(AvatarInstance::new(1));

    let mut policy = ScriptedPolicy;
    assert_eq!(policy.decide(&duel, Seat::Home), AutoAction::EndTurn);
}

#[test]
fn greedy_policy_attacks_an_exposed_defender() {
    let (mut duel, mut events) = fresh_duel();
    duel.state.phase = Phase::Main1;
    duel.state.home.active = Some(AvatarInstance::new(1));
    duel.state.away.active = Some(AvatarInstance::new(2));

    let mut policy = GreedyPolicy;
    let action = policy.decide(&duel, Seat::Home);
    assert_eq!(
        action,
        AutoAction::UseSkill {
            slot: 1,
            target: Target::OpponentAvatar,
        }
    );

    let simulator = Simulator::new();
    simulator
        .apply(&mut duel, Seat::Home, &action, &mut events)
        .unwrap();
    assert_eq!(duel.state.away.active.as_ref().unwrap().damage, 3);
    assert!(duel.state.home.active.as_ref().unwrap().tapped);
}

#[test]
fn policies_only_issue_legal_actions() {
    let (mut duel, mut events) = fresh_duel();
    let simulator = Simulator::new();
    let mut policy = GreedyPolicy;
    let mut trace: Vec<StepRecord> = Vec::new();

    for _ in 0..6 {
        if duel.state.winner.is_some() {
            break;
        }
        simulator
            .run_turn(&mut duel, &mut policy, &mut events, &mut trace)
            .unwrap();
    }
}

#[test]
fn full_match_reaches_a_winner() {
    let (mut duel, mut events) = fresh_duel();
    let simulator = Simulator::new();
    let mut home = GreedyPolicy;
    let mut away = GreedyPolicy;
    let mut trace: Vec<StepRecord> = Vec::new();

    let winner = simulator
        .run_match(&mut duel, &mut home, &mut away, 60, &mut events, &mut trace)
        .unwrap();
    assert!(winner.is_some());
    assert_eq!(winner, duel.state.winner);

    // Energy never goes negative and life stacks only shrink.
    for seat in [Seat::Home, Seat::Away] {
        assert!(duel.state.player(seat).life.len() <= 4);
    }
}
