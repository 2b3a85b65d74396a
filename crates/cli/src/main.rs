use anyhow::{anyhow, Context, Result};
use avarena_autoplay::{GreedyPolicy, Simulator, StepRecord};
use avarena_core::{DuelState, Event, EventBus, MatchState, Seat, Target};
use avarena_data::starter_decks;
use serde::Serialize;
use std::io::{self, BufRead, Write};

#[derive(Serialize)]
struct SnapshotFile<'a> {
    seed: u64,
    state: &'a MatchState,
}

const HELP: &str = "commands:
  b, board          show the board
  h, hand           show your hand
  n, next           advance phase (from main 2 this ends your turn)
  play <i> [own|opp]   play hand card i (attachments and spells need a target)
  energy <i>        spend hand avatar i as energy
  switch <i>        swap reserve i into the active slot (1 energy)
  skill <1|2> [own|opp]   use the active avatar's skill (default opp)
  dump              JSON snapshot of the match state
  save <path>       write the snapshot to a file
  q, quit           leave";

fn main() -> Result<()> {
    let seed = parse_seed().context("parse --seed")?;
    let catalog = avarena_data::starter_catalog()?;
    let decks = starter_decks(&catalog)?;
    let home = decks
        .first()
        .ok_or_else(|| anyhow!("starter set has no decks"))?;
    let away = decks.get(1).unwrap_or(home);

    let mut events = EventBus::default();
    let mut duel = DuelState::new(
        catalog,
        home.cards.clone(),
        away.cards.clone(),
        seed,
        &mut events,
    )?;
    println!("avarena - {} vs {} (seed {seed})", home.name, away.name);
    println!("type 'help' for commands");

    // Open the first turn: refresh and the forced draw take no input.
    let result = duel.advance_phase(Seat::Home, &mut events);
    report(&duel, result);
    print_events(&duel, &mut events);

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        if duel.state.winner.is_some() {
            print_board(&duel);
            break;
        }
        print!("> ");
        io::stdout().flush()?;
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some(&command) = parts.first() else {
            continue;
        };
        match command {
            "q" | "quit" | "exit" => break,
            "help" | "?" => println!("{HELP}"),
            "b" | "board" => print_board(&duel),
            "h" | "hand" => print_hand(&duel),
            "dump" => println!("{}", serde_json::to_string_pretty(&duel.state)?),
            "save" => match parts.get(1) {
                Some(path) => {
                    let snapshot = SnapshotFile {
                        seed,
                        state: &duel.state,
                    };
                    let json = serde_json::to_string_pretty(&snapshot)?;
                    match std::fs::write(path, json) {
                        Ok(()) => println!("saved to {path}"),
                        Err(err) => println!("save failed: {err}"),
                    }
                }
                None => println!("usage: save <path>"),
            },
            "n" | "next" => {
                let result = duel.advance_phase(Seat::Home, &mut events);
                report(&duel, result);
                print_events(&duel, &mut events);
            }
            "play" => {
                let index = parse_index(&parts, 1);
                let target = parse_target(&parts, 2);
                match index {
                    Some(index) => {
                        let result = duel.play_card(Seat::Home, index, target, &mut events);
                        report(&duel, result)
                    }
                    None => println!("usage: play <i> [own|opp]"),
                }
                print_events(&duel, &mut events);
            }
            "energy" => {
                match parse_index(&parts, 1) {
                    Some(index) => {
                        let result = duel.set_energy_card(Seat::Home, index, &mut events);
                        report(&duel, result)
                    }
                    None => println!("usage: energy <i>"),
                }
                print_events(&duel, &mut events);
            }
            "switch" => {
                match parse_index(&parts, 1) {
                    Some(index) => {
                        let result = duel.switch_avatar(Seat::Home, index, &mut events);
                        report(&duel, result)
                    }
                    None => println!("usage: switch <i>"),
                }
                print_events(&duel, &mut events);
            }
            "skill" => {
                let slot = parse_index(&parts, 1);
                let target = parse_target(&parts, 2).unwrap_or(Target::OpponentAvatar);
                match slot {
                    Some(slot) => {
                        let result = duel
                            .use_avatar_skill(Seat::Home, slot, target, &mut events)
                            .map(|_| ());
                        report(&duel, result)
                    }
                    None => println!("usage: skill <1|2> [own|opp]"),
                }
                print_events(&duel, &mut events);
            }
            other => println!("unknown command '{other}' (try 'help')"),
        }

        if duel.state.winner.is_none() && duel.state.current == Seat::Away {
            run_opponent_turn(&mut duel, &mut events);
        }
    }

    if let Some(winner) = duel.state.winner {
        println!("match over: {winner:?} wins");
    }
    Ok(())
}

fn parse_seed() -> Result<u64> {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--seed" {
            let value = args.next().ok_or_else(|| anyhow!("--seed needs a value"))?;
            return value.parse().context("seed must be a number");
        }
    }
    Ok(7)
}

fn parse_index(parts: &[&str], position: usize) -> Option<usize> {
    parts.get(position).and_then(|raw| raw.parse().ok())
}

fn parse_target(parts: &[&str], position: usize) -> Option<Target> {
    match parts.get(position).copied() {
        Some("own") | Some("self") => Some(Target::OwnAvatar),
        Some("opp") | Some("opponent") => Some(Target::OpponentAvatar),
        _ => None,
    }
}

fn run_opponent_turn(duel: &mut DuelState, events: &mut EventBus) {
    let simulator = Simulator::new();
    let mut policy = GreedyPolicy;
    let mut trace: Vec<StepRecord> = Vec::new();
    match simulator.run_turn(duel, &mut policy, events, &mut trace) {
        Ok(()) => {
            for step in &trace {
                println!("  opponent: {}", step.action.short_label());
            }
        }
        Err(err) => println!("opponent turn failed: {err}"),
    }
    print_events(duel, events);
}

fn report(_duel: &DuelState, result: Result<(), avarena_core::DuelError>) {
    if let Err(err) = result {
        println!("rejected: {err}");
    }
}

fn card_name(duel: &DuelState, id: avarena_core::CardId) -> &str {
    duel.catalog
        .card(id)
        .map(|def| def.name.as_str())
        .unwrap_or("<unknown>")
}

fn print_events(duel: &DuelState, events: &mut EventBus) {
    for event in events.drain() {
        match event {
            Event::CardDrawn { seat, deck_left } => {
                println!("  {seat:?} drew a card ({deck_left} left in deck)");
            }
            Event::LifeCardRecycled { seat, life_left } => {
                println!("  {seat:?} recycled a life card into the deck ({life_left} left)");
            }
            Event::CardPlayed { seat, card } => {
                println!("  {seat:?} played {}", card_name(duel, card));
            }
            Event::SkillUsed {
                seat,
                skill,
                damage,
                ..
            } => {
                println!("  {seat:?} used {skill} for {damage}");
            }
            Event::AvatarDefeated { seat, card } => {
                println!("  {seat:?}'s {} was defeated", card_name(duel, card));
            }
            Event::LifeCardTaken { seat, life_left } => {
                println!("  {seat:?} took a life card into hand ({life_left} left)");
            }
            Event::MatchEnded { winner, reason } => {
                println!("  match ended: {winner:?} wins ({reason:?})");
            }
            _ => {}
        }
    }
}

fn print_board(duel: &DuelState) {
    let state = &duel.state;
    println!(
        "turn {} - {:?}'s {:?} phase",
        state.turn, state.current, state.phase
    );
    for seat in [Seat::Away, Seat::Home] {
        let player = state.player(seat);
        let active = match &player.active {
            Some(instance) => {
                let health = duel
                    .catalog
                    .card(instance.card)
                    .and_then(|def| def.avatar_health())
                    .unwrap_or(0);
                format!(
                    "{} {}/{}{}",
                    card_name(duel, instance.card),
                    instance.damage,
                    health + instance.shield,
                    if instance.tapped { " (tapped)" } else { "" }
                )
            }
            None => "-".to_string(),
        };
        println!(
            "  {seat:?}: active {active} | reserves {} | hand {} | energy {} | life {} | deck {} | grave {}",
            player.reserves.len(),
            player.hand.len(),
            player.energy.len(),
            player.life.len(),
            player.deck.len(),
            player.graveyard.len()
        );
    }
}

fn print_hand(duel: &DuelState) {
    for (index, id) in duel.state.home.hand.iter().enumerate() {
        println!("  [{index}] {}", card_name(duel, *id));
    }
}
