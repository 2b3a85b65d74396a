use crate::effect_text::{
    compile_damage_rule, compile_item_effect, compile_passive, compile_spell_effect, parse_element,
};
use crate::schema::{CardsFile, DeckList, DecksFile, RawCard, RawDeck, RawSkill};
use anyhow::{bail, Context, Result};
use avarena_core::{CardDef, CardKind, Catalog, Element, ItemEffect, Skill};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

const CARDS_FILE: &str = "cards.json";
const DECKS_FILE: &str = "decks.json";

const STARTER_CARDS: &str = include_str!("../assets/cards.json");
const STARTER_DECKS: &str = include_str!("../assets/decks.json");

pub fn load_catalog(dir: &Path) -> Result<Catalog> {
    let file: CardsFile = load_json(dir.join(CARDS_FILE))?;
    build_catalog(file)
}

pub fn load_decks(dir: &Path, catalog: &Catalog) -> Result<Vec<DeckList>> {
    let file: DecksFile = load_json(dir.join(DECKS_FILE))?;
    build_decks(file, catalog)
}

/// The embedded starter set, always available without any asset directory.
pub fn starter_catalog() -> Result<Catalog> {
    let file: CardsFile = serde_json::from_str(STARTER_CARDS).context("parse starter cards")?;
    build_catalog(file)
}

pub fn starter_decks(catalog: &Catalog) -> Result<Vec<DeckList>> {
    let file: DecksFile = serde_json::from_str(STARTER_DECKS).context("parse starter decks")?;
    build_decks(file, catalog)
}

fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))
}

fn build_catalog(file: CardsFile) -> Result<Catalog> {
    let mut cards = Vec::with_capacity(file.cards.len());
    for raw in file.cards {
        let card = build_card(raw)?;
        cards.push(card);
    }
    Catalog::from_cards(cards).context("assemble catalog")
}

fn build_card(raw: RawCard) -> Result<CardDef> {
    let element = parse_element(&raw.element)
        .with_context(|| format!("card {} '{}'", raw.id, raw.name))?;
    let cost = parse_cost(&raw.cost)?;
    let kind = match raw.category.to_lowercase().as_str() {
        "avatar" => build_avatar(&raw)?,
        "spell" => CardKind::Spell {
            cost,
            effect: required_spell_effect(&raw)?,
        },
        "quick-spell" | "quick_spell" => CardKind::QuickSpell {
            cost,
            effect: required_spell_effect(&raw)?,
        },
        "equipment" => CardKind::Equipment { cost },
        "ritual-armor" | "ritual_armor" => CardKind::RitualArmor { cost },
        "field" => CardKind::Field { cost },
        "item" => CardKind::Item {
            cost,
            effect: match &raw.effect {
                Some(text) => compile_item_effect(text)
                    .with_context(|| format!("card {} '{}'", raw.id, raw.name))?,
                None => ItemEffect::Inert,
            },
        },
        other => bail!("card {} '{}': unknown category '{}'", raw.id, raw.name, other),
    };

    let mut passives = Vec::new();
    if let Some(text) = &raw.passive {
        for clause in text.split(';') {
            let passive = compile_passive(clause)
                .with_context(|| format!("card {} '{}'", raw.id, raw.name))?;
            passives.push(passive);
        }
    }

    Ok(CardDef {
        id: raw.id,
        name: raw.name,
        element,
        kind,
        passives,
    })
}

fn build_avatar(raw: &RawCard) -> Result<CardKind> {
    let level = raw.level.unwrap_or(1);
    let tribe = raw
        .tribe
        .clone()
        .with_context(|| format!("avatar {} '{}' missing tribe", raw.id, raw.name))?
        .to_lowercase();
    let health = raw
        .health
        .with_context(|| format!("avatar {} '{}' missing health", raw.id, raw.name))?;
    if raw.skills.is_empty() || raw.skills.len() > 2 {
        bail!(
            "avatar {} '{}' must define one or two skills",
            raw.id,
            raw.name
        );
    }
    let mut skills = Vec::with_capacity(raw.skills.len());
    for raw_skill in &raw.skills {
        skills.push(build_skill(raw, raw_skill)?);
    }
    Ok(CardKind::Avatar {
        level,
        tribe,
        health,
        skills,
    })
}

fn build_skill(raw: &RawCard, raw_skill: &RawSkill) -> Result<Skill> {
    let cost = parse_cost(&raw_skill.cost)?;
    let mut rules = Vec::new();
    if let Some(text) = &raw_skill.effect {
        for clause in text.split(';') {
            let rule = compile_damage_rule(clause).with_context(|| {
                format!("card {} '{}' skill '{}'", raw.id, raw.name, raw_skill.name)
            })?;
            rules.push(rule);
        }
    }
    Ok(Skill {
        name: raw_skill.name.clone(),
        cost,
        base_damage: raw_skill.damage,
        rules,
    })
}

fn parse_cost(entries: &[String]) -> Result<Vec<Element>> {
    entries.iter().map(|entry| parse_element(entry)).collect()
}

fn required_spell_effect(raw: &RawCard) -> Result<avarena_core::SpellEffect> {
    let text = raw
        .effect
        .as_deref()
        .with_context(|| format!("spell {} '{}' missing effect", raw.id, raw.name))?;
    compile_spell_effect(text).with_context(|| format!("card {} '{}'", raw.id, raw.name))
}

fn build_decks(file: DecksFile, catalog: &Catalog) -> Result<Vec<DeckList>> {
    file.decks
        .into_iter()
        .map(|raw| build_deck(raw, catalog))
        .collect()
}

fn build_deck(raw: RawDeck, catalog: &Catalog) -> Result<DeckList> {
    let mut cards = Vec::new();
    for entry in &raw.cards {
        if !catalog.contains(entry.card) {
            bail!("deck '{}' references unknown card {}", raw.id, entry.card);
        }
        for _ in 0..entry.count {
            cards.push(entry.card);
        }
    }
    Ok(DeckList {
        id: raw.id,
        name: raw.name,
        cards,
    })
}
