//! Compiles card effect text into the core's tagged condition variants.
//! Runs once at load time; the engine never re-parses text.

use anyhow::{anyhow, bail, Result};
use avarena_core::{
    BoostFilter, CounterKind, DamageRule, Element, ItemEffect, PassiveBoost, SpellEffect,
};

pub fn parse_element(value: &str) -> Result<Element> {
    match value.trim().to_lowercase().as_str() {
        "fire" => Ok(Element::Fire),
        "water" => Ok(Element::Water),
        "ground" => Ok(Element::Ground),
        "air" => Ok(Element::Air),
        "neutral" => Ok(Element::Neutral),
        other => bail!("unknown element '{other}'"),
    }
}

pub fn parse_counter(value: &str) -> Result<CounterKind> {
    match value.trim().to_lowercase().as_str() {
        "bleed" => Ok(CounterKind::Bleed),
        "poison" => Ok(CounterKind::Poison),
        "burn" => Ok(CounterKind::Burn),
        other => bail!("unknown counter '{other}'"),
    }
}

/// Conditional damage text, e.g.
/// `"if opponent avatar has bleed counter, damage becomes 8"` or
/// `"if this avatar has burn counter, attack damage get +2"`.
pub fn compile_damage_rule(text: &str) -> Result<DamageRule> {
    let normalized = normalize(text);
    let (condition, outcome) = normalized
        .split_once(',')
        .ok_or_else(|| anyhow!("missing outcome clause in '{text}'"))?;
    let condition = condition.trim();
    let outcome = outcome.trim();

    if let Some(rest) = condition.strip_prefix("if opponent avatar has ") {
        let counter = parse_counter(strip_word(rest, " counter"))?;
        return Ok(DamageRule::BecomeIfOpponentCounter {
            counter,
            value: parse_becomes(outcome)?,
        });
    }
    if let Some(rest) = condition.strip_prefix("if opponent avatar is ") {
        if let Some(name) = rest.strip_suffix(" type") {
            return Ok(DamageRule::BecomeIfOpponentElement {
                element: parse_element(name)?,
                value: parse_becomes(outcome)?,
            });
        }
        if let Some(name) = rest.strip_suffix(" tribe") {
            return Ok(DamageRule::BecomeIfOpponentTribe {
                tribe: name.to_string(),
                value: parse_becomes(outcome)?,
            });
        }
        bail!("unrecognized opponent condition '{condition}'");
    }
    if condition == "if this avatar has equipment attached" {
        return Ok(DamageRule::BecomeIfEquipped {
            value: parse_becomes(outcome)?,
        });
    }
    if let Some(rest) = condition.strip_prefix("if this avatar has ") {
        let counter = parse_counter(strip_word(rest, " counter"))?;
        return Ok(DamageRule::AddIfSelfCounter {
            counter,
            bonus: parse_gets(outcome)?,
        });
    }
    if condition.contains("discard") {
        return Ok(DamageRule::BecomeOnDiscard {
            value: parse_becomes(outcome)?,
        });
    }
    bail!("unrecognized damage condition '{condition}'")
}

/// Passive boost text: `"active avatar has <element|tribe> X, attack damage
/// get +Y"`. A bare name that is not an element reads as a tribe.
pub fn compile_passive(text: &str) -> Result<PassiveBoost> {
    let normalized = normalize(text);
    let (condition, outcome) = normalized
        .split_once(',')
        .ok_or_else(|| anyhow!("missing outcome clause in '{text}'"))?;
    let subject = condition
        .trim()
        .strip_prefix("active avatar has ")
        .ok_or_else(|| anyhow!("unrecognized passive condition '{condition}'"))?;

    let filter = if let Some(name) = subject.strip_suffix(" type") {
        BoostFilter::Element(parse_element(name)?)
    } else if let Some(name) = subject.strip_suffix(" tribe") {
        BoostFilter::Tribe(name.to_string())
    } else if let Ok(element) = parse_element(subject) {
        BoostFilter::Element(element)
    } else {
        BoostFilter::Tribe(subject.to_string())
    };
    Ok(PassiveBoost {
        filter,
        bonus: parse_gets(outcome.trim())?,
    })
}

pub fn compile_spell_effect(text: &str) -> Result<SpellEffect> {
    let normalized = normalize(text);
    if let Some(rest) = normalized.strip_prefix("damage ") {
        return Ok(SpellEffect::Damage(parse_number(rest)?));
    }
    if let Some(rest) = normalized.strip_prefix("heal ") {
        return Ok(SpellEffect::Heal(parse_number(rest)?));
    }
    bail!("unrecognized spell effect '{text}'")
}

pub fn compile_item_effect(text: &str) -> Result<ItemEffect> {
    match normalize(text).as_str() {
        "add_energy" | "add energy" => Ok(ItemEffect::AddEnergy),
        "inert" | "none" => Ok(ItemEffect::Inert),
        other => bail!("unrecognized item effect '{other}'"),
    }
}

fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn strip_word<'a>(text: &'a str, suffix: &str) -> &'a str {
    text.strip_suffix(suffix).unwrap_or(text)
}

fn parse_becomes(outcome: &str) -> Result<i64> {
    let rest = outcome
        .strip_prefix("damage becomes ")
        .ok_or_else(|| anyhow!("expected 'damage becomes N', got '{outcome}'"))?;
    parse_number(rest)
}

fn parse_gets(outcome: &str) -> Result<i64> {
    let rest = outcome
        .strip_prefix("attack damage get ")
        .or_else(|| outcome.strip_prefix("attack damage gets "))
        .ok_or_else(|| anyhow!("expected 'attack damage get +N', got '{outcome}'"))?;
    parse_number(rest.trim_start_matches('+'))
}

fn parse_number(value: &str) -> Result<i64> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| anyhow!("expected a number, got '{value}'"))
}
