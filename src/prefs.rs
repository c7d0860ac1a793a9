use std::collections::HashSet;

use crate::cards::CardDefinition;

/// A user's saved dashboard preference. Absent until the first save; the
/// saved order may still reference cards that were since retired.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiConfig {
    pub order: Vec<String>,
    pub hidden: HashSet<String>,
}

/// One dashboard slot after the merge: the card plus whether the user has
/// toggled it off.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardPlacement {
    pub card: CardDefinition,
    pub visible: bool,
}

/// Merges the saved preference over the entitlement list.
///
/// Keys the user has ordered come first, in their saved order; cards the
/// user has never seen follow in catalog order. Retired keys in the saved
/// order are dropped without complaint, and only explicitly hidden keys
/// lose visibility.
pub fn apply_config(eligible: &[CardDefinition], config: Option<&UiConfig>) -> Vec<CardPlacement> {
    let Some(config) = config else {
        return eligible
            .iter()
            .map(|&card| CardPlacement {
                card,
                visible: true,
            })
            .collect();
    };

    let mut placed: Vec<CardDefinition> = Vec::with_capacity(eligible.len());
    for key in &config.order {
        let Some(&card) = eligible.iter().find(|c| c.key == key.as_str()) else {
            continue;
        };
        // The saved order comes off the wire; tolerate a duplicated key.
        if !placed.iter().any(|c| c.key == card.key) {
            placed.push(card);
        }
    }
    for &card in eligible {
        if !placed.iter().any(|c| c.key == card.key) {
            placed.push(card);
        }
    }

    placed
        .into_iter()
        .map(|card| CardPlacement {
            visible: !config.hidden.contains(card.key),
            card,
        })
        .collect()
}
