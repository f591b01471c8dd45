//! Task templates compiled into the binary.

use crate::error::TemplateError;

use super::template::parse_template;
use super::types::TaskDescriptor;

/// A named, built-in task template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    pub name: &'static str,
    pub description: &'static str,
    source: &'static str,
}

impl Preset {
    pub fn tasks(&self) -> Result<Vec<TaskDescriptor>, TemplateError> {
        parse_template(self.source)
    }
}

const PRESETS: &[Preset] = &[
    Preset {
        name: "game-components",
        description: "RPG UI: chat, player profile, inventory, battle system, quest board",
        source: include_str!("presets/game-components.json"),
    },
    Preset {
        name: "web-app",
        description: "Web app: dashboard page, settings page, data table",
        source: include_str!("presets/web-app.json"),
    },
];

/// Built-in presets, sorted by name.
pub fn presets() -> &'static [Preset] {
    PRESETS
}

pub fn load_preset(name: &str) -> Result<Vec<TaskDescriptor>, TemplateError> {
    let wanted = name.trim();
    PRESETS
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(wanted))
        .ok_or_else(|| TemplateError::UnknownPreset {
            name: wanted.to_string(),
            available: PRESETS
                .iter()
                .map(|p| p.name)
                .collect::<Vec<_>>()
                .join(", "),
        })?
        .tasks()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::types::Complexity;
    use std::collections::HashSet;

    #[test]
    fn every_preset_parses_with_unique_destinations() {
        for preset in presets() {
            let tasks = preset.tasks().unwrap();
            assert!(!tasks.is_empty(), "{} is empty", preset.name);
            let destinations: HashSet<_> = tasks.iter().map(|t| &t.destination).collect();
            assert_eq!(destinations.len(), tasks.len(), "{}", preset.name);
        }
    }

    #[test]
    fn names_are_sorted() {
        let names: Vec<_> = presets().iter().map(|p| p.name).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn game_components_marks_battle_system_complex() {
        let tasks = load_preset("Game-Components").unwrap();
        assert_eq!(tasks.len(), 5);
        let battle = tasks.iter().find(|t| t.name == "BattleSystem.tsx").unwrap();
        assert_eq!(battle.complexity, Some(Complexity::Complex));
    }

    #[test]
    fn unknown_preset_lists_available() {
        let err = load_preset("mobile").unwrap_err();
        assert!(matches!(err, TemplateError::UnknownPreset { .. }));
        assert!(err.to_string().contains("game-components, web-app"));
    }
}
