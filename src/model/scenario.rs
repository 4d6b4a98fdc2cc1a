use serde::Serialize;

use super::IconKind;

/// Named analysis preset. Catalog entries are `'static` and never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Scenario {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: IconKind,
    pub prompt: &'static str,
    pub system_instruction: Option<&'static str>,
}

impl Scenario {
    /// Instruction actually sent: a non-blank override wins, otherwise the default prompt.
    pub fn effective_instruction<'a>(&'a self, instruction_override: &'a str) -> &'a str {
        if instruction_override.trim().is_empty() {
            self.prompt
        } else {
            instruction_override
        }
    }
}
