mod builtin;


use crate::model::Scenario;

use builtin::SCENARIOS;

/// Every built-in scenario, always in the same order.
pub fn list_scenarios() -> &'static [Scenario] {
    &SCENARIOS
}

pub fn default_scenario() -> &'static Scenario {
    &SCENARIOS[0]
}

pub fn find_scenario(id: &str) -> Option<&'static Scenario> {
    SCENARIOS.iter().find(|scenario| scenario.id == id)
}
