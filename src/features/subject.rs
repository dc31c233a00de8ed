use serde::{
    Deserialize,
    Serialize,
};

use super::{
    simulation::{
        Simulation,
        CHEMISTRY_SIMULATIONS,
        PHYSICS_SIMULATIONS,
    },
    workspace::Tool,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subject {
    #[default]
    Physics,
    History,
    Geography,
    Chemistry,
    Biology,
}

const SHARED_TOOLS: [Tool; 6] =
    [Tool::Summary, Tool::Visualize, Tool::Quiz, Tool::Crossword, Tool::Writing, Tool::Flashcards];

impl Subject {
    pub const ALL: [Subject; 5] =
        [Subject::Physics, Subject::History, Subject::Geography, Subject::Chemistry, Subject::Biology];

    pub fn slug(&self) -> &'static str {
        match self {
            Subject::Physics => "physics",
            Subject::History => "history",
            Subject::Geography => "geography",
            Subject::Chemistry => "chemistry",
            Subject::Biology => "biology",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Subject::Physics => "Physics",
            Subject::History => "History",
            Subject::Geography => "Geography",
            Subject::Chemistry => "Chemistry",
            Subject::Biology => "Biology",
        }
    }

    /// Panels on this subject's page, in display order.
    pub fn tools(&self) -> Vec<Tool> {
        let mut tools = SHARED_TOOLS.to_vec();
        match self {
            Subject::History => tools.insert(0, Tool::BattleFlow),
            Subject::Geography => tools.insert(0, Tool::Map),
            Subject::Chemistry => tools.insert(0, Tool::Equation),
            Subject::Biology => tools.insert(0, Tool::Biology),
            Subject::Physics => {}
        }
        tools
    }

    pub fn simulations(&self) -> &'static [Simulation] {
        match self {
            Subject::Physics => &PHYSICS_SIMULATIONS,
            Subject::Chemistry => &CHEMISTRY_SIMULATIONS,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_matches_serde_name() {
        for subject in Subject::ALL {
            let encoded = serde_json::to_value(subject).unwrap();
            assert_eq!(encoded, serde_json::Value::from(subject.slug()));
        }
    }

    #[test]
    fn test_page_tool_sets() {
        assert_eq!(Subject::History.tools()[0], Tool::BattleFlow);
        assert!(!Subject::Physics.tools().contains(&Tool::BattleFlow));
        assert_eq!(Subject::Geography.tools()[0], Tool::Map);
        assert_eq!(Subject::Chemistry.tools()[0], Tool::Equation);
        assert_eq!(Subject::Biology.tools()[0], Tool::Biology);
        for subject in Subject::ALL {
            assert!(subject.tools().contains(&Tool::Summary));
            assert!(subject.tools().contains(&Tool::Flashcards));
        }
    }

    #[test]
    fn test_simulations_by_subject() {
        assert_eq!(Subject::Physics.simulations().len(), 4);
        assert_eq!(Subject::Chemistry.simulations()[0].id, "copper-brass");
        assert!(Subject::History.simulations().is_empty());
    }
}
