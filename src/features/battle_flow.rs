use serde_json::Value;

use super::{
    decode,
    non_blank,
    panel::show_result_and_button,
    PanelView,
    RequestFeature,
    ResultPanel,
    Submission,
};
use crate::{
    api::{
        types::{
            BattleRequest,
            FlowResponse,
        },
        Endpoint,
        RequestBody,
    },
    core::StudyError,
    format::format_blocks,
};

#[derive(Debug, Default)]
pub struct BattleFlow<V: PanelView = ResultPanel> {
    pub battle: Option<String>,
    /// Set once the wheel has picked a battle; the selection is then read-only.
    pub locked: bool,
    pub view: V,
}

impl<V: PanelView> BattleFlow<V> {
    pub fn choose(&mut self, battle: &str) {
        if !self.locked {
            self.battle = Some(battle.to_string());
        }
    }

    pub fn unlock(&mut self) {
        self.locked = false;
    }

    pub fn apply_wheel_selection(&mut self, battle: &str) {
        self.battle = Some(battle.to_string());
        self.locked = true;
    }
}

impl<V: PanelView> RequestFeature for BattleFlow<V> {
    type View = V;

    fn name(&self) -> &'static str {
        "BattleFlow"
    }

    fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    fn prepare(&mut self) -> Result<Submission, StudyError> {
        let battle = non_blank(self.battle.as_deref())
            .ok_or_else(|| StudyError::validation("Please select a battle from the list."))?;
        let body = RequestBody::json(&BattleRequest { battle })?;
        Ok(Submission::new(Endpoint::BattleFlow, body, "Generating event flow..."))
    }

    fn render(&mut self, value: Value) -> Result<(), StudyError> {
        let response: FlowResponse = decode(value, "Received an invalid event flow from the server.")?;
        let blocks = response.flow.as_deref().map(format_blocks).unwrap_or_default();
        show_result_and_button(&mut self.view, blocks);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{
        features::{
            receive,
            submit,
        },
        format::{
            Block,
            ListKind,
        },
    };

    #[test]
    fn test_requires_battle() {
        let mut flow = BattleFlow::<ResultPanel>::default();
        assert!(submit(&mut flow).is_empty());
        assert_eq!(flow.view.error.as_deref(), Some("Please select a battle from the list."));
    }

    #[test]
    fn test_wheel_selection_locks_choice() {
        let mut flow = BattleFlow::<ResultPanel>::default();
        flow.apply_wheel_selection("Battle of Plassey");
        flow.choose("Battle of Midway");
        assert_eq!(flow.battle.as_deref(), Some("Battle of Plassey"));

        flow.unlock();
        flow.choose("Battle of Midway");
        assert_eq!(flow.battle.as_deref(), Some("Battle of Midway"));
    }

    #[test]
    fn test_flow_is_formatted() {
        let mut flow = BattleFlow::<ResultPanel>::default();
        flow.choose("Battle of Hastings");
        assert_eq!(submit(&mut flow).len(), 1);

        receive(&mut flow, Ok(json!({ "flow": "1. Landing\n2. Battle\nWilliam won." })));

        assert_eq!(
            flow.view.blocks,
            vec![
                Block::List { kind: ListKind::Numbered, items: vec!["Landing".into(), "Battle".into()] },
                Block::Paragraph("William won.".into()),
            ]
        );
        assert!(flow.view.read_aloud_visible);
    }
}
