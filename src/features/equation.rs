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
            EquationRequest,
            EquationResponse,
        },
        Endpoint,
        RequestBody,
    },
    core::{
        RequestFailure,
        StudyError,
    },
    format::format_blocks,
};

pub const NO_BALANCE_MESSAGE: &str = "Could not determine balanced equation.";
pub const NO_EXPLANATION_MESSAGE: &str = "No explanation provided.";

#[derive(Debug, Default)]
pub struct EquationBalancer<V: PanelView = ResultPanel> {
    pub equation: String,
    pub balanced: Option<String>,
    pub view: V,
}

impl<V: PanelView> RequestFeature for EquationBalancer<V> {
    type View = V;

    fn name(&self) -> &'static str {
        "Equation"
    }

    fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    fn prepare(&mut self) -> Result<Submission, StudyError> {
        let equation = non_blank(Some(&self.equation))
            .ok_or_else(|| StudyError::validation("Please enter an unbalanced chemical equation."))?;
        let body = RequestBody::json(&EquationRequest { equation })?;
        self.balanced = None;
        Ok(Submission::new(Endpoint::BalanceEquation, body, "Balancing equation..."))
    }

    fn render(&mut self, value: Value) -> Result<(), StudyError> {
        let response: EquationResponse =
            decode(value, "Received an invalid equation result from the server.")?;

        self.balanced = Some(
            non_blank(response.balanced_equation.as_deref())
                .unwrap_or(NO_BALANCE_MESSAGE)
                .to_string(),
        );

        let explanation =
            non_blank(response.explanation.as_deref()).unwrap_or(NO_EXPLANATION_MESSAGE);
        // The fallback text is not meaningful, so read-aloud stays hidden for it.
        show_result_and_button(&mut self.view, format_blocks(explanation));
        self.view.set_result_visible(true);
        Ok(())
    }

    fn on_failure(&mut self, failure: &RequestFailure) {
        self.balanced = None;
        super::panel::show_failure(&mut self.view, &failure.message);
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::features::{
        receive,
        submit,
    };

    #[test]
    fn test_balanced_with_explanation() {
        let mut balancer = EquationBalancer::<ResultPanel>::default();
        balancer.equation = "H2 + O2 -> H2O".into();
        assert_eq!(submit(&mut balancer).len(), 1);

        receive(
            &mut balancer,
            Ok(json!({
                "balanced_equation": "2H2 + O2 -> 2H2O",
                "explanation": "- Balance oxygen\n- Then hydrogen"
            })),
        );
        assert_eq!(balancer.balanced.as_deref(), Some("2H2 + O2 -> 2H2O"));
        assert!(balancer.view.result_visible);
        assert!(balancer.view.read_aloud_visible);
        assert_eq!(balancer.view.narration(), "Balance oxygen\nThen hydrogen");
    }

    #[test]
    fn test_fallbacks_hide_read_aloud() {
        let mut balancer = EquationBalancer::<ResultPanel>::default();
        balancer.equation = "Fe + O2".into();
        submit(&mut balancer);
        receive(&mut balancer, Ok(json!({ "explanation": "  " })));

        assert_eq!(balancer.balanced.as_deref(), Some(NO_BALANCE_MESSAGE));
        assert!(balancer.view.result_visible);
        assert!(!balancer.view.read_aloud_visible);
        assert_eq!(balancer.view.narration(), NO_EXPLANATION_MESSAGE);
    }
}
