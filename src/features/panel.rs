use crate::format::{
    is_meaningful,
    plain_text,
    render_html,
    Block,
};

/// The region a feature renders into: a loading line, an error line, a
/// result area and its read-aloud control.
pub trait PanelView {
    fn show_loading(&mut self, message: &str);
    fn hide_loading(&mut self);
    fn show_error(&mut self, message: &str);
    fn hide_error(&mut self);
    fn set_result(&mut self, blocks: Vec<Block>);
    fn clear_result(&mut self);
    fn set_result_visible(&mut self, visible: bool);
    fn set_read_aloud_visible(&mut self, visible: bool);
    fn result_blocks(&self) -> &[Block];
}

/// Resets the region before a request goes out.
pub fn begin_request<V: PanelView + ?Sized>(view: &mut V, loading: &str) {
    view.show_loading(loading);
    view.set_result_visible(false);
    view.clear_result();
    view.hide_error();
    view.set_read_aloud_visible(false);
}

pub fn show_failure<V: PanelView + ?Sized>(view: &mut V, message: &str) {
    view.hide_loading();
    view.show_error(message);
    view.set_result_visible(false);
    view.set_read_aloud_visible(false);
}

/// Stores `blocks` and shows them with their read-aloud control, unless the
/// rendered content is empty or a known placeholder.
pub fn show_result_and_button<V: PanelView + ?Sized>(view: &mut V, blocks: Vec<Block>) {
    view.hide_loading();
    view.hide_error();
    view.set_result(blocks);
    let visible = is_meaningful(&render_html(view.result_blocks()));
    view.set_result_visible(visible);
    view.set_read_aloud_visible(visible);
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultPanel {
    pub loading: Option<String>,
    pub error: Option<String>,
    pub blocks: Vec<Block>,
    pub result_visible: bool,
    pub read_aloud_visible: bool,
}

impl ResultPanel {
    pub fn is_loading(&self) -> bool {
        self.loading.is_some()
    }

    pub fn html(&self) -> String {
        render_html(&self.blocks)
    }

    pub fn narration(&self) -> String {
        plain_text(&self.blocks)
    }
}

impl PanelView for ResultPanel {
    fn show_loading(&mut self, message: &str) {
        self.loading = Some(message.to_string());
    }

    fn hide_loading(&mut self) {
        self.loading = None;
    }

    fn show_error(&mut self, message: &str) {
        self.error = Some(message.to_string());
    }

    fn hide_error(&mut self) {
        self.error = None;
    }

    fn set_result(&mut self, blocks: Vec<Block>) {
        self.blocks = blocks;
    }

    fn clear_result(&mut self) {
        self.blocks.clear();
    }

    fn set_result_visible(&mut self, visible: bool) {
        self.result_visible = visible;
    }

    fn set_read_aloud_visible(&mut self, visible: bool) {
        self.read_aloud_visible = visible;
    }

    fn result_blocks(&self) -> &[Block] {
        &self.blocks
    }
}


#[cfg(test)]
mod tests {
    use super::{
        testing::RecordingView,
        *,
    };

    #[test]
    fn test_begin_request_hides_everything() {
        let mut view = RecordingView::default();
        begin_request(&mut view, "Generating...");
        assert_eq!(
            view.calls,
            vec![
                "loading:Generating...",
                "result_visible:false",
                "clear_result",
                "hide_error",
                "read_aloud:false",
            ]
        );
    }

    #[test]
    fn test_placeholder_stays_hidden() {
        let mut panel = ResultPanel::default();
        show_result_and_button(&mut panel, vec![Block::Paragraph("No explanation provided.".into())]);
        assert!(!panel.result_visible);
        assert!(!panel.read_aloud_visible);

        show_result_and_button(&mut panel, vec![Block::Paragraph("Mitosis".into())]);
        assert!(panel.result_visible);
        assert!(panel.read_aloud_visible);
        assert_eq!(panel.narration(), "Mitosis");
    }

    #[test]
    fn test_failure_hides_result() {
        let mut panel = ResultPanel::default();
        show_result_and_button(&mut panel, vec![Block::Paragraph("old".into())]);
        panel.show_loading("again");
        show_failure(&mut panel, "Slow down");

        assert!(!panel.is_loading());
        assert_eq!(panel.error.as_deref(), Some("Slow down"));
        assert!(!panel.result_visible);
        assert!(!panel.read_aloud_visible);
    }
}
