use eframe::egui;

/// A titled dialog over a dimmed backdrop that edits a `T` in place.
pub struct Modal<T> {
    id: egui::Id,
    title: String,
    open: bool,
    data: T,
    width: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ModalResult<R> {
    Done(R),
    Cancelled,
}

impl<T> Modal<T> {
    pub fn new(title: impl Into<String>, data: T) -> Self {
        let title = title.into();
        let id = egui::Id::new(("modal", &title));
        Self { id, title, open: false, data, width: 320.0 }
    }

    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn data_mut(&mut self) -> &mut T {
        &mut self.data
    }

    /// Draws the dialog. Escape or a backdrop click cancels it, and any
    /// result closes it.
    pub fn show<R>(
        &mut self,
        ctx: &egui::Context,
        content: impl FnOnce(&mut egui::Ui, &mut T) -> Option<ModalResult<R>>,
    ) -> Option<ModalResult<R>> {
        if !self.open {
            return None;
        }

        let title = &self.title;
        let width = self.width;
        let data = &mut self.data;
        let response = egui::Modal::new(self.id).show(ctx, |ui| {
            ui.set_width(width);
            ui.heading(title);
            ui.separator();
            content(ui, data)
        });

        let result = match response.inner {
            Some(result) => Some(result),
            None if response.should_close() => Some(ModalResult::Cancelled),
            None => None,
        };
        if result.is_some() {
            self.open = false;
        }
        result
    }
}
