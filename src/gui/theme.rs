use eframe::egui::{
    self,
    RichText,
    Ui,
};
use egui::{
    style::{
        Selection,
        WidgetVisuals,
    },
    Color32,
    Stroke,
    Visuals,
};

/// Study palettes for both egui theme variants: a chalkboard for dark mode
/// and a paper notebook for light mode.
#[derive(Clone)]
pub struct Theme {
    dark: Palette,
    light: Palette,
}

impl Default for Theme {
    fn default() -> Self {
        Self { dark: Palette::chalkboard(), light: Palette::notebook() }
    }
}

impl Theme {
    fn palette(&self, ui: &Ui) -> &Palette {
        if ui.visuals().dark_mode {
            &self.dark
        } else {
            &self.light
        }
    }

    pub fn heading(&self, ui: &Ui, content: &str) -> RichText {
        RichText::new(content).color(self.palette(ui).heading).strong()
    }

    /// Glossary terms: flashcards, crossword words, balanced equations.
    pub fn term(&self, ui: &Ui, content: &str) -> RichText {
        RichText::new(content).color(self.palette(ui).term).strong()
    }

    pub fn correct(&self, ui: &Ui) -> Color32 {
        self.palette(ui).correct
    }

    pub fn incorrect(&self, ui: &Ui) -> Color32 {
        self.palette(ui).incorrect
    }

    pub fn warning(&self, ui: &Ui) -> Color32 {
        self.palette(ui).term
    }

    pub fn muted(&self, ui: &Ui) -> Color32 {
        self.palette(ui).muted
    }

    pub fn accent(&self, ui: &Ui) -> Color32 {
        self.palette(ui).accent
    }
}

#[derive(Clone)]
struct Palette {
    window: Color32,
    panel: Color32,
    sunken: Color32,
    raised: Color32,
    raised_hover: Color32,
    border: Color32,
    text: Color32,
    highlight: Color32,
    muted: Color32,
    heading: Color32,
    term: Color32,
    correct: Color32,
    incorrect: Color32,
    accent: Color32,
}

impl Palette {
    fn chalkboard() -> Self {
        Self {
            window: Color32::from_rgb(34, 43, 40),
            panel: Color32::from_rgb(29, 37, 35),
            sunken: Color32::from_rgb(22, 29, 27),
            raised: Color32::from_rgb(48, 59, 55),
            raised_hover: Color32::from_rgb(61, 74, 69),
            border: Color32::from_rgb(70, 84, 79),
            text: Color32::from_rgb(226, 229, 219),
            highlight: Color32::from_rgb(74, 96, 88),
            muted: Color32::from_rgb(135, 150, 143),
            heading: Color32::from_rgb(242, 214, 117),
            term: Color32::from_rgb(240, 167, 98),
            correct: Color32::from_rgb(128, 204, 134),
            incorrect: Color32::from_rgb(235, 110, 104),
            accent: Color32::from_rgb(118, 190, 222),
        }
    }

    fn notebook() -> Self {
        Self {
            window: Color32::from_rgb(252, 250, 242),
            panel: Color32::from_rgb(245, 242, 230),
            sunken: Color32::from_rgb(255, 255, 252),
            raised: Color32::from_rgb(234, 230, 214),
            raised_hover: Color32::from_rgb(222, 217, 198),
            border: Color32::from_rgb(196, 203, 222),
            text: Color32::from_rgb(44, 47, 56),
            highlight: Color32::from_rgb(190, 212, 238),
            muted: Color32::from_rgb(128, 132, 146),
            heading: Color32::from_rgb(45, 82, 150),
            term: Color32::from_rgb(178, 98, 30),
            correct: Color32::from_rgb(46, 140, 72),
            incorrect: Color32::from_rgb(196, 58, 52),
            accent: Color32::from_rgb(36, 120, 170),
        }
    }
}

pub fn set_theme(ctx: &egui::Context, theme: &Theme) {
    ctx.set_visuals_of(egui::Theme::Dark, visuals_for(&theme.dark, Visuals::dark()));
    ctx.set_visuals_of(egui::Theme::Light, visuals_for(&theme.light, Visuals::light()));
}

pub fn apply_dark_mode(ctx: &egui::Context, dark_mode: bool) {
    let (theme, preference) = if dark_mode {
        (egui::Theme::Dark, egui::ThemePreference::Dark)
    } else {
        (egui::Theme::Light, egui::ThemePreference::Light)
    };
    ctx.set_theme(theme);
    ctx.options_mut(|o| o.theme_preference = preference);
}

fn widget(
    base: WidgetVisuals,
    fill: Color32,
    weak: Color32,
    edge: Color32,
    text: Color32,
) -> WidgetVisuals {
    WidgetVisuals {
        bg_fill: fill,
        weak_bg_fill: weak,
        bg_stroke: Stroke { color: edge, ..base.bg_stroke },
        fg_stroke: Stroke { color: text, ..base.fg_stroke },
        ..base
    }
}

fn visuals_for(p: &Palette, default: Visuals) -> Visuals {
    let w = &default.widgets;
    let mut widgets = w.clone();
    widgets.noninteractive = widget(w.noninteractive, p.window, p.panel, p.border, p.text);
    widgets.inactive = widget(w.inactive, p.raised, p.raised, p.border, p.text);
    widgets.hovered = widget(w.hovered, p.raised_hover, p.raised_hover, p.accent, p.text);
    widgets.active = widget(w.active, p.highlight, p.highlight, p.accent, p.text);
    widgets.open = widget(w.open, p.raised, p.raised_hover, p.heading, p.text);

    Visuals {
        widgets,
        selection: Selection {
            bg_fill: p.highlight,
            stroke: Stroke { color: p.text, ..default.selection.stroke },
        },
        hyperlink_color: p.accent,
        faint_bg_color: p.panel,
        extreme_bg_color: p.sunken,
        code_bg_color: p.raised,
        error_fg_color: p.incorrect,
        warn_fg_color: p.term,
        window_fill: p.window,
        window_stroke: Stroke { color: p.border, ..default.window_stroke },
        panel_fill: p.panel,
        ..default
    }
}
