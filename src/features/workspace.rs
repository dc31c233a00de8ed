//! One subject page worth of feature state.
//!
//! The GUI turns clicks into [`Command`]s, carries out the returned
//! [`Effect`]s tagged with [`Workspace::origin`], and hands finished requests
//! back through [`Workspace::receive`], keyed by the endpoint that produced
//! them. Replies tagged with another workspace's origin are dropped.

use rand::{
    rngs::StdRng,
    SeedableRng,
};
use serde_json::Value;

use super::{
    battle_flow::BattleFlow,
    biology::ProcessExplainer,
    chatbot::Chatbot,
    crossword::Crossword,
    equation::EquationBalancer,
    flashcards::Flashcards,
    map::MapFeature,
    pdf_qa::PdfQa,
    quiz::QuizGenerator,
    receive,
    simulation::SimulationLauncher,
    submit,
    summary::Summarizer,
    visualize::Visualizer,
    wheel::Wheel,
    writing::WritingFeedback,
    Effect,
    ResultPanel,
    Subject,
};
use crate::{
    api::Endpoint,
    core::{
        tasks::Origin,
        RequestFailure,
    },
};

/// Panels that follow the request/render pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    Summary,
    Visualize,
    Quiz,
    BattleFlow,
    Map,
    Crossword,
    Writing,
    Equation,
    Biology,
    Flashcards,
}

impl Tool {
    pub fn title(&self) -> &'static str {
        match self {
            Tool::Summary => "Summarizer",
            Tool::Visualize => "Topic Visualizer",
            Tool::Quiz => "Quiz Generator",
            Tool::BattleFlow => "Battle Event Flow",
            Tool::Map => "Map Explorer",
            Tool::Crossword => "Crossword Helper",
            Tool::Writing => "Writing Feedback",
            Tool::Equation => "Equation Balancer",
            Tool::Biology => "Biological Processes",
            Tool::Flashcards => "Flashcards",
        }
    }

    pub fn endpoint(&self) -> Endpoint {
        match self {
            Tool::Summary => Endpoint::Summary,
            Tool::Visualize => Endpoint::VisualDescription,
            Tool::Quiz => Endpoint::Quiz,
            Tool::BattleFlow => Endpoint::BattleFlow,
            Tool::Map => Endpoint::MapInfo,
            Tool::Crossword => Endpoint::CrosswordData,
            Tool::Writing => Endpoint::WritingFeedback,
            Tool::Equation => Endpoint::BalanceEquation,
            Tool::Biology => Endpoint::BiologicalProcess,
            Tool::Flashcards => Endpoint::Flashcards,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Generate(Tool),
    ReadAloud(Tool),
    ReadFlashcard(usize),
    SubmitQuiz,
    RevealAnswers,
    /// `now` is the UI clock in seconds.
    SpinWheel { now: f64 },
    ToggleChat,
    SendChat,
    UploadPdf,
    AskPdf,
    LaunchSimulation,
}

pub struct Workspace {
    origin: Origin,
    pub subject: Subject,
    pub summarizer: Summarizer,
    pub visualizer: Visualizer,
    pub quiz: QuizGenerator,
    pub battle_flow: BattleFlow,
    pub wheel: Wheel,
    pub map: MapFeature,
    pub crossword: Crossword,
    pub writing: WritingFeedback,
    pub equation: EquationBalancer,
    pub biology: ProcessExplainer,
    pub flashcards: Flashcards,
    pub chatbot: Chatbot,
    pub pdf_qa: PdfQa,
    pub simulations: SimulationLauncher,
    rng: StdRng,
}

impl Workspace {
    pub fn new(subject: Subject) -> Self {
        Self::with_rng(subject, StdRng::from_rng(&mut rand::rng()))
    }

    pub fn with_seed(subject: Subject, seed: u64) -> Self {
        Self::with_rng(subject, StdRng::seed_from_u64(seed))
    }

    fn with_rng(subject: Subject, rng: StdRng) -> Self {
        let mut quiz = QuizGenerator::default();
        quiz.subject = Some(subject);
        Self {
            origin: Origin::next(),
            subject,
            summarizer: Summarizer::default(),
            visualizer: Visualizer::default(),
            quiz,
            battle_flow: BattleFlow::default(),
            wheel: Wheel::default(),
            map: MapFeature::default(),
            crossword: Crossword::default(),
            writing: WritingFeedback::default(),
            equation: EquationBalancer::default(),
            biology: ProcessExplainer::default(),
            flashcards: Flashcards::default(),
            chatbot: Chatbot::default(),
            pdf_qa: PdfQa::default(),
            simulations: SimulationLauncher::default(),
            rng,
        }
    }

    /// Tag for every request this workspace sends.
    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn panel(&self, tool: Tool) -> &ResultPanel {
        match tool {
            Tool::Summary => &self.summarizer.view,
            Tool::Visualize => &self.visualizer.view,
            Tool::Quiz => &self.quiz.view,
            Tool::BattleFlow => &self.battle_flow.view,
            Tool::Map => &self.map.view,
            Tool::Crossword => &self.crossword.view,
            Tool::Writing => &self.writing.view,
            Tool::Equation => &self.equation.view,
            Tool::Biology => &self.biology.view,
            Tool::Flashcards => &self.flashcards.view,
        }
    }

    pub fn dispatch(&mut self, command: Command) -> Vec<Effect> {
        match command {
            Command::Generate(tool) => self.generate(tool),
            Command::ReadAloud(tool) => {
                let panel = self.panel(tool);
                if panel.read_aloud_visible {
                    vec![Effect::Speak(panel.narration())]
                } else {
                    Vec::new()
                }
            }
            Command::ReadFlashcard(index) => self.flashcards.read_card(index).into_iter().collect(),
            Command::SubmitQuiz => self.quiz.submit_answers(),
            Command::RevealAnswers => {
                self.quiz.reveal_answers();
                Vec::new()
            }
            Command::SpinWheel { now } => {
                if self.wheel.spin(&mut self.rng, now) {
                    self.battle_flow.unlock();
                }
                Vec::new()
            }
            Command::ToggleChat => {
                self.chatbot.toggle();
                Vec::new()
            }
            Command::SendChat => self.chatbot.send(),
            Command::UploadPdf => self.pdf_qa.upload().into_iter().collect(),
            Command::AskPdf => self.pdf_qa.ask().into_iter().collect(),
            Command::LaunchSimulation => self.simulations.launch().into_iter().collect(),
        }
    }

    fn generate(&mut self, tool: Tool) -> Vec<Effect> {
        match tool {
            Tool::Summary => submit(&mut self.summarizer),
            Tool::Visualize => submit(&mut self.visualizer),
            Tool::Quiz => submit(&mut self.quiz),
            Tool::BattleFlow => submit(&mut self.battle_flow),
            Tool::Map => submit(&mut self.map),
            Tool::Crossword => submit(&mut self.crossword),
            Tool::Writing => submit(&mut self.writing),
            Tool::Equation => submit(&mut self.equation),
            Tool::Biology => submit(&mut self.biology),
            Tool::Flashcards => submit(&mut self.flashcards),
        }
    }

    /// Routes a finished request to the feature that issued it. The chat helper
    /// outlives subject switches, so its replies are accepted from any origin.
    pub fn receive(
        &mut self,
        origin: Origin,
        endpoint: Endpoint,
        result: Result<Value, RequestFailure>,
    ) {
        if origin != self.origin && endpoint != Endpoint::ChatbotMessage {
            log::info!("[Workspace] Dropping stale reply from {}", endpoint.path());
            return;
        }
        match endpoint {
            Endpoint::Summary => receive(&mut self.summarizer, result),
            Endpoint::VisualDescription => receive(&mut self.visualizer, result),
            Endpoint::Quiz => receive(&mut self.quiz, result),
            Endpoint::SaveQuizAttempt => self.quiz.receive_save(result),
            Endpoint::BattleFlow => receive(&mut self.battle_flow, result),
            Endpoint::MapInfo => receive(&mut self.map, result),
            Endpoint::CrosswordData => receive(&mut self.crossword, result),
            Endpoint::WritingFeedback => receive(&mut self.writing, result),
            Endpoint::BalanceEquation => receive(&mut self.equation, result),
            Endpoint::BiologicalProcess => receive(&mut self.biology, result),
            Endpoint::Flashcards => receive(&mut self.flashcards, result),
            Endpoint::ChatbotMessage => self.chatbot.receive(result),
            Endpoint::ProcessPdf => self.pdf_qa.receive_upload(result),
            Endpoint::AskPdf => self.pdf_qa.receive_answer(result),
        }
    }

    /// Advances the wheel one frame. Returns whether it is still spinning.
    pub fn tick(&mut self, now: f64) -> bool {
        if let Some(battle) = self.wheel.step(now).map(str::to_string) {
            self.battle_flow.apply_wheel_selection(&battle);
        }
        self.wheel.spinning
    }
}
