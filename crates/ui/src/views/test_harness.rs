use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use quiz_core::model::{ImageRef, Question, QuestionDraft, ResultContent, Session};
use services::{ContentGateway, GatewayError};

use crate::context::{UiApp, build_app_context};
use crate::views::QuizView;

use super::quiz::{QuizIntent, QuizTestHandles, intent_for_key};

/// How the fake gateway answers `generate_questions`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Script {
    Batch,
    Fail,
    /// Never resolves; only a reset gets the user out.
    Hang,
    /// Questions arrive at once, every image takes `SLOW_IMAGE`.
    SlowImages,
}

pub const SLOW_IMAGE: Duration = Duration::from_millis(200);

pub struct FakeGateway {
    script: Script,
    question_calls: AtomicUsize,
    image_calls: AtomicUsize,
    images_finished: AtomicUsize,
    closing_calls: Mutex<Vec<(usize, usize)>>,
}

impl FakeGateway {
    pub fn closing_calls(&self) -> Vec<(usize, usize)> {
        self.closing_calls.lock().unwrap().clone()
    }

    pub fn question_calls(&self) -> usize {
        self.question_calls.load(Ordering::SeqCst)
    }

    pub fn image_calls(&self) -> usize {
        self.image_calls.load(Ordering::SeqCst)
    }

    pub fn images_finished(&self) -> usize {
        self.images_finished.load(Ordering::SeqCst)
    }
}

pub fn question(word: &str, distractors: [&str; 3]) -> Question {
    QuestionDraft {
        question: format!("The <b>report</b> was ( ) about {word}."),
        choices: vec![
            distractors[0].into(),
            word.into(),
            distractors[1].into(),
            distractors[2].into(),
        ],
        answer: word.into(),
        explanation: format!("**{word}** fits the blank."),
        image_prompt: format!("scene about {word}"),
    }
    .validate()
    .expect("valid question")
}

pub fn batch() -> Vec<Question> {
    vec![
        question("redundant", ["decisive", "subjective", "distinct"]),
        question("probability", ["restoration", "credibility", "contention"]),
        question("ironic", ["indefinite", "restless", "superficial"]),
    ]
}

#[async_trait]
impl ContentGateway for FakeGateway {
    fn question_count(&self) -> usize {
        3
    }

    async fn generate_questions(&self) -> Result<Vec<Question>, GatewayError> {
        self.question_calls.fetch_add(1, Ordering::SeqCst);
        match self.script {
            Script::Batch | Script::SlowImages => Ok(batch()),
            Script::Fail => Err(GatewayError::Disabled),
            Script::Hang => {
                std::future::pending::<()>().await;
                Err(GatewayError::EmptyResponse)
            }
        }
    }

    async fn generate_image(&self, prompt: &str) -> ImageRef {
        self.image_calls.fetch_add(1, Ordering::SeqCst);
        if self.script == Script::SlowImages {
            tokio::time::sleep(SLOW_IMAGE).await;
        }
        self.images_finished.fetch_add(1, Ordering::SeqCst);
        if prompt.contains("probability") {
            ImageRef::default_placeholder()
        } else {
            ImageRef::from_base64("image/jpeg", "QUJD").expect("valid image")
        }
    }

    async fn generate_closing_message(&self, score: usize, total: usize) -> ResultContent {
        self.closing_calls.lock().unwrap().push((score, total));
        ResultContent::new("Vocabulary Master", "Superb work on tricky words!")
    }
}

struct TestApp {
    gateway: Arc<FakeGateway>,
}

impl UiApp for TestApp {
    fn gateway(&self) -> Arc<dyn ContentGateway> {
        self.gateway.clone()
    }
}

#[derive(Props, Clone)]
struct HarnessProps {
    app: Arc<TestApp>,
    handles: QuizTestHandles,
}

impl PartialEq for HarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for HarnessProps {}

#[component]
fn QuizRouterHarness(props: HarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.handles.clone());
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    rsx! { QuizView {} }
}

pub struct QuizHarness {
    pub dom: VirtualDom,
    pub gateway: Arc<FakeGateway>,
    handles: QuizTestHandles,
}

impl QuizHarness {
    pub fn new(script: Script) -> Self {
        let gateway = Arc::new(FakeGateway {
            script,
            question_calls: AtomicUsize::new(0),
            image_calls: AtomicUsize::new(0),
            images_finished: AtomicUsize::new(0),
            closing_calls: Mutex::new(Vec::new()),
        });
        let handles = QuizTestHandles::default();
        let app = Arc::new(TestApp {
            gateway: Arc::clone(&gateway),
        });
        let mut dom = VirtualDom::new_with_props(
            QuizRouterHarness,
            HarnessProps {
                app,
                handles: handles.clone(),
            },
        );
        dom.rebuild_in_place();
        drive_dom(&mut dom);

        Self {
            dom,
            gateway,
            handles,
        }
    }

    pub fn dispatch(&mut self, intent: QuizIntent) {
        let dispatch = self.handles.dispatch();
        self.dom.in_runtime(|| dispatch.call(intent));
        drive_dom(&mut self.dom);
    }

    /// Route a key press through the quiz's keyboard shortcuts.
    pub fn press(&mut self, key: Key) -> bool {
        match intent_for_key(&self.session(), &key) {
            Some(intent) => {
                self.dispatch(intent);
                true
            }
            None => false,
        }
    }

    pub fn session(&self) -> Session {
        let session = self.handles.session();
        self.dom.in_runtime(|| session.peek().clone())
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Drive spawned work until `done` holds for the session.
    pub async fn settle(&mut self, done: impl Fn(&Session) -> bool) {
        for _ in 0..20 {
            if done(&self.session()) {
                return;
            }
            self.drive_async().await;
        }
        assert!(done(&self.session()), "session never settled: {:?}", self.session().screen());
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}
