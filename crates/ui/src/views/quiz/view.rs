use dioxus::prelude::*;

use quiz_core::model::{Screen, Session};
use services::SessionStore;
use tracing::debug;

use crate::context::AppContext;
use crate::vm::question_vm;

use super::screens::ScreenView;
use super::scripts::{cancel_speech, focus_quiz_root, speak};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    Start,
    Select(String),
    Next,
    /// Play again, back to start, or cancel while loading.
    Reset,
    ToggleSpeech,
}

/// Session store over the view's signal; every transition is one write.
#[derive(Clone, Copy)]
struct SignalStore(Signal<Session>);

impl SessionStore for SignalStore {
    fn update<R>(&mut self, f: impl FnOnce(&mut Session) -> R) -> R {
        let mut session = self.0.write();
        f(&mut *session)
    }
}

#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let orchestrator = ctx.orchestrator();
    let question_count = ctx.question_count();

    let session = use_signal(Session::new);
    let mut speaking = use_signal(|| false);
    let job = use_signal(|| None::<Task>);

    // Speech never outlives the question it was started for.
    let question_key = use_memo(move || {
        let session = session.read();
        (session.screen(), session.current_index())
    });
    use_effect(move || {
        let _ = question_key();
        cancel_speech();
        speaking.set(false);
        focus_quiz_root();
    });

    let dispatch = use_callback(move |intent: QuizIntent| {
        debug!(?intent, screen = session.peek().screen().name(), "quiz intent");
        let orchestrator = orchestrator.clone();
        let mut store = SignalStore(session);
        let mut job = job;
        let mut speaking = speaking;

        match intent {
            QuizIntent::Start => {
                if session.peek().screen() != Screen::Start {
                    return;
                }
                let task = spawn(async move {
                    let mut store = store;
                    orchestrator.start_quiz(&mut store).await;
                });
                replace_job(&mut job, task);
            }
            QuizIntent::Select(choice) => {
                orchestrator.select_answer(&mut store, &choice);
            }
            QuizIntent::Next => {
                let ready = {
                    let current = session.peek();
                    current.screen() == Screen::Quiz && current.is_answered()
                };
                if !ready {
                    return;
                }
                let task = spawn(async move {
                    let mut store = store;
                    orchestrator.advance(&mut store).await;
                });
                replace_job(&mut job, task);
            }
            QuizIntent::Reset => {
                if let Some(task) = job.write().take() {
                    task.cancel();
                }
                orchestrator.reset(&mut store);
            }
            QuizIntent::ToggleSpeech => {
                if speaking() {
                    cancel_speech();
                    speaking.set(false);
                    return;
                }
                let Some(text) = question_vm(&session.read()).map(|vm| vm.speech_text) else {
                    return;
                };
                speaking.set(true);
                spawn(async move {
                    speak(&text).await;
                    speaking.set(false);
                });
            }
        }
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<QuizTestHandles>() {
                handles.register(dispatch, session);
            }
        }
    }

    let on_key = use_callback(move |evt: KeyboardEvent| {
        let intent = intent_for_key(&session.read(), &evt.data.key());
        if let Some(intent) = intent {
            evt.prevent_default();
            dispatch.call(intent);
        }
    });

    rsx! {
        div { class: "page quiz-page", id: "quiz-root", tabindex: "0", onkeydown: on_key,
            ScreenView {
                session: session(),
                question_count,
                speaking: speaking(),
                on_intent: move |intent| dispatch.call(intent),
            }
        }
    }
}

/// Only one generation job runs at a time; a newer job replaces the older one.
fn replace_job(job: &mut Signal<Option<Task>>, task: Task) {
    if let Some(previous) = job.write().replace(task) {
        previous.cancel();
    }
}

/// Keyboard shortcuts on the question screen: 1-4 pick a choice while the
/// question is open, Enter moves on once it is answered.
pub(crate) fn intent_for_key(session: &Session, key: &Key) -> Option<QuizIntent> {
    let vm = question_vm(session)?;
    match key {
        Key::Enter if vm.answered => Some(QuizIntent::Next),
        Key::Character(value) if !vm.answered => {
            let number = value.parse::<usize>().ok()?;
            vm.choice_for_key(number)
                .map(|choice| QuizIntent::Select(choice.to_string()))
        }
        _ => None,
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct QuizTestHandles {
    dispatch: Rc<RefCell<Option<Callback<QuizIntent>>>>,
    session: Rc<RefCell<Option<Signal<Session>>>>,
}

#[cfg(test)]
impl QuizTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<QuizIntent>, session: Signal<Session>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.session.borrow_mut() = Some(session);
    }

    pub(crate) fn dispatch(&self) -> Callback<QuizIntent> {
        (*self.dispatch.borrow()).expect("quiz dispatch registered")
    }

    pub(crate) fn session(&self) -> Signal<Session> {
        (*self.session.borrow()).expect("quiz session registered")
    }
}
