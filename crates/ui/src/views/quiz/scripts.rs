use dioxus::document::eval;

const SPEAK_SCRIPT: &str = r#"
    const text = await dioxus.recv();
    const synth = window.speechSynthesis;
    if (!synth || !text) { return false; }
    synth.cancel();
    const voices = synth.getVoices();
    const voice = voices.find((v) => v.name === "Microsoft Clara Online (Natural)")
        || voices.find((v) => v.lang && v.lang.startsWith("en"));
    const utterance = new SpeechSynthesisUtterance(text);
    if (voice) {
        utterance.voice = voice;
        utterance.lang = voice.lang;
    } else {
        utterance.lang = "en-US";
    }
    utterance.rate = 0.85;
    return await new Promise((resolve) => {
        utterance.onend = () => resolve(true);
        utterance.onerror = () => resolve(false);
        synth.speak(utterance);
    });
"#;

const CANCEL_SCRIPT: &str = r"
    if (window.speechSynthesis) { window.speechSynthesis.cancel(); }
    return true;
";

/// Read `text` aloud; resolves once playback ends or is cancelled.
pub(super) async fn speak(text: &str) -> bool {
    let script = eval(SPEAK_SCRIPT);
    if script.send(text).is_err() {
        return false;
    }
    script.join::<bool>().await.unwrap_or(false)
}

pub(super) fn cancel_speech() {
    let _ = eval(CANCEL_SCRIPT);
}

pub(super) fn focus_quiz_root() {
    let _ = eval(r#"document.getElementById("quiz-root")?.focus();"#);
}
