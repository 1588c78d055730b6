//! End-to-end scenarios: a dispatcher wired to scripted host surfaces.

use std::sync::Arc;
use std::time::Duration;

use futures_util::future::BoxFuture;
use parking_lot::Mutex;

use lexibridge::prelude::*;

// ============================================================================
// Scripted collaborators
// ============================================================================

struct Uppercase;

impl Transformer for Uppercase {
    fn transform<'a>(
        &'a self,
        _: &RegisteredAction,
        text: String,
    ) -> BoxFuture<'a, Result<String, TransformError>> {
        Box::pin(async move { Ok(text.to_uppercase()) })
    }
}

#[derive(Default)]
struct Recorded {
    errors: Mutex<Vec<String>>,
    results: Mutex<Vec<String>>,
}

struct RecordingNotifier(Arc<Recorded>);

impl Notifier for RecordingNotifier {
    fn error(&self, message: &str) {
        self.0.errors.lock().push(message.to_string());
    }
    fn result(&self, text: &str) {
        self.0.results.lock().push(text.to_string());
    }
}

/// A rich surface that either consumes paste-like signals or honors nothing.
struct RichHost {
    text: String,
    selection: SelectionOffsets,
    focused: bool,
    consumes_paste: bool,
}

impl RichHost {
    fn new(text: &str, consumes_paste: bool) -> Self {
        let len = text.chars().count();
        Self {
            text: text.to_string(),
            selection: SelectionOffsets::collapsed(len),
            focused: true,
            consumes_paste,
        }
    }

    fn apply(&mut self, insert: &str) {
        let start = self.selection.start();
        let end = self.selection.end();
        let prefix: String = self.text.chars().take(start).collect();
        let suffix: String = self.text.chars().skip(end).collect();
        self.text = format!("{prefix}{insert}{suffix}");
        self.selection = SelectionOffsets::collapsed(start + insert.chars().count());
    }
}

impl EditableTarget for RichHost {
    fn kind(&self) -> TargetKind {
        TargetKind::Rich
    }
    fn text(&self) -> String {
        self.text.clone()
    }
    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }
    fn selection(&self) -> SelectionOffsets {
        self.selection
    }
    fn set_selection(&mut self, selection: SelectionOffsets) {
        let len = self.text.chars().count();
        self.selection = SelectionOffsets::new(
            selection.start().min(len),
            selection.end().min(len),
            selection.direction(),
        );
    }
    fn dispatch_edit(&mut self, signal: &EditSignal) -> SignalResponse {
        if self.consumes_paste {
            if let EditSignal::Paste(transfer) = signal {
                let text = transfer.text().to_string();
                self.apply(&text);
            }
        }
        SignalResponse::Uncanceled
    }
    fn exec_insert_text(&mut self, _: &str) -> bool {
        false
    }
    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
    fn is_focused(&self) -> bool {
        self.focused
    }
}

/// A document whose focused element may sit behind a shadow host.
enum Focused {
    Plain(PlainField),
    Rich(RichHost),
    Nothing,
}

struct Document {
    focused: Focused,
    page_text: Option<String>,
}

impl Document {
    fn with_plain(field: PlainField) -> Self {
        Self {
            focused: Focused::Plain(field),
            page_text: None,
        }
    }

    fn with_rich(host: RichHost) -> Self {
        Self {
            focused: Focused::Rich(host),
            page_text: None,
        }
    }

    fn plain(&self) -> &PlainField {
        match &self.focused {
            Focused::Plain(field) => field,
            _ => panic!("expected a plain field"),
        }
    }

    fn rich(&self) -> &RichHost {
        match &self.focused {
            Focused::Rich(host) => host,
            _ => panic!("expected a rich host"),
        }
    }
}

impl DocumentScope for Document {
    fn active_node(&mut self) -> Option<FocusNode<'_>> {
        match &mut self.focused {
            Focused::Plain(field) => Some(FocusNode::Target(field)),
            Focused::Rich(host) => Some(FocusNode::Target(host)),
            Focused::Nothing => None,
        }
    }
    fn page_selection(&self) -> Option<String> {
        self.page_text.clone()
    }
}

// ============================================================================
// Harness
// ============================================================================

fn config(entries: &[(&str, &str, &str)]) -> EngineConfig {
    EngineConfig {
        actions: entries
            .iter()
            .map(|(shortcut, id, name)| ActionConfig {
                shortcut: shortcut.parse().unwrap(),
                id: id.to_string(),
                name: name.to_string(),
                kind: ActionKind::Transformation,
            })
            .collect(),
        extend_modifier: ExtendModifier::Alt,
    }
}

fn dispatcher(config: &EngineConfig) -> (Dispatcher, Arc<Recorded>) {
    let recorded = Arc::new(Recorded::default());
    let dispatcher = Dispatcher::new(
        config,
        Box::new(Uppercase),
        Box::new(RecordingNotifier(recorded.clone())),
    )
    .unwrap()
    .with_pipeline(
        MutationPipeline::new().with_delays(Duration::from_millis(1), Duration::from_millis(1)),
    );
    (dispatcher, recorded)
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn duplicate_registration_is_rejected_naming_owner() {
    let bad = config(&[
        ("Ctrl+Alt+T", "a", "Action A"),
        ("Ctrl+Alt+T", "b", "Action B"),
    ]);

    let err = bad.build_table().unwrap_err();
    assert_eq!(err.rejected, "Action B");
    assert_eq!(
        err.conflict,
        ConflictCheck::Duplicate {
            owner: "Action A".to_string()
        }
    );

    // And the live check the settings UI performs against a running
    // dispatcher reports the same owner.
    let (dispatcher, _) = dispatcher(&config(&[("Ctrl+Alt+T", "a", "Action A")]));
    let verdict = dispatcher.check_candidate(&"Ctrl+Alt+T".parse().unwrap());
    assert_eq!(
        verdict,
        ConflictCheck::Duplicate {
            owner: "Action A".to_string()
        }
    );
}

#[test]
fn prefix_conflict_names_owner_in_both_directions() {
    let (dispatcher_a, _) = dispatcher(&config(&[("Ctrl+Alt+T", "a", "Translate")]));

    let verdict = dispatcher_a.check_candidate(&"Ctrl+Alt+T+1".parse().unwrap());
    assert_eq!(
        verdict,
        ConflictCheck::ExistingIsPrefix {
            owner: "Translate".to_string()
        }
    );

    let (dispatcher, _) = dispatcher(&config(&[("Ctrl+Alt+T+1", "b", "Formal tone")]));
    let verdict = dispatcher.check_candidate(&"Ctrl+Alt+1".parse().unwrap());
    assert_eq!(
        verdict,
        ConflictCheck::CandidateIsPrefix {
            owner: "Formal tone".to_string()
        }
    );
}

#[tokio::test]
async fn abandoned_sequence_does_not_leak_into_next_dispatch() {
    let (dispatcher, recorded) = dispatcher(&config(&[
        ("Ctrl+Alt+T+1", "formal", "Formal tone"),
        ("Ctrl+Alt+2", "casual", "Casual tone"),
    ]));

    let mut doc = Document::with_plain(PlainField::with_text("text"));

    // Press Ctrl+Alt+T (arms), release T without a second key.
    let armed = dispatcher
        .key_down(KeyPress::new(Key::T, Modifiers::CTRL_ALT), &mut doc)
        .await;
    assert_eq!(armed, KeyDisposition::Pass);
    dispatcher.key_up(Key::T);

    // Ctrl+Alt+2 must dispatch the casual action alone, not combine with the
    // abandoned T.
    let disposition = dispatcher
        .key_down(KeyPress::new(Key::Digit2, Modifiers::CTRL_ALT), &mut doc)
        .await;
    assert_eq!(disposition, KeyDisposition::Handled);
    assert_eq!(doc.plain().text(), "TEXT");
    assert!(recorded.errors.lock().is_empty());
}

#[tokio::test]
async fn two_key_sequence_transforms_rich_host_via_paste() {
    let (dispatcher, _) = dispatcher(&config(&[("Ctrl+Alt+T+1", "formal", "Formal tone")]));

    let mut doc = Document::with_rich(RichHost::new("draft body", true));
    dispatcher
        .key_down(KeyPress::new(Key::T, Modifiers::CTRL_ALT), &mut doc)
        .await;
    let disposition = dispatcher
        .key_down(KeyPress::new(Key::Digit1, Modifiers::CTRL_ALT), &mut doc)
        .await;

    assert_eq!(disposition, KeyDisposition::Handled);
    assert_eq!(doc.rich().text, "DRAFT BODY");
    assert!(doc.rich().is_focused());
}

#[tokio::test]
async fn failed_pipeline_leaves_field_identical_to_snapshot() {
    let (dispatcher, recorded) = dispatcher(&config(&[("Ctrl+Alt+U", "upper", "Uppercase")]));

    // A host that honors no insertion mechanism at all.
    let mut doc = Document::with_rich(RichHost::new("precious content", false));
    let disposition = dispatcher
        .key_down(KeyPress::new(Key::U, Modifiers::CTRL_ALT), &mut doc)
        .await;

    assert_eq!(disposition, KeyDisposition::Handled);
    assert_eq!(doc.rich().text, "precious content");

    let errors = recorded.errors.lock();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("Uppercase"));
}

#[tokio::test]
async fn static_page_selection_is_read_not_written() {
    let (dispatcher, recorded) = dispatcher(&config(&[("Ctrl+Alt+U", "upper", "Uppercase")]));

    let mut doc = Document {
        focused: Focused::Nothing,
        page_text: Some("selected prose".to_string()),
    };
    dispatcher
        .key_down(KeyPress::new(Key::U, Modifiers::CTRL_ALT), &mut doc)
        .await;

    assert_eq!(recorded.results.lock().as_slice(), ["SELECTED PROSE"]);
    assert!(recorded.errors.lock().is_empty());
}

#[tokio::test]
async fn word_extension_round_trip() {
    let (dispatcher, _) = dispatcher(&config(&[]));

    let mut field = PlainField::with_text("alpha beta gamma");
    field.set_selection(SelectionOffsets::collapsed(5));
    let mut doc = Document::with_plain(field);

    // Extend right twice, then shrink once.
    dispatcher
        .key_down(KeyPress::new(Key::ArrowRight, Modifiers::ALT), &mut doc)
        .await;
    let sel = doc.plain().selection();
    assert_eq!((sel.start(), sel.end()), (5, 10));

    dispatcher
        .key_down(KeyPress::new(Key::ArrowRight, Modifiers::ALT), &mut doc)
        .await;
    let sel = doc.plain().selection();
    assert_eq!((sel.start(), sel.end()), (5, 16));

    dispatcher
        .key_down(KeyPress::new(Key::ArrowLeft, Modifiers::ALT), &mut doc)
        .await;
    let sel = doc.plain().selection();
    assert_eq!((sel.start(), sel.end()), (5, 11));
}

#[tokio::test]
async fn unmatched_combination_never_suppresses_default() {
    let (dispatcher, recorded) = dispatcher(&config(&[("Ctrl+Alt+T", "t", "Translate")]));

    let mut doc = Document::with_plain(PlainField::with_text("text"));
    let disposition = dispatcher
        .key_down(KeyPress::new(Key::X, Modifiers::CTRL), &mut doc)
        .await;

    assert_eq!(disposition, KeyDisposition::Pass);
    assert_eq!(doc.plain().text(), "text");
    assert!(recorded.errors.lock().is_empty());
}
