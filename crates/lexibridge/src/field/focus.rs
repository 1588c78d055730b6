//! Focus resolution across shadow-boundary hosts.
//!
//! Host pages nest editable surfaces behind shadow boundaries: the document's
//! focused element may itself host an inner scope whose own focused element
//! is the real target. [`resolve`] walks that chain to the editable leaf, and
//! falls back to the page-level static selection when no editable target has
//! focus.

use crate::field::EditableTarget;
use crate::logging::targets;

/// How deep a shadow-host chain may nest before resolution gives up.
/// Real pages stay in single digits; the cap bounds a malformed host graph.
const MAX_SHADOW_DEPTH: usize = 32;

/// One step in the focus chain of a [`DocumentScope`].
pub enum FocusNode<'a> {
    /// A shadow-boundary host; the focus chain continues in its inner scope.
    ShadowHost(&'a mut dyn DocumentScope),
    /// An editable leaf target.
    Target(&'a mut dyn EditableTarget),
}

/// A document (or shadow root) that can report its focused node and its
/// static page selection.
pub trait DocumentScope {
    /// The currently focused node within this scope, if any.
    fn active_node(&mut self) -> Option<FocusNode<'_>>;

    /// The page-level selection outside any editable field, if any.
    fn page_selection(&self) -> Option<String>;
}

/// What focus resolution produced for the current document state.
pub enum Resolution<'a> {
    /// A focused editable target; operations read and write through it.
    Editable(&'a mut dyn EditableTarget),
    /// No editable target, but the page carries a static selection;
    /// operations may read it but have nowhere to write.
    StaticSelection(String),
    /// Neither a target nor a selection: the operation is a silent no-op.
    None,
}

/// Resolve the focused editable target, traversing nested shadow hosts.
pub fn resolve_target(scope: &mut dyn DocumentScope) -> Option<&mut dyn EditableTarget> {
    resolve_target_at(scope, 0)
}

fn resolve_target_at(
    scope: &mut dyn DocumentScope,
    depth: usize,
) -> Option<&mut dyn EditableTarget> {
    if depth >= MAX_SHADOW_DEPTH {
        tracing::warn!(
            target: targets::FOCUS,
            depth,
            "shadow host chain exceeded maximum depth"
        );
        return None;
    }
    match scope.active_node()? {
        FocusNode::Target(target) => Some(target),
        FocusNode::ShadowHost(inner) => resolve_target_at(inner, depth + 1),
    }
}

/// Resolve the text context an operation should act on.
pub fn resolve(scope: &mut dyn DocumentScope) -> Resolution<'_> {
    let page = scope.page_selection();
    match resolve_target(scope) {
        Some(target) => Resolution::Editable(target),
        None => match page {
            Some(text) if !text.is_empty() => Resolution::StaticSelection(text),
            _ => Resolution::None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::PlainField;

    struct Leaf {
        field: Option<PlainField>,
        page_text: Option<String>,
    }

    impl DocumentScope for Leaf {
        fn active_node(&mut self) -> Option<FocusNode<'_>> {
            self.field
                .as_mut()
                .map(|f| FocusNode::Target(f as &mut dyn EditableTarget))
        }

        fn page_selection(&self) -> Option<String> {
            self.page_text.clone()
        }
    }

    struct Shadowed {
        inner: Leaf,
    }

    impl DocumentScope for Shadowed {
        fn active_node(&mut self) -> Option<FocusNode<'_>> {
            Some(FocusNode::ShadowHost(&mut self.inner))
        }

        fn page_selection(&self) -> Option<String> {
            None
        }
    }

    #[test]
    fn test_resolves_direct_target() {
        let mut scope = Leaf {
            field: Some(PlainField::with_text("hello")),
            page_text: None,
        };
        let target = resolve_target(&mut scope).unwrap();
        assert_eq!(target.text(), "hello");
    }

    #[test]
    fn test_resolves_through_shadow_host() {
        let mut scope = Shadowed {
            inner: Leaf {
                field: Some(PlainField::with_text("nested")),
                page_text: None,
            },
        };
        let target = resolve_target(&mut scope).unwrap();
        assert_eq!(target.text(), "nested");
    }

    #[test]
    fn test_falls_back_to_page_selection() {
        let mut scope = Leaf {
            field: None,
            page_text: Some("quoted prose".to_string()),
        };
        match resolve(&mut scope) {
            Resolution::StaticSelection(text) => assert_eq!(text, "quoted prose"),
            _ => panic!("expected static selection"),
        }
    }

    #[test]
    fn test_nothing_resolves_to_none() {
        let mut scope = Leaf {
            field: None,
            page_text: None,
        };
        assert!(matches!(resolve(&mut scope), Resolution::None));
    }

    #[test]
    fn test_empty_page_selection_is_none() {
        let mut scope = Leaf {
            field: None,
            page_text: Some(String::new()),
        };
        assert!(matches!(resolve(&mut scope), Resolution::None));
    }
}
