//! # Editor
//!
//! Owns the committed [`EditorState`], the node registry, the command
//! registry and the decorations produced by the last render pass.
//!
//! ## Update lifecycle
//!
//! ```text
//! update(f) → clone state → f(&mut Update) ─┬─ Ok  → gc → commit → render
//!                                           └─ Err → discard pending state
//! ```

use crate::commands::{Command, CommandPriority, CommandRegistry, Handler, Registration};
use crate::config::EditorConfig;
use crate::errors::EditorError;
use crate::html;
use crate::state::{EditorState, SerializedEditorState};
use crate::update::Update;
use std::any::Any;
use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet};
use std::rc::Rc;
use tracing::{debug, info, instrument, warn};
use vellum_model::{Decoration, DocumentNode, DomConversionMap, NodeKey, NodeType, SerializedNode, Theme};

pub struct Editor {
    config: EditorConfig,
    registered: HashSet<NodeType>,
    conversions: DomConversionMap,
    state: EditorState,
    version: u64,
    commands: Rc<RefCell<CommandRegistry>>,
    decorations: BTreeMap<NodeKey, Decoration>,
}

impl Editor {
    pub fn new(config: EditorConfig) -> Self {
        let registered: HashSet<NodeType> = NodeType::BUILTIN
            .into_iter()
            .chain(config.nodes.iter().copied())
            .collect();

        let mut conversions = DomConversionMap::new();
        for node_type in &registered {
            conversions.merge(node_type.import_dom());
        }

        info!(namespace = %config.namespace, nodes = registered.len(), "editor created");

        Self {
            config,
            registered,
            conversions,
            state: EditorState::new(),
            version: 0,
            commands: Rc::new(RefCell::new(CommandRegistry::default())),
            decorations: BTreeMap::new(),
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn theme(&self) -> &Theme {
        &self.config.theme
    }

    /// Whether every listed node type is registered
    pub fn has_nodes(&self, node_types: &[NodeType]) -> bool {
        node_types.iter().all(|node_type| self.registered.contains(node_type))
    }

    /// The committed state
    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// Number of committed updates
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Decorations from the last render pass, in key order
    pub fn decorations(&self) -> &BTreeMap<NodeKey, Decoration> {
        &self.decorations
    }

    pub fn decoration(&self, key: &NodeKey) -> Option<&Decoration> {
        self.decorations.get(key)
    }

    /// Run `f` against a pending copy of the state. `Ok` commits the
    /// pending state; `Err` leaves the committed state untouched.
    #[instrument(skip_all, fields(namespace = %self.config.namespace, version = self.version))]
    pub fn update<T, F>(&mut self, f: F) -> Result<T, EditorError>
    where
        F: FnOnce(&mut Update<'_>) -> Result<T, EditorError>,
    {
        let mut update = Update::new(self.state.clone(), &self.registered);
        let value = match f(&mut update) {
            Ok(value) => value,
            Err(err) => {
                warn!(error = %err, "update discarded");
                return Err(err);
            }
        };

        let (pending, dirty) = update.into_parts();
        self.commit(pending, dirty);
        Ok(value)
    }

    fn commit(&mut self, mut pending: EditorState, dirty: HashSet<NodeKey>) {
        let collected = pending.collect_garbage();
        if !collected.is_empty() {
            debug!(count = collected.len(), "dropped detached nodes");
        }

        self.state = pending;
        self.version += 1;
        self.render(&dirty);
        debug!(version = self.version, dirty = dirty.len(), "update committed");
    }

    /// Refresh decorations: every dirty decorator that cannot be patched is
    /// decorated again, decorations of removed nodes are dropped.
    fn render(&mut self, dirty: &HashSet<NodeKey>) {
        let state = &self.state;
        let before = self.decorations.len();
        self.decorations.retain(|key, _| state.contains(key));
        let removed = before - self.decorations.len();

        let mut rendered = 0;
        for key in dirty {
            let Some(node) = self.state.get_node(key) else {
                continue;
            };
            if !node.is_decorator() {
                continue;
            }
            if let Some(decoration) = node.decorate(&self.config.theme) {
                self.decorations.insert(key.clone(), decoration);
                rendered += 1;
            }
        }

        if rendered > 0 || removed > 0 {
            debug!(rendered, removed, "render pass");
        }
    }

    /// Register `handler` for `command`. Revoke the returned registration to
    /// remove it again.
    pub fn register_command<P, F>(
        &mut self,
        command: &Command<P>,
        priority: CommandPriority,
        handler: F,
    ) -> Registration
    where
        P: 'static,
        F: Fn(&P, &mut Update<'_>) -> Result<bool, EditorError> + 'static,
    {
        let erased: Handler = Rc::new(
            move |payload: &dyn Any, update: &mut Update<'_>| -> Result<bool, EditorError> {
                match payload.downcast_ref::<P>() {
                    Some(payload) => handler(payload, update),
                    None => Ok(false),
                }
            },
        );

        let id = self.commands.borrow_mut().register(command.id(), priority, erased);
        debug!(command = command.name(), ?priority, "command handler registered");
        Registration::for_handler(&self.commands, command.id(), id)
    }

    /// Number of handlers currently registered for `command`
    pub fn command_handlers<P: 'static>(&self, command: &Command<P>) -> usize {
        self.commands.borrow().handler_count(command.id())
    }

    /// Run the handlers of `command` from the highest priority down, inside
    /// one update, until one of them returns `true`.
    #[instrument(skip_all, fields(command = command.name()))]
    pub fn dispatch_command<P: 'static>(&mut self, command: &Command<P>, payload: P) -> Result<bool, EditorError> {
        let handlers = self.commands.borrow().handlers_for(command.id());
        if handlers.is_empty() {
            debug!("no handlers registered");
            return Ok(false);
        }

        let handled = self.update(move |update| {
            for handler in &handlers {
                if handler(&payload, update)? {
                    return Ok(true);
                }
            }
            Ok(false)
        })?;

        debug!(handled, "command dispatched");
        Ok(handled)
    }

    /// Committed state as `{ "root": ... }` JSON
    pub fn editor_state_json(&self) -> Result<String, EditorError> {
        Ok(serde_json::to_string_pretty(&self.state.to_serialized())?)
    }

    /// Replace the document with one read from JSON
    pub fn set_editor_state_json(&mut self, json: &str) -> Result<(), EditorError> {
        let record: SerializedEditorState = serde_json::from_str(json)?;
        self.set_editor_state(&record)
    }

    pub fn set_editor_state(&mut self, record: &SerializedEditorState) -> Result<(), EditorError> {
        let SerializedNode::Root(root) = &record.root else {
            return Err(EditorError::structure(format!(
                "expected a root record, found {}",
                record.root.type_name()
            )));
        };

        self.update(|update| {
            update.clear()?;
            let root_key = update.root_key();
            for child in &root.children {
                update.import_record(&root_key, child)?;
            }
            Ok(())
        })
    }

    /// HTML for the committed document
    pub fn generate_html(&self) -> String {
        html::export_html(&self.state)
    }

    /// Parse `markup` and append the nodes it converts to at the end of the
    /// document. Returns the keys of the new top-level blocks.
    pub fn import_html(&mut self, markup: &str) -> Result<Vec<NodeKey>, EditorError> {
        let dom = vellum_markup::parse(markup)?;
        let blocks = html::import_dom(&dom, &self.conversions);
        debug!(blocks = blocks.len(), "converted markup");

        self.update(|update| {
            let root_key = update.root_key();
            blocks
                .into_iter()
                .map(|block| block.attach(update, &root_key))
                .collect()
        })
    }

    /// Plain text of the committed document
    pub fn text_content(&self) -> String {
        self.state.text_content()
    }
}

impl std::fmt::Debug for Editor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Editor")
            .field("namespace", &self.config.namespace)
            .field("version", &self.version)
            .field("nodes", &self.state.len())
            .field("decorations", &self.decorations.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vellum_model::{NodeStore, ParagraphNode, TextNode, VideoNode};

    fn video_editor() -> Editor {
        Editor::new(EditorConfig::default().with_nodes([NodeType::Video]))
    }

    #[test]
    fn test_has_nodes() {
        let editor = Editor::new(EditorConfig::default());
        assert!(editor.has_nodes(&[NodeType::Paragraph, NodeType::Text]));
        assert!(!editor.has_nodes(&[NodeType::Video]));
        assert!(video_editor().has_nodes(&[NodeType::Video]));
    }

    #[test]
    fn test_failed_update_is_discarded() {
        let mut editor = video_editor();
        let result: Result<(), _> = editor.update(|update| {
            let key = update.create_node(ParagraphNode::new())?;
            update.append(&NodeKey::root(), &key)?;
            Err(EditorError::structure("abort"))
        });

        assert!(result.is_err());
        assert!(editor.state().is_empty());
        assert_eq!(editor.version(), 0);
    }

    #[test]
    fn test_detached_nodes_are_collected() {
        let mut editor = video_editor();
        let key = editor
            .update(|update| update.create_node(TextNode::new("orphan")))
            .unwrap();

        assert!(!editor.state().contains(&key));
        assert_eq!(editor.version(), 1);
    }

    #[test]
    fn test_render_pass_tracks_decorators() {
        let mut editor = video_editor();
        let key = editor
            .update(|update| {
                let key = update.create_node(VideoNode::new("a.mp4", None, None, None, None))?;
                update.append(&NodeKey::root(), &key)?;
                Ok(key)
            })
            .unwrap();
        assert!(matches!(editor.decoration(&key), Some(Decoration::Video(p)) if p.width == 560));

        editor
            .update(|update| Ok(VideoNode::set_width_and_height(update, &key, 640, 360)?))
            .unwrap();
        let Some(Decoration::Video(props)) = editor.decoration(&key) else {
            panic!("video decoration missing");
        };
        assert_eq!((props.width, props.height), (640, 360));

        editor.update(|update| update.remove(&key)).unwrap();
        assert!(editor.decorations().is_empty());
    }

    #[test]
    fn test_committed_state_is_not_shared_with_writes() {
        let mut editor = video_editor();
        let key = editor
            .update(|update| {
                let key = update.create_node(VideoNode::new("a.mp4", None, None, None, None))?;
                update.append(&NodeKey::root(), &key)?;
                Ok(key)
            })
            .unwrap();
        let before = editor.state().clone();

        editor
            .update(|update| {
                let node = update.get_writable(&key)?;
                assert!(node.as_video().is_some());
                Ok(())
            })
            .unwrap();

        assert!(!before.shares_node_with(editor.state(), &key));
        assert_eq!(before.get_node(&key), editor.state().get_node(&key));
    }

    #[test]
    fn test_unregistered_json_type_fails() {
        let mut editor = Editor::new(EditorConfig::default());
        let json = r#"{"root":{"type":"root","version":1,"children":[
            {"type":"Video","version":1,"videoSrc":"a.mp4"}
        ]}}"#;

        let err = editor.set_editor_state_json(json).unwrap_err();
        assert!(matches!(
            err,
            EditorError::NodeNotRegistered {
                node_type: NodeType::Video,
                ..
            }
        ));
        assert!(editor.state().is_empty());
    }

    #[test]
    fn test_state_json_requires_root_record() {
        let mut editor = video_editor();
        let json = r#"{"root":{"type":"paragraph","version":1,"children":[]}}"#;
        assert!(matches!(
            editor.set_editor_state_json(json),
            Err(EditorError::InvalidStructure(_))
        ));
    }
}
