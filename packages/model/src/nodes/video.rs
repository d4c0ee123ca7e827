//! # Video embeds
//!
//! A `VideoNode` is a block-level decorator: a leaf that the editor never
//! lays out itself. It renders through [`DocumentNode::decorate`] and moves
//! through JSON and markup with the following forms:
//!
//! ```text
//! JSON    { "type": "Video", "version": 1, "format": "", "videoSrc": "…", "width": 560, "height": 315 }
//! markup  <video data-lexical-Video="…" src="…"></video>
//! ```
//!
//! Dimensions are not written to markup and not read from it, so a markup
//! round trip comes back at the default size.

use crate::conversion::{DomConversion, DomConversionMap, DomConversionOutput};
use crate::decoration::{BlockClassName, Decoration, VideoComponentProps};
use crate::error::NodeError;
use crate::format::ElementFormat;
use crate::key::NodeKey;
use crate::node::{DocumentNode, Node, NodeStore, NodeType};
use crate::nodes::DecoratorBlock;
use crate::serialized::{SerializedNode, SerializedVideoNode};
use crate::theme::Theme;
use tracing::debug;
use vellum_markup::{DomElement, DomNode};

pub const DEFAULT_VIDEO_WIDTH: u32 = 560;
pub const DEFAULT_VIDEO_HEIGHT: u32 = 315;

/// Marks `<video>` markup written by this node type
pub const VIDEO_MARKER_ATTRIBUTE: &str = "data-lexical-Video";

/// Missing or zero dimensions fall back to the default
fn dimension(value: Option<u32>, default: u32) -> u32 {
    value.filter(|v| *v > 0).unwrap_or(default)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoNode {
    pub(crate) block: DecoratorBlock,
    src: String,
    width: u32,
    height: u32,
}

impl VideoNode {
    /// `src` is stored as given; it is never validated or fetched.
    pub fn new(
        src: impl Into<String>,
        format: Option<ElementFormat>,
        key: Option<NodeKey>,
        width: Option<u32>,
        height: Option<u32>,
    ) -> Self {
        Self {
            block: DecoratorBlock::new(format, key),
            src: src.into(),
            width: dimension(width, DEFAULT_VIDEO_WIDTH),
            height: dimension(height, DEFAULT_VIDEO_HEIGHT),
        }
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    /// Identifier used by renderers; the source URL
    pub fn id(&self) -> &str {
        &self.src
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn format(&self) -> ElementFormat {
        self.block.format()
    }

    /// Resize the video stored under `key`. The change lands on the
    /// writable copy handed out by `store`, never on a shared instance.
    /// Zero falls back to the default dimension.
    pub fn set_width_and_height<S>(
        store: &mut S,
        key: &NodeKey,
        width: u32,
        height: u32,
    ) -> Result<(), NodeError>
    where
        S: NodeStore + ?Sized,
    {
        let writable = store
            .get_writable(key)?
            .as_video_mut()
            .ok_or_else(|| NodeError::TypeMismatch {
                key: key.clone(),
                expected: "Video",
            })?;

        writable.width = dimension(Some(width), DEFAULT_VIDEO_WIDTH);
        writable.height = dimension(Some(height), DEFAULT_VIDEO_HEIGHT);
        Ok(())
    }

    pub fn import_json(record: &SerializedVideoNode) -> Self {
        let mut node = create_video_node(record.video_src.clone(), record.width, record.height);
        node.block.format = record.format;
        node
    }
}

/// Build a detached video node with a fresh key
pub fn create_video_node(
    src: impl Into<String>,
    width: Option<u32>,
    height: Option<u32>,
) -> VideoNode {
    VideoNode::new(src, None, None, width, height)
}

/// True only for nodes tagged as videos
pub fn is_video_node(node: Option<&Node>) -> bool {
    node.map_or(false, |n| n.node_type() == NodeType::Video)
}

fn convert_video_element(element: &DomElement) -> Option<DomConversionOutput> {
    let src = element.get_attribute(VIDEO_MARKER_ATTRIBUTE)?;
    if src.is_empty() {
        return None;
    }

    Some(DomConversionOutput {
        node: Some(Node::Video(create_video_node(src, None, None))),
    })
}

fn match_video(element: &DomElement) -> Option<DomConversion> {
    if !element.has_attribute(VIDEO_MARKER_ATTRIBUTE) {
        debug!("Declining <video> without {}", VIDEO_MARKER_ATTRIBUTE);
        return None;
    }

    Some(DomConversion {
        conversion: convert_video_element,
        priority: 1,
    })
}

impl DocumentNode for VideoNode {
    fn key(&self) -> &NodeKey {
        self.block.key()
    }

    fn node_type(&self) -> NodeType {
        NodeType::Video
    }

    fn text_content(&self) -> String {
        self.src.clone()
    }

    fn export_json(&self) -> SerializedNode {
        SerializedNode::Video(SerializedVideoNode {
            format: self.block.format(),
            version: 1,
            video_src: self.src.clone(),
            width: Some(self.width),
            height: Some(self.height),
        })
    }

    fn export_dom(&self) -> DomNode {
        let element = DomElement::new("video")
            .with_attribute(VIDEO_MARKER_ATTRIBUTE, self.src.clone())
            .with_attribute("src", self.src.clone());
        DomNode::Element(element)
    }

    fn import_dom() -> DomConversionMap {
        DomConversionMap::new().with("video", match_video)
    }

    fn update_dom(&self, _previous: &Self) -> bool {
        false
    }

    fn decorate(&self, theme: &Theme) -> Option<Decoration> {
        Some(Decoration::Video(VideoComponentProps {
            class_name: BlockClassName::embed_block(theme),
            format: self.block.format(),
            node_key: self.block.key().clone(),
            video_src: self.src.clone(),
            width: self.width,
            height: self.height,
            controls: true,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::BlockTheme;
    use std::collections::HashMap;
    use vellum_markup::{parse, serialize};

    const SRC: &str = "https://x/y.mp4";

    /// Store that records every writable request, standing in for an editor update
    #[derive(Default)]
    struct RecordingStore {
        nodes: HashMap<NodeKey, Node>,
        writable_requests: Vec<NodeKey>,
    }

    impl NodeStore for RecordingStore {
        fn get_node(&self, key: &NodeKey) -> Option<&Node> {
            self.nodes.get(key)
        }

        fn get_writable(&mut self, key: &NodeKey) -> Result<&mut Node, NodeError> {
            self.writable_requests.push(key.clone());
            self.nodes
                .get_mut(key)
                .ok_or_else(|| NodeError::NodeNotFound(key.clone()))
        }
    }

    fn import_markup(html: &str) -> Option<VideoNode> {
        let nodes = parse(html).unwrap();
        let element = nodes[0].as_element().unwrap();
        let conversion = VideoNode::import_dom().find_conversion(element)?;
        match (conversion.conversion)(element)?.node {
            Some(Node::Video(video)) => Some(video),
            _ => None,
        }
    }

    #[test]
    fn test_default_dimensions() {
        let video = create_video_node(SRC, None, None);
        assert_eq!(video.width(), 560);
        assert_eq!(video.height(), 315);

        let zeroes = VideoNode::new(SRC, None, None, Some(0), Some(0));
        assert_eq!((zeroes.width(), zeroes.height()), (560, 315));
    }

    #[test]
    fn test_any_src_is_accepted() {
        let video = create_video_node("not a url", None, None);
        assert_eq!(video.src(), "not a url");
    }

    #[test]
    fn test_clone_preserves_identity() {
        let video = VideoNode::new(
            SRC,
            Some(ElementFormat::Center),
            Some(NodeKey::from("42")),
            Some(640),
            Some(360),
        );
        let copy = video.clone();

        assert_eq!(copy.key(), &NodeKey::from("42"));
        assert_eq!(copy.src(), SRC);
        assert_eq!(copy.format(), ElementFormat::Center);
        assert_eq!((copy.width(), copy.height()), (640, 360));
    }

    #[test]
    fn test_json_round_trip() {
        let mut video = create_video_node(SRC, Some(1280), Some(720));
        video.block.format = ElementFormat::Right;

        let record = match video.export_json() {
            SerializedNode::Video(record) => record,
            other => panic!("Expected video record, got {:?}", other),
        };
        let json = serde_json::to_string(&SerializedNode::Video(record)).unwrap();
        let restored = match serde_json::from_str::<SerializedNode>(&json).unwrap() {
            SerializedNode::Video(record) => VideoNode::import_json(&record),
            other => panic!("Expected video record, got {:?}", other),
        };

        assert_eq!(restored.src(), SRC);
        assert_eq!((restored.width(), restored.height()), (1280, 720));
        assert_eq!(restored.format(), ElementFormat::Right);
        assert_ne!(restored.key(), video.key());
    }

    #[test]
    fn test_json_record_fields() {
        let video = create_video_node(SRC, None, None);
        let value = serde_json::to_value(video.export_json()).unwrap();

        assert_eq!(value["type"], "Video");
        assert_eq!(value["version"], 1);
        assert_eq!(value["videoSrc"], SRC);
        assert_eq!(value["width"], 560);
        assert_eq!(value["height"], 315);
        assert_eq!(value["format"], "");
    }

    #[test]
    fn test_markup_export() {
        let html = serialize(&[create_video_node(SRC, Some(800), Some(450)).export_dom()]);
        assert_eq!(
            html,
            r#"<video data-lexical-Video="https://x/y.mp4" src="https://x/y.mp4"></video>"#
        );
    }

    #[test]
    fn test_markup_round_trip_drops_dimensions() {
        let video = create_video_node(SRC, Some(800), Some(450));
        let html = serialize(&[video.export_dom()]);
        let restored = import_markup(&html).expect("marker element should convert");

        assert_eq!(restored.src(), SRC);
        assert_eq!((restored.width(), restored.height()), (560, 315));
    }

    #[test]
    fn test_markup_import_reads_marker_not_src() {
        let restored =
            import_markup(r#"<video data-lexical-Video="https://a/marker.mp4" src="https://b/other.mp4"></video>"#)
                .unwrap();
        assert_eq!(restored.src(), "https://a/marker.mp4");
    }

    #[test]
    fn test_foreign_video_markup_is_declined() {
        let nodes = parse(r#"<video src="https://x/y.mp4" controls></video>"#).unwrap();
        let element = nodes[0].as_element().unwrap();

        assert!(VideoNode::import_dom().find_conversion(element).is_none());
    }

    #[test]
    fn test_empty_marker_yields_no_node() {
        assert!(import_markup(r#"<video data-lexical-Video=""></video>"#).is_none());
    }

    #[test]
    fn test_set_width_and_height_goes_through_store() {
        let video = VideoNode::new(SRC, Some(ElementFormat::Center), None, None, None);
        let key = video.key().clone();
        let mut store = RecordingStore::default();
        store.nodes.insert(key.clone(), Node::Video(video));

        VideoNode::set_width_and_height(&mut store, &key, 800, 450).unwrap();

        assert_eq!(store.writable_requests, vec![key.clone()]);
        let updated = store.get_node(&key).and_then(Node::as_video).unwrap();
        assert_eq!((updated.width(), updated.height()), (800, 450));
        assert_eq!(updated.src(), SRC);
        assert_eq!(updated.format(), ElementFormat::Center);
    }

    #[test]
    fn test_set_width_and_height_on_other_node_type() {
        let text = crate::nodes::TextNode::new("x");
        let key = text.key().clone();
        let mut store = RecordingStore::default();
        store.nodes.insert(key.clone(), Node::Text(text));

        let result = VideoNode::set_width_and_height(&mut store, &key, 800, 450);
        assert!(matches!(result, Err(NodeError::TypeMismatch { .. })));
    }

    #[test]
    fn test_text_content_is_src() {
        assert_eq!(create_video_node(SRC, None, None).text_content(), SRC);
    }

    #[test]
    fn test_update_dom_is_always_false() {
        let a = create_video_node(SRC, None, None);
        let b = create_video_node("other.mp4", Some(1), Some(1));
        assert!(!a.update_dom(&b));
        assert!(!a.update_dom(&a.clone()));
    }

    #[test]
    fn test_decorate_resolves_theme() {
        let video = VideoNode::new(SRC, Some(ElementFormat::Left), None, Some(640), None);
        let theme = Theme {
            embed_block: Some(BlockTheme {
                base: Some("embed".to_string()),
                focus: Some("embed-focus".to_string()),
            }),
        };

        let Some(Decoration::Video(props)) = video.decorate(&theme) else {
            panic!("video should decorate");
        };
        assert_eq!(props.class_name.base, "embed");
        assert_eq!(props.class_name.focus, "embed-focus");
        assert_eq!(props.format, ElementFormat::Left);
        assert_eq!(&props.node_key, video.key());
        assert_eq!(props.video_src, SRC);
        assert_eq!((props.width, props.height), (640, 315));
        assert!(props.controls);
    }

    #[test]
    fn test_decorate_without_theme() {
        let video = create_video_node(SRC, None, None);
        let Some(Decoration::Video(props)) = video.decorate(&Theme::default()) else {
            panic!("video should decorate");
        };
        assert_eq!(props.class_name, BlockClassName::default());
    }

    #[test]
    fn test_identity_predicate_uses_type_tag() {
        let video = Node::Video(create_video_node(SRC, None, None));
        let text = Node::Text(crate::nodes::TextNode::new(SRC));

        assert!(is_video_node(Some(&video)));
        assert!(!is_video_node(Some(&text)));
        assert!(!is_video_node(None));
    }

    #[test]
    fn test_video_is_a_leaf() {
        let video = create_video_node(SRC, None, None);
        assert!(!video.can_have_children());
        assert!(!video.is_inline());
    }
}
