//! Integration tests for editor crate

use std::cell::RefCell;
use std::rc::Rc;
use vellum_editor::{create_command, Command, CommandPriority, Editor, EditorConfig, EditorError, Point, Registration, Selection};
use vellum_markup::{ParseError, MAX_DEPTH};
use vellum_model::{Decoration, DocumentNode, ElementFormat, NodeKey, NodeType, ParagraphNode, TextNode, VideoNode};

const LOG: Command<String> = create_command!("LOG");

fn editor() -> Editor {
    Editor::new(EditorConfig::new("test").with_nodes([NodeType::Video]))
}

#[test]
fn test_document_lifecycle() {
    let mut editor = editor();
    assert_eq!(editor.version(), 0);
    assert_eq!(editor.text_content(), "");

    editor
        .update(|update| {
            let paragraph = update.create_node(ParagraphNode::new())?;
            update.append(&NodeKey::root(), &paragraph)?;
            let text = update.create_node(TextNode::new("Hello"))?;
            update.append(&paragraph, &text)?;
            update.set_selection(Some(Selection::caret(Point::new(text, 5))));
            Ok(())
        })
        .unwrap();

    assert_eq!(editor.version(), 1);
    assert_eq!(editor.text_content(), "Hello");
    assert_eq!(editor.generate_html(), "<p>Hello</p>");
}

#[test]
fn test_dispatch_runs_highest_priority_first() {
    let mut editor = editor();
    let calls = Rc::new(RefCell::new(Vec::new()));

    let low_calls = Rc::clone(&calls);
    let low = editor.register_command(&LOG, CommandPriority::Low, move |payload, _| {
        low_calls.borrow_mut().push(format!("low:{}", payload));
        Ok(true)
    });
    let high_calls = Rc::clone(&calls);
    let high = editor.register_command(&LOG, CommandPriority::High, move |payload, _| {
        high_calls.borrow_mut().push(format!("high:{}", payload));
        Ok(false)
    });

    assert!(editor.dispatch_command(&LOG, "a".to_string()).unwrap());
    assert_eq!(*calls.borrow(), vec!["high:a", "low:a"]);

    high.revoke();
    assert!(editor.dispatch_command(&LOG, "b".to_string()).unwrap());
    assert_eq!(calls.borrow().len(), 3);

    low.revoke();
    assert!(!editor.dispatch_command(&LOG, "c".to_string()).unwrap());
    assert_eq!(calls.borrow().len(), 3);
}

#[test]
fn test_handled_command_stops_dispatch() {
    let mut editor = editor();
    let reached = Rc::new(RefCell::new(false));

    let first = editor.register_command(&LOG, CommandPriority::Critical, |_, _| Ok(true));
    let flag = Rc::clone(&reached);
    let second = editor.register_command(&LOG, CommandPriority::Editor, move |_, _| {
        *flag.borrow_mut() = true;
        Ok(true)
    });

    assert!(editor.dispatch_command(&LOG, String::new()).unwrap());
    assert!(!*reached.borrow());

    Registration::merge([first, second]).revoke();
    assert_eq!(editor.command_handlers(&LOG), 0);
}

#[test]
fn test_same_named_commands_do_not_share_handlers() {
    const OTHER_LOG: Command<String> = create_command!("LOG");
    let mut editor = editor();

    let registration = editor.register_command(&LOG, CommandPriority::Editor, |_, _| Ok(true));
    assert_eq!(editor.command_handlers(&OTHER_LOG), 0);
    assert!(!editor.dispatch_command(&OTHER_LOG, String::new()).unwrap());
    assert!(editor.dispatch_command(&LOG, String::new()).unwrap());

    registration.revoke();
}

#[test]
fn test_failing_handler_rolls_back() {
    let mut editor = editor();
    let registration = editor.register_command(&LOG, CommandPriority::Editor, |payload, update| {
        let paragraph = update.create_node(ParagraphNode::new())?;
        update.append(&NodeKey::root(), &paragraph)?;
        let text = update.create_node(TextNode::new(payload.clone()))?;
        update.append(&NodeKey::root(), &text)?;
        Ok(true)
    });

    let err = editor.dispatch_command(&LOG, "inline at root".to_string()).unwrap_err();
    assert!(matches!(err, EditorError::InvalidStructure(_)));
    assert!(editor.state().is_empty());

    registration.revoke();
}

#[test]
fn test_json_round_trip() {
    let json = r#"{
        "root": {
            "type": "root",
            "version": 1,
            "format": "",
            "indent": 0,
            "direction": null,
            "children": [
                {
                    "type": "paragraph",
                    "version": 1,
                    "format": "center",
                    "indent": 0,
                    "direction": null,
                    "children": [{ "type": "text", "version": 1, "text": "Intro", "format": 0, "style": "" }]
                },
                { "type": "Video", "version": 1, "format": "right", "videoSrc": "https://x/y.mp4", "width": 640, "height": 360 }
            ]
        }
    }"#;

    let mut editor = editor();
    editor.set_editor_state_json(json).unwrap();
    assert_eq!(editor.state().root_children().len(), 2);

    let videos = editor.state().nodes_of_type(NodeType::Video);
    let video = videos[0].as_video().unwrap();
    assert_eq!(video.src(), "https://x/y.mp4");
    assert_eq!((video.width(), video.height()), (640, 360));
    assert_eq!(video.format(), ElementFormat::Right);

    let exported = editor.editor_state_json().unwrap();
    let mut reloaded = self::editor();
    reloaded.set_editor_state_json(&exported).unwrap();
    assert_eq!(reloaded.editor_state_json().unwrap(), exported);
    assert_eq!(reloaded.text_content(), "Intro\n\nhttps://x/y.mp4");
}

#[test]
fn test_html_import_and_export() {
    let mut editor = editor();
    let keys = editor
        .import_html(r#"<p style="text-align: center">before<video data-lexical-video="https://x/y.mp4" src="https://x/y.mp4"></video>after</p>"#)
        .unwrap();
    assert_eq!(keys.len(), 3);

    let video = editor.state().get_node(&keys[1]).unwrap();
    assert_eq!(video.node_type(), NodeType::Video);
    assert_eq!(video.as_video().unwrap().width(), 560);
    assert!(matches!(editor.decoration(&keys[1]), Some(Decoration::Video(_))));

    let after = editor.state().get_node(&keys[2]).unwrap();
    assert_eq!(after.format(), Some(ElementFormat::Center));

    assert_eq!(
        editor.generate_html(),
        concat!(
            r#"<p style="text-align: center;">before</p>"#,
            r#"<video data-lexical-Video="https://x/y.mp4" src="https://x/y.mp4"></video>"#,
            r#"<p style="text-align: center;">after</p>"#,
        )
    );
}

#[test]
fn test_html_import_without_video_registered() {
    let mut editor = Editor::new(EditorConfig::default());
    editor
        .import_html(r#"<video data-lexical-Video="a.mp4">no video support</video>"#)
        .unwrap();

    assert!(editor.state().nodes_of_type(NodeType::Video).is_empty());
    assert_eq!(editor.text_content(), "no video support");
}

#[test]
fn test_malformed_html_is_an_error() {
    let mut editor = editor();
    let result = editor.import_html(r#"<video data-lexical-Video=></video>"#);
    assert!(matches!(result, Err(EditorError::Markup(_))));
    assert_eq!(editor.version(), 0);
}

#[test]
fn test_stray_lt_in_html_is_text() {
    let mut editor = editor();
    editor.import_html("if x<y then").unwrap();
    assert_eq!(editor.text_content(), "if x<y then");
}

#[test]
fn test_deeply_nested_html_is_rejected() {
    let mut divs = editor();
    let result = divs.import_html(&"<div>".repeat(5000));
    assert!(matches!(
        result,
        Err(EditorError::Markup(ParseError::TooDeep { limit: MAX_DEPTH, .. }))
    ));
    assert!(divs.state().is_empty());
    assert_eq!(divs.version(), 0);

    divs.import_html(&format!("{}deep", "<div>".repeat(MAX_DEPTH))).unwrap();
    assert_eq!(divs.text_content(), "deep");

    let mut paragraphs = editor();
    paragraphs
        .import_html(&format!("{}deep", "<p>".repeat(MAX_DEPTH)))
        .unwrap();
    assert_eq!(paragraphs.text_content(), "deep");
}

#[test]
fn test_format_video_block() {
    let mut editor = editor();
    let key = editor
        .update(|update| update.insert_node_to_nearest_root(VideoNode::new("a.mp4", None, None, None, None)))
        .unwrap();

    editor
        .update(|update| update.set_format(&key, ElementFormat::Center))
        .unwrap();

    let Some(Decoration::Video(props)) = editor.decoration(&key) else {
        panic!("video decoration missing");
    };
    assert_eq!(props.format, ElementFormat::Center);
    assert!(props.controls);
}
