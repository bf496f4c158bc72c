use std::cell::RefCell;
use std::rc::Rc;

use core_types::{KeyCode, Modifiers};
use html::{Document, Id};
use layout::MonospaceMeasurer;
use taglist::{FieldFormat, Hooks, TagList, TagListConfig, TagListError, TagListEvent};

type Log = Rc<RefCell<Vec<String>>>;

/// A container 200px wide with 10px text: every glyph is 5px.
fn container_doc() -> (Document, Id) {
    let mut doc = Document::new();
    let div = doc.create_element("div");
    doc.append_child(doc.root(), div).unwrap();
    doc.set_style(div, "width", "200px").unwrap();
    doc.set_style(div, "font-size", "10px").unwrap();
    (doc, div)
}

fn field_doc(value: &str) -> (Document, Id) {
    let (mut doc, div) = container_doc();
    let form = doc.create_element("form");
    doc.append_child(div, form).unwrap();
    let field = doc.create_element("input");
    doc.append_child(form, field).unwrap();
    doc.set_attr(field, "name", "tags").unwrap();
    doc.set_attr(field, "value", value).unwrap();
    (doc, field)
}

fn mount(doc: &mut Document, target: Id, initial: &[&str], config: TagListConfig, hooks: Hooks) -> TagList {
    TagList::attach(
        doc,
        target,
        initial.iter().copied(),
        config,
        hooks,
        Rc::new(MonospaceMeasurer::new(0.5)),
    )
    .unwrap()
}

fn recording_hooks() -> (Hooks, Log) {
    let log: Log = Rc::default();
    let added = Rc::clone(&log);
    let removed = Rc::clone(&log);
    let hooks = Hooks::new()
        .on_add(move |_, tag| added.borrow_mut().push(format!("+{tag}")))
        .on_remove(move |_, tag| removed.borrow_mut().push(format!("-{tag}")));
    (hooks, log)
}

fn tags(list: &TagList) -> Vec<&str> {
    list.tags().iter().map(String::as_str).collect()
}

fn type_text(list: &mut TagList, doc: &mut Document, text: &str) {
    list.handle_event(doc, &TagListEvent::Text(text.to_string()));
}

fn press(list: &mut TagList, doc: &mut Document, code: KeyCode) -> bool {
    list.handle_event(doc, &TagListEvent::key(code)).default_prevented
}

/// Key down plus the text a browser would insert for it.
fn type_key(list: &mut TagList, doc: &mut Document, code: KeyCode, ch: &str) -> bool {
    let prevented = press(list, doc, code);
    type_text(list, doc, ch);
    prevented
}

#[test]
fn container_mode_renders_chips_before_the_entry() {
    let (mut doc, div) = container_doc();
    let stale = doc.create_element("p");
    doc.append_child(div, stale).unwrap();

    let config = TagListConfig {
        prefix_url: Some("/tags/".into()),
        ..TagListConfig::default()
    };
    let list = mount(&mut doc, div, &["rust", "c & c++"], config, Hooks::new());

    assert!(!doc.is_live(stale));
    assert_eq!(list.container(), div);
    assert_eq!(list.bound_field(), None);
    let children = doc.children(div).to_vec();
    assert_eq!(children.len(), 5);
    assert_eq!(children[4], list.entry());

    let chip = list.chips()[1];
    assert_eq!(
        doc.outer_html(chip.anchor),
        "<a class=\"tag\" href=\"/tags/c%20%26%20c%2B%2B\" onclick=\"return false\" \
         title=\"c &amp; c++\"><span class=\"tagclose\">✕</span>\
         <span class=\"tagname\">c &amp; c++</span></a>"
    );
    assert_eq!(doc.outer_html(chip.spacer), "<span> </span>");
    assert_eq!(doc.attr(list.input(), "type"), Some("text"));
    assert_eq!(doc.attr(list.entry(), "class"), Some("taginput"));
}

#[test]
fn adding_is_idempotent_and_trims() {
    let (mut doc, div) = container_doc();
    let (hooks, log) = recording_hooks();
    let mut list = mount(&mut doc, div, &[], TagListConfig::default(), hooks);

    assert!(list.add_tag(&mut doc, "  foo  ").is_some());
    assert!(list.add_tag(&mut doc, "foo").is_none());
    assert!(list.add_tag(&mut doc, " \t ").is_none());
    assert!(list.add_tag(&mut doc, "").is_none());

    assert_eq!(tags(&list), ["foo"]);
    assert_eq!(list.chips().len(), 1);
    assert_eq!(doc.attr(list.chips()[0].anchor, "title"), Some("foo"));
    assert_eq!(*log.borrow(), ["+foo"]);
}

#[test]
fn removal_keeps_order_and_realigns_chips() {
    let (mut doc, div) = container_doc();
    let (hooks, log) = recording_hooks();
    let mut list = mount(&mut doc, div, &[], TagListConfig::default(), hooks);
    for t in ["a", "b", "c"] {
        list.add_tag(&mut doc, t);
    }
    assert_eq!(tags(&list), ["a", "b", "c"]);

    let b = list.chips()[1];
    assert_eq!(list.remove_tag(&mut doc, " b "), Some(b));
    assert!(!doc.is_live(b.anchor));
    assert!(!doc.is_live(b.spacer));
    assert_eq!(tags(&list), ["a", "c"]);
    for (tag, chip) in list.tags().iter().zip(list.chips()) {
        assert_eq!(doc.attr(chip.anchor, "title"), Some(tag.as_str()));
    }
    assert_eq!(*log.borrow(), ["+a", "+b", "+c", "-b"]);
}

#[test]
fn removing_an_absent_tag_changes_nothing() {
    let (mut doc, div) = container_doc();
    let (hooks, log) = recording_hooks();
    let mut list = mount(&mut doc, div, &["a"], TagListConfig::default(), hooks);
    let before = doc.outer_html(div);

    assert_eq!(list.remove_tag(&mut doc, "zzz"), None);
    assert_eq!(list.remove_tag(&mut doc, "  "), None);
    assert_eq!(doc.outer_html(div), before);
    assert_eq!(*log.borrow(), ["+a"]);
}

#[test]
fn delimited_field_round_trip() {
    let (mut doc, field) = field_doc("");
    let mut list = mount(&mut doc, field, &[], TagListConfig::default(), Hooks::new());

    assert_eq!(list.bound_field(), Some(field));
    assert_eq!(doc.style(field, "display"), Some("none"));
    assert_eq!(doc.attr(list.container(), "class"), Some("taglist"));

    list.add_tag(&mut doc, "red");
    list.add_tag(&mut doc, "green");
    assert_eq!(doc.attr(field, "value"), Some("red green"));
    list.remove_tag(&mut doc, "red");
    assert_eq!(doc.attr(field, "value"), Some("green"));
}

#[test]
fn json_field_round_trip() {
    let (mut doc, field) = field_doc("");
    let config = TagListConfig {
        key_codes: None,
        delimiter: None,
        ..TagListConfig::default()
    };
    let mut list = mount(&mut doc, field, &[], config, Hooks::new());
    assert_eq!(list.field_format(), Some(&FieldFormat::Json));
    assert_eq!(doc.attr(field, "value"), Some("[]"));

    list.add_tag(&mut doc, "a");
    list.add_tag(&mut doc, "b");
    let value = doc.attr(field, "value").unwrap();
    let parsed: Vec<String> = serde_json::from_str(value).unwrap();
    assert_eq!(parsed, ["a", "b"]);

    // Delimiter characters survive inside tags.
    list.process_tag(&mut doc, "new york");
    assert_eq!(doc.attr(field, "value"), Some(r#"["a","b","new york"]"#));
}

#[test]
fn bound_field_seeds_from_its_value_before_initial_tags() {
    let (mut doc, field) = field_doc(" red  green red ");
    let list = mount(&mut doc, field, &["blue", "green"], TagListConfig::default(), Hooks::new());
    assert_eq!(tags(&list), ["red", "green", "blue"]);
    assert_eq!(doc.attr(field, "value"), Some("red green blue"));

    let (mut doc, field) = field_doc(r#"["x y","z"]"#);
    let config = TagListConfig {
        delimiter: None,
        ..TagListConfig::default()
    };
    let list = mount(&mut doc, field, &[], config, Hooks::new());
    assert_eq!(tags(&list), ["x y", "z"]);
}

#[test]
fn processing_splits_on_the_delimiter() {
    let (mut doc, field) = field_doc("");
    let mut list = mount(&mut doc, field, &["green"], TagListConfig::default(), Hooks::new());

    let created = list.process_tag(&mut doc, "red  green blue");
    assert_eq!(created.len(), 2);
    assert_eq!(tags(&list), ["green", "red", "blue"]);

    let config = TagListConfig {
        delimiter: Some(",".into()),
        ..TagListConfig::default()
    };
    let (mut doc, field) = field_doc("");
    let mut list = mount(&mut doc, field, &[], config, Hooks::new());
    list.process_tag(&mut doc, " a b , c,");
    assert_eq!(tags(&list), ["a b", "c"]);
    assert_eq!(doc.attr(field, "value"), Some("a b,c"));
}

#[test]
fn container_mode_commits_the_whole_text() {
    let (mut doc, div) = container_doc();
    let mut list = mount(&mut doc, div, &[], TagListConfig::default(), Hooks::new());
    assert_eq!(list.field_format(), None);
    list.process_tag(&mut doc, " red green ");
    assert_eq!(tags(&list), ["red green"]);
}

#[test]
fn process_hook_replaces_the_default_commit() {
    let (mut doc, field) = field_doc("");
    let seen: Log = Rc::default();
    let sink = Rc::clone(&seen);
    let hooks = Hooks::new().on_process(move |list, doc, raw| {
        sink.borrow_mut().push(raw.to_string());
        list.add_tag(doc, &raw.to_uppercase());
    });
    let mut list = mount(&mut doc, field, &[], TagListConfig::default(), hooks);

    let created = list.process_tag(&mut doc, "red green");
    assert_eq!(created.len(), 1);
    assert_eq!(tags(&list), ["RED GREEN"]);
    assert_eq!(*seen.borrow(), ["red green"]);
    // The hook stays installed.
    assert!(list.process_tag(&mut doc, "red green").is_empty());
    assert_eq!(seen.borrow().len(), 2);
}

#[test]
fn add_hook_sees_the_updated_model() {
    let (mut doc, field) = field_doc("");
    let seen: Log = Rc::default();
    let sink = Rc::clone(&seen);
    let hooks = Hooks::new().on_add(move |list, tag| {
        sink.borrow_mut().push(format!("{tag}:{}", list.tags().len()));
    });
    let mut list = mount(&mut doc, field, &["a"], TagListConfig::default(), hooks);
    list.add_tag(&mut doc, "b");
    assert_eq!(*seen.borrow(), ["a:1", "b:2"]);
}

#[test]
fn long_labels_are_elided_but_keep_the_full_tag() {
    let (mut doc, div) = container_doc();
    let mut list = mount(&mut doc, div, &[], TagListConfig::default(), Hooks::new());
    // Budget is 200 - 20 - 10 = 170px, i.e. 34 glyphs.
    let tag = "x".repeat(50);
    let chip = list.add_tag(&mut doc, &tag).unwrap();

    let label = doc.text_content(chip.label);
    assert_eq!(label.chars().count(), 34);
    assert!(label.ends_with('…'));
    assert_eq!(doc.attr(chip.anchor, "title"), Some(tag.as_str()));
    assert_eq!(list.tags()[0], tag);
}

#[test]
fn elision_terminates_in_a_narrow_container() {
    let (mut doc, div) = container_doc();
    doc.set_style(div, "width", "1px").unwrap();
    let mut list = mount(&mut doc, div, &[], TagListConfig::default(), Hooks::new());
    for tag in ["a", "hello", "größer als", "标签"] {
        let chip = list.add_tag(&mut doc, tag).unwrap();
        let label = doc.text_content(chip.label);
        assert_eq!(label.chars().count(), 2, "{tag}");
        assert!(label.ends_with('…'));
    }
}

#[test]
fn unbounded_container_never_elides() {
    let mut doc = Document::new();
    let span = doc.create_element("span");
    doc.append_child(doc.root(), span).unwrap();
    let mut list = mount(&mut doc, span, &[], TagListConfig::default(), Hooks::new());
    assert_eq!(list.max_width(), None);
    let tag = "y".repeat(500);
    let chip = list.add_tag(&mut doc, &tag).unwrap();
    assert_eq!(doc.text_content(chip.label), tag);
}

#[test]
fn entry_width_tracks_the_typed_text() {
    let (mut doc, div) = container_doc();
    let mut list = mount(&mut doc, div, &[], TagListConfig::default(), Hooks::new());
    // Comfort only.
    assert_eq!(list.entry_width(&doc), 20.0);

    type_text(&mut list, &mut doc, "abcd");
    assert_eq!(list.entry_width(&doc), 40.0);
    assert_eq!(doc.attr(list.input(), "value"), Some("abcd"));

    press(&mut list, &mut doc, KeyCode::BACKSPACE);
    assert_eq!(list.entry_value(), "abc");
    assert_eq!(list.entry_width(&doc), 35.0);

    // 40 glyphs would be 220px, which the 200px container cannot take.
    type_text(&mut list, &mut doc, &"z".repeat(37));
    assert_eq!(list.entry_width(&doc), 35.0);
}

#[test]
fn enter_commits_and_prevents_submission() {
    let (mut doc, div) = container_doc();
    let mut list = mount(&mut doc, div, &[], TagListConfig::default(), Hooks::new());
    type_text(&mut list, &mut doc, " rust ");
    assert!(press(&mut list, &mut doc, KeyCode::ENTER));
    assert_eq!(tags(&list), ["rust"]);
    assert_eq!(list.entry_value(), "");
    assert_eq!(doc.attr(list.input(), "value"), Some(""));
}

#[test]
fn commit_keys_commit_in_bound_field_mode_only() {
    let (mut doc, field) = field_doc("");
    let mut list = mount(&mut doc, field, &[], TagListConfig::default(), Hooks::new());
    for ch in "red".chars() {
        let code = KeyCode::from_alphanumeric(ch).unwrap();
        assert!(!type_key(&mut list, &mut doc, code, &ch.to_string()));
    }
    assert!(type_key(&mut list, &mut doc, KeyCode::COMMA, ","));
    assert_eq!(tags(&list), ["red"]);
    // The comma itself was not typed.
    assert_eq!(list.entry_value(), "");
    type_key(&mut list, &mut doc, KeyCode::from_alphanumeric('b').unwrap(), "b");
    assert!(type_key(&mut list, &mut doc, KeyCode::SPACE, " "));
    assert_eq!(tags(&list), ["red", "b"]);
    assert_eq!(doc.attr(field, "value"), Some("red b"));

    let (mut doc, div) = container_doc();
    let mut list = mount(&mut doc, div, &[], TagListConfig::default(), Hooks::new());
    type_text(&mut list, &mut doc, "a");
    assert!(!type_key(&mut list, &mut doc, KeyCode::COMMA, ","));
    assert!(!type_key(&mut list, &mut doc, KeyCode::SPACE, " "));
    assert!(list.tags().is_empty());
    assert_eq!(list.entry_value(), "a, ");
}

#[test]
fn disabled_key_codes_type_normally() {
    let (mut doc, field) = field_doc("");
    let config = TagListConfig {
        key_codes: None,
        ..TagListConfig::default()
    };
    let mut list = mount(&mut doc, field, &[], config, Hooks::new());
    type_text(&mut list, &mut doc, "a");
    assert!(!type_key(&mut list, &mut doc, KeyCode::COMMA, ","));
    assert_eq!(list.entry_value(), "a,");
}

#[test]
fn commit_key_without_text_does_not_swallow_later_input() {
    let (mut doc, field) = field_doc("");
    let mut list = mount(&mut doc, field, &[], TagListConfig::default(), Hooks::new());
    type_text(&mut list, &mut doc, "red");
    let ctrl_comma = TagListEvent::KeyDown {
        code: KeyCode::COMMA,
        modifiers: Modifiers {
            ctrl: true,
            ..Modifiers::default()
        },
    };
    assert!(list.handle_event(&mut doc, &ctrl_comma).default_prevented);
    list.handle_event(&mut doc, &TagListEvent::KeyUp { code: KeyCode::COMMA });
    type_text(&mut list, &mut doc, "x");
    assert_eq!(tags(&list), ["red"]);
    assert_eq!(list.entry_value(), "x");

    // Pasted text arrives without a key of its own.
    assert!(press(&mut list, &mut doc, KeyCode::SPACE));
    type_text(&mut list, &mut doc, "ab");
    assert_eq!(tags(&list), ["red", "x"]);
    assert_eq!(list.entry_value(), "ab");
}

#[test]
fn tab_commits_and_leaves_focus_to_the_host() {
    let (mut doc, div) = container_doc();
    let mut list = mount(&mut doc, div, &[], TagListConfig::default(), Hooks::new());
    list.handle_event(&mut doc, &TagListEvent::Focus);
    type_text(&mut list, &mut doc, "go");
    assert!(!press(&mut list, &mut doc, KeyCode::TAB));
    assert_eq!(tags(&list), ["go"]);
    assert_eq!(list.entry_value(), "");
    assert_eq!(doc.focused(), None);

    assert!(!press(&mut list, &mut doc, KeyCode::TAB));
    assert_eq!(tags(&list), ["go"]);
}

#[test]
fn long_editing_sessions_keep_the_document_size_bounded() {
    let (mut doc, div) = container_doc();
    let mut list = mount(&mut doc, div, &["keep"], TagListConfig::default(), Hooks::new());
    type_text(&mut list, &mut doc, "a");
    let nodes = doc.node_count();

    for _ in 0..5_000 {
        type_text(&mut list, &mut doc, "b");
        press(&mut list, &mut doc, KeyCode::BACKSPACE);
    }
    for _ in 0..5_000 {
        type_text(&mut list, &mut doc, "c");
        press(&mut list, &mut doc, KeyCode::BACKSPACE);
        press(&mut list, &mut doc, KeyCode::BACKSPACE);
        type_text(&mut list, &mut doc, "a");
    }
    assert_eq!(list.entry_value(), "a");
    assert_eq!(doc.node_count(), nodes);

    for _ in 0..1_000 {
        list.add_tag(&mut doc, "churn");
        list.remove_tag(&mut doc, "churn");
    }
    assert_eq!(tags(&list), ["keep"]);
    assert_eq!(doc.node_count(), nodes);
}

#[test]
fn backspace_on_empty_entry_removes_the_last_tag() {
    let (mut doc, div) = container_doc();
    let (hooks, log) = recording_hooks();
    let mut list = mount(&mut doc, div, &["a", "b"], TagListConfig::default(), hooks);

    type_text(&mut list, &mut doc, "x");
    press(&mut list, &mut doc, KeyCode::BACKSPACE);
    assert_eq!(list.entry_value(), "");
    assert_eq!(tags(&list), ["a", "b"]);

    press(&mut list, &mut doc, KeyCode::BACKSPACE);
    assert_eq!(tags(&list), ["a"]);
    press(&mut list, &mut doc, KeyCode::BACKSPACE);
    press(&mut list, &mut doc, KeyCode::BACKSPACE);
    assert!(list.is_empty());
    assert_eq!(*log.borrow(), ["+a", "+b", "-b", "-a"]);
}

#[test]
fn escape_clears_and_blurs_without_committing() {
    let (mut doc, div) = container_doc();
    let mut list = mount(&mut doc, div, &[], TagListConfig::default(), Hooks::new());
    list.handle_event(&mut doc, &TagListEvent::Focus);
    assert_eq!(doc.focused(), Some(list.input()));

    type_text(&mut list, &mut doc, "draft");
    assert!(!press(&mut list, &mut doc, KeyCode::ESCAPE));
    assert_eq!(list.entry_value(), "");
    assert_eq!(doc.focused(), None);

    list.handle_event(&mut doc, &TagListEvent::Blur);
    assert!(list.tags().is_empty());
}

#[test]
fn blur_commits_non_empty_text() {
    let (mut doc, div) = container_doc();
    let (hooks, log) = recording_hooks();
    let mut list = mount(&mut doc, div, &[], TagListConfig::default(), hooks);
    list.handle_event(&mut doc, &TagListEvent::Blur);
    assert!(log.borrow().is_empty());

    list.handle_event(&mut doc, &TagListEvent::Focus);
    type_text(&mut list, &mut doc, "later");
    list.handle_event(&mut doc, &TagListEvent::Blur);
    assert_eq!(tags(&list), ["later"]);
    assert_eq!(list.entry_value(), "");
    assert_eq!(doc.focused(), None);
}

#[test]
fn caret_editing_keys() {
    let (mut doc, div) = container_doc();
    let mut list = mount(&mut doc, div, &[], TagListConfig::default(), Hooks::new());
    type_text(&mut list, &mut doc, "tga");
    press(&mut list, &mut doc, KeyCode::LEFT);
    press(&mut list, &mut doc, KeyCode::LEFT);
    press(&mut list, &mut doc, KeyCode::DELETE);
    type_text(&mut list, &mut doc, "ag");
    assert_eq!(list.entry_value(), "taga");

    let select_all = TagListEvent::KeyDown {
        code: KeyCode(65),
        modifiers: Modifiers {
            ctrl: true,
            ..Modifiers::default()
        },
    };
    list.handle_event(&mut doc, &select_all);
    type_text(&mut list, &mut doc, "new");
    assert_eq!(list.entry_value(), "new");
}

#[test]
fn clicking_the_close_control_removes_the_chip() {
    let (mut doc, field) = field_doc("a b c");
    let (hooks, log) = recording_hooks();
    let mut list = mount(&mut doc, field, &[], TagListConfig::default(), hooks);

    let b = list.chips()[1];
    let response = list.handle_event(&mut doc, &TagListEvent::Click { target: b.close });
    assert!(response.default_prevented);
    assert_eq!(tags(&list), ["a", "c"]);
    assert_eq!(doc.attr(field, "value"), Some("a c"));
    assert_eq!(log.borrow().last().map(String::as_str), Some("-b"));
    assert_eq!(doc.focused(), Some(list.input()));
}

#[test]
fn clicking_a_chip_label_never_follows_the_link() {
    let (mut doc, div) = container_doc();
    let mut list = mount(&mut doc, div, &["a"], TagListConfig::default(), Hooks::new());
    let chip = list.chips()[0];
    let response = list.handle_event(&mut doc, &TagListEvent::Click { target: chip.label });
    assert!(response.default_prevented);
    assert_eq!(tags(&list), ["a"]);

    let response = list.handle_event(&mut doc, &TagListEvent::Click { target: div });
    assert!(!response.default_prevented);
    assert_eq!(doc.focused(), Some(list.input()));

    doc.blur();
    let outside = doc.root();
    list.handle_event(&mut doc, &TagListEvent::Click { target: outside });
    assert_eq!(doc.focused(), None);
}

#[test]
fn options_come_from_the_data_attribute() {
    let (mut doc, field) = field_doc("x;y");
    doc.set_attr(
        field,
        taglist::OPTIONS_ATTRIBUTE,
        r#"{"className": "chip", "delimiter": ";", "keyCodes": [186]}"#,
    )
    .unwrap();
    let config = TagListConfig::from_element(&doc, field).unwrap();
    let mut list = mount(&mut doc, field, &[], config, Hooks::new());
    assert_eq!(tags(&list), ["x", "y"]);
    assert_eq!(doc.attr(list.chips()[0].anchor, "class"), Some("chip"));
    assert_eq!(list.config().key_codes, Some(vec![KeyCode::SEMICOLON]));
    assert_eq!(list.field_format(), Some(&FieldFormat::Delimited(";".into())));

    type_text(&mut list, &mut doc, "z");
    assert!(type_key(&mut list, &mut doc, KeyCode::SEMICOLON, ";"));
    assert_eq!(doc.attr(field, "value"), Some("x;y;z"));
}

#[test]
fn dispose_restores_the_bound_field() {
    let (mut doc, field) = field_doc("a");
    doc.set_style(field, "display", "inline-block").unwrap();
    let form = doc.parent(field).unwrap();
    let mut list = mount(&mut doc, field, &[], TagListConfig::default(), Hooks::new());
    list.add_tag(&mut doc, "b");
    let container = list.container();
    let input = list.input();

    list.dispose(&mut doc).unwrap();
    assert!(!doc.is_live(container));
    assert!(!doc.is_live(input));
    assert_eq!(doc.children(form), &[field]);
    assert_eq!(doc.style(field, "display"), Some("inline-block"));
    assert_eq!(doc.attr(field, "value"), Some("a b"));
}

#[test]
fn dispose_empties_a_container() {
    let (mut doc, div) = container_doc();
    let list = mount(&mut doc, div, &["a", "b"], TagListConfig::default(), Hooks::new());
    list.dispose(&mut doc).unwrap();
    assert!(doc.children(div).is_empty());
    assert!(doc.is_live(div));
}

#[test]
fn attaching_to_a_dead_node_fails() {
    let mut doc = Document::new();
    let gone = doc.create_element("div");
    doc.append_child(doc.root(), gone).unwrap();
    doc.remove(gone).unwrap();
    let err = TagList::attach(
        &mut doc,
        gone,
        Vec::<String>::new(),
        TagListConfig::default(),
        Hooks::new(),
        Rc::new(MonospaceMeasurer::default()),
    )
    .unwrap_err();
    assert!(matches!(err, TagListError::MissingTarget(id) if id == gone));
}
