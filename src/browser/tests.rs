use super::*;
use crate::message::Role;
use crate::testing::{event_log, CaptureRenderer, Reply, ScriptedGenerator};
use std::fs;

fn sample_events() -> Vec<ClickEvent> {
    vec![
        ClickEvent {
            kind: "click".to_string(),
            xpath: "/html/body/div[2]/button[1]".to_string(),
            tag: "BUTTON".to_string(),
            text: "Sign in".to_string(),
            timestamp: 1_700_000_000_123,
        },
        ClickEvent {
            kind: "click".to_string(),
            xpath: "//*[@id=\"search\"]".to_string(),
            tag: "INPUT".to_string(),
            text: String::new(),
            timestamp: 1_700_000_004_000,
        },
    ]
}

#[test]
fn test_parse_fenced_action_sequence() {
    let reply = r#"Here is the plan:
```json
[
  {"action": "navigate", "target": "https://example.com", "value": "", "description": "open the site", "wait": 2000},
  {"action": "click", "target": "css:button[type='submit']", "description": "submit"}
]
```
"#;
    let actions = parse_action_sequence(reply).unwrap();
    assert_eq!(actions.len(), 2);
    assert_eq!(actions[0].kind(), Some(ActionType::Navigate));
    assert_eq!(actions[0].wait, Some(2000));
    assert_eq!(actions[1].value, "");
    assert_eq!(actions[1].wait, None);
}

#[test]
fn test_parse_bare_action_sequence() {
    let actions =
        parse_action_sequence(r#" [{"action": "waitForText", "target": "text:Done"}] "#).unwrap();
    assert_eq!(actions[0].kind(), Some(ActionType::WaitForText));
}

#[test]
fn test_unknown_action_survives_parsing() {
    let actions = parse_action_sequence(r#"[{"action": "teleport", "target": "moon"}]"#).unwrap();
    assert_eq!(actions[0].kind(), None);
    assert!(actions[0].to_string().contains("(unsupported)"));
}

#[test]
fn test_parse_rejects_prose_and_empty_plans() {
    assert!(matches!(
        parse_action_sequence("I cannot help with that."),
        Err(ActionParseError::Json(_))
    ));
    assert!(matches!(
        parse_action_sequence("```json\n[]\n```"),
        Err(ActionParseError::Empty)
    ));
}

#[test]
fn test_action_names_match_wire_format() {
    for kind in ActionType::ALL {
        let json = serde_json::to_string(&kind).unwrap();
        assert_eq!(json, format!("\"{}\"", kind.name()));
        assert_eq!(ActionType::from_name(kind.name()), Some(kind));
    }
}

#[test]
fn test_action_display() {
    let action = BrowserAction {
        action: "type".to_string(),
        target: "css:input[type='email']".to_string(),
        value: "{email}".to_string(),
        description: "enter the address".to_string(),
        wait: Some(1000),
    };
    assert_eq!(
        action.to_string(),
        "type css:input[type='email'] = \"{email}\" - enter the address [wait 1000ms]"
    );
}

#[test]
fn test_recording_file_format() {
    let json = r#"[{"type":"click","xpath":"/html/body/a","tag":"A","text":"Home","timestamp":1700000000000}]"#;
    let recording: ClickRecording = serde_json::from_str(json).unwrap();
    assert_eq!(recording.len(), 1);
    assert_eq!(recording.events[0].kind, "click");
    assert_eq!(serde_json::to_string(&recording).unwrap(), json);
}

#[test]
fn test_recording_round_trip_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("clicks.json");
    assert_eq!(ClickRecording::load(&path).unwrap(), None);

    let recording = ClickRecording {
        events: sample_events(),
    };
    recording.save(&path).unwrap();
    assert_eq!(ClickRecording::load(&path).unwrap(), Some(recording));

    assert!(ClickRecording::clear(&path).unwrap());
    assert!(!ClickRecording::clear(&path).unwrap());
}

#[test]
fn test_click_event_display() {
    let events = sample_events();
    assert_eq!(
        events[0].to_string(),
        "[22:13:20.123] click <button> /html/body/div[2]/button[1] \"Sign in\""
    );
    let long = ClickEvent {
        text: "x".repeat(60),
        ..events[1].clone()
    };
    assert!(long.to_string().ends_with(&format!("\"{}...\"", "x".repeat(40))));
}

#[test]
fn test_capability_lookup() {
    assert_eq!(Capability::from_name("PLAN"), Some(Capability::Plan));
    assert_eq!(Capability::from_name("eval"), None);
    assert_eq!(Capability::ALL.len(), 4);
}

#[tokio::test]
async fn test_console_lists_capabilities() {
    let generator = ScriptedGenerator::new(vec![], event_log());
    let console = DebugConsole::new("/nonexistent.json".into());
    let mut out = CaptureRenderer::default();

    console.handle("capabilities", generator.as_ref(), &mut out).await;
    for cap in Capability::ALL {
        assert!(out.transcript.contains(cap.name()));
    }
    assert!(generator.requests().is_empty());
}

#[tokio::test]
async fn test_console_plan_asks_model_with_parser_prompt() {
    let reply = "```json\n[{\"action\":\"navigate\",\"target\":\"https://example.com\",\"description\":\"open\"},{\"action\":\"screenshot\",\"target\":\"\"}]\n```";
    let generator = ScriptedGenerator::new(vec![Reply::ok(&[reply])], event_log());
    let console = DebugConsole::new("/nonexistent.json".into());
    let mut out = CaptureRenderer::default();

    console
        .handle("plan take a screenshot of example.com", generator.as_ref(), &mut out)
        .await;

    let requests = generator.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0][0].role, Role::System);
    assert_eq!(requests[0][0].text(), ACTION_PARSER_PROMPT);
    assert_eq!(requests[0][1].text(), "take a screenshot of example.com");

    assert!(out.errors.is_empty());
    assert!(out.transcript.contains("Action plan (2 steps, not executed):"));
    assert!(out.transcript.contains("1. navigate https://example.com - open"));
    assert!(out.transcript.contains("2. screenshot"));
}

#[tokio::test]
async fn test_console_plan_reports_failures() {
    let generator = ScriptedGenerator::new(
        vec![Reply::ok(&["no json here"]), Reply::fail(&[], "quota exceeded")],
        event_log(),
    );
    let console = DebugConsole::new("/nonexistent.json".into());
    let mut out = CaptureRenderer::default();

    console.handle("plan", generator.as_ref(), &mut out).await;
    console.handle("plan open mail", generator.as_ref(), &mut out).await;
    console.handle("plan open mail", generator.as_ref(), &mut out).await;

    assert_eq!(out.errors.len(), 3);
    assert_eq!(out.errors[0], "usage: plan <request>");
    assert!(out.errors[1].starts_with("invalid action sequence"));
    assert_eq!(out.errors[2], "request failed: quota exceeded");
}

#[tokio::test]
async fn test_console_recording_show_import_clear() {
    let dir = tempfile::tempdir().unwrap();
    let stored = dir.path().join("data").join("click-recording.json");
    let source = dir.path().join("export.json");
    fs::write(
        &source,
        serde_json::to_string(&ClickRecording {
            events: sample_events(),
        })
        .unwrap(),
    )
    .unwrap();

    let generator = ScriptedGenerator::new(vec![], event_log());
    let console = DebugConsole::new(stored.clone());
    let mut out = CaptureRenderer::default();

    console.handle("recording", generator.as_ref(), &mut out).await;
    assert!(out.notices.last().unwrap().starts_with("No recording found"));

    let import = format!("recording Import {}", source.display());
    console.handle(&import, generator.as_ref(), &mut out).await;
    assert!(out.notices.last().unwrap().starts_with("Imported 2 events"));
    assert!(stored.exists());

    console.handle("recording", generator.as_ref(), &mut out).await;
    assert!(out.transcript.contains("(2 events):"));
    assert!(out.transcript.contains("/html/body/div[2]/button[1]"));

    console.handle("recording CLEAR", generator.as_ref(), &mut out).await;
    assert!(!stored.exists());
    assert!(out.errors.is_empty());
}

#[tokio::test]
async fn test_console_recording_errors() {
    let dir = tempfile::tempdir().unwrap();
    let stored = dir.path().join("click-recording.json");
    fs::write(&stored, "{not json").unwrap();

    let generator = ScriptedGenerator::new(vec![], event_log());
    let console = DebugConsole::new(stored);
    let mut out = CaptureRenderer::default();

    console.handle("recording", generator.as_ref(), &mut out).await;
    console.handle("recording import", generator.as_ref(), &mut out).await;
    console
        .handle("recording import /no/such/file.json", generator.as_ref(), &mut out)
        .await;

    assert_eq!(out.errors.len(), 3);
    assert!(out.errors[0].starts_with("Failed to parse recording"));
    assert_eq!(out.errors[1], "usage: recording [import <file> | clear]");
    assert!(out.errors[2].starts_with("No recording found at /no/such/file.json"));
}
