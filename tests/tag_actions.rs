mod common;
use common::{client, RecordingXcall, TOKEN};

use bear_xcall::errors::{BearError, BearErrorKind};
use bear_xcall::managers::bear::SearchArgs;
use bear_xcall::utils::callback_url::{build_url, Action, CallbackParams};

fn query_pairs(url: &str) -> Vec<(String, String)> {
    url::Url::parse(url)
        .expect("parse callback url")
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

#[tokio::test]
async fn tags_flattens_wrapped_tag_list() {
    let wrapped = serde_json::json!({
        "": "x-success",
        "tags": "[{\"name\": \"home\"}, {\"name\": \"work/q3\"}, {\"name\": \"pytest\"}]",
    })
    .to_string();
    let fake = RecordingXcall::with_replies([wrapped]);
    let names = client(&fake).tags().await.expect("tags");

    assert_eq!(names, vec!["home", "work/q3", "pytest"]);
    assert_eq!(
        fake.urls(),
        vec![format!("bear://x-callback-url/tags?token={}", TOKEN)]
    );
}

#[tokio::test]
async fn tags_accepts_nested_object_payload() {
    let wrapped = serde_json::json!({
        "": "x-success",
        "other": "{\"tags\": [{\"name\": \"inbox\"}]}",
    })
    .to_string();
    let fake = RecordingXcall::with_replies([wrapped]);
    assert_eq!(client(&fake).tags().await.expect("tags"), vec!["inbox"]);
}

#[tokio::test]
async fn tags_url_round_trips_token() {
    let token = "7A1-B2C 3#4&5";
    let mut params = CallbackParams::new();
    params.set("token", token);
    let url = build_url(Action::Tags, &params);

    assert!(!url.contains(' '));
    assert!(!url.contains('#'));
    assert_eq!(query_pairs(&url), vec![("token".to_string(), token.to_string())]);
}

#[tokio::test]
async fn sample_url_does_not_call_helper() {
    let fake = RecordingXcall::new();
    let url = client(&fake).sample_url().await.expect("sample_url");
    assert_eq!(url, format!("bear://x-callback-url/tags?token={}", TOKEN));
    assert_eq!(fake.calls(), 0);
}

#[tokio::test]
async fn search_error_names_the_tag() {
    let fake = RecordingXcall::with_replies([r#"{"errorMessage":"The tag could not be found"}"#]);
    let err = client(&fake)
        .search(SearchArgs {
            term: Some("nemo".into()),
            tag: Some("widgets".into()),
            ..SearchArgs::default()
        })
        .await
        .unwrap_err();

    assert_eq!(err.kind, BearErrorKind::Remote);
    assert!(err.message.contains("widgets"));
    assert_eq!(
        fake.urls()[0],
        format!(
            "bear://x-callback-url/search?term=nemo&tag=widgets&show_window=no&token={}",
            TOKEN
        )
    );
}

#[tokio::test]
async fn open_tag_reports_missing_tag_by_name() {
    let fake = RecordingXcall::with_replies([r#"{"errorMessage":"The tag could not be found"}"#]);
    let err = client(&fake).open_tag("todo/work").await.unwrap_err();
    assert_eq!(err.kind, BearErrorKind::Remote);
    assert_eq!(err.message, "Tag 'todo/work' was not found");
    assert_eq!(
        fake.urls()[0],
        format!("bear://x-callback-url/open-tag?name=todo/work&token={}", TOKEN)
    );
}

#[tokio::test]
async fn open_tag_keeps_other_remote_errors() {
    let fake = RecordingXcall::with_replies([r#"{"errorMessage":"Invalid token"}"#]);
    let err = client(&fake).open_tag("work").await.unwrap_err();
    assert_eq!(err.message, "Invalid token");
}

#[tokio::test]
async fn process_failures_pass_through_untouched() {
    let fake = RecordingXcall::new();
    fake.push_error(BearError::process("xcall helper exited with status 1"));
    let err = client(&fake).tags().await.unwrap_err();
    assert_eq!(err.kind, BearErrorKind::Process);
}

#[tokio::test]
async fn rename_and_delete_tag_validate_names() {
    let fake = RecordingXcall::new();
    let c = client(&fake);
    assert!(c.delete_tag("  ").await.unwrap_err().is_validation());
    assert!(c.rename_tag("todo", "").await.unwrap_err().is_validation());
    assert_eq!(fake.calls(), 0);

    c.rename_tag("todo", "done").await.expect("rename");
    c.delete_tag("old tag").await.expect("delete");
    assert_eq!(
        fake.urls(),
        vec![
            "bear://x-callback-url/rename-tag?name=todo&new_name=done&show_window=no".to_string(),
            "bear://x-callback-url/delete-tag?name=old%20tag&show_window=no".to_string(),
        ]
    );
}

#[tokio::test]
async fn sidebar_actions_send_search_and_token() {
    let fake = RecordingXcall::new();
    let c = client(&fake);
    c.today(Some("family")).await.expect("today");
    c.todo(None).await.expect("todo");
    c.untagged(Some("home")).await.expect("untagged");
    assert_eq!(
        fake.urls(),
        vec![
            format!("bear://x-callback-url/today?search=family&show_window=no&token={}", TOKEN),
            format!("bear://x-callback-url/todo?show_window=no&token={}", TOKEN),
            format!("bear://x-callback-url/untagged?search=home&show_window=no&token={}", TOKEN),
        ]
    );
}

#[tokio::test]
async fn change_font_escapes_once() {
    let fake = RecordingXcall::new();
    client(&fake).change_font("Helvetica Neue").await.expect("font");
    assert_eq!(
        fake.urls(),
        vec!["bear://x-callback-url/change-font?font=Helvetica%20Neue".to_string()]
    );
}

#[tokio::test]
async fn unsupported_font_and_theme_never_reach_helper() {
    let fake = RecordingXcall::new();
    let c = client(&fake);

    let err = c.change_font("Comic Sans").await.unwrap_err();
    assert_eq!(err.message, "Font 'Comic Sans' is not supported");

    let err = c.change_theme("Solarized").await.unwrap_err();
    assert!(err.is_validation());
    assert!(err.hint.unwrap_or_default().contains("Solarized Dark"));
    assert_eq!(fake.calls(), 0);

    c.change_theme("Dracula").await.expect("theme");
    assert_eq!(
        fake.urls(),
        vec!["bear://x-callback-url/change-theme?theme=Dracula".to_string()]
    );
}
