use enkai_core::api::{parse_template, summarize, AppConfig, ExecutionOpts, JobErrorKind};
use enkai_plugins::backend::GeminiBackend;
use enkai_plugins::factory::build_engine_with;
use enkai_plugins::writer::FsOutputWriter;
use mockito::{Matcher, Server};
use std::sync::Arc;

const PATH: &str = "/v1beta/models/gemini-2.0-flash:generateContent";

#[tokio::test]
async fn template_batch_writes_extracted_code() {
    let mut server = Server::new_async().await;
    let _ok = server
        .mock("POST", PATH)
        .match_query(Matcher::Any)
        .match_body(Matcher::Regex("Create a login form".into()))
        .with_status(200)
        .with_body(
            r#"{"candidates":[{"content":{"parts":[{"text":"Here:\n```tsx\nexport default function Login() {}\n```"}]}}]}"#,
        )
        .create_async()
        .await;
    let _quota = server
        .mock("POST", PATH)
        .match_query(Matcher::Any)
        .match_body(Matcher::Regex("Create a chat".into()))
        .with_status(429)
        .with_body(r#"{"error":{"code":429,"message":"Resource has been exhausted"}}"#)
        .create_async()
        .await;

    let mut cfg = AppConfig::default();
    cfg.generation.base_url = server.url();
    cfg.generation.api_key = "test-key".into();

    let out = tempfile::tempdir().unwrap();
    let engine = build_engine_with(
        &cfg,
        ExecutionOpts::default().with_concurrency(2),
        Arc::new(GeminiBackend::new(&cfg.generation).unwrap()),
        Arc::new(FsOutputWriter::with_root(out.path())),
    )
    .unwrap();

    let tasks = parse_template(
        r#"[
            {"fileName": "Login.tsx", "outputPath": "components/Login.tsx", "prompt": "Create a login form"},
            {"fileName": "Chat.tsx", "outputPath": "components/Chat.tsx", "prompt": "Create a chat"}
        ]"#,
    )
    .unwrap();

    let run = engine.execute(&tasks).await.unwrap();
    let summary = summarize(&run.results, run.total_duration_ms).unwrap();
    assert_eq!(summary.success_count, 1);
    assert_eq!(summary.failure_count, 1);

    let written = std::fs::read_to_string(out.path().join("components/Login.tsx")).unwrap();
    assert_eq!(written, "export default function Login() {}");
    assert!(!out.path().join("components/Chat.tsx").exists());

    let failed = run.results.iter().find(|r| !r.success).unwrap();
    assert_eq!(failed.error_kind, Some(JobErrorKind::Provider));
    assert!(failed
        .error
        .as_deref()
        .unwrap()
        .contains("Resource has been exhausted"));
}
