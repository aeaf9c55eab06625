use std::net::SocketAddr;

use configs::AppConfig;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::json;
use tokio::net::TcpListener;
use uuid::Uuid;

struct TestApp {
    base_url: String,
    data_file: std::path::PathBuf,
}

async fn start_server() -> anyhow::Result<TestApp> {
    // isolated backing file per test run
    let data_file = std::path::PathBuf::from(format!("target/test-data/{}/people_data.json", Uuid::new_v4()));
    if let Some(parent) = data_file.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let mut cfg = AppConfig::default();
    cfg.storage.data_file = data_file.clone();
    let app = server::build_app(&cfg);

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url, data_file })
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = reqwest::get(format!("{}/health", app.base_url)).await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_add_then_export_round_trip() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let res = c.get(format!("{}/export_people", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<serde_json::Value>().await?, json!([]));

    let first = json!({"name": "Ada", "email": "ada@example.com", "affiliation": "AE", "role": "author"});
    let second = json!({"name": "Alan", "role": "referee"});

    let res = c.post(format!("{}/add_person", app.base_url)).json(&first).send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["message"], "Person added successfully");
    assert_eq!(body["data"], first);

    let res = c.post(format!("{}/add_person", app.base_url)).json(&second).send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);

    let res = c.get(format!("{}/export_people", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let people = res.json::<serde_json::Value>().await?;
    assert_eq!(
        people,
        json!([
            first,
            {"name": "Alan", "email": null, "affiliation": null, "role": "referee"}
        ])
    );

    // the file on disk holds the same list
    let on_disk: serde_json::Value = serde_json::from_slice(&tokio::fs::read(&app.data_file).await?)?;
    assert_eq!(on_disk, people);

    if let Some(parent) = app.data_file.parent() {
        let _ = tokio::fs::remove_dir_all(parent).await;
    }
    Ok(())
}
