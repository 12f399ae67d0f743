//! End-to-end build passes through the public API

use std::time::Duration;

use serde_json::{json, Value};
use wx_cloud_pack::deploy::FunctionDeploy;
use wx_cloud_pack::{EmitOutcome, EntryEvent, OutputBundle, PackConfig, WxCloudPack};

fn entry(path: &str, params: &[&str], is_main: bool) -> EntryEvent {
    EntryEvent {
        file_path: path.into(),
        params: params.iter().map(|s| s.to_string()).collect(),
        is_main,
    }
}

fn bundle(json: Value) -> OutputBundle {
    serde_json::from_value(json).unwrap()
}

#[tokio::test]
async fn test_watch_build_writes_all_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let client_path = dir.path().join("cloud.ts");
    let config_path = dir.path().join("cloudbaserc.json");
    std::fs::write(&config_path, r#"{ "envId": "dev-1", "functionRoot": "dist" }"#).unwrap();

    let config = PackConfig {
        prefix: "airead".into(),
        all_dependencies: serde_json::from_value(json!({
            "cheerio": "^1.0.0",
            "got": "^11.8.2",
            "wx-server-sdk": "^2.5.3",
        }))
        .unwrap(),
        client_file_path: Some(client_path.clone()),
        config_file_path: Some(config_path.clone()),
        default_deploy: FunctionDeploy {
            timeout: Some(6),
            ..Default::default()
        },
        function_deploy: [(
            "crawl".to_string(),
            FunctionDeploy {
                timeout: Some(30),
                ..Default::default()
            },
        )]
        .into_iter()
        .collect(),
        ..Default::default()
    };

    let mut pack = WxCloudPack::new(config);
    pack.on_entry(entry("src/crawl/index.ts", &["url"], false));
    pack.on_entry(entry("src/wxContext.ts", &["data"], true));

    let output = pack
        .generate_bundle(&bundle(json!({
            "shared.js": {
                "type": "chunk",
                "isEntry": false,
                "imports": ["got"],
                "facadeModuleId": null
            },
            "index.js": {
                "type": "chunk",
                "isEntry": true,
                "imports": ["cheerio", "got", "fs"],
                "facadeModuleId": "src/crawl/index.ts"
            },
            "README.md": { "type": "asset", "fileName": "README.md" }
        })))
        .await
        .unwrap();

    let package = output.package.unwrap();
    assert_eq!(package.function, "aireadCrawl");
    let package: Value = serde_json::from_str(&package.source).unwrap();
    assert_eq!(package["name"], json!("airead-crawl"));
    assert_eq!(package["dependencies"], json!({ "cheerio": "^1.0.0", "got": "^11.8.2" }));
    assert_eq!(output.meta, EmitOutcome::Written { client: true, config: true });

    let client = std::fs::read_to_string(&client_path).unwrap();
    assert!(client
        .contains("export const cloudCrawl: PromiseReturnType<typeof functionCrawl> = url => {"));
    assert!(client.contains("callFunction({ name: 'aireadWxContext', data })"));

    let document: Value =
        serde_json::from_str(&std::fs::read_to_string(&config_path).unwrap()).unwrap();
    assert_eq!(document["envId"], json!("dev-1"));
    assert_eq!(document["functionRoot"], json!("dist"));
    assert_eq!(document["functions"][0]["name"], json!("crawl"));
    assert_eq!(document["functions"][0]["timeout"], json!(30));
    assert_eq!(document["functions"][1]["name"], json!("wxContext"));
    assert_eq!(document["functions"][1]["timeout"], json!(6));

    // the second function's pass lands in the same rebuild and is coalesced
    let output = pack
        .generate_bundle(&bundle(json!({
            "index.js": {
                "type": "chunk",
                "isEntry": true,
                "imports": ["wx-server-sdk"],
                "facadeModuleId": "src/wxContext.ts"
            }
        })))
        .await
        .unwrap();
    assert_eq!(output.package.unwrap().function, "aireadWxContext");
    assert_eq!(output.meta, EmitOutcome::Suppressed);
    assert_eq!(pack.meta_passes(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_rebuild_after_quiet_window_regenerates() {
    let config = PackConfig {
        debounce_ms: 100,
        ..Default::default()
    };
    let mut pack = WxCloudPack::new(config);
    pack.on_entry(entry("src/foo.ts", &[], false));

    let empty = OutputBundle::new();
    for _ in 0..3 {
        pack.generate_bundle(&empty).await.unwrap();
    }
    assert_eq!(pack.meta_passes(), 1);

    tokio::time::advance(Duration::from_millis(150)).await;
    pack.on_entry(entry("src/foo.ts", &["changed"], false));
    let output = pack.generate_bundle(&empty).await.unwrap();
    assert_eq!(output.meta, EmitOutcome::Written { client: false, config: false });
    assert_eq!(pack.meta_passes(), 2);
}

#[tokio::test]
async fn test_unwritable_client_fails_the_pass() {
    let dir = tempfile::tempdir().unwrap();
    let config = PackConfig {
        client_file_path: Some(dir.path().join("no-such-dir").join("cloud.ts")),
        ..Default::default()
    };
    let mut pack = WxCloudPack::new(config);
    pack.on_entry(entry("src/foo.ts", &[], false));

    assert!(pack.generate_bundle(&OutputBundle::new()).await.is_err());
}
