//! 共享测试工具和辅助函数

#![allow(dead_code)]

use domain_verify_provider::{PlatformClient, PlatformConfig};
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const SITE_ID: &str = "11111111-2222-3333-4444-555555555555";
pub const TOKEN: &str = "test-session-token";

/// Environment base path for `mysite.live` on the mock server.
pub fn env_path() -> String {
    format!("/sites/{SITE_ID}/environments/live")
}

/// 创建指向 mock server 的客户端
pub fn client_for(server: &MockServer) -> PlatformClient {
    PlatformClient::new(PlatformConfig {
        api_url: server.uri(),
        session_token: Some(TOKEN.to_string()),
        client_id: "integration-test".to_string(),
        max_retries: 2,
    })
    .expect("client should build")
}

/// Mount the site lookup and environment list for `mysite` (envs: dev, live).
pub async fn mount_site(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/site-names/mysite"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": SITE_ID })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/sites/{SITE_ID}/environments")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "dev": { "id": "dev" },
            "live": { "id": "live" }
        })))
        .mount(server)
        .await;
}

/// A custom domain resource with both challenges and the given ownership status.
pub fn domain_json(name: &str, preprovision_status: &str) -> Value {
    json!({
        "id": name,
        "type": "custom",
        "status": [{ "type": "https", "status": "action_required" }],
        "acme_preauthorization_challenges": {
            "dns-01": {
                "status": "pending",
                "verification_key": format!("_acme-challenge.{name}."),
                "verification_value": "dns-token-value"
            },
            "http-01": {
                "status": "pending",
                "verification_key": ".well-known/acme-challenge/abc",
                "token": "http-token-value"
            }
        },
        "ownership_status": {
            "status": preprovision_status,
            "preprovision_result": { "status": preprovision_status }
        }
    })
}
