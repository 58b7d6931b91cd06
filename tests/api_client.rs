// End-to-end behaviour of `ApiClient` against a fake gateway.

mod support;

use rstest::rstest;
use serde_json::json;

use kerokero_cli::api::{
    display_json, ApiClient, ApiConfig, ApiError, CreateInstanceRequest, PresenceRequest,
    ResponseBody, SendTextRequest, SyncOptions,
};
use kerokero_cli::config::DEFAULT_API_KEY;
use support::{closed_port_url, FakeGateway, Reply};

fn client(base_url: &str, key: &str) -> ApiClient {
    ApiClient::new(ApiConfig::new(base_url, key)).expect("client")
}

#[test]
fn json_reply_is_returned_verbatim() {
    let gateway = FakeGateway::always(Reply::json(
        200,
        json!({"success": true, "data": {"status": "connected"}}),
    ))
    .expect("gateway");
    let api = client(&gateway.base_url(), DEFAULT_API_KEY);

    let resp = api.get_status("main").expect("response");

    assert_eq!(resp.status, 200);
    assert_eq!(
        resp.body,
        ResponseBody::Json(json!({"success": true, "data": {"status": "connected"}}))
    );
    let req = gateway.single_request();
    assert_eq!(req.method, "GET");
    assert_eq!(req.path, "/instances/main/status");
}

#[test]
fn plain_text_reply_becomes_status_and_text() {
    let gateway = FakeGateway::always(Reply::text(502, "Bad Gateway")).expect("gateway");
    let api = client(&gateway.base_url(), DEFAULT_API_KEY);

    let result = api.list_groups("main");

    let resp = result.as_ref().expect("response");
    assert_eq!(resp.body, ResponseBody::Text("Bad Gateway".into()));
    assert_eq!(display_json(&result), json!({"status": 502, "text": "Bad Gateway"}));
}

#[test]
fn error_status_with_json_body_is_still_a_response() {
    let gateway =
        FakeGateway::always(Reply::json(404, json!({"error": "instance not found"})))
            .expect("gateway");
    let api = client(&gateway.base_url(), DEFAULT_API_KEY);

    let resp = api.get_instance("ghost").expect("response");

    assert_eq!(resp.status, 404);
    assert!(!resp.is_success());
    assert_eq!(resp.str_field("error"), Some("instance not found"));
}

#[test]
fn connection_refused_is_a_transport_error() {
    let api = client(&closed_port_url(), DEFAULT_API_KEY);

    let result = api.get_status("main");

    assert!(matches!(result, Err(ApiError::Transport(_))), "{result:?}");
    let shown = display_json(&result);
    assert!(shown["error"].as_str().is_some_and(|e| e.starts_with("request failed")));
}

#[rstest]
#[case(DEFAULT_API_KEY)]
#[case("override-from-prompt")]
fn every_request_carries_the_session_key(#[case] key: &str) {
    let gateway = FakeGateway::always(Reply::json(200, json!({"status": "ok"}))).expect("gateway");
    let api = client(&gateway.base_url(), key);

    api.health().expect("health");

    let req = gateway.single_request();
    assert_eq!(req.header("X-API-Key"), Some(key));
    assert_eq!(req.header("content-type"), Some("application/json"));
}

#[test]
fn post_sends_json_body() {
    let gateway = FakeGateway::always(Reply::json(200, json!({"success": true}))).expect("gateway");
    let api = client(&gateway.base_url(), DEFAULT_API_KEY);

    api.send_text(
        "main",
        &SendTextRequest {
            phone: "5215512345678".into(),
            message: "hola".into(),
        },
    )
    .expect("response");

    let req = gateway.single_request();
    assert_eq!(req.method, "POST");
    assert_eq!(req.path, "/instances/main/messages/text");
    assert_eq!(req.json(), json!({"phone": "5215512345678", "message": "hola"}));
}

#[rstest]
#[case::delete_instance("DELETE", "/instances/main")]
#[case::cancel_sync("DELETE", "/instances/main/sync")]
#[case::qr("GET", "/instances/main/qr")]
fn get_and_delete_carry_no_body(#[case] method: &str, #[case] path: &str) {
    let gateway = FakeGateway::always(Reply::json(200, json!({"success": true}))).expect("gateway");
    let api = client(&gateway.base_url(), DEFAULT_API_KEY);

    let result = match path {
        "/instances/main" => api.delete_instance("main"),
        "/instances/main/sync" => api.cancel_sync("main"),
        _ => api.get_qr("main"),
    };
    result.expect("response");

    let req = gateway.single_request();
    assert_eq!(req.method, method);
    assert_eq!(req.path, path);
    assert!(req.body.is_empty());
}

#[test]
fn list_instances_decodes_data_envelope() {
    let gateway = FakeGateway::always(Reply::json(
        200,
        json!({
            "success": true,
            "data": [
                {"instance_id": "main", "status": "connected", "jid": "521@s.whatsapp.net"},
                {"instance_id": "backup", "status": "disconnected"}
            ]
        }),
    ))
    .expect("gateway");
    let api = client(&gateway.base_url(), DEFAULT_API_KEY);

    let instances = api.list_instances().expect("instances");

    let ids: Vec<&str> = instances.iter().map(|i| i.instance_id.as_str()).collect();
    assert_eq!(ids, ["main", "backup"]);
    assert_eq!(instances[0].jid.as_deref(), Some("521@s.whatsapp.net"));
}

#[test]
fn list_instances_reports_unauthorized_as_status_error() {
    let gateway =
        FakeGateway::always(Reply::json(401, json!({"error": "invalid API key"}))).expect("gateway");
    let api = client(&gateway.base_url(), "wrong");

    let err = api.list_instances().unwrap_err();

    assert!(matches!(err, ApiError::Status { status: 401, .. }), "{err:?}");
}

#[test]
fn request_bodies_use_gateway_field_names() {
    let gateway = FakeGateway::always(Reply::json(200, json!({"success": true}))).expect("gateway");
    let api = client(&gateway.base_url(), DEFAULT_API_KEY);

    api.create_instance(&CreateInstanceRequest {
        instance_id: "main".into(),
        webhook_url: None,
        sync_history: true,
    })
    .expect("create");
    api.timed_presence(
        "main",
        &PresenceRequest {
            phone: "521".into(),
            kind: "recording".into(),
            duration: Some(5000),
        },
    )
    .expect("presence");
    api.start_sync("main", &SyncOptions::default()).expect("sync");
    api.join_group("main", "AbCdEf").expect("join");

    let requests = gateway.requests();
    let seen: Vec<(&str, serde_json::Value)> = requests
        .iter()
        .map(|r| (r.path.as_str(), r.json()))
        .collect();
    assert_eq!(
        seen,
        vec![
            ("/instances", json!({"instance_id": "main", "sync_history": true})),
            (
                "/instances/main/presence/timed",
                json!({"phone": "521", "type": "recording", "duration": 5000})
            ),
            (
                "/instances/main/sync",
                json!({"messages_per_chat": 50, "max_chats": 20, "advanced": false})
            ),
            ("/instances/main/groups/join", json!({"invite_code": "AbCdEf"})),
        ]
    );
}

#[test]
fn body_less_post_has_no_payload() {
    let gateway = FakeGateway::always(Reply::json(200, json!({"success": true}))).expect("gateway");
    let api = client(&gateway.base_url(), DEFAULT_API_KEY);

    api.connect_instance("main").expect("connect");

    let req = gateway.single_request();
    assert_eq!(req.method, "POST");
    assert_eq!(req.path, "/instances/main/connect");
    assert!(req.body.is_empty());
}

#[test]
fn typed_ids_stay_inside_their_path_segment() {
    let gateway = FakeGateway::always(Reply::json(200, json!({"success": true}))).expect("gateway");
    let api = client(&gateway.base_url(), DEFAULT_API_KEY);

    api.delete_instance("main#old").expect("delete");
    api.get_status("a?b").expect("status");
    api.contact_info("main", "521/about").expect("contact");
    api.group_info("main", "1203 63@g.us").expect("group");
    api.follow_newsletter("main", "120363@newsletter").expect("follow");

    let seen: Vec<(String, String)> = gateway
        .requests()
        .into_iter()
        .map(|r| (r.method, r.path))
        .collect();
    let expected = [
        ("DELETE", "/instances/main%23old"),
        ("GET", "/instances/a%3Fb/status"),
        ("GET", "/instances/main/contacts/521%2Fabout"),
        ("GET", "/instances/main/groups/1203%2063@g.us"),
        ("POST", "/instances/main/newsletters/120363@newsletter/follow"),
    ];
    let expected: Vec<(String, String)> = expected
        .iter()
        .map(|(m, p)| (m.to_string(), p.to_string()))
        .collect();
    assert_eq!(seen, expected);
}

#[test]
fn base_url_trailing_slash_is_ignored() {
    let gateway = FakeGateway::always(Reply::json(200, json!({"status": "ok"}))).expect("gateway");
    let api = client(&format!("{}/", gateway.base_url()), DEFAULT_API_KEY);

    api.health().expect("health");

    assert_eq!(gateway.single_request().path, "/health");
}
