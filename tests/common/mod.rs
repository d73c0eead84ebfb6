//! Shared helpers for the wiremock-backed flow tests.
//!
//! `mount_conforming_api` stands up a mock that answers every endpoint the
//! way the live mercado API does, echoing request bodies back into the
//! response so randomly generated fixtures round-trip.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use mercado::common::config::ApiConfig;
use mercado::suite::{Reporter, ScenarioResult, Scenario, Summary, CNPJ_LENGTH_MSG, NEGATIVE_VALUE_MSG};
use mercado::MercadoClient;
use serde_json::{json, Value};
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

/// Client pointed at the mock server with a short timeout.
pub fn mock_client(server: &MockServer) -> MercadoClient {
    mock_client_with_timeout(server, 5)
}

pub fn mock_client_with_timeout(server: &MockServer, timeout_secs: u64) -> MercadoClient {
    let config = ApiConfig {
        base_url: server.uri(),
        timeout_secs,
        connect_timeout_secs: 2,
    };
    MercadoClient::new(&config).expect("client should build")
}

/// `GET /mercado` listing markets with the given ids.
pub async fn mount_listing(server: &MockServer, ids: &[i64]) {
    let items: Vec<Value> = ids
        .iter()
        .map(|id| json!({ "id": id, "nome": format!("Mercado {id}"), "cnpj": "11222333000181" }))
        .collect();
    Mock::given(method("GET"))
        .and(path("/mercado"))
        .respond_with(ResponseTemplate::new(200).set_body_json(Value::Array(items)))
        .mount(server)
        .await;
}

fn body(req: &Request) -> Value {
    req.body_json::<Value>().unwrap_or(Value::Null)
}

fn id_from_path(req: &Request) -> i64 {
    req.url
        .path_segments()
        .and_then(|mut s| s.nth(1))
        .and_then(|s| s.parse().ok())
        .unwrap_or(-1)
}

/// Every endpoint, answering like the live API.
pub async fn mount_conforming_api(server: &MockServer, first_id: i64) {
    mount_listing(server, &[first_id, first_id + 1]).await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/mercado/\d+$"))
        .respond_with(|req: &Request| {
            let id = id_from_path(req);
            ResponseTemplate::new(200).set_body_json(json!({
                "id": id,
                "nome": "Mercado Central",
                "cnpj": "11222333000181",
                "endereco": "1 Main Street",
                "produtos": { "hortifruit": { "frutas": [] } }
            }))
        })
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/mercado"))
        .respond_with(|req: &Request| {
            let b = body(req);
            let cnpj = b["cnpj"].as_str().unwrap_or_default();
            if cnpj.len() != 14 || !cnpj.chars().all(|c| c.is_ascii_digit()) {
                return ResponseTemplate::new(400).set_body_json(json!({
                    "errors": [{
                        "type": "field",
                        "value": cnpj,
                        "msg": CNPJ_LENGTH_MSG,
                        "path": "cnpj",
                        "location": "body"
                    }]
                }));
            }
            ResponseTemplate::new(201).set_body_json(json!({
                "message": format!(
                    "Mercado '{}' adicionado com sucesso com todas as subcategorias iniciais vazias!",
                    b["nome"].as_str().unwrap_or_default()
                ),
                "novoMercado": {
                    "id": 999,
                    "nome": b["nome"],
                    "cnpj": b["cnpj"],
                    "endereco": b["endereco"],
                    "produtos": {}
                }
            }))
        })
        .mount(server)
        .await;

    Mock::given(method("PUT"))
        .and(path_regex(r"^/mercado/\d+$"))
        .respond_with(|req: &Request| {
            let id = id_from_path(req);
            let b = body(req);
            ResponseTemplate::new(200).set_body_json(json!({
                "message": format!("Mercado com ID {id} atualizado com sucesso."),
                "updatedMercado": {
                    "id": id,
                    "nome": b["nome"],
                    "cnpj": "11222333000181",
                    "endereco": b["endereco"]
                }
            }))
        })
        .mount(server)
        .await;

    Mock::given(method("DELETE"))
        .and(path_regex(r"^/mercado/\d+$"))
        .respond_with(|req: &Request| {
            let id = id_from_path(req);
            ResponseTemplate::new(200).set_body_json(json!({
                "message": format!("Mercado com ID {id} foi removido com sucesso.")
            }))
        })
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path_regex(r"^/mercado/\d+/produtos/hortifruit/frutas$"))
        .respond_with(|req: &Request| {
            let b = body(req);
            let valor = b["valor"].as_i64().unwrap_or(-1);
            if valor < 0 {
                return ResponseTemplate::new(400).set_body_json(json!({
                    "errors": [{
                        "type": "field",
                        "value": b["valor"],
                        "msg": NEGATIVE_VALUE_MSG,
                        "path": "valor",
                        "location": "body"
                    }]
                }));
            }
            let nome = b["nome"].as_str().unwrap_or_default();
            ResponseTemplate::new(201).set_body_json(json!({
                "message": format!("Produto {nome} com valor {valor} adicionado com sucesso"),
                "product_item": { "id": 1, "nome": nome, "valor": valor }
            }))
        })
        .mount(server)
        .await;
}

/// What a `RecordingReporter` observed.
#[derive(Default)]
pub struct Recorded {
    pub started: Vec<String>,
    pub results: Vec<ScenarioResult>,
    pub finished: usize,
}

/// Reporter that records events behind a shared handle.
#[derive(Clone, Default)]
pub struct RecordingReporter {
    pub inner: Arc<Mutex<Recorded>>,
}

impl Reporter for RecordingReporter {
    fn on_start(&mut self, scenario: &Scenario) {
        self.inner.lock().unwrap().started.push(scenario.name.to_string());
    }

    fn on_result(&mut self, result: &ScenarioResult) {
        self.inner.lock().unwrap().results.push(result.clone());
    }

    fn finish(&mut self, _summary: &Summary) -> mercado::Result<()> {
        self.inner.lock().unwrap().finished += 1;
        Ok(())
    }
}
