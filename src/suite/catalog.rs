//! The declared mercado and frutas scenarios, in run order

use serde_json::json;

use super::scenario::{Exchange, Expectation, Group, Scenario};
use crate::client::{Request, MERCADO_PATH};
use crate::fixtures::{Fixtures, INVALID_CNPJ, NEGATIVE_FRUIT_VALUE};

pub const CNPJ_LENGTH_MSG: &str = "CNPJ deve ter 14 dígitos";
pub const NEGATIVE_VALUE_MSG: &str = "Valor deve ser um número inteiro e não negativo";

/// All scenarios in declaration order
pub fn catalog() -> Vec<Scenario> {
    vec![
        Scenario::new("Busca um mercado por ID", Group::Mercado, fetch_by_id),
        Scenario::new("Cadastra um mercado com sucesso", Group::Mercado, create),
        Scenario::new(
            "Deve retornar erro cnpj inválido",
            Group::Mercado,
            create_invalid_cnpj,
        ),
        Scenario::new(
            "Deve atualizar os dados do mercado com sucesso",
            Group::Mercado,
            update,
        ),
        Scenario::new("Deve excluir um mercado com sucesso", Group::Mercado, delete),
        Scenario::new(
            "Deve cadastrar um produto na categoria frutas",
            Group::Frutas,
            add_fruit,
        ),
        Scenario::new(
            "Deve causar erro ao cadastrar uma fruta com valor negativo",
            Group::Frutas,
            add_fruit_negative,
        ),
    ]
}

/// Select scenarios whose name contains `filter`, ignoring case
pub fn select(scenarios: Vec<Scenario>, filter: Option<&str>) -> Vec<Scenario> {
    match filter {
        None => scenarios,
        Some(filter) => {
            let needle = filter.to_lowercase();
            scenarios
                .into_iter()
                .filter(|s| s.name.to_lowercase().contains(&needle))
                .collect()
        }
    }
}

fn mercado_path(id: i64) -> String {
    format!("{}/{}", MERCADO_PATH, id)
}

fn frutas_path(id: i64) -> String {
    format!("{}/{}/produtos/hortifruit/frutas", MERCADO_PATH, id)
}

fn fetch_by_id(_: &mut Fixtures, id: i64) -> Exchange {
    Exchange {
        request: Request::get(mercado_path(id)),
        expect: Expectation::status(200).json_like(json!({ "id": id })),
    }
}

fn create(fx: &mut Fixtures, _: i64) -> Exchange {
    let nome = fx.company_name();
    let cnpj = fx.cnpj();
    let endereco = fx.street_address();

    Exchange {
        request: Request::post(
            MERCADO_PATH,
            json!({ "nome": nome, "cnpj": cnpj, "endereco": endereco }),
        ),
        expect: Expectation::status(201).json_like(json!({
            "message": format!(
                "Mercado '{}' adicionado com sucesso com todas as subcategorias iniciais vazias!",
                nome
            ),
            "novoMercado": { "nome": nome, "cnpj": cnpj, "endereco": endereco }
        })),
    }
}

fn create_invalid_cnpj(fx: &mut Fixtures, _: i64) -> Exchange {
    let nome = fx.company_name();
    let endereco = fx.street_address();

    Exchange {
        request: Request::post(
            MERCADO_PATH,
            json!({ "nome": nome, "cnpj": INVALID_CNPJ, "endereco": endereco }),
        ),
        expect: Expectation::status(400).json_like(json!({
            "errors": [{
                "location": "body",
                "msg": CNPJ_LENGTH_MSG,
                "path": "cnpj",
                "type": "field"
            }]
        })),
    }
}

fn update(fx: &mut Fixtures, id: i64) -> Exchange {
    let nome = fx.company_name();
    let endereco = fx.street_address();

    Exchange {
        request: Request::put(
            mercado_path(id),
            json!({ "nome": nome, "endereco": endereco }),
        ),
        expect: Expectation::status(200).json_like(json!({
            "message": format!("Mercado com ID {} atualizado com sucesso.", id),
            "updatedMercado": { "id": id, "nome": nome, "endereco": endereco }
        })),
    }
}

fn delete(_: &mut Fixtures, id: i64) -> Exchange {
    Exchange {
        request: Request::delete(mercado_path(id)),
        expect: Expectation::status(200).json_like(json!({
            "message": format!("Mercado com ID {} foi removido com sucesso.", id)
        })),
    }
}

fn add_fruit(fx: &mut Fixtures, id: i64) -> Exchange {
    let nome = fx.fruit();
    let valor = fx.fruit_value();

    Exchange {
        request: Request::post(frutas_path(id), json!({ "nome": nome, "valor": valor })),
        expect: Expectation::status(201)
            .body_contains("adicionado com sucesso")
            .body_contains(&nome)
            .body_contains(valor)
            .json_like(json!({ "product_item": { "nome": nome, "valor": valor } })),
    }
}

fn add_fruit_negative(fx: &mut Fixtures, id: i64) -> Exchange {
    let nome = fx.fruit();

    Exchange {
        request: Request::post(
            frutas_path(id),
            json!({ "nome": nome, "valor": NEGATIVE_FRUIT_VALUE }),
        ),
        expect: Expectation::status(400).json_like(json!({
            "errors": [{
                "type": "field",
                "msg": NEGATIVE_VALUE_MSG,
                "path": "valor",
                "location": "body"
            }]
        })),
    }
}
