// src/models/people.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

// --- Clientes ---
// A chave é um código curto fornecido pelo chamador (chave natural),
// então o mesmo struct serve de linha e de payload de escrita.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[validate(length(min = 1, max = 10, message = "O código deve ter entre 1 e 10 caracteres."))]
    pub customer_id: String,
    #[validate(length(min = 1, message = "O nome da empresa é obrigatório."))]
    pub company_name: String,
    pub contact_name: String,
    pub contact_title: String,
    pub address: String,
    pub city: String,
    pub region: String,
    pub postal_code: String,
    pub country: String,
    pub phone: String,
    pub fax: Option<String>,
}

// --- Funcionários ---
// `reports_to` é a autorelação de gerência: no máximo um chefe por
// funcionário, sem ciclos (verificado na escrita).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub employee_id: i32,
    pub last_name: String,
    pub first_name: String,
    pub title: String,
    pub title_of_courtesy: String,
    pub birth_date: DateTime<Utc>,
    pub hire_date: DateTime<Utc>,
    pub address: String,
    pub city: String,
    pub region: String,
    pub postal_code: String,
    pub country: String,
    pub home_phone: String,
    pub extension: String,
    pub photo: Option<Vec<u8>>,
    pub notes: Option<String>,
    pub reports_to: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployee {
    #[validate(length(min = 1, message = "O sobrenome é obrigatório."))]
    pub last_name: String,
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub first_name: String,
    pub title: String,
    pub title_of_courtesy: String,
    pub birth_date: DateTime<Utc>,
    pub hire_date: DateTime<Utc>,
    pub address: String,
    pub city: String,
    pub region: String,
    pub postal_code: String,
    pub country: String,
    pub home_phone: String,
    pub extension: String,
    pub photo: Option<Vec<u8>>,
    pub notes: Option<String>,
    pub reports_to: Option<i32>,
}

// --- Transportadoras ---
// Dependente somente-leitura: semeadas por migração, sorteadas na geração
// de pedidos.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Shipper {
    pub shipper_id: i32,
    pub company_name: String,
    pub phone: String,
}
