// src/services/seed.rs
//
// Geração de registros sintéticos para os endpoints de carga massiva.
// Tudo aqui é puro: o RNG entra por parâmetro, então os testes injetam
// uma semente fixa e conferem a saída exata.

use std::collections::HashSet;
use std::hash::Hash;

use chrono::{Duration, Utc};
use rand::Rng;
use rust_decimal::Decimal;

use crate::models::catalog::{NewProduct, NewSupplier};
use crate::models::orders::{NewOrder, OrderDetail};
use crate::models::people::{Customer, NewEmployee};

/// Orçamento de tentativas = alvo × este multiplicador. Limita o trabalho
/// quando as colisões tornam o alvo inalcançável: o laço termina aceitando
/// menos registros em vez de rodar para sempre.
pub const ATTEMPT_MULTIPLIER: usize = 2;

/// Laço genérico de geração com unicidade.
///
/// `seen` chega semeado com os valores já persistidos e acumula os aceitos
/// nesta invocação. Cada iteração conta uma tentativa, aceita ou não;
/// o laço para em `target` aceitos ou `target × ATTEMPT_MULTIPLIER`
/// tentativas, o que vier primeiro.
pub fn generate_unique<R, K, T, F>(
    rng: &mut R,
    target: usize,
    seen: &mut HashSet<K>,
    mut synth: F,
) -> Vec<T>
where
    R: Rng,
    K: Eq + Hash,
    F: FnMut(&mut R, usize) -> (K, T),
{
    let budget = target * ATTEMPT_MULTIPLIER;
    let mut accepted = Vec::with_capacity(target);
    let mut attempts = 0;

    while accepted.len() < target && attempts < budget {
        attempts += 1;
        let (key, record) = synth(rng, accepted.len());
        if seen.contains(&key) {
            continue;
        }
        seen.insert(key);
        accepted.push(record);
    }

    accepted
}

/// Clientes com código natural `CUST` + sufixo de 4 dígitos, únicos entre
/// si e frente aos códigos já persistidos.
pub fn customer_batch<R: Rng>(
    rng: &mut R,
    target: usize,
    mut existing: HashSet<String>,
) -> Vec<Customer> {
    generate_unique(rng, target, &mut existing, |rng, accepted| {
        let code = format!("CUST{:04}", rng.gen_range(0..10_000));
        let customer = Customer {
            customer_id: code.clone(),
            company_name: format!("Empresa {}", accepted + 1),
            contact_name: format!("Contato {}", accepted + 1),
            contact_title: "Gerente".to_string(),
            address: format!("Rua {} nº {}", rng.gen_range(1..100), rng.gen_range(1..50)),
            city: "São Paulo".to_string(),
            region: "SP".to_string(),
            postal_code: format!("{}", rng.gen_range(10_000..100_000)),
            country: "Brasil".to_string(),
            phone: format!("300-{}", rng.gen_range(1_000_000..10_000_000)),
            fax: Some(format!("601-{}", rng.gen_range(2_000_000..3_000_000))),
        };
        (code, customer)
    })
}

/// Funcionários com telefone residencial único.
pub fn employee_batch<R: Rng>(
    rng: &mut R,
    target: usize,
    mut existing_phones: HashSet<String>,
) -> Vec<NewEmployee> {
    let now = Utc::now();
    generate_unique(rng, target, &mut existing_phones, |rng, accepted| {
        let phone = format!("300-{}", rng.gen_range(1_000_000..10_000_000));
        let employee = NewEmployee {
            last_name: format!("Sobrenome{}", accepted + 1),
            first_name: format!("Nome{}", accepted + 1),
            title: "Desenvolvedor".to_string(),
            title_of_courtesy: "Sr.".to_string(),
            birth_date: now - Duration::days(365 * rng.gen_range(25..50)),
            hire_date: now - Duration::days(365 * rng.gen_range(1..10)),
            address: format!("Rua {}", rng.gen_range(1..100)),
            city: "São Paulo".to_string(),
            region: "SP".to_string(),
            postal_code: format!("{}", rng.gen_range(10_000..100_000)),
            country: "Brasil".to_string(),
            home_phone: phone.clone(),
            extension: format!("{}", rng.gen_range(100..1_000)),
            photo: None,
            notes: Some("Funcionário de teste".to_string()),
            reports_to: None,
        };
        (phone, employee)
    })
}

/// Fornecedores com nome de empresa único.
pub fn supplier_batch<R: Rng>(
    rng: &mut R,
    target: usize,
    mut existing_names: HashSet<String>,
) -> Vec<NewSupplier> {
    generate_unique(rng, target, &mut existing_names, |rng, accepted| {
        let company_name = format!("Empresa {}", rng.gen_range(1..10_000));
        let supplier = NewSupplier {
            company_name: company_name.clone(),
            contact_name: format!("Contato {}", accepted + 1),
            contact_title: "Gerente de compras".to_string(),
            address: format!("Rua {} nº {}", rng.gen_range(1..100), rng.gen_range(1..50)),
            city: "São Paulo".to_string(),
            region: "SP".to_string(),
            postal_code: format!("{}", rng.gen_range(10_000..100_000)),
            country: "Brasil".to_string(),
            phone: format!("300-{}", rng.gen_range(1_000_000..10_000_000)),
            fax: Some(format!("601-{}", rng.gen_range(2_000_000..3_000_000))),
            home_page: Some(format!("https://empresa{}.com.br", accepted + 1)),
        };
        (company_name, supplier)
    })
}

/// Produtos: síntese pura, sem campo de unicidade. O chamador garante que
/// `supplier_ids` e `category_ids` não estão vazios.
pub fn product_batch<R: Rng>(
    rng: &mut R,
    target: usize,
    supplier_ids: &[i32],
    category_ids: &[i32],
) -> Vec<NewProduct> {
    (0..target)
        .map(|i| NewProduct {
            product_name: format!("Produto {}", i + 1),
            supplier_id: supplier_ids[rng.gen_range(0..supplier_ids.len())],
            category_id: category_ids[rng.gen_range(0..category_ids.len())],
            quantity_per_unit: format!("{} unidades", rng.gen_range(1..10)),
            unit_price: two_decimals(rng),
            units_in_stock: rng.gen_range(0..100),
            units_on_order: rng.gen_range(0..50),
            reorder_level: rng.gen_range(1..20),
            discontinued: false,
        })
        .collect()
}

/// Pedidos: síntese pura, referenciando clientes, funcionários e
/// transportadoras existentes (as FKs são RESTRICT, não dá para chutar ids).
pub fn order_batch<R: Rng>(
    rng: &mut R,
    target: usize,
    customer_ids: &[String],
    employee_ids: &[i32],
    shipper_ids: &[i32],
) -> Vec<NewOrder> {
    let now = Utc::now();
    (0..target)
        .map(|i| NewOrder {
            customer_id: customer_ids[rng.gen_range(0..customer_ids.len())].clone(),
            employee_id: employee_ids[rng.gen_range(0..employee_ids.len())],
            order_date: now - Duration::days(rng.gen_range(1..30)),
            required_date: now + Duration::days(rng.gen_range(1..30)),
            shipped_date: Some(now + Duration::days(rng.gen_range(1..15))),
            ship_via: shipper_ids[rng.gen_range(0..shipper_ids.len())],
            freight: two_decimals(rng),
            ship_name: format!("Cliente {}", i + 1),
            ship_address: format!("Rua {}", rng.gen_range(1..100)),
            ship_city: "São Paulo".to_string(),
            ship_region: "SP".to_string(),
            ship_postal_code: format!("{}", rng.gen_range(10_000..100_000)),
            ship_country: "Brasil".to_string(),
        })
        .collect()
}

/// Itens de pedido: unicidade sobre o par composto (order_id, product_id),
/// sorteando uniformemente entre os pedidos e produtos existentes.
pub fn order_detail_batch<R: Rng>(
    rng: &mut R,
    target: usize,
    order_ids: &[i32],
    product_ids: &[i32],
    mut existing_pairs: HashSet<(i32, i32)>,
) -> Vec<OrderDetail> {
    generate_unique(rng, target, &mut existing_pairs, |rng, _| {
        let order_id = order_ids[rng.gen_range(0..order_ids.len())];
        let product_id = product_ids[rng.gen_range(0..product_ids.len())];
        let detail = OrderDetail {
            order_id,
            product_id,
            unit_price: two_decimals(rng),
            quantity: rng.gen_range(1..10),
            discount: rng.gen_range(0..100) as f32 / 100.0,
        };
        ((order_id, product_id), detail)
    })
}

// Valor em [0, 100) já arredondado para 2 casas, sem passar por float.
fn two_decimals<R: Rng>(rng: &mut R) -> Decimal {
    Decimal::new(rng.gen_range(0..10_000), 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    #[test]
    fn customer_codes_are_pairwise_distinct() {
        let batch = customer_batch(&mut rng(7), 50, HashSet::new());
        assert_eq!(batch.len(), 50);
        let codes: HashSet<_> = batch.iter().map(|c| c.customer_id.clone()).collect();
        assert_eq!(codes.len(), 50);
        for code in &codes {
            assert!(code.starts_with("CUST"));
            assert_eq!(code.len(), 8);
        }
    }

    #[test]
    fn customer_batch_skips_existing_codes() {
        // Ocupa todo o espaço de códigos menos um: só ele pode ser aceito.
        let mut existing: HashSet<String> =
            (0..10_000).map(|n| format!("CUST{n:04}")).collect();
        existing.remove("CUST0042");

        let batch = customer_batch(&mut rng(1), 10, existing);
        assert!(batch.len() <= 1);
        for customer in &batch {
            assert_eq!(customer.customer_id, "CUST0042");
        }
    }

    #[test]
    fn customer_batch_with_full_keyspace_yields_nothing() {
        let existing: HashSet<String> = (0..10_000).map(|n| format!("CUST{n:04}")).collect();
        let batch = customer_batch(&mut rng(3), 100, existing);
        assert!(batch.is_empty());
    }

    #[test]
    fn requesting_more_customers_than_keyspace_terminates_via_budget() {
        // 10.000 códigos possíveis, 10.000 pedidos: o orçamento de 20.000
        // tentativas corta o laço antes de completar o alvo.
        let batch = customer_batch(&mut rng(11), 10_000, HashSet::new());
        assert!(batch.len() < 10_000);
        assert!(!batch.is_empty());
        let codes: HashSet<_> = batch.iter().map(|c| c.customer_id.clone()).collect();
        assert_eq!(codes.len(), batch.len());
    }

    #[test]
    fn same_seed_same_output() {
        let a = customer_batch(&mut rng(99), 20, HashSet::new());
        let b = customer_batch(&mut rng(99), 20, HashSet::new());
        let codes_a: Vec<_> = a.iter().map(|c| &c.customer_id).collect();
        let codes_b: Vec<_> = b.iter().map(|c| &c.customer_id).collect();
        assert_eq!(codes_a, codes_b);
    }

    #[test]
    fn employee_phones_are_unique_and_well_formed() {
        let batch = employee_batch(&mut rng(5), 30, HashSet::new());
        assert_eq!(batch.len(), 30);
        let phones: HashSet<_> = batch.iter().map(|e| e.home_phone.clone()).collect();
        assert_eq!(phones.len(), 30);
        for employee in &batch {
            assert!(employee.home_phone.starts_with("300-"));
            assert!(employee.birth_date < employee.hire_date);
            assert!(employee.reports_to.is_none());
        }
    }

    #[test]
    fn supplier_names_exclude_existing() {
        let first = supplier_batch(&mut rng(2), 40, HashSet::new());
        let taken: HashSet<String> = first.iter().map(|s| s.company_name.clone()).collect();

        let second = supplier_batch(&mut rng(2), 40, taken.clone());
        for supplier in &second {
            assert!(!taken.contains(&supplier.company_name));
        }
    }

    #[test]
    fn product_batch_respects_dependencies_and_ranges() {
        let suppliers = vec![10, 20, 30];
        let categories = vec![1, 2];
        let batch = product_batch(&mut rng(8), 200, &suppliers, &categories);
        assert_eq!(batch.len(), 200);
        for product in &batch {
            assert!(suppliers.contains(&product.supplier_id));
            assert!(categories.contains(&product.category_id));
            assert!(product.unit_price >= Decimal::ZERO);
            assert!(product.unit_price < Decimal::new(10_000, 2));
            assert!((0..100).contains(&product.units_in_stock));
            assert!((0..50).contains(&product.units_on_order));
            assert!((1..20).contains(&product.reorder_level));
            assert!(!product.discontinued);
        }
    }

    #[test]
    fn order_batch_samples_existing_references() {
        let customers = vec!["CUST0001".to_string(), "CUST0002".to_string()];
        let employees = vec![1, 2, 3];
        let shippers = vec![1, 2];
        let batch = order_batch(&mut rng(4), 25, &customers, &employees, &shippers);
        assert_eq!(batch.len(), 25);
        for order in &batch {
            assert!(customers.contains(&order.customer_id));
            assert!(employees.contains(&order.employee_id));
            assert!(shippers.contains(&order.ship_via));
            assert!(order.order_date < order.required_date);
            assert!(order.freight >= Decimal::ZERO);
        }
    }

    #[test]
    fn order_detail_pairs_are_distinct_and_exclude_existing() {
        let orders = vec![1, 2, 3];
        let products = vec![10, 20];
        let mut existing = HashSet::new();
        existing.insert((1, 10));

        let batch = order_detail_batch(&mut rng(6), 5, &orders, &products, existing);
        // 6 pares possíveis, 1 ocupado: no máximo 5 aceitos.
        assert!(batch.len() <= 5);
        let mut pairs = HashSet::new();
        for detail in &batch {
            assert_ne!((detail.order_id, detail.product_id), (1, 10));
            assert!(pairs.insert((detail.order_id, detail.product_id)));
            assert!(detail.quantity >= 1);
            assert!((0.0..1.0).contains(&detail.discount));
        }
    }

    #[test]
    fn order_detail_batch_with_single_taken_pair_yields_nothing() {
        let mut existing = HashSet::new();
        existing.insert((1, 10));
        let batch = order_detail_batch(&mut rng(9), 3, &[1], &[10], existing);
        assert!(batch.is_empty());
    }

    #[test]
    fn generate_unique_counts_every_attempt() {
        // Sintetizador que sempre colide: o laço deve parar exatamente no
        // orçamento, sem aceitar nada.
        let mut seen: HashSet<u32> = HashSet::from([0]);
        let mut calls = 0usize;
        let out: Vec<u32> = generate_unique(&mut rng(0), 10, &mut seen, |_, _| {
            calls += 1;
            (0u32, 0u32)
        });
        assert!(out.is_empty());
        assert_eq!(calls, 10 * ATTEMPT_MULTIPLIER);
    }
}
