pub mod customer_repo;
pub use customer_repo::CustomerRepository;
pub mod employee_repo;
pub use employee_repo::EmployeeRepository;
pub mod supplier_repo;
pub use supplier_repo::SupplierRepository;
pub mod product_repo;
pub use product_repo::ProductRepository;
pub mod order_repo;
pub use order_repo::OrderRepository;
pub mod order_detail_repo;
pub use order_detail_repo::OrderDetailRepository;

use crate::common::error::AppError;

/// Guarda de atualização compartilhada: a chave do path tem que coincidir
/// com a chave do payload. Chaves compostas chamam uma vez por componente.
pub fn ensure_matching_key<K: PartialEq>(path_key: K, payload_key: K) -> Result<(), AppError> {
    if path_key != payload_key {
        return Err(AppError::KeyMismatch);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_keys_pass() {
        assert!(ensure_matching_key(7, 7).is_ok());
        assert!(ensure_matching_key("ALFKI", "ALFKI").is_ok());
    }

    #[test]
    fn diverging_keys_are_rejected() {
        assert!(matches!(
            ensure_matching_key(1, 2),
            Err(AppError::KeyMismatch)
        ));
        assert!(matches!(
            ensure_matching_key("ALFKI", "ANATR"),
            Err(AppError::KeyMismatch)
        ));
    }
}
