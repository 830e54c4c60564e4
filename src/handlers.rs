pub mod customers;
pub mod employees;
pub mod order_details;
pub mod orders;
pub mod products;
pub mod suppliers;

use serde::Deserialize;
use utoipa::IntoParams;

use crate::common::error::AppError;

/// Parâmetro `count` dos endpoints de carga massiva. O default varia por
/// recurso, então fica a cargo de cada handler.
#[derive(Debug, Deserialize, IntoParams)]
pub struct BulkParams {
    pub count: Option<i64>,
}

/// Faixa aceita para a carga massiva, igual para todos os recursos.
pub fn check_bulk_count(count: i64) -> Result<usize, AppError> {
    if !(1..=1000).contains(&count) {
        return Err(AppError::InvalidArgument(
            "O parâmetro 'count' deve estar entre 1 e 1000.".to_string(),
        ));
    }
    Ok(count as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bulk_count_bounds() {
        assert!(check_bulk_count(0).is_err());
        assert!(check_bulk_count(-5).is_err());
        assert!(check_bulk_count(1001).is_err());
        assert_eq!(check_bulk_count(1).unwrap(), 1);
        assert_eq!(check_bulk_count(1000).unwrap(), 1000);
    }
}
