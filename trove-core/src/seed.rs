//! Canonical seed records the server starts with.
//!
//! Three users and eight products; tests rely on these exact ids and
//! values, so changes here ripple into the gateway test suite.

use crate::model::{Product, User};

/// Returns the three seed users (ids 1–3).
#[must_use]
pub fn seed_users() -> Vec<User> {
    let user = |id, name: &str, email: &str, age| User {
        id,
        name: name.to_owned(),
        email: email.to_owned(),
        age,
    };
    vec![
        user(1, "Juan Pérez", "juan@example.com", 25),
        user(2, "María González", "maria@example.com", 30),
        user(3, "Carlos López", "carlos@example.com", 22),
    ]
}

/// Returns the eight seed products (ids 1–8).
#[must_use]
pub fn seed_products() -> Vec<Product> {
    let product = |id, name: &str, price| Product { id, name: name.to_owned(), price };
    vec![
        product(1, "Laptop", 1200.0),
        product(2, "Mouse", 25.0),
        product(3, "Teclado", 50.0),
        product(4, "Monitor", 300.0),
        product(5, "Webcam", 80.0),
        product(6, "Auriculares", 150.0),
        product(7, "Teclado Gaming", 120.0),
        product(8, "Mouse Gaming", 60.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate;

    #[test]
    fn seed_ids_are_unique_and_dense() {
        let users = seed_users();
        let products = seed_products();
        assert_eq!(users.len(), 3);
        assert_eq!(products.len(), 8);
        assert!(users.iter().enumerate().all(|(i, u)| u.id == i as u64 + 1));
        assert!(products.iter().enumerate().all(|(i, p)| p.id == i as u64 + 1));
    }

    #[test]
    fn seed_records_satisfy_the_validation_rules() {
        for user in seed_users() {
            assert_eq!(
                validate::normalize_email(&user.email).as_deref(),
                Ok(user.email.as_str()),
                "seed email must already be normalized"
            );
            assert!(validate::normalize_name(&user.name).is_ok());
            assert!(validate::check_age(i64::from(user.age)).is_ok());
        }
        for product in seed_products() {
            assert!(validate::normalize_name(&product.name).is_ok());
            assert!(validate::check_price(product.price).is_ok());
        }
    }
}
