//! Case-insensitive key helpers shared by every name-keyed registry.

/// Canonical form of a registry key.
pub fn to_lower(value: &str) -> String {
    value.to_lowercase()
}

pub fn to_upper(value: &str) -> String {
    value.to_uppercase()
}

/// Compares two names the way registry keys are compared.
pub fn equals_ignore_case(a: &str, b: &str) -> bool {
    if a.len() == b.len() && a.eq_ignore_ascii_case(b) {
        return true;
    }
    a.to_lowercase() == b.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_keys() {
        assert_eq!(to_lower("Models/Cube.OBJ"), "models/cube.obj");
        assert_eq!(to_upper("damage"), "DAMAGE");
    }

    #[test]
    fn compares_without_case() {
        assert!(equals_ignore_case("Enemy", "enemy"));
        assert!(equals_ignore_case("", ""));
        assert!(!equals_ignore_case("enemy", "enemies"));
    }
}
