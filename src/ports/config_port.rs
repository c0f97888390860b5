//! Configuration access port trait.
//!
//! Getters return `None` when the key is absent or the raw value does not
//! parse as the requested type; defaulting is the caller's decision.

pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    fn get_int(&self, section: &str, key: &str) -> Option<i64>;
    fn get_double(&self, section: &str, key: &str) -> Option<f64>;
    fn get_bool(&self, section: &str, key: &str) -> Option<bool>;
}
