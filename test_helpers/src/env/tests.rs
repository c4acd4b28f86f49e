//! Unit tests for environment helpers.

use super::*;

fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

#[test]
fn set_var_restores_absent_key() {
    let key = "FLAGBIND_HELPERS_ABSENT";
    let _lock = lock();
    drop(remove_var(key));
    {
        let _guard = set_var(key, "temp");
        assert_eq!(env_value(key).as_deref(), Some("temp"));
    }
    assert_eq!(env_value(key), None);
}

#[test]
fn remove_var_restores_original_value() {
    let key = "FLAGBIND_HELPERS_PRESENT";
    let _lock = lock();
    let _outer = set_var(key, "original");
    {
        let _guard = remove_var(key);
        assert_eq!(env_value(key), None);
    }
    assert_eq!(env_value(key).as_deref(), Some("original"));
}

#[test]
fn stacked_guards_restore_in_lifo_order() {
    let key = "FLAGBIND_HELPERS_STACKED";
    let _lock = lock();
    let first = set_var(key, "one");
    let second = set_var(key, "two");
    assert_eq!(env_value(key).as_deref(), Some("two"));
    drop(second);
    assert_eq!(env_value(key).as_deref(), Some("one"));
    drop(first);
    assert_eq!(env_value(key), None);
}
