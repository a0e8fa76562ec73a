use super::*;

#[test]
fn memory_storage_starts_empty() {
    let storage = MemoryStorage::default();
    assert_eq!(storage.load(), Ok(None));
}

#[test]
fn memory_storage_save_then_load() {
    let storage = MemoryStorage::default();
    storage.save("abc").unwrap();
    assert_eq!(storage.load(), Ok(Some("abc".to_owned())));
}

#[test]
fn memory_storage_clear_removes_value_and_is_repeatable() {
    let storage = MemoryStorage::with_credential("abc");
    storage.clear().unwrap();
    assert_eq!(storage.peek(), None);
    assert_eq!(storage.clear(), Ok(()));
}

#[test]
fn memory_storage_clones_share_slot() {
    let first = MemoryStorage::default();
    let second = first.clone();
    first.save("shared").unwrap();
    assert_eq!(second.peek(), Some("shared".to_owned()));
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn browser_storage_unavailable_without_hydrate() {
    let storage = BrowserStorage;
    assert_eq!(storage.load(), Err(StorageError::Unavailable));
    assert_eq!(storage.save("x"), Err(StorageError::Unavailable));
    assert_eq!(storage.clear(), Err(StorageError::Unavailable));
}

#[test]
fn credential_key_is_token() {
    assert_eq!(CREDENTIAL_KEY, "token");
}
