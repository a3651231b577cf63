//! Unit tests for batch identifiers

use core_kernel::BatchId;
use uuid::Uuid;

fn uuid_of(id: BatchId) -> Uuid {
    let text = id.to_string();
    let bare = text.strip_prefix("BAT-").expect("BAT- prefix");
    Uuid::parse_str(bare).unwrap()
}

#[test]
fn test_new_generates_unique_ids() {
    assert_ne!(BatchId::new_v7(), BatchId::new_v7());
}

#[test]
fn test_display_is_prefixed_v7_uuid() {
    let uuid = uuid_of(BatchId::new_v7());
    assert_eq!(uuid.get_version_num(), 7);
}

#[test]
fn test_ids_sort_by_creation_time() {
    let first = uuid_of(BatchId::new_v7());
    std::thread::sleep(std::time::Duration::from_millis(2));
    let second = uuid_of(BatchId::new_v7());
    assert!(first < second);
}
