//! A cart written by one session is what the next session sees, on every
//! durable backend.

use tienda_core::{AddOutcome, Catalog, GroupingPolicy, Money, DEFAULT_SHIPPING_COST};
use tienda_store::{
    CartStore, FileStorage, LoadOutcome, SqliteStorage, Storage, StorageConfig,
};

fn shop_session<S: Storage>(storage: S) -> S {
    let catalog = Catalog::default();
    let policy = GroupingPolicy::ES_CO;
    let mut store = CartStore::open(storage);

    for (name, qty) in [
        ("Catalina Pink Seamless Sport Set", "1"),
        ("Kimia Seamless Sport Set", "2"),
        ("Catalina Pink Seamless Sport Set", "1"),
    ] {
        let product = catalog.find(name).unwrap();
        let selection = product.card(qty).read(&policy).unwrap();
        store
            .add(selection.name, selection.price, selection.quantity)
            .unwrap();
    }

    store.into_storage()
}

fn assert_restored<S: Storage>(storage: S) {
    let mut store = CartStore::new(storage);
    assert_eq!(store.load(), LoadOutcome::Loaded { lines: 2 });

    assert_eq!(store.item_count(), 4);
    assert_eq!(store.total(), Money::from_units(770_000));
    assert_eq!(store.format_amount(store.total()), "770.000");

    let summary = store.checkout_summary(DEFAULT_SHIPPING_COST);
    assert_eq!(store.format_amount(summary.total), "785.000");

    store.remove_at(0).unwrap();
    assert_eq!(
        store.add("Kimia Seamless Sport Set", Money::from_units(1), 1).unwrap(),
        AddOutcome::Merged {
            position: 0,
            quantity: 3
        }
    );
    assert_eq!(store.total(), Money::from_units(555_000));
}

#[test]
fn file_backend_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    shop_session(FileStorage::open(dir.path()).unwrap());
    assert_restored(FileStorage::open(dir.path()).unwrap());
}

#[test]
fn sqlite_backend_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tienda.db");

    let storage = shop_session(SqliteStorage::open(StorageConfig::new(&path)).unwrap());
    storage.close();
    drop(storage);

    assert_restored(SqliteStorage::open(StorageConfig::new(&path)).unwrap());
}

#[test]
fn clear_and_corrupt_payload_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let storage = shop_session(FileStorage::open(dir.path()).unwrap());

    let mut store = CartStore::open(storage);
    store.clear().unwrap();
    assert_eq!(
        std::fs::read_to_string(dir.path().join("cart.json")).unwrap(),
        "[]"
    );

    std::fs::write(dir.path().join("cart.json"), "[{\"name\":").unwrap();
    let mut reopened = CartStore::new(FileStorage::open(dir.path()).unwrap());
    assert!(matches!(reopened.load(), LoadOutcome::Corrupt { .. }));
    assert!(reopened.cart().is_empty());

    reopened
        .add("Amanda Blue Seamless Sport Set", Money::from_units(200_000), 1)
        .unwrap();
    let mut healed = CartStore::new(FileStorage::open(dir.path()).unwrap());
    assert_eq!(healed.load(), LoadOutcome::Loaded { lines: 1 });
}
