use linear_hash::Builder;
use linear_hash::Error;
use linear_hash::LinearHashTable;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use test_log::test;

const FOODS: [&str; 9] = [
    "bacon",
    "chicken",
    "pork",
    "pig",
    "lettuce",
    "beetroot",
    "chocolate",
    "frying pan porcupine",
    "a4 paper",
];

#[test]
fn round_trip() {
    let mut table = LinearHashTable::new();
    for (value, key) in FOODS.iter().enumerate() {
        table.insert(key, value).unwrap();
        assert_eq!(table.get(key), Some(&value));
    }
    for (value, key) in FOODS.iter().enumerate() {
        assert_eq!(table.get(key), Some(&value));
    }
    assert_eq!(table.len(), FOODS.len());
}

#[test]
fn no_overwrite_on_insert() {
    let mut table = LinearHashTable::new();
    table.insert("bacon", 1).unwrap();
    assert!(table.contains_key("bacon"));

    let err = table.insert("bacon", 2).unwrap_err();
    assert_eq!(err.kind, Error::KeyExists);
    assert_eq!(err.into_data(), 2);
    assert_eq!(table.get("bacon"), Some(&1));
}

#[test]
fn no_resurrection() {
    let mut table = LinearHashTable::new();
    table.insert("bacon", 1).unwrap();
    assert_eq!(table.remove("bacon"), Some(1));
    assert_eq!(table.get("bacon"), None);
    assert!(!table.contains_key("bacon"));
    assert_eq!(table.remove("bacon"), None);

    table.insert("bacon", 2).unwrap();
    assert_eq!(table.get("bacon"), Some(&2));
}

#[test]
fn resize_preserves_content() {
    let mut table = LinearHashTable::new();
    for (value, key) in FOODS.iter().enumerate() {
        table.insert(key, value).unwrap();
    }

    for new_size in [10, 64, 1000, 17] {
        table.resize(new_size).unwrap();
        assert_eq!(table.capacity(), new_size);
        assert_eq!(table.len(), FOODS.len());
        for (value, key) in FOODS.iter().enumerate() {
            assert_eq!(table.get(key), Some(&value), "{table:?}");
        }
    }
}

#[test]
fn load_triggered_growth() {
    let mut table = LinearHashTable::with_capacity(4).unwrap();
    table.insert("a", 'a').unwrap();
    table.insert("b", 'b').unwrap();
    table.insert("c", 'c').unwrap();
    assert_eq!(table.capacity(), 4);
    assert_eq!(table.load(), 7);

    table.insert("d", 'd').unwrap();
    assert_eq!(table.capacity(), 8);
    assert_eq!(table.len(), 4);
    assert_eq!(table.load(), 5);
    assert_eq!(table.get("d"), Some(&'d'));
}

#[test]
fn collisions_after_shrinking() {
    let mut table = LinearHashTable::new();
    assert_eq!(table.capacity(), 32);
    table.resize(9).unwrap();
    assert_eq!(table.capacity(), 9);

    for (value, key) in FOODS.iter().enumerate() {
        table.insert(key, value).unwrap();
        assert_eq!(table.len(), value + 1);
        assert_eq!(table.get(key), Some(&value));
    }

    // Growth kicked in along the way.
    assert!(table.load() < 10);
    assert!(table.capacity() > 9);

    for index in [2, 0, 1] {
        assert_eq!(table.remove(FOODS[index]), Some(index));
        assert_eq!(table.remove(FOODS[index]), None);
    }
    assert_eq!(table.len(), 6);

    for (value, key) in FOODS.iter().enumerate().skip(3) {
        assert_eq!(table.get(key), Some(&value));
    }
}

#[test]
fn collisions_in_a_full_table() {
    let mut table = Builder::new().capacity(9).threshold(10).build().unwrap();

    for (value, key) in FOODS.iter().enumerate() {
        table.insert(key, value).unwrap();
    }
    assert_eq!(table.capacity(), 9);
    assert_eq!(table.len(), 9);

    let mut order: Vec<usize> = (0..FOODS.len()).collect();
    order.shuffle(&mut SmallRng::seed_from_u64(9));

    let (removed, kept) = order.split_at(4);
    for &index in removed {
        assert_eq!(table.remove(FOODS[index]), Some(index));
    }
    for &index in kept {
        assert_eq!(table.get(FOODS[index]), Some(&index));
    }
    for &index in removed {
        assert_eq!(table.get(FOODS[index]), None);
    }
    assert_eq!(table.tombstones(), 4);
}

#[test]
fn threshold_bounds() {
    let mut table: LinearHashTable<()> = LinearHashTable::new();
    assert_eq!(table.tune_threshold(1), Ok(()));
    assert_eq!(table.tune_threshold(10), Ok(()));
    assert_eq!(table.tune_threshold(0), Err(Error::ThresholdOutOfRange(0)));
    assert_eq!(
        table.tune_threshold(11),
        Err(Error::ThresholdOutOfRange(11))
    );
}

#[test]
fn invalid_arguments_do_not_mutate() {
    let mut table = LinearHashTable::with_capacity(4).unwrap();
    table.insert("a", 1).unwrap();

    assert_eq!(table.resize(0), Err(Error::ZeroCapacity));
    assert_eq!(
        table.resize(1),
        Err(Error::CapacityTooSmall {
            requested: 1,
            len: 1
        })
    );
    assert_eq!(table.capacity(), 4);
    assert_eq!(table.get("a"), Some(&1));

    assert_eq!(
        LinearHashTable::<u8>::with_capacity(0).unwrap_err(),
        Error::ZeroCapacity
    );
}

#[test]
fn failed_allocation_leaves_the_table_untouched() {
    let mut table = LinearHashTable::new();
    for (value, key) in FOODS.iter().enumerate() {
        table.insert(key, value).unwrap();
    }
    let capacity = table.capacity();

    assert_eq!(table.resize(usize::MAX), Err(Error::AllocFailed));
    assert_eq!(table.capacity(), capacity);
    assert_eq!(table.len(), FOODS.len());
    for (value, key) in FOODS.iter().enumerate() {
        assert_eq!(table.get(key), Some(&value));
    }
}

#[test]
fn borrowed_data_outlives_the_table() {
    let payloads = vec![String::from("first"), String::from("second")];

    let mut table = LinearHashTable::new();
    table.insert("one", &payloads[0]).unwrap();
    table.insert("two", &payloads[1]).unwrap();
    assert_eq!(table.get("two").map(|s| s.as_str()), Some("second"));
    drop(table);

    assert_eq!(payloads.len(), 2);
}

#[test]
fn into_values_hands_data_back() {
    let mut table = LinearHashTable::new();
    table.insert("one", Box::new(1)).unwrap();
    table.insert("two", Box::new(2)).unwrap();
    table.remove("one");

    let values: Vec<Box<i32>> = table.into_values().collect();
    assert_eq!(values, vec![Box::new(2)]);
}

#[test]
fn byte_keys_are_compared_exactly() {
    let mut table = LinearHashTable::new();
    table.insert(b"key\x00", 1).unwrap();
    table.insert(b"key", 2).unwrap();
    table.insert("KEY", 3).unwrap();

    assert_eq!(table.get(b"key\x00"), Some(&1));
    assert_eq!(table.get("key"), Some(&2));
    assert_eq!(table.get(String::from("KEY")), Some(&3));
    assert_eq!(table.get_key_value("key"), Some((&b"key"[..], &2)));
}
