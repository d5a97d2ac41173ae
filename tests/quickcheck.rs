use avl::{Map, Set};
use quickcheck::{quickcheck, TestResult};

fn entries(map: &Map<u32, u16>) -> Vec<(u32, u16)> {
    map.keys()
        .into_iter()
        .map(|key| {
            let value = *map.get(&key).unwrap();
            (key, value)
        })
        .collect()
}

#[test]
fn keys_ascend_and_match_len() {
    fn test(map: Map<u32, u16>) -> bool {
        let keys = map.keys();
        keys.len() == map.len() && keys.windows(2).all(|pair| pair[0] < pair[1])
    }

    quickcheck(test as fn(_) -> bool);
}

#[test]
fn insert_sets_len() {
    fn test(mut map: Map<u32, u16>, key: u32, value: u16) -> bool {
        let old_len = map.len();

        if map.insert(key, value).is_some() {
            map.len() == old_len
        } else {
            map.len() == old_len + 1
        }
    }

    quickcheck(test as fn(_, _, _) -> bool);
}

#[test]
fn insert_inserts_key() {
    fn test(mut map: Map<u32, u16>, key: u32, mut value: u16) -> bool {
        map.insert(key, value);

        map.contains_key(&key)
            && map.get(&key) == Some(&value)
            && map.get_mut(&key) == Some(&mut value)
    }

    quickcheck(test as fn(_, _, _) -> bool);
}

#[test]
fn insert_returns_old_value() {
    fn test(mut map: Map<u32, u16>, key: u32, value: u16) -> bool {
        let old = map.get(&key).cloned();
        old == map.insert(key, value)
    }

    quickcheck(test as fn(_, _, _) -> bool);
}

#[test]
fn insert_affects_no_others() {
    fn test(mut map: Map<u32, u16>, key: u32, value: u16) -> bool {
        let old = entries(&map);
        map.insert(key, value);
        let new = entries(&map);

        new.iter().filter(|e| e.0 != key).eq(old.iter().filter(|e| e.0 != key))
    }

    quickcheck(test as fn(_, _, _) -> bool);
}

#[test]
fn remove_removes_key() {
    fn test(mut map: Map<u32, u16>, index: usize) -> TestResult {
        if map.is_empty() {
            return TestResult::discard();
        }

        let keys = map.keys();
        let key = keys[index % keys.len()];

        TestResult::from_bool(match map.remove(&key) {
            None => false,
            Some((removed, _)) => {
                removed == key
                    && !map.contains_key(&key)
                    && map.get(&key).is_none()
                    && map.get_mut(&key).is_none()
            }
        })
    }

    quickcheck(test as fn(_, _) -> TestResult);
}

#[test]
fn remove_sets_len() {
    fn test(mut map: Map<u32, u16>, index: usize) -> TestResult {
        if map.is_empty() {
            return TestResult::discard();
        }

        let old_len = map.len();
        let keys = map.keys();
        let key = keys[index % keys.len()];

        map.remove(&key);
        TestResult::from_bool(map.len() == old_len - 1)
    }

    quickcheck(test as fn(_, _) -> TestResult);
}

#[test]
fn remove_affects_no_others() {
    fn test(mut map: Map<u32, u16>, index: usize) -> TestResult {
        if map.is_empty() {
            return TestResult::discard();
        }

        let old = entries(&map);
        let keys = map.keys();
        let key = keys[index % keys.len()];

        map.remove(&key);

        TestResult::from_bool(
            entries(&map) == old.into_iter().filter(|e| e.0 != key).collect::<Vec<_>>(),
        )
    }

    quickcheck(test as fn(_, _) -> TestResult);
}

#[test]
fn second_removal_misses() {
    fn test(mut map: Map<u32, u16>, index: usize) -> TestResult {
        if map.is_empty() {
            return TestResult::discard();
        }

        let keys = map.keys();
        let key = keys[index % keys.len()];

        TestResult::from_bool(map.remove(&key).is_some() && map.remove(&key).is_none())
    }

    quickcheck(test as fn(_, _) -> TestResult);
}

#[test]
fn remove_missing_changes_nothing() {
    fn test(mut map: Map<u32, u16>, key: u32) -> TestResult {
        if map.contains_key(&key) {
            return TestResult::discard();
        }

        let old = entries(&map);
        TestResult::from_bool(map.remove(&key).is_none() && entries(&map) == old)
    }

    quickcheck(test as fn(_, _) -> TestResult);
}

#[test]
fn insert_remove_round_trips_empty() {
    fn test(key: u32, value: u16) -> bool {
        let mut map = Map::new();
        map.insert(key, value);

        map.remove(&key) == Some((key, value)) && map.is_empty() && map.get(&key).is_none()
    }

    quickcheck(test as fn(_, _) -> bool);
}

#[test]
fn value_update_keeps_single_entry() {
    let mut map = Map::new();
    assert_eq!(map.insert("a", 1), None);
    assert_eq!(map.insert("a", 2), Some(1));
    assert_eq!(map.len(), 1);
    assert_eq!(map.get(&"a"), Some(&2));
}

#[test]
fn empty_containers_miss_everything() {
    let mut map: Map<u32, ()> = Map::new();
    assert_eq!(map.remove(&0), None);
    assert!(!map.contains_key(&0));
    assert_eq!(map.get(&0), None);
    assert!(map.keys().is_empty());
    assert_eq!(map.len(), 0);

    let mut set: Set<u32> = Set::new();
    assert!(!set.remove(&0));
    assert!(!set.contains(&0));
    assert_eq!(set.count(&0), 0);
    assert_eq!(set.len(), 0);
    assert!(set.is_empty());
}

#[test]
fn set_counts_duplicates() {
    fn test(item: u32, extra: u8) -> bool {
        let copies = extra as usize + 1;

        let mut set = Set::new();
        if !set.insert(item) {
            return false;
        }
        for _ in 1..copies {
            if set.insert(item) {
                return false;
            }
        }

        if set.len() != 1 || set.count(&item) != copies {
            return false;
        }

        // Every removal but the last only counts down.
        for _ in 1..copies {
            if set.remove(&item) || !set.contains(&item) {
                return false;
            }
        }

        set.remove(&item) && set.is_empty() && !set.remove(&item)
    }

    quickcheck(test as fn(_, _) -> bool);
}

#[test]
fn set_len_counts_distinct_items() {
    fn test(items: Vec<u8>) -> bool {
        let set: Set<u8> = items.iter().cloned().collect();

        let mut sorted = items;
        sorted.sort();
        sorted.dedup();

        set.len() == sorted.len() && set.keys() == sorted
    }

    quickcheck(test as fn(_) -> bool);
}

#[test]
fn mirrored_insertions_mirror_rotations() {
    fn test(keys: Vec<i16>) -> bool {
        let mut fwd = Map::new();
        let mut rev = Map::new();

        for &key in &keys {
            fwd.insert(key as i32, ());
            rev.insert(-(key as i32), ());
        }

        let mirrored: Vec<i32> = rev.keys().into_iter().rev().map(|key| -key).collect();
        let (f, r) = (fwd.insert_rotations(), rev.insert_rotations());

        fwd.keys() == mirrored && f.ll == r.rr && f.lr == r.rl && f.rl == r.lr && f.rr == r.ll
    }

    quickcheck(test as fn(_) -> bool);
}

#[test]
fn mirrored_extremum_removals_mirror_rotations() {
    fn test(keys: Vec<i16>) -> bool {
        let mut fwd = Map::new();
        let mut rev = Map::new();

        for &key in &keys {
            fwd.insert(key as i32, ());
            rev.insert(-(key as i32), ());
        }

        // Max-first removal on one side is min-first on the other; an
        // extremum node has at most one child, so the two removal sequences
        // stay exact mirrors.
        let mut descending = fwd.keys();
        descending.reverse();
        for key in descending {
            fwd.remove(&key);
        }
        for key in rev.keys() {
            rev.remove(&key);
        }

        let (f, r) = (fwd.remove_rotations(), rev.remove_rotations());

        fwd.is_empty()
            && rev.is_empty()
            && f.ll == r.rr
            && f.lr == r.rl
            && f.rl == r.lr
            && f.rr == r.ll
    }

    quickcheck(test as fn(_) -> bool);
}

#[test]
fn dump_tree_lists_each_key_once() {
    let mut map = Map::new();
    for key in [2, 1, 3] {
        map.insert(key, ());
    }

    let dump = map.dump_tree().to_string();
    assert_eq!(dump.lines().collect::<Vec<_>>(), ["    3", "2", "    1"]);
}
