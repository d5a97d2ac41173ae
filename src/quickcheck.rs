extern crate quickcheck;

use compare::Compare;
use self::quickcheck::{Arbitrary, Gen};

use crate::{Map, Set};

impl<K, V, C> Arbitrary for Map<K, V, C>
where
    K: Arbitrary,
    V: Arbitrary,
    C: 'static + Clone + Compare<K> + Default,
{
    fn arbitrary(gen: &mut Gen) -> Map<K, V, C> {
        let vec: Vec<(K, V)> = Arbitrary::arbitrary(gen);
        vec.into_iter().collect()
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Map<K, V, C>>> {
        let vec: Vec<(K, V)> = self
            .keys()
            .into_iter()
            .map(|key| {
                let value = self.get(&key).unwrap().clone();
                (key, value)
            })
            .collect();
        Box::new(vec.shrink().map(|vec| vec.into_iter().collect()))
    }
}

impl<T, C> Arbitrary for Set<T, C>
where
    T: Arbitrary,
    C: 'static + Clone + Compare<T> + Default,
{
    fn arbitrary(gen: &mut Gen) -> Set<T, C> {
        let vec: Vec<T> = Arbitrary::arbitrary(gen);
        vec.into_iter().collect()
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Set<T, C>>> {
        Box::new(self.keys().shrink().map(|vec| vec.into_iter().collect()))
    }
}
