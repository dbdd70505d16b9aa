use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use probemap::util::hash_function_2;
use probemap::{find_mode, ChainingMap, HashTable, OpenAddressingMap};


fn keys(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("key{i}")).collect()
}

fn fill_and_read<M: HashTable<usize>>(mut map: M, keys: &[String]) {
    for (i, key) in keys.iter().enumerate() {
        map.put(key, i);
    }
    for (i, key) in keys.iter().enumerate() {
        assert_eq!(map.get(key), Some(&i));
    }
}

fn churn<M: HashTable<usize>>(mut map: M, keys: &[String]) {
    for (i, key) in keys.iter().enumerate() {
        map.put(key, i);
        if i % 2 == 0 {
            map.remove(key);
        }
    }
    assert_eq!(map.size(), keys.len() / 2);
}


fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("engines");

    for n in [100usize, 1000, 10000].iter() {
        let keys = keys(*n);

        group.bench_with_input(BenchmarkId::new("open_addressing_put_get", n), &keys,
            |b, keys| b.iter(|| fill_and_read(OpenAddressingMap::new(11, hash_function_2), keys)));

        group.bench_with_input(BenchmarkId::new("chaining_put_get", n), &keys,
            |b, keys| b.iter(|| fill_and_read(ChainingMap::new(11, hash_function_2), keys)));

        group.bench_with_input(BenchmarkId::new("open_addressing_churn", n), &keys,
            |b, keys| b.iter(|| churn(OpenAddressingMap::new(11, hash_function_2), keys)));

        group.bench_with_input(BenchmarkId::new("chaining_churn", n), &keys,
            |b, keys| b.iter(|| churn(ChainingMap::new(11, hash_function_2), keys)));
    }
    group.finish();

    let mut group = c.benchmark_group("find_mode");
    for n in [1000usize, 100000].iter() {
        let values: Vec<String> = (0..*n).map(|i| format!("v{}", i % 97)).collect();
        group.bench_with_input(BenchmarkId::new("find_mode", n), &values,
            |b, values| b.iter(|| find_mode(values)));
    }
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
