use criterion::*;
use probemap::util::hash_function_1;
use probemap::{ChainingMap, HashTable, OpenAddressingMap};


fn lookups<M: HashTable<usize>>(map: &M, keys: &[String]) -> usize {
    keys.iter().filter_map(|key| map.get(key)).sum()
}

fn bench(c: &mut Criterion) {
    let keys: Vec<String> = (0..100_000).map(|i| format!("str{i}")).collect();

    let mut open = OpenAddressingMap::new(53, hash_function_1);
    let mut chained = ChainingMap::new(53, hash_function_1);
    for (i, key) in keys.iter().enumerate() {
        open.put(key, i);
        chained.put(key, i);
    }

    let mut group = c.benchmark_group("lookup-throughput");
    group.throughput(Throughput::Elements(keys.len() as u64));

    group.bench_with_input(BenchmarkId::new("open_addressing", keys.len()), &keys,
        |b, keys| b.iter(|| lookups(&open, keys)));

    group.bench_with_input(BenchmarkId::new("chaining", keys.len()), &keys,
        |b, keys| b.iter(|| lookups(&chained, keys)));

    group.finish();
}

criterion_group!(benches, bench);
criterion_main!(benches);
