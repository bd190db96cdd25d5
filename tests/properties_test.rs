use collabnet::{
    CommunityDetector, GraphBuilder, GroupingPolicy, Pipeline, PipelineConfig, SongRecord,
    YearRange,
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

const POOL: [&str; 15] = [
    "Asha", "Bhupinder", "Chitra", "Dev", "Elango", "Farida", "Geeta", "Hemant", "Ilaiyaraaja",
    "Jagjit", "Kavita", "Lata", "Manna", "Noor", "Oscar",
];

fn random_records(seed: u64, count: usize) -> Vec<SongRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    let name = |rng: &mut StdRng| -> Option<String> {
        if rng.gen_bool(0.1) {
            None
        } else {
            Some(POOL[rng.gen_range(0..POOL.len())].to_string())
        }
    };

    (0..count)
        .map(|_| {
            let year = rng.gen_range(1950..2000).to_string();
            let composer = name(&mut rng);
            let lyricist = name(&mut rng);
            let singer = match (name(&mut rng), rng.gen_bool(0.3)) {
                (Some(first), true) => Some(format!("{} & {}", first, POOL[rng.gen_range(0..POOL.len())])),
                (single, _) => single,
            };
            SongRecord::from_fields(
                &year,
                composer.as_deref(),
                lyricist.as_deref(),
                singer.as_deref(),
            )
        })
        .collect()
}

fn policies() -> Vec<GroupingPolicy> {
    vec![
        GroupingPolicy::Triangle,
        GroupingPolicy::RolePairs,
        GroupingPolicy::CoSingers,
        GroupingPolicy::Ensemble,
    ]
}

#[test]
fn test_edges_are_symmetric_without_self_loops() {
    for seed in 0..5 {
        let records = random_records(seed, 200);
        for policy in policies() {
            let graph = GraphBuilder::new(policy).unwrap().build(&records).graph;

            for edge in graph.edges() {
                assert_ne!(edge.source, edge.target);
                assert!(edge.weight > 0);
                assert_eq!(graph.edge_weight(edge.source, edge.target), Some(edge.weight));
                assert_eq!(graph.edge_weight(edge.target, edge.source), Some(edge.weight));
            }

            for (id, _) in graph.nodes() {
                for (other, weight) in graph.neighbors(id) {
                    assert_eq!(graph.edge_weight(other, id), Some(weight));
                }
            }
        }
    }
}

#[test]
fn test_weight_conservation() {
    for seed in 0..5 {
        let records = random_records(seed, 300);
        for policy in policies() {
            let expected: u64 = records
                .iter()
                .filter(|r| !r.is_malformed())
                .flat_map(|r| policy.groups(r))
                .map(|g| g.pairs().count() as u64)
                .sum();

            let graph = GraphBuilder::new(policy.clone()).unwrap().build(&records).graph;
            assert_eq!(graph.total_weight(), expected, "policy {:?}", policy);

            let degree_sum: u64 = graph.nodes().map(|(id, _)| graph.weighted_degree(id)).sum();
            assert_eq!(degree_sum, 2 * expected);
        }
    }
}

#[test]
fn test_weight_totals_on_fixed_records() {
    let records = vec![
        SongRecord::new(1960, Some("A"), Some("B"), Some("C & D")),
        SongRecord::new(1961, Some("A"), None, Some("B")),
        SongRecord::new(1962, None, None, Some("E & F & G")),
        SongRecord::from_fields("x", Some("A"), Some("B"), Some("C")),
    ];
    let build = |policy: GroupingPolicy| GraphBuilder::new(policy).unwrap().build(&records).graph;

    let graph = build(GroupingPolicy::RolePairs);
    assert_eq!(graph.total_weight(), 4);
    assert_eq!(graph.node_count(), 4);
    assert_eq!(graph.edge_weight_by_name("A", "B"), Some(2));
    assert_eq!(graph.edge_weight_by_name("B", "C & D"), Some(1));
    assert_eq!(graph.edge_weight_by_name("A", "C & D"), Some(1));
    assert!(graph.contains("E & F & G"));

    let graph = build(GroupingPolicy::CoSingers);
    assert_eq!(graph.total_weight(), 4);
    assert_eq!(graph.node_count(), 6);
    assert_eq!(graph.edge_weight_by_name("C", "D"), Some(1));
    assert_eq!(graph.edge_weight_by_name("E", "G"), Some(1));
    assert_eq!(graph.edge_weight_by_name("A", "B"), None);

    let graph = build(GroupingPolicy::Triangle);
    assert_eq!(graph.total_weight(), 4);
    assert_eq!(graph.edge_weight_by_name("A", "B"), Some(2));

    let graph = build(GroupingPolicy::Ensemble);
    assert_eq!(graph.total_weight(), 10);
    assert_eq!(graph.node_count(), 7);
}

#[test]
fn test_wider_range_never_loses_weight() {
    let records = random_records(7, 400);
    let builder = GraphBuilder::default();
    let mut rng = StdRng::seed_from_u64(99);

    for _ in 0..20 {
        let lo = rng.gen_range(1950..1990);
        let hi = rng.gen_range(lo..2000);
        let narrow = YearRange::new(lo, hi);
        let wide = YearRange::new(lo - rng.gen_range(0..5), hi + rng.gen_range(0..5));

        let small = builder.build(narrow.select(&records)).graph;
        let large = builder.build(wide.select(&records)).graph;

        for (_, name) in small.nodes() {
            assert!(large.contains(name), "{} missing from wider range", name);
        }
        for edge in small.edges() {
            let a = small.name(edge.source).unwrap();
            let b = small.name(edge.target).unwrap();
            let wider = large.edge_weight_by_name(a, b).unwrap_or(0);
            assert!(edge.weight <= wider, "{}-{}: {} > {}", a, b, edge.weight, wider);
        }
    }
}

#[test]
fn test_partition_is_total() {
    for seed in 0..5 {
        let records = random_records(seed, 150);
        let graph = GraphBuilder::default().build(&records).graph;
        let partition = CommunityDetector::default().detect(&graph);

        assert_eq!(partition.len(), graph.node_count());
        let sizes = partition.community_sizes();
        for (id, _) in graph.nodes() {
            let community = partition.community_of(id).unwrap();
            assert!(community < partition.community_count());
        }
        // Ids are dense
        assert!(sizes.iter().all(|&members| members > 0));
    }
}

#[test]
fn test_runs_are_deterministic() {
    let records = random_records(11, 300);
    let pipeline = Pipeline::default();

    let first = pipeline.run(&records).unwrap();
    let second = pipeline.run(&records).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        first.graph.to_json().unwrap(),
        pipeline.run_to_json(&records).unwrap()
    );
}

#[test]
fn test_record_order_does_not_change_export() {
    let records = random_records(13, 250);
    let mut shuffled = records.clone();
    shuffled.shuffle(&mut StdRng::seed_from_u64(5));

    for policy in policies() {
        let pipeline = Pipeline::new(PipelineConfig::default().with_grouping(policy)).unwrap();
        let a = pipeline.run(&records).unwrap();
        let b = pipeline.run(&shuffled).unwrap();
        assert_eq!(a.graph, b.graph);
        assert_eq!(a.report, b.report);
    }
}

#[test]
fn test_modularity_is_reported() {
    let records = random_records(17, 300);
    let output = Pipeline::default().run(&records).unwrap();
    let q = output.modularity();
    assert!(q.is_finite());
    assert!((-0.5..=1.0).contains(&q));
}
