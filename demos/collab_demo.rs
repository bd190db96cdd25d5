//! Collaboration network demo
//!
//! This example shows:
//! - Loading pipeline settings from YAML
//! - Selecting a year range of song records
//! - Community detection and color ranking
//! - Exporting the node-link graph as JSON

use collabnet::{GroupingPolicy, Pipeline, PipelineConfig, SongRecord, YearRange};

const SETTINGS: &str = r#"
grouping:
  kind: triangle
louvain:
  resolution: 1.0
annotation:
  base_size: 5.0
  size_scale: 2.0
"#;

fn catalogue() -> Vec<SongRecord> {
    let rows: &[(&str, &str, &str, &str)] = &[
        ("1961", "Madan Mohan", "Raja Mehdi Ali Khan", "Lata Mangeshkar"),
        ("1962", "Madan Mohan", "Raja Mehdi Ali Khan", "Lata Mangeshkar"),
        ("1964", "Madan Mohan", "Kaifi Azmi", "Lata Mangeshkar & Mohammed Rafi"),
        ("1965", "Shankar Jaikishan", "Hasrat Jaipuri", "Mohammed Rafi"),
        ("1966", "Shankar Jaikishan", "Shailendra", "Mukesh"),
        ("1967", "Shankar Jaikishan", "Hasrat Jaipuri", "Mukesh & Lata Mangeshkar"),
        ("1968", "S.D. Burman", "Neeraj", "Kishore Kumar"),
        ("1969", "S.D. Burman", "Neeraj", "Kishore Kumar"),
        ("1970.0", "R.D. Burman", "Anand Bakshi", "Kishore Kumar & Asha Bhosle"),
        ("1971", "R.D. Burman", "Anand Bakshi", "Asha Bhosle"),
        ("n/a", "Unknown", "Unknown", "Unknown"),
    ];

    rows.iter()
        .map(|&(year, composer, lyricist, singer)| {
            SongRecord::from_fields(year, Some(composer), Some(lyricist), Some(singer))
        })
        .collect()
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    println!("=== Collabnet Demo ===\n");

    // 1. Configure the pipeline
    let config = PipelineConfig::from_yaml_str(SETTINGS)?;
    let pipeline = Pipeline::new(config.clone())?;
    println!("1. Pipeline configured ({:?} grouping)\n", pipeline.builder().policy());

    // 2. Full catalogue
    let records = catalogue();
    let range = YearRange::spanning(&records).unwrap_or(YearRange::new(1960, 1980));
    println!("2. Catalogue spans {}..={}", range.min, range.max);

    let output = pipeline.run(range.select(&records))?;
    println!(
        "   {} people, {} edges, {} communities, modularity {:.3}",
        output.graph.nodes.len(),
        output.graph.edges.len(),
        output.community_count(),
        output.modularity()
    );
    println!(
        "   {} of {} records skipped as malformed\n",
        output.report.records_skipped, output.report.records_seen
    );

    // 3. Community ranking
    println!("3. Communities by size");
    for entry in pipeline.annotator().rank_communities(&output.partition) {
        let members: Vec<&str> = output
            .graph
            .nodes
            .iter()
            .filter(|n| n.community == entry.community)
            .map(|n| n.id.as_str())
            .collect();
        println!("   #{} {} {:?}", entry.rank, entry.color, members);
    }
    println!();

    // 4. A narrower view with a different grouping policy
    let singers_only = Pipeline::new(config.with_grouping(GroupingPolicy::CoSingers))?;
    let sixties = singers_only.run(YearRange::new(1960, 1969).select(&records))?;
    println!("4. Co-singers in the 1960s");
    for edge in &sixties.graph.edges {
        println!("   {} - {} ({})", edge.source, edge.target, edge.weight);
    }
    println!();

    // 5. Export
    println!("5. Node-link export");
    println!("{}", output.graph.to_json_pretty()?);

    Ok(())
}
