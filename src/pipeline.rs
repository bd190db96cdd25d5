//! End-to-end pipeline: build, detect, annotate, export
//!
//! A [`Pipeline`] holds only validated, immutable stage settings. Every call
//! to [`Pipeline::run`] recomputes everything from the records it is given,
//! so one instance can serve any number of year-range views.

use crate::algo::{CommunityDetector, Partition};
use crate::annotate::Annotator;
use crate::builder::{BuildReport, GraphBuilder};
use crate::config::PipelineConfig;
use crate::error::{CollabResult, ConfigResult};
use crate::export::{export, NodeLinkGraph};
use crate::record::SongRecord;
use serde::Serialize;
use tracing::{debug, info};

/// Everything one run produces
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineOutput {
    /// Renderer-ready node-link structure
    pub graph: NodeLinkGraph,
    /// Builder counters, including skipped malformed records
    pub report: BuildReport,
    pub partition: Partition,
}

impl PipelineOutput {
    /// Number of communities with at least one member
    pub fn community_count(&self) -> usize {
        self.partition
            .community_sizes()
            .iter()
            .filter(|&&members| members > 0)
            .count()
    }

    pub fn modularity(&self) -> f64 {
        self.partition.modularity()
    }
}

/// The four stages wired together
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pipeline {
    builder: GraphBuilder,
    detector: CommunityDetector,
    annotator: Annotator,
}

impl Pipeline {
    /// Validate `config` and construct every stage
    pub fn new(config: PipelineConfig) -> ConfigResult<Self> {
        let PipelineConfig {
            grouping,
            louvain,
            annotation,
        } = config;

        let pipeline = Self {
            builder: GraphBuilder::new(grouping)?,
            detector: CommunityDetector::new(louvain)?,
            annotator: Annotator::new(annotation)?,
        };
        debug!("Pipeline configured with grouping policy {:?}", pipeline.builder.policy());
        Ok(pipeline)
    }

    pub fn builder(&self) -> &GraphBuilder {
        &self.builder
    }

    pub fn detector(&self) -> &CommunityDetector {
        &self.detector
    }

    pub fn annotator(&self) -> &Annotator {
        &self.annotator
    }

    /// Run all stages over `records`.
    ///
    /// The caller picks the records (e.g. with
    /// [`YearRange::select`](crate::record::YearRange::select)); no filtering
    /// happens here.
    pub fn run<'a, I>(&self, records: I) -> CollabResult<PipelineOutput>
    where
        I: IntoIterator<Item = &'a SongRecord>,
    {
        let built = self.builder.build(records);
        let partition = self.detector.detect(&built.graph);
        let annotated = self.annotator.annotate(&built.graph, &partition)?;
        let graph = export(&annotated);

        info!(
            "Collaboration graph: {} people, {} edges, {} communities (modularity {:.4}), {} of {} records skipped",
            graph.nodes.len(),
            graph.edges.len(),
            partition.community_count(),
            partition.modularity(),
            built.report.records_skipped,
            built.report.records_seen
        );

        Ok(PipelineOutput {
            graph,
            report: built.report,
            partition,
        })
    }

    /// Run and serialize the node-link structure as JSON
    pub fn run_to_json<'a, I>(&self, records: I) -> CollabResult<String>
    where
        I: IntoIterator<Item = &'a SongRecord>,
    {
        let output = self.run(records)?;
        Ok(output.graph.to_json()?)
    }
}
