//! Aggregation of classified lines into fixed-size histograms.
//!
//! An [`Aggregator`] is created at the start of a pass, updated once per line
//! and consumed by [`Aggregator::finalize`], which produces the [`Results`]
//! snapshot handed to the report stage.

use std::net::IpAddr;

use crate::classify::ClassifiedLine;
use crate::estimator::CardinalityEstimator;
use crate::tables::{self, CONTINENTS, COUNTRIES, HOURS, METHODS, PROTOCOLS, STATUS_CODE_MAX};

/// Precision of the unique visitor estimators: 2^14 registers, ~0.81% relative error.
pub const VISITOR_PRECISION: usize = 14;

/// Estimator of distinct remote addresses.
pub type VisitorEstimator = CardinalityEstimator<VISITOR_PRECISION>;

/// Identity of the analyzed input, passed through to the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    pub name: String,
    /// `None` when reading from a pipe or standard input.
    pub size: Option<u64>,
}

/// Histogram buckets, each indexed by position in the matching classification table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histograms {
    pub status: [u64; STATUS_CODE_MAX],
    pub methods: [u64; METHODS.len()],
    pub protocols: [u64; PROTOCOLS.len()],
    pub continents: [u64; CONTINENTS.len()],
    pub countries: [u64; COUNTRIES.len()],
    pub hours: [u64; HOURS],
}

impl Default for Histograms {
    fn default() -> Self {
        Self {
            status: [0; STATUS_CODE_MAX],
            methods: [0; METHODS.len()],
            protocols: [0; PROTOCOLS.len()],
            continents: [0; CONTINENTS.len()],
            countries: [0; COUNTRIES.len()],
            hours: [0; HOURS],
        }
    }
}

/// Running totals of one pass.
pub struct Aggregator {
    histograms: Histograms,
    hits_ipv4: u64,
    hits_ipv6: u64,
    invalid_lines: u64,
    bandwidth: u128,
    visitors_ipv4: VisitorEstimator,
    visitors_ipv6: VisitorEstimator,
}

impl Aggregator {
    pub fn new() -> Self {
        Self {
            histograms: Histograms::default(),
            hits_ipv4: 0,
            hits_ipv6: 0,
            invalid_lines: 0,
            bandwidth: 0,
            visitors_ipv4: VisitorEstimator::new(),
            visitors_ipv6: VisitorEstimator::new(),
        }
    }

    /// Fold one address-valid line. Missing classifications touch no bucket.
    pub fn update(&mut self, line: &ClassifiedLine) {
        match line.address {
            IpAddr::V4(addr) => {
                self.hits_ipv4 += 1;
                self.visitors_ipv4.insert(&addr);
            }
            IpAddr::V6(addr) => {
                self.hits_ipv6 += 1;
                self.visitors_ipv6.insert(&addr);
            }
        }

        let h = &mut self.histograms;
        increment(&mut h.countries, line.country);
        increment(
            &mut h.continents,
            line.continent.and_then(tables::continent_index),
        );
        increment(&mut h.hours, line.hour.map(usize::from));
        increment(&mut h.methods, line.method);
        increment(&mut h.protocols, line.protocol);
        increment(&mut h.status, line.status);
        if let Some(size) = line.object_size {
            self.bandwidth += u128::from(size);
        }
    }

    /// Count a line whose remote host isn't a valid address.
    pub fn record_invalid(&mut self) {
        self.invalid_lines += 1;
    }

    /// Number of lines folded so far, valid or not.
    pub fn lines(&self) -> u64 {
        self.hits_ipv4 + self.hits_ipv6 + self.invalid_lines
    }

    /// Compute derived totals and extract visitor estimates.
    ///
    /// Consumes the aggregator, so no line can be folded after the snapshot is taken.
    pub fn finalize(self, file: FileInfo, runtime: f64, generated: String) -> Results {
        let hits = self.hits_ipv4 + self.hits_ipv6;
        let visits_ipv4 = self.visitors_ipv4.estimate() as u64;
        let visits_ipv6 = self.visitors_ipv6.estimate() as u64;

        Results {
            file,
            generated,
            runtime,
            processed_lines: hits + self.invalid_lines,
            invalid_lines: self.invalid_lines,
            bandwidth: self.bandwidth,
            hits_ipv4: self.hits_ipv4,
            hits_ipv6: self.hits_ipv6,
            hits,
            visits_ipv4,
            visits_ipv6,
            visits: visits_ipv4 + visits_ipv6,
            histograms: self.histograms,
        }
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}

/// Count one hit in bucket `idx`, ignoring missing or out-of-table indices.
#[inline]
fn increment(buckets: &mut [u64], idx: Option<usize>) {
    let Some(idx) = idx else {
        return;
    };
    if let Some(bucket) = buckets.get_mut(idx) {
        *bucket += 1;
    }
}

/// Final statistics of one pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Results {
    pub file: FileInfo,
    /// Local time the report was generated, `%Y-%m-%d %H:%M:%S`.
    pub generated: String,
    /// Wall-clock seconds spent processing the input.
    pub runtime: f64,
    pub processed_lines: u64,
    pub invalid_lines: u64,
    pub bandwidth: u128,
    pub hits_ipv4: u64,
    pub hits_ipv6: u64,
    pub hits: u64,
    pub visits_ipv4: u64,
    pub visits_ipv6: u64,
    pub visits: u64,
    pub histograms: Histograms,
}
