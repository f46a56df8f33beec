//! JSON rendering of a finalized [`Results`] snapshot.

use serde::Serialize;

use crate::aggregator::Results;
use crate::error::Result;
use crate::tables::{CONTINENTS, COUNTRIES, METHODS, PROTOCOLS};

#[derive(Debug, Serialize)]
struct Report<'a> {
    date: &'a str,
    generator: &'static str,
    version: &'static str,
    file_name: &'a str,
    file_size: Option<u64>,
    processed_lines: u64,
    invalid_lines: u64,
    bandwidth: u128,
    runtime: f64,
    hits: Split,
    visits: Split,
    continents: Vec<Bucket<Named<'a>>>,
    countries: Vec<Bucket<Named<'a>>>,
    hours: Vec<Bucket<usize>>,
    methods: Vec<Bucket<&'a str>>,
    protocols: Vec<Bucket<&'a str>>,
    status: Vec<Bucket<usize>>,
}

#[derive(Debug, Serialize)]
struct Split {
    ipv4: u64,
    ipv6: u64,
    total: u64,
}

#[derive(Debug, Serialize)]
struct Named<'a> {
    code: &'a str,
    name: &'a str,
}

#[derive(Debug, Serialize)]
struct Bucket<T> {
    data: T,
    hits: u64,
}

/// Non-empty buckets of `counts`, labelled by `label`.
fn buckets<T>(counts: &[u64], label: impl Fn(usize) -> T) -> Vec<Bucket<T>> {
    counts
        .iter()
        .enumerate()
        .filter(|&(_, &hits)| hits > 0)
        .map(|(idx, &hits)| Bucket {
            data: label(idx),
            hits,
        })
        .collect()
}

/// Render `results` as JSON, pretty-printed unless `compact` is set.
pub fn render(results: &Results, compact: bool) -> Result<String> {
    let h = &results.histograms;
    let report = Report {
        date: &results.generated,
        generator: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        file_name: &results.file.name,
        file_size: results.file.size,
        processed_lines: results.processed_lines,
        invalid_lines: results.invalid_lines,
        bandwidth: results.bandwidth,
        runtime: results.runtime,
        hits: Split {
            ipv4: results.hits_ipv4,
            ipv6: results.hits_ipv6,
            total: results.hits,
        },
        visits: Split {
            ipv4: results.visits_ipv4,
            ipv6: results.visits_ipv6,
            total: results.visits,
        },
        continents: buckets(&h.continents, |idx| Named {
            code: CONTINENTS[idx].0,
            name: CONTINENTS[idx].1,
        }),
        countries: buckets(&h.countries, |idx| Named {
            code: COUNTRIES[idx].code,
            name: COUNTRIES[idx].name,
        }),
        // every hour is listed so the distribution can be plotted as is
        hours: h
            .hours
            .iter()
            .enumerate()
            .map(|(hour, &hits)| Bucket { data: hour, hits })
            .collect(),
        methods: buckets(&h.methods, |idx| METHODS[idx]),
        protocols: buckets(&h.protocols, |idx| PROTOCOLS[idx]),
        status: buckets(&h.status, |code| code),
    };

    let rendered = if compact {
        serde_json::to_string(&report)?
    } else {
        serde_json::to_string_pretty(&report)?
    };
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::{Aggregator, FileInfo};
    use crate::geo::NoGeoLocator;
    use crate::pipeline::process_line;
    use serde_json::{json, Value};

    fn results(lines: &[&[u8]]) -> Results {
        let mut aggregator = Aggregator::new();
        for line in lines {
            process_line(&mut aggregator, line, &NoGeoLocator);
        }
        aggregator.finalize(
            FileInfo {
                name: "access.log".to_string(),
                size: Some(128),
            },
            0.5,
            "2023-10-10 13:55:36".to_string(),
        )
    }

    #[test]
    fn test_render() {
        let results = results(&[
            b"192.0.2.1 - - [10/Oct/2023:13:55:36 -0700] \"GET / HTTP/1.1\" 200 1024",
            b"2001:db8::1 - - [10/Oct/2023:13:56:00 -0700] \"POST /f HTTP/1.0\" 404 12",
            b"bogus",
        ]);
        let report: Value = serde_json::from_str(&render(&results, false).unwrap()).unwrap();

        assert_eq!(report["date"], "2023-10-10 13:55:36");
        assert_eq!(report["generator"], "logswan");
        assert_eq!(report["file_name"], "access.log");
        assert_eq!(report["file_size"], 128);
        assert_eq!(report["processed_lines"], 3);
        assert_eq!(report["invalid_lines"], 1);
        assert_eq!(report["bandwidth"], 1036);
        assert_eq!(report["hits"], json!({"ipv4": 1, "ipv6": 1, "total": 2}));
        assert_eq!(report["visits"], json!({"ipv4": 1, "ipv6": 1, "total": 2}));
        assert_eq!(report["hours"].as_array().unwrap().len(), 24);
        assert_eq!(report["hours"][13], json!({"data": 13, "hits": 2}));
        assert_eq!(
            report["methods"],
            json!([{"data": "GET", "hits": 1}, {"data": "POST", "hits": 1}])
        );
        assert_eq!(
            report["protocols"],
            json!([{"data": "HTTP/1.0", "hits": 1}, {"data": "HTTP/1.1", "hits": 1}])
        );
        assert_eq!(
            report["status"],
            json!([{"data": 200, "hits": 1}, {"data": 404, "hits": 1}])
        );
        assert_eq!(report["countries"], json!([]));
        assert_eq!(report["continents"], json!([]));
    }

    #[test]
    fn test_render_compact_stdin() {
        let mut results = results(&[]);
        results.file = FileInfo {
            name: "-".to_string(),
            size: None,
        };
        let rendered = render(&results, true).unwrap();
        assert!(!rendered.contains('\n'));
        assert!(rendered.contains("\"file_size\":null"));
    }
}
