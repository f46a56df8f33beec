#![no_main]

use libfuzzer_sys::fuzz_target;
use logswan::aggregator::Aggregator;
use logswan::geo::NoGeoLocator;
use logswan::pipeline::process_line;
use logswan::record::LogRecord;

fuzz_target!(|data: &[u8]| {
    let record = LogRecord::parse(data);
    for field in [
        record.remote_host,
        record.identity,
        record.user,
        record.date,
        record.request,
        record.status_code,
        record.object_size,
        record.referer,
        record.user_agent,
    ]
    .into_iter()
    .flatten()
    {
        assert!(!field.is_empty());
        assert!(field.len() <= data.len());
    }

    let mut aggregator = Aggregator::new();
    process_line(&mut aggregator, data, &NoGeoLocator);
    assert_eq!(aggregator.lines(), 1);
});
