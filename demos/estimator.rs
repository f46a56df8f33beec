use std::net::IpAddr;

use logswan::CardinalityEstimator;

fn main() {
    let morning: [IpAddr; 4] = [
        "192.0.2.1".parse().unwrap(),
        "192.0.2.2".parse().unwrap(),
        "192.0.2.1".parse().unwrap(),
        "2001:db8::1".parse().unwrap(),
    ];
    let evening: [IpAddr; 3] = [
        "192.0.2.2".parse().unwrap(),
        "198.51.100.7".parse().unwrap(),
        "2001:db8::1".parse().unwrap(),
    ];

    let mut estimator1 = CardinalityEstimator::<14>::new();
    for addr in &morning {
        estimator1.insert(addr);
    }
    println!("morning visitors = {}", estimator1.estimate());

    let mut estimator2 = CardinalityEstimator::<14>::new();
    for addr in &evening {
        estimator2.insert(addr);
    }
    println!("evening visitors = {}", estimator2.estimate());

    estimator1.merge(&estimator2);
    println!("daily visitors = {}", estimator1.estimate());
}
