//! End-to-end properties of the steady-state model and the capacity search.

use erlq_core::{
    find_optimal_servers, ModelError, QueueMetrics, QueueParameters, SearchRange, SearchResult,
    SloSpec,
};

fn metrics(lambda: f64, mu: f64, servers: u32) -> QueueMetrics {
    QueueMetrics::compute(&QueueParameters::new(lambda, mu, servers).unwrap()).unwrap()
}

#[test]
fn waiting_probability_is_a_probability_across_the_feasible_range() {
    for &(lambda, mu) in &[(8.0_f64, 2.0), (0.5, 1.0), (120.0, 3.0), (0.0, 4.0)] {
        let first_stable = (lambda / mu).floor() as u32 + 1;
        for servers in first_stable..first_stable + 40 {
            let m = metrics(lambda, mu, servers);
            assert!(
                (0.0..=1.0).contains(&m.waiting_probability),
                "P_wait out of [0,1] at lambda={lambda}, mu={mu}, c={servers}"
            );
            assert!(m.mean_wait_time >= 0.0);
            assert!(m.mean_response_time >= 1.0 / mu);
        }
    }
}

#[test]
fn adding_servers_never_hurts() {
    let mut prev: Option<QueueMetrics> = None;
    let mut prev_p95 = f64::INFINITY;
    for servers in 5..=60 {
        let m = metrics(8.0, 2.0, servers);
        let p95 = m.response_time_percentile(0.95).unwrap();
        if let Some(prev) = prev {
            assert!(m.mean_wait_time <= prev.mean_wait_time + 1e-12);
            assert!(m.mean_response_time <= prev.mean_response_time + 1e-12);
            assert!(m.waiting_probability <= prev.waiting_probability + 1e-12);
        }
        assert!(p95 <= prev_p95 + 1e-9);
        prev = Some(m);
        prev_p95 = p95;
    }
}

#[test]
fn infinite_capacity_limit() {
    // As c grows, Wq -> 0, W -> 1/mu, and the response percentile collapses
    // to the service-time percentile ln(1/(1-p)) / mu.
    let m = metrics(8.0, 2.0, 400);
    assert!(m.waiting_probability < 1e-12);
    assert!(m.mean_wait_time < 1e-12);
    assert!((m.mean_response_time - 0.5).abs() < 1e-9);
    let p95 = m.response_time_percentile(0.95).unwrap();
    assert!((p95 - 20.0_f64.ln() / 2.0).abs() < 1e-6);
}

#[test]
fn saturation_is_an_error_for_direct_queries() {
    for servers in 1..=4 {
        // lambda >= c * mu throughout
        let p = QueueParameters::new(8.0, 2.0, servers).unwrap();
        match QueueMetrics::compute(&p) {
            Err(ModelError::UnstableQueue { utilization, .. }) => {
                assert!(utilization >= 1.0)
            }
            other => panic!("expected UnstableQueue at c={servers}, got {other:?}"),
        }
    }
}

#[test]
fn scenario_offered_load_four() {
    // lambda=8, mu=2 (a=4). c=6 is comfortably stable; c=4 sits exactly at
    // rho=1 and must fail.
    let m = metrics(8.0, 2.0, 6);
    assert!((m.params().utilization() - 2.0 / 3.0).abs() < 1e-12);
    assert!(m.waiting_probability > 0.0 && m.waiting_probability < 1.0);
    assert!(m.mean_wait_time > 0.0);

    let at_capacity = QueueParameters::new(8.0, 2.0, 4).unwrap();
    assert!(matches!(
        QueueMetrics::compute(&at_capacity),
        Err(ModelError::UnstableQueue { .. })
    ));
}

#[test]
fn scenario_slo_search_tight_and_loose() {
    let range = SearchRange::new(1, 50).unwrap();

    // A p95 bound of 0.5 is below the service-time floor ln(20)/2 ~ 1.498,
    // so every server count misses it: infeasible, not an error.
    let tight = SloSpec::new(0.95, 0.5).unwrap();
    let result = find_optimal_servers(8.0, 2.0, &tight, &range).unwrap();
    assert!(!result.is_found());

    // A p95 bound of 2.0 is met first at c=6 (c=5 yields ~2.099).
    let loose = SloSpec::new(0.95, 2.0).unwrap();
    let result = find_optimal_servers(8.0, 2.0, &loose, &range).unwrap();
    match result {
        SearchResult::Found {
            servers,
            metrics: found,
            percentile_response_time,
        } => {
            assert_eq!(servers, 6);
            assert!(percentile_response_time <= 2.0);
            assert_eq!(found, metrics(8.0, 2.0, 6));

            // No smaller stable count satisfies the bound.
            for smaller in 5..servers {
                let t = metrics(8.0, 2.0, smaller)
                    .response_time_percentile(0.95)
                    .unwrap();
                assert!(t > 2.0, "c={smaller} should miss the bound");
            }
        }
        other => panic!("expected Found, got {other:?}"),
    }
}

#[test]
fn search_result_survives_json_round_trip() {
    let slo = SloSpec::new(0.95, 2.0).unwrap();
    let range = SearchRange::new(1, 50).unwrap();
    let result = find_optimal_servers(8.0, 2.0, &slo, &range).unwrap();
    let json = serde_json::to_string(&result).unwrap();
    let back: SearchResult = serde_json::from_str(&json).unwrap();
    assert_eq!(result, back);
}

#[test]
fn identical_inputs_give_identical_outputs() {
    let a = metrics(37.5, 4.25, 12);
    let b = metrics(37.5, 4.25, 12);
    assert_eq!(a, b);
    for p in [0.5, 0.9, 0.95, 0.99, 0.999] {
        assert_eq!(
            a.response_time_percentile(p).unwrap(),
            b.response_time_percentile(p).unwrap()
        );
    }
}
