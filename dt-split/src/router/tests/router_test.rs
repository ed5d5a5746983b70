use dt_core::graph::{
    DiGraphNetwork,
    GraphError,
    OverlayGraph,
    Vertex,
    VertexId,
};
use dt_core::testutils::*;
use rstest::*;
use tracing_test::traced_test;

use super::*;
use crate::{
    AllocationConfig,
    AllocationError,
    MockPathSearch,
    Path,
};

/// Stand-in for a real search: weighs each of `routes` through `network`, drops the ones the
/// closures cut, and returns the cheapest `k`.
fn cheapest_open_routes(network: &dyn NetworkView, routes: &[&[VertexId]], k: usize) -> Vec<Path> {
    let mut paths: Vec<_> = routes
        .iter()
        .map(|ids| Path::from_network(network, ids))
        .filter(|p| p.weight().is_finite())
        .collect();
    paths.sort_by(|a, b| a.weight().total_cmp(&b.weight()));
    paths.truncate(k);
    paths
}

#[fixture]
fn engine() -> AllocationEngine {
    AllocationEngine::new(AllocationConfig::default()).unwrap()
}

#[fixture]
fn triangle_search() -> MockPathSearch {
    let mut search = MockPathSearch::new();
    search
        .expect_k_shortest_paths()
        .withf(|_, source, sink, _| *source == 1 && *sink == 3)
        .returning(|network, _, _, k| Ok(cheapest_open_routes(network, &[&[1, 2, 3], &[1, 3]], k)));
    search
}

fn counts(records: &[AllocationRecord]) -> Vec<(String, u64)> {
    records.iter().map(|r| (r.to_string(), r.allocated_count)).collect()
}

#[rstest]
fn test_route_around_closed_edge(
    triangle_network: DiGraphNetwork,
    triangle_search: MockPathSearch,
    engine: AllocationEngine,
) {
    let mut overlay = OverlayGraph::new(&triangle_network);
    overlay.remove_edge((1, 3));
    let router = Router::new(&overlay, &triangle_search, engine);

    let records = router.route(&DemandRecord::new(1, 3, 100)).unwrap();

    assert_eq!(
        records,
        vec![AllocationRecord { path: vec![Vertex(1), Vertex(2), Vertex(3)], allocated_count: 100 }]
    );
}

#[rstest]
fn test_route_splits_across_open_routes(
    triangle_network: DiGraphNetwork,
    triangle_search: MockPathSearch,
    engine: AllocationEngine,
) {
    let overlay = OverlayGraph::new(&triangle_network);
    let router = Router::new(&overlay, &triangle_search, engine);

    let records = router.route(&DemandRecord::new(1, 3, 100)).unwrap();

    assert_eq!(counts(&records), vec![("1-2-3,50".into(), 50), ("1-3,49".into(), 49)]);
}

#[rstest]
fn test_scenarios_switch_between_batches(triangle_network: DiGraphNetwork, triangle_search: MockPathSearch) {
    let demand = DemandRecord::new(1, 3, 100);
    let mut overlay = OverlayGraph::new(&triangle_network);

    let open = Router::new(&overlay, &triangle_search, engine()).route(&demand).unwrap();
    assert_eq!(open.len(), 2);

    overlay.remove_vertex(2);
    let closed = Router::new(&overlay, &triangle_search, engine()).route(&demand).unwrap();
    assert_eq!(counts(&closed), vec![("1-3,100".into(), 100)]);

    overlay.restore_all_vertices();
    let reopened = Router::new(&overlay, &triangle_search, engine()).route(&demand).unwrap();
    assert_eq!(reopened, open);
}

#[rstest]
fn test_no_route_is_not_an_error(
    triangle_network: DiGraphNetwork,
    triangle_search: MockPathSearch,
    engine: AllocationEngine,
) {
    let mut overlay = OverlayGraph::new(&triangle_network);
    overlay.remove_vertex(3);
    let router = Router::new(&overlay, &triangle_search, engine);

    assert!(router.route(&DemandRecord::new(1, 3, 100)).unwrap().is_empty());
}

#[rstest]
fn test_search_errors_propagate(triangle_network: DiGraphNetwork, engine: AllocationEngine) {
    let mut search = MockPathSearch::new();
    search.expect_k_shortest_paths().returning(|_, source, _, _| Err(GraphError::unknown_vertex(source)));
    let overlay = OverlayGraph::new(&triangle_network);
    let router = Router::new(&overlay, &search, engine);

    let err = router.route(&DemandRecord::new(42, 3, 10)).unwrap_err();

    assert!(matches!(err.downcast_ref::<GraphError>(), Some(GraphError::UnknownVertex(42))));
}

#[rstest]
fn test_zero_demand_skips_search(triangle_network: DiGraphNetwork, engine: AllocationEngine) {
    let mut search = MockPathSearch::new();
    search.expect_k_shortest_paths().never();
    let overlay = OverlayGraph::new(&triangle_network);
    let router = Router::new(&overlay, &search, engine);

    assert!(router.route(&DemandRecord::new(1, 3, 0)).unwrap().is_empty());
}

#[rstest]
fn test_negative_demand_rejected_before_search(triangle_network: DiGraphNetwork, engine: AllocationEngine) {
    let mut search = MockPathSearch::new();
    search.expect_k_shortest_paths().never();
    let overlay = OverlayGraph::new(&triangle_network);
    let router = Router::new(&overlay, &search, engine);

    let err = router.route(&DemandRecord::new(1, 3, -10)).unwrap_err();

    assert!(matches!(err.downcast_ref::<AllocationError>(), Some(AllocationError::InvalidDemand(_))));
}

#[rstest]
fn test_k_is_forwarded(triangle_network: DiGraphNetwork) {
    let mut search = MockPathSearch::new();
    search
        .expect_k_shortest_paths()
        .withf(|_, _, _, k| *k == 1)
        .times(1)
        .returning(|network, _, _, k| Ok(cheapest_open_routes(network, &[&[1, 2, 3], &[1, 3]], k)));
    let engine = AllocationEngine::new(AllocationConfig { k: 1, ..AllocationConfig::default() }).unwrap();
    let overlay = OverlayGraph::new(&triangle_network);
    let router = Router::new(&overlay, &search, engine);

    let records = router.route(&DemandRecord::new(1, 3, 40)).unwrap();

    assert_eq!(counts(&records), vec![("1-2-3,40".into(), 40)]);
    assert_eq!(router.engine().config().k, 1);
}

#[rstest]
#[traced_test]
fn test_route_all_keeps_input_order(
    triangle_network: DiGraphNetwork,
    triangle_search: MockPathSearch,
    engine: AllocationEngine,
) {
    let overlay = OverlayGraph::new(&triangle_network);
    let router = Router::new(&overlay, &triangle_search, engine);
    let demands = [DemandRecord::new(1, 3, 100), DemandRecord::new(1, 3, 0), DemandRecord::new(1, 3, 10)];

    let records = router.route_all(&demands).unwrap();

    assert_eq!(
        counts(&records),
        vec![
            ("1-2-3,50".into(), 50),
            ("1-3,49".into(), 49),
            ("1-2-3,5".into(), 5),
            ("1-3,4".into(), 4),
        ]
    );
    assert!(logs_contain("routed demand batch"));
    assert!(logs_contain("requested=110"));
    assert!(logs_contain("allocated=108"));
}

#[rstest]
fn test_route_all_stops_at_first_error(
    triangle_network: DiGraphNetwork,
    triangle_search: MockPathSearch,
    engine: AllocationEngine,
) {
    let overlay = OverlayGraph::new(&triangle_network);
    let router = Router::new(&overlay, &triangle_search, engine);
    let demands = [DemandRecord::new(1, 3, 10), DemandRecord::new(1, 3, -1), DemandRecord::new(1, 3, 10)];

    assert!(router.route_all(&demands).is_err());
}

#[rstest]
fn test_route_all_par_matches_sequential(
    triangle_network: DiGraphNetwork,
    triangle_search: MockPathSearch,
    engine: AllocationEngine,
) {
    let mut overlay = OverlayGraph::new(&triangle_network);
    overlay.remove_edge((2, 3));
    let router = Router::new(&overlay, &triangle_search, engine);
    let demands: Vec<_> = (0..64).map(|i| DemandRecord::new(1, 3, i * 7)).collect();

    let sequential = router.route_all(&demands).unwrap();
    let parallel = router.route_all_par(&demands).unwrap();

    assert_eq!(parallel, sequential);
    assert!(parallel.iter().all(|r| r.path == vec![Vertex(1), Vertex(3)]));
}

#[rstest]
fn test_route_all_par_reports_errors(
    triangle_network: DiGraphNetwork,
    triangle_search: MockPathSearch,
    engine: AllocationEngine,
) {
    let overlay = OverlayGraph::new(&triangle_network);
    let router = Router::new(&overlay, &triangle_search, engine);
    let demands = [DemandRecord::new(1, 3, 10), DemandRecord::new(1, 3, -3)];

    let err = router.route_all_par(&demands).unwrap_err();

    assert!(matches!(err.downcast_ref::<AllocationError>(), Some(AllocationError::InvalidDemand(_))));
}

#[rstest]
#[traced_test]
fn test_batch_total_beyond_single_count_range(
    triangle_network: DiGraphNetwork,
    triangle_search: MockPathSearch,
    engine: AllocationEngine,
) {
    let mut overlay = OverlayGraph::new(&triangle_network);
    overlay.remove_edge((1, 2));
    let router = Router::new(&overlay, &triangle_search, engine);
    let demands = [DemandRecord::new(1, 3, i64::MAX), DemandRecord::new(1, 3, 1)];

    let sequential = router.route_all(&demands).unwrap();
    let parallel = router.route_all_par(&demands).unwrap();

    assert_eq!(
        counts(&sequential),
        vec![("1-3,9223372036854775807".into(), 9_223_372_036_854_775_807), ("1-3,1".into(), 1)]
    );
    assert_eq!(parallel, sequential);
    assert!(logs_contain("requested=9223372036854775808"));
    assert!(logs_contain("allocated=9223372036854775808"));
}
