use pathkit_core::{
    EdgeGraph, Euclidean, Graph, GraphError, HeuristicKind, Manhattan, Node, NodeKey, Position, Zero,
};
use pathkit_nav::{
    GraphBuilder, GraphPath, GraphSpec, GridGraph2, GridGraph3, Pathfinder, SearchTrace, TollGraph,
    TraversableGraph,
};

fn key(x: i64, y: i64) -> NodeKey {
    Position::xy(x as f64, y as f64).into()
}

fn cells(path: &GraphPath) -> Vec<(i64, i64)> {
    path.positions()
        .iter()
        .map(|p| (p.coords()[0] as i64, p.coords()[1] as i64))
        .collect()
}

fn blocked_grid(blocked: &[(i64, i64)]) -> TraversableGraph<GridGraph2> {
    let mut graph = TraversableGraph::new(GridGraph2::new(5, 5).expect("valid grid"));
    let found = graph.block_all(blocked.iter().map(|&(x, y)| key(x, y)));
    assert_eq!(found, blocked.len());
    graph
}

fn key3(x: i64, y: i64, z: i64) -> NodeKey {
    Position::xyz(x as f64, y as f64, z as f64).into()
}

fn node<G: Graph>(graph: &G, x: i64, y: i64) -> Node {
    *graph.node_at(key(x, y)).expect("cell in bounds")
}

fn corner_to_corner(graph: &TraversableGraph<GridGraph2>) -> GraphPath {
    let start = node(graph, 0, 0);
    let goal = node(graph, 4, 4);
    Pathfinder::new(graph, Euclidean).find_path(&start, &goal)
}

#[test]
fn open_grid_path_is_deterministic() {
    let graph = blocked_grid(&[]);
    let path = corner_to_corner(&graph);

    assert_eq!(
        cells(&path),
        vec![
            (0, 0),
            (1, 0),
            (1, 1),
            (1, 2),
            (2, 2),
            (3, 2),
            (3, 3),
            (3, 4),
            (4, 4)
        ]
    );
    assert_eq!(path.cost, 8.0);
}

#[test]
fn path_routes_around_wall() {
    let graph = blocked_grid(&[(1, 3), (2, 3), (3, 1), (3, 2), (3, 3)]);
    let path = corner_to_corner(&graph);

    assert_eq!(
        cells(&path),
        vec![
            (0, 0),
            (1, 0),
            (2, 0),
            (3, 0),
            (4, 0),
            (4, 1),
            (4, 2),
            (4, 3),
            (4, 4)
        ]
    );
}

#[test]
fn path_threads_scattered_obstacles() {
    let graph = blocked_grid(&[(0, 1), (0, 3), (2, 0), (2, 2), (2, 4), (4, 2), (4, 1)]);
    let path = corner_to_corner(&graph);

    assert_eq!(
        cells(&path),
        vec![
            (0, 0),
            (1, 0),
            (1, 1),
            (2, 1),
            (3, 1),
            (3, 2),
            (3, 3),
            (3, 4),
            (4, 4)
        ]
    );
}

#[test]
fn enclosed_start_yields_empty_path() {
    let graph = blocked_grid(&[(0, 1), (1, 0), (1, 1)]);
    let path = corner_to_corner(&graph);

    assert!(path.is_empty());
    assert_eq!(path.cost, 0.0);
}

#[test]
fn start_equal_to_goal_is_single_node() {
    let graph = GridGraph2::new(5, 5).expect("valid grid");
    let here = node(&graph, 2, 3);

    let path = Pathfinder::new(&graph, Euclidean).find_path(&here, &here);
    assert_eq!(cells(&path), vec![(2, 3)]);
    assert_eq!(path.cost, 0.0);
}

#[test]
fn search_may_start_on_blocked_cell() {
    let graph = blocked_grid(&[(0, 0)]);
    let start = node(&graph, 0, 0);
    assert!(!graph.is_traversable(&start));

    let path = corner_to_corner(&graph);
    assert_eq!(path.len(), 9);
    assert_eq!(path.start(), Some(&start));
}

#[test]
fn blocked_goal_is_unreachable() {
    let graph = blocked_grid(&[(4, 4)]);
    assert!(corner_to_corner(&graph).is_empty());
}

#[test]
fn repeated_searches_give_identical_paths() {
    let graph = blocked_grid(&[(1, 3), (2, 3), (3, 1), (3, 2), (3, 3)]);
    let start = node(&graph, 0, 0);
    let goal = node(&graph, 4, 4);

    let mut finder = Pathfinder::new(&graph, Euclidean);
    let first = finder.find_path(&start, &goal);
    let expanded = finder.expanded();
    let second = finder.find_path(&start, &goal);

    assert_eq!(first, second);
    assert_eq!(finder.expanded(), expanded);
}

#[test]
fn toggling_traversability_between_searches() {
    let graph = blocked_grid(&[]);
    let start = node(&graph, 0, 0);
    let goal = node(&graph, 4, 0);

    let mut finder = Pathfinder::new(graph, Euclidean);
    assert_eq!(finder.find_path(&start, &goal).len(), 5);

    let wall = [(2, 0), (2, 1), (2, 2), (2, 3)];
    for (x, y) in wall {
        let cell = node(finder.graph(), x, y);
        finder
            .graph_mut()
            .set_traversable(&cell, false)
            .expect("cell is part of the grid");
    }
    let detour = finder.find_path(&start, &goal);
    assert_eq!(detour.edge_count(), 12);
    assert!(cells(&detour).contains(&(2, 4)));

    let gap = node(finder.graph(), 2, 1);
    finder
        .graph_mut()
        .set_traversable(&gap, true)
        .expect("cell is part of the grid");
    assert_eq!(finder.find_path(&start, &goal).edge_count(), 6);
}

#[test]
fn decorated_view_reflects_flags() {
    let mut graph = blocked_grid(&[]);
    let cell = node(&graph, 1, 0);
    graph.set_traversable(&cell, false).expect("known cell");

    let view = graph.decorated(&cell).expect("known cell");
    assert!(!view.is_traversable());
    assert_eq!(*view.inner(), &cell);
    assert_eq!(graph.blocked_count(), 1);

    let foreign = *GridGraph2::new(9, 9)
        .expect("valid grid")
        .cell(8, 8)
        .expect("cell");
    assert_eq!(
        graph.set_traversable(&foreign, false),
        Err(GraphError::UnknownNode { key: key(8, 8) })
    );
    assert!(!graph.is_traversable(&foreign));
}

#[test]
fn nodes_from_equivalent_graph_are_accepted() {
    let graph = GridGraph2::new(5, 5).expect("valid grid");
    let twin = GridGraph2::new(5, 5).expect("valid grid");

    let path = Pathfinder::new(&graph, Euclidean)
        .find_path(&node(&twin, 0, 0), &node(&twin, 4, 4));
    assert_eq!(path.len(), 9);
}

#[test]
fn foreign_endpoint_yields_empty_path() {
    let graph = GridGraph2::new(5, 5).expect("valid grid");
    let larger = GridGraph2::new(9, 9).expect("valid grid");

    let mut finder = Pathfinder::new(&graph, Euclidean);
    let outside = node(&larger, 7, 7);
    assert!(finder.find_path(&node(&graph, 0, 0), &outside).is_empty());
    assert!(finder.find_path(&outside, &node(&graph, 0, 0)).is_empty());
    assert_eq!(finder.expanded(), 0);
}

#[test]
fn heuristics_agree_on_optimal_cost() {
    let graph = blocked_grid(&[(0, 1), (0, 3), (2, 0), (2, 2), (2, 4), (4, 2), (4, 1)]);
    let start = node(&graph, 0, 0);
    let goal = node(&graph, 4, 4);

    let euclidean = Pathfinder::new(&graph, Euclidean).find_path(&start, &goal);
    let manhattan = Pathfinder::new(&graph, Manhattan).find_path(&start, &goal);
    let mut dijkstra = Pathfinder::new(&graph, Zero);
    let zero = dijkstra.find_path(&start, &goal);
    let by_kind = Pathfinder::new(&graph, HeuristicKind::Manhattan).find_path(&start, &goal);

    assert_eq!(euclidean.cost, 8.0);
    assert_eq!(manhattan.cost, 8.0);
    assert_eq!(zero.cost, 8.0);
    assert_eq!(by_kind, manhattan);
    assert!(dijkstra.expanded() >= zero.len());
}

#[test]
fn closure_heuristic_is_accepted() {
    let graph = GridGraph2::new(4, 4).expect("valid grid");
    let start = node(&graph, 0, 0);
    let goal = node(&graph, 3, 3);

    let scaled = |a: &Node, b: &Node| 0.5 * a.point().distance(b.point());
    let path = Pathfinder::new(&graph, scaled).find_path(&start, &goal);
    assert_eq!(path.cost, 6.0);
}

#[test]
fn improved_route_replaces_queued_estimate() {
    let mut tolls = TollGraph::new(GridGraph2::new(3, 3).expect("valid grid"));
    let start = node(&tolls, 0, 0);
    let goal = node(&tolls, 0, 1);
    tolls.set_toll(&start, &goal, 5.0).expect("valid toll");

    let mut finder = Pathfinder::new(&tolls, Zero);
    let path = finder.find_path(&start, &goal);

    assert_eq!(cells(&path), vec![(0, 0), (1, 0), (1, 1), (0, 1)]);
    assert_eq!(path.cost, 3.0);
    let record = finder.record(&goal).expect("goal was discovered");
    assert_eq!(record.g, 3.0);
    assert_eq!(record.parent, Some(node(&tolls, 1, 1).id()));
}

#[test]
fn tolls_scale_costs_and_reject_discounts() {
    let mut tolls = TollGraph::new(GridGraph2::new(3, 2).expect("valid grid"));
    let a = node(&tolls, 0, 0);
    let b = node(&tolls, 1, 0);
    let goal = node(&tolls, 2, 0);

    assert_eq!(tolls.set_toll(&a, &b, 0.5), Err(GraphError::InvalidToll { value: 0.5 }));
    assert!(tolls.set_toll(&a, &b, f64::NAN).is_err());
    tolls.set_toll(&b, &a, 10.0).expect("valid toll");

    assert_eq!(tolls.toll(&a, &b).multiplier, 10.0);
    assert_eq!(tolls.cost(&a, &b), 10.0);
    assert_eq!(tolls.cost(&b, &a), 10.0);
    assert_eq!(tolls.toll_count(), 1);

    let edges = tolls.tolled_edges(&a);
    let tolled = edges
        .iter()
        .find(|e| e.destination == b.id())
        .expect("edge to b");
    assert_eq!(tolled.cost(), 10.0);

    let path = Pathfinder::new(&tolls, Euclidean).find_path(&a, &goal);
    assert_eq!(path.cost, 4.0);
    assert_eq!(path.edge_count(), 4);

    assert!(tolls.clear_toll(&a, &b));
    assert!(!tolls.clear_toll(&a, &b));
    assert_eq!(Pathfinder::new(&tolls, Euclidean).find_path(&a, &goal).cost, 2.0);
}

#[test]
fn observers_see_expansions_and_one_finish() {
    let graph = blocked_grid(&[(1, 3), (2, 3), (3, 1), (3, 2), (3, 3)]);
    let start = node(&graph, 0, 0);
    let goal = node(&graph, 4, 4);

    let trace = SearchTrace::shared();
    let mut finder = Pathfinder::new(&graph, Euclidean);
    finder.register_observer(trace.clone());
    let path = finder.find_path(&start, &goal);

    let trace = trace.borrow();
    assert_eq!(trace.visited.first(), Some(&start));
    assert_eq!(trace.visited.last(), Some(&goal));
    assert_eq!(trace.visited.len(), finder.expanded());
    assert_eq!(trace.records[0].g, 0.0);
    assert_eq!(trace.records.last().map(|r| r.g), Some(8.0));
    assert_eq!(trace.finished.len(), 1);
    assert_eq!(trace.last_path(), Some(&path));
}

#[test]
fn unregistered_observer_stops_receiving_events() {
    let graph = GridGraph2::new(3, 3).expect("valid grid");
    let start = node(&graph, 0, 0);
    let goal = node(&graph, 2, 2);

    let kept = SearchTrace::shared();
    let dropped = SearchTrace::shared();
    let mut finder = Pathfinder::new(&graph, Euclidean);
    finder.register_observer(kept.clone());
    let id = finder.register_observer(dropped.clone());
    assert_eq!(finder.observer_count(), 2);

    assert!(finder.unregister_observer(id));
    assert!(!finder.unregister_observer(id));
    finder.find_path(&start, &goal);

    assert_eq!(kept.borrow().finished.len(), 1);
    assert!(dropped.borrow().visited.is_empty());
    assert!(dropped.borrow().finished.is_empty());
}

#[test]
fn failed_search_reports_empty_path_to_observers() {
    let graph = blocked_grid(&[(0, 1), (1, 0), (1, 1)]);
    let trace = SearchTrace::shared();
    let mut finder = Pathfinder::new(&graph, Euclidean);
    finder.register_observer(trace.clone());

    finder.find_path(&node(&graph, 0, 0), &node(&graph, 4, 4));

    let trace = trace.borrow();
    assert_eq!(trace.visited.len(), 1);
    assert_eq!(trace.finished, vec![GraphPath::default()]);
}

#[test]
fn stepping_matches_find_path() {
    let graph = blocked_grid(&[(1, 3), (2, 3), (3, 1), (3, 2), (3, 3)]);
    let start = node(&graph, 0, 0);
    let goal = node(&graph, 4, 4);

    let mut finder = Pathfinder::new(&graph, Euclidean);
    let expected = finder.find_path(&start, &goal);

    let trace = SearchTrace::shared();
    finder.register_observer(trace.clone());
    let mut search = finder.search(&start, &goal);
    assert_eq!(search.step(), Some(start));
    assert_eq!(search.frontier_len(), 2);
    assert!(!search.is_finished());

    let rest: Vec<Node> = search.by_ref().collect();
    assert_eq!(rest.last(), Some(&goal));
    assert!(search.is_finished());
    assert_eq!(search.outcome(), Some(&expected));
    assert_eq!(search.step(), None);

    assert_eq!(trace.borrow().visited.len(), rest.len() + 1);
    assert_eq!(trace.borrow().finished.len(), 1);
}

#[test]
fn abandoned_search_never_finishes() {
    let graph = GridGraph2::new(5, 5).expect("valid grid");
    let trace = SearchTrace::shared();
    let mut finder = Pathfinder::new(&graph, Euclidean);
    finder.register_observer(trace.clone());

    {
        let mut search = finder.search(&node(&graph, 0, 0), &node(&graph, 4, 4));
        search.step();
        search.step();
    }

    assert_eq!(trace.borrow().visited.len(), 2);
    assert!(trace.borrow().finished.is_empty());
}

#[test]
fn grid3_path_length_is_manhattan_distance() {
    let grid = GridGraph3::new(4, 4, 4).expect("valid grid");
    let start = *grid.cell(0, 0, 0).expect("start");
    let goal = *grid.cell(3, 3, 3).expect("goal");

    let path = Pathfinder::new(&grid, Euclidean).find_path(&start, &goal);
    assert_eq!(path.len(), 10);
    assert_eq!(path.edge_count(), 9);
    assert_eq!(path.cost, 9.0);
    assert_eq!(path.start(), Some(&start));
    assert_eq!(path.goal(), Some(&goal));
    for pair in path.nodes.windows(2) {
        assert_eq!(pair[0].point().manhattan(pair[1].point()), 1.0);
    }
}

#[test]
fn grid3_built_from_graph_spec_is_searchable() {
    let spec = GraphSpec::Grid3 {
        width: 4,
        height: 4,
        depth: 4,
    };
    let graph = GraphBuilder::new().build(&spec).expect("valid spec");
    assert_eq!(graph.kind(), "grid3");

    let start = *graph.node_at(key3(0, 0, 0)).expect("start");
    let goal = *graph.node_at(key3(3, 3, 3)).expect("goal");
    let path = Pathfinder::new(&graph, Manhattan).find_path(&start, &goal);
    assert_eq!(path.edge_count(), 9);
    assert_eq!(path.cost, 9.0);
}

#[test]
fn blocked_plane_separates_grid3_layers() {
    let mut graph = TraversableGraph::new(GridGraph3::new(3, 3, 3).expect("valid grid"));
    let plane = (0..3).flat_map(|x| (0..3).map(move |y| key3(x, y, 1)));
    assert_eq!(graph.block_all(plane), 9);

    let start = *graph.node_at(key3(0, 0, 0)).expect("start");
    let goal = *graph.node_at(key3(2, 2, 2)).expect("goal");
    assert!(Pathfinder::new(&graph, Euclidean).find_path(&start, &goal).is_empty());

    let same_layer = *graph.node_at(key3(2, 2, 0)).expect("same layer");
    assert_eq!(
        Pathfinder::new(&graph, Euclidean)
            .find_path(&start, &same_layer)
            .edge_count(),
        4
    );
}

#[test]
fn blocked_nodes_drop_out_of_edge_count() {
    let mut line = TraversableGraph::new(GridGraph2::new(3, 1).expect("valid grid"));
    line.block_all([key(1, 0)]);
    let middle = node(&line, 1, 0);

    assert!(line.edges(&middle).is_empty());
    assert!(line.edges(&node(&line, 0, 0)).is_empty());
    assert_eq!(line.edge_count(), 0);
    // Searches still leave a blocked start through its neighbors.
    assert_eq!(line.neighbors(&middle).len(), 2);

    let mut square = TraversableGraph::new(GridGraph2::new(3, 3).expect("valid grid"));
    assert_eq!(square.edge_count(), 12);
    square.block_all([key(1, 1)]);
    assert_eq!(square.edge_count(), 8);
}

#[test]
fn tolls_apply_to_nodes_from_equivalent_graphs() {
    let mut tolls = TollGraph::new(GridGraph2::new(3, 2).expect("valid grid"));
    let a = node(&tolls, 0, 0);
    let b = node(&tolls, 0, 1);
    tolls.set_toll(&a, &b, 10.0).expect("valid toll");

    // Same cells, different arena ids: (0, 1) is id 3 here and id 5 on the wider grid.
    let wide = GridGraph2::new(5, 5).expect("valid grid");
    let (wa, wb) = (node(&wide, 0, 0), node(&wide, 0, 1));
    assert_ne!(wb.id(), b.id());

    assert_eq!(tolls.cost(&wa, &wb), 10.0);
    assert_eq!(tolls.cost(&node(&wide, 2, 0), &node(&wide, 2, 1)), 1.0);
}
