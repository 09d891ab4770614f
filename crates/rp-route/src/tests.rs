//! Unit tests for rp-route.
//!
//! Networks are built through the rp-network click API so the routing
//! tests run against exactly the state a UI session would produce.

#[cfg(test)]
mod helpers {
    use geo::Point;

    use rp_core::NetworkConfig;
    use rp_network::RoadNetwork;

    pub fn pt(x: f64, y: f64) -> Point<f64> {
        Point::new(x, y)
    }

    pub fn click(net: &mut RoadNetwork, x: f64, y: f64) {
        net.add_point(pt(x, y)).expect("click accepted");
    }

    pub fn net() -> RoadNetwork {
        RoadNetwork::new(NetworkConfig::default()).expect("default config is valid")
    }

    /// Two collinear roads chained at (1, 1): (0,0)-(1,1) and (1,1)-(4,4).
    pub fn chain() -> RoadNetwork {
        let mut n = net();
        click(&mut n, 0.0, 0.0);
        click(&mut n, 1.0, 1.0);
        click(&mut n, 1.0, 1.0);
        click(&mut n, 4.0, 4.0);
        n
    }

    /// Crossing roads split at the crossroad (1, 1): four sub-segments.
    pub fn cross() -> RoadNetwork {
        let mut n = net();
        click(&mut n, 0.0, 1.0);
        click(&mut n, 2.0, 1.0);
        click(&mut n, 1.0, 0.0);
        click(&mut n, 1.0, 2.0);
        assert_eq!(n.road_count(), 4);
        n
    }
}

// ── Connectivity ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod connectivity {
    use super::helpers::{chain, click, cross, net, pt};
    use crate::connectivity::{connected, road_containing, RoadAdjacency};

    #[test]
    fn points_on_the_same_road_are_connected() {
        let n = chain();
        assert!(connected(n.roads(), pt(0.5, 0.5), pt(0.9, 0.9)));
    }

    #[test]
    fn chained_roads_are_connected() {
        let n = chain();
        assert!(connected(n.roads(), pt(0.0, 0.0), pt(3.0, 3.0)));
    }

    #[test]
    fn crossroad_joins_all_four_arms() {
        let n = cross();
        assert!(connected(n.roads(), pt(0.0, 1.0), pt(1.0, 2.0)));
        assert!(connected(n.roads(), pt(1.0, 0.0), pt(2.0, 1.0)));
    }

    #[test]
    fn separate_components_are_not_connected() {
        let mut n = net();
        click(&mut n, 0.0, 0.0);
        click(&mut n, 1.0, 1.0);
        click(&mut n, 10.0, 10.0);
        click(&mut n, 12.0, 10.0);
        assert_eq!(n.road_count(), 2);
        assert!(!connected(n.roads(), pt(0.5, 0.5), pt(11.0, 10.0)));
    }

    #[test]
    fn off_road_points_are_not_connected() {
        let n = chain();
        assert!(!connected(n.roads(), pt(50.0, 50.0), pt(0.5, 0.5)));
        assert!(!connected(n.roads(), pt(0.5, 0.5), pt(50.0, 50.0)));
    }

    #[test]
    fn road_containing_uses_the_tight_epsilon() {
        let n = chain();
        assert_eq!(road_containing(n.roads(), pt(0.5, 0.5)), Some(0));
        // 0.05 off the road is well within the UX snap distance but far
        // outside geometric identity.
        assert_eq!(road_containing(n.roads(), pt(0.5, 0.55)), None);
    }

    #[test]
    fn long_chain_traverses_iteratively() {
        let mut n = net();
        click(&mut n, 0.0, 0.0);
        for i in 1..=40 {
            let x = i as f64;
            click(&mut n, x, 0.0);
            if i < 40 {
                // Reuse the endpoint as the start of the next road.
                click(&mut n, x, 0.0);
            }
        }
        assert_eq!(n.road_count(), 40);
        assert!(connected(n.roads(), pt(0.2, 0.0), pt(39.8, 0.0)));
        let adjacency = RoadAdjacency::build(n.roads());
        let reachable = adjacency.reachable(0);
        assert!(reachable.iter().all(|&r| r));
    }
}

// ── Cost graph ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod cost_graph {
    use approx::assert_relative_eq;

    use super::helpers::pt;
    use crate::graph::CostGraph;

    /// Square with a shortcut diagonal:
    ///
    ///   d(0,1) ── c(1,1)
    ///    │     ╱    │
    ///   a(0,0) ── b(1,0)
    ///
    /// a-b, b-c, c-d, d-a of length 1, plus a-c of length 1.5.
    fn square() -> (CostGraph, [u32; 4]) {
        let mut g = CostGraph::new();
        let a = g.node(pt(0.0, 0.0));
        let b = g.node(pt(1.0, 0.0));
        let c = g.node(pt(1.0, 1.0));
        let d = g.node(pt(0.0, 1.0));
        g.connect(a, b, 1.0);
        g.connect(b, c, 1.0);
        g.connect(c, d, 1.0);
        g.connect(d, a, 1.0);
        g.connect(a, c, 1.5);
        (g, [a, b, c, d])
    }

    #[test]
    fn shortcut_beats_the_longer_walk() {
        let (g, [a, _, c, _]) = square();
        let (path, cost) = g.shortest_path(a, c).unwrap();
        assert_relative_eq!(cost, 1.5);
        assert_eq!(path, vec![a, c]);
    }

    #[test]
    fn two_hop_path_when_it_is_shorter() {
        let (g, [_a, b, _c, d]) = square();
        let (path, cost) = g.shortest_path(b, d).unwrap();
        // b→a→d and b→c→d both cost 2; either is a valid shortest path.
        assert_relative_eq!(cost, 2.0);
        assert_eq!(path.len(), 3);
        assert_eq!(path[0], b);
        assert_eq!(path[2], d);
    }

    #[test]
    fn same_node_is_a_trivial_path() {
        let (g, [a, ..]) = square();
        let (path, cost) = g.shortest_path(a, a).unwrap();
        assert_eq!(path, vec![a]);
        assert_relative_eq!(cost, 0.0);
    }

    #[test]
    fn unreachable_is_none() {
        let mut g = CostGraph::new();
        let a = g.node(pt(0.0, 0.0));
        let b = g.node(pt(5.0, 5.0));
        assert!(g.shortest_path(a, b).is_none());
    }

    #[test]
    fn nodes_deduplicate_by_coordinate() {
        let mut g = CostGraph::new();
        let a = g.node(pt(2.0, 3.0));
        let b = g.node(pt(2.0, 3.0));
        assert_eq!(a, b);
        assert_eq!(g.node_count(), 1);
    }
}

// ── Router ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod router {
    use approx::assert_relative_eq;

    use rp_core::geom;

    use super::helpers::{chain, click, cross, net, pt};
    use crate::{DijkstraRouter, RouteError, Router};

    #[test]
    fn route_between_two_vertices() {
        let n = chain();
        let route = DijkstraRouter
            .shortest_path(&n, pt(0.0, 0.0), pt(1.0, 1.0))
            .unwrap();
        assert_eq!(route.points.len(), 2);
        assert_relative_eq!(route.distance, 2.0_f64.sqrt(), max_relative = 1e-12);
    }

    #[test]
    fn route_to_an_interior_point_splits_in_the_copy() {
        let n = chain();
        let route = DijkstraRouter
            .shortest_path(&n, pt(0.0, 0.0), pt(3.0, 3.0))
            .unwrap();

        let expected = [pt(0.0, 0.0), pt(1.0, 1.0), pt(3.0, 3.0)];
        assert_eq!(route.points.len(), expected.len());
        for (got, want) in route.points.iter().zip(expected) {
            assert!(geom::near(*got, want), "got {got:?}, want {want:?}");
        }
        assert_relative_eq!(route.distance, 3.0 * 2.0_f64.sqrt(), max_relative = 1e-9);

        // The query split nothing persistently.
        assert_eq!(n.road_count(), 2);
        assert_eq!(n.point_count(), 3);
    }

    #[test]
    fn path_is_symmetric() {
        let n = chain();
        let forward = DijkstraRouter
            .shortest_path(&n, pt(0.0, 0.0), pt(3.0, 3.0))
            .unwrap();
        let back = DijkstraRouter
            .shortest_path(&n, pt(3.0, 3.0), pt(0.0, 0.0))
            .unwrap();
        assert_relative_eq!(forward.distance, back.distance, max_relative = 1e-12);
        assert_eq!(forward.points.len(), back.points.len());
    }

    #[test]
    fn both_points_interior_on_the_same_road() {
        let mut n = net();
        click(&mut n, 0.0, 0.0);
        click(&mut n, 10.0, 0.0);

        let route = DijkstraRouter
            .shortest_path(&n, pt(2.0, 0.0), pt(7.0, 0.0))
            .unwrap();
        assert_eq!(route.points.len(), 2);
        assert!(geom::near(route.points[0], pt(2.0, 0.0)));
        assert!(geom::near(route.points[1], pt(7.0, 0.0)));
        assert_relative_eq!(route.distance, 5.0, max_relative = 1e-12);
    }

    #[test]
    fn route_through_a_crossroad() {
        let n = cross();
        let route = DijkstraRouter
            .shortest_path(&n, pt(0.0, 1.0), pt(1.0, 0.0))
            .unwrap();
        let expected = [pt(0.0, 1.0), pt(1.0, 1.0), pt(1.0, 0.0)];
        assert_eq!(route.points.len(), expected.len());
        for (got, want) in route.points.iter().zip(expected) {
            assert!(geom::near(*got, want));
        }
        assert_relative_eq!(route.distance, 2.0, max_relative = 1e-12);
    }

    #[test]
    fn interior_points_on_crossing_arms() {
        let n = cross();
        let route = DijkstraRouter
            .shortest_path(&n, pt(0.5, 1.0), pt(1.0, 1.5))
            .unwrap();
        assert_relative_eq!(route.distance, 1.0, max_relative = 1e-12);
        assert_eq!(route.points.len(), 3);
        assert!(geom::near(route.points[1], pt(1.0, 1.0)));
    }

    #[test]
    fn identical_query_points_are_a_trivial_route() {
        let n = chain();
        let route = DijkstraRouter
            .shortest_path(&n, pt(0.5, 0.5), pt(0.5, 0.5))
            .unwrap();
        assert_eq!(route.points.len(), 1);
        assert_relative_eq!(route.distance, 0.0);
    }

    #[test]
    fn disconnected_points_error() {
        let mut n = net();
        click(&mut n, 0.0, 0.0);
        click(&mut n, 1.0, 1.0);
        click(&mut n, 10.0, 10.0);
        click(&mut n, 12.0, 10.0);

        let err = DijkstraRouter
            .shortest_path(&n, pt(0.5, 0.5), pt(11.0, 10.0))
            .unwrap_err();
        assert!(matches!(err, RouteError::NotConnected { .. }));
    }

    #[test]
    fn off_road_source_errors() {
        let n = chain();
        let err = DijkstraRouter
            .shortest_path(&n, pt(50.0, 50.0), pt(0.5, 0.5))
            .unwrap_err();
        assert!(matches!(err, RouteError::NotConnected { .. }));
    }

    #[test]
    fn queries_leave_the_network_untouched() {
        let n = cross();
        let roads_before: Vec<_> = n.roads().iter().map(|r| r.line).collect();
        let _ = DijkstraRouter.shortest_path(&n, pt(0.5, 1.0), pt(1.0, 1.5));
        let _ = DijkstraRouter.shortest_path(&n, pt(0.0, 1.0), pt(2.0, 1.0));
        let roads_after: Vec<_> = n.roads().iter().map(|r| r.line).collect();
        assert_eq!(roads_before, roads_after);
        assert_eq!(n.point_count(), 5);
        assert_eq!(n.crossroad_count(), 1);
    }
}

// ── Snapping ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod snapping {
    use super::helpers::{click, net, pt};
    use crate::snap_to_network;
    use rp_core::geom;

    #[test]
    fn nearby_click_snaps_onto_the_road() {
        let mut n = net();
        click(&mut n, 0.0, 0.0);
        click(&mut n, 10.0, 0.0);

        let snapped = snap_to_network(n.roads(), pt(3.0, 0.15), 0.2).unwrap();
        assert!(geom::near(snapped, pt(3.0, 0.0)));
        assert!(geom::on_segment(snapped, &n.roads()[0].line));
    }

    #[test]
    fn distant_click_does_not_snap() {
        let mut n = net();
        click(&mut n, 0.0, 0.0);
        click(&mut n, 10.0, 0.0);
        assert!(snap_to_network(n.roads(), pt(3.0, 0.5), 0.2).is_none());
    }

    #[test]
    fn nearest_road_wins() {
        let mut n = net();
        click(&mut n, 0.0, 0.0);
        click(&mut n, 10.0, 0.0);
        click(&mut n, 0.0, 1.0);
        click(&mut n, 10.0, 1.0);
        assert_eq!(n.road_count(), 2);

        let snapped = snap_to_network(n.roads(), pt(5.0, 0.4), 0.5).unwrap();
        assert!(geom::near(snapped, pt(5.0, 0.0)));
        let snapped = snap_to_network(n.roads(), pt(5.0, 0.6), 0.5).unwrap();
        assert!(geom::near(snapped, pt(5.0, 1.0)));
    }

    #[test]
    fn empty_network_never_snaps() {
        assert!(snap_to_network(&[], pt(0.0, 0.0), 1.0).is_none());
    }
}
