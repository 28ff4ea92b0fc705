//! Sequence construction from simulation routes.

use tracery_graph::{ElementRef, GraphSurface};
use tracery_trace::Route;

/// Ordered graph elements to highlight for one route.
pub type Sequence = Vec<ElementRef>;

/// Convert candidate routes into per-route highlight sequences.
///
/// Routes are processed in order and conversion stops after the first route
/// marked valid, so the result holds every rejecting attempt up to and
/// including the successful one, never trailing attempts after it. When no
/// route is valid, every route is converted.
///
/// For each transition the leaving state is appended, then the edge taken,
/// identified by matching the edge's target against the next transition's
/// `from`. A state may have several outgoing edges under one symbol; every
/// edge consistent with where the route goes next is appended. The final
/// symbol of a truncated route has no successor and is not drawn as
/// traversed.
///
/// Elements that cannot be resolved against the surface are reported and
/// skipped; a partial visualization beats aborting the run.
pub fn build_sequences<S: GraphSurface>(routes: &[Route], surface: &S) -> Vec<Sequence> {
    let mut sequences = Vec::new();

    for route in routes {
        let mut sequence = Sequence::new();

        for (i, transition) in route.transitions.iter().enumerate() {
            let node = ElementRef::node(&*transition.from.label);
            if surface.contains(&node) {
                sequence.push(node);
            } else {
                tracing::warn!(
                    state = %transition.from.label,
                    "state not on the graph surface, skipping"
                );
            }

            let Some(symbol) = transition.consumes() else {
                continue;
            };
            let Some(next) = route.transitions.get(i + 1) else {
                continue;
            };

            let mut matched = false;
            for edge in surface.outgoing(&transition.from.label, symbol) {
                let targets_next = matches!(
                    &edge,
                    ElementRef::Edge { target, .. } if *target == next.from.label
                );
                if targets_next {
                    sequence.push(edge);
                    matched = true;
                }
            }
            if !matched {
                tracing::warn!(
                    state = %transition.from.label,
                    symbol,
                    next = %next.from.label,
                    "no edge resolves this step, skipping"
                );
            }
        }

        sequences.push(sequence);
        if route.valid {
            break;
        }
    }

    sequences
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tracery_graph::GraphModel;
    use tracery_trace::Transition;

    fn linear_graph() -> GraphModel {
        let mut graph = GraphModel::new();
        graph.add_node("q0");
        graph.add_node("q1");
        graph.add_node("q2");
        graph.add_edge("q0", "a", "q1");
        graph.add_edge("q1", "b", "q2");
        graph
    }

    #[test]
    fn route_becomes_alternating_sequence() {
        let graph = linear_graph();
        let routes = [Route::new(
            vec![
                Transition::consuming("q0", "a"),
                Transition::consuming("q1", "b"),
                Transition::epsilon("q2"),
            ],
            true,
        )];

        let sequences = build_sequences(&routes, &graph);

        assert_eq!(
            sequences,
            vec![vec![
                ElementRef::node("q0"),
                ElementRef::edge("q0", "a", "q1"),
                ElementRef::node("q1"),
                ElementRef::edge("q1", "b", "q2"),
                ElementRef::node("q2"),
            ]]
        );
    }

    #[test]
    fn conversion_stops_at_first_valid_route() {
        let graph = linear_graph();
        let reject = Route::new(vec![Transition::epsilon("q0")], false);
        let accept = Route::new(vec![Transition::epsilon("q2")], true);
        let routes = [reject.clone(), accept, reject];

        let sequences = build_sequences(&routes, &graph);

        assert_eq!(sequences.len(), 2);
        assert_eq!(sequences[1], vec![ElementRef::node("q2")]);
    }

    #[test]
    fn all_routes_convert_when_none_valid() {
        let graph = linear_graph();
        let routes = vec![Route::new(vec![Transition::epsilon("q0")], false); 3];

        assert_eq!(build_sequences(&routes, &graph).len(), 3);
    }

    #[test]
    fn ambiguous_edges_resolve_by_destination() {
        let mut graph = GraphModel::new();
        graph.add_node("s1");
        graph.add_node("s2");
        graph.add_node("s3");
        graph.add_edge("s1", "a", "s2");
        graph.add_edge("s1", "a", "s3");

        let routes = [Route::new(
            vec![Transition::consuming("s1", "a"), Transition::epsilon("s2")],
            false,
        )];

        let sequences = build_sequences(&routes, &graph);

        assert_eq!(
            sequences[0],
            vec![
                ElementRef::node("s1"),
                ElementRef::edge("s1", "a", "s2"),
                ElementRef::node("s2"),
            ]
        );
    }

    #[test]
    fn parallel_twins_are_all_appended() {
        let mut graph = GraphModel::new();
        graph.add_node("s1");
        graph.add_node("s2");
        graph.add_edge("s1", "a", "s2");
        graph.add_edge("s1", "a", "s2");

        let routes = [Route::new(
            vec![Transition::consuming("s1", "a"), Transition::epsilon("s2")],
            false,
        )];

        let sequence = &build_sequences(&routes, &graph)[0];
        let edges = sequence
            .iter()
            .filter(|element| matches!(element, ElementRef::Edge { .. }))
            .count();

        assert_eq!(edges, 2);
    }

    #[test]
    fn dangling_symbol_appends_no_edge() {
        let graph = linear_graph();
        // Symbol consumed on the last step, nowhere to go next.
        let routes = [Route::new(vec![Transition::consuming("q0", "a")], false)];

        let sequences = build_sequences(&routes, &graph);

        assert_eq!(sequences[0], vec![ElementRef::node("q0")]);
    }

    #[test]
    fn unresolvable_elements_are_skipped() {
        let graph = linear_graph();
        let routes = [Route::new(
            vec![
                Transition::consuming("missing", "a"),
                Transition::consuming("q1", "b"),
                Transition::epsilon("q2"),
            ],
            false,
        )];

        let sequences = build_sequences(&routes, &graph);

        // The unknown state and its edge are dropped, the rest survives.
        assert_eq!(
            sequences[0],
            vec![
                ElementRef::node("q1"),
                ElementRef::edge("q1", "b", "q2"),
                ElementRef::node("q2"),
            ]
        );
    }

    #[test]
    fn empty_symbol_is_epsilon_movement() {
        let graph = linear_graph();
        let mut step = Transition::consuming("q0", "a");
        step.symbol = Some(String::new());
        let routes = [Route::new(vec![step, Transition::epsilon("q1")], false)];

        let sequences = build_sequences(&routes, &graph);

        assert_eq!(
            sequences[0],
            vec![ElementRef::node("q0"), ElementRef::node("q1")]
        );
    }

    proptest! {
        #[test]
        fn truncation_matches_first_valid_index(flags in prop::collection::vec(any::<bool>(), 0..8)) {
            let mut graph = GraphModel::new();
            graph.add_node("q0");
            let routes: Vec<Route> = flags
                .iter()
                .map(|&valid| Route::new(vec![Transition::epsilon("q0")], valid))
                .collect();

            let sequences = build_sequences(&routes, &graph);

            let expected = match flags.iter().position(|&valid| valid) {
                Some(first_valid) => first_valid + 1,
                None => flags.len(),
            };
            prop_assert_eq!(sequences.len(), expected);
        }
    }
}
