//! Fruchterman-Reingold force simulation
//!
//! Nodes repel each other with magnitude `k² / d` and edges pull their
//! endpoints together with magnitude `d² / k`, where `d` is the distance
//! between the two nodes and `k = sqrt(canvas area / node count)` is the
//! distance at which the two forces balance. A temperature that falls with
//! every iteration caps how far a node may move, and every position is
//! clamped back onto the canvas after it moves.

use std::ops::ControlFlow;

use log::{debug, info, trace};
use rand::Rng;

use frlayout_core::geometry::Vector2;

use super::{EdgeRef, NodeState, SimulationConfig, validate_edges};
use crate::error::FrLayoutError;

/// Hook consulted between simulation iterations.
///
/// Returning [`ControlFlow::Break`] stops the simulation; the positions
/// reached so far are returned as the result. Closures taking the upcoming
/// 1-indexed iteration number implement this trait.
pub trait Checkpoint {
    fn check(&mut self, iteration: usize) -> ControlFlow<()>;
}

impl<F> Checkpoint for F
where
    F: FnMut(usize) -> ControlFlow<()>,
{
    fn check(&mut self, iteration: usize) -> ControlFlow<()> {
        self(iteration)
    }
}

/// Force-directed node placement engine
#[derive(Debug, Clone)]
pub struct ForceSimulation {
    config: SimulationConfig,
}

impl ForceSimulation {
    /// Creates an engine for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FrLayoutError::InvalidConfiguration`] if the canvas sides or
    /// their product are not finite and positive, or if the initial
    /// temperature is negative or not finite.
    pub fn new(config: SimulationConfig) -> Result<Self, FrLayoutError> {
        let canvas = config.canvas();
        if !canvas.is_positive() {
            return Err(FrLayoutError::InvalidConfiguration(format!(
                "canvas must have a positive width and height, got {}x{}",
                canvas.width(),
                canvas.height()
            )));
        }
        let area = canvas.area();
        if !area.is_finite() || area <= 0.0 {
            return Err(FrLayoutError::InvalidConfiguration(format!(
                "canvas area must be a finite positive number, got {}x{}",
                canvas.width(),
                canvas.height()
            )));
        }
        let temperature = config.initial_temperature();
        if !temperature.is_finite() || temperature < 0.0 {
            return Err(FrLayoutError::InvalidConfiguration(format!(
                "initial temperature must be a non-negative number, got {temperature}"
            )));
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Runs the simulation to completion.
    ///
    /// Returns one final position per node, in the order of `nodes`. The input
    /// positions are ignored: every node starts from a random point on the
    /// canvas drawn from `rng`.
    ///
    /// # Errors
    ///
    /// Returns [`FrLayoutError::InvalidEdgeReference`] if an edge points past
    /// the end of `nodes`.
    pub fn simulate<R>(
        &self,
        nodes: &[NodeState],
        edges: &[EdgeRef],
        rng: &mut R,
    ) -> Result<Vec<Vector2>, FrLayoutError>
    where
        R: Rng + ?Sized,
    {
        self.simulate_with(nodes, edges, rng, |_: usize| ControlFlow::<()>::Continue(()))
    }

    /// Runs the simulation, consulting `checkpoint` before every iteration.
    ///
    /// # Errors
    ///
    /// Returns [`FrLayoutError::InvalidEdgeReference`] if an edge points past
    /// the end of `nodes`, and [`FrLayoutError::InvalidConfiguration`] if the
    /// canvas is too small to give every node a nonzero share of it.
    pub fn simulate_with<R, C>(
        &self,
        nodes: &[NodeState],
        edges: &[EdgeRef],
        rng: &mut R,
        mut checkpoint: C,
    ) -> Result<Vec<Vector2>, FrLayoutError>
    where
        R: Rng + ?Sized,
        C: Checkpoint,
    {
        validate_edges(edges, nodes.len())?;

        if nodes.is_empty() {
            debug!("No nodes to place, skipping simulation");
            return Ok(Vec::new());
        }

        let k = self.ideal_distance(nodes.len());
        if !k.is_finite() || k <= 0.0 {
            return Err(FrLayoutError::InvalidConfiguration(format!(
                "canvas is too small for {} nodes",
                nodes.len()
            )));
        }
        debug!(
            node_count = nodes.len(),
            edge_count = edges.len(),
            iterations = self.config.iterations(),
            ideal_distance = k;
            "Starting force simulation"
        );

        let mut positions = self.initial_positions(nodes.len(), rng);
        let mut displacements = vec![Vector2::zero(); nodes.len()];

        for iteration in 1..=self.config.iterations() {
            if checkpoint.check(iteration).is_break() {
                info!(iteration; "Force simulation cancelled, keeping current positions");
                break;
            }
            self.step(&mut positions, &mut displacements, edges, k, iteration, rng);
            trace!(iteration, temperature = self.temperature(iteration); "Iteration done");
        }

        Ok(positions)
    }

    /// Samples a uniform random start position for each of `count` nodes.
    ///
    /// With `reverse_order` the last node takes the first draw; the returned
    /// positions are still in input order.
    fn initial_positions<R>(&self, count: usize, rng: &mut R) -> Vec<Vector2>
    where
        R: Rng + ?Sized,
    {
        let mut positions = vec![Vector2::zero(); count];
        if self.config.reverse_order() {
            for position in positions.iter_mut().rev() {
                *position = self.random_position(rng);
            }
        } else {
            for position in positions.iter_mut() {
                *position = self.random_position(rng);
            }
        }
        positions
    }

    fn random_position<R>(&self, rng: &mut R) -> Vector2
    where
        R: Rng + ?Sized,
    {
        let canvas = self.config.canvas();
        Vector2::new(
            rng.random::<f64>() * canvas.width(),
            rng.random::<f64>() * canvas.height(),
        )
    }

    /// Random push used in place of a force whose direction is undefined
    /// because both nodes sit on the same point.
    fn random_displacement<R>(&self, rng: &mut R) -> Vector2
    where
        R: Rng + ?Sized,
    {
        let half_width = self.config.canvas().width() / 2.0;
        let half_height = self.config.canvas().height() / 2.0;
        Vector2::new(
            rng.random_range(-half_width..half_width),
            rng.random_range(-half_height..half_height),
        )
    }

    /// Distance at which repulsion and attraction between two nodes balance.
    fn ideal_distance(&self, node_count: usize) -> f64 {
        (self.config.canvas().area() / node_count as f64).sqrt()
    }

    /// Maximum displacement allowed in the given 1-indexed iteration.
    fn temperature(&self, iteration: usize) -> f64 {
        let initial = self.config.initial_temperature();
        if iteration == 0 {
            initial
        } else {
            initial / iteration as f64
        }
    }

    /// One full iteration: both force passes, then the capped move and clamp.
    fn step<R>(
        &self,
        positions: &mut [Vector2],
        displacements: &mut [Vector2],
        edges: &[EdgeRef],
        k: f64,
        iteration: usize,
        rng: &mut R,
    ) where
        R: Rng + ?Sized,
    {
        self.accumulate_repulsion(positions, displacements, k, rng);
        self.accumulate_attraction(positions, displacements, edges, k, rng);
        self.apply_displacements(positions, displacements, iteration);
    }

    /// Resets `displacements` to the repulsive push every node receives from
    /// every other node.
    fn accumulate_repulsion<R>(
        &self,
        positions: &[Vector2],
        displacements: &mut [Vector2],
        k: f64,
        rng: &mut R,
    ) where
        R: Rng + ?Sized,
    {
        for (v, displacement) in displacements.iter_mut().enumerate() {
            let mut total = Vector2::zero();
            for (u, &other) in positions.iter().enumerate() {
                if u == v {
                    continue;
                }
                let diff = positions[v].sub_vector(other);
                let push = diff
                    .normalize()
                    .map(|direction| direction.scale(k * k / diff.length()))
                    .filter(|push| push.is_finite())
                    .unwrap_or_else(|| self.random_displacement(rng));
                total = total.add_vector(push);
            }
            *displacement = total;
        }
    }

    /// Pulls both endpoints of every edge towards each other.
    fn accumulate_attraction<R>(
        &self,
        positions: &[Vector2],
        displacements: &mut [Vector2],
        edges: &[EdgeRef],
        k: f64,
        rng: &mut R,
    ) where
        R: Rng + ?Sized,
    {
        for edge in edges {
            // A node cannot pull on itself.
            if edge.is_self_loop() {
                continue;
            }
            let (source, target) = (edge.source(), edge.target());
            let diff = positions[source].sub_vector(positions[target]);
            let pull = diff
                .normalize()
                .map(|direction| direction.scale(diff.length() * diff.length() / k))
                .filter(|pull| pull.is_finite())
                .unwrap_or_else(|| self.random_displacement(rng));
            displacements[source] = displacements[source].sub_vector(pull);
            displacements[target] = displacements[target].add_vector(pull);
        }
    }

    /// Moves every node along its displacement, no further than the current
    /// temperature, then clamps it onto the canvas.
    fn apply_displacements(
        &self,
        positions: &mut [Vector2],
        displacements: &[Vector2],
        iteration: usize,
    ) {
        let temperature = self.temperature(iteration);
        let canvas = self.config.canvas();
        for (position, displacement) in positions.iter_mut().zip(displacements) {
            if let Some(direction) = displacement.normalize() {
                let distance = displacement.length().min(temperature);
                *position = position.add_vector(direction.scale(distance));
            }
            *position = position.clamp_to(canvas);
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use proptest::prelude::*;
    use rand::{SeedableRng, rngs::StdRng};

    use frlayout_core::{geometry::Size, identifier::Id};

    use super::*;

    fn nodes(count: usize) -> Vec<NodeState> {
        (0..count)
            .map(|i| NodeState::new(Id::from_anonymous(i), 30.0, 30.0))
            .collect()
    }

    fn engine(iterations: usize) -> ForceSimulation {
        ForceSimulation::new(SimulationConfig::default().with_iterations(iterations))
            .expect("default canvas is valid")
    }

    fn assert_on_canvas(positions: &[Vector2], canvas: Size) {
        for position in positions {
            assert!(position.is_finite(), "position {position:?} is not finite");
            assert!(
                (0.0..=canvas.width()).contains(&position.x())
                    && (0.0..=canvas.height()).contains(&position.y()),
                "position {position:?} is off the canvas"
            );
        }
    }

    #[test]
    fn test_zero_nodes_returns_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        let positions = engine(50).simulate(&[], &[], &mut rng).unwrap();
        assert!(positions.is_empty());
    }

    #[test]
    fn test_rejects_non_positive_canvas() {
        for canvas in [
            Size::new(0.0, 500.0),
            Size::new(500.0, -1.0),
            Size::new(f64::NAN, 500.0),
        ] {
            let result = ForceSimulation::new(SimulationConfig::new(canvas));
            assert!(matches!(
                result,
                Err(FrLayoutError::InvalidConfiguration(_))
            ));
        }
    }

    #[test]
    fn test_rejects_canvas_with_unrepresentable_area() {
        for canvas in [Size::new(1e200, 1e200), Size::new(1e-200, 1e-200)] {
            assert!(canvas.is_positive());
            let result = ForceSimulation::new(SimulationConfig::new(canvas));
            assert!(matches!(
                result,
                Err(FrLayoutError::InvalidConfiguration(_))
            ));
        }
    }

    #[test]
    fn test_rejects_canvas_too_small_for_node_count() {
        let canvas = Size::new(f64::from_bits(1), 1.0);
        let engine = ForceSimulation::new(SimulationConfig::new(canvas)).unwrap();
        let result = engine.simulate(&nodes(3), &[], &mut StdRng::seed_from_u64(0));
        assert!(matches!(
            result,
            Err(FrLayoutError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_rejects_negative_temperature() {
        let config = SimulationConfig::default().with_initial_temperature(-1.0);
        assert!(matches!(
            ForceSimulation::new(config),
            Err(FrLayoutError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_rejects_out_of_range_edge() {
        let mut rng = StdRng::seed_from_u64(1);
        let result = engine(10).simulate(&nodes(2), &[EdgeRef::new(0, 2)], &mut rng);
        assert!(matches!(
            result,
            Err(FrLayoutError::InvalidEdgeReference {
                edge: 0,
                index: 2,
                node_count: 2
            })
        ));
    }

    #[test]
    fn test_zero_iterations_keeps_initial_placement() {
        let engine = engine(0);
        let positions = engine
            .simulate(&nodes(5), &[], &mut StdRng::seed_from_u64(9))
            .unwrap();
        let initial = engine.initial_positions(5, &mut StdRng::seed_from_u64(9));

        assert_eq!(positions, initial);
        assert_on_canvas(&positions, engine.config().canvas());
    }

    #[test]
    fn test_ideal_distance() {
        assert_approx_eq!(f64, engine(1).ideal_distance(1), 500.0);
        assert_approx_eq!(f64, engine(1).ideal_distance(4), 250.0);
    }

    #[test]
    fn test_temperature_is_non_increasing() {
        let engine = engine(10);
        assert_eq!(engine.temperature(0), 50.0);
        assert_eq!(engine.temperature(1), 50.0);
        assert_eq!(engine.temperature(2), 25.0);
        for iteration in 1..100 {
            assert!(engine.temperature(iteration + 1) <= engine.temperature(iteration));
        }
    }

    #[test]
    fn test_connected_pair_converges_to_ideal_distance() {
        let engine = engine(1000);
        let k = engine.ideal_distance(2);
        for seed in 0..5 {
            let positions = engine
                .simulate(&nodes(2), &[EdgeRef::new(0, 1)], &mut StdRng::seed_from_u64(seed))
                .unwrap();
            let distance = positions[0].sub_vector(positions[1]).length();
            assert!(
                (distance - k).abs() < 0.5,
                "seed {seed}: distance {distance} did not converge to {k}"
            );
        }
    }

    #[test]
    fn test_unconnected_pair_moves_apart() {
        for seed in 0..5 {
            let initial = engine(0)
                .simulate(&nodes(2), &[], &mut StdRng::seed_from_u64(seed))
                .unwrap();
            let last = engine(200)
                .simulate(&nodes(2), &[], &mut StdRng::seed_from_u64(seed))
                .unwrap();

            let before = initial[0].sub_vector(initial[1]).length();
            let after = last[0].sub_vector(last[1]).length();
            assert!(after >= before - 1e-9, "seed {seed}: {after} < {before}");
        }
    }

    #[test]
    fn test_attraction_updates_both_endpoints() {
        let engine = engine(1);
        let positions = [Vector2::new(100.0, 100.0), Vector2::new(200.0, 100.0)];
        let mut displacements = [Vector2::zero(); 2];
        let k = engine.ideal_distance(2);

        engine.accumulate_attraction(
            &positions,
            &mut displacements,
            &[EdgeRef::new(0, 1)],
            k,
            &mut StdRng::seed_from_u64(0),
        );

        let expected = 100.0 * 100.0 / k;
        assert_approx_eq!(f64, displacements[0].x(), expected);
        assert_approx_eq!(f64, displacements[1].x(), -expected);
        assert_eq!(displacements[0].y(), 0.0);
        assert_eq!(displacements[1].y(), 0.0);
    }

    #[test]
    fn test_repulsion_pushes_apart() {
        let engine = engine(1);
        let positions = [Vector2::new(100.0, 100.0), Vector2::new(100.0, 150.0)];
        let mut displacements = [Vector2::zero(); 2];
        let k = engine.ideal_distance(2);

        engine.accumulate_repulsion(
            &positions,
            &mut displacements,
            k,
            &mut StdRng::seed_from_u64(0),
        );

        let expected = k * k / 50.0;
        assert_approx_eq!(f64, displacements[0].y(), -expected);
        assert_approx_eq!(f64, displacements[1].y(), expected);
    }

    #[test]
    fn test_nearly_coincident_nodes_get_finite_repulsion() {
        let engine = engine(1);
        let positions = [
            Vector2::new(0.0, 0.0),
            Vector2::new(1e-310, 0.0),
        ];
        let mut displacements = [Vector2::zero(); 2];
        let k = engine.ideal_distance(2);

        engine.accumulate_repulsion(
            &positions,
            &mut displacements,
            k,
            &mut StdRng::seed_from_u64(4),
        );

        assert!(displacements.iter().all(|d| d.is_finite()));
        assert!(displacements.iter().all(|d| !d.is_zero()));
    }

    #[test]
    fn test_self_loop_adds_no_attraction() {
        let engine = engine(1);
        let positions = [Vector2::new(10.0, 10.0)];
        let mut displacements = [Vector2::zero()];

        engine.accumulate_attraction(
            &positions,
            &mut displacements,
            &[EdgeRef::new(0, 0)],
            100.0,
            &mut StdRng::seed_from_u64(0),
        );
        assert!(displacements[0].is_zero());
    }

    #[test]
    fn test_coincident_nodes_stay_finite() {
        let engine = engine(1);
        let k = engine.ideal_distance(2);
        let mut rng = StdRng::seed_from_u64(3);
        let mut positions = [Vector2::new(250.0, 250.0); 2];
        let mut displacements = [Vector2::zero(); 2];

        engine.step(
            &mut positions,
            &mut displacements,
            &[EdgeRef::new(0, 1)],
            k,
            1,
            &mut rng,
        );

        assert!(displacements.iter().all(|d| d.is_finite()));
        assert_on_canvas(&positions, engine.config().canvas());
    }

    #[test]
    fn test_move_is_capped_by_temperature() {
        let engine = engine(1);
        let mut positions = [Vector2::new(250.0, 250.0)];
        let displacements = [Vector2::new(3000.0, 4000.0)];

        engine.apply_displacements(&mut positions, &displacements, 5);

        // temperature(5) = 10, along (0.6, 0.8)
        assert_approx_eq!(f64, positions[0].x(), 256.0);
        assert_approx_eq!(f64, positions[0].y(), 258.0);
    }

    #[test]
    fn test_small_move_is_not_inflated() {
        let engine = engine(1);
        let mut positions = [Vector2::new(250.0, 250.0)];
        engine.apply_displacements(&mut positions, &[Vector2::new(1.0, 0.0)], 1);
        assert_approx_eq!(f64, positions[0].x(), 251.0);

        engine.apply_displacements(&mut positions, &[Vector2::zero()], 1);
        assert_eq!(positions[0], Vector2::new(251.0, 250.0));
    }

    #[test]
    fn test_same_seed_is_deterministic() {
        let engine = engine(30);
        let edges = [EdgeRef::new(0, 1), EdgeRef::new(1, 2), EdgeRef::new(2, 3)];
        let first = engine
            .simulate(&nodes(4), &edges, &mut StdRng::seed_from_u64(42))
            .unwrap();
        let second = engine
            .simulate(&nodes(4), &edges, &mut StdRng::seed_from_u64(42))
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_reverse_order_changes_draw_order_only() {
        let forward = ForceSimulation::new(SimulationConfig::default().with_iterations(0)).unwrap();
        let reverse = ForceSimulation::new(
            SimulationConfig::default()
                .with_iterations(0)
                .with_reverse_order(true),
        )
        .unwrap();

        let a = forward
            .simulate(&nodes(4), &[], &mut StdRng::seed_from_u64(5))
            .unwrap();
        let b = reverse
            .simulate(&nodes(4), &[], &mut StdRng::seed_from_u64(5))
            .unwrap();

        let reversed: Vec<Vector2> = a.iter().rev().copied().collect();
        assert_eq!(b, reversed);
    }

    #[test]
    fn test_reverse_order_keeps_structure() {
        let edges = [EdgeRef::new(0, 1), EdgeRef::new(0, 2), EdgeRef::new(3, 4)];
        for reverse_order in [false, true] {
            let engine = ForceSimulation::new(
                SimulationConfig::default()
                    .with_iterations(40)
                    .with_reverse_order(reverse_order),
            )
            .unwrap();
            let positions = engine
                .simulate(&nodes(5), &edges, &mut StdRng::seed_from_u64(11))
                .unwrap();
            assert_eq!(positions.len(), 5);
            assert_on_canvas(&positions, engine.config().canvas());
        }
    }

    #[test]
    fn test_checkpoint_cancels_between_iterations() {
        let edges = [EdgeRef::new(0, 1), EdgeRef::new(1, 2)];
        let mut seen = Vec::new();
        let cancelled = engine(50)
            .simulate_with(
                &nodes(3),
                &edges,
                &mut StdRng::seed_from_u64(8),
                |iteration: usize| {
                    seen.push(iteration);
                    if iteration == 3 {
                        ControlFlow::Break(())
                    } else {
                        ControlFlow::Continue(())
                    }
                },
            )
            .unwrap();
        let two_iterations = engine(2)
            .simulate(&nodes(3), &edges, &mut StdRng::seed_from_u64(8))
            .unwrap();

        assert_eq!(seen, [1, 2, 3]);
        assert_eq!(cancelled, two_iterations);
    }

    fn graph_strategy() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
        (1usize..10).prop_flat_map(|count| {
            (
                Just(count),
                prop::collection::vec((0..count, 0..count), 0..15),
            )
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn positions_stay_on_canvas(
            (count, pairs) in graph_strategy(),
            iterations in 0usize..25,
            reverse_order in any::<bool>(),
            seed in any::<u64>(),
            width in 1.0f64..1000.0,
            height in 1.0f64..1000.0,
        ) {
            let canvas = Size::new(width, height);
            let engine = ForceSimulation::new(
                SimulationConfig::new(canvas)
                    .with_iterations(iterations)
                    .with_reverse_order(reverse_order),
            )
            .unwrap();
            let edges: Vec<EdgeRef> = pairs.iter().map(|&(s, t)| EdgeRef::new(s, t)).collect();

            let positions = engine
                .simulate(&nodes(count), &edges, &mut StdRng::seed_from_u64(seed))
                .unwrap();

            prop_assert_eq!(positions.len(), count);
            for position in positions {
                prop_assert!(position.is_finite());
                prop_assert!(position.x() >= 0.0 && position.x() <= width);
                prop_assert!(position.y() >= 0.0 && position.y() <= height);
            }
        }
    }
}
