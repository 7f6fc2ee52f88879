//! Property-based tests for biomorph
//!
//! Uses proptest to verify invariants of the codec, clustering and breeding.

use biomorph::prelude::*;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn arb_bounds() -> impl Strategy<Value = Bounds> {
    (-1000.0f64..1000.0, 0.0f64..500.0).prop_map(|(min, width)| Bounds::new(min, min + width))
}

fn arb_wiring() -> impl Strategy<Value = ControlWiring> {
    (
        prop::collection::vec(arb_bounds(), 0..8),
        prop::collection::vec(0usize..4, 0..3),
    )
        .prop_filter("at least one gene", |(s, p)| {
            s.len() + p.iter().sum::<usize>() > 0
        })
        .prop_map(|(sliders, pools)| ControlWiring::new(sliders, pools))
}

fn arb_wiring_and_genes() -> impl Strategy<Value = (ControlWiring, Vec<f64>)> {
    arb_wiring().prop_flat_map(|wiring| {
        let n = wiring.vector_length();
        (Just(wiring), prop::collection::vec(0.0f64..=1.0, n))
    })
}

fn arb_points() -> impl Strategy<Value = Vec<Vec<f64>>> {
    (1usize..6).prop_flat_map(|dim| {
        prop::collection::vec(prop::collection::vec(0.0f64..=1.0, dim), 1..30)
    })
}

/// Host with `sliders` unit sliders that always produces a design
struct UnitHost {
    sliders: usize,
}

impl ControlInspector for UnitHost {
    fn control_bounds(&self) -> Vec<(f64, f64)> {
        vec![(0.0, 1.0); self.sliders]
    }

    fn gene_pool_sizes(&self) -> Vec<usize> {
        Vec::new()
    }
}

impl DesignEvaluator for UnitHost {
    type Geometry = ();

    fn apply(&mut self, assignment: &ControlAssignment) -> Evaluation<()> {
        let sum: f64 = assignment.sliders.iter().sum();
        Ok(DesignOutput::new(vec![()]).with_reading(sum, "sum"))
    }
}

fn selected_population(
    size: usize,
    vector_length: usize,
    picks: usize,
    seed: u64,
    rate: f64,
) -> PopulationManager<()> {
    let config = IgaBuilder::new()
        .population_size(size)
        .cluster_count(3)
        .mutation_rate(rate)
        .build_config()
        .unwrap();
    let mut manager = PopulationManager::new(config).unwrap();
    let host = SharedHost::new(UnitHost {
        sliders: vector_length,
    });
    let mut rng = StdRng::seed_from_u64(seed);
    manager.initialize_from_host(&host, &mut rng).unwrap();
    manager.evaluate_all(&host).unwrap();
    let ids: Vec<_> = manager
        .population()
        .unwrap()
        .iter()
        .take(picks)
        .map(|c| c.id())
        .collect();
    for id in ids {
        manager.record_selection(id).unwrap();
    }
    manager
}

proptest! {
    // ==================== Codec Properties ====================

    #[test]
    fn decoded_sliders_within_bounds((wiring, genes) in arb_wiring_and_genes()) {
        let codec = GenomeCodec::new(wiring.clone());
        let assignment = codec.decode(&GeneVector::from_genes(genes).unwrap()).unwrap();

        prop_assert_eq!(assignment.sliders.len(), wiring.slider_count());
        for (value, bounds) in assignment.sliders.iter().zip(&wiring.sliders) {
            prop_assert!(*value >= bounds.min && *value <= bounds.max);
        }
        for (pool, &size) in assignment.gene_pools.iter().zip(&wiring.gene_pool_sizes) {
            prop_assert_eq!(pool.len(), size);
        }
    }

    #[test]
    fn encode_inverts_decode((wiring, genes) in arb_wiring_and_genes()) {
        let codec = GenomeCodec::new(wiring.clone());
        let original = GeneVector::from_genes(genes).unwrap();
        let recovered = codec.encode(&codec.decode(&original).unwrap()).unwrap();

        prop_assert_eq!(recovered.len(), original.len());
        for (i, (a, b)) in original.genes().iter().zip(recovered.genes()).enumerate() {
            let degenerate = i < wiring.slider_count() && wiring.sliders[i].is_degenerate();
            if !degenerate {
                prop_assert!((a - b).abs() < 1e-9, "gene {}: {} vs {}", i, a, b);
            }
        }
    }

    #[test]
    fn decode_rejects_wrong_length(wiring in arb_wiring(), extra in 1usize..4) {
        let codec = GenomeCodec::new(wiring.clone());
        let genes = GeneVector::from_genes(vec![0.5; wiring.vector_length() + extra]).unwrap();
        let is_mismatch = matches!(
            codec.decode(&genes),
            Err(GenomeError::EncodingMismatch { .. })
        );
        prop_assert!(is_mismatch);
    }

    // ==================== Clustering Properties ====================

    #[test]
    fn cluster_ids_in_range(points in arb_points(), k in 1usize..15, seed in any::<u64>()) {
        let refs: Vec<&[f64]> = points.iter().map(Vec::as_slice).collect();
        let engine = KMeansPlusPlus::new(k).unwrap();
        let result = engine.fit(&refs, &mut StdRng::seed_from_u64(seed));

        prop_assert_eq!(result.assignments.len(), points.len());
        prop_assert_eq!(result.effective_k(), k.min(points.len()));
        for &c in &result.assignments {
            prop_assert!(c < result.effective_k());
        }
    }

    #[test]
    fn clustering_reproducible(points in arb_points(), k in 1usize..8, seed in any::<u64>()) {
        let refs: Vec<&[f64]> = points.iter().map(Vec::as_slice).collect();
        let engine = KMeansPlusPlus::new(k).unwrap();
        let a = engine.fit(&refs, &mut StdRng::seed_from_u64(seed));
        let b = engine.fit(&refs, &mut StdRng::seed_from_u64(seed));
        prop_assert_eq!(a, b);
    }

    #[test]
    fn points_assigned_to_nearest_centroid(points in arb_points(), k in 1usize..6, seed in any::<u64>()) {
        let refs: Vec<&[f64]> = points.iter().map(Vec::as_slice).collect();
        let engine = KMeansPlusPlus::new(k).unwrap();
        let result = engine.fit(&refs, &mut StdRng::seed_from_u64(seed));

        if result.converged {
            for (p, &c) in refs.iter().zip(&result.assignments) {
                let own = squared_distance(p, &result.centroids[c]);
                for centroid in &result.centroids {
                    prop_assert!(own <= squared_distance(p, centroid) + 1e-12);
                }
            }
        }
    }

    #[test]
    fn seeding_picks_distinct_points(points in arb_points(), k in 1usize..10, seed in any::<u64>()) {
        let refs: Vec<&[f64]> = points.iter().map(Vec::as_slice).collect();
        let k = k.min(refs.len());
        let seeds = seed_centroids(&refs, k, &mut StdRng::seed_from_u64(seed));

        prop_assert_eq!(seeds.len(), k);
        let mut sorted = seeds.clone();
        sorted.sort_unstable();
        sorted.dedup();
        prop_assert_eq!(sorted.len(), k);
    }

    #[test]
    fn at_most_k_points_each_own_cluster(
        n in 1usize..12,
        extra in 0usize..5,
        value in 0.0f64..=1.0,
        seed in any::<u64>()
    ) {
        let data = vec![vec![value, value]; n];
        let refs: Vec<&[f64]> = data.iter().map(Vec::as_slice).collect();
        let engine = KMeansPlusPlus::new(n + extra).unwrap();
        let result = engine.fit(&refs, &mut StdRng::seed_from_u64(seed));

        prop_assert_eq!(&result.assignments, &(0..n).collect::<Vec<_>>());
        prop_assert_eq!(result.empty_clusters(), 0);
    }

    // ==================== Breeding Properties ====================

    #[test]
    fn children_keep_size_and_unit_range(
        size in 1usize..20,
        len in 1usize..10,
        picks in 1usize..5,
        seed in any::<u64>(),
        rate in 0.0f64..=1.0
    ) {
        let mut manager = selected_population(size, len, picks, seed, rate);
        let mut rng = StdRng::seed_from_u64(seed ^ 0x5eed);
        let next = manager.breed_next_generation(&mut rng).unwrap();

        prop_assert_eq!(next.len(), size);
        prop_assert_eq!(next.generation(), 1);
        for child in next.iter() {
            prop_assert_eq!(child.genes().len(), len);
            prop_assert!(child.genes().genes().iter().all(|g| (0.0..=1.0).contains(g)));
        }
    }

    #[test]
    fn zero_mutation_inherits_parent_genes(
        size in 2usize..15,
        len in 1usize..10,
        picks in 1usize..4,
        seed in any::<u64>()
    ) {
        let mut manager = selected_population(size, len, picks, seed, 0.0);
        let parents: Vec<Vec<f64>> = manager
            .population()
            .unwrap()
            .selected()
            .map(|c| c.genes().genes().to_vec())
            .collect();

        let mut rng = StdRng::seed_from_u64(seed);
        let next = manager.breed_next_generation(&mut rng).unwrap();
        for child in next.iter() {
            for (i, g) in child.genes().genes().iter().enumerate() {
                prop_assert!(parents.iter().any(|p| p[i] == *g));
            }
        }
    }

    #[test]
    fn no_selection_leaves_population_alone(size in 1usize..10, len in 1usize..5, seed in any::<u64>()) {
        let mut manager = selected_population(size, len, 0, seed, 0.1);
        let before: Vec<_> = manager.population().unwrap().iter().map(|c| c.id()).collect();

        let mut rng = StdRng::seed_from_u64(seed);
        let is_empty_pool = matches!(
            manager.breed_next_generation(&mut rng),
            Err(EvolutionError::EmptyParentPool)
        );
        prop_assert!(is_empty_pool);
        let after: Vec<_> = manager.population().unwrap().iter().map(|c| c.id()).collect();
        prop_assert_eq!(before, after);
        prop_assert_eq!(manager.generation(), Some(0));
    }
}
