//! End-to-end detection scenarios.

use u_bicomm::community::{decode, evaluate, ObjectiveMode, ProblemContext};
use u_bicomm::detect::Algorithm;
use u_bicomm::graph::{BipartiteGraph, Side};
use u_bicomm::moea::{MoeaConfig, MoeaRunner};
use u_bicomm::BicommError;

/// Lower {0, 1}, upper {2, 3}, edges (0,2), (0,3), (1,2).
fn four_vertex() -> BipartiteGraph {
    BipartiteGraph::new(
        vec![Side::Lower, Side::Lower, Side::Upper, Side::Upper],
        vec![(0, 2), (0, 3), (1, 2)],
    )
    .unwrap()
}

/// Two K(3,3) blocks joined by one edge, labelled by block.
fn labelled_blocks() -> BipartiteGraph {
    let mut pairs = Vec::new();
    for l in 0..3 {
        for u in 0..3 {
            pairs.push((l, u));
            pairs.push((l + 3, u + 3));
        }
    }
    pairs.push((0, 3));
    let labels = vec![0, 0, 0, 1, 1, 1, 0, 0, 0, 1, 1, 1];
    BipartiteGraph::from_biadjacency(6, 6, &pairs)
        .unwrap()
        .with_labels(labels)
        .unwrap()
}

#[test]
fn all_first_neighbors_form_one_community() {
    let ctx = ProblemContext::new(four_vertex());
    let p = decode(&[1, 1, 1, 1], ctx.graph().adjacency()).unwrap();
    assert_eq!(p.membership(), &[0, 0, 0, 0]);
    let obj = evaluate(&ctx, &[1, 1, 1, 1], ObjectiveMode::TwoD).unwrap();
    assert_eq!(obj, vec![0.0, 1.0]);
}

#[test]
fn all_zero_genes_are_singletons() {
    let ctx = ProblemContext::new(four_vertex());
    let p = decode(&[0, 0, 0, 0], ctx.graph().adjacency()).unwrap();
    assert_eq!(p.membership(), &[0, 1, 2, 3]);
    assert_eq!(p.num_communities(), 4);
}

#[test]
fn malformed_genome_is_fatal() {
    let ctx = ProblemContext::new(four_vertex());
    let err = evaluate(&ctx, &[0, 0, 0, 2], ObjectiveMode::TwoD).unwrap_err();
    assert_eq!(
        err,
        BicommError::InvalidGene {
            vertex: 3,
            gene: 2,
            degree: 1
        }
    );
    let err = evaluate(&ctx, &[0, 0, 0], ObjectiveMode::TwoD).unwrap_err();
    assert!(matches!(err, BicommError::GenomeLength { got: 3, expected: 4 }));
}

#[test]
fn invalid_graphs_are_rejected_up_front() {
    let sides = vec![Side::Lower, Side::Lower, Side::Upper, Side::Upper];
    assert!(matches!(
        BipartiteGraph::new(sides.clone(), vec![(0, 1), (0, 2)]),
        Err(BicommError::NotBipartite(0, 1))
    ));
    assert!(matches!(
        BipartiteGraph::new(sides, vec![(0, 2), (1, 3)]),
        Err(BicommError::Disconnected(2))
    ));
    assert!(matches!(
        BipartiteGraph::new(Vec::new(), Vec::new()),
        Err(BicommError::EmptyGraph)
    ));
}

#[test]
fn unknown_names_are_configuration_errors() {
    assert!("5d".parse::<ObjectiveMode>().is_err());
    assert!("edge-betweenness".parse::<Algorithm>().is_err());
    assert!("gaussian"
        .parse::<u_bicomm::community::MutationStrategy>()
        .is_err());
    assert!("kmeans"
        .parse::<u_bicomm::community::SeedingStrategy>()
        .is_err());
}

#[test]
fn ga_recovers_planted_blocks() {
    let config = MoeaConfig::default()
        .with_mode(ObjectiveMode::TwoD)
        .with_population_size(30)
        .with_max_generations(20)
        .with_seed(2024);
    let run = Algorithm::MulticriteriaGa(config)
        .detect(&labelled_blocks())
        .unwrap();

    let best = run
        .records
        .iter()
        .max_by(|a, b| a.modularity.total_cmp(&b.modularity))
        .unwrap();
    assert!(best.modularity >= 0.44, "best modularity {}", best.modularity);
    assert_eq!(best.num_clusters, 2);
    let ari = best.adjusted_rand.unwrap();
    assert!((ari - 1.0).abs() < 1e-12, "ari {ari}");

    for (i, a) in run.records.iter().enumerate() {
        for b in &run.records[i + 1..] {
            assert_ne!(format!("{a:?}"), format!("{b:?}"));
        }
    }
}

#[test]
fn every_mode_runs_end_to_end() {
    let ctx = ProblemContext::new(labelled_blocks());
    for mode in [ObjectiveMode::TwoD, ObjectiveMode::ThreeD, ObjectiveMode::FourD] {
        let config = MoeaConfig::fast()
            .with_mode(mode)
            .with_max_generations(5)
            .with_seed(9)
            .with_history(true);
        let result = MoeaRunner::run(&ctx, &config).unwrap();
        assert!(result.objectives.iter().all(|o| o.len() == mode.n_objectives()));

        let mut reference = vec![1.0; mode.n_objectives()];
        reference[mode.n_objectives() - 1] = 13.0;
        let hv = result.hypervolume_history(&reference).unwrap();
        assert_eq!(hv.len(), result.generations + 1);

        let scaled = result
            .normalized_hypervolume_history(mode, ctx.n_var())
            .unwrap();
        assert_eq!(scaled.len(), hv.len());
        assert!(scaled.iter().all(|&(_, v)| v > 0.0 && v.is_finite()));
    }
}

#[test]
fn fastgreedy_and_ga_agree_on_blocks() {
    let graph = labelled_blocks();
    let greedy = Algorithm::fast_greedy().detect(&graph).unwrap();
    let ga = Algorithm::MulticriteriaGa(
        MoeaConfig::fast()
            .with_mode(ObjectiveMode::TwoD)
            .with_seed(5),
    )
        .detect(&graph)
        .unwrap();
    let greedy_q = greedy
        .records
        .iter()
        .map(|r| r.modularity)
        .fold(f64::NEG_INFINITY, f64::max);
    let ga_q = ga
        .records
        .iter()
        .map(|r| r.modularity)
        .fold(f64::NEG_INFINITY, f64::max);
    assert!(ga_q >= greedy_q - 1e-12);
}
