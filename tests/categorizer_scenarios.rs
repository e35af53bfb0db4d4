use std::collections::HashMap;

use argoscope::{
    solve, ArgumentSet, Attack, AttackerIndex, CategorizerParams, Weights,
};

fn solved(
    labels: &[&str],
    attacks: &[(&str, &str)],
    weights: &[(&str, f64)],
    params: CategorizerParams,
) -> (ArgumentSet, argoscope::Solution) {
    let set = ArgumentSet::new(labels.iter().copied()).unwrap();
    let attacks: Vec<Attack> = attacks.iter().map(|&(a, t)| Attack::new(a, t)).collect();
    let index = AttackerIndex::build(&set, &attacks).resolve(&set).unwrap();
    let map: HashMap<String, f64> = weights
        .iter()
        .map(|&(label, w)| (label.to_string(), w))
        .collect();
    let w = Weights::from_map(&set, &map).unwrap();
    let solution = solve(&set, &index, &w, params).unwrap();
    (set, solution)
}

#[test]
fn single_unattacked_argument_scores_its_weight() {
    for c in [0.0, 0.25, 1.0, 3.5] {
        for max_iter in [1, 50] {
            let params = CategorizerParams {
                max_iter,
                epsilon: 1e-6,
            };
            let (set, s) = solved(&["X"], &[], &[("X", c)], params);
            assert_eq!(s.get(&set, "X"), Some(c));
            assert_eq!(s.iterations, 1);
            assert!(s.converged);
        }
    }
}

#[test]
fn one_attack_halves_the_target() {
    // Y attacks X with unit weights: HC(Y) = 1 exactly, HC(X) -> 1/2.
    let params = CategorizerParams {
        max_iter: 50,
        epsilon: 1e-6,
    };
    let (set, s) = solved(
        &["X", "Y"],
        &[("Y", "X")],
        &[("X", 1.0), ("Y", 1.0)],
        params,
    );
    assert!(s.converged);
    assert_eq!(s.get(&set, "Y"), Some(1.0));
    assert!((s.get(&set, "X").unwrap() - 0.5).abs() < 1e-6);
}

#[test]
fn attack_chain_matches_direct_algebra() {
    // (Y,X), (Z,Y): z = 1, y = 1/2, x = 2/3.
    let params = CategorizerParams {
        max_iter: 1000,
        epsilon: 1e-10,
    };
    let (set, s) = solved(
        &["X", "Y", "Z"],
        &[("Y", "X"), ("Z", "Y")],
        &[("X", 1.0), ("Y", 1.0), ("Z", 1.0)],
        params,
    );
    let x = s.get(&set, "X").unwrap();
    let y = s.get(&set, "Y").unwrap();
    let z = s.get(&set, "Z").unwrap();
    assert!((z - 1.0).abs() < 1e-10);
    assert!((y - 0.5).abs() < 1e-9);
    assert!((x - 2.0 / 3.0).abs() < 1e-9);
    assert!(z > x && x > y);
}

#[test]
fn scores_never_exceed_the_largest_weight() {
    let params = CategorizerParams::default();
    let (_, s) = solved(
        &["A", "B", "C"],
        &[("A", "B"), ("B", "C"), ("C", "A")],
        &[("A", 0.8), ("B", 0.1), ("C", 0.6)],
        params,
    );
    for &v in &s.scores {
        assert!((0.0..=0.8).contains(&v));
    }
}

#[test]
fn mutual_attack_is_symmetric() {
    let params = CategorizerParams {
        max_iter: 5000,
        epsilon: 1e-12,
    };
    let (set, s) = solved(
        &["A", "B"],
        &[("A", "B"), ("B", "A")],
        &[("A", 1.0), ("B", 1.0)],
        params,
    );
    let a = s.get(&set, "A").unwrap();
    let b = s.get(&set, "B").unwrap();
    assert!((a - b).abs() < 1e-10);
    // Fixed point of v = 1 / (1 + v) is the golden-ratio conjugate.
    let phi = (5f64.sqrt() - 1.0) / 2.0;
    assert!((a - phi).abs() < 1e-6);
}

#[test]
fn self_attack_damps_the_argument() {
    let params = CategorizerParams {
        max_iter: 5000,
        epsilon: 1e-12,
    };
    let (set, s) = solved(&["A"], &[("A", "A")], &[("A", 1.0)], params);
    let a = s.get(&set, "A").unwrap();
    let phi = (5f64.sqrt() - 1.0) / 2.0;
    assert!((a - phi).abs() < 1e-6);
}
