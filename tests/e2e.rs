use approx::assert_relative_eq;
use clique_entropy::*;
use cover::CliqueCoverModel;
use entropy::EntropyModel;

fn solve(g: &Graph) -> Calculation {
    calculate(g, &Simplex::default(), &Config::default()).unwrap()
}

fn int(x: i64) -> Rational {
    Rational::from_integer(x)
}

#[test]
pub fn named_graphs() {
    let cases = [
        (Graph::empty(1), int(1), int(0)),
        (Graph::empty(3), int(3), int(0)),
        (Graph::clique(2), int(1), int(1)),
        (Graph::clique(3), int(1), int(2)),
        (Graph::clique(4), int(1), int(3)),
        (Graph::path(3), int(2), int(1)),
        (Graph::path(4), int(2), int(2)),
        (Graph::cycle(4), int(2), int(2)),
        (Graph::cycle(5), Rational::new(5, 2), Rational::new(5, 2)),
    ];
    for (g, cover, entropy) in cases {
        let res = solve(&g);
        assert_eq!(res.cover.value, Some(cover), "cover of {}", g);
        assert_eq!(res.entropy.value, Some(entropy), "entropy of {}", g);
    }
}

#[test]
pub fn edgeless_and_complete_covers() {
    let config = Config::default();
    for n in 1..8 {
        let e = fractional_clique_cover(&Graph::empty(n), &Simplex::default(), &config).unwrap();
        assert_eq!(e.value, Some(int(n as i64)));
        let k = fractional_clique_cover(&Graph::clique(n), &Simplex::default(), &config).unwrap();
        assert_eq!(k.value, Some(int(1)));
    }
}

#[test]
pub fn path_of_length_two() {
    let g = Graph::new(3, &[(0, 1), (1, 2)]);
    let res = solve(&g);
    let cover = &res.cover;
    // every vertex is covered, non-cliques are left at 0
    let weight = |v: &[usize]| cover.get(&Subset::new(v.iter().copied())).unwrap();
    assert_eq!(weight(&[0]) + weight(&[0, 1]), int(1));
    assert_eq!(weight(&[2]) + weight(&[1, 2]), int(1));
    assert_eq!(weight(&[0, 2]), int(0));
    assert_eq!(weight(&[0, 1, 2]), int(0));
    // x{0, 1, 2} = x{0, 2} because N(1) = {0, 2}
    let entropy = &res.entropy;
    assert_eq!(
        entropy.get(&Subset::new([0, 1, 2])),
        entropy.get(&Subset::new([0, 2]))
    );
    assert_eq!(entropy.get(&Subset::new([0, 1, 2])), Some(int(1)));
}

#[test]
pub fn covering_invariant() {
    for g in [Graph::petersen(), Graph::cycle(7), Graph::path(6)] {
        let m = CliqueCoverModel::new(&g);
        let sol = Simplex::default().solve(&m.model).unwrap();
        let x = sol.values().unwrap();
        for v in g.vertices() {
            assert!(m.coverage(x, v) >= 1. - 1e-9);
        }
        assert_eq!(m.model.violation(x, 1e-9), None);
    }
    let m = CliqueCoverModel::new(&Graph::petersen());
    let sol = Simplex::default().solve(&m.model).unwrap();
    // the Petersen graph is triangle-free with a perfect matching
    assert_relative_eq!(m.model.objective_value(sol.values().unwrap()), 5., epsilon = 1e-9);
}

#[test]
pub fn entropy_axioms_after_solving() {
    let g = Graph::cycle(5);
    let m = EntropyModel::new(&g);
    let sol = Simplex::default().solve(&m.model).unwrap();
    let x = sol.values().unwrap();
    assert_eq!(m.model.violation(x, 1e-9), None);
    assert_relative_eq!(x[m.space.empty()], 0., epsilon = 1e-9);
    for v in g.vertices() {
        assert!(x[m.space.var(&Subset::singleton(v))] <= 1. + 1e-9);
    }
    for s in m.space.iter() {
        for t in m.space.iter() {
            if s.is_subset(t) {
                assert!(x[m.space.var(t)] >= x[m.space.var(s)] - 1e-9, "{} ⊆ {}", s, t);
            }
        }
    }
}

#[test]
pub fn graph_and_report_files() {
    let dir = tempfile::tempdir().unwrap();
    let graph_file = dir.path().join("c5.txt");
    let g = Graph::cycle(5);
    g.write(&graph_file).unwrap();
    assert_eq!(
        std::fs::read_to_string(&graph_file).unwrap(),
        "5\n0,1;1,2;2,3;0,4;3,4\n"
    );
    let loaded = Graph::load(&graph_file).unwrap();
    assert_eq!(loaded, g);

    let report_file = dir.path().join("c5-result.txt");
    let res = solve(&loaded);
    report::write_report(&report_file, &loaded, &res).unwrap();
    let text = std::fs::read_to_string(&report_file).unwrap();
    assert!(text.starts_with("Graph:\nNumber Of Nodes: 5\n"));
    assert!(text.contains("Fractional Clique Cover - 5/2\n"));
    assert!(text.contains("Shannon Entropy - 5/2\n"));
}

#[test]
pub fn malformed_graph_files() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("bad.txt");
    for content in [
        "", "x\n", "3\n0,3\n", "3\n1,1\n", "3\n0;1\n", "3\n0,1\nmore\n",
        "100000000000\n0,1\n",
    ] {
        std::fs::write(&file, content).unwrap();
        assert!(Graph::load(&file).is_err(), "{:?} was accepted", content);
    }
    assert!(matches!(
        Graph::load(dir.path().join("missing.txt")),
        Err(Error::Io(_))
    ));
}

#[test]
#[ignore = "needs the csdp binary"]
pub fn solve_with_csdp() {
    let dir = tempfile::tempdir().unwrap();
    let csdp = Csdp::in_directory(dir.path());
    let res = calculate(&Graph::cycle(5), &csdp, &Config::default()).unwrap();
    assert_eq!(res.cover.value, Some(Rational::new(5, 2)));
    assert_eq!(res.entropy.value, Some(Rational::new(5, 2)));
    assert!(csdp.certificate_file().exists());
}
