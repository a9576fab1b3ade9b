use tsp_brute_force::{solve_brute_force, BruteForce};
use tsp_core::{is_well_formed_tour, DistanceMatrix};

fn fixture() -> DistanceMatrix<u32> {
    serde_json::from_str(include_str!("fixtures/four_cities.json")).unwrap()
}

#[test]
fn four_city_fixture_matches_known_optimum() {
    let sol = solve_brute_force(&fixture()).unwrap();
    assert_eq!(sol.min_cost, 80);
    assert_eq!(sol.best_path, vec![0, 1, 3, 2, 0]);
    assert!(sol.all_paths.iter().all(|t| is_well_formed_tour(&t.path, 4)));
}

#[test]
fn asymmetric_instance_prices_direction() {
    // 0 -> 1 -> 2 -> 0 costs 3, the reverse costs 300.
    let m = DistanceMatrix::new(vec![
        vec![0u32, 1, 100],
        vec![100, 0, 1],
        vec![1, 100, 0],
    ])
    .unwrap();
    let sol = solve_brute_force(&m).unwrap();
    assert_eq!(sol.min_cost, 3);
    assert_eq!(sol.best_path, vec![0, 1, 2, 0]);
}

#[test]
fn solution_serializes_in_camel_case() {
    let sol = BruteForce::new().with_retention(2).solve(&fixture()).unwrap();
    let json = serde_json::to_value(&sol).unwrap();
    assert_eq!(json["minCost"], 80);
    assert_eq!(json["totalPaths"], 6);
    assert_eq!(json["allPaths"].as_array().unwrap().len(), 2);
    assert_eq!(json["allPaths"][0]["path"], serde_json::json!([0, 1, 2, 3, 0]));
}

#[test]
fn seven_cities_enumerates_all_permutations() {
    let m = DistanceMatrix::from_fn(7, |i, j| ((i * 7 + j * 3) % 11) as u64).unwrap();
    let sol = solve_brute_force(&m).unwrap();
    assert_eq!(sol.total_paths, 720);
    assert!(sol.all_paths.iter().all(|t| t.cost >= sol.min_cost));
    assert_eq!(m.path_cost(&sol.best_path).unwrap(), sol.min_cost);
}
