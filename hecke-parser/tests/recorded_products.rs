use hecke_engine::{verify_against, Generator, MultiplicationOracle, Multiplier, Word};
use hecke_parser::sage::load_oracle;

const RECORDED: &str = include_str!("data/b4_products.csv");

#[test]
fn test_engine_agrees_with_recorded_products() {
    let oracle = load_oracle(RECORDED.as_bytes()).unwrap();
    let queries = oracle.product_queries("B4");
    assert_eq!(queries.len(), 15);

    let mismatches = verify_against(&Multiplier::default(), &oracle, "B4", &queries).unwrap();
    assert!(mismatches.is_empty(), "{:?}", mismatches);
}

#[test]
fn test_recorded_zero_product() {
    let oracle = load_oracle(RECORDED.as_bytes()).unwrap();
    let answer = oracle
        .multiply("B4", Generator(3), &Word::from_ids(&[1, 2, 1, 3]))
        .unwrap();
    assert!(answer.is_empty());
}

#[test]
fn test_other_cartan_type_has_no_queries() {
    let oracle = load_oracle(RECORDED.as_bytes()).unwrap();
    assert!(oracle.product_queries("A4").is_empty());
}
