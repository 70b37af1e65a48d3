use equilibrar_instruments::instruments::guilt_test::{GuiltTest, ID};
use equilibrar_instruments::scoring::ScoreRange;
use equilibrar_instruments::{all_instruments, get_instrument, require_instrument, Instrument};

#[test]
fn registry_finds_the_guilt_test() {
    assert_eq!(all_instruments().len(), 1);
    let instrument = get_instrument(ID).unwrap();
    assert_eq!(instrument.name(), "Test de Culpa");
    assert_eq!(instrument.questions().len(), 7);
    assert!(get_instrument("vb_mapp").is_none());
    assert!(require_instrument("nope").is_err());
}

#[test]
fn likert_scale_accepts_whole_points_only() {
    let scale = ScoreRange::LIKERT_5;
    assert!(scale.contains(1.0));
    assert!(scale.contains(5.0));
    assert!(!scale.contains(0.0));
    assert!(!scale.contains(2.5));
    assert!(!scale.contains(6.0));
    assert_eq!(scale.points(), vec![1, 2, 3, 4, 5]);
}

#[test]
fn rating_errors_mention_the_range() {
    let err = GuiltTest.rating(9).unwrap_err();
    assert_eq!(err.message, "Test de Culpa: rating 9 is outside range [1, 5]");
    assert_eq!(GuiltTest.rating(3).unwrap().value(), 3);
}

#[test]
fn questions_serialize_with_camel_case_categories() {
    let json = serde_json::to_value(&GuiltTest.questions()[4]).unwrap();
    assert_eq!(json["id"], 6);
    assert_eq!(json["category"], "humanizacionError");
}
