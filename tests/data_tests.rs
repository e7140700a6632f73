use web_fixture::data::generator::{DataGenerator, RandomDataGenerator, StringKind};

#[test]
fn seeded_generators_repeat_their_sequence() {
    let mut a = RandomDataGenerator::seeded(11);
    let mut b = RandomDataGenerator::seeded(11);

    for _ in 0..20 {
        assert_eq!(a.next_int(0, 1000), b.next_int(0, 1000));
        assert_eq!(a.next_bool(), b.next_bool());
        assert_eq!(
            a.generate_string("name", StringKind::AlphaNumeric),
            b.generate_string("name", StringKind::AlphaNumeric)
        );
    }
}

#[test]
fn next_int_stays_in_half_open_range() {
    let mut data = RandomDataGenerator::seeded(1);
    for _ in 0..200 {
        let n = data.next_int(-3, 4);
        assert!((-3..4).contains(&n));
    }
}

#[test]
fn next_int_with_empty_range_returns_min() {
    let mut data = RandomDataGenerator::seeded(1);
    assert_eq!(data.next_int(5, 5), 5);
    assert_eq!(data.next_int(9, 2), 9);
}

#[test]
fn next_index_of_nothing_is_none() {
    let mut data = RandomDataGenerator::seeded(1);
    assert_eq!(data.next_index(0), None);
    assert_eq!(data.next_index(1), Some(0));
}

#[test]
fn next_in_set_picks_a_member() {
    let mut data = RandomDataGenerator::seeded(2);
    let data: &mut dyn DataGenerator = &mut data;
    let items = ["S", "M", "L"];

    for _ in 0..20 {
        assert!(items.contains(data.next_in_set(&items).unwrap()));
    }
    assert!(data.next_in_set::<&str>(&[]).is_none());
}

#[test]
fn generated_strings_match_their_kind() {
    let mut data = RandomDataGenerator::seeded(5);

    for _ in 0..20 {
        let alnum = data.generate_string("", StringKind::AlphaNumeric);
        assert!((8..=16).contains(&alnum.len()));
        assert!(alnum.chars().all(|c| c.is_ascii_alphanumeric()));

        let alpha = data.generate_string("", StringKind::Alpha);
        assert!(alpha.chars().all(|c| c.is_ascii_alphabetic()));

        let digits = data.generate_string("", StringKind::Numeric);
        assert!(digits.chars().all(|c| c.is_ascii_digit()));
    }
}

/// Answers an index past the end of whatever it is asked about.
struct OffByOne;

impl DataGenerator for OffByOne {
    fn next_int(&mut self, min: i64, _max: i64) -> i64 {
        min
    }

    fn next_bool(&mut self) -> bool {
        false
    }

    fn next_index(&mut self, len: usize) -> Option<usize> {
        Some(len)
    }

    fn generate_string(&mut self, _hint: &str, _kind: StringKind) -> String {
        String::new()
    }
}

#[test]
fn next_in_set_ignores_out_of_range_indices() {
    let mut data = OffByOne;
    let data: &mut dyn DataGenerator = &mut data;

    assert!(data.next_in_set(&["S", "M", "L"]).is_none());
}
