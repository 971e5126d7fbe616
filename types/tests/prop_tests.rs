use proptest::prelude::*;

use nelo_types::{Amount, CurrencyCode, Timestamp};

proptest! {
    /// Amount roundtrip: new -> minor produces the same value.
    #[test]
    fn amount_roundtrip(raw in 0u64..u64::MAX) {
        prop_assert_eq!(Amount::new(raw).minor(), raw);
    }

    /// checked_add agrees with u64 checked arithmetic.
    #[test]
    fn amount_checked_add_matches_u64(a in 0u64..u64::MAX, b in 0u64..u64::MAX) {
        let sum = Amount::new(a).checked_add(Amount::new(b));
        prop_assert_eq!(sum.map(|s| s.minor()), a.checked_add(b));
    }

    /// checked_sub never produces a value below zero.
    #[test]
    fn amount_checked_sub_never_negative(a in 0u64..u64::MAX, b in 0u64..u64::MAX) {
        match Amount::new(a).checked_sub(Amount::new(b)) {
            Some(d) => prop_assert_eq!(d.minor(), a - b),
            None => prop_assert!(b > a),
        }
    }

    /// Amount bincode serialization roundtrip.
    #[test]
    fn amount_bincode_roundtrip(raw in 0u64..u64::MAX) {
        let amount = Amount::new(raw);
        let encoded = bincode::serialize(&amount).unwrap();
        let decoded: Amount = bincode::deserialize(&encoded).unwrap();
        prop_assert_eq!(decoded, amount);
    }

    /// Timestamp ordering: new(a) <= new(b) iff a <= b.
    #[test]
    fn timestamp_ordering(a in 0u64..u64::MAX, b in 0u64..u64::MAX) {
        let ta = Timestamp::new(a);
        let tb = Timestamp::new(b);
        prop_assert_eq!(ta <= tb, a <= b);
        prop_assert_eq!(ta == tb, a == b);
    }

    /// Timestamp elapsed_since: elapsed_since(now) = now - self (saturating).
    #[test]
    fn timestamp_elapsed_since(base in 0u64..1_000_000, offset in 0u64..1_000_000) {
        let t = Timestamp::new(base);
        let now = Timestamp::new(base + offset);
        prop_assert_eq!(t.elapsed_since(now), offset);
    }

    /// elapsed_since saturates to 0 when now < self.
    #[test]
    fn timestamp_elapsed_since_saturates(
        base in 1u64..1_000_000,
        deficit in 1u64..1_000_000,
    ) {
        let later = Timestamp::new(base + deficit);
        let earlier = Timestamp::new(base);
        prop_assert_eq!(later.elapsed_since(earlier), 0);
    }

    /// Currency codes roundtrip through parse/as_str for valid input.
    #[test]
    fn currency_parse_roundtrip(code in "[A-Z]{3}") {
        let parsed = CurrencyCode::parse(&code).unwrap();
        prop_assert_eq!(parsed.as_str(), code);
    }

    /// Anything that is not three uppercase ASCII letters is rejected.
    #[test]
    fn currency_rejects_invalid(code in "[a-z0-9]{0,6}") {
        prop_assert!(CurrencyCode::parse(&code).is_none());
    }
}
