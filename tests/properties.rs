use json_data_filter as jdf;
use jdf::{FilterOptions, FilterSpec, Mode};
use proptest::prelude::*;
use serde_json::{json, Value};

// Instances carry a unique `id` so results can be compared by identity.
fn instances() -> impl Strategy<Value = Vec<Value>> {
    prop::collection::vec(
        (0i64..4, prop::sample::select(vec!["red", "green", "blue"]), any::<bool>()),
        0..12,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(id, (n, color, nested))| {
                if nested {
                    json!({"id": id, "n": n, "meta": {"color": color, "tags": [color, "x"]}})
                } else {
                    json!({"id": id, "n": n})
                }
            })
            .collect()
    })
}

fn filter_sets() -> impl Strategy<Value = Vec<FilterSpec>> {
    let one = prop_oneof![
        (0i64..4).prop_map(|n| FilterSpec::new("match", "n", n)),
        prop::sample::select(vec!["red", "green", "blue"])
            .prop_map(|c| FilterSpec::new("match", "meta.color", c)),
        prop::sample::select(vec!["re", "ee", "u"])
            .prop_map(|s| FilterSpec::new("in", "meta.color", s)),
        prop::sample::select(vec!["^r", "n$", "l"])
            .prop_map(|p| FilterSpec::new("re-search", "meta.tags.[0]", p)),
        prop::sample::select(vec!["g", "b", "r"])
            .prop_map(|p| FilterSpec::new("re-match", "meta.color", p)),
    ];
    prop::collection::vec(one, 1..4)
}

fn ids(values: &[Value]) -> Vec<u64> {
    values.iter().filter_map(|v| v["id"].as_u64()).collect()
}

proptest! {
    #[test]
    fn inclusive_and_exclusive_partition_input(
        data in instances(),
        filters in filter_sets(),
        compound in any::<bool>(),
    ) {
        let opts = FilterOptions::default().with_compound(compound);
        let inc = jdf::filter_data(&data, &filters, opts).unwrap();
        let exc = jdf::filter_data(&data, &filters, opts.with_mode(Mode::Exclusive)).unwrap();

        let (inc_ids, exc_ids) = (ids(&inc), ids(&exc));
        prop_assert!(inc_ids.iter().all(|id| !exc_ids.contains(id)));
        let mut all = [inc_ids, exc_ids].concat();
        all.sort_unstable();
        prop_assert_eq!(all, ids(&data));
    }

    #[test]
    fn compound_result_is_subset_of_non_compound(
        data in instances(),
        filters in filter_sets(),
    ) {
        prop_assume!(filters.len() > 1);
        let all = jdf::filter_data(&data, &filters, FilterOptions::default()).unwrap();
        let any = jdf::filter_data(&data, &filters, FilterOptions::default().with_compound(false)).unwrap();
        let any_ids = ids(&any);
        prop_assert!(ids(&all).iter().all(|id| any_ids.contains(id)));
    }

    #[test]
    fn inclusive_filtering_is_idempotent(
        data in instances(),
        filters in filter_sets(),
        compound in any::<bool>(),
    ) {
        let opts = FilterOptions::default().with_compound(compound);
        let once = jdf::filter_data(&data, &filters, opts).unwrap();
        let twice = jdf::filter_data(&once, &filters, opts).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn caller_input_is_never_mutated(
        data in instances(),
        filters in filter_sets(),
        mode in prop_oneof![Just(Mode::Inclusive), Just(Mode::Exclusive)],
    ) {
        let data_before = data.clone();
        let mut with_replace = filters.clone();
        with_replace.push(FilterSpec::replace("meta.color", "e", "E"));
        let filters_before = with_replace.clone();

        let opts = FilterOptions::default().with_mode(mode);
        let out = jdf::filter_data(&data, &with_replace, opts).unwrap();

        prop_assert_eq!(&data, &data_before);
        prop_assert_eq!(&with_replace, &filters_before);
        // replace present: everything comes back regardless of mode
        prop_assert_eq!(ids(&out), ids(&data));
    }
}
