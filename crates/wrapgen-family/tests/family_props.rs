use proptest::prelude::*;
use wrapgen_family::{family_chain, DispatchPlan, FamilyResolver, GenerationConfig, LeafSet};
use wrapgen_model::{Iid, Interface, InterfaceGraph};

/// Build disjoint families `F0 <- F01 <- …`, one per entry of `heights`
fn build_graph(heights: &[u32]) -> InterfaceGraph {
    let mut next_id = 1u128;
    let mut ifaces = Vec::new();
    for (f, &height) in heights.iter().enumerate() {
        let base = format!("Family{}x", f);
        for v in 0..=height {
            let name = if v == 0 { base.clone() } else { format!("{base}{v}") };
            let parent = match v {
                0 => "IUnknown".to_string(),
                1 => base.clone(),
                _ => format!("{base}{}", v - 1),
            };
            ifaces.push(Interface::new(name).with_iid(Iid::from_u128(next_id)).with_parent(parent));
            next_id += 1;
        }
    }
    ifaces.into_iter().collect()
}

#[test]
fn three_member_chain_has_one_leaf() {
    let graph: InterfaceGraph = [
        Interface::new("A").with_iid(Iid::from_u128(1)),
        Interface::new("A1").with_iid(Iid::from_u128(2)).with_parent("A"),
        Interface::new("A2").with_iid(Iid::from_u128(3)).with_parent("A1"),
    ]
    .into_iter()
    .collect();
    let config = GenerationConfig::default();

    assert_eq!(LeafSet::detect(&graph, &config).names(), vec!["A2"]);
    let families = FamilyResolver::new(&graph, &config).resolve().unwrap();
    assert_eq!(families.len(), 1);
    assert_eq!(families[0].names(), vec!["A", "A1", "A2"]);
}

proptest! {
    #[test]
    fn prop_leaves_and_families_are_in_bijection(
        heights in proptest::collection::vec(0u32..8, 1..10)
    ) {
        let graph = build_graph(&heights);
        let config = GenerationConfig::default();

        let leaves = LeafSet::detect(&graph, &config);
        let families = FamilyResolver::new(&graph, &config).resolve().unwrap();

        prop_assert_eq!(leaves.len(), heights.len());
        prop_assert_eq!(families.len(), heights.len());

        for (family, &height) in families.iter().zip(&heights) {
            let leaf = family.leaf().unwrap();
            prop_assert!(leaves.contains(&leaf.name));
            prop_assert_eq!(leaf.version, height);
            prop_assert_eq!(family.len() as u32, height + 1);
        }

        let plan = DispatchPlan::from_families(families, &config);
        prop_assert_eq!(plan.iid_count(), graph.len());
    }

    #[test]
    fn prop_chain_ends_at_leaf(base in "[A-Z][a-z]{1,8}", n in 1u32..50) {
        let leaf = format!("{base}{n}");
        let chain: Vec<_> = family_chain(&leaf).unwrap().collect();

        prop_assert_eq!(chain.len() as u32, n + 1);
        prop_assert_eq!(chain.first().unwrap(), &base);
        prop_assert_eq!(chain.last().unwrap(), &leaf);
    }
}
