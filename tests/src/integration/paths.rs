//! # Merkle Path Flows
//!
//! Identity commitments appended to group trees in the runtime container,
//! then proven against the current root.

use ir_03_merkle_paths::{known_groups, GroupId, KeccakNodeHasher, MerklePath, PathError};
use shared_types::U256;

use super::fixtures::Scenario;

#[test]
fn test_every_member_path_reproduces_the_root() {
    let scenario = Scenario::new();
    let container = &scenario.container;
    let group = GroupId::resolve("twitter", "GOLD").unwrap();
    let commitments: Vec<U256> = (1..=13u64).map(|i| U256::from(i * 7919)).collect();
    for commitment in &commitments {
        container.trees.append_leaf(&group, *commitment).unwrap();
    }

    let root = container.trees.root(&group).unwrap();
    for commitment in &commitments {
        let path = container
            .retrieve_path("twitter", "GOLD", *commitment)
            .unwrap();

        assert_eq!(path.depth(), container.trees.depth());
        assert_eq!(path.root, root);
        assert!(path.verify(*commitment, &KeccakNodeHasher));
    }
}

#[test]
fn test_old_path_goes_stale_after_insertion() {
    let scenario = Scenario::new();
    let container = &scenario.container;
    let group = GroupId::resolve("poap", "DEVCON_5").unwrap();
    container.trees.append_leaf(&group, U256::from(1)).unwrap();

    let before = container.retrieve_path("poap", "DEVCON_5", U256::from(1)).unwrap();
    container.trees.append_leaf(&group, U256::from(2)).unwrap();
    let after = container.retrieve_path("poap", "DEVCON_5", U256::from(1)).unwrap();

    assert_ne!(before.root, after.root);
    assert_eq!(after.path_elements[0], U256::from(2));
    assert!(after.verify(U256::from(1), &KeccakNodeHasher));
    // The stale path still proves membership in the old root only.
    assert!(before.verify(U256::from(1), &KeccakNodeHasher));
    assert_ne!(before.root, container.trees.root(&group).unwrap());
}

#[test]
fn test_path_json_uses_decimal_strings() {
    let scenario = Scenario::new();
    let group = GroupId::resolve("github", "BRONZE").unwrap();
    let commitment = U256::MAX;
    scenario.container.trees.append_leaf(&group, commitment).unwrap();

    let path = scenario
        .container
        .retrieve_path("github", "BRONZE", commitment)
        .unwrap();
    let json = serde_json::to_value(&path).unwrap();

    assert_eq!(json["root"], path.root.to_string());
    assert_eq!(json["indices"].as_array().unwrap().len(), path.depth());
    assert_eq!(json["pathElements"][0], "0");

    let back: MerklePath = serde_json::from_value(json).unwrap();
    assert_eq!(back, path);
}

#[test]
fn test_lookup_errors() {
    let scenario = Scenario::new();
    let group = GroupId::resolve("reddit", "SILVER").unwrap();
    scenario.container.trees.append_leaf(&group, U256::one()).unwrap();

    assert_eq!(
        scenario.container.retrieve_path("reddit", "PLATINUM", U256::one()),
        Err(PathError::GroupNotFound("reddit_PLATINUM".to_string()))
    );
    // Membership is per group.
    assert_eq!(
        scenario.container.retrieve_path("reddit", "GOLD", U256::one()),
        Err(PathError::IdentityCommitmentNotFound)
    );
    assert_eq!(
        PathError::IdentityCommitmentNotFound.to_string(),
        "The identity commitment does not exist"
    );
}

#[test]
fn test_registry_groups_all_accept_members() {
    let scenario = Scenario::new();

    for group in known_groups() {
        scenario.container.trees.append_leaf(&group, U256::from(5)).unwrap();
        let (provider, name) = group
            .as_str()
            .split_once('_')
            .expect("group ids are <provider>_<name>");

        let path = scenario
            .container
            .retrieve_path(provider, name, U256::from(5))
            .unwrap();
        assert!(path.verify(U256::from(5), &KeccakNodeHasher), "{group}");
    }
}
