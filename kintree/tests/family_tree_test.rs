//! Integration tests for the family-tree service
//!
//! Runs the life-event operations end to end against the embedded in-memory
//! engine and checks the resulting graph and rendering.

use std::sync::Arc;

use kintree::models::{
    Custody, FamilyRelationship, FamilyTree, Person, Relationship, RelationshipKind,
};
use kintree::service::FamilyTreeService;
use kintree::storage::{
    GraphStorage, GraphStorageConfig, GraphStore, PersonStore, RelationshipStore,
};
use kintree::tree::TreeRenderer;
use kintree::KintreeError;

type TestStorage = GraphStorage<surrealdb::engine::local::Db>;

async fn create_test_service() -> (FamilyTreeService, Arc<TestStorage>) {
    let config = GraphStorageConfig {
        namespace: "test".to_string(),
        database: "family_tree_test".to_string(),
    };
    let storage = Arc::new(
        GraphStorage::open_in_memory(config)
            .await
            .expect("Failed to create test storage"),
    );

    let service = FamilyTreeService::new(storage.clone() as Arc<dyn GraphStore>);
    (service, storage)
}

#[tokio::test]
async fn show_without_a_tree_renders_the_fixed_message() {
    let (service, _storage) = create_test_service().await;
    assert_eq!(
        service.show().await.expect("show"),
        "No family tree found."
    );
}

#[tokio::test]
async fn founders_are_created_married_and_rendered() {
    let (service, storage) = create_test_service().await;

    service
        .create_family_tree(301, "Alice", 302, "Bob")
        .await
        .expect("Failed to create family tree");

    let mother = storage
        .get_person(301)
        .await
        .expect("get")
        .expect("mother exists");
    assert_eq!(mother.gender, "Female");
    let father = storage
        .get_person(302)
        .await
        .expect("get")
        .expect("father exists");
    assert_eq!(father.gender, "Male");

    let marriage = storage
        .find_relationships(301, 302, Some(RelationshipKind::MarriedTo))
        .await
        .expect("find");
    assert_eq!(marriage.len(), 1);

    let rendered = service.show().await.expect("show");
    assert!(rendered.starts_with("ROOT: Alice (Female) married to Bob (Male)"));
}

#[tokio::test]
async fn founder_ids_must_be_fresh_and_distinct() {
    let (service, _storage) = create_test_service().await;

    service
        .create_family_tree(301, "Alice", 302, "Bob")
        .await
        .expect("first tree");

    let reuse = service.create_family_tree(301, "Alma", 400, "Bert").await;
    assert!(matches!(reuse, Err(KintreeError::Conflict(_))));

    let same_id = service.create_family_tree(500, "Cara", 500, "Cole").await;
    assert!(matches!(same_id, Err(KintreeError::Validation(_))));
}

// Mirrors the crate-level quick-start example; every step must succeed.
#[tokio::test]
async fn quickstart_sequence_runs_end_to_end() {
    let (service, _storage) = create_test_service().await;

    service
        .create_family_tree(301, "Alice", 302, "Bob")
        .await
        .expect("create_family_tree");
    service
        .have_a_kid(301, 302, 305, "Eve", "Female")
        .await
        .expect("have_a_kid");
    service
        .divorce(301, 302, "With Mother")
        .await
        .expect("divorce");

    let rendered = service.show().await.expect("show");
    assert!(rendered.starts_with("ROOT: Alice (Female) married to Bob (Male)"));
    assert!(rendered.contains("- Eve (Female)"));
}

#[tokio::test]
async fn a_childless_divorcee_can_remarry() {
    let (service, storage) = create_test_service().await;

    service
        .create_family_tree(301, "Alice", 302, "Bob")
        .await
        .expect("tree");
    service
        .divorce(301, 302, "With Mother")
        .await
        .expect("childless divorce");

    service
        .marry(301, 303, "Charlie", "Male")
        .await
        .expect("remarriage after a childless divorce");

    // Exactly one new person and one new marriedTo edge.
    let charlie = storage
        .get_person(303)
        .await
        .expect("get")
        .expect("Charlie exists");
    assert_eq!(charlie.name, "Charlie");
    assert_eq!(charlie.gender, "Male");
    assert_eq!(storage.count_persons().await.expect("count"), 3);

    let marriage = storage
        .find_relationships(301, 303, Some(RelationshipKind::MarriedTo))
        .await
        .expect("find");
    assert_eq!(marriage, vec![Relationship::new(301, RelationshipKind::MarriedTo, 303)]);
    assert_eq!(
        storage
            .person_relationships(301, Some(RelationshipKind::MarriedTo))
            .await
            .expect("edges")
            .len(),
        1
    );
}

#[tokio::test]
async fn marriage_policy_rejects_bigamy_and_remarriage_with_children() {
    let (service, storage) = create_test_service().await;

    service
        .create_family_tree(301, "Alice", 302, "Bob")
        .await
        .expect("tree");

    // Bob is already married to Alice (incoming edge counts too).
    let bigamy = service.marry(302, 303, "Denise", "Female").await;
    assert!(matches!(bigamy, Err(KintreeError::Conflict(_))));

    // A nonexistent person cannot marry.
    let ghost = service.marry(999, 304, "Eli", "Male").await;
    assert!(matches!(ghost, Err(KintreeError::NotFound(_))));

    // Divorced but with a child: still barred from remarriage.
    service
        .have_a_kid(301, 302, 305, "Eve", "Female")
        .await
        .expect("kid");
    service
        .divorce(301, 302, "With Mother")
        .await
        .expect("divorce");
    let remarry = service.marry(301, 306, "Frank", "Male").await;
    assert!(matches!(remarry, Err(KintreeError::Conflict(_))));

    // The spouse id itself must be fresh.
    let taken = service.marry(302, 305, "Eve", "Female").await;
    assert!(matches!(taken, Err(KintreeError::Conflict(_))));

    // No partial state leaked from the failed marriages.
    assert_eq!(storage.get_person(303).await.expect("get"), None);
    assert_eq!(storage.get_person(306).await.expect("get"), None);
}

#[tokio::test]
async fn a_kid_gets_one_node_and_two_parent_edges_even_for_unmarried_parents() {
    let (service, storage) = create_test_service().await;

    service
        .create_family_tree(311, "Gina", 312, "Hugo")
        .await
        .expect("tree");
    service
        .divorce(311, 312, "With Mother")
        .await
        .expect("divorce");

    // Gina and Hugo are now unmarried; the child is still theirs.
    service
        .have_a_kid(311, 312, 313, "Iris", "Female")
        .await
        .expect("Failed to have a kid");

    let kid = storage
        .get_person(313)
        .await
        .expect("get")
        .expect("kid exists");
    assert_eq!(kid.name, "Iris");

    assert_eq!(
        storage
            .find_relationships(311, 313, Some(RelationshipKind::ParentOf))
            .await
            .expect("find")
            .len(),
        1
    );
    assert_eq!(
        storage
            .find_relationships(312, 313, Some(RelationshipKind::ParentOf))
            .await
            .expect("find")
            .len(),
        1
    );

    // A missing parent or a taken kid id is rejected up front.
    let ghost = service.have_a_kid(999, 312, 314, "Jo", "Male").await;
    assert!(matches!(ghost, Err(KintreeError::NotFound(_))));
    let taken = service.have_a_kid(311, 312, 313, "Iris", "Female").await;
    assert!(matches!(taken, Err(KintreeError::Conflict(_))));
}

#[tokio::test]
async fn divorce_assigns_custody_idempotently() {
    let (service, storage) = create_test_service().await;

    service
        .create_family_tree(301, "Alice", 302, "Bob")
        .await
        .expect("tree");
    service
        .have_a_kid(301, 302, 305, "Eve", "Female")
        .await
        .expect("kid");

    for _ in 0..2 {
        service
            .divorce(301, 302, "With Mother")
            .await
            .expect("Failed to divorce");

        let marriage = storage
            .find_relationships(301, 302, Some(RelationshipKind::MarriedTo))
            .await
            .expect("find");
        assert!(marriage.is_empty());

        let custody_edges = storage
            .find_relationships(301, 305, Some(RelationshipKind::HasCustody))
            .await
            .expect("find");
        assert_eq!(custody_edges.len(), 1, "custody edge must not duplicate");

        let eve = storage
            .get_person(305)
            .await
            .expect("get")
            .expect("kid exists");
        assert_eq!(eve.custody, Some(Custody::WithMother));
    }
}

#[tokio::test]
async fn divorce_rejects_unknown_custody_literals() {
    let (service, _storage) = create_test_service().await;

    service
        .create_family_tree(301, "Alice", 302, "Bob")
        .await
        .expect("tree");

    let result = service.divorce(301, 302, "Mother").await;
    assert!(matches!(result, Err(KintreeError::Validation(_))));

    // The marriage is untouched by the rejected request.
    let rendered = service.show().await.expect("show");
    assert!(rendered.contains("Alice (Female) married to Bob (Male)"));
}

#[tokio::test]
async fn divorcing_an_unmarried_pair_is_a_noop() {
    let (service, _storage) = create_test_service().await;

    service
        .create_family_tree(301, "Alice", 302, "Bob")
        .await
        .expect("tree");
    service
        .divorce(301, 302, "With Father")
        .await
        .expect("divorce");

    // Second divorce finds no marriage edge; still not an error.
    service
        .divorce(301, 302, "With Father")
        .await
        .expect("repeat divorce should be a no-op");
}

#[tokio::test]
async fn reference_scenario_end_to_end() {
    let (service, storage) = create_test_service().await;

    service
        .create_family_tree(301, "Alice", 302, "Bob")
        .await
        .expect("tree");

    // The marriage policy rejects marrying a person who already holds an
    // active marriage, so Charlie and Denise enter the graph as unmarried
    // partners with children out of wedlock.
    service
        .marry(301, 303, "Charlie", "Male")
        .await
        .expect_err("Alice is married to Bob");
    storage
        .create_person(Person::new(303, "Charlie", "Male"))
        .await
        .expect("Charlie");
    storage
        .create_person(Person::new(304, "Denise", "Female"))
        .await
        .expect("Denise");
    service
        .have_a_kid(301, 303, 305, "Eve", "Female")
        .await
        .expect("Eve");
    service
        .have_a_kid(302, 304, 306, "Frank", "Male")
        .await
        .expect("Frank");
    service
        .divorce(301, 303, "With Mother")
        .await
        .expect("divorce with custody");

    // The founding marriage is untouched by the (301, 303) divorce.
    assert_eq!(
        storage
            .find_relationships(301, 302, Some(RelationshipKind::MarriedTo))
            .await
            .expect("find")
            .len(),
        1
    );
    assert!(storage
        .find_relationships(301, 303, Some(RelationshipKind::MarriedTo))
        .await
        .expect("find")
        .is_empty());
    assert_eq!(
        storage
            .find_relationships(301, 305, Some(RelationshipKind::ParentOf))
            .await
            .expect("find")
            .len(),
        1
    );
    assert_eq!(
        storage
            .find_relationships(303, 305, Some(RelationshipKind::ParentOf))
            .await
            .expect("find")
            .len(),
        1
    );
    let eve = storage
        .get_person(305)
        .await
        .expect("get")
        .expect("Eve exists");
    assert_eq!(eve.custody, Some(Custody::WithMother));

    // Rendering terminates despite the marriage/divorce/remarriage history.
    let rendered = service.show().await.expect("show");
    assert!(rendered.starts_with("ROOT: Alice (Female) married to Bob (Male)"));
    assert!(rendered.contains("- Eve (Female)"));
}

#[tokio::test]
async fn rendering_terminates_on_marriage_cycles() {
    let (_service, storage) = create_test_service().await;

    let ana = Person::new(100, "Ana", "Female");
    let ben = Person::new(101, "Ben", "Male");
    storage.create_person(ana.clone()).await.expect("person");
    storage.create_person(ben.clone()).await.expect("person");

    // A mutual marriedTo cycle, which the store can represent even though no
    // life event produces it.
    storage
        .create_relationship(Relationship::new(100, RelationshipKind::MarriedTo, 101))
        .await
        .expect("edge");
    storage
        .create_relationship(Relationship::new(101, RelationshipKind::MarriedTo, 100))
        .await
        .expect("edge");

    let tree = FamilyTree {
        root: FamilyRelationship {
            person1: ana,
            person2: ben,
            kind: RelationshipKind::MarriedTo,
        },
    };

    let renderer = TreeRenderer::new(storage.clone() as Arc<dyn GraphStore>);
    let rendered = renderer
        .render(Some(&tree))
        .await
        .expect("render must terminate");

    assert_eq!(
        rendered,
        "ROOT: Ana (Female) married to Ben (Male)\n\
         \t- Ana (Female) married to Ben (Male)\n\
         \t\t- Ben (Male) married to Ana (Female)\n"
    );
}

#[tokio::test]
async fn removing_a_person_detaches_their_relationships() {
    let (service, storage) = create_test_service().await;

    service
        .create_family_tree(301, "Alice", 302, "Bob")
        .await
        .expect("tree");
    service
        .have_a_kid(301, 302, 305, "Eve", "Female")
        .await
        .expect("kid");

    service.remove_person(302).await.expect("Failed to remove");

    assert_eq!(storage.get_person(302).await.expect("get"), None);
    assert!(storage
        .person_relationships(302, None)
        .await
        .expect("edges")
        .is_empty());
    // Alice keeps her own edge to Eve.
    assert_eq!(
        storage
            .find_relationships(301, 305, Some(RelationshipKind::ParentOf))
            .await
            .expect("find")
            .len(),
        1
    );

    let missing = service.remove_person(302).await;
    assert!(matches!(missing, Err(KintreeError::NotFound(_))));
}

#[tokio::test]
async fn a_new_tree_replaces_the_previous_one() {
    let (service, _storage) = create_test_service().await;

    service
        .create_family_tree(301, "Alice", 302, "Bob")
        .await
        .expect("first tree");
    service
        .create_family_tree(401, "Mara", 402, "Nils")
        .await
        .expect("second tree");

    let rendered = service.show().await.expect("show");
    assert!(rendered.starts_with("ROOT: Mara (Female) married to Nils (Male)"));

    service.clear().await.expect("clear");
    assert_eq!(service.show().await.expect("show"), "No family tree found.");
}
