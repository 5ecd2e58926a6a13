//! Customer repository integration tests.

use kabadi_shared::types::PageRequest;
use kabadi_store::repositories::{
    CreateCustomerInput, CustomerError, CustomerRepository, UpdateCustomerInput,
};
use kabadi_store::MemoryStore;

fn repo() -> CustomerRepository<MemoryStore> {
    CustomerRepository::new(MemoryStore::new())
}

fn input(name: &str) -> CreateCustomerInput {
    CreateCustomerInput {
        name: name.to_string(),
        description: None,
        address: None,
        phone: None,
    }
}

#[tokio::test]
async fn test_create_and_get_customer() {
    let repo = repo();

    let created = repo.create(input("Acme")).await.unwrap();
    let fetched = repo.get(created.id).await.unwrap();
    assert_eq!(fetched.name, "Acme");
    assert_eq!(fetched.id, created.id);
}

#[tokio::test]
async fn test_name_uniqueness_is_case_insensitive() {
    let repo = repo();
    repo.create(input("Acme")).await.unwrap();

    let result = repo.create(input("  ACME ")).await;
    assert!(matches!(result, Err(CustomerError::DuplicateName(_))));
}

#[tokio::test]
async fn test_blank_name_is_rejected() {
    let repo = repo();
    let result = repo.create(input("   ")).await;
    assert!(matches!(result, Err(CustomerError::Validation(_))));
}

#[tokio::test]
async fn test_rename_checks_uniqueness_but_allows_self() {
    let repo = repo();
    let acme = repo.create(input("Acme")).await.unwrap();
    repo.create(input("Mac Co")).await.unwrap();

    // Re-casing your own name is fine.
    let updated = repo
        .update(
            acme.id,
            UpdateCustomerInput {
                name: Some("ACME".to_string()),
                ..UpdateCustomerInput::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "ACME");

    // Taking another customer's name is not.
    let result = repo
        .update(
            acme.id,
            UpdateCustomerInput {
                name: Some("mac co".to_string()),
                ..UpdateCustomerInput::default()
            },
        )
        .await;
    assert!(matches!(result, Err(CustomerError::DuplicateName(_))));
}

#[tokio::test]
async fn test_update_patches_optional_fields() {
    let repo = repo();
    let acme = repo.create(input("Acme")).await.unwrap();

    let updated = repo
        .update(
            acme.id,
            UpdateCustomerInput {
                phone: Some("9876543210".to_string()),
                address: Some("Main Rd".to_string()),
                ..UpdateCustomerInput::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.phone.as_deref(), Some("9876543210"));
    assert_eq!(updated.address.as_deref(), Some("Main Rd"));
    assert_eq!(updated.name, "Acme");
}

#[tokio::test]
async fn test_delete_is_a_reported_noop_when_missing() {
    let repo = repo();
    let acme = repo.create(input("Acme")).await.unwrap();

    assert!(repo.delete(acme.id).await.unwrap());
    assert!(!repo.delete(acme.id).await.unwrap());
    assert!(matches!(
        repo.get(acme.id).await,
        Err(CustomerError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_list_sorts_by_name_and_paginates() {
    let repo = repo();
    for name in ["Mac Co", "Acme", "Bharat Metals"] {
        repo.create(input(name)).await.unwrap();
    }

    let page = repo
        .list(PageRequest {
            page: 1,
            per_page: 2,
        })
        .await
        .unwrap();
    let names: Vec<&str> = page.data.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Acme", "Bharat Metals"]);
    assert_eq!(page.meta.total, 3);
    assert_eq!(page.meta.total_pages, 2);

    let page = repo
        .list(PageRequest {
            page: 2,
            per_page: 2,
        })
        .await
        .unwrap();
    let names: Vec<&str> = page.data.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Mac Co"]);
}

#[tokio::test]
async fn test_search_matches_substring_case_insensitively() {
    let repo = repo();
    repo.create(input("Acme")).await.unwrap();
    repo.create(input("Mac Co")).await.unwrap();
    repo.create(input("Bharat Metals")).await.unwrap();

    let matches = repo.search("ac").await.unwrap();
    let names: Vec<&str> = matches.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Acme", "Mac Co"]);
}

#[tokio::test]
async fn test_search_requires_two_characters() {
    let repo = repo();
    repo.create(input("Acme")).await.unwrap();

    assert!(matches!(
        repo.search("a").await,
        Err(CustomerError::Validation(_))
    ));
}
