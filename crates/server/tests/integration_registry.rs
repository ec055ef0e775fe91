//! # Integration Tests for the Client/Demandeur Registry
//!
//! Each test skips cleanly when `DATABASE_URL` is unset.

mod common;

use auth::Role;
use common::{create_client, create_demandeur, create_user, identity, test_state, unique};
use server::{
    clients::{
        client_demandeurs_handler,
        create_client_handler,
        delete_client_handler,
        get_client_handler,
        update_client_handler,
    },
    demandeurs::{create_demandeur_handler, delete_demandeur_handler, get_demandeur_handler, update_demandeur_handler},
    dto::{
        clients::{CreateClientRequest, UpdateClientRequest},
        demandeurs::{CreateDemandeurRequest, UpdateDemandeurRequest},
    },
};
use uuid::Uuid;

fn client_request() -> CreateClientRequest {
    CreateClientRequest {
        nom:       unique("Entreprise"),
        telephone: "0102030405".to_string(),
        email:     format!("{}@client.example", unique("contact")),
        adresse:   "1 rue des Tests".to_string(),
    }
}

fn demandeur_request(client_id: Uuid) -> CreateDemandeurRequest {
    CreateDemandeurRequest {
        nom: unique("Martin"),
        prenom: "Claire".to_string(),
        telephone: "0607080910".to_string(),
        email: format!("{}@demandeur.example", unique("contact")),
        fonction: "DSI".to_string(),
        client_id,
    }
}

#[tokio::test]
async fn test_client_crud_round_trip() {
    let Some(state) = test_state().await
    else {
        eprintln!("skipping: DATABASE_URL not set");
        return;
    };

    let assistant = create_user(&state, Role::Assistant, None).await;

    let (_, created) = create_client_handler(&state, identity(&assistant), client_request())
        .await
        .unwrap();
    let created = created.0;

    let fetched = get_client_handler(&state, identity(&assistant), created.id).await.unwrap().0;
    assert_eq!(fetched.nom, created.nom);

    let updated = update_client_handler(
        &state,
        identity(&assistant),
        created.id,
        UpdateClientRequest {
            nom:       None,
            telephone: Some("0999999999".to_string()),
            email:     None,
            adresse:   None,
        },
    )
    .await
    .unwrap()
    .0;
    assert_eq!(updated.telephone, "0999999999");
    assert_eq!(updated.nom, created.nom); // untouched fields survive

    delete_client_handler(&state, identity(&assistant), created.id)
        .await
        .expect("client without demandeurs should be deletable");

    let err = get_client_handler(&state, identity(&assistant), created.id).await.unwrap_err();
    assert_eq!(err.code(), "NOT_FOUND");
}

#[tokio::test]
async fn test_client_creation_is_role_gated() {
    let Some(state) = test_state().await
    else {
        eprintln!("skipping: DATABASE_URL not set");
        return;
    };

    let collaborateur = create_user(&state, Role::Collaborateur, Some("réseau")).await;

    let err = create_client_handler(&state, identity(&collaborateur), client_request())
        .await
        .unwrap_err();
    assert_eq!(err.code(), "FORBIDDEN");
}

#[tokio::test]
async fn test_duplicate_client_email_is_validation_error() {
    let Some(state) = test_state().await
    else {
        eprintln!("skipping: DATABASE_URL not set");
        return;
    };

    let assistant = create_user(&state, Role::Assistant, None).await;

    let request = client_request();
    create_client_handler(&state, identity(&assistant), request.clone())
        .await
        .unwrap();

    let mut duplicate = client_request();
    duplicate.email = request.email;
    let err = create_client_handler(&state, identity(&assistant), duplicate)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_demandeur_requires_existing_client() {
    let Some(state) = test_state().await
    else {
        eprintln!("skipping: DATABASE_URL not set");
        return;
    };

    let assistant = create_user(&state, Role::Assistant, None).await;

    let err = create_demandeur_handler(&state, identity(&assistant), demandeur_request(Uuid::new_v4()))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "NOT_FOUND");
}

#[tokio::test]
async fn test_client_with_demandeurs_cannot_be_deleted() {
    let Some(state) = test_state().await
    else {
        eprintln!("skipping: DATABASE_URL not set");
        return;
    };

    let assistant = create_user(&state, Role::Assistant, None).await;
    let client = create_client(&state).await;
    let first = create_demandeur(&state, client.id).await;
    let second = create_demandeur(&state, client.id).await;

    let err = delete_client_handler(&state, identity(&assistant), client.id)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "CONFLICT");

    // The client and both demandeurs survive the failed deletion
    get_client_handler(&state, identity(&assistant), client.id).await.unwrap();
    get_demandeur_handler(&state, identity(&assistant), first.id).await.unwrap();
    get_demandeur_handler(&state, identity(&assistant), second.id).await.unwrap();

    // Removing the demandeurs unblocks the client
    delete_demandeur_handler(&state, identity(&assistant), first.id).await.unwrap();
    delete_demandeur_handler(&state, identity(&assistant), second.id).await.unwrap();
    delete_client_handler(&state, identity(&assistant), client.id).await.unwrap();
}

#[tokio::test]
async fn test_demandeur_detail_joins_owning_client() {
    let Some(state) = test_state().await
    else {
        eprintln!("skipping: DATABASE_URL not set");
        return;
    };

    let assistant = create_user(&state, Role::Assistant, None).await;
    let client = create_client(&state).await;

    let (_, created) = create_demandeur_handler(&state, identity(&assistant), demandeur_request(client.id))
        .await
        .unwrap();
    let created = created.0;
    assert_eq!(created.client.id, client.id);
    assert_eq!(created.client.nom, client.nom);

    let detail = get_demandeur_handler(&state, identity(&assistant), created.id)
        .await
        .unwrap()
        .0;
    assert_eq!(detail.client.adresse, client.adresse);

    let listed = client_demandeurs_handler(&state, identity(&assistant), client.id)
        .await
        .unwrap()
        .0;
    assert!(listed.iter().any(|d| d.id == created.id));
}

#[tokio::test]
async fn test_demandeur_can_move_to_another_client() {
    let Some(state) = test_state().await
    else {
        eprintln!("skipping: DATABASE_URL not set");
        return;
    };

    let assistant = create_user(&state, Role::Assistant, None).await;
    let first = create_client(&state).await;
    let second = create_client(&state).await;
    let demandeur = create_demandeur(&state, first.id).await;

    let updated = update_demandeur_handler(
        &state,
        identity(&assistant),
        demandeur.id,
        UpdateDemandeurRequest {
            nom:       None,
            prenom:    None,
            telephone: None,
            email:     None,
            fonction:  None,
            client_id: Some(second.id),
        },
    )
    .await
    .unwrap()
    .0;
    assert_eq!(updated.client.id, second.id);

    // Moving to a nonexistent client is rejected
    let err = update_demandeur_handler(
        &state,
        identity(&assistant),
        demandeur.id,
        UpdateDemandeurRequest {
            nom:       None,
            prenom:    None,
            telephone: None,
            email:     None,
            fonction:  None,
            client_id: Some(Uuid::new_v4()),
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.code(), "NOT_FOUND");
}
