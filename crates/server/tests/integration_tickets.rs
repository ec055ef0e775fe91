//! # Integration Tests for the Ticket Lifecycle and Statistics
//!
//! Each test skips cleanly when `DATABASE_URL` is unset.

mod common;

use auth::Role;
use common::{create_client, create_demandeur, create_user, identity, test_state};
use server::{
    demandeurs::delete_demandeur_handler,
    dto::{
        stats::StatsPeriodQuery,
        tickets::{AddCommentRequest, AssignRequest, CreateTicketRequest, SetStatusRequest, TicketSummary},
    },
    stats::{admin_statistics_handler, assistant_statistics_handler},
    tickets::{
        add_comment_handler,
        assign_handler,
        create_ticket_handler,
        get_ticket_handler,
        list_tickets_handler,
        recent_tickets_handler,
        set_status_handler,
    },
    AppState,
};
use server::middleware::auth::AuthenticatedUser;
use uuid::Uuid;

async fn make_ticket(state: &AppState, actor: &AuthenticatedUser, client_id: Uuid, demandeur_id: Uuid) -> TicketSummary {
    let (_, ticket) = create_ticket_handler(
        state,
        actor.clone(),
        CreateTicketRequest {
            client_id,
            demandeur_id,
            observation: "L'imprimante ne répond plus".to_string(),
            type_: Some("support".to_string()),
            mode_intervention: Some("à distance".to_string()),
        },
    )
    .await
    .expect("ticket creation should succeed");
    ticket.0
}

#[tokio::test]
async fn test_create_assign_close_scenario() {
    let Some(state) = test_state().await
    else {
        eprintln!("skipping: DATABASE_URL not set");
        return;
    };

    let assistant = create_user(&state, Role::Assistant, None).await;
    let collaborateur = create_user(&state, Role::Collaborateur, Some("imprimantes")).await;
    let client = create_client(&state).await;
    let demandeur = create_demandeur(&state, client.id).await;

    // Created ouvert, unassigned
    let ticket = make_ticket(&state, &identity(&assistant), client.id, demandeur.id).await;
    assert_eq!(ticket.etat, "ouvert");
    assert_eq!(ticket.duree, 0);
    assert!(ticket.collaborateur.is_none());
    assert!(ticket.date_resolution.is_none());

    // Assignment flips ouvert -> en_cours
    let assigned = assign_handler(
        &state,
        identity(&assistant),
        ticket.id,
        AssignRequest {
            collaborateur_id: collaborateur.id,
        },
    )
    .await
    .unwrap()
    .0;
    assert_eq!(assigned.etat, "en_cours");
    assert_eq!(assigned.collaborateur.as_ref().map(|c| c.id), Some(collaborateur.id));

    // Closing sets date_resolution and a non-negative duree
    let closed = set_status_handler(
        &state,
        identity(&collaborateur),
        ticket.id,
        SetStatusRequest {
            status: "ferme".to_string(),
        },
    )
    .await
    .unwrap()
    .0;
    assert_eq!(closed.etat, "ferme");
    assert!(closed.date_resolution.is_some());
    assert!(closed.duree >= 0);
}

#[tokio::test]
async fn test_reopen_is_admin_or_assistant_only_and_reclose_recomputes() {
    let Some(state) = test_state().await
    else {
        eprintln!("skipping: DATABASE_URL not set");
        return;
    };

    let admin = create_user(&state, Role::Admin, None).await;
    let collaborateur = create_user(&state, Role::Collaborateur, Some("postes")).await;
    let client = create_client(&state).await;
    let demandeur = create_demandeur(&state, client.id).await;

    let ticket = make_ticket(&state, &identity(&admin), client.id, demandeur.id).await;
    assign_handler(
        &state,
        identity(&admin),
        ticket.id,
        AssignRequest {
            collaborateur_id: collaborateur.id,
        },
    )
    .await
    .unwrap();

    let closed = set_status_handler(
        &state,
        identity(&admin),
        ticket.id,
        SetStatusRequest {
            status: "ferme".to_string(),
        },
    )
    .await
    .unwrap()
    .0;
    let first_resolution = closed.date_resolution.clone().unwrap();

    // Collaborateur may not reopen
    let err = set_status_handler(
        &state,
        identity(&collaborateur),
        ticket.id,
        SetStatusRequest {
            status: "ouvert".to_string(),
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.code(), "FORBIDDEN");

    // Admin reopens, then the ticket closes again with a fresh resolution date
    let reopened = set_status_handler(
        &state,
        identity(&admin),
        ticket.id,
        SetStatusRequest {
            status: "ouvert".to_string(),
        },
    )
    .await
    .unwrap()
    .0;
    assert_eq!(reopened.etat, "ouvert");

    set_status_handler(
        &state,
        identity(&admin),
        ticket.id,
        SetStatusRequest {
            status: "en_cours".to_string(),
        },
    )
    .await
    .unwrap();

    let reclosed = set_status_handler(
        &state,
        identity(&admin),
        ticket.id,
        SetStatusRequest {
            status: "ferme".to_string(),
        },
    )
    .await
    .unwrap()
    .0;
    let second_resolution = reclosed.date_resolution.unwrap();
    assert!(second_resolution >= first_resolution);
}

#[tokio::test]
async fn test_invalid_transitions_are_rejected() {
    let Some(state) = test_state().await
    else {
        eprintln!("skipping: DATABASE_URL not set");
        return;
    };

    let admin = create_user(&state, Role::Admin, None).await;
    let client = create_client(&state).await;
    let demandeur = create_demandeur(&state, client.id).await;

    let ticket = make_ticket(&state, &identity(&admin), client.id, demandeur.id).await;

    // ouvert -> ferme skips en_cours
    let err = set_status_handler(
        &state,
        identity(&admin),
        ticket.id,
        SetStatusRequest {
            status: "ferme".to_string(),
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.code(), "VALIDATION_ERROR");

    // Unknown status value
    let err = set_status_handler(
        &state,
        identity(&admin),
        ticket.id,
        SetStatusRequest {
            status: "closed".to_string(),
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.code(), "VALIDATION_ERROR");

    // Same-state request is an accepted no-op
    let unchanged = set_status_handler(
        &state,
        identity(&admin),
        ticket.id,
        SetStatusRequest {
            status: "ouvert".to_string(),
        },
    )
    .await
    .unwrap()
    .0;
    assert_eq!(unchanged.etat, "ouvert");
}

#[tokio::test]
async fn test_create_ticket_requires_existing_references() {
    let Some(state) = test_state().await
    else {
        eprintln!("skipping: DATABASE_URL not set");
        return;
    };

    let admin = create_user(&state, Role::Admin, None).await;
    let client = create_client(&state).await;
    let demandeur = create_demandeur(&state, client.id).await;

    let err = create_ticket_handler(
        &state,
        identity(&admin),
        CreateTicketRequest {
            client_id:         Uuid::new_v4(),
            demandeur_id:      demandeur.id,
            observation:       "x".to_string(),
            type_:             None,
            mode_intervention: None,
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.code(), "NOT_FOUND");

    let err = create_ticket_handler(
        &state,
        identity(&admin),
        CreateTicketRequest {
            client_id:         client.id,
            demandeur_id:      Uuid::new_v4(),
            observation:       "x".to_string(),
            type_:             None,
            mode_intervention: None,
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.code(), "NOT_FOUND");
}

#[tokio::test]
async fn test_assign_rejects_non_collaborator_users() {
    let Some(state) = test_state().await
    else {
        eprintln!("skipping: DATABASE_URL not set");
        return;
    };

    let admin = create_user(&state, Role::Admin, None).await;
    let assistant = create_user(&state, Role::Assistant, None).await;
    let client = create_client(&state).await;
    let demandeur = create_demandeur(&state, client.id).await;

    let ticket = make_ticket(&state, &identity(&admin), client.id, demandeur.id).await;

    let err = assign_handler(
        &state,
        identity(&admin),
        ticket.id,
        AssignRequest {
            collaborateur_id: assistant.id,
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.code(), "NOT_FOUND");
}

#[tokio::test]
async fn test_collaborator_scope_yields_not_found() {
    let Some(state) = test_state().await
    else {
        eprintln!("skipping: DATABASE_URL not set");
        return;
    };

    let admin = create_user(&state, Role::Admin, None).await;
    let owner = create_user(&state, Role::Collaborateur, Some("réseau")).await;
    let other = create_user(&state, Role::Collaborateur, Some("postes")).await;
    let client = create_client(&state).await;
    let demandeur = create_demandeur(&state, client.id).await;

    let ticket = make_ticket(&state, &identity(&admin), client.id, demandeur.id).await;
    assign_handler(
        &state,
        identity(&admin),
        ticket.id,
        AssignRequest {
            collaborateur_id: owner.id,
        },
    )
    .await
    .unwrap();

    // The assignee sees the ticket
    get_ticket_handler(&state, identity(&owner), ticket.id).await.unwrap();
    assert!(list_tickets_handler(&state, identity(&owner))
        .await
        .unwrap()
        .0
        .iter()
        .all(|t| t.collaborateur.as_ref().map(|c| c.id) == Some(owner.id)));

    // Another collaborateur gets NotFound, never Forbidden
    let err = get_ticket_handler(&state, identity(&other), ticket.id).await.unwrap_err();
    assert_eq!(err.code(), "NOT_FOUND");

    let err = set_status_handler(
        &state,
        identity(&other),
        ticket.id,
        SetStatusRequest {
            status: "ferme".to_string(),
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.code(), "NOT_FOUND");

    let err = add_comment_handler(
        &state,
        identity(&other),
        ticket.id,
        AddCommentRequest {
            text: "je ne devrais pas pouvoir".to_string(),
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.code(), "NOT_FOUND");
}

#[tokio::test]
async fn test_comments_preserve_insertion_order() {
    let Some(state) = test_state().await
    else {
        eprintln!("skipping: DATABASE_URL not set");
        return;
    };

    let admin = create_user(&state, Role::Admin, None).await;
    let client = create_client(&state).await;
    let demandeur = create_demandeur(&state, client.id).await;

    let ticket = make_ticket(&state, &identity(&admin), client.id, demandeur.id).await;

    for text in ["premier", "deuxième", "troisième"] {
        add_comment_handler(
            &state,
            identity(&admin),
            ticket.id,
            AddCommentRequest {
                text: text.to_string(),
            },
        )
        .await
        .unwrap();
    }

    let detail = get_ticket_handler(&state, identity(&admin), ticket.id).await.unwrap().0;
    let texts: Vec<&str> = detail.comments.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, vec!["premier", "deuxième", "troisième"]);
    assert!(detail.comments.iter().all(|c| c.user.is_some()));
}

#[tokio::test]
async fn test_demandeur_with_tickets_cannot_be_deleted() {
    let Some(state) = test_state().await
    else {
        eprintln!("skipping: DATABASE_URL not set");
        return;
    };

    let admin = create_user(&state, Role::Admin, None).await;
    let client = create_client(&state).await;
    let demandeur = create_demandeur(&state, client.id).await;

    make_ticket(&state, &identity(&admin), client.id, demandeur.id).await;

    let err = delete_demandeur_handler(&state, identity(&admin), demandeur.id)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "CONFLICT");
}

#[tokio::test]
async fn test_recent_tickets_is_limited_to_five() {
    let Some(state) = test_state().await
    else {
        eprintln!("skipping: DATABASE_URL not set");
        return;
    };

    let admin = create_user(&state, Role::Admin, None).await;
    let client = create_client(&state).await;
    let demandeur = create_demandeur(&state, client.id).await;

    for _ in 0 .. 6 {
        make_ticket(&state, &identity(&admin), client.id, demandeur.id).await;
    }

    let recent = recent_tickets_handler(&state, identity(&admin)).await.unwrap().0;
    assert_eq!(recent.len(), 5);
}

#[tokio::test]
async fn test_statistics_shapes_and_gating() {
    let Some(state) = test_state().await
    else {
        eprintln!("skipping: DATABASE_URL not set");
        return;
    };

    let admin = create_user(&state, Role::Admin, None).await;
    let assistant = create_user(&state, Role::Assistant, None).await;
    let collaborateur = create_user(&state, Role::Collaborateur, Some("réseau")).await;
    let client = create_client(&state).await;
    let demandeur = create_demandeur(&state, client.id).await;
    make_ticket(&state, &identity(&admin), client.id, demandeur.id).await;

    let stats = admin_statistics_handler(
        &state,
        identity(&admin),
        StatsPeriodQuery {
            period: None,
        },
    )
    .await
    .unwrap()
    .0;

    assert!(stats.total_tickets >= 1);
    // Other tests run concurrently against the shared database, so only
    // relative properties are asserted here.
    assert!(stats.open_tickets <= stats.total_tickets);
    assert!(stats.closed_tickets <= stats.total_tickets);
    assert!(stats.total_collaborateurs >= 1);
    let percentage_sum: i64 = stats.tickets_by_type.iter().map(|t| t.percentage).sum();
    assert!(percentage_sum <= 100 + stats.tickets_by_type.len() as i64); // rounding slack
    assert!(stats.top_clients.len() <= 5);
    assert!(stats.top_collaborateurs.len() <= 5);
    assert!(stats.avg_resolution_time >= 0);

    // Unknown period behaves like no filter
    let unfiltered = admin_statistics_handler(
        &state,
        identity(&admin),
        StatsPeriodQuery {
            period: Some("quarter".to_string()),
        },
    )
    .await
    .unwrap()
    .0;
    assert!(unfiltered.total_tickets >= stats.total_tickets);

    // Role gating
    let err = admin_statistics_handler(
        &state,
        identity(&assistant),
        StatsPeriodQuery {
            period: None,
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.code(), "FORBIDDEN");

    assistant_statistics_handler(&state, identity(&assistant)).await.unwrap();
    let err = assistant_statistics_handler(&state, identity(&collaborateur))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "FORBIDDEN");
}
