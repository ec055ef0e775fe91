//! # Statistics Handlers
//!
//! Read-only rollups over the current ticket/client/demandeur/user records.
//! Every request recomputes the full snapshot; there is no cache and no
//! materialized view.

use std::collections::HashMap;

use auth::{
    role::{ADMIN_ONLY, ADMIN_OR_ASSISTANT},
    Role,
};
use axum::Json;
use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use entity::{
    sea_orm_active_enums::{TicketEtat, TicketType},
    tickets::{Column as TicketColumn, Entity as TicketsEntity},
    users::{Column as UserColumn, Entity as UsersEntity},
};
use error::{AppError, Result};
use sea_orm::{sea_query::Order, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect};
use uuid::Uuid;

use crate::{
    dto::stats::{
        AdminStatisticsResponse,
        AssistantStatisticsResponse,
        StatsPeriodQuery,
        TicketTypeStat,
        TopClient,
        TopCollaborateur,
    },
    middleware::auth::AuthenticatedUser,
    AppState,
};

/// Start of the requested reporting window, anchored to `now`.
///
/// `week` starts on Sunday, matching the dashboard's calendar; `month` and
/// `year` start on the first day. Unknown periods mean no filter.
fn period_start(period: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let today = now.date_naive();
    let start_day = match period {
        "week" => {
            let days_since_sunday = i64::from(now.weekday().num_days_from_sunday());
            Some(today - Duration::days(days_since_sunday))
        },
        "month" => today.with_day(1),
        "year" => NaiveDate::from_ymd_opt(today.year(), 1, 1),
        _ => None,
    }?;

    Some(start_day.and_hms_opt(0, 0, 0)?.and_utc())
}

/// round(100 * count / total), 0 when total is 0.
fn percentage(count: i64, total: u64) -> i64 {
    if total == 0 {
        0
    }
    else {
        ((count as f64) * 100.0 / (total as f64)).round() as i64
    }
}

/// Rounded mean of the values, 0 when empty.
fn rounded_mean(values: &[i32]) -> i64 {
    if values.is_empty() {
        return 0;
    }
    let sum: i64 = values.iter().map(|v| i64::from(*v)).sum();
    ((sum as f64) / (values.len() as f64)).round() as i64
}

/// Ticket filter for the requested window, applied to the creation date.
fn window_condition(since: Option<DateTime<Utc>>) -> Condition {
    let mut condition = Condition::all();
    if let Some(since) = since {
        condition = condition.add(TicketColumn::CreatedAt.gte(since));
    }
    condition
}

/// Full dashboard rollup (admin only)
pub async fn admin_statistics_handler(
    state: &AppState,
    user: AuthenticatedUser,
    query: StatsPeriodQuery,
) -> Result<Json<AdminStatisticsResponse>> {
    auth::require_any(&user.role, ADMIN_ONLY)?;

    let since = query.period.as_deref().and_then(|p| period_start(p, Utc::now()));
    let window = window_condition(since);

    let total_tickets = TicketsEntity::find()
        .filter(window.clone())
        .count(&state.db)
        .await?;
    let open_tickets = TicketsEntity::find()
        .filter(window.clone())
        .filter(TicketColumn::Etat.ne(TicketEtat::Ferme))
        .count(&state.db)
        .await?;
    let closed_tickets = TicketsEntity::find()
        .filter(window.clone())
        .filter(TicketColumn::Etat.eq(TicketEtat::Ferme))
        .count(&state.db)
        .await?;

    let total_clients = entity::clients::Entity::find().count(&state.db).await?;

    // Distinct demandeurs across the matching tickets, not the registry count
    let demandeur_ids: Vec<Uuid> = TicketsEntity::find()
        .select_only()
        .column(TicketColumn::DemandeurId)
        .filter(window.clone())
        .distinct()
        .into_tuple()
        .all(&state.db)
        .await?;
    let total_demandeurs = demandeur_ids.len() as u64;

    let total_collaborateurs = UsersEntity::find()
        .filter(UserColumn::Role.eq(Role::Collaborateur))
        .count(&state.db)
        .await?;

    let tickets_by_type = type_distribution(state, &window, total_tickets).await?;
    let top_collaborateurs = top_collaborateurs(state, &window).await?;
    let top_clients = top_clients(state, &window).await?;

    // Average over closed tickets with a real resolution time
    let durees: Vec<i32> = TicketsEntity::find()
        .select_only()
        .column(TicketColumn::Duree)
        .filter(window.clone())
        .filter(TicketColumn::Etat.eq(TicketEtat::Ferme))
        .filter(TicketColumn::Duree.gt(0))
        .into_tuple()
        .all(&state.db)
        .await?;
    let avg_resolution_time = rounded_mean(&durees);

    Ok(Json(AdminStatisticsResponse {
        total_tickets,
        open_tickets,
        closed_tickets,
        total_clients,
        total_demandeurs,
        total_collaborateurs,
        tickets_by_type,
        top_collaborateurs,
        top_clients,
        avg_resolution_time,
    }))
}

/// Reduced rollup (admin/assistant), never windowed
pub async fn assistant_statistics_handler(
    state: &AppState,
    user: AuthenticatedUser,
) -> Result<Json<AssistantStatisticsResponse>> {
    auth::require_any(&user.role, ADMIN_OR_ASSISTANT)?;

    let total_tickets = TicketsEntity::find().count(&state.db).await?;
    let open_tickets = TicketsEntity::find()
        .filter(TicketColumn::Etat.ne(TicketEtat::Ferme))
        .count(&state.db)
        .await?;
    let closed_tickets = TicketsEntity::find()
        .filter(TicketColumn::Etat.eq(TicketEtat::Ferme))
        .count(&state.db)
        .await?;
    let total_clients = entity::clients::Entity::find().count(&state.db).await?;
    let total_demandeurs = entity::demandeurs::Entity::find().count(&state.db).await?;

    Ok(Json(AssistantStatisticsResponse {
        total_tickets,
        open_tickets,
        closed_tickets,
        total_clients,
        total_demandeurs,
    }))
}

/// Ticket counts grouped by type, sorted by count descending.
async fn type_distribution(state: &AppState, window: &Condition, total: u64) -> Result<Vec<TicketTypeStat>> {
    let rows: Vec<(TicketType, i64)> = TicketsEntity::find()
        .select_only()
        .column(TicketColumn::Type)
        .column_as(TicketColumn::Id.count(), "count")
        .filter(window.clone())
        .group_by(TicketColumn::Type)
        .order_by(TicketColumn::Id.count(), Order::Desc)
        .into_tuple()
        .all(&state.db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(ty, count)| {
            TicketTypeStat {
                name:       ty.label().to_string(),
                count,
                percentage: percentage(count, total),
            }
        })
        .collect())
}

/// Top five collaborateurs by closed-ticket count.
///
/// Ties are broken by collaborateur id so the ranking is stable across
/// requests.
async fn top_collaborateurs(state: &AppState, window: &Condition) -> Result<Vec<TopCollaborateur>> {
    let rows: Vec<(Uuid, i64)> = TicketsEntity::find()
        .select_only()
        .column(TicketColumn::CollaborateurId)
        .column_as(TicketColumn::Id.count(), "count")
        .filter(window.clone())
        .filter(TicketColumn::Etat.eq(TicketEtat::Ferme))
        .filter(TicketColumn::CollaborateurId.is_not_null())
        .group_by(TicketColumn::CollaborateurId)
        .order_by(TicketColumn::Id.count(), Order::Desc)
        .order_by(TicketColumn::CollaborateurId, Order::Asc)
        .limit(5)
        .into_tuple()
        .all(&state.db)
        .await?;

    let users: HashMap<Uuid, entity::users::Model> = UsersEntity::find()
        .filter(UserColumn::Id.is_in(rows.iter().map(|(id, _)| *id).collect::<Vec<_>>()))
        .all(&state.db)
        .await?
        .into_iter()
        .map(|u| (u.id, u))
        .collect();

    let mut ranking = Vec::with_capacity(rows.len());
    for (id, count) in rows {
        let user = users
            .get(&id)
            .ok_or_else(|| AppError::database(format!("Ranked collaborateur {} no longer exists", id)))?;
        ranking.push(TopCollaborateur {
            id,
            nom: user.nom.clone(),
            prenom: user.prenom.clone(),
            specialite: user.specialite.clone(),
            tickets_count: count,
        });
    }

    Ok(ranking)
}

/// Top five clients by ticket count, ties broken by client id.
async fn top_clients(state: &AppState, window: &Condition) -> Result<Vec<TopClient>> {
    let rows: Vec<(Uuid, i64)> = TicketsEntity::find()
        .select_only()
        .column(TicketColumn::ClientId)
        .column_as(TicketColumn::Id.count(), "count")
        .filter(window.clone())
        .group_by(TicketColumn::ClientId)
        .order_by(TicketColumn::Id.count(), Order::Desc)
        .order_by(TicketColumn::ClientId, Order::Asc)
        .limit(5)
        .into_tuple()
        .all(&state.db)
        .await?;

    let clients: HashMap<Uuid, entity::clients::Model> = entity::clients::Entity::find()
        .filter(entity::clients::Column::Id.is_in(rows.iter().map(|(id, _)| *id).collect::<Vec<_>>()))
        .all(&state.db)
        .await?
        .into_iter()
        .map(|c| (c.id, c))
        .collect();

    let mut ranking = Vec::with_capacity(rows.len());
    for (id, count) in rows {
        let client = clients
            .get(&id)
            .ok_or_else(|| AppError::database(format!("Ranked client {} no longer exists", id)))?;
        ranking.push(TopClient {
            id,
            nom: client.nom.clone(),
            tickets_count: count,
        });
    }

    Ok(ranking)
}
