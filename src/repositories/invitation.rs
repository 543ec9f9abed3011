//! InvitationRepository - invitation storage and the mutual reconciliation
//! engine
//!
//! Creation and acceptance both run inside a transaction scoped to the two
//! rows of one identity pair: the record being written and, when it exists,
//! the reverse pending record. Both entry points share [`reconcile`], so a
//! pair can never end up with one side `accepted` and the other side still
//! `pending` once both have expressed interest. A busy/locked abort is
//! retried exactly once with fresh reads; records are never deleted.

use super::{Read, is_busy};
use crate::dtos::InvitationCountsDTO;
use crate::entities::{Invitation, InvitationStatus};
use chrono::{DateTime, Utc};
use sqlx::{Error, QueryBuilder, Sqlite, SqlitePool, Transaction};
use tracing::debug;

const INVITATION_COLUMNS: &str =
    "invitation_id, sender_id, receiver_id, status, message, created_at, updated_at";

/// A not-yet-persisted invitation. The message is already validated and
/// sanitized by the time it gets here.
#[derive(Debug, Clone)]
pub struct NewInvitation {
    pub sender_id: i64,
    pub receiver_id: i64,
    pub message: Option<String>,
}

/// Listing scope resolved from the caller's role
#[derive(Debug, Clone, Copy)]
pub enum ListScope {
    /// Invitations where the user is sender or receiver
    User(i64),
    /// Every invitation (admin)
    All,
}

pub struct InvitationRepository {
    connection_pool: SqlitePool,
}

impl InvitationRepository {
    pub fn new(connection_pool: SqlitePool) -> Self {
        Self { connection_pool }
    }

    /// Any outstanding (pending/accepted/mutual) invitation for the ordered
    /// pair. Used as the duplicate pre-check before creation; the partial
    /// unique index backs it up under races.
    pub async fn find_outstanding(
        &self,
        sender_id: &i64,
        receiver_id: &i64,
    ) -> Result<Option<Invitation>, Error> {
        sqlx::query_as::<_, Invitation>(
            "SELECT invitation_id, sender_id, receiver_id, status, message, created_at, updated_at \
             FROM invitations \
             WHERE sender_id = ? AND receiver_id = ? \
               AND status IN ('PENDING', 'ACCEPTED', 'MUTUAL')",
        )
        .bind(sender_id)
        .bind(receiver_id)
        .fetch_optional(&self.connection_pool)
        .await
    }

    /// Insert a new pending invitation and reconcile it against a reverse
    /// pending one in the same transaction. Returns the stored record, which
    /// comes back as `Mutual` when the reverse side had already asked.
    pub async fn create_reconciled(&self, new: &NewInvitation) -> Result<Invitation, Error> {
        match self.try_create_reconciled(new).await {
            Err(ref e) if is_busy(e) => {
                debug!("Create transaction aborted, retrying once");
                self.try_create_reconciled(new).await
            }
            other => other,
        }
    }

    async fn try_create_reconciled(&self, new: &NewInvitation) -> Result<Invitation, Error> {
        let mut tx = self.connection_pool.begin().await?;
        let now = Utc::now();

        let invitation_id = sqlx::query(
            "INSERT INTO invitations (sender_id, receiver_id, status, message, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(new.sender_id)
        .bind(new.receiver_id)
        .bind(InvitationStatus::Pending)
        .bind(new.message.as_deref())
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        let status = reconcile(
            &mut tx,
            invitation_id,
            new.sender_id,
            new.receiver_id,
            InvitationStatus::Pending,
            now,
        )
        .await?;

        tx.commit().await?;

        Ok(Invitation {
            invitation_id,
            sender_id: new.sender_id,
            receiver_id: new.receiver_id,
            status,
            message: new.message.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Transition a pending invitation to accepted and reconcile against a
    /// reverse pending one. The transition is guarded in the statement itself
    /// (receiver and pending-state predicates), so `None` means "not pending,
    /// or not yours" without distinguishing the two.
    pub async fn accept_reconciled(
        &self,
        invitation_id: &i64,
        receiver_id: &i64,
    ) -> Result<Option<Invitation>, Error> {
        match self.try_accept_reconciled(invitation_id, receiver_id).await {
            Err(ref e) if is_busy(e) => {
                debug!("Accept transaction aborted, retrying once");
                self.try_accept_reconciled(invitation_id, receiver_id).await
            }
            other => other,
        }
    }

    async fn try_accept_reconciled(
        &self,
        invitation_id: &i64,
        receiver_id: &i64,
    ) -> Result<Option<Invitation>, Error> {
        let mut tx = self.connection_pool.begin().await?;
        let now = Utc::now();

        let updated = sqlx::query(
            "UPDATE invitations SET status = ?, updated_at = ? \
             WHERE invitation_id = ? AND receiver_id = ? AND status = ?",
        )
        .bind(InvitationStatus::Accepted)
        .bind(now)
        .bind(invitation_id)
        .bind(receiver_id)
        .bind(InvitationStatus::Pending)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if updated == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        let row = sqlx::query_as::<_, Invitation>(
            "SELECT invitation_id, sender_id, receiver_id, status, message, created_at, updated_at \
             FROM invitations WHERE invitation_id = ?",
        )
        .bind(invitation_id)
        .fetch_one(&mut *tx)
        .await?;

        let status = reconcile(
            &mut tx,
            row.invitation_id,
            row.sender_id,
            row.receiver_id,
            InvitationStatus::Accepted,
            now,
        )
        .await?;

        tx.commit().await?;

        Ok(Some(Invitation {
            status,
            updated_at: now,
            ..row
        }))
    }

    /// pending -> declined, receiver-guarded. No reconciliation: declining
    /// never creates a match. `None` when the record is not pending or the
    /// caller is not its receiver.
    pub async fn decline(
        &self,
        invitation_id: &i64,
        receiver_id: &i64,
    ) -> Result<Option<Invitation>, Error> {
        let updated = sqlx::query(
            "UPDATE invitations SET status = ?, updated_at = ? \
             WHERE invitation_id = ? AND receiver_id = ? AND status = ?",
        )
        .bind(InvitationStatus::Declined)
        .bind(Utc::now())
        .bind(invitation_id)
        .bind(receiver_id)
        .bind(InvitationStatus::Pending)
        .execute(&self.connection_pool)
        .await?
        .rows_affected();

        if updated == 0 {
            return Ok(None);
        }
        self.read(invitation_id).await
    }

    /// Unconditional status override for operational correction. Bypasses
    /// reconciliation and the terminal-state rules; `None` when the record
    /// does not exist.
    pub async fn set_status(
        &self,
        invitation_id: &i64,
        status: &InvitationStatus,
    ) -> Result<Option<Invitation>, Error> {
        let updated = sqlx::query(
            "UPDATE invitations SET status = ?, updated_at = ? WHERE invitation_id = ?",
        )
        .bind(status)
        .bind(Utc::now())
        .bind(invitation_id)
        .execute(&self.connection_pool)
        .await?
        .rows_affected();

        if updated == 0 {
            return Ok(None);
        }
        self.read(invitation_id).await
    }

    /// One page of invitations for the scope, newest first.
    pub async fn list(
        &self,
        scope: &ListScope,
        status: Option<InvitationStatus>,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<Invitation>, Error> {
        let mut query_builder = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {} FROM invitations",
            INVITATION_COLUMNS
        ));
        push_scope(&mut query_builder, scope, status);
        query_builder.push(" ORDER BY created_at DESC, invitation_id DESC LIMIT ");
        query_builder.push_bind(limit);
        query_builder.push(" OFFSET ");
        query_builder.push_bind(offset);

        query_builder
            .build_query_as::<Invitation>()
            .fetch_all(&self.connection_pool)
            .await
    }

    /// Per-status aggregates over the whole scope, independent of pagination.
    /// `mutual` counts matches (unordered pairs), not rows, so a confirmed
    /// pair reads as one match on a dashboard; `total` counts rows.
    pub async fn count_by_status(&self, scope: &ListScope) -> Result<InvitationCountsDTO, Error> {
        let mut query_builder = QueryBuilder::<Sqlite>::new(
            "SELECT \
               COALESCE(SUM(CASE WHEN status = 'PENDING' THEN 1 ELSE 0 END), 0) AS pending, \
               COALESCE(SUM(CASE WHEN status = 'ACCEPTED' THEN 1 ELSE 0 END), 0) AS accepted, \
               COALESCE(SUM(CASE WHEN status = 'DECLINED' THEN 1 ELSE 0 END), 0) AS declined, \
               COUNT(DISTINCT CASE WHEN status = 'MUTUAL' \
                   THEN MIN(sender_id, receiver_id) || ':' || MAX(sender_id, receiver_id) END) AS mutual, \
               COUNT(*) AS total \
             FROM invitations",
        );
        push_scope(&mut query_builder, scope, None);

        query_builder
            .build_query_as::<InvitationCountsDTO>()
            .fetch_one(&self.connection_pool)
            .await
    }

    /// Row count of the scope narrowed by a status filter; drives the page
    /// arithmetic when a filter is present.
    pub async fn count_filtered(
        &self,
        scope: &ListScope,
        status: InvitationStatus,
    ) -> Result<i64, Error> {
        let mut query_builder = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM invitations");
        push_scope(&mut query_builder, scope, Some(status));

        let (count,): (i64,) = query_builder
            .build_query_as()
            .fetch_one(&self.connection_pool)
            .await?;
        Ok(count)
    }
}

impl Read<Invitation, i64> for InvitationRepository {
    async fn read(&self, id: &i64) -> Result<Option<Invitation>, Error> {
        sqlx::query_as::<_, Invitation>(
            "SELECT invitation_id, sender_id, receiver_id, status, message, created_at, updated_at \
             FROM invitations WHERE invitation_id = ?",
        )
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await
    }
}

/// Shared mutual-detection step for both entry points (create and accept).
/// Given the record that just became pending or accepted, look for the
/// reverse pending invitation; when it exists, promote both rows to `MUTUAL`
/// inside the surrounding transaction. Returns the record's final status.
async fn reconcile(
    tx: &mut Transaction<'_, Sqlite>,
    invitation_id: i64,
    sender_id: i64,
    receiver_id: i64,
    resting_status: InvitationStatus,
    now: DateTime<Utc>,
) -> Result<InvitationStatus, Error> {
    let reverse = sqlx::query_as::<_, Invitation>(
        "SELECT invitation_id, sender_id, receiver_id, status, message, created_at, updated_at \
         FROM invitations \
         WHERE sender_id = ? AND receiver_id = ? AND status = ? AND invitation_id <> ?",
    )
    .bind(receiver_id)
    .bind(sender_id)
    .bind(InvitationStatus::Pending)
    .bind(invitation_id)
    .fetch_optional(&mut **tx)
    .await?;

    let Some(reverse) = reverse else {
        return Ok(resting_status);
    };

    debug!(
        "Reverse invitation {} found, promoting pair to mutual",
        reverse.invitation_id
    );

    sqlx::query("UPDATE invitations SET status = ?, updated_at = ? WHERE invitation_id IN (?, ?)")
        .bind(InvitationStatus::Mutual)
        .bind(now)
        .bind(invitation_id)
        .bind(reverse.invitation_id)
        .execute(&mut **tx)
        .await?;

    Ok(InvitationStatus::Mutual)
}

fn push_scope(
    query_builder: &mut QueryBuilder<'_, Sqlite>,
    scope: &ListScope,
    status: Option<InvitationStatus>,
) {
    let mut has_where = false;
    if let ListScope::User(user_id) = scope {
        query_builder.push(" WHERE (sender_id = ");
        query_builder.push_bind(*user_id);
        query_builder.push(" OR receiver_id = ");
        query_builder.push_bind(*user_id);
        query_builder.push(")");
        has_where = true;
    }
    if let Some(status) = status {
        query_builder.push(if has_where {
            " AND status = "
        } else {
            " WHERE status = "
        });
        query_builder.push_bind(status);
    }
}
