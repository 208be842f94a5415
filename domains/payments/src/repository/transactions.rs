//! Transactional write paths for webhook reconciliation
//!
//! One gateway callback may touch the payment row, the notifications
//! table, and (for service payments) the conversations table. All row
//! writes for a callback commit or roll back together.

use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::domain::entities::{Mimo, PaymentStatus, ServicePayment};
use crate::repository::{MIMO_COLUMNS, SERVICE_PAYMENT_COLUMNS};
use mimo_common::Result;

/// A notification row to insert alongside a payment update
#[derive(Debug, Clone)]
pub struct NotificationInsert {
    pub user_id: Uuid,
    pub kind: &'static str,
    pub title: String,
    pub body: String,
    pub data: serde_json::Value,
}

/// Contact details for a payment party (cross-domain read)
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PartyProfile {
    pub id: Uuid,
    pub email: String,
    pub display_name: Option<String>,
}

impl PartyProfile {
    /// Name to show in notifications and emails
    pub fn name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.email)
    }
}

/// Load both parties' profiles for notification/email content
pub async fn fetch_party_profiles(
    pool: &PgPool,
    client_id: Uuid,
    creator_id: Uuid,
) -> Result<(PartyProfile, PartyProfile)> {
    let client = fetch_profile(pool, client_id).await?;
    let creator = fetch_profile(pool, creator_id).await?;
    Ok((client, creator))
}

async fn fetch_profile(pool: &PgPool, id: Uuid) -> Result<PartyProfile> {
    let profile = sqlx::query_as::<_, PartyProfile>(
        "SELECT id, email, display_name FROM profiles WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| mimo_common::Error::NotFound(format!("Profile {} not found", id)))?;

    Ok(profile)
}

async fn insert_notification_tx(
    tx: &mut Transaction<'_, Postgres>,
    notification: &NotificationInsert,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO notifications (id, user_id, kind, title, body, data, read_at, created_at)
        VALUES ($1, $2, $3::notification_kind, $4, $5, $6, NULL, NOW())
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(notification.user_id)
    .bind(notification.kind)
    .bind(&notification.title)
    .bind(&notification.body)
    .bind(sqlx::types::Json(notification.data.clone()))
    .execute(&mut **tx)
    .await?;

    Ok(())
}

async fn update_mimo_tx(tx: &mut Transaction<'_, Postgres>, mimo: &Mimo) -> Result<Mimo> {
    let updated = sqlx::query_as::<_, Mimo>(&format!(
        r#"
        UPDATE mimos SET
            status = $2,
            end_to_end_id = $3,
            paid_at = $4,
            updated_at = NOW()
        WHERE id = $1
        RETURNING {}
        "#,
        MIMO_COLUMNS
    ))
    .bind(mimo.id)
    .bind(mimo.status)
    .bind(&mimo.end_to_end_id)
    .bind(mimo.paid_at)
    .fetch_one(&mut **tx)
    .await?;

    Ok(updated)
}

async fn update_service_payment_tx(
    tx: &mut Transaction<'_, Postgres>,
    payment: &ServicePayment,
) -> Result<ServicePayment> {
    let updated = sqlx::query_as::<_, ServicePayment>(&format!(
        r#"
        UPDATE service_payments SET
            status = $2,
            conversation_id = $3,
            end_to_end_id = $4,
            paid_at = $5,
            updated_at = NOW()
        WHERE id = $1
        RETURNING {}
        "#,
        SERVICE_PAYMENT_COLUMNS
    ))
    .bind(payment.id)
    .bind(payment.status)
    .bind(payment.conversation_id)
    .bind(&payment.end_to_end_id)
    .bind(payment.paid_at)
    .fetch_one(&mut **tx)
    .await?;

    Ok(updated)
}

/// Persist a reconciled mimo, with an optional notification insert
pub async fn persist_mimo(
    pool: &PgPool,
    mimo: &Mimo,
    notification: Option<NotificationInsert>,
) -> Result<Mimo> {
    let mut tx = pool.begin().await?;

    let updated = update_mimo_tx(&mut tx, mimo).await?;
    if let Some(ref notification) = notification {
        insert_notification_tx(&mut tx, notification).await?;
    }

    tx.commit().await?;
    Ok(updated)
}

/// Persist a reconciled service payment, with an optional notification.
///
/// When the payment just completed, the client↔creator conversation is
/// created (or reused) in the same transaction and stamped onto the row —
/// the purchase is what unlocks the chat.
pub async fn persist_service_payment(
    pool: &PgPool,
    payment: &ServicePayment,
    notification: Option<NotificationInsert>,
) -> Result<ServicePayment> {
    let mut tx = pool.begin().await?;

    let mut payment = payment.clone();

    if payment.status == PaymentStatus::Completed && payment.conversation_id.is_none() {
        let conversation_id =
            ensure_conversation_tx(&mut tx, payment.client_id, payment.creator_id, payment.id)
                .await?;
        payment.conversation_id = Some(conversation_id);
    }

    let updated = update_service_payment_tx(&mut tx, &payment).await?;
    if let Some(ref notification) = notification {
        insert_notification_tx(&mut tx, notification).await?;
    }

    tx.commit().await?;
    Ok(updated)
}

/// Create-or-reuse the conversation for a client/creator pair
async fn ensure_conversation_tx(
    tx: &mut Transaction<'_, Postgres>,
    client_id: Uuid,
    creator_id: Uuid,
    payment_id: Uuid,
) -> Result<Uuid> {
    sqlx::query(
        r#"
        INSERT INTO conversations (
            id, client_id, creator_id, unlocked_by_payment_id,
            last_message_at, client_unread_count, creator_unread_count,
            created_at, updated_at
        )
        VALUES ($1, $2, $3, $4, NULL, 0, 0, NOW(), NOW())
        ON CONFLICT (client_id, creator_id) DO NOTHING
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(client_id)
    .bind(creator_id)
    .bind(payment_id)
    .execute(&mut **tx)
    .await?;

    let (conversation_id,): (Uuid,) = sqlx::query_as(
        "SELECT id FROM conversations WHERE client_id = $1 AND creator_id = $2",
    )
    .bind(client_id)
    .bind(creator_id)
    .fetch_one(&mut **tx)
    .await?;

    Ok(conversation_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_party_profile_name_prefers_display_name() {
        let profile = PartyProfile {
            id: Uuid::new_v4(),
            email: "ana@example.com".to_string(),
            display_name: Some("Ana".to_string()),
        };
        assert_eq!(profile.name(), "Ana");
    }

    #[test]
    fn test_party_profile_name_falls_back_to_email() {
        let profile = PartyProfile {
            id: Uuid::new_v4(),
            email: "ana@example.com".to_string(),
            display_name: None,
        };
        assert_eq!(profile.name(), "ana@example.com");
    }
}
