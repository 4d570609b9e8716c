//! Identifier generation
//!
//! Two identifier families live here:
//! - order numbers: internal, date-stamped, unique without coordination
//! - sale IDs: carrier-facing, daily-sequential, claimed atomically from
//!   the `sale_sequences` table

use chrono_tz::Tz;
use sqlx::SqlitePool;

use crate::db::repository::{RepoResult, sale_sequence};
use crate::utils::time;

/// Generate an internal order number: `SO-YYMMDD-XXXXXXX`.
///
/// The suffix is the hex form of a snowflake id, so numbers stay unique
/// across restarts without touching the database.
pub fn new_order_number(tz: Tz) -> String {
    let stamp = time::format_compact(time::local_today(tz));
    let suffix = shared::util::snowflake_id();
    format!("SO-{stamp}-{suffix:X}")
}

/// Claim the next carrier-facing sale ID: `PREFIXYYMMDDNNNN`.
///
/// The per-date counter increment is a single UPSERT, so two concurrent
/// orders can never receive the same sequence number. The sequence resets
/// by date key; a new business day simply starts a fresh row at 1.
pub async fn new_sale_id(pool: &SqlitePool, prefix: &str, tz: Tz) -> RepoResult<String> {
    let stamp = time::format_compact(time::local_today(tz));
    let seq = sale_sequence::next(pool, &stamp).await?;
    Ok(format!("{prefix}{stamp}{seq:04}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    const TZ: Tz = chrono_tz::Asia::Kuala_Lumpur;

    #[test]
    fn test_order_number_shape() {
        let n = new_order_number(TZ);
        assert!(n.starts_with("SO-"));
        let parts: Vec<&str> = n.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[1].len(), 6);
        assert!(!parts[2].is_empty());
    }

    #[test]
    fn test_order_numbers_unique() {
        let a = new_order_number(TZ);
        let b = new_order_number(TZ);
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_sale_ids_sequential_and_unique() {
        let db = DbService::in_memory().await.unwrap();
        let a = new_sale_id(&db.pool, "MHSB", TZ).await.unwrap();
        let b = new_sale_id(&db.pool, "MHSB", TZ).await.unwrap();
        let c = new_sale_id(&db.pool, "MHSB", TZ).await.unwrap();

        let stamp = time::format_compact(time::local_today(TZ));
        assert_eq!(a, format!("MHSB{stamp}0001"));
        assert_eq!(b, format!("MHSB{stamp}0002"));
        assert_eq!(c, format!("MHSB{stamp}0003"));
    }

    #[tokio::test]
    async fn test_sequence_isolated_per_date() {
        let db = DbService::in_memory().await.unwrap();
        let seq_a = crate::db::repository::sale_sequence::next(&db.pool, "260829")
            .await
            .unwrap();
        let seq_b = crate::db::repository::sale_sequence::next(&db.pool, "260830")
            .await
            .unwrap();
        assert_eq!(seq_a, 1);
        assert_eq!(seq_b, 1);
    }
}
